//! Per-user progress through the course graph.
//!
//! A course is `Locked`, `Unlocked` or `Completed`. The unlocked set is
//! always a pure function of the completed set ([`derive_unlocked`]); a
//! toggle mutates the completed set and then recomputes everything.

use crate::progress::catalog::{Catalog, CourseId};
use crate::progress::columns::{completed_from_row, updates_to_columns};
use crate::progress::rules::{is_satisfied, EXCLUSIVE_PAIRS};
use crate::store::StoreError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

pub type CompletionSet = BTreeSet<CourseId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseState {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Completed,
    Uncompleted,
    /// The course was locked; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub course: CourseId,
    pub action: ToggleAction,
    /// One entry per course whose completion flag flipped.
    pub updates: BTreeMap<CourseId, bool>,
}

/// Persistence of completion flags, keyed by table column (`CSCI_111`).
pub trait CompletionStore {
    fn load_completion(&self, user_id: &str) -> Result<BTreeMap<String, bool>, StoreError>;
    fn patch_completion(&self, user_id: &str, updates: &BTreeMap<String, bool>) -> Result<(), StoreError>;
}

/// Recomputes the unlocked set from scratch.
///
/// Every course whose predicate holds is unlocked; then each exclusive pair
/// locks the sibling of a completed member unless the sibling is itself
/// completed.
pub fn derive_unlocked(catalog: &Catalog, completed: &CompletionSet) -> BTreeSet<CourseId> {
    let mut unlocked: BTreeSet<CourseId> = catalog
        .courses()
        .map(|n| n.id)
        .filter(|id| is_satisfied(catalog, *id, completed))
        .collect();

    for (a, b) in EXCLUSIVE_PAIRS {
        if completed.contains(*a) && !completed.contains(*b) {
            unlocked.remove(*b);
        }
        if completed.contains(*b) && !completed.contains(*a) {
            unlocked.remove(*a);
        }
    }
    unlocked
}

#[derive(Debug, Clone)]
pub struct ProgressTracker<'a> {
    catalog: &'a Catalog,
    completed: CompletionSet,
    unlocked: BTreeSet<CourseId>,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::from_completed(catalog, CompletionSet::new())
    }

    pub fn from_completed(catalog: &'a Catalog, completed: CompletionSet) -> Self {
        let unlocked = derive_unlocked(catalog, &completed);
        ProgressTracker { catalog, completed, unlocked }
    }

    /// Builds a tracker from a stored completion row (`{"CSCI_111": true, ...}`).
    pub fn from_row(catalog: &'a Catalog, row: &BTreeMap<String, bool>) -> Self {
        Self::from_completed(catalog, completed_from_row(catalog, row))
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    pub fn unlocked(&self) -> &BTreeSet<CourseId> {
        &self.unlocked
    }

    pub fn state(&self, id: CourseId) -> CourseState {
        if self.completed.contains(&id) {
            CourseState::Completed
        } else if self.unlocked.contains(&id) {
            CourseState::Unlocked
        } else {
            CourseState::Locked
        }
    }

    /// Flips the completion of `id`. Locked courses are ignored.
    ///
    /// Un-completing also un-completes every completed course reachable
    /// forward from `id`. The unlocked set is re-derived afterwards in both
    /// directions.
    pub fn toggle(&mut self, id: CourseId) -> ToggleOutcome {
        let mut updates: BTreeMap<CourseId, bool> = BTreeMap::new();

        if !self.unlocked.contains(&id) {
            debug!(course = %id, "toggle ignored: course is locked");
            return ToggleOutcome { course: id, action: ToggleAction::Ignored, updates };
        }

        let action = if self.completed.remove(&id) {
            updates.insert(id, false);
            self.remove_downstream(id, &mut updates);
            ToggleAction::Uncompleted
        } else {
            self.completed.insert(id);
            updates.insert(id, true);
            ToggleAction::Completed
        };

        self.unlocked = derive_unlocked(self.catalog, &self.completed);
        ToggleOutcome { course: id, action, updates }
    }

    fn remove_downstream(&mut self, id: CourseId, updates: &mut BTreeMap<CourseId, bool>) {
        for dep in self.catalog.dependents(id) {
            if self.completed.remove(&dep) {
                updates.insert(dep, false);
                self.remove_downstream(dep, updates);
            }
        }
    }

    /// Toggles locally, then writes the batched flag changes in one call.
    ///
    /// Local state is kept even when the write fails; the failure is logged
    /// and reported through the returned flag.
    pub fn toggle_and_persist<S: CompletionStore + ?Sized>(
        &mut self,
        id: CourseId,
        store: &S,
        user_id: &str,
    ) -> (ToggleOutcome, bool) {
        let outcome = self.toggle(id);
        if outcome.updates.is_empty() {
            return (outcome, true);
        }
        let columns = updates_to_columns(&outcome.updates);
        match store.patch_completion(user_id, &columns) {
            Ok(()) => (outcome, true),
            Err(e) => {
                warn!(user_id, course = %id, error = %e, "failed to persist completion changes");
                (outcome, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn id(s: &str) -> CourseId {
        Catalog::standard().lookup(s).unwrap()
    }

    fn tracker_with(done: &[&str]) -> ProgressTracker<'static> {
        ProgressTracker::from_completed(Catalog::standard(), done.iter().map(|s| id(s)).collect())
    }

    #[test]
    fn fresh_tracker_only_unlocks_roots() {
        let t = ProgressTracker::new(Catalog::standard());
        let unlocked: Vec<&str> = t.unlocked().iter().map(|c| c.as_str()).collect();
        assert_eq!(unlocked, vec!["CS_111", "MATH_122"]);
        assert_eq!(t.state(id("CS_211")), CourseState::Locked);
    }

    #[test]
    fn toggling_locked_course_does_nothing() {
        let mut t = ProgressTracker::new(Catalog::standard());
        let out = t.toggle(id("CS_313"));
        assert_eq!(out.action, ToggleAction::Ignored);
        assert!(out.updates.is_empty());
        assert!(t.completed().is_empty());
    }

    #[test]
    fn uncomplete_cascades_through_completed_descendants() {
        let mut t = tracker_with(&["CS_111", "CS_211", "CS_212", "CS_313", "CS_240"]);
        let out = t.toggle(id("CS_111"));
        assert_eq!(out.action, ToggleAction::Uncompleted);
        let flipped: Vec<&str> = out.updates.keys().map(|c| c.as_str()).collect();
        assert_eq!(flipped, vec!["CS_111", "CS_211", "CS_212", "CS_240", "CS_313"]);
        assert!(out.updates.values().all(|v| !*v));
        assert!(t.completed().is_empty());
        assert_eq!(t.state(id("CS_211")), CourseState::Locked);
    }

    #[test]
    fn both_calculus_variants_completed_stay_unlocked() {
        let t = tracker_with(&["MATH_122", "MATH_141", "MATH_151"]);
        assert!(t.unlocked().contains("MATH_141"));
        assert!(t.unlocked().contains("MATH_151"));
    }

    struct RecordingStore {
        fail: bool,
        calls: RefCell<Vec<BTreeMap<String, bool>>>,
    }

    impl CompletionStore for RecordingStore {
        fn load_completion(&self, _user_id: &str) -> Result<BTreeMap<String, bool>, StoreError> {
            Ok(BTreeMap::new())
        }

        fn patch_completion(&self, _user_id: &str, updates: &BTreeMap<String, bool>) -> Result<(), StoreError> {
            self.calls.borrow_mut().push(updates.clone());
            if self.fail {
                return Err(StoreError::NotFound("user".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn persistence_is_one_batched_call_in_column_names() {
        let store = RecordingStore { fail: false, calls: RefCell::new(Vec::new()) };
        let mut t = tracker_with(&["CS_111", "CS_240"]);
        let (_, persisted) = t.toggle_and_persist(id("CS_111"), &store, "u1");
        assert!(persisted);
        let calls = store.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get("CSCI_111"), Some(&false));
        assert_eq!(calls[0].get("CSCI_240"), Some(&false));
    }

    #[test]
    fn failed_persistence_keeps_local_state() {
        let store = RecordingStore { fail: true, calls: RefCell::new(Vec::new()) };
        let mut t = ProgressTracker::new(Catalog::standard());
        let (out, persisted) = t.toggle_and_persist(id("CS_111"), &store, "u1");
        assert!(!persisted);
        assert_eq!(out.action, ToggleAction::Completed);
        assert!(t.completed().contains("CS_111"));
    }

    #[test]
    fn ignored_toggle_skips_persistence() {
        let store = RecordingStore { fail: true, calls: RefCell::new(Vec::new()) };
        let mut t = ProgressTracker::new(Catalog::standard());
        let (_, persisted) = t.toggle_and_persist(id("MATH_241"), &store, "u1");
        assert!(persisted);
        assert!(store.calls.borrow().is_empty());
    }
}
