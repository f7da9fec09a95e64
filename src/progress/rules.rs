//! Unlock predicates per course.
//!
//! Most courses use the generic rule: unlocked once any direct prerequisite
//! is completed (or immediately, when they have none). The courses listed in
//! [`OVERRIDES`] replace that rule with an explicit expression; the table is
//! not derivable from the edge list and must be kept as written.

use crate::progress::catalog::{Catalog, CourseId};
use std::collections::BTreeSet;

/// Boolean expression over completed course ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Course(&'static str),
    All(&'static [Rule]),
    Any(&'static [Rule]),
}

impl Rule {
    pub fn eval(&self, completed: &BTreeSet<CourseId>) -> bool {
        match self {
            Rule::Course(id) => completed.contains(*id),
            Rule::All(rules) => rules.iter().all(|r| r.eval(completed)),
            Rule::Any(rules) => rules.iter().any(|r| r.eval(completed)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    /// No prerequisites, or at least one direct prerequisite completed.
    AnyDirect,
    Custom(Rule),
}

const CALCULUS_1: Rule = Rule::Any(&[Rule::Course("MATH_141"), Rule::Course("MATH_151")]);

pub const OVERRIDES: &[(&str, Rule)] = &[
    ("CS_211", Rule::Course("CS_111")),
    ("CS_212", Rule::Course("CS_111")),
    ("CS_220", Rule::All(&[Rule::Course("CS_111"), CALCULUS_1])),
    ("MATH_231", CALCULUS_1),
    ("CS_313", Rule::All(&[Rule::Course("CS_211"), Rule::Course("CS_212")])),
    ("CS_316", Rule::All(&[Rule::Course("CS_313"), Rule::Course("CS_320"), Rule::Course("CS_240")])),
    ("CS_340", Rule::All(&[Rule::Course("CS_313"), Rule::Course("CS_240")])),
    ("CS_343", Rule::All(&[Rule::Course("CS_240"), Rule::Course("CS_320")])),
    ("CS_320", Rule::Course("CS_220")),
];

/// Alternative courses: completing one locks the other out.
pub const EXCLUSIVE_PAIRS: &[(&str, &str)] = &[("MATH_141", "MATH_151")];

pub fn prerequisite_for(id: CourseId) -> Prerequisite {
    OVERRIDES
        .iter()
        .find(|(course, _)| *course == id.as_str())
        .map(|(_, rule)| Prerequisite::Custom(*rule))
        .unwrap_or(Prerequisite::AnyDirect)
}

/// Evaluates the unlock predicate of `id` against `completed`.
pub fn is_satisfied(catalog: &Catalog, id: CourseId, completed: &BTreeSet<CourseId>) -> bool {
    match prerequisite_for(id) {
        Prerequisite::Custom(rule) => rule.eval(completed),
        Prerequisite::AnyDirect => {
            let prereqs = catalog.prerequisites(id);
            prereqs.is_empty() || prereqs.iter().any(|p| completed.contains(p))
        }
    }
}
