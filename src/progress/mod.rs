// Prerequisite progress tracker over the static mandatory-course graph.
pub mod catalog;
pub mod columns;
pub mod rules;
pub mod tracker;

pub use catalog::{Catalog, Category, CourseId, CourseNode};
pub use columns::{completion_columns, from_db_column, to_db_column};
pub use rules::{Prerequisite, Rule};
pub use tracker::{derive_unlocked, CompletionSet, CompletionStore, CourseState, ProgressTracker, ToggleAction, ToggleOutcome};
