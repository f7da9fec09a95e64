// Request and query shapes accepted by the JSON API.
pub mod handlers;

use crate::models::{CourseSection, ScheduleEvent};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub title: Option<String>,
    pub instructor: Option<String>,
    pub term: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TermSectionsQuery {
    pub title: Option<String>,
    pub term: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstructorQuery {
    pub instructor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub user_id: Option<String>,
    pub term: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub instructor: String,
    pub user_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScheduleRequest {
    pub user_id: String,
    pub term: String,
    #[serde(default)]
    pub schedule: Vec<Value>,
}

/// Body of `POST /api/planner/add-section`: the current events of a term
/// plus the section to add.
#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    pub term: String,
    #[serde(default)]
    pub events: Vec<ScheduleEvent>,
    pub section: CourseSection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub course_id: String,
}

/// Treats a blank query value as missing.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
