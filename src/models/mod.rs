// Core data structures shared by the planner, the progress tracker and the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Academic scheduling period. Used both to filter sections and as the
/// partition key for stored schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Fall,
    Winter,
    Spring,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Fall => "fall",
            Term::Winter => "winter",
            Term::Spring => "spring",
        }
    }

    /// Maximum number of distinct courses a schedule may hold in this term.
    pub fn course_limit(&self) -> usize {
        match self {
            Term::Winter => 1,
            _ => 6,
        }
    }

    /// Classifies a section by its meeting-date string (e.g. `08/26/2025 - 12/22/2025`).
    ///
    /// Positions are 1-based: position 2 is the last digit of the start month,
    /// position 4 the leading digit of the start day. A missing character
    /// compares as unequal to everything, so a short string with a January
    /// month counts as spring.
    pub fn matches_meeting_dates(&self, meeting_dates: &str) -> bool {
        let bytes = meeting_dates.as_bytes();
        let month_digit = bytes.get(1).copied();
        let day_digit = bytes.get(3).copied();
        match self {
            Term::Fall => month_digit == Some(b'8'),
            Term::Winter => month_digit == Some(b'1') && day_digit == Some(b'0'),
            Term::Spring => month_digit == Some(b'1') && day_digit != Some(b'0'),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fall" => Ok(Term::Fall),
            "winter" => Ok(Term::Winter),
            "spring" => Ok(Term::Spring),
            other => Err(format!("unknown term '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Maps a two-letter schedule code (`Mo`, `Tu`, ...) to its weekday.
    pub fn from_code(code: &str) -> Option<Weekday> {
        match code {
            "Mo" => Some(Weekday::Mon),
            "Tu" => Some(Weekday::Tue),
            "We" => Some(Weekday::Wed),
            "Th" => Some(Weekday::Thu),
            "Fr" => Some(Weekday::Fri),
            "Sa" => Some(Weekday::Sat),
            "Su" => Some(Weekday::Sun),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scheduled offering of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    #[serde(default)]
    pub course_number: i64,
    pub course_title: String,
    #[serde(default)]
    pub course_topic: String,
    pub section: String,
    pub days_and_times: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub instruction_mode: String,
    #[serde(default)]
    pub meeting_dates: String,
}

/// Section joined with its instructor's aggregate rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedSection {
    #[serde(flatten)]
    pub section: CourseSection,
    pub avg_rating: Option<f64>,
    pub rating_count: Option<i64>,
}

/// One meeting of a section on a single day, as stored in a saved schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub day: Weekday,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "class", default)]
    pub course_label: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_number: Option<i64>,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub days_and_times: String,
}

impl ScheduleEvent {
    /// Key that groups the fanned-out days of one course together.
    pub fn course_key(&self) -> String {
        if !self.course_label.is_empty() {
            return self.course_label.clone();
        }
        if let Some(n) = self.course_number {
            return n.to_string();
        }
        format!("course-{}", self.days_and_times)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub instructor: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorRating {
    pub id: i64,
    pub instructor: String,
    pub rating_count: i64,
    pub rating_sum: i64,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub user_id: String,
    pub email: String,
}

/// Stored schedule row for one (user, term). Events are kept exactly as the
/// client sent them; only the planner interprets them as [`ScheduleEvent`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSchedule {
    pub schedule_id: i64,
    pub user_id: String,
    pub term: String,
    pub schedule: Vec<serde_json::Value>,
}
