use crate::models::{CourseSection, ScheduleEvent, Term, Weekday};
use crate::schedule::conflict::{distinct_course_count, first_conflicting_day};
use crate::schedule::time::parse_meeting_pattern;
use std::collections::HashSet;
use thiserror::Error;

pub const PALETTE: [&str; 7] = [
    "#a64d5d", "#d96b76", "#4d6fa6", "#5da68f", "#7e4da6", "#f0a6b5", "#c7a987",
];

/// Reasons a section cannot be added. The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddSectionError {
    #[error("You've reached the maximum of {limit} course{} for {term} term.", plural(.limit))]
    CourseLimitReached { limit: usize, term: Term },

    #[error("Time conflict detected on {day} from {start_token} to {end_token}. Please choose a different section.")]
    TimeConflict {
        day: Weekday,
        start_token: String,
        end_token: String,
    },
}

fn plural(n: &usize) -> &'static str {
    if *n > 1 { "s" } else { "" }
}

/// Label shared by every event fanned out from one section.
pub fn section_label(section: &CourseSection) -> String {
    format!("{}:{}", section.course_title, section.section)
}

/// Adds `section` to `events`, one event per meeting day.
///
/// The whole section is rejected when the term's course cap is already
/// reached or when any one of its days overlaps an existing event; in
/// both cases `events` is left untouched.
pub fn add_section(
    term: Term,
    events: &[ScheduleEvent],
    section: &CourseSection,
) -> Result<Vec<ScheduleEvent>, AddSectionError> {
    let limit = term.course_limit();
    let current = distinct_course_count(events);
    if current >= limit {
        return Err(AddSectionError::CourseLimitReached { limit, term });
    }

    let pattern = parse_meeting_pattern(&section.days_and_times);
    let start = u32::from(pattern.start.minutes());
    let end = u32::from(pattern.end.minutes());
    if let Some(day) = first_conflicting_day(&pattern.days, start, end, events) {
        return Err(AddSectionError::TimeConflict {
            day,
            start_token: pattern.start_token,
            end_token: pattern.end_token,
        });
    }

    let color = PALETTE[current % PALETTE.len()].to_string();
    let start_time = pattern.start.to_string();
    let end_time = pattern.end.to_string();
    let label = section_label(section);

    let mut out = events.to_vec();
    out.extend(pattern.days.iter().map(|day| ScheduleEvent {
        day: *day,
        start_time: Some(start_time.clone()),
        end_time: Some(end_time.clone()),
        time: Some(start_time.clone()),
        course_label: label.clone(),
        color: color.clone(),
        course_number: Some(section.course_number),
        instructor: section.instructor.clone(),
        room: section.room.clone(),
        days_and_times: section.days_and_times.clone(),
    }));
    Ok(out)
}

/// Removes every day of the course identified by `course_key`.
pub fn remove_course(events: &[ScheduleEvent], course_key: &str) -> Vec<ScheduleEvent> {
    events
        .iter()
        .filter(|e| e.course_key() != course_key)
        .cloned()
        .collect()
}

/// First event of each course, in schedule order. Used to list a
/// multi-day course once.
pub fn course_cards(events: &[ScheduleEvent]) -> Vec<ScheduleEvent> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|e| seen.insert(e.course_key()))
        .cloned()
        .collect()
}
