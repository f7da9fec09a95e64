// Overlap detection between a candidate meeting and already scheduled events.
use crate::models::{ScheduleEvent, Weekday};
use crate::schedule::time::to_minutes;
use std::collections::HashSet;

/// Half-open `[start, end)` interval overlap. Touching endpoints do not overlap.
pub fn intervals_overlap(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Interval of a stored event in minutes. Falls back to `time` and then to
/// the whole day when start or end is missing.
pub fn event_interval(evt: &ScheduleEvent) -> (u32, u32) {
    let start = evt
        .start_time
        .as_deref()
        .or(evt.time.as_deref())
        .unwrap_or("00:00");
    let end = evt
        .end_time
        .as_deref()
        .or(evt.time.as_deref())
        .unwrap_or("23:59");
    (to_minutes(start), to_minutes(end))
}

/// True if any existing event on `day` overlaps `[start, end)`.
pub fn has_time_conflict(day: Weekday, start: u32, end: u32, existing: &[ScheduleEvent]) -> bool {
    existing
        .iter()
        .filter(|evt| evt.day == day)
        .any(|evt| intervals_overlap((start, end), event_interval(evt)))
}

/// First day among `days` that conflicts with `existing`, if any.
pub fn first_conflicting_day(days: &[Weekday], start: u32, end: u32, existing: &[ScheduleEvent]) -> Option<Weekday> {
    days.iter()
        .copied()
        .find(|d| has_time_conflict(*d, start, end, existing))
}

/// Number of distinct courses in an event list, counted by course key.
pub fn distinct_course_count(events: &[ScheduleEvent]) -> usize {
    events.iter().map(|e| e.course_key()).collect::<HashSet<_>>().len()
}
