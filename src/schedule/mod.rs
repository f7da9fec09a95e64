// Schedule builder: parses section times, checks conflicts and the term
// course cap, and fans sections out into per-day events.
pub mod builder;
pub mod conflict;
pub mod time;

pub use builder::{add_section, course_cards, remove_course, AddSectionError};
pub use conflict::{distinct_course_count, has_time_conflict, intervals_overlap};
pub use time::{parse_day_codes, parse_meeting_pattern, to_24_hour, to_minutes, ClockTime, MeetingPattern};
