// Parsing of section day/time strings such as "MoWeFr 09:00AM - 09:50AM".
use crate::models::Weekday;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const DEFAULT_START: ClockTime = ClockTime { hour: 9, minute: 0 };
pub const DEFAULT_END: ClockTime = ClockTime { hour: 10, minute: 0 };

const DEFAULT_START_TOKEN: &str = "09:00AM";
const DEFAULT_END_TOKEN: &str = "10:00AM";

fn day_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("Mo|Tu|We|Th|Fr|Sa|Su").expect("day code pattern is valid"))
}

fn clock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})(AM|PM)").expect("clock pattern is valid"))
}

/// Wall-clock time in 24-hour form. Hours are not range-checked: a token like
/// `13:00PM` stays 13:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    pub hour: u16,
    pub minute: u16,
}

impl ClockTime {
    pub fn minutes(&self) -> u16 {
        self.hour * 60 + self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Result of parsing one section's `daysAndTimes` string. Every day shares
/// the same interval; the raw tokens are kept for user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingPattern {
    pub days: Vec<Weekday>,
    pub start: ClockTime,
    pub end: ClockTime,
    pub start_token: String,
    pub end_token: String,
}

/// Splits a concatenated day-code token (`MoWeFr`) into weekdays.
///
/// Codes are matched left to right without overlap; anything that is not a
/// code is skipped. Repeated codes are kept as-is. An empty result yields
/// `[Mon]`.
pub fn parse_day_codes(token: &str) -> Vec<Weekday> {
    let days: Vec<Weekday> = day_code_regex()
        .find_iter(token)
        .filter_map(|m| Weekday::from_code(m.as_str()))
        .collect();
    if days.is_empty() {
        return vec![Weekday::Mon];
    }
    days
}

/// Parses the first `hh:mmAM`/`hh:mmPM` occurrence in `token`.
/// 12 AM maps to hour 0, 12 PM stays 12, other PM hours add 12.
pub fn parse_clock_12h(token: &str) -> Option<ClockTime> {
    let caps = clock_regex().captures(token)?;
    let mut hour: u16 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u16 = caps.get(2)?.as_str().parse().ok()?;
    let meridiem = caps.get(3)?.as_str().to_uppercase();
    if meridiem == "PM" && hour < 12 {
        hour += 12;
    }
    if meridiem == "AM" && hour == 12 {
        hour = 0;
    }
    Some(ClockTime { hour, minute })
}

/// Converts a 12-hour token to `HH:MM`. Unparseable input yields `09:00`.
pub fn to_24_hour(token: &str) -> String {
    parse_clock_12h(token).unwrap_or(DEFAULT_START).to_string()
}

/// Minutes since midnight for an `HH:MM` string. Non-numeric parts count as
/// 0, and so does an hour too large to convert to minutes.
pub fn to_minutes(time: &str) -> u32 {
    let mut parts = time.split(':');
    let hh = parts.next().map(leading_int).unwrap_or(0);
    let mm = parts.next().map(leading_int).unwrap_or(0);
    hh.checked_mul(60).unwrap_or(0).saturating_add(mm)
}

// parseInt-style: leading digits only, 0 when there are none
fn leading_int(s: &str) -> u32 {
    let digits: String = s.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn token_at<'a>(parts: &[&'a str], idx: usize) -> Option<&'a str> {
    parts.get(idx).copied().filter(|t| !t.is_empty())
}

/// Best-effort parse of a section's day/time string. Never fails: missing or
/// malformed pieces fall back to Monday and 09:00-10:00.
pub fn parse_meeting_pattern(days_and_times: &str) -> MeetingPattern {
    let parts: Vec<&str> = days_and_times.split(' ').collect();
    let days = parse_day_codes(parts.first().copied().unwrap_or(""));

    let start_token = token_at(&parts, 1).unwrap_or(DEFAULT_START_TOKEN);
    let end_token = token_at(&parts, 3)
        .or_else(|| token_at(&parts, 2))
        .unwrap_or(DEFAULT_END_TOKEN);

    MeetingPattern {
        days,
        start: parse_clock_12h(start_token).unwrap_or(DEFAULT_START),
        end: parse_clock_12h(end_token).unwrap_or(DEFAULT_END),
        start_token: start_token.to_string(),
        end_token: end_token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_codes_keep_order_and_duplicates() {
        use Weekday::*;
        assert_eq!(parse_day_codes("MoWeFr"), vec![Mon, Wed, Fri]);
        assert_eq!(parse_day_codes("TuTh"), vec![Tue, Thu]);
        assert_eq!(parse_day_codes("MoMo"), vec![Mon, Mon]);
        assert_eq!(parse_day_codes("SaSu"), vec![Sat, Sun]);
    }

    #[test]
    fn unknown_day_token_defaults_to_monday() {
        assert_eq!(parse_day_codes("TBA"), vec![Weekday::Mon]);
        assert_eq!(parse_day_codes(""), vec![Weekday::Mon]);
    }

    #[test]
    fn to_24_hour_edges() {
        assert_eq!(to_24_hour("12:00AM"), "00:00");
        assert_eq!(to_24_hour("12:00PM"), "12:00");
        assert_eq!(to_24_hour("01:30PM"), "13:30");
        assert_eq!(to_24_hour("9:05am"), "09:05");
        assert_eq!(to_24_hour("garbage"), "09:00");
    }

    #[test]
    fn to_minutes_is_lenient() {
        assert_eq!(to_minutes("09:30"), 570);
        assert_eq!(to_minutes("23:59"), 1439);
        assert_eq!(to_minutes("xx:15"), 15);
        assert_eq!(to_minutes(""), 0);
    }

    #[test]
    fn to_minutes_never_overflows() {
        assert_eq!(to_minutes("99999999:00"), 0);
        assert_eq!(to_minutes("99999999:30"), 30);
        assert_eq!(to_minutes("4294967295:4294967295"), u32::MAX);
        assert_eq!(to_minutes("99999999999999:00"), 0);
    }

    #[test]
    fn meeting_pattern_standard_form() {
        let p = parse_meeting_pattern("MoWeFr 09:00AM - 09:50AM");
        assert_eq!(p.days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        assert_eq!(p.start.to_string(), "09:00");
        assert_eq!(p.end.to_string(), "09:50");
        assert_eq!(p.start_token, "09:00AM");
        assert_eq!(p.end_token, "09:50AM");
    }

    #[test]
    fn meeting_pattern_without_dash_uses_third_token() {
        let p = parse_meeting_pattern("TuTh 01:40PM 02:55PM");
        assert_eq!(p.start.to_string(), "13:40");
        assert_eq!(p.end.to_string(), "14:55");
    }

    #[test]
    fn meeting_pattern_defaults() {
        let p = parse_meeting_pattern("TBA");
        assert_eq!(p.days, vec![Weekday::Mon]);
        assert_eq!(p.start, DEFAULT_START);
        assert_eq!(p.end, DEFAULT_END);

        let p = parse_meeting_pattern("Mo soon - later");
        assert_eq!(p.start.to_string(), "09:00");
        assert_eq!(p.end.to_string(), "10:00");
    }
}
