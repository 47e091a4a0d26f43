//! Cell-level conversions for the tabular format.

use std::sync::LazyLock;

use chrono::{NaiveTime, Weekday};
use regex::Regex;

use sched_core::LectureType;

/// Day abbreviations used by the faculty timetable exports.
const DAY_ABBREVIATIONS: [(&str, Weekday); 7] = [
    ("PON", Weekday::Mon),
    ("UTO", Weekday::Tue),
    ("SRE", Weekday::Wed),
    ("ČET", Weekday::Thu),
    ("PET", Weekday::Fri),
    ("SUB", Weekday::Sat),
    ("NED", Weekday::Sun),
];

/// `H:mm-H:mm` or `H:mm-H`.
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{1,2})\s*-\s*(\d{1,2})(?::(\d{1,2}))?$").unwrap()
});

/// Maps an abbreviation such as `PON` to its weekday.
///
/// Every whitespace character, non-breaking spaces included, is dropped first.
pub fn parse_day(raw: &str) -> Result<Weekday, String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    DAY_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == cleaned)
        .map(|(_, day)| *day)
        .ok_or_else(|| format!("unknown day abbreviation: {cleaned}"))
}

pub fn day_abbreviation(day: Weekday) -> &'static str {
    DAY_ABBREVIATIONS
        .iter()
        .find(|(_, d)| *d == day)
        .map_or("", |(abbr, _)| abbr)
}

/// `P` is a lecture, `V` a seminar; any other code is [`LectureType::Other`].
pub fn parse_lecture_type(code: &str) -> LectureType {
    match code.trim() {
        "P" => LectureType::Lecture,
        "V" => LectureType::Seminar,
        _ => LectureType::Other,
    }
}

pub const fn lecture_type_code(kind: LectureType) -> &'static str {
    match kind {
        LectureType::Lecture => "P",
        LectureType::Seminar => "V",
        LectureType::Other => "D",
    }
}

/// Parses a time range; an end given as a bare hour means `:00`.
pub fn parse_time_range(raw: &str) -> Result<(NaiveTime, NaiveTime), String> {
    let invalid = || format!("invalid time range: {raw}");
    let caps = TIME_RANGE_RE.captures(raw.trim()).ok_or_else(invalid)?;

    let number = |idx: usize| -> Result<u32, String> {
        caps.get(idx)
            .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| invalid()))
    };
    let start = NaiveTime::from_hms_opt(number(1)?, number(2)?, 0).ok_or_else(invalid)?;
    let end = NaiveTime::from_hms_opt(number(3)?, number(4)?, 0).ok_or_else(invalid)?;
    Ok((start, end))
}

/// Formats a time range as `HH:mm-HH:mm`.
pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

/// Splits a comma-separated group list, trimming around each comma.
pub fn parse_groups(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(String::from)
}
