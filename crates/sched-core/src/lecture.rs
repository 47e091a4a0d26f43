//! Scheduled teaching sessions.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::ScheduleError;
use crate::classroom::Classroom;
use crate::period::ValidityPeriod;

/// Kind of teaching session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LectureType {
    Lecture,
    Seminar,
    Other,
}

impl LectureType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lecture => "LECTURE",
            Self::Seminar => "SEMINAR",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for LectureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LectureType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LECTURE" => Ok(Self::Lecture),
            "SEMINAR" => Ok(Self::Seminar),
            "OTHER" => Ok(Self::Other),
            _ => Err(ScheduleError::InvalidArgument(format!(
                "unknown lecture type: {s}"
            ))),
        }
    }
}

/// One recurring session: who teaches what, to whom, when and where.
///
/// Identity is `(subject, kind, professor, day, classroom, start, end)`.
/// `groups` and `validity_period` are metadata and take no part in
/// equality or hashing.
#[derive(Debug, Clone)]
pub struct Lecture {
    pub subject: String,
    pub kind: LectureType,
    pub professor: String,
    pub groups: BTreeSet<String>,
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub validity_period: ValidityPeriod,
    /// `None` when the room name did not resolve in the registry.
    pub classroom: Option<Arc<Classroom>>,
}

impl Lecture {
    /// Returns a copy of this lecture held at a different time of day.
    #[must_use]
    pub fn with_times(&self, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Name of the assigned classroom, if any.
    pub fn classroom_name(&self) -> Option<&str> {
        self.classroom.as_deref().map(|room| room.name.as_str())
    }

    /// True if both lectures are assigned to the same room.
    ///
    /// Unassigned lectures never share a room with anything.
    pub fn shares_classroom_with(&self, other: &Self) -> bool {
        match (&self.classroom, &other.classroom) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// True if both lectures occupy the same room during overlapping periods.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.shares_classroom_with(other) && self.validity_period.overlaps(&other.validity_period)
    }
}

impl PartialEq for Lecture {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.kind == other.kind
            && self.professor == other.professor
            && self.day == other.day
            && self.classroom == other.classroom
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Lecture {}

impl Hash for Lecture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.kind.hash(state);
        self.professor.hash(state);
        self.day.hash(state);
        self.classroom.hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for Lecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<&str> = self.groups.iter().map(String::as_str).collect();
        write!(
            f,
            "{:<9} {}-{}  {} ({}) | {} | {} | {}",
            weekday_name(self.day),
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.subject,
            self.kind,
            self.professor,
            groups.join(", "),
            self.classroom_name().unwrap_or("-"),
        )
    }
}

/// Full English weekday name.
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn lecture() -> Lecture {
        Lecture {
            subject: "Algorithms".to_string(),
            kind: LectureType::Lecture,
            professor: "Ana Petrović".to_string(),
            groups: ["101".to_string(), "102".to_string()].into(),
            day: Weekday::Mon,
            start: time(9, 0),
            end: time(11, 0),
            validity_period: ValidityPeriod::new(
                NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            ),
            classroom: Some(Arc::new(Classroom::new("U1", true, 120, 0))),
        }
    }

    #[test]
    fn equality_ignores_groups_and_validity() {
        let a = lecture();
        let mut b = lecture();
        b.groups = ["305".to_string()].into();
        b.validity_period = ValidityPeriod::new(
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 2, 1).unwrap(),
        );
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn equality_covers_identifying_fields() {
        let base = lecture();

        let mut other = lecture();
        other.professor = "Someone Else".to_string();
        assert_ne!(base, other);

        let mut other = lecture();
        other.day = Weekday::Tue;
        assert_ne!(base, other);

        let mut other = lecture();
        other.classroom = None;
        assert_ne!(base, other);

        let mut other = lecture();
        other.kind = LectureType::Seminar;
        assert_ne!(base, other);
    }

    #[test]
    fn with_times_returns_new_value() {
        let original = lecture();
        let moved = original.with_times(time(12, 0), time(14, 0));

        assert_eq!(original.start, time(9, 0));
        assert_eq!(moved.start, time(12, 0));
        assert_eq!(moved.end, time(14, 0));
        assert_eq!(moved.groups, original.groups);
        assert_eq!(moved.validity_period, original.validity_period);
        assert_ne!(moved, original);
    }

    #[test]
    fn unassigned_lectures_never_conflict() {
        let mut a = lecture();
        a.classroom = None;
        let mut b = lecture();
        b.classroom = None;
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn lecture_type_parses_uppercase_names() {
        assert_eq!("SEMINAR".parse::<LectureType>().unwrap(), LectureType::Seminar);
        assert!("seminar".parse::<LectureType>().is_err());
        assert_eq!(LectureType::Other.to_string(), "OTHER");
    }

    #[test]
    fn display_is_single_line() {
        let text = lecture().to_string();
        assert_eq!(
            text,
            "Monday    09:00-11:00  Algorithms (LECTURE) | Ana Petrović | 101, 102 | U1"
        );
    }
}
