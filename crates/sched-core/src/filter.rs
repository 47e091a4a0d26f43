//! Inclusion predicates that narrow a schedule view.

use crate::error::{ScheduleError, ScheduleResult};
use crate::lecture::Lecture;
use crate::predicate::LecturePredicate;

/// What a [`Filter`] checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRule {
    /// Case-insensitive substring of the subject.
    Subject(String),
    /// Case-insensitive substring of the professor.
    Professor(String),
    /// Exact membership in the lecture's groups.
    Group(String),
    /// Classroom projector flag equals the given value.
    ClassroomProjector(bool),
    /// Classroom has at least this many computers.
    ClassroomComputers(i64),
    /// Case-insensitive substring of the classroom name.
    ClassroomName(String),
    /// Classroom has at least this many seats.
    ClassroomSize(i64),
    /// Both filters pass.
    And(Box<Filter>, Box<Filter>),
}

/// A named inclusion predicate over lectures.
///
/// Filters compare by rule, so a filter rebuilt from the same kind and
/// requirement removes the original from a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    name: String,
    rule: FilterRule,
}

impl Filter {
    /// Builds a filter from a kind keyword and its textual requirement.
    ///
    /// Supported kinds: `subject`, `professor`, `group`,
    /// `classroom-projector`, `classroom-computer`, `classroom-name`,
    /// `classroom-size`.
    pub fn of(kind: &str, requirement: &str) -> ScheduleResult<Self> {
        let rule = match kind {
            "subject" => FilterRule::Subject(requirement.to_string()),
            "professor" => FilterRule::Professor(requirement.to_string()),
            "group" => FilterRule::Group(requirement.to_string()),
            "classroom-projector" => {
                FilterRule::ClassroomProjector(requirement.trim().eq_ignore_ascii_case("true"))
            }
            "classroom-computer" => {
                FilterRule::ClassroomComputers(parse_count(kind, requirement)?)
            }
            "classroom-name" => FilterRule::ClassroomName(requirement.to_string()),
            "classroom-size" => FilterRule::ClassroomSize(parse_count(kind, requirement)?),
            _ => {
                return Err(ScheduleError::InvalidArgument(format!(
                    "unknown filter type: {kind}"
                )));
            }
        };
        Ok(Self::new(rule))
    }

    pub fn new(rule: FilterRule) -> Self {
        let name = match &rule {
            FilterRule::Subject(req) => format!("subject_{req}"),
            FilterRule::Professor(req) => format!("professor_{req}"),
            FilterRule::Group(req) => format!("group_{req}"),
            FilterRule::ClassroomProjector(req) => format!("classroom_projector_{req}"),
            FilterRule::ClassroomComputers(req) => format!("classroom_computer_{req}"),
            FilterRule::ClassroomName(req) => format!("classroom_name_{req}"),
            FilterRule::ClassroomSize(req) => format!("classroom_size_{req}"),
            FilterRule::And(a, b) => format!("{}&{}", a.name, b.name),
        };
        Self { name, rule }
    }

    pub const fn rule(&self) -> &FilterRule {
        &self.rule
    }

    /// Returns a filter that passes only lectures both filters pass.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::new(FilterRule::And(Box::new(self), Box::new(other)))
    }
}

impl LecturePredicate for Filter {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, lecture: &Lecture) -> bool {
        match &self.rule {
            FilterRule::Subject(req) => contains_ignore_case(&lecture.subject, req),
            FilterRule::Professor(req) => contains_ignore_case(&lecture.professor, req),
            FilterRule::Group(req) => lecture.groups.contains(req),
            FilterRule::ClassroomProjector(req) => lecture
                .classroom
                .as_ref()
                .is_some_and(|room| room.has_projector == *req),
            FilterRule::ClassroomComputers(req) => lecture
                .classroom
                .as_ref()
                .is_some_and(|room| i64::from(room.computer_count) >= *req),
            FilterRule::ClassroomName(req) => lecture
                .classroom_name()
                .is_some_and(|name| contains_ignore_case(name, req)),
            FilterRule::ClassroomSize(req) => lecture
                .classroom
                .as_ref()
                .is_some_and(|room| i64::from(room.seat_count) >= *req),
            FilterRule::And(a, b) => a.test(lecture) && b.test(lecture),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A negative count is accepted and matches every assigned classroom.
fn parse_count(kind: &str, requirement: &str) -> ScheduleResult<i64> {
    requirement.trim().parse().map_err(|_| {
        ScheduleError::InvalidArgument(format!(
            "{kind} filter expects a number, got `{requirement}`"
        ))
    })
}
