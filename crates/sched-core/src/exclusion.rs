//! Suppression predicates: periods in which a lecture does not take place.

use chrono::NaiveDate;

use crate::lecture::Lecture;
use crate::period::ValidityPeriod;
use crate::predicate::LecturePredicate;

/// What an [`Exclusion`] checks against the lecture's validity period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    /// An exam block: suppresses lectures whose period overlaps it.
    Exam(ValidityPeriod),
    /// A single day off: suppresses lectures whose period strictly contains it.
    Holiday(NaiveDate),
    /// Both exclusions apply.
    And(Box<Exclusion>, Box<Exclusion>),
}

/// A named condition under which a lecture instance is suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    name: String,
    rule: ExclusionRule,
}

impl Exclusion {
    pub fn new(name: impl Into<String>, rule: ExclusionRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    pub fn exam(name: impl Into<String>, active: ValidityPeriod) -> Self {
        Self::new(name, ExclusionRule::Exam(active))
    }

    pub fn holiday(name: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(name, ExclusionRule::Holiday(date))
    }

    pub const fn rule(&self) -> &ExclusionRule {
        &self.rule
    }

    /// Returns one exclusion that suppresses a lecture only if both do.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let name = format!("{}&{}", self.name, other.name);
        Self::new(name, ExclusionRule::And(Box::new(self), Box::new(other)))
    }
}

impl LecturePredicate for Exclusion {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, lecture: &Lecture) -> bool {
        match &self.rule {
            ExclusionRule::Exam(active) => lecture.validity_period.overlaps(active),
            ExclusionRule::Holiday(date) => lecture.validity_period.date_is_in(*date),
            ExclusionRule::And(a, b) => a.test(lecture) && b.test(lecture),
        }
    }
}
