//! Date intervals over which a lecture (or a whole schedule) is active.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A date range bounded by `valid_from` and `valid_to`.
///
/// Both comparisons are strict: periods that merely touch on a boundary date
/// do not overlap, and neither boundary date is considered inside the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityPeriod {
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl ValidityPeriod {
    pub const fn new(valid_from: NaiveDate, valid_to: NaiveDate) -> Self {
        Self {
            valid_from,
            valid_to,
        }
    }

    /// Returns true if `date` lies strictly between the two boundaries.
    pub fn date_is_in(&self, date: NaiveDate) -> bool {
        self.valid_from < date && date < self.valid_to
    }

    /// Returns true if the two periods share at least one instant.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.valid_from < other.valid_to && self.valid_to > other.valid_from
    }

    /// Iterates every date from `valid_from` up to, but excluding, `valid_to`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.valid_to;
        self.valid_from
            .iter_days()
            .take_while(move |date| *date < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(from: (u32, u32), to: (u32, u32)) -> ValidityPeriod {
        ValidityPeriod::new(date(2024, from.0, from.1), date(2024, to.0, to.1))
    }

    #[test]
    fn overlapping_periods_overlap() {
        let a = period((1, 1), (1, 20));
        let b = period((1, 10), (2, 1));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn overlaps_is_symmetric() {
        let cases = [
            (period((1, 1), (1, 20)), period((1, 10), (2, 1))),
            (period((1, 1), (1, 10)), period((1, 10), (1, 20))),
            (period((1, 1), (3, 1)), period((1, 5), (1, 6))),
            (period((1, 1), (1, 2)), period((5, 1), (6, 1))),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn touching_periods_do_not_overlap() {
        let a = period((1, 1), (1, 10));
        let b = period((1, 10), (1, 20));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn contained_period_overlaps() {
        let outer = period((1, 1), (6, 1));
        let inner = period((2, 1), (2, 2));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn date_is_in_excludes_boundaries() {
        let p = period((3, 1), (3, 31));
        assert!(!p.date_is_in(date(2024, 3, 1)));
        assert!(!p.date_is_in(date(2024, 3, 31)));
        assert!(p.date_is_in(date(2024, 3, 2)));
        assert!(p.date_is_in(date(2024, 3, 30)));
        assert!(!p.date_is_in(date(2024, 4, 15)));
    }

    #[test]
    fn days_excludes_end_date() {
        let p = period((3, 1), (3, 4));
        let days: Vec<_> = p.days().collect();
        assert_eq!(days, vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]);
    }

    #[test]
    fn serde_uses_camel_case_iso_dates() {
        let p = period((10, 1), (12, 24));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"validFrom":"2024-10-01","validTo":"2024-12-24"}"#);
        let parsed: ValidityPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
    }
}
