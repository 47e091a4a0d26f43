//! Named lecture predicates and the folds that combine a list of them.
//!
//! Filters and exclusions are both kept as explicit ordered lists. How a list
//! is combined is decided by the fold applied to it, not by the predicates:
//! filters are combined with [`all_match`], exclusions with [`any_match`].

use crate::lecture::Lecture;

/// A named yes/no question about a lecture.
pub trait LecturePredicate {
    /// Human-readable identifier, used to remove the predicate by name.
    fn name(&self) -> &str;

    fn test(&self, lecture: &Lecture) -> bool;
}

/// Conjunction of `predicates`; `true` for an empty list.
pub fn all_match<'a, P>(predicates: impl IntoIterator<Item = &'a P>, lecture: &Lecture) -> bool
where
    P: LecturePredicate + 'a,
{
    predicates
        .into_iter()
        .fold(true, |acc, predicate| acc && predicate.test(lecture))
}

/// Disjunction of `predicates`; `false` for an empty list.
pub fn any_match<'a, P>(predicates: impl IntoIterator<Item = &'a P>, lecture: &Lecture) -> bool
where
    P: LecturePredicate + 'a,
{
    predicates
        .into_iter()
        .fold(false, |acc, predicate| acc || predicate.test(lecture))
}
