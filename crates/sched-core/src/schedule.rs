//! The schedule aggregate: lectures, active filters and exclusions.

use std::path::Path;

use chrono::{Datelike, Days, NaiveTime};

use crate::classroom::ClassroomRegistry;
use crate::error::{ScheduleError, ScheduleResult};
use crate::exclusion::Exclusion;
use crate::filter::Filter;
use crate::lecture::Lecture;
use crate::period::ValidityPeriod;
use crate::persist::{Dispatcher, LoadContext};
use crate::predicate::{LecturePredicate, all_match, any_match};

/// A timetable of lectures plus the query state applied to it.
///
/// Single insertions through [`add_lecture`](Self::add_lecture) keep every
/// classroom free of overlapping bookings. Bulk loads replace the sequence as
/// read from the file and are not checked; use [`conflicts`](Self::conflicts)
/// to inspect them.
#[derive(Debug, Clone)]
pub struct Schedule {
    lectures: Vec<Lecture>,
    filters: Vec<Filter>,
    exclusions: Vec<Exclusion>,
    validity_period: ValidityPeriod,
}

impl Schedule {
    /// Creates an empty schedule valid over `validity_period`.
    pub const fn new(validity_period: ValidityPeriod) -> Self {
        Self {
            lectures: Vec::new(),
            filters: Vec::new(),
            exclusions: Vec::new(),
            validity_period,
        }
    }

    pub fn lectures(&self) -> &[Lecture] {
        &self.lectures
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub const fn validity_period(&self) -> ValidityPeriod {
        self.validity_period
    }

    // ========== Persistence ==========

    /// Replaces every lecture with the contents of `source`.
    ///
    /// `config` is the format's mapping file, if it needs one. Lectures are
    /// taken as loaded; no conflict check runs.
    pub fn load_schedule(
        &mut self,
        dispatcher: &Dispatcher,
        source: &Path,
        config: Option<&Path>,
        registry: &ClassroomRegistry,
    ) -> ScheduleResult<()> {
        let ctx = LoadContext {
            registry,
            mapping: config,
            default_validity: self.validity_period,
        };
        self.lectures = dispatcher.load(source, &ctx)?;
        tracing::info!(
            path = %source.display(),
            count = self.lectures.len(),
            "schedule loaded"
        );
        Ok(())
    }

    /// Writes every lecture to `dest`.
    pub fn export_schedule(&self, dispatcher: &Dispatcher, dest: &Path) -> ScheduleResult<()> {
        dispatcher.write(&self.lectures, dest)
    }

    /// Writes only the lectures passing the active filters to `dest`.
    pub fn export_filtered_schedule(
        &self,
        dispatcher: &Dispatcher,
        dest: &Path,
    ) -> ScheduleResult<()> {
        dispatcher.write(&self.filtered(), dest)
    }

    // ========== Filters and exclusions ==========

    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Removes the first filter equal to `filter`; absent filters are ignored.
    pub fn remove_filter(&mut self, filter: &Filter) {
        if let Some(idx) = self.filters.iter().position(|f| f == filter) {
            self.filters.remove(idx);
        }
    }

    /// Removes every filter called `name`, returning how many were removed.
    pub fn remove_filter_named(&mut self, name: &str) -> usize {
        let before = self.filters.len();
        self.filters.retain(|f| f.name() != name);
        before - self.filters.len()
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn add_exclusion(&mut self, exclusion: Exclusion) {
        self.exclusions.push(exclusion);
    }

    /// Removes the first exclusion equal to `exclusion`; absent ones are ignored.
    pub fn remove_exclusion(&mut self, exclusion: &Exclusion) {
        if let Some(idx) = self.exclusions.iter().position(|e| e == exclusion) {
            self.exclusions.remove(idx);
        }
    }

    /// Removes every exclusion called `name`, returning how many were removed.
    pub fn remove_exclusion_named(&mut self, name: &str) -> usize {
        let before = self.exclusions.len();
        self.exclusions.retain(|e| e.name() != name);
        before - self.exclusions.len()
    }

    pub fn clear_exclusions(&mut self) {
        self.exclusions.clear();
    }

    // ========== Queries ==========

    /// Lectures passing every active filter, in schedule order.
    pub fn filtered(&self) -> Vec<Lecture> {
        self.lectures
            .iter()
            .filter(|lecture| all_match(&self.filters, lecture))
            .cloned()
            .collect()
    }

    /// True if any active exclusion suppresses `lecture`.
    pub fn is_excluded(&self, lecture: &Lecture) -> bool {
        any_match(&self.exclusions, lecture)
    }

    /// Filtered lectures that no active exclusion suppresses.
    pub fn visible(&self) -> Vec<Lecture> {
        self.lectures
            .iter()
            .filter(|lecture| all_match(&self.filters, lecture) && !self.is_excluded(lecture))
            .cloned()
            .collect()
    }

    /// Index pairs `(i, j)`, `i < j`, of lectures double-booking a classroom.
    pub fn conflicts(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.lectures.iter().enumerate() {
            for (j, b) in self.lectures.iter().enumerate().skip(i + 1) {
                if a.conflicts_with(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Expands the weekly lectures into one single-day lecture per date of
    /// the schedule's validity period on which they are held.
    pub fn occurrences(&self) -> Vec<Lecture> {
        let lectures = &self.lectures;
        self.validity_period
            .days()
            .flat_map(move |date| {
                let next = date + Days::new(1);
                lectures
                    .iter()
                    .filter(move |lecture| lecture.day == date.weekday())
                    .map(move |lecture| Lecture {
                        validity_period: ValidityPeriod::new(date, next),
                        ..lecture.clone()
                    })
            })
            .collect()
    }

    /// Dated occurrences of the lectures passing every active filter.
    pub fn filtered_occurrences(&self) -> Vec<Lecture> {
        self.occurrences()
            .into_iter()
            .filter(|lecture| all_match(&self.filters, lecture))
            .collect()
    }

    // ========== Mutation ==========

    /// Appends `lecture` if its classroom is free for its validity period.
    ///
    /// Returns `false`, leaving the schedule unchanged, when another lecture
    /// already holds the same classroom during an overlapping period.
    pub fn add_lecture(&mut self, lecture: Lecture) -> bool {
        if !self.has_free_spot(&lecture) {
            tracing::debug!(
                subject = %lecture.subject,
                classroom = lecture.classroom_name().unwrap_or("-"),
                "classroom already booked"
            );
            return false;
        }
        self.lectures.push(lecture);
        true
    }

    /// Removes the first lecture equal to `lecture`.
    pub fn remove_lecture(&mut self, lecture: &Lecture) -> bool {
        match self.lectures.iter().position(|l| l == lecture) {
            Some(idx) => {
                self.lectures.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Moves `lecture` to a new time of day.
    ///
    /// The first equal entry is removed and the retimed lecture is appended
    /// through [`Self::add_lecture`]. If the retimed lecture conflicts, the
    /// add is refused, `Ok(false)` is returned and the lecture stays removed.
    pub fn move_lecture(
        &mut self,
        lecture: &Lecture,
        start: NaiveTime,
        end: NaiveTime,
    ) -> ScheduleResult<bool> {
        let idx = self
            .lectures
            .iter()
            .position(|l| l == lecture)
            .ok_or_else(|| ScheduleError::InvalidArgument("lecture not in schedule".to_string()))?;

        let candidate = self.lectures.remove(idx).with_times(start, end);
        let added = self.add_lecture(candidate);
        if !added {
            tracing::warn!(
                subject = %lecture.subject,
                "moved lecture dropped, classroom already booked"
            );
        }
        Ok(added)
    }

    /// Orders lectures by day (Monday first), then start, then end.
    ///
    /// The sort is stable: lectures equal on all three keys keep their order.
    pub fn sort(&mut self) {
        self.lectures
            .sort_by_key(|l| (l.day.num_days_from_monday(), l.start, l.end));
    }

    fn has_free_spot(&self, candidate: &Lecture) -> bool {
        !self
            .lectures
            .iter()
            .any(|existing| existing.conflicts_with(candidate))
    }
}
