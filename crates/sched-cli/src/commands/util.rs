//! Shared utilities for CLI commands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sched_core::{ClassroomRegistry, Dispatcher, Filter, Lecture, Schedule, weekday_name};

use crate::Config;

/// Where a one-shot command reads its schedule from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Schedule file (`.csv` or `.json`).
    pub input: PathBuf,

    /// Classroom list (JSON); defaults to `classrooms_path` from the config.
    #[arg(long)]
    pub classrooms: Option<PathBuf>,

    /// Column mapping for CSV input; defaults to `mapping_path` from the config.
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

/// Parses a `kind=requirement` filter argument.
pub fn parse_filter(raw: &str) -> Result<Filter, String> {
    let (kind, requirement) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <kind>=<requirement>, got `{raw}`"))?;
    Filter::of(kind.trim(), requirement.trim()).map_err(|err| err.to_string())
}

/// Fills `registry` from the classroom file, if there is one.
///
/// Returns whether the file's rooms were taken; a registry that is already
/// initialized keeps its rooms.
pub fn initialize_registry(registry: &mut ClassroomRegistry, path: Option<&Path>) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let rooms = sched_io::load_classrooms(path)
        .with_context(|| format!("failed to read classrooms from {}", path.display()))?;
    Ok(registry.initialize(rooms))
}

/// Builds a schedule from `args`, falling back to the configured paths.
pub fn open_schedule(
    args: &SourceArgs,
    config: &Config,
    dispatcher: &Dispatcher,
) -> Result<Schedule> {
    let mut registry = ClassroomRegistry::new();
    let classrooms = args.classrooms.as_deref().or(config.classrooms_path.as_deref());
    initialize_registry(&mut registry, classrooms)?;

    let mapping = args.mapping.as_deref().or(config.mapping_path.as_deref());
    let mut schedule = Schedule::new(config.validity_period());
    schedule
        .load_schedule(dispatcher, &args.input, mapping, &registry)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    tracing::debug!(count = schedule.lectures().len(), "schedule opened");
    Ok(schedule)
}

/// Short `subject (day start-end)` description of a lecture.
pub fn slot(lecture: &Lecture) -> String {
    format!(
        "{} ({} {}-{})",
        lecture.subject,
        weekday_name(lecture.day),
        lecture.start.format("%H:%M"),
        lecture.end.format("%H:%M")
    )
}

/// Writes every classroom double-booking in `schedule`.
pub fn write_conflicts<W: Write>(writer: &mut W, schedule: &Schedule) -> Result<usize> {
    let pairs = schedule.conflicts();
    let lectures = schedule.lectures();
    for &(i, j) in &pairs {
        writeln!(
            writer,
            "  {}: {} / {}",
            lectures[i].classroom_name().unwrap_or("-"),
            slot(&lectures[i]),
            slot(&lectures[j])
        )?;
    }
    Ok(pairs.len())
}

#[cfg(test)]
mod tests {
    use sched_core::{FilterRule, LecturePredicate};

    use super::*;

    #[test]
    fn parse_filter_splits_on_first_equals() {
        let filter = parse_filter("subject=C=C++").unwrap();
        assert_eq!(filter.rule(), &FilterRule::Subject("C=C++".to_string()));
        assert_eq!(filter.name(), "subject_C=C++");
    }

    #[test]
    fn parse_filter_reports_bad_input() {
        assert_eq!(
            parse_filter("group").unwrap_err(),
            "expected <kind>=<requirement>, got `group`"
        );
        assert_eq!(
            parse_filter("colour=red").unwrap_err(),
            "invalid argument: unknown filter type: colour"
        );
    }

    #[test]
    fn missing_classroom_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let mut registry = ClassroomRegistry::new();
        let result = initialize_registry(&mut registry, Some(&temp.path().join("rooms.json")));
        assert!(result.is_err());
        assert!(!registry.is_initialized());
    }

    #[test]
    fn no_classroom_file_leaves_registry_empty() {
        let mut registry = ClassroomRegistry::new();
        assert!(!initialize_registry(&mut registry, None).unwrap());
        assert!(!registry.is_initialized());
    }
}
