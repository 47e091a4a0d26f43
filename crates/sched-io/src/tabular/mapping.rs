//! Column-mapping configuration for tabular input.
//!
//! One mapping per line: `<columnIndex> <customLabel> <fieldName>`, e.g.
//!
//! ```text
//! 0 Predmet name
//! 1 Tip type
//! 5 Termin timeRange
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use sched_core::{ScheduleError, ScheduleResult};

/// Lecture attribute a column is read into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LectureField {
    Name,
    Type,
    Professor,
    Groups,
    Day,
    TimeRange,
    Classroom,
}

impl LectureField {
    /// Every field in export column order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Type,
        Self::Professor,
        Self::Groups,
        Self::Day,
        Self::TimeRange,
        Self::Classroom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Professor => "professor",
            Self::Groups => "groups",
            Self::Day => "day",
            Self::TimeRange => "timeRange",
            Self::Classroom => "classroom",
        }
    }
}

impl fmt::Display for LectureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LectureField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown lecture field `{s}`"))
    }
}

/// One configured column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Zero-based column index in the CSV record.
    pub index: usize,
    /// Free-form label, usually the column's header text.
    pub label: String,
    pub field: LectureField,
}

/// Reads the mapping file at `path`.
pub fn read_mapping(path: &Path) -> ScheduleResult<Vec<ColumnMapping>> {
    if !path.exists() {
        return Err(ScheduleError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    parse_mapping(&text, &path.display().to_string())
}

/// Parses mapping lines; blank lines are skipped.
pub fn parse_mapping(text: &str, source_name: &str) -> ScheduleResult<Vec<ColumnMapping>> {
    let mut mappings = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fail = |message: String| {
            ScheduleError::parse(source_name, format!("line {}: {message}", idx + 1))
        };

        let mut parts = line.splitn(3, ' ');
        let (Some(index), Some(label), Some(field)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(fail(format!(
                "expected `<columnIndex> <customLabel> <fieldName>`, got `{line}`"
            )));
        };
        let index = index
            .parse()
            .map_err(|_| fail(format!("invalid column index `{index}`")))?;
        let field = field.trim().parse().map_err(fail)?;

        mappings.push(ColumnMapping {
            index,
            label: label.to_string(),
            field,
        });
    }
    Ok(mappings)
}
