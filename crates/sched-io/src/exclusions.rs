//! Exclusion files.
//!
//! A JSON array of tagged entries, one per excluded span:
//!
//! ```json
//! [
//!   { "type": "examExclusion", "name": "January exams",
//!     "active": { "validFrom": "2025-01-20", "validTo": "2025-02-10" } },
//!   { "type": "holidayExclusion", "name": "Statehood Day", "date": "2025-02-15" }
//! ]
//! ```
//!
//! `testExclusion` is read as an exam exclusion.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use sched_core::{Exclusion, ScheduleError, ScheduleResult, ValidityPeriod};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ExclusionRecord {
    #[serde(alias = "testExclusion")]
    ExamExclusion { name: String, active: ValidityPeriod },
    HolidayExclusion { name: String, date: NaiveDate },
}

impl From<ExclusionRecord> for Exclusion {
    fn from(record: ExclusionRecord) -> Self {
        match record {
            ExclusionRecord::ExamExclusion { name, active } => Self::exam(name, active),
            ExclusionRecord::HolidayExclusion { name, date } => Self::holiday(name, date),
        }
    }
}

/// Reads every exclusion listed in the file at `path`.
pub fn load_exclusions(path: &Path) -> ScheduleResult<Vec<Exclusion>> {
    if !path.exists() {
        return Err(ScheduleError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let records: Vec<ExclusionRecord> = serde_json::from_str(&text)
        .map_err(|err| ScheduleError::parse(path.display().to_string(), err.to_string()))?;

    Ok(records.into_iter().map(Exclusion::from).collect())
}
