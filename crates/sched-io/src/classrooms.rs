//! Classroom configuration files.
//!
//! A JSON array of room descriptors:
//!
//! ```json
//! [{ "classroom": "RAF1", "projector": true, "no_spaces": 30, "computers": 30 }]
//! ```

use std::path::Path;

use serde::Deserialize;

use sched_core::{Classroom, ScheduleError, ScheduleResult};

#[derive(Debug, Deserialize)]
struct ClassroomRecord {
    classroom: String,
    #[serde(default)]
    projector: bool,
    #[serde(default)]
    no_spaces: u32,
    #[serde(default)]
    computers: u32,
}

impl From<ClassroomRecord> for Classroom {
    fn from(record: ClassroomRecord) -> Self {
        Self::new(record.classroom, record.projector, record.no_spaces, record.computers)
    }
}

/// Reads every room described in the file at `path`.
pub fn load_classrooms(path: &Path) -> ScheduleResult<Vec<Classroom>> {
    if !path.exists() {
        return Err(ScheduleError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let records: Vec<ClassroomRecord> = serde_json::from_str(&text)
        .map_err(|err| ScheduleError::parse(path.display().to_string(), err.to_string()))?;

    tracing::debug!(path = %path.display(), count = records.len(), "read classroom config");
    Ok(records.into_iter().map(Classroom::from).collect())
}
