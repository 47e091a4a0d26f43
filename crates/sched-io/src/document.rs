//! JSON timetable documents.
//!
//! A document is an array of flat records keyed the way the faculty's
//! timetable service publishes them:
//!
//! ```json
//! [
//!   {
//!     "Predmet": "Algorithms",
//!     "Tip": "LECTURE",
//!     "Nastavnik": "Ana Petrović",
//!     "Grupe": "101,102",
//!     "Dan": "MONDAY",
//!     "Termin": "09:00-11:00",
//!     "Učionica": "U1",
//!     "validFrom": "2024-10-01",
//!     "validTo": "2025-07-01"
//!   }
//! ]
//! ```
//!
//! Unlike the tabular format, each record carries its own validity period.
//! Records without one fall back to [`LoadContext::default_validity`].

use std::io::{self, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use sched_core::{
    Codec, Lecture, LectureType, LoadContext, ScheduleError, ScheduleResult, ValidityPeriod,
    weekday_name,
};

use crate::tabular::fields::parse_groups;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Serialize, Deserialize)]
struct LectureRecord {
    #[serde(rename = "Predmet")]
    subject: String,
    #[serde(rename = "Tip")]
    kind: LectureType,
    #[serde(rename = "Nastavnik")]
    professor: String,
    #[serde(rename = "Grupe", default)]
    groups: String,
    #[serde(rename = "Dan")]
    day: String,
    #[serde(rename = "Termin")]
    time_range: String,
    #[serde(rename = "Učionica", default)]
    classroom: String,
    #[serde(rename = "validFrom", default, skip_serializing_if = "Option::is_none")]
    valid_from: Option<NaiveDate>,
    #[serde(rename = "validTo", default, skip_serializing_if = "Option::is_none")]
    valid_to: Option<NaiveDate>,
}

impl LectureRecord {
    fn from_lecture(lecture: &Lecture) -> Self {
        let groups: Vec<&str> = lecture.groups.iter().map(String::as_str).collect();
        Self {
            subject: lecture.subject.clone(),
            kind: lecture.kind,
            professor: lecture.professor.clone(),
            groups: groups.join(","),
            day: weekday_name(lecture.day).to_uppercase(),
            time_range: format!(
                "{}-{}",
                lecture.start.format("%H:%M"),
                lecture.end.format("%H:%M")
            ),
            classroom: lecture.classroom_name().unwrap_or_default().to_string(),
            valid_from: Some(lecture.validity_period.valid_from),
            valid_to: Some(lecture.validity_period.valid_to),
        }
    }

    fn into_lecture(self, ctx: &LoadContext<'_>) -> Result<Lecture, String> {
        let day = WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).eq_ignore_ascii_case(self.day.trim()))
            .ok_or_else(|| format!("unknown day: {}", self.day))?;

        let (start, end) = self
            .time_range
            .split_once('-')
            .ok_or_else(|| format!("invalid time range: {}", self.time_range))?;
        let start = parse_time(start)?;
        let end = parse_time(end)?;

        let default = ctx.default_validity;
        let validity_period = ValidityPeriod::new(
            self.valid_from.unwrap_or(default.valid_from),
            self.valid_to.unwrap_or(default.valid_to),
        );

        let classroom = match self.classroom.trim() {
            "" => None,
            name => ctx.registry.for_name(name),
        };

        Ok(Lecture {
            subject: self.subject,
            kind: self.kind,
            professor: self.professor,
            groups: parse_groups(&self.groups).collect(),
            day,
            start,
            end,
            validity_period,
            classroom,
        })
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time: {raw}"))
}

/// Codec for `.json` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn load(&self, path: &Path, ctx: &LoadContext<'_>) -> ScheduleResult<Vec<Lecture>> {
        let source_name = path.display().to_string();
        let text = std::fs::read_to_string(path)?;
        let records: Vec<LectureRecord> = serde_json::from_str(&text)
            .map_err(|err| ScheduleError::parse(&source_name, err.to_string()))?;

        records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                record.into_lecture(ctx).map_err(|message| {
                    ScheduleError::parse(&source_name, format!("entry {idx}: {message}"))
                })
            })
            .collect()
    }

    fn export(&self, lectures: &[Lecture], out: &mut dyn Write) -> ScheduleResult<()> {
        let records: Vec<LectureRecord> =
            lectures.iter().map(LectureRecord::from_lecture).collect();
        serde_json::to_writer_pretty(&mut *out, &records).map_err(io::Error::from)?;
        writeln!(out)?;
        Ok(())
    }
}
