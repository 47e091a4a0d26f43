//! Comma-separated timetable exports.
//!
//! Input columns are arbitrary; a mapping file (see [`mapping`]) says which
//! column feeds which lecture field. Export always writes the seven fields in
//! [`LectureField::ALL`] order under a fixed header, so a `0..6` mapping in
//! that order reads an export back.

pub mod fields;
pub mod mapping;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveTime, Weekday};
use csv::StringRecord;

use sched_core::{
    Classroom, Codec, Lecture, LectureType, LoadContext, ScheduleError, ScheduleResult,
};

use fields::{
    day_abbreviation, format_time_range, lecture_type_code, parse_day, parse_groups,
    parse_lecture_type, parse_time_range,
};
pub use mapping::{ColumnMapping, LectureField, parse_mapping, read_mapping};

/// Codec for `.csv` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvCodec;

impl Codec for CsvCodec {
    fn load(&self, path: &Path, ctx: &LoadContext<'_>) -> ScheduleResult<Vec<Lecture>> {
        let source_name = path.display().to_string();
        let mapping_path = ctx.mapping.ok_or_else(|| {
            ScheduleError::parse(&source_name, "tabular input needs a column mapping file")
        })?;
        let mappings = read_mapping(mapping_path)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|err| csv_error(&source_name, err))?;

        let mut lectures = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| csv_error(&source_name, err))?;
            let line = record.position().map_or(0, csv::Position::line);
            let lecture = read_row(&record, &mappings, ctx).map_err(|message| {
                ScheduleError::parse(&source_name, format!("line {line}: {message}"))
            })?;
            lectures.push(lecture);
        }
        Ok(lectures)
    }

    fn export(&self, lectures: &[Lecture], out: &mut dyn Write) -> ScheduleResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record(LectureField::ALL.map(|field| field.as_str()))
            .map_err(|err| csv_error("csv export", err))?;

        for lecture in lectures {
            let groups: Vec<&str> = lecture.groups.iter().map(String::as_str).collect();
            let groups = groups.join(", ");
            let time_range = format_time_range(lecture.start, lecture.end);
            writer
                .write_record([
                    lecture.subject.as_str(),
                    lecture_type_code(lecture.kind),
                    lecture.professor.as_str(),
                    groups.as_str(),
                    day_abbreviation(lecture.day),
                    time_range.as_str(),
                    lecture.classroom_name().unwrap_or(""),
                ])
                .map_err(|err| csv_error("csv export", err))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Builds one lecture from a data row.
fn read_row(
    record: &StringRecord,
    mappings: &[ColumnMapping],
    ctx: &LoadContext<'_>,
) -> Result<Lecture, String> {
    let mut subject = String::new();
    let mut kind = LectureType::Other;
    let mut professor = String::new();
    let mut groups = BTreeSet::new();
    let mut day: Option<Weekday> = None;
    let mut times: Option<(NaiveTime, NaiveTime)> = None;
    let mut classroom: Option<Arc<Classroom>> = None;

    for mapping in mappings {
        let cell = record
            .get(mapping.index)
            .ok_or_else(|| format!("missing column {} ({})", mapping.index, mapping.label))?;
        match mapping.field {
            LectureField::Name => subject = cell.to_string(),
            LectureField::Type => kind = parse_lecture_type(cell),
            LectureField::Professor => professor = cell.to_string(),
            LectureField::Groups => groups = parse_groups(cell).collect(),
            LectureField::Day => day = Some(parse_day(cell)?),
            LectureField::TimeRange => times = Some(parse_time_range(cell)?),
            LectureField::Classroom => {
                classroom = ctx.registry.for_name(cell.trim());
                if classroom.is_none() {
                    tracing::debug!(
                        classroom = cell,
                        "classroom not in registry, leaving unassigned"
                    );
                }
            }
        }
    }

    let day = day.ok_or("row has no day")?;
    let (start, end) = times.ok_or("row has no time range")?;
    Ok(Lecture {
        subject,
        kind,
        professor,
        groups,
        day,
        start,
        end,
        validity_period: ctx.default_validity,
        classroom,
    })
}

fn csv_error(source_name: &str, err: csv::Error) -> ScheduleError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(err) => ScheduleError::Io(err),
        _ => ScheduleError::parse(source_name, message),
    }
}
