//! File formats for the lecture timetable.
//!
//! Provides the [`Codec`] implementations the schedule is loaded from and
//! exported to, plus readers for the two auxiliary configuration files.
//!
//! # Formats
//!
//! | extension | codec          | load | export |
//! |-----------|----------------|------|--------|
//! | `csv`     | [`CsvCodec`]   | yes  | yes    |
//! | `json`    | [`JsonCodec`]  | yes  | yes    |
//! | `pdf`     | [`PdfCodec`]   | no   | yes    |
//!
//! Tabular input needs a column mapping (see [`tabular::mapping`]); the JSON
//! document format is self-describing.
//!
//! # Configuration files
//!
//! - [`load_classrooms`] reads the room list the
//!   [`ClassroomRegistry`](sched_core::ClassroomRegistry) is initialized with.
//! - [`load_exclusions`] reads exam periods and holidays.

pub mod classrooms;
pub mod document;
pub mod exclusions;
pub mod print;
pub mod tabular;

use sched_core::Dispatcher;

pub use classrooms::load_classrooms;
pub use document::JsonCodec;
pub use exclusions::load_exclusions;
pub use print::PdfCodec;
pub use tabular::CsvCodec;

/// Returns a dispatcher with every built-in format registered.
pub fn default_dispatcher() -> Dispatcher {
    Dispatcher::new()
        .with("csv", CsvCodec)
        .with("json", JsonCodec)
        .with("pdf", PdfCodec)
}
