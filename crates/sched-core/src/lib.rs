//! Core domain logic for the lecture timetable.
//!
//! This crate contains the fundamental types and logic for:
//! - Lectures, classrooms and the validity periods they are held over
//! - Filters and exclusions, combined by explicit folds
//! - The schedule aggregate and its classroom-conflict check
//! - The codec contract and extension-based format dispatch

mod classroom;
mod error;
pub mod exclusion;
pub mod filter;
mod lecture;
mod period;
pub mod persist;
pub mod predicate;
mod schedule;

pub use classroom::{Classroom, ClassroomRegistry};
pub use error::{ScheduleError, ScheduleResult};
pub use exclusion::{Exclusion, ExclusionRule};
pub use filter::{Filter, FilterRule};
pub use lecture::{Lecture, LectureType, weekday_name};
pub use period::ValidityPeriod;
pub use persist::{Codec, Dispatcher, LoadContext};
pub use predicate::{LecturePredicate, all_match, any_match};
pub use schedule::Schedule;
