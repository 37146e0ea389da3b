//! Timetabling domain models.
//!
//! Core data types for describing a campus, its academic records, and the
//! generated weekly timetable. All types are plain data with serde
//! support; the generation engine never mutates an input snapshot.

mod batch;
mod explanation;
mod faculty;
mod infrastructure;
mod rotation;
mod snapshot;
mod subject;
mod timetable;

pub use batch::{Batch, SubBatch};
pub use explanation::{Explanation, Level, Source};
pub use faculty::{Designation, Faculty};
pub use infrastructure::{Block, Classroom, Department, Lab};
pub use rotation::{last_rotation, LabRotation};
pub use snapshot::{AcademicSnapshot, InfrastructureSnapshot};
pub use subject::{Subject, SubjectType};
pub use timetable::{
    day_name, LabSlot, Timetable, TimetableEntry, PERIODS_PER_DAY, WORKING_DAYS,
};
