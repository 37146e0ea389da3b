//! Timetable generation pipeline.
//!
//! The scheduler orchestrates a fixed 10-step sequence over one batch:
//! validation, lab allocation, mandatory placement, theory round robin,
//! open electives, library auto-fill, and a workload gate, assembling the
//! accumulated entries into a [`crate::models::Timetable`].
//!
//! Placement is greedy and sequential with graceful degradation —
//! lower-priority categories that cannot be placed produce warnings, not
//! failures. Only validation (step 1), lab allocation (step 3), and the
//! workload gate (step 8) abort a run.

mod engine;
mod occupancy;
mod workload;

pub use engine::{GenerationRequest, GenerationResult, TimetableScheduler};
pub use occupancy::OccupancyIndex;
pub use workload::{
    calculate_workload, has_workload_violation, validate_workload, FacultyWorkload,
};
