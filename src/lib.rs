//! Academic timetable generation engine.
//!
//! Transforms a static description of infrastructure (blocks, departments,
//! classrooms, labs) and academic records (batches, subjects, faculty)
//! into a conflict-free weekly timetable for one batch, plus a structured
//! decision log explaining every placement and degradation.
//!
//! # Modules
//!
//! - **`models`**: Domain types — infrastructure records, `Batch`/`SubBatch`,
//!   `Subject`, `Faculty`, `TimetableEntry`, `LabRotation`, `Explanation`
//! - **`validation`**: Structural integrity checks on input snapshots
//! - **`allocation`**: Phase-1 lab session placement with sub-batch rotation
//! - **`scheduler`**: The 10-step generation pipeline and workload limits
//! - **`idgen`**: Injectable id/timestamp source for deterministic runs
//!
//! # Design
//!
//! Placement is greedy and strictly sequential — no optimization search,
//! no backtracking. Hard rules (lab windows, mandatory slots, workload
//! caps) either abort the run or skip a placement with a warning; the
//! decision log records which, in causal order. Generation for a batch is
//! a pure function of its input snapshot, so hosts serialize multi-batch
//! runs and pass committed entries in as existing occupancy.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod allocation;
pub mod idgen;
pub mod models;
pub mod scheduler;
pub mod validation;
