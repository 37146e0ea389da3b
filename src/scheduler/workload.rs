//! Faculty workload computation and limits.
//!
//! Computes per-faculty load from placed entries and compares it to the
//! designation-based weekly limits. Theory load counts individual
//! non-lab periods; lab load counts distinct (day, window) sessions, so
//! a 3-period lab session counts once.
//!
//! The scheduler uses [`has_workload_violation`] as a hard gate: an
//! overloaded faculty discards an otherwise complete timetable.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::models::{Designation, Explanation, Faculty, LabSlot, Source, TimetableEntry};

/// Computed weekly load for one faculty member.
#[derive(Debug, Clone, PartialEq)]
pub struct FacultyWorkload {
    /// Faculty this record describes.
    pub faculty_id: String,
    /// Rank the limits derive from.
    pub designation: Designation,
    /// Number of placed non-lab periods.
    pub theory_periods: i32,
    /// Number of distinct (day, window) lab sessions.
    pub lab_sessions: i32,
    /// Whether either dimension exceeds its limit.
    pub is_overloaded: bool,
}

/// Computes workload statistics for every faculty member, sorted by id.
pub fn calculate_workload(faculty: &[Faculty], entries: &[TimetableEntry]) -> Vec<FacultyWorkload> {
    let by_faculty: HashMap<&str, Vec<&TimetableEntry>> = entries
        .iter()
        .filter(|e| !e.faculty_id.is_empty())
        .map(|e| (e.faculty_id.as_str(), e))
        .into_group_map();

    let mut members: Vec<&Faculty> = faculty.iter().collect();
    members.sort_by(|a, b| a.id.cmp(&b.id));

    members
        .into_iter()
        .map(|member| {
            let own = by_faculty.get(member.id.as_str());

            let theory_periods = own
                .map(|list| list.iter().filter(|e| !e.is_lab_session).count())
                .unwrap_or(0) as i32;

            let sessions: HashSet<(u8, LabSlot)> = own
                .map(|list| {
                    list.iter()
                        .filter(|e| e.is_lab_session)
                        .filter_map(|e| e.lab_slot.map(|slot| (e.day, slot)))
                        .collect()
                })
                .unwrap_or_default();
            let lab_sessions = sessions.len() as i32;

            let is_overloaded = theory_periods > member.designation.theory_period_limit()
                || f64::from(lab_sessions) > member.designation.lab_session_limit();

            FacultyWorkload {
                faculty_id: member.id.clone(),
                designation: member.designation,
                theory_periods,
                lab_sessions,
                is_overloaded,
            }
        })
        .collect()
}

/// Validates computed workloads, one ERROR per exceeded dimension and an
/// INFO per compliant faculty.
pub fn validate_workload(faculty: &[Faculty], entries: &[TimetableEntry]) -> Vec<Explanation> {
    let names: HashMap<&str, &str> = faculty
        .iter()
        .map(|f| (f.id.as_str(), f.name.as_str()))
        .collect();

    let mut explanations = Vec::new();
    for stat in calculate_workload(faculty, entries) {
        let name = names.get(stat.faculty_id.as_str()).copied().unwrap_or("?");
        let theory_limit = stat.designation.theory_period_limit();
        let lab_limit = stat.designation.lab_session_limit();
        let mut compliant = true;

        if stat.theory_periods > theory_limit {
            compliant = false;
            explanations.push(
                Explanation::error(
                    Source::Workload,
                    format!(
                        "Faculty '{name}' has {} theory periods, exceeds limit of {theory_limit}",
                        stat.theory_periods
                    ),
                )
                .with_entity(&stat.faculty_id),
            );
        }
        if f64::from(stat.lab_sessions) > lab_limit {
            compliant = false;
            explanations.push(
                Explanation::error(
                    Source::Workload,
                    format!(
                        "Faculty '{name}' has {} lab sessions, exceeds limit of {lab_limit}",
                        stat.lab_sessions
                    ),
                )
                .with_entity(&stat.faculty_id),
            );
        }
        if compliant {
            explanations.push(
                Explanation::info(
                    Source::Workload,
                    format!(
                        "Faculty '{name}' ({}) within limits: {} theory periods, {} lab sessions",
                        stat.designation.label(),
                        stat.theory_periods,
                        stat.lab_sessions
                    ),
                )
                .with_entity(&stat.faculty_id),
            );
        }
    }
    explanations
}

/// Whether any faculty's computed load exceeds a limit.
pub fn has_workload_violation(stats: &[FacultyWorkload]) -> bool {
    stats.iter().any(|s| s.is_overloaded)
}
