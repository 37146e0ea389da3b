//! Faculty model.
//!
//! A faculty member carries two assignment lists (theory subjects and lab
//! subjects) and a designation. The designation fixes the weekly workload
//! limits enforced by validation and by the scheduler's workload gate.

use serde::{Deserialize, Serialize};

/// Academic rank, fixing workload limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Designation {
    Professor,
    AssociateProfessor,
    AssistantProfessor,
}

/// A teaching staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Academic rank.
    pub designation: Designation,
    /// Subjects this faculty teaches as theory.
    pub theory_subject_ids: Vec<String>,
    /// Subjects this faculty conducts as labs.
    pub lab_subject_ids: Vec<String>,
}

impl Designation {
    /// Maximum theory periods per week.
    pub fn theory_period_limit(&self) -> i32 {
        match self {
            Designation::Professor => 5,
            Designation::AssociateProfessor => 5,
            Designation::AssistantProfessor => 10,
        }
    }

    /// Maximum lab sessions per week.
    ///
    /// The associate-professor limit is fractional: an integer session
    /// count is compared against it exactly, so 2 sessions exceed 1.5
    /// while 1 session does not.
    pub fn lab_session_limit(&self) -> f64 {
        match self {
            Designation::Professor => 1.0,
            Designation::AssociateProfessor => 1.5,
            Designation::AssistantProfessor => 2.0,
        }
    }

    /// Display label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Designation::Professor => "Professor",
            Designation::AssociateProfessor => "Associate Professor",
            Designation::AssistantProfessor => "Assistant Professor",
        }
    }
}

impl Faculty {
    /// Creates a new faculty member with empty assignment lists.
    pub fn new(id: impl Into<String>, name: impl Into<String>, designation: Designation) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            designation,
            theory_subject_ids: Vec::new(),
            lab_subject_ids: Vec::new(),
        }
    }

    /// Adds a theory subject assignment.
    pub fn with_theory_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.theory_subject_ids.push(subject_id.into());
        self
    }

    /// Adds a lab subject assignment.
    pub fn with_lab_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.lab_subject_ids.push(subject_id.into());
        self
    }

    /// Whether this faculty teaches the subject as theory.
    pub fn teaches_theory(&self, subject_id: &str) -> bool {
        self.theory_subject_ids.iter().any(|s| s == subject_id)
    }

    /// Whether this faculty conducts the subject's labs.
    pub fn teaches_lab(&self, subject_id: &str) -> bool {
        self.lab_subject_ids.iter().any(|s| s == subject_id)
    }
}
