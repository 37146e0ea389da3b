//! Batch (student cohort) model.
//!
//! A batch is a cohort scoped to a department and semester. When the cohort
//! is larger than the biggest department lab, it is split into
//! capacity-bounded sub-batches that attend lab sessions in parallel.
//! Sub-batch identifiers derive deterministically from the batch id so that
//! persisted lab rotation records stay meaningful across generation runs.

use serde::{Deserialize, Serialize};

/// A student cohort to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Unique batch identifier.
    pub id: String,
    /// Human-readable name (e.g., "CSE 3rd Sem A").
    pub name: String,
    /// Department this batch belongs to.
    pub department_id: String,
    /// Current semester number.
    pub semester: i32,
    /// Total number of students in the cohort.
    pub total_students: i32,
    /// Lab groups, ordered. Empty until computed from lab capacity.
    pub sub_batches: Vec<SubBatch>,
}

/// A capacity-bounded partition of a batch for lab sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubBatch {
    /// Unique sub-batch identifier, derived from the batch id.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of students in this group.
    pub student_count: i32,
}

impl Batch {
    /// Creates a new batch with no sub-batches.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department_id: impl Into<String>,
        semester: i32,
        total_students: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department_id: department_id.into(),
            semester,
            total_students,
            sub_batches: Vec::new(),
        }
    }

    /// Sets explicit sub-batches.
    pub fn with_sub_batches(mut self, sub_batches: Vec<SubBatch>) -> Self {
        self.sub_batches = sub_batches;
        self
    }

    /// Splits the cohort into lab-sized groups.
    ///
    /// When `lab_capacity` covers the whole cohort (or is non-positive, in
    /// which case there is nothing sensible to split by), the result is a
    /// single sub-batch covering all students. Otherwise the cohort is
    /// divided into `ceil(total / capacity)` groups, each holding at most
    /// `lab_capacity` students, the last group taking the remainder.
    pub fn split_for_lab_capacity(&self, lab_capacity: i32) -> Vec<SubBatch> {
        if lab_capacity <= 0 || self.total_students <= lab_capacity {
            return vec![SubBatch {
                id: format!("{}-sb1", self.id),
                name: format!("{} Group 1", self.name),
                student_count: self.total_students,
            }];
        }

        let mut groups = Vec::new();
        let mut remaining = self.total_students;
        let mut n = 1;
        while remaining > 0 {
            let size = remaining.min(lab_capacity);
            groups.push(SubBatch {
                id: format!("{}-sb{n}", self.id),
                name: format!("{} Group {n}", self.name),
                student_count: size,
            });
            remaining -= size;
            n += 1;
        }
        groups
    }

    /// Whether this batch is split into more than one lab group.
    pub fn is_split(&self) -> bool {
        self.sub_batches.len() > 1
    }
}

impl SubBatch {
    /// Creates a new sub-batch.
    pub fn new(id: impl Into<String>, name: impl Into<String>, student_count: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            student_count,
        }
    }
}
