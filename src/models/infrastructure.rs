//! Infrastructure reference records.
//!
//! Static description of the physical campus: blocks, departments,
//! classrooms, and labs. These records are inputs to generation and are
//! never mutated by the engine. Capacity validity (> 0) is checked by
//! [`crate::validation::validate_infrastructure`], not at construction.

use serde::{Deserialize, Serialize};

/// A campus building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique block identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

/// An academic department housed in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Unique department identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Block this department belongs to.
    pub block_id: String,
}

/// A classroom with seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Human-readable name (e.g., "CR-101").
    pub name: String,
    /// Owning department.
    pub department_id: String,
    /// Number of seats.
    pub capacity: i32,
}

/// A laboratory with workstation capacity.
///
/// Lab capacity drives sub-batch splitting: a batch larger than the
/// biggest department lab is divided into capacity-bounded groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lab {
    /// Unique lab identifier.
    pub id: String,
    /// Human-readable name (e.g., "CS Lab 1").
    pub name: String,
    /// Owning department.
    pub department_id: String,
    /// Number of workstations.
    pub capacity: i32,
}

impl Block {
    /// Creates a new block.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Department {
    /// Creates a new department.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        block_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            block_id: block_id.into(),
        }
    }
}

impl Classroom {
    /// Creates a new classroom.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department_id: impl Into<String>,
        capacity: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department_id: department_id.into(),
            capacity,
        }
    }
}

impl Lab {
    /// Creates a new lab.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department_id: impl Into<String>,
        capacity: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department_id: department_id.into(),
            capacity,
        }
    }
}
