//! Subject model.
//!
//! Subjects are typed, and the type fixes where a subject may be placed on
//! the weekly grid: labs go into the two 3-period windows, mandatory
//! courses are confined to period 3 on Monday/Tuesday, open electives to
//! period 1 on Monday through Wednesday, and the library slot floats over
//! whatever remains.

use serde::{Deserialize, Serialize};

use super::timetable::WORKING_DAYS;

/// Classification of a subject, fixing its placement constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    /// Regular taught course, placed by the round-robin phase.
    Theory,
    /// Practical course requiring a lab window.
    Lab,
    /// Institution-mandated course confined to period 3, Monday/Tuesday.
    Mandatory,
    /// Cross-department elective confined to period 1, Monday-Wednesday.
    OpenElective,
    /// Weekly self-study slot requiring neither faculty nor room.
    Library,
}

/// An academic subject scoped to a department and semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Course code (e.g., "CS301").
    pub code: String,
    /// Placement classification.
    pub subject_type: SubjectType,
    /// Target number of periods per week.
    pub periods_per_week: i32,
    /// Department offering the subject.
    pub department_id: String,
    /// Semester the subject is taught in.
    pub semester: i32,
}

const ALL_DAYS: [u8; WORKING_DAYS as usize] = [0, 1, 2, 3, 4, 5];

impl SubjectType {
    /// Periods of the day this subject type may occupy (1-based).
    pub fn allowed_periods(&self) -> &'static [u8] {
        match self {
            // Period 1 is reserved for electives, 3 for mandatory
            // courses, 8 is excluded from teaching.
            SubjectType::Theory => &[2, 4, 5, 6, 7],
            SubjectType::Lab => &[2, 3, 4, 5, 6, 7],
            SubjectType::Mandatory => &[3],
            SubjectType::OpenElective => &[1],
            SubjectType::Library => &[1, 2, 4, 5, 6, 7],
        }
    }

    /// Days of the week this subject type may occupy (0 = Monday).
    pub fn allowed_days(&self) -> &'static [u8] {
        match self {
            SubjectType::Mandatory => &[0, 1],
            SubjectType::OpenElective => &[0, 1, 2],
            _ => &ALL_DAYS,
        }
    }

    /// Fixed weekly cap for types placed at most once, `None` when the
    /// subject's own `periods_per_week` drives placement.
    pub fn max_per_week(&self) -> Option<i32> {
        match self {
            SubjectType::Mandatory | SubjectType::OpenElective | SubjectType::Library => Some(1),
            SubjectType::Theory | SubjectType::Lab => None,
        }
    }
}

impl Subject {
    /// Creates a new subject.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject_type: SubjectType,
        department_id: impl Into<String>,
        semester: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: String::new(),
            subject_type,
            periods_per_week: 0,
            department_id: department_id.into(),
            semester,
        }
    }

    /// Sets the course code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the weekly period target.
    pub fn with_periods_per_week(mut self, periods: i32) -> Self {
        self.periods_per_week = periods;
        self
    }

    /// Whether this is a lab subject.
    pub fn is_lab(&self) -> bool {
        self.subject_type == SubjectType::Lab
    }

    /// Whether this subject is taught to the given department and semester.
    pub fn is_scoped_to(&self, department_id: &str, semester: i32) -> bool {
        self.department_id == department_id && self.semester == semester
    }
}
