//! Input snapshots.
//!
//! Generation operates on immutable snapshots of the infrastructure and
//! academic records. The lookup helpers here centralize the id-ascending
//! ordering that every placement phase uses for tie-breaking, so the same
//! inputs always resolve candidates in the same order.

use serde::{Deserialize, Serialize};

use super::{Batch, Block, Classroom, Department, Faculty, Lab, Subject, SubjectType};

/// Static infrastructure input to a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSnapshot {
    pub blocks: Vec<Block>,
    pub departments: Vec<Department>,
    pub classrooms: Vec<Classroom>,
    pub labs: Vec<Lab>,
}

/// Academic records input to a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSnapshot {
    pub batches: Vec<Batch>,
    pub subjects: Vec<Subject>,
    pub faculty: Vec<Faculty>,
}

impl InfrastructureSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a department by id.
    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    /// Classrooms of a department, sorted by id.
    pub fn classrooms_in(&self, department_id: &str) -> Vec<&Classroom> {
        let mut rooms: Vec<&Classroom> = self
            .classrooms
            .iter()
            .filter(|c| c.department_id == department_id)
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    /// Labs of a department, sorted by id.
    pub fn labs_in(&self, department_id: &str) -> Vec<&Lab> {
        let mut labs: Vec<&Lab> = self
            .labs
            .iter()
            .filter(|l| l.department_id == department_id)
            .collect();
        labs.sort_by(|a, b| a.id.cmp(&b.id));
        labs
    }
}

impl AcademicSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a batch by id.
    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    /// Subjects of one type scoped to a department and semester, sorted by id.
    pub fn subjects_of_type(
        &self,
        subject_type: SubjectType,
        department_id: &str,
        semester: i32,
    ) -> Vec<&Subject> {
        let mut subjects: Vec<&Subject> = self
            .subjects
            .iter()
            .filter(|s| s.subject_type == subject_type && s.is_scoped_to(department_id, semester))
            .collect();
        subjects.sort_by(|a, b| a.id.cmp(&b.id));
        subjects
    }

    /// Faculty assigned to a subject's theory periods, sorted by id.
    pub fn theory_faculty_for(&self, subject_id: &str) -> Vec<&Faculty> {
        let mut matches: Vec<&Faculty> = self
            .faculty
            .iter()
            .filter(|f| f.teaches_theory(subject_id))
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }

    /// Faculty assigned to a subject's lab sessions, sorted by id.
    pub fn lab_faculty_for(&self, subject_id: &str) -> Vec<&Faculty> {
        let mut matches: Vec<&Faculty> = self
            .faculty
            .iter()
            .filter(|f| f.teaches_lab(subject_id))
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Designation;

    fn infrastructure() -> InfrastructureSnapshot {
        InfrastructureSnapshot {
            blocks: vec![Block::new("bl1", "Main")],
            departments: vec![Department::new("d1", "CSE", "bl1")],
            classrooms: vec![
                Classroom::new("c2", "CR-2", "d1", 60),
                Classroom::new("c1", "CR-1", "d1", 40),
                Classroom::new("c3", "CR-3", "d2", 60),
            ],
            labs: vec![
                Lab::new("l2", "Lab 2", "d1", 30),
                Lab::new("l1", "Lab 1", "d1", 30),
            ],
        }
    }

    #[test]
    fn test_classrooms_sorted_and_scoped() {
        let infra = infrastructure();
        let rooms = infra.classrooms_in("d1");
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn test_labs_sorted() {
        let infra = infrastructure();
        let ids: Vec<&str> = infra.labs_in("d1").iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["l1", "l2"]);
    }

    #[test]
    fn test_subject_scoping() {
        let academic = AcademicSnapshot {
            batches: vec![],
            subjects: vec![
                Subject::new("s2", "OS", SubjectType::Theory, "d1", 3),
                Subject::new("s1", "DS", SubjectType::Theory, "d1", 3),
                Subject::new("s3", "DS Lab", SubjectType::Lab, "d1", 3),
                Subject::new("s4", "ML", SubjectType::Theory, "d1", 5),
            ],
            faculty: vec![],
        };

        let theory = academic.subjects_of_type(SubjectType::Theory, "d1", 3);
        let ids: Vec<&str> = theory.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_faculty_lookup_sorted() {
        let academic = AcademicSnapshot {
            batches: vec![],
            subjects: vec![],
            faculty: vec![
                Faculty::new("f2", "B", Designation::Professor).with_theory_subject("s1"),
                Faculty::new("f1", "A", Designation::Professor)
                    .with_theory_subject("s1")
                    .with_lab_subject("s2"),
            ],
        };

        let theory = academic.theory_faculty_for("s1");
        assert_eq!(theory[0].id, "f1");
        assert_eq!(theory.len(), 2);

        let lab = academic.lab_faculty_for("s2");
        assert_eq!(lab.len(), 1);
        assert!(academic.lab_faculty_for("s1").is_empty());
    }
}
