//! Input validation for timetable generation.
//!
//! Checks structural completeness and consistency of infrastructure and
//! academic records before any placement is attempted. Detects:
//! - Empty record collections
//! - Non-positive room/lab capacities and batch sizes
//! - Dangling department references
//! - Subjects with no assigned faculty
//! - Assigned workloads exceeding designation limits
//!
//! Every check appends [`Explanation`] records in causal order. Only
//! ERROR-level records block generation; warnings are advisory.

use crate::models::{
    AcademicSnapshot, Explanation, Faculty, InfrastructureSnapshot, Source, Subject, SubjectType,
};

/// Validates infrastructure records.
///
/// Errors on empty blocks/departments/classrooms/labs and on any
/// classroom or lab with non-positive capacity.
pub fn validate_infrastructure(infra: &InfrastructureSnapshot) -> Vec<Explanation> {
    let mut explanations = Vec::new();

    if infra.blocks.is_empty() {
        explanations.push(Explanation::error(Source::Validator, "No blocks defined"));
    }
    if infra.departments.is_empty() {
        explanations.push(Explanation::error(
            Source::Validator,
            "No departments defined",
        ));
    }
    if infra.classrooms.is_empty() {
        explanations.push(Explanation::error(
            Source::Validator,
            "No classrooms defined",
        ));
    }
    if infra.labs.is_empty() {
        explanations.push(Explanation::error(Source::Validator, "No labs defined"));
    }

    for classroom in &infra.classrooms {
        if classroom.capacity <= 0 {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!(
                        "Classroom '{}' has non-positive capacity {}",
                        classroom.name, classroom.capacity
                    ),
                )
                .with_entity(&classroom.id),
            );
        }
    }
    for lab in &infra.labs {
        if lab.capacity <= 0 {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!(
                        "Lab '{}' has non-positive capacity {}",
                        lab.name, lab.capacity
                    ),
                )
                .with_entity(&lab.id),
            );
        }
    }

    explanations
}

/// Validates academic records against the infrastructure.
///
/// Errors on empty batches/subjects/faculty, non-positive batch sizes,
/// and batches referencing departments that do not resolve. Warns when
/// no lab-type subject exists anywhere.
pub fn validate_academic(
    academic: &AcademicSnapshot,
    infra: &InfrastructureSnapshot,
) -> Vec<Explanation> {
    let mut explanations = Vec::new();

    if academic.batches.is_empty() {
        explanations.push(Explanation::error(Source::Validator, "No batches defined"));
    }
    if academic.subjects.is_empty() {
        explanations.push(Explanation::error(Source::Validator, "No subjects defined"));
    }
    if academic.faculty.is_empty() {
        explanations.push(Explanation::error(Source::Validator, "No faculty defined"));
    }

    for batch in &academic.batches {
        if batch.total_students <= 0 {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!(
                        "Batch '{}' has non-positive student count {}",
                        batch.name, batch.total_students
                    ),
                )
                .with_entity(&batch.id),
            );
        }
        if infra.department(&batch.department_id).is_none() {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!(
                        "Batch '{}' references unknown department '{}'",
                        batch.name, batch.department_id
                    ),
                )
                .with_entity(&batch.id),
            );
        }
    }

    if !academic
        .subjects
        .iter()
        .any(|s| s.subject_type == SubjectType::Lab)
    {
        explanations.push(Explanation::warning(
            Source::Validator,
            "No lab subjects defined anywhere; lab allocation will have nothing to place",
        ));
    }

    explanations
}

/// Validates that every subject has at least one assigned faculty.
///
/// Lab subjects are checked against lab assignment lists, all other
/// types against theory assignment lists.
pub fn validate_subject_assignments(
    subjects: &[Subject],
    faculty: &[Faculty],
) -> Vec<Explanation> {
    let mut explanations = Vec::new();

    for subject in subjects {
        let assigned = if subject.is_lab() {
            faculty.iter().any(|f| f.teaches_lab(&subject.id))
        } else {
            faculty.iter().any(|f| f.teaches_theory(&subject.id))
        };
        if !assigned {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!("Subject '{}' has no assigned faculty", subject.name),
                )
                .with_entity(&subject.id),
            );
        }
    }

    explanations
}

/// Validates assigned workloads against designation limits.
///
/// For each faculty, the periods-per-week of all assigned theory subjects
/// are summed and compared to the designation's theory limit, and the
/// count of assigned lab subjects is compared to the (possibly
/// fractional) lab session limit.
pub fn validate_faculty_workload(faculty: &[Faculty], subjects: &[Subject]) -> Vec<Explanation> {
    let mut explanations = Vec::new();

    for member in faculty {
        let theory_load: i32 = subjects
            .iter()
            .filter(|s| member.teaches_theory(&s.id))
            .map(|s| s.periods_per_week)
            .sum();
        let theory_limit = member.designation.theory_period_limit();
        if theory_load > theory_limit {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!(
                        "Faculty '{}' assigned theory load of {} periods/week exceeds limit of {}",
                        member.name, theory_load, theory_limit
                    ),
                )
                .with_entity(&member.id),
            );
        }

        let lab_count = subjects
            .iter()
            .filter(|s| member.teaches_lab(&s.id))
            .count() as f64;
        let lab_limit = member.designation.lab_session_limit();
        if lab_count > lab_limit {
            explanations.push(
                Explanation::error(
                    Source::Validator,
                    format!(
                        "Faculty '{}' assigned {} lab subjects exceeds limit of {}",
                        member.name, lab_count as i64, lab_limit
                    ),
                )
                .with_entity(&member.id),
            );
        }
    }

    explanations
}

/// Runs all four validation checks in order.
pub fn validate_all(
    infra: &InfrastructureSnapshot,
    academic: &AcademicSnapshot,
) -> Vec<Explanation> {
    let mut explanations = validate_infrastructure(infra);
    explanations.extend(validate_academic(academic, infra));
    explanations.extend(validate_subject_assignments(
        &academic.subjects,
        &academic.faculty,
    ));
    explanations.extend(validate_faculty_workload(
        &academic.faculty,
        &academic.subjects,
    ));
    explanations
}

/// Whether a validation pass allows generation to proceed.
///
/// Warnings do not block; only ERROR records do.
pub fn is_valid(explanations: &[Explanation]) -> bool {
    !explanations.iter().any(|e| e.is_error())
}
