//! Generation pipeline.
//!
//! # Pipeline
//!
//! 1. Validate inputs (abort on error)
//! 2. Lock academic time structure (log marker)
//! 3. Allocate lab sessions (abort on failure)
//! 4. Place mandatory subjects (period 3, Monday/Tuesday)
//! 5. Distribute theory subjects round robin
//! 6. Place open electives (period 1, Monday-Wednesday)
//! 7. Auto-fill the library slot
//! 8. Validate faculty workload (abort on violation)
//! 9. Final validation checkpoint (log marker)
//! 10. Assemble the timetable
//!
//! Steps run strictly in order with no backward transitions. Steps 4-7
//! degrade to warnings when a placement cannot be satisfied; the run
//! still produces a valid timetable if it reaches step 10.
//!
//! Generation is a pure computation over the request snapshot. The only
//! ambient dependency, id/timestamp generation, is injected via
//! [`IdProvider`] so identical inputs reproduce identical results.

use log::{debug, info, warn};

use crate::allocation;
use crate::idgen::{IdProvider, SystemIdProvider};
use crate::models::{
    day_name, AcademicSnapshot, Batch, Explanation, InfrastructureSnapshot, Lab, LabRotation,
    Source, Subject, SubjectType, Timetable, TimetableEntry, WORKING_DAYS,
};
use crate::validation;

use super::occupancy::OccupancyIndex;
use super::workload;

/// Period reserved for mandatory subjects.
const MANDATORY_PERIOD: u8 = 3;

/// Period reserved for open electives.
const ELECTIVE_PERIOD: u8 = 1;

/// Input snapshot for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Campus description.
    pub infrastructure: InfrastructureSnapshot,
    /// Academic records.
    pub academic: AcademicSnapshot,
    /// Batch to generate for.
    pub batch_id: String,
    /// Entries already committed by other batches' runs. Cross-batch
    /// faculty/room sharing flows only through this list; callers must
    /// serialize multi-batch generation.
    pub existing_entries: Vec<TimetableEntry>,
    /// Persisted lab rotation state (empty on first run).
    pub prior_rotations: Vec<LabRotation>,
}

impl GenerationRequest {
    /// Creates a request with no prior state.
    pub fn new(
        infrastructure: InfrastructureSnapshot,
        academic: AcademicSnapshot,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            infrastructure,
            academic,
            batch_id: batch_id.into(),
            existing_entries: Vec::new(),
            prior_rotations: Vec::new(),
        }
    }

    /// Sets entries committed by earlier runs.
    pub fn with_existing_entries(mut self, entries: Vec<TimetableEntry>) -> Self {
        self.existing_entries = entries;
        self
    }

    /// Sets persisted rotation state.
    pub fn with_prior_rotations(mut self, rotations: Vec<LabRotation>) -> Self {
        self.prior_rotations = rotations;
        self
    }
}

/// Outcome of a generation run.
///
/// On `success == false` the timetable is absent and nothing from the
/// run may be persisted; the explanation list carries the diagnosis.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Whether the run reached step 10.
    pub success: bool,
    /// The assembled timetable, present only on success.
    pub timetable: Option<Timetable>,
    /// Rotation records to persist for the next run, present only on
    /// success.
    pub rotations: Vec<LabRotation>,
    /// Decision log in causal order.
    pub explanations: Vec<Explanation>,
}

impl GenerationResult {
    fn failure(explanations: Vec<Explanation>) -> Self {
        Self {
            success: false,
            timetable: None,
            rotations: Vec::new(),
            explanations,
        }
    }
}

/// Orchestrates the 10-step generation pipeline for one batch.
pub struct TimetableScheduler {
    ids: Box<dyn IdProvider>,
}

impl TimetableScheduler {
    /// Creates a scheduler backed by the system clock.
    pub fn new() -> Self {
        Self::with_id_provider(Box::new(SystemIdProvider::new()))
    }

    /// Creates a scheduler with an injected id/timestamp source.
    pub fn with_id_provider(ids: Box<dyn IdProvider>) -> Self {
        Self { ids }
    }

    /// Runs the full pipeline and returns the result with its decision log.
    pub fn generate(&mut self, request: &GenerationRequest) -> GenerationResult {
        let mut explanations: Vec<Explanation> = Vec::new();

        // Step 1: structural validation. Load limits are enforced on
        // placed entries at step 8, not on assignments here.
        info!("step 1: validating inputs for batch '{}'", request.batch_id);
        let mut checks = validation::validate_infrastructure(&request.infrastructure);
        checks.extend(validation::validate_academic(
            &request.academic,
            &request.infrastructure,
        ));
        checks.extend(validation::validate_subject_assignments(
            &request.academic.subjects,
            &request.academic.faculty,
        ));
        let target = request.academic.batch(&request.batch_id);
        if target.is_none() {
            checks.push(
                Explanation::error(
                    Source::Validator,
                    format!("Unknown batch '{}'", request.batch_id),
                )
                .with_entity(&request.batch_id),
            );
        }
        let inputs_ok = validation::is_valid(&checks);
        explanations.extend(checks.into_iter().map(|e| e.with_step(1)));
        let batch = match target {
            Some(found) if inputs_ok => found,
            _ => {
                warn!("generation aborted at step 1");
                return GenerationResult::failure(explanations);
            }
        };

        // Sub-batches derive from the largest department lab.
        let dept_labs: Vec<Lab> = request
            .infrastructure
            .labs_in(&batch.department_id)
            .into_iter()
            .cloned()
            .collect();
        let max_lab_capacity = dept_labs.iter().map(|l| l.capacity).max().unwrap_or(0);
        let mut batch = batch.clone();
        if batch.sub_batches.is_empty() {
            let groups = batch.split_for_lab_capacity(max_lab_capacity);
            batch.sub_batches = groups;
        }

        // Step 2: no computation, the structure is fixed by the inputs.
        explanations.push(
            Explanation::info(Source::Scheduler, "Academic time structure locked").with_step(2),
        );

        // Step 3: lab allocation, the highest-priority phase.
        info!("step 3: allocating lab sessions");
        let lab_subjects: Vec<Subject> = request
            .academic
            .subjects_of_type(SubjectType::Lab, &batch.department_id, batch.semester)
            .into_iter()
            .cloned()
            .collect();
        let allocated = allocation::allocate(
            &batch,
            &lab_subjects,
            &dept_labs,
            &request.academic.faculty,
            &request.existing_entries,
            &request.prior_rotations,
        );
        let labs_ok = allocated.success;
        explanations.extend(allocated.explanations.into_iter().map(|e| e.with_step(3)));
        if !labs_ok {
            warn!("generation aborted at step 3: lab allocation failed");
            return GenerationResult::failure(explanations);
        }
        let mut entries = allocated.entries;
        let rotations = allocated.rotations;

        let mut index = OccupancyIndex::from_entries(&request.existing_entries);
        for entry in &entries {
            index.admit(entry);
        }

        // Steps 4-7: classroom phases, degrading to warnings.
        place_mandatory(&batch, request, &mut entries, &mut index, &mut explanations);
        place_theory(&batch, request, &mut entries, &mut index, &mut explanations);
        place_electives(&batch, request, &mut entries, &mut index, &mut explanations);
        fill_library(&batch, request, &mut entries, &mut index, &mut explanations);

        // Step 8: workload gate over everything placed this week,
        // including entries committed by other batches.
        info!("step 8: validating faculty workload");
        let mut all_entries = request.existing_entries.clone();
        all_entries.extend(entries.iter().cloned());
        let stats = workload::calculate_workload(&request.academic.faculty, &all_entries);
        explanations.extend(
            workload::validate_workload(&request.academic.faculty, &all_entries)
                .into_iter()
                .map(|e| e.with_step(8)),
        );
        if workload::has_workload_violation(&stats) {
            warn!("generation aborted at step 8: workload violation");
            return GenerationResult::failure(explanations);
        }

        // Step 9: no computation.
        explanations.push(
            Explanation::info(Source::Scheduler, "Final validation checkpoint passed")
                .with_step(9),
        );

        // Step 10: assemble. The sort is stable, preserving sub-batch
        // admission order within a shared (day, period).
        entries.sort_by(|a, b| (a.day, a.period).cmp(&(b.day, b.period)));
        let timetable = Timetable {
            id: self.ids.next_id("tt"),
            batch_id: batch.id.clone(),
            entries,
            generated_at: self.ids.timestamp_ms(),
            is_valid: true,
        };
        explanations.push(
            Explanation::info(
                Source::Scheduler,
                format!(
                    "Generated timetable with {} entries for batch '{}'",
                    timetable.entry_count(),
                    batch.name
                ),
            )
            .with_step(10),
        );
        info!(
            "generated timetable for batch '{}': {} entries",
            batch.name,
            timetable.entry_count()
        );

        GenerationResult {
            success: true,
            timetable: Some(timetable),
            rotations,
            explanations,
        }
    }
}

impl Default for TimetableScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Step 4: mandatory subjects go into period 3, the first on Monday and
/// the second on Tuesday. Third and later candidates have no slot.
fn place_mandatory(
    batch: &Batch,
    request: &GenerationRequest,
    entries: &mut Vec<TimetableEntry>,
    index: &mut OccupancyIndex,
    explanations: &mut Vec<Explanation>,
) {
    let subjects = request.academic.subjects_of_type(
        SubjectType::Mandatory,
        &batch.department_id,
        batch.semester,
    );
    let days = SubjectType::Mandatory.allowed_days();

    for (i, subject) in subjects.iter().enumerate() {
        if i >= days.len() {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!("No mandatory slot available for '{}'", subject.name),
                )
                .with_entity(&subject.id)
                .with_step(4),
            );
            continue;
        }
        let (day, period) = (days[i], MANDATORY_PERIOD);

        if !index.batch_free(&batch.id, day, period) {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!(
                        "{} period {period} already occupied; mandatory subject '{}' skipped",
                        day_name(day),
                        subject.name
                    ),
                )
                .with_entity(&subject.id)
                .with_step(4),
            );
            continue;
        }

        let assigned = request.academic.theory_faculty_for(&subject.id);
        let conductor = match assigned.first() {
            Some(found) => *found,
            None => {
                explanations.push(
                    Explanation::error(
                        Source::Scheduler,
                        format!("No faculty assigned for mandatory subject '{}'", subject.name),
                    )
                    .with_entity(&subject.id)
                    .with_step(4),
                );
                continue;
            }
        };
        if !index.faculty_free(&conductor.id, day, period) {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!(
                        "Faculty '{}' busy on {} period {period}; '{}' skipped",
                        conductor.name,
                        day_name(day),
                        subject.name
                    ),
                )
                .with_entity(&subject.id)
                .with_step(4),
            );
            continue;
        }

        let rooms = request.infrastructure.classrooms_in(&batch.department_id);
        let room = rooms.iter().find(|r| r.capacity >= batch.total_students);
        let room = match room {
            Some(found) => *found,
            None => {
                explanations.push(
                    Explanation::warning(
                        Source::Scheduler,
                        format!(
                            "No classroom seats {} students for mandatory subject '{}'",
                            batch.total_students, subject.name
                        ),
                    )
                    .with_entity(&subject.id)
                    .with_step(4),
                );
                continue;
            }
        };
        if !index.room_free(&room.id, day, period) {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!(
                        "Classroom '{}' busy on {} period {period}; '{}' skipped",
                        room.name,
                        day_name(day),
                        subject.name
                    ),
                )
                .with_entity(&subject.id)
                .with_step(4),
            );
            continue;
        }

        let entry =
            TimetableEntry::classroom(day, period, &subject.id, &conductor.id, &room.id, &batch.id);
        index.admit(&entry);
        entries.push(entry);
        debug!("mandatory '{}' placed on {} period {period}", subject.name, day_name(day));
        explanations.push(
            Explanation::info(
                Source::Scheduler,
                format!(
                    "Mandatory subject '{}' placed on {} period {period}",
                    subject.name,
                    day_name(day)
                ),
            )
            .with_entity(&subject.id)
            .with_step(4),
        );
    }
}

/// Step 5: theory subjects are spread round robin over the eligible
/// periods. The day cursor is shared and carried forward across
/// subjects so consecutive subjects land on different days.
fn place_theory(
    batch: &Batch,
    request: &GenerationRequest,
    entries: &mut Vec<TimetableEntry>,
    index: &mut OccupancyIndex,
    explanations: &mut Vec<Explanation>,
) {
    let subjects =
        request
            .academic
            .subjects_of_type(SubjectType::Theory, &batch.department_id, batch.semester);
    let periods = SubjectType::Theory.allowed_periods();
    let budget = WORKING_DAYS as usize * periods.len() * 2;
    let mut day_cursor: usize = 0;

    for subject in &subjects {
        let assigned = request.academic.theory_faculty_for(&subject.id);
        let conductor = match assigned.first() {
            Some(found) => *found,
            None => {
                explanations.push(
                    Explanation::warning(
                        Source::Scheduler,
                        format!("No faculty assigned for theory subject '{}'", subject.name),
                    )
                    .with_entity(&subject.id)
                    .with_step(5),
                );
                continue;
            }
        };

        // One classroom is fixed per subject and never revisited, even
        // if it is transiently busy at some slots.
        let rooms = request.infrastructure.classrooms_in(&batch.department_id);
        let room = match rooms.iter().find(|r| r.capacity >= batch.total_students) {
            Some(found) => *found,
            None => {
                explanations.push(
                    Explanation::warning(
                        Source::Scheduler,
                        format!(
                            "No classroom seats {} students for theory subject '{}'",
                            batch.total_students, subject.name
                        ),
                    )
                    .with_entity(&subject.id)
                    .with_step(5),
                );
                continue;
            }
        };

        let target = subject.periods_per_week.max(0) as usize;
        let mut placed = 0usize;
        let mut attempts = 0usize;

        while placed < target && attempts < budget {
            let day = (day_cursor % WORKING_DAYS as usize) as u8;
            for &period in periods {
                attempts += 1;
                if index.batch_free(&batch.id, day, period)
                    && index.faculty_free(&conductor.id, day, period)
                    && index.room_free(&room.id, day, period)
                {
                    let entry = TimetableEntry::classroom(
                        day,
                        period,
                        &subject.id,
                        &conductor.id,
                        &room.id,
                        &batch.id,
                    );
                    index.admit(&entry);
                    entries.push(entry);
                    placed += 1;
                    debug!(
                        "theory '{}' period {placed}/{target} on {} period {period}",
                        subject.name,
                        day_name(day)
                    );
                    break;
                }
                if attempts >= budget {
                    break;
                }
            }
            // Advances after a completed pass and after a placement.
            day_cursor += 1;
        }

        if placed < target {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!(
                        "Theory subject '{}' placed {placed} of {target} periods",
                        subject.name
                    ),
                )
                .with_entity(&subject.id)
                .with_step(5),
            );
        } else {
            explanations.push(
                Explanation::info(
                    Source::Scheduler,
                    format!("Theory subject '{}' fully placed ({target} periods)", subject.name),
                )
                .with_entity(&subject.id)
                .with_step(5),
            );
        }
    }
}

/// Step 6: open electives go into period 1 on Monday through Wednesday,
/// at most three. Classrooms only need a department match.
fn place_electives(
    batch: &Batch,
    request: &GenerationRequest,
    entries: &mut Vec<TimetableEntry>,
    index: &mut OccupancyIndex,
    explanations: &mut Vec<Explanation>,
) {
    let subjects = request.academic.subjects_of_type(
        SubjectType::OpenElective,
        &batch.department_id,
        batch.semester,
    );
    let days = SubjectType::OpenElective.allowed_days();

    for (i, subject) in subjects.iter().enumerate() {
        if i >= days.len() {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!("No elective slot available for '{}'", subject.name),
                )
                .with_entity(&subject.id)
                .with_step(6),
            );
            continue;
        }
        let (day, period) = (days[i], ELECTIVE_PERIOD);

        if !index.batch_free(&batch.id, day, period) {
            explanations.push(
                Explanation::warning(
                    Source::Scheduler,
                    format!(
                        "{} period {period} already occupied; elective '{}' skipped",
                        day_name(day),
                        subject.name
                    ),
                )
                .with_entity(&subject.id)
                .with_step(6),
            );
            continue;
        }

        let assigned = request.academic.theory_faculty_for(&subject.id);
        let conductor = match assigned.first() {
            Some(found) if index.faculty_free(&found.id, day, period) => *found,
            Some(found) => {
                explanations.push(
                    Explanation::warning(
                        Source::Scheduler,
                        format!(
                            "Faculty '{}' busy on {} period {period}; elective '{}' skipped",
                            found.name,
                            day_name(day),
                            subject.name
                        ),
                    )
                    .with_entity(&subject.id)
                    .with_step(6),
                );
                continue;
            }
            None => {
                explanations.push(
                    Explanation::warning(
                        Source::Scheduler,
                        format!("No faculty assigned for elective '{}'", subject.name),
                    )
                    .with_entity(&subject.id)
                    .with_step(6),
                );
                continue;
            }
        };

        let rooms = request.infrastructure.classrooms_in(&batch.department_id);
        let room = match rooms.iter().find(|r| index.room_free(&r.id, day, period)) {
            Some(found) => *found,
            None => {
                explanations.push(
                    Explanation::warning(
                        Source::Scheduler,
                        format!("No department classroom free for elective '{}'", subject.name),
                    )
                    .with_entity(&subject.id)
                    .with_step(6),
                );
                continue;
            }
        };

        let entry =
            TimetableEntry::classroom(day, period, &subject.id, &conductor.id, &room.id, &batch.id);
        index.admit(&entry);
        entries.push(entry);
        explanations.push(
            Explanation::info(
                Source::Scheduler,
                format!(
                    "Open elective '{}' placed on {} period {period}",
                    subject.name,
                    day_name(day)
                ),
            )
            .with_entity(&subject.id)
            .with_step(6),
        );
    }
}

/// Step 7: the first batch-free slot in the scan order receives the
/// library period. No faculty or room is required; absence of a free
/// slot is a silent no-op.
fn fill_library(
    batch: &Batch,
    request: &GenerationRequest,
    entries: &mut Vec<TimetableEntry>,
    index: &mut OccupancyIndex,
    explanations: &mut Vec<Explanation>,
) {
    let subjects = request.academic.subjects_of_type(
        SubjectType::Library,
        &batch.department_id,
        batch.semester,
    );
    let Some(subject) = subjects.first() else {
        return;
    };
    let periods = SubjectType::Library.allowed_periods();

    for day in 0..WORKING_DAYS {
        for &period in periods {
            if index.batch_free(&batch.id, day, period) {
                let entry = TimetableEntry::library(day, period, &subject.id, &batch.id);
                index.admit(&entry);
                entries.push(entry);
                explanations.push(
                    Explanation::info(
                        Source::Scheduler,
                        format!(
                            "Library slot placed on {} period {period}",
                            day_name(day)
                        ),
                    )
                    .with_entity(&subject.id)
                    .with_step(7),
                );
                return;
            }
        }
    }
    debug!("no free slot for library subject '{}'", subject.name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idgen::FixedIdProvider;
    use crate::models::{
        Batch, Block, Classroom, Department, Designation, Faculty, Level,
    };
    use std::collections::HashSet;

    fn infrastructure() -> InfrastructureSnapshot {
        InfrastructureSnapshot {
            blocks: vec![Block::new("bl1", "Main Block")],
            departments: vec![Department::new("d1", "CSE", "bl1")],
            classrooms: vec![
                Classroom::new("c1", "CR-1", "d1", 60),
                Classroom::new("c2", "CR-2", "d1", 60),
            ],
            labs: vec![Lab::new("l1", "Lab 1", "d1", 30), Lab::new("l2", "Lab 2", "d1", 30)],
        }
    }

    fn lab_subject(id: &str, name: &str) -> Subject {
        Subject::new(id, name, SubjectType::Lab, "d1", 3).with_periods_per_week(3)
    }

    fn scheduler() -> TimetableScheduler {
        TimetableScheduler::with_id_provider(Box::new(FixedIdProvider::new(1_000)))
    }

    /// Asserts the occupancy invariants over a generated entry list.
    fn assert_no_conflicts(entries: &[TimetableEntry]) {
        let mut batch_slots = HashSet::new();
        let mut faculty_slots = HashSet::new();
        let mut room_slots = HashSet::new();
        for e in entries {
            assert!(
                batch_slots.insert((e.batch_id.clone(), e.sub_batch_id.clone(), e.day, e.period)),
                "batch conflict at {:?}",
                e
            );
            if !e.faculty_id.is_empty() {
                assert!(
                    faculty_slots.insert((e.faculty_id.clone(), e.day, e.period)),
                    "faculty conflict at {:?}",
                    e
                );
            }
            if !e.room_id.is_empty() {
                assert!(
                    room_slots.insert((e.room_id.clone(), e.day, e.period)),
                    "room conflict at {:?}",
                    e
                );
            }
        }
    }

    fn labs_only_academic() -> AcademicSnapshot {
        AcademicSnapshot {
            batches: vec![Batch::new("b1", "CSE 3A", "d1", 3, 25)],
            subjects: vec![lab_subject("s1", "DS Lab"), lab_subject("s2", "OS Lab")],
            faculty: vec![Faculty::new("f1", "Dr. Rao", Designation::AssistantProfessor)
                .with_lab_subject("s1")
                .with_lab_subject("s2")],
        }
    }

    #[test]
    fn test_labs_only_batch_succeeds() {
        let request = GenerationRequest::new(infrastructure(), labs_only_academic(), "b1");
        let result = scheduler().generate(&request);

        assert!(result.success, "{:?}", result.explanations);
        let timetable = result.timetable.unwrap();
        assert!(timetable.is_valid);
        // 2 sessions x 3 periods.
        assert_eq!(timetable.entry_count(), 6);
        assert!(timetable.entries.iter().all(|e| e.is_lab_session));
        assert_no_conflicts(&timetable.entries);

        // Entries arrive sorted by day then period.
        let keys: Vec<(u8, u8)> = timetable.entries.iter().map(|e| (e.day, e.period)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_missing_lab_subjects_aborts_at_step_3() {
        let mut academic = labs_only_academic();
        // Replace the labs with a theory subject so validation passes but
        // the allocator has nothing to place.
        academic.subjects = vec![
            Subject::new("s1", "DS", SubjectType::Theory, "d1", 3).with_periods_per_week(3),
        ];
        academic.faculty = vec![Faculty::new("f1", "Dr. Rao", Designation::AssistantProfessor)
            .with_theory_subject("s1")];

        let request = GenerationRequest::new(infrastructure(), academic, "b1");
        let result = scheduler().generate(&request);

        assert!(!result.success);
        assert!(result.timetable.is_none());
        assert!(result
            .explanations
            .iter()
            .any(|e| e.is_error() && e.source == Source::LabAllocator && e.step == Some(3)));
    }

    #[test]
    fn test_unknown_batch_aborts_at_step_1() {
        let request = GenerationRequest::new(infrastructure(), labs_only_academic(), "b9");
        let result = scheduler().generate(&request);

        assert!(!result.success);
        assert!(result
            .explanations
            .iter()
            .any(|e| e.is_error() && e.step == Some(1) && e.message.contains("Unknown batch")));
    }

    #[test]
    fn test_full_pipeline_places_all_categories() {
        let mut academic = labs_only_academic();
        academic.subjects.extend([
            Subject::new("m1", "Ethics", SubjectType::Mandatory, "d1", 3).with_periods_per_week(1),
            Subject::new("m2", "Constitution", SubjectType::Mandatory, "d1", 3)
                .with_periods_per_week(1),
            Subject::new("t1", "Data Structures", SubjectType::Theory, "d1", 3)
                .with_periods_per_week(3),
            Subject::new("e1", "German", SubjectType::OpenElective, "d1", 3)
                .with_periods_per_week(1),
            Subject::new("lib1", "Library", SubjectType::Library, "d1", 3).with_periods_per_week(1),
        ]);
        academic.faculty.push(
            Faculty::new("f2", "Dr. Iyer", Designation::AssistantProfessor)
                .with_theory_subject("m1")
                .with_theory_subject("m2")
                .with_theory_subject("t1")
                .with_theory_subject("e1"),
        );

        let request = GenerationRequest::new(infrastructure(), academic, "b1");
        let result = scheduler().generate(&request);
        assert!(result.success, "{:?}", result.explanations);
        let timetable = result.timetable.unwrap();
        assert_no_conflicts(&timetable.entries);

        // Lab sessions consume Monday's two windows, so the first
        // mandatory subject (Monday period 3) is displaced with a
        // warning and the second lands on Tuesday.
        assert!(result
            .explanations
            .iter()
            .any(|e| e.level == Level::Warning
                && e.step == Some(4)
                && e.related_entity_id.as_deref() == Some("m1")));
        let mandatory: Vec<&TimetableEntry> = timetable
            .entries
            .iter()
            .filter(|e| e.subject_id == "m2")
            .collect();
        assert_eq!(mandatory.len(), 1);
        assert_eq!((mandatory[0].day, mandatory[0].period), (1, 3));

        // Theory hits its target, confined to the eligible periods.
        let theory: Vec<&TimetableEntry> = timetable
            .entries
            .iter()
            .filter(|e| e.subject_id == "t1")
            .collect();
        assert_eq!(theory.len(), 3);
        assert!(theory.iter().all(|e| [2, 4, 5, 6, 7].contains(&e.period)));
        // The shared day cursor spreads the three periods over
        // three different days.
        let days: HashSet<u8> = theory.iter().map(|e| e.day).collect();
        assert_eq!(days.len(), 3);

        // Elective in period 1, Monday through Wednesday.
        let elective = timetable
            .entries
            .iter()
            .find(|e| e.subject_id == "e1")
            .unwrap();
        assert_eq!(elective.period, 1);
        assert!(elective.day <= 2);

        // Exactly one library entry, with no faculty or room.
        let library: Vec<&TimetableEntry> = timetable
            .entries
            .iter()
            .filter(|e| e.subject_id == "lib1")
            .collect();
        assert_eq!(library.len(), 1);
        assert!(library[0].faculty_id.is_empty() && library[0].room_id.is_empty());
    }

    #[test]
    fn test_third_mandatory_subject_is_skipped() {
        let mut academic = labs_only_academic();
        academic.subjects.extend([
            Subject::new("m1", "Ethics", SubjectType::Mandatory, "d1", 3),
            Subject::new("m2", "Constitution", SubjectType::Mandatory, "d1", 3),
            Subject::new("m3", "Environment", SubjectType::Mandatory, "d1", 3),
        ]);
        academic.faculty.push(
            Faculty::new("f2", "Dr. Iyer", Designation::AssistantProfessor)
                .with_theory_subject("m1")
                .with_theory_subject("m2")
                .with_theory_subject("m3"),
        );

        let request = GenerationRequest::new(infrastructure(), academic, "b1");
        let result = scheduler().generate(&request);
        assert!(result.success);
        assert!(result.explanations.iter().any(|e| e.level == Level::Warning
            && e.related_entity_id.as_deref() == Some("m3")
            && e.message.contains("No mandatory slot")));
    }

    #[test]
    fn test_workload_violation_aborts_at_step_8() {
        let mut academic = labs_only_academic();
        // A professor carrying 6 weekly theory periods exceeds the limit
        // of 5 once the entries are placed.
        academic.subjects.push(
            Subject::new("t1", "Advanced Topics", SubjectType::Theory, "d1", 3)
                .with_periods_per_week(6),
        );
        academic.faculty.push(
            Faculty::new("f2", "Dr. Iyer", Designation::Professor).with_theory_subject("t1"),
        );

        let request = GenerationRequest::new(infrastructure(), academic, "b1");
        let result = scheduler().generate(&request);

        assert!(!result.success);
        assert!(result.timetable.is_none());
        assert!(result.rotations.is_empty());
        assert!(result
            .explanations
            .iter()
            .any(|e| e.is_error()
                && e.source == Source::Workload
                && e.step == Some(8)
                && e.message.contains("exceeds limit of 5")));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut academic = labs_only_academic();
        academic.batches[0].total_students = 60; // two sub-batches
        academic.faculty.push(
            Faculty::new("f2", "Dr. Iyer", Designation::AssistantProfessor)
                .with_lab_subject("s1")
                .with_lab_subject("s2"),
        );
        let request = GenerationRequest::new(infrastructure(), academic, "b1");

        let first = scheduler().generate(&request);
        let second = scheduler().generate(&request);

        assert!(first.success && second.success);
        assert_eq!(first.timetable, second.timetable);
        assert_eq!(first.rotations, second.rotations);
        assert_eq!(first.explanations, second.explanations);
    }

    #[test]
    fn test_split_batch_rotates_labs_across_runs() {
        let mut academic = labs_only_academic();
        academic.batches[0].total_students = 60; // splits into 2 groups
        academic.subjects = vec![lab_subject("s1", "DS Lab")];
        academic.faculty = vec![
            Faculty::new("f1", "Dr. Rao", Designation::AssistantProfessor).with_lab_subject("s1"),
            Faculty::new("f2", "Dr. Iyer", Designation::AssistantProfessor).with_lab_subject("s1"),
        ];

        let request = GenerationRequest::new(infrastructure(), academic.clone(), "b1");
        let first = scheduler().generate(&request);
        assert!(first.success, "{:?}", first.explanations);
        // Week 1, two sessions: sb1 seeds at l1 and advances to l2.
        let week1_sb1: Vec<&str> = first
            .rotations
            .iter()
            .filter(|r| r.sub_batch_id == "b1-sb1")
            .map(|r| r.lab_id.as_str())
            .collect();
        assert_eq!(week1_sb1, vec!["l1", "l2"]);

        // Week 2: rotation state feeds back, so sb1's first session
        // advances past l2 (wrapping back to l1), not restarting the seed.
        let request = GenerationRequest::new(infrastructure(), academic, "b1")
            .with_prior_rotations(first.rotations);
        let second = scheduler().generate(&request);
        assert!(second.success);
        let week2_sb1: Vec<&str> = second
            .rotations
            .iter()
            .filter(|r| r.sub_batch_id == "b1-sb1")
            .map(|r| r.lab_id.as_str())
            .collect();
        assert_eq!(week2_sb1, vec!["l1", "l2"]);
        let week2_sb2: Vec<&str> = second
            .rotations
            .iter()
            .filter(|r| r.sub_batch_id == "b1-sb2")
            .map(|r| r.lab_id.as_str())
            .collect();
        assert_eq!(week2_sb2, vec!["l2", "l1"]);
    }

    #[test]
    fn test_existing_entries_shift_lab_windows() {
        // This batch already has Monday committed from a prior run, so
        // both lab windows must land on Tuesday.
        let academic = labs_only_academic();
        let mut committed = Vec::new();
        for period in 2..=7 {
            committed.push(TimetableEntry::classroom(0, period, "sx", "f9", "c9", "b1"));
        }

        let request = GenerationRequest::new(infrastructure(), academic, "b1")
            .with_existing_entries(committed);
        let result = scheduler().generate(&request);

        assert!(result.success, "{:?}", result.explanations);
        let timetable = result.timetable.unwrap();
        assert!(timetable.entries.iter().all(|e| e.day == 1));
        // Committed entries are never merged into the produced timetable.
        assert!(timetable.entries.iter().all(|e| e.batch_id == "b1" && e.is_lab_session));
        assert_eq!(timetable.entry_count(), 6);
    }
}
