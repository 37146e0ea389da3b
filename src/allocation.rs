//! Lab session allocation.
//!
//! Labs are the highest-priority category and are placed first, before any
//! classroom phase runs. A session occupies one of the two fixed 3-period
//! windows (Slot A or Slot B) on one day. A split batch attends in
//! parallel: each sub-batch gets its own lab and faculty for the same
//! window, and a rotation record per session keeps groups cycling through
//! the department's labs across runs.
//!
//! Allocation is greedy and sequential. Subjects are cycled in id order
//! over the free windows (day-ascending, Slot A before Slot B) until
//! `max(subject_count, MIN_LAB_SESSIONS_PER_WEEK)` sessions are placed or
//! no window remains. Fewer than the minimum is a hard failure; the caller
//! must discard the partial result.

use log::{debug, info};

use crate::models::{
    day_name, last_rotation, Batch, Explanation, Faculty, Lab, LabRotation, LabSlot, Source,
    Subject, SubBatch, TimetableEntry, WORKING_DAYS,
};
use crate::scheduler::OccupancyIndex;

/// Minimum lab sessions a batch must receive per week.
pub const MIN_LAB_SESSIONS_PER_WEEK: usize = 2;

/// Outcome of a lab allocation run.
///
/// On `success == false` the entries and rotations are diagnostic only
/// and must not be committed.
#[derive(Debug, Clone)]
pub struct LabAllocationResult {
    /// Placed lab entries, three per sub-batch session.
    pub entries: Vec<TimetableEntry>,
    /// One rotation record per placed sub-batch session.
    pub rotations: Vec<LabRotation>,
    /// Decision log for this phase.
    pub explanations: Vec<Explanation>,
    /// Whether the minimum weekly session count was reached.
    pub success: bool,
}

impl LabAllocationResult {
    fn failure(explanations: Vec<Explanation>) -> Self {
        Self {
            entries: Vec::new(),
            rotations: Vec::new(),
            explanations,
            success: false,
        }
    }
}

/// Places lab sessions for one batch.
///
/// `lab_subjects` must already be scoped to the batch's department and
/// semester, and `labs` to its department. `existing_entries` carries
/// occupancy committed by earlier runs (other batches); `prior_rotations`
/// is the persisted rotation state.
pub fn allocate(
    batch: &Batch,
    lab_subjects: &[Subject],
    labs: &[Lab],
    faculty: &[Faculty],
    existing_entries: &[TimetableEntry],
    prior_rotations: &[LabRotation],
) -> LabAllocationResult {
    let mut explanations = Vec::new();

    if lab_subjects.is_empty() {
        explanations.push(
            Explanation::error(
                Source::LabAllocator,
                format!(
                    "No lab subjects for department '{}' semester {}",
                    batch.department_id, batch.semester
                ),
            )
            .with_entity(&batch.id),
        );
        return LabAllocationResult::failure(explanations);
    }
    if labs.is_empty() {
        explanations.push(
            Explanation::error(
                Source::LabAllocator,
                format!("No labs available in department '{}'", batch.department_id),
            )
            .with_entity(&batch.department_id),
        );
        return LabAllocationResult::failure(explanations);
    }

    let mut index = OccupancyIndex::from_entries(existing_entries);
    let free_now = free_window_count(&index, &batch.id);
    if free_now < MIN_LAB_SESSIONS_PER_WEEK {
        explanations.push(
            Explanation::error(
                Source::LabAllocator,
                format!(
                    "Only {free_now} free lab windows for batch '{}'; at least {MIN_LAB_SESSIONS_PER_WEEK} required",
                    batch.name
                ),
            )
            .with_entity(&batch.id),
        );
        return LabAllocationResult::failure(explanations);
    }

    let mut subjects: Vec<&Subject> = lab_subjects.iter().collect();
    subjects.sort_by(|a, b| a.id.cmp(&b.id));
    let mut labs_sorted: Vec<&Lab> = labs.iter().collect();
    labs_sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let max_lab_capacity = labs_sorted.iter().map(|l| l.capacity).max().unwrap_or(0);
    let sub_batches = if batch.sub_batches.is_empty() {
        batch.split_for_lab_capacity(max_lab_capacity)
    } else {
        batch.sub_batches.clone()
    };

    let target = subjects.len().max(MIN_LAB_SESSIONS_PER_WEEK);
    let mut entries = Vec::new();
    let mut rotations: Vec<LabRotation> = Vec::new();
    let mut placed = 0usize;
    let mut subject_cursor = 0usize;
    let mut consecutive_skips = 0usize;

    while placed < target {
        // Availability is recomputed against everything placed so far,
        // including sessions from this same call.
        let Some((day, slot)) = first_free_window(&index, &batch.id) else {
            break;
        };

        let subject = subjects[subject_cursor % subjects.len()];
        subject_cursor += 1;

        let mut lab_faculty: Vec<&Faculty> = faculty
            .iter()
            .filter(|f| f.teaches_lab(&subject.id))
            .collect();
        lab_faculty.sort_by(|a, b| a.id.cmp(&b.id));

        if lab_faculty.is_empty() {
            explanations.push(
                Explanation::error(
                    Source::LabAllocator,
                    format!(
                        "No faculty assigned to conduct lab sessions for '{}'",
                        subject.name
                    ),
                )
                .with_entity(&subject.id),
            );
            consecutive_skips += 1;
            if consecutive_skips >= subjects.len() {
                // Every subject in the cycle is unservable.
                break;
            }
            continue;
        }
        consecutive_skips = 0;

        let session_number = (placed + 1) as i32;
        if sub_batches.len() > 1 {
            place_split_session(
                batch,
                subject,
                &sub_batches,
                &labs_sorted,
                &lab_faculty,
                day,
                slot,
                session_number,
                prior_rotations,
                &mut rotations,
                &mut entries,
                &mut index,
                &mut explanations,
            );
        } else {
            // Single group: first lab, first faculty, no fallback.
            let lab = labs_sorted[0];
            let conductor = lab_faculty[0];
            let group_id = sub_batches.first().map(|s| s.id.clone()).unwrap_or_default();
            for period in slot.periods() {
                let entry = TimetableEntry::lab(
                    day,
                    period,
                    &subject.id,
                    &conductor.id,
                    &lab.id,
                    &batch.id,
                    &group_id,
                    slot,
                );
                index.admit(&entry);
                entries.push(entry);
            }
            debug!(
                "lab session {session_number}: '{}' in '{}' on {} slot {slot:?}",
                subject.name,
                lab.name,
                day_name(day)
            );
        }

        explanations.push(
            Explanation::info(
                Source::LabAllocator,
                format!(
                    "Lab session {session_number}: '{}' on {} slot {slot:?}",
                    subject.name,
                    day_name(day)
                ),
            )
            .with_entity(&subject.id),
        );
        placed += 1;
    }

    if placed < MIN_LAB_SESSIONS_PER_WEEK {
        explanations.push(
            Explanation::error(
                Source::LabAllocator,
                format!(
                    "Only {placed} lab sessions placed for batch '{}'; at least {MIN_LAB_SESSIONS_PER_WEEK} required",
                    batch.name
                ),
            )
            .with_entity(&batch.id),
        );
        return LabAllocationResult {
            entries,
            rotations,
            explanations,
            success: false,
        };
    }

    info!(
        "allocated {placed} lab sessions for batch '{}' ({} entries)",
        batch.name,
        entries.len()
    );
    LabAllocationResult {
        entries,
        rotations,
        explanations,
        success: true,
    }
}

/// Places one session for a split batch: every sub-batch attends the same
/// window in parallel, each in its own lab with its own conductor.
#[allow(clippy::too_many_arguments)]
fn place_split_session(
    batch: &Batch,
    subject: &Subject,
    sub_batches: &[SubBatch],
    labs: &[&Lab],
    lab_faculty: &[&Faculty],
    day: u8,
    slot: LabSlot,
    session_number: i32,
    prior_rotations: &[LabRotation],
    rotations: &mut Vec<LabRotation>,
    entries: &mut Vec<TimetableEntry>,
    index: &mut OccupancyIndex,
    explanations: &mut Vec<Explanation>,
) {
    let mut groups: Vec<&SubBatch> = sub_batches.iter().collect();
    groups.sort_by(|a, b| a.id.cmp(&b.id));

    for (ordinal, group) in groups.iter().enumerate() {
        let lab_index = next_lab_index(labs, prior_rotations, rotations, batch, group, ordinal);
        let lab = labs[lab_index];

        let candidate = lab_faculty[ordinal % lab_faculty.len()];
        let conductor = if index.slot_free_for_faculty(&candidate.id, day, slot) {
            Some(candidate)
        } else {
            lab_faculty
                .iter()
                .find(|f| index.slot_free_for_faculty(&f.id, day, slot))
                .copied()
        };
        let Some(conductor) = conductor else {
            explanations.push(
                Explanation::warning(
                    Source::LabAllocator,
                    format!(
                        "No lab faculty free for sub-batch '{}' ('{}', {} slot {slot:?}); session skipped for this group",
                        group.name,
                        subject.name,
                        day_name(day)
                    ),
                )
                .with_entity(&group.id),
            );
            continue;
        };

        for period in slot.periods() {
            let entry = TimetableEntry::lab(
                day,
                period,
                &subject.id,
                &conductor.id,
                &lab.id,
                &batch.id,
                &group.id,
                slot,
            );
            index.admit(&entry);
            entries.push(entry);
        }
        rotations.push(LabRotation::new(
            &batch.id,
            &group.id,
            session_number,
            &lab.id,
        ));
        debug!(
            "lab session {session_number}: sub-batch '{}' in '{}' with '{}'",
            group.name, lab.name, conductor.name
        );
    }
}

/// Lab index for a sub-batch session: the latest rotation record (from
/// this run first, then persisted state) advances the group to the next
/// lab; a group with no history seeds at its ordinal so groups start on
/// different labs.
fn next_lab_index(
    labs: &[&Lab],
    prior_rotations: &[LabRotation],
    current_rotations: &[LabRotation],
    batch: &Batch,
    group: &SubBatch,
    ordinal: usize,
) -> usize {
    let previous = last_rotation(current_rotations, &batch.id, &group.id)
        .or_else(|| last_rotation(prior_rotations, &batch.id, &group.id));
    match previous {
        Some(record) => labs
            .iter()
            .position(|l| l.id == record.lab_id)
            .map(|i| (i + 1) % labs.len())
            .unwrap_or(ordinal % labs.len()),
        None => ordinal % labs.len(),
    }
}

fn first_free_window(index: &OccupancyIndex, batch_id: &str) -> Option<(u8, LabSlot)> {
    for day in 0..WORKING_DAYS {
        for slot in LabSlot::BOTH {
            if index.slot_free_for_batch(batch_id, day, slot) {
                return Some((day, slot));
            }
        }
    }
    None
}

fn free_window_count(index: &OccupancyIndex, batch_id: &str) -> usize {
    let mut count = 0;
    for day in 0..WORKING_DAYS {
        for slot in LabSlot::BOTH {
            if index.slot_free_for_batch(batch_id, day, slot) {
                count += 1;
            }
        }
    }
    count
}
