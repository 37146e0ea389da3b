//! Incremental slot occupancy index.
//!
//! Every placement phase needs the same three questions answered: is this
//! (day, period) free for the batch, for the faculty, for the room? The
//! index keeps one map per dimension, keyed by (day, period) and holding
//! the set of occupied ids, updated as entries are admitted. Admission
//! order is exactly the sequential placement order, so lookups never see
//! stale availability.
//!
//! Empty faculty/room ids (the library slot has both) are not indexed;
//! occupancy invariants apply only to non-empty ids.

use std::collections::{HashMap, HashSet};

use crate::models::{LabSlot, TimetableEntry};

/// Occupied-id sets per (day, period), one map per conflict dimension.
#[derive(Debug, Default)]
pub struct OccupancyIndex {
    batches: HashMap<(u8, u8), HashSet<String>>,
    faculty: HashMap<(u8, u8), HashSet<String>>,
    rooms: HashMap<(u8, u8), HashSet<String>>,
}

impl OccupancyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from already-committed entries.
    pub fn from_entries(entries: &[TimetableEntry]) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.admit(entry);
        }
        index
    }

    /// Records an entry's occupancy.
    pub fn admit(&mut self, entry: &TimetableEntry) {
        let key = (entry.day, entry.period);
        self.batches
            .entry(key)
            .or_default()
            .insert(entry.batch_id.clone());
        if !entry.faculty_id.is_empty() {
            self.faculty
                .entry(key)
                .or_default()
                .insert(entry.faculty_id.clone());
        }
        if !entry.room_id.is_empty() {
            self.rooms
                .entry(key)
                .or_default()
                .insert(entry.room_id.clone());
        }
    }

    /// Whether the batch has nothing scheduled at (day, period).
    pub fn batch_free(&self, batch_id: &str, day: u8, period: u8) -> bool {
        !self
            .batches
            .get(&(day, period))
            .is_some_and(|set| set.contains(batch_id))
    }

    /// Whether the faculty is unscheduled at (day, period).
    pub fn faculty_free(&self, faculty_id: &str, day: u8, period: u8) -> bool {
        !self
            .faculty
            .get(&(day, period))
            .is_some_and(|set| set.contains(faculty_id))
    }

    /// Whether the room is unoccupied at (day, period).
    pub fn room_free(&self, room_id: &str, day: u8, period: u8) -> bool {
        !self
            .rooms
            .get(&(day, period))
            .is_some_and(|set| set.contains(room_id))
    }

    /// Whether all three periods of a lab window are free for the batch.
    pub fn slot_free_for_batch(&self, batch_id: &str, day: u8, slot: LabSlot) -> bool {
        slot.periods()
            .iter()
            .all(|&p| self.batch_free(batch_id, day, p))
    }

    /// Whether all three periods of a lab window are free for the faculty.
    pub fn slot_free_for_faculty(&self, faculty_id: &str, day: u8, slot: LabSlot) -> bool {
        slot.periods()
            .iter()
            .all(|&p| self.faculty_free(faculty_id, day, p))
    }
}
