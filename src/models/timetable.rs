//! Timetable grid and entry models.
//!
//! The weekly grid is fixed: six working days (0 = Monday through
//! 5 = Saturday) of eight periods each (1-based). Lab sessions occupy one
//! of two fixed 3-period windows, Slot A (periods 2-4) or Slot B
//! (periods 5-7).
//!
//! A [`TimetableEntry`] is the atomic scheduling fact; a [`Timetable`] is
//! the assembled, sorted result for one batch.

use serde::{Deserialize, Serialize};

/// Number of working days per week (Monday through Saturday).
pub const WORKING_DAYS: u8 = 6;

/// Number of periods per day (1-based).
pub const PERIODS_PER_DAY: u8 = 8;

/// One of the two permitted 3-period lab windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabSlot {
    /// Periods 2, 3, 4.
    A,
    /// Periods 5, 6, 7.
    B,
}

impl LabSlot {
    /// Both windows, in placement order (A before B).
    pub const BOTH: [LabSlot; 2] = [LabSlot::A, LabSlot::B];

    /// The three periods this window covers.
    pub fn periods(&self) -> [u8; 3] {
        match self {
            LabSlot::A => [2, 3, 4],
            LabSlot::B => [5, 6, 7],
        }
    }
}

/// An atomic scheduling fact: one subject in one period for one batch.
///
/// Faculty and room ids may be empty (the library slot needs neither);
/// occupancy invariants apply only to non-empty ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    /// Day of week (0 = Monday).
    pub day: u8,
    /// Period of day (1-based).
    pub period: u8,
    /// Scheduled subject.
    pub subject_id: String,
    /// Conducting faculty, empty when none is required.
    pub faculty_id: String,
    /// Classroom or lab, empty when none is required.
    pub room_id: String,
    /// Batch attending this period.
    pub batch_id: String,
    /// Lab group attending, when the batch is split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_batch_id: Option<String>,
    /// Whether this entry is part of a 3-period lab session.
    pub is_lab_session: bool,
    /// Lab window, set for lab entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_slot: Option<LabSlot>,
}

impl TimetableEntry {
    /// Creates a classroom entry (theory, mandatory, or elective period).
    pub fn classroom(
        day: u8,
        period: u8,
        subject_id: impl Into<String>,
        faculty_id: impl Into<String>,
        room_id: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            day,
            period,
            subject_id: subject_id.into(),
            faculty_id: faculty_id.into(),
            room_id: room_id.into(),
            batch_id: batch_id.into(),
            sub_batch_id: None,
            is_lab_session: false,
            lab_slot: None,
        }
    }

    /// Creates one period of a lab session.
    #[allow(clippy::too_many_arguments)]
    pub fn lab(
        day: u8,
        period: u8,
        subject_id: impl Into<String>,
        faculty_id: impl Into<String>,
        lab_id: impl Into<String>,
        batch_id: impl Into<String>,
        sub_batch_id: impl Into<String>,
        slot: LabSlot,
    ) -> Self {
        Self {
            day,
            period,
            subject_id: subject_id.into(),
            faculty_id: faculty_id.into(),
            room_id: lab_id.into(),
            batch_id: batch_id.into(),
            sub_batch_id: Some(sub_batch_id.into()),
            is_lab_session: true,
            lab_slot: Some(slot),
        }
    }

    /// Creates a library entry, which requires neither faculty nor room.
    pub fn library(
        day: u8,
        period: u8,
        subject_id: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            day,
            period,
            subject_id: subject_id.into(),
            faculty_id: String::new(),
            room_id: String::new(),
            batch_id: batch_id.into(),
            sub_batch_id: None,
            is_lab_session: false,
            lab_slot: None,
        }
    }
}

/// A generated weekly timetable for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    /// Unique timetable identifier.
    pub id: String,
    /// Batch this timetable was generated for.
    pub batch_id: String,
    /// Entries sorted by day, then period.
    pub entries: Vec<TimetableEntry>,
    /// Generation timestamp (ms since epoch, from the injected clock).
    pub generated_at: i64,
    /// Whether generation reached the final step without aborting.
    pub is_valid: bool,
}

impl Timetable {
    /// Entries on a given day, in period order.
    pub fn entries_for_day(&self, day: u8) -> Vec<&TimetableEntry> {
        self.entries.iter().filter(|e| e.day == day).collect()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Display name for a day index.
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_slot_periods() {
        assert_eq!(LabSlot::A.periods(), [2, 3, 4]);
        assert_eq!(LabSlot::B.periods(), [5, 6, 7]);
        assert_eq!(LabSlot::BOTH, [LabSlot::A, LabSlot::B]);
    }

    #[test]
    fn test_entry_factories() {
        let theory = TimetableEntry::classroom(0, 2, "s1", "f1", "c1", "b1");
        assert!(!theory.is_lab_session);
        assert!(theory.lab_slot.is_none());

        let lab = TimetableEntry::lab(1, 2, "s2", "f1", "l1", "b1", "b1-sb1", LabSlot::A);
        assert!(lab.is_lab_session);
        assert_eq!(lab.lab_slot, Some(LabSlot::A));
        assert_eq!(lab.sub_batch_id.as_deref(), Some("b1-sb1"));

        let library = TimetableEntry::library(2, 1, "s3", "b1");
        assert!(library.faculty_id.is_empty());
        assert!(library.room_id.is_empty());
    }

    #[test]
    fn test_timetable_queries() {
        let timetable = Timetable {
            id: "tt-1".into(),
            batch_id: "b1".into(),
            entries: vec![
                TimetableEntry::classroom(0, 2, "s1", "f1", "c1", "b1"),
                TimetableEntry::classroom(0, 4, "s1", "f1", "c1", "b1"),
                TimetableEntry::classroom(1, 2, "s2", "f2", "c1", "b1"),
            ],
            generated_at: 0,
            is_valid: true,
        };

        assert_eq!(timetable.entry_count(), 3);
        assert_eq!(timetable.entries_for_day(0).len(), 2);
        assert_eq!(timetable.entries_for_day(5).len(), 0);
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(0), "Monday");
        assert_eq!(day_name(5), "Saturday");
        assert_eq!(day_name(9), "Unknown");
    }
}
