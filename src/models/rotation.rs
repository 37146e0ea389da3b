//! Lab rotation state.
//!
//! The only state that survives across generation runs. One record is
//! written per placed sub-batch lab session; on the next allocation the
//! latest record for a (batch, sub-batch) pair advances that group to the
//! next lab, keeping lab usage rotating fairly.

use serde::{Deserialize, Serialize};

/// A persisted record of which lab a sub-batch used for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabRotation {
    /// Batch the session belonged to.
    pub batch_id: String,
    /// Sub-batch that attended.
    pub sub_batch_id: String,
    /// Session ordinal within the allocation run (1-based).
    pub session_number: i32,
    /// Lab the sub-batch was placed in.
    pub lab_id: String,
}

impl LabRotation {
    /// Creates a new rotation record.
    pub fn new(
        batch_id: impl Into<String>,
        sub_batch_id: impl Into<String>,
        session_number: i32,
        lab_id: impl Into<String>,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            sub_batch_id: sub_batch_id.into(),
            session_number,
            lab_id: lab_id.into(),
        }
    }
}

/// The most recent rotation record for a (batch, sub-batch) pair.
///
/// Records are appended in placement order, so the last match wins.
pub fn last_rotation<'a>(
    rotations: &'a [LabRotation],
    batch_id: &str,
    sub_batch_id: &str,
) -> Option<&'a LabRotation> {
    rotations
        .iter()
        .rev()
        .find(|r| r.batch_id == batch_id && r.sub_batch_id == sub_batch_id)
}
