//! Structured decision log records.
//!
//! Every generation run produces an append-only list of explanations in
//! the causal order of the checks and placements that emitted them. The
//! wire form is a stable contract consumed by the reporting layer:
//! `{level, source, message, relatedEntityId?, step?}` with
//! SCREAMING_SNAKE_CASE level and source values. Field names and types
//! must not change.

use serde::{Deserialize, Serialize};

/// Severity of an explanation.
///
/// Only `Error` blocks generation; warnings record degradations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Component that emitted an explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    Validator,
    LabAllocator,
    Scheduler,
    Workload,
}

/// A diagnostic record describing one decision or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// Severity.
    pub level: Level,
    /// Emitting component.
    pub source: Source,
    /// Human-readable description.
    pub message: String,
    /// Entity the record is about, when one is identifiable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity_id: Option<String>,
    /// Pipeline step (1-10) the record belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u8>,
}

impl Explanation {
    /// Creates an INFO record.
    pub fn info(source: Source, message: impl Into<String>) -> Self {
        Self::new(Level::Info, source, message)
    }

    /// Creates a WARNING record.
    pub fn warning(source: Source, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, source, message)
    }

    /// Creates an ERROR record.
    pub fn error(source: Source, message: impl Into<String>) -> Self {
        Self::new(Level::Error, source, message)
    }

    fn new(level: Level, source: Source, message: impl Into<String>) -> Self {
        Self {
            level,
            source,
            message: message.into(),
            related_entity_id: None,
            step: None,
        }
    }

    /// Attaches the entity this record is about.
    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.related_entity_id = Some(entity_id.into());
        self
    }

    /// Attaches the pipeline step (1-10).
    pub fn with_step(mut self, step: u8) -> Self {
        self.step = Some(step);
        self
    }

    /// Whether this record blocks generation.
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}
