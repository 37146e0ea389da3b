//! Injectable identifier and timestamp source.
//!
//! Generation must be deterministic under test: identical inputs plus an
//! identical provider state yield byte-identical results. The engine
//! therefore never reads the wall clock directly; it asks an [`IdProvider`]
//! for ids and timestamps. Hosts use [`SystemIdProvider`]; tests use
//! [`FixedIdProvider`] with a pinned clock and a plain counter.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of identifiers and timestamps for generated artifacts.
pub trait IdProvider {
    /// Returns a fresh identifier with the given prefix.
    fn next_id(&mut self, prefix: &str) -> String;

    /// Current time in milliseconds since the Unix epoch.
    fn timestamp_ms(&self) -> i64;
}

/// Wall-clock provider for production use.
#[derive(Debug, Default)]
pub struct SystemIdProvider {
    counter: u64,
}

impl SystemIdProvider {
    /// Creates a new provider.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SystemIdProvider {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}-{}", self.timestamp_ms(), self.counter)
    }

    fn timestamp_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Deterministic provider: a sequence counter and a pinned clock.
#[derive(Debug)]
pub struct FixedIdProvider {
    counter: u64,
    timestamp_ms: i64,
}

impl FixedIdProvider {
    /// Creates a provider pinned to the given timestamp.
    pub fn new(timestamp_ms: i64) -> Self {
        Self {
            counter: 0,
            timestamp_ms,
        }
    }
}

impl IdProvider for FixedIdProvider {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}", self.counter)
    }

    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}
