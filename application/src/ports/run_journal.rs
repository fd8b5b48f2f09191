//! Port for a structured journal of generation runs.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while the journal captures run events
//! (submissions, phase changes, image results, audits) in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// Something that happened during one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunEvent {
    /// Run the event belongs to
    pub run_id: u64,
    /// Event kind (e.g. "run_submitted", "phase_changed")
    pub kind: &'static str,
    /// Event-specific details
    pub details: Value,
}

impl RunEvent {
    pub fn new(run_id: u64, kind: &'static str, details: Value) -> Self {
        Self {
            run_id,
            kind,
            details,
        }
    }
}

/// Port for recording run events.
///
/// `record` is synchronous and non-fallible; journal failures never
/// disrupt a run.
pub trait RunJournal: Send + Sync {
    fn record(&self, event: RunEvent);
}

/// No-op implementation for tests and when the journal is disabled.
pub struct NoRunJournal;

impl RunJournal for NoRunJournal {
    fn record(&self, _event: RunEvent) {}
}
