// LogConsole - core/store.rs
//
// Append-only log store with per-severity counters.
// Queries produce owned snapshots and never touch stored state.
// Core layer: no locking; callers serialise access across threads.

use crate::core::filter::{self, FilterState, Visibility};
use crate::core::model::{LogEntry, Severity, SeverityCounts};
use crate::util::error::FilterError;

/// Ordered, append-only collection of log entries.
///
/// `counts` always equals the number of entries of each severity held in
/// `entries`; both are only changed together by `record` and `clear`.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    counts: SeverityCounts,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and bump its severity counter. No validation.
    pub fn record(&mut self, entry: LogEntry) {
        self.counts.increment(entry.severity());
        tracing::trace!(
            severity = %entry.severity(),
            location = %entry.location_label(),
            index = self.entries.len(),
            "Entry recorded"
        );
        self.entries.push(entry);
    }

    /// Drop every entry and zero all counters.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.entries.len(), "Log store cleared");
        self.entries.clear();
        self.counts = SeverityCounts::default();
    }

    /// Filtered view as owned entries, in insertion order.
    ///
    /// The result is independent of later `record`/`clear` calls.
    pub fn query(
        &self,
        visibility: Visibility,
        filter_text: &str,
        use_regex: bool,
    ) -> Result<Vec<LogEntry>, FilterError> {
        let filter = FilterState::new(visibility, filter_text, use_regex);
        let indices = self.query_indices(&filter)?;
        Ok(indices
            .into_iter()
            .map(|idx| self.entries[idx].clone())
            .collect())
    }

    /// Filtered view as indices into `entries()`.
    pub fn query_indices(&self, filter: &FilterState) -> Result<Vec<usize>, FilterError> {
        filter::apply_filters(&self.entries, filter)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> SeverityCounts {
        self.counts
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts.get(severity)
    }
}
