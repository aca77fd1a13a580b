// LogConsole - ui/rows.rs
//
// Display rows: a filtered view joined with resolved colours and location
// labels, ready for whichever render surface the host provides.

use crate::core::model::{LogEntry, Severity};
use crate::core::store::LogStore;
use crate::ui::colour_rules::ColourRules;
use crate::ui::theme::SeverityPalette;
use egui::Color32;

/// One visible console line.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    /// Index of the entry in the store.
    pub index: usize,
    pub severity: Severity,
    pub message: String,
    pub colour: Color32,
    /// `path:line`, or empty when the source is unknown.
    pub location: String,
}

impl DisplayRow {
    pub fn from_entry(
        index: usize,
        entry: &LogEntry,
        rules: &ColourRules,
        palette: &SeverityPalette,
    ) -> Self {
        Self {
            index,
            severity: entry.severity(),
            message: entry.message().to_string(),
            colour: rules.resolve(entry, palette),
            location: entry.location_label(),
        }
    }
}

/// Build rows for `indices` (a filtered view over `store`).
///
/// Indices that no longer exist in the store (stale after a clear) are skipped.
pub fn build_rows(
    store: &LogStore,
    indices: &[usize],
    rules: &ColourRules,
    palette: &SeverityPalette,
) -> Vec<DisplayRow> {
    indices
        .iter()
        .filter_map(|&idx| {
            store
                .get(idx)
                .map(|entry| DisplayRow::from_entry(idx, entry, rules, palette))
        })
        .collect()
}
