// LogConsole - app/state.rs
//
// Console state management. Holds the log store, the filter toggles, the
// colour configuration, the last filtered view, and the pause hook.
// Explicitly constructed and owned by the host; there is no global instance.

use crate::app::pause::{NoopPause, PauseHook};
use crate::app::session::{self, SessionData};
use crate::core::filter::{CompiledFilter, FilterState, Visibility};
use crate::core::model::{LogEntry, Severity, SeverityCounts};
use crate::core::store::LogStore;
use crate::ui::colour_rules::ColourRules;
use crate::ui::rows::{self, DisplayRow};
use crate::ui::theme::SeverityPalette;
use crate::util::constants;
use crate::util::error::{FilterError, SessionError};
use std::path::Path;

/// Top-level console state.
pub struct ConsoleState {
    /// All recorded entries and their severity counters.
    pub store: LogStore,

    /// Current filter configuration. Changed only through the setters so the
    /// view and `active_filter` stay in step with it.
    filter_state: FilterState,

    /// Filter of the last successful refresh; `record` tests new entries
    /// against it.
    active_filter: CompiledFilter,

    /// Per-message colour overrides, evaluated in order.
    pub colour_rules: ColourRules,

    /// Default colour per severity.
    pub palette: SeverityPalette,

    /// Whether recording an Error entry invokes the pause hook.
    pub pause_on_error: bool,

    /// Whether new entries request a scroll to the bottom of the view.
    pub auto_scroll: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Indices of entries in the last successfully computed view.
    filtered_indices: Vec<usize>,

    /// Error from the most recent refresh, if it failed.
    filter_error: Option<FilterError>,

    /// Set by `record` when `auto_scroll` is on; consumed by the render surface.
    scroll_to_bottom: bool,

    pause_hook: Box<dyn PauseHook>,
}

impl std::fmt::Debug for ConsoleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleState")
            .field("entries", &self.store.len())
            .field("filter_state", &self.filter_state)
            .field("colour_rules", &self.colour_rules.len())
            .field("pause_on_error", &self.pause_on_error)
            .field("auto_scroll", &self.auto_scroll)
            .field("visible", &self.filtered_indices.len())
            .finish_non_exhaustive()
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    /// Empty console with default colours and a no-op pause hook.
    pub fn new() -> Self {
        Self {
            store: LogStore::new(),
            filter_state: FilterState::default(),
            active_filter: CompiledFilter::default(),
            colour_rules: ColourRules::new(),
            palette: SeverityPalette::default(),
            pause_on_error: constants::DEFAULT_PAUSE_ON_ERROR,
            auto_scroll: constants::DEFAULT_AUTO_SCROLL,
            status_message: constants::STATUS_READY.to_string(),
            filtered_indices: Vec::new(),
            filter_error: None,
            scroll_to_bottom: false,
            pause_hook: Box::new(NoopPause),
        }
    }

    /// Install the host's pause hook, replacing the previous one.
    pub fn with_pause_hook(mut self, hook: impl PauseHook + 'static) -> Self {
        self.pause_hook = Box::new(hook);
        self
    }

    pub fn set_pause_hook(&mut self, hook: impl PauseHook + 'static) {
        self.pause_hook = Box::new(hook);
    }

    // -------------------------------------------------------------------------
    // Recording
    // -------------------------------------------------------------------------

    /// Record an entry, then pause the host if it is an Error and
    /// pause-on-error is enabled.
    ///
    /// The visible view is extended in place when the entry passes the filter
    /// of the last successful refresh, so callers do not need a full refresh
    /// after every record. No regex is compiled here.
    pub fn record(&mut self, entry: LogEntry) {
        let is_error = entry.severity() == Severity::Error;
        let visible = self.active_filter.matches(&entry);

        self.store.record(entry);
        let index = self.store.len() - 1;
        if visible {
            self.filtered_indices.push(index);
        }

        if self.auto_scroll {
            self.scroll_to_bottom = true;
        }

        if is_error && self.pause_on_error {
            if let Some(entry) = self.store.get(index) {
                tracing::info!(location = %entry.location_label(), "Pausing on error");
                self.pause_hook.pause(entry);
            }
        }
    }

    /// Drop all entries and zero the counters. Filter settings are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.filtered_indices.clear();
        self.scroll_to_bottom = false;
        self.status_message = constants::STATUS_READY.to_string();
    }

    // -------------------------------------------------------------------------
    // Filter controls
    // -------------------------------------------------------------------------

    /// Replace the whole filter configuration and refresh.
    pub fn set_filter(&mut self, filter: FilterState) -> Result<(), FilterError> {
        self.filter_state = filter;
        self.refresh_view()
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) -> Result<(), FilterError> {
        self.filter_state.filter_text = text.into();
        self.refresh_view()
    }

    /// The search box's clear button.
    pub fn clear_filter_text(&mut self) -> Result<(), FilterError> {
        self.set_filter_text(String::new())
    }

    pub fn set_use_regex(&mut self, use_regex: bool) -> Result<(), FilterError> {
        self.filter_state.use_regex = use_regex;
        self.refresh_view()
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> Result<(), FilterError> {
        self.filter_state.visibility = visibility;
        self.refresh_view()
    }

    /// Flip one severity toggle and refresh. Returns the new toggle state.
    pub fn toggle_severity(&mut self, severity: Severity) -> Result<bool, FilterError> {
        let shown = self.filter_state.visibility.toggle(severity);
        self.refresh_view()?;
        Ok(shown)
    }

    /// Recompute the filtered view.
    ///
    /// The filter is compiled once and kept for later `record` calls. On
    /// failure the previous view and compiled filter stay in place and the
    /// error is both stored (`filter_error`) and returned.
    pub fn refresh_view(&mut self) -> Result<(), FilterError> {
        match self.filter_state.compile() {
            Ok(compiled) => {
                self.filtered_indices = compiled.select(self.store.entries());
                self.active_filter = compiled;
                self.filter_error = None;
                self.status_message = format!(
                    "{} of {} entries shown.",
                    self.filtered_indices.len(),
                    self.store.len()
                );
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Filter refresh failed; keeping previous view");
                self.status_message = e.to_string();
                self.filter_error = Some(e.clone());
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    /// Persist the toggles and filter to `session.json` under `data_dir`.
    pub fn save_session(&self, data_dir: &Path) -> Result<(), SessionError> {
        session::save(&SessionData::capture(self), &session::session_path(data_dir))
    }

    /// Restore settings saved by `save_session`. Returns false (and leaves
    /// the state untouched) when there is no usable session file.
    pub fn restore_session(&mut self, data_dir: &Path) -> bool {
        match session::load(&session::session_path(data_dir)) {
            Some(data) => {
                data.apply(self);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    /// Compiled filter used for the current view.
    pub fn active_filter(&self) -> &CompiledFilter {
        &self.active_filter
    }

    pub fn filter_error(&self) -> Option<&FilterError> {
        self.filter_error.as_ref()
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered_indices
    }

    /// Entries in the current view, in insertion order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.store.get(idx))
    }

    /// Display rows for the current view.
    pub fn rows(&self) -> Vec<DisplayRow> {
        rows::build_rows(
            &self.store,
            &self.filtered_indices,
            &self.colour_rules,
            &self.palette,
        )
    }

    pub fn counts(&self) -> SeverityCounts {
        self.store.counts()
    }

    /// Counter button caption, e.g. `"W: 3"`.
    pub fn counter_label(&self, severity: Severity) -> String {
        format!("{}: {}", severity.short_label(), self.store.count(severity))
    }

    /// Returns true once per scroll request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make_entry(severity: Severity, message: &str) -> LogEntry {
        LogEntry::new(message, "Assets/Game.cs", 7, severity)
    }

    fn visible_messages(state: &ConsoleState) -> Vec<String> {
        state
            .visible_entries()
            .map(|e| e.message().to_string())
            .collect()
    }

    #[test]
    fn test_pause_only_when_enabled_and_error() {
        let paused = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&paused);
        let mut state = ConsoleState::new().with_pause_hook(move |e: &LogEntry| {
            sink.borrow_mut().push(e.message().to_string());
        });

        state.record(make_entry(Severity::Error, "before enable"));
        assert!(paused.borrow().is_empty());

        state.pause_on_error = true;
        state.record(make_entry(Severity::Warning, "warn"));
        state.record(make_entry(Severity::Normal, "normal"));
        assert!(paused.borrow().is_empty());

        state.record(make_entry(Severity::Error, "boom"));
        assert_eq!(*paused.borrow(), vec!["boom".to_string()]);
        assert_eq!(state.store.count(Severity::Error), 2);
    }

    #[test]
    fn test_record_extends_view_when_matching() {
        let mut state = ConsoleState::new();
        state.set_filter_text("net").unwrap();
        state.record(make_entry(Severity::Normal, "net up"));
        state.record(make_entry(Severity::Normal, "disk ok"));
        state.record(make_entry(Severity::Error, "net down"));
        assert_eq!(visible_messages(&state), vec!["net up", "net down"]);
        assert_eq!(state.filtered_indices(), &[0, 2]);
    }

    #[test]
    fn test_invalid_regex_keeps_previous_view() {
        let mut state = ConsoleState::new();
        state.record(make_entry(Severity::Normal, "apple"));
        state.record(make_entry(Severity::Normal, "banana"));
        state.set_filter_text("an").unwrap();
        assert_eq!(visible_messages(&state), vec!["banana"]);

        state.set_use_regex(true).unwrap();
        let err = state.set_filter_text("(unclosed").unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegex { .. }));
        assert!(state.filter_error().is_some());
        assert_eq!(visible_messages(&state), vec!["banana"]);

        state.set_filter_text("^a").unwrap();
        assert!(state.filter_error().is_none());
        assert_eq!(visible_messages(&state), vec!["apple"]);
    }

    #[test]
    fn test_record_reuses_filter_from_last_refresh() {
        let mut state = ConsoleState::new();
        state.set_use_regex(true).unwrap();
        state.set_filter_text("^a").unwrap();
        assert_eq!(state.active_filter().regex_pattern(), Some("^a"));

        // The current pattern no longer compiles; recording must not try to.
        assert!(state.set_filter_text("(unclosed").is_err());
        state.record(make_entry(Severity::Normal, "apple"));
        state.record(make_entry(Severity::Normal, "banana"));

        assert_eq!(state.active_filter().regex_pattern(), Some("^a"));
        assert_eq!(visible_messages(&state), vec!["apple"]);
    }

    #[test]
    fn test_record_many_entries_with_regex_filter() {
        let mut state = ConsoleState::new();
        state
            .set_filter(FilterState::new(
                Visibility::all(),
                r"(net|disk|gpu)\s*:\s*\w+ \d{2,}%",
                true,
            ))
            .unwrap();
        for i in 0..20_000 {
            state.record(make_entry(Severity::Normal, &format!("gpu: load {}%", i % 100)));
        }
        // Loads 0-9% have a single digit and are filtered out.
        assert_eq!(state.filtered_indices().len(), 18_000);
        assert_eq!(state.store.len(), 20_000);
    }

    #[test]
    fn test_set_filter_keeps_view_consistent() {
        let mut state = ConsoleState::new();
        state.record(make_entry(Severity::Normal, "apple"));
        state
            .set_filter(FilterState::new(Visibility::all(), "zzz", false))
            .unwrap();
        state.record(make_entry(Severity::Normal, "banana"));
        assert!(visible_messages(&state).is_empty());

        state.set_filter(FilterState::default()).unwrap();
        assert_eq!(visible_messages(&state), vec!["apple", "banana"]);
    }

    #[test]
    fn test_session_save_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = ConsoleState::new();
        first.set_filter_text("net").unwrap();
        first.pause_on_error = true;
        first.save_session(dir.path()).unwrap();

        let mut second = ConsoleState::new();
        second.record(make_entry(Severity::Normal, "net up"));
        second.record(make_entry(Severity::Normal, "disk ok"));
        assert!(second.restore_session(dir.path()));
        assert!(second.pause_on_error);
        assert_eq!(second.filter_state(), first.filter_state());
        assert_eq!(visible_messages(&second), vec!["net up"]);

        let empty = tempfile::tempdir().unwrap();
        assert!(!ConsoleState::new().restore_session(empty.path()));
    }

    #[test]
    fn test_toggle_severity_refreshes() {
        let mut state = ConsoleState::new();
        state.record(make_entry(Severity::Normal, "n"));
        state.record(make_entry(Severity::Warning, "w"));
        state.record(make_entry(Severity::Error, "e"));
        state.refresh_view().unwrap();

        assert!(!state.toggle_severity(Severity::Warning).unwrap());
        assert_eq!(visible_messages(&state), vec!["n", "e"]);
        assert!(state.toggle_severity(Severity::Warning).unwrap());
        assert_eq!(visible_messages(&state), vec!["n", "w", "e"]);

        state.set_visibility(Visibility::none()).unwrap();
        assert!(state.rows().is_empty());
    }

    #[test]
    fn test_clear_keeps_filter_settings() {
        let mut state = ConsoleState::new();
        state.set_use_regex(true).unwrap();
        state.set_filter_text("^x").unwrap();
        state.record(make_entry(Severity::Error, "x1"));
        state.clear();

        assert!(state.store.is_empty());
        assert_eq!(state.counts(), SeverityCounts::default());
        assert!(state.filtered_indices().is_empty());
        assert_eq!(state.filter_state().filter_text, "^x");
        assert!(state.filter_state().use_regex);
        assert_eq!(state.status_message, constants::STATUS_READY);
    }

    #[test]
    fn test_clear_filter_text_shows_everything() {
        let mut state = ConsoleState::new();
        state.record(make_entry(Severity::Normal, "a"));
        state.record(make_entry(Severity::Normal, "b"));
        state.set_filter_text("a").unwrap();
        state.clear_filter_text().unwrap();
        assert_eq!(visible_messages(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_counter_labels() {
        let mut state = ConsoleState::new();
        state.record(make_entry(Severity::Warning, "w1"));
        state.record(make_entry(Severity::Warning, "w2"));
        assert_eq!(state.counter_label(Severity::Normal), "N: 0");
        assert_eq!(state.counter_label(Severity::Warning), "W: 2");
        assert_eq!(state.counter_label(Severity::Error), "E: 0");
    }

    #[test]
    fn test_scroll_request_consumed_once() {
        let mut state = ConsoleState::new();
        state.record(make_entry(Severity::Normal, "quiet"));
        assert!(!state.take_scroll_request());

        state.auto_scroll = true;
        state.record(make_entry(Severity::Normal, "follow"));
        assert!(state.take_scroll_request());
        assert!(!state.take_scroll_request());
    }

    #[test]
    fn test_rows_use_colour_rules() {
        let mut state = ConsoleState::new();
        state.colour_rules = ColourRules::from_pairs([("err.*", Color32::RED)]).unwrap();
        state.record(make_entry(Severity::Normal, "error: bad"));
        state.record(make_entry(Severity::Warning, "fine"));
        let rows = state.rows();
        assert_eq!(rows[0].colour, Color32::RED);
        assert_eq!(rows[1].colour, state.palette.warning);
        assert_eq!(rows[1].location, "Assets/Game.cs:7");
    }
}
