// LogConsole - core/filter.rs
//
// Severity visibility and text/regex filtering for log entries.
// Severity filtering runs first, then the text filter; both are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{LogEntry, Severity};
use crate::util::constants::MAX_REGEX_PATTERN_LENGTH;
use crate::util::error::FilterError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which severities are shown. One toolbar toggle per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub show_normal: bool,
    pub show_warning: bool,
    pub show_error: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::all()
    }
}

impl Visibility {
    pub fn all() -> Self {
        Self {
            show_normal: true,
            show_warning: true,
            show_error: true,
        }
    }

    pub fn none() -> Self {
        Self {
            show_normal: false,
            show_warning: false,
            show_error: false,
        }
    }

    pub fn shows(&self, severity: Severity) -> bool {
        match severity {
            Severity::Normal => self.show_normal,
            Severity::Warning => self.show_warning,
            Severity::Error => self.show_error,
        }
    }

    pub fn set(&mut self, severity: Severity, shown: bool) {
        match severity {
            Severity::Normal => self.show_normal = shown,
            Severity::Warning => self.show_warning = shown,
            Severity::Error => self.show_error = shown,
        }
    }

    /// Flip one severity's toggle, returning the new state.
    pub fn toggle(&mut self, severity: Severity) -> bool {
        let shown = !self.shows(severity);
        self.set(severity, shown);
        shown
    }
}

/// Complete filter configuration for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub visibility: Visibility,

    /// Substring or regex pattern. Empty = no text filter.
    pub filter_text: String,

    /// Interpret `filter_text` as a regex (search semantics).
    pub use_regex: bool,
}

impl FilterState {
    pub fn new(visibility: Visibility, filter_text: impl Into<String>, use_regex: bool) -> Self {
        Self {
            visibility,
            filter_text: filter_text.into(),
            use_regex,
        }
    }

    /// Compile the text filter once so it can be applied to every entry.
    ///
    /// Fails on an invalid or oversized regex even when no entries exist.
    /// The result owns its pattern and can be kept across many `matches` calls.
    pub fn compile(&self) -> Result<CompiledFilter, FilterError> {
        let text = if self.filter_text.is_empty() {
            TextMatcher::Any
        } else if self.use_regex {
            TextMatcher::Regex(compile_regex(&self.filter_text)?)
        } else {
            TextMatcher::Substring(self.filter_text.clone())
        };
        Ok(CompiledFilter {
            visibility: self.visibility,
            text,
        })
    }
}

/// Compile a user-supplied filter regex with the length guard applied.
pub fn compile_regex(pattern: &str) -> Result<Regex, FilterError> {
    if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
        return Err(FilterError::RegexTooLong {
            length: pattern.len(),
            max_length: MAX_REGEX_PATTERN_LENGTH,
        });
    }
    Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

#[derive(Debug, Clone)]
enum TextMatcher {
    Any,
    Substring(String),
    Regex(Regex),
}

/// A `FilterState` with its regex compiled, ready to test entries.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    visibility: Visibility,
    text: TextMatcher,
}

impl Default for CompiledFilter {
    /// Matches every entry, like `FilterState::default()`.
    fn default() -> Self {
        Self {
            visibility: Visibility::all(),
            text: TextMatcher::Any,
        }
    }
}

impl CompiledFilter {
    /// Pattern text of the compiled regex, if the filter uses one.
    pub fn regex_pattern(&self) -> Option<&str> {
        match &self.text {
            TextMatcher::Regex(regex) => Some(regex.as_str()),
            _ => None,
        }
    }

    /// Check a single entry against the severity toggles, then the text filter.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if !self.visibility.shows(entry.severity()) {
            return false;
        }
        match &self.text {
            TextMatcher::Any => true,
            TextMatcher::Substring(needle) => entry.message().contains(needle.as_str()),
            TextMatcher::Regex(regex) => regex.is_match(entry.message()),
        }
    }

    /// Indices of matching entries, in their original order.
    pub fn select(&self, entries: &[LogEntry]) -> Vec<usize> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.matches(entry))
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Apply a filter to a slice of entries, returning indices of matching entries
/// in their original order.
pub fn apply_filters(
    entries: &[LogEntry],
    filter: &FilterState,
) -> Result<Vec<usize>, FilterError> {
    Ok(filter.compile()?.select(entries))
}
