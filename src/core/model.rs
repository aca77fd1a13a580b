// LogConsole - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// Log Entry
// =============================================================================

/// A single recorded log message with its source location and severity.
///
/// Entries are immutable once built: fields are private and only exposed
/// through accessors. No validation is applied; an empty message, an empty
/// path or a zero line number are all stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    message: String,
    file_path: PathBuf,
    line_number: u32,
    severity: Severity,
    timestamp: Option<DateTime<Utc>>,
}

impl LogEntry {
    /// Build an entry with an explicit source location.
    pub fn new(
        message: impl Into<String>,
        file_path: impl Into<PathBuf>,
        line_number: u32,
        severity: Severity,
    ) -> Self {
        Self {
            message: message.into(),
            file_path: file_path.into(),
            line_number,
            severity,
            timestamp: None,
        }
    }

    /// Attach the time the entry was produced.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Originating source file. Empty when unknown.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Originating source line. Zero when unknown.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// `path:line`, `path` when the line is unknown, or empty when the path is.
    pub fn location_label(&self) -> String {
        if self.file_path.as_os_str().is_empty() {
            String::new()
        } else if self.line_number == 0 {
            self.file_path.display().to_string()
        } else {
            format!("{}:{}", self.file_path.display(), self.line_number)
        }
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Closed set of severities a console entry can carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Error,
}

impl Severity {
    /// Returns all variants in toolbar order.
    pub fn all() -> &'static [Severity] {
        &[Severity::Normal, Severity::Warning, Severity::Error]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }

    /// Single-letter label used by the counter buttons ("N: 3").
    pub fn short_label(&self) -> &'static str {
        match self {
            Severity::Normal => "N",
            Severity::Warning => "W",
            Severity::Error => "E",
        }
    }

    /// Classify a plain-text log line by keyword (case-insensitive).
    ///
    /// Error keywords are checked first so "warning: fatal error" is an Error.
    pub fn infer_from_message(message: &str) -> Severity {
        let lower = message.to_lowercase();
        if ["error", "fatal", "exception"]
            .iter()
            .any(|k| lower.contains(k))
        {
            Severity::Error
        } else if lower.contains("warn") {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Severity counters
// =============================================================================

/// One counter per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub normal: usize,
    pub warning: usize,
    pub error: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Normal => self.normal,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.warning + self.error
    }

    pub(crate) fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Normal => self.normal += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
        }
    }
}
