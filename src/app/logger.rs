// LogConsole - app/logger.rs
//
// Logging facade for game code. Each call captures its own call site via
// `#[track_caller]`, so entries point at the line that logged them.

use crate::app::state::ConsoleState;
use crate::core::model::{LogEntry, Severity};
use chrono::Utc;
use std::panic::Location;

/// Borrowing handle that records into a `ConsoleState`.
#[derive(Debug)]
pub struct ConsoleLogger<'a> {
    state: &'a mut ConsoleState,
}

impl<'a> ConsoleLogger<'a> {
    pub fn new(state: &'a mut ConsoleState) -> Self {
        Self { state }
    }

    #[track_caller]
    pub fn normal(&mut self, message: impl Into<String>) {
        self.log(Severity::Normal, message);
    }

    #[track_caller]
    pub fn warning(&mut self, message: impl Into<String>) {
        self.log(Severity::Warning, message);
    }

    #[track_caller]
    pub fn error(&mut self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    /// Record `message` at `severity`, located at the caller.
    #[track_caller]
    pub fn log(&mut self, severity: Severity, message: impl Into<String>) {
        let entry = caller_entry(Location::caller(), severity, message.into());
        self.state.record(entry);
    }
}

/// Build a timestamped entry located at `location`.
pub fn caller_entry(location: &Location<'_>, severity: Severity, message: String) -> LogEntry {
    LogEntry::new(message, location.file(), location.line(), severity).with_timestamp(Utc::now())
}
