// LogConsole - app/session.rs
//
// Session persistence: save and restore the console's toggles and filter
// between runs.
//
// - Saved atomically (write temp, then rename) so a crash during save never
//   corrupts the previous good session.
// - Load errors are logged and discarded; the console just starts fresh.
// - Entries are NOT persisted. The store always starts empty.

use crate::app::state::ConsoleState;
use crate::core::filter::{FilterState, Visibility};
use crate::util::constants::SESSION_FILE_NAME;
use crate::util::error::SessionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp. Mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Persisted console settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub filter_text: String,

    #[serde(default)]
    pub use_regex: bool,

    #[serde(default)]
    pub pause_on_error: bool,

    #[serde(default)]
    pub auto_scroll: bool,
}

impl SessionData {
    /// Snapshot the persistable parts of `state`.
    pub fn capture(state: &ConsoleState) -> Self {
        let filter = state.filter_state();
        Self {
            version: SESSION_VERSION,
            visibility: filter.visibility,
            filter_text: filter.filter_text.clone(),
            use_regex: filter.use_regex,
            pause_on_error: state.pause_on_error,
            auto_scroll: state.auto_scroll,
        }
    }

    /// Restore into `state` and refresh its view.
    ///
    /// A saved regex that no longer compiles leaves the previous view in
    /// place and is reported through `state.filter_error()`.
    pub fn apply(&self, state: &mut ConsoleState) {
        state.pause_on_error = self.pause_on_error;
        state.auto_scroll = self.auto_scroll;
        let filter = FilterState::new(self.visibility, self.filter_text.clone(), self.use_regex);
        if let Err(e) = state.set_filter(filter) {
            tracing::warn!(error = %e, "Restored filter is invalid");
        }
    }
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp, rename).
///
/// Creates all parent directories as needed.
pub fn save(data: &SessionData, path: &Path) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SessionError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(data).map_err(|e| SessionError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| SessionError::Io {
        path: tmp.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SessionError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch). Treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed, starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch, starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LogEntry, Severity};
    use tempfile::TempDir;

    fn sample_data() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            visibility: Visibility {
                show_normal: false,
                show_warning: true,
                show_error: true,
            },
            filter_text: "^net".to_string(),
            use_regex: true,
            pause_on_error: true,
            auto_scroll: true,
        }
    }

    #[test]
    fn test_session_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        let original = sample_data();

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path).expect("load should return Some after valid save");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_session_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nonexistent.json")).is_none());
    }

    #[test]
    fn test_session_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut data = sample_data();
        data.version = 99;
        save(&data, &path).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_missing_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, br#"{ "version": 1 }"#).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.visibility, Visibility::all());
        assert!(loaded.filter_text.is_empty());
        assert!(!loaded.pause_on_error);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_replaces_stale_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("session.json");
        save(&sample_data(), &path).unwrap();

        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();
        let mut updated = sample_data();
        updated.filter_text = "boss".to_string();
        save(&updated, &path).unwrap();

        assert_eq!(load(&path).unwrap().filter_text, "boss");
    }

    #[test]
    fn test_capture_and_apply() {
        let mut source = ConsoleState::new();
        source.pause_on_error = true;
        source.set_filter_text("net").unwrap();
        source.toggle_severity(Severity::Normal).unwrap();
        let data = SessionData::capture(&source);

        let mut target = ConsoleState::new();
        target.record(LogEntry::new("net up", "", 0, Severity::Normal));
        target.record(LogEntry::new("net down", "", 0, Severity::Error));
        data.apply(&mut target);

        assert!(target.pause_on_error);
        assert_eq!(target.filter_state(), source.filter_state());
        let shown: Vec<_> = target.visible_entries().map(|e| e.message()).collect();
        assert_eq!(shown, vec!["net down"]);
    }
}
