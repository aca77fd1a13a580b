// LogConsole - core/export.rs
//
// CSV and JSON export of a filtered view.
// Core layer: writes to any Write trait object.

use crate::core::model::LogEntry;
use crate::util::constants::MAX_EXPORT_ENTRIES;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format for an export, chosen from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` selects JSON; anything else falls back to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

fn check_size(entries: &[LogEntry]) -> Result<(), ExportError> {
    if entries.len() > MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count: entries.len(),
            max: MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}

/// Export entries to CSV format.
///
/// Writes: timestamp, severity, file, line, message
pub fn export_csv<W: Write>(
    entries: &[LogEntry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(entries)?;
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["timestamp", "severity", "file", "line", "message"])
        .map_err(csv_err)?;

    let mut count = 0;
    for entry in entries {
        let ts = entry
            .timestamp()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

        let file = entry.file_path().display().to_string();
        let line = entry.line_number().to_string();
        let record: [&str; 5] = [
            &ts,
            entry.severity().label(),
            &file,
            &line,
            entry.message(),
        ];
        csv_writer.write_record(record).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(entries = count, path = %export_path.display(), "CSV export written");
    Ok(count)
}

/// Export entries to JSON format (array of objects).
///
/// The writer is flushed before returning so buffered write failures are
/// reported rather than lost on drop.
pub fn export_json<W: Write>(
    entries: &[LogEntry],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_size(entries)?;
    serde_json::to_writer_pretty(&mut writer, entries).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(entries = entries.len(), path = %export_path.display(), "JSON export written");
    Ok(entries.len())
}

/// Create `path` and export into it in the format its extension implies.
pub fn export_to_file(entries: &[LogEntry], path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);
    match ExportFormat::from_path(path) {
        ExportFormat::Csv => export_csv(entries, writer, path),
        ExportFormat::Json => export_json(entries, writer, path),
    }
}
