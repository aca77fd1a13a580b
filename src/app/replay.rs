// LogConsole - app/replay.rs
//
// Feed a plain-text log (one message per line) into a console.

use crate::app::state::ConsoleState;
use crate::core::model::{LogEntry, Severity};
use crate::util::constants::DEBUG_MAX_MESSAGE_PREVIEW;
use std::io::BufRead;
use std::path::Path;

/// Record every non-blank line of `reader` into `state`.
///
/// Each entry is located at `source_path` and its 1-based line number, and
/// its severity is inferred from keywords in the text. Returns the number of
/// entries recorded.
pub fn replay_lines<R: BufRead>(
    reader: R,
    source_path: &Path,
    state: &mut ConsoleState,
) -> std::io::Result<usize> {
    let mut recorded = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let message = line.trim_end();
        if message.trim().is_empty() {
            continue;
        }
        let severity = Severity::infer_from_message(message);
        let line_number = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        tracing::trace!(
            line = line_number,
            %severity,
            preview = %preview(message),
            "Replaying line"
        );
        state.record(LogEntry::new(message, source_path, line_number, severity));
        recorded += 1;
    }

    tracing::debug!(
        source = %source_path.display(),
        entries = recorded,
        "Replay complete"
    );
    Ok(recorded)
}

fn preview(message: &str) -> &str {
    match message.char_indices().nth(DEBUG_MAX_MESSAGE_PREVIEW) {
        Some((cut, _)) => &message[..cut],
        None => message,
    }
}
