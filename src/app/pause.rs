// LogConsole - app/pause.rs
//
// Host hook invoked when an Error entry arrives with pause-on-error enabled.

use crate::core::model::LogEntry;

/// Signal to the host that execution should halt.
///
/// Fire-and-forget: the console does not wait on the host.
pub trait PauseHook {
    fn pause(&mut self, entry: &LogEntry);
}

impl<F> PauseHook for F
where
    F: FnMut(&LogEntry),
{
    fn pause(&mut self, entry: &LogEntry) {
        self(entry)
    }
}

/// Stand-in used outside an editor host.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPause;

impl PauseHook for NoopPause {
    fn pause(&mut self, entry: &LogEntry) {
        tracing::debug!(
            location = %entry.location_label(),
            "Pause requested but no host hook is installed"
        );
    }
}
