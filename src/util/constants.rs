// LogConsole - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogConsole";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogConsole";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Filter limits
// =============================================================================

/// Maximum regex pattern length accepted by the text filter and colour rules.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

/// Maximum number of colour rules loaded from config.toml.
/// Rules are evaluated per row, so a long list costs on every repaint.
pub const MAX_COLOUR_RULES: usize = 64;

// =============================================================================
// Default severity colours (RGB)
// =============================================================================

/// Default colour for Normal entries.
pub const DEFAULT_NORMAL_RGB: [u8; 3] = [255, 255, 255];

/// Default colour for Warning entries.
pub const DEFAULT_WARNING_RGB: [u8; 3] = [237, 237, 102];

/// Default colour for Error entries.
pub const DEFAULT_ERROR_RGB: [u8; 3] = [237, 102, 102];

// =============================================================================
// Console defaults
// =============================================================================

/// Whether recording an Error entry pauses the host by default.
pub const DEFAULT_PAUSE_ON_ERROR: bool = false;

/// Whether the view follows newly recorded entries by default.
pub const DEFAULT_AUTO_SCROLL: bool = false;

/// Status bar text for a freshly created or cleared console.
pub const STATUS_READY: &str = "Ready.";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level` in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a message included in debug output.
pub const DEBUG_MAX_MESSAGE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of entries that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
