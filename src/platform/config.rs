// LogConsole - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::app::state::ConsoleState;
use crate::core::model::Severity;
use crate::ui::colour_rules::{ColourRule, ColourRules};
use crate::ui::theme::{parse_hex_colour, SeverityPalette};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogConsole data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logconsole/)
    pub config_dir: PathBuf,

    /// Data directory for the persisted session.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
                data_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[console]` section.
    pub console: ConsoleSection,
    /// `[colours]` section.
    pub colours: ColoursSection,
    /// `[[colour_rules]]` array, in precedence order.
    pub colour_rules: Vec<RawColourRule>,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[console]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    pub pause_on_error: Option<bool>,
    pub auto_scroll: Option<bool>,
}

/// `[colours]` config section. Values are `#RRGGBB` strings.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ColoursSection {
    pub normal: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// One `[[colour_rules]]` table.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawColourRule {
    pub pattern: String,
    pub colour: String,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pause_on_error: bool,
    pub auto_scroll: bool,
    pub palette: SeverityPalette,
    pub colour_rules: ColourRules,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pause_on_error: constants::DEFAULT_PAUSE_ON_ERROR,
            auto_scroll: constants::DEFAULT_AUTO_SCROLL,
            palette: SeverityPalette::default(),
            colour_rules: ColourRules::new(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Copy the console-related settings into a console state.
    pub fn apply_to(&self, state: &mut ConsoleState) {
        state.pause_on_error = self.pause_on_error;
        state.auto_scroll = self.auto_scroll;
        state.palette = self.palette;
        state.colour_rules = self.colour_rules.clone();
    }
}

/// Path of config.toml inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults with one warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match read_raw(&path) {
        Ok(raw) => {
            tracing::info!(path = %path.display(), "Loaded config.toml");
            validate(raw)
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate a parsed config, accumulating one warning per rejected value.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Console --
    if let Some(pause) = raw.console.pause_on_error {
        config.pause_on_error = pause;
    }
    if let Some(scroll) = raw.console.auto_scroll {
        config.auto_scroll = scroll;
    }

    // -- Colours --
    let overrides = [
        (Severity::Normal, raw.colours.normal),
        (Severity::Warning, raw.colours.warning),
        (Severity::Error, raw.colours.error),
    ];
    for (severity, value) in overrides {
        let Some(value) = value else { continue };
        match parse_hex_colour(&value) {
            Ok(colour) => config.palette.set(severity, colour),
            Err(e) => warnings.push(format!(
                "[colours] {} = \"{value}\": {e}. Using default.",
                severity.label().to_lowercase()
            )),
        }
    }

    // -- Colour rules --
    if raw.colour_rules.len() > constants::MAX_COLOUR_RULES {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: "colour_rules".to_string(),
                value: raw.colour_rules.len().to_string(),
                expected: format!(
                    "at most {} rules; the rest are ignored",
                    constants::MAX_COLOUR_RULES
                ),
            }
            .to_string(),
        );
    }
    for (idx, rule) in raw
        .colour_rules
        .iter()
        .take(constants::MAX_COLOUR_RULES)
        .enumerate()
    {
        let built = parse_hex_colour(&rule.colour)
            .and_then(|colour| ColourRule::new(&rule.pattern, colour));
        match built {
            Ok(rule) => config.colour_rules.push(rule),
            Err(e) => warnings.push(format!(
                "[[colour_rules]] #{}: {e}. Rule skipped.",
                idx + 1
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
