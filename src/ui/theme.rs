// LogConsole - ui/theme.rs
//
// Severity colour mapping and colour parsing.
// No dependencies on app state or business logic.

use crate::core::model::Severity;
use crate::util::constants::{DEFAULT_ERROR_RGB, DEFAULT_NORMAL_RGB, DEFAULT_WARNING_RGB};
use crate::util::error::ColourRuleError;
use egui::Color32;

/// Exactly one default colour per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityPalette {
    pub normal: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl Default for SeverityPalette {
    fn default() -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color32::from_rgb(r, g, b);
        Self {
            normal: rgb(DEFAULT_NORMAL_RGB),
            warning: rgb(DEFAULT_WARNING_RGB),
            error: rgb(DEFAULT_ERROR_RGB),
        }
    }
}

impl SeverityPalette {
    /// Colour for a given severity level.
    pub fn colour(&self, severity: Severity) -> Color32 {
        match severity {
            Severity::Normal => self.normal,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    pub fn set(&mut self, severity: Severity, colour: Color32) {
        match severity {
            Severity::Normal => self.normal = colour,
            Severity::Warning => self.warning = colour,
            Severity::Error => self.error = colour,
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
pub fn parse_hex_colour(value: &str) -> Result<Color32, ColourRuleError> {
    let invalid = || ColourRuleError::InvalidColour {
        value: value.to_string(),
    };
    let hex = value.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    if hex.len() == 8 {
        Ok(Color32::from_rgba_unmultiplied(r, g, b, channel(6)?))
    } else {
        Ok(Color32::from_rgb(r, g, b))
    }
}

/// 24-bit ANSI foreground escape for terminal render surfaces.
pub fn ansi_foreground(colour: Color32) -> String {
    format!("\x1b[38;2;{};{};{}m", colour.r(), colour.g(), colour.b())
}

/// ANSI reset sequence.
pub const ANSI_RESET: &str = "\x1b[0m";
