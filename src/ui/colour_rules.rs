// LogConsole - ui/colour_rules.rs
//
// Ordered (pattern, colour) overrides for row colours.
// The first rule whose regex finds a match in the message wins; entries no
// rule matches use their severity's default colour.

use crate::core::model::LogEntry;
use crate::ui::theme::SeverityPalette;
use crate::util::constants::MAX_REGEX_PATTERN_LENGTH;
use crate::util::error::ColourRuleError;
use egui::Color32;
use regex::Regex;

/// One compiled override rule.
#[derive(Debug, Clone)]
pub struct ColourRule {
    pattern: Regex,
    colour: Color32,
}

impl ColourRule {
    pub fn new(pattern: &str, colour: Color32) -> Result<Self, ColourRuleError> {
        if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
            return Err(ColourRuleError::RegexTooLong {
                length: pattern.len(),
                max_length: MAX_REGEX_PATTERN_LENGTH,
            });
        }
        let regex = Regex::new(pattern).map_err(|e| ColourRuleError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        Ok(Self {
            pattern: regex,
            colour,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn colour(&self) -> Color32 {
        self.colour
    }

    pub fn matches(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}

/// Rule list in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct ColourRules {
    rules: Vec<ColourRule>,
}

impl ColourRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule list from `(pattern, colour)` pairs, keeping their order.
    /// Fails on the first invalid pattern.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ColourRuleError>
    where
        I: IntoIterator<Item = (&'a str, Color32)>,
    {
        let rules = pairs
            .into_iter()
            .map(|(pattern, colour)| ColourRule::new(pattern, colour))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Append a rule at the lowest precedence.
    pub fn push(&mut self, rule: ColourRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColourRule> {
        self.rules.iter()
    }

    /// Colour of the first matching rule, if any.
    pub fn first_match(&self, message: &str) -> Option<Color32> {
        self.rules
            .iter()
            .find(|rule| rule.matches(message))
            .map(ColourRule::colour)
    }

    /// Row colour for an entry: first matching rule, else the severity default.
    pub fn resolve(&self, entry: &LogEntry, palette: &SeverityPalette) -> Color32 {
        self.first_match(entry.message())
            .unwrap_or_else(|| palette.colour(entry.severity()))
    }
}
