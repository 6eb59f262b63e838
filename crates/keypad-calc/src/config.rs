//! Engine configuration
//!
//! Every field has a default matching the classic twelve-digit keypad, so an
//! empty JSON object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value the engine cannot work with
    #[error("Invalid configuration: {field} {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Thousands separator used when rendering integers.
///
/// `.` is deliberately absent: it is the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// `1,234,567`
    #[default]
    Comma,
    /// `1 234 567`
    Space,
    /// `1'234'567`
    Apostrophe,
    /// `1_234_567`
    Underscore,
    /// `1234567`
    None,
}

impl GroupingStyle {
    /// Returns the separator character, if any
    #[must_use]
    pub const fn separator(self) -> Option<char> {
        match self {
            Self::Comma => Some(','),
            Self::Space => Some(' '),
            Self::Apostrophe => Some('\''),
            Self::Underscore => Some('_'),
            Self::None => None,
        }
    }
}

/// Accumulator engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Digit cap for entry, also the exponential display threshold
    pub max_digits: usize,
    /// Decimal places results are rounded to
    pub precision: u32,
    /// Mantissa digits in exponential display
    pub exponent_digits: usize,
    /// Thousands separator
    pub grouping: GroupingStyle,
    /// Text shown in place of the number after an error
    pub error_text: String,
    /// How long the error stays on screen before the automatic clear
    pub error_display_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_digits: 12,
            precision: 9,
            exponent_digits: 6,
            grouping: GroupingStyle::Comma,
            error_text: "Error".to_string(),
            error_display_ms: 2000,
        }
    }
}

impl EngineConfig {
    /// Largest accepted `max_digits`; beyond this f64 loses integer precision
    pub const MAX_DIGITS_LIMIT: usize = 15;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the digit cap
    #[must_use]
    pub const fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Set the rounding precision
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the grouping style
    #[must_use]
    pub const fn with_grouping(mut self, grouping: GroupingStyle) -> Self {
        self.grouping = grouping;
        self
    }

    /// Set the error indicator text
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Set how long errors stay on screen
    #[must_use]
    pub const fn with_error_display(mut self, duration: Duration) -> Self {
        self.error_display_ms = duration.as_millis() as u64;
        self
    }

    /// Error display duration
    #[must_use]
    pub const fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// Magnitude from which overlong operands switch to exponential display
    #[must_use]
    pub fn exponent_threshold(&self) -> f64 {
        10f64.powi(self.max_digits as i32)
    }

    /// Checks that every field is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_digits == 0 || self.max_digits > Self::MAX_DIGITS_LIMIT {
            return Err(ConfigError::invalid(
                "max_digits",
                format!("must be between 1 and {}", Self::MAX_DIGITS_LIMIT),
            ));
        }
        if self.precision > 15 {
            return Err(ConfigError::invalid("precision", "must be at most 15"));
        }
        if self.exponent_digits > 15 {
            return Err(ConfigError::invalid("exponent_digits", "must be at most 15"));
        }
        if self.error_text.trim().is_empty() {
            return Err(ConfigError::invalid("error_text", "must not be empty"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
