//! Calculator configuration.
//!
//! The configuration decides how new stack entries are formatted and how
//! numeric operations behave (float precision, fixed-width words, angles).
//! It can be built in code or parsed from a TOML string:
//!
//! ```toml
//! base = 16
//! fixed_bits = 32
//! is_signed = false
//! precision = 24
//! angle_mode = "degrees"
//! ```

use rpn_core::{AngleMode, ComplexMode, EntryFormat, FormatOptions, RationalMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::NumericEnv;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("invalid value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display radix for integers (2-36).
    pub base: u32,
    /// Fixed word width in bits, 0 for unbounded integers.
    pub fixed_bits: u32,
    /// Signedness of fixed-width words.
    pub is_signed: bool,
    /// Significant decimal digits for floats.
    pub precision: u32,
    pub angle_mode: AngleMode,
    pub rational_mode: RationalMode,
    pub complex_mode: ComplexMode,
    /// Maximum number of undo snapshots, 0 for unbounded.
    pub undo_depth: usize,
    /// Maximum number of stack entries.
    pub max_stack: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: 10,
            fixed_bits: 0,
            is_signed: true,
            precision: rpn_core::value::DEFAULT_DIGITS,
            angle_mode: AngleMode::Radians,
            rational_mode: RationalMode::Improper,
            complex_mode: ComplexMode::Rectangular,
            undo_depth: 100,
            max_stack: None,
        }
    }
}

/// Largest accepted float precision.
pub const MAX_PRECISION: u32 = 10_000;
/// Largest accepted fixed word width.
pub const MAX_FIXED_BITS: u32 = 4096;

impl Config {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=36).contains(&self.base) {
            return Err(ConfigError::Invalid {
                field: "base",
                message: format!("{} is not in 2..=36", self.base),
            });
        }
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid {
                field: "precision",
                message: format!("{} is not in 1..={}", self.precision, MAX_PRECISION),
            });
        }
        if self.fixed_bits > MAX_FIXED_BITS {
            return Err(ConfigError::Invalid {
                field: "fixed_bits",
                message: format!("{} exceeds {}", self.fixed_bits, MAX_FIXED_BITS),
            });
        }
        if self.max_stack == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max_stack",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Metadata stamped on entries created under this configuration.
    pub fn entry_format(&self) -> EntryFormat {
        EntryFormat {
            base: self.base,
            fixed_bits: self.fixed_bits,
            precision: self.precision,
            is_signed: self.is_signed,
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            angle: self.angle_mode,
            rational: self.rational_mode,
            complex: self.complex_mode,
        }
    }

    pub fn numeric_env(&self) -> NumericEnv {
        NumericEnv {
            precision: self.precision,
            fixed_bits: self.fixed_bits,
            is_signed: self.is_signed,
            angle: self.angle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_modes() {
        let content = r#"
            base = 16
            fixed_bits = 8
            is_signed = false
            angle_mode = "degrees"
            rational_mode = "mixed"
            complex_mode = "polar"
            max_stack = 64
        "#;
        let config = Config::from_toml_str(content).unwrap();
        assert_eq!(config.base, 16);
        assert_eq!(config.fixed_bits, 8);
        assert!(!config.is_signed);
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert_eq!(config.rational_mode, RationalMode::Mixed);
        assert_eq!(config.complex_mode, ComplexMode::Polar);
        assert_eq!(config.max_stack, Some(64));
        assert_eq!(config.precision, rpn_core::value::DEFAULT_DIGITS);
    }

    #[test]
    fn out_of_range_base_is_rejected() {
        let err = Config::from_toml_str("base = 40").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "base", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("base = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn entry_format_follows_config() {
        let config = Config {
            base: 2,
            fixed_bits: 16,
            ..Config::default()
        };
        let format = config.entry_format();
        assert_eq!(format.base, 2);
        assert_eq!(format.fixed_bits, 16);
    }
}
