//! Immutable engine configuration.
//!
//! # Responsibility
//! - Hold traversal ceilings and compatibility thresholds.
//! - Load overrides from TOML, falling back to defaults per key.
//!
//! # Invariants
//! - `max_depth` and `max_nodes` are non-zero.
//! - `compatible_threshold` lies in `0..=100`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const DEFAULT_MAX_DEPTH: u32 = 10;
pub const DEFAULT_MAX_NODES: usize = 500;
pub const DEFAULT_COMPATIBLE_THRESHOLD: u32 = 60;
pub const DEFAULT_MECHANISM_SUMMARY_CHARS: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceConfig {
    /// Ceiling applied to caller-supplied traversal depth.
    pub max_depth: u32,
    /// Ceiling on nodes collected by one traversal or path search.
    pub max_nodes: usize,
    /// Minimum overall score (0..=100) for a compatible verdict.
    pub compatible_threshold: u32,
    /// Length cap for mechanism summaries on chain nodes.
    pub mechanism_summary_chars: usize,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            compatible_threshold: DEFAULT_COMPATIBLE_THRESHOLD,
            mechanism_summary_chars: DEFAULT_MECHANISM_SUMMARY_CHARS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::InvalidValue { key, message } => write!(f, "invalid config `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl IntelligenceConfig {
    /// Parses TOML text; absent keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file. A missing or unreadable file is `ConfigError::Io`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_depth",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.max_nodes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_nodes",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.compatible_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                key: "compatible_threshold",
                message: format!("{} is outside 0..=100", self.compatible_threshold),
            });
        }
        Ok(())
    }
}
