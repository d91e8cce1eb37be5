#![forbid(unsafe_code)]

//! Host configuration as data.
//!
//! [`HostConfig`] collects the tunables of a [`FlipHost`](crate::FlipHost)
//! so they can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # flipcard.toml
//! settle_delay_ms = 600
//! defer_delay_ms = 0
//! max_turns_per_advance = 64
//! ```
//!
//! ```rust,ignore
//! let config = HostConfig::from_toml_file("flipcard.toml")?;
//! let config = HostConfig::from_json_str(r#"{"settle_delay_ms": 450}"#)?;
//! ```
//!
//! Missing keys keep their defaults. A load with out-of-range values returns
//! [`ConfigError::Validation`] listing every problem found.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use flipcard_widgets::FlipTiming;
#[cfg(feature = "config")]
use web_time::Duration;

/// Default bound on tasks run by a single `advance` call.
pub const DEFAULT_MAX_TURNS: usize = 64;

/// Tunables for a [`FlipHost`](crate::FlipHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// Delays handed to the card.
    pub timing: FlipTiming,
    /// Upper bound on deferred tasks and focus round-trips processed per
    /// `advance` call. Guards against runaway task chains.
    pub max_turns_per_advance: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            timing: FlipTiming::default(),
            max_turns_per_advance: DEFAULT_MAX_TURNS,
        }
    }
}

impl HostConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the timing.
    #[must_use]
    pub const fn with_timing(mut self, timing: FlipTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the turn bound.
    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns_per_advance = max_turns;
        self
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.timing.validate();
        if self.max_turns_per_advance == 0 {
            errors.push("max_turns_per_advance must be > 0".into());
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: HostConfigFile = toml::from_str(s).map_err(ConfigError::Toml)?;
        file.into_config()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let file: HostConfigFile = serde_json::from_str(s).map_err(ConfigError::Json)?;
        file.into_config()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a single JSON line.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&HostConfigFile::from(*self)).map_err(ConfigError::Json)
    }
}

/// On-disk shape: durations in whole milliseconds.
#[cfg(feature = "config")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HostConfigFile {
    settle_delay_ms: u64,
    defer_delay_ms: u64,
    max_turns_per_advance: usize,
}

#[cfg(feature = "config")]
impl Default for HostConfigFile {
    fn default() -> Self {
        Self::from(HostConfig::default())
    }
}

#[cfg(feature = "config")]
impl From<HostConfig> for HostConfigFile {
    fn from(config: HostConfig) -> Self {
        Self {
            settle_delay_ms: u64::try_from(config.timing.settle_delay.as_millis())
                .unwrap_or(u64::MAX),
            defer_delay_ms: u64::try_from(config.timing.defer_delay.as_millis())
                .unwrap_or(u64::MAX),
            max_turns_per_advance: config.max_turns_per_advance,
        }
    }
}

#[cfg(feature = "config")]
impl HostConfigFile {
    fn into_config(self) -> Result<HostConfig, ConfigError> {
        let config = HostConfig {
            timing: FlipTiming::new()
                .settle_delay(Duration::from_millis(self.settle_delay_ms))
                .defer_delay(Duration::from_millis(self.defer_delay_ms)),
            max_turns_per_advance: self.max_turns_per_advance,
        };
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a host configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse or encode error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
