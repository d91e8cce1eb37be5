#![forbid(unsafe_code)]

//! Unified error type for flip card APIs.
//!
//! Each subsystem keeps its own typed error; [`Error`] wraps them so
//! applications can use `?` across crate boundaries.

use std::fmt;

use flipcard_runtime::ConfigError;
use flipcard_widgets::FlipCardError;

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Widget configuration problem.
    Widget(FlipCardError),
    /// Host configuration could not be loaded.
    Config(ConfigError),
    /// I/O failure outside config loading.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Widget(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<FlipCardError> for Error {
    fn from(err: FlipCardError) -> Self {
        Self::Widget(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for flip card APIs.
pub type Result<T> = std::result::Result<T, Error>;
