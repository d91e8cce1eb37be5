#![forbid(unsafe_code)]

//! Flip axis.

use std::fmt;

/// Axis the card rotates around. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayMode {
    /// Rotate around the vertical axis (left/right flip).
    #[default]
    Horizontal,
    /// Rotate around the horizontal axis (top/bottom flip).
    Vertical,
}

impl DisplayMode {
    /// Parse a mode name. Anything other than `"vertical"` is horizontal.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        if name == "vertical" {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Lowercase name used in class modifiers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Whether this is [`DisplayMode::Vertical`].
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

impl From<&str> for DisplayMode {
    fn from(name: &str) -> Self {
        Self::parse_lenient(name)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
