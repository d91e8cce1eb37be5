#![forbid(unsafe_code)]

//! Inline style declarations.
//!
//! [`InlineStyle`] is an ordered list of `property: value` declarations.
//! Setting a property that already exists replaces its value in place, and
//! [`patch`](InlineStyle::patch) merges another style on top with the
//! other side winning, mirroring cascading semantics.

use std::fmt;

/// Ordered CSS-like declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Create an empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Set `property` to `value`, replacing any earlier value.
    #[must_use]
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property.into(), value.into());
        self
    }

    /// Set a declaration in place.
    pub fn insert(&mut self, property: String, value: String) {
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Remove a declaration, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let idx = self.declarations.iter().position(|(p, _)| p == property)?;
        Some(self.declarations.remove(idx).1)
    }

    /// Value of `property`, if declared.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Merge `other` on top of `self`. Declarations in `other` win.
    #[must_use]
    pub fn patch(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (property, value) in &other.declarations {
            merged.insert(property.clone(), value.clone());
        }
        merged
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Whether no declaration is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}
