#![forbid(unsafe_code)]

//! Ordered class-name sets.
//!
//! A [`ClassSet`] is built the way a caller composes class lists in markup:
//! caller-supplied class strings first, then fixed and conditional entries.
//! Entries keep insertion order, whitespace-separated input is split into
//! individual classes, and a class is only stored once.
//!
//! # Example
//!
//! ```
//! use flipcard_style::ClassSet;
//!
//! let classes = ClassSet::new()
//!     .with_raw(Some("card  shadow"))
//!     .with("Flip")
//!     .with_if("Flip--flipped", false)
//!     .with_if("Flip--enabled", true);
//! assert_eq!(classes.to_string(), "card shadow Flip Flip--enabled");
//! ```

use std::fmt;

/// Insertion-ordered, de-duplicated set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    classes: Vec<String>,
}

impl ClassSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// Add every whitespace-separated class in `class`.
    #[must_use]
    pub fn with(mut self, class: impl AsRef<str>) -> Self {
        self.insert(class.as_ref());
        self
    }

    /// Add `class` only when `enabled` holds.
    #[must_use]
    pub fn with_if(self, class: impl AsRef<str>, enabled: bool) -> Self {
        if enabled { self.with(class) } else { self }
    }

    /// Add an optional caller-supplied class string.
    #[must_use]
    pub fn with_raw(self, raw: Option<&str>) -> Self {
        match raw {
            Some(raw) => self.with(raw),
            None => self,
        }
    }

    /// Add classes in place.
    pub fn insert(&mut self, class: &str) {
        for token in class.split_whitespace() {
            if !self.contains(token) {
                self.classes.push(token.to_owned());
            }
        }
    }

    /// Whether `class` is present.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Iterate classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}
