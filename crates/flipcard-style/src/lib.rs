#![forbid(unsafe_code)]

//! Presentation vocabulary for flip card widgets.
//!
//! # This crate provides
//! - [`ClassSet`] for composing class names with conditional entries.
//! - [`InlineStyle`] for ordered CSS-like declarations with patch semantics.
//! - [`DisplayMode`], the flip axis passed through to the styling layer.
//!
//! Nothing here carries behavior; the widgets crate decides which classes
//! and declarations apply to which node.

/// Class-name composition.
pub mod class;
/// Flip axis.
pub mod display;
/// Inline style declarations.
pub mod inline;

pub use class::ClassSet;
pub use display::DisplayMode;
pub use inline::InlineStyle;
