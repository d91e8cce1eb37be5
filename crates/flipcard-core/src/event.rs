#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! A flip card only reacts to two kinds of input: focus entering or leaving
//! its subtree, and key presses that it forwards to the caller untouched.
//!
//! Key events are a payload: the card never interprets them, so they carry
//! only what a caller's key handler needs (the key and held modifiers).

use bitflags::bitflags;

/// Canonical input event routed to a widget root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event received while the widget subtree holds focus.
    Key(KeyEvent),

    /// Focus entered or left the widget subtree.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

impl Event {
    /// Shorthand for `Event::Focus(true)`.
    #[must_use]
    pub const fn focus_gained() -> Self {
        Self::Focus(true)
    }

    /// Shorthand for `Event::Focus(false)`.
    #[must_use]
    pub const fn focus_lost() -> Self {
        Self::Focus(false)
    }
}

impl From<KeyEvent> for Event {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Space bar.
    Space,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
