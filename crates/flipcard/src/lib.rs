#![forbid(unsafe_code)]

//! Flip card public facade.
//!
//! Re-exports the pieces most applications need and a prelude for
//! day-to-day use.
//!
//! ```
//! use flipcard::prelude::*;
//!
//! let focus = FocusTree::new()
//!     .with_node(1, None)
//!     .with_node(2, Some(1))
//!     .with_node(3, Some(1));
//! let card = FlipCard::new(
//!     FlipCardProps::new().disabled(true),
//!     FlipNodes::new(1, 2, 3),
//!     ["front", "back"],
//! );
//! let mut host = FlipHost::new(card, focus, HostConfig::default());
//!
//! host.set_flipped(true);
//! host.run_until_idle();
//! assert!(host.card().is_flipped());
//! assert!(host.card().view().front.node.is_suppressed());
//! ```

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use flipcard_core::{
    Event, Generation, KeyCode, KeyEvent, Modifiers, Scheduler, TimerId, TimerQueue,
};

// --- Style re-exports ------------------------------------------------------

pub use flipcard_style::{ClassSet, DisplayMode, InlineStyle};

// --- Widget re-exports -----------------------------------------------------

pub use flipcard_widgets::flip_card::{
    DEFAULT_CLASS_PREFIX, DEFAULT_SETTLE_DELAY, FlipCallback, FlipCard, FlipCardError,
    FlipCardProps, FlipCardView, FlipController, FlipNodes, FlipPhase, FlipTask, FlipTiming,
    KeyCallback, NodeView, PaneView, Presentation,
};
pub use flipcard_widgets::{FocusId, FocusScope, FocusTree, Pane, PaneVisibility};

// --- Runtime re-exports ----------------------------------------------------

pub use flipcard_runtime::{ConfigError, FlipHost, HostConfig};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DisplayMode, Error, Event, FlipCard, FlipCardProps, FlipHost, FlipNodes, FlipTiming,
        FocusScope, FocusTree, HostConfig, InlineStyle, KeyCode, KeyEvent, Pane, Result,
    };

    pub use crate::{core, runtime, style, widgets};
}

pub use flipcard_core as core;
pub use flipcard_runtime as runtime;
pub use flipcard_style as style;
pub use flipcard_widgets as widgets;
