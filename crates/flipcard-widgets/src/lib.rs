#![forbid(unsafe_code)]

//! Flip card widget.
//!
//! - [`flip_card`]: the card, its props, its state machine and its view.
//! - [`focus`]: the focus capability the card consumes.
//! - [`visibility`]: pane suppression.

pub mod flip_card;
pub mod focus;
pub mod visibility;

pub use flip_card::{
    FlipCard, FlipCardError, FlipCardProps, FlipCardView, FlipController, FlipNodes, FlipPhase,
    FlipProps, FlipTask, FlipTiming,
};
pub use focus::{FocusId, FocusScope, FocusTree};
pub use visibility::{Pane, PaneVisibility};
