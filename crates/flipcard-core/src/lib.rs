#![forbid(unsafe_code)]

//! Core primitives shared by the flip card crates.
//!
//! - [`event`]: canonical input events delivered to a widget.
//! - [`generation`]: monotonic stamps used to discard stale deferred work.
//! - [`timer`]: the [`Scheduler`](timer::Scheduler) seam and a deterministic
//!   virtual-clock [`TimerQueue`](timer::TimerQueue).

pub mod event;
pub mod generation;
pub mod timer;

pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use generation::{Generation, GenerationCounter};
pub use timer::{Scheduler, TimerId, TimerQueue};
