#![forbid(unsafe_code)]

//! Timing handshake with the flip animation.
//!
//! The card does not animate anything itself. It only needs two delays:
//!
//! - `defer_delay`: gap between showing both panes and committing the new
//!   flip value. Zero means "next turn", which is enough for the styling
//!   layer to observe both panes before the transition starts.
//! - `settle_delay`: time after a render before suppression is re-applied.
//!   It must outlast the visual transition, otherwise suppression clips the
//!   animation.

use web_time::Duration;

/// Default settle delay, matching the stock stylesheet's transition.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(600);

/// Delays used by the flip controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipTiming {
    /// Delay before suppression is re-applied after a render.
    pub settle_delay: Duration,
    /// Delay between priming both panes and applying the desired value.
    pub defer_delay: Duration,
}

impl Default for FlipTiming {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            defer_delay: Duration::ZERO,
        }
    }
}

impl FlipTiming {
    /// Default timing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settle delay.
    #[must_use]
    pub const fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the defer delay.
    #[must_use]
    pub const fn defer_delay(mut self, delay: Duration) -> Self {
        self.defer_delay = delay;
        self
    }

    /// Problems with this timing. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.settle_delay.is_zero() {
            errors.push("settle_delay must be > 0 or suppression clips the transition".into());
        }
        if self.defer_delay >= self.settle_delay && !self.settle_delay.is_zero() {
            errors.push(format!(
                "defer_delay ({}ms) must be shorter than settle_delay ({}ms)",
                self.defer_delay.as_millis(),
                self.settle_delay.as_millis()
            ));
        }
        errors
    }
}
