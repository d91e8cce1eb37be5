#![forbid(unsafe_code)]

//! Pane suppression.
//!
//! A suppressed pane stays in the tree but is taken out of layout, the tab
//! order and assistive technology (`display: none`). Only disabled cards
//! suppress anything: an enabled card must keep both panes reachable so
//! focus entering either of them can flip the card.
//!
//! # Invariants
//!
//! 1. Both panes are never suppressed at the same time.
//! 2. When settled and disabled, exactly the inactive pane is suppressed.
//! 3. When settled and enabled, no pane is suppressed.
//!
//! # Failure Modes
//!
//! None. All operations are infallible.

/// One of the two content surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pane {
    /// Visible while not flipped.
    Front,
    /// Visible while flipped.
    Back,
}

impl Pane {
    /// The pane that faces the viewer for a given flip state.
    #[inline]
    #[must_use]
    pub const fn active(is_flipped: bool) -> Self {
        if is_flipped { Self::Back } else { Self::Front }
    }

    /// The other pane.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Suppression state of both panes.
///
/// Private fields keep invariant 1: the only writers are
/// [`show_both`](Self::show_both) and [`settle`](Self::settle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneVisibility {
    suppressed: Option<Pane>,
}

impl PaneVisibility {
    /// Both panes visible.
    #[must_use]
    pub const fn new() -> Self {
        Self { suppressed: None }
    }

    /// Clear suppression on both panes.
    pub fn show_both(&mut self) {
        if let Some(pane) = self.suppressed.take() {
            tracing::debug!(
                target: "flipcard.visibility",
                message = "visibility.show_both",
                released = ?pane
            );
        }
    }

    /// Re-apply suppression for the settled state.
    ///
    /// Disabled: hide the pane that is not active. Enabled: leave both as
    /// they are.
    pub fn settle(&mut self, disabled: bool, is_flipped: bool) {
        if !disabled {
            return;
        }
        let hidden = Pane::active(is_flipped).opposite();
        self.suppressed = Some(hidden);
        tracing::debug!(
            target: "flipcard.visibility",
            message = "visibility.settle",
            suppressed = ?hidden,
            is_flipped
        );
    }

    /// Whether `pane` is currently suppressed.
    #[inline]
    #[must_use]
    pub fn is_suppressed(&self, pane: Pane) -> bool {
        self.suppressed == Some(pane)
    }

    /// The suppressed pane, if any.
    #[inline]
    #[must_use]
    pub const fn suppressed(&self) -> Option<Pane> {
        self.suppressed
    }
}
