#![forbid(unsafe_code)]

//! Flip state machine.
//!
//! [`FlipController`] owns the "which side faces the viewer" bit and keeps
//! it consistent with pane suppression, focus and the caller's `on_flip`
//! notification while the styling layer animates the transition.
//!
//! # Update cycle
//!
//! Every state change goes through one commit:
//!
//! 1. **Reconcile** (before the change lands): remember the focused node
//!    when the caller asks for the back side, and mark a pending
//!    notification when the flip value is about to change.
//! 2. **Apply** the new props and flip value.
//! 3. **After render**: restore remembered focus, or hand focus to the back
//!    pane, then notify, then schedule a settle.
//!
//! Caller requests (`set_props`) never flip synchronously. They show both
//! panes, commit the props, and schedule the flip value for the next turn.
//!
//! # Invariants
//!
//! 1. Both panes are never suppressed at once.
//! 2. Only the newest deferred flip and the newest settle take effect;
//!    older ones are discarded by generation.
//! 3. One notification per committed change of the flip value.
//! 4. Focus/blur flip the card only while it is enabled.
//!
//! # Failure Modes
//!
//! - A remembered focus target that was detached is skipped, not focused.
//! - A panic inside the caller's `on_flip` unwinds to the host.

use std::fmt;

use flipcard_core::{Generation, GenerationCounter, Scheduler};

use super::timing::FlipTiming;
use crate::focus::{FocusId, FocusScope};
use crate::visibility::{Pane, PaneVisibility};

/// Callback invoked with the new flip value.
pub type FlipCallback = Box<dyn FnMut(bool)>;

/// Node ids of the card's focusable surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipNodes {
    /// Tab-reachable root container.
    pub root: FocusId,
    /// Front pane.
    pub front: FocusId,
    /// Back pane.
    pub back: FocusId,
}

impl FlipNodes {
    /// Bundle node ids.
    #[must_use]
    pub const fn new(root: FocusId, front: FocusId, back: FocusId) -> Self {
        Self { root, front, back }
    }

    /// Node id of `pane`.
    #[must_use]
    pub const fn pane(&self, pane: Pane) -> FocusId {
        match pane {
            Pane::Front => self.front,
            Pane::Back => self.back,
        }
    }
}

/// Caller-owned inputs that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipProps {
    /// Side the caller wants to show (`true` = back).
    pub flipped: bool,
    /// Ignore focus/blur and hide the down-facing pane.
    pub disabled: bool,
}

impl FlipProps {
    /// Create props.
    #[must_use]
    pub const fn new(flipped: bool, disabled: bool) -> Self {
        Self { flipped, disabled }
    }
}

/// Deferred work handed to the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipTask {
    /// Commit the caller's desired flip value.
    ApplyDesired {
        /// Stamp checked against the controller on arrival.
        generation: Generation,
        /// Value to commit.
        flipped: bool,
    },
    /// Re-apply pane suppression after the transition.
    Settle {
        /// Stamp checked against the controller on arrival.
        generation: Generation,
    },
}

/// Coarse lifecycle phase, derived from outstanding deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipPhase {
    /// Nothing pending; suppression matches the current state.
    #[default]
    Idle,
    /// Both panes shown, desired value not committed yet.
    Priming,
    /// Value committed, waiting for the transition to finish.
    Settling,
}

#[derive(Clone, Copy)]
struct Snapshot {
    props: FlipProps,
    is_flipped: bool,
}

/// Transient bookkeeping between reconcile and after-render.
///
/// Only [`FlipController::reconcile`] sets these and only
/// [`FlipController::after_render`] consumes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Pending {
    /// Node to hand focus back to once the caller flips to the front again.
    focus_memory: Option<FocusId>,
    /// Back pane should take focus once the flip to back is committed.
    focus_back: bool,
    /// Flip value changed since the last notification.
    notify: bool,
}

/// The flip/focus/visibility state machine.
pub struct FlipController {
    nodes: FlipNodes,
    props: FlipProps,
    is_flipped: bool,
    has_focus: bool,
    visibility: PaneVisibility,
    pending: Pending,
    timing: FlipTiming,
    apply_generation: GenerationCounter,
    settle_generation: GenerationCounter,
    awaiting_apply: bool,
    awaiting_settle: bool,
    flip_count: u64,
    on_flip: Option<FlipCallback>,
}

impl fmt::Debug for FlipController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlipController")
            .field("nodes", &self.nodes)
            .field("props", &self.props)
            .field("is_flipped", &self.is_flipped)
            .field("has_focus", &self.has_focus)
            .field("visibility", &self.visibility)
            .field("pending", &self.pending)
            .field("phase", &self.phase())
            .field("flip_count", &self.flip_count)
            .field("on_flip", &self.on_flip.is_some())
            .finish()
    }
}

impl FlipController {
    /// Create a controller showing the side `props.flipped` asks for.
    #[must_use]
    pub fn new(props: FlipProps, nodes: FlipNodes, timing: FlipTiming) -> Self {
        Self {
            nodes,
            props,
            is_flipped: props.flipped,
            has_focus: false,
            visibility: PaneVisibility::new(),
            pending: Pending::default(),
            timing,
            apply_generation: GenerationCounter::new(),
            settle_generation: GenerationCounter::new(),
            awaiting_apply: false,
            awaiting_settle: false,
            flip_count: 0,
            on_flip: None,
        }
    }

    /// Register the flip notification callback.
    #[must_use]
    pub fn with_on_flip(mut self, on_flip: impl FnMut(bool) + 'static) -> Self {
        self.on_flip = Some(Box::new(on_flip));
        self
    }

    /// Replace the flip notification callback.
    pub fn set_on_flip(&mut self, on_flip: Option<FlipCallback>) {
        self.on_flip = on_flip;
    }

    /// Replace the timing. Applies to work scheduled from now on; tasks
    /// already queued keep their deadlines.
    pub fn set_timing(&mut self, timing: FlipTiming) {
        self.timing = timing;
    }

    // --- Queries ---

    /// Side currently committed (`true` = back faces the viewer).
    #[inline]
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Whether focus is inside the card, as last reported by the host.
    #[inline]
    #[must_use]
    pub const fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Current props.
    #[inline]
    #[must_use]
    pub const fn props(&self) -> FlipProps {
        self.props
    }

    /// Node ids.
    #[inline]
    #[must_use]
    pub const fn nodes(&self) -> FlipNodes {
        self.nodes
    }

    /// Pane suppression state.
    #[inline]
    #[must_use]
    pub const fn visibility(&self) -> PaneVisibility {
        self.visibility
    }

    /// Timing in use.
    #[inline]
    #[must_use]
    pub const fn timing(&self) -> FlipTiming {
        self.timing
    }

    /// Number of notifications emitted so far.
    #[inline]
    #[must_use]
    pub const fn flip_count(&self) -> u64 {
        self.flip_count
    }

    /// Node the card will hand focus back to, if any.
    #[inline]
    #[must_use]
    pub const fn focus_memory(&self) -> Option<FocusId> {
        self.pending.focus_memory
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FlipPhase {
        if self.awaiting_apply {
            FlipPhase::Priming
        } else if self.awaiting_settle {
            FlipPhase::Settling
        } else {
            FlipPhase::Idle
        }
    }

    /// Whether no deferred work is outstanding.
    #[inline]
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self.phase(), FlipPhase::Idle)
    }

    // --- Lifecycle ---

    /// Apply initial suppression once the card is in the tree.
    pub fn mount(&mut self) {
        tracing::debug!(
            target: "flipcard.controller",
            message = "flip.mount",
            is_flipped = self.is_flipped,
            disabled = self.props.disabled
        );
        self.visibility.settle(self.props.disabled, self.is_flipped);
    }

    /// Receive new props from the caller.
    ///
    /// Shows both panes right away, commits the props, and defers the flip
    /// value to the next turn so the styling layer sees two renderable
    /// panes before the transition starts. A newer call supersedes any
    /// deferred value that has not landed yet.
    pub fn set_props<F, S>(&mut self, next: FlipProps, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        tracing::debug!(
            target: "flipcard.controller",
            message = "flip.request",
            desired = next.flipped,
            disabled = next.disabled,
            is_flipped = self.is_flipped
        );
        self.show_both();
        let generation = self.apply_generation.bump();
        self.awaiting_apply = true;
        sched.schedule(
            self.timing.defer_delay,
            FlipTask::ApplyDesired {
                generation,
                flipped: next.flipped,
            },
        );
        let snapshot = Snapshot {
            props: next,
            is_flipped: self.is_flipped,
        };
        self.commit(snapshot, "props", focus, sched);
    }

    /// The caller changed the desired side.
    pub fn on_desired_flip_changed<F, S>(&mut self, desired: bool, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        let next = FlipProps {
            flipped: desired,
            ..self.props
        };
        self.set_props(next, focus, sched);
    }

    /// The caller enabled or disabled the card.
    pub fn set_disabled<F, S>(&mut self, disabled: bool, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        let next = FlipProps {
            disabled,
            ..self.props
        };
        self.set_props(next, focus, sched);
    }

    /// Focus entered the card: show the back unless disabled.
    pub fn on_focus_gained<F, S>(&mut self, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.has_focus = true;
        self.interact(true, focus, sched);
    }

    /// Focus left the card: show the front unless disabled.
    pub fn on_focus_lost<F, S>(&mut self, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.has_focus = false;
        self.interact(false, focus, sched);
    }

    /// Run a task previously handed to the scheduler.
    pub fn run_task<F, S>(&mut self, task: FlipTask, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        match task {
            FlipTask::ApplyDesired {
                generation,
                flipped,
            } => {
                if !self.apply_generation.is_current(generation) {
                    tracing::debug!(
                        target: "flipcard.controller",
                        message = "task.stale",
                        kind = "apply",
                        generation = generation.get()
                    );
                    return;
                }
                self.awaiting_apply = false;
                let snapshot = Snapshot {
                    props: self.props,
                    is_flipped: flipped,
                };
                self.commit(snapshot, "deferred", focus, sched);
            }
            FlipTask::Settle { generation } => {
                if !self.settle_generation.is_current(generation) {
                    tracing::debug!(
                        target: "flipcard.controller",
                        message = "task.stale",
                        kind = "settle",
                        generation = generation.get()
                    );
                    return;
                }
                self.awaiting_settle = false;
                self.visibility
                    .settle(self.props.disabled, self.is_flipped);
            }
        }
    }

    // --- Internals ---

    fn interact<F, S>(&mut self, flipped: bool, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        if self.props.disabled {
            tracing::debug!(
                target: "flipcard.controller",
                message = "flip.ignored",
                reason = "disabled",
                requested = flipped
            );
            return;
        }
        let snapshot = Snapshot {
            props: self.props,
            is_flipped: flipped,
        };
        self.commit(snapshot, "interaction", focus, sched);
    }

    fn show_both(&mut self) {
        self.visibility.show_both();
        // Pending settles were computed for the old state.
        self.settle_generation.bump();
        self.awaiting_settle = false;
    }

    fn commit<F, S>(&mut self, next: Snapshot, cause: &'static str, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        let _span = tracing::debug_span!(
            "flipcard.commit",
            cause,
            from = self.is_flipped,
            to = next.is_flipped,
            desired = next.props.flipped
        )
        .entered();

        self.reconcile(next, &*focus);
        self.props = next.props;
        self.is_flipped = next.is_flipped;
        tracing::debug!(
            target: "flipcard.controller",
            message = "flip.commit",
            is_flipped = self.is_flipped,
            disabled = self.props.disabled
        );
        self.after_render(focus);

        let generation = self.settle_generation.bump();
        self.awaiting_settle = true;
        sched.schedule(self.timing.settle_delay, FlipTask::Settle { generation });
    }

    fn reconcile<F>(&mut self, next: Snapshot, focus: &F)
    where
        F: FocusScope + ?Sized,
    {
        if !self.props.flipped && next.props.flipped {
            self.pending.focus_memory = focus.focused();
            self.pending.focus_back = true;
            tracing::debug!(
                target: "flipcard.focus",
                message = "focus.remember",
                node = ?self.pending.focus_memory
            );
        } else if self.props.flipped && !next.props.flipped {
            self.pending.focus_back = false;
        }

        if self.is_flipped != next.is_flipped {
            self.pending.notify = true;
        }
    }

    fn after_render<F>(&mut self, focus: &mut F)
    where
        F: FocusScope + ?Sized,
    {
        if !self.props.flipped {
            if let Some(target) = self.pending.focus_memory.take() {
                if focus.focus_within(self.nodes.root) && focus.is_attached(target) {
                    focus.focus(target);
                    tracing::debug!(
                        target: "flipcard.focus",
                        message = "focus.restore",
                        node = target
                    );
                } else {
                    tracing::debug!(
                        target: "flipcard.focus",
                        message = "focus.restore_skipped",
                        node = target,
                        attached = focus.is_attached(target)
                    );
                }
            }
        } else if self.pending.focus_back && self.is_flipped {
            self.pending.focus_back = false;
            focus.focus(self.nodes.back);
            tracing::debug!(
                target: "flipcard.focus",
                message = "focus.back",
                node = self.nodes.back
            );
        }

        if std::mem::take(&mut self.pending.notify) {
            self.flip_count += 1;
            tracing::debug!(
                target: "flipcard.controller",
                message = "flip.notify",
                is_flipped = self.is_flipped,
                count = self.flip_count
            );
            if let Some(on_flip) = self.on_flip.as_mut() {
                on_flip(self.is_flipped);
            }
        }
    }
}
