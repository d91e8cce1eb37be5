#![forbid(unsafe_code)]

//! Cooperative single-threaded host for a flip card.
//!
//! [`FlipHost`] owns a [`FlipCard`], the focus scope it lives in and the
//! timer queue its deferred work lands on. It plays the part of the
//! surrounding UI runtime:
//!
//! - Focus moving across the card root, whether by the user or by the card
//!   itself, turns into `Event::Focus(true/false)` the way bubbling
//!   focus-in/focus-out events reach a container.
//! - Time is virtual. Deferred tasks only run from [`advance`](FlipHost::advance)
//!   and friends, in deadline order, each as its own turn.
//!
//! # Invariants
//!
//! 1. After every public call returns, the card has seen a focus event for
//!    each crossing of its root boundary (up to the turn bound).
//! 2. The virtual clock never moves backwards.
//!
//! # Failure Modes
//!
//! - A task chain longer than `max_turns_per_advance` is cut short with a
//!   warning; remaining tasks stay queued for the next call.

use web_time::Duration;

use flipcard_core::{Event, KeyEvent, TimerQueue};
use flipcard_style::DisplayMode;
use flipcard_widgets::flip_card::{FlipCallback, KeyCallback, Presentation};
use flipcard_widgets::{FlipCard, FlipTask, FocusId, FocusScope, FocusTree};

use crate::config::HostConfig;

/// Drives one flip card against a focus scope and a virtual clock.
#[derive(Debug)]
pub struct FlipHost<C, F: FocusScope> {
    card: FlipCard<C>,
    focus: F,
    timers: TimerQueue<FlipTask>,
    config: HostConfig,
    focus_inside: bool,
}

impl<C, F: FocusScope> FlipHost<C, F> {
    /// Mount `card` inside `focus`.
    ///
    /// The card runs on `config.timing`, replacing whatever timing its props
    /// carried. Focus already inside the card root at mount time counts as
    /// inside; no focus event is delivered for it.
    pub fn new(mut card: FlipCard<C>, focus: F, config: HostConfig) -> Self {
        card.set_timing(config.timing);
        card.mount();
        let focus_inside = focus.focus_within(card.controller().nodes().root);
        tracing::debug!(
            target: "flipcard.host",
            message = "host.mount",
            is_flipped = card.is_flipped(),
            settle_delay_ms = u64::try_from(config.timing.settle_delay.as_millis()).unwrap_or(u64::MAX),
            focus_inside
        );
        Self {
            card,
            focus,
            timers: TimerQueue::new(),
            config,
            focus_inside,
        }
    }

    // --- Caller props ---

    /// Change the `flipped` prop.
    pub fn set_flipped(&mut self, flipped: bool) {
        self.card
            .set_flipped(flipped, &mut self.focus, &mut self.timers);
        self.sync_focus();
    }

    /// Change the `disabled` prop.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.card
            .set_disabled(disabled, &mut self.focus, &mut self.timers);
        self.sync_focus();
    }

    /// Change the `type` prop.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.card.set_mode(mode, &mut self.focus, &mut self.timers);
        self.sync_focus();
    }

    /// Change presentation props (classes, styles, prefix, axis).
    pub fn update_presentation(&mut self, update: impl FnOnce(&mut Presentation)) {
        self.card
            .update_presentation(update, &mut self.focus, &mut self.timers);
        self.sync_focus();
    }

    /// Replace the `on_flip` prop.
    pub fn set_on_flip(&mut self, on_flip: Option<FlipCallback>) {
        self.card
            .set_on_flip(on_flip, &mut self.focus, &mut self.timers);
        self.sync_focus();
    }

    /// Replace the `on_key_down` prop.
    pub fn set_on_key_down(&mut self, on_key_down: Option<KeyCallback>) {
        self.card
            .set_on_key_down(on_key_down, &mut self.focus, &mut self.timers);
        self.sync_focus();
    }

    // --- Input ---

    /// Move focus to `node`, as a click or tab would.
    ///
    /// Returns `false` when the scope does not know the node.
    pub fn focus_node(&mut self, node: FocusId) -> bool {
        let moved = self.focus.focus(node);
        self.sync_focus();
        moved
    }

    /// Deliver a key press to the card root.
    pub fn key(&mut self, key: KeyEvent) -> bool {
        self.dispatch(&Event::Key(key))
    }

    /// Deliver a raw event.
    ///
    /// Focus events go straight to the card and leave boundary tracking
    /// alone, so hosts without a focus tree can drive the card directly.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let consumed = self
            .card
            .handle_event(event, &mut self.focus, &mut self.timers);
        self.sync_focus();
        consumed
    }

    /// Deliver focus events for any crossing of the card root boundary
    /// since the last check.
    ///
    /// Call after moving focus through [`focus_mut`](Self::focus_mut).
    pub fn sync_focus(&mut self) {
        let root = self.card.controller().nodes().root;
        for _ in 0..self.config.max_turns_per_advance {
            let inside = self.focus.focus_within(root);
            if inside == self.focus_inside {
                return;
            }
            self.focus_inside = inside;
            tracing::debug!(
                target: "flipcard.host",
                message = "host.focus_boundary",
                inside
            );
            self.card
                .handle_event(&Event::Focus(inside), &mut self.focus, &mut self.timers);
        }
        if self.focus.focus_within(root) == self.focus_inside {
            return;
        }
        tracing::warn!(
            target: "flipcard.host",
            max_turns = self.config.max_turns_per_advance,
            "focus kept crossing the card boundary; giving up for this turn"
        );
    }

    // --- Time ---

    /// Run the tasks that are due right now (zero-delay deferrals).
    pub fn turn(&mut self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Move the clock forward by `delta`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let target = self.timers.now().saturating_add(delta);
        self.advance_to(target)
    }

    /// Move the clock to `instant`, running every task due by then.
    ///
    /// Returns the number of tasks run. Instants in the past run what is
    /// due now.
    pub fn advance_to(&mut self, instant: Duration) -> usize {
        let mut ran = 0;
        while ran < self.config.max_turns_per_advance {
            let Some((_, task)) = self.timers.pop_until(instant) else {
                self.timers.advance_to(instant);
                return ran;
            };
            ran += 1;
            self.card.run_task(task, &mut self.focus, &mut self.timers);
            self.sync_focus();
        }
        if self
            .timers
            .next_deadline()
            .is_some_and(|deadline| deadline <= instant)
        {
            tracing::warn!(
                target: "flipcard.host",
                max_turns = self.config.max_turns_per_advance,
                pending = self.timers.len(),
                "turn bound reached; remaining tasks deferred"
            );
        } else {
            self.timers.advance_to(instant);
        }
        ran
    }

    /// Run until no deferred work remains, jumping the clock from deadline
    /// to deadline.
    ///
    /// Returns the number of tasks run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        for _ in 0..self.config.max_turns_per_advance {
            let Some(deadline) = self.timers.next_deadline() else {
                return ran;
            };
            ran += self.advance_to(deadline);
        }
        ran
    }

    // --- Accessors ---

    /// The hosted card.
    #[must_use]
    pub const fn card(&self) -> &FlipCard<C> {
        &self.card
    }

    /// The focus scope.
    #[must_use]
    pub const fn focus(&self) -> &F {
        &self.focus
    }

    /// Mutable focus scope. Follow changes with [`sync_focus`](Self::sync_focus).
    pub fn focus_mut(&mut self) -> &mut F {
        &mut self.focus
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of queued tasks, stale ones included.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Whether the card has no outstanding deferred work.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.card.controller().is_settled()
    }

    /// Whether the host believes focus is inside the card root.
    #[must_use]
    pub const fn focus_inside(&self) -> bool {
        self.focus_inside
    }

    /// Host configuration.
    #[must_use]
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Tear down, returning the card and the focus scope.
    pub fn into_parts(self) -> (FlipCard<C>, F) {
        (self.card, self.focus)
    }
}

impl<C> FlipHost<C, FocusTree> {
    /// Clear focus entirely, as clicking empty space would.
    pub fn blur(&mut self) {
        self.focus.blur();
        self.sync_focus();
    }

    /// Detach `node` and its subtree from the focus tree.
    pub fn remove_node(&mut self, node: FocusId) -> usize {
        let removed = self.focus.remove(node);
        self.sync_focus();
        removed
    }
}
