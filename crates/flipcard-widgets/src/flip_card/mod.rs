#![forbid(unsafe_code)]

//! Two-sided flip card.
//!
//! A [`FlipCard`] holds exactly two content panes and swaps which one faces
//! the viewer, either because focus entered/left the card or because the
//! caller changed the `flipped` prop. The interesting part is the
//! [`FlipController`] state machine; this module wires it to the public
//! configuration surface and the render description.
//!
//! # Example
//!
//! ```
//! use flipcard_core::{Event, TimerQueue};
//! use flipcard_widgets::flip_card::{FlipCard, FlipCardProps, FlipNodes};
//! use flipcard_widgets::focus::FocusTree;
//!
//! let mut focus = FocusTree::new()
//!     .with_node(1, None)
//!     .with_node(2, Some(1))
//!     .with_node(3, Some(1));
//! let mut timers = TimerQueue::new();
//!
//! let mut card = FlipCard::new(
//!     FlipCardProps::new().on_flip(|flipped| println!("flipped: {flipped}")),
//!     FlipNodes::new(1, 2, 3),
//!     ["front", "back"],
//! );
//! card.mount();
//! card.handle_event(&Event::Focus(true), &mut focus, &mut timers);
//! assert!(card.is_flipped());
//! assert!(card.view().root.class.contains("ReactFlipCard--flipped"));
//! ```

mod controller;
mod timing;
mod view;

use std::fmt;

use flipcard_core::{Event, KeyEvent, Scheduler};
use flipcard_style::{DisplayMode, InlineStyle};

use crate::focus::FocusScope;

pub use controller::{
    FlipCallback, FlipController, FlipNodes, FlipPhase, FlipProps, FlipTask,
};
pub use timing::{DEFAULT_SETTLE_DELAY, FlipTiming};
pub use view::{FlipCardView, NodeView, PaneView};

/// Class prefix used by the stock stylesheet.
pub const DEFAULT_CLASS_PREFIX: &str = "ReactFlipCard";

/// Name used in configuration diagnostics.
const COMPONENT_NAME: &str = "FlipCard";

/// Callback receiving key presses on the card root.
pub type KeyCallback = Box<dyn FnMut(&KeyEvent)>;

// ============================================================================
// Errors
// ============================================================================

/// Configuration problems detected when a card is built.
///
/// None of these stop the card from rendering; they are reported through
/// `tracing` and kept in [`FlipCard::diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipCardError {
    /// The card did not receive exactly two children.
    ChildCount {
        /// Component name for the message.
        component: &'static str,
        /// Number of children supplied.
        found: usize,
    },
    /// Timing parameters are out of range.
    InvalidTiming(String),
}

impl fmt::Display for FlipCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildCount { component, found } => write!(
                f,
                "`{component}` should contain exactly two children. \
                 The first child represents the front of the card. \
                 The second child represents the back of the card. \
                 (found {found})"
            ),
            Self::InvalidTiming(detail) => write!(f, "invalid flip timing: {detail}"),
        }
    }
}

impl std::error::Error for FlipCardError {}

/// Check the structural contract: exactly two children.
pub fn validate_children(count: usize) -> Result<(), FlipCardError> {
    if count == 2 {
        Ok(())
    } else {
        Err(FlipCardError::ChildCount {
            component: COMPONENT_NAME,
            found: count,
        })
    }
}

fn timing_diagnostics(timing: FlipTiming) -> Vec<FlipCardError> {
    timing
        .validate()
        .into_iter()
        .map(|problem| {
            tracing::warn!(target: "flipcard.validate", "invalid flip timing: {problem}");
            FlipCardError::InvalidTiming(problem)
        })
        .collect()
}

// ============================================================================
// Props
// ============================================================================

/// Presentation-only settings, passed through to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Flip axis.
    pub mode: DisplayMode,
    /// Prefix for the card's own classes.
    pub class_prefix: String,
    /// Extra classes on the root.
    pub class_name: Option<String>,
    /// Inline style on the root.
    pub style: InlineStyle,
    /// Extra classes on the flipper wrapper.
    pub container_class_name: Option<String>,
    /// Inline style on the flipper wrapper.
    pub container_style: InlineStyle,
    /// Extra classes on both panes.
    pub card_class_name: Option<String>,
    /// Inline style on both panes.
    pub card_style: InlineStyle,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Horizontal,
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
            class_name: None,
            style: InlineStyle::new(),
            container_class_name: None,
            container_style: InlineStyle::new(),
            card_class_name: None,
            card_style: InlineStyle::new(),
        }
    }
}

/// Public configuration surface of a flip card.
///
/// All settings are optional: horizontal, not flipped, enabled, no extra
/// classes or styles, no callbacks, default timing.
#[derive(Default)]
pub struct FlipCardProps {
    presentation: Presentation,
    flipped: bool,
    disabled: bool,
    timing: FlipTiming,
    on_flip: Option<FlipCallback>,
    on_key_down: Option<KeyCallback>,
}

impl fmt::Debug for FlipCardProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlipCardProps")
            .field("presentation", &self.presentation)
            .field("flipped", &self.flipped)
            .field("disabled", &self.disabled)
            .field("timing", &self.timing)
            .field("on_flip", &self.on_flip.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .finish()
    }
}

impl FlipCardProps {
    /// Default props.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip axis.
    #[must_use]
    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.presentation.mode = mode;
        self
    }

    /// Initial desired side (`true` = back).
    #[must_use]
    pub fn flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    /// Ignore focus/blur and hide the down-facing pane.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Replace the card's own class prefix.
    #[must_use]
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.presentation.class_prefix = prefix.into();
        self
    }

    /// Extra classes on the root.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.presentation.class_name = Some(class.into());
        self
    }

    /// Inline style on the root.
    #[must_use]
    pub fn style(mut self, style: InlineStyle) -> Self {
        self.presentation.style = style;
        self
    }

    /// Extra classes on the flipper wrapper.
    #[must_use]
    pub fn container_class_name(mut self, class: impl Into<String>) -> Self {
        self.presentation.container_class_name = Some(class.into());
        self
    }

    /// Inline style on the flipper wrapper.
    #[must_use]
    pub fn container_style(mut self, style: InlineStyle) -> Self {
        self.presentation.container_style = style;
        self
    }

    /// Extra classes on both panes.
    #[must_use]
    pub fn card_class_name(mut self, class: impl Into<String>) -> Self {
        self.presentation.card_class_name = Some(class.into());
        self
    }

    /// Inline style on both panes.
    #[must_use]
    pub fn card_style(mut self, style: InlineStyle) -> Self {
        self.presentation.card_style = style;
        self
    }

    /// Timing handshake with the animation.
    #[must_use]
    pub fn timing(mut self, timing: FlipTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Called with the new side after each flip.
    #[must_use]
    pub fn on_flip(mut self, on_flip: impl FnMut(bool) + 'static) -> Self {
        self.on_flip = Some(Box::new(on_flip));
        self
    }

    /// Called with every key press on the card root.
    #[must_use]
    pub fn on_key_down(mut self, on_key_down: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_key_down = Some(Box::new(on_key_down));
        self
    }
}

// ============================================================================
// Widget
// ============================================================================

/// A flip card holding front and back content of type `C`.
pub struct FlipCard<C> {
    presentation: Presentation,
    front: Option<C>,
    back: Option<C>,
    controller: FlipController,
    on_key_down: Option<KeyCallback>,
    diagnostics: Vec<FlipCardError>,
}

impl<C: fmt::Debug> fmt::Debug for FlipCard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlipCard")
            .field("presentation", &self.presentation)
            .field("front", &self.front)
            .field("back", &self.back)
            .field("controller", &self.controller)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl<C> FlipCard<C> {
    /// Build a card. The first child is the front, the second the back.
    ///
    /// A child count other than two is reported, not fatal: extra children
    /// are dropped and a missing pane renders empty.
    pub fn new(props: FlipCardProps, nodes: FlipNodes, children: impl IntoIterator<Item = C>) -> Self {
        let FlipCardProps {
            presentation,
            flipped,
            disabled,
            timing,
            on_flip,
            on_key_down,
        } = props;

        let mut children = children.into_iter();
        let front = children.next();
        let back = children.next();
        let found = usize::from(front.is_some()) + usize::from(back.is_some()) + children.count();

        let mut diagnostics = Vec::new();
        if let Err(err) = validate_children(found) {
            tracing::warn!(target: "flipcard.validate", found, "{err}");
            diagnostics.push(err);
        }
        diagnostics.extend(timing_diagnostics(timing));

        let mut controller = FlipController::new(FlipProps::new(flipped, disabled), nodes, timing);
        controller.set_on_flip(on_flip);

        Self {
            presentation,
            front,
            back,
            controller,
            on_key_down,
            diagnostics,
        }
    }

    /// Apply initial suppression. Call once the nodes exist.
    pub fn mount(&mut self) {
        self.controller.mount();
    }

    /// The caller changed the `flipped` prop.
    pub fn set_flipped<F, S>(&mut self, flipped: bool, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.controller.on_desired_flip_changed(flipped, focus, sched);
    }

    /// The caller changed the `disabled` prop.
    pub fn set_disabled<F, S>(&mut self, disabled: bool, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.controller.set_disabled(disabled, focus, sched);
    }

    /// The caller changed the `type` prop.
    ///
    /// Like any prop update this re-primes the card: both panes are shown
    /// and the desired side is re-applied on the next turn.
    pub fn set_mode<F, S>(&mut self, mode: DisplayMode, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.update_presentation(|presentation| presentation.mode = mode, focus, sched);
    }

    /// The caller changed any presentation prop (classes, styles, prefix,
    /// axis). Re-primes the card.
    pub fn update_presentation<F, S>(
        &mut self,
        update: impl FnOnce(&mut Presentation),
        focus: &mut F,
        sched: &mut S,
    ) where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        update(&mut self.presentation);
        self.reprime(focus, sched);
    }

    /// The caller replaced the `on_flip` prop. Re-primes the card.
    pub fn set_on_flip<F, S>(&mut self, on_flip: Option<FlipCallback>, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.controller.set_on_flip(on_flip);
        self.reprime(focus, sched);
    }

    /// The caller replaced the `on_key_down` prop. Re-primes the card.
    pub fn set_on_key_down<F, S>(
        &mut self,
        on_key_down: Option<KeyCallback>,
        focus: &mut F,
        sched: &mut S,
    ) where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.on_key_down = on_key_down;
        self.reprime(focus, sched);
    }

    /// Replace the timing handshake.
    ///
    /// Takes effect for work scheduled from now on. Timing diagnostics are
    /// recomputed for the new value.
    pub fn set_timing(&mut self, timing: FlipTiming) {
        self.diagnostics
            .retain(|err| !matches!(err, FlipCardError::InvalidTiming(_)));
        self.diagnostics.extend(timing_diagnostics(timing));
        self.controller.set_timing(timing);
    }

    fn reprime<F, S>(&mut self, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        let props = self.controller.props();
        self.controller.set_props(props, focus, sched);
    }

    /// Route an input event to the card.
    ///
    /// Returns `true` when the event was consumed.
    pub fn handle_event<F, S>(&mut self, event: &Event, focus: &mut F, sched: &mut S) -> bool
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        match event {
            Event::Focus(true) => {
                self.controller.on_focus_gained(focus, sched);
                true
            }
            Event::Focus(false) => {
                self.controller.on_focus_lost(focus, sched);
                true
            }
            Event::Key(key) => match self.on_key_down.as_mut() {
                Some(on_key_down) => {
                    on_key_down(key);
                    true
                }
                None => false,
            },
        }
    }

    /// Run a deferred task previously handed to the scheduler.
    pub fn run_task<F, S>(&mut self, task: FlipTask, focus: &mut F, sched: &mut S)
    where
        F: FocusScope + ?Sized,
        S: Scheduler<FlipTask> + ?Sized,
    {
        self.controller.run_task(task, focus, sched);
    }

    /// Render description for the current state.
    #[must_use]
    pub fn view(&self) -> FlipCardView<'_, C> {
        view::build(
            &self.presentation,
            &self.controller,
            self.front.as_ref(),
            self.back.as_ref(),
        )
    }

    /// Side currently committed (`true` = back).
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.controller.is_flipped()
    }

    /// Whether focus/blur are ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.controller.props().disabled
    }

    /// Flip axis.
    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.presentation.mode
    }

    /// Presentation settings.
    #[must_use]
    pub const fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// The state machine.
    #[must_use]
    pub const fn controller(&self) -> &FlipController {
        &self.controller
    }

    /// Configuration problems found at construction.
    #[must_use]
    pub fn diagnostics(&self) -> &[FlipCardError] {
        &self.diagnostics
    }

    /// Front content.
    #[must_use]
    pub const fn front(&self) -> Option<&C> {
        self.front.as_ref()
    }

    /// Back content.
    #[must_use]
    pub const fn back(&self) -> Option<&C> {
        self.back.as_ref()
    }
}
