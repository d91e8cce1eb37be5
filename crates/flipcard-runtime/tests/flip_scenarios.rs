//! End-to-end flip card scenarios driven through [`FlipHost`].
//!
//! Each test builds a small focus tree:
//!
//! ```text
//! OUTSIDE        ROOT
//!                ├── FRONT
//!                └── BACK
//! ```
//!
//! and checks flip state, pane suppression, focus placement and
//! notifications across virtual time.

use std::cell::RefCell;
use std::rc::Rc;

use flipcard_core::{Event, KeyCode, KeyEvent, Modifiers};
use flipcard_runtime::{FlipHost, HostConfig};
use flipcard_style::{DisplayMode, InlineStyle};
use flipcard_widgets::flip_card::{FlipCard, FlipCardError, FlipCardProps, FlipNodes};
use flipcard_widgets::{FocusId, FocusScope, FocusTree, Pane};
use web_time::Duration;

const OUTSIDE: FocusId = 1;
const ROOT: FocusId = 10;
const FRONT: FocusId = 11;
const BACK: FocusId = 12;

const SETTLE: Duration = Duration::from_millis(600);

type Flips = Rc<RefCell<Vec<bool>>>;

fn focus_tree() -> FocusTree {
    FocusTree::new()
        .with_node(OUTSIDE, None)
        .with_node(ROOT, None)
        .with_node(FRONT, Some(ROOT))
        .with_node(BACK, Some(ROOT))
}

fn mount(props: FlipCardProps) -> (FlipHost<&'static str, FocusTree>, Flips) {
    mount_with_children(props, vec!["front", "back"])
}

fn mount_with_children(
    props: FlipCardProps,
    children: Vec<&'static str>,
) -> (FlipHost<&'static str, FocusTree>, Flips) {
    let flips: Flips = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&flips);
    let card = FlipCard::new(
        props.on_flip(move |flipped| sink.borrow_mut().push(flipped)),
        FlipNodes::new(ROOT, FRONT, BACK),
        children,
    );
    (FlipHost::new(card, focus_tree(), HostConfig::default()), flips)
}

fn suppressed(host: &FlipHost<&'static str, FocusTree>) -> Option<Pane> {
    host.card().controller().visibility().suppressed()
}

// ============================================================================
// Scenario A: focus flips an enabled card
// ============================================================================

#[test]
fn focus_gained_flips_enabled_card() {
    let (mut host, flips) = mount(FlipCardProps::new());

    assert!(host.dispatch(&Event::focus_gained()));
    assert!(host.card().is_flipped());
    assert_eq!(*flips.borrow(), vec![true]);
    assert_eq!(suppressed(&host), None);

    host.run_until_idle();
    assert!(host.card().is_flipped());
    assert_eq!(suppressed(&host), None, "enabled cards never suppress");
    assert_eq!(*flips.borrow(), vec![true]);
}

#[test]
fn tabbing_through_the_card_flips_and_unflips() {
    let (mut host, flips) = mount(FlipCardProps::new());
    host.focus_node(OUTSIDE);
    host.focus_node(FRONT);
    host.focus_node(BACK);
    host.focus_node(OUTSIDE);
    host.run_until_idle();
    assert!(!host.card().is_flipped());
    assert_eq!(*flips.borrow(), vec![true, false]);
}

// ============================================================================
// Scenario B: disabled card hides the down-facing pane
// ============================================================================

#[test]
fn disabled_card_suppresses_back_after_mount() {
    let (mut host, flips) = mount(FlipCardProps::new().disabled(true));
    assert_eq!(suppressed(&host), Some(Pane::Back));

    let view = host.card().view();
    assert!(view.back.node.is_suppressed());
    assert!(!view.front.node.is_suppressed());

    // Focus is ignored while disabled.
    host.focus_node(FRONT);
    host.run_until_idle();
    assert!(!host.card().is_flipped());
    assert!(host.card().controller().has_focus());
    assert_eq!(suppressed(&host), Some(Pane::Back));
    assert!(flips.borrow().is_empty());
}

// ============================================================================
// Scenario C: external flip with focus handoff
// ============================================================================

#[test]
fn external_flip_primes_then_commits_then_settles() {
    let (mut host, flips) = mount(FlipCardProps::new().disabled(true));
    host.focus_node(FRONT);

    host.set_flipped(true);
    assert_eq!(suppressed(&host), None, "both sides visible immediately");
    assert!(!host.card().is_flipped());

    host.turn();
    assert!(host.card().is_flipped());
    assert_eq!(*flips.borrow(), vec![true]);
    assert_eq!(host.focus().focused(), Some(BACK));
    assert_eq!(suppressed(&host), None, "transition still running");

    host.advance(SETTLE);
    assert_eq!(suppressed(&host), Some(Pane::Front));
    assert!(host.is_settled());

    host.set_flipped(false);
    assert_eq!(host.focus().focused(), Some(FRONT));
    host.run_until_idle();
    assert!(!host.card().is_flipped());
    assert_eq!(suppressed(&host), Some(Pane::Back));
    assert_eq!(*flips.borrow(), vec![true, false]);
}

#[test]
fn focus_returns_outside_after_transient_flip() {
    let (mut host, flips) = mount(FlipCardProps::new());
    host.focus_node(OUTSIDE);

    host.set_flipped(true);
    host.run_until_idle();
    assert!(host.card().is_flipped());
    assert_eq!(host.focus().focused(), Some(BACK));

    host.set_flipped(false);
    assert_eq!(host.focus().focused(), Some(OUTSIDE));
    assert!(!host.focus_inside());
    host.run_until_idle();
    assert!(!host.card().is_flipped());
    assert_eq!(host.card().controller().focus_memory(), None);
    assert_eq!(*flips.borrow(), vec![true, false]);
}

#[test]
fn removed_focus_target_is_not_restored() {
    let (mut host, _) = mount(FlipCardProps::new().disabled(true));
    host.focus_node(OUTSIDE);
    host.set_flipped(true);
    host.run_until_idle();
    assert_eq!(host.focus().focused(), Some(BACK));

    assert_eq!(host.remove_node(OUTSIDE), 1);
    host.set_flipped(false);
    host.run_until_idle();
    assert_eq!(host.focus().focused(), Some(BACK));
    assert_eq!(host.card().controller().focus_memory(), None);
}

// ============================================================================
// Scenario D: rapid requests collapse to the net change
// ============================================================================

#[test]
fn rapid_requests_notify_only_the_net_change() {
    let (mut host, flips) = mount(FlipCardProps::new().flipped(true).disabled(true));
    host.set_flipped(true);
    host.set_flipped(false);
    host.run_until_idle();

    assert!(!host.card().is_flipped());
    assert_eq!(*flips.borrow(), vec![false]);
    assert_eq!(suppressed(&host), Some(Pane::Back));
}

#[test]
fn request_and_revert_before_deferral_is_silent() {
    let (mut host, flips) = mount(FlipCardProps::new().disabled(true));
    host.focus_node(OUTSIDE);
    host.set_flipped(true);
    host.set_flipped(false);
    host.run_until_idle();

    assert!(!host.card().is_flipped());
    assert!(flips.borrow().is_empty());
    assert_eq!(host.focus().focused(), Some(OUTSIDE));
    assert_eq!(suppressed(&host), Some(Pane::Back));
}

#[test]
fn request_during_transition_discards_stale_settle() {
    let (mut host, _) = mount(FlipCardProps::new().disabled(true));
    host.set_flipped(true);
    host.advance(Duration::from_millis(300));
    host.set_flipped(false);
    host.advance(Duration::from_millis(400));
    // First settle (due at 600ms) was superseded.
    assert_eq!(suppressed(&host), None);
    host.run_until_idle();
    assert_eq!(suppressed(&host), Some(Pane::Back));
}

// ============================================================================
// Scenario E: wrong child count is a diagnostic
// ============================================================================

#[test]
fn single_child_is_a_diagnostic_not_a_failure() {
    let (mut host, _) = mount_with_children(FlipCardProps::new(), vec!["only"]);
    assert!(matches!(
        host.card().diagnostics(),
        [FlipCardError::ChildCount { found: 1, .. }]
    ));
    host.focus_node(FRONT);
    assert!(host.card().is_flipped());
    assert_eq!(host.card().view().back.content, None);
}

#[test]
fn three_children_render_the_first_two() {
    let (host, _) = mount_with_children(FlipCardProps::new(), vec!["a", "b", "c"]);
    assert!(matches!(
        host.card().diagnostics(),
        [FlipCardError::ChildCount { found: 3, .. }]
    ));
    let view = host.card().view();
    assert_eq!(view.front.content, Some(&"a"));
    assert_eq!(view.back.content, Some(&"b"));
}

// ============================================================================
// Idempotence and misc
// ============================================================================

#[test]
fn same_value_request_after_settle_is_a_no_op() {
    let (mut host, flips) = mount(FlipCardProps::new().flipped(true).disabled(true));
    host.focus_node(OUTSIDE);
    host.run_until_idle();

    host.set_flipped(true);
    host.run_until_idle();
    assert!(flips.borrow().is_empty());
    assert_eq!(host.focus().focused(), Some(OUTSIDE));
    assert_eq!(suppressed(&host), Some(Pane::Front));
}

#[test]
fn enabling_a_disabled_card_releases_suppression() {
    let (mut host, _) = mount(FlipCardProps::new().disabled(true));
    host.set_disabled(false);
    host.run_until_idle();
    assert_eq!(suppressed(&host), None);
    assert!(host.card().view().root.class.contains("ReactFlipCard--enabled"));

    host.focus_node(FRONT);
    assert!(host.card().is_flipped());
}

#[test]
fn mode_change_updates_classes_and_keeps_side() {
    let (mut host, flips) = mount(FlipCardProps::new().flipped(true));
    host.set_mode(DisplayMode::parse_lenient("vertical"));
    host.run_until_idle();
    let classes = host.card().view().root.class;
    assert!(classes.contains("ReactFlipCard--vertical"));
    assert!(classes.contains("ReactFlipCard--flipped"));
    assert!(flips.borrow().is_empty());
}

#[test]
fn key_presses_do_not_flip() {
    let keys = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&keys);
    let (mut host, flips) =
        mount(FlipCardProps::new().on_key_down(move |key| sink.borrow_mut().push(key.code)));
    host.key(KeyEvent::new(KeyCode::Enter));
    host.key(KeyEvent::new(KeyCode::Char('f')));
    host.run_until_idle();
    assert_eq!(*keys.borrow(), vec![KeyCode::Enter, KeyCode::Char('f')]);
    assert!(!host.card().is_flipped());
    assert!(flips.borrow().is_empty());
}

#[test]
fn key_handler_sees_held_modifiers() {
    let keys = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&keys);
    let (mut host, _) =
        mount(FlipCardProps::new().on_key_down(move |key| sink.borrow_mut().push(*key)));
    host.key(KeyEvent::new(KeyCode::BackTab).with_modifiers(Modifiers::SHIFT));
    host.key(KeyEvent::new(KeyCode::Char('s')).with_modifiers(Modifiers::CTRL | Modifiers::ALT));
    assert_eq!(
        *keys.borrow(),
        vec![
            KeyEvent::new(KeyCode::BackTab).with_modifiers(Modifiers::SHIFT),
            KeyEvent::new(KeyCode::Char('s')).with_modifiers(Modifiers::CTRL | Modifiers::ALT),
        ]
    );
}

#[test]
fn replaced_handlers_and_styles_take_effect_after_mount() {
    let (mut host, old_flips) = mount(FlipCardProps::new().disabled(true));
    host.run_until_idle();

    let flips = Rc::new(RefCell::new(Vec::new()));
    let flip_sink = Rc::clone(&flips);
    host.set_on_flip(Some(Box::new(move |flipped| flip_sink.borrow_mut().push(flipped))));
    let keys = Rc::new(RefCell::new(Vec::new()));
    let key_sink = Rc::clone(&keys);
    host.set_on_key_down(Some(Box::new(move |key: &KeyEvent| {
        key_sink.borrow_mut().push(key.code);
    })));
    host.update_presentation(|p| {
        p.card_class_name = Some("pane".into());
        p.card_style = InlineStyle::new().set("display", "none");
    });
    // Any prop update re-primes: both panes are shown until the next settle.
    assert_eq!(suppressed(&host), None);

    host.set_flipped(true);
    host.key(KeyEvent::new(KeyCode::Enter));
    host.run_until_idle();

    assert_eq!(*flips.borrow(), vec![true]);
    assert!(old_flips.borrow().is_empty());
    assert_eq!(*keys.borrow(), vec![KeyCode::Enter]);
    let view = host.card().view();
    assert!(view.back.node.class.contains("pane"));
    // Caller styling hides nothing by itself; only the settled front is suppressed.
    assert!(view.front.node.is_suppressed());
    assert!(!view.back.node.is_suppressed());
    assert_eq!(suppressed(&host), Some(Pane::Front));
}
