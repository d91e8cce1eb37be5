//! Property-based invariant tests for the flip card state machine.
//!
//! Random sequences of prop changes, focus moves and clock advances are
//! replayed against a [`FlipHost`].
//!
//! ## Invariants
//!
//! 1. Both panes are never suppressed at once
//! 2. Once settled, suppression matches `disabled` and the committed side
//! 3. Notifications alternate and always report a real change of side
//! 4. The last notified side (or the initial one) is the committed side
//! 5. Without focus moves, the settled side is the last requested side

use std::cell::RefCell;
use std::rc::Rc;

use flipcard_runtime::{FlipHost, HostConfig};
use flipcard_widgets::flip_card::{FlipCard, FlipCardProps, FlipNodes};
use flipcard_widgets::{FocusId, FocusTree, Pane};
use proptest::prelude::*;
use web_time::Duration;

const OUTSIDE: FocusId = 1;
const ROOT: FocusId = 10;
const FRONT: FocusId = 11;
const BACK: FocusId = 12;

#[derive(Debug, Clone, Copy)]
enum Op {
    SetFlipped(bool),
    SetDisabled(bool),
    Focus(FocusId),
    Blur,
    Advance(u64),
}

type Host = FlipHost<u8, FocusTree>;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_prop_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::SetFlipped),
        any::<bool>().prop_map(Op::SetDisabled),
        (0u64..900).prop_map(Op::Advance),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_prop_op(),
        1 => prop::sample::select(vec![OUTSIDE, ROOT, FRONT, BACK]).prop_map(Op::Focus),
        1 => Just(Op::Blur),
    ]
}

fn mount(flipped: bool, disabled: bool) -> (Host, Rc<RefCell<Vec<bool>>>) {
    let flips = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&flips);
    let focus = FocusTree::new()
        .with_node(OUTSIDE, None)
        .with_node(ROOT, None)
        .with_node(FRONT, Some(ROOT))
        .with_node(BACK, Some(ROOT));
    let card = FlipCard::new(
        FlipCardProps::new()
            .flipped(flipped)
            .disabled(disabled)
            .on_flip(move |v| sink.borrow_mut().push(v)),
        FlipNodes::new(ROOT, FRONT, BACK),
        [0u8, 1u8],
    );
    (FlipHost::new(card, focus, HostConfig::default()), flips)
}

fn apply(host: &mut Host, op: Op) {
    match op {
        Op::SetFlipped(v) => host.set_flipped(v),
        Op::SetDisabled(v) => host.set_disabled(v),
        Op::Focus(node) => {
            host.focus_node(node);
        }
        Op::Blur => host.blur(),
        Op::Advance(ms) => {
            host.advance(Duration::from_millis(ms));
        }
    }
}

fn check_suppression(host: &Host) -> Result<(), TestCaseError> {
    let view = host.card().view();
    prop_assert!(
        !(view.front.node.is_suppressed() && view.back.node.is_suppressed()),
        "both panes suppressed"
    );
    if host.is_settled() {
        let expected = host
            .card()
            .is_disabled()
            .then(|| Pane::active(host.card().is_flipped()).opposite());
        prop_assert_eq!(host.card().controller().visibility().suppressed(), expected);
    }
    Ok(())
}

fn check_notifications(initial: bool, flips: &[bool], host: &Host) -> Result<(), TestCaseError> {
    let mut last = initial;
    for &v in flips {
        prop_assert_ne!(v, last, "notification without a change: {:?}", flips);
        last = v;
    }
    prop_assert_eq!(last, host.card().is_flipped());
    prop_assert_eq!(host.card().controller().flip_count(), flips.len() as u64);
    Ok(())
}

// ── 1-4. Suppression and notification invariants ─────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_step(
        flipped in any::<bool>(),
        disabled in any::<bool>(),
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let (mut host, flips) = mount(flipped, disabled);
        check_suppression(&host)?;
        for op in ops {
            apply(&mut host, op);
            check_suppression(&host)?;
            check_notifications(flipped, &flips.borrow(), &host)?;
        }
        host.run_until_idle();
        prop_assert!(host.is_settled());
        check_suppression(&host)?;
        check_notifications(flipped, &flips.borrow(), &host)?;
    }
}

// ── 5. Last request wins ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn settled_side_is_last_requested_side(
        flipped in any::<bool>(),
        disabled in any::<bool>(),
        ops in prop::collection::vec(arb_prop_op(), 0..40),
    ) {
        let (mut host, _) = mount(flipped, disabled);
        let mut desired = flipped;
        for op in ops {
            if let Op::SetFlipped(v) = op {
                desired = v;
            }
            apply(&mut host, op);
        }
        host.run_until_idle();
        prop_assert_eq!(host.card().is_flipped(), desired);
    }
}
