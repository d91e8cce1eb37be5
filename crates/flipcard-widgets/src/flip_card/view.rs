#![forbid(unsafe_code)]

//! Render description handed to the host.
//!
//! The host turns a [`FlipCardView`] into real nodes. Node shape:
//!
//! ```text
//! root (tabIndex 0)
//! └── flipper
//!     ├── front (tabIndex -1, aria-hidden = flipped)
//!     └── back  (tabIndex -1, aria-hidden = !flipped)
//! ```
//!
//! Suppressed panes carry `display: none` in their inline style and are
//! flagged with [`NodeView::suppressed`]. Callers may put `display: none`
//! in their own styles; only the flag reflects the card's suppression.

use flipcard_style::{ClassSet, InlineStyle};

use super::Presentation;
use super::controller::FlipController;
use crate::focus::FocusId;
use crate::visibility::Pane;

/// Description of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    /// Focus id, for nodes the card addresses directly.
    pub id: Option<FocusId>,
    /// Composed class names.
    pub class: ClassSet,
    /// Inline style.
    pub style: InlineStyle,
    /// Tab index, when the node declares one.
    pub tab_index: Option<i32>,
    /// Hidden-from-assistive-tech attribute, when the node declares one.
    pub aria_hidden: Option<bool>,
    /// Taken out of layout and tab order by the card.
    pub suppressed: bool,
}

impl NodeView {
    /// Whether the card suppressed this node.
    #[inline]
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

/// A pane node plus its caller content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneView<'a, C> {
    /// Which pane this is.
    pub pane: Pane,
    /// Node attributes.
    pub node: NodeView,
    /// Caller content. `None` when too few children were supplied.
    pub content: Option<&'a C>,
}

/// Full render description of a flip card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipCardView<'a, C> {
    /// Tab-reachable root container.
    pub root: NodeView,
    /// Wrapper the styling layer rotates.
    pub flipper: NodeView,
    /// Front pane.
    pub front: PaneView<'a, C>,
    /// Back pane.
    pub back: PaneView<'a, C>,
}

impl<'a, C> FlipCardView<'a, C> {
    /// The pane view for `pane`.
    #[must_use]
    pub fn pane(&self, pane: Pane) -> &PaneView<'a, C> {
        match pane {
            Pane::Front => &self.front,
            Pane::Back => &self.back,
        }
    }
}

pub(super) fn build<'a, C>(
    presentation: &Presentation,
    controller: &FlipController,
    front: Option<&'a C>,
    back: Option<&'a C>,
) -> FlipCardView<'a, C> {
    let prefix = presentation.class_prefix.as_str();
    let is_flipped = controller.is_flipped();
    let disabled = controller.props().disabled;
    let vertical = presentation.mode.is_vertical();
    let nodes = controller.nodes();

    let root = NodeView {
        id: Some(nodes.root),
        class: ClassSet::new()
            .with_raw(presentation.class_name.as_deref())
            .with(prefix)
            .with_if(format!("{prefix}--vertical"), vertical)
            .with_if(format!("{prefix}--horizontal"), !vertical)
            .with_if(format!("{prefix}--flipped"), is_flipped)
            .with_if(format!("{prefix}--enabled"), !disabled),
        style: presentation.style.clone(),
        tab_index: Some(0),
        aria_hidden: None,
        suppressed: false,
    };

    let flipper = NodeView {
        id: None,
        class: ClassSet::new()
            .with_raw(presentation.container_class_name.as_deref())
            .with(format!("{prefix}__Flipper")),
        style: presentation.container_style.clone(),
        tab_index: None,
        aria_hidden: None,
        suppressed: false,
    };

    let pane = |pane: Pane, content: Option<&'a C>| {
        let suppressed = controller.visibility().is_suppressed(pane);
        let mut style = presentation.card_style.clone();
        if suppressed {
            style.insert("display".into(), "none".into());
        }
        let (suffix, hidden) = match pane {
            Pane::Front => ("Front", is_flipped),
            Pane::Back => ("Back", !is_flipped),
        };
        PaneView {
            pane,
            node: NodeView {
                id: Some(nodes.pane(pane)),
                class: ClassSet::new()
                    .with_raw(presentation.card_class_name.as_deref())
                    .with(format!("{prefix}__{suffix}")),
                style,
                tab_index: Some(-1),
                aria_hidden: Some(hidden),
                suppressed,
            },
            content,
        }
    };

    FlipCardView {
        root,
        flipper,
        front: pane(Pane::Front, front),
        back: pane(Pane::Back, back),
    }
}
