#![forbid(unsafe_code)]

//! Focus scope capability.
//!
//! The flip card never owns the global focus. It reads it, asks whether a
//! node lies inside its root, and occasionally moves focus onto one of its
//! panes or back to a remembered node. [`FocusScope`] is that capability;
//! hosts back it with their real node tree, tests with [`FocusTree`].
//!
//! # Invariants
//!
//! - At most one node holds focus at a time.
//! - `contains(root, root)` is `true` for any attached `root`.
//! - A detached node is never reported as focused or contained.

mod tree;

pub use tree::FocusTree;

/// Identifier of a focusable node.
pub type FocusId = u64;

/// Queries and commands over the process-wide focus.
pub trait FocusScope {
    /// The node currently holding focus, if any.
    fn focused(&self) -> Option<FocusId>;

    /// Whether `node` is `root` or one of its descendants.
    fn contains(&self, root: FocusId, node: FocusId) -> bool;

    /// Whether `node` is still part of the tree.
    fn is_attached(&self, node: FocusId) -> bool;

    /// Move focus onto `node`. Returns `false` when the node is unknown.
    fn focus(&mut self, node: FocusId) -> bool;

    /// Whether the current focus lies inside `root`.
    fn focus_within(&self, root: FocusId) -> bool {
        self.focused().is_some_and(|node| self.contains(root, node))
    }
}

impl<T: FocusScope + ?Sized> FocusScope for &mut T {
    fn focused(&self) -> Option<FocusId> {
        (**self).focused()
    }

    fn contains(&self, root: FocusId, node: FocusId) -> bool {
        (**self).contains(root, node)
    }

    fn is_attached(&self, node: FocusId) -> bool {
        (**self).is_attached(node)
    }

    fn focus(&mut self, node: FocusId) -> bool {
        (**self).focus(node)
    }
}
