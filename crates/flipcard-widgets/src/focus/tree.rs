#![forbid(unsafe_code)]

//! In-memory focus tree.
//!
//! A parent map plus a single focused slot. Enough to host a flip card
//! without a display, and to script focus movement in tests.

use ahash::AHashMap;

use super::{FocusId, FocusScope};

/// Parent-linked node tree with one focused node.
#[derive(Debug, Clone, Default)]
pub struct FocusTree {
    parents: AHashMap<FocusId, Option<FocusId>>,
    focused: Option<FocusId>,
}

impl FocusTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `id` under `parent` (or as a top-level node).
    ///
    /// Re-inserting an existing id re-parents it.
    pub fn insert(&mut self, id: FocusId, parent: Option<FocusId>) {
        self.parents.insert(id, parent);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_node(mut self, id: FocusId, parent: Option<FocusId>) -> Self {
        self.insert(id, parent);
        self
    }

    /// Detach `id` and its whole subtree. Focus inside it is dropped.
    ///
    /// Returns the number of removed nodes.
    pub fn remove(&mut self, id: FocusId) -> usize {
        if !self.parents.contains_key(&id) {
            return 0;
        }
        let doomed: Vec<FocusId> = self
            .parents
            .keys()
            .copied()
            .filter(|&node| self.contains(id, node))
            .collect();
        if self.focused.is_some_and(|f| doomed.contains(&f)) {
            self.focused = None;
        }
        for node in &doomed {
            self.parents.remove(node);
        }
        doomed.len()
    }

    /// Drop focus entirely.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Number of attached nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl FocusScope for FocusTree {
    fn focused(&self) -> Option<FocusId> {
        self.focused
    }

    fn contains(&self, root: FocusId, node: FocusId) -> bool {
        if !self.parents.contains_key(&root) {
            return false;
        }
        let mut cursor = Some(node);
        // Bounded walk: a malformed parent cycle cannot hang the caller.
        for _ in 0..=self.parents.len() {
            match cursor {
                Some(current) if current == root => return true,
                Some(current) => cursor = self.parents.get(&current).copied().flatten(),
                None => return false,
            }
        }
        false
    }

    fn is_attached(&self, node: FocusId) -> bool {
        self.parents.contains_key(&node)
    }

    fn focus(&mut self, node: FocusId) -> bool {
        if !self.is_attached(node) {
            return false;
        }
        self.focused = Some(node);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// 1 ── 2 ── 3
    ///  └── 4
    /// 9
    /// ```
    fn sample() -> FocusTree {
        FocusTree::new()
            .with_node(1, None)
            .with_node(2, Some(1))
            .with_node(3, Some(2))
            .with_node(4, Some(1))
            .with_node(9, None)
    }

    #[test]
    fn containment_follows_ancestry() {
        let tree = sample();
        assert!(tree.contains(1, 1));
        assert!(tree.contains(1, 3));
        assert!(tree.contains(2, 3));
        assert!(!tree.contains(2, 4));
        assert!(!tree.contains(1, 9));
        assert!(!tree.contains(3, 1));
    }

    #[test]
    fn unknown_nodes_are_never_contained() {
        let tree = sample();
        assert!(!tree.contains(1, 42));
        assert!(!tree.contains(42, 1));
    }

    #[test]
    fn focus_rejects_unknown_nodes() {
        let mut tree = sample();
        assert!(!tree.focus(42));
        assert_eq!(tree.focused(), None);
        assert!(tree.focus(3));
        assert_eq!(tree.focused(), Some(3));
        assert!(tree.focus_within(1));
        assert!(!tree.focus_within(9));
    }

    #[test]
    fn removing_subtree_drops_focus_inside_it() {
        let mut tree = sample();
        tree.focus(3);
        assert_eq!(tree.remove(2), 2);
        assert_eq!(tree.focused(), None);
        assert!(!tree.is_attached(3));
        assert!(tree.is_attached(4));
        assert_eq!(tree.remove(2), 0);
    }

    #[test]
    fn removing_elsewhere_keeps_focus() {
        let mut tree = sample();
        tree.focus(4);
        tree.remove(9);
        assert_eq!(tree.focused(), Some(4));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn parent_cycle_terminates() {
        let tree = FocusTree::new().with_node(1, Some(2)).with_node(2, Some(1)).with_node(5, None);
        assert!(!tree.contains(5, 1));
    }
}
