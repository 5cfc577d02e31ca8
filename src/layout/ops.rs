//! Edits producing new tree versions.
//!
//! None of these fail: when the target is missing or has the wrong type, the tree comes back
//! unchanged.

use super::{Node, Orientation, Stack, Tree, Window, MAX_DEPTH};
use crate::entity::Entity;

impl Tree {
    /// Splits the window at `path` into two windows showing the same content.
    ///
    /// When `orientation` matches the parent stack, the copy is inserted right after the
    /// window. Otherwise the pair is wrapped in a new stack of `orientation`, except when the
    /// window is the only child: then the parent is simply turned around. Wrapping a window
    /// already at [`MAX_DEPTH`] is a no-op.
    pub fn split(&self, path: &[usize], orientation: Orientation) -> Tree {
        let Some(window) = self.window_at(path) else {
            trace!("split: no window at {path:?}");
            return self.clone();
        };
        let Some(parent) = self.find_parent(path) else {
            return self.clone();
        };

        let wraps = parent.stack.orientation != orientation && parent.stack.len() > 1;
        if wraps && path.len() >= MAX_DEPTH {
            trace!("split: {path:?} is already at the maximum depth");
            return self.clone();
        }

        let idx = parent.index;
        let copy = Node::from(window.duplicate());
        let pair = vec![Node::Window(window), copy];

        self.edit_stack(parent.path, |stack| {
            if stack.orientation == orientation {
                stack.children.splice(idx..=idx, pair);
            } else if stack.children.len() == 1 {
                stack.orientation = orientation;
                stack.children = pair;
            } else {
                stack.children[idx] = Stack::new(orientation, pair).into();
            }
        })
    }

    /// Points the window at `path` to different content.
    pub fn update_window(&self, path: &[usize], key: impl Into<String>) -> Tree {
        let Some(window) = self.window_at(path) else {
            trace!("update_window: no window at {path:?}");
            return self.clone();
        };
        self.replace_window(path, window.with_key(key.into()))
    }

    /// Removes the node at `path` together with any stacks left empty by the removal.
    ///
    /// The root is never removed, but it can end up empty. Stacks left with a single child
    /// are kept as they are.
    pub fn remove(&self, path: &[usize]) -> Tree {
        match self.detach(path) {
            Some((tree, _)) => tree,
            None => {
                trace!("remove: nothing to remove at {path:?}");
                self.clone()
            }
        }
    }

    /// Moves the node at `path` right in front of the node at `before`.
    pub fn move_before(&self, path: &[usize], before: &[usize]) -> Tree {
        self.move_next_to(path, before, 0)
    }

    /// Moves the node at `path` right behind the node at `after`.
    pub fn move_after(&self, path: &[usize], after: &[usize]) -> Tree {
        self.move_next_to(path, after, 1)
    }

    /// Exchanges the content of two windows. The window slots themselves stay in place.
    pub fn swap(&self, source: &[usize], target: &[usize]) -> Tree {
        let (Some(a), Some(b)) = (self.window_at(source), self.window_at(target)) else {
            trace!("swap: {source:?} and {target:?} are not both windows");
            return self.clone();
        };
        if a.id() == b.id() {
            return self.clone();
        }

        self.replace_window(source, a.with_key(b.key.clone()))
            .replace_window(target, b.with_key(a.key.clone()))
    }

    fn replace_window(&self, path: &[usize], window: Window) -> Tree {
        let Some(parent) = self.find_parent(path) else {
            return self.clone();
        };
        let idx = parent.index;
        self.edit_stack(parent.path, |stack| {
            stack.children[idx] = window.into();
        })
    }

    /// Takes the node at `path` out of the tree, pruning stacks that become empty.
    fn detach(&self, path: &[usize]) -> Option<(Tree, Node)> {
        let node = self.get_at(path)?;
        let mut parent = self.find_parent(path)?;

        // Climb to the topmost ancestor that would be left empty, stopping below the root.
        while parent.stack.children.len() == 1 {
            match self.find_parent(parent.path) {
                Some(grandparent) => parent = grandparent,
                None => break,
            }
        }

        let idx = parent.index;
        let tree = self.edit_stack(parent.path, |stack| {
            stack.children.remove(idx);
        });
        Some((tree, node))
    }

    fn move_next_to(&self, path: &[usize], reference: &[usize], offset: usize) -> Tree {
        let Some(anchor) = self.get_at(reference) else {
            trace!("move: no node at {reference:?}");
            return self.clone();
        };
        if reference.is_empty() || reference.starts_with(path) {
            trace!("move: cannot move {path:?} next to {reference:?}");
            return self.clone();
        }
        let Some((detached, node)) = self.detach(path) else {
            trace!("move: no node at {path:?}");
            return self.clone();
        };

        // The reference may have shifted, look it up again by identity.
        let Some(anchor_path) = detached.find_node_path(anchor.id()) else {
            trace!("move: {reference:?} was pruned together with {path:?}");
            return self.clone();
        };
        if anchor_path.len() + node.depth() > MAX_DEPTH {
            trace!("move: {path:?} would end up deeper than {MAX_DEPTH}");
            return self.clone();
        }
        let Some(parent) = detached.find_parent(&anchor_path) else {
            return self.clone();
        };

        let idx = parent.index;
        detached.edit_stack(parent.path, |stack| {
            stack.children.insert(idx + offset, node);
        })
    }
}
