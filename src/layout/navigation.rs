//! Directional navigation between windows.
//!
//! Moving in a direction only makes sense along stacks of the matching orientation: `Left`
//! and `Right` step through horizontal stacks, `Up` and `Down` through vertical ones. From a
//! window we climb until an ancestor of the right orientation has a neighbour on the
//! requested side, then descend into that neighbour until we reach a window.
//!
//! Descending picks the child on the near edge for stacks of the movement orientation (the
//! first child when moving right or down, the last one when moving left or up). For stacks
//! across the movement axis it picks the child at the index we left the nearest such stack
//! at on the way up, clamped to the stack's length. This keeps e.g. the top row when moving
//! right between two columns of rows.

use std::sync::Arc;

use super::{Direction, Node, Orientation, Parent, StackPath, Tree, Window};

impl Tree {
    /// The window next to the node at `path` in `direction`.
    ///
    /// `None` if there is no such window, or if `path` does not resolve.
    pub fn find_sibling(&self, path: &[usize], direction: Direction) -> Option<Arc<Window>> {
        self.sibling(path, direction).map(|(_, window)| window)
    }

    /// Path of the window [`Tree::find_sibling`] would return.
    pub fn find_sibling_path(&self, path: &[usize], direction: Direction) -> Option<StackPath> {
        self.sibling(path, direction).map(|(path, _)| path)
    }

    /// Nearest ancestor of the node at `path` with the given orientation.
    pub fn find_parent_with_orientation<'a>(
        &self,
        path: &'a [usize],
        orientation: Orientation,
    ) -> Option<Parent<'a>> {
        let mut parent = self.find_parent(path)?;
        while parent.stack.orientation != orientation {
            parent = self.find_parent(parent.path)?;
        }
        Some(parent)
    }

    fn sibling(&self, path: &[usize], direction: Direction) -> Option<(StackPath, Arc<Window>)> {
        self.get_at(path)?;

        let mut hint = 0;
        let mut current = path;
        loop {
            let Parent {
                stack,
                path: parent_path,
                index,
            } = self.find_parent_with_orientation(current, direction.orientation())?;

            // Index inside the topmost cross-axis stack we passed on the way up.
            if let Some(cross) = current.get(parent_path.len() + 1) {
                hint = *cross;
            }

            let neighbour = if direction.is_backward() {
                index.checked_sub(1)
            } else {
                index.checked_add(1)
            };

            match neighbour.and_then(|idx| Some((idx, stack.children.get(idx)?))) {
                Some((idx, node)) => {
                    let (rest, window) = find_child_window(node, direction, hint)?;
                    let mut found = parent_path.to_vec();
                    found.push(idx);
                    found.extend(rest);
                    return Some((found, window));
                }
                // Nothing on this side here, try further up.
                None => current = parent_path,
            }
        }
    }
}

/// Descends from `node` to the window an incoming move in `direction` lands on.
///
/// Returns the window and its path relative to `node`. `hint` is the child index to use in
/// stacks that lie across the movement axis. `None` only for an empty stack.
pub fn find_child_window(
    node: &Node,
    direction: Direction,
    hint: usize,
) -> Option<(StackPath, Arc<Window>)> {
    let mut path = StackPath::new();
    let mut node = node;
    loop {
        let stack = match node {
            Node::Window(window) => return Some((path, window.clone())),
            Node::Stack(stack) => stack,
        };

        let last = stack.children.len().checked_sub(1)?;
        let idx = if stack.orientation != direction.orientation() {
            hint.min(last)
        } else if direction.is_backward() {
            last
        } else {
            0
        };

        path.push(idx);
        node = &stack.children[idx];
    }
}
