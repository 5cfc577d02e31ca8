use std::fmt::Write as _;
use std::slice;
use std::sync::Arc;

use super::{Node, Stack, StackPath, Tree, Window};
use crate::entity::{Entity, EntityId};

/// Pre-order iterator over the windows of a tree.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Windows<'a> {
    type Item = &'a Arc<Window>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                Some(Node::Window(window)) => return Some(window),
                Some(Node::Stack(stack)) => self.stack.push(stack.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl Node {
    /// Length of the longest path from this node to one of its descendants.
    pub fn depth(&self) -> usize {
        match self {
            Node::Window(_) => 0,
            Node::Stack(stack) => stack.depth(),
        }
    }
}

impl Stack {
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Tree {
    /// Length of the longest path in the tree; `0` for an empty root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// All windows, in layout order.
    pub fn windows(&self) -> Windows<'_> {
        Windows {
            stack: vec![self.root.children.iter()],
        }
    }

    pub fn window_count(&self) -> usize {
        self.windows().count()
    }

    /// First window in layout order matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&Window) -> bool) -> Option<Arc<Window>> {
        self.windows().find(|window| predicate(window)).cloned()
    }

    /// Path of `window` in this tree, compared by id.
    pub fn find_window_path(&self, window: &Window) -> Option<StackPath> {
        self.find_node_path(window.id())
    }

    /// Path of the node with the given id; the root is at `[]`.
    pub fn find_node_path(&self, id: &EntityId) -> Option<StackPath> {
        if self.root.id() == id {
            return Some(StackPath::new());
        }

        let mut path = StackPath::new();
        path_to(&self.root, id, &mut path).then_some(path)
    }

    /// Path of the first window at or below `path`.
    pub fn first_window_path(&self, path: &[usize]) -> Option<StackPath> {
        let mut found = path.to_vec();
        let mut node = self.get_at(path)?;
        while let Node::Stack(stack) = node {
            node = stack.children.first()?.clone();
            found.push(0);
        }
        Some(found)
    }

    /// Indented outline of the tree, one node per line.
    ///
    /// ```text
    /// Stack vertical
    ///   Window scratch
    ///   Stack horizontal
    ///     Window editor
    ///     Window terminal
    /// ```
    pub fn debug_tree(&self) -> String {
        self.debug_tree_marked(None)
    }

    /// Same as [`Tree::debug_tree`], with the window at `marked` flagged with `*`.
    pub(crate) fn debug_tree_marked(&self, marked: Option<&[usize]>) -> String {
        let mut out = String::new();
        let mut path = StackPath::new();
        debug_tree_stack(&self.root, &mut path, marked, &mut out);
        out
    }
}

fn path_to(stack: &Stack, id: &EntityId, path: &mut StackPath) -> bool {
    for (idx, child) in stack.children.iter().enumerate() {
        path.push(idx);
        if child.id() == id {
            return true;
        }
        if let Node::Stack(child) = child {
            if path_to(child, id, path) {
                return true;
            }
        }
        path.pop();
    }
    false
}

fn debug_tree_stack(
    stack: &Stack,
    path: &mut StackPath,
    marked: Option<&[usize]>,
    out: &mut String,
) {
    let indent = "  ".repeat(path.len());
    let _ = writeln!(out, "{indent}Stack {}", stack.orientation);
    for (idx, child) in stack.children.iter().enumerate() {
        path.push(idx);
        match child {
            Node::Window(window) => {
                let mark = if marked == Some(&path[..]) { " *" } else { "" };
                let _ = writeln!(out, "{indent}  Window {}{mark}", window.key);
            }
            Node::Stack(child) => debug_tree_stack(child, path, marked, out),
        }
        path.pop();
    }
}

#[cfg(test)]
impl Tree {
    pub fn verify_invariants(&self) {
        use std::collections::HashSet;

        fn verify_stack(stack: &Stack, is_root: bool, seen: &mut HashSet<EntityId>) {
            assert_eq!(stack.id.tag(), Stack::TAG, "bad stack id {}", stack.id);
            assert!(seen.insert(stack.id.clone()), "duplicate id {}", stack.id);
            assert!(
                is_root || !stack.children.is_empty(),
                "empty non-root stack {}",
                stack.id
            );

            for child in &stack.children {
                assert_eq!(child.id().tag(), child.tag(), "bad id {}", child.id());
                match child {
                    Node::Window(window) => {
                        assert!(seen.insert(window.id.clone()), "duplicate id {}", window.id);
                    }
                    Node::Stack(child) => verify_stack(child, false, seen),
                }
            }
        }

        assert_eq!(self.id.tag(), Tree::TAG, "bad tree id {}", self.id);
        assert!(self.depth() <= super::MAX_DEPTH, "tree too deep: {}", self.depth());
        let mut seen = HashSet::from([self.id.clone()]);
        verify_stack(&self.root, true, &mut seen);
    }
}
