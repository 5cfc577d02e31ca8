use std::sync::Arc;

use super::{Node, Stack, Tree, Window};

/// Resolves `path` starting at `node`.
///
/// Returns `None` when the path runs through a window or past the last child.
pub fn get_at(node: &Node, path: &[usize]) -> Option<Node> {
    let mut node = node;
    for &idx in path {
        let Node::Stack(stack) = node else {
            return None;
        };
        node = stack.children.get(idx)?;
    }
    Some(node.clone())
}

/// Parent stack of a node, as found by [`Tree::find_parent`].
#[derive(Debug, Clone)]
pub struct Parent<'a> {
    pub stack: Arc<Stack>,
    /// Path of `stack` itself.
    pub path: &'a [usize],
    /// Index of the child inside `stack`.
    pub index: usize,
}

impl Tree {
    /// Resolves `path` from the root; `[]` is the root stack.
    pub fn get_at(&self, path: &[usize]) -> Option<Node> {
        match path.split_first() {
            None => Some(Node::Stack(self.root.clone())),
            Some((&first, rest)) => get_at(self.root.children.get(first)?, rest),
        }
    }

    pub fn stack_at(&self, path: &[usize]) -> Option<Arc<Stack>> {
        match self.get_at(path)? {
            Node::Stack(stack) => Some(stack),
            Node::Window(_) => None,
        }
    }

    pub fn window_at(&self, path: &[usize]) -> Option<Arc<Window>> {
        match self.get_at(path)? {
            Node::Window(window) => Some(window),
            Node::Stack(_) => None,
        }
    }

    /// Splits off the last index of `path` and resolves the rest to a stack.
    ///
    /// The root has no parent. The returned index is not checked against the parent's
    /// children.
    pub fn find_parent<'a>(&self, path: &'a [usize]) -> Option<Parent<'a>> {
        let (&index, parent_path) = path.split_last()?;
        let stack = self.stack_at(parent_path)?;
        Some(Parent {
            stack,
            path: parent_path,
            index,
        })
    }

    /// Applies `edit` to the stack at `path` and returns the resulting version.
    ///
    /// Returns this version if `path` does not lead to a stack.
    pub(crate) fn edit_stack(&self, path: &[usize], edit: impl FnOnce(&mut Stack)) -> Tree {
        match update_stack_at(&self.root, path, edit) {
            Some(root) => self.with_root(root),
            None => {
                trace!("no stack at {path:?}, nothing to edit");
                self.clone()
            }
        }
    }
}

/// Copy-on-write edit of the stack at `path` below `stack`.
///
/// Only the stacks along `path` are copied, and each copy is shallow: the children vectors
/// are cloned, the children themselves are shared.
fn update_stack_at(
    stack: &Arc<Stack>,
    path: &[usize],
    edit: impl FnOnce(&mut Stack),
) -> Option<Arc<Stack>> {
    let mut copy = Stack::clone(stack);
    match path.split_first() {
        None => edit(&mut copy),
        Some((&first, rest)) => {
            let Node::Stack(child) = copy.children.get(first)? else {
                return None;
            };
            let child = update_stack_at(child, rest, edit)?;
            copy.children[first] = Node::Stack(child);
        }
    }
    Some(Arc::new(copy))
}
