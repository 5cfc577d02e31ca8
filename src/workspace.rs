//! A layout tree together with keyboard focus.
//!
//! [`Workspace`] is the one mutable piece on top of the persistent [`Tree`]: it keeps the
//! current version and the path of the focused window, and swaps in the new version after
//! every edit. Focus always points at a window, or is empty when the tree has none.

use std::sync::Arc;

use layout_tree_config::Config;

use crate::entity::{Entity, EntityId};
use crate::layout::{Direction, Orientation, StackPath, Tree, Window};

#[derive(Debug, Clone)]
pub struct Workspace {
    id: EntityId,
    layout: Tree,
    /// Path of the focused window, empty when there is none.
    focused: StackPath,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_layout(Tree::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_layout(Tree::from_config(config))
    }

    /// Wraps an existing layout, focusing its first window.
    pub fn with_layout(layout: Tree) -> Self {
        let focused = layout.first_window_path(&[]).unwrap_or_default();
        Self {
            id: EntityId::generate(Self::TAG),
            layout,
            focused,
        }
    }

    pub fn layout(&self) -> &Tree {
        &self.layout
    }

    pub fn focused(&self) -> &[usize] {
        &self.focused
    }

    pub fn focused_window(&self) -> Option<Arc<Window>> {
        self.layout.window_at(&self.focused)
    }

    /// Focuses the window at `path`. Paths to stacks are refused.
    pub fn focus_window(&mut self, path: &[usize]) -> bool {
        if self.layout.window_at(path).is_none() {
            return false;
        }
        self.set_focus(path.to_vec());
        true
    }

    pub fn focus_in_direction(&mut self, direction: Direction) -> bool {
        let Some(path) = self.layout.find_sibling_path(&self.focused, direction) else {
            return false;
        };
        self.set_focus(path);
        true
    }

    /// Splits the focused window. Focus stays on the original half.
    pub fn split_focused(&mut self, orientation: Orientation) -> bool {
        let Some(window) = self.focused_window() else {
            return false;
        };
        self.apply(self.layout.split(&self.focused, orientation), &window)
    }

    pub fn update_focused(&mut self, key: impl Into<String>) -> bool {
        let Some(window) = self.focused_window() else {
            return false;
        };
        self.apply(self.layout.update_window(&self.focused, key), &window)
    }

    /// Removes the focused window and focuses the closest one left.
    ///
    /// Closest means: the window now at the same position, or the one before it, trying
    /// each level from the innermost stack outwards.
    pub fn remove_focused(&mut self) -> bool {
        if self.focused_window().is_none() {
            return false;
        }

        let layout = self.layout.remove(&self.focused);
        if layout.same_version(&self.layout) {
            return false;
        }
        self.layout = layout;

        let mut path = std::mem::take(&mut self.focused);
        while let Some(idx) = path.pop() {
            for candidate in [Some(idx), idx.checked_sub(1)].into_iter().flatten() {
                path.push(candidate);
                if let Some(found) = self.layout.first_window_path(&path) {
                    self.set_focus(found);
                    return true;
                }
                path.pop();
            }
        }

        debug!("no window left to focus");
        true
    }

    pub fn move_focused_before(&mut self, before: &[usize]) -> bool {
        let Some(window) = self.focused_window() else {
            return false;
        };
        self.apply(self.layout.move_before(&self.focused, before), &window)
    }

    pub fn move_focused_after(&mut self, after: &[usize]) -> bool {
        let Some(window) = self.focused_window() else {
            return false;
        };
        self.apply(self.layout.move_after(&self.focused, after), &window)
    }

    /// Swaps the focused content with its neighbour in `direction`, focus moving along.
    pub fn swap_in_direction(&mut self, direction: Direction) -> bool {
        let Some(target) = self.layout.find_sibling_path(&self.focused, direction) else {
            return false;
        };
        self.layout = self.layout.swap(&self.focused, &target);
        self.set_focus(target);
        true
    }

    /// Layout outline with the focused window marked.
    pub fn debug_tree(&self) -> String {
        self.layout.debug_tree_marked(Some(&self.focused))
    }

    /// Stores a new layout version and refocuses `window` in it.
    fn apply(&mut self, layout: Tree, window: &Window) -> bool {
        if layout.same_version(&self.layout) {
            return false;
        }
        self.layout = layout;
        let focused = self.layout.find_window_path(window).unwrap_or_default();
        self.set_focus(focused);
        true
    }

    fn set_focus(&mut self, path: StackPath) {
        if path != self.focused {
            debug!("focus {:?} -> {path:?}", self.focused);
        }
        self.focused = path;
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Workspace {
    const TAG: &'static str = "workspace";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::layout::{Node, Stack};

    fn w(key: &str) -> Node {
        Window::new(key).into()
    }

    fn columns() -> Workspace {
        let column = |keys: &[&str]| -> Node {
            Stack::new(Orientation::Vertical, keys.iter().map(|key| w(key)).collect()).into()
        };
        Workspace::with_layout(Tree::new(Stack::new(
            Orientation::Horizontal,
            vec![column(&["a", "b"]), column(&["c", "d"])],
        )))
    }

    #[test]
    fn new_workspace_focuses_scratch() {
        let ws = Workspace::new();
        assert!(ws.id().as_str().starts_with("workspace_"));
        assert_eq!(ws.focused(), [0]);
        assert_eq!(ws.focused_window().unwrap().key(), "scratch");
    }

    #[test]
    fn from_config_uses_layout_defaults() {
        let config = Config::parse(
            "config.kdl",
            r#"
            layout {
                default-window "editor"
                default-orientation "horizontal"
            }
            "#,
        )
        .unwrap();

        let ws = Workspace::from_config(&config);
        assert_snapshot!(
            ws.debug_tree(),
            @"
        Stack horizontal
          Window editor *
        "
        );
    }

    #[test]
    fn focus_window_refuses_stacks() {
        let mut ws = columns();
        assert_eq!(ws.focused(), [0, 0]);

        assert!(!ws.focus_window(&[1]));
        assert!(!ws.focus_window(&[]));
        assert!(!ws.focus_window(&[1, 2]));
        assert!(ws.focus_window(&[1, 1]));
        assert_eq!(ws.focused_window().unwrap().key(), "d");
    }

    #[test]
    fn focus_moves_between_columns_and_rows() {
        let mut ws = columns();

        assert!(ws.focus_in_direction(Direction::Down));
        assert!(ws.focus_in_direction(Direction::Right));
        assert_eq!(ws.focused_window().unwrap().key(), "d");
        assert!(!ws.focus_in_direction(Direction::Right));
        assert!(!ws.focus_in_direction(Direction::Down));
        assert!(ws.focus_in_direction(Direction::Up));

        assert_snapshot!(
            ws.debug_tree(),
            @"
        Stack horizontal
          Stack vertical
            Window a
            Window b
          Stack vertical
            Window c *
            Window d
        "
        );
    }

    #[test]
    fn split_keeps_focus_on_original() {
        let mut ws = Workspace::new();

        assert!(ws.split_focused(Orientation::Vertical));
        assert!(ws.split_focused(Orientation::Horizontal));
        assert!(ws.update_focused("editor"));

        assert_snapshot!(
            ws.debug_tree(),
            @"
        Stack vertical
          Stack horizontal
            Window editor *
            Window scratch
          Window scratch
        "
        );
    }

    #[test]
    fn remove_focuses_neighbour() {
        let mut ws = columns();
        assert!(ws.focus_window(&[0, 1]));

        assert!(ws.remove_focused());
        assert_eq!(ws.focused_window().unwrap().key(), "a");

        assert!(ws.remove_focused());
        assert_snapshot!(
            ws.debug_tree(),
            @"
        Stack horizontal
          Stack vertical
            Window c *
            Window d
        "
        );

        assert!(ws.remove_focused());
        assert_eq!(ws.focused_window().unwrap().key(), "d");
        assert!(ws.remove_focused());
        assert!(ws.focused().is_empty());
        assert!(ws.focused_window().is_none());
        assert!(!ws.remove_focused());
        assert!(!ws.split_focused(Orientation::Vertical));
    }

    #[test]
    fn move_focused_follows_window() {
        let mut ws = columns();

        assert!(ws.move_focused_after(&[1, 1]));
        assert_snapshot!(
            ws.debug_tree(),
            @"
        Stack horizontal
          Stack vertical
            Window b
          Stack vertical
            Window c
            Window d
            Window a *
        "
        );

        assert!(ws.move_focused_before(&[0]));
        assert_eq!(ws.focused(), [0]);
        assert!(!ws.move_focused_before(&[0, 0]));
    }

    #[test]
    fn swap_moves_focus_with_content() {
        let mut ws = columns();

        assert!(ws.swap_in_direction(Direction::Right));
        assert!(!ws.swap_in_direction(Direction::Right));
        assert!(ws.swap_in_direction(Direction::Down));

        assert_snapshot!(
            ws.debug_tree(),
            @"
        Stack horizontal
          Stack vertical
            Window c
            Window b
          Stack vertical
            Window d
            Window a *
        "
        );
    }
}
