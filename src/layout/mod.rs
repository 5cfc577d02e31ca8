//! Persistent layout tree.
//!
//! A [`Tree`] is a root [`Stack`] of nested stacks and [`Window`] leaves. Stacks lay out their
//! children along one [`Orientation`]; windows refer to externally rendered content through
//! an opaque key.
//!
//! Trees are immutable. Every edit returns a new [`Tree`] that shares all untouched subtrees
//! with the old one through [`Arc`]; only the stacks on the path from the root to the edit
//! point are reallocated. Edits that cannot find their target return the input unchanged
//! (see [`Tree::same_version`]) instead of failing, so callers can apply them with paths
//! computed against an older version of the tree.
//!
//! Nodes are addressed by [`StackPath`]s: child indices from the root, `[]` being the root
//! itself. Paths are positions, not identities. After a structural edit, re-resolve a path
//! with [`Tree::find_window_path`] rather than reusing it.
//!
//! Nesting is bounded by [`MAX_DEPTH`] so every tree fits the persisted JSON form.

use std::sync::Arc;

use layout_tree_config::Config;
pub use layout_tree_ipc::{Direction, Orientation};

use crate::entity::{Entity, EntityId};

mod navigation;
mod ops;
mod path;
mod persist;
mod search;


pub use navigation::find_child_window;
pub use path::{get_at, Parent};
pub use persist::{deserialize, serialize, PersistError};
pub use search::Windows;

/// Child indices leading from the root to a node.
pub type StackPath = Vec<usize>;

/// Longest path any node of a tree may have.
///
/// Edits that would nest deeper are no-ops, and [`serialize`] and [`deserialize`] reject
/// deeper trees.
pub const MAX_DEPTH: usize = 32;

/// Leaf of the layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    id: EntityId,
    key: String,
}

/// Container laying out its children along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    id: EntityId,
    orientation: Orientation,
    children: Vec<Node>,
}

/// Either kind of tree node.
///
/// Cloning a node is cheap; it only bumps a reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Window(Arc<Window>),
    Stack(Arc<Stack>),
}

/// Layout tree rooted at a [`Stack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    id: EntityId,
    root: Arc<Stack>,
}

impl Window {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(Self::TAG),
            key: key.into(),
        }
    }

    pub(crate) fn from_parts(id: EntityId, key: String) -> Self {
        Self { id, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// New window showing the same content, with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self::new(self.key.clone())
    }

    /// Same window slot showing different content.
    pub(crate) fn with_key(&self, key: String) -> Self {
        Self {
            id: self.id.clone(),
            key,
        }
    }
}

impl Entity for Window {
    const TAG: &'static str = "window";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Stack {
    pub fn new(orientation: Orientation, children: Vec<Node>) -> Self {
        Self {
            id: EntityId::generate(Self::TAG),
            orientation,
            children,
        }
    }

    pub(crate) fn from_parts(id: EntityId, orientation: Orientation, children: Vec<Node>) -> Self {
        Self {
            id,
            orientation,
            children,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Entity for Stack {
    const TAG: &'static str = "stack";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Node {
    pub fn id(&self) -> &EntityId {
        match self {
            Node::Window(window) => window.id(),
            Node::Stack(stack) => stack.id(),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Node::Window(_) => Window::TAG,
            Node::Stack(_) => Stack::TAG,
        }
    }

    pub fn as_window(&self) -> Option<&Arc<Window>> {
        match self {
            Node::Window(window) => Some(window),
            Node::Stack(_) => None,
        }
    }

    pub fn is_window(&self) -> bool {
        matches!(self, Node::Window(_))
    }

    /// Whether both nodes are the same allocation, not merely equal.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Window(a), Node::Window(b)) => Arc::ptr_eq(a, b),
            (Node::Stack(a), Node::Stack(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Window> for Node {
    fn from(window: Window) -> Self {
        Node::Window(Arc::new(window))
    }
}

impl From<Stack> for Node {
    fn from(stack: Stack) -> Self {
        Node::Stack(Arc::new(stack))
    }
}

impl From<Arc<Window>> for Node {
    fn from(window: Arc<Window>) -> Self {
        Node::Window(window)
    }
}

impl From<Arc<Stack>> for Node {
    fn from(stack: Arc<Stack>) -> Self {
        Node::Stack(stack)
    }
}

impl Tree {
    pub fn new(root: Stack) -> Self {
        Self {
            id: EntityId::generate(Self::TAG),
            root: Arc::new(root),
        }
    }

    /// Fresh tree shaped by the `layout` section of the config.
    pub fn from_config(config: &Config) -> Self {
        let layout = &config.layout;
        Self::new(Stack::new(
            layout.default_orientation,
            vec![Window::new(layout.default_window.clone()).into()],
        ))
    }

    pub(crate) fn from_parts(id: EntityId, root: Stack) -> Self {
        Self {
            id,
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Arc<Stack> {
        &self.root
    }

    /// Whether `other` is this exact version of the tree, as opposed to an equal copy.
    ///
    /// Edits that turn out to be no-ops return the same version.
    pub fn same_version(&self, other: &Tree) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.root, &other.root)
    }

    /// Next version of this tree with a new root.
    pub(crate) fn with_root(&self, root: Arc<Stack>) -> Self {
        Self {
            id: self.id.clone(),
            root,
        }
    }
}

impl Default for Tree {
    /// Vertical root holding one scratch window.
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Entity for Tree {
    const TAG: &'static str = "tree";

    fn id(&self) -> &EntityId {
        &self.id
    }
}
