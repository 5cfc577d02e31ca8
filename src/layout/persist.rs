//! Conversion between trees and their persisted JSON form.
//!
//! The JSON shape lives in `layout_tree_ipc` as [`LayoutTreeDocument`]. Decoding goes
//! through that document and then validates it, so a tree obtained from [`deserialize`]
//! upholds the same invariants as one built through the edit operations.

use std::collections::HashSet;
use std::fmt;

use layout_tree_ipc::{LayoutTreeDocument, LayoutTreeNode, TREE_TAG};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

use super::{Node, Stack, Tree, Window, MAX_DEPTH};
use crate::entity::{Entity, EntityId};

/// Reasons a persisted tree is rejected.
#[derive(Debug)]
pub enum PersistError {
    /// Not JSON, or not shaped like a layout tree document.
    Json(serde_json::Error),
    /// A tag other than the one required at this position.
    UnexpectedTag {
        expected: &'static str,
        found: String,
    },
    /// An id that does not belong to an entity of type `tag`.
    InvalidId { tag: &'static str, id: String },
    /// The same id appears twice in one document.
    DuplicateId { id: String },
    /// A stack without children below the root.
    EmptyStack { id: String },
    /// Nodes nested deeper than [`MAX_DEPTH`].
    TooDeep { max: usize },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Json(err) => write!(f, "malformed layout tree: {err}"),
            PersistError::UnexpectedTag { expected, found } => {
                write!(f, "expected a {expected}, found a {found}")
            }
            PersistError::InvalidId { tag, id } => write!(f, "{id:?} is not a valid {tag} id"),
            PersistError::DuplicateId { id } => write!(f, "id {id:?} is used more than once"),
            PersistError::EmptyStack { id } => write!(f, "stack {id:?} has no children"),
            PersistError::TooDeep { max } => {
                write!(f, "nodes are nested deeper than {max} levels")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Json(err)
    }
}

/// Encodes `tree` as compact JSON.
pub fn serialize(tree: &Tree) -> Result<String, PersistError> {
    check_depth(tree)?;
    Ok(serde_json::to_string(&LayoutTreeDocument::from(tree))?)
}

/// Decodes and validates a tree written by [`serialize`].
pub fn deserialize(json: &str) -> Result<Tree, PersistError> {
    let document: LayoutTreeDocument = serde_json::from_str(json)?;
    Tree::try_from(document)
}

fn check_depth(tree: &Tree) -> Result<(), PersistError> {
    if tree.depth() > MAX_DEPTH {
        return Err(PersistError::TooDeep { max: MAX_DEPTH });
    }
    Ok(())
}

impl From<&Tree> for LayoutTreeDocument {
    fn from(tree: &Tree) -> Self {
        Self {
            tag: TREE_TAG.to_owned(),
            id: tree.id.to_string(),
            root: stack_to_document(&tree.root),
        }
    }
}

fn stack_to_document(stack: &Stack) -> LayoutTreeNode {
    LayoutTreeNode::Stack {
        id: stack.id.to_string(),
        orientation: stack.orientation,
        children: stack
            .children
            .iter()
            .map(|child| match child {
                Node::Window(window) => LayoutTreeNode::Window {
                    id: window.id.to_string(),
                    key: window.key.clone(),
                },
                Node::Stack(stack) => stack_to_document(stack),
            })
            .collect(),
    }
}

impl TryFrom<LayoutTreeDocument> for Tree {
    type Error = PersistError;

    fn try_from(document: LayoutTreeDocument) -> Result<Self, Self::Error> {
        if document.tag != Tree::TAG {
            return Err(PersistError::UnexpectedTag {
                expected: Tree::TAG,
                found: document.tag,
            });
        }

        let mut seen = HashSet::new();
        let id = checked_id::<Tree>(document.id, &mut seen)?;

        let LayoutTreeNode::Stack {
            id: root_id,
            orientation,
            children,
        } = document.root
        else {
            return Err(PersistError::UnexpectedTag {
                expected: Stack::TAG,
                found: document.root.tag().to_owned(),
            });
        };

        let root_id = checked_id::<Stack>(root_id, &mut seen)?;
        let children = children
            .into_iter()
            .map(|child| node_from_document(child, 1, &mut seen))
            .collect::<Result<_, _>>()?;

        Ok(Tree::from_parts(
            id,
            Stack::from_parts(root_id, orientation, children),
        ))
    }
}

/// Converts a node found at path length `depth`.
fn node_from_document(
    node: LayoutTreeNode,
    depth: usize,
    seen: &mut HashSet<EntityId>,
) -> Result<Node, PersistError> {
    if depth > MAX_DEPTH {
        return Err(PersistError::TooDeep { max: MAX_DEPTH });
    }

    match node {
        LayoutTreeNode::Window { id, key } => {
            let id = checked_id::<Window>(id, seen)?;
            Ok(Window::from_parts(id, key).into())
        }
        LayoutTreeNode::Stack {
            id,
            orientation,
            children,
        } => {
            let id = checked_id::<Stack>(id, seen)?;
            if children.is_empty() {
                return Err(PersistError::EmptyStack { id: id.to_string() });
            }
            let children = children
                .into_iter()
                .map(|child| node_from_document(child, depth + 1, seen))
                .collect::<Result<_, _>>()?;
            Ok(Stack::from_parts(id, orientation, children).into())
        }
    }
}

fn checked_id<E: Entity>(
    raw: String,
    seen: &mut HashSet<EntityId>,
) -> Result<EntityId, PersistError> {
    let Some(id) = EntityId::parse(E::TAG, &raw) else {
        return Err(PersistError::InvalidId { tag: E::TAG, id: raw });
    };
    if !seen.insert(id.clone()) {
        return Err(PersistError::DuplicateId { id: raw });
    }
    Ok(id)
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        check_depth(self).map_err(ser::Error::custom)?;
        LayoutTreeDocument::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = LayoutTreeDocument::deserialize(deserializer)?;
        Tree::try_from(document).map_err(de::Error::custom)
    }
}
