//! Types shared between the layout tree, its configuration and its persisted form.
//!
//! This crate has two halves:
//!
//! - Small value enums ([`Orientation`], [`Direction`]) used everywhere a stack axis or a
//!   movement direction is named, including the config file and the command line.
//! - The persisted JSON schema ([`LayoutTreeDocument`], [`LayoutTreeNode`]). These are plain
//!   serde types mirroring the in-memory tree one-to-one. They carry no invariants by
//!   themselves; the `layout-tree` crate validates them when converting into a live tree.
//!
//! A persisted tree looks like this:
//!
//! ```json
//! {
//!   "tag": "tree",
//!   "id": "tree_0193c1f2a4b07c9e52a1d4f8e3b6",
//!   "root": {
//!     "tag": "stack",
//!     "id": "stack_0193c1f2a4b0a1b2c3d4e5f60718",
//!     "orientation": "vertical",
//!     "children": [
//!       { "tag": "window", "id": "window_0193c1f2a4b08f7e6d5c4b3a2910", "key": "scratch" }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Features
//!
//! - `clap`: derives `clap::ValueEnum` for [`Orientation`] and [`Direction`] so they can be
//!   used directly as command-line arguments.
//! - `json-schema`: derives `schemars::JsonSchema` for every type in this crate.
#![warn(missing_docs)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tag of a persisted tree document.
pub const TREE_TAG: &str = "tree";

/// Axis along which a stack lays out its children.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub enum Orientation {
    /// Children are arranged left to right.
    Horizontal,
    /// Children are arranged top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    /// Lowercase name, as used in the persisted form and the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            _ => Err(r#"invalid orientation, can be "horizontal" or "vertical""#),
        }
    }
}

/// Direction of a focus or move request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub enum Direction {
    /// Towards the previous child of a horizontal stack.
    Left,
    /// Towards the next child of a horizontal stack.
    Right,
    /// Towards the previous child of a vertical stack.
    Up,
    /// Towards the next child of a vertical stack.
    Down,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Orientation of the stacks this direction moves along.
    ///
    /// `Left` and `Right` walk the children of horizontal stacks, `Up` and `Down` walk the
    /// children of vertical stacks.
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    /// Whether moving in this direction decreases the child index.
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// Persisted layout tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct LayoutTreeDocument {
    /// Entity tag, always [`TREE_TAG`] in a valid document.
    pub tag: String,
    /// Tree id, `tree_` followed by a unique suffix.
    pub id: String,
    /// Root node. Must be a [`LayoutTreeNode::Stack`] in a valid document.
    pub root: LayoutTreeNode,
}

/// Persisted node of a layout tree.
///
/// The `tag` field selects the variant; unknown tags fail to deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "tag", rename_all = "lowercase", deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub enum LayoutTreeNode {
    /// Leaf showing externally rendered content.
    Window {
        /// Window id, `window_` followed by a unique suffix.
        id: String,
        /// Opaque reference to the content.
        key: String,
    },
    /// Container laying out its children along one axis.
    Stack {
        /// Stack id, `stack_` followed by a unique suffix.
        id: String,
        /// Layout axis.
        orientation: Orientation,
        /// Children in layout order.
        children: Vec<LayoutTreeNode>,
    },
}

impl LayoutTreeNode {
    /// Entity tag of this node.
    pub fn tag(&self) -> &'static str {
        match self {
            LayoutTreeNode::Window { .. } => "window",
            LayoutTreeNode::Stack { .. } => "stack",
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn direction_axis() {
        assert_eq!(Direction::Left.orientation(), Orientation::Horizontal);
        assert_eq!(Direction::Right.orientation(), Orientation::Horizontal);
        assert_eq!(Direction::Up.orientation(), Orientation::Vertical);
        assert_eq!(Direction::Down.orientation(), Orientation::Vertical);

        let backward: Vec<_> = Direction::ALL
            .into_iter()
            .filter(|direction| direction.is_backward())
            .collect();
        assert_eq!(backward, [Direction::Left, Direction::Up]);
    }

    #[test]
    fn parse_orientation() {
        assert_eq!("horizontal".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!("v".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn node_json_shape() {
        let node = LayoutTreeNode::Stack {
            id: "stack_a".to_owned(),
            orientation: Orientation::Horizontal,
            children: vec![LayoutTreeNode::Window {
                id: "window_b".to_owned(),
                key: "scratch".to_owned(),
            }],
        };

        assert_snapshot!(
            serde_json::to_string(&node).unwrap(),
            @r#"{"tag":"stack","id":"stack_a","orientation":"horizontal","children":[{"tag":"window","id":"window_b","key":"scratch"}]}"#
        );
    }

    #[test]
    fn unknown_node_tag_is_rejected() {
        let json = r#"{"tag":"panel","id":"panel_a"}"#;
        let err = serde_json::from_str::<LayoutTreeNode>(json).unwrap_err();
        assert!(err.to_string().contains("unknown variant `panel`"), "{err}");
    }

    #[test]
    fn unknown_node_fields_are_rejected() {
        let json = r#"{"tag":"window","id":"window_1","key":"a","orientation":"diagonal","children":[]}"#;
        let err = serde_json::from_str::<LayoutTreeNode>(json).unwrap_err();
        assert!(err.to_string().contains("unknown field `orientation`"), "{err}");

        let json = r#"{"tag":"stack","id":"stack_1","orientation":"vertical","children":[],"key":"a"}"#;
        assert!(serde_json::from_str::<LayoutTreeNode>(json).is_err());
    }

    #[test]
    fn unknown_orientation_is_rejected() {
        let json = r#"{"tag":"stack","id":"stack_a","orientation":"diagonal","children":[]}"#;
        assert!(serde_json::from_str::<LayoutTreeNode>(json).is_err());
    }
}
