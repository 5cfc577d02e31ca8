use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::layout::{Direction, Orientation, StackPath, Tree};

#[derive(Parser, Debug)]
#[command(name = "layout-tree")]
#[command(about = "Inspect and edit persisted layout trees")]
#[command(version)]
pub struct Cli {
    /// Path to config.kdl (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Persisted tree to read (stdin if omitted)
    #[arg(long, short, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a fresh tree built from the config
    New,
    /// Print an outline of the tree
    Show,
    /// Check the tree and print its window count
    Validate,
    /// Split the window at PATH
    Split {
        path: NodePath,
        #[arg(value_enum)]
        orientation: Orientation,
    },
    /// Remove the node at PATH
    Remove { path: NodePath },
    /// Point the window at PATH to another key
    Update { path: NodePath, key: String },
    /// Exchange the content of two windows
    Swap { a: NodePath, b: NodePath },
    /// Move the node at PATH in front of BEFORE
    MoveBefore { path: NodePath, before: NodePath },
    /// Move the node at PATH behind AFTER
    MoveAfter { path: NodePath, after: NodePath },
    /// Print the path of the window next to PATH
    Sibling {
        path: NodePath,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Print the path of the first window with KEY
    Find { key: String },
}

impl Command {
    /// Applies an editing command to `tree`.
    ///
    /// Returns `None` for commands that only read the tree.
    pub fn edit(&self, tree: &Tree) -> Option<Tree> {
        let tree = match self {
            Command::Split { path, orientation } => tree.split(path, *orientation),
            Command::Remove { path } => tree.remove(path),
            Command::Update { path, key } => tree.update_window(path, key.clone()),
            Command::Swap { a, b } => tree.swap(a, b),
            Command::MoveBefore { path, before } => tree.move_before(path, before),
            Command::MoveAfter { path, after } => tree.move_after(path, after),
            Command::New
            | Command::Show
            | Command::Validate
            | Command::Sibling { .. }
            | Command::Find { .. } => return None,
        };
        Some(tree)
    }
}

/// Node path written as dot-separated indices, e.g. `0.1.2`.
///
/// `.` and the empty string stand for the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(pub StackPath);

impl FromStr for NodePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "." {
            return Ok(Self::default());
        }

        s.split('.')
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| format!("invalid path index {part:?} in {s:?}"))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }

        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}

impl std::ops::Deref for NodePath {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}
