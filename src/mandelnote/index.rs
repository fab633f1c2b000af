//! # Card addressing and tree snapshots
//!
//! [`CardId`]s are internal arena handles. Anything facing a user (a renderer,
//! a status line, a test) addresses cards by their [`CardPath`] instead: the
//! 1-based position at every level, written `2.1.3` for "third child of the
//! first child of the second top-level card".
//!
//! [`TreeNode`] is the read-only projection handed to renderers. It is rebuilt
//! from the arena on every call, so it always reflects the latest edits.

use crate::tree::{CardId, CardTree};
use std::fmt;
use std::str::FromStr;

/// Position of a card as 1-based indexes from the top level down.
/// The empty path denotes the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CardPath(Vec<usize>);

impl CardPath {
    pub fn new(positions: Vec<usize>) -> Self {
        Self(positions)
    }

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, position: usize) -> Self {
        let mut positions = self.0.clone();
        positions.push(position);
        Self(positions)
    }

    /// Computes the path of a card currently in `tree`.
    pub fn of(tree: &CardTree, id: CardId) -> Self {
        let mut positions = Vec::new();
        let mut cursor = id;
        while let Some(parent) = tree.card(cursor).parent() {
            let position = tree
                .children(parent)
                .position(|sibling| sibling == cursor)
                .unwrap_or_else(|| panic!("{:?} is missing from its parent's children", cursor));
            positions.push(position + 1);
            cursor = parent;
        }
        positions.reverse();
        Self(positions)
    }

    /// Looks the path up in `tree`.
    pub fn resolve(&self, tree: &CardTree) -> Option<CardId> {
        let mut cursor = tree.root();
        for &position in &self.0 {
            cursor = tree.children(cursor).nth(position.checked_sub(1)?)?;
        }
        Some(cursor)
    }
}

impl fmt::Display for CardPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for CardPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "root" {
            return Ok(Self::root());
        }
        s.split('.')
            .map(|part| match part.parse::<usize>() {
                Ok(0) => Err(format!("Card positions start at 1: {}", s)),
                Ok(n) => Ok(n),
                Err(_) => Err(format!("Invalid card path: {}", s)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Read-only view of one card and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub title: String,
    pub body: String,
    pub depth: usize,
    pub path: CardPath,
    pub current: bool,
    pub children: Vec<TreeNode>,
}

/// Materializes the whole outline, flagging the card under the cursor.
pub fn snapshot(tree: &CardTree, current: CardId) -> Vec<TreeNode> {
    collect_children(tree, tree.root(), &CardPath::root(), current)
}

fn collect_children(
    tree: &CardTree,
    parent: CardId,
    parent_path: &CardPath,
    current: CardId,
) -> Vec<TreeNode> {
    tree.children(parent)
        .enumerate()
        .map(|(i, id)| {
            let card = tree.card(id);
            let path = parent_path.child(i + 1);
            TreeNode {
                title: card.title().to_string(),
                body: card.body().to_string(),
                depth: path.depth(),
                current: id == current,
                children: collect_children(tree, id, &path, current),
                path,
            }
        })
        .collect()
}

/// Flattens a snapshot in document order (depth first).
pub fn walk(nodes: &[TreeNode]) -> Vec<&TreeNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&TreeNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children.iter().rev());
    }
    out
}
