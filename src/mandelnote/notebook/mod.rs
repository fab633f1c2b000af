//! # Notebook
//!
//! A [`Notebook`] is one outline document: the card tree, a cursor pointing at
//! the card being edited, the document metadata and a dirty flag.
//!
//! Editing operations are split by concern:
//!
//! - [`cards`]: adding, reading and editing the current card
//! - [`navigate`]: moving the cursor (`cycle`, `enter`, `exit`)
//! - [`restructure`]: changing the shape of the tree (`move_card`, `delete`,
//!   `promote`, `promote_all`, `merge`)
//!
//! ## Cursor rules
//!
//! The cursor is the root only while the notebook has no cards. As soon as a
//! card exists the cursor points at a content card, and every operation that
//! removes or relocates cards says where the cursor ends up:
//!
//! | operation        | cursor afterwards                                   |
//! |------------------|-----------------------------------------------------|
//! | `add_card`       | the new card                                        |
//! | `delete`         | previous sibling, else next sibling, else parent    |
//! | `promote(_all)`  | unchanged (the same card, one level up)             |
//! | `merge` up       | the previous sibling that absorbed the card         |
//! | `merge` down     | the next sibling that absorbed the card             |
//! | `move_card`      | unchanged (the same card, new position)             |

use crate::error::{NotebookError, Result};
use crate::index::{self, CardPath, TreeNode};
use crate::model::{Metadata, Revision};
use crate::tree::{CardId, CardTree};
use chrono::Utc;
use std::path::{Path, PathBuf};

pub mod cards;
pub mod navigate;
pub mod restructure;

#[derive(Debug, Clone)]
pub struct Notebook {
    filename: Option<PathBuf>,
    metadata: Metadata,
    tree: CardTree,
    current: CardId,
    dirty: bool,
}

impl Notebook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::from_metadata(Metadata::new(title, author, description))
    }

    pub fn from_metadata(metadata: Metadata) -> Self {
        let tree = CardTree::new();
        let current = tree.root();
        Self {
            filename: None,
            metadata,
            tree,
            current,
            dirty: false,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn set_metadata(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.metadata.title = title.into();
        self.metadata.author = author.into();
        self.metadata.description = description.into();
        self.metadata.modified = Utc::now();
        self.dirty = true;
    }

    /// Records a revision message. The newest revision comes first.
    pub fn add_revision(&mut self, message: impl Into<String>) {
        let revision = Revision::new(message);
        self.metadata.modified = revision.timestamp;
        self.metadata.revisions.insert(0, revision);
        self.dirty = true;
    }

    pub fn file(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Changes where the notebook will be saved.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    /// True when there are edits that have not been saved.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn tree(&self) -> &CardTree {
        &self.tree
    }

    pub fn current(&self) -> CardId {
        self.current
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Depth of the cursor; 0 only for an empty notebook.
    pub fn current_depth(&self) -> usize {
        self.tree.depth(self.current)
    }

    pub fn current_path(&self) -> CardPath {
        CardPath::of(&self.tree, self.current)
    }

    /// Moves the cursor to the card at `path`.
    pub fn select(&mut self, path: &CardPath) -> Result<()> {
        match path.resolve(&self.tree) {
            Some(id) if !self.tree.card(id).is_root() => {
                self.current = id;
                Ok(())
            }
            Some(_) if self.tree.is_empty() => Ok(()),
            _ => Err(NotebookError::NoSuchCard(path.clone())),
        }
    }

    /// Read-only projection of the whole outline for rendering.
    pub fn get_tree(&self) -> Vec<TreeNode> {
        index::snapshot(&self.tree, self.current)
    }

    /// Body of the current card for in-place edits while parsing.
    pub(crate) fn current_body_mut(&mut self) -> Option<&mut String> {
        self.tree.content_mut(self.current).map(|(_, body)| body)
    }

    /// Puts the cursor on the first top-level card (or the root when empty)
    /// and clears the dirty flag. Used after building a notebook from a file.
    pub(crate) fn rewind(&mut self) {
        let root = self.tree.root();
        self.current = self.tree.card(root).first_child().unwrap_or(root);
        self.dirty = false;
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Top-level cards with the given titles; each body is the lowercased title.
    /// The cursor ends on the last card.
    pub fn flat(titles: &[&str]) -> Notebook {
        let mut nb = Notebook::new("Fixture", "Tester", "");
        for title in titles {
            nb.add_card(*title, title.to_lowercase(), false);
        }
        nb
    }

    /// Titles of the cursor's siblings, in order.
    pub fn sibling_titles(nb: &Notebook) -> Vec<String> {
        let tree = nb.tree();
        let parent = tree.card(nb.current()).parent().unwrap_or(tree.root());
        tree.children(parent)
            .map(|id| tree.card(id).title().to_string())
            .collect()
    }

    /// Titles of the cursor's children, in order.
    pub fn child_titles(nb: &Notebook) -> Vec<String> {
        let tree = nb.tree();
        tree.children(nb.current())
            .map(|id| tree.card(id).title().to_string())
            .collect()
    }

    /// Outline as `depth:title` strings in document order.
    pub fn outline(nb: &Notebook) -> Vec<String> {
        let tree = nb.tree();
        tree.preorder()
            .map(|(id, depth)| format!("{}:{}", depth, tree.card(id).title()))
            .collect()
    }

    pub fn assert_valid(nb: &Notebook) {
        nb.tree().validate().unwrap();
        let current = nb.tree().card(nb.current());
        assert_eq!(current.is_root(), nb.is_empty(), "cursor/root mismatch");
    }
}
