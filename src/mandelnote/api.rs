//! # API Facade
//!
//! [`NotebookApi`] is the single entry point an editor UI talks to. It owns the
//! open [`Notebook`] and the [`DataStore`] it came from, and exposes:
//!
//! - **Persistence**: [`NotebookApi::open`], [`NotebookApi::save`], [`NotebookApi::set_file`]
//! - **Queries**: `get_card`, `get_tree`, `dirty`
//! - **Edits**: everything in [`crate::notebook`], returning a [`CmdResult`]
//!   with messages a UI can show in a status line
//!
//! The facade does no editing itself; it dispatches to the notebook and
//! reports what happened. It never prints: messages are returned as data.
//!
//! ## Generic Over DataStore
//!
//! - Production: `NotebookApi<FileStore>`
//! - Testing: `NotebookApi<InMemoryStore>`

use crate::codec;
use crate::config::NotebookConfig;
use crate::error::{NotebookError, Result};
use crate::index::{CardPath, TreeNode};
use crate::notebook::Notebook;
use crate::store::DataStore;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub saved_to: Option<PathBuf>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_saved_to(mut self, path: PathBuf) -> Self {
        self.saved_to = Some(path);
        self
    }
}

/// Reads the notebook at `path`. A missing file yields a fresh, empty notebook
/// using the configured defaults; any other failure is returned.
pub fn open_notebook<S: DataStore>(
    store: &S,
    path: &Path,
    config: &NotebookConfig,
) -> Result<Notebook> {
    let mut nb = match store.load(path)? {
        Some(contents) => {
            let nb = codec::unmarshal(&contents)?;
            info!(path = %path.display(), cards = nb.len(), "opened notebook");
            nb
        }
        None => {
            info!(path = %path.display(), "no notebook yet, starting a new one");
            Notebook::new(
                config.default_title.clone(),
                config.default_author.clone(),
                config.default_description.clone(),
            )
        }
    };
    nb.set_file(path);
    Ok(nb)
}

/// Writes the notebook to its file and clears the dirty flag.
pub fn save_notebook<S: DataStore>(store: &mut S, nb: &mut Notebook) -> Result<PathBuf> {
    let path = nb
        .file()
        .map(Path::to_path_buf)
        .ok_or_else(|| NotebookError::Store("No file set for this notebook".to_string()))?;
    let contents = codec::marshal(nb)?;
    store.save(&path, &contents)?;
    nb.mark_clean();
    info!(path = %path.display(), cards = nb.len(), "saved notebook");
    Ok(path)
}

/// The main API facade for notebook editing.
pub struct NotebookApi<S: DataStore> {
    store: S,
    notebook: Notebook,
}

impl<S: DataStore> NotebookApi<S> {
    pub fn new(store: S, notebook: Notebook) -> Self {
        Self { store, notebook }
    }

    pub fn open(store: S, path: impl AsRef<Path>, config: &NotebookConfig) -> Result<Self> {
        let notebook = open_notebook(&store, path.as_ref(), config)?;
        Ok(Self::new(store, notebook))
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        let path = save_notebook(&mut self.store, &mut self.notebook)?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!("Saved {}", path.display())))
            .with_saved_to(path))
    }

    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.notebook.set_file(path);
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (S, Notebook) {
        (self.store, self.notebook)
    }

    pub fn get_card(&self) -> (&str, &str) {
        self.notebook.get_card()
    }

    pub fn get_tree(&self) -> Vec<TreeNode> {
        self.notebook.get_tree()
    }

    pub fn dirty(&self) -> bool {
        self.notebook.dirty()
    }

    pub fn add_card(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        as_child: bool,
    ) -> CmdResult {
        self.notebook.add_card(title, body, as_child);
        CmdResult::default().with_message(CmdMessage::success(format!(
            "Card added ({}): {}",
            self.notebook.current_path(),
            self.notebook.get_card().0
        )))
    }

    pub fn edit_card(&mut self, title: impl Into<String>, body: impl Into<String>) -> CmdResult {
        if self.notebook.is_empty() {
            return CmdResult::default().with_message(CmdMessage::warning("No card to edit"));
        }
        self.notebook.edit_card(title, body);
        CmdResult::default().with_message(CmdMessage::success(format!(
            "Card updated ({}): {}",
            self.notebook.current_path(),
            self.notebook.get_card().0
        )))
    }

    pub fn delete(&mut self, force: bool) -> Result<CmdResult> {
        let title = self.notebook.get_card().0.to_string();
        let path = self.notebook.current_path();
        self.notebook.delete(force)?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!("Card deleted ({}): {}", path, title))))
    }

    pub fn promote(&mut self) -> Result<CmdResult> {
        self.notebook.promote()?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Card promoted to {}: {}",
            self.notebook.current_path(),
            self.notebook.get_card().0
        ))))
    }

    pub fn promote_all(&mut self, replace: bool) -> Result<CmdResult> {
        self.notebook.promote_all(replace)?;
        let verb = if replace { "replaced their parent" } else { "promoted" };
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Cards {} at depth {}",
            verb,
            self.notebook.current_depth()
        ))))
    }

    pub fn merge(&mut self, amount: i64) -> CmdResult {
        let before = self.notebook.len();
        self.notebook.merge(amount);
        let merged = before - self.notebook.len();
        if merged == 0 {
            return CmdResult::default().with_message(CmdMessage::info("Nothing to merge"));
        }
        CmdResult::default().with_message(CmdMessage::success(format!(
            "Merged {} card(s) into {}",
            merged,
            self.notebook.get_card().0
        )))
    }

    pub fn move_card(&mut self, amount: i64) {
        self.notebook.move_card(amount);
    }

    pub fn cycle(&mut self, amount: i64) {
        self.notebook.cycle(amount);
    }

    pub fn enter(&mut self) {
        self.notebook.enter();
    }

    pub fn exit(&mut self) {
        self.notebook.exit();
    }

    pub fn select(&mut self, path: &CardPath) -> Result<()> {
        self.notebook.select(path)
    }

    pub fn set_metadata(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.notebook.set_metadata(title, author, description);
    }

    pub fn add_revision(&mut self, message: impl Into<String>) -> CmdResult {
        self.notebook.add_revision(message);
        CmdResult::default().with_message(CmdMessage::success(format!(
            "Revision recorded ({} total)",
            self.notebook.metadata().revisions.len()
        )))
    }
}
