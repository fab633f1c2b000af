use super::DataStore;
use crate::error::{NotebookError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Notebook files on the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(NotebookError::Io)?;
            }
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NotebookError::Io(e)),
        }
    }

    fn save(&mut self, path: &Path, contents: &str) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(NotebookError::Store("No file to save to".to_string()));
        }
        self.ensure_parent(path)?;
        fs::write(path, contents).map_err(NotebookError::Io)?;
        Ok(())
    }
}
