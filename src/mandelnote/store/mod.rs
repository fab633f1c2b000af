//! # Storage Layer
//!
//! The [`DataStore`] trait is the only place notebook text meets persistence.
//! The rest of the crate deals in `String`s and never touches the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: reads and writes plain files
//! - [`memory::InMemoryStore`]: a map of paths to contents, for tests
//!
//! A store reports a missing document as `Ok(None)` rather than an error, so
//! callers can decide to start a fresh notebook. Every other failure
//! (permissions, a directory where a file was expected) is an error.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Whole-document persistence for notebook files.
pub trait DataStore {
    /// Read the document at `path`, or `None` if there is nothing there yet.
    fn load(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the document at `path` with `contents`.
    fn save(&mut self, path: &Path, contents: &str) -> Result<()>;
}
