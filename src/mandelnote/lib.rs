//! # Mandelnote Architecture
//!
//! Mandelnote is a **fractal note-taking model**. Notes live on cards; cards
//! nest under other cards to any depth, and the whole outline is stored as a
//! plain Markdown file whose heading levels mirror the tree.
//!
//! Like any good notes library, this is a library that happens to have a CLI
//! client, not the other way around. An editor UI drives it through the API
//! facade and renders the read-only tree snapshots it hands back.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses the file argument, prints the outline             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Open / Save / SetFile through a DataStore                │
//! │  - Dispatches edits, returns CmdResult messages             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Notebook (notebook/) + Codec (codec.rs)                    │
//! │  - Cursor, editing rules, metadata, dirty tracking          │
//! │  - Text format <-> notebook                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Card tree (tree.rs)                                        │
//! │  - Arena of cards linked by CardId                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! Everything below the API takes and returns plain Rust values. Reading and
//! writing files happens behind the [`store::DataStore`] trait, which has an
//! in-memory implementation for tests.
//!
//! ## Errors
//!
//! Structural refusals (deleting a card with children, promoting a top-level
//! card) and parse failures are returned as [`error::NotebookError`] values.
//! The only panics are for broken internal invariants, such as looking up a
//! card that was already removed.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and persistence entry points
//! - [`notebook`]: The notebook and its editing operations
//! - [`tree`]: Arena-backed card tree
//! - [`codec`]: Markdown + YAML text format
//! - [`index`]: Card paths (`2.1.3`) and tree snapshots
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Metadata and revisions
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod notebook;
pub mod store;
pub mod tree;
