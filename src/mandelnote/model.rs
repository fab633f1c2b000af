use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped note describing a change to the notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Revision {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Document-level metadata, persisted as the YAML block at the top of a notebook file.
///
/// Revisions are kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub description: String,
    pub revisions: Vec<Revision>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Metadata {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            author: author.into(),
            description: description.into(),
            revisions: Vec::new(),
            created: now,
            modified: now,
        }
    }

    pub fn latest_revision(&self) -> Option<&Revision> {
        self.revisions.first()
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new("", "", "")
    }
}
