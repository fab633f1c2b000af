use crate::index::CardPath;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("card still has children, delete requires force")]
    HasChildren,

    #[error("nothing to delete")]
    NothingToDelete,

    #[error("unable to promote any further")]
    CannotPromote,

    #[error("No card at {0}")]
    NoSuchCard(CardPath),

    #[error("malformed notebook; must contain metadata block and body")]
    MissingMetadata,

    #[error("malformed notebook; title must contain depth marker and text, found {0}")]
    MalformedHeading(String),

    #[error("malformed notebook; must start at header depth 1, found {0}")]
    BadFirstDepth(String),

    #[error("malformed notebook; header depths must increase by 1, found {0}")]
    DepthJump(String),

    #[error("malformed notebook; cannot have body without header")]
    BodyWithoutHeader,

    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl NotebookError {
    /// True for errors raised while reading the text format.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            NotebookError::MissingMetadata
                | NotebookError::MalformedHeading(_)
                | NotebookError::BadFirstDepth(_)
                | NotebookError::DepthJump(_)
                | NotebookError::BodyWithoutHeader
                | NotebookError::Metadata(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotebookError>;
