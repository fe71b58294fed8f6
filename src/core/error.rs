use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index not found at {}. Run 'docsearch build' first.", .0.display())]
    ArtifactNotFound(PathBuf),

    #[error("Malformed index at {}: {reason}", .path.display())]
    MalformedArtifact { path: PathBuf, reason: String },

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;
