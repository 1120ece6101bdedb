// src/error.rs
use std::path::PathBuf;

pub type Result<T, E = HskError> = std::result::Result<T, E>;

/// Failures of the dataset tooling around the sandhi engine.
///
/// The engine itself never fails; these cover reading, writing and
/// level selection.
#[derive(Debug, thiserror::Error)]
pub enum HskError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    /// The temporary file could not be moved over the destination.
    #[error("could not replace file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("dataset not found at '{}'", .0.display())]
    MissingDataset(PathBuf),

    #[error("unknown filter mode '{0}', expected 'exclusive' or 'inclusive'")]
    InvalidMode(String),

    #[error("no level given for {0} filtering")]
    MissingLevels(&'static str),
}
