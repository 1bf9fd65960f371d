use std::path::PathBuf;

use thiserror::Error;

use crate::repo::error::SyncError;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// An upstream file the extraction plan depends on is missing from the
    /// checkout. Usually means the upstream tree layout changed.
    #[error("expected upstream file missing: {0}")]
    MissingSource(PathBuf),

    #[error("dependency '{0}' not found in upstream requirements")]
    DependencyNotFound(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
