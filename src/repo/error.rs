use std::path::PathBuf;

use thiserror::Error;

use crate::version::error::TagError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("git {operation} failed ({status}): {stderr}")]
    GitCommand {
        operation: String,
        status: String,
        stderr: String,
    },

    #[error("failed to run git: {0}")]
    GitSpawn(#[from] std::io::Error),

    #[error("no release tags found in {0}")]
    NoTags(PathBuf),

    #[error(transparent)]
    Tag(#[from] TagError),
}
