//! Error types for scanning and saving.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to build a tree at all.
///
/// Unreadable subdirectories never produce this; they degrade to empty nodes.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The chosen root path could not be resolved or classified.
    #[error("{}: cannot read root", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to persist a rendered listing.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The destination already exists; nothing was written.
    #[error("{}: file already exists", path.display())]
    DestinationConflict { path: PathBuf },

    /// Creating the destination or writing to it failed.
    #[error("{}: failed to save tree", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SaveError {
    /// Path the save was attempted at.
    pub fn path(&self) -> &std::path::Path {
        match self {
            SaveError::DestinationConflict { path } | SaveError::WriteFailure { path, .. } => path,
        }
    }
}
