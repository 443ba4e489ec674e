use std::path::PathBuf;

use game_core::{GameError, ManifestError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    #[error("no game.json found in archive")]
    ManifestMissing,

    #[error("invalid game manifest: {0}")]
    Manifest(#[from] ManifestError),

    /// Wraps any I/O failure during staging or publish.
    #[error("installation failed: {0}")]
    Installation(String),

    /// I/O failure while enumerating or reading installed games.
    #[error("failed to read installed games: {0}")]
    Registry(String),

    #[error("user '{0}' already exists")]
    DuplicateUser(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("game '{0}' is not installed")]
    GameNotInstalled(String),

    #[error("no entry point registered for game '{0}'")]
    EntryPointMissing(String),

    #[error("game session failed: {0}")]
    GameRuntime(#[from] GameError),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

// The installer is the only `?`-heavy I/O path; the registry maps its
// own I/O errors to `Registry` explicitly.
impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Installation(e.to_string())
    }
}
