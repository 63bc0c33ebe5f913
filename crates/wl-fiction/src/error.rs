//! Error types for the fiction session.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for session operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur around a session.
///
/// Nothing the player types produces one of these while the session runs;
/// bad commands are answered with narration.
#[derive(Debug, Error)]
pub enum FictionError {
    /// Input arrived after the session ended.
    #[error("the game is over")]
    SessionOver,

    /// The config file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigIo {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON for a [`GameConfig`](crate::GameConfig).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
