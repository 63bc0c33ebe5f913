//! Error types for loading data files.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for data loading.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that stop a data directory from being used.
#[derive(Debug, Error, Diagnostic)]
pub enum DataError {
    /// Loading reported errors (only strict mode produces these).
    #[error("{count} error(s) in data directory {}", dir.display())]
    #[diagnostic(
        code(wonderland::data::invalid),
        help("first problem: {first}\nfix the data files, or load without --strict to fall back to defaults")
    )]
    Invalid {
        /// The directory that was loaded.
        dir: PathBuf,
        /// Number of errors.
        count: usize,
        /// The first error, for display.
        first: String,
    },

    /// The data directory itself does not exist.
    #[error("data directory not found: {}", dir.display())]
    #[diagnostic(
        code(wonderland::data::no_directory),
        help("pass the directory holding actions.txt, locations.txt and characters.txt with --data")
    )]
    NoDirectory {
        /// The missing directory.
        dir: PathBuf,
    },
}
