//! Interactive fiction session for Wonderland.
//!
//! Turns a line of player input into a change of world state and the text
//! describing it. Input is first resolved through the command table, then the
//! canonical action is parsed into an [`Action`] and dispatched.

/// Session configuration.
pub mod config;
/// Error types for the session.
pub mod error;
/// Canonical action parsing.
pub mod parser;
/// The command dispatcher.
pub mod session;

pub use config::GameConfig;
pub use error::{FictionError, FictionResult};
pub use parser::{Action, parse_action};
pub use session::{Ending, FictionSession, SessionState};
