//! Canonical action parsing.

mod action;

pub use action::{Action, parse_action};
