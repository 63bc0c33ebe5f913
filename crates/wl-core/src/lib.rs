//! Core types for Wonderland: the command table, room graph, inventory,
//! character registry, and the rules deciding how a session ends.
//!
//! This crate knows nothing about files or terminals. Tables are built
//! programmatically or by the `wl-data` loader, and every operation returns
//! the text the player should see instead of printing it.

/// Character descriptions, dialogue, and combat resolution.
pub mod character;
/// Alias to canonical action lookup.
pub mod command_table;
/// Error types used throughout the crate.
pub mod error;
/// Win condition and end-of-game narration.
pub mod game;
/// The player's held items.
pub mod inventory;
/// Rooms, exits, and the player's position.
pub mod world;

/// Re-export character types.
pub use character::{Character, CharacterRegistry, Combat, CombatRule};
/// Re-export the command table.
pub use command_table::{CommandTable, INVALID_COMMAND};
/// Re-export error types.
pub use error::{WlError, WlResult};
/// Re-export game rules.
pub use game::{GameController, Outcome};
/// Re-export inventory types.
pub use inventory::{Inventory, InventoryReport};
/// Re-export world graph types.
pub use world::{Movement, Room, WorldGraph};
