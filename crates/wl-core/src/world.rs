use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{WlError, WlResult};

/// Where every new session begins unless configured otherwise.
pub const DEFAULT_START_ROOM: &str = "rabbit hole";

/// Shown when no exit matches the requested direction.
pub const BLOCKED: &str = "You can't go that way.";

/// A named location with outgoing, direction-labelled exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Text shown when the player enters or looks around.
    pub description: String,
    /// Direction token to destination room name.
    pub exits: BTreeMap<String, String>,
}

impl Room {
    /// Create a room with no exits.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exits: BTreeMap::new(),
        }
    }

    /// Add an exit (builder style).
    pub fn with_exit(mut self, direction: impl Into<String>, destination: impl Into<String>) -> Self {
        self.exits.insert(direction.into(), destination.into());
        self
    }
}

/// Result of trying to move through an exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    /// The player entered a new room.
    Arrived {
        /// Name of the room entered.
        room: String,
        /// Its description.
        description: String,
    },
    /// No usable exit; nothing changed.
    Blocked,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrived { description, .. } => f.write_str(description),
            Self::Blocked => f.write_str(BLOCKED),
        }
    }
}

/// The room graph plus the player's current position in it.
///
/// Rooms never change after loading; only `current` moves.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    rooms: HashMap<String, Room>,
    current: String,
}

impl Default for WorldGraph {
    fn default() -> Self {
        Self::new(DEFAULT_START_ROOM)
    }
}

impl WorldGraph {
    /// Create an empty graph whose player stands in `start`.
    ///
    /// `start` does not have to exist yet; until it does, descriptions are
    /// empty and every move is blocked.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            rooms: HashMap::new(),
            current: start.into(),
        }
    }

    /// Add a room, failing if one with the same name exists.
    pub fn add_room(&mut self, room: Room) -> WlResult<()> {
        if self.rooms.contains_key(&room.name) {
            return Err(WlError::DuplicateRoom(room.name));
        }
        self.rooms.insert(room.name.clone(), room);
        Ok(())
    }

    /// Add a room, or fold it into an existing one of the same name.
    ///
    /// The later description wins; exits are merged with later entries
    /// overriding the same direction.
    pub fn merge_room(&mut self, room: Room) {
        match self.rooms.get_mut(&room.name) {
            Some(existing) => {
                existing.description = room.description;
                existing.exits.extend(room.exits);
            }
            None => {
                self.rooms.insert(room.name.clone(), room);
            }
        }
    }

    /// Name of the room the player is in.
    pub fn current_room_name(&self) -> &str {
        &self.current
    }

    /// The room the player is in, if it exists.
    pub fn current_room(&self) -> Option<&Room> {
        self.room(&self.current)
    }

    /// Description of the current room; empty if the room is unknown.
    pub fn describe_current_room(&self) -> &str {
        self.current_room()
            .map(|r| r.description.as_str())
            .unwrap_or("")
    }

    /// Follow the exit labelled `direction` from the current room.
    ///
    /// Exits that point at rooms missing from the graph never succeed.
    pub fn go(&mut self, direction: &str) -> Movement {
        let Some(destination) = self
            .current_room()
            .and_then(|r| r.exits.get(direction))
            .and_then(|dest| self.room(dest))
        else {
            tracing::debug!(room = %self.current, direction, "move blocked");
            return Movement::Blocked;
        };

        let room = destination.name.clone();
        let description = destination.description.clone();
        tracing::debug!(from = %self.current, to = %room, "moved");
        self.current = room.clone();
        Movement::Arrived { room, description }
    }

    /// Look up a room by name.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    /// Whether a room with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Iterate over all rooms in no particular order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Total number of exits across all rooms.
    pub fn exit_count(&self) -> usize {
        self.rooms.values().map(|r| r.exits.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wonderland() -> WorldGraph {
        let mut world = WorldGraph::default();
        world
            .add_room(
                Room::new("rabbit hole", "You are at the bottom of a rabbit hole.")
                    .with_exit("north", "tea party")
                    .with_exit("down", "nowhere"),
            )
            .unwrap();
        world
            .add_room(
                Room::new("tea party", "A long table set for tea.").with_exit("south", "rabbit hole"),
            )
            .unwrap();
        world
    }

    #[test]
    fn starts_in_rabbit_hole() {
        let world = wonderland();
        assert_eq!(world.current_room_name(), "rabbit hole");
        assert_eq!(
            world.describe_current_room(),
            "You are at the bottom of a rabbit hole."
        );
    }

    #[test]
    fn valid_move_changes_room() {
        let mut world = wonderland();
        let movement = world.go("north");
        assert!(matches!(movement, Movement::Arrived { ref room, .. } if room == "tea party"));
        assert_eq!(movement.to_string(), "A long table set for tea.");
        assert_eq!(world.current_room_name(), "tea party");

        world.go("south");
        assert_eq!(world.current_room_name(), "rabbit hole");
    }

    #[test]
    fn unknown_direction_is_blocked() {
        let mut world = wonderland();
        let movement = world.go("west");
        assert_eq!(movement, Movement::Blocked);
        assert_eq!(movement.to_string(), "You can't go that way.");
        assert_eq!(world.current_room_name(), "rabbit hole");
    }

    #[test]
    fn dangling_exit_is_blocked() {
        let mut world = wonderland();
        assert_eq!(world.go("down"), Movement::Blocked);
        assert_eq!(world.current_room_name(), "rabbit hole");
    }

    #[test]
    fn directions_are_case_sensitive() {
        let mut world = wonderland();
        assert_eq!(world.go("North"), Movement::Blocked);
    }

    #[test]
    fn missing_start_room_describes_nothing() {
        let mut world = WorldGraph::new("attic");
        world.add_room(Room::new("cellar", "Damp.")).unwrap();
        assert_eq!(world.describe_current_room(), "");
        assert_eq!(world.go("up"), Movement::Blocked);
    }

    #[test]
    fn add_room_rejects_duplicates() {
        let mut world = wonderland();
        let err = world.add_room(Room::new("tea party", "again")).unwrap_err();
        assert!(matches!(err, WlError::DuplicateRoom(ref n) if n == "tea party"));
    }

    #[test]
    fn merge_room_combines_exits() {
        let mut world = wonderland();
        world.merge_room(Room::new("tea party", "An emptier table.").with_exit("east", "rabbit hole"));
        let room = world.room("tea party").unwrap();
        assert_eq!(room.description, "An emptier table.");
        assert_eq!(room.exits.len(), 2);
        assert_eq!(world.exit_count(), 4);
    }
}
