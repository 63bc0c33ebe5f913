use crate::inventory::Inventory;

/// Holding this item is what it takes to win.
pub const DEFAULT_WIN_ITEM: &str = "flamingo mallet";

const INTRO: &str = "Welcome to Alice's Quest: Escape from Wonderland!\n\
                     You find yourself at the entrance of a rabbit hole...";
const VICTORY: &str =
    "Congratulations bruh! You have defeated the Red Queen and escaped Wonderland!";
const DEFEAT: &str = "Game Over. You did not make it out of Wonderland.";

/// How a resolved fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player won the game.
    Won,
    /// The player lost the game.
    Lost,
}

impl Outcome {
    /// Map a win check onto an outcome.
    pub fn from_win(won: bool) -> Self {
        if won { Self::Won } else { Self::Lost }
    }
}

/// Owns the win condition and the opening and closing narration.
///
/// The controller never stops a session by itself; callers act on the
/// values it returns.
#[derive(Debug, Clone)]
pub struct GameController {
    win_item: String,
    intro: String,
    victory: String,
    defeat: String,
}

impl Default for GameController {
    fn default() -> Self {
        Self {
            win_item: DEFAULT_WIN_ITEM.to_string(),
            intro: INTRO.to_string(),
            victory: VICTORY.to_string(),
            defeat: DEFEAT.to_string(),
        }
    }
}

impl GameController {
    /// Create a controller with the Wonderland narration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the item required to win.
    pub fn with_win_item(mut self, item: impl Into<String>) -> Self {
        self.win_item = item.into();
        self
    }

    /// The item required to win.
    pub fn win_item(&self) -> &str {
        &self.win_item
    }

    /// Opening narration, shown once per session.
    pub fn start(&self) -> &str {
        &self.intro
    }

    /// True iff the inventory holds the win item. Exact name match.
    pub fn check_win(&self, inventory: &Inventory) -> bool {
        inventory.has_item(&self.win_item)
    }

    /// Closing narration for a finished session.
    pub fn end_game(&self, won: bool) -> &str {
        if won { &self.victory } else { &self.defeat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_requires_exact_item() {
        let game = GameController::new();
        let mut inv = Inventory::new();
        assert!(!game.check_win(&inv));

        inv.add_item("flamingo");
        inv.add_item("Flamingo Mallet");
        assert!(!game.check_win(&inv));

        inv.add_item("flamingo mallet");
        assert!(game.check_win(&inv));
    }

    #[test]
    fn custom_win_item() {
        let game = GameController::new().with_win_item("vorpal sword");
        let mut inv = Inventory::new();
        inv.add_item("flamingo mallet");
        assert!(!game.check_win(&inv));
        inv.add_item("vorpal sword");
        assert!(game.check_win(&inv));
        assert_eq!(game.win_item(), "vorpal sword");
    }

    #[test]
    fn narration() {
        let game = GameController::new();
        assert!(game.start().starts_with("Welcome to Alice's Quest"));
        assert!(game.start().ends_with("entrance of a rabbit hole..."));
        assert!(game.end_game(true).contains("defeated the Red Queen"));
        assert_eq!(
            game.end_game(false),
            "Game Over. You did not make it out of Wonderland."
        );
    }

    #[test]
    fn outcome_from_win() {
        assert_eq!(Outcome::from_win(true), Outcome::Won);
        assert_eq!(Outcome::from_win(false), Outcome::Lost);
    }
}
