//! The command dispatcher: one line of input in, narration out.

use wl_core::{
    CharacterRegistry, CommandTable, GameController, Inventory, Outcome, WorldGraph,
};
use wl_data::Tables;

use crate::error::{FictionError, FictionResult};
use crate::parser::{Action, parse_action};

/// Input that ends the session at once. Matched exactly, before alias lookup.
pub const QUIT_TOKENS: &[&str] = &["quit", "exit"];

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player won the final fight.
    Won,
    /// The player lost the final fight.
    Lost,
    /// The player quit.
    Quit,
}

impl From<Outcome> for Ending {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
        }
    }
}

/// Whether the session still accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next command.
    Running,
    /// Finished; no further input is processed.
    Ended(Ending),
}

/// A single play-through.
///
/// Owns every table for the lifetime of the session and hands out borrows
/// to the components that need each other.
#[derive(Debug)]
pub struct FictionSession {
    commands: CommandTable,
    world: WorldGraph,
    inventory: Inventory,
    characters: CharacterRegistry,
    game: GameController,
    state: SessionState,
}

impl FictionSession {
    /// Create a session from loaded tables.
    pub fn new(tables: Tables, game: GameController) -> Self {
        Self {
            commands: tables.commands,
            world: tables.world,
            inventory: Inventory::new(),
            characters: tables.characters,
            game,
            state: SessionState::Running,
        }
    }

    /// The opening narration.
    pub fn start(&self) -> &str {
        self.game.start()
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Ended(_))
    }

    /// The room graph.
    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    /// The player's items.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Process one line of raw input and return what the player sees.
    ///
    /// Input is matched exactly: no trimming, no case folding.
    pub fn process(&mut self, input: &str) -> FictionResult<String> {
        if self.is_over() {
            return Err(FictionError::SessionOver);
        }

        if QUIT_TOKENS.contains(&input) {
            self.finish(Ending::Quit);
            return Ok(self.game.end_game(false).to_string());
        }

        let canonical = self.commands.resolve(input);
        tracing::debug!(
            input,
            canonical,
            known = self.commands.is_known(input),
            "resolved input"
        );
        let action = parse_action(canonical);
        Ok(self.execute(action))
    }

    fn execute(&mut self, action: Action) -> String {
        match action {
            Action::Go { direction } => self.world.go(&direction).to_string(),
            Action::Take { item } => self.inventory.add_item(item).to_string(),
            Action::Drop { item } => self.inventory.remove_item(&item).to_string(),
            Action::ViewInventory => self.inventory.list_items().to_string(),
            Action::Use { item } => self.inventory.use_item(&item).to_string(),
            Action::TalkTo { character } => self.characters.talk_to(&character),
            Action::AskAbout { character, topic } => self.characters.ask_about(&character, &topic),
            Action::Attack { character } => self.do_attack(&character),
            Action::Look => self.world.describe_current_room().to_string(),
            Action::Examine { character } => self.characters.describe(&character),
            Action::Help => self.do_help(),
            Action::Unrecognized { text } => text,
        }
    }

    fn do_attack(&mut self, character: &str) -> String {
        let combat = self
            .characters
            .attack(character, &self.inventory, &self.game);
        if let Some(outcome) = combat.outcome {
            self.finish(outcome.into());
        }
        combat.narrative
    }

    fn do_help(&self) -> String {
        let mut output = "Commands:".to_string();
        for (alias, action) in self.commands.iter() {
            if alias == action {
                output.push_str(&format!("\n  {alias}"));
            } else {
                output.push_str(&format!("\n  {alias} - {action}"));
            }
        }
        for token in QUIT_TOKENS {
            output.push_str(&format!("\n  {token}"));
        }
        output
    }

    fn finish(&mut self, ending: Ending) {
        tracing::info!(?ending, room = self.world.current_room_name(), "session ended");
        self.state = SessionState::Ended(ending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::INVALID_COMMAND;
    use wl_data::{DataFile, LoadMode, LoadOptions, Sources, load_sources};

    const ACTIONS: &str = "\
n|go north
s|go south
e|go east
north|go north
i|view inventory
inventory|view inventory
look|look
help|help
take flamingo mallet|take flamingo mallet
take key|take key
drop key|drop key
drop flamingo mallet|drop flamingo mallet
use key|use key
talk to mad hatter|talk to mad hatter
talk to dormouse|talk to dormouse
look at mad hatter|look at mad hatter
ask mad hatter about tea|ask mad hatter about tea
ask mad hatter about cake|ask mad hatter about cake
attack red queen|attack red queen
attack mad hatter|attack mad hatter
gossip|gossip about the queen
";

    const LOCATIONS: &str = "\
rabbit hole|You tumble to the bottom of a rabbit hole.|north:tea party,east:hedge maze
tea party|A long table is set for tea.|south:rabbit hole,east:croquet ground
hedge maze|Tall hedges twist in every direction.|west:rabbit hole
";

    const CHARACTERS: &str = "\
mad hatter|A wild-haired man in an enormous hat.|Why is a raven like a writing-desk?
red queen|A furious monarch clutching a croquet mallet.|Off with your head!
";

    fn session() -> FictionSession {
        let sources = Sources::new()
            .with(DataFile::Actions, ACTIONS)
            .with(DataFile::Locations, LOCATIONS)
            .with(DataFile::Characters, CHARACTERS);
        let options = LoadOptions::default().with_mode(LoadMode::Tolerant);
        let tables = load_sources(sources, &options).tables;
        FictionSession::new(tables, GameController::new())
    }

    fn play(session: &mut FictionSession, inputs: &[&str]) -> Vec<String> {
        inputs
            .iter()
            .map(|input| session.process(input).unwrap())
            .collect()
    }

    #[test]
    fn starts_running_with_intro() {
        let s = session();
        assert_eq!(s.state(), SessionState::Running);
        assert!(s.start().contains("Escape from Wonderland"));
        assert_eq!(s.world().current_room_name(), "rabbit hole");
    }

    #[test]
    fn take_mallet_then_attack_wins() {
        let mut s = session();
        let out = play(&mut s, &["take flamingo mallet", "attack red queen"]);
        assert_eq!(out[0], "You have taken the flamingo mallet.");
        assert!(out[1].starts_with("You bravely challenge the Red Queen"));
        assert!(out[1].ends_with(
            "Congratulations bruh! You have defeated the Red Queen and escaped Wonderland!"
        ));
        assert_eq!(s.state(), SessionState::Ended(Ending::Won));
    }

    #[test]
    fn attack_without_mallet_loses() {
        let mut s = session();
        let out = play(&mut s, &["attack red queen"]);
        assert!(out[0].contains("without the flamingo mallet, you stand no chance"));
        assert!(out[0].ends_with("Game Over. You did not make it out of Wonderland."));
        assert_eq!(s.state(), SessionState::Ended(Ending::Lost));
    }

    #[test]
    fn dropping_the_mallet_loses_the_fight() {
        let mut s = session();
        play(&mut s, &["take flamingo mallet", "drop flamingo mallet"]);
        play(&mut s, &["attack red queen"]);
        assert_eq!(s.state(), SessionState::Ended(Ending::Lost));
    }

    #[test]
    fn quit_and_exit_end_immediately() {
        for token in ["quit", "exit"] {
            let mut s = session();
            let out = s.process(token).unwrap();
            assert_eq!(out, "Game Over. You did not make it out of Wonderland.");
            assert_eq!(s.state(), SessionState::Ended(Ending::Quit));
            assert!(matches!(s.process("n"), Err(FictionError::SessionOver)));
            assert_eq!(s.world().current_room_name(), "rabbit hole");
        }
    }

    #[test]
    fn quit_is_case_sensitive() {
        let mut s = session();
        assert_eq!(s.process("QUIT").unwrap(), INVALID_COMMAND);
        assert_eq!(s.process("quit ").unwrap(), INVALID_COMMAND);
        assert!(!s.is_over());
    }

    #[test]
    fn ask_about_topics() {
        let mut s = session();
        let out = play(
            &mut s,
            &["ask mad hatter about tea", "ask mad hatter about cake"],
        );
        assert_eq!(out[0], "The Mad Hatter smiles and offers you a cup of tea.");
        assert_eq!(out[1], "mad hatter doesn't seem to know about that.");
    }

    #[test]
    fn movement_chain() {
        let mut s = session();
        let out = play(&mut s, &["n", "e", "s"]);
        assert_eq!(out[0], "A long table is set for tea.");
        // croquet ground is not defined, so the exit is dead
        assert_eq!(out[1], "You can't go that way.");
        assert_eq!(out[2], "You tumble to the bottom of a rabbit hole.");
        assert_eq!(s.world().current_room_name(), "rabbit hole");
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut s = session();
        assert_eq!(s.process("s").unwrap(), "You can't go that way.");
        assert_eq!(s.world().current_room_name(), "rabbit hole");
    }

    #[test]
    fn unknown_input_echoes_invalid_command() {
        let mut s = session();
        assert_eq!(s.process("dance").unwrap(), INVALID_COMMAND);
        assert_eq!(s.process("").unwrap(), INVALID_COMMAND);
        assert!(!s.is_over());
    }

    #[test]
    fn unparsed_action_is_echoed_verbatim() {
        let mut s = session();
        assert_eq!(s.process("gossip").unwrap(), "gossip about the queen");
    }

    #[test]
    fn inventory_commands() {
        let mut s = session();
        let out = play(
            &mut s,
            &["i", "take key", "take key", "drop key", "inventory", "use key", "drop key", "use key"],
        );
        assert_eq!(out[0], "Your inventory is empty.");
        assert_eq!(out[3], "You have dropped the key.");
        assert_eq!(out[4], "You are carrying: key.");
        assert_eq!(out[5], "You used the key. Something happens...");
        assert_eq!(out[7], "You don't have that item.");
        assert!(s.inventory().is_empty());
    }

    #[test]
    fn talking_and_examining() {
        let mut s = session();
        let out = play(
            &mut s,
            &["talk to mad hatter", "talk to dormouse", "look at mad hatter"],
        );
        assert_eq!(out[0], "Why is a raven like a writing-desk?");
        assert_eq!(out[1], "There's no one to talk to here.");
        assert_eq!(out[2], "A wild-haired man in an enormous hat.");
    }

    #[test]
    fn attacking_others_is_not_terminal() {
        let mut s = session();
        assert_eq!(
            s.process("attack mad hatter").unwrap(),
            "Attacking mad hatter might not be a wise choice."
        );
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn look_and_help() {
        let mut s = session();
        assert_eq!(
            s.process("look").unwrap(),
            "You tumble to the bottom of a rabbit hole."
        );
        let help = s.process("help").unwrap();
        assert!(help.starts_with("Commands:"));
        assert!(help.contains("\n  n - go north"));
        assert!(help.contains("\n  take key\n"));
        assert!(help.ends_with("\n  quit\n  exit"));
    }

    #[test]
    fn help_lists_aliases_in_order() {
        let sources = Sources::new()
            .with(DataFile::Actions, "n|go north\nhelp|help\n")
            .with(DataFile::Locations, LOCATIONS);
        let tables = load_sources(sources, &LoadOptions::default()).tables;
        let mut s = FictionSession::new(tables, GameController::new());

        insta::assert_snapshot!(s.process("help").unwrap(), @r"
        Commands:
          help
          n - go north
          quit
          exit
        ");
    }

    #[test]
    fn custom_win_item() {
        let sources = Sources::new()
            .with(DataFile::Actions, ACTIONS)
            .with(DataFile::Locations, LOCATIONS)
            .with(DataFile::Characters, CHARACTERS);
        let tables = load_sources(sources, &LoadOptions::default()).tables;
        let mut s = FictionSession::new(tables, GameController::new().with_win_item("key"));

        play(&mut s, &["take key", "attack red queen"]);
        assert_eq!(s.state(), SessionState::Ended(Ending::Won));
    }
}
