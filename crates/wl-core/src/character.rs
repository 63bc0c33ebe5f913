use std::collections::BTreeMap;

use crate::error::{WlError, WlResult};
use crate::game::{GameController, Outcome};
use crate::inventory::Inventory;

/// Shown when describing someone who does not exist.
pub const NO_SUCH_CHARACTER: &str = "You dont see anyone by that name.";

/// Shown when talking to someone who does not exist.
pub const NO_ONE_TO_TALK_TO: &str = "There's no one to talk to here.";

/// A non-player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Unique name, as typed by the player.
    pub name: String,
    /// Text shown when the character is examined.
    pub description: String,
    /// Canned reply when the player talks to them.
    pub response: String,
}

impl Character {
    /// Create a character.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            response: response.into(),
        }
    }
}

/// Narration for attacking a character whose defeat ends the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatRule {
    /// The character this rule applies to.
    pub character: String,
    /// Shown when the player holds the win item.
    pub victory: String,
    /// Shown when they do not.
    pub defeat: String,
}

impl CombatRule {
    /// Create a combat rule.
    pub fn new(
        character: impl Into<String>,
        victory: impl Into<String>,
        defeat: impl Into<String>,
    ) -> Self {
        Self {
            character: character.into(),
            victory: victory.into(),
            defeat: defeat.into(),
        }
    }

    /// The Red Queen fight.
    pub fn red_queen() -> Self {
        Self::new(
            "red queen",
            "You bravely challenge the Red Queen with the flamingo mallet!\n\
             With a swift strike, you defeat her and escape Wonderland!",
            "You try to fight the Red Queen, but without the flamingo mallet, \
             you stand no chance.",
        )
    }
}

/// Result of an attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combat {
    /// Everything the player should read, in order.
    pub narrative: String,
    /// `Some` when the attack decided the game.
    pub outcome: Option<Outcome>,
}

/// Characters plus the tables deciding what asking about a topic or
/// attacking someone does.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    characters: BTreeMap<String, Character>,
    topics: BTreeMap<(String, String), String>,
    combat: BTreeMap<String, CombatRule>,
}

impl CharacterRegistry {
    /// Create an empty registry with no topics and no combat rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a character.
    pub fn add(&mut self, character: Character) {
        self.characters.insert(character.name.clone(), character);
    }

    /// Add a character, failing if the name is taken.
    pub fn add_unique(&mut self, character: Character) -> WlResult<()> {
        if self.characters.contains_key(&character.name) {
            return Err(WlError::DuplicateCharacter(character.name));
        }
        self.add(character);
        Ok(())
    }

    /// Register a special reply for asking `character` about `topic`.
    pub fn add_topic(
        &mut self,
        character: impl Into<String>,
        topic: impl Into<String>,
        response: impl Into<String>,
    ) {
        self.topics
            .insert((character.into(), topic.into()), response.into());
    }

    /// Register a fight that ends the game.
    pub fn add_combat_rule(&mut self, rule: CombatRule) {
        self.combat.insert(rule.character.clone(), rule);
    }

    /// Register a special reply, failing if the pair already has one.
    pub fn add_topic_unique(
        &mut self,
        character: impl Into<String>,
        topic: impl Into<String>,
        response: impl Into<String>,
    ) -> WlResult<()> {
        let key = (character.into(), topic.into());
        if self.topics.contains_key(&key) {
            return Err(WlError::DuplicateTopic(key.0, key.1));
        }
        self.topics.insert(key, response.into());
        Ok(())
    }

    /// Register a fight, failing if the character already has one.
    pub fn add_combat_rule_unique(&mut self, rule: CombatRule) -> WlResult<()> {
        if self.combat.contains_key(&rule.character) {
            return Err(WlError::DuplicateCombatRule(rule.character));
        }
        self.add_combat_rule(rule);
        Ok(())
    }

    /// Install the Wonderland topic: the Mad Hatter and his tea.
    pub fn with_default_topics(mut self) -> Self {
        self.add_topic(
            "mad hatter",
            "tea",
            "The Mad Hatter smiles and offers you a cup of tea.",
        );
        self
    }

    /// Install the Wonderland fight against the Red Queen.
    pub fn with_default_combat(mut self) -> Self {
        self.add_combat_rule(CombatRule::red_queen());
        self
    }

    /// Look up a character.
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    /// Iterate over characters in name order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Iterate over `(character, topic)` keys of the topic table.
    pub fn topics(&self) -> impl Iterator<Item = (&str, &str)> {
        self.topics.keys().map(|(c, t)| (c.as_str(), t.as_str()))
    }

    /// Iterate over combat rules.
    pub fn combat_rules(&self) -> impl Iterator<Item = &CombatRule> {
        self.combat.values()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether there are no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Describe a character.
    pub fn describe(&self, name: &str) -> String {
        match self.characters.get(name) {
            Some(c) => c.description.clone(),
            None => NO_SUCH_CHARACTER.to_string(),
        }
    }

    /// What a character says when spoken to. Never varies.
    pub fn talk_to(&self, name: &str) -> String {
        match self.characters.get(name) {
            Some(c) => c.response.clone(),
            None => NO_ONE_TO_TALK_TO.to_string(),
        }
    }

    /// Ask a character about a topic.
    ///
    /// Works for any name, known or not: pairs missing from the topic table
    /// get the stock shrug.
    pub fn ask_about(&self, name: &str, topic: &str) -> String {
        self.topics
            .get(&(name.to_string(), topic.to_string()))
            .cloned()
            .unwrap_or_else(|| format!("{name} doesn't seem to know about that."))
    }

    /// Attack a character.
    ///
    /// Characters with a combat rule end the game: the controller decides the
    /// outcome from the inventory and supplies the closing narration. Anyone
    /// else just earns a warning.
    pub fn attack(&self, name: &str, inventory: &Inventory, game: &GameController) -> Combat {
        let Some(rule) = self.combat.get(name) else {
            return Combat {
                narrative: format!("Attacking {name} might not be a wise choice."),
                outcome: None,
            };
        };

        let won = game.check_win(inventory);
        let fight = if won { &rule.victory } else { &rule.defeat };
        tracing::info!(character = name, won, "combat resolved");

        Combat {
            narrative: format!("{fight}\n{}", game.end_game(won)),
            outcome: Some(Outcome::from_win(won)),
        }
    }
}
