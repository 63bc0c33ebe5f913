//! Parsing of canonical actions, the strings the command table maps aliases to.

/// A parsed canonical action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `go <direction>`
    Go {
        /// Direction token, matched against room exits.
        direction: String,
    },
    /// `take <item>`
    Take {
        /// The item name.
        item: String,
    },
    /// `drop <item>`
    Drop {
        /// The item name.
        item: String,
    },
    /// `view inventory`
    ViewInventory,
    /// `use <item>`
    Use {
        /// The item name.
        item: String,
    },
    /// `talk to <character>`
    TalkTo {
        /// The character name.
        character: String,
    },
    /// `ask <character> about <topic>`
    AskAbout {
        /// The character name.
        character: String,
        /// What to ask about.
        topic: String,
    },
    /// `attack <character>`
    Attack {
        /// The character name.
        character: String,
    },
    /// `look`
    Look,
    /// `look at <character>` or `examine <character>`
    Examine {
        /// The character name.
        character: String,
    },
    /// `help`
    Help,
    /// Anything else, echoed back to the player as-is.
    Unrecognized {
        /// The canonical action text.
        text: String,
    },
}

/// Parse a canonical action into a verb and its arguments.
///
/// The verb is the first word and must match exactly; arguments are the rest
/// of the string, untrimmed. A verb missing its argument is unrecognized.
pub fn parse_action(canonical: &str) -> Action {
    let (verb, rest) = canonical.split_once(' ').unwrap_or((canonical, ""));

    let parsed = match verb {
        "go" => non_empty(rest).map(|direction| Action::Go { direction }),
        "take" => non_empty(rest).map(|item| Action::Take { item }),
        "drop" => non_empty(rest).map(|item| Action::Drop { item }),
        "use" => non_empty(rest).map(|item| Action::Use { item }),
        "attack" => non_empty(rest).map(|character| Action::Attack { character }),
        "view" if rest == "inventory" => Some(Action::ViewInventory),
        "talk" => rest
            .strip_prefix("to ")
            .and_then(non_empty)
            .map(|character| Action::TalkTo { character }),
        "ask" => parse_ask(rest),
        "look" if rest.is_empty() => Some(Action::Look),
        "look" => rest
            .strip_prefix("at ")
            .and_then(non_empty)
            .map(|character| Action::Examine { character }),
        "examine" => non_empty(rest).map(|character| Action::Examine { character }),
        "help" if rest.is_empty() => Some(Action::Help),
        _ => None,
    };

    parsed.unwrap_or_else(|| Action::Unrecognized {
        text: canonical.to_string(),
    })
}

/// `<character> about <topic>`, split at the first ` about `.
fn parse_ask(rest: &str) -> Option<Action> {
    let (character, topic) = rest.split_once(" about ")?;
    Some(Action::AskAbout {
        character: non_empty(character)?,
        topic: non_empty(topic)?,
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
