//! Cross-table checks run after every file has been parsed.

use std::ops::Range;

use strsim::jaro_winkler;
use wl_core::{CharacterRegistry, WorldGraph};

use crate::LoadMode;
use crate::diagnostics::{Diagnostic, Severity};

/// Minimum similarity for a "did you mean" hint (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// What kind of thing a reference names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Room,
    Character,
}

/// A name in one table that should exist in another.
#[derive(Debug, Clone)]
pub(crate) struct Reference {
    pub file: &'static str,
    pub line: usize,
    pub span: Range<usize>,
    pub name: String,
    pub target: Target,
}

/// Check the start room and every recorded reference.
pub(crate) fn validate(
    world: &WorldGraph,
    characters: &CharacterRegistry,
    references: &[Reference],
    start_room: &str,
    locations_file: &'static str,
    mode: LoadMode,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !world.contains(start_room) {
        let severity = match mode {
            LoadMode::Strict => Severity::Error,
            LoadMode::Tolerant => Severity::Warning,
        };
        let mut d = Diagnostic::new(
            severity,
            locations_file,
            0..0,
            format!("start room \"{start_room}\" is not defined"),
        );
        if let Some(hint) = closest(start_room, world.rooms().map(|r| r.name.as_str())) {
            d = d.with_label(format!("did you mean \"{hint}\"?"));
        }
        diagnostics.push(d);
    }

    for reference in references {
        let (known, kind) = match reference.target {
            Target::Room => (world.contains(&reference.name), "room"),
            Target::Character => (characters.get(&reference.name).is_some(), "character"),
        };
        if known {
            continue;
        }

        let mut d = Diagnostic::warning(
            reference.file,
            reference.span.clone(),
            format!("unknown {kind} \"{}\"", reference.name),
        )
        .at_line(reference.line);

        let hint = match reference.target {
            Target::Room => closest(&reference.name, world.rooms().map(|r| r.name.as_str())),
            Target::Character => closest(
                &reference.name,
                characters.characters().map(|c| c.name.as_str()),
            ),
        };
        if let Some(hint) = hint {
            d = d.with_label(format!("did you mean \"{hint}\"?"));
        }
        diagnostics.push(d);
    }

    diagnostics
}

/// The most similar known name above the threshold.
fn closest<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .map(|c| (c, jaro_winkler(name, c)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::{Character, Room};

    fn world() -> WorldGraph {
        let mut world = WorldGraph::new("rabbit hole");
        world.add_room(Room::new("rabbit hole", "")).unwrap();
        world.add_room(Room::new("tea room", "")).unwrap();
        world
    }

    fn reference(name: &str, target: Target) -> Reference {
        Reference {
            file: "locations.txt",
            line: 1,
            span: 0..name.len(),
            name: name.to_string(),
            target,
        }
    }

    #[test]
    fn clean_world_has_no_diagnostics() {
        let refs = [reference("tea room", Target::Room)];
        let diags = validate(
            &world(),
            &CharacterRegistry::new(),
            &refs,
            "rabbit hole",
            "locations.txt",
            LoadMode::Strict,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn missing_start_room_depends_on_mode() {
        let registry = CharacterRegistry::new();
        let strict = validate(&world(), &registry, &[], "rabit hole", "locations.txt", LoadMode::Strict);
        assert_eq!(strict.len(), 1);
        assert!(strict[0].is_error());
        assert_eq!(strict[0].label.as_deref(), Some("did you mean \"rabbit hole\"?"));

        let tolerant = validate(&world(), &registry, &[], "attic", "locations.txt", LoadMode::Tolerant);
        assert_eq!(tolerant.len(), 1);
        assert!(!tolerant[0].is_error());
        assert!(tolerant[0].label.is_none());
    }

    #[test]
    fn dangling_exit_is_a_warning_with_hint() {
        let refs = [reference("tea rom", Target::Room)];
        let diags = validate(
            &world(),
            &CharacterRegistry::new(),
            &refs,
            "rabbit hole",
            "locations.txt",
            LoadMode::Strict,
        );
        assert_eq!(diags.len(), 1);
        assert!(!diags[0].is_error());
        assert_eq!(diags[0].message, "unknown room \"tea rom\"");
        assert_eq!(diags[0].label.as_deref(), Some("did you mean \"tea room\"?"));
    }

    #[test]
    fn unknown_character_reference() {
        let mut registry = CharacterRegistry::new();
        registry.add(Character::new("mad hatter", "", ""));
        let refs = [
            reference("mad hatter", Target::Character),
            reference("mad hater", Target::Character),
        ];
        let diags = validate(&world(), &registry, &refs, "rabbit hole", "locations.txt", LoadMode::Tolerant);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unknown character"));
    }
}
