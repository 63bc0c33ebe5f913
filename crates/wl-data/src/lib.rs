//! Loader for Wonderland's data directory.
//!
//! A data directory holds pipe-delimited text files: `actions.txt`,
//! `locations.txt` and `characters.txt`, plus the optional `topics.txt` and
//! `combat.txt`. Loading never panics and always produces usable tables.
//! What it does with bad input depends on [`LoadMode`]: tolerant loading
//! fills in empty strings and reports warnings, strict loading reports the
//! same problems as errors so callers can refuse to start.

/// Diagnostics with source spans and ariadne rendering.
pub mod diagnostics;
/// Error types for loading.
pub mod error;
/// Line-level record parsers.
pub mod records;
mod validate;

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use wl_core::{Character, CharacterRegistry, CombatRule, CommandTable, Room, WlError, WorldGraph};
use wl_core::world::DEFAULT_START_ROOM;

pub use diagnostics::{Diagnostic, Severity};
pub use error::{DataError, DataResult};

use records::{Line, Parsed};
use validate::{Reference, Target};

/// One of the files a data directory may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataFile {
    /// `alias|canonical_action`
    Actions,
    /// `room|description|dir:dest,...`
    Locations,
    /// `name|description|response`
    Characters,
    /// `name|topic|response`
    Topics,
    /// `name|victory|defeat`
    Combat,
}

impl DataFile {
    /// Every data file, in load order.
    pub const ALL: [DataFile; 5] = [
        Self::Actions,
        Self::Locations,
        Self::Characters,
        Self::Topics,
        Self::Combat,
    ];

    /// File name within the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Actions => "actions.txt",
            Self::Locations => "locations.txt",
            Self::Characters => "characters.txt",
            Self::Topics => "topics.txt",
            Self::Combat => "combat.txt",
        }
    }

    /// Optional files fall back to built-in defaults when absent.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::Topics | Self::Combat)
    }
}

/// How to treat malformed or missing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Fill in defaults and report warnings.
    #[default]
    Tolerant,
    /// Report errors; [`LoadResult::into_tables`] refuses to continue.
    Strict,
}

/// Options for a load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Tolerant or strict handling of bad data.
    pub mode: LoadMode,
    /// Room the player starts in.
    pub start_room: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mode: LoadMode::Tolerant,
            start_room: DEFAULT_START_ROOM.to_string(),
        }
    }
}

impl LoadOptions {
    /// Set the load mode.
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the start room.
    pub fn with_start_room(mut self, room: impl Into<String>) -> Self {
        self.start_room = room.into();
        self
    }

    fn severity(&self) -> Severity {
        match self.mode {
            LoadMode::Tolerant => Severity::Warning,
            LoadMode::Strict => Severity::Error,
        }
    }
}

/// Raw contents of a data directory, keyed by file.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    files: BTreeMap<DataFile, String>,
}

impl Sources {
    /// No files at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file's contents (builder style).
    pub fn with(mut self, file: DataFile, content: impl Into<String>) -> Self {
        self.files.insert(file, content.into());
        self
    }

    /// Contents of a file, if present.
    pub fn get(&self, file: DataFile) -> Option<&str> {
        self.files.get(&file).map(String::as_str)
    }
}

/// Everything a session needs, built from a data directory.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// Alias lookup.
    pub commands: CommandTable,
    /// Rooms, with the player at the start room.
    pub world: WorldGraph,
    /// Characters, topics, and combat rules.
    pub characters: CharacterRegistry,
}

/// The result of loading: tables plus diagnostics.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The tables, always usable even when errors were reported.
    pub tables: Tables,
    /// Everything worth telling the author, in file order.
    pub diagnostics: Vec<Diagnostic>,
    /// File contents, for rendering diagnostics.
    pub sources: Sources,
    /// Where the data came from.
    pub dir: PathBuf,
    dir_missing: bool,
}

impl LoadResult {
    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// Diagnostics belonging to one file.
    pub fn diagnostics_for(&self, file: &str) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.file == file)
            .cloned()
            .collect()
    }

    /// Take the tables, failing if any error was reported.
    pub fn into_tables(self) -> DataResult<Tables> {
        if self.dir_missing && self.has_errors() {
            return Err(DataError::NoDirectory { dir: self.dir });
        }
        if let Some(first) = self.diagnostics.iter().find(|d| d.is_error()) {
            return Err(DataError::Invalid {
                first: first.to_string(),
                count: self.error_count(),
                dir: self.dir,
            });
        }
        Ok(self.tables)
    }
}

/// Read and load every data file in `dir`.
pub fn load_dir(dir: &Path, options: &LoadOptions) -> LoadResult {
    let mut sources = Sources::new();
    let mut read_errors = Vec::new();

    let dir_missing = !dir.is_dir();
    if dir_missing {
        read_errors.push(Diagnostic::new(
            options.severity(),
            dir.display().to_string(),
            0..0,
            "data directory not found",
        ));
    } else {
        for file in DataFile::ALL {
            match std::fs::read_to_string(dir.join(file.file_name())) {
                Ok(content) => sources = sources.with(file, content),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => read_errors.push(Diagnostic::new(
                    options.severity(),
                    file.file_name(),
                    0..0,
                    format!("cannot read file: {e}"),
                )),
            }
        }
    }

    let mut result = load_sources(sources, options);
    result.dir = dir.to_path_buf();
    result.dir_missing = dir_missing;
    read_errors.append(&mut result.diagnostics);
    result.diagnostics = read_errors;
    result
}

/// Build tables from in-memory file contents.
pub fn load_sources(sources: Sources, options: &LoadOptions) -> LoadResult {
    let mut loader = Loader {
        options,
        diagnostics: Vec::new(),
        references: Vec::new(),
    };

    let commands = loader.load_actions(sources.get(DataFile::Actions));
    let world = loader.load_locations(sources.get(DataFile::Locations));
    let mut characters = loader.load_characters(sources.get(DataFile::Characters));
    loader.load_topics(sources.get(DataFile::Topics), &mut characters);
    loader.load_combat(sources.get(DataFile::Combat), &mut characters);

    let mut diagnostics = loader.diagnostics;
    diagnostics.extend(validate::validate(
        &world,
        &characters,
        &loader.references,
        &options.start_room,
        DataFile::Locations.file_name(),
        options.mode,
    ));

    tracing::info!(
        aliases = commands.len(),
        rooms = world.room_count(),
        characters = characters.len(),
        diagnostics = diagnostics.len(),
        "data loaded"
    );

    LoadResult {
        tables: Tables {
            commands,
            world,
            characters,
        },
        diagnostics,
        sources,
        dir: PathBuf::from("."),
        dir_missing: false,
    }
}

/// Per-load state: options, collected diagnostics and cross-references.
struct Loader<'o> {
    options: &'o LoadOptions,
    diagnostics: Vec<Diagnostic>,
    references: Vec<Reference>,
}

impl Loader<'_> {
    /// Report a problem at the mode's severity.
    fn report(&mut self, file: DataFile, line: &Line<'_>, span: std::ops::Range<usize>, message: String) {
        self.diagnostics.push(
            Diagnostic::new(self.options.severity(), file.file_name(), line.file_span(&span), message)
                .at_line(line.number),
        );
    }

    fn report_issues<T>(&mut self, file: DataFile, line: &Line<'_>, parsed: &Parsed<T>) {
        for issue in &parsed.issues {
            self.report(file, line, issue.span.clone(), issue.message.clone());
        }
    }

    /// Report a key seen twice. Strict: the duplicate error; tolerant: a note
    /// that the later line wins.
    fn report_duplicate(&mut self, file: DataFile, line: &Line<'_>, span: std::ops::Range<usize>, err: WlError) {
        let message = match self.options.mode {
            LoadMode::Strict => err.to_string(),
            LoadMode::Tolerant => format!("{err}; the later definition wins"),
        };
        self.report(file, line, span, message);
    }

    /// Missing required files are reported; optional ones are not.
    fn missing(&mut self, file: DataFile) {
        tracing::debug!(file = file.file_name(), "data file not present");
        if !file.is_optional() {
            self.diagnostics.push(Diagnostic::new(
                self.options.severity(),
                file.file_name(),
                0..0,
                "file not found; the table is empty",
            ));
        }
    }

    fn load_actions(&mut self, source: Option<&str>) -> CommandTable {
        let file = DataFile::Actions;
        let mut table = CommandTable::new();
        let Some(source) = source else {
            self.missing(file);
            return table;
        };

        for line in records::lines(source) {
            let parsed = records::parse_action(line.text);
            self.report_issues(file, &line, &parsed);
            let record = parsed.record;
            if let Err(err) = table.insert_unique(record.alias.clone(), record.action.clone()) {
                self.report_duplicate(file, &line, parsed.key_span, err);
                table.insert(record.alias, record.action);
            }
        }

        tracing::debug!(file = file.file_name(), count = table.len(), "loaded");
        table
    }

    fn load_locations(&mut self, source: Option<&str>) -> WorldGraph {
        let file = DataFile::Locations;
        let mut world = WorldGraph::new(self.options.start_room.clone());
        let Some(source) = source else {
            self.missing(file);
            return world;
        };

        for line in records::lines(source) {
            let parsed = records::parse_room(line.text);
            self.report_issues(file, &line, &parsed);
            let record = parsed.record;

            let mut room = Room::new(record.name, record.description);
            for exit in record.exits {
                if !exit.destination.is_empty() {
                    self.references.push(Reference {
                        file: file.file_name(),
                        line: line.number,
                        span: line.file_span(&exit.destination_span),
                        name: exit.destination.clone(),
                        target: Target::Room,
                    });
                }
                room.exits.insert(exit.direction, exit.destination);
            }

            if let Err(err) = world.add_room(room.clone()) {
                self.report_duplicate(file, &line, parsed.key_span, err);
                world.merge_room(room);
            }
        }

        tracing::debug!(file = file.file_name(), count = world.room_count(), "loaded");
        world
    }

    fn load_characters(&mut self, source: Option<&str>) -> CharacterRegistry {
        let file = DataFile::Characters;
        let mut registry = CharacterRegistry::new();
        let Some(source) = source else {
            self.missing(file);
            return registry;
        };

        for line in records::lines(source) {
            let parsed = records::parse_character(line.text);
            self.report_issues(file, &line, &parsed);
            let record = parsed.record;
            let character = Character::new(record.name, record.description, record.response);
            if let Err(err) = registry.add_unique(character.clone()) {
                self.report_duplicate(file, &line, parsed.key_span, err);
                registry.add(character);
            }
        }

        tracing::debug!(file = file.file_name(), count = registry.len(), "loaded");
        registry
    }

    fn load_topics(&mut self, source: Option<&str>, registry: &mut CharacterRegistry) {
        let file = DataFile::Topics;
        let Some(source) = source else {
            self.missing(file);
            *registry = std::mem::take(registry).with_default_topics();
            return;
        };

        for line in records::lines(source) {
            let parsed = records::parse_topic(line.text);
            self.report_issues(file, &line, &parsed);
            let record = parsed.record;
            self.reference_character(file, &line, parsed.key_span.clone(), &record.character);
            let added = registry.add_topic_unique(
                record.character.clone(),
                record.topic.clone(),
                record.response.clone(),
            );
            if let Err(err) = added {
                self.report_duplicate(file, &line, parsed.key_span, err);
                registry.add_topic(record.character, record.topic, record.response);
            }
        }
    }

    fn load_combat(&mut self, source: Option<&str>, registry: &mut CharacterRegistry) {
        let file = DataFile::Combat;
        let Some(source) = source else {
            self.missing(file);
            *registry = std::mem::take(registry).with_default_combat();
            return;
        };

        for line in records::lines(source) {
            let parsed = records::parse_combat(line.text);
            self.report_issues(file, &line, &parsed);
            let record = parsed.record;
            self.reference_character(file, &line, parsed.key_span.clone(), &record.character);
            let rule = CombatRule::new(record.character, record.victory, record.defeat);
            if let Err(err) = registry.add_combat_rule_unique(rule.clone()) {
                self.report_duplicate(file, &line, parsed.key_span, err);
                registry.add_combat_rule(rule);
            }
        }
    }

    fn reference_character(
        &mut self,
        file: DataFile,
        line: &Line<'_>,
        key_span: std::ops::Range<usize>,
        name: &str,
    ) {
        if name.is_empty() {
            return;
        }
        self.references.push(Reference {
            file: file.file_name(),
            line: line.number,
            span: line.file_span(&key_span),
            name: name.to_string(),
            target: Target::Character,
        });
    }
}
