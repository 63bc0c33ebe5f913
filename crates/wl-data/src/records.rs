//! Line-level parsing of the pipe-delimited data files.
//!
//! Every parser is lenient: a missing field becomes an empty string and the
//! problem is returned as an [`Issue`] for the loader to report. The last
//! field of each schema takes the rest of the line, so a `|` inside a
//! description or response is kept.

use std::ops::Range;

/// A non-blank line of a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the line within the file.
    pub offset: usize,
    /// Line text without its terminator.
    pub text: &'a str,
}

impl Line<'_> {
    /// Translate a span within the line into a span within the file.
    pub fn file_span(&self, span: &Range<usize>) -> Range<usize> {
        self.offset + span.start..self.offset + span.end
    }
}

/// Split a file into non-blank lines, dropping `\n` and `\r\n` terminators.
pub fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    source
        .split_inclusive('\n')
        .scan(0, |offset, raw| {
            let start = *offset;
            *offset += raw.len();
            Some((start, raw))
        })
        .enumerate()
        .filter_map(|(i, (offset, raw))| {
            let text = raw.trim_end_matches('\n').trim_end_matches('\r');
            if text.trim().is_empty() {
                None
            } else {
                Some(Line {
                    number: i + 1,
                    offset,
                    text,
                })
            }
        })
}

/// A problem in a single line, with a span relative to the line start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Byte range within the line.
    pub span: Range<usize>,
    /// What is wrong.
    pub message: String,
}

impl Issue {
    fn new(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A parsed record plus whatever was wrong with its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    /// The record, with missing fields defaulted to empty strings.
    pub record: T,
    /// Problems found while parsing.
    pub issues: Vec<Issue>,
    /// Span of the record's key within the line.
    pub key_span: Range<usize>,
}

/// A field of a line and where it sits.
#[derive(Debug, Clone, Copy)]
struct Field<'a> {
    text: &'a str,
    start: usize,
}

impl Field<'_> {
    fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }
}

/// Split `text` into one field per name, separated by `|`.
///
/// The last field takes the rest of the line. Missing fields come back empty
/// and are reported by name.
fn split_fields<'a>(text: &'a str, names: &[&str], issues: &mut Vec<Issue>) -> Vec<Field<'a>> {
    let mut fields = Vec::with_capacity(names.len());
    let mut rest = Some((text, 0));

    for (i, name) in names.iter().enumerate() {
        let last = i + 1 == names.len();
        match rest {
            Some((remaining, start)) => match remaining.find('|') {
                Some(pos) if !last => {
                    fields.push(Field {
                        text: &remaining[..pos],
                        start,
                    });
                    rest = Some((&remaining[pos + 1..], start + pos + 1));
                }
                _ => {
                    fields.push(Field {
                        text: remaining,
                        start,
                    });
                    rest = None;
                }
            },
            None => {
                fields.push(Field {
                    text: "",
                    start: text.len(),
                });
                issues.push(Issue::new(text.len()..text.len(), format!("missing {name}")));
            }
        }
    }

    fields
}

fn require_key(field: &Field<'_>, what: &str, issues: &mut Vec<Issue>) {
    if field.text.is_empty() {
        issues.push(Issue::new(field.span(), format!("{what} is empty")));
    }
}

/// Replace the two-character sequence `\n` with a line break.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// `alias|canonical_action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// What the player types.
    pub alias: String,
    /// What it means.
    pub action: String,
}

/// Parse a line of `actions.txt`.
pub fn parse_action(text: &str) -> Parsed<ActionRecord> {
    let mut issues = Vec::new();
    let f = split_fields(text, &["alias", "canonical action"], &mut issues);
    require_key(&f[0], "alias", &mut issues);

    Parsed {
        record: ActionRecord {
            alias: f[0].text.to_string(),
            action: f[1].text.to_string(),
        },
        issues,
        key_span: f[0].span(),
    }
}

/// An exit parsed out of the third field of a room line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRecord {
    /// Direction token, e.g. `north`.
    pub direction: String,
    /// Destination room name.
    pub destination: String,
    /// Span of the destination within the line.
    pub destination_span: Range<usize>,
}

/// `room_name|description|dir1:dest1,dir2:dest2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    /// Room name.
    pub name: String,
    /// Room description.
    pub description: String,
    /// Outgoing exits in file order.
    pub exits: Vec<ExitRecord>,
}

/// Parse a line of `locations.txt`.
pub fn parse_room(text: &str) -> Parsed<RoomRecord> {
    let mut issues = Vec::new();
    let f = split_fields(text, &["room name", "description", "connections"], &mut issues);
    // a room without connections is a dead end, not an error
    issues.retain(|i| i.message != "missing connections");
    require_key(&f[0], "room name", &mut issues);

    let mut exits = Vec::new();
    let mut start = f[2].start;
    for entry in f[2].text.split(',') {
        let entry_start = start;
        start += entry.len() + 1;
        if entry.is_empty() {
            continue;
        }
        match entry.split_once(':') {
            Some((direction, destination)) => {
                let dest_start = entry_start + direction.len() + 1;
                if destination.is_empty() {
                    issues.push(Issue::new(
                        entry_start..entry_start + entry.len(),
                        format!("connection \"{entry}\" has no destination"),
                    ));
                }
                exits.push(ExitRecord {
                    direction: direction.to_string(),
                    destination: destination.to_string(),
                    destination_span: dest_start..dest_start + destination.len(),
                });
            }
            None => {
                issues.push(Issue::new(
                    entry_start..entry_start + entry.len(),
                    format!("connection \"{entry}\" has no ':' before its destination"),
                ));
                exits.push(ExitRecord {
                    direction: entry.to_string(),
                    destination: String::new(),
                    destination_span: entry_start + entry.len()..entry_start + entry.len(),
                });
            }
        }
    }

    Parsed {
        record: RoomRecord {
            name: f[0].text.to_string(),
            description: f[1].text.to_string(),
            exits,
        },
        issues,
        key_span: f[0].span(),
    }
}

/// `name|description|response`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    /// Character name.
    pub name: String,
    /// What examining them shows.
    pub description: String,
    /// What they say when spoken to.
    pub response: String,
}

/// Parse a line of `characters.txt`.
pub fn parse_character(text: &str) -> Parsed<CharacterRecord> {
    let mut issues = Vec::new();
    let f = split_fields(text, &["name", "description", "response"], &mut issues);
    require_key(&f[0], "character name", &mut issues);

    Parsed {
        record: CharacterRecord {
            name: f[0].text.to_string(),
            description: f[1].text.to_string(),
            response: f[2].text.to_string(),
        },
        issues,
        key_span: f[0].span(),
    }
}

/// `name|topic|response`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    /// Character being asked.
    pub character: String,
    /// What they are asked about.
    pub topic: String,
    /// Their answer.
    pub response: String,
}

/// Parse a line of `topics.txt`.
pub fn parse_topic(text: &str) -> Parsed<TopicRecord> {
    let mut issues = Vec::new();
    let f = split_fields(text, &["name", "topic", "response"], &mut issues);
    require_key(&f[0], "character name", &mut issues);
    require_key(&f[1], "topic", &mut issues);

    Parsed {
        record: TopicRecord {
            character: f[0].text.to_string(),
            topic: f[1].text.to_string(),
            response: unescape(f[2].text),
        },
        issues,
        key_span: f[0].start..f[1].start + f[1].text.len(),
    }
}

/// `name|victory|defeat`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatRecord {
    /// Character whose defeat ends the game.
    pub character: String,
    /// Narration when the player wins.
    pub victory: String,
    /// Narration when the player loses.
    pub defeat: String,
}

/// Parse a line of `combat.txt`.
pub fn parse_combat(text: &str) -> Parsed<CombatRecord> {
    let mut issues = Vec::new();
    let f = split_fields(text, &["name", "victory text", "defeat text"], &mut issues);
    require_key(&f[0], "character name", &mut issues);

    Parsed {
        record: CombatRecord {
            character: f[0].text.to_string(),
            victory: unescape(f[1].text),
            defeat: unescape(f[2].text),
        },
        issues,
        key_span: f[0].span(),
    }
}
