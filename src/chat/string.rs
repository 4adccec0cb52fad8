//! Structured chat strings
//!
//! The host delivers sender names and message bodies as sequences of typed
//! pieces. `ChatString` flattens them into an immutable sequence of
//! player-reference and plain-text segments, suppressing the redundant text
//! echoes the host emits around player links.

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// One typed piece of a raw host payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPiece {
    /// Plain text run
    Text(String),
    /// Link to a player with their home world
    Player { name: String, world: String },
    /// Auto-translate phrase, already rendered to text by the host
    AutoTranslate(String),
}

/// One segment of a parsed chat string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Player { name: String, world: String },
    Text(String),
}

/// An ordered sequence of player-reference and plain-text segments.
/// Immutable after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatString {
    segments: Vec<Segment>,
}

/// Parser state while scanning the raw pieces.
///
/// A player link is followed by a redundant plain-text echo of the name and,
/// for cross-world players, the home world. The states track how much of
/// that echo is still expected.
enum ParseState {
    Nothing,
    LookingForName,
    LookingForWorld,
}

impl ChatString {
    /// Parse the raw host pieces into a segment sequence.
    pub fn parse(pieces: Vec<ChatPiece>) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut state = ParseState::Nothing;
        let mut pending: Option<(String, String)> = None;

        for piece in pieces {
            match piece {
                ChatPiece::Player { name, world } => {
                    pending = Some((name.clone(), world.clone()));
                    segments.push(Segment::Player { name, world });
                    state = ParseState::LookingForName;
                }
                ChatPiece::AutoTranslate(text) => {
                    push_text(&mut segments, replace_special_chars(&text));
                    state = ParseState::Nothing;
                }
                ChatPiece::Text(text) => {
                    let mut text = replace_special_chars(&text);
                    match state {
                        ParseState::LookingForName => {
                            let is_echo = pending
                                .as_ref()
                                .is_some_and(|(name, _)| text == *name || text.ends_with(name));
                            if is_echo {
                                state = ParseState::LookingForWorld;
                                continue;
                            }
                            state = ParseState::Nothing;
                            push_text(&mut segments, text);
                        }
                        ParseState::LookingForWorld => {
                            if let Some((_, world)) = &pending {
                                if let Some(rest) = text.strip_prefix(world.as_str()) {
                                    text = rest.to_string();
                                }
                            }
                            state = ParseState::Nothing;
                            push_text(&mut segments, text);
                        }
                        ParseState::Nothing => push_text(&mut segments, text),
                    }
                }
            }
        }

        Self { segments }
    }

    /// A single-segment string from plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut segments = Vec::new();
        push_text(&mut segments, replace_special_chars(&text.into()));
        Self { segments }
    }

    /// A single-segment string from a player reference.
    pub fn from_player(name: impl Into<String>, world: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Player {
                name: name.into(),
                world: world.into(),
            }],
        }
    }

    /// True when the first segment is a player reference, i.e. the string
    /// identifies who is speaking.
    pub fn starts_with_player(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::Player { .. }))
    }

    /// Render all segments as text. A player segment renders as `Name` or
    /// `Name@World` depending on `include_world`.
    pub fn as_text(&self, include_world: bool) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Player { name, world } => {
                    out.push_str(name);
                    if include_world && !world.is_empty() {
                        out.push('@');
                        out.push_str(world);
                    }
                }
                Segment::Text(text) => out.push_str(text),
            }
        }
        out
    }
}

fn push_text(segments: &mut Vec<Segment>, text: String) {
    if !text.trim().is_empty() {
        segments.push(Segment::Text(text));
    }
}

// =============================================================================
// Private-use-area replacement
// =============================================================================

/// Private-use-area range the host uses for icons and markup.
const PUA_START: char = '\u{E000}';
const PUA_END: char = '\u{F8FF}';

/// Readable replacements for the host's private-use-area characters.
static SPECIAL_CHARS: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    HashMap::from([
        ('\u{E03C}', '\u{2747}'), // clickable-link marker
        ('\u{E040}', '\u{00AB}'), // auto-translate open
        ('\u{E041}', '\u{00BB}'), // auto-translate close
        ('\u{E05D}', '\u{2606}'), // party-member star
        ('\u{E06F}', '\u{21D2}'), // prompt arrow
        ('\u{E0BB}', '\u{2192}'), // item-link arrow
    ])
});

/// Replace mapped private-use-area characters with readable equivalents.
/// Unmapped characters in the range pass through unchanged.
pub(crate) fn replace_special_chars(text: &str) -> String {
    text.chars()
        .map(|c| {
            if (PUA_START..=PUA_END).contains(&c) {
                match SPECIAL_CHARS.get(&c) {
                    Some(replacement) => *replacement,
                    None => {
                        debug!(code = c as u32, "unmapped private-use character");
                        c
                    }
                }
            } else {
                c
            }
        })
        .collect()
}
