use std::fmt;

use crate::Position;

/// The number of characters after the failure offset that are shown in an error message
const PREVIEW_LENGTH: usize = 12;

/// Why a parse did not succeed
///
/// Always describes the furthest point the parser reached, see [Tracker](crate::Tracker).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset of the failure
    pub offset: usize,

    /// [offset](Self::offset), counted in characters instead of bytes
    pub character: usize,

    /// What the parser expected to see at [offset](Self::offset)
    pub expected: String,

    /// [offset](Self::offset), as a row and column
    pub position: Position,

    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(input: &str, offset: usize, expected: &str) -> Self {
        let character = input
            .get(..offset)
            .map_or_else(|| input.chars().count(), |consumed| consumed.chars().count());

        Self {
            offset,
            character,
            expected: expected.to_owned(),
            position: Position::resolve(input, offset),
            message: format_message(input, offset, character, expected),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

/// Mistakes in the construction of a grammar
///
/// These are never caused by the input being parsed.
#[derive(Debug, error_derive::Error)]
pub enum GrammarError {
    #[msg = "pattern could not be compiled"]
    InvalidPattern(regex::Error),

    #[msg = "repetition needs at least {min} but at most {max} matches"]
    InvertedRepetition { min: usize, max: usize },
}

fn format_message(input: &str, offset: usize, character: usize, expected: &str) -> String {
    let Some(rest) = input.get(offset..).filter(|rest| !rest.is_empty()) else {
        return format!("expected {expected}, got the end of the string\n    parsing: '{input}'");
    };

    let prefix = if offset > 0 { "..." } else { "" };
    let preview_end = rest
        .char_indices()
        .nth(PREVIEW_LENGTH)
        .map_or(rest.len(), |(index, _)| index);
    let suffix = if preview_end < rest.len() { "..." } else { "" };

    format!(
        "expected {expected} at character {character}, got '{prefix}{preview}{suffix}'\n    parsing: '{input}'",
        preview = &rest[..preview_end]
    )
}
