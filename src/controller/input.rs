//! Parsing of menu choices and selection lists

use crate::error::FinderError;

use super::Phase;

/// What the user asked for at a selection prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Clear,
    /// Zero-based positions into the displayed list
    Indices(Vec<usize>),
}

pub const CLEAR_TOKEN: &str = "clear";

pub fn parse_menu_choice(input: &str) -> Option<Phase> {
    match input.trim() {
        "1" => Some(Phase::SelectGenre),
        "2" => Some(Phase::SelectArtist),
        "3" => Some(Phase::SelectTrack),
        "4" => Some(Phase::Recommend),
        "5" => Some(Phase::Quit),
        _ => None,
    }
}

/// Parse a comma-delimited list of 1-based indices into a list of `len`
/// items. A `clear` token anywhere in the list wins.
pub fn parse_selection(input: &str, len: usize) -> Result<Selection, FinderError> {
    let tokens: Vec<&str> = input.split(',').map(str::trim).collect();
    if tokens.iter().any(|t| t.eq_ignore_ascii_case(CLEAR_TOKEN)) {
        return Ok(Selection::Clear);
    }

    tokens
        .into_iter()
        .map(|token| parse_index(token, len))
        .collect::<Result<Vec<_>, _>>()
        .map(Selection::Indices)
}

/// A single 1-based index into a list of `len` items.
pub fn parse_index(token: &str, len: usize) -> Result<usize, FinderError> {
    let token = token.trim();
    match token.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(FinderError::InvalidSelection(token.to_string())),
    }
}

pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
