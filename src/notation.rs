//! Move command parsing.
//!
//! Commands look like `e2 e4`, optionally followed by a promotion letter
//! (`e7 e8 n`) and/or the draw marker (`e2 e4 draw?`). The literal
//! `resign` is recognised by the game controller before parsing.

use crate::types::*;
use std::error::Error;
use std::fmt;

/// Literal command that resigns the game for the side to move.
pub const RESIGN: &str = "resign";

/// Trailing marker that turns a move into a draw request.
pub const DRAW_MARKER: &str = "draw?";

/// Reasons a move command could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Nothing but whitespace was supplied.
    Empty,
    /// Expected two or three whitespace-separated tokens.
    TokenCount(usize),
    /// A token is not a square label between `a1` and `h8`.
    InvalidSquare(String),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "empty move command"),
            NotationError::TokenCount(n) => {
                write!(f, "expected 2 or 3 tokens like 'e2 e4 [q]', got {}", n)
            }
            NotationError::InvalidSquare(token) => write!(f, "invalid square '{}'", token),
        }
    }
}

impl Error for NotationError {}

/// Parses a square label such as `e4`.
pub fn parse_square(token: &str) -> Result<Square, NotationError> {
    Square::from_algebraic(token).ok_or_else(|| NotationError::InvalidSquare(token.to_string()))
}

/// Parses a promotion letter, case-insensitively.
///
/// Anything other than `r`, `n` or `b` yields a queen.
pub fn parse_promotion(token: &str) -> PieceKind {
    match token.to_ascii_uppercase().as_str() {
        "R" => PieceKind::Rook,
        "N" => PieceKind::Knight,
        "B" => PieceKind::Bishop,
        _ => PieceKind::Queen,
    }
}

/// Splits off a trailing draw marker. Returns the remaining command and
/// whether the marker was present.
///
/// The marker only counts as its own whitespace-separated token; `e4draw?`
/// is left in place and fails to parse as a square.
pub fn strip_draw_request(input: &str) -> (&str, bool) {
    let trimmed = input.trim();
    match trimmed.strip_suffix(DRAW_MARKER) {
        Some(rest) if rest.is_empty() || rest.ends_with(char::is_whitespace) => {
            (rest.trim_end(), true)
        }
        _ => (trimmed, false),
    }
}

/// Parses `<from> <to> [promotion]` into a [`MoveRequest`].
pub fn parse_move_command(text: &str) -> Result<MoveRequest, NotationError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(NotationError::Empty),
        [from, to] => Ok(MoveRequest::simple(parse_square(from)?, parse_square(to)?)),
        [from, to, promo] => Ok(MoveRequest {
            from: parse_square(from)?,
            to: parse_square(to)?,
            promotion: Some(parse_promotion(promo)),
        }),
        _ => Err(NotationError::TokenCount(tokens.len())),
    }
}
