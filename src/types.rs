//! Core types for the chess rules engine.
//!
//! This module defines the board model (colors, pieces, squares and the
//! 8×8 grid) together with the request and response values exchanged with
//! the game controller. Squares use the row/column convention of the
//! engine: row 0 is rank 8 and column 0 is file `a`, so White pawns travel
//! towards decreasing rows.

use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Piece & Color
// ---------------------------------------------------------------------------

/// Represents the color (side) of a chess piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The White side (starts on rows 6 and 7, ranks 2 and 1).
    White,
    /// The Black side (starts on rows 0 and 1, ranks 8 and 7).
    Black,
}

impl Color {
    /// Returns the opposite color.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the row pawns of this color start on.
    pub fn pawn_home_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Returns the row delta of a forward pawn step: -1 for White, +1 for Black.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the row holding this side's king and rooks at game start.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Single-letter prefix used in piece codes (`W` or `B`).
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Represents a chess piece type (without color information).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Uppercase letter for this kind (`P R N B Q K`).
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parses a kind letter, ignoring case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A chess piece with both kind and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a new piece.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Converts the piece to its FEN character representation.
    /// Uppercase for White, lowercase for Black.
    pub fn to_fen_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN character into a `Piece`.
    /// Returns `None` if the character is not a valid piece symbol.
    pub fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::from_letter(c).map(|kind| Piece { kind, color })
    }

    /// Two-letter code used in responses, e.g. `WK` or `BP`.
    pub fn code(self) -> String {
        format!("{}{}", self.color.letter(), self.kind.letter())
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the board, addressed by 0-based row and column.
///
/// - `row`: 0 (rank 8) to 7 (rank 1)
/// - `col`: 0 (file a) to 7 (file h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Creates a new square from 0-based row and column.
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "Square out of bounds");
        Self { row, col }
    }

    /// Parses an algebraic label (e.g. "e4") into a `Square`.
    /// Returns `None` for invalid input.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if col < 8 && rank < 8 {
            Some(Square { row: 7 - rank, col })
        } else {
            None
        }
    }

    /// Converts the square to its algebraic label (e.g. "e4").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// File letter, `a` through `h`.
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number, 1 through 8.
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// Returns a new square offset by `(dr, dc)`, or `None` if off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        if (0..8).contains(&r) && (0..8).contains(&c) {
            Some(Square::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// All 64 squares in row-major order (a8, b8, … h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The chess board as an 8×8 grid indexed `[row][col]`.
///
/// Each cell is `Option<Piece>`; `None` means the square is empty. Cloning
/// a board yields a fully independent copy, which is what the self-check
/// simulation relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    /// Returns an empty board.
    fn default() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }
}

impl Board {
    /// Returns the piece at the given square, if any.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    /// Sets (or clears) the piece at the given square.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Removes and returns the piece at the given square.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize].take()
    }

    /// Returns `true` if the square holds a piece of `color`.
    pub fn is_color(&self, sq: Square, color: Color) -> bool {
        matches!(self.get(sq), Some(p) if p.color == color)
    }

    /// Creates the standard starting position.
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::default();
        for color in [Color::White, Color::Black] {
            let back = color.back_row();
            let pawns = color.pawn_home_row();
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.set(Square::new(back, col as u8), Some(Piece::new(*kind, color)));
                board.set(
                    Square::new(pawns, col as u8),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        board
    }

    /// Builds a board from `(label, fen_char)` pairs, e.g. `("e1", 'K')`.
    pub fn from_placement(placement: &[(&str, char)]) -> Result<Self, String> {
        let mut board = Board::default();
        for &(label, ch) in placement {
            let sq = Square::from_algebraic(label)
                .ok_or_else(|| format!("Invalid square: {}", label))?;
            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece symbol '{}' on {}", ch, label))?;
            board.set(sq, Some(piece));
        }
        Ok(board)
    }

    /// Iterates over occupied squares in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Finds the king square for the given color.
    /// Returns `None` if no such king is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// Describes every occupied square, for responses.
    pub fn snapshot(&self) -> Vec<PieceDescriptor> {
        self.occupied()
            .map(|(sq, piece)| PieceDescriptor {
                file: sq.file(),
                rank: sq.rank(),
                piece: piece.code(),
            })
            .collect()
    }
}

impl fmt::Display for Board {
    /// Plain placement diagram, rank 8 first, `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self
                    .get(Square::new(row, col))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

// ---------------------------------------------------------------------------
// Requests & responses
// ---------------------------------------------------------------------------

/// A parsed move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Requested promotion kind; a promoting pawn becomes a queen when absent.
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    /// Creates a request without a promotion choice.
    pub fn simple(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, " {}", kind.letter())?;
        }
        Ok(())
    }
}

/// Classification of a processed move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move applied; nothing notable about the resulting position.
    Ongoing,
    /// Move applied and the opponent's king is attacked.
    Check,
    /// Move applied and the opponent has no escape.
    Checkmate { winner: Color },
    /// The side to move resigned.
    Resign { winner: Color },
    /// Move applied together with a draw request.
    Draw,
    /// Request refused; board and turn unchanged.
    IllegalMove,
}

impl MoveOutcome {
    /// Wire code for the outcome.
    pub fn code(self) -> &'static str {
        match self {
            MoveOutcome::Ongoing => "none",
            MoveOutcome::Check => "check",
            MoveOutcome::Checkmate { winner: Color::White } => "checkmate_white_wins",
            MoveOutcome::Checkmate { winner: Color::Black } => "checkmate_black_wins",
            MoveOutcome::Resign { winner: Color::White } => "resign_white_wins",
            MoveOutcome::Resign { winner: Color::Black } => "resign_black_wins",
            MoveOutcome::Draw => "draw",
            MoveOutcome::IllegalMove => "illegal_move",
        }
    }

    /// Returns the winning side for checkmate and resignation outcomes.
    pub fn winner(self) -> Option<Color> {
        match self {
            MoveOutcome::Checkmate { winner } | MoveOutcome::Resign { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Ongoing => write!(f, "Move played"),
            MoveOutcome::Check => write!(f, "Check"),
            MoveOutcome::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            MoveOutcome::Resign { winner } => write!(f, "Resignation, {} wins", winner),
            MoveOutcome::Draw => write!(f, "Draw"),
            MoveOutcome::IllegalMove => write!(f, "Illegal move"),
        }
    }
}

impl Serialize for MoveOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One occupied square in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceDescriptor {
    /// File letter, `a` to `h`.
    pub file: char,
    /// Rank number, 1 to 8.
    pub rank: u8,
    /// Color letter followed by kind letter, e.g. `WQ`.
    pub piece: String,
}

/// Result of one move request: the board after it and its classification.
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse {
    pub pieces: Vec<PieceDescriptor>,
    pub outcome: MoveOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_labels_round_trip() {
        let mut seen = HashSet::new();
        for file in 'a'..='h' {
            for rank in 1..=8 {
                let label = format!("{}{}", file, rank);
                let sq = Square::from_algebraic(&label).unwrap();
                assert!(sq.row < 8 && sq.col < 8);
                assert_eq!(sq.to_algebraic(), label);
                assert!(seen.insert(sq), "{} parsed to a duplicate square", label);
            }
        }
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn test_label_orientation() {
        assert_eq!(Square::from_algebraic("a8"), Some(Square::new(0, 0)));
        assert_eq!(Square::from_algebraic("h1"), Some(Square::new(7, 7)));
        assert_eq!(Square::from_algebraic("e2"), Some(Square::new(6, 4)));
    }

    #[test]
    fn test_invalid_labels() {
        for label in ["", "e", "e9", "i1", "e0", "E2", "e22"] {
            assert!(Square::from_algebraic(label).is_none(), "{} should not parse", label);
        }
    }

    #[test]
    fn test_starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.find_king(Color::White), Square::from_algebraic("e1"));
        assert_eq!(board.find_king(Color::Black), Square::from_algebraic("e8"));
        assert_eq!(
            board.get(Square::from_algebraic("d1").unwrap()),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            board.get(Square::from_algebraic("g7").unwrap()),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }

    #[test]
    fn test_clone_does_not_alias() {
        let board = Board::starting_position();
        let mut copy = board.clone();
        copy.take(Square::from_algebraic("e2").unwrap());
        assert!(board.get(Square::from_algebraic("e2").unwrap()).is_some());
        assert!(copy.get(Square::from_algebraic("e2").unwrap()).is_none());
    }

    #[test]
    fn test_from_placement_rejects_bad_input() {
        assert!(Board::from_placement(&[("z9", 'K')]).is_err());
        assert!(Board::from_placement(&[("e1", 'X')]).is_err());
    }

    #[test]
    fn test_snapshot_codes() {
        let board = Board::from_placement(&[("e1", 'K'), ("d8", 'q')]).unwrap();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&PieceDescriptor {
            file: 'e',
            rank: 1,
            piece: "WK".to_string()
        }));
        assert!(snapshot.contains(&PieceDescriptor {
            file: 'd',
            rank: 8,
            piece: "BQ".to_string()
        }));
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(MoveOutcome::Ongoing.code(), "none");
        assert_eq!(
            MoveOutcome::Checkmate { winner: Color::Black }.code(),
            "checkmate_black_wins"
        );
        assert_eq!(
            MoveOutcome::Resign { winner: Color::White }.code(),
            "resign_white_wins"
        );
        assert_eq!(MoveOutcome::Draw.winner(), None);
    }
}
