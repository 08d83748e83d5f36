//! Move execution, including castling and pawn promotion.
//!
//! Moves reaching this module have already been validated; execution only
//! decides which of the three relocation shapes applies.

use crate::types::*;
use std::fmt;

/// How a move was carried out on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Plain relocation, capturing whatever stood on the destination.
    Plain,
    /// King moved two files; the rook jumped from `rook_from` to `rook_to`.
    Castle { rook_from: Square, rook_to: Square },
    /// Pawn replaced by a piece of the given kind.
    Promotion(PieceKind),
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applied::Plain => write!(f, "plain move"),
            Applied::Castle { rook_from, rook_to } => {
                write!(f, "castling, rook {} -> {}", rook_from, rook_to)
            }
            Applied::Promotion(kind) => write!(f, "promotion to {:?}", kind),
        }
    }
}

/// A king moving exactly two files along its own row.
pub fn is_castling(piece: Piece, from: Square, to: Square) -> bool {
    piece.kind == PieceKind::King
        && from.row == to.row
        && (to.col as i8 - from.col as i8).abs() == 2
}

/// A pawn arriving on either outermost row.
pub fn is_promotion(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && (to.row == 0 || to.row == 7)
}

/// Applies a move to the board (mutating it).
///
/// A promoting pawn becomes `promotion`, or a queen when none was
/// requested. Returns `None` and leaves the board alone when `from` is
/// empty.
pub fn execute(
    board: &mut Board,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Option<Applied> {
    let piece = board.take(from)?;

    if is_castling(piece, from, to) {
        board.set(to, Some(piece));
        // Kingside: rook h -> f, queenside: rook a -> d
        let (rook_col, landing_col) = if to.col == 6 { (7, 5) } else { (0, 3) };
        let rook_from = Square::new(to.row, rook_col);
        let rook_to = Square::new(to.row, landing_col);
        let rook = board.take(rook_from);
        board.set(rook_to, rook);
        return Some(Applied::Castle { rook_from, rook_to });
    }

    if is_promotion(piece, to) {
        let kind = promotion.unwrap_or(PieceKind::Queen);
        board.set(to, Some(Piece::new(kind, piece.color)));
        return Some(Applied::Promotion(kind));
    }

    board.set(to, Some(piece));
    Some(Applied::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).unwrap()
    }

    #[test]
    fn test_kingside_castle_moves_rook_to_f_file() {
        let mut board = Board::from_placement(&[("e1", 'K'), ("h1", 'R')]).unwrap();
        let applied = execute(&mut board, sq("e1"), sq("g1"), None);
        assert_eq!(
            applied,
            Some(Applied::Castle {
                rook_from: sq("h1"),
                rook_to: sq("f1")
            })
        );
        assert_eq!(board.get(sq("g1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.get(sq("f1")), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert!(board.get(sq("e1")).is_none());
        assert!(board.get(sq("h1")).is_none());
    }

    #[test]
    fn test_queenside_castle_moves_rook_to_d_file() {
        let mut board = Board::from_placement(&[("e8", 'k'), ("a8", 'r')]).unwrap();
        execute(&mut board, sq("e8"), sq("c8"), None);
        assert_eq!(board.get(sq("c8")), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(board.get(sq("d8")), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert!(board.get(sq("a8")).is_none());
        assert!(board.get(sq("e8")).is_none());
    }

    #[test]
    fn test_castling_trigger_shape() {
        let king = Piece::new(PieceKind::King, Color::White);
        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert!(is_castling(king, sq("e1"), sq("g1")));
        assert!(is_castling(king, sq("e1"), sq("c1")));
        assert!(!is_castling(king, sq("e1"), sq("f1")));
        assert!(!is_castling(king, sq("e1"), sq("g2")));
        assert!(!is_castling(rook, sq("e1"), sq("g1")));
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut board = Board::from_placement(&[("b7", 'P')]).unwrap();
        let applied = execute(&mut board, sq("b7"), sq("b8"), None);
        assert_eq!(applied, Some(Applied::Promotion(PieceKind::Queen)));
        assert_eq!(board.get(sq("b8")), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert!(board.get(sq("b7")).is_none());
    }

    #[test]
    fn test_promotion_uses_requested_kind_and_mover_color() {
        let mut board = Board::from_placement(&[("g2", 'p'), ("h1", 'R')]).unwrap();
        execute(&mut board, sq("g2"), sq("h1"), Some(PieceKind::Knight));
        assert_eq!(board.get(sq("h1")), Some(Piece::new(PieceKind::Knight, Color::Black)));
    }

    #[test]
    fn test_plain_move_captures() {
        let mut board = Board::from_placement(&[("d4", 'N'), ("e6", 'p')]).unwrap();
        assert_eq!(execute(&mut board, sq("d4"), sq("e6"), None), Some(Applied::Plain));
        assert_eq!(board.get(sq("e6")), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(board.occupied().count(), 1);
    }

    #[test]
    fn test_empty_start_is_a_no_op() {
        let mut board = Board::starting_position();
        assert_eq!(execute(&mut board, sq("e4"), sq("e5"), None), None);
        assert_eq!(board, Board::starting_position());
    }
}
