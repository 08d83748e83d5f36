//! Check and checkmate detection.
//!
//! Attack detection reuses the raw legality rules for the opposing side,
//! so a square counts as attacked exactly when an enemy piece could move
//! onto it. Self-check is tested by replaying the move on a cloned board.

use crate::legality;
use crate::types::*;

/// Returns `true` if the king of `side` is attacked by any enemy piece.
///
/// A side without a king on the board is never in check.
pub fn is_king_in_check(board: &Board, side: Color) -> bool {
    let Some(king_sq) = board.find_king(side) else {
        return false;
    };
    let attacker = side.opponent();
    board.occupied().any(|(sq, piece)| {
        piece.color == attacker && legality::is_legal_move(board, sq, king_sq, attacker)
    })
}

/// Returns `true` if relocating the piece on `from` to `to` would leave the
/// king of `side` attacked. The board itself is not modified.
///
/// The probe is a plain relocation; a castling rook is not moved.
pub fn causes_self_check(board: &Board, from: Square, to: Square, side: Color) -> bool {
    let mut probe = board.clone();
    let piece = probe.take(from);
    probe.set(to, piece);
    is_king_in_check(&probe, side)
}

/// Lazily yields every `(from, to)` pair `side` may play: accepted by the
/// legality rules and not leaving its own king attacked.
///
/// Origins are visited in row-major order, destinations likewise.
pub fn legal_moves(board: &Board, side: Color) -> impl Iterator<Item = (Square, Square)> + '_ {
    board
        .occupied()
        .filter(move |(_, piece)| piece.color == side)
        .flat_map(|(from, _)| Square::all().map(move |to| (from, to)))
        .filter(move |&(from, to)| {
            legality::is_legal_move(board, from, to, side)
                && !causes_self_check(board, from, to, side)
        })
}

/// Returns `true` if `side` is in check and has no move that escapes it.
pub fn is_checkmate(board: &Board, side: Color) -> bool {
    is_king_in_check(board, side) && legal_moves(board, side).next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).unwrap()
    }

    #[test]
    fn test_starting_position_not_in_check() {
        let board = Board::starting_position();
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::White));
    }

    #[test]
    fn test_starting_position_has_20_moves() {
        let board = Board::starting_position();
        assert_eq!(legal_moves(&board, Color::White).count(), 20);
        assert_eq!(legal_moves(&board, Color::Black).count(), 20);
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let board = Board::from_placement(&[("a1", 'R'), ("a8", 'q')]).unwrap();
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
    }

    #[test]
    fn test_attacks_by_each_kind() {
        let cases: [(&str, char); 6] = [
            ("e8", 'r'),
            ("a5", 'b'),
            ("f3", 'n'),
            ("h4", 'q'),
            ("d2", 'p'),
            ("e2", 'k'),
        ];
        for (label, ch) in cases {
            let board = Board::from_placement(&[("e1", 'K'), (label, ch)]).unwrap();
            assert!(is_king_in_check(&board, Color::White), "{} on {}", ch, label);
        }
    }

    #[test]
    fn test_blocked_attack_is_not_check() {
        let board = Board::from_placement(&[("e1", 'K'), ("e4", 'P'), ("e8", 'r')]).unwrap();
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn test_pawn_does_not_attack_straight_ahead() {
        let board = Board::from_placement(&[("e1", 'K'), ("e2", 'p')]).unwrap();
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        let board =
            Board::from_placement(&[("e1", 'K'), ("e2", 'B'), ("e8", 'r'), ("a8", 'k')]).unwrap();
        assert!(causes_self_check(&board, sq("e2"), sq("d3"), Color::White));
        assert_eq!(
            board.get(sq("e2")),
            Some(Piece::new(PieceKind::Bishop, Color::White)),
            "probe must not touch the real board"
        );
    }

    #[test]
    fn test_capturing_the_checker_resolves_check() {
        let board = Board::from_placement(&[("e1", 'K'), ("e2", 'q'), ("d1", 'R')]).unwrap();
        assert!(is_king_in_check(&board, Color::White));
        assert!(!causes_self_check(&board, sq("e1"), sq("e2"), Color::White));
        assert!(!is_checkmate(&board, Color::White));
    }

    #[test]
    fn test_back_rank_mate() {
        let board = Board::from_placement(&[
            ("g1", 'K'),
            ("f2", 'P'),
            ("g2", 'P'),
            ("h2", 'P'),
            ("a1", 'r'),
            ("a8", 'k'),
        ])
        .unwrap();
        assert!(is_king_in_check(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
    }

    #[test]
    fn test_block_escapes_mate() {
        let board = Board::from_placement(&[
            ("g1", 'K'),
            ("f2", 'P'),
            ("g2", 'P'),
            ("h2", 'P'),
            ("c3", 'B'),
            ("a1", 'r'),
            ("a8", 'k'),
        ])
        .unwrap();
        assert!(is_king_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White), "bishop can interpose on e1");
    }

    #[test]
    fn test_stalemate_is_not_checkmate() {
        let board = Board::from_placement(&[("a8", 'k'), ("b6", 'Q'), ("c7", 'K')]).unwrap();
        assert!(!is_king_in_check(&board, Color::Black));
        assert_eq!(legal_moves(&board, Color::Black).count(), 0);
        assert!(!is_checkmate(&board, Color::Black));
    }
}
