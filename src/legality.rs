//! Raw move legality for the chess rules engine.
//!
//! Decides whether a start/end pair matches the movement pattern of the
//! piece standing on the start square. This is deliberately blind to king
//! safety: the check detector calls it to find attackers, so it must never
//! consult the self-check test itself.
//!
//! Rules covered:
//!
//! - Pawn single and double steps, diagonal captures (no en passant)
//! - Rook, bishop and queen slides with path clearance
//! - Knight jumps
//! - King steps, plus the two-file castling displacement

use crate::types::*;

/// Returns `true` if moving the piece on `from` to `to` follows the
/// movement rules for `side`.
///
/// `from` must hold a piece of `side`, and `to` must not hold one.
pub fn is_legal_move(board: &Board, from: Square, to: Square, side: Color) -> bool {
    let piece = match board.get(from) {
        Some(p) if p.color == side => p,
        _ => return false,
    };
    if board.is_color(to, side) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => is_pawn_move(board, from, to, side),
        PieceKind::Rook => is_rook_move(board, from, to),
        PieceKind::Knight => is_knight_move(from, to),
        PieceKind::Bishop => is_bishop_move(board, from, to),
        PieceKind::Queen => is_rook_move(board, from, to) || is_bishop_move(board, from, to),
        PieceKind::King => is_king_step(from, to) || is_castling_move(board, from, to, side),
    }
}

/// Row and column deltas from `from` to `to`.
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row as i8 - from.row as i8,
        to.col as i8 - from.col as i8,
    )
}

fn is_pawn_move(board: &Board, from: Square, to: Square, side: Color) -> bool {
    let dir = side.pawn_direction();
    let (dr, dc) = delta(from, to);

    // Destination holds an enemy piece: only a forward diagonal captures.
    if board.get(to).is_some() {
        return dr == dir && dc.abs() == 1;
    }

    if dc != 0 {
        return false;
    }
    if dr == dir {
        return true;
    }
    dr == 2 * dir
        && from.row == side.pawn_home_row()
        && from
            .offset(dir, 0)
            .is_some_and(|between| board.get(between).is_none())
}

fn is_rook_move(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    (dr == 0) != (dc == 0) && is_path_clear(board, from, to)
}

fn is_bishop_move(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    dr != 0 && dr.abs() == dc.abs() && is_path_clear(board, from, to)
}

fn is_knight_move(from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
}

fn is_king_step(from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    dr.abs() <= 1 && dc.abs() <= 1
}

/// Castling as a movement pattern: king on its home square, two files
/// towards a same-color rook in the corner, nothing in between.
///
/// Castling rights and attacked transit squares are not checked.
fn is_castling_move(board: &Board, from: Square, to: Square, side: Color) -> bool {
    if from != Square::new(side.back_row(), 4) || to.row != from.row {
        return false;
    }
    let rook_col = match to.col {
        6 => 7,
        2 => 0,
        _ => return false,
    };
    let corner = Square::new(from.row, rook_col);
    matches!(
        board.get(corner),
        Some(Piece { kind: PieceKind::Rook, color }) if color == side
    ) && is_path_clear(board, from, corner)
}

/// Returns `true` if every square strictly between `from` and `to` is empty.
///
/// The squares must share a row, column or diagonal.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    let (sr, sc) = (dr.signum(), dc.signum());
    if (sr, sc) == (0, 0) {
        return true;
    }

    let mut cur = from;
    loop {
        match cur.offset(sr, sc) {
            Some(next) if next == to => return true,
            Some(next) => {
                if board.get(next).is_some() {
                    return false;
                }
                cur = next;
            }
            None => return false,
        }
    }
}
