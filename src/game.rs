//! Game state management for the chess rules engine.
//!
//! A [`GameState`] owns the board and the side to move. Each request is
//! processed end to end: validated against the movement rules and the
//! self-check test, executed (castling and promotion included), then
//! classified for the opponent. Refused requests leave the state untouched.

use crate::check;
use crate::legality;
use crate::notation::{self, NotationError};
use crate::special;
use crate::types::*;
use std::fmt;

/// Why a move request was refused.
///
/// Every variant is reported to callers as [`MoveOutcome::IllegalMove`];
/// the detail only feeds the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The command text could not be parsed.
    Malformed(NotationError),
    /// No piece stands on the start square.
    EmptySquare(Square),
    /// The piece on the start square belongs to the other side.
    NotYourPiece(Square),
    /// The destination holds a piece of the mover's own color.
    OwnPiece(Square),
    /// The piece cannot move that way.
    Pattern(MoveRequest),
    /// The move would leave the mover's king attacked.
    SelfCheck(MoveRequest),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Malformed(e) => write!(f, "{}", e),
            Rejection::EmptySquare(sq) => write!(f, "no piece on {}", sq),
            Rejection::NotYourPiece(sq) => write!(f, "piece on {} belongs to the opponent", sq),
            Rejection::OwnPiece(sq) => write!(f, "{} is occupied by an own piece", sq),
            Rejection::Pattern(mv) => write!(f, "{} does not follow the piece's movement", mv),
            Rejection::SelfCheck(mv) => write!(f, "{} leaves the king in check", mv),
        }
    }
}

/// A chess game: the board plus the side whose turn it is.
///
/// The state never ends on its own. After a checkmate, resignation or draw
/// the caller decides whether to keep submitting moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Current board position.
    pub board: Board,

    /// Side to move.
    pub turn: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::starting_position(), Color::White)
    }

    /// Creates a game from an arbitrary position.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    /// Processes one textual command: `resign`, or a move with an optional
    /// promotion letter and an optional trailing `draw?`.
    pub fn play(&mut self, input: &str) -> MoveResponse {
        let input = input.trim();

        if input == notation::RESIGN {
            let winner = self.turn.opponent();
            log::info!("{} resigns, {} wins", self.turn, winner);
            return self.respond(MoveOutcome::Resign { winner });
        }

        let (command, draw_requested) = notation::strip_draw_request(input);
        match notation::parse_move_command(command) {
            Ok(request) => self.apply(&request, draw_requested),
            Err(e) => self.reject(input, Rejection::Malformed(e)),
        }
    }

    /// Validates and applies an already-parsed move, then classifies the
    /// resulting position and passes the turn.
    pub fn apply(&mut self, request: &MoveRequest, draw_requested: bool) -> MoveResponse {
        if let Err(reason) = self.validate(request) {
            return self.reject(&request.to_string(), reason);
        }

        let mover = self.turn;
        let opponent = mover.opponent();

        if let Some(applied) =
            special::execute(&mut self.board, request.from, request.to, request.promotion)
        {
            log::debug!("{} played {} ({})", mover, request, applied);
        }

        let outcome = if draw_requested {
            log::info!("{} requested a draw with {}", mover, request);
            MoveOutcome::Draw
        } else if check::is_checkmate(&self.board, opponent) {
            log::info!("Checkmate, {} wins", mover);
            MoveOutcome::Checkmate { winner: mover }
        } else if check::is_king_in_check(&self.board, opponent) {
            MoveOutcome::Check
        } else {
            MoveOutcome::Ongoing
        };

        self.turn = opponent;
        self.respond(outcome)
    }

    /// Checks a move for the side to move without applying it.
    pub fn validate(&self, request: &MoveRequest) -> Result<(), Rejection> {
        let piece = self
            .board
            .get(request.from)
            .ok_or(Rejection::EmptySquare(request.from))?;
        if piece.color != self.turn {
            return Err(Rejection::NotYourPiece(request.from));
        }
        if self.board.is_color(request.to, self.turn) {
            return Err(Rejection::OwnPiece(request.to));
        }
        if !legality::is_legal_move(&self.board, request.from, request.to, self.turn) {
            return Err(Rejection::Pattern(*request));
        }
        if check::causes_self_check(&self.board, request.from, request.to, self.turn) {
            return Err(Rejection::SelfCheck(*request));
        }
        Ok(())
    }

    /// Returns `true` if the side to move is in check.
    pub fn is_check(&self) -> bool {
        check::is_king_in_check(&self.board, self.turn)
    }

    /// All moves available to the side to move.
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        check::legal_moves(&self.board, self.turn)
            .map(|(from, to)| MoveRequest::simple(from, to))
            .collect()
    }

    fn reject(&self, input: &str, reason: Rejection) -> MoveResponse {
        log::debug!("Rejected '{}' for {}: {}", input, self.turn, reason);
        self.respond(MoveOutcome::IllegalMove)
    }

    fn respond(&self, outcome: MoveOutcome) -> MoveResponse {
        MoveResponse {
            pieces: self.board.snapshot(),
            outcome,
        }
    }
}
