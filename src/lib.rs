//! Chess rules engine: board state, per-piece move generation and move application.
//!
//! No check, checkmate or stalemate detection and no promotion: a move is legal
//! when the piece's movement rules allow it, whatever happens to its own king.

pub mod board;
pub mod console;
pub mod game;
pub mod movegen;
pub mod utils;

pub use board::{initial_board, Board, Occupancy, Piece, PieceId, PieceKind, Square, Team};
pub use game::{apply_move, perft, Game, MoveError, MoveOutcome, MoveRecord};
pub use movegen::{legal_destinations, team_moves};
