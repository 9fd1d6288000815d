//! Move application and turn sequencing.

use thiserror::Error;

use crate::board::{initial_board, Board, Piece, PieceId, PieceKind, Square, Team};
use crate::movegen::legal_destinations;
use crate::utils::parse_coord_move;

/// What kind of move was just applied, so a front end can pick its feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Quiet,
    Capture,
    EnPassant,
    Castle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub team: Team,
    pub from: Square,
    pub to: Square,
    pub outcome: MoveOutcome,
}

/// Rejected moves. The board is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece {0:?} on the board")]
    NoSuchPiece(PieceId),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} belongs to {owner}, but it is {active} to move")]
    WrongTeam {
        square: Square,
        owner: Team,
        active: Team,
    },

    #[error("illegal destination {to} for piece on {from}")]
    IllegalDestination { from: Square, to: Square },

    #[error("{0}")]
    Notation(&'static str),
}

/// Applies `piece` to `to`, then hands the turn to the other team.
///
/// Validation happens before any mutation, so on `Err` nothing has changed.
/// Effects run in a fixed order; later steps read what earlier ones wrote:
/// capture, castling rook, turn toggle, pawn flags and en passant removal,
/// king/rook moved flag, `just_leaped` reset, relocation.
pub fn apply_move(
    board: &mut Board,
    active: &mut Team,
    piece: PieceId,
    to: Square,
) -> Result<MoveRecord, MoveError> {
    let mover: Piece = board.piece(piece).cloned().ok_or(MoveError::NoSuchPiece(piece))?;
    if mover.team != *active {
        return Err(MoveError::WrongTeam {
            square: mover.square,
            owner: mover.team,
            active: *active,
        });
    }
    if !legal_destinations(&mover, board).contains(&to) {
        return Err(MoveError::IllegalDestination {
            from: mover.square,
            to,
        });
    }

    let from = mover.square;
    let file_delta = to.file() - from.file();
    let rank_delta = to.rank() - from.rank();
    let mut outcome = MoveOutcome::Quiet;

    // 1. direct capture
    let captured = board.occupant_at(to).map(|p| p.id);
    if let Some(victim) = captured {
        board.remove(victim);
        outcome = MoveOutcome::Capture;
    }

    // 2. castling: bring the rook to the inner side of the king's destination
    if mover.kind == PieceKind::King && !mover.has_moved && file_delta.abs() == 2 {
        let dir = file_delta.signum();
        let rook_offset = if dir > 0 { 3 } else { -4 };
        let rook = from
            .offset(rook_offset, 0)
            .and_then(|sq| board.occupant_at(sq))
            .filter(|p| p.kind == PieceKind::Rook)
            .map(|p| p.id);
        let rook_to = to.offset(-dir, 0);
        if let (Some(rook), Some(rook_to)) = (rook, rook_to) {
            if let Some(r) = board.piece_mut(rook) {
                r.square = rook_to;
                r.has_moved = true;
            }
            outcome = MoveOutcome::Castle;
        }
    }

    // 3. turn
    *active = !*active;

    // 4. pawn flags, en passant
    if mover.kind == PieceKind::Pawn {
        if let Some(p) = board.piece_mut(piece) {
            p.has_moved = true;
            p.just_leaped = rank_delta.abs() == 2;
        }
        if file_delta != 0 && captured.is_none() {
            let passed = Square::new(to.file(), from.rank())
                .and_then(|sq| board.occupant_at(sq))
                .filter(|p| p.is_pawn() && p.team != mover.team && p.just_leaped)
                .map(|p| p.id);
            if let Some(victim) = passed {
                board.remove(victim);
                outcome = MoveOutcome::EnPassant;
            }
        }
    }

    // 5.
    if matches!(mover.kind, PieceKind::Rook | PieceKind::King) {
        if let Some(p) = board.piece_mut(piece) {
            p.has_moved = true;
        }
    }

    // 6. one-move lifetime of just_leaped
    board.apply_flag_reset(piece);

    // 7.
    if let Some(p) = board.piece_mut(piece) {
        p.square = to;
    }

    Ok(MoveRecord {
        piece,
        kind: mover.kind,
        team: mover.team,
        from,
        to,
        outcome,
    })
}

/// A board plus whose turn it is, with the list of moves played so far.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Team,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(initial_board(), Team::White)
    }

    pub fn from_board(board: Board, active: Team) -> Self {
        Self {
            board,
            active,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_team(&self) -> Team {
        self.active
    }

    pub fn occupant_at(&self, square: Square) -> Option<&Piece> {
        self.board.occupant_at(square)
    }

    /// The piece on `square` if the side to move may pick it up.
    pub fn select(&self, square: Square) -> Option<&Piece> {
        self.board
            .occupant_at(square)
            .filter(|p| p.team == self.active)
    }

    pub fn legal_destinations(&self, piece: PieceId) -> Result<Vec<Square>, MoveError> {
        let p = self.board.piece(piece).ok_or(MoveError::NoSuchPiece(piece))?;
        Ok(legal_destinations(p, &self.board))
    }

    pub fn apply_move(&mut self, piece: PieceId, to: Square) -> Result<MoveOutcome, MoveError> {
        let record = apply_move(&mut self.board, &mut self.active, piece, to)?;
        self.history.push(record);
        Ok(record.outcome)
    }

    /// Plays a move written as origin and destination, e.g. "e2e4".
    pub fn apply_coord_move(&mut self, mv: &str) -> Result<MoveOutcome, MoveError> {
        let (from, to) = parse_coord_move(mv).map_err(MoveError::Notation)?;
        let id = self
            .board
            .occupant_at(from)
            .map(|p| p.id)
            .ok_or(MoveError::EmptySquare(from))?;
        self.apply_move(id, to)
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Number of moves applied since the game was set up.
    pub fn ply(&self) -> usize {
        self.history.len()
    }
}

/// Leaf count of the move tree `depth` plies deep under these rules.
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for (piece, to) in crate::movegen::team_moves(&game.board, game.active) {
        let mut next = game.clone();
        if next.apply_move(piece, to).is_ok() {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}
