//! Per-piece destination generation.
//!
//! `legal_destinations` is pure: it reads the board and never mutates it. Moves that
//! leave the mover's own king attacked are NOT filtered out, and castling does not
//! look at attacked squares; there is no check detection anywhere in this crate.

use crate::board::{Board, Occupancy, Piece, PieceId, PieceKind, Square, Team};
use crate::utils::{BISHOP_DIRS, KING_STEPS, KNIGHT_OFFSETS, MAX_RAY, QUEEN_DIRS, ROOK_DIRS};

/// Rook file offset from the king for (kingside, queenside) castling.
pub const CASTLE_ROOK_OFFSETS: [i8; 2] = [3, -4];

/// Every square `piece` may move to on `board`.
pub fn legal_destinations(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut out = Vec::new();
    match piece.kind {
        PieceKind::King => {
            step_destinations(piece, board, &KING_STEPS, &mut out);
            castle_destinations(piece, board, &mut out);
        }
        PieceKind::Queen => ray_destinations(piece, board, &QUEEN_DIRS, &mut out),
        PieceKind::Bishop => ray_destinations(piece, board, &BISHOP_DIRS, &mut out),
        PieceKind::Rook => ray_destinations(piece, board, &ROOK_DIRS, &mut out),
        PieceKind::Knight => step_destinations(piece, board, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Pawn => pawn_destinations(piece, board, &mut out),
    }
    // Off-board squares cannot be represented, only the origin needs dropping
    out.retain(|&sq| sq != piece.square);
    out
}

/// All (piece, destination) pairs available to `team`, in board order.
pub fn team_moves(board: &Board, team: Team) -> Vec<(PieceId, Square)> {
    let mut moves = Vec::new();
    for piece in board.pieces().filter(|p| p.team == team) {
        for to in legal_destinations(piece, board) {
            moves.push((piece.id, to));
        }
    }
    moves
}

fn step_destinations(piece: &Piece, board: &Board, steps: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in steps {
        if let Some(to) = piece.square.offset(df, dr) {
            if board.is_square_free(to, piece.team, Occupancy::EmptyOrEnemy) {
                out.push(to);
            }
        }
    }
}

fn ray_destinations(piece: &Piece, board: &Board, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in dirs {
        for step in 1..=MAX_RAY {
            let Some(to) = piece.square.offset(df * step, dr * step) else {
                break;
            };
            match board.occupant_at(to) {
                None => out.push(to),
                Some(blocker) => {
                    if blocker.team != piece.team {
                        out.push(to);
                    }
                    break;
                }
            }
        }
    }
}

fn castle_destinations(king: &Piece, board: &Board, out: &mut Vec<Square>) {
    if king.has_moved {
        return;
    }
    for rook_offset in CASTLE_ROOK_OFFSETS {
        let Some(rook_sq) = king.square.offset(rook_offset, 0) else {
            continue;
        };
        let rook_ready = board.occupant_at(rook_sq).is_some_and(|r| {
            r.kind == PieceKind::Rook && r.team == king.team && !r.has_moved
        });
        if !rook_ready {
            continue;
        }
        let dir = rook_offset.signum();
        let path_clear = (1..rook_offset.abs())
            .filter_map(|i| king.square.offset(dir * i, 0))
            .all(|sq| board.occupant_at(sq).is_none());
        if path_clear {
            if let Some(to) = king.square.offset(2 * dir, 0) {
                out.push(to);
            }
        }
    }
}

fn pawn_destinations(pawn: &Piece, board: &Board, out: &mut Vec<Square>) {
    let fwd = pawn.team.forward();

    // Pushes: the double step needs both squares empty
    if let Some(one) = pawn.square.offset(0, fwd) {
        if board.is_square_free(one, pawn.team, Occupancy::Empty) {
            out.push(one);
            if !pawn.has_moved {
                if let Some(two) = pawn.square.offset(0, 2 * fwd) {
                    if board.is_square_free(two, pawn.team, Occupancy::Empty) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for side in [-1i8, 1] {
        let Some(diag) = pawn.square.offset(side, fwd) else {
            continue;
        };
        if board.is_square_free(diag, pawn.team, Occupancy::Enemy) {
            out.push(diag);
        } else if board.occupant_at(diag).is_none() && en_passant_victim(pawn, side, board).is_some() {
            out.push(diag);
        }
    }
}

/// Enemy pawn beside `pawn` on `side` that just made a double step.
fn en_passant_victim<'a>(pawn: &Piece, side: i8, board: &'a Board) -> Option<&'a Piece> {
    let beside = pawn.square.offset(side, 0)?;
    board
        .occupant_at(beside)
        .filter(|p| p.is_pawn() && p.team != pawn.team && p.just_leaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::initial_board;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort();
        v
    }

    fn dests_at(board: &Board, at: Square) -> Vec<Square> {
        let piece = board.occupant_at(at).unwrap();
        sorted(legal_destinations(piece, board))
    }

    #[test]
    fn start_position_has_twenty_moves_per_side() {
        let board = initial_board();
        assert_eq!(team_moves(&board, Team::White).len(), 20);
        assert_eq!(team_moves(&board, Team::Black).len(), 20);
    }

    #[test]
    fn knight_from_corner_region() {
        let board = initial_board();
        // b1 knight: a3, c3
        assert_eq!(dests_at(&board, sq(1, 7)), vec![sq(0, 5), sq(2, 5)]);
    }

    #[test]
    fn rook_on_open_board_reaches_fourteen_squares() {
        let mut board = Board::empty();
        board.place(PieceKind::Rook, Team::White, sq(3, 3)).unwrap();
        assert_eq!(dests_at(&board, sq(3, 3)).len(), 14);
    }

    #[test]
    fn queen_in_centre_reaches_twenty_seven_squares() {
        let mut board = Board::empty();
        board.place(PieceKind::Queen, Team::Black, sq(3, 4)).unwrap();
        assert_eq!(dests_at(&board, sq(3, 4)).len(), 27);
    }

    #[test]
    fn slider_stops_at_blockers() {
        let mut board = Board::empty();
        board.place(PieceKind::Bishop, Team::White, sq(2, 7)).unwrap();
        board.place(PieceKind::Pawn, Team::White, sq(4, 5)).unwrap();
        board.place(PieceKind::Pawn, Team::Black, sq(0, 5)).unwrap();
        let d = dests_at(&board, sq(2, 7));
        // Up-right ray: d2 only, own pawn on e3 blocks
        assert!(d.contains(&sq(3, 6)));
        assert!(!d.contains(&sq(4, 5)));
        assert!(!d.contains(&sq(5, 4)));
        // Up-left ray: b2, capture on a3
        assert!(d.contains(&sq(1, 6)));
        assert!(d.contains(&sq(0, 5)));
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn king_steps_exclude_own_pieces() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Team::White, sq(0, 0)).unwrap();
        board.place(PieceKind::Pawn, Team::White, sq(1, 0)).unwrap();
        board.place(PieceKind::Pawn, Team::Black, sq(1, 1)).unwrap();
        let d = dests_at(&board, sq(0, 0));
        assert_eq!(d, vec![sq(0, 1), sq(1, 1)]);
    }

    #[test]
    fn pawn_double_step_blocked_by_first_square() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Team::White, sq(4, 6)).unwrap();
        board.place(PieceKind::Knight, Team::Black, sq(4, 5)).unwrap();
        assert!(dests_at(&board, sq(4, 6)).is_empty());
    }

    #[test]
    fn pawn_double_step_blocked_by_second_square() {
        let mut board = Board::empty();
        board.place(PieceKind::Pawn, Team::Black, sq(2, 1)).unwrap();
        board.place(PieceKind::Knight, Team::White, sq(2, 3)).unwrap();
        assert_eq!(dests_at(&board, sq(2, 1)), vec![sq(2, 2)]);
    }

    #[test]
    fn moved_pawn_has_no_double_step() {
        let mut board = Board::empty();
        let id = board.place(PieceKind::Pawn, Team::White, sq(4, 6)).unwrap();
        board.piece_mut(id).unwrap().has_moved = true;
        assert_eq!(dests_at(&board, sq(4, 6)), vec![sq(4, 5)]);
    }

    #[test]
    fn pawn_captures_diagonally_only_enemies() {
        let mut board = Board::empty();
        let id = board.place(PieceKind::Pawn, Team::White, sq(3, 4)).unwrap();
        board.piece_mut(id).unwrap().has_moved = true;
        board.place(PieceKind::Rook, Team::Black, sq(2, 3)).unwrap();
        board.place(PieceKind::Rook, Team::White, sq(4, 3)).unwrap();
        assert_eq!(dests_at(&board, sq(3, 4)), vec![sq(2, 3), sq(3, 3)]);
    }

    #[test]
    fn en_passant_needs_just_leaped_flag() {
        let mut board = Board::empty();
        let white = board.place(PieceKind::Pawn, Team::White, sq(4, 3)).unwrap();
        board.piece_mut(white).unwrap().has_moved = true;
        let black = board.place(PieceKind::Pawn, Team::Black, sq(3, 3)).unwrap();
        board.piece_mut(black).unwrap().has_moved = true;

        assert!(!dests_at(&board, sq(4, 3)).contains(&sq(3, 2)));
        board.piece_mut(black).unwrap().just_leaped = true;
        assert_eq!(dests_at(&board, sq(4, 3)), vec![sq(3, 2), sq(4, 2)]);
    }

    #[test]
    fn en_passant_ignores_leaped_non_enemy() {
        let mut board = Board::empty();
        let white = board.place(PieceKind::Pawn, Team::White, sq(4, 3)).unwrap();
        board.piece_mut(white).unwrap().has_moved = true;
        let friend = board.place(PieceKind::Pawn, Team::White, sq(5, 3)).unwrap();
        board.piece_mut(friend).unwrap().just_leaped = true;
        assert!(!dests_at(&board, sq(4, 3)).contains(&sq(5, 2)));
    }

    #[test]
    fn castling_offered_both_sides_when_clear() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Team::White, sq(4, 7)).unwrap();
        board.place(PieceKind::Rook, Team::White, sq(7, 7)).unwrap();
        board.place(PieceKind::Rook, Team::White, sq(0, 7)).unwrap();
        let d = dests_at(&board, sq(4, 7));
        assert!(d.contains(&sq(6, 7)));
        assert!(d.contains(&sq(2, 7)));
    }

    #[test]
    fn castling_withheld_when_blocked_or_moved() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Team::Black, sq(4, 0)).unwrap();
        let kside = board.place(PieceKind::Rook, Team::Black, sq(7, 0)).unwrap();
        board.place(PieceKind::Rook, Team::Black, sq(0, 0)).unwrap();
        board.place(PieceKind::Knight, Team::Black, sq(1, 0)).unwrap();
        board.piece_mut(kside).unwrap().has_moved = true;
        let d = dests_at(&board, sq(4, 0));
        assert!(!d.contains(&sq(6, 0)));
        assert!(!d.contains(&sq(2, 0)));
    }

    #[test]
    fn castling_ignores_enemy_rook() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Team::White, sq(4, 7)).unwrap();
        board.place(PieceKind::Rook, Team::Black, sq(7, 7)).unwrap();
        assert!(!dests_at(&board, sq(4, 7)).contains(&sq(6, 7)));
    }

    #[test]
    fn query_is_repeatable() {
        let board = initial_board();
        for piece in board.pieces() {
            assert_eq!(legal_destinations(piece, &board), legal_destinations(piece, &board));
        }
    }
}
