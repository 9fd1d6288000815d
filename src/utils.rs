// Step tables and coordinate notation helpers for move generation and the console

use crate::board::Square;

// (file delta, rank delta)
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Longest ray a slider can travel on an 8x8 board.
pub const MAX_RAY: i8 = 7;

/// Square to coordinate name. Rank 7 (White's back rank) is "1", rank 0 is "8".
pub fn square_to_coord(sq: Square) -> String {
    let file_char = (b'a' + sq.file() as u8) as char;
    let rank_char = (b'8' - sq.rank() as u8) as char;
    format!("{}{}", file_char, rank_char)
}

/// Parse "e2" style names, e.g. "e1" -> (4, 7), "a8" -> (0, 0)
pub fn coord_to_square(s: &str) -> Result<Square, &'static str> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err("Invalid square notation");
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err("Invalid square notation");
    }
    Square::new((file - b'a') as i8, (b'8' - rank) as i8).ok_or("Invalid square notation")
}

/// Parse a "e2e4" style move into origin and destination squares
pub fn parse_coord_move(s: &str) -> Result<(Square, Square), &'static str> {
    if s.len() != 4 || !s.is_ascii() {
        return Err("Move must look like e2e4");
    }
    let from = coord_to_square(&s[0..2])?;
    let to = coord_to_square(&s[2..4])?;
    Ok((from, to))
}

pub fn move_to_coord(from: Square, to: Square) -> String {
    format!("{}{}", square_to_coord(from), square_to_coord(to))
}
