// Board state: pieces with position, team and move-history flags.
// Coordinates: file 0..8 left to right, rank 0 is Black's back rank, rank 7 White's.

use std::fmt;

pub const BOARD_SIZE: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Returns `None` for coordinates outside the board; off-board squares are never built.
    pub fn new(file: i8, rank: i8) -> Option<Square> {
        if (0..BOARD_SIZE).contains(&file) && (0..BOARD_SIZE).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn file(self) -> i8 {
        self.file as i8
    }

    pub fn rank(self) -> i8 {
        self.rank as i8
    }

    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::new(self.file() + df, self.rank() + dr)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::square_to_coord(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    White,
    Black,
}

impl Team {
    /// Rank delta of a pawn step: White walks toward rank 0, Black toward rank 7.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Team::White => -1,
            Team::Black => 1,
        }
    }
}

impl std::ops::Not for Team {
    type Output = Team;
    fn not(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "white"),
            Team::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceKind {
    pub fn symbol(self, team: Team) -> char {
        let c = match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Pawn => 'p',
        };
        match team {
            Team::White => c.to_ascii_uppercase(),
            Team::Black => c,
        }
    }
}

/// Stable handle of a piece; survives other pieces being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub team: Team,
    pub square: Square,
    /// Set the first time a King, Rook or Pawn moves. Never reset.
    pub has_moved: bool,
    /// Pawns only: true right after this pawn's two-square advance, for one move.
    pub just_leaped: bool,
}

impl Piece {
    pub fn is_pawn(&self) -> bool {
        self.kind == PieceKind::Pawn
    }
}

/// How `Board::is_square_free` judges a square relative to a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    EmptyOrEnemy,
    Empty,
    Enemy,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    pieces: Vec<Piece>,
    next_id: u8,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Places a fresh, unmoved piece. Setup helper; fails if the square is taken.
    pub fn place(
        &mut self,
        kind: PieceKind,
        team: Team,
        square: Square,
    ) -> Result<PieceId, &'static str> {
        if self.occupant_at(square).is_some() {
            return Err("square already occupied");
        }
        self.push(kind, team, square)
    }

    fn push(&mut self, kind: PieceKind, team: Team, square: Square) -> Result<PieceId, &'static str> {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or("too many pieces")?;
        self.pieces.push(Piece {
            id,
            kind,
            team,
            square,
            has_moved: false,
            just_leaped: false,
        });
        Ok(id)
    }

    // Linear scan, as the collection is small and unordered
    pub fn occupant_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Mutable access for position setup and move application.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    pub fn is_square_free(&self, square: Square, relative_to: Team, mode: Occupancy) -> bool {
        match (self.occupant_at(square), mode) {
            (None, Occupancy::EmptyOrEnemy) | (None, Occupancy::Empty) => true,
            (None, Occupancy::Enemy) => false,
            (Some(p), Occupancy::EmptyOrEnemy) | (Some(p), Occupancy::Enemy) => {
                p.team != relative_to
            }
            (Some(_), Occupancy::Empty) => false,
        }
    }

    /// Deletes a piece permanently (capture).
    pub fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let idx = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(idx))
    }

    /// Clears `just_leaped` on every pawn except `moved`.
    pub fn apply_flag_reset(&mut self, moved: PieceId) {
        for p in self.pieces.iter_mut() {
            if p.is_pawn() && p.id != moved {
                p.just_leaped = false;
            }
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

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

/// Standard starting layout, Black on ranks 0-1 and White on ranks 6-7.
pub fn initial_board() -> Board {
    let mut board = Board::empty();
    for (team, back, pawns) in [(Team::Black, 0u8, 1u8), (Team::White, 7, 6)] {
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            let _ = board.push(*kind, team, Square { file, rank: back });
            let _ = board.push(PieceKind::Pawn, team, Square { file, rank: pawns });
        }
    }
    board
}

// Text diagram, rank 0 on top as White sees it
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - rank)?;
            for file in 0..BOARD_SIZE {
                let piece = Square::new(file, rank).and_then(|sq| self.occupant_at(sq));
                match piece {
                    Some(p) => write!(f, "{} ", p.kind.symbol(p.team))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
