//! Piece model: arena entries and per-kind movement templates.

use chess_core::{Color, Offset, PieceKind, Square};
use std::fmt;

/// Index of a piece in its board's arena.
///
/// Ids are minted by the [`Board`](crate::Board) that owns the piece and stay
/// valid for the board's lifetime; pieces are never removed from the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PieceId({})", self.0)
    }
}

/// How a kind of piece moves.
///
/// Offsets are written from White's point of view; only pawns care, and they
/// flip the rank component for Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// Relative destinations for non-capturing moves (and captures, except for pawns).
    pub offsets: &'static [Offset],
    /// Capture-only offsets. Empty for every kind but the pawn.
    pub captures: &'static [Offset],
    /// Multiplier 1 only when set; otherwise offsets repeat up to the board size.
    pub bounded: bool,
    /// Ignores pieces standing on the path.
    pub can_jump: bool,
}

const ORTHOGONAL: [Offset; 4] = [
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(1, 0),
    Offset::new(-1, 0),
];

const DIAGONAL: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(-1, -1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
];

const ALL_DIRECTIONS: [Offset; 8] = [
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(1, 1),
    Offset::new(-1, -1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
];

const KNIGHT_JUMPS: [Offset; 8] = [
    Offset::new(-2, 1),
    Offset::new(2, 1),
    Offset::new(-1, 2),
    Offset::new(1, 2),
    Offset::new(-2, -1),
    Offset::new(2, -1),
    Offset::new(-1, -2),
    Offset::new(1, -2),
];

const PAWN_PUSHES: [Offset; 2] = [Offset::new(0, 1), Offset::new(0, 2)];

const PAWN_CAPTURES: [Offset; 2] = [Offset::new(-1, 1), Offset::new(1, 1)];

/// Movement templates indexed by [`PieceKind::index`].
const MOVEMENTS: [Movement; 6] = [
    // Pawn
    Movement {
        offsets: &PAWN_PUSHES,
        captures: &PAWN_CAPTURES,
        bounded: true,
        can_jump: false,
    },
    // Knight
    Movement {
        offsets: &KNIGHT_JUMPS,
        captures: &[],
        bounded: true,
        can_jump: true,
    },
    // Bishop
    Movement {
        offsets: &DIAGONAL,
        captures: &[],
        bounded: false,
        can_jump: false,
    },
    // Rook
    Movement {
        offsets: &ORTHOGONAL,
        captures: &[],
        bounded: false,
        can_jump: false,
    },
    // Queen
    Movement {
        offsets: &ALL_DIRECTIONS,
        captures: &[],
        bounded: false,
        can_jump: false,
    },
    // King
    Movement {
        offsets: &ALL_DIRECTIONS,
        captures: &[],
        bounded: true,
        can_jump: false,
    },
];

/// Returns the movement template for a piece kind.
#[inline]
pub fn movement(kind: PieceKind) -> &'static Movement {
    &MOVEMENTS[kind.index()]
}

/// A piece in the board's arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    side: Color,
    location: Option<Square>,
    origin: Square,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, side: Color, origin: Square) -> Self {
        Piece {
            kind,
            side,
            location: Some(origin),
            origin,
        }
    }

    /// Returns the kind of this piece.
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the side this piece plays for.
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns the square the piece stands on, or `None` once it left the
    /// board (captured, or replaced by a promotion).
    #[inline]
    pub fn location(&self) -> Option<Square> {
        self.location
    }

    /// Returns the square the piece was created on.
    #[inline]
    pub fn origin(&self) -> Square {
        self.origin
    }

    /// Returns the movement template of this piece's kind.
    #[inline]
    pub fn movement(&self) -> &'static Movement {
        movement(self.kind)
    }

    /// Turns a template offset into this piece's frame: pawns of Black move
    /// towards rank 0.
    #[inline]
    pub fn orient(&self, offset: Offset) -> Offset {
        if self.kind == PieceKind::Pawn {
            Offset::new(offset.file, offset.rank * self.side.pawn_direction())
        } else {
            offset
        }
    }

    pub(crate) fn set_location(&mut self, location: Option<Square>) {
        self.location = location;
    }
}
