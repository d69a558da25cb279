//! Classification of committed moves.

use crate::PieceKind;
use std::fmt;

/// What kind of move a ply was, decided before the board is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Normal move or capture.
    Normal,
    /// Pawn advance of two ranks from its starting square.
    DoublePush,
    /// King moves two files towards the far-file rook.
    CastleKingside,
    /// King moves two files towards the first-file rook.
    CastleQueenside,
    /// Pawn captures a pawn that just passed it.
    EnPassant,
    /// Pawn reaches the last rank and becomes the given kind.
    Promotion(PieceKind),
}

impl MoveKind {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Normal => write!(f, "normal"),
            MoveKind::DoublePush => write!(f, "double push"),
            MoveKind::CastleKingside => write!(f, "O-O"),
            MoveKind::CastleQueenside => write!(f, "O-O-O"),
            MoveKind::EnPassant => write!(f, "en passant"),
            MoveKind::Promotion(kind) => write!(f, "promotion to {}", kind),
        }
    }
}
