//! The two sides of a game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A side. White starts on rank 0 and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// The other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Slot in per-side tables: White 0, Black 1.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank step of a forward pawn move.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the side's pieces start on, for a `size x size` board.
    #[inline]
    pub const fn back_rank(self, size: u8) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => size - 1,
        }
    }

    /// Rank on which this side's pawns promote: the opponent's back rank.
    #[inline]
    pub const fn promotion_rank(self, size: u8) -> u8 {
        self.opposite().back_rank(size)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}
