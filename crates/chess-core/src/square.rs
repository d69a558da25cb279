//! Board coordinates.
//!
//! A [`Square`] is a `(file, rank)` pair that knows nothing about the size of
//! the board it is used on; the board validates bounds before any lookup.
//! Rank 0 is White's back rank, so algebraic names read as on a real board.

use crate::Offset;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest supported board edge. Files are lettered `a` to `z`.
pub const MAX_BOARD_SIZE: u8 = 26;

/// Error returned when parsing algebraic square names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("invalid square name: '{0}'")]
    Invalid(String),
}

/// A square on the board, addressed by zero-based file and rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from file and rank indices.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        Square { file, rank }
    }

    /// Returns the file index (0 is the `a` file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank index (0 is White's back rank).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns true if the square lies on a `size x size` board.
    #[inline]
    pub const fn is_within(self, size: u8) -> bool {
        self.file < size && self.rank < size
    }

    /// Returns the square displaced by `offset`, or `None` if it leaves a
    /// `size x size` board.
    pub fn offset(self, offset: Offset, size: u8) -> Option<Square> {
        let file = i16::from(self.file) + i16::from(offset.file);
        let rank = i16::from(self.rank) + i16::from(offset.rank);
        let size = i16::from(size);
        if (0..size).contains(&file) && (0..size).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Returns the offset leading from `self` to `to`.
    pub fn delta(self, to: Square) -> Offset {
        Offset::new(
            to.file as i8 - self.file as i8,
            to.rank as i8 - self.rank as i8,
        )
    }

    /// Parses a square from algebraic notation (e.g. "e4", "j10").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?.to_ascii_lowercase();
        if !file_char.is_ascii_lowercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let rank: u8 = digits.parse().ok()?;
        if rank == 0 || rank > MAX_BOARD_SIZE {
            return None;
        }
        Some(Square::new(file_char as u8 - b'a', rank - 1))
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, u16::from(self.rank) + 1)
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::from_algebraic(&value).ok_or(SquareParseError::Invalid(value))
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_algebraic()
    }
}

impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| SquareParseError::Invalid(s.to_string()))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
