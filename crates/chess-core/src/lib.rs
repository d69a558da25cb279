//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the rules engine and its
//! front ends:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] and [`Offset`] for board coordinates of any size up to
//!   [`MAX_BOARD_SIZE`]
//! - [`MoveKind`] for classifying committed moves

mod color;
mod mov;
mod offset;
mod piece;
mod square;

pub use color::Color;
pub use mov::MoveKind;
pub use offset::Offset;
pub use piece::PieceKind;
pub use square::{Square, SquareParseError, MAX_BOARD_SIZE};
