//! Scripted setup: directives that pre-position pieces.
//!
//! A [`Directive`] names a piece by kind, side and occurrence in board scan
//! order ("the second white bishop") and moves it straight to a square,
//! ignoring movement rules. Presets are ordered lists of directives used to
//! reach test positions quickly.

use crate::board::Board;
use crate::piece::PieceId;
use chess_core::{Color, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("unsupported board size: {0}")]
    UnsupportedSize(u8),

    #[error("square {square} is outside the {size}x{size} board")]
    OutOfBounds { square: Square, size: u8 },

    #[error("square {0} is already occupied")]
    Occupied(Square),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    DuplicateKing(Color),

    #[error("no {side} {kind} number {which} on the board")]
    PieceNotFound {
        kind: PieceKind,
        side: Color,
        which: usize,
    },

    #[error("directive would remove the king on {0}")]
    WouldCaptureKing(Square),

    #[error("piece arena is full")]
    TooManyPieces,
}

/// Moves one piece to a square, bypassing legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Kind of the piece to move.
    pub piece: PieceKind,
    /// 1-based occurrence among pieces of this kind and side, in scan order.
    pub which: usize,
    pub side: Color,
    /// Destination square.
    pub to: Square,
}

impl Directive {
    /// Creates a directive.
    pub const fn new(piece: PieceKind, which: usize, side: Color, to: Square) -> Self {
        Directive {
            piece,
            which,
            side,
            to,
        }
    }

    /// Finds the piece this directive refers to.
    pub fn resolve(&self, board: &Board) -> Result<PieceId, SetupError> {
        let not_found = SetupError::PieceNotFound {
            kind: self.piece,
            side: self.side,
            which: self.which,
        };
        if self.which == 0 {
            return Err(not_found);
        }
        board
            .scan()
            .filter(|&(_, id)| {
                let p = board.piece(id);
                p.kind() == self.piece && p.side() == self.side
            })
            .nth(self.which - 1)
            .map(|(_, id)| id)
            .ok_or(not_found)
    }

    /// Relocates the piece, taking whatever stood on the destination off the
    /// board. Kings are never taken.
    pub(crate) fn apply(&self, board: &mut Board) -> Result<PieceId, SetupError> {
        if !board.contains(self.to) {
            return Err(SetupError::OutOfBounds {
                square: self.to,
                size: board.size(),
            });
        }
        let id = self.resolve(board)?;
        if let Some(occupant) = board.piece_at(self.to).filter(|&o| o != id) {
            if board.piece(occupant).kind() == PieceKind::King {
                return Err(SetupError::WouldCaptureKing(self.to));
            }
            board.set_location(occupant, None);
        }
        board.set_location(id, Some(self.to));
        tracing::debug!(piece = %self.piece, side = %self.side, to = %self.to, "setup directive applied");
        Ok(id)
    }
}

/// A named list of directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub directives: Vec<Directive>,
}

const fn at(file: char, rank: u8) -> Square {
    Square::new(file as u8 - b'a', rank - 1)
}

/// Returns the preset shipped with the engine under `name`.
pub fn builtin_preset(name: &str) -> Option<Preset> {
    use Color::{Black, White};
    use PieceKind::{Bishop, Knight, Pawn, Queen, Rook};

    let directives = match name {
        "checkmate1" => vec![
            Directive::new(Queen, 1, White, at('a', 5)),
            Directive::new(Bishop, 2, White, at('f', 4)),
        ],
        "check1" => vec![Directive::new(Queen, 1, White, at('d', 3))],
        "castle1" => vec![
            Directive::new(Bishop, 1, White, at('b', 3)),
            Directive::new(Knight, 1, White, at('c', 3)),
            Directive::new(Queen, 1, White, at('e', 3)),
            Directive::new(Bishop, 2, White, at('f', 3)),
            Directive::new(Knight, 2, White, at('g', 3)),
            Directive::new(Queen, 1, Black, at('d', 3)),
        ],
        "promotion1" => vec![
            Directive::new(Rook, 1, Black, at('h', 6)),
            Directive::new(Pawn, 1, White, at('a', 7)),
        ],
        _ => return None,
    };
    Some(Preset { directives })
}

/// Names of the builtin presets.
pub const BUILTIN_PRESETS: [&str; 4] = ["checkmate1", "check1", "castle1", "promotion1"];
