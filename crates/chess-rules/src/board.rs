//! Board grid and piece arena.
//!
//! The [`Board`] owns every piece in a dense arena and maps each cell to at
//! most one [`PieceId`]. Pieces that leave the board (captured, or replaced by
//! a promotion) keep their arena slot so history can put them back.

use crate::history::Displacement;
use crate::piece::{Piece, PieceId};
use crate::setup::SetupError;
use chess_core::{Color, PieceKind, Square, MAX_BOARD_SIZE};

/// Cell contents in scan order, used to compare positions.
pub type Layout = Vec<Option<(PieceKind, Color)>>;

/// A square grid of cells plus the arena of pieces placed on it.
#[derive(Debug, Clone)]
pub struct Board {
    size: u8,
    /// Row-major by rank, rank 0 first.
    cells: Vec<Option<PieceId>>,
    pieces: Vec<Piece>,
}

impl Board {
    /// Edge length of a regular chess board.
    pub const STANDARD_SIZE: u8 = 8;

    /// Back rank order for files 0-4; the files past the king mirror the
    /// first three from the far edge.
    const BACK_RANK: [PieceKind; 5] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Creates an empty `size x size` board.
    pub fn empty(size: u8) -> Result<Self, SetupError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(SetupError::UnsupportedSize(size));
        }
        let cells = usize::from(size) * usize::from(size);
        Ok(Board {
            size,
            cells: vec![None; cells],
            pieces: Vec::new(),
        })
    }

    /// Creates a board holding the standard starting layout.
    ///
    /// White fills ranks 0 and 1, Black ranks `size-1` and `size-2`. On boards
    /// wider than eight, the files between the king and the far bishop stay
    /// empty.
    pub fn standard(size: u8) -> Result<Self, SetupError> {
        if size < Self::STANDARD_SIZE {
            return Err(SetupError::UnsupportedSize(size));
        }
        let mut board = Board::empty(size)?;
        for side in Color::ALL {
            let back = side.back_rank(size);
            let pawns = if side == Color::White { 1 } else { size - 2 };
            for file in 0..size {
                if let Some(kind) = board.back_rank_kind(file) {
                    board.spawn(kind, side, Square::new(file, back))?;
                }
                board.spawn(PieceKind::Pawn, side, Square::new(file, pawns))?;
            }
        }
        Ok(board)
    }

    fn back_rank_kind(&self, file: u8) -> Option<PieceKind> {
        let mirrored = self.size - 1 - file;
        if usize::from(file) < Self::BACK_RANK.len() {
            Some(Self::BACK_RANK[usize::from(file)])
        } else if mirrored < 3 {
            Some(Self::BACK_RANK[usize::from(mirrored)])
        } else {
            None
        }
    }

    /// Returns the edge length.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns true if the square lies on this board.
    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        square.is_within(self.size)
    }

    #[inline]
    fn cell_index(&self, square: Square) -> Option<usize> {
        self.contains(square).then(|| {
            usize::from(square.rank()) * usize::from(self.size) + usize::from(square.file())
        })
    }

    /// Returns the id of the piece on `square`, or `None` for empty or
    /// off-board squares.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.cell_index(square).and_then(|i| self.cells[i])
    }

    /// Returns the piece on `square`, if any.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<&Piece> {
        self.piece_at(square).map(|id| self.piece(id))
    }

    /// Returns true if `square` is on the board and holds no piece.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.contains(square) && self.piece_at(square).is_none()
    }

    /// Returns the piece with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was minted by a different board.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Iterates over every piece still on the board.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.location().is_some())
            .map(|(i, p)| (PieceId(i as u16), p))
    }

    /// Iterates over the pieces of one side still on the board.
    pub fn pieces_of(&self, side: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.side() == side)
    }

    /// Iterates over occupied cells in scan order: top rank (Black's back
    /// rank) first, files left to right.
    pub fn scan(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        let size = self.size;
        (0..size).rev().flat_map(move |rank| {
            (0..size).filter_map(move |file| {
                let square = Square::new(file, rank);
                self.piece_at(square).map(|id| (square, id))
            })
        })
    }

    /// Places a new piece on an empty square.
    pub fn spawn(
        &mut self,
        kind: PieceKind,
        side: Color,
        square: Square,
    ) -> Result<PieceId, SetupError> {
        let index = self.cell_index(square).ok_or(SetupError::OutOfBounds {
            square,
            size: self.size,
        })?;
        if self.cells[index].is_some() {
            return Err(SetupError::Occupied(square));
        }
        let id = self.spawn_detached(kind, side, square)?;
        self.cells[index] = Some(id);
        self.pieces[id.index()].set_location(Some(square));
        Ok(id)
    }

    /// Adds a piece to the arena without placing it on any cell.
    pub(crate) fn spawn_detached(
        &mut self,
        kind: PieceKind,
        side: Color,
        origin: Square,
    ) -> Result<PieceId, SetupError> {
        let id = PieceId(u16::try_from(self.pieces.len()).map_err(|_| SetupError::TooManyPieces)?);
        let mut piece = Piece::new(kind, side, origin);
        piece.set_location(None);
        self.pieces.push(piece);
        Ok(id)
    }

    /// Moves a piece to `to`, or off the board for `None`.
    ///
    /// The origin cell is only cleared if it still refers to this piece, and
    /// whatever stood on the destination is overwritten; callers order
    /// displacements so that overwritten pieces are moved off explicitly.
    pub(crate) fn set_location(&mut self, id: PieceId, to: Option<Square>) {
        if let Some(index) = self.piece(id).location().and_then(|sq| self.cell_index(sq)) {
            if self.cells[index] == Some(id) {
                self.cells[index] = None;
            }
        }
        if let Some(index) = to.and_then(|sq| self.cell_index(sq)) {
            self.cells[index] = Some(id);
        }
        self.pieces[id.index()].set_location(to);
    }

    /// Applies displacements in order.
    pub(crate) fn apply(&mut self, displacements: &[Displacement]) {
        for d in displacements {
            self.set_location(d.piece, d.to);
        }
    }

    /// Undoes displacements, last first.
    pub(crate) fn revert(&mut self, displacements: &[Displacement]) {
        for d in displacements.iter().rev() {
            self.set_location(d.piece, d.from);
        }
    }

    /// Returns the kind and side on every cell, in rank-major order.
    pub fn layout(&self) -> Layout {
        self.cells
            .iter()
            .map(|cell| cell.map(|id| (self.piece(id).kind(), self.piece(id).side())))
            .collect()
    }

    /// Returns the ids of all kings of `side` still on the board.
    pub fn kings(&self, side: Color) -> Vec<PieceId> {
        self.pieces_of(side)
            .filter(|(_, p)| p.kind() == PieceKind::King)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn kind_at(board: &Board, name: &str) -> Option<(PieceKind, Color)> {
        board.occupant(sq(name)).map(|p| (p.kind(), p.side()))
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard(8).unwrap();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(kind_at(&board, "a1"), Some((PieceKind::Rook, Color::White)));
        assert_eq!(kind_at(&board, "d1"), Some((PieceKind::Queen, Color::White)));
        assert_eq!(kind_at(&board, "e1"), Some((PieceKind::King, Color::White)));
        assert_eq!(kind_at(&board, "g8"), Some((PieceKind::Knight, Color::Black)));
        assert_eq!(kind_at(&board, "e7"), Some((PieceKind::Pawn, Color::Black)));
        assert_eq!(kind_at(&board, "e4"), None);
    }

    #[test]
    fn wide_board_leaves_middle_files_empty() {
        let board = Board::standard(10).unwrap();
        assert_eq!(kind_at(&board, "e1"), Some((PieceKind::King, Color::White)));
        assert_eq!(kind_at(&board, "f1"), None);
        assert_eq!(kind_at(&board, "g1"), None);
        assert_eq!(kind_at(&board, "h1"), Some((PieceKind::Bishop, Color::White)));
        assert_eq!(kind_at(&board, "j10"), Some((PieceKind::Rook, Color::Black)));
        assert_eq!(board.pieces_of(Color::Black).count(), 18);
    }

    #[test]
    fn unsupported_sizes() {
        assert_eq!(Board::standard(7).unwrap_err(), SetupError::UnsupportedSize(7));
        assert_eq!(Board::empty(0).unwrap_err(), SetupError::UnsupportedSize(0));
        assert_eq!(Board::empty(27).unwrap_err(), SetupError::UnsupportedSize(27));
        assert!(Board::empty(3).is_ok());
    }

    #[test]
    fn out_of_bounds_lookups_are_empty() {
        let board = Board::standard(8).unwrap();
        assert!(!board.contains(sq("i1")));
        assert_eq!(board.piece_at(sq("i1")), None);
        assert!(!board.is_empty(sq("a9")));
    }

    #[test]
    fn spawn_rejects_bad_squares() {
        let mut board = Board::empty(8).unwrap();
        board.spawn(PieceKind::Rook, Color::White, sq("a1")).unwrap();
        assert_eq!(
            board.spawn(PieceKind::Rook, Color::White, sq("a1")),
            Err(SetupError::Occupied(sq("a1")))
        );
        assert_eq!(
            board.spawn(PieceKind::Rook, Color::White, sq("a9")),
            Err(SetupError::OutOfBounds {
                square: sq("a9"),
                size: 8
            })
        );
    }

    #[test]
    fn scan_order_starts_at_top_rank() {
        let board = Board::standard(8).unwrap();
        let first: Vec<Square> = board.scan().take(2).map(|(s, _)| s).collect();
        assert_eq!(first, vec![sq("a8"), sq("b8")]);
        let last = board.scan().last().map(|(s, _)| s);
        assert_eq!(last, Some(sq("h1")));
    }

    #[test]
    fn set_location_keeps_overwritten_piece_in_arena() {
        let mut board = Board::empty(8).unwrap();
        let rook = board.spawn(PieceKind::Rook, Color::White, sq("a1")).unwrap();
        let pawn = board.spawn(PieceKind::Pawn, Color::Black, sq("a5")).unwrap();

        board.set_location(pawn, None);
        board.set_location(rook, Some(sq("a5")));
        assert_eq!(board.piece_at(sq("a5")), Some(rook));
        assert_eq!(board.piece_at(sq("a1")), None);
        assert_eq!(board.piece(pawn).location(), None);
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn arena_refuses_to_overflow_piece_ids() {
        let mut board = Board::empty(8).unwrap();
        for _ in 0..=u16::MAX {
            board
                .spawn_detached(PieceKind::Queen, Color::White, sq("a8"))
                .unwrap();
        }
        assert_eq!(
            board.spawn_detached(PieceKind::Queen, Color::White, sq("a8")),
            Err(SetupError::TooManyPieces)
        );
        assert_eq!(
            board.spawn(PieceKind::King, Color::White, sq("e1")),
            Err(SetupError::TooManyPieces)
        );
        assert_eq!(board.piece_at(sq("e1")), None);
    }

    #[test]
    fn kings_per_side() {
        let board = Board::standard(8).unwrap();
        assert_eq!(board.kings(Color::White).len(), 1);
        assert_eq!(board.kings(Color::Black).len(), 1);
    }
}
