//! Move records and the undo/redo log.

use crate::piece::PieceId;
use chess_core::{Color, MoveKind, Square};

/// One piece changing cell as part of a ply.
///
/// `None` means "off the board": a captured piece has `to = None`, a piece
/// created by promotion has `from = None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    pub piece: PieceId,
    pub from: Option<Square>,
    pub to: Option<Square>,
}

impl Displacement {
    /// A piece moving between two cells.
    pub fn step(piece: PieceId, from: Square, to: Square) -> Self {
        Displacement {
            piece,
            from: Some(from),
            to: Some(to),
        }
    }

    /// A piece leaving the board from `from`.
    pub fn removal(piece: PieceId, from: Square) -> Self {
        Displacement {
            piece,
            from: Some(from),
            to: None,
        }
    }

    /// A piece entering the board on `to`.
    pub fn arrival(piece: PieceId, to: Square) -> Self {
        Displacement {
            piece,
            from: None,
            to: Some(to),
        }
    }
}

/// Everything one committed ply changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Side that made the move.
    pub side: Color,
    /// The piece the player moved.
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// Piece taken this ply, including an en passant victim.
    pub captured: Option<PieceId>,
    /// Every piece that changed cell, in application order.
    pub displacements: Vec<Displacement>,
}

impl MoveRecord {
    /// Returns true if `piece` changed cell in this ply.
    pub fn touches(&self, piece: PieceId) -> bool {
        self.displacements.iter().any(|d| d.piece == piece)
    }
}

/// Past and future stacks of move records.
///
/// Recording a new move discards the future: branching history is not kept.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<MoveRecord>,
    future: Vec<MoveRecord>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and clears the redo stack.
    pub fn record(&mut self, record: MoveRecord) {
        self.past.push(record);
        self.future.clear();
    }

    /// Moves the latest record to the redo stack and returns it.
    pub fn undo(&mut self) -> Option<&MoveRecord> {
        let record = self.past.pop()?;
        self.future.push(record);
        self.future.last()
    }

    /// Moves the latest undone record back to the past and returns it.
    pub fn redo(&mut self) -> Option<&MoveRecord> {
        let record = self.future.pop()?;
        self.past.push(record);
        self.past.last()
    }

    /// Returns the most recent committed record.
    pub fn last(&self) -> Option<&MoveRecord> {
        self.past.last()
    }

    /// Committed records, oldest first.
    pub fn past(&self) -> &[MoveRecord] {
        &self.past
    }

    /// Undone records, the next one to redo last.
    pub fn future(&self) -> &[MoveRecord] {
        &self.future
    }

    /// Returns true if `piece` appears in any committed record.
    pub fn has_moved(&self, piece: PieceId) -> bool {
        self.past.iter().any(|r| r.touches(piece))
    }

    /// Number of trailing plies without a pawn move or a capture.
    ///
    /// `is_pawn` tells whether a moving piece is a pawn; the history does not
    /// own the pieces.
    pub fn quiet_plies(&self, is_pawn: impl Fn(PieceId) -> bool) -> usize {
        self.past
            .iter()
            .rev()
            .take_while(|r| r.captured.is_none() && !is_pawn(r.piece))
            .count()
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(piece: u16, captured: Option<u16>) -> MoveRecord {
        let from = Square::new(0, 0);
        let to = Square::new(0, 1);
        MoveRecord {
            side: Color::White,
            piece: PieceId(piece),
            from,
            to,
            kind: MoveKind::Normal,
            captured: captured.map(PieceId),
            displacements: vec![Displacement::step(PieceId(piece), from, to)],
        }
    }

    #[test]
    fn undo_redo_move_records_between_stacks() {
        let mut history = History::new();
        history.record(record(1, None));
        history.record(record(2, None));

        assert_eq!(history.undo().map(|r| r.piece), Some(PieceId(2)));
        assert_eq!(history.past().len(), 1);
        assert_eq!(history.future().len(), 1);

        assert_eq!(history.redo().map(|r| r.piece), Some(PieceId(2)));
        assert!(history.future().is_empty());
        assert!(history.redo().is_none());
    }

    #[test]
    fn recording_clears_future() {
        let mut history = History::new();
        history.record(record(1, None));
        history.undo();
        history.record(record(3, None));
        assert!(history.future().is_empty());
        assert_eq!(history.past().len(), 1);
    }

    #[test]
    fn has_moved_only_counts_past() {
        let mut history = History::new();
        history.record(record(4, None));
        assert!(history.has_moved(PieceId(4)));
        history.undo();
        assert!(!history.has_moved(PieceId(4)));
    }

    #[test]
    fn quiet_plies_stop_at_pawn_moves_and_captures() {
        let mut history = History::new();
        history.record(record(1, None));
        history.record(record(2, Some(9)));
        history.record(record(3, None));
        history.record(record(4, None));
        assert_eq!(history.quiet_plies(|_| false), 2);
        assert_eq!(history.quiet_plies(|id| id == PieceId(4)), 0);
    }
}
