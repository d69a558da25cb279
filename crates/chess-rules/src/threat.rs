//! Check detection and terminal-state detection.
//!
//! Everything here is recomputed from scratch on every call; there are no
//! incremental attack maps. Move simulation works on a copy of the board, so
//! callers never observe a half-applied move.

use crate::board::Board;
use crate::history::History;
use crate::movegen::{legal_destinations, plan_move, threatened_squares};
use crate::piece::PieceId;
use chess_core::{Color, Square};
use std::collections::BTreeSet;

/// Returns true if any piece of `by` threatens `square`.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(id, _)| threatened_squares(board, id).contains(&square))
}

/// Returns the squares of the enemy pieces attacking `king`.
pub fn attackers(board: &Board, king: PieceId) -> Vec<Square> {
    let king_piece = board.piece(king);
    let Some(target) = king_piece.location() else {
        return Vec::new();
    };
    board
        .pieces_of(king_piece.side().opposite())
        .filter(|(id, _)| threatened_squares(board, *id).contains(&target))
        .filter_map(|(_, p)| p.location())
        .collect()
}

/// Returns true if `king` is attacked.
pub fn is_attacked(board: &Board, king: PieceId) -> bool {
    let king_piece = board.piece(king);
    king_piece
        .location()
        .is_some_and(|square| is_square_attacked(board, square, king_piece.side().opposite()))
}

/// Returns true if moving `piece` to `to` leaves `king` attacked.
pub fn would_expose_check(
    board: &Board,
    history: &History,
    king: PieceId,
    piece: PieceId,
    to: Square,
) -> bool {
    let Some(plan) = plan_move(board, history, piece, to) else {
        return true;
    };
    let mut scratch = board.clone();
    scratch.apply(&plan.displacements);
    is_attacked(&scratch, king)
}

/// Returns the destinations of `piece` that do not leave `king` attacked.
pub fn legal_moves(
    board: &Board,
    history: &History,
    king: PieceId,
    piece: PieceId,
) -> BTreeSet<Square> {
    legal_destinations(board, history, piece)
        .into_iter()
        .filter(|&to| !would_expose_check(board, history, king, piece, to))
        .collect()
}

/// Returns true if the side owning `king` has at least one move that does not
/// leave it attacked. Stops at the first one found.
pub fn has_legal_move(board: &Board, history: &History, king: PieceId) -> bool {
    let side = board.piece(king).side();
    board.pieces_of(side).any(|(id, _)| {
        legal_destinations(board, history, id)
            .into_iter()
            .any(|to| !would_expose_check(board, history, king, id, to))
    })
}

/// The side owning `king` is attacked and cannot escape.
pub fn checkmate(board: &Board, history: &History, king: PieceId) -> bool {
    is_attacked(board, king) && !has_legal_move(board, history, king)
}

/// The side owning `king` is not attacked but has no legal move.
pub fn stalemate(board: &Board, history: &History, king: PieceId) -> bool {
    !is_attacked(board, king) && !has_legal_move(board, history, king)
}
