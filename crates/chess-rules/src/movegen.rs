//! Move generation.
//!
//! Candidates are produced by walking each piece's movement template over
//! the board. They are not filtered for leaving the mover's own king in
//! check; see [`crate::threat`] for that.

use crate::board::Board;
use crate::history::{Displacement, History};
use crate::piece::{Piece, PieceId};
use crate::threat::is_square_attacked;
use chess_core::{MoveKind, Offset, PieceKind, Square};

/// The board changes a move will cause, worked out before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub kind: MoveKind,
    pub captured: Option<PieceId>,
    /// Captures first, then the mover, then a castling rook.
    pub displacements: Vec<Displacement>,
}

/// Returns the relative destinations a piece may move to, ignoring self-check.
///
/// Sliding pieces repeat their template up to the board size; every other
/// piece applies it once. A direction ends at the board edge, at a friendly
/// piece (not included) or at an enemy piece (included as a capture), unless
/// the piece jumps.
pub fn candidate_offsets(board: &Board, history: &History, id: PieceId) -> Vec<Offset> {
    let piece = board.piece(id);
    let Some(from) = piece.location() else {
        return Vec::new();
    };

    let mut offsets = Vec::new();
    match piece.kind() {
        PieceKind::Pawn => pawn_offsets(board, history, id, from, &mut offsets),
        PieceKind::King => {
            template_offsets(board, piece, from, &mut offsets);
            castling_offsets(board, history, id, from, &mut offsets);
        }
        _ => template_offsets(board, piece, from, &mut offsets),
    }
    offsets
}

/// Returns the absolute squares a piece may move to, ignoring self-check.
pub fn legal_destinations(board: &Board, history: &History, id: PieceId) -> Vec<Square> {
    let Some(from) = board.piece(id).location() else {
        return Vec::new();
    };
    candidate_offsets(board, history, id)
        .into_iter()
        .filter_map(|offset| from.offset(offset, board.size()))
        .collect()
}

fn reach(board: &Board, piece: &Piece) -> i8 {
    if piece.movement().bounded {
        1
    } else {
        board.size() as i8
    }
}

fn template_offsets(board: &Board, piece: &Piece, from: Square, out: &mut Vec<Offset>) {
    let movement = piece.movement();
    for &direction in movement.offsets {
        for multiplier in 1..=reach(board, piece) {
            let offset = direction * multiplier;
            let Some(to) = from.offset(offset, board.size()) else {
                break;
            };
            match board.occupant(to) {
                None => out.push(offset),
                Some(other) if other.side() != piece.side() => {
                    out.push(offset);
                    if !movement.can_jump {
                        break;
                    }
                }
                Some(_) => {
                    if !movement.can_jump {
                        break;
                    }
                }
            }
        }
    }
}

fn pawn_offsets(board: &Board, history: &History, id: PieceId, from: Square, out: &mut Vec<Offset>) {
    let pawn = board.piece(id);
    let movement = pawn.movement();

    // Pushes never capture; the double push also needs the first square free.
    let unmoved = is_unmoved(board, history, id);
    for (i, &push) in movement.offsets.iter().enumerate() {
        if i > 0 && !unmoved {
            break;
        }
        let offset = pawn.orient(push);
        match from.offset(offset, board.size()) {
            Some(to) if board.is_empty(to) => out.push(offset),
            _ => break,
        }
    }

    for &capture in movement.captures {
        let offset = pawn.orient(capture);
        let Some(to) = from.offset(offset, board.size()) else {
            continue;
        };
        match board.occupant(to) {
            Some(other) if other.side() != pawn.side() => out.push(offset),
            Some(_) => {}
            None => {
                if en_passant_victim(board, history, id, to).is_some() {
                    out.push(offset);
                }
            }
        }
    }
}

fn castling_offsets(board: &Board, history: &History, id: PieceId, from: Square, out: &mut Vec<Offset>) {
    if !is_unmoved(board, history, id) {
        return;
    }
    let enemy = board.piece(id).side().opposite();
    if is_square_attacked(board, from, enemy) {
        return;
    }
    for direction in [1i8, -1] {
        if castling_rook(board, history, id, direction).is_none() {
            continue;
        }
        let transit = from.offset(Offset::new(direction, 0), board.size());
        let landing = from.offset(Offset::new(2 * direction, 0), board.size());
        let (Some(transit), Some(landing)) = (transit, landing) else {
            continue;
        };
        if !is_square_attacked(board, transit, enemy) && !is_square_attacked(board, landing, enemy) {
            out.push(Offset::new(2 * direction, 0));
        }
    }
}

/// Returns true if the piece stands where it was created and no committed
/// move has touched it.
pub fn is_unmoved(board: &Board, history: &History, id: PieceId) -> bool {
    let piece = board.piece(id);
    piece.location() == Some(piece.origin()) && !history.has_moved(id)
}

fn rook_file(board: &Board, direction: i8) -> u8 {
    if direction > 0 {
        board.size() - 1
    } else {
        0
    }
}

/// Returns the rook the king may castle with in `direction` (+1 towards the
/// far file), if the rook is unmoved and every square between them is empty.
fn castling_rook(board: &Board, history: &History, king: PieceId, direction: i8) -> Option<PieceId> {
    let king_piece = board.piece(king);
    let from = king_piece.location()?;
    let file = rook_file(board, direction);
    let rook = board.piece_at(Square::new(file, from.rank()))?;
    let rook_piece = board.piece(rook);
    if rook_piece.kind() != PieceKind::Rook
        || rook_piece.side() != king_piece.side()
        || !is_unmoved(board, history, rook)
    {
        return None;
    }

    let (low, high) = (from.file().min(file), from.file().max(file));
    if high - low < 3 {
        return None;
    }
    ((low + 1)..high)
        .all(|f| board.is_empty(Square::new(f, from.rank())))
        .then_some(rook)
}

/// Returns the pawn a diagonal step onto the empty square `to` would take en
/// passant: an enemy pawn that made a double push on the immediately
/// preceding ply and now stands beside the capturing pawn.
pub fn en_passant_victim(board: &Board, history: &History, pawn: PieceId, to: Square) -> Option<PieceId> {
    let from = board.piece(pawn).location()?;
    let last = history.last()?;
    if last.kind != MoveKind::DoublePush {
        return None;
    }
    let victim = board.piece(last.piece);
    let beside = Square::new(to.file(), from.rank());
    let eligible = victim.kind() == PieceKind::Pawn
        && victim.side() != board.piece(pawn).side()
        && victim.location() == Some(beside)
        && last.to == beside;
    eligible.then_some(last.piece)
}

/// Returns true if moving this piece to `to` is a pawn reaching its last rank.
pub fn needs_promotion(board: &Board, id: PieceId, to: Square) -> bool {
    let piece = board.piece(id);
    piece.kind() == PieceKind::Pawn && to.rank() == piece.side().promotion_rank(board.size())
}

/// Works out the displacements for moving `id` to `to`, detecting en passant,
/// castling and double pushes. Returns `None` for a piece off the board.
///
/// Promotion is not part of the plan: the game swaps the pawn afterwards.
pub fn plan_move(board: &Board, history: &History, id: PieceId, to: Square) -> Option<MovePlan> {
    let piece = board.piece(id);
    let from = piece.location()?;
    let delta = from.delta(to);

    let mut kind = MoveKind::Normal;
    let mut captured = board.piece_at(to);
    match piece.kind() {
        PieceKind::Pawn if delta.file != 0 && captured.is_none() => {
            captured = en_passant_victim(board, history, id, to);
            if captured.is_some() {
                kind = MoveKind::EnPassant;
            }
        }
        PieceKind::Pawn if delta.rank.abs() == 2 => kind = MoveKind::DoublePush,
        PieceKind::King if delta.file.abs() == 2 => {
            kind = if delta.file > 0 {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            };
        }
        _ => {}
    }

    let mut displacements = Vec::with_capacity(2);
    if let Some(victim) = captured {
        if let Some(at) = board.piece(victim).location() {
            displacements.push(Displacement::removal(victim, at));
        }
    }
    displacements.push(Displacement::step(id, from, to));

    if kind.is_castling() {
        let direction = delta.file.signum();
        let rook_from = Square::new(rook_file(board, direction), from.rank());
        if let Some(rook) = board.piece_at(rook_from) {
            let rook_to = Square::new((to.file() as i8 - direction) as u8, to.rank());
            displacements.push(Displacement::step(rook, rook_from, rook_to));
        }
    }

    Some(MovePlan {
        kind,
        captured,
        displacements,
    })
}

/// Returns the squares a piece threatens.
///
/// Same walk as the candidate generator without castling, except that pawns
/// threaten both forward diagonals whether or not anything stands there and
/// occupied squares end a line regardless of color. On a square holding an
/// enemy king this matches the candidate set exactly.
pub(crate) fn threatened_squares(board: &Board, id: PieceId) -> Vec<Square> {
    let piece = board.piece(id);
    let Some(from) = piece.location() else {
        return Vec::new();
    };
    let movement = piece.movement();

    if piece.kind() == PieceKind::Pawn {
        return movement
            .captures
            .iter()
            .filter_map(|&c| from.offset(piece.orient(c), board.size()))
            .collect();
    }

    let mut squares = Vec::new();
    for &direction in movement.offsets {
        for multiplier in 1..=reach(board, piece) {
            let Some(to) = from.offset(direction * multiplier, board.size()) else {
                break;
            };
            squares.push(to);
            if board.piece_at(to).is_some() && !movement.can_jump {
                break;
            }
        }
    }
    squares
}
