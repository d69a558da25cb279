//! Game session with history tracking.
//!
//! The [`Game`] struct owns the board, the undo/redo log and the status, and
//! is the only place where committed moves mutate the board:
//! - legal destinations filtered for self-check
//! - commits with castling, en passant and promotion side effects
//! - undo/redo of whole plies
//! - check, checkmate, stalemate and draw claims

use crate::board::{Board, Layout};
use crate::history::{Displacement, History, MoveRecord};
use crate::movegen::{needs_promotion, plan_move};
use crate::piece::PieceId;
use crate::setup::{Directive, SetupError};
use crate::threat;
use chess_core::{Color, MoveKind, PieceKind, Square};
use std::collections::BTreeSet;
use thiserror::Error;

/// Error type for game operations.
///
/// Every error leaves the game exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("square {square} is outside the {size}x{size} board")]
    OutOfBounds { square: Square, size: u8 },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("cannot promote to {0}; choose queen, rook, bishop or knight")]
    InvalidPromotionChoice(PieceKind),

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("game has already ended")]
    GameOver,

    #[error("cannot claim draw: conditions not met")]
    CannotClaimDraw,

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Reason for a claimed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// 100 plies without a pawn move or capture.
    FiftyMoveRule,
    /// The same position with the same side to move occurred three times.
    ThreefoldRepetition,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for a move by this side.
    ToMove(Color),
    /// A pawn move to the last rank was accepted; waiting for the piece choice.
    /// The board is untouched until [`Game::promote`] is called.
    AwaitingPromotion { side: Color, from: Square, to: Square },
    /// The game is over and no longer changes.
    Terminal(Termination),
}

/// Result of a successful commit, from the point of view of the side now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on and the side to move is not in check.
    Continued,
    /// The given side is in check but can escape.
    Check(Color),
    /// The given side won.
    Checkmate(Color),
    Stalemate,
    /// The move needs a promotion choice, see [`Game::promote`].
    PromotionPending,
}

/// Board layout plus side to move; equal keys are repeated positions.
///
/// Castling rights and en passant availability are not part of the key, so
/// two positions that differ only in those count as the same position.
type PositionKey = (Layout, Color);

/// A chess game session.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: History,
    status: GameStatus,
    /// King ids indexed by [`Color::index`].
    kings: [PieceId; 2],
    /// Position after every committed ply, starting position first.
    positions: Vec<PositionKey>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Plies without pawn move or capture after which a draw may be claimed.
    pub const FIFTY_MOVE_PLIES: usize = 100;

    /// Creates a new game with the standard starting position.
    ///
    /// # Panics
    ///
    /// Never in practice: the standard 8x8 layout is always valid.
    pub fn new() -> Self {
        Self::with_size(Board::STANDARD_SIZE).expect("standard 8x8 layout is valid")
    }

    /// Creates a game with the standard layout on a `size x size` board.
    pub fn with_size(size: u8) -> Result<Self, SetupError> {
        Self::from_board(Board::standard(size)?, Color::White)
    }

    /// Creates a game from a custom position.
    ///
    /// Each side must have exactly one king. The status is evaluated at once,
    /// so a position can start out as checkmate or stalemate.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, SetupError> {
        let kings = [
            sole_king(&board, Color::White)?,
            sole_king(&board, Color::Black)?,
        ];
        let mut game = Game {
            board,
            history: History::new(),
            status: GameStatus::ToMove(side_to_move),
            kings,
            positions: Vec::new(),
        };
        let start = game.position_key(side_to_move);
        game.positions.push(start);
        game.evaluate();
        Ok(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the side to move, or `None` once the game is over.
    pub fn side_to_move(&self) -> Option<Color> {
        match self.status {
            GameStatus::ToMove(side) | GameStatus::AwaitingPromotion { side, .. } => Some(side),
            GameStatus::Terminal(_) => None,
        }
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Terminal(_))
    }

    /// Returns the king of `side`.
    pub fn king(&self, side: Color) -> PieceId {
        self.kings[side.index()]
    }

    fn check_bounds(&self, square: Square) -> Result<(), GameError> {
        if self.board.contains(square) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                square,
                size: self.board.size(),
            })
        }
    }

    /// Returns the piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Result<Option<PieceId>, GameError> {
        self.check_bounds(square)?;
        Ok(self.board.piece_at(square))
    }

    /// Returns where the piece on `square` may legally move, after rejecting
    /// moves that leave its own king attacked.
    ///
    /// Empty squares yield an empty set, and so does every square while a
    /// promotion is pending or after the game has ended.
    pub fn legal_destinations(&self, square: Square) -> Result<BTreeSet<Square>, GameError> {
        let occupant = self.piece_at(square)?;
        Ok(match (self.status, occupant) {
            (GameStatus::ToMove(_), Some(piece)) => self.moves_of(piece),
            _ => BTreeSet::new(),
        })
    }

    fn moves_of(&self, piece: PieceId) -> BTreeSet<Square> {
        let king = self.king(self.board.piece(piece).side());
        threat::legal_moves(&self.board, &self.history, king, piece)
    }

    /// Returns true if the king of `side` is attacked.
    pub fn is_attacked(&self, side: Color) -> bool {
        threat::is_attacked(&self.board, self.king(side))
    }

    /// Returns the squares of the pieces giving check to `side`.
    pub fn attackers(&self, side: Color) -> Vec<Square> {
        threat::attackers(&self.board, self.king(side))
    }

    /// Returns true if `side` is checkmated.
    pub fn is_checkmate(&self, side: Color) -> bool {
        threat::checkmate(&self.board, &self.history, self.king(side))
    }

    /// Returns true if `side` is stalemated.
    pub fn is_stalemate(&self, side: Color) -> bool {
        threat::stalemate(&self.board, &self.history, self.king(side))
    }

    /// Returns the side to move if moves, undo and redo are currently allowed.
    fn active_side(&self) -> Result<Color, GameError> {
        match self.status {
            GameStatus::ToMove(side) => Ok(side),
            GameStatus::AwaitingPromotion { .. } => Err(GameError::PromotionPending),
            GameStatus::Terminal(_) => Err(GameError::GameOver),
        }
    }

    /// Moves the piece on `from` to `to`.
    ///
    /// A pawn reaching the last rank is not moved yet: the game returns
    /// [`MoveOutcome::PromotionPending`] and waits for [`Game::promote`].
    pub fn commit_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        let side = self.active_side()?;
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;

        if self.board.piece(piece).side() != side || !self.moves_of(piece).contains(&to) {
            tracing::debug!(%from, %to, "rejected illegal move");
            return Err(GameError::IllegalMove { from, to });
        }

        if needs_promotion(&self.board, piece, to) {
            self.status = GameStatus::AwaitingPromotion { side, from, to };
            return Ok(MoveOutcome::PromotionPending);
        }
        self.perform(side, piece, from, to, None)
    }

    /// Completes a pending promotion with the chosen piece kind.
    ///
    /// Invalid choices are rejected and the promotion stays pending.
    pub fn promote(&mut self, choice: PieceKind) -> Result<MoveOutcome, GameError> {
        let GameStatus::AwaitingPromotion { side, from, to } = self.status else {
            return Err(GameError::NoPendingPromotion);
        };
        if !choice.is_promotion_choice() {
            return Err(GameError::InvalidPromotionChoice(choice));
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        self.perform(side, piece, from, to, Some(choice))
    }

    /// Abandons a pending promotion; the same side is to move again.
    pub fn cancel_promotion(&mut self) -> Result<(), GameError> {
        let GameStatus::AwaitingPromotion { side, .. } = self.status else {
            return Err(GameError::NoPendingPromotion);
        };
        self.status = GameStatus::ToMove(side);
        Ok(())
    }

    /// Applies a validated move and records it.
    fn perform(
        &mut self,
        side: Color,
        piece: PieceId,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, GameError> {
        let plan = plan_move(&self.board, &self.history, piece, to)
            .ok_or(GameError::IllegalMove { from, to })?;

        let mut kind = plan.kind;
        let mut displacements = plan.displacements;
        if let Some(choice) = promotion {
            // The pawn leaves the board and a new piece takes its place.
            let promoted = match self.undone_promotion(piece, to, choice) {
                Some(id) => id,
                None => self.board.spawn_detached(choice, side, to)?,
            };
            if let Some(step) = displacements.iter_mut().find(|d| d.piece == piece) {
                step.to = None;
            }
            displacements.push(Displacement::arrival(promoted, to));
            kind = MoveKind::Promotion(choice);
        }

        self.board.apply(&displacements);
        self.history.record(MoveRecord {
            side,
            piece,
            from,
            to,
            kind,
            captured: plan.captured,
            displacements,
        });
        tracing::debug!(%side, %from, %to, %kind, "move committed");

        let next = side.opposite();
        self.status = GameStatus::ToMove(next);
        let key = self.position_key(next);
        self.positions.push(key);
        Ok(self.evaluate())
    }

    /// Returns the promoted piece of the next redo record if it replays the
    /// same promotion, so repeating an undone promotion reuses its arena slot.
    fn undone_promotion(&self, pawn: PieceId, to: Square, choice: PieceKind) -> Option<PieceId> {
        let record = self.history.future().last()?;
        if record.piece != pawn || record.to != to || record.kind != MoveKind::Promotion(choice) {
            return None;
        }
        record
            .displacements
            .iter()
            .find(|d| d.piece != pawn && d.from.is_none() && d.to == Some(to))
            .map(|d| d.piece)
    }

    /// Decides check, checkmate or stalemate for the side to move.
    fn evaluate(&mut self) -> MoveOutcome {
        let GameStatus::ToMove(side) = self.status else {
            return MoveOutcome::Continued;
        };
        let king = self.king(side);
        let attacked = threat::is_attacked(&self.board, king);
        if threat::has_legal_move(&self.board, &self.history, king) {
            return if attacked {
                MoveOutcome::Check(side)
            } else {
                MoveOutcome::Continued
            };
        }

        if attacked {
            let winner = side.opposite();
            self.status = GameStatus::Terminal(Termination::Checkmate { winner });
            tracing::info!(%winner, "checkmate");
            MoveOutcome::Checkmate(winner)
        } else {
            self.status = GameStatus::Terminal(Termination::Stalemate);
            tracing::info!("stalemate");
            MoveOutcome::Stalemate
        }
    }

    /// Takes back the last committed ply, restoring captured pieces.
    pub fn undo(&mut self) -> Result<(), GameError> {
        self.active_side()?;
        let record = self.history.undo().ok_or(GameError::NothingToUndo)?;
        self.board.revert(&record.displacements);
        self.status = GameStatus::ToMove(record.side);
        tracing::debug!(from = %record.from, to = %record.to, "move undone");
        self.positions.pop();
        Ok(())
    }

    /// Replays the last undone ply, including its promotion choice.
    pub fn redo(&mut self) -> Result<(), GameError> {
        self.active_side()?;
        let record = self.history.redo().ok_or(GameError::NothingToRedo)?;
        self.board.apply(&record.displacements);
        tracing::debug!(from = %record.from, to = %record.to, "move redone");
        let next = record.side.opposite();
        self.status = GameStatus::ToMove(next);
        let key = self.position_key(next);
        self.positions.push(key);
        self.evaluate();
        Ok(())
    }

    fn position_key(&self, side: Color) -> PositionKey {
        (self.board.layout(), side)
    }

    /// Returns the number of plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> usize {
        self.history
            .quiet_plies(|id| self.board.piece(id).kind() == PieceKind::Pawn)
    }

    /// Counts how many times the current position has occurred.
    pub fn position_count(&self) -> usize {
        match self.positions.last() {
            Some(current) => self.positions.iter().filter(|&k| k == current).count(),
            None => 0,
        }
    }

    /// Returns true if a draw can be claimed (threefold repetition or 50-move rule).
    pub fn can_claim_draw(&self) -> bool {
        matches!(self.status, GameStatus::ToMove(_))
            && (self.position_count() >= 3 || self.halfmove_clock() >= Self::FIFTY_MOVE_PLIES)
    }

    /// Claims a draw if conditions are met.
    pub fn claim_draw(&mut self) -> Result<DrawReason, GameError> {
        self.active_side()?;
        let reason = if self.position_count() >= 3 {
            DrawReason::ThreefoldRepetition
        } else if self.halfmove_clock() >= Self::FIFTY_MOVE_PLIES {
            DrawReason::FiftyMoveRule
        } else {
            return Err(GameError::CannotClaimDraw);
        };
        self.status = GameStatus::Terminal(Termination::Draw(reason));
        tracing::info!(?reason, "draw claimed");
        Ok(reason)
    }

    /// Runs setup directives, relocating pieces without checking legality.
    ///
    /// Either every directive applies or the game is left untouched. The
    /// history is cleared afterwards: the result is a new starting position.
    pub fn apply_setup(&mut self, directives: &[Directive]) -> Result<(), GameError> {
        if matches!(self.status, GameStatus::AwaitingPromotion { .. }) {
            return Err(GameError::PromotionPending);
        }
        let mut board = self.board.clone();
        for directive in directives {
            directive.apply(&mut board)?;
        }

        let side = self.side_to_move().unwrap_or(Color::White);
        self.board = board;
        self.history.clear();
        self.status = GameStatus::ToMove(side);
        self.positions = vec![self.position_key(side)];
        self.evaluate();
        Ok(())
    }
}

fn sole_king(board: &Board, side: Color) -> Result<PieceId, SetupError> {
    match board.kings(side).as_slice() {
        [king] => Ok(*king),
        [] => Err(SetupError::MissingKing(side)),
        _ => Err(SetupError::DuplicateKing(side)),
    }
}
