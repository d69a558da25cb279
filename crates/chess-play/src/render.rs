//! Text rendering of the board and game status.

use chess_core::Square;
use chess_rules::{Board, DrawReason, Game, GameStatus, Termination};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Draws the board with the top rank first. Squares in `marks` show `*` when
/// empty and are bracketed when occupied.
pub fn board(board: &Board, marks: &BTreeSet<Square>, unicode: bool) -> String {
    let size = board.size();
    let mut out = String::new();
    for rank in (0..size).rev() {
        let _ = write!(out, "{:>3} ", u16::from(rank) + 1);
        for file in 0..size {
            let square = Square::new(file, rank);
            let glyph = match board.occupant(square) {
                Some(piece) if unicode => piece.kind().symbol(piece.side()),
                Some(piece) => piece.kind().to_char(piece.side()),
                None if marks.contains(&square) => '*',
                None => '.',
            };
            if marks.contains(&square) && !board.is_empty(square) {
                let _ = write!(out, "[{glyph}]");
            } else {
                let _ = write!(out, " {glyph} ");
            }
        }
        out.push('\n');
    }
    out.push_str("    ");
    for file in 0..size {
        let _ = write!(out, " {} ", char::from(b'a' + file));
    }
    out.push('\n');
    out
}

/// One line describing whose turn it is or how the game ended.
pub fn status(game: &Game) -> String {
    match game.status() {
        GameStatus::ToMove(side) if game.is_attacked(side) => format!("{side} to move, in check"),
        GameStatus::ToMove(side) => format!("{side} to move"),
        GameStatus::AwaitingPromotion { side, to, .. } => {
            format!("{side} promotes on {to}: promote <q|r|b|n>")
        }
        GameStatus::Terminal(Termination::Checkmate { winner }) => {
            format!("checkmate, {winner} wins")
        }
        GameStatus::Terminal(Termination::Stalemate) => "stalemate, draw".to_string(),
        GameStatus::Terminal(Termination::Draw(DrawReason::ThreefoldRepetition)) => {
            "draw by threefold repetition".to_string()
        }
        GameStatus::Terminal(Termination::Draw(DrawReason::FiftyMoveRule)) => {
            "draw by the fifty-move rule".to_string()
        }
    }
}
