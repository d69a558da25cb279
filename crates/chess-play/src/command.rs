//! Parsing of the commands typed at the prompt.

use chess_core::{PieceKind, Square, SquareParseError};
use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Moves(Square),
    Move { from: Square, to: Square },
    Promote(PieceKind),
    Undo,
    Redo,
    Draw,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("'{0}' needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error(transparent)]
    BadSquare(#[from] SquareParseError),
    #[error("unknown piece '{0}'")]
    BadPiece(String),
}

pub const HELP: &str = "\
commands:
  show                 print the board
  moves <sq>           list legal destinations of the piece on <sq>
  move <from> <to>     move a piece, also written as e2e4
  promote <q|r|b|n>    finish a pending promotion
  undo, redo           step through the move history
  draw                 claim a draw by repetition or the fifty-move rule
  help, quit";

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "show" | "board" => Command::Show,
            "moves" => Command::Moves(argument(&mut words, "moves", "a square")?.parse()?),
            "move" => {
                let from = argument(&mut words, "move", "two squares")?;
                match words.next() {
                    Some(to) => Command::Move {
                        from: from.parse()?,
                        to: to.parse()?,
                    },
                    None => concatenated_move(from)?,
                }
            }
            "promote" => {
                let name = argument(&mut words, "promote", "a piece")?;
                let kind = PieceKind::from_name(name)
                    .ok_or_else(|| CommandError::BadPiece(name.to_string()))?;
                Command::Promote(kind)
            }
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "draw" => Command::Draw,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => concatenated_move(other).map_err(|_| CommandError::Unknown(head.to_string()))?,
        };
        Ok(command)
    }
}

fn argument<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    words
        .next()
        .ok_or(CommandError::MissingArgument(command, what))
}

/// Splits `e2e4` or `a10a9` into two squares: the second square starts at the
/// first letter after the leading one.
fn concatenated_move(text: &str) -> Result<Command, CommandError> {
    let split = text
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .ok_or_else(|| SquareParseError::Invalid(text.to_string()))?;
    let (from, to) = text.split_at(split);
    Ok(Command::Move {
        from: from.parse()?,
        to: to.parse()?,
    })
}
