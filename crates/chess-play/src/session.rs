//! Interactive session: runs parsed commands against a [`Game`].

use crate::command::{Command, HELP};
use crate::render;
use chess_core::{MoveKind, Square};
use chess_rules::{Game, GameError, MoveOutcome};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Whether the read loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    game: Game,
    unicode: bool,
}

impl Session {
    pub fn new(game: Game, unicode: bool) -> Self {
        Self { game, unicode }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.show(out, &BTreeSet::new())?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let flow = match Command::parse(&line) {
                Ok(command) => self.execute(command, out)?,
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Runs one command. Rule violations are reported to `out`; only I/O
    /// failures are returned as errors.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Show => self.show(out, &BTreeSet::new())?,
            Command::Moves(square) => match self.game.legal_destinations(square) {
                Ok(targets) => {
                    self.show(out, &targets)?;
                    writeln!(out, "{}", describe_moves(square, &targets))?;
                }
                Err(e) => fail(out, command, e)?,
            },
            Command::Move { from, to } => {
                let result = self.game.commit_move(from, to);
                self.after_move(out, command, result)?;
            }
            Command::Promote(kind) => {
                let result = self.game.promote(kind);
                self.after_move(out, command, result)?;
            }
            Command::Undo => {
                let result = self.game.undo();
                self.after_step(out, command, result)?;
            }
            Command::Redo => {
                let result = self.game.redo();
                self.after_step(out, command, result)?;
            }
            Command::Draw => {
                let result = self.game.claim_draw().map(|_| ());
                self.after_step(out, command, result)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn after_move(
        &self,
        out: &mut impl Write,
        command: Command,
        result: Result<MoveOutcome, GameError>,
    ) -> io::Result<()> {
        match result {
            Ok(MoveOutcome::PromotionPending) => writeln!(out, "{}", render::status(&self.game)),
            Ok(_) => {
                if let Some(record) = self.game.history().last() {
                    if !matches!(record.kind, MoveKind::Normal | MoveKind::DoublePush) {
                        writeln!(out, "{}{}: {}", record.from, record.to, record.kind)?;
                    }
                }
                self.show(out, &BTreeSet::new())
            }
            Err(e) => fail(out, command, e),
        }
    }

    fn after_step(
        &self,
        out: &mut impl Write,
        command: Command,
        result: Result<(), GameError>,
    ) -> io::Result<()> {
        match result {
            Ok(()) => self.show(out, &BTreeSet::new()),
            Err(e) => fail(out, command, e),
        }
    }

    fn show(&self, out: &mut impl Write, marks: &BTreeSet<Square>) -> io::Result<()> {
        write!(out, "{}", render::board(self.game.board(), marks, self.unicode))?;
        writeln!(out, "{}", render::status(&self.game))?;
        if self.game.can_claim_draw() {
            writeln!(out, "a draw can be claimed with 'draw'")?;
        }
        Ok(())
    }
}

fn fail(out: &mut impl Write, command: Command, error: GameError) -> io::Result<()> {
    tracing::debug!("command {:?} failed: {}", command, error);
    writeln!(out, "error: {error}")
}

fn describe_moves(square: Square, targets: &BTreeSet<Square>) -> String {
    if targets.is_empty() {
        return format!("no legal moves from {square}");
    }
    let names: Vec<String> = targets.iter().map(ToString::to_string).collect();
    format!("{square}: {}", names.join(" "))
}
