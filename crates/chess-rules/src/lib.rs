//! Chess rules engine for square boards of any size.
//!
//! This crate provides:
//! - [`Board`] - piece arena plus a cell grid, standard layout on boards of 8 or more files
//! - [`Game`] - game session with undo/redo, promotion and draw claims
//! - [`History`] - the committed move log, each ply as a list of [`Displacement`]s
//! - Move generation ([`movegen`]) and check detection ([`threat`])
//! - Scripted setup directives ([`setup`]) for demos and tests
//!
//! # Architecture
//!
//! Pieces live in an arena owned by the board and are referred to by
//! [`PieceId`]. Captured pieces keep their arena slot with no location, so
//! undoing a capture only needs to put the id back on its square.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::{Game, MoveOutcome};
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert!(game.legal_destinations(e2).unwrap().contains(&e4));
//! assert_eq!(game.commit_move(e2, e4), Ok(MoveOutcome::Continued));
//! game.undo().unwrap();
//! ```

mod board;
mod game;
mod history;
pub mod movegen;
mod piece;
pub mod setup;
pub mod threat;

pub use board::{Board, Layout};
pub use game::{DrawReason, Game, GameError, GameStatus, MoveOutcome, Termination};
pub use history::{Displacement, History, MoveRecord};
pub use piece::{movement, Movement, Piece, PieceId};
pub use setup::{builtin_preset, Directive, Preset, SetupError, BUILTIN_PRESETS};
