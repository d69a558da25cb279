//! Game-level scenarios played through the public API.

use chess_core::{Color, MoveKind, PieceKind, Square};
use chess_rules::{
    builtin_preset, Board, Directive, Game, GameError, GameStatus, MoveOutcome, Termination,
};
use std::collections::BTreeSet;

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn squares(names: &[&str]) -> BTreeSet<Square> {
    names.iter().map(|n| sq(n)).collect()
}

fn play(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
    game.commit_move(sq(from), sq(to))
        .unwrap_or_else(|e| panic!("{from}{to} rejected: {e}"))
}

fn preset_game(name: &str) -> Game {
    let preset = builtin_preset(name).unwrap_or_else(|| panic!("no preset {name}"));
    let mut game = Game::new();
    game.apply_setup(&preset.directives).unwrap();
    game
}

fn board_with(pieces: &[(PieceKind, Color, &str)]) -> Board {
    let mut board = Board::empty(8).unwrap();
    for &(kind, side, at) in pieces {
        board.spawn(kind, side, sq(at)).unwrap();
    }
    board
}

#[test]
fn test_pawn_single_step_legal_triple_step_illegal() {
    let mut game = Game::new();
    assert_eq!(
        game.commit_move(sq("e2"), sq("e5")),
        Err(GameError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        })
    );
    assert_eq!(play(&mut game, "e2", "e3"), MoveOutcome::Continued);
}

#[test]
fn test_king_escapes_queen_on_open_file() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "d5"),
        (PieceKind::King, Color::White, "h1"),
        (PieceKind::Queen, Color::White, "a1"),
    ]);
    let mut game = Game::from_board(board, Color::Black).unwrap();
    assert!(!game.is_attacked(Color::Black));

    game.apply_setup(&[Directive::new(PieceKind::Queen, 1, Color::White, sq("d1"))])
        .unwrap();

    assert!(game.is_attacked(Color::Black));
    assert_eq!(game.attackers(Color::Black), vec![sq("d1")]);
    assert_eq!(
        game.legal_destinations(sq("d5")).unwrap(),
        squares(&["c4", "c5", "c6", "e4", "e5", "e6"])
    );
}

#[test]
fn test_queenside_castling_moves_king_and_rook_in_one_record() {
    let board = board_with(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Rook, Color::White, "a1"),
        (PieceKind::King, Color::Black, "e8"),
    ]);
    let mut game = Game::from_board(board, Color::White).unwrap();
    assert!(game.legal_destinations(sq("e1")).unwrap().contains(&sq("c1")));

    play(&mut game, "e1", "c1");
    let occupant = |name: &str| game.board().occupant(sq(name)).map(|p| p.kind());
    assert_eq!(occupant("c1"), Some(PieceKind::King));
    assert_eq!(occupant("d1"), Some(PieceKind::Rook));
    assert_eq!(occupant("a1"), None);
    assert_eq!(occupant("e1"), None);

    let record = game.history().last().unwrap();
    assert_eq!(record.kind, MoveKind::CastleQueenside);
    assert_eq!(record.displacements.len(), 2);
    assert_eq!(game.history().past().len(), 1);

    game.undo().unwrap();
    let occupant = |name: &str| game.board().occupant(sq(name)).map(|p| p.kind());
    assert_eq!(occupant("e1"), Some(PieceKind::King));
    assert_eq!(occupant("a1"), Some(PieceKind::Rook));
    assert_eq!(occupant("d1"), None);
}

#[test]
fn test_castling_refused_while_in_check_or_through_attack() {
    let board = board_with(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Rook, Color::White, "h1"),
        (PieceKind::King, Color::Black, "a8"),
        (PieceKind::Rook, Color::Black, "f8"),
    ]);
    let game = Game::from_board(board, Color::White).unwrap();
    assert!(!game.legal_destinations(sq("e1")).unwrap().contains(&sq("g1")));

    let board = board_with(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Rook, Color::White, "h1"),
        (PieceKind::King, Color::Black, "a8"),
        (PieceKind::Rook, Color::Black, "e8"),
    ]);
    let game = Game::from_board(board, Color::White).unwrap();
    assert!(game.is_attacked(Color::White));
    assert!(!game.legal_destinations(sq("e1")).unwrap().contains(&sq("g1")));
}

#[test]
fn test_moved_rook_cannot_castle() {
    let board = board_with(&[
        (PieceKind::King, Color::White, "e1"),
        (PieceKind::Rook, Color::White, "h1"),
        (PieceKind::King, Color::Black, "a8"),
    ]);
    let mut game = Game::from_board(board, Color::White).unwrap();
    play(&mut game, "h1", "h2");
    play(&mut game, "a8", "b8");
    play(&mut game, "h2", "h1");
    play(&mut game, "b8", "a8");
    assert!(!game.legal_destinations(sq("e1")).unwrap().contains(&sq("g1")));
}

#[test]
fn test_single_escape_then_blocked_is_checkmate() {
    let board = board_with(&[
        (PieceKind::King, Color::Black, "h8"),
        (PieceKind::Pawn, Color::Black, "h7"),
        (PieceKind::Pawn, Color::Black, "b6"),
        (PieceKind::Rook, Color::White, "a8"),
        (PieceKind::King, Color::White, "a1"),
    ]);
    let mut game = Game::from_board(board, Color::Black).unwrap();
    assert!(game.is_attacked(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(game.legal_destinations(sq("h8")).unwrap(), squares(&["g7"]));
    assert!(game.legal_destinations(sq("b6")).unwrap().is_empty());

    // Scan order is top rank first, so the b6 pawn is the second black pawn.
    game.apply_setup(&[Directive::new(PieceKind::Pawn, 2, Color::Black, sq("g7"))])
        .unwrap();
    assert!(game.is_checkmate(Color::Black));
    assert_eq!(
        game.status(),
        GameStatus::Terminal(Termination::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn test_en_passant_capture_and_undo() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6");
    play(&mut game, "e4", "e5");
    play(&mut game, "d7", "d5");
    assert!(game.legal_destinations(sq("e5")).unwrap().contains(&sq("d6")));

    play(&mut game, "e5", "d6");
    assert_eq!(game.board().piece_at(sq("d5")), None);
    let record = game.history().last().unwrap();
    assert_eq!(record.kind, MoveKind::EnPassant);
    assert!(record.captured.is_some());
    assert_eq!(record.displacements.len(), 2);

    game.undo().unwrap();
    let victim = game.board().occupant(sq("d5")).unwrap();
    assert_eq!((victim.kind(), victim.side()), (PieceKind::Pawn, Color::Black));
    assert_eq!(game.board().piece_at(sq("d6")), None);
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6");
    play(&mut game, "e4", "e5");
    play(&mut game, "d7", "d5");
    play(&mut game, "h2", "h3");
    play(&mut game, "h7", "h6");
    assert!(!game.legal_destinations(sq("e5")).unwrap().contains(&sq("d6")));
}

#[test]
fn test_pinned_pawn_cannot_leave_the_diagonal() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "e7", "e5");
    play(&mut game, "f1", "b5");
    assert!(game.legal_destinations(sq("d7")).unwrap().is_empty());
    assert_eq!(
        game.legal_destinations(sq("c7")).unwrap(),
        squares(&["c6", "c5"])
    );
}

#[test]
fn test_larger_board_game() {
    let mut game = Game::with_size(10).unwrap();
    assert_eq!(game.board().size(), 10);
    let rook = game.board().occupant(sq("j1")).unwrap();
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert!(game.board().is_empty(sq("f1")));

    assert_eq!(play(&mut game, "e2", "e4"), MoveOutcome::Continued);
    assert_eq!(play(&mut game, "e9", "e7"), MoveOutcome::Continued);
    assert_eq!(
        game.legal_destinations(sq("b1")).unwrap(),
        squares(&["a3", "c3"])
    );
}

#[test]
fn test_too_small_board_is_rejected() {
    assert!(Game::with_size(5).is_err());
}

#[test]
fn test_castle1_clears_both_castling_paths() {
    let mut game = preset_game("castle1");
    assert_eq!(game.status(), GameStatus::ToMove(Color::White));
    assert!(!game.is_attacked(Color::White));
    let king_moves = game.legal_destinations(sq("e1")).unwrap();
    assert!(king_moves.contains(&sq("c1")));
    assert!(king_moves.contains(&sq("g1")));

    assert_eq!(play(&mut game, "e1", "g1"), MoveOutcome::Continued);
    let occupant = |name: &str| game.board().occupant(sq(name)).map(|p| p.kind());
    assert_eq!(occupant("g1"), Some(PieceKind::King));
    assert_eq!(occupant("f1"), Some(PieceKind::Rook));
    assert_eq!(occupant("h1"), None);
    assert_eq!(occupant("e1"), None);

    let record = game.history().last().unwrap();
    assert_eq!(record.kind, MoveKind::CastleKingside);
    assert_eq!(record.displacements.len(), 2);
    assert_eq!(game.history().past().len(), 1);
}

#[test]
fn test_promotion1_pawn_promotes_on_a8() {
    let mut game = preset_game("promotion1");
    assert_eq!(
        game.legal_destinations(sq("a7")).unwrap(),
        squares(&["a8", "b8"])
    );
    assert_eq!(play(&mut game, "a7", "a8"), MoveOutcome::PromotionPending);
    assert_eq!(
        game.status(),
        GameStatus::AwaitingPromotion {
            side: Color::White,
            from: sq("a7"),
            to: sq("a8")
        }
    );

    assert_eq!(game.promote(PieceKind::Queen), Ok(MoveOutcome::Continued));
    let queen = game.board().occupant(sq("a8")).unwrap();
    assert_eq!((queen.kind(), queen.side()), (PieceKind::Queen, Color::White));
    assert_eq!(game.status(), GameStatus::ToMove(Color::Black));
}

#[test]
fn test_check1_queen_pins_and_then_checks() {
    let mut game = preset_game("check1");
    assert!(!game.is_attacked(Color::Black));

    assert_eq!(play(&mut game, "d3", "g6"), MoveOutcome::Continued);
    // f7 shields the king and may only take the queen.
    assert_eq!(game.legal_destinations(sq("f7")).unwrap(), squares(&["g6"]));

    play(&mut game, "a7", "a6");
    assert_eq!(play(&mut game, "g6", "f7"), MoveOutcome::Check(Color::Black));
    assert_eq!(game.status(), GameStatus::ToMove(Color::Black));
    assert!(game.is_attacked(Color::Black));
    assert_eq!(game.attackers(Color::Black), vec![sq("f7")]);
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(game.legal_destinations(sq("e8")).unwrap(), squares(&["f7"]));
}

#[test]
fn test_checkmate1_queen_and_bishop_bear_on_c7() {
    let mut game = preset_game("checkmate1");
    assert_eq!(game.status(), GameStatus::ToMove(Color::White));
    assert!(!game.is_attacked(Color::Black));
    assert!(game.legal_destinations(sq("a5")).unwrap().contains(&sq("c7")));
    assert!(game.legal_destinations(sq("f4")).unwrap().contains(&sq("c7")));

    assert_eq!(play(&mut game, "a5", "c7"), MoveOutcome::Continued);
    // The black queen is boxed in and can only trade itself on c7.
    assert_eq!(game.legal_destinations(sq("d8")).unwrap(), squares(&["c7"]));
    assert!(game.legal_destinations(sq("e8")).unwrap().is_empty());

    play(&mut game, "d8", "c7");
    assert_eq!(play(&mut game, "f4", "c7"), MoveOutcome::Continued);
    assert_eq!(game.halfmove_clock(), 0);
    assert!(!game.is_attacked(Color::Black));
}
