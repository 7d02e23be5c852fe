//! Tests for move validation, application and the orientation flip.

use kwazam_engine::{
    Game, GameState, MoveError, MoveOutcome, PieceKind, SaveStore, Square, Team,
};

fn play(game: &mut Game, from: (i32, i32), to: (i32, i32)) -> Result<MoveOutcome, MoveError> {
    let id = game
        .piece_at(from.0, from.1)
        .unwrap_or_else(|| panic!("no piece at {from:?}"))
        .id();
    game.propose_move(id, to.0, to.1)
}

#[test]
fn test_opening_move_flips_board() {
    let mut game = Game::new();
    let ram = game.piece_at(0, 6).unwrap().id();

    let outcome = play(&mut game, (0, 6), (0, 5)).expect("Valid move");
    assert_eq!(
        outcome,
        MoveOutcome::Continued {
            turn: Team::Blue,
            turn_count: 1,
            alternated: false,
        }
    );

    // The board is now seen from Blue's side.
    let moved = game.state().piece(ram).unwrap();
    assert_eq!(moved.square(), Square::new(4, 2));
    assert!(moved.is_flipped());
    for column in 0..5 {
        let piece = game.piece_at(column, 6).unwrap();
        assert_eq!(piece.kind(), PieceKind::Ram);
        assert_eq!(piece.team(), Team::Blue);
    }
    assert_eq!(game.piece_at(4, 7).unwrap().kind(), PieceKind::Tor);
    assert_eq!(game.piece_at(4, 7).unwrap().team(), Team::Blue);
    assert!(game.pieces().iter().all(|view| view.flipped));
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut game = Game::new();
    let before = game.state().clone();

    assert!(matches!(
        play(&mut game, (2, 7), (2, 5)),
        Err(MoveError::IllegalShape { .. })
    ));
    assert!(matches!(
        play(&mut game, (0, 1), (0, 2)),
        Err(MoveError::NotYourTurn(Team::Blue))
    ));
    assert!(matches!(
        play(&mut game, (4, 7), (4, 4)),
        Err(MoveError::PathBlocked { .. })
    ));
    assert!(matches!(
        play(&mut game, (0, 6), (0, -1)),
        Err(MoveError::OutOfBounds(_))
    ));

    assert_eq!(game.state(), &before);
}

#[test]
fn test_turn_alternates_and_counts() {
    let mut game = Game::new();
    let script = [
        ((0, 6), (0, 5)),
        ((0, 6), (0, 5)),
        ((1, 6), (1, 5)),
    ];
    let mut expected = Team::Red;
    for (step, (from, to)) in script.into_iter().enumerate() {
        assert_eq!(game.turn(), expected);
        play(&mut game, from, to).expect("Valid move");
        expected = expected.opponent();
        assert_eq!(game.turn(), expected);
        assert_eq!(game.turn_count(), step as u32 + 1);
    }
}

#[test]
fn test_legal_moves_row_major() {
    let mut state = GameState::empty(Team::Red);
    let tor = state.place(PieceKind::Tor, Team::Red, Square::new(0, 0)).unwrap();
    state.place(PieceKind::Ram, Team::Blue, Square::new(0, 3)).unwrap();
    let game = Game::from_state(state, SaveStore::default());

    let targets: Vec<Square> = game
        .legal_moves_for(tor)
        .iter()
        .map(|mov| mov.destination())
        .collect();
    assert_eq!(
        targets,
        vec![
            Square::new(1, 0),
            Square::new(2, 0),
            Square::new(3, 0),
            Square::new(4, 0),
            Square::new(0, 1),
            Square::new(0, 2),
            Square::new(0, 3),
        ]
    );
    assert!(!targets.contains(&Square::new(0, 5)));
}

#[test]
fn test_selection_flow() {
    let mut game = Game::new();
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.move_selected(0, 5), Err(MoveError::NoSelection));

    // Empty squares do not select anything.
    assert_eq!(game.select_piece_at(2, 3), None);
    assert!(game.selected().is_none());

    let biz = game.select_piece_at(1, 7).unwrap();
    assert_eq!(game.selected().map(|piece| piece.id()), Some(biz));
    let targets: Vec<Square> = game.legal_moves().iter().map(|m| m.destination()).collect();
    assert_eq!(targets, vec![Square::new(0, 5), Square::new(2, 5)]);

    // An illegal drop still clears the selection.
    assert!(game.move_selected(1, 5).is_err());
    assert!(game.selected().is_none());

    game.select_piece_at(1, 7);
    assert!(game.move_selected(2, 5).is_ok());
    assert!(game.selected().is_none());
    assert_eq!(game.turn(), Team::Blue);
}

#[test]
fn test_capture_removes_piece() {
    let mut state = GameState::empty(Team::Red);
    state.place(PieceKind::Biz, Team::Red, Square::new(1, 7)).unwrap();
    state.place(PieceKind::Ram, Team::Blue, Square::new(2, 5)).unwrap();
    state.place(PieceKind::Sau, Team::Blue, Square::new(2, 0)).unwrap();
    let mut game = Game::from_state(state, SaveStore::default());

    play(&mut game, (1, 7), (2, 5)).expect("Valid capture");
    assert_eq!(game.pieces().len(), 2);
    // Seen from Blue's side the Biz now stands on (2,2).
    let biz = game.piece_at(2, 2).unwrap();
    assert_eq!(biz.kind(), PieceKind::Biz);
    assert_eq!(biz.team(), Team::Red);
}

#[test]
fn test_sau_capture_ends_game() {
    let mut state = GameState::empty(Team::Red);
    state.place(PieceKind::Tor, Team::Red, Square::new(0, 7)).unwrap();
    state.place(PieceKind::Sau, Team::Red, Square::new(4, 7)).unwrap();
    state.place(PieceKind::Sau, Team::Blue, Square::new(0, 2)).unwrap();
    state.place(PieceKind::Ram, Team::Blue, Square::new(3, 1)).unwrap();
    let mut game = Game::from_state(state, SaveStore::default());
    let tor = game.piece_at(0, 7).unwrap().id();

    assert_eq!(game.propose_move(tor, 0, 2), Ok(MoveOutcome::Won(Team::Red)));
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Team::Red));
    assert!(game.pieces().is_empty());
    // Terminal: no turn advance.
    assert_eq!(game.turn(), Team::Red);
    assert_eq!(game.turn_count(), 0);

    assert_eq!(game.propose_move(tor, 0, 3), Err(MoveError::GameOver));

    game.reset();
    assert!(!game.is_game_over());
    assert_eq!(game.winner(), None);
    assert_eq!(game.pieces().len(), 20);
    assert_eq!(game.turn(), Team::Red);
    assert!(play(&mut game, (0, 6), (0, 5)).is_ok());
}

#[test]
fn test_blue_can_win() {
    let mut state = GameState::empty(Team::Blue);
    state.place(PieceKind::Sau, Team::Red, Square::new(2, 4)).unwrap();
    state.place(PieceKind::Xor, Team::Blue, Square::new(0, 6)).unwrap();
    let mut game = Game::from_state(state, SaveStore::default());

    assert_eq!(play(&mut game, (0, 6), (2, 4)), Ok(MoveOutcome::Won(Team::Blue)));
    assert_eq!(game.winner(), Some(Team::Blue));
}

#[test]
fn test_stale_move_is_revalidated() {
    let mut game = Game::new();
    let ram = game.piece_at(0, 6).unwrap().id();
    let stale = game.candidate(ram, 0, 5).unwrap();
    game.play(&stale).expect("Valid move");

    // Replaying the same move is now Blue's turn with a Red piece.
    assert_eq!(game.play(&stale), Err(MoveError::NotYourTurn(Team::Red)));
}

#[test]
fn test_unknown_piece() {
    let mut game = Game::new();
    let ram = game.piece_at(0, 6).unwrap().id();
    let mut other = Game::from_state(GameState::empty(Team::Red), SaveStore::default());
    assert_eq!(other.propose_move(ram, 0, 5), Err(MoveError::UnknownPiece(ram)));
    assert!(other.legal_moves_for(ram).is_empty());
    assert!(game.propose_move(ram, 0, 5).is_ok());
}
