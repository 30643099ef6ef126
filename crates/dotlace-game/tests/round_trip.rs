//! End-to-end history tests: whatever sequence of moves and selections a
//! game goes through, undoing everything restores the starting position
//! bit for bit, and redoing restores the final one.

use dotlace_core::{Move, Orientation, PartKind, PlayerId, ShadowBoard};
use dotlace_game::{GameError, GameEvent, GameSession};
use proptest::prelude::*;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

fn players(count: u8) -> Vec<PlayerId> {
    let _ = env_logger::builder().is_test(true).try_init();
    (1..=count).map(|n| PlayerId::new(n).unwrap()).collect()
}

fn play_random_game(game: &mut GameSession, seed: u64, moves: usize) {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    for _ in 0..moves {
        let Some(mv) = game.legal_moves().rand_move(&mut rng) else {
            break;
        };
        game.turn_on(mv.row(), mv.col(), mv.orientation())
            .expect("a legal move applies cleanly");
    }
}

#[test]
fn full_game_undoes_back_to_the_start() {
    let roster = players(2);
    let mut game = GameSession::new(3, 3, &roster);
    let fresh_board = game.board().clone();
    let fresh_shadow = game.shadow().clone();

    play_random_game(&mut game, 42, usize::MAX);
    assert!(game.is_over());
    let total: u32 = roster.iter().map(|&p| game.score(p)).sum();
    assert_eq!(total, 9);

    while game.undo(false) {}
    assert_eq!(game.board(), &fresh_board);
    assert_eq!(game.shadow(), &fresh_shadow);
    assert_eq!(game.current_player(), Some(roster[0]));
    for &player in &roster {
        assert_eq!(game.score(player), 0);
    }
}

#[test]
fn redo_rebuilds_the_final_position() {
    let roster = players(2);
    let mut game = GameSession::new(2, 3, &roster);
    play_random_game(&mut game, 7, usize::MAX);
    let final_board = game.board().clone();
    let final_shadow = game.shadow().clone();
    let final_scores: Vec<_> = roster.iter().map(|&p| game.score(p)).collect();
    let final_player = game.current_player();

    while game.undo(false) {}
    assert_ne!(game.board(), &final_board);
    while game.redo(false) {}

    assert_eq!(game.board(), &final_board);
    assert_eq!(game.shadow(), &final_shadow);
    assert_eq!(game.current_player(), final_player);
    let scores: Vec<_> = roster.iter().map(|&p| game.score(p)).collect();
    assert_eq!(scores, final_scores);
}

#[test]
fn micro_granularity_round_trips_too() {
    let roster = players(2);
    let mut game = GameSession::new(2, 2, &roster);
    let fresh_board = game.board().clone();
    let fresh_shadow = game.shadow().clone();

    play_random_game(&mut game, 3, usize::MAX);
    let final_board = game.board().clone();
    let final_shadow = game.shadow().clone();
    let moves_made = game.history().undo_depth();

    for _ in 0..moves_made {
        assert!(game.undo(true));
    }
    assert!(!game.undo(true));
    assert_eq!(game.board(), &fresh_board);
    assert_eq!(game.shadow(), &fresh_shadow);

    for _ in 0..moves_made {
        assert!(game.redo(true));
    }
    assert!(!game.redo(true));
    assert_eq!(game.board(), &final_board);
    assert_eq!(game.shadow(), &final_shadow);
}

#[test]
fn undo_interleaved_with_selection_round_trips() {
    let roster = players(2);
    let mut game = GameSession::new(2, 2, &roster);
    let fresh_board = game.board().clone();
    let fresh_shadow = game.shadow().clone();

    game.turn_on(1, 1, Orientation::Horizontal).unwrap();
    game.select(PartKind::Corner, 2, 2, None).unwrap();
    game.turn_on(1, 1, Orientation::Vertical).unwrap();
    game.select(PartKind::Region, 1, 1, None).unwrap();
    game.clear_selection();

    while game.undo(false) {}
    assert_eq!(game.board(), &fresh_board);
    assert_eq!(game.shadow(), &fresh_shadow);
    assert!(game.selected().is_empty());

    while game.redo(false) {}
    assert!(game.shadow().is_on(1, 1, Orientation::Horizontal));
    assert!(game.shadow().is_on(1, 1, Orientation::Vertical));
    assert!(game.selected().is_empty());
}

#[test]
fn scripted_replay_matches_a_recorded_transcript() {
    // A fixed 1x2 game: bob closes the left square, keeps the turn, and
    // closes the right one too.
    let roster = players(2);
    let (alice, bob) = (roster[0], roster[1]);
    let script = [
        (alice, Move::new(1, 1, Orientation::Horizontal)),
        (bob, Move::new(1, 2, Orientation::Horizontal)),
        (alice, Move::new(2, 1, Orientation::Horizontal)),
        (bob, Move::new(1, 1, Orientation::Vertical)),
        (alice, Move::new(2, 2, Orientation::Horizontal)),
        (bob, Move::new(1, 2, Orientation::Vertical)), // closes left square
        (bob, Move::new(1, 3, Orientation::Vertical)), // closes right square
    ];

    let mut game = GameSession::new(1, 2, &roster);
    for &(player, mv) in &script {
        let outcome = game.apply_move(player, mv).unwrap();
        assert_eq!(outcome.player(), player);
    }
    assert!(game.is_over());
    assert_eq!(game.score(bob), 2);
    assert_eq!(game.score(alice), 0);
    assert_eq!(game.current_player(), Some(bob));
}

#[test]
fn replay_is_deterministic_across_sessions() {
    let roster = players(3);
    let mut recorded = GameSession::new(3, 2, &roster);
    play_random_game(&mut recorded, 99, usize::MAX);

    // Reconstruct the transcript from the shadow and replay it elsewhere.
    let mut transcript = Vec::new();
    let mut probe = GameSession::new(3, 2, &roster);
    let mut rng = Pcg64Mcg::seed_from_u64(99);
    while let Some(mv) = probe.legal_moves().rand_move(&mut rng) {
        let player = probe.current_player().unwrap();
        probe.turn_on(mv.row(), mv.col(), mv.orientation()).unwrap();
        transcript.push((player, mv));
    }

    let mut replayed = GameSession::new(3, 2, &roster);
    for &(player, mv) in &transcript {
        replayed.apply_move(player, mv).unwrap();
    }
    assert_eq!(replayed.board(), recorded.board());
    assert_eq!(replayed.shadow(), recorded.shadow());
    for &player in &roster {
        assert_eq!(replayed.score(player), recorded.score(player));
    }
}

#[test]
fn events_cover_every_board_mutation() {
    let roster = players(2);
    let mut game = GameSession::new(1, 1, &roster);
    game.turn_on(1, 1, Orientation::Horizontal).unwrap();
    let events: Vec<_> = game.drain_events().collect();
    assert!(events.iter().any(GameEvent::is_part_changed));
    assert!(events.iter().any(GameEvent::is_turn_changed));

    // Undo replays the same mutations through the history path and must
    // report them the same way.
    assert!(game.undo(false));
    let events: Vec<_> = game.drain_events().collect();
    assert!(events.iter().any(GameEvent::is_part_changed));
    assert!(events.iter().any(GameEvent::is_turn_changed));
}

#[test]
fn illegal_moves_leave_no_trace_in_history() {
    let roster = players(2);
    let mut game = GameSession::new(1, 1, &roster);
    game.turn_on(1, 1, Orientation::Horizontal).unwrap();
    let depth = game.history().undo_depth();

    assert!(matches!(
        game.turn_on(1, 1, Orientation::Horizontal),
        Err(GameError::Board(_)),
    ));
    assert!(matches!(
        game.turn_on(5, 5, Orientation::Vertical),
        Err(GameError::UnknownLine { .. }),
    ));
    assert_eq!(game.history().undo_depth(), depth);
    assert_eq!(game.shadow().num_legal_moves(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_prefix_of_any_game_round_trips(
        rows in 1_u8..=3,
        cols in 1_u8..=3,
        seed in any::<u64>(),
        moves in 0_usize..=10,
    ) {
        let roster = players(2);
        let mut game = GameSession::new(rows, cols, &roster);
        let fresh_board = game.board().clone();
        let fresh_shadow = game.shadow().clone();

        play_random_game(&mut game, seed, moves);
        let played_board = game.board().clone();
        let played_shadow = game.shadow().clone();

        while game.undo(false) {}
        prop_assert_eq!(game.board(), &fresh_board);
        prop_assert_eq!(game.shadow(), &fresh_shadow);
        prop_assert_eq!(game.current_player(), Some(roster[0]));

        while game.redo(false) {}
        prop_assert_eq!(game.board(), &played_board);
        prop_assert_eq!(game.shadow(), &played_shadow);
    }

    #[test]
    fn scores_always_sum_to_closed_squares(
        rows in 1_u8..=3,
        cols in 1_u8..=3,
        seed in any::<u64>(),
    ) {
        let roster = players(2);
        let mut game = GameSession::new(rows, cols, &roster);
        play_random_game(&mut game, seed, usize::MAX);

        let shadow: &ShadowBoard = game.shadow();
        let mut closed = 0_u32;
        for row in 1..=rows {
            for col in 1..=cols {
                if shadow.region_owner(row, col).is_some() {
                    closed += 1;
                }
            }
        }
        let total: u32 = roster.iter().map(|&p| game.score(p)).sum();
        prop_assert_eq!(total, closed);
        prop_assert_eq!(closed, u32::from(rows) * u32::from(cols));
    }
}
