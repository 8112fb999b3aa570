use std::time::{Duration, Instant};

use simplexity_search::{
    annealing::{accepts, temperature, ACCEPTANCE_THRESHOLD},
    generate_moves,
    utils::Deadline,
    Board, GameConfig, Move, SearchError, Shape, SimulatedAnnealing, State,
};

fn midgame() -> State {
    let board = Board::parse(&[
        ".......",
        ".......",
        "..xX...",
        "..OOX..",
        "X.XOo..",
        "OXOXOx.",
    ])
    .unwrap();
    State::from_board(board, &GameConfig::default()).unwrap()
}

#[test]
fn test_zero_time_returns_a_legal_move() {
    let _ = env_logger::builder().is_test(true).try_init();
    let state = midgame();
    let player = state.current_player();
    let legal = generate_moves(&state, player);

    let mut annealing = SimulatedAnnealing::new().with_seed(1);
    let start = Instant::now();
    let mv = annealing.find(&state, player, Duration::ZERO).unwrap();

    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(legal.contains(&mv));
    assert_eq!(annealing.get_statistics().trials, 0);
}

#[test]
fn test_short_budget_samples_and_stays_legal() {
    let _ = env_logger::builder().is_test(true).try_init();
    let state = midgame();
    let snapshot = state.clone();
    let legal = generate_moves(&state, 0);

    let mut annealing = SimulatedAnnealing::new().with_seed(2);
    let mv = annealing.find(&state, 0, Duration::from_millis(50)).unwrap();

    assert!(legal.contains(&mv));
    assert_eq!(state, snapshot);
    let stats = annealing.get_statistics();
    assert!(stats.trials > 0);
    assert!(stats.accepted <= stats.trials);
    assert!(stats.total_time >= Duration::from_millis(50));
}

#[test]
fn test_single_legal_move_is_always_chosen() {
    // only column 3 has room and player 0 has no circles left
    let config = GameConfig::new(4, 4);
    let board = Board::parse(&["OXo.", "XOx.", "OXo.", "XOx."]).unwrap();
    let state = State::from_board(board, &config).unwrap();
    assert_eq!(state.players[0].quota.get(Shape::Circle), 0);
    assert_eq!(generate_moves(&state, 0), vec![Move::new(3, Shape::Cross)]);

    let mut annealing = SimulatedAnnealing::new().with_seed(3);
    for budget in [Duration::ZERO, Duration::from_millis(20)] {
        let mv = annealing.find(&state, 0, budget).unwrap();
        assert_eq!(mv, Move::new(3, Shape::Cross));
    }
}

#[test]
fn test_no_quota_reports_no_legal_moves() {
    let mut state = State::new(&GameConfig::default());
    state.players[1].quota.set(Shape::Circle, 0);
    state.players[1].quota.set(Shape::Cross, 0);

    let mut annealing = SimulatedAnnealing::new().with_seed(4);
    for budget in [Duration::ZERO, Duration::from_millis(10)] {
        assert!(matches!(
            annealing.find(&state, 1, budget),
            Err(SearchError::NoLegalMoves)
        ));
    }
}

#[test]
fn test_temperature_cools_from_one_hundred() {
    let fresh = Deadline::after(Duration::from_secs(3600));
    assert!(temperature(&fresh) > 99.0);
    assert!(temperature(&fresh) <= 100.0);

    let spent = Deadline::after(Duration::ZERO);
    assert_eq!(temperature(&spent), 0.0);
}

#[test]
fn test_threshold_acceptance_rule() {
    // the rule compares exp(delta / t) against a fixed 0.5, not a random draw
    assert_eq!(ACCEPTANCE_THRESHOLD, 0.5);

    assert!(accepts(0.0, 50.0));
    assert!(accepts(-30.0, 50.0));
    assert!(!accepts(-100.0, 50.0));
    assert!(accepts(-100.0, 1000.0));
    assert!(!accepts(-0.1, 0.0));

    // the same inputs always give the same answer
    for _ in 0..100 {
        assert!(accepts(-30.0, 50.0));
        assert!(!accepts(-40.0, 50.0));
    }
}

#[test]
fn test_finished_game_is_rejected() {
    let board = Board::parse(&[
        ".......",
        ".......",
        ".......",
        ".......",
        "XXX....",
        "OOOO...",
    ])
    .unwrap();
    let state = State::from_board(board, &GameConfig::default()).unwrap();

    let mut annealing = SimulatedAnnealing::new();
    assert!(matches!(
        annealing.find(&state, 1, Duration::from_millis(10)),
        Err(SearchError::GameOver)
    ));
}
