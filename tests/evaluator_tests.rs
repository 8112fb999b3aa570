use simplexity_search::{
    Board, Color, Evaluator, GameConfig, HeuristicEvaluator, HeuristicWeights, Shape, State, Streak,
};

fn state_from(lines: &[&str]) -> State {
    let board = Board::parse(lines).unwrap();
    let config = GameConfig::new(board.rows(), board.cols());
    State::from_board(board, &config).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_empty_board_scores_zero() {
    let evaluator = HeuristicEvaluator::default();
    let state = State::new(&GameConfig::default());
    assert_close(evaluator.evaluate(&state), 0.0);
}

#[test]
fn test_isolated_pieces_use_column_weights() {
    let evaluator = HeuristicEvaluator::default();

    let state = state_from(&[".......", ".......", ".......", ".......", ".......", "...O..."]);
    assert_close(evaluator.evaluate(&state), 0.4);

    let state = state_from(&[".......", ".......", ".......", ".......", ".......", "X..O..."]);
    assert_close(evaluator.evaluate(&state), 0.3);
}

#[test]
fn test_two_in_a_row_uses_free_tile_table() {
    let evaluator = HeuristicEvaluator::default();
    // four free tiles around the pair: 3.5 for the shape, 3.0 for the color,
    // and the lone cross on column 6 costs 0.1
    let state = state_from(&[".......", ".......", ".......", ".......", ".......", "..OO..X"]);
    assert_close(evaluator.evaluate(&state), 6.4);
}

#[test]
fn test_boxed_in_pair_scores_nothing_and_is_not_isolated() {
    let evaluator = HeuristicEvaluator::default();
    // every pair here has at most one free tile next to it
    let state = state_from(&["....", "....", "xX..", "OX.."]);
    assert_close(evaluator.evaluate(&state), 0.0);
}

#[test]
fn test_three_open_on_one_end() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&[".......", ".......", ".......", ".......", "XX.....", "OOO...."]);
    assert_close(evaluator.evaluate(&state), 19.0);
}

#[test]
fn test_split_three() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&[".......", ".......", ".......", ".......", "XX.....", "OO.O..."]);
    assert_close(evaluator.evaluate(&state), 19.0);
}

#[test]
fn test_mirrored_split_three() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&[".......", ".......", ".......", ".......", "X.X....", "O.OO..."]);
    // 10 + 9 for the split three, the two crosses are isolated
    assert_close(evaluator.evaluate(&state), 19.0 - 0.1 - 0.3);
}

#[test]
fn test_blocked_three_scores_nothing() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&[".......", ".......", ".......", ".......", ".......", "XOOOX.."]);
    // the circles form a feature, only the two crosses count as isolated
    assert_close(evaluator.evaluate(&state), -0.1 - 0.3);
}

#[test]
fn test_vertical_three_has_one_open_end() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&[".......", ".......", ".......", "O......", "OX.....", "OX....."]);
    // the crosses form a two with a single free tile, which weighs nothing
    assert_close(evaluator.evaluate(&state), 19.0);
}

#[test]
fn test_three_open_on_both_ends_looks_one_placement_ahead() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&[".......", ".......", ".......", ".......", ".XX....", ".OOO..."]);

    // player 0 would finish with 7 circles and 10 crosses left
    let streak = Streak::Shape(Shape::Circle);
    let threat = evaluator.completion_threat(&state, streak, &[(5, 0), (5, 4)]);
    assert_eq!(threat, Some(5008.5));
    assert_close(evaluator.evaluate(&state), 5008.5);
}

#[test]
fn test_completion_threat_needs_quota() {
    let evaluator = HeuristicEvaluator::default();
    let mut state = state_from(&[".......", ".......", ".......", ".......", ".XX....", ".OOO..."]);
    state.players[0].quota.set(Shape::Circle, 0);

    let streak = Streak::Shape(Shape::Circle);
    let threat = evaluator.completion_threat(&state, streak, &[(5, 0), (5, 4)]);
    assert_eq!(threat, None);

    // the red streak can still be finished with a red cross, leaving 9 crosses
    let threat = evaluator.completion_threat(&state, Streak::Color(Color::Red), &[(5, 0)]);
    assert_eq!(threat, Some(5004.5));
    assert_close(evaluator.evaluate(&state), 5004.5);
}

#[test]
fn test_threat_scale_is_configurable() {
    let evaluator = HeuristicEvaluator::new(HeuristicWeights::default().with_threat_scale(1.0));
    let state = state_from(&[".......", ".......", ".......", ".......", ".XX....", ".OOO..."]);
    assert_close(evaluator.evaluate(&state), 10017.0);
}

#[test]
fn test_win_score_sign_and_quota_bonus() {
    let evaluator = HeuristicEvaluator::default();

    let won_by_zero = state_from(&[
        ".......", ".......", ".......", ".......", "XXX....", "OOOO...",
    ]);
    assert_close(evaluator.evaluate(&won_by_zero), 10_000.0 + 7.0 + 10.0);

    let won_by_one = state_from(&[
        ".......", ".......", ".......", ".......", "OO.....", "XXXXO.O",
    ]);
    assert_close(evaluator.evaluate(&won_by_one), -(10_000.0 + 7.0 + 10.0));
}

#[test]
fn test_shape_win_decides_the_sign_over_a_color_win() {
    let evaluator = HeuristicEvaluator::default();
    let board = Board::parse(&["OOOx", "oxoX", "xoxX", "oxoX"]).unwrap();
    let state = State::from_board(board, &GameConfig::new(4, 4).with_quota(8, 8)).unwrap();

    // player 1 owns the crosses and has 5 crosses and 3 circles left
    assert_close(evaluator.evaluate(&state), -(10_000.0 + 8.0));
}

#[test]
fn test_win_magnitude_grows_with_remaining_quota() {
    let evaluator = HeuristicEvaluator::default();
    let base = state_from(&[".......", ".......", ".......", ".......", "OO.....", "XXXXO.O"]);

    let mut previous = 0.0;
    for left in 0..=7 {
        let mut state = base.clone();
        state.players[1].quota.set(Shape::Cross, left);
        let score = evaluator.evaluate(&state);
        assert!(score < 0.0);
        assert!(score.abs() >= previous);
        previous = score.abs();
    }
}

#[test]
fn test_full_board_without_winner_is_a_draw() {
    let evaluator = HeuristicEvaluator::default();
    let state = state_from(&["Ox", "Xo"]);
    assert_eq!(evaluator.terminal_score(&state), Some(0.0));
    assert_close(evaluator.evaluate(&state), 0.0);
}

#[test]
fn test_custom_tables_replace_defaults() {
    let weights = HeuristicWeights::default()
        .with_column_weights(vec![1.0; 7])
        .with_streak3(100.0, 50.0)
        .with_win_base(1.0);
    let evaluator = HeuristicEvaluator::new(weights);

    let state = state_from(&[".......", ".......", ".......", ".......", ".......", "X..O..."]);
    assert_close(evaluator.evaluate(&state), 0.0);

    let state = state_from(&[".......", ".......", ".......", ".......", "XX.....", "OOO...."]);
    assert_close(evaluator.evaluate(&state), 150.0);

    let state = state_from(&[".......", ".......", ".......", ".......", "XXX....", "OOOO..."]);
    assert_close(evaluator.evaluate(&state), 18.0);
}

#[test]
fn test_evaluation_is_symmetric_between_players() {
    let evaluator = HeuristicEvaluator::default();
    let red = state_from(&[".......", ".......", ".......", ".......", "...X...", "..OO..."]);
    let blue = state_from(&[".......", ".......", ".......", ".......", "..OO...", "..XX.O."]);

    // whoever owns the open pair on the bottom row is ahead
    assert!(evaluator.evaluate(&red) > 0.0);
    assert!(evaluator.evaluate(&blue) < 0.0);
}
