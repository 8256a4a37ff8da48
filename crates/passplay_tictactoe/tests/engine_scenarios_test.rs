//! Whole-game scenarios against the public engine API.

use passplay_tictactoe::{
    GameEngine, GameEvent, GameStatus, IgnoreReason, MoveOutcome, Player, ScoreBoard, WIN_LINES,
};
use std::cell::RefCell;
use std::rc::Rc;

fn play(engine: &mut GameEngine, moves: &[usize]) -> MoveOutcome {
    let mut last = None;
    for &index in moves {
        last = Some(engine.apply_move(index).expect("index in range"));
    }
    last.expect("at least one move")
}

#[test]
fn test_top_row_win() {
    let mut engine = GameEngine::new();
    let outcome = play(&mut engine, &[0, 3, 1, 4, 2]);

    assert_eq!(
        outcome,
        MoveOutcome::Won {
            winner: Player::X,
            line: WIN_LINES[0]
        }
    );
    assert_eq!(engine.status(), GameStatus::Won(Player::X));
    assert_eq!(engine.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
    assert_eq!(engine.scores().get(Player::X), 1);
    assert_eq!(engine.scores().get(Player::O), 0);
}

#[test]
fn test_o_wins_on_diagonal() {
    let mut engine = GameEngine::new();
    let outcome = play(&mut engine, &[0, 2, 1, 4, 8, 6]);

    assert!(matches!(outcome, MoveOutcome::Won { winner: Player::O, .. }));
    assert_eq!(engine.winning_line().map(|l| l.indices()), Some([2, 4, 6]));
    assert_eq!(engine.scores().get(Player::O), 1);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut engine = GameEngine::new();
    // X O X / O X X / O X O
    let outcome = play(&mut engine, &[0, 1, 2, 3, 4, 6, 5, 8, 7]);

    assert_eq!(outcome, MoveOutcome::Draw);
    assert_eq!(engine.status(), GameStatus::Draw);
    assert_eq!(engine.winning_line(), None);
    assert_eq!(engine.scores(), ScoreBoard::default());
    assert!(engine.board().is_full());
}

#[test]
fn test_win_on_last_square_is_not_draw() {
    let mut engine = GameEngine::new();
    // X O O / O X X / O X X, the ninth mark completes the diagonal.
    let outcome = play(&mut engine, &[0, 1, 5, 2, 7, 3, 4, 6, 8]);

    assert!(engine.board().is_full());
    assert_eq!(
        outcome,
        MoveOutcome::Won {
            winner: Player::X,
            line: WIN_LINES[6]
        }
    );
    assert_eq!(engine.status(), GameStatus::Won(Player::X));
}

#[test]
fn test_moves_after_draw_are_ignored() {
    let mut engine = GameEngine::new();
    play(&mut engine, &[0, 1, 2, 3, 4, 6, 5, 8, 7]);
    assert_eq!(
        engine.apply_move(0).unwrap(),
        MoveOutcome::Ignored(IgnoreReason::GameOver)
    );
    assert_eq!(engine.status(), GameStatus::Draw);
}

#[test]
fn test_reset_scores_after_win() {
    let mut engine = GameEngine::new();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    assert_eq!(engine.scores().get(Player::X), 1);

    engine.reset_scores();

    assert_eq!(engine.scores().get(Player::X), 0);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.current_player(), Player::X);
    assert_eq!(engine.board().occupied_count(), 0);
}

#[test]
fn test_scores_accumulate_across_resets() {
    let mut engine = GameEngine::new();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.reset();
    play(&mut engine, &[0, 3, 8, 4, 7, 5]);
    assert_eq!(engine.status(), GameStatus::Won(Player::O));
    engine.reset();
    play(&mut engine, &[6, 0, 7, 1, 8]);

    assert_eq!(engine.scores().get(Player::X), 2);
    assert_eq!(engine.scores().get(Player::O), 1);
}

#[test]
fn test_observers_notified_in_subscription_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = GameEngine::new();
    for name in ["first", "second"] {
        let log = Rc::clone(&log);
        engine.subscribe(move |event: &GameEvent| {
            if let GameEvent::TurnChanged(player) = event {
                log.borrow_mut().push(format!("{name}:{player}"));
            }
        });
    }

    engine.apply_move(4).unwrap();

    assert_eq!(*log.borrow(), vec!["first:O", "second:O"]);
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = GameEngine::new();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["status"], serde_json::json!({ "Won": "X" }));
    assert_eq!(json["current_player"], "X");
}
