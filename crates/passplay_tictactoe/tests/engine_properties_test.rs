//! Properties that must hold for any sequence of moves.

use passplay_tictactoe::{
    ClockConfig, ClockState, GameEngine, GameStatus, ManualScheduler, TickHandle, TimedGame, TurnClock,
    check_winner, is_draw,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_engine_invariants(moves in prop::collection::vec(0usize..9, 0..30)) {
        let mut engine = GameEngine::new();

        for index in moves {
            let before = engine.snapshot();
            let outcome = engine.apply_move(index).unwrap();
            let after = engine.snapshot();

            if outcome.is_accepted() {
                prop_assert_eq!(before.status(), &GameStatus::InProgress);
                prop_assert_eq!(
                    after.board().occupied_count(),
                    before.board().occupied_count() + 1
                );
            } else {
                prop_assert_eq!(&after, &before);
            }

            if before.status().is_terminal() {
                prop_assert_eq!(after.status(), before.status());
            }

            match after.status() {
                GameStatus::Won(player) => {
                    prop_assert_eq!(check_winner(after.board()), Some(*player));
                    prop_assert!(after.winning_line().is_some());
                }
                GameStatus::Draw => prop_assert!(is_draw(after.board())),
                GameStatus::InProgress => {
                    prop_assert_eq!(check_winner(after.board()), None);
                    prop_assert!(!after.board().is_full());
                }
            }
        }
    }

    #[test]
    fn prop_out_of_range_never_mutates(index in 9usize..1000, prefix in prop::collection::vec(0usize..9, 0..5)) {
        let mut engine = GameEngine::new();
        for i in prefix {
            engine.apply_move(i).unwrap();
        }
        let before = engine.snapshot();
        prop_assert!(engine.apply_move(index).is_err());
        prop_assert_eq!(engine.snapshot(), before);
    }
}

#[derive(Debug, Clone)]
enum Action {
    Move(usize),
    Tick,
    Reset,
    ResetScores,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..9).prop_map(Action::Move),
        4 => Just(Action::Tick),
        1 => Just(Action::Reset),
        1 => Just(Action::ResetScores),
    ]
}

proptest! {
    #[test]
    fn prop_at_most_one_timer(actions in prop::collection::vec(action(), 0..60)) {
        let mut game = TimedGame::new(
            GameEngine::new(),
            TurnClock::new(ClockConfig::default(), ManualScheduler::new()),
        );
        game.start();

        for action in actions {
            match action {
                Action::Move(index) => {
                    game.apply_move(index).unwrap();
                }
                Action::Tick => {
                    if let Some(handle) = game.clock().handle() {
                        game.on_tick(handle);
                    }
                }
                Action::Reset => game.reset(),
                Action::ResetScores => game.reset_scores(),
            }

            let current = game.clock().handle();
            let before = (game.engine().snapshot(), game.clock().remaining());
            for id in 0..game.clock().scheduler().scheduled_count() {
                let handle = TickHandle::new(id);
                if Some(handle) != current {
                    prop_assert!(game.on_tick(handle).is_none());
                }
            }
            prop_assert_eq!((game.engine().snapshot(), game.clock().remaining()), before);

            let live = game.clock().scheduler().live_handles().len();
            prop_assert!(live <= 1);

            let running = game.clock().state() == ClockState::Running;
            prop_assert_eq!(running, !game.engine().status().is_terminal());
            prop_assert_eq!(running, live == 1);
        }
    }
}
