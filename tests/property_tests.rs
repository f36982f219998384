//! Property tests for the engine's invariants over arbitrary move sequences.

use proptest::prelude::*;
use tictoc::core::{GameRng, Role, SessionId, Symbol};
use tictoc::engine::{GameEngine, MAX_PIECES};

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::X), Just(Role::O), Just(Role::Spectator)]
}

/// Moves include off-board indices and spectator attempts on purpose.
fn moves_strategy() -> impl Strategy<Value = Vec<(Role, usize)>> {
    prop::collection::vec((role_strategy(), 0usize..11), 0..80)
}

fn assert_inventories_match_board(engine: &GameEngine) {
    for symbol in Symbol::ALL {
        let pieces = engine.pieces(symbol);
        assert!(pieces.len() <= MAX_PIECES, "{symbol} holds {} pieces", pieces.len());

        let mut from_inventory = pieces.to_vec();
        from_inventory.sort_unstable();
        let from_board: Vec<u8> = engine.board().indices_of(symbol).collect();
        assert_eq!(from_inventory, from_board, "{symbol} inventory out of sync");
    }
}

proptest! {
    #[test]
    fn inventories_stay_bounded_and_in_sync(seed in any::<u64>(), moves in moves_strategy()) {
        let mut engine = GameEngine::new(GameRng::new(seed));
        for (role, index) in moves {
            engine.attempt_move(role, index);
            assert_inventories_match_board(&engine);
        }
    }

    #[test]
    fn rejected_moves_change_nothing(seed in any::<u64>(), moves in moves_strategy()) {
        let mut engine = GameEngine::new(GameRng::new(seed));
        for (role, index) in moves {
            let before = engine.snapshot();
            let pieces_before = (engine.pieces(Symbol::X).to_vec(), engine.pieces(Symbol::O).to_vec());

            let off_turn = role.symbol() != Some(before.turn);
            let finished = before.winner.is_some();

            let accepted = engine.attempt_move(role, index);
            if off_turn || finished {
                prop_assert!(!accepted);
            }
            if !accepted {
                prop_assert_eq!(engine.snapshot(), before);
                prop_assert_eq!(engine.pieces(Symbol::X), pieces_before.0.as_slice());
                prop_assert_eq!(engine.pieces(Symbol::O), pieces_before.1.as_slice());
            }
        }
    }

    #[test]
    fn accepted_moves_place_flip_or_win(seed in any::<u64>(), moves in moves_strategy()) {
        let mut engine = GameEngine::new(GameRng::new(seed));
        for (role, index) in moves {
            let mover = engine.turn();
            if let Ok(record) = engine.try_move(role, index) {
                prop_assert_eq!(record.by, mover);
                prop_assert_eq!(record.placed as usize, index);
                prop_assert_eq!(engine.board()[index].symbol(), Some(mover));
                if record.won {
                    prop_assert_eq!(engine.winner(), Some(mover));
                    prop_assert!(engine.check_win(mover));
                } else {
                    prop_assert_eq!(engine.turn(), mover.other());
                    prop_assert!(!engine.check_win(mover));
                }
                if let Some(evicted) = record.evicted {
                    prop_assert!(engine.board()[evicted as usize].is_empty());
                }
            }
        }
    }

    #[test]
    fn reset_always_returns_to_start(seed in any::<u64>(), moves in moves_strategy()) {
        let mut engine = GameEngine::new(GameRng::new(seed));
        engine.assign_role(&SessionId::from("a"));
        for (role, index) in moves {
            engine.attempt_move(role, index);
        }

        engine.reset();

        let snap = engine.snapshot();
        prop_assert!(snap.board.is_empty());
        prop_assert_eq!(snap.turn, Symbol::X);
        prop_assert_eq!(snap.winner, None);
        prop_assert!(engine.pieces(Symbol::X).is_empty());
        prop_assert!(engine.pieces(Symbol::O).is_empty());
    }

    #[test]
    fn seating_follows_first_appearance(ids in prop::collection::vec(0u8..6, 1..30)) {
        let mut engine = GameEngine::new(GameRng::new(0));
        let mut first_seen: Vec<u8> = Vec::new();
        for id in ids {
            if !first_seen.contains(&id) {
                first_seen.push(id);
            }
            let position = first_seen.iter().position(|&seen| seen == id).unwrap();
            let expected = match position {
                0 => Role::X,
                1 => Role::O,
                _ => Role::Spectator,
            };
            prop_assert_eq!(engine.assign_role(&SessionId::new(format!("s{id}"))), expected);
        }
    }
}
