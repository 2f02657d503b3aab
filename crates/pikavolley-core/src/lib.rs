pub mod config;
pub mod game_trait;
pub mod player;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::config::MatchConfig;
    use crate::game_trait::{FrameGame, GameEvent, SideScore};
    use crate::player::{Controller, Seat, Side};

    /// Create the two seats of a match with the given controllers.
    pub fn make_seats(left: Controller, right: Controller) -> Vec<Seat> {
        vec![Seat::new(Side::Left, left), Seat::new(Side::Right, right)]
    }

    /// Create a config with the given seed and winning score.
    pub fn seeded_config(seed: u64, winning_score: u32) -> MatchConfig {
        MatchConfig {
            winning_score,
            seed,
        }
    }

    /// Step the game `n` frames with no queued input, returning all events.
    pub fn run_frames(game: &mut dyn FrameGame, n: usize) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.step());
        }
        all_events
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every FrameGame implementation must pass these. Game crates call them
    // from their own #[cfg(test)] modules with a concrete game instance.

    /// After init(), serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_state(game: &mut dyn FrameGame) {
        let seats = make_seats(Controller::Computer, Controller::Computer);
        game.init(&seats, &MatchConfig::default());
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
        assert!(!game.is_match_complete(), "fresh match must not be complete");
    }

    /// step() must advance the simulation.
    pub fn contract_step_advances_state(game: &mut dyn FrameGame) {
        let before = game.serialize_state();
        game.step();
        let after = game.serialize_state();
        assert_ne!(before, after, "step() must advance game state");
    }

    /// Garbage input must be dropped without panicking and without stalling the game.
    pub fn contract_garbage_input_ignored(game: &mut dyn FrameGame) {
        let garbage: Vec<u8> = vec![0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD];
        game.apply_input(Side::Left, &garbage);
        game.apply_input(Side::Right, &[]);
        let before = game.serialize_state();
        game.step();
        assert_ne!(before, game.serialize_state());
    }

    /// Stepping long enough must eventually finish the match.
    pub fn contract_match_eventually_completes(game: &mut dyn FrameGame, max_frames: usize) {
        for _ in 0..max_frames {
            game.step();
            if game.is_match_complete() {
                return;
            }
        }
        assert!(
            game.is_match_complete(),
            "Match must complete within {max_frames} frames"
        );
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn FrameGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze the simulation, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn FrameGame) {
        game.pause();
        let before = game.serialize_state();
        game.step();
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.step();
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// round_results() must return one entry per side.
    pub fn contract_round_results_complete(game: &dyn FrameGame) -> Vec<SideScore> {
        let results = game.round_results();
        assert_eq!(results.len(), 2, "round_results must have one entry per side");
        assert!(results.iter().any(|r| r.side == Side::Left));
        assert!(results.iter().any(|r| r.side == Side::Right));
        results
    }
}
