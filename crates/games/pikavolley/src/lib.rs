pub mod ball;
pub mod bot;
pub mod collision;
pub mod constants;
pub mod input;
pub mod physics;
pub mod player;
pub mod predict;
pub mod scoring;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use pikavolley_core::config::MatchConfig;
use pikavolley_core::frame_game_boilerplate;
use pikavolley_core::game_trait::{FrameGame, GameEvent, GameMetadata, SideScore};
use pikavolley_core::player::{Controller, Seat, Side};

use input::{ActionKeys, InputAdapter, UserInput};
use physics::PikaPhysics;

/// Serializable match state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolleyState {
    pub physics: PikaPhysics,
    /// Indexed by `Side::index()`.
    pub scores: [u32; 2],
    /// Side that serves the next round.
    pub serving: Side,
    /// The last frame ended a rally; the next frame re-serves.
    pub round_ended: bool,
    pub game_ended: bool,
    pub winner: Option<Side>,
    pub frame: u64,
    /// Inputs the engine actually ran with last frame, after computer override.
    pub last_inputs: [UserInput; 2],
    pub input_adapters: [InputAdapter; 2],
}

impl VolleyState {
    fn new(left: Controller, right: Controller, rng: &mut StdRng) -> Self {
        Self {
            physics: PikaPhysics::new(left, right, rng),
            scores: [0, 0],
            serving: Side::Left,
            round_ended: false,
            game_ended: false,
            winner: None,
            frame: 0,
            last_inputs: [UserInput::default(); 2],
            input_adapters: [InputAdapter::new(); 2],
        }
    }
}

/// A Pika Volley match between two seats.
pub struct PikaVolley {
    state: VolleyState,
    rng: StdRng,
    pending_keys: [Option<ActionKeys>; 2],
    paused: bool,
    config: MatchConfig,
}

impl PikaVolley {
    pub fn new() -> Self {
        Self::with_config(MatchConfig::load())
    }

    /// Computer against computer until `init` assigns seats.
    pub fn with_config(config: MatchConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let state = VolleyState::new(Controller::Computer, Controller::Computer, &mut rng);
        Self {
            state,
            rng,
            pending_keys: [None; 2],
            paused: false,
            config,
        }
    }

    pub fn state(&self) -> &VolleyState {
        &self.state
    }

    /// Queue held buttons for `side`, replacing anything queued earlier this frame.
    pub fn set_keys(&mut self, side: Side, keys: ActionKeys) {
        self.pending_keys[side.index()] = Some(keys);
    }

    fn start_new_round(&mut self) {
        self.state
            .physics
            .initialize_for_new_round(self.state.serving, &mut self.rng);
    }

    fn take_inputs(&mut self) -> [UserInput; 2] {
        let mut inputs = [UserInput::default(); 2];
        for side in Side::BOTH {
            let i = side.index();
            let keys = self.pending_keys[i].take().unwrap_or_default();
            inputs[i] = self.state.input_adapters[i].read(&keys);
        }
        inputs
    }

    fn score_point(&mut self, events: &mut Vec<GameEvent>) {
        let scorer = scoring::point_winner(self.state.physics.ball.punch_effect_x);
        self.state.scores[scorer.index()] += 1;
        let score = self.state.scores[scorer.index()];
        self.state.serving = scorer;
        self.state.round_ended = true;
        tracing::debug!(
            ?scorer,
            score,
            landing_x = self.state.physics.ball.punch_effect_x,
            "Point scored"
        );
        events.push(GameEvent::PointScored {
            side: scorer,
            score,
        });
        events.push(GameEvent::RoundComplete);

        if scoring::has_won(score, self.config.winning_score) {
            self.state.game_ended = true;
            self.state.winner = Some(scorer);
            for player in &mut self.state.physics.players {
                player.game_ended = true;
                player.is_winner = player.side == scorer;
            }
            tracing::info!(
                winner = ?scorer,
                left = self.state.scores[0],
                right = self.state.scores[1],
                frames = self.state.frame,
                "Match complete"
            );
            events.push(GameEvent::MatchComplete { winner: scorer });
        }
    }
}

impl Default for PikaVolley {
    fn default() -> Self {
        Self::with_config(MatchConfig::default())
    }
}

impl FrameGame for PikaVolley {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Pika Volley".to_string(),
            description: "One-on-one volleyball over a net. First to the winning score takes it."
                .to_string(),
            seats: 2,
        }
    }

    fn init(&mut self, seats: &[Seat], config: &MatchConfig) {
        let controller_for = |side: Side| {
            seats
                .iter()
                .find(|s| s.side == side)
                .map_or(Controller::Human, |s| s.controller)
        };
        self.config = config.clone();
        self.rng = StdRng::seed_from_u64(config.seed);
        self.state = VolleyState::new(
            controller_for(Side::Left),
            controller_for(Side::Right),
            &mut self.rng,
        );
        self.pending_keys = [None; 2];
        self.paused = false;
    }

    fn step(&mut self) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }

        if self.state.round_ended && !self.state.game_ended {
            self.start_new_round();
        }
        self.state.round_ended = false;

        let mut inputs = self.take_inputs();
        let is_ball_touching_ground = self
            .state
            .physics
            .run_engine_for_next_frame(&mut inputs, &mut self.rng);
        self.state.last_inputs = inputs;
        self.state.frame += 1;

        let mut events: Vec<GameEvent> = self
            .state
            .physics
            .cues()
            .into_iter()
            .map(GameEvent::Cue)
            .collect();

        // After the match ends the poses keep animating but rallies no longer score.
        if is_ball_touching_ground && !self.state.game_ended {
            self.score_point(&mut events);
        }

        events
    }

    frame_game_boilerplate!(state_type: VolleyState);

    fn apply_input(&mut self, side: Side, input: &[u8]) {
        match rmp_serde::from_slice::<ActionKeys>(input) {
            Ok(keys) => self.set_keys(side, keys),
            Err(e) => {
                tracing::debug!(?side, error = %e, "Dropped malformed volley input");
            },
        }
    }

    fn is_match_complete(&self) -> bool {
        self.state.game_ended
    }

    fn round_results(&self) -> Vec<SideScore> {
        Side::BOTH
            .iter()
            .map(|&side| SideScore {
                side,
                score: self.state.scores[side.index()],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pikavolley_core::game_trait::{Cue, encode_input};
    use pikavolley_core::test_helpers::{make_seats, run_frames, seeded_config};
    use crate::player::PlayerState;

    fn humans(winning_score: u32) -> PikaVolley {
        let mut game = PikaVolley::default();
        game.init(
            &make_seats(Controller::Human, Controller::Human),
            &seeded_config(3, winning_score),
        );
        game
    }

    /// Step until a rally ends, returning every event along the way.
    fn play_rally(game: &mut PikaVolley) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..1000 {
            events.extend(game.step());
            if game.is_round_complete() {
                return events;
            }
        }
        panic!("rally did not end");
    }

    #[test]
    fn init_resets_match() {
        let game = humans(15);
        assert_eq!(game.state.scores, [0, 0]);
        assert_eq!(game.state.serving, Side::Left);
        assert_eq!(game.state.physics.ball.x, 56);
        assert!(!game.is_match_complete());
        assert_eq!(
            game.state.physics.player(Side::Right).controller,
            Controller::Human
        );
    }

    #[test]
    fn missing_seat_defaults_to_human() {
        let mut game = PikaVolley::default();
        game.init(
            &[Seat::new(Side::Right, Controller::Computer)],
            &MatchConfig::default(),
        );
        assert_eq!(
            game.state.physics.player(Side::Left).controller,
            Controller::Human
        );
        assert_eq!(
            game.state.physics.player(Side::Right).controller,
            Controller::Computer
        );
    }

    #[test]
    fn frame_rate_is_25() {
        assert_eq!(PikaVolley::default().frame_rate(), 25);
    }

    #[test]
    fn metadata_has_two_seats() {
        assert_eq!(PikaVolley::default().metadata().seats, 2);
    }

    #[test]
    fn queued_keys_move_player_for_one_frame() {
        let mut game = humans(15);
        let keys = ActionKeys {
            right: true,
            ..Default::default()
        };
        game.apply_input(Side::Left, &encode_input(&keys));
        game.step();
        assert_eq!(game.state.physics.player(Side::Left).x, 42);
        assert_eq!(game.state.last_inputs[0].x_direction, 1);
        game.step();
        assert_eq!(
            game.state.physics.player(Side::Left).x,
            42,
            "keys are consumed by one step"
        );
    }

    #[test]
    fn latest_keys_win_within_a_frame() {
        let mut game = humans(15);
        game.set_keys(
            Side::Right,
            ActionKeys {
                right: true,
                ..Default::default()
            },
        );
        game.set_keys(
            Side::Right,
            ActionKeys {
                left: true,
                ..Default::default()
            },
        );
        game.step();
        assert_eq!(game.state.physics.player(Side::Right).x, 390);
    }

    #[test]
    fn power_hit_needs_fresh_press_across_frames() {
        let mut game = humans(15);
        let jump = ActionKeys {
            up: true,
            ..Default::default()
        };
        game.set_keys(Side::Right, jump);
        game.step();
        let swing = ActionKeys {
            power_hit: true,
            ..Default::default()
        };
        game.set_keys(Side::Right, swing);
        game.step();
        assert!(game.state.last_inputs[1].power_hit);
        game.set_keys(Side::Right, swing);
        game.step();
        assert!(!game.state.last_inputs[1].power_hit);
    }

    #[test]
    fn ball_on_left_half_scores_for_right() {
        let mut game = humans(15);
        game.state.physics.player_mut(Side::Left).x = 184;
        let events = play_rally(&mut game);
        assert_eq!(game.state.scores, [0, 1]);
        assert_eq!(game.state.serving, Side::Right);
        assert!(events.contains(&GameEvent::PointScored {
            side: Side::Right,
            score: 1
        }));
        assert!(events.contains(&GameEvent::RoundComplete));
        assert!(events.contains(&GameEvent::Cue(Cue::BallTouchesGround)));

        game.step();
        assert!(!game.is_round_complete());
        assert_eq!(game.state.physics.player(Side::Left).x, 36);
        assert_eq!(game.state.physics.ball.x, 376, "scorer serves");
    }

    #[test]
    fn reaching_winning_score_ends_match() {
        let mut game = humans(1);
        game.state.physics.player_mut(Side::Left).x = 184;
        let events = play_rally(&mut game);
        assert!(events.contains(&GameEvent::MatchComplete { winner: Side::Right }));
        assert!(game.is_match_complete());
        assert_eq!(game.state.winner, Some(Side::Right));
        assert!(game.state.physics.player(Side::Right).is_winner);
        assert!(!game.state.physics.player(Side::Left).is_winner);
        assert!(game.state.physics.players.iter().all(|p| p.game_ended));
    }

    #[test]
    fn poses_animate_after_match_without_scoring() {
        let mut game = humans(1);
        game.state.physics.player_mut(Side::Left).x = 184;
        play_rally(&mut game);

        let events = run_frames(&mut game, 200);
        assert_eq!(game.state.scores, [0, 1]);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PointScored { .. }))
        );
        assert!(events.contains(&GameEvent::Cue(Cue::Victory { side: Side::Right })));
        let winner = game.state.physics.player(Side::Right);
        assert_eq!(winner.state, PlayerState::Win);
        assert_eq!(winner.frame_number, 4);
        assert_eq!(
            game.state.physics.player(Side::Left).state,
            PlayerState::Lose
        );
    }

    #[test]
    fn same_seed_same_match() {
        let config = seeded_config(11, 15);
        let seats = make_seats(Controller::Computer, Controller::Computer);
        let mut a = PikaVolley::default();
        let mut b = PikaVolley::default();
        a.init(&seats, &config);
        b.init(&seats, &config);
        for _ in 0..3000 {
            assert_eq!(a.step(), b.step());
        }
        assert_eq!(a.serialize_state(), b.serialize_state());
    }

    #[test]
    fn round_results_track_scores() {
        let mut game = humans(15);
        game.state.physics.player_mut(Side::Left).x = 184;
        play_rally(&mut game);
        let results = game.round_results();
        let right = results.iter().find(|r| r.side == Side::Right);
        assert_eq!(right.map(|r| r.score), Some(1));
    }

    #[test]
    fn apply_state_truncated_no_panic() {
        let mut game = humans(15);
        run_frames(&mut game, 10);
        let state = game.serialize_state();
        let frame = game.state.frame;
        game.apply_state(&state[..state.len() / 2]);
        assert_eq!(game.state.frame, frame);
        game.step();
    }

    #[test]
    fn state_transfers_between_games() {
        let mut a = humans(15);
        run_frames(&mut a, 40);
        let mut b = humans(15);
        b.apply_state(&a.serialize_state());
        assert_eq!(a.serialize_state(), b.serialize_state());
        assert_eq!(b.state.frame, 40);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================

    #[test]
    fn contract_init_creates_state() {
        let mut game = PikaVolley::default();
        pikavolley_core::test_helpers::contract_init_creates_state(&mut game);
    }

    #[test]
    fn contract_step_advances_state() {
        let mut game = humans(15);
        pikavolley_core::test_helpers::contract_step_advances_state(&mut game);
    }

    #[test]
    fn contract_garbage_input_ignored() {
        let mut game = humans(15);
        pikavolley_core::test_helpers::contract_garbage_input_ignored(&mut game);
    }

    #[test]
    fn contract_match_eventually_completes() {
        let mut game = PikaVolley::default();
        game.init(
            &make_seats(Controller::Human, Controller::Computer),
            &seeded_config(7, 3),
        );
        pikavolley_core::test_helpers::contract_match_eventually_completes(&mut game, 50_000);
    }

    #[test]
    fn contract_state_roundtrip_preserves() {
        let mut game = humans(15);
        run_frames(&mut game, 25);
        pikavolley_core::test_helpers::contract_state_roundtrip_preserves(&mut game);
    }

    #[test]
    fn contract_pause_stops_updates() {
        let mut game = humans(15);
        pikavolley_core::test_helpers::contract_pause_stops_updates(&mut game);
    }

    #[test]
    fn contract_round_results_complete() {
        let game = humans(15);
        pikavolley_core::test_helpers::contract_round_results_complete(&game);
    }
}
