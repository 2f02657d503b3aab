use pikavolley_core::game_trait::Cue;
use pikavolley_core::player::{Controller, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ball::{Ball, BallCues};
use crate::bot;
use crate::collision;
use crate::input::UserInput;
use crate::player::{Player, PlayerCues};

/// Both players and the ball, advanced together one frame at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PikaPhysics {
    /// Indexed by `Side::index()`.
    pub players: [Player; 2],
    pub ball: Ball,
}

/// Mutable access to one player alongside shared access to the other.
fn player_and_opponent(players: &mut [Player; 2], side: Side) -> (&mut Player, &Player) {
    let (left, right) = players.split_at_mut(1);
    match side {
        Side::Left => (&mut left[0], &right[0]),
        Side::Right => (&mut right[0], &left[0]),
    }
}

impl PikaPhysics {
    pub fn new<R: Rng + ?Sized>(left: Controller, right: Controller, rng: &mut R) -> Self {
        let left_player = Player::new(Side::Left, left, rng);
        let right_player = Player::new(Side::Right, right, rng);
        Self {
            players: [left_player, right_player],
            ball: Ball::new(Side::Left),
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    fn any_computer(&self) -> bool {
        self.players.iter().any(|p| p.controller.is_computer())
    }

    /// Reset both players and re-serve the ball from `serve`'s side.
    pub fn initialize_for_new_round<R: Rng + ?Sized>(&mut self, serve: Side, rng: &mut R) {
        for player in &mut self.players {
            player.initialize_for_new_round(rng);
        }
        self.ball.initialize_for_new_round(serve);
    }

    /// Advance one frame. Computer-controlled entries of `inputs` are
    /// overwritten with the decided input. Returns true if the ball touched
    /// the ground this frame.
    pub fn run_engine_for_next_frame<R: Rng + ?Sized>(
        &mut self,
        inputs: &mut [UserInput; 2],
        rng: &mut R,
    ) -> bool {
        self.clear_cues();
        let is_ball_touching_ground = self.ball.process_world_collision();
        let any_computer = self.any_computer();

        for side in Side::BOTH {
            if any_computer {
                self.ball.refresh_expected_landing_point_x();
            }
            let (player, opponent) = player_and_opponent(&mut self.players, side);
            if player.controller.is_computer() {
                inputs[side.index()] = bot::decide_user_input(player, &self.ball, opponent, rng);
            }
            player.process_movement(&inputs[side.index()]);
        }

        for side in Side::BOTH {
            let player = &mut self.players[side.index()];
            if collision::resolve(&mut self.ball, player, &inputs[side.index()], rng) {
                tracing::trace!(?side, x_velocity = self.ball.x_velocity, "Ball contact");
                if any_computer {
                    self.ball.refresh_expected_landing_point_x();
                }
            }
        }

        is_ball_touching_ground
    }

    fn clear_cues(&mut self) {
        for player in &mut self.players {
            player.cues = PlayerCues::default();
        }
        self.ball.cues = BallCues::default();
    }

    /// Presentation cues raised during the last frame.
    pub fn cues(&self) -> Vec<Cue> {
        let mut cues = Vec::new();
        for player in &self.players {
            let side = player.side;
            if player.cues.jump_or_dive {
                cues.push(Cue::JumpOrDive { side });
            }
            if player.cues.power_hit_swing {
                cues.push(Cue::PowerHitSwing { side });
            }
            if player.cues.victory {
                cues.push(Cue::Victory { side });
            }
        }
        if self.ball.cues.power_hit {
            cues.push(Cue::BallPowerHit);
        }
        if self.ball.cues.touches_ground {
            cues.push(Cue::BallTouchesGround);
        }
        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(left: Controller, right: Controller, seed: u64) -> (PikaPhysics, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let physics = PikaPhysics::new(left, right, &mut rng);
        (physics, rng)
    }

    #[test]
    fn fresh_engine_serves_from_left() {
        let (physics, _) = engine(Controller::Human, Controller::Human, 1);
        assert_eq!((physics.ball.x, physics.ball.y), (56, 0));
        assert_eq!(physics.player(Side::Left).x, 36);
        assert_eq!(physics.player(Side::Right).x, 396);
    }

    #[test]
    fn unobstructed_serve_drops_straight_down() {
        let (mut physics, mut rng) = engine(Controller::Human, Controller::Human, 1);
        physics.player_mut(Side::Left).x = 184;
        let mut inputs = [UserInput::default(); 2];
        let mut frames = 0;
        while !physics.run_engine_for_next_frame(&mut inputs, &mut rng) {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(physics.ball.punch_effect_x, 56);
        assert!(physics.cues().contains(&Cue::BallTouchesGround));
    }

    #[test]
    fn human_inputs_pass_through() {
        let (mut physics, mut rng) = engine(Controller::Computer, Controller::Human, 3);
        let mut inputs = [
            UserInput::default(),
            UserInput {
                x_direction: -1,
                y_direction: 0,
                power_hit: false,
            },
        ];
        physics.run_engine_for_next_frame(&mut inputs, &mut rng);
        assert_eq!(physics.player(Side::Right).x, 390);
        assert_eq!(inputs[1].x_direction, -1);
    }

    #[test]
    fn computer_input_is_replaced() {
        let (mut physics, mut rng) = engine(Controller::Computer, Controller::Human, 3);
        // Ball far right and slow: the computer heads for its mid court.
        physics.ball.x = 380;
        physics.ball.y = 100;
        physics.ball.x_velocity = 0;
        physics.ball.y_velocity = 0;
        let mut inputs = [
            UserInput {
                x_direction: -1,
                y_direction: -1,
                power_hit: true,
            },
            UserInput::default(),
        ];
        physics.run_engine_for_next_frame(&mut inputs, &mut rng);
        assert_eq!(inputs[0].x_direction, 1);
        assert!(!inputs[0].power_hit);
        assert_eq!(physics.player(Side::Left).x, 42);
    }

    #[test]
    fn contact_refreshes_prediction_with_a_computer() {
        let (mut physics, mut rng) = engine(Controller::Computer, Controller::Human, 9);
        physics.ball.x = 50;
        physics.ball.y = 220;
        physics.ball.x_velocity = 0;
        physics.ball.y_velocity = 5;
        let mut inputs = [UserInput::default(); 2];
        physics.run_engine_for_next_frame(&mut inputs, &mut rng);
        assert!(physics.player(Side::Left).is_collision_with_ball_happened);
        assert!(physics.ball.y_velocity < 0);
        assert_eq!(
            physics.ball.expected_landing_point_x,
            predict::expected_landing_point_x(physics.ball.snapshot())
        );
    }

    #[test]
    fn humans_only_skip_prediction() {
        let (mut physics, mut rng) = engine(Controller::Human, Controller::Human, 9);
        physics.ball.x = 50;
        physics.ball.y = 220;
        physics.ball.y_velocity = 5;
        physics.ball.expected_landing_point_x = -7;
        let mut inputs = [UserInput::default(); 2];
        physics.run_engine_for_next_frame(&mut inputs, &mut rng);
        assert!(physics.player(Side::Left).is_collision_with_ball_happened);
        assert_eq!(physics.ball.expected_landing_point_x, -7);
    }

    #[test]
    fn jump_raises_cue_for_one_frame() {
        let (mut physics, mut rng) = engine(Controller::Human, Controller::Human, 2);
        physics.player_mut(Side::Left).x = 184;
        let mut inputs = [
            UserInput {
                x_direction: 0,
                y_direction: -1,
                power_hit: false,
            },
            UserInput::default(),
        ];
        physics.run_engine_for_next_frame(&mut inputs, &mut rng);
        assert!(
            physics
                .cues()
                .contains(&Cue::JumpOrDive { side: Side::Left })
        );
        let mut idle = [UserInput::default(); 2];
        physics.run_engine_for_next_frame(&mut idle, &mut rng);
        assert!(physics.cues().is_empty());
    }

    #[test]
    fn new_round_resets_positions() {
        let (mut physics, mut rng) = engine(Controller::Computer, Controller::Computer, 4);
        let mut inputs = [UserInput::default(); 2];
        for _ in 0..30 {
            physics.run_engine_for_next_frame(&mut inputs, &mut rng);
        }
        physics.initialize_for_new_round(Side::Right, &mut rng);
        assert_eq!(physics.ball.x, 376);
        assert_eq!(physics.ball.y_velocity, 1);
        assert_eq!(physics.player(Side::Left).x, 36);
        assert_eq!(physics.player(Side::Right).x, 396);
    }

    #[test]
    fn same_seed_same_rally() {
        let (mut a, mut rng_a) = engine(Controller::Computer, Controller::Computer, 77);
        let (mut b, mut rng_b) = engine(Controller::Computer, Controller::Computer, 77);
        for _ in 0..2000 {
            let mut inputs_a = [UserInput::default(); 2];
            let mut inputs_b = [UserInput::default(); 2];
            let touched_a = a.run_engine_for_next_frame(&mut inputs_a, &mut rng_a);
            let touched_b = b.run_engine_for_next_frame(&mut inputs_b, &mut rng_b);
            assert_eq!(touched_a, touched_b);
            assert_eq!(inputs_a, inputs_b);
            if touched_a {
                a.initialize_for_new_round(Side::Left, &mut rng_a);
                b.initialize_for_new_round(Side::Left, &mut rng_b);
            }
        }
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use crate::constants::{BALL_RADIUS, BALL_TOUCHING_GROUND_Y_COORD, GROUND_WIDTH};
        use crate::player::court_bounds;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rally_stays_in_bounds(seed in 0u64..500) {
                let (mut physics, mut rng) =
                    engine(Controller::Computer, Controller::Computer, seed);
                for _ in 0..600 {
                    let mut inputs = [UserInput::default(); 2];
                    if physics.run_engine_for_next_frame(&mut inputs, &mut rng) {
                        physics.initialize_for_new_round(Side::Right, &mut rng);
                    }
                    prop_assert!(physics.ball.y <= BALL_TOUCHING_GROUND_Y_COORD);
                    prop_assert!((BALL_RADIUS..=GROUND_WIDTH).contains(&physics.ball.x));
                    for side in Side::BOTH {
                        let (min_x, max_x) = court_bounds(side);
                        let x = physics.player(side).x;
                        prop_assert!((min_x..=max_x).contains(&x));
                    }
                }
            }
        }
    }
}
