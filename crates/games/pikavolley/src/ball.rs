use pikavolley_core::player::Side;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BALL_RADIUS, BALL_SERVE_OFFSET, BALL_TOUCHING_GROUND_Y_COORD, GROUND_HALF_WIDTH, GROUND_WIDTH,
    NET_PILLAR_HALF_WIDTH, NET_PILLAR_TOP_BOTTOM_Y_COORD, NET_PILLAR_TOP_TOP_Y_COORD,
};
use crate::predict::{self, BallSnapshot};

/// Rotation phase wraps within `0..=ROTATION_PHASE_WRAP`.
const ROTATION_PHASE_WRAP: i32 = 50;

/// Presentation cues raised by the ball during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallCues {
    pub power_hit: bool,
    pub touches_ground: bool,
}

/// The ball. Created once per match and re-served every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub x_velocity: i32,
    pub y_velocity: i32,
    /// Cached landing x from the last full-net prediction.
    pub expected_landing_point_x: i32,
    /// Sprite selector, 0..=5. Stays at 5 (hyper ball) while the phase sits
    /// exactly on the wrap boundary.
    pub rotation: i32,
    pub fine_rotation: i32,
    pub punch_effect_x: i32,
    pub punch_effect_y: i32,
    pub punch_effect_radius: i32,
    pub previous_x: i32,
    pub previous_previous_x: i32,
    pub previous_y: i32,
    pub previous_previous_y: i32,
    pub is_power_hit: bool,
    #[serde(skip)]
    pub cues: BallCues,
}

impl Ball {
    pub fn new(serve: Side) -> Self {
        let mut ball = Self {
            x: 0,
            y: 0,
            x_velocity: 0,
            y_velocity: 0,
            expected_landing_point_x: 0,
            rotation: 0,
            fine_rotation: 0,
            punch_effect_x: 0,
            punch_effect_y: 0,
            punch_effect_radius: 0,
            previous_x: 0,
            previous_previous_x: 0,
            previous_y: 0,
            previous_previous_y: 0,
            is_power_hit: false,
            cues: BallCues::default(),
        };
        ball.initialize_for_new_round(serve);
        ball
    }

    /// Put the ball above the serving side. Rotation, trail history and the
    /// cached landing point carry over from the previous round.
    pub fn initialize_for_new_round(&mut self, serve: Side) {
        self.x = match serve {
            Side::Left => BALL_SERVE_OFFSET,
            Side::Right => GROUND_WIDTH - BALL_SERVE_OFFSET,
        };
        self.y = 0;
        self.x_velocity = 0;
        self.y_velocity = 1;
        self.punch_effect_radius = 0;
        self.is_power_hit = false;
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            x: self.x,
            y: self.y,
            x_velocity: self.x_velocity,
            y_velocity: self.y_velocity,
        }
    }

    /// Recompute `expected_landing_point_x` from the current position and velocity.
    pub fn refresh_expected_landing_point_x(&mut self) {
        self.expected_landing_point_x = predict::expected_landing_point_x(self.snapshot());
    }

    /// Advance the ball one frame against the walls, ceiling, net pillar and
    /// ground. Returns true if the ball touched the ground this frame, in
    /// which case x is not advanced.
    pub fn process_world_collision(&mut self) -> bool {
        self.previous_previous_x = self.previous_x;
        self.previous_previous_y = self.previous_y;
        self.previous_x = self.x;
        self.previous_y = self.y;

        self.advance_rotation();

        // Upper bound is the full ground width, not width minus radius.
        // Predictions depend on this exact threshold.
        let future_x = self.x + self.x_velocity;
        if future_x < BALL_RADIUS || future_x > GROUND_WIDTH {
            self.x_velocity = -self.x_velocity;
        }

        if self.y + self.y_velocity < 0 {
            self.y_velocity = 1;
        }

        self.bounce_off_net_pillar();

        let future_y = self.y + self.y_velocity;
        if future_y > BALL_TOUCHING_GROUND_Y_COORD {
            self.cues.touches_ground = true;
            self.y_velocity = -self.y_velocity;
            self.punch_effect_x = self.x;
            self.y = BALL_TOUCHING_GROUND_Y_COORD;
            self.punch_effect_radius = BALL_RADIUS;
            self.punch_effect_y = BALL_TOUCHING_GROUND_Y_COORD + BALL_RADIUS;
            return true;
        }

        self.y = future_y;
        self.x += self.x_velocity;
        self.y_velocity += 1;
        false
    }

    fn advance_rotation(&mut self) {
        // A phase of exactly 50 is not wrapped, giving rotation 5.
        let mut future_fine_rotation = self.fine_rotation + self.x_velocity.div_euclid(2);
        if future_fine_rotation < 0 {
            future_fine_rotation += ROTATION_PHASE_WRAP;
        } else if future_fine_rotation > ROTATION_PHASE_WRAP {
            future_fine_rotation -= ROTATION_PHASE_WRAP;
        }
        self.fine_rotation = future_fine_rotation;
        self.rotation = self.fine_rotation / 10;
    }

    fn bounce_off_net_pillar(&mut self) {
        if (self.x - GROUND_HALF_WIDTH).abs() >= NET_PILLAR_HALF_WIDTH
            || self.y <= NET_PILLAR_TOP_TOP_Y_COORD
        {
            return;
        }
        if self.y <= NET_PILLAR_TOP_BOTTOM_Y_COORD {
            // Cap: only a falling ball is sent back up.
            if self.y_velocity > 0 {
                self.y_velocity = -self.y_velocity;
            }
        } else if self.x < GROUND_HALF_WIDTH {
            self.x_velocity = -self.x_velocity.abs();
        } else {
            self.x_velocity = self.x_velocity.abs();
        }
    }
}
