//! Landing-point prediction by forward-simulating a copy of the ball.
//!
//! The simulation repeats the live ball's wall, ceiling, net and gravity
//! rules on a [`BallSnapshot`] value until it passes the ground line or the
//! step cap is hit. It never touches the live [`Ball`](crate::ball::Ball).

use crate::constants::{
    BALL_RADIUS, BALL_TOUCHING_GROUND_Y_COORD, GROUND_HALF_WIDTH, GROUND_WIDTH,
    INFINITE_LOOP_LIMIT, NET_PILLAR_HALF_WIDTH, NET_PILLAR_TOP_BOTTOM_Y_COORD,
    NET_PILLAR_TOP_TOP_Y_COORD, POWER_HIT_BASE_SPEED,
};

/// Position and velocity of a ball, copied out of the live ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallSnapshot {
    pub x: i32,
    pub y: i32,
    pub x_velocity: i32,
    pub y_velocity: i32,
}

impl BallSnapshot {
    /// The velocity a power hit with the given input would give this ball.
    /// Horizontal speed is doubled by any x input and always aims at the
    /// other half; vertical speed is doubled and signed by the y input.
    pub fn with_power_hit(self, x_direction: i32, y_direction: i32) -> Self {
        let speed = (x_direction.abs() + 1) * POWER_HIT_BASE_SPEED;
        let x_velocity = if self.x < GROUND_HALF_WIDTH {
            speed
        } else {
            -speed
        };
        Self {
            x_velocity,
            y_velocity: self.y_velocity.abs() * y_direction * 2,
            ..self
        }
    }
}

/// How the simulated ball interacts with the net pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetModel {
    /// Cap reflects falling balls, shaft pushes the ball back to its side.
    /// The cap band excludes its bottom edge, one pixel narrower than the
    /// live ball's.
    Full,
    /// Any pillar contact only reflects a falling ball. Balls that would be
    /// knocked back by the shaft are predicted to carry on, so the computer
    /// sometimes power hits into the net.
    VerticalOnly,
}

/// Result of a forward simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    /// Ball x when the simulation stopped.
    pub x: i32,
    /// Number of simulation steps run, at most `INFINITE_LOOP_LIMIT`.
    pub steps: u32,
    /// False if the step cap stopped the simulation first.
    pub reached_ground: bool,
}

/// Simulate `snapshot` until it passes the ground line or the step cap.
pub fn simulate_landing(snapshot: BallSnapshot, net: NetModel) -> Landing {
    let mut ball = snapshot;
    let mut steps = 0;
    loop {
        steps += 1;

        let future_x = ball.x + ball.x_velocity;
        if future_x < BALL_RADIUS || future_x > GROUND_WIDTH {
            ball.x_velocity = -ball.x_velocity;
        }
        if ball.y + ball.y_velocity < 0 {
            ball.y_velocity = 1;
        }

        if (ball.x - GROUND_HALF_WIDTH).abs() < NET_PILLAR_HALF_WIDTH
            && ball.y > NET_PILLAR_TOP_TOP_Y_COORD
        {
            match net {
                NetModel::Full => {
                    if ball.y < NET_PILLAR_TOP_BOTTOM_Y_COORD {
                        if ball.y_velocity > 0 {
                            ball.y_velocity = -ball.y_velocity;
                        }
                    } else if ball.x < GROUND_HALF_WIDTH {
                        ball.x_velocity = -ball.x_velocity.abs();
                    } else {
                        ball.x_velocity = ball.x_velocity.abs();
                    }
                },
                NetModel::VerticalOnly => {
                    if ball.y_velocity > 0 {
                        ball.y_velocity = -ball.y_velocity;
                    }
                },
            }
        }

        ball.y += ball.y_velocity;
        if ball.y > BALL_TOUCHING_GROUND_Y_COORD {
            return Landing {
                x: ball.x,
                steps,
                reached_ground: true,
            };
        }
        if steps >= INFINITE_LOOP_LIMIT {
            tracing::debug!(
                x = ball.x,
                y = ball.y,
                "Landing prediction hit the step cap"
            );
            return Landing {
                x: ball.x,
                steps,
                reached_ground: false,
            };
        }

        ball.x += ball.x_velocity;
        ball.y_velocity += 1;
    }
}

/// Expected landing x of a ball left to fly on its current velocity.
pub fn expected_landing_point_x(snapshot: BallSnapshot) -> i32 {
    simulate_landing(snapshot, NetModel::Full).x
}

/// Expected landing x if the ball were power hit right now with the given input.
pub fn expected_landing_point_x_when_power_hit(
    x_direction: i32,
    y_direction: i32,
    snapshot: BallSnapshot,
) -> i32 {
    simulate_landing(
        snapshot.with_power_hit(x_direction, y_direction),
        NetModel::VerticalOnly,
    )
    .x
}
