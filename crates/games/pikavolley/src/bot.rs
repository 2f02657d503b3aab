use pikavolley_core::player::Side;
use rand::Rng;

use crate::ball::Ball;
use crate::constants::{GROUND_HALF_WIDTH, GROUND_WIDTH, PLAYER_HALF_LENGTH, PLAYER_LENGTH};
use crate::input::UserInput;
use crate::player::{Player, PlayerState, StandbyPosition};
use crate::predict::expected_landing_point_x_when_power_hit;

/// Ball distance beyond which a computer player may wait instead of chasing.
const STANDBY_DISTANCE: i32 = 100;
/// Reach, in both axes, within which an airborne computer considers a power hit.
const POWER_HIT_REACH: i32 = 48;
/// Opponent distance under which a power hit is forced upward.
const OPPONENT_CROWDING_DISTANCE: i32 = 80;
/// One in this many idle frames re-rolls the standby position.
const STANDBY_REROLL_ODDS: u32 = 20;

/// `(left, right)` x boundaries of a side's half.
fn half_bounds(side: Side) -> (i32, i32) {
    let left = side_offset(side) * GROUND_HALF_WIDTH;
    (left, left + GROUND_HALF_WIDTH)
}

fn side_offset(side: Side) -> i32 {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

/// Whether `x` counts as landing away from `side`'s half.
///
/// For the right side the upper test sits past the far wall and never holds,
/// so only the net edge matters there.
pub fn lands_outside_own_half(side: Side, x: i32) -> bool {
    let offset = side_offset(side);
    x <= offset * GROUND_HALF_WIDTH || x >= offset * GROUND_WIDTH + GROUND_HALF_WIDTH
}

fn toward(from: i32, to: i32) -> i32 {
    if from < to { 1 } else { -1 }
}

/// Generate a computer player's input for this frame. The caller's input is
/// replaced entirely; only the standby position on `player` is updated.
pub fn decide_user_input<R: Rng + ?Sized>(
    player: &mut Player,
    ball: &Ball,
    opponent: &Player,
    rng: &mut R,
) -> UserInput {
    let mut input = UserInput::default();
    let boldness = player.computer_boldness;
    let (left_boundary, right_boundary) = half_bounds(player.side);

    let mut target_x = ball.expected_landing_point_x;
    if (ball.x - player.x).abs() > STANDBY_DISTANCE
        && ball.x_velocity.abs() < boldness + 5
        && lands_outside_own_half(player.side, ball.expected_landing_point_x)
        && player.computer_where_to_stand_by == StandbyPosition::MidCourt
    {
        target_x = left_boundary + GROUND_HALF_WIDTH / 2;
    }

    if (target_x - player.x).abs() > boldness + 8 {
        input.x_direction = toward(player.x, target_x);
    } else if rng.random_range(0..STANDBY_REROLL_ODDS) == 0 {
        player.computer_where_to_stand_by = if rng.random_range(0..2) == 0 {
            StandbyPosition::MidCourt
        } else {
            StandbyPosition::NetAdjacent
        };
    }

    match player.state {
        PlayerState::Normal => {
            if ball.x_velocity.abs() < boldness + 3
                && (ball.x - player.x).abs() < PLAYER_HALF_LENGTH
                && ball.y > -36
                && ball.y < 10 * boldness + 84
                && ball.y_velocity > 0
            {
                input.y_direction = -1;
            }

            let in_own_half = |x: i32| x > left_boundary && x < right_boundary;
            if in_own_half(ball.expected_landing_point_x)
                && (ball.x - player.x).abs() > boldness * 5 + PLAYER_LENGTH
                && in_own_half(ball.x)
                && ball.y > 174
            {
                input.power_hit = true;
                input.x_direction = toward(player.x, ball.x);
            }
        },
        PlayerState::Jumping | PlayerState::JumpingAndPowerHitting => {
            if (ball.x - player.x).abs() > 8 {
                input.x_direction = toward(player.x, ball.x);
            }
            if (ball.x - player.x).abs() < POWER_HIT_REACH
                && (ball.y - player.y).abs() < POWER_HIT_REACH
                && decide_whether_input_power_hit(player, ball, opponent, &mut input, rng)
            {
                input.power_hit = true;
                if (opponent.x - player.x).abs() < OPPONENT_CROWDING_DISTANCE {
                    input.y_direction = -1;
                }
            }
        },
        PlayerState::Diving | PlayerState::LyingDown | PlayerState::Win | PlayerState::Lose => {},
    }

    input
}

/// Search power-hit directions for one that lands away from this side and
/// out of the opponent's reach. On success the direction is written into
/// `input`.
fn decide_whether_input_power_hit<R: Rng + ?Sized>(
    player: &Player,
    ball: &Ball,
    opponent: &Player,
    input: &mut UserInput,
    rng: &mut R,
) -> bool {
    let y_directions: [i32; 3] = if rng.random_range(0..2) == 0 {
        [-1, 0, 1]
    } else {
        [1, 0, -1]
    };
    let snapshot = ball.snapshot();

    for x_direction in [1, 0] {
        for y_direction in y_directions {
            let landing_x = expected_landing_point_x_when_power_hit(x_direction, y_direction, snapshot);
            if lands_outside_own_half(player.side, landing_x)
                && (landing_x - opponent.x).abs() > PLAYER_LENGTH
            {
                input.x_direction = x_direction;
                input.y_direction = y_direction;
                return true;
            }
        }
    }
    tracing::trace!(side = ?player.side, "No safe power-hit direction");
    false
}
