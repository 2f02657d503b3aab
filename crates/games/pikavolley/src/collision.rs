use rand::Rng;

use crate::ball::Ball;
use crate::constants::{BALL_RADIUS, MIN_BOUNCE_SPEED, PLAYER_HALF_LENGTH};
use crate::input::UserInput;
use crate::player::{Player, PlayerState};

/// Axis-aligned overlap test between the ball center and a player's box.
/// Both edges are inclusive.
pub fn is_collision_between_ball_and_player_happened(
    ball: &Ball,
    player_x: i32,
    player_y: i32,
) -> bool {
    (ball.x - player_x).abs() <= PLAYER_HALF_LENGTH && (ball.y - player_y).abs() <= PLAYER_HALF_LENGTH
}

/// Set the ball's velocity after a player contact. Position is left to the
/// next world step.
pub fn process_collision_between_ball_and_player<R: Rng + ?Sized>(
    ball: &mut Ball,
    player_x: i32,
    input: &UserInput,
    player_state: PlayerState,
    rng: &mut R,
) {
    // Off-center contact sends the ball sideways, harder the further out.
    let offset = ball.x - player_x;
    if offset != 0 {
        ball.x_velocity = offset.signum() * (offset.abs() / 3);
    }
    if ball.x_velocity == 0 {
        ball.x_velocity = rng.random_range(-1..=1);
    }

    let abs_y_velocity = ball.y_velocity.abs();
    ball.y_velocity = -abs_y_velocity.max(MIN_BOUNCE_SPEED);

    if player_state == PlayerState::JumpingAndPowerHitting {
        let snapshot = ball.snapshot().with_power_hit(input.x_direction, input.y_direction);
        ball.x_velocity = snapshot.x_velocity;
        ball.y_velocity = snapshot.y_velocity;
        ball.punch_effect_x = ball.x;
        ball.punch_effect_y = ball.y;
        ball.punch_effect_radius = BALL_RADIUS;
        ball.is_power_hit = true;
        ball.cues.power_hit = true;
    } else {
        ball.is_power_hit = false;
    }
}

/// Edge-triggered contact resolution for one player. A contact is processed
/// only on the first overlapping frame; the flag clears once they separate.
/// Returns true when a new contact changed the ball's velocity.
pub fn resolve<R: Rng + ?Sized>(
    ball: &mut Ball,
    player: &mut Player,
    input: &UserInput,
    rng: &mut R,
) -> bool {
    if !is_collision_between_ball_and_player_happened(ball, player.x, player.y) {
        player.is_collision_with_ball_happened = false;
        return false;
    }
    if player.is_collision_with_ball_happened {
        return false;
    }
    process_collision_between_ball_and_player(ball, player.x, input, player.state, rng);
    player.is_collision_with_ball_happened = true;
    true
}
