use pikavolley_core::player::Side;

use crate::constants::GROUND_HALF_WIDTH;

/// Side that wins the rally when the ball lands at `landing_x`. A ball on
/// the net line counts as landing on the right half.
pub fn point_winner(landing_x: i32) -> Side {
    if landing_x < GROUND_HALF_WIDTH {
        Side::Right
    } else {
        Side::Left
    }
}

/// Whether `score` finishes the match.
pub fn has_won(score: u32, winning_score: u32) -> bool {
    score >= winning_score
}
