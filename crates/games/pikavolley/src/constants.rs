//! Fixed world geometry. All coordinates are integer pixels with y growing
//! downward; the court spans `0..=GROUND_WIDTH` and the net pillar stands at
//! `GROUND_HALF_WIDTH`.

/// Ground width.
pub const GROUND_WIDTH: i32 = 432;
/// Ground half-width, also the net pillar x coordinate.
pub const GROUND_HALF_WIDTH: i32 = GROUND_WIDTH / 2;
/// Player width and height.
pub const PLAYER_LENGTH: i32 = 64;
pub const PLAYER_HALF_LENGTH: i32 = PLAYER_LENGTH / 2;
/// Player y coordinate while standing on the ground.
pub const PLAYER_TOUCHING_GROUND_Y_COORD: i32 = 244;
pub const BALL_RADIUS: i32 = 20;
/// Ball y coordinate while touching the ground.
pub const BALL_TOUCHING_GROUND_Y_COORD: i32 = 252;
/// Net pillar half-width used by collision (wider than the sprite).
pub const NET_PILLAR_HALF_WIDTH: i32 = 25;
/// Top edge of the net pillar cap.
pub const NET_PILLAR_TOP_TOP_Y_COORD: i32 = 176;
/// Bottom edge of the net pillar cap. Below it is the shaft.
pub const NET_PILLAR_TOP_BOTTOM_Y_COORD: i32 = 192;

/// Step cap for landing-point forward simulation. Some velocity states
/// bounce between the net cap and the ceiling without ever reaching ground.
pub const INFINITE_LOOP_LIMIT: u32 = 1000;

/// Player spawn distance from its own baseline.
pub const PLAYER_SPAWN_OFFSET: i32 = 36;
/// Ball serve distance from the serving side's baseline.
pub const BALL_SERVE_OFFSET: i32 = 56;

/// Horizontal player speed in states that accept directional input.
pub const PLAYER_RUN_SPEED: i32 = 6;
/// Horizontal player speed while diving.
pub const PLAYER_DIVE_SPEED: i32 = 8;
/// Vertical velocity at jump start.
pub const PLAYER_JUMP_VELOCITY: i32 = -16;
/// Vertical velocity at dive start.
pub const PLAYER_DIVE_VELOCITY: i32 = -5;
/// Countdown value set when a dive lands.
pub const LYING_DOWN_DURATION: i32 = 3;
/// Frames of windup before power-hit animation frames advance.
pub const POWER_HIT_WINDUP_DELAY: i32 = 5;

/// Minimum upward speed given to a ball by any player contact.
pub const MIN_BOUNCE_SPEED: i32 = 15;
/// Base horizontal speed of a power hit (doubled with directional input).
pub const POWER_HIT_BASE_SPEED: i32 = 10;
