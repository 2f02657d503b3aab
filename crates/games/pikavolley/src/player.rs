use pikavolley_core::player::{Controller, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    GROUND_HALF_WIDTH, GROUND_WIDTH, LYING_DOWN_DURATION, PLAYER_DIVE_SPEED, PLAYER_DIVE_VELOCITY,
    PLAYER_HALF_LENGTH, PLAYER_JUMP_VELOCITY, PLAYER_RUN_SPEED, PLAYER_SPAWN_OFFSET,
    PLAYER_TOUCHING_GROUND_Y_COORD, POWER_HIT_WINDUP_DELAY,
};
use crate::input::UserInput;

/// Exclusive upper bound of the per-round boldness roll.
pub const BOLDNESS_RANGE: i32 = 5;

/// Player state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Normal,
    Jumping,
    JumpingAndPowerHitting,
    Diving,
    LyingDown,
    Win,
    Lose,
}

impl PlayerState {
    /// States that run, jump and read directional input.
    pub fn accepts_directional_input(self) -> bool {
        matches!(
            self,
            PlayerState::Normal | PlayerState::Jumping | PlayerState::JumpingAndPowerHitting
        )
    }
}

/// Where an idle computer player waits while the ball hangs around the
/// opponent's half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandbyPosition {
    /// Middle of its own half.
    #[default]
    MidCourt,
    /// Next to the net (keeps following the predicted landing point).
    NetAdjacent,
}

/// Presentation cues raised by a player during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerCues {
    pub jump_or_dive: bool,
    pub power_hit_swing: bool,
    pub victory: bool,
}

/// One of the two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub controller: Controller,
    pub x: i32,
    pub y: i32,
    pub y_velocity: i32,
    pub state: PlayerState,
    pub frame_number: i32,
    pub delay_before_next_frame: i32,
    pub normal_status_arm_swing_direction: i32,
    /// -1 left, 0 not diving, 1 right.
    pub diving_direction: i32,
    pub lying_down_duration_left: i32,
    /// Set while the ball overlaps this player after a processed contact.
    pub is_collision_with_ball_happened: bool,
    /// 0..BOLDNESS_RANGE, re-rolled every round. Higher means a computer
    /// player reads more balls as the opponent's, keeps a wider deadband,
    /// jumps more and dives less.
    pub computer_boldness: i32,
    pub computer_where_to_stand_by: StandbyPosition,
    pub is_winner: bool,
    pub game_ended: bool,
    #[serde(skip)]
    pub cues: PlayerCues,
}

/// Inclusive x range a player's center may occupy.
pub fn court_bounds(side: Side) -> (i32, i32) {
    match side {
        Side::Left => (PLAYER_HALF_LENGTH, GROUND_HALF_WIDTH - PLAYER_HALF_LENGTH),
        Side::Right => (
            GROUND_HALF_WIDTH + PLAYER_HALF_LENGTH,
            GROUND_WIDTH - PLAYER_HALF_LENGTH,
        ),
    }
}

impl Player {
    pub fn new<R: Rng + ?Sized>(side: Side, controller: Controller, rng: &mut R) -> Self {
        let mut player = Self {
            side,
            controller,
            x: 0,
            y: 0,
            y_velocity: 0,
            state: PlayerState::Normal,
            frame_number: 0,
            delay_before_next_frame: 0,
            normal_status_arm_swing_direction: 1,
            diving_direction: 0,
            lying_down_duration_left: -1,
            is_collision_with_ball_happened: false,
            computer_boldness: 0,
            computer_where_to_stand_by: StandbyPosition::MidCourt,
            is_winner: false,
            game_ended: false,
            cues: PlayerCues::default(),
        };
        player.initialize_for_new_round(rng);
        player
    }

    /// Reset position and animation for a new round and re-roll boldness.
    pub fn initialize_for_new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = match self.side {
            Side::Left => PLAYER_SPAWN_OFFSET,
            Side::Right => GROUND_WIDTH - PLAYER_SPAWN_OFFSET,
        };
        self.y = PLAYER_TOUCHING_GROUND_Y_COORD;
        self.y_velocity = 0;
        self.is_collision_with_ball_happened = false;
        self.state = PlayerState::Normal;
        self.frame_number = 0;
        self.normal_status_arm_swing_direction = 1;
        self.delay_before_next_frame = 0;
        self.computer_boldness = rng.random_range(0..BOLDNESS_RANGE);
    }

    pub fn is_touching_ground(&self) -> bool {
        self.y == PLAYER_TOUCHING_GROUND_Y_COORD
    }

    /// Advance this player one frame with an already-decided input.
    pub fn process_movement(&mut self, input: &UserInput) {
        if self.state == PlayerState::LyingDown {
            self.tick_lying_down();
            return;
        }

        self.x += self.horizontal_velocity(input);
        self.clamp_to_court();

        self.try_jump(input);
        self.apply_gravity();
        self.apply_power_hit_input(input);
        self.advance_animation();

        if self.game_ended {
            self.enter_game_end_pose();
            self.advance_game_end_frame();
        }
    }

    fn tick_lying_down(&mut self) {
        self.lying_down_duration_left -= 1;
        if self.lying_down_duration_left < -1 {
            self.state = PlayerState::Normal;
        }
    }

    fn horizontal_velocity(&self, input: &UserInput) -> i32 {
        match self.state {
            PlayerState::Normal | PlayerState::Jumping | PlayerState::JumpingAndPowerHitting => {
                input.x_direction * PLAYER_RUN_SPEED
            },
            PlayerState::Diving => self.diving_direction * PLAYER_DIVE_SPEED,
            PlayerState::LyingDown | PlayerState::Win | PlayerState::Lose => 0,
        }
    }

    fn clamp_to_court(&mut self) {
        let (min_x, max_x) = court_bounds(self.side);
        self.x = self.x.clamp(min_x, max_x);
    }

    fn try_jump(&mut self, input: &UserInput) {
        if self.state.accepts_directional_input()
            && input.y_direction == -1
            && self.is_touching_ground()
        {
            self.y_velocity = PLAYER_JUMP_VELOCITY;
            self.state = PlayerState::Jumping;
            self.frame_number = 0;
            self.cues.jump_or_dive = true;
        }
    }

    fn apply_gravity(&mut self) {
        let future_y = self.y + self.y_velocity;
        self.y = future_y;
        if future_y < PLAYER_TOUCHING_GROUND_Y_COORD {
            self.y_velocity += 1;
        } else if future_y > PLAYER_TOUCHING_GROUND_Y_COORD {
            self.land();
        }
    }

    fn land(&mut self) {
        self.y_velocity = 0;
        self.y = PLAYER_TOUCHING_GROUND_Y_COORD;
        self.frame_number = 0;
        self.state = match self.state {
            PlayerState::Diving => {
                self.lying_down_duration_left = LYING_DOWN_DURATION;
                PlayerState::LyingDown
            },
            _ => PlayerState::Normal,
        };
    }

    fn apply_power_hit_input(&mut self, input: &UserInput) {
        if !input.power_hit {
            return;
        }
        match self.state {
            PlayerState::Jumping => {
                self.delay_before_next_frame = POWER_HIT_WINDUP_DELAY;
                self.frame_number = 0;
                self.state = PlayerState::JumpingAndPowerHitting;
                self.cues.power_hit_swing = true;
            },
            PlayerState::Normal if input.x_direction != 0 => {
                self.state = PlayerState::Diving;
                self.frame_number = 0;
                self.diving_direction = input.x_direction;
                self.y_velocity = PLAYER_DIVE_VELOCITY;
                self.cues.jump_or_dive = true;
            },
            _ => {},
        }
    }

    fn advance_animation(&mut self) {
        match self.state {
            PlayerState::Jumping => {
                self.frame_number = (self.frame_number + 1) % 3;
            },
            PlayerState::JumpingAndPowerHitting => {
                if self.delay_before_next_frame < 1 {
                    self.frame_number += 1;
                    if self.frame_number > 4 {
                        self.frame_number = 0;
                        self.state = PlayerState::Jumping;
                    }
                } else {
                    self.delay_before_next_frame -= 1;
                }
            },
            PlayerState::Normal => {
                self.delay_before_next_frame += 1;
                if self.delay_before_next_frame > 3 {
                    self.delay_before_next_frame = 0;
                    let future_frame_number =
                        self.frame_number + self.normal_status_arm_swing_direction;
                    if !(0..=4).contains(&future_frame_number) {
                        self.normal_status_arm_swing_direction =
                            -self.normal_status_arm_swing_direction;
                    }
                    self.frame_number += self.normal_status_arm_swing_direction;
                }
            },
            PlayerState::Diving | PlayerState::LyingDown | PlayerState::Win | PlayerState::Lose => {
            },
        }
    }

    fn enter_game_end_pose(&mut self) {
        if self.state != PlayerState::Normal {
            return;
        }
        if self.is_winner {
            self.state = PlayerState::Win;
            self.cues.victory = true;
        } else {
            self.state = PlayerState::Lose;
        }
        self.delay_before_next_frame = 0;
        self.frame_number = 0;
    }

    fn advance_game_end_frame(&mut self) {
        if self.frame_number < 4 {
            self.delay_before_next_frame += 1;
            if self.delay_before_next_frame > 4 {
                self.delay_before_next_frame = 0;
                self.frame_number += 1;
            }
        }
    }
}
