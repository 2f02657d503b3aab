use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::player::{Seat, Side};

/// Core trait for a frame-stepped two-sided match.
///
/// The caller owns the frame clock and feeds per-side input bytes; the game
/// owns physics, scoring and round transitions.
pub trait FrameGame: Send + Sync {
    /// Game metadata for selection screens and logs.
    fn metadata(&self) -> GameMetadata;

    /// Called once when the seats are known. Resets scores and the random source.
    fn init(&mut self, seats: &[Seat], config: &MatchConfig);

    /// Advance exactly one frame. Returns the events produced during it.
    fn step(&mut self) -> Vec<GameEvent>;

    /// Serialize the authoritative game state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Apply a previously serialized state.
    fn apply_state(&mut self, state: &[u8]);

    /// Queue encoded input for a side; consumed by the next `step`.
    fn apply_input(&mut self, side: Side, input: &[u8]);

    /// Fixed simulation rate in frames per second.
    fn frame_rate(&self) -> u32 {
        25
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the last frame ended a rally.
    fn is_round_complete(&self) -> bool;

    /// Whether a side has reached the winning score.
    fn is_match_complete(&self) -> bool;

    /// Current score for each side.
    fn round_results(&self) -> Vec<SideScore>;
}

/// Game metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub seats: u8,
}

/// Advisory presentation cues. Front ends may play sounds or effects for
/// them; the simulation never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// A player jumped or started a dive.
    JumpOrDive { side: Side },
    /// A jumping player started a power-hit swing.
    PowerHitSwing { side: Side },
    /// A player entered the victory pose.
    Victory { side: Side },
    /// A power hit connected with the ball.
    BallPowerHit,
    /// The ball touched the ground.
    BallTouchesGround,
}

/// Events emitted by a game during `step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PointScored { side: Side, score: u32 },
    RoundComplete,
    MatchComplete { winner: Side },
    Cue(Cue),
}

/// Score entry for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideScore {
    pub side: Side,
    pub score: u32,
}

/// Encode a value in the wire format accepted by `FrameGame::apply_input`.
pub fn encode_input<T: Serialize>(input: &T) -> Vec<u8> {
    rmp_serde::to_vec(input).expect("input serialization must succeed")
}

/// Generates the `FrameGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_round_complete`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool` fields,
/// and `$StateType` to have a `round_ended: bool` field.
#[macro_export]
macro_rules! frame_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::debug!(error = %e, "Dropped malformed game state"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_round_complete(&self) -> bool {
            self.state.round_ended
        }
    };
}
