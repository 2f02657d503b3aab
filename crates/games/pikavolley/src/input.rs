use serde::{Deserialize, Serialize};

/// Raw button state for one frame, as delivered by a front end or agent.
///
/// The left seat has a sixth "down-right" button; the right seat does not,
/// which is modelled as `down_right: None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub power_hit: bool,
    pub down_right: Option<bool>,
}

impl ActionKeys {
    /// Build from a binary action vector `[left, right, up, down, power_hit, (down_right)]`.
    /// Missing trailing entries read as released.
    pub fn from_buttons(buttons: &[u8]) -> Self {
        let pressed = |i: usize| buttons.get(i).is_some_and(|&b| b != 0);
        Self {
            left: pressed(0),
            right: pressed(1),
            up: pressed(2),
            down: pressed(3),
            power_hit: pressed(4),
            down_right: buttons.get(5).map(|&b| b != 0),
        }
    }
}

/// Normalized per-frame input consumed by the physics engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    /// -1 left, 0 none, 1 right.
    pub x_direction: i32,
    /// -1 up, 0 none, 1 down.
    pub y_direction: i32,
    /// True only on the frame the power-hit button goes down.
    pub power_hit: bool,
}

/// Converts held buttons into a `UserInput`, edge-triggering the power-hit button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAdapter {
    power_hit_key_is_down_previous: bool,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&mut self, keys: &ActionKeys) -> UserInput {
        let down_right = keys.down_right.unwrap_or(false);

        let x_direction = if keys.left {
            -1
        } else if keys.right || down_right {
            1
        } else {
            0
        };

        let y_direction = if keys.up {
            -1
        } else if keys.down || down_right {
            1
        } else {
            0
        };

        let is_down = keys.power_hit;
        let power_hit = !self.power_hit_key_is_down_previous && is_down;
        self.power_hit_key_is_down_previous = is_down;

        UserInput {
            x_direction,
            y_direction,
            power_hit,
        }
    }
}
