use serde::{Deserialize, Serialize};

/// Which half of the court a seat plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Array index for per-side storage (left = 0, right = 1).
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Who drives a seat's input each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    #[default]
    Human,
    Computer,
}

impl Controller {
    pub fn is_computer(self) -> bool {
        self == Controller::Computer
    }
}

/// A participant occupying one side of the court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub side: Side,
    pub controller: Controller,
}

impl Seat {
    pub fn new(side: Side, controller: Controller) -> Self {
        Self { side, controller }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_index() {
        assert_eq!(Side::Left.index(), 0);
        assert_eq!(Side::Right.index(), 1);
        assert_eq!(Side::BOTH.map(Side::index), [0, 1]);
    }

    #[test]
    fn default_controller_is_human() {
        assert_eq!(Controller::default(), Controller::Human);
        assert!(Controller::Computer.is_computer());
    }
}
