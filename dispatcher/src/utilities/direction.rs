use std::fmt;

use shared_resources::request::Floor;

/// Travel direction of the controller. `Idle` never belongs to a request.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Down,
    #[default]
    Idle,
    Up,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    /// Physical direction of travel from `from` to `to`, `Idle` if already there.
    pub fn towards(from: Floor, to: Floor) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.pad("UP"),
            Direction::Down => f.pad("DOWN"),
            Direction::Idle => f.pad("IDLE"),
        }
    }
}
