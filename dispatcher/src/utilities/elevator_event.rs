use shared_resources::request::Floor;

use super::direction::Direction;

/// Observational output of the controller, in the order things happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorEvent {
    DirectionChanged(Direction),
    FloorReached(Floor),
    DoorsOpened(Floor),
    Idle,
}

impl ElevatorEvent {
    /// Floor at which the doors opened, if this is an arrival.
    pub fn arrival(&self) -> Option<Floor> {
        match self {
            ElevatorEvent::DoorsOpened(floor) => Some(*floor),
            _ => None,
        }
    }
}
