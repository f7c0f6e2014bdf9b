use shared_resources::call::Call;
use shared_resources::request::Floor;

use super::direction::Direction;
use super::request_registry::RequestRegistry;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ElevatorStatus {
    pub floor: Floor,
    pub direction: Direction,
    pub up_requests: Vec<Floor>,
    pub down_requests: Vec<Floor>,
}

impl ElevatorStatus {
    pub fn new(floor: Floor, direction: Direction, registry: &RequestRegistry) -> Self {
        ElevatorStatus {
            floor,
            direction,
            up_requests: registry.floors(Call::Up),
            down_requests: registry.floors(Call::Down),
        }
    }

    pub fn requests_at_floor(&self, floor: Floor) -> [bool; 2] {
        [self.up_requests.contains(&floor), self.down_requests.contains(&floor)]
    }

    pub fn as_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
