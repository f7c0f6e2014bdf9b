use std::collections::{BTreeSet, HashSet};

use shared_resources::call::Call;
use shared_resources::request::{Floor, Request};

use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("elevator is already at floor {0}")]
    AlreadyAtFloor(Floor),
    #[error("floor {0} is already requested")]
    AlreadyPending(Floor),
}

/// Pending requests split by travel direction.
///
/// Both queues live in a `BTreeSet`, so the up queue is read front to back
/// and the down queue back to front. `pending` always equals the union of the
/// two queues, and the queues never share a floor.
#[derive(Debug, Clone, Default)]
pub struct RequestRegistry {
    up_queue: BTreeSet<Floor>,
    down_queue: BTreeSet<Floor>,
    pending: HashSet<Floor>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, request: Request, current_floor: Floor) -> Result<(), Rejection> {
        if request.floor == current_floor {
            return Err(Rejection::AlreadyAtFloor(request.floor));
        }
        if !self.pending.insert(request.floor) {
            return Err(Rejection::AlreadyPending(request.floor));
        }
        self.queue_mut(request.call).insert(request.floor);
        Ok(())
    }

    pub fn has_pending(&self) -> bool {
        !self.up_queue.is_empty() || !self.down_queue.is_empty()
    }

    pub fn is_pending(&self, floor: Floor) -> bool {
        self.pending.contains(&floor)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn has_calls(&self, call: Call) -> bool {
        !self.queue(call).is_empty()
    }

    /// Nearest floor at or beyond `current_floor` in `direction`, without wrapping.
    pub fn reachable_in_direction(&self, direction: Direction, current_floor: Floor) -> Option<Floor> {
        match direction {
            Direction::Up => self.up_queue.range(current_floor..).next().copied(),
            Direction::Down => self.down_queue.range(..=current_floor).next_back().copied(),
            Direction::Idle => None,
        }
    }

    /// Like [`Self::reachable_in_direction`], but when every floor of the queue is
    /// behind the elevator, falls back to the first floor in the queue's order.
    pub fn next_in_direction(&self, direction: Direction, current_floor: Floor) -> Option<Floor> {
        self.reachable_in_direction(direction, current_floor).or_else(|| match direction {
            Direction::Up => self.up_queue.first().copied(),
            Direction::Down => self.down_queue.last().copied(),
            Direction::Idle => None,
        })
    }

    pub fn remove(&mut self, floor: Floor) {
        if self.pending.remove(&floor) {
            self.up_queue.remove(&floor);
            self.down_queue.remove(&floor);
        }
    }

    /// Floors waiting in `call`'s queue, in service order.
    pub fn floors(&self, call: Call) -> Vec<Floor> {
        match call {
            Call::Up => self.up_queue.iter().copied().collect(),
            Call::Down => self.down_queue.iter().rev().copied().collect(),
        }
    }

    fn queue(&self, call: Call) -> &BTreeSet<Floor> {
        match call {
            Call::Up => &self.up_queue,
            Call::Down => &self.down_queue,
        }
    }

    fn queue_mut(&mut self, call: Call) -> &mut BTreeSet<Floor> {
        match call {
            Call::Up => &mut self.up_queue,
            Call::Down => &mut self.down_queue,
        }
    }
}
