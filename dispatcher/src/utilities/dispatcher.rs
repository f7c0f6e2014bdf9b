use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use shared_resources::call::Call;
use shared_resources::request::{Floor, Request};

use super::clock::TravelClock;
use super::direction::Direction;
use super::elevator_event::ElevatorEvent;
use super::elevator_status::ElevatorStatus;
use super::request_registry::{Rejection, RequestRegistry};

/// Single-car scan controller.
///
/// The car keeps its direction while the queue for that direction still has a
/// floor ahead of it. Only then does it turn to the other queue, or go idle
/// when both queues are drained. Events are sent on `event_tx`; a dropped
/// receiver does not affect dispatching.
#[derive(Debug)]
pub struct Dispatcher<C: TravelClock> {
    floor: Floor,
    direction: Direction,
    registry: RequestRegistry,
    clock: C,
    event_tx: Sender<ElevatorEvent>,
}

impl<C: TravelClock> Dispatcher<C> {
    pub fn new(clock: C, event_tx: Sender<ElevatorEvent>) -> Self {
        Self::starting_at(0, clock, event_tx)
    }

    pub fn starting_at(floor: Floor, clock: C, event_tx: Sender<ElevatorEvent>) -> Self {
        Dispatcher {
            floor,
            direction: Direction::Idle,
            registry: RequestRegistry::new(),
            clock,
            event_tx,
        }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn registry(&self) -> &RequestRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus::new(self.floor, self.direction, &self.registry)
    }

    pub fn has_pending(&self) -> bool {
        self.registry.has_pending()
    }

    pub fn submit(&mut self, request: Request) -> Result<(), Rejection> {
        let result = self.registry.submit(request, self.floor);
        match &result {
            Ok(()) => info!(floor = request.floor, call = %request.call, "request accepted"),
            Err(rejection) => warn!(%rejection, "request rejected"),
        }
        result
    }

    /// Runs one iteration of the scan: serves the next stop, or turns around.
    /// Returns whether requests remain afterwards.
    pub fn step(&mut self) -> bool {
        if !self.registry.has_pending() {
            self.set_direction(Direction::Idle);
            return false;
        }

        if self.direction == Direction::Idle {
            let direction = if self.registry.has_calls(Call::Up) { Direction::Up } else { Direction::Down };
            self.set_direction(direction);
        }

        let other_direction = self.direction.opposite();
        if let Some(target) = self.registry.reachable_in_direction(self.direction, self.floor) {
            self.serve(target);
        } else if self.registry.reachable_in_direction(other_direction, self.floor).is_some() {
            self.set_direction(other_direction);
        } else if let Some(target) = self.stranded_target() {
            let heading = Direction::towards(self.floor, target);
            if heading != Direction::Idle {
                self.set_direction(heading);
            }
            self.serve(target);
        }

        if !self.registry.has_pending() {
            self.set_direction(Direction::Idle);
        }
        self.registry.has_pending()
    }

    pub fn process_requests(&mut self) {
        while self.step() {}
    }

    // Only floors behind the car are left in either queue.
    fn stranded_target(&self) -> Option<Floor> {
        self.registry
            .next_in_direction(self.direction, self.floor)
            .or_else(|| self.registry.next_in_direction(self.direction.opposite(), self.floor))
    }

    fn set_direction(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        match direction {
            Direction::Idle => {
                info!(floor = self.floor, "elevator idle");
                self.emit(ElevatorEvent::Idle);
            },
            Direction::Up | Direction::Down => {
                info!(%direction, floor = self.floor, "direction changed");
                self.emit(ElevatorEvent::DirectionChanged(direction));
            },
        }
    }

    fn serve(&mut self, target: Floor) {
        self.move_to_floor(target);
        self.registry.remove(target);
    }

    fn move_to_floor(&mut self, target: Floor) {
        debug!(from = self.floor, to = target, direction = %self.direction, "moving");
        while self.floor != target {
            if target > self.floor {
                self.floor += 1;
            } else {
                self.floor -= 1;
            }
            debug!(floor = self.floor, "reached floor");
            self.emit(ElevatorEvent::FloorReached(self.floor));
            if let Err(err) = self.clock.wait_between_floors() {
                warn!(floor = self.floor, "{err}, continuing travel");
            }
        }
        info!(floor = target, "doors opened");
        self.emit(ElevatorEvent::DoorsOpened(target));
    }

    fn emit(&self, event: ElevatorEvent) {
        self.event_tx.send(event).ok();
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::{unbounded, Receiver};

    use super::*;
    use crate::utilities::clock::{InstantClock, InterruptedWait};
    use crate::utilities::elevator_event::ElevatorEvent::*;

    fn dispatcher_at(floor: Floor) -> (Dispatcher<InstantClock>, Receiver<ElevatorEvent>) {
        let (event_tx, event_rx) = unbounded();
        (Dispatcher::starting_at(floor, InstantClock::new(), event_tx), event_rx)
    }

    fn submit(dispatcher: &mut Dispatcher<impl TravelClock>, floor: Floor, call: Call) -> Result<(), Rejection> {
        dispatcher.submit(Request::new(floor, call))
    }

    #[test]
    fn single_request_up_from_ground() {
        let (mut dispatcher, event_rx) = dispatcher_at(0);
        submit(&mut dispatcher, 5, Call::Up).unwrap();
        dispatcher.process_requests();

        let events: Vec<_> = event_rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                DirectionChanged(Direction::Up),
                FloorReached(1),
                FloorReached(2),
                FloorReached(3),
                FloorReached(4),
                FloorReached(5),
                DoorsOpened(5),
                Idle,
            ]
        );
        assert_eq!(dispatcher.floor(), 5);
        assert_eq!(dispatcher.direction(), Direction::Idle);
        assert_eq!(dispatcher.clock().ticks, 5);
    }

    #[test]
    fn request_for_current_floor_emits_nothing() {
        let (mut dispatcher, event_rx) = dispatcher_at(5);
        assert_eq!(submit(&mut dispatcher, 5, Call::Up), Err(Rejection::AlreadyAtFloor(5)));
        dispatcher.process_requests();
        assert!(event_rx.try_iter().next().is_none());
        assert!(!dispatcher.has_pending());
    }

    #[test]
    fn step_reports_remaining_work() {
        let (mut dispatcher, _event_rx) = dispatcher_at(0);
        submit(&mut dispatcher, 3, Call::Up).unwrap();
        submit(&mut dispatcher, 7, Call::Up).unwrap();
        assert!(dispatcher.step());
        assert_eq!(dispatcher.floor(), 3);
        assert!(!dispatcher.step());
        assert_eq!(dispatcher.floor(), 7);
        assert!(!dispatcher.step());
    }

    #[test]
    fn turning_around_is_its_own_step() {
        let (mut dispatcher, event_rx) = dispatcher_at(5);
        submit(&mut dispatcher, 2, Call::Down).unwrap();
        submit(&mut dispatcher, 8, Call::Up).unwrap();

        assert!(dispatcher.step());
        assert_eq!((dispatcher.floor(), dispatcher.direction()), (8, Direction::Up));
        assert!(dispatcher.step());
        assert_eq!((dispatcher.floor(), dispatcher.direction()), (8, Direction::Down));
        assert!(!dispatcher.step());
        assert_eq!(dispatcher.floor(), 2);

        let changes: Vec<_> = event_rx
            .try_iter()
            .filter(|event| matches!(event, DirectionChanged(_) | Idle))
            .collect();
        assert_eq!(changes, vec![DirectionChanged(Direction::Up), DirectionChanged(Direction::Down), Idle]);
    }

    #[test]
    fn stranded_up_request_is_fetched_heading_down() {
        let (mut dispatcher, event_rx) = dispatcher_at(5);
        submit(&mut dispatcher, 2, Call::Up).unwrap();
        dispatcher.process_requests();

        let events: Vec<_> = event_rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                DirectionChanged(Direction::Up),
                DirectionChanged(Direction::Down),
                FloorReached(4),
                FloorReached(3),
                FloorReached(2),
                DoorsOpened(2),
                Idle,
            ]
        );
    }

    #[test]
    fn requests_behind_in_both_queues_are_all_served() {
        let (mut dispatcher, event_rx) = dispatcher_at(5);
        submit(&mut dispatcher, 2, Call::Up).unwrap();
        submit(&mut dispatcher, 8, Call::Down).unwrap();
        dispatcher.process_requests();

        let arrivals: Vec<_> = event_rx.try_iter().filter_map(|event| event.arrival()).collect();
        assert_eq!(arrivals, vec![2, 8]);
        assert!(dispatcher.registry().is_empty());
    }

    struct FlakyClock {
        calls: usize,
    }

    impl TravelClock for FlakyClock {
        fn wait_between_floors(&mut self) -> Result<(), InterruptedWait> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(InterruptedWait)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn interrupted_waits_do_not_stop_travel() {
        let (event_tx, event_rx) = unbounded();
        let mut dispatcher = Dispatcher::new(FlakyClock { calls: 0 }, event_tx);
        submit(&mut dispatcher, 4, Call::Up).unwrap();
        dispatcher.process_requests();

        let floors: Vec<_> = event_rx
            .try_iter()
            .filter_map(|event| match event {
                FloorReached(floor) => Some(floor),
                _ => None,
            })
            .collect();
        assert_eq!(floors, vec![1, 2, 3, 4]);
        assert_eq!(dispatcher.floor(), 4);
        assert_eq!(dispatcher.clock().calls, 4);
    }

    #[test]
    fn dropped_event_receiver_does_not_matter() {
        let (mut dispatcher, event_rx) = dispatcher_at(0);
        drop(event_rx);
        submit(&mut dispatcher, 3, Call::Down).unwrap();
        dispatcher.process_requests();
        assert_eq!(dispatcher.floor(), 3);
        assert!(!dispatcher.has_pending());
    }
}
