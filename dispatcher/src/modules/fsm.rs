/// ----- FSM MODULE -----
/// This module owns the dispatcher. All requests reach it through the
/// input channel, so the registry is only ever touched from this thread.
/// Requests arriving while the car travels are picked up between stops.

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use shared_resources::config::ElevatorConfig;

use crate::utilities::clock::TravelClock;
use crate::utilities::dispatcher::Dispatcher;
use crate::utilities::elevator_event::ElevatorEvent;
use crate::utilities::elevator_status::ElevatorStatus;

use super::io::Input;

/// Returns whether the input asks to stop.
fn handle_input<C: TravelClock>(dispatcher: &mut Dispatcher<C>, input: Input) -> bool {
    match input {
        Input::Request(request) => {
            // rejections are logged by the dispatcher
            dispatcher.submit(request).ok();
            false
        },
        Input::Quit => true,
    }
}

pub fn main<C: TravelClock>(
    elevator_settings: ElevatorConfig,
    clock: C,
    input_rx: Receiver<Input>,
    event_tx: Sender<ElevatorEvent>,
    elevator_status_tx: Sender<ElevatorStatus>,
) -> ElevatorStatus {
    let mut dispatcher = Dispatcher::starting_at(elevator_settings.start_floor, clock, event_tx);
    let mut quitting = false;

    loop {
        for input in input_rx.try_iter() {
            quitting |= handle_input(&mut dispatcher, input);
        }
        if dispatcher.has_pending() {
            dispatcher.step();
            continue;
        }

        let status = dispatcher.status();
        debug!(status = %status.as_json(), "waiting for requests");
        elevator_status_tx.send(status).ok();
        if quitting {
            break;
        }
        match input_rx.recv() {
            Ok(input) => quitting |= handle_input(&mut dispatcher, input),
            Err(_) => break,
        }
    }

    info!(floor = dispatcher.floor(), "state machine stopped");
    dispatcher.status()
}
