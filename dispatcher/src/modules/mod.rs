use std::io::{stdin, Error, ErrorKind, Write};
use std::thread;

use crossbeam_channel::{never, select, unbounded, Receiver};
use tracing::info;

use shared_resources::config::DispatchConfig;

use crate::utilities::clock::ChannelClock;
use crate::utilities::debug::Debug;
use crate::utilities::elevator_event::ElevatorEvent;
use crate::utilities::elevator_status::ElevatorStatus;

pub mod fsm;
pub mod io;

pub fn run() -> std::io::Result<()> {
    // READ CONFIGURATION
    let config = DispatchConfig::get().map_err(|err| Error::new(ErrorKind::InvalidInput, err))?;
    let top_floor = config.elevator.top_floor;
    info!(?config, "configuration loaded");

    // INITIALIZE CHANNELS
    let (input_tx, input_rx) = unbounded();
    let (interrupt_tx, interrupt_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();
    let (elevator_status_tx, elevator_status_rx) = unbounded();

    // INITIALIZE THREAD FOR REQUEST INPUT
    thread::Builder::new().name("request_input".to_string()).spawn(move || io::main(
        stdin().lock(),
        top_floor,
        input_tx,
        interrupt_tx,
    ))?;

    // INITIALIZE THREAD FOR STATE MACHINE
    let fsm_handle = {
        let elevator_settings = config.elevator.clone();
        let clock = ChannelClock::new(elevator_settings.floor_travel_time, interrupt_rx);
        thread::Builder::new().name("fsm".to_string()).spawn(move || fsm::main(
            elevator_settings,
            clock,
            input_rx,
            event_tx,
            elevator_status_tx,
        ))?
    };

    let mut debug = Debug::new(top_floor);
    print_until_stopped(&mut debug, &event_rx, &elevator_status_rx)?;

    if fsm_handle.join().is_err() {
        return Err(Error::new(ErrorKind::Other, "state machine thread panicked"));
    }
    println!("\nElevator system stopped.");
    Ok(())
}

/// Prints events and status tables until the state machine has sent its last status.
fn print_until_stopped<W: Write>(
    debug: &mut Debug<W>,
    event_rx: &Receiver<ElevatorEvent>,
    elevator_status_rx: &Receiver<ElevatorStatus>,
) -> std::io::Result<()> {
    let closed: Receiver<ElevatorEvent> = never();
    let mut events_open = true;
    loop {
        let events = if events_open { event_rx } else { &closed };
        select! {
            recv(events) -> msg => match msg {
                Ok(event) => debug.print_event(&event)?,
                // a final status may still be queued
                Err(_) => events_open = false,
            },
            recv(elevator_status_rx) -> msg => match msg {
                Ok(status) => {
                    // events sent before this status are already queued
                    for event in event_rx.try_iter() {
                        debug.print_event(&event)?;
                    }
                    debug.print_status(&status)?;
                    debug.print_prompt()?;
                },
                Err(_) => break,
            },
        }
    }
    for event in event_rx.try_iter() {
        debug.print_event(&event)?;
    }
    Ok(())
}
