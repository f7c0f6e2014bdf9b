/// ----- I/O MODULE -----
/// This module reads requests typed by the user, validates floor range
/// and direction token, and forwards them to the state machine. Quitting
/// also interrupts the travel wait that may be in progress.

use std::io::BufRead;

use crossbeam_channel::Sender;
use tracing::debug;

use shared_resources::call::{Call, ParseCallError};
use shared_resources::request::{Floor, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Request(Request),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no floor given")]
    Empty,
    #[error("{0:?} is not a floor number")]
    InvalidFloor(String),
    #[error("floor {floor} is outside 0-{top_floor}")]
    FloorOutOfRange { floor: i64, top_floor: Floor },
    #[error(transparent)]
    InvalidDirection(#[from] ParseCallError),
    #[error("no direction given for floor {0}")]
    MissingDirection(Floor),
}

pub fn parse_line(line: &str, top_floor: Floor) -> Result<Input, InputError> {
    let mut tokens = line.split_whitespace();
    let floor_token = tokens.next().ok_or(InputError::Empty)?;
    if matches!(floor_token.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return Ok(Input::Quit);
    }

    let floor = floor_token
        .parse::<i64>()
        .map_err(|_| InputError::InvalidFloor(floor_token.to_string()))?;
    if floor == -1 {
        return Ok(Input::Quit);
    }
    if !(0..=top_floor as i64).contains(&floor) {
        return Err(InputError::FloorOutOfRange { floor, top_floor });
    }
    let floor = floor as Floor;

    let call = tokens
        .next()
        .ok_or(InputError::MissingDirection(floor))?
        .parse::<Call>()?;
    Ok(Input::Request(Request::new(floor, call)))
}

pub fn main(
    reader: impl BufRead,
    top_floor: Floor,
    input_tx: Sender<Input>,
    interrupt_tx: Sender<()>,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        match parse_line(&line, top_floor) {
            Ok(Input::Quit) => break,
            Ok(input) => {
                if input_tx.send(input).is_err() {
                    return;
                }
            },
            Err(InputError::Empty) => (),
            Err(err) => println!("Invalid input ({err}). Try again."),
        }
    }
    debug!("request input closed");
    input_tx.send(Input::Quit).ok();
    interrupt_tx.send(()).ok();
}
