use std::io::{stdout, Stdout, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use shared_resources::request::Floor;

use super::elevator_event::ElevatorEvent;
use super::elevator_status::ElevatorStatus;

pub fn event_line(event: &ElevatorEvent) -> String {
    match event {
        ElevatorEvent::DirectionChanged(direction) => format!("--> Elevator heading {direction}"),
        ElevatorEvent::FloorReached(floor) => format!("    Reached floor {floor}"),
        ElevatorEvent::DoorsOpened(floor) => format!(":) Doors opening at floor {floor}"),
        ElevatorEvent::Idle => String::from("Elevator idle"),
    }
}

fn event_color(event: &ElevatorEvent) -> Color {
    match event {
        ElevatorEvent::DirectionChanged(_) => Color::Cyan,
        ElevatorEvent::FloorReached(_) => Color::Reset,
        ElevatorEvent::DoorsOpened(_) => Color::Green,
        ElevatorEvent::Idle => Color::Yellow,
    }
}

pub struct Debug<W: Write> {
    out: W,
    top_floor: Floor,
}

impl Debug<Stdout> {
    pub fn new(top_floor: Floor) -> Self {
        Debug::with_writer(stdout(), top_floor)
    }
}

impl<W: Write> Debug<W> {
    pub fn with_writer(out: W, top_floor: Floor) -> Self {
        Debug { out, top_floor }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_event(&mut self, event: &ElevatorEvent) -> std::io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(event_color(event)),
            Print(event_line(event)),
            ResetColor,
            Print("\n")
        )?;
        self.out.flush()
    }

    pub fn print_status(&mut self, status: &ElevatorStatus) -> std::io::Result<()> {
        writeln!(self.out, "+--------------------------------------+")?;
        writeln!(self.out, "| PENDING REQUESTS                     |")?;
        writeln!(self.out, "+------------+------------+------------+")?;
        writeln!(self.out, "| {0:<10} | {1:<10} | {2:<10} |", "FLOOR", "UP", "DOWN")?;
        for floor in (0..=self.top_floor).rev() {
            let [up, down] = status.requests_at_floor(floor);
            let car = if floor == status.floor { "*" } else { "" };
            writeln!(self.out, "| {0:<10} | {1:<10} | {2:<10} |", format!("{floor}{car}"), up, down)?;
        }
        writeln!(self.out, "+------------+------------+------------+")?;
        writeln!(self.out, "| {0:<10} | {1:<10} |", "FLOOR", status.floor)?;
        writeln!(self.out, "| {0:<10} | {1:<10} |", "DIRECTION", status.direction)?;
        writeln!(self.out, "+------------+------------+")?;
        self.out.flush()
    }

    pub fn print_prompt(&mut self) -> std::io::Result<()> {
        write!(
            self.out,
            "\nEnter floor (0-{}) and direction (UP/DOWN), -1 to exit: ",
            self.top_floor
        )?;
        self.out.flush()
    }
}
