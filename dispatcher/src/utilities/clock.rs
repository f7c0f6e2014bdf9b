use std::thread;
use std::time::Duration;

use crossbeam_channel::{never, select, Receiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("wait between floors was interrupted")]
pub struct InterruptedWait;

/// Time passing while the car travels one floor.
pub trait TravelClock {
    fn wait_between_floors(&mut self) -> Result<(), InterruptedWait>;
}

/// Real-time travel. The wait is cut short when a message arrives on `interrupt_rx`.
#[derive(Debug)]
pub struct ChannelClock {
    floor_travel_time: Duration,
    interrupt_rx: Receiver<()>,
}

impl ChannelClock {
    pub fn new(floor_travel_time: Duration, interrupt_rx: Receiver<()>) -> Self {
        ChannelClock { floor_travel_time, interrupt_rx }
    }
}

impl TravelClock for ChannelClock {
    fn wait_between_floors(&mut self) -> Result<(), InterruptedWait> {
        let interrupted = select! {
            recv(self.interrupt_rx) -> msg => Some(msg.is_ok()),
            default(self.floor_travel_time) => None,
        };
        match interrupted {
            None => Ok(()),
            Some(true) => Err(InterruptedWait),
            Some(false) => {
                // nobody can interrupt us anymore
                self.interrupt_rx = never();
                thread::sleep(self.floor_travel_time);
                Ok(())
            },
        }
    }
}

/// Zero-delay clock that only counts how many floors were travelled.
#[derive(Debug, Clone, Default)]
pub struct InstantClock {
    pub ticks: usize,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TravelClock for InstantClock {
    fn wait_between_floors(&mut self) -> Result<(), InterruptedWait> {
        self.ticks += 1;
        Ok(())
    }
}
