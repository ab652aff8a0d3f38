use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks at a fixed interval, and a render after every tick or
/// terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // The first frame must be drawn before any input arrives.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Blocks until the next tick is due, a render is pending, or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self
                .tick_interval
                .map(|interval| (self.last_tick + interval).saturating_duration_since(now));
            match timeout {
                Some(timeout) if !event::poll(timeout)? => continue,
                _ => {}
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
