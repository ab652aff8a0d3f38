use std::{io, time::Duration};

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use ratatui::DefaultTerminal;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Runs an [`App`] in the alternate screen with mouse and focus reporting
/// enabled.
#[derive(Debug, Default)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate (Hz). `None` disables ticks.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.events
            .set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// The terminal is restored even if the loop fails.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)?;
            let result = self.event_loop(terminal, app);
            execute!(io::stdout(), DisableMouseCapture, DisableFocusChange)?;
            result
        })
    }

    fn event_loop<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => app.update(self),
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}
