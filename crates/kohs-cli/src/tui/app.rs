use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// Trait for TUI applications run by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Use this to set the tick rate.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key, mouse, focus and resize events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen.
    ///
    /// Takes `&mut self` so the application can remember where interactive
    /// widgets were placed for mouse hit-testing.
    fn draw(&mut self, frame: &mut Frame);

    /// Advances time-based state (called on each tick).
    fn update(&mut self, runtime: &mut Runtime);
}
