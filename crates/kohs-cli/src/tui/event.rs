use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time-based update (based on the tick interval).
    Tick,
    /// Something changed since the last frame was drawn.
    Render,
    /// Key, mouse, focus and resize events.
    Crossterm(CrosstermEvent),
}
