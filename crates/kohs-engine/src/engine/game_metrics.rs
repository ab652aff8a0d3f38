use std::time::{Duration, Instant};

/// Completion metrics gathered while a puzzle is played.
///
/// - **Start time**: When the current game began (`None` before the first start)
/// - **Rotations**: Number of quarter turns applied to blocks
/// - **Drags**: Number of completed drag-to-swap gestures
///
/// Counters are only advanced by the interaction engine and only increase
/// during a game; [`reset`](Self::reset) starts a new one.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use kohs_engine::GameMetrics;
///
/// let start = Instant::now();
/// let mut metrics = GameMetrics::new();
/// metrics.reset(start);
///
/// assert_eq!(metrics.rotation_count(), 0);
/// assert_eq!(metrics.elapsed(start + Duration::from_secs(3)), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetrics {
    start_time: Option<Instant>,
    rotation_count: u32,
    drag_count: u32,
}

impl GameMetrics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start_time: None,
            rotation_count: 0,
            drag_count: 0,
        }
    }

    /// Clears the counters and marks `now` as the start of a game.
    pub fn reset(&mut self, now: Instant) {
        *self = Self {
            start_time: Some(now),
            ..Self::new()
        };
    }

    #[must_use]
    pub const fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    #[must_use]
    pub const fn rotation_count(&self) -> u32 {
        self.rotation_count
    }

    #[must_use]
    pub const fn drag_count(&self) -> u32 {
        self.drag_count
    }

    pub(crate) const fn record_rotation(&mut self) {
        self.rotation_count += 1;
    }

    pub(crate) const fn record_drag(&mut self) {
        self.drag_count += 1;
    }

    /// Returns the time since the game started, or zero if it never started.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.start_time
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_counters() {
        let start = Instant::now();
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.elapsed(start), Duration::ZERO);

        metrics.reset(start);
        metrics.record_rotation();
        metrics.record_rotation();
        metrics.record_drag();
        assert_eq!(metrics.rotation_count(), 2);
        assert_eq!(metrics.drag_count(), 1);

        let restart = start + Duration::from_secs(10);
        metrics.reset(restart);
        assert_eq!(metrics.rotation_count(), 0);
        assert_eq!(metrics.drag_count(), 0);
        assert_eq!(metrics.start_time(), Some(restart));
        assert_eq!(metrics.elapsed(start), Duration::ZERO);
    }
}
