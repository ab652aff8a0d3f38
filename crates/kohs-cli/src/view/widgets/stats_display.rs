use std::{iter, time::Instant};

use kohs_engine::{KohsGame, SessionMetrics, SessionRecorder};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{util, view::widgets::style};

/// Live metrics of the game in progress.
///
/// The clock stops at the recorded time once the puzzle is solved.
pub struct StatsDisplay<'a, R> {
    game: &'a KohsGame<R>,
    now: Instant,
    solved: Option<SessionMetrics>,
    block: Option<BlockWidget<'a>>,
}

impl<'a, R> StatsDisplay<'a, R>
where
    R: SessionRecorder,
{
    pub fn new(game: &'a KohsGame<R>, now: Instant) -> Self {
        Self {
            game,
            now,
            solved: None,
            block: None,
        }
    }

    pub fn solved(self, solved: Option<SessionMetrics>) -> Self {
        Self { solved, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        6 + super::block_vertical_margin(self.block.as_ref())
    }

    fn rows(&self) -> [(&'static str, String); 6] {
        let metrics = self.game.metrics();
        let time_seconds = self.solved.map_or_else(
            || metrics.elapsed(self.now).as_secs_f64(),
            |solved| solved.time_seconds,
        );
        let config = self.game.config();
        [
            ("TIME:", util::format_time(time_seconds)),
            ("ROTATIONS:", metrics.rotation_count().to_string()),
            ("DRAGS:", metrics.drag_count().to_string()),
            ("GRID:", format!("{} blocks", config.grid)),
            ("DIFFICULTY:", config.difficulty.to_string()),
            ("SEED:", self.game.seed().to_string()),
        ]
    }
}

impl<R> Widget for StatsDisplay<'_, R>
where
    R: SessionRecorder,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = self.rows();
        let row_areas = Layout::vertical(rows.iter().map(|_| Constraint::Length(1))).split(area);
        for ((label, value), area) in iter::zip(rows, row_areas.iter().copied()) {
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Length(12), Constraint::Fill(1)]));
            Line::styled(label, style::MUTED)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, style::DEFAULT)
                .left_aligned()
                .render(value_area, buf);
        }
    }
}
