use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::{BoardDisplay, BoardGeometry},
    stats_display::StatsDisplay,
};

mod board_display;
mod stats_display;
pub mod style;

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    probe.height - inner.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    probe.width - inner.width
}
