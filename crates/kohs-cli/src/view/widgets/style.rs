use kohs_engine::FaceColor;
use ratatui::style::{Color, Modifier, Style};

pub const DEFAULT: Style = Style::new().fg(Color::White);
pub const MUTED: Style = Style::new().fg(Color::DarkGray);
pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const HIGHLIGHT: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
pub const MARKER: Style = Style::new().fg(Color::Black).add_modifier(Modifier::BOLD);

#[must_use]
pub const fn face_color(color: FaceColor) -> Color {
    match color {
        FaceColor::Red => Color::Red,
        FaceColor::White => Color::White,
        FaceColor::Blue => Color::Blue,
        FaceColor::Yellow => Color::Yellow,
    }
}
