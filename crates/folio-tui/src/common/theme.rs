//! Orange-on-black palette.

use ratatui::style::{Color, Modifier, Style};

pub const ORANGE: Color = Color::Rgb(249, 115, 22);
pub const DIM_ORANGE: Color = Color::Rgb(154, 52, 18);
pub const BLACK: Color = Color::Black;

/// Regular page text.
pub fn text() -> Style {
    Style::default().fg(ORANGE).bg(BLACK)
}

pub fn muted() -> Style {
    Style::default().fg(DIM_ORANGE).bg(BLACK)
}

/// Inverted block used for banners, hover and highlight states.
pub fn filled() -> Style {
    Style::default()
        .fg(BLACK)
        .bg(ORANGE)
        .add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    text().add_modifier(Modifier::BOLD)
}

pub fn link() -> Style {
    text().add_modifier(Modifier::UNDERLINED)
}
