//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{Scrollbar, theme};
use crate::features::header::render_header;
use crate::features::page::render_page;
use crate::state::AppState;

pub const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

/// Horizontal padding of the page (left and right).
pub const PAGE_MARGIN: u16 = 1;

/// Width reserved for the scrollbar on the right side.
const SCROLLBAR_WIDTH: u16 = 1;

const POINTER_SYMBOL: &str = "●";

const KEY_HINTS: &str = "tab focus · enter open · space skip · q quit";

/// Screen regions, derived from the terminal size only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub page: Rect,
    pub scrollbar: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let header = Rect::new(area.x, area.y, area.width, HEADER_HEIGHT.min(area.height));
    let body_height = area.height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT);
    let body_y = area.y + header.height;
    let page = Rect::new(
        area.x + PAGE_MARGIN,
        body_y,
        area.width.saturating_sub(PAGE_MARGIN * 2 + SCROLLBAR_WIDTH),
        body_height,
    );
    let scrollbar = Rect::new(
        area.x + area.width.saturating_sub(SCROLLBAR_WIDTH),
        body_y,
        SCROLLBAR_WIDTH.min(area.width),
        body_height,
    );
    let status = Rect::new(
        area.x,
        body_y + body_height,
        area.width,
        STATUS_HEIGHT.min(area.height.saturating_sub(header.height)),
    );
    ScreenLayout {
        header,
        page,
        scrollbar,
        status,
    }
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let screen = screen_layout(area);

    frame.render_widget(Block::default().style(theme::text()), area);
    render_header(app, frame, screen.header);
    render_page(app, frame, screen.page);
    frame.render_widget(
        Scrollbar::new(
            app.page.layout.len(),
            usize::from(screen.page.height),
            app.page.scroll.offset(),
        ),
        screen.scrollbar,
    );
    render_status_line(app, frame, screen.status);
    render_pointer(app, frame);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let section = app
        .page
        .layout
        .section_at(app.page.scroll.offset())
        .unwrap_or_default()
        .to_uppercase();
    let mut left = format!(" § {section}");
    if app.reveal.is_revealing() {
        left.push_str(" · typing");
    }
    let right = format!("{KEY_HINTS}  {:>3}% ", app.page.scroll.percent());

    let width = usize::from(area.width);
    let gap = width.saturating_sub(left.width() + right.width());
    let line = if gap == 0 {
        Line::from(Span::styled(left, theme::filled()))
    } else {
        Line::from(vec![
            Span::styled(left, theme::filled()),
            Span::styled(" ".repeat(gap), theme::filled()),
            Span::styled(right, theme::filled()),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Marks the pointer position: a dot on empty cells, inverted otherwise.
fn render_pointer(app: &AppState, frame: &mut Frame) {
    let Some((column, row)) = app.pointer else {
        return;
    };
    let area = frame.area();
    if !area.contains(Position::new(column, row)) {
        return;
    }
    let cell = &mut frame.buffer_mut()[(column, row)];
    if cell.symbol() == " " {
        cell.set_symbol(POINTER_SYMBOL).set_fg(theme::ORANGE);
    } else {
        cell.modifier.insert(Modifier::REVERSED);
    }
}
