//! Page rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::layout::{PageLine, Role, Segment, Target, WordId};
use crate::common::theme;
use crate::state::AppState;

const CURSOR_SYMBOL: &str = "█";

/// Draws the visible slice of the page into `area`.
pub fn render_page(app: &AppState, frame: &mut Frame, area: Rect) {
    let layout = &app.page.layout;
    let offset = app.page.scroll.offset();
    let typed_bytes = app.typed_bytes();
    let cursor_line = if app.cursor_visible() {
        layout.cursor_line(typed_bytes)
    } else {
        None
    };

    let lines: Vec<Line<'static>> = layout
        .lines()
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(area.height))
        .map(|(idx, line)| render_line(app, line, typed_bytes, cursor_line == Some(idx)))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(theme::text()), area);
}

fn render_line(app: &AppState, line: &PageLine, typed_bytes: usize, cursor: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.segments.len() + 1);
    for segment in &line.segments {
        match segment {
            Segment::Styled { text, role } => {
                spans.push(Span::styled(text.clone(), role_style(app, *role)));
            }
            Segment::Typed { start, text, word } => {
                let shown = typed_bytes.saturating_sub(*start).min(text.len());
                if shown == 0 {
                    continue;
                }
                let style = match word {
                    Some(word) if app.about_revealed => word_style(app, *word),
                    _ => theme::text(),
                };
                spans.push(Span::styled(text[..shown].to_string(), style));
            }
        }
    }
    if cursor {
        spans.push(Span::styled(CURSOR_SYMBOL, theme::text()));
    }
    Line::from(spans)
}

fn role_style(app: &AppState, role: Role) -> Style {
    match role {
        Role::Text => theme::text(),
        Role::Muted => theme::muted(),
        Role::Title(index) => {
            let filled = app
                .page
                .layout
                .titles()
                .get(index)
                .is_some_and(|title| title.filled);
            if filled || app.hovered_title == Some(index) {
                theme::filled()
            } else {
                theme::title()
            }
        }
        Role::Word(word) => word_style(app, word),
        Role::Target(target) => target_style(app, target),
    }
}

fn word_style(app: &AppState, word: WordId) -> Style {
    if app.highlighter.is_highlighted(word) {
        theme::filled()
    } else {
        theme::text()
    }
}

fn target_style(app: &AppState, target: Target) -> Style {
    let active = app.hovered == Some(target)
        || matches!(target, Target::Project(index) if app.expanded_index() == Some(index));
    match (target, active) {
        (_, true) => theme::filled(),
        (Target::Video(_), false) => theme::link(),
        (_, false) => theme::title(),
    }
}
