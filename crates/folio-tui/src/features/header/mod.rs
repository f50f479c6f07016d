//! Fixed header: owner banner on the left, navigation buttons on the right.

use folio_core::content::NavTarget;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::common::text::{center, pad_right};
use crate::common::theme;
use crate::features::page::Target;
use crate::state::AppState;

/// Width of the owner banner: its text plus padding, at most half the row.
pub fn banner_width(owner: &str, total: u16) -> u16 {
    let wanted = u16::try_from(owner.width() + 4).unwrap_or(u16::MAX);
    wanted.min(total / 2)
}

/// Screen rects of the navigation buttons, left to right.
///
/// The buttons share the space right of the banner; the last one absorbs the
/// remainder.
pub fn button_rects(area: Rect, owner: &str, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let banner = banner_width(owner, area.width);
    let available = area.width.saturating_sub(banner);
    let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
    let each = available / count_u16;

    (0..count_u16)
        .map(|idx| {
            let x = area.x + banner + idx * each;
            let width = if idx + 1 == count_u16 {
                area.x + area.width - x
            } else {
                each
            };
            Rect::new(x, area.y, width, area.height)
        })
        .collect()
}

/// Index of the button under `column`, if any.
pub fn button_at(area: Rect, owner: &str, count: usize, column: u16, row: u16) -> Option<usize> {
    button_rects(area, owner, count)
        .iter()
        .position(|rect| rect.width > 0 && rect.contains((column, row).into()))
}

pub fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let owner = &app.portfolio.owner;
    let banner = usize::from(banner_width(owner, area.width));
    let mut spans = vec![Span::styled(
        pad_right(&format!("  {owner}"), banner),
        theme::filled(),
    )];

    let rects = button_rects(area, owner, app.portfolio.nav.len());
    for (index, (target, rect)) in app.portfolio.nav.iter().zip(&rects).enumerate() {
        spans.push(button_span(target, usize::from(rect.width), app, index));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme::text()), area);
}

fn button_span(target: &NavTarget, width: usize, app: &AppState, index: usize) -> Span<'static> {
    let hovered = app.hovered == Some(Target::Nav(index));
    let label = center(&target.label.to_uppercase(), width);
    let style = if hovered {
        theme::filled()
    } else {
        theme::title()
    };
    Span::styled(label, style)
}
