//! Text utilities for TUI rendering.
//!
//! Shared text processing used by the page layout and the header.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` (unicode-aware).
///
/// Returns the original string if it fits, or a truncated version ending
/// with `…`.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Centers `text` in a field of `width` columns, truncating if needed.
pub fn center(text: &str, width: usize) -> String {
    let text = truncate_with_ellipsis(text, width);
    let free = width.saturating_sub(text.width());
    let left = free / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(free - left))
}

/// Pads `text` with spaces on the right up to `width` columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let text = truncate_with_ellipsis(text, width);
    let free = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(free))
}

/// Splits `text` into alternating runs of whitespace and non-whitespace.
///
/// Yields `(byte_offset, run, is_space)`.
pub fn runs(text: &str) -> impl Iterator<Item = (usize, &str, bool)> + '_ {
    let mut rest = text.char_indices().peekable();
    std::iter::from_fn(move || {
        let (start, first) = rest.next()?;
        let is_space = first.is_whitespace();
        let mut end = start + first.len_utf8();
        while let Some(&(idx, ch)) = rest.peek() {
            if ch.is_whitespace() != is_space {
                break;
            }
            end = idx + ch.len_utf8();
            rest.next();
        }
        Some((start, &text[start..end], is_space))
    })
}

/// Greedy word wrap of a single paragraph into byte ranges of `text`.
///
/// The ranges are contiguous and cover `text` exactly. Whitespace at a break
/// stays on the line it ends (past the right edge, where it is invisible).
/// Words wider than `width` are split between graphemes. Always returns at
/// least one range, so an empty paragraph still occupies a line.
pub fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0;

    for (start, run, is_space) in runs(text) {
        let run_width = run.width();
        if line_width + run_width <= width {
            line_width += run_width;
            continue;
        }
        if is_space {
            lines.push(line_start..start + run.len());
            line_start = start + run.len();
            line_width = 0;
            continue;
        }
        if line_width > 0 {
            lines.push(line_start..start);
            line_start = start;
            line_width = 0;
        }
        if run_width <= width {
            line_width = run_width;
            continue;
        }
        for (offset, grapheme) in run.grapheme_indices(true) {
            let grapheme_width = grapheme.width();
            if line_width > 0 && line_width + grapheme_width > width {
                lines.push(line_start..start + offset);
                line_start = start + offset;
                line_width = 0;
            }
            line_width += grapheme_width;
        }
    }
    lines.push(line_start..text.len());
    lines
}
