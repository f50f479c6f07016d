//! Page layout: the whole portfolio flattened into terminal lines.
//!
//! The layout is rebuilt whenever the content width or the expanded project
//! changes. Besides the lines themselves it records everything the reducer
//! needs to answer geometry questions without rendering:
//!
//! - anchors (`home`, `about-me`, `projects`, the expanded project id,
//!   `contact`) and the line each one starts at
//! - the line span of every highlightable word
//! - hit boxes for project tiles, the video link and contact links
//! - which lines hold typed (revealed) About text
//!
//! Typed text is laid out at its full length up front, so revealing it never
//! moves anything below it.

use std::collections::HashMap;
use std::ops::Range;

use folio_core::content::{
    ABOUT_ANCHOR, CONTACT_ANCHOR, ContactLink, HOME_ANCHOR, PROJECTS_ANCHOR, Portfolio,
    ProjectEntry,
};
use unicode_width::UnicodeWidthStr;

use crate::common::text::{center, pad_right, runs, wrap_ranges};

/// Narrowest tile before the grid drops a column.
pub const TILE_MIN_WIDTH: usize = 24;
const TILE_GAP: usize = 2;
const MAX_COLUMNS: usize = 3;
const MIN_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordBlock {
    About,
    Contact,
}

/// A highlightable word. Indices count words within their block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordId {
    pub block: WordBlock,
    pub index: usize,
}

/// Something the user can focus, hover or activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Header button (index into `Portfolio::nav`).
    Nav(usize),
    /// Project tile (index into `Portfolio::projects`).
    Project(usize),
    /// Video link of the expanded project.
    Video(usize),
    /// Contact link (index into `Portfolio::contact`).
    Link(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    Muted,
    /// Section title bar (index into `PageLayout::titles`).
    Title(usize),
    Word(WordId),
    Target(Target),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Styled {
        text: String,
        role: Role,
    },
    /// Slice of the About text starting at byte `start`; only the revealed
    /// part is drawn.
    Typed {
        start: usize,
        text: String,
        word: Option<WordId>,
    },
}

impl Segment {
    fn styled(text: impl Into<String>, role: Role) -> Self {
        Self::Styled {
            text: text.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLine {
    pub segments: Vec<Segment>,
    /// Byte range of the About text shown on this line.
    pub typed: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine {
    pub line: usize,
    pub text: String,
    /// Always drawn inverted, not just on hover.
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitBox {
    pub lines: Range<usize>,
    pub cols: Range<u16>,
    pub target: Target,
}

impl HitBox {
    fn contains(&self, line: usize, col: u16) -> bool {
        self.lines.contains(&line) && self.cols.contains(&col)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    width: usize,
    lines: Vec<PageLine>,
    anchors: Vec<(String, usize)>,
    titles: Vec<TitleLine>,
    words: HashMap<WordId, Range<usize>>,
    word_order: Vec<WordId>,
    hit_boxes: Vec<HitBox>,
}

impl PageLayout {
    /// Lays out `portfolio` for a content area `width` columns wide.
    pub fn build(portfolio: &Portfolio, expanded: Option<&str>, width: u16) -> Self {
        let mut builder = Builder::new(usize::from(width).max(MIN_WIDTH));

        builder.anchor(HOME_ANCHOR);
        builder.blank();

        builder.title("ABOUT ME", ABOUT_ANCHOR, false);
        builder.blank();
        builder.typed(&portfolio.about);
        builder.blank();

        builder.title("PROJECTS", PROJECTS_ANCHOR, true);
        builder.blank();
        builder.tiles(&portfolio.projects);
        if let Some((index, project)) = expanded.and_then(|id| {
            portfolio
                .projects
                .iter()
                .enumerate()
                .find(|(_, project)| project.id == id)
        }) {
            builder.details(index, project);
        }

        builder.title("CONTACT", CONTACT_ANCHOR, false);
        builder.blank();
        builder.words(&portfolio.contact_blurb, WordBlock::Contact);
        builder.blank();
        builder.links(&portfolio.contact);
        builder.blank();

        builder.layout
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn anchor_line(&self, anchor: &str) -> Option<usize> {
        self.anchors
            .iter()
            .find(|(id, _)| id == anchor)
            .map(|(_, line)| *line)
    }

    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.anchor_line(anchor).is_some()
    }

    /// Anchors in page order.
    pub fn anchors(&self) -> impl Iterator<Item = (&str, usize)> {
        self.anchors.iter().map(|(id, line)| (id.as_str(), *line))
    }

    /// The anchor whose section contains `line`.
    pub fn section_at(&self, line: usize) -> Option<&str> {
        self.anchors
            .iter()
            .rev()
            .find(|(_, start)| *start <= line)
            .map(|(id, _)| id.as_str())
    }

    pub fn titles(&self) -> &[TitleLine] {
        &self.titles
    }

    pub fn title_at(&self, line: usize) -> Option<usize> {
        self.titles.iter().position(|title| title.line == line)
    }

    /// Lines covered by `word` (end exclusive).
    pub fn word_span(&self, word: WordId) -> Option<Range<usize>> {
        self.words.get(&word).cloned()
    }

    /// Words to track for highlighting, in page order.
    ///
    /// About words are only included once their text is fully revealed.
    pub fn tracked_words(&self, include_about: bool) -> Vec<WordId> {
        self.word_order
            .iter()
            .copied()
            .filter(|word| include_about || word.block != WordBlock::About)
            .collect()
    }

    pub fn hit_test(&self, line: usize, col: u16) -> Option<Target> {
        self.hit_boxes
            .iter()
            .find(|hit| hit.contains(line, col))
            .map(|hit| hit.target)
    }

    pub fn hit_box(&self, target: Target) -> Option<&HitBox> {
        self.hit_boxes.iter().find(|hit| hit.target == target)
    }

    /// Page targets in page order.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.hit_boxes.iter().map(|hit| hit.target)
    }

    /// Line the typing cursor sits on when `typed_bytes` are revealed.
    pub fn cursor_line(&self, typed_bytes: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| line.typed.as_ref().map(|range| (idx, range)))
            .take_while(|(_, range)| range.start <= typed_bytes)
            .last()
            .map(|(idx, _)| idx)
    }
}

struct Builder {
    layout: PageLayout,
}

impl Builder {
    fn new(width: usize) -> Self {
        Self {
            layout: PageLayout {
                width,
                ..PageLayout::default()
            },
        }
    }

    fn width(&self) -> usize {
        self.layout.width
    }

    fn next_line(&self) -> usize {
        self.layout.lines.len()
    }

    fn push(&mut self, segments: Vec<Segment>) -> usize {
        self.push_line(PageLine {
            segments,
            typed: None,
        })
    }

    fn push_line(&mut self, line: PageLine) -> usize {
        self.layout.lines.push(line);
        self.layout.lines.len() - 1
    }

    fn blank(&mut self) {
        self.push(Vec::new());
    }

    fn anchor(&mut self, id: &str) {
        let line = self.next_line();
        self.layout.anchors.push((id.to_string(), line));
    }

    fn title(&mut self, text: &str, anchor: &str, filled: bool) {
        self.anchor(anchor);
        let index = self.layout.titles.len();
        let label = pad_right(&format!(" {text}"), self.width());
        let line = self.push(vec![Segment::styled(label, Role::Title(index))]);
        self.layout.titles.push(TitleLine {
            line,
            text: text.to_string(),
            filled,
        });
    }

    fn record_word(&mut self, word: WordId, line: usize) {
        match self.layout.words.get_mut(&word) {
            Some(span) => span.end = line + 1,
            None => {
                self.layout.words.insert(word, line..line + 1);
                self.layout.word_order.push(word);
            }
        }
    }

    /// Typed About text, wrapped at its full length.
    fn typed(&mut self, source: &str) {
        let mut counter = WordCounter::default();
        let mut offset = 0;
        for paragraph in source.split('\n') {
            for range in wrap_ranges(paragraph, self.width()) {
                let line = self.next_line();
                let mut segments = Vec::new();
                for piece in counter.pieces(paragraph, range.clone()) {
                    let word = piece.word.map(|index| WordId {
                        block: WordBlock::About,
                        index,
                    });
                    if let Some(word) = word {
                        self.record_word(word, line);
                    }
                    segments.push(Segment::Typed {
                        start: offset + piece.start,
                        text: piece.text.to_string(),
                        word,
                    });
                }
                self.push_line(PageLine {
                    segments,
                    typed: Some(offset + range.start..offset + range.end),
                });
            }
            offset += paragraph.len() + 1;
        }
    }

    /// Static text with one tracked element per word.
    fn words(&mut self, text: &str, block: WordBlock) {
        let mut counter = WordCounter::default();
        for paragraph in text.split('\n') {
            for range in wrap_ranges(paragraph, self.width()) {
                let line = self.next_line();
                let mut segments = Vec::new();
                for piece in counter.pieces(paragraph, range) {
                    let role = match piece.word {
                        Some(index) => {
                            let word = WordId { block, index };
                            self.record_word(word, line);
                            Role::Word(word)
                        }
                        None => Role::Text,
                    };
                    segments.push(Segment::styled(piece.text, role));
                }
                self.push(segments);
            }
        }
    }

    fn paragraph(&mut self, text: &str, role: Role) {
        for paragraph in text.split('\n') {
            for range in wrap_ranges(paragraph, self.width()) {
                self.push(vec![Segment::styled(&paragraph[range], role)]);
            }
        }
    }

    fn tiles(&mut self, projects: &[ProjectEntry]) {
        let width = self.width();
        let columns = ((width + TILE_GAP) / (TILE_MIN_WIDTH + TILE_GAP)).clamp(1, MAX_COLUMNS);
        let tile_width = ((width - TILE_GAP * (columns - 1)) / columns).max(4);
        let inner = tile_width - 2;

        for (row, chunk) in projects.chunks(columns).enumerate() {
            let top = self.next_line();
            let mut rows = [Vec::new(), Vec::new(), Vec::new()];
            for (column, project) in chunk.iter().enumerate() {
                let index = row * columns + column;
                let role = Role::Target(Target::Project(index));
                if column > 0 {
                    for cells in &mut rows {
                        cells.push(Segment::styled(" ".repeat(TILE_GAP), Role::Text));
                    }
                }
                rows[0].push(Segment::styled(format!("┌{}┐", "─".repeat(inner)), role));
                rows[1].push(Segment::styled(
                    format!("│{}│", center(&project.title, inner)),
                    role,
                ));
                rows[2].push(Segment::styled(format!("└{}┘", "─".repeat(inner)), role));

                let x = column * (tile_width + TILE_GAP);
                self.layout.hit_boxes.push(HitBox {
                    lines: top..top + 3,
                    cols: to_col(x)..to_col(x + tile_width),
                    target: Target::Project(index),
                });
            }
            for cells in rows {
                self.push(cells);
            }
            self.blank();
        }
    }

    fn details(&mut self, index: usize, project: &ProjectEntry) {
        self.title(&format!("▸ {}", project.title), &project.id, false);
        self.blank();
        self.paragraph(&project.description, Role::Text);
        self.blank();

        self.push(vec![Segment::styled("IMAGES", Role::Muted)]);
        for image in &project.images {
            self.push(vec![Segment::styled(format!("  ▣ {image}"), Role::Text)]);
        }
        self.blank();

        if let Some(url) = project.embed_url() {
            self.push(vec![Segment::styled("VIDEO", Role::Muted)]);
            let label = format!("▶ {url}");
            let line = self.push(vec![
                Segment::styled("  ", Role::Text),
                Segment::styled(label.clone(), Role::Target(Target::Video(index))),
            ]);
            self.layout.hit_boxes.push(HitBox {
                lines: line..line + 1,
                cols: 2..to_col(2 + label.width()),
                target: Target::Video(index),
            });
            self.blank();
        }

        self.push(vec![Segment::styled(
            "esc close · o open video",
            Role::Muted,
        )]);
        self.blank();
    }

    fn links(&mut self, links: &[ContactLink]) {
        let width = self.width();
        let mut segments = Vec::new();
        let mut x = 0;
        for (index, link) in links.iter().enumerate() {
            let label = format!("[ {} ]", link.label);
            let label_width = label.width();
            if x > 0 && x + TILE_GAP + label_width > width {
                self.push(std::mem::take(&mut segments));
                x = 0;
            }
            if x > 0 {
                segments.push(Segment::styled(" ".repeat(TILE_GAP), Role::Text));
                x += TILE_GAP;
            }
            let line = self.next_line();
            self.layout.hit_boxes.push(HitBox {
                lines: line..line + 1,
                cols: to_col(x)..to_col(x + label_width),
                target: Target::Link(index),
            });
            segments.push(Segment::styled(label, Role::Target(Target::Link(index))));
            x += label_width;
        }
        if !segments.is_empty() {
            self.push(segments);
        }
    }
}

fn to_col(x: usize) -> u16 {
    u16::try_from(x).unwrap_or(u16::MAX)
}

struct Piece<'a> {
    /// Byte offset within the paragraph.
    start: usize,
    text: &'a str,
    word: Option<usize>,
}

/// Numbers words across wrapped lines; a word split by a hard break keeps
/// one index.
#[derive(Default)]
struct WordCounter {
    next: usize,
}

impl WordCounter {
    fn pieces<'a>(&mut self, paragraph: &'a str, range: Range<usize>) -> Vec<Piece<'a>> {
        let line = &paragraph[range.clone()];
        let continues_word = range.start > 0
            && !paragraph[..range.start].ends_with(char::is_whitespace)
            && !line.starts_with(char::is_whitespace);

        runs(line)
            .map(|(offset, text, is_space)| {
                let word = if is_space {
                    None
                } else if offset == 0 && continues_word {
                    Some(self.next.saturating_sub(1))
                } else {
                    self.next += 1;
                    Some(self.next - 1)
                };
                Piece {
                    start: range.start + offset,
                    text,
                    word,
                }
            })
            .collect()
    }
}
