use unicode_segmentation::UnicodeSegmentation;

/// Progress of a single reveal over a source string.
///
/// Length is counted in extended grapheme clusters, so a tick never exposes
/// half of a user-perceived character ("é" written as `e` + combining acute
/// is one step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    source: String,
    /// Byte offset where each grapheme prefix ends. `boundaries[0] == 0` and
    /// `boundaries[len] == source.len()`.
    boundaries: Vec<usize>,
    revealed: usize,
    cursor_visible: bool,
}

impl RevealState {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut boundaries = Vec::with_capacity(source.len() + 1);
        boundaries.push(0);
        boundaries.extend(
            source
                .grapheme_indices(true)
                .map(|(start, grapheme)| start + grapheme.len()),
        );
        Self {
            source,
            boundaries,
            revealed: 0,
            cursor_visible: true,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of graphemes in the source text.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.len()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// The currently revealed prefix.
    pub fn displayed(&self) -> &str {
        &self.source[..self.revealed_bytes()]
    }

    /// Byte length of the revealed prefix.
    pub fn revealed_bytes(&self) -> usize {
        self.boundaries[self.revealed]
    }

    /// Reveals the next grapheme.
    ///
    /// Returns true only on the step that completes the reveal.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.revealed += 1;
        self.is_complete()
    }

    /// Reveals everything that is left. Returns true if anything changed.
    pub fn reveal_all(&mut self) -> bool {
        let changed = !self.is_complete();
        self.revealed = self.len();
        changed
    }

    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }
}
