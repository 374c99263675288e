//! Source text with a line table.
//!
//! The checker only needs two things from the raw text: where each line's
//! first non-whitespace char sits once tabs are expanded, and how to turn a
//! raw column into an expanded one. Both are answered here so the tree does
//! not have to carry whitespace tokens.

use crate::Position;

/// Immutable source text plus byte offsets of every line start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(offset, _)| offset + 1),
        );
        SourceText { text, line_starts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 0-based line without its terminator.
    pub fn line(&self, line: u32) -> Option<&str> {
        let start = *self.line_starts.get(line as usize)?;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map_or(self.text.len(), |&next| next - 1);
        let raw = &self.text[start..end];
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }

    /// Convert a byte offset into a line and char column.
    pub fn position_of(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = self.text[start..offset].chars().count();
        Position::new(line as u32, column as u32)
    }

    /// Byte offset of a position, if it lies within the text.
    pub fn offset_of(&self, position: Position) -> Option<usize> {
        let line = self.line(position.line)?;
        let start = self.line_starts[position.line as usize];
        let within = line
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(line.len()))
            .nth(position.column as usize)?;
        Some(start + within)
    }

    /// Visual column of a raw char column once tabs are expanded.
    ///
    /// Positions past the end of the line keep counting one column per char.
    pub fn expanded_column(&self, position: Position, tab_width: u32) -> u32 {
        match self.line(position.line) {
            Some(line) => expand_tabs(line, position.column, tab_width),
            None => position.column,
        }
    }

    /// Visual width of a line's leading whitespace, or `None` for blank lines.
    pub fn indent_width(&self, line: u32, tab_width: u32) -> Option<u32> {
        let text = self.line(line)?;
        let leading = text.chars().take_while(|c| c.is_whitespace()).count();
        if leading == text.chars().count() {
            return None;
        }
        Some(expand_tabs(text, leading as u32, tab_width))
    }
}

/// Visual width of the first `column` chars of `line`.
///
/// A tab advances to the next multiple of `tab_width`. A zero width is
/// treated as one.
pub fn expand_tabs(line: &str, column: u32, tab_width: u32) -> u32 {
    let tab_width = tab_width.max(1);
    let mut width = 0;
    let mut chars = line.chars();
    for _ in 0..column {
        match chars.next() {
            Some('\t') => width += tab_width - width % tab_width,
            Some(_) | None => width += 1,
        }
    }
    width
}
