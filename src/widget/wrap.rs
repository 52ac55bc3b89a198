//! Grapheme-aware word wrapping of styled runs.

use super::scroll_buffer::StyledLine;
use crate::buffer::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Greedy word wrapper producing [`StyledLine`]s of at most `width` columns.
///
/// Continuation lines start with `indent` columns of padding so list item
/// text lines up under its first line. Words wider than the available space
/// are broken between graphemes.
pub struct LineWrapper {
    width: usize,
    indent: usize,
    indent_style: Style,
    lines: Vec<StyledLine>,
    current: StyledLine,
    col: usize,
}

impl LineWrapper {
    /// Start wrapping at `width` columns.
    pub fn new(width: usize, indent: usize, indent_style: Style) -> Self {
        let width = width.max(1);
        Self {
            width,
            indent: indent.min(width - 1),
            indent_style,
            lines: Vec::new(),
            current: StyledLine::empty(),
            col: 0,
        }
    }

    /// Append text that is never broken, such as a list bullet.
    pub fn push_prefix(&mut self, text: &str, style: Style) {
        self.current.push(text, style);
        self.col += text.width();
    }

    /// Append wrappable text.
    pub fn push(&mut self, text: &str, style: Style) {
        for word in text.split_word_bounds() {
            let w = word.width();
            let is_space = word.chars().all(char::is_whitespace);

            if is_space {
                if self.current.wrapped && self.col == self.indent {
                    // swallow spaces at the start of a wrapped line
                    continue;
                }
                if self.col + w > self.width {
                    self.break_line();
                    continue;
                }
                self.current.push(word, style);
                self.col += w;
                continue;
            }

            if self.col + w > self.width && self.col > self.indent {
                self.break_line();
            }

            if self.col + w <= self.width {
                self.current.push(word, style);
                self.col += w;
            } else {
                self.push_graphemes(word, style);
            }
        }
    }

    fn push_graphemes(&mut self, word: &str, style: Style) {
        for grapheme in word.graphemes(true) {
            let w = grapheme.width();
            if self.col + w > self.width && self.col > self.indent {
                self.break_line();
            }
            self.current.push(grapheme, style);
            self.col += w;
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::replace(&mut self.current, StyledLine::empty());
        self.lines.push(line);
        self.current.wrapped = true;
        self.current.push(" ".repeat(self.indent), self.indent_style);
        self.col = self.indent;
    }

    /// Finish and return the lines.
    pub fn finish(mut self) -> Vec<StyledLine> {
        self.lines.push(self.current);
        self.lines
    }
}

/// Clip text to `width` columns without wrapping.
pub fn clip(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if col + w > width {
            break;
        }
        out.push_str(grapheme);
        col += w;
    }
    out
}
