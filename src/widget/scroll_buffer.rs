//! Scroll buffer: laid-out lines with a scroll position.
//!
//! A transcript is laid out from scratch on every frame, so the buffer is
//! refilled wholesale with [`ScrollBuffer::replace`]. The scroll offset is
//! measured from the bottom and survives refills, which keeps a reader who
//! scrolled up anchored while new text streams in below.

use crate::buffer::Style;
use std::collections::VecDeque;
use unicode_width::UnicodeWidthStr;

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// The text.
    pub text: String,
    /// Its style.
    pub style: Style,
}

impl StyledRun {
    /// Create a new run.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One laid-out line of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    /// Runs in display order.
    pub runs: Vec<StyledRun>,
    /// Whether this line continues the previous one after a soft wrap.
    pub wrapped: bool,
    /// Style used to fill the rest of the row, if it differs from the
    /// surrounding background (code blocks).
    pub fill: Option<Style>,
}

impl StyledLine {
    /// An empty line.
    pub const fn empty() -> Self {
        Self {
            runs: Vec::new(),
            wrapped: false,
            fill: None,
        }
    }

    /// A line holding a single run.
    pub fn from_run(text: impl Into<String>, style: Style) -> Self {
        let mut line = Self::empty();
        line.push(text, style);
        line
    }

    /// Append text, merging with the last run when the style matches.
    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.runs.push(StyledRun::new(text, style)),
        }
    }

    /// Display width in columns.
    pub fn width(&self) -> usize {
        self.runs.iter().map(|r| r.text.width()).sum()
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the line has no text.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// Bounded store of laid-out lines with a scroll offset.
#[derive(Debug)]
pub struct ScrollBuffer {
    lines: VecDeque<StyledLine>,
    /// Maximum number of lines to retain.
    max_lines: usize,
    /// Current scroll offset from the bottom (0 = at bottom).
    scroll_offset: usize,
    /// Lines offered by the last `replace`, before trimming.
    offered: usize,
}

impl ScrollBuffer {
    /// Create an empty buffer retaining at most `max_lines` lines.
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            scroll_offset: 0,
            offered: 0,
        }
    }

    /// Number of lines held.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are held.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the content, keeping only the newest `max_lines` lines.
    ///
    /// When scrolled up, the offset grows by the number of lines added so
    /// the same lines stay in view, also once older lines are trimmed.
    pub fn replace(&mut self, lines: impl IntoIterator<Item = StyledLine>) {
        let previous = self.offered;
        self.lines.clear();
        self.offered = 0;
        for line in lines {
            if self.lines.len() == self.max_lines {
                self.lines.pop_front();
            }
            self.lines.push_back(line);
            self.offered += 1;
        }
        if !self.at_bottom() {
            self.scroll_offset += self.offered.saturating_sub(previous);
        }
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    /// Get a line by index from the top.
    pub fn get(&self, index: usize) -> Option<&StyledLine> {
        self.lines.get(index)
    }

    /// Lines visible in a viewport of the given height, oldest first.
    pub fn visible_lines(&self, viewport_height: usize) -> impl Iterator<Item = &StyledLine> {
        let total = self.lines.len();
        let end = total.saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(viewport_height);

        self.lines.range(start..end)
    }

    /// Scroll towards older lines.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_offset());
    }

    /// Scroll towards newer lines.
    pub const fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Jump to the newest line.
    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Whether the newest line is in view.
    pub const fn at_bottom(&self) -> bool {
        self.scroll_offset == 0
    }

    /// Current offset from the bottom.
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<StyledLine> {
        (0..n)
            .map(|i| StyledLine::from_run(format!("line {i}"), Style::default()))
            .collect()
    }

    #[test]
    fn test_push_merges_same_style() {
        let mut line = StyledLine::empty();
        line.push("ab", Style::default());
        line.push("cd", Style::default());
        line.push("", Style::default());
        assert_eq!(line.runs.len(), 1);
        assert_eq!(line.text(), "abcd");
        assert_eq!(line.width(), 4);
    }

    #[test]
    fn test_replace_respects_capacity() {
        let mut buffer = ScrollBuffer::new(3);
        buffer.replace(lines(5));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.get(0).unwrap().text(), "line 2");
    }

    #[test]
    fn test_visible_lines_follow_scroll() {
        let mut buffer = ScrollBuffer::new(100);
        buffer.replace(lines(10));

        let visible: Vec<_> = buffer.visible_lines(3).map(StyledLine::text).collect();
        assert_eq!(visible, ["line 7", "line 8", "line 9"]);

        buffer.scroll_up(2);
        let visible: Vec<_> = buffer.visible_lines(3).map(StyledLine::text).collect();
        assert_eq!(visible, ["line 5", "line 6", "line 7"]);
        assert!(!buffer.at_bottom());

        buffer.scroll_down(5);
        assert!(buffer.at_bottom());
    }

    #[test]
    fn test_scrolled_view_stays_anchored() {
        let mut buffer = ScrollBuffer::new(100);
        buffer.replace(lines(10));
        buffer.scroll_up(4);
        buffer.replace(lines(12));
        assert_eq!(buffer.scroll_offset(), 6);
        assert_eq!(buffer.visible_lines(1).next().unwrap().text(), "line 5");

        buffer.scroll_up(100);
        assert_eq!(buffer.scroll_offset(), 11);
        buffer.replace(lines(2));
        assert_eq!(buffer.scroll_offset(), 1);
    }

    #[test]
    fn test_anchor_holds_at_capacity() {
        let mut buffer = ScrollBuffer::new(10);
        buffer.replace(lines(10));
        buffer.scroll_up(2);
        assert_eq!(buffer.visible_lines(1).next().unwrap().text(), "line 7");

        buffer.replace(lines(13));
        assert_eq!(buffer.len(), 10);
        assert_eq!(buffer.scroll_offset(), 5);
        assert_eq!(buffer.visible_lines(1).next().unwrap().text(), "line 7");
    }
}
