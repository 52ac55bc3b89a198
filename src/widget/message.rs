//! Message widget: lays out parsed blocks and paints them into a buffer.
//!
//! Layout and painting are separate steps. [`MessageWidget::layout`] turns
//! blocks into [`StyledLine`]s for a given width; the transcript collects
//! those lines into its scroll buffer and paints only the visible window.

use super::scroll_buffer::StyledLine;
use super::theme::Theme;
use super::wrap::{clip, LineWrapper};
use crate::buffer::{Buffer, Cell, Modifiers, Style};
use crate::layout::Rect;
use crate::markdown::{
    Block, CodeBlock, CodeBlockId, Heading, HeadingTier, ListBlock, ListKind, Span,
};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Label shown on a code block header before it is copied.
pub const COPY_LABEL: &str = "copy";
/// Label shown on a code block header while the copy indicator is held.
pub const COPIED_LABEL: &str = "copied";

const TAB: &str = "    ";

/// Expand tabs and drop other control characters.
fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str(TAB),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Renders one reply.
#[derive(Debug, Clone, Copy)]
pub struct MessageWidget<'a> {
    theme: &'a Theme,
}

impl<'a> MessageWidget<'a> {
    /// Create a widget drawing with `theme`.
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Lay out `blocks` at `width` columns.
    ///
    /// `copied` reports whether a code block currently shows the copied
    /// indicator. With `cursor` set, the typing cursor is appended after the
    /// last line.
    pub fn layout(
        &self,
        blocks: &[Block],
        width: u16,
        copied: impl Fn(CodeBlockId) -> bool,
        cursor: bool,
    ) -> Vec<StyledLine> {
        let width = usize::from(width.max(1));
        let mut lines = Vec::new();

        for block in blocks {
            match block {
                Block::Paragraph(spans) => lines.extend(self.paragraph(spans, width)),
                Block::Heading(heading) => lines.extend(self.heading(heading, width)),
                Block::List(list) => lines.extend(self.list(list, width)),
                Block::Code(code) => lines.extend(self.code(code, width, copied(code.id))),
                Block::Spacer => lines.push(StyledLine::empty()),
            }
        }

        if cursor {
            self.push_cursor(&mut lines, width);
        }
        lines
    }

    fn span_style(&self, span: &Span) -> Style {
        match span {
            Span::Plain(_) => self.theme.body(),
            Span::Bold(_) => self.theme.bold(),
            Span::Italic(_) => self.theme.italic(),
            Span::InlineCode(_) => self.theme.inline_code(),
        }
    }

    fn paragraph(&self, spans: &[Span], width: usize) -> Vec<StyledLine> {
        let mut wrapper = LineWrapper::new(width, 0, self.theme.body());
        for span in spans {
            wrapper.push(&sanitize(span.text()), self.span_style(span));
        }
        wrapper.finish()
    }

    fn heading(&self, heading: &Heading, width: usize) -> Vec<StyledLine> {
        let (base, emphasis, mut wrapper) = match heading.tier() {
            HeadingTier::Primary => (
                self.theme.bold().add(Modifiers::UNDERLINE),
                Modifiers::BOLD | Modifiers::UNDERLINE,
                LineWrapper::new(width, 0, self.theme.body()),
            ),
            HeadingTier::Accent => {
                let marker = format!("{} ", self.theme.heading_marker);
                let mut wrapper = LineWrapper::new(width, marker.width(), self.theme.body());
                wrapper.push_prefix(&marker, self.theme.accent());
                (self.theme.accent(), Modifiers::empty(), wrapper)
            }
            HeadingTier::Secondary => (
                self.theme.muted().add(Modifiers::BOLD),
                Modifiers::BOLD,
                LineWrapper::new(width, 0, self.theme.body()),
            ),
        };

        for span in &heading.spans {
            let style = match span {
                Span::Plain(_) => base,
                _ => self.span_style(span).add(emphasis),
            };
            wrapper.push(&sanitize(span.text()).to_uppercase(), style);
        }
        wrapper.finish()
    }

    fn list(&self, list: &ListBlock, width: usize) -> Vec<StyledLine> {
        let mut lines = Vec::new();
        for (n, item) in list.items.iter().enumerate() {
            let marker = match list.kind {
                ListKind::Unordered => format!("{} ", self.theme.bullet),
                ListKind::Ordered => format!("{}. ", n + 1),
            };
            let mut wrapper = LineWrapper::new(width, marker.width(), self.theme.body());
            wrapper.push_prefix(&marker, self.theme.accent());
            for span in item {
                wrapper.push(&sanitize(span.text()), self.span_style(span));
            }
            lines.extend(wrapper.finish());
        }
        lines
    }

    fn code(&self, code: &CodeBlock, width: usize, copied: bool) -> Vec<StyledLine> {
        let mut lines = Vec::new();
        let content_style = if code.complete {
            self.theme.code()
        } else {
            self.theme.code().add(Modifiers::DIM)
        };

        if code.complete {
            let header_style = self.theme.code_header();
            let label = format!("{} Archive", code.language);
            let indicator = if copied { COPIED_LABEL } else { COPY_LABEL };

            let mut header = StyledLine::empty();
            header.fill = Some(header_style);
            let room = width.saturating_sub(indicator.width() + 1);
            let label = clip(&label, room);
            let gap = width.saturating_sub(label.width() + indicator.width());
            header.push(label, header_style);
            header.push(" ".repeat(gap), header_style);
            let indicator_style = if copied {
                Style::new(self.theme.accent, self.theme.surface).add(Modifiers::BOLD)
            } else {
                header_style
            };
            header.push(clip(indicator, width), indicator_style);
            lines.push(header);
        }

        for raw in code.content.split('\n') {
            let mut line = StyledLine::from_run(clip(&sanitize(raw), width), content_style);
            line.fill = Some(content_style);
            lines.push(line);
        }
        lines
    }

    fn push_cursor(&self, lines: &mut Vec<StyledLine>, width: usize) {
        let cursor = self.theme.cursor;
        let style = Style::new(self.theme.accent, self.theme.background);
        match lines.last_mut() {
            Some(last) if last.width() + cursor.width() <= width => last.push(cursor, style),
            _ => lines.push(StyledLine::from_run(cursor, style)),
        }
    }

    /// Paint `lines` top-down into `area`, clearing rows they do not cover.
    pub fn render(&self, buffer: &mut Buffer, area: Rect, lines: &[StyledLine]) {
        let base = self.theme.body();
        for row in 0..area.height {
            let y = area.y + row;
            match lines.get(usize::from(row)) {
                Some(line) => paint_line(buffer, area.x, y, area.width, line, base),
                None => buffer.fill_rect(area.x, y, area.width, 1, Cell::blank(base)),
            }
        }
    }
}

/// Paint one line at (x, y), clipped to `width` columns.
///
/// The row is first filled with the line's fill style, or `base` when it
/// has none. Zero-width graphemes are skipped.
pub fn paint_line(buffer: &mut Buffer, x: u16, y: u16, width: u16, line: &StyledLine, base: Style) {
    let fill = line.fill.unwrap_or(base);
    buffer.fill_rect(x, y, width, 1, Cell::blank(fill));

    let mut col: u16 = 0;
    for run in &line.runs {
        for grapheme in run.text.graphemes(true) {
            let w = u16::try_from(grapheme.width()).unwrap_or(u16::MAX);
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > width {
                return;
            }
            buffer.set_grapheme(x + col, y, grapheme, run.style);
            col += w;
        }
    }
}
