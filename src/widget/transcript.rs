//! Transcript: a scrolling chat of user prompts and revealed replies.
//!
//! Each assistant message owns a [`Typewriter`]. While a reply is pending
//! or streaming it is shown at speed zero; once complete it is re-revealed
//! at the configured reply speed.

use super::message::MessageWidget;
use super::scroll_buffer::{ScrollBuffer, StyledLine};
use super::theme::Theme;
use super::wrap::LineWrapper;
use crate::buffer::{Buffer, Modifiers, Style};
use crate::clipboard::{Clipboard, CopyTracker};
use crate::error::Result;
use crate::layout::Rect;
use crate::markdown::{Block, CodeBlock, CodeBlockId};
use crate::metrics::{extract_metrics, IdeaMetrics};
use crate::reveal::{RevealConfig, Typewriter};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Shown below the transcript while a reply is pending.
pub const TYPING_INDICATOR: &str = "Running Simulation...";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person typing prompts.
    User,
    /// The AI partner.
    Assistant,
}

/// Identifies a message within its transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg#{}", self.0)
    }
}

/// Key for the copy indicator of a code block in a transcript.
pub type CopyKey = (MessageId, CodeBlockId);

/// Configuration for a [`Transcript`].
#[derive(Debug, Clone)]
pub struct TranscriptConfig {
    /// Reveal used for completed replies.
    pub reply_speed: RevealConfig,
    /// Maximum laid-out lines kept for scrollback.
    pub max_scrollback: usize,
    /// Share of the width a user message may take, in percent.
    pub user_width_percent: u16,
    /// Colors and glyphs.
    pub theme: Theme,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            reply_speed: RevealConfig::from_millis(5),
            max_scrollback: 10_000,
            user_width_percent: 85,
            theme: Theme::default(),
        }
    }
}

enum Body {
    User(String),
    Assistant { typewriter: Typewriter, pending: bool },
}

struct Message {
    id: MessageId,
    body: Body,
}

impl Message {
    const fn role(&self) -> Role {
        match self.body {
            Body::User(_) => Role::User,
            Body::Assistant { .. } => Role::Assistant,
        }
    }
}

/// An ordered chat transcript.
pub struct Transcript {
    config: TranscriptConfig,
    messages: Vec<Message>,
    next_id: u64,
    scroll: ScrollBuffer,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new(config: TranscriptConfig) -> Self {
        let scroll = ScrollBuffer::new(config.max_scrollback);
        Self {
            config,
            messages: Vec::new(),
            next_id: 0,
            scroll,
        }
    }

    /// The configuration.
    pub const fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, body: Body) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message { id, body });
        self.scroll.scroll_to_bottom();
        id
    }

    fn assistant_mut(&mut self, id: MessageId) -> Option<(&mut Typewriter, &mut bool)> {
        self.messages.iter_mut().find(|m| m.id == id).and_then(|m| match &mut m.body {
            Body::Assistant { typewriter, pending } => Some((typewriter, pending)),
            Body::User(_) => None,
        })
    }

    fn typewriter(&self, id: MessageId) -> Option<&Typewriter> {
        self.messages.iter().find(|m| m.id == id).and_then(|m| match &m.body {
            Body::Assistant { typewriter, .. } => Some(typewriter),
            Body::User(_) => None,
        })
    }

    /// Append a user prompt.
    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Body::User(text.into()))
    }

    /// Append a finished assistant message, revealed at the reply speed.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> MessageId {
        let typewriter = Typewriter::with_text(text, self.config.reply_speed);
        self.push(Body::Assistant {
            typewriter,
            pending: false,
        })
    }

    /// Append an empty assistant message awaiting its reply.
    pub fn begin_assistant(&mut self) -> MessageId {
        let id = self.push(Body::Assistant {
            typewriter: Typewriter::new(RevealConfig::instant()),
            pending: true,
        });
        debug!(%id, "reply pending");
        id
    }

    /// Show partial reply text as it streams in, without animation.
    ///
    /// Returns `false` if `id` is not a pending assistant message.
    pub fn stream_assistant(&mut self, id: MessageId, partial: &str) -> bool {
        match self.assistant_mut(id) {
            Some((typewriter, pending)) if *pending => {
                typewriter.set_text(partial);
                true
            }
            _ => false,
        }
    }

    /// Settle a pending reply.
    ///
    /// Embedded metrics are stripped from the text and returned. The
    /// remaining text is revealed at the reply speed.
    pub fn complete_assistant(&mut self, id: MessageId, reply: &str) -> Option<IdeaMetrics> {
        let speed = self.config.reply_speed.speed;
        let (typewriter, pending) = self.assistant_mut(id)?;
        let extracted = extract_metrics(reply);

        *pending = false;
        typewriter.set_speed(speed);
        typewriter.set_text(extracted.text);
        debug!(%id, metrics = extracted.metrics.is_some(), "reply complete");
        extracted.metrics
    }

    /// Settle a pending reply with an error.
    pub fn fail_assistant(&mut self, id: MessageId, message: &str) {
        let speed = self.config.reply_speed.speed;
        if let Some((typewriter, pending)) = self.assistant_mut(id) {
            *pending = false;
            typewriter.set_speed(speed);
            typewriter.set_text(format!("Signal Error: {message}"));
            debug!(%id, "reply failed");
        }
    }

    /// Apply pending reveal ticks. Returns `true` if anything advanced.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for message in &mut self.messages {
            if let Body::Assistant { typewriter, .. } = &mut message.body {
                changed |= typewriter.pump();
            }
        }
        changed
    }

    /// Whether any reply is still pending.
    pub fn is_typing(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.body, Body::Assistant { pending: true, .. }))
    }

    /// Whether any reply is still being revealed.
    pub fn is_revealing(&self) -> bool {
        self.messages.iter().any(|m| match &m.body {
            Body::Assistant { typewriter, .. } => !typewriter.is_complete(),
            Body::User(_) => false,
        })
    }

    /// Role of a message.
    pub fn role(&self, id: MessageId) -> Option<Role> {
        self.messages.iter().find(|m| m.id == id).map(Message::role)
    }

    /// Currently visible text of a message.
    pub fn visible_text(&self, id: MessageId) -> Option<&str> {
        self.messages.iter().find(|m| m.id == id).map(|m| match &m.body {
            Body::User(text) => text.as_str(),
            Body::Assistant { typewriter, .. } => typewriter.visible(),
        })
    }

    /// A complete, visible code block of an assistant message.
    pub fn code_block(&self, (id, block): CopyKey) -> Option<CodeBlock> {
        self.typewriter(id)?.blocks().into_iter().find_map(|b| match b {
            Block::Code(code) if code.id == block && code.complete => Some(code),
            _ => None,
        })
    }

    /// Keys of every complete, visible code block, oldest first.
    pub fn code_blocks(&self) -> Vec<CopyKey> {
        let mut keys = Vec::new();
        for message in &self.messages {
            if let Body::Assistant { typewriter, .. } = &message.body {
                for block in typewriter.blocks() {
                    if let Block::Code(code) = block {
                        if code.complete {
                            keys.push((message.id, code.id));
                        }
                    }
                }
            }
        }
        keys
    }

    /// Copy a code block and mark it copied.
    ///
    /// Returns `Ok(false)` when the block is not visible or not complete.
    pub fn copy_code(
        &self,
        clipboard: &mut dyn Clipboard,
        tracker: &mut CopyTracker<CopyKey>,
        key: CopyKey,
        now: Instant,
    ) -> Result<bool> {
        let Some(block) = self.code_block(key) else {
            return Ok(false);
        };
        tracker.copy(clipboard, key, &block.content, now)?;
        Ok(true)
    }

    /// Scroll towards older messages.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll.scroll_up(lines);
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.scroll_down(lines);
    }

    /// Whether the newest line is in view.
    pub const fn at_bottom(&self) -> bool {
        self.scroll.at_bottom()
    }

    /// How long until the next reveal tick is due, if anything is revealing.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.is_revealing().then_some(self.config.reply_speed.speed)
    }

    fn user_lines(&self, text: &str, width: u16) -> Vec<StyledLine> {
        let theme = &self.config.theme;
        let style = Style::new(theme.background, theme.text_strong).add(Modifiers::BOLD);
        let percent = u32::from(self.config.user_width_percent.min(100));
        let bubble = (u32::from(width) * percent / 100).max(1);
        let bubble = usize::try_from(bubble).unwrap_or(usize::MAX);

        let mut lines = Vec::new();
        for raw in text.lines() {
            let mut wrapper = LineWrapper::new(bubble, 0, style);
            wrapper.push(raw, style);
            lines.extend(wrapper.finish());
        }
        // right-align each line
        for line in &mut lines {
            let pad = usize::from(width).saturating_sub(line.width());
            let mut aligned = StyledLine::from_run(" ".repeat(pad), theme.body());
            aligned.wrapped = line.wrapped;
            for run in line.runs.drain(..) {
                aligned.push(run.text, run.style);
            }
            *line = aligned;
        }
        lines
    }

    /// Lay out every message at `width` columns.
    pub fn layout(
        &self,
        width: u16,
        copies: &CopyTracker<CopyKey>,
        now: Instant,
    ) -> Vec<StyledLine> {
        let theme = &self.config.theme;
        let widget = MessageWidget::new(theme);
        let mut lines = Vec::new();

        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                lines.push(StyledLine::empty());
            }
            match &message.body {
                Body::User(text) => lines.extend(self.user_lines(text, width)),
                Body::Assistant { pending: true, typewriter } if typewriter.text().is_empty() => {}
                Body::Assistant { typewriter, .. } => {
                    let copied = |block: CodeBlockId| copies.is_copied((message.id, block), now);
                    let cursor = !typewriter.is_complete();
                    lines.extend(widget.layout(&typewriter.blocks(), width, copied, cursor));
                }
            }
        }

        if self.is_typing() {
            lines.push(StyledLine::from_run(
                TYPING_INDICATOR.to_uppercase(),
                theme.accent(),
            ));
        }
        lines
    }

    /// Lay out and paint the visible window into `area`.
    pub fn render(
        &mut self,
        buffer: &mut Buffer,
        area: Rect,
        copies: &CopyTracker<CopyKey>,
        now: Instant,
    ) {
        let lines = self.layout(area.width, copies, now);
        self.scroll.replace(lines);
        let visible: Vec<StyledLine> = self
            .scroll
            .visible_lines(usize::from(area.height))
            .cloned()
            .collect();
        MessageWidget::new(&self.config.theme).render(buffer, area, &visible);
    }
}

impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcript")
            .field("messages", &self.messages.len())
            .field("typing", &self.is_typing())
            .field("scroll_offset", &self.scroll.scroll_offset())
            .finish_non_exhaustive()
    }
}
