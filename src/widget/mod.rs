//! Widgets: laying out revealed replies and painting them into a buffer.
//!
//! # Pipeline
//!
//! ```text
//! Typewriter::blocks() -> MessageWidget::layout() -> Vec<StyledLine>
//!                                                       |
//!                        Transcript: ScrollBuffer <-----+
//!                                                       |
//!                              MessageWidget::render() -> Buffer
//! ```
//!
//! # Example
//!
//! ```
//! use typecast::markdown::parse_blocks;
//! use typecast::widget::{MessageWidget, Theme};
//! use typecast::{Buffer, Rect};
//!
//! let theme = Theme::default();
//! let widget = MessageWidget::new(&theme);
//! let lines = widget.layout(&parse_blocks("## Plan\n- ship it"), 40, |_| false, false);
//!
//! let mut buffer = Buffer::new(40, 4);
//! widget.render(&mut buffer, Rect::new(0, 0, 40, 4), &lines);
//! assert_eq!(buffer.row_text(1), "→ ship it");
//! ```

mod message;
mod scroll_buffer;
mod theme;
mod transcript;
mod wrap;

pub use message::{paint_line, MessageWidget, COPIED_LABEL, COPY_LABEL};
pub use scroll_buffer::{ScrollBuffer, StyledLine, StyledRun};
pub use theme::Theme;
pub use transcript::{CopyKey, MessageId, Role, Transcript, TranscriptConfig, TYPING_INDICATOR};
pub use wrap::{clip, LineWrapper};
