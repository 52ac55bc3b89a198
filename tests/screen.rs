//! Painting replies and transcripts, checked through a terminal emulator.

use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use typecast::widget::CopyKey;
use typecast::{
    parse_blocks, Buffer, CopyTracker, MemoryClipboard, MessageWidget, Modifiers, OutputBuffer,
    Rect, RevealConfig, Theme, Transcript, TranscriptConfig,
};

const WIDTH: u16 = 40;
const HEIGHT: u16 = 12;

fn screen_of(buffer: &Buffer) -> vt100::Parser {
    let mut out = OutputBuffer::new();
    out.paint(buffer).unwrap();
    let mut parser = vt100::Parser::new(buffer.height(), buffer.width(), 0);
    parser.process(out.as_bytes());
    parser
}

fn rows(parser: &vt100::Parser) -> Vec<String> {
    parser
        .screen()
        .rows(0, WIDTH)
        .map(|row| row.trim_end().to_string())
        .collect()
}

fn rgb(color: typecast::Rgb) -> vt100::Color {
    vt100::Color::Rgb(color.r, color.g, color.b)
}

#[test]
fn test_reply_paints_through_terminal() {
    let theme = Theme::default();
    let widget = MessageWidget::new(&theme);
    let reply = "## Verdict\nA **strong** idea.\n\n- demand\n1. ship\n```sh\nls -la\n```";
    let lines = widget.layout(&parse_blocks(reply), WIDTH, |_| false, false);

    let mut buffer = Buffer::new(WIDTH, HEIGHT);
    widget.render(&mut buffer, Rect::from_size(WIDTH, HEIGHT), &lines);
    let parser = screen_of(&buffer);

    let expected_header = format!("SH Archive{}copy", " ".repeat(usize::from(WIDTH) - 14));
    let painted = rows(&parser);
    assert_eq!(
        painted[..7].to_vec(),
        vec![
            "VERDICT".to_string(),
            "A strong idea.".to_string(),
            String::new(),
            "→ demand".to_string(),
            "1. ship".to_string(),
            expected_header,
            "ls -la".to_string(),
        ]
    );

    let screen = parser.screen();
    let heading = screen.cell(0, 0).unwrap();
    assert!(heading.bold());
    assert!(heading.underline());

    let bold = screen.cell(1, 2).unwrap();
    assert_eq!(bold.contents(), "s");
    assert_eq!(bold.fgcolor(), rgb(theme.text_strong));

    let bullet = screen.cell(3, 0).unwrap();
    assert_eq!(bullet.fgcolor(), rgb(theme.accent));

    // code rows are filled with the surface color to the right edge
    let code_tail = screen.cell(6, WIDTH - 1).unwrap();
    assert_eq!(code_tail.bgcolor(), rgb(theme.surface));
}

#[test]
fn test_wide_and_long_graphemes_survive_painting() {
    let theme = Theme::default();
    let widget = MessageWidget::new(&theme);
    let lines = widget.layout(&parse_blocks("日本 ok 🛠️"), WIDTH, |_| false, false);

    let mut buffer = Buffer::new(WIDTH, 2);
    widget.render(&mut buffer, Rect::from_size(WIDTH, 2), &lines);
    assert_eq!(buffer.row_text(0), "日本 ok 🛠️");

    let parser = screen_of(&buffer);
    assert_eq!(parser.screen().cell(0, 0).unwrap().contents(), "日");
    assert!(parser.screen().cell(0, 0).unwrap().is_wide());
    assert_eq!(parser.screen().cell(0, 5).unwrap().contents(), "o");
}

#[test]
fn test_mid_reveal_shows_cursor_and_open_fence() {
    let theme = Theme::default();
    let widget = MessageWidget::new(&theme);
    let text = "```rust\nfn main";
    let lines = widget.layout(&parse_blocks(text), WIDTH, |_| false, true);

    let mut buffer = Buffer::new(WIDTH, 3);
    widget.render(&mut buffer, Rect::from_size(WIDTH, 3), &lines);
    let parser = screen_of(&buffer);
    assert_eq!(rows(&parser)[0], "fn main▌");
    assert!(buffer.get(0, 0).unwrap().modifiers().contains(Modifiers::DIM));
    assert_eq!(parser.screen().cell(0, 0).unwrap().bgcolor(), rgb(theme.surface));
}

#[test]
fn test_transcript_copy_indicator_reverts() {
    let config = TranscriptConfig {
        reply_speed: RevealConfig::instant(),
        ..TranscriptConfig::default()
    };
    let mut transcript = Transcript::new(config);
    transcript.push_user("idea");
    let id = transcript.begin_assistant();
    let metrics = transcript.complete_assistant(
        id,
        "Try:\n```\necho hi\n```\n{\"metrics\": {\"score\": 140, \"demand\": \"Low\", \"competition\": \"High\"}}",
    );
    assert_eq!(metrics.map(|m| m.viability_score), Some(100));

    let mut clipboard = MemoryClipboard::new();
    let mut copies: CopyTracker<CopyKey> = CopyTracker::default();
    let key = transcript.code_blocks()[0];
    let t0 = Instant::now();
    assert!(transcript.copy_code(&mut clipboard, &mut copies, key, t0).unwrap());
    assert_eq!(clipboard.contents(), Some("echo hi"));

    let area = Rect::from_size(WIDTH, HEIGHT);
    let mut buffer = Buffer::new(WIDTH, HEIGHT);
    transcript.render(&mut buffer, area, &copies, t0);
    let header = rows(&screen_of(&buffer))
        .into_iter()
        .find(|row| row.starts_with("Logic Archive"))
        .unwrap();
    assert!(header.ends_with("copied"));

    let later = t0 + Duration::from_millis(2000);
    copies.expire(later);
    transcript.render(&mut buffer, area, &copies, later);
    let header = rows(&screen_of(&buffer))
        .into_iter()
        .find(|row| row.starts_with("Logic Archive"))
        .unwrap();
    assert!(header.ends_with("copy"));
}
