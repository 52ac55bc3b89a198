//! Typewriter Demo: a chat transcript revealing canned AI replies.
//!
//! Type an idea and press Enter. The reply is "generated" after a short
//! delay and typed out with live markdown rendering.
//!
//! Keys: Enter send | Up/Down scroll | Ctrl-Y copy last code block | Esc quit
//!
//! Logs go to `typewriter_demo.log`; set `RUST_LOG=typecast=debug` to see
//! ticker and reveal events.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use typecast::widget::{paint_line, CopyKey, MessageId, StyledLine, Transcript};
use typecast::terminal::{SessionConfig, TerminalSession};
use typecast::{Buffer, CopyTracker, IdeaMetrics, Rect, SystemClipboard, Theme, TranscriptConfig};

/// Canned reply (simulating a model response).
const REPLY: &str = r#"## Verdict
Strong **wedge**, but the *distribution* story needs work.

### Why it can work
- Kirana owners already keep ledgers on paper
- UPI made `digital payments` a habit
- Nobody owns the credit-scoring layer yet

#### Next steps
1. Interview 20 shop owners this week
2. Ship a WhatsApp-only prototype

```python
def viability(demand, competition):
    return demand * 0.7 - competition * 0.3
```

Keep going. 🛠️
{"metrics": {"score": 72, "demand": "High", "competition": "Medium"}}"#;

const THINKING: Duration = Duration::from_millis(900);

fn setup_logging() -> io::Result<()> {
    let file = File::create("typewriter_demo.log")?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typecast=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_thread_names(true),
        )
        .init();
    Ok(())
}

struct App {
    transcript: Transcript,
    copies: CopyTracker<CopyKey>,
    clipboard: SystemClipboard,
    input: String,
    pending: Option<(MessageId, Instant)>,
    metrics: Option<IdeaMetrics>,
    status: String,
    running: bool,
}

impl App {
    fn new() -> Self {
        let mut transcript = Transcript::new(TranscriptConfig::default());
        transcript.push_assistant("Namaste! Logic node active. How can I help?");
        Self {
            transcript,
            copies: CopyTracker::default(),
            clipboard: SystemClipboard,
            input: String::new(),
            pending: None,
            metrics: None,
            status: String::new(),
            running: true,
        }
    }

    fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.running = false,
            KeyCode::Char('y') if modifiers.contains(KeyModifiers::CONTROL) => self.copy_last(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Up => self.transcript.scroll_up(1),
            KeyCode::Down => self.transcript.scroll_down(1),
            KeyCode::PageUp => self.transcript.scroll_up(10),
            KeyCode::PageDown => self.transcript.scroll_down(10),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.transcript.is_typing() || self.input.trim().is_empty() {
            return;
        }
        let prompt = std::mem::take(&mut self.input);
        self.transcript.push_user(prompt);
        let id = self.transcript.begin_assistant();
        self.pending = Some((id, Instant::now() + THINKING));
    }

    fn copy_last(&mut self) {
        let Some(key) = self.transcript.code_blocks().pop() else {
            self.status = "nothing to copy".into();
            return;
        };
        let result = self
            .transcript
            .copy_code(&mut self.clipboard, &mut self.copies, key, Instant::now());
        self.status = match result {
            Ok(_) => String::new(),
            Err(err) => err.to_string(),
        };
    }

    fn tick(&mut self, now: Instant) {
        if let Some((id, due)) = self.pending {
            if now >= due {
                self.metrics = self.transcript.complete_assistant(id, REPLY).or(self.metrics);
                self.pending = None;
            }
        }
        self.transcript.pump();
        self.copies.expire(now);
    }

    fn footer(&self, theme: &Theme) -> StyledLine {
        let mut line = StyledLine::from_run("› ", theme.accent());
        line.push(self.input.clone(), theme.body());
        let mut right = String::new();
        if let Some(m) = self.metrics {
            right = format!(
                "  viability {}% | demand {:?} | competition {:?}",
                m.viability_score, m.market_demand, m.competition_level
            );
        }
        if !self.status.is_empty() {
            right = format!("  {}", self.status);
        }
        line.push(right, theme.muted());
        line.fill = Some(theme.code());
        line
    }

    fn draw(&mut self, buffer: &mut Buffer, session: &mut TerminalSession) -> io::Result<()> {
        let area = Rect::from_size(buffer.width(), buffer.height());
        let (body, footer) = area.split_bottom(1);
        let theme = self.transcript.config().theme.clone();

        self.transcript
            .render(buffer, body.inset(2, 1), &self.copies, Instant::now());
        paint_line(buffer, footer.x, footer.y, footer.width, &self.footer(&theme), theme.body());

        session.present(buffer)
    }
}

fn main() -> io::Result<()> {
    setup_logging()?;

    let mut session = TerminalSession::enter(SessionConfig::default())?;
    let mut buffer = session.buffer();
    let mut app = App::new();

    while app.running {
        app.tick(Instant::now());
        app.draw(&mut buffer, &mut session)?;

        let timeout = app
            .transcript
            .next_tick_in()
            .unwrap_or(Duration::from_millis(100))
            .max(Duration::from_millis(5));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.on_key(key.code, key.modifiers);
            }
            Event::Resize(w, h) => {
                if session.resize(w, h) {
                    buffer = session.buffer();
                }
            }
            _ => {}
        }
    }

    Ok(())
}
