//! Inline span tokenizer.
//!
//! A line is split by a single regex alternation into decorated runs
//! (`**bold**`, `*italic*`, `` `code` ``) and the plain text around them.
//! Decorations never nest and unterminated markers are left as literal text.

use regex::Regex;
use std::sync::LazyLock;

/// One inline run of text within a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Undecorated text.
    Plain(String),
    /// `**bold**` with delimiters stripped.
    Bold(String),
    /// `*italic*` with delimiters stripped.
    Italic(String),
    /// `` `code` `` with delimiters stripped.
    InlineCode(String),
}

impl Span {
    /// The text carried by this span, without delimiters.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Bold(s) | Self::Italic(s) | Self::InlineCode(s) => s,
        }
    }
}

/// `**` is listed before `*` so a double asterisk never opens an italic run.
static SPAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*.*?\*\*|\*.*?\*|`.*?`").expect("Invalid inline span regex")
});

/// Split one line into spans.
///
/// ```
/// use typecast::markdown::{parse_spans, Span};
///
/// let spans = parse_spans("say **hi**");
/// assert_eq!(spans, vec![Span::Plain("say ".into()), Span::Bold("hi".into())]);
/// ```
pub fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in SPAN_REGEX.find_iter(line) {
        // an unterminated `**` reaches the italic arm as an empty pair
        if m.as_str() == "**" {
            continue;
        }
        if m.start() > last {
            spans.push(Span::Plain(line[last..m.start()].to_string()));
        }
        spans.push(decorate(m.as_str()));
        last = m.end();
    }

    if last < line.len() {
        spans.push(Span::Plain(line[last..].to_string()));
    }

    spans
}

/// Strip delimiters from a matched token.
fn decorate(token: &str) -> Span {
    if token.len() >= 4 && token.starts_with("**") && token.ends_with("**") {
        Span::Bold(token[2..token.len() - 2].to_string())
    } else if let Some(inner) = token.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        Span::InlineCode(inner.to_string())
    } else {
        // `*...*`; the regex guarantees both ends are asterisks
        Span::Italic(token[1..token.len() - 1].to_string())
    }
}
