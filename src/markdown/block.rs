//! Line-oriented block parser.
//!
//! The whole revealed prefix is re-parsed on every change. The parse is a
//! single forward pass over `text.split('\n')` holding two pieces of state:
//! the currently open list and the currently open code fence.

use super::inline::{parse_spans, Span};
use regex::Regex;
use std::sync::LazyLock;

/// Language label used when an opening fence names none.
pub const DEFAULT_LANGUAGE: &str = "Logic";

const FENCE: &str = "```";

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,4})\s+(.*)$").expect("Invalid heading regex"));

static UNORDERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(.*)$").expect("Invalid list regex"));

static ORDERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+(.*)$").expect("Invalid list regex"));

/// Visual tier of a heading.
///
/// Four nominal `#` levels collapse into three tiers, and a level-3 heading
/// is drawn more prominently than a level-4 one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingTier {
    /// `#` and `##`: largest, underlined.
    Primary,
    /// `####`: intermediate.
    Secondary,
    /// `###`: smallest, accent coloured with a leading marker.
    Accent,
}

/// A heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` characters (1-4).
    pub level: u8,
    /// Inline content after the hashes.
    pub spans: Vec<Span>,
}

impl Heading {
    /// Map the raw level onto its visual tier.
    pub const fn tier(&self) -> HeadingTier {
        match self.level {
            3 => HeadingTier::Accent,
            1 | 2 => HeadingTier::Primary,
            _ => HeadingTier::Secondary,
        }
    }
}

/// Kind of list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `-`, `*` or `+` items.
    Unordered,
    /// `1.` style items.
    Ordered,
}

/// A run of consecutive list items of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock {
    /// Marker kind shared by all items.
    pub kind: ListKind,
    /// One span sequence per item.
    pub items: Vec<Vec<Span>>,
}

/// Identity of a code block within one parse.
///
/// This is the zero-based line index of the opening fence, so it stays the
/// same while more of the text is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeBlockId(pub usize);

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Position-derived identity, used for copy state.
    pub id: CodeBlockId,
    /// Upper-cased language label, or [`DEFAULT_LANGUAGE`].
    pub language: String,
    /// Raw content lines joined with `\n`.
    pub content: String,
    /// `false` when the input ended before the closing fence.
    pub complete: bool,
}

/// One structural unit of rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A line of ordinary text.
    Paragraph(Vec<Span>),
    /// A heading line.
    Heading(Heading),
    /// A list of one kind.
    List(ListBlock),
    /// A fenced code block, complete or not.
    Code(CodeBlock),
    /// Vertical gap produced by a blank line.
    Spacer,
}

impl Block {
    /// Concatenated text content of the block, without markup.
    pub fn plain_text(&self) -> String {
        fn join(spans: &[Span]) -> String {
            spans.iter().map(Span::text).collect()
        }

        match self {
            Self::Paragraph(spans) => join(spans),
            Self::Heading(h) => join(&h.spans),
            Self::List(list) => list
                .items
                .iter()
                .map(|item| join(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Code(code) => code.content.clone(),
            Self::Spacer => String::new(),
        }
    }
}

struct OpenFence {
    id: CodeBlockId,
    language: String,
    lines: Vec<String>,
}

impl OpenFence {
    fn into_block(self, complete: bool) -> CodeBlock {
        CodeBlock {
            id: self.id,
            language: self.language,
            content: self.lines.join("\n"),
            complete,
        }
    }
}

#[derive(Default)]
struct BlockParser {
    blocks: Vec<Block>,
    list: Option<ListBlock>,
    fence: Option<OpenFence>,
}

impl BlockParser {
    fn flush_list(&mut self) {
        if let Some(list) = self.list.take() {
            self.blocks.push(Block::List(list));
        }
    }

    fn push_item(&mut self, kind: ListKind, content: &str) {
        let spans = parse_spans(content);
        match &mut self.list {
            Some(list) if list.kind == kind => list.items.push(spans),
            _ => {
                self.flush_list();
                self.list = Some(ListBlock {
                    kind,
                    items: vec![spans],
                });
            }
        }
    }

    fn line(&mut self, index: usize, line: &str) {
        let trimmed = line.trim();

        if let Some(label) = trimmed.strip_prefix(FENCE) {
            if let Some(fence) = self.fence.take() {
                self.blocks.push(Block::Code(fence.into_block(true)));
            } else {
                self.flush_list();
                let label = label.trim();
                let language = if label.is_empty() {
                    DEFAULT_LANGUAGE.to_string()
                } else {
                    label.to_uppercase()
                };
                self.fence = Some(OpenFence {
                    id: CodeBlockId(index),
                    language,
                    lines: Vec::new(),
                });
            }
            return;
        }

        if let Some(fence) = &mut self.fence {
            fence.lines.push(line.to_string());
            return;
        }

        if let Some(caps) = HEADING_REGEX.captures(line) {
            self.flush_list();
            let level = u8::try_from(caps[1].len()).unwrap_or(4);
            self.blocks.push(Block::Heading(Heading {
                level,
                spans: parse_spans(&caps[2]),
            }));
            return;
        }

        if let Some(caps) = UNORDERED_REGEX.captures(line) {
            self.push_item(ListKind::Unordered, &caps[1]);
            return;
        }

        if let Some(caps) = ORDERED_REGEX.captures(line) {
            self.push_item(ListKind::Ordered, &caps[1]);
            return;
        }

        self.flush_list();
        if trimmed.is_empty() {
            self.blocks.push(Block::Spacer);
        } else {
            self.blocks.push(Block::Paragraph(parse_spans(line)));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_list();
        if let Some(fence) = self.fence.take() {
            self.blocks.push(Block::Code(fence.into_block(false)));
        }
        self.blocks
    }
}

/// Parse a (possibly partial) text into blocks.
///
/// Pure and total: any input yields a well-formed block sequence in line
/// order, in time linear in the input length.
///
/// ```
/// use typecast::markdown::{parse_blocks, Block};
///
/// let blocks = parse_blocks("hello\n\n- a\n- b");
/// assert_eq!(blocks.len(), 3);
/// assert!(matches!(blocks[1], Block::Spacer));
/// ```
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut parser = BlockParser::default();
    for (index, line) in text.split('\n').enumerate() {
        parser.line(index, line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(s: &str) -> Vec<Span> {
        vec![Span::Plain(s.to_string())]
    }

    #[test]
    fn test_closed_fence() {
        let blocks = parse_blocks("``` python\nprint(1)\n```");
        assert_eq!(
            blocks,
            vec![Block::Code(CodeBlock {
                id: CodeBlockId(0),
                language: "PYTHON".into(),
                content: "print(1)".into(),
                complete: true,
            })]
        );
    }

    #[test]
    fn test_unclosed_fence_is_incomplete() {
        let blocks = parse_blocks("``` js\ncode");
        assert_eq!(
            blocks,
            vec![Block::Code(CodeBlock {
                id: CodeBlockId(0),
                language: "JS".into(),
                content: "code".into(),
                complete: false,
            })]
        );
    }

    #[test]
    fn test_fence_without_language_uses_placeholder() {
        let blocks = parse_blocks("```\nx\n```");
        let Block::Code(code) = &blocks[0] else {
            panic!("expected code block");
        };
        assert_eq!(code.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_fence_keeps_markdown_and_blank_lines_raw() {
        let blocks = parse_blocks("text\n```\n# not a heading\n\n- not a list\n```");
        assert_eq!(blocks.len(), 2);
        let Block::Code(code) = &blocks[1] else {
            panic!("expected code block");
        };
        assert_eq!(code.content, "# not a heading\n\n- not a list");
        assert_eq!(code.id, CodeBlockId(1));
    }

    #[test]
    fn test_fence_flushes_open_list() {
        let blocks = parse_blocks("- a\n```\nx");
        assert!(matches!(blocks[0], Block::List(_)));
        assert!(matches!(blocks[1], Block::Code(_)));
    }

    #[test]
    fn test_heading_tiers() {
        let tier = |s: &str| match &parse_blocks(s)[0] {
            Block::Heading(h) => h.tier(),
            other => panic!("expected heading, got {other:?}"),
        };
        assert_eq!(tier("# Title"), HeadingTier::Primary);
        assert_eq!(tier("## Title"), HeadingTier::Primary);
        assert_eq!(tier("### Title"), HeadingTier::Accent);
        assert_eq!(tier("#### Title"), HeadingTier::Secondary);
    }

    #[test]
    fn test_five_hashes_is_paragraph() {
        assert_eq!(
            parse_blocks("##### deep"),
            vec![Block::Paragraph(plain("##### deep"))]
        );
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(parse_blocks("#tag"), vec![Block::Paragraph(plain("#tag"))]);
    }

    #[test]
    fn test_list_grouping() {
        let blocks = parse_blocks("- a\n- b\n- c");
        assert_eq!(
            blocks,
            vec![Block::List(ListBlock {
                kind: ListKind::Unordered,
                items: vec![plain("a"), plain("b"), plain("c")],
            })]
        );
    }

    #[test]
    fn test_list_kind_change_flushes() {
        let blocks = parse_blocks("- a\n1. b");
        assert_eq!(
            blocks,
            vec![
                Block::List(ListBlock {
                    kind: ListKind::Unordered,
                    items: vec![plain("a")],
                }),
                Block::List(ListBlock {
                    kind: ListKind::Ordered,
                    items: vec![plain("b")],
                }),
            ]
        );
    }

    #[test]
    fn test_ordered_marker_needs_ascii_digits() {
        assert!(matches!(parse_blocks("١. item")[0], Block::Paragraph(_)));
        assert!(matches!(parse_blocks("12. item")[0], Block::List(_)));
    }

    #[test]
    fn test_mixed_unordered_markers_share_a_list() {
        let blocks = parse_blocks("- a\n* b\n+ c");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_blank_line_splits_lists_with_spacer() {
        let blocks = parse_blocks("1. a\n\n2. b");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::Spacer);
    }

    #[test]
    fn test_heading_flushes_list() {
        let blocks = parse_blocks("- a\n## Next");
        assert!(matches!(blocks[0], Block::List(_)));
        assert!(matches!(blocks[1], Block::Heading(_)));
    }

    #[test]
    fn test_paragraph_spans() {
        let blocks = parse_blocks("a **b**");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Span::Plain("a ".into()),
                Span::Bold("b".into())
            ])]
        );
    }

    #[test]
    fn test_empty_input_is_single_spacer() {
        assert_eq!(parse_blocks(""), vec![Block::Spacer]);
    }

    #[test]
    fn test_only_blank_lines() {
        let blocks = parse_blocks("\n  \n");
        assert!(blocks.iter().all(|b| *b == Block::Spacer));
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn test_indented_item_is_paragraph() {
        // list markers are matched on the untrimmed line
        assert_eq!(
            parse_blocks("  - nested"),
            vec![Block::Paragraph(plain("  - nested"))]
        );
    }
}
