//! End-to-end properties of the reveal pipeline.

use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use typecast::markdown::{Block, CodeBlock, CodeBlockId, HeadingTier, ListKind, Span};
use typecast::reveal::{prefix, render, Generation, RevealState, TickOutcome};
use typecast::{parse_blocks, parse_spans, RevealConfig, Typewriter};

const REPLY: &str = "# Plan\nSome **bold** text.\n\n- one\n- two\n\n```rust\nfn main() {}\n```\n### Done";

fn drive_to_completion(typewriter: &mut Typewriter) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !typewriter.is_complete() && Instant::now() < deadline {
        typewriter.wait(Duration::from_millis(20));
    }
}

fn visible_text(blocks: &[Block]) -> String {
    blocks.iter().map(Block::plain_text).collect::<Vec<_>>().join("\n")
}

#[test]
fn test_full_reveal_matches_instant_render() {
    let instant = Typewriter::with_text(REPLY, RevealConfig::instant());
    let mut animated = Typewriter::with_text(REPLY, RevealConfig::from_millis(1));

    drive_to_completion(&mut animated);
    assert!(animated.is_complete());
    assert_eq!(animated.blocks(), instant.blocks());
    assert_eq!(animated.blocks(), parse_blocks(REPLY));
}

#[test]
fn test_each_tick_extends_visible_prefix() {
    let total = REPLY.chars().count();
    let mut state = RevealState::new(REPLY, Generation(1));
    let mut previous = String::new();

    for _ in 0..total {
        state.advance(Generation(1), 1);
        let visible = state.visible();
        assert!(visible.starts_with(&previous), "{visible:?} does not extend {previous:?}");
        assert_eq!(visible.chars().count(), previous.chars().count() + 1);
        // every typed word outside markup reaches the parsed blocks
        let blocks = render(REPLY, state.displayed_len());
        let mut rendered = visible_text(&blocks);
        for block in &blocks {
            if let Block::Code(code) = block {
                rendered.push_str(&code.language.to_lowercase());
            }
        }
        for word in visible.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            assert!(rendered.contains(word), "{word:?} missing from {rendered:?}");
        }
        previous = visible.to_string();
    }
    assert_eq!(state.advance(Generation(1), 1), TickOutcome::Complete);
}

#[test]
fn test_code_text_only_grows_while_fence_is_open() {
    let text = "```js\nconst a = 1;\nconst b = 2;";
    let start = "```js\n".chars().count();
    let mut previous = String::new();

    for shown in start..=text.chars().count() {
        let blocks = render(text, shown);
        let [Block::Code(code)] = blocks.as_slice() else {
            panic!("expected a single code block, got {blocks:?}");
        };
        assert!(!code.complete);
        assert!(code.content.starts_with(&previous));
        previous.clone_from(&code.content);
    }
    assert_eq!(previous, "const a = 1;\nconst b = 2;");
}

#[test]
fn test_fence_balance() {
    assert_eq!(
        parse_blocks("``` python\nprint(1)\n```"),
        vec![Block::Code(CodeBlock {
            id: CodeBlockId(0),
            language: "PYTHON".into(),
            content: "print(1)".into(),
            complete: true,
        })]
    );

    assert_eq!(
        parse_blocks("``` js\ncode"),
        vec![Block::Code(CodeBlock {
            id: CodeBlockId(0),
            language: "JS".into(),
            content: "code".into(),
            complete: false,
        })]
    );
}

#[test]
fn test_heading_tiers() {
    let tiers: Vec<HeadingTier> = parse_blocks("# a\n## b\n### c\n#### d")
        .into_iter()
        .map(|block| match block {
            Block::Heading(heading) => heading.tier(),
            other => panic!("expected heading, got {other:?}"),
        })
        .collect();
    assert_eq!(
        tiers,
        [
            HeadingTier::Primary,
            HeadingTier::Primary,
            HeadingTier::Accent,
            HeadingTier::Secondary
        ]
    );
}

#[test]
fn test_list_runs_collapse_into_one_block() {
    let blocks = parse_blocks("- a\n- b\n- c");
    let [Block::List(list)] = blocks.as_slice() else {
        panic!("expected one list, got {blocks:?}");
    };
    assert_eq!(list.kind, ListKind::Unordered);
    assert_eq!(list.items.len(), 3);

    assert_eq!(parse_blocks("- a\n1. b").len(), 2);
}

#[test]
fn test_list_grouping() {
    let blocks = parse_blocks("- a\n- b\n1. c\ntext\n- d");
    let shapes: Vec<(ListKind, usize)> = blocks
        .iter()
        .filter_map(|block| match block {
            Block::List(list) => Some((list.kind, list.items.len())),
            _ => None,
        })
        .collect();
    assert_eq!(
        shapes,
        [(ListKind::Unordered, 2), (ListKind::Ordered, 1), (ListKind::Unordered, 1)]
    );
    assert_eq!(blocks.len(), 4);
    assert!(matches!(blocks[2], Block::Paragraph(_)));
}

#[test]
fn test_inline_span_order() {
    assert_eq!(
        parse_spans("**bold** and *italic* and `code`"),
        vec![
            Span::Bold("bold".into()),
            Span::Plain(" and ".into()),
            Span::Italic("italic".into()),
            Span::Plain(" and ".into()),
            Span::InlineCode("code".into()),
        ]
    );
}

#[test]
fn test_lone_asterisk_stays_literal() {
    assert_eq!(parse_spans("a * b"), vec![Span::Plain("a * b".into())]);
    assert_eq!(
        parse_blocks("a * b"),
        vec![Block::Paragraph(vec![Span::Plain("a * b".into())])]
    );
}

#[test]
fn test_malformed_emphasis_is_total() {
    for line in ["**", "***", "* * *", "**unterminated", "`", "a*b**c`d", "****"] {
        let spans = parse_spans(line);
        let rebuilt_len: usize = spans.iter().map(|s| s.text().len()).sum();
        assert!(rebuilt_len <= line.len(), "{line:?} produced {spans:?}");
    }
    assert_eq!(
        parse_spans("**unterminated"),
        vec![Span::Plain("**unterminated".into())]
    );
}

#[test]
fn test_prefix_counts_characters() {
    let text = "नमस्ते 🙏 hi";
    for n in 0..=text.chars().count() {
        assert_eq!(prefix(text, n).chars().count(), n);
    }
    assert_eq!(prefix(text, 1000), text);
    assert_eq!(visible_text(&render(text, 0)), "");
}
