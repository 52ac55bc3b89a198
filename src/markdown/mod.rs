//! Markdown-like parsing of chat replies into render blocks.
//!
//! This is deliberately not CommonMark. The dialect is the small subset AI
//! replies actually use:
//!
//! - `#` to `####` headings, collapsed into three [`HeadingTier`]s
//! - `-`, `*`, `+` and `1.` list items
//! - triple-backtick fences with an optional language label
//! - `**bold**`, `*italic*` and `` `code` `` inline runs
//!
//! Both entry points are pure functions. A reveal re-runs [`parse_blocks`]
//! over the whole visible prefix on every tick, which keeps the parser free
//! of incremental state.

mod block;
mod inline;

pub use block::{
    parse_blocks, Block, CodeBlock, CodeBlockId, Heading, HeadingTier, ListBlock, ListKind,
    DEFAULT_LANGUAGE,
};
pub use inline::{parse_spans, Span};
