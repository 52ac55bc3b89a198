//! Parse benchmark: cost of re-parsing the visible prefix on a tick.
//!
//! A reveal re-parses everything shown so far on every tick, so the cost at
//! the end of a long reply bounds the per-tick work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use typecast::reveal::render;
use typecast::{parse_blocks, parse_spans};

fn sample_reply(sections: usize) -> String {
    let mut text = String::new();
    for i in 0..sections {
        text.push_str(&format!("## Section {i}\n"));
        text.push_str("Some **bold** claims, an *aside* and `inline code` here.\n");
        text.push_str("- first point\n- second point\n1. step one\n2. step two\n\n");
        text.push_str("```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\n");
    }
    text
}

fn parse_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_blocks");
    for sections in [1, 10, 50] {
        let text = sample_reply(sections);
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            b.iter(|| parse_blocks(black_box(text)));
        });
    }
    group.finish();
}

fn parse_prefix(c: &mut Criterion) {
    let text = sample_reply(10);
    let half = text.chars().count() / 2;

    c.bench_function("render_half_prefix", |b| {
        b.iter(|| render(black_box(&text), black_box(half)));
    });
}

fn parse_inline(c: &mut Criterion) {
    let line = "A **bold** move with *style* and `code`, then plain text to the end.";

    c.bench_function("parse_spans_mixed", |b| {
        b.iter(|| parse_spans(black_box(line)));
    });
}

criterion_group!(benches, parse_full, parse_prefix, parse_inline);
criterion_main!(benches);
