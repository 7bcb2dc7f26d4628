//! Segmentation throughput benchmarks
//!
//! Run with: cargo bench --bench segmentation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kugiri_core::Segmenter;
use std::hint::black_box;

/// Repeat `base` until the text is `size` bytes, cut on a char boundary
fn generate_text(base: &str, size: usize) -> String {
    let mut text = base.repeat(size / base.len() + 1);
    let mut cut = size.min(text.len());
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}

fn bench_text_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_sizes");
    let segmenter = Segmenter::new("en").unwrap();
    let base = "This is a test sentence with some reasonable length. ";

    for size in [1024, 10_240, 102_400, 1_024_000] {
        let text = generate_text(base, size);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("boundaries", size), &text, |b, text| {
            b.iter(|| segmenter.boundaries(black_box(text)).len());
        });
    }

    group.finish();
}

fn bench_languages(c: &mut Criterion) {
    let mut group = c.benchmark_group("languages");
    let samples = [
        (
            "en",
            "Dr. Smith went to the U.S.A. He said \"Stop. Now.\" and left (quietly). Really... Yes! ",
        ),
        ("ja", "「元気ですか？」と聞きました。これは日本語の文章です！本当に…そうですか？"),
        ("de", "Am 3. Oktober kam er an. Er sagte: „Ich komme z.B. morgen.“ Dann ging er. "),
    ];

    for (code, base) in samples {
        let segmenter = Segmenter::new(code).unwrap();
        let text = generate_text(base, 102_400);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("segment", code), &text, |b, text| {
            b.iter(|| segmenter.segment(black_box(text)).len());
        });
    }

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    let segmenter = Segmenter::new("en").unwrap();

    let cases = [
        ("punctuation", "?!.".repeat(30_000)),
        ("open_quotes", "\"(\"[ a. ".repeat(10_000)),
        ("no_breaks", "word ".repeat(20_000)),
        ("indented_markers", format!("{}1. ", " ".repeat(100)).repeat(1_000)),
    ];

    for (name, text) in &cases {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("boundaries", name), text, |b, text| {
            b.iter(|| segmenter.boundaries(black_box(text)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_text_sizes, bench_languages, bench_pathological);
criterion_main!(benches);
