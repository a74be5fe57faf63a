//! Parser benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use think_stream::parser::{MarkerPair, StreamTagParser};

fn generate_plain_text(size: usize) -> String {
    "The answer is forty-two. ".chars().cycle().take(size).collect()
}

fn generate_reasoning_stream(size: usize) -> String {
    let pieces = [
        "<think>",
        "First, consider the question. ",
        "<think>nested aside</think>",
        "Then check the edge cases.",
        "</think>",
        "Here is the answer. ",
        "A stray </think> and a <thonk> for noise. ",
    ];

    let mut data = String::with_capacity(size);
    let mut i = 0;
    while data.len() < size {
        data.push_str(pieces[i % pieces.len()]);
        i += 1;
    }
    data
}

fn bench_parser_throughput(c: &mut Criterion) {
    let sizes = [1024, 10 * 1024, 100 * 1024];

    let mut group = c.benchmark_group("parser_throughput");

    for size in sizes {
        let plain_text = generate_plain_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("plain_text_{size}"), |b| {
            b.iter(|| {
                let mut parser = StreamTagParser::new();
                black_box(parser.process_chunk(black_box(&plain_text)))
            });
        });

        let reasoning = generate_reasoning_stream(size);
        group.bench_function(format!("reasoning_stream_{size}"), |b| {
            b.iter(|| {
                let mut parser = StreamTagParser::new();
                black_box(parser.process_chunk(black_box(&reasoning)))
            });
        });
    }

    group.finish();
}

fn bench_chunk_boundaries(c: &mut Criterion) {
    let data = generate_reasoning_stream(10 * 1024);
    let chunk_sizes = [1, 4, 16, 64, 512];

    let mut group = c.benchmark_group("chunk_boundaries");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk_size in chunk_sizes {
        // ASCII input, so byte chunks stay on char boundaries
        let chunks: Vec<&str> = data
            .as_bytes()
            .chunks(chunk_size)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok())
            .collect();
        group.bench_function(format!("chunk_{chunk_size}"), |b| {
            b.iter(|| {
                let mut parser = StreamTagParser::with_markers(MarkerPair::think());
                for chunk in &chunks {
                    black_box(parser.process_chunk(black_box(chunk)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parser_throughput, bench_chunk_boundaries);
criterion_main!(benches);
