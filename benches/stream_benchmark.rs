//! Performance benchmarks for SSE delta decoding
//!
//! Measures decode throughput for different stream sizes and chunk sizes.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kai::sse::{ParseOptions, StreamAccumulator};

/// Generate an SSE body with `fragments` delta lines and mixed-width text
fn generate_stream(fragments: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..fragments {
        let text = format!("token {} olá 🌍 ", i);
        body.push_str(&format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"index": 0, "delta": {"content": text}}]})
        ));
        if i % 50 == 0 {
            body.push_str(": keep-alive\n\n");
        }
    }
    body.push_str("data: [DONE]\n\n");
    body.into_bytes()
}

fn decode_in_chunks(body: &[u8], chunk_size: usize) -> String {
    let mut accumulator = StreamAccumulator::new(ParseOptions::new());
    for chunk in body.chunks(chunk_size) {
        accumulator.push_chunk(chunk);
    }
    accumulator.finish().content
}

/// Benchmark decoding by stream length with transport-sized chunks
fn bench_decode_stream_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_stream_length");

    for size in [10, 100, 1000, 5000].iter() {
        let body = generate_stream(*size);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_fragments", size)),
            &body,
            |b, body| {
                b.iter(|| black_box(decode_in_chunks(black_box(body), 8 * 1024)));
            },
        );
    }

    group.finish();
}

/// Benchmark decoding by chunk size, including chunks that split characters
fn bench_decode_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_chunk_size");
    let body = generate_stream(1000);

    for chunk_size in [7, 64, 1024, 16 * 1024].iter() {
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_bytes", chunk_size)),
            chunk_size,
            |b, chunk_size| {
                b.iter(|| black_box(decode_in_chunks(black_box(&body), *chunk_size)));
            },
        );
    }

    group.finish();
}

/// Benchmark the per-fragment callback overhead
fn bench_decode_with_progress(c: &mut Criterion) {
    let body = generate_stream(1000);

    c.bench_function("decode_with_progress", |b| {
        b.iter(|| {
            let mut received = 0usize;
            let options = ParseOptions::new().with_on_progress(|f| received += f.len());
            let mut accumulator = StreamAccumulator::new(options);
            for chunk in body.chunks(8 * 1024) {
                accumulator.push_chunk(chunk);
            }
            let summary = accumulator.finish();
            black_box((summary, received))
        });
    });
}

criterion_group!(
    benches,
    bench_decode_stream_length,
    bench_decode_chunk_size,
    bench_decode_with_progress,
);

criterion_main!(benches);
