//! Benchmarks for partrs.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use partrs::{Multipart, ParseConfig};

const BOUNDARY: &str = "----WebKitFormBoundary7MA4YWxkTrZu0gW";

/// Builds a body with `parts` parts of `part_size` deterministic bytes each.
fn build_body(parts: usize, part_size: usize) -> Vec<u8> {
    let mut body = Vec::with_capacity(parts * (part_size + 128));
    for i in 0..parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"field{}\"; filename=\"f{}.bin\"\r\n",
                i, i
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend((0..part_size).map(|j| (j * 7 + 13) as u8));
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn drain(body: &[u8]) -> usize {
    let mut multipart = Multipart::new(Cursor::new(body.to_vec()), BOUNDARY);
    let mut total = 0usize;
    while let Some(mut part) = multipart.next_part().unwrap() {
        while let Some(chunk) = part.chunk().unwrap() {
            total += chunk.len();
        }
    }
    total
}

fn bench_payload_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_sizes");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        let body = build_body(1, size);

        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(
            format!("single_part_{}kb", size / 1024),
            &body,
            |b, body| {
                b.iter(|| black_box(drain(black_box(body))));
            },
        );
    }

    group.finish();
}

fn bench_part_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("part_counts");

    for count in [4usize, 64, 512] {
        let body = build_body(count, 1024);

        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(format!("{}_parts_1kb", count), &body, |b, body| {
            b.iter(|| black_box(drain(black_box(body))));
        });
    }

    group.finish();
}

fn bench_collected_vs_streamed(c: &mut Criterion) {
    let mut group = c.benchmark_group("consumption");
    let body = build_body(8, 256 * 1024);
    group.throughput(Throughput::Bytes(body.len() as u64));

    group.bench_function("streamed_chunks", |b| {
        b.iter(|| black_box(drain(black_box(&body))));
    });

    group.bench_function("collected_bytes", |b| {
        b.iter(|| {
            let mut multipart = Multipart::with_config(
                Cursor::new(body.clone()),
                BOUNDARY,
                ParseConfig::default(),
            );
            let mut total = 0usize;
            while let Some(mut part) = multipart.next_part().unwrap() {
                total += part.bytes().unwrap().len();
            }
            black_box(total)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_payload_sizes,
    bench_part_counts,
    bench_collected_vs_streamed
);
criterion_main!(benches);
