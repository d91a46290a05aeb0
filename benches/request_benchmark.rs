use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tinyserve::{mime_type, Request};

fn simple_request_parse_benchmark(c: &mut Criterion) {
    let line = "GET /index.html HTTP/1.1\r\n";

    c.bench_function("simple_request_parse", |b| {
        b.iter(|| {
            let _ = Request::parse(black_box(line), 0).unwrap();
        });
    });
}

fn request_parse_variants_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_parse_variants");

    let lines = [
        ("short", "GET / HTTP/1.1\r\n"),
        ("query", "GET /path/to/resource?id=123&name=test HTTP/1.1\r\n"),
        ("http_1_0_trailing", "GET /docs/readme.txt HTTP/1.0 trailing words\r\n"),
        ("not_implemented", "POST /submit HTTP/1.1\r\n"),
    ];

    for (name, line) in lines.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| {
                let _ = Request::parse(black_box(line), 0);
            });
        });
    }

    group.finish();
}

fn mime_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mime_lookup");

    for name in ["index.html", "PHOTO.JPEG", "archive.tar.zip", "Makefile"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| mime_type(black_box(name)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    simple_request_parse_benchmark,
    request_parse_variants_benchmark,
    mime_lookup_benchmark
);
criterion_main!(benches);
