//! Benchmarks for line classification and block building.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic report pages mixing headers, wrapped
//! paragraphs, numbered items and table rows.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unlines::{BlockBuilder, BuildOptions, CachedBuilder, Line, Region};

/// Creates synthetic regions, one per page.
fn create_test_regions(page_count: usize) -> Vec<Region> {
    (0..page_count)
        .map(|i| {
            Region::from_texts([
                "ANNUAL REPORT".to_string(),
                format!("{}. Results of Operations", i + 1),
                "The Company recorded net revenue growth across".to_string(),
                "all segments during the fiscal year, driven by".to_string(),
                "higher volumes and pricing.".to_string(),
                format!("Revenue {},250 {},500", i + 1, i + 2),
                "Net Debt (685,365,480)$ 12.5%".to_string(),
                format!("({}) the Borrower shall deliver notice", (b'a' + (i % 26) as u8) as char),
                "Sioux Falls, SD 57104".to_string(),
            ])
        })
        .collect()
}

/// Benchmark single line classification.
fn bench_line_classification(c: &mut Criterion) {
    let lines = [
        "EXECUTIVE SUMMARY",
        "3.15 Vacancies",
        "Net Debt (685,365,480)$ ... ",
        "The agreement was signed by Leslie H.",
        "E x e c u t i v e  S u m m a r y",
    ];

    c.bench_function("classify_lines", |b| {
        b.iter(|| {
            for raw in lines.iter() {
                black_box(Line::new(black_box(raw)));
            }
        });
    });
}

/// Benchmark block building at various sizes.
fn bench_block_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_building");

    for page_count in [1, 10, 100].iter() {
        let regions = create_test_regions(*page_count);

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            let builder = BlockBuilder::new();
            b.iter(|| builder.build_document(black_box(&regions)));
        });

        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            let builder = BlockBuilder::with_options(BuildOptions::new().sequential());
            b.iter(|| builder.build_document(black_box(&regions)));
        });
    }

    group.finish();
}

/// Benchmark repeated builds served from the region cache.
fn bench_cached_building(c: &mut Criterion) {
    let regions = create_test_regions(100);

    c.bench_function("cached_100_pages", |b| {
        let mut builder = CachedBuilder::new(BuildOptions::new());
        b.iter(|| builder.build_document(black_box(&regions)));
    });
}

criterion_group!(
    benches,
    bench_line_classification,
    bench_block_building,
    bench_cached_building,
);
criterion_main!(benches);
