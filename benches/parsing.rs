//! Benchmarks for CSV load and export.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csvgrid::codec::{parse_document, write_document};
use csvgrid::GridEditor;

/// Synthesize a CSV with `rows` data rows and a few quoted fields.
fn sample_csv(rows: usize) -> String {
    let mut out = String::from("id,name,city,note\n");
    for i in 0..rows {
        out.push_str(&format!(
            "{i},Person {i},\"City, {}\",\"said \"\"hi\"\" {i}\"\n",
            i % 97
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for rows in [100usize, 1_000, 10_000] {
        let data = sample_csv(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| parse_document(black_box(data.as_bytes())).expect("Failed to parse"))
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    for rows in [100usize, 1_000, 10_000] {
        let doc = parse_document(sample_csv(rows).as_bytes()).expect("Failed to parse");
        group.bench_with_input(BenchmarkId::from_parameter(rows), &doc, |b, doc| {
            b.iter(|| write_document(black_box(doc)).expect("Failed to export"))
        });
    }
    group.finish();
}

/// Load, append a row, delete the first row, export.
fn bench_edit_cycle(c: &mut Criterion) {
    let data = sample_csv(1_000);
    c.bench_function("edit_cycle_1000", |b| {
        b.iter(|| {
            let mut editor = GridEditor::new();
            editor.load(black_box(data.as_bytes())).unwrap();
            editor.add_row().unwrap();
            editor.delete_row(0).unwrap();
            editor.export().unwrap()
        })
    });
}

criterion_group!(benches, bench_parse, bench_export, bench_edit_cycle);
criterion_main!(benches);
