//! Benchmark for placement parsing and figure rendering.

#![allow(clippy::unwrap_used)]

use std::fmt::Write;
use std::io::Cursor;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use placement_viz::placement::parse_records;
use placement_viz::prelude::*;

fn placement_text(size: usize) -> String {
    let mut text = String::with_capacity(size * 20);
    for i in 0..size {
        let prefix = if i % 10 == 0 { 'p' } else { 'c' };
        let _ = writeln!(text, "{prefix}{i} {:.3} {:.3}", (i % 110) as f64 * 0.97, (i / 110 % 105) as f64 * 0.95);
    }
    text
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_classify");

    for size in [1_000, 10_000, 100_000] {
        let text = placement_text(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let records = parse_records(Cursor::new(black_box(text.as_bytes())), Path::new("bench")).unwrap();
                Placement::from_records(records, Classifier::PadPrefix, &ValidityRegion::default())
            });
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_plot");

    for size in [1_000, 10_000, 100_000] {
        let records = parse_records(Cursor::new(placement_text(size)), Path::new("bench")).unwrap();
        let placement = Placement::from_records(records, Classifier::PadPrefix, &ValidityRegion::default());
        let plot = Plotter::new(Classifier::PadPrefix).figure(&placement, "bench").unwrap();

        group.bench_with_input(BenchmarkId::new("png", size), &plot, |b, plot| {
            b.iter(|| black_box(plot).to_framebuffer().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("svg", size), &plot, |b, plot| {
            b.iter(|| black_box(plot).to_svg().unwrap().render());
        });
    }

    group.finish();
}

criterion_group!(benches, parse_benchmark, render_benchmark);
criterion_main!(benches);
