//! Criterion benchmarks for Tetrogrid critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Grid: text parsing of single grids and sequences
//! - Edges: neighbor classification over a whole grid
//! - Renderer: grid to image rendering in both styles

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tetrogrid::edges::{classify_edges, foreground_edges};
use tetrogrid::grid::{parse_grid, parse_grid_sequence, Grid};
use tetrogrid::renderer::{render_grid, RenderOptions, RenderStyle};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Grid text tiled with 2x2 squares; region ids start at 1
fn make_grid_text(size: usize) -> String {
    (0..size)
        .map(|r| {
            (0..size)
                .map(|c| ((r / 2) * size.div_ceil(2) + c / 2 + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sequence text with `steps` grids, each filling one more row
fn make_sequence_text(size: usize, steps: usize) -> String {
    let full = make_grid_text(size);
    let lines: Vec<&str> = full.lines().collect();
    let zero_row = vec!["0"; size].join(" ");
    (0..steps)
        .map(|step| {
            (0..size)
                .map(|r| {
                    if r < step % (size + 1) {
                        lines[r].to_string()
                    } else {
                        zero_row.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn make_grid(size: usize) -> Grid {
    parse_grid(&make_grid_text(size)).unwrap()
}

// =============================================================================
// Parsing
// =============================================================================

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for size in [8, 32, 128].iter() {
        let text = make_grid_text(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_grid", size), &text, |b, text| {
            b.iter(|| parse_grid(black_box(text)))
        });
    }

    let sequence = make_sequence_text(32, 100);
    group.throughput(Throughput::Bytes(sequence.len() as u64));
    group.bench_function("parse_sequence_32x32_100_steps", |b| {
        b.iter(|| parse_grid_sequence(black_box(&sequence)))
    });

    group.finish();
}

// =============================================================================
// Edge classification
// =============================================================================

fn bench_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("edges");

    let grid = make_grid(64);
    group.bench_function("classify_single_cell", |b| {
        b.iter(|| classify_edges(black_box(&grid), 31, 31))
    });

    for size in [16, 64, 256].iter() {
        let grid = make_grid(*size);
        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::new("foreground_edges", size), &grid, |b, grid| {
            b.iter(|| foreground_edges(black_box(grid)).count())
        });
    }

    group.finish();
}

// =============================================================================
// Rendering
// =============================================================================

fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer");

    let outline = RenderOptions::default();
    let color = RenderOptions { style: RenderStyle::Color, ..RenderOptions::default() };

    for size in [8, 32, 64].iter() {
        let grid = make_grid(*size);
        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::new("outline", size), &grid, |b, grid| {
            b.iter(|| render_grid(black_box(grid), &outline))
        });
        group.bench_with_input(BenchmarkId::new("color", size), &grid, |b, grid| {
            b.iter(|| render_grid(black_box(grid), &color))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parser, bench_edges, bench_renderer);
criterion_main!(benches);
