//! Benchmarks for the pxsvg pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pxsvg::export::{encode_css, encode_flat, encode_optimized, Canvas, LayerPixels};
use pxsvg::types::Colour;
use pxsvg::vector::{find_regions, region_to_path, ClassTable, Coord, NamedColours};

/// A checkerboard of 4x4 tiles in two colours with a transparent border.
fn tiles(size: u32) -> LayerPixels {
    let red = Colour::rgb(255, 0, 0);
    let blue = Colour::rgb(0, 0, 255);

    let mut pixels = Vec::new();
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            let colour = if (x / 4 + y / 4) % 2 == 0 { red } else { blue };
            pixels.push(((x, y), colour));
        }
    }

    LayerPixels {
        name: "tiles".to_string(),
        pixels,
    }
}

fn coords(layer: &LayerPixels) -> Vec<Coord> {
    layer.pixels.iter().map(|(c, _)| *c).collect()
}

// -- Vectorization benchmarks --

fn bench_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector");

    let small = coords(&tiles(16));
    let large = coords(&tiles(256));

    group.bench_function("find_regions_16", |b| {
        b.iter(|| find_regions(black_box(&small), 16, 16))
    });

    group.bench_function("find_regions_256", |b| {
        b.iter(|| find_regions(black_box(&large), 256, 256))
    });

    let regions = find_regions(&large, 256, 256);
    group.bench_function("region_to_path_256", |b| {
        b.iter(|| {
            regions
                .iter()
                .map(|r| region_to_path(black_box(r)).len())
                .sum::<usize>()
        })
    });

    group.finish();
}

// -- Encoder benchmarks --

fn bench_encoders(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoders");

    let canvas = Canvas {
        width: 64,
        height: 64,
    };
    let layers = vec![tiles(64)];

    group.bench_function("flat_64", |b| {
        b.iter(|| encode_flat(canvas, black_box(&layers), true))
    });

    group.bench_function("optimized_64", |b| {
        b.iter(|| encode_optimized(canvas, black_box(&layers), true))
    });

    group.bench_function("css_64", |b| {
        b.iter(|| {
            let mut classes = ClassTable::new(NamedColours::default());
            encode_css(canvas, black_box(&layers), true, &mut classes)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_vector, bench_encoders);
criterion_main!(benches);
