//! Criterion benchmarks for the u-evolve engine.
//!
//! Measures generation-loop overhead on the bundled problems: curve
//! approximation (vector genome), root search (scalar genome), and word
//! matching (symbolic genome with a convergence predicate).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_evolve::ga::{Alphabet, EvolutionConfig, Interval};
use u_evolve::problems::{approximate, find_root, float_range, generate_word};

fn config(population: usize) -> EvolutionConfig {
    EvolutionConfig::default()
        .with_population_size(population)
        .with_seed(42)
        .with_progress_interval(0)
}

fn bench_curve_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_fit");
    group.sample_size(10);

    let bounds = Interval::new(-10.0, 10.0).unwrap();
    for (step, pop, gen) in [(0.5f64, 100usize, 50usize), (0.1, 300, 50), (0.05, 300, 20)] {
        let grid = float_range(-2.0, 2.0, step).unwrap();
        let points = grid.len();
        group.bench_with_input(
            BenchmarkId::new(format!("n{points}_p{pop}_g{gen}"), points),
            &grid,
            |b, grid| {
                b.iter(|| {
                    let result =
                        approximate(|x| x * x, black_box(grid.clone()), bounds, gen, config(pop));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_root_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_search");
    group.sample_size(10);

    let region = Interval::new(-0.5, 15.0).unwrap();
    for &pop in &[100usize, 300, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(pop), &pop, |b, &pop| {
            b.iter(|| {
                let result = find_root(|x: f64| (x + 1.0).ln() - 2.25, region, 50, config(pop));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_word_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_match");
    group.sample_size(10);

    let alphabet = Alphabet::latin_lowercase();
    for word in ["cat", "hello"] {
        let cfg = config(300)
            .with_mutation_rate(1.0)
            .with_generation_ceiling(20_000);
        group.bench_with_input(BenchmarkId::from_parameter(word), &cfg, |b, cfg| {
            b.iter(|| {
                let result = generate_word(black_box(word), &alphabet, cfg.clone());
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_curve_fit, bench_root_search, bench_word_match);
criterion_main!(benches);
