use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use dev_utils::get_example_scenario;
use stochastic_csa::Planner;

fn isochrone_benchmark(c: &mut Criterion) {
    let (store, origin, start_time, _) = get_example_scenario();
    let planner = Planner::new(&store);
    fastrand::seed(7);
    let tolerance = 0.5 + fastrand::f64() * 0.5;
    c.bench_function("Planner::times_from", |b| {
        b.iter(|| planner.times_from(black_box(&origin), black_box(start_time), black_box(tolerance)))
    });
}

criterion_group!(benches, isochrone_benchmark);
criterion_main!(benches);
