use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use dev_utils::get_example_scenario;
use stochastic_csa::{Planner, PlannerConfig};

fn plan_benchmark(c: &mut Criterion) {
    let (store, origin, start_time, destination) = get_example_scenario();
    let planner = Planner::new(&store);
    c.bench_function("Planner::plan", |b| {
        b.iter(|| planner.plan(black_box(&origin), black_box(&destination), black_box(start_time), black_box(1.0)))
    });
}

fn scan_benchmark(c: &mut Criterion) {
    let (store, origin, start_time, _) = get_example_scenario();
    let origin_idx = store.station_of(&origin).unwrap();
    let config = PlannerConfig::default();
    c.bench_function("Scan::run", |b| {
        b.iter(|| stochastic_csa::Scan::run(black_box(&store), black_box(origin_idx), black_box(start_time), black_box(&config), None))
    });
}

criterion_group!(benches, plan_benchmark, scan_benchmark);
criterion_main!(benches);
