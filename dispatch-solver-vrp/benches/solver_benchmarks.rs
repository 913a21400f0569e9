//! Criterion benchmarks for the VRP engine.
//!
//! Measures end-to-end solve time across problem sizes (50, 100, 200
//! locations) to track performance and detect regressions. The search is
//! capped by generations and a short time budget so each sample stays
//! bounded.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package dispatch-solver-vrp
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dispatch_core::solve_request;
use dispatch_solver_vrp::{VrpEngine, VrpEngineConfig};


use bench_support::{BENCHMARK_SEED, generate_request};

/// Problem sizes to benchmark, in locations.
const PROBLEM_SIZES: &[usize] = &[50, 100, 200];

/// Vehicles per benchmark request.
const FLEET_SIZE: usize = 4;

fn bench_engine() -> VrpEngine {
    VrpEngine::with_config(VrpEngineConfig {
        max_generations: Some(300),
        max_time_override: Some(2),
    })
}

/// Benchmark solve times for various problem sizes.
fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");

    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));

    let engine = bench_engine();
    for &size in PROBLEM_SIZES {
        // Pre-generate inputs outside the benchmark loop.
        let request = generate_request(size, FLEET_SIZE, BENCHMARK_SEED);

        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::new("locations", size), &request, |b, input| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking solve performance, result is intentionally discarded"
                )]
                let _ = solve_request(input, &engine);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
