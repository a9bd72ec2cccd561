//! Candidate pair enumeration and stable distance sort benchmarks.
//!
//! Isolates the quadratic part of reconstruction: building every unordered
//! pair with its distance, then sorting the pairs closest-first.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use geonet_benches::{
    error::BenchSetupError,
    source::{SyntheticConfig, uniform_positions},
};
use geonet_core::{enumerate_pairs, sort_by_distance};

const SEED: u64 = 42;
const EXTENT: f64 = 1_000.0;
const NODE_COUNTS: &[usize] = &[100, 500, 1_000];

fn pairs_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("pairs");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let positions = uniform_positions(&SyntheticConfig {
            node_count,
            extent: EXTENT,
            seed: SEED,
        })?;
        let unsorted = enumerate_pairs(&positions)?;

        group.bench_with_input(
            BenchmarkId::new("enumerate", node_count),
            &positions,
            |b, positions| {
                b.iter(|| enumerate_pairs(positions));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("sort", node_count),
            &unsorted,
            |b, unsorted| {
                b.iter_batched(
                    || unsorted.clone(),
                    |mut pairs| sort_by_distance(&mut pairs),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
    Ok(())
}

fn pairs(c: &mut Criterion) {
    if let Err(err) = pairs_impl(c) {
        panic!("pairs benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pairs);
criterion_main!(benches);
