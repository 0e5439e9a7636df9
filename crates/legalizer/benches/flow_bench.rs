//! Criterion microbenches for the incremental flow network.
//!
//! - `add_edge`: one insertion into a loaded chain (clone + cancel).
//! - `try_edge`: the same arc probed without mutating the network.
//! - `legalizer_build`: root construction on generated instances.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use legalizer::flow::{Edge, FlowNetwork};
use legalizer::instance::{draw_instance, InstanceCfg, ReplayToken};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Chain `0 → 1 → … → n−1` carrying flow, plus random shortcut arcs.
fn loaded_chain(n: usize, shortcuts: usize, seed: u64) -> FlowNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let seed_arcs: Vec<Edge> = (0..n - 1)
        .map(|i| Edge::with_flow(i, i + 1, rng.gen_range(1..10), rng.gen_range(1..4)))
        .collect();
    let mut net = FlowNetwork::new(n, seed_arcs);
    let arcs: Vec<(usize, usize, i64)> = (0..shortcuts)
        .map(|_| {
            let s = rng.gen_range(0..n);
            let d = (s + rng.gen_range(1..n)) % n;
            (s, d, rng.gen_range(0..40))
        })
        .collect();
    net.add_edges(arcs);
    net
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow");
    for &n in &[16usize, 64, 256] {
        let base = loaded_chain(n, n, 42);
        let arc = (n - 1, 0, -(n as i64));
        group.bench_function(BenchmarkId::new("add_edge", n), |b| {
            b.iter_batched(
                || base.clone(),
                |mut net| {
                    net.add_edge(arc.0, arc.1, arc.2);
                    net.cost()
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("try_edge", n), |b| {
            b.iter(|| base.try_edge(arc.0, arc.1, arc.2))
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("legalizer_build");
    for &cells in &[8usize, 32] {
        let cfg = InstanceCfg {
            cells,
            nets: cells,
            obstacles: cells / 8,
            ..InstanceCfg::default()
        };
        let inst = draw_instance(cfg, ReplayToken::new(3, cells as u64));
        group.bench_function(BenchmarkId::new("new", cells), |b| {
            b.iter(|| inst.legalizer().map(|lg| lg.cost()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_build);
criterion_main!(benches);
