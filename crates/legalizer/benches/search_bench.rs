//! End-to-end branch-and-bound on generated instances.
//!
//! The node limit keeps each iteration bounded; the stall budget is set high
//! so timing noise never changes the amount of work.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use legalizer::instance::{draw_instance, InstanceCfg, ReplayToken};
use legalizer::legalizer::BranchRule;
use legalizer::search::{solve, SearchCfg};

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    let inst = draw_instance(
        InstanceCfg {
            cells: 6,
            nets: 5,
            obstacles: 1,
            ..InstanceCfg::default()
        },
        ReplayToken::new(2024, 0),
    );
    let Ok(root) = inst.legalizer() else {
        return;
    };
    for rule in [BranchRule::Area, BranchRule::MaxDisplacement, BranchRule::CostProbe] {
        let cfg = SearchCfg {
            rule,
            stall_budget: Duration::from_secs(3600),
            node_limit: Some(2_000),
            baseline_cost: inst.baseline_cost(),
            ..SearchCfg::default()
        };
        group.bench_function(BenchmarkId::new("solve", rule), |b| {
            b.iter(|| solve(&root, &cfg).stats.evaluated)
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
