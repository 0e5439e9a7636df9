use super::*;
use proptest::prelude::*;

/// 0 → 1 → 2 carrying 3 units; a forest, hence optimal as given.
fn loaded_path() -> FlowNetwork {
    FlowNetwork::new(
        3,
        vec![Edge::with_flow(0, 1, 2, 3), Edge::with_flow(1, 2, 1, 3)],
    )
}

#[test]
fn empty_network_is_bounded_with_zero_cost() {
    let net = FlowNetwork::empty(0);
    assert!(net.is_bounded());
    assert_eq!(net.cost(), 0);
    assert!(net.potentials().is_empty());

    let net = FlowNetwork::empty(4);
    assert_eq!(net.potentials()[0], 0);
    assert!(net.potentials()[1..].iter().all(|&p| p == UNREACHABLE));
}

#[test]
fn potentials_are_shortest_distances_from_reference() {
    let net = FlowNetwork::new(
        3,
        vec![Edge::new(0, 1, 5), Edge::new(0, 2, 3), Edge::new(2, 1, 1)],
    );
    assert_eq!(net.potentials(), &[0, 4, 3]);
    assert!(net.check_duality());
}

#[test]
fn closing_a_finite_cycle_cancels_it() {
    let mut net = loaded_path();
    assert_eq!(net.cost(), -9);
    let excess_before = net.excess(1);

    // Path 2 ⇝ 0 over the two back-arcs costs −3; with the new arc the cycle
    // costs −4 and the bottleneck is 3.
    net.add_edge(0, 2, -1);
    assert!(net.is_bounded());
    assert_eq!(net.cost(), -9 - 3 * (-4));
    assert_eq!(net.excess(1), excess_before);
    assert_eq!(net.edges()[0].flow, 0);
    assert_eq!(net.edges()[1].flow, 0);
    assert_eq!(net.edges()[2].flow, 3);
    assert!(net.check_cost_bookkeeping());
    assert!(net.check_duality());
    assert_eq!(net.potentials(), &[0, 2, -1]);
}

#[test]
fn forward_only_negative_cycle_is_unbounded_forever() {
    let mut net = FlowNetwork::new(3, vec![Edge::new(0, 1, 1), Edge::new(1, 2, 1)]);
    assert_eq!(net.try_edge(2, 0, -4), None);
    assert!(net.is_bounded(), "try_edge must not mutate");

    net.add_edge(2, 0, -4);
    assert!(!net.is_bounded());
    net.add_edge(0, 2, 100);
    net.add_edge(2, 1, 50);
    assert!(!net.is_bounded());
    assert_eq!(net.try_edge(1, 0, 10), None);
    assert!(net.check_cost_bookkeeping());
}

#[test]
fn repeated_edge_that_is_not_cheaper_is_a_no_op() {
    let mut net = loaded_path();
    net.add_edge(0, 2, -1);
    let cost = net.cost();
    let edges = net.edges().len();
    net.add_edge(0, 2, -1);
    net.add_edge(0, 2, 7);
    assert_eq!(net.cost(), cost);
    assert_eq!(net.edges().len(), edges);
}

#[test]
fn cheaper_duplicate_takes_over_the_slot_and_its_flow() {
    let mut net = loaded_path();
    net.add_edge(0, 2, -1);
    net.add_edge(0, 2, -2);
    assert_eq!(net.edges().len(), 3);
    assert_eq!(net.edges()[2], Edge::with_flow(0, 2, -2, 3));
    assert_eq!(net.cost(), 6);
    assert!(net.check_cost_bookkeeping());
    assert!(net.check_duality());
}

#[test]
fn try_edge_projects_the_cost_of_add_edge() {
    let net = loaded_path();
    let projected = net.try_edge(0, 2, -1);
    assert_eq!(projected, Some(3));
    assert_eq!(net.cost(), -9);

    // No improving cycle: projection is the current cost.
    assert_eq!(net.try_edge(2, 0, 10), Some(-9));

    let mut added = net.clone();
    added.add_edge(0, 2, -1);
    assert_eq!(Some(added.cost()), projected);
}

#[test]
fn batch_insertion_matches_one_by_one() {
    let arcs = [(0, 2, -1), (2, 1, 4), (1, 0, -1)];
    let mut one = loaded_path();
    for (s, d, c) in arcs {
        one.add_edge(s, d, c);
    }
    let mut batch = loaded_path();
    batch.add_edges(arcs);
    assert_eq!(one.cost(), batch.cost());
    assert_eq!(one.is_bounded(), batch.is_bounded());
    assert_eq!(one.potentials(), batch.potentials());
}

#[test]
#[should_panic(expected = "self-loop")]
fn self_loop_is_rejected() {
    let mut net = FlowNetwork::empty(2);
    net.add_edge(1, 1, 0);
}

#[test]
#[should_panic(expected = "out of range")]
fn unknown_node_is_rejected() {
    let mut net = FlowNetwork::empty(2);
    net.add_edge(0, 2, 0);
}

fn arb_network() -> impl Strategy<Value = (usize, Vec<(i64, i64)>, Vec<(usize, usize, i64)>)> {
    (3usize..7).prop_flat_map(|n| {
        let path = prop::collection::vec((-3i64..6, 0i64..4), n - 1);
        let arcs = prop::collection::vec((0..n, 1..n, -6i64..8), 1..14).prop_map(move |raw| {
            raw.into_iter()
                .map(|(s, k, c)| (s, (s + k) % n, c))
                .collect::<Vec<_>>()
        });
        (Just(n), path, arcs)
    })
}

fn build_path(n: usize, path: &[(i64, i64)]) -> FlowNetwork {
    let edges = path
        .iter()
        .enumerate()
        .map(|(k, &(cost, flow))| Edge::with_flow(k, k + 1, cost, flow))
        .collect();
    FlowNetwork::new(n, edges)
}

proptest! {
    #[test]
    fn invariants_hold_under_random_insertions((n, path, arcs) in arb_network()) {
        let mut net = build_path(n, &path);
        let excess: Vec<i64> = (0..n).map(|v| net.excess(v)).collect();
        let mut was_bounded = true;
        for (s, d, c) in arcs {
            let projected = net.try_edge(s, d, c);
            net.add_edge(s, d, c);

            prop_assert!(net.check_cost_bookkeeping());
            prop_assert!(net.check_duality());
            prop_assert!(was_bounded || !net.is_bounded());
            for v in 0..n {
                prop_assert_eq!(net.excess(v), excess[v]);
            }
            match projected {
                Some(k) => {
                    prop_assert!(net.is_bounded());
                    prop_assert_eq!(net.cost(), k);
                }
                None => prop_assert!(!net.is_bounded()),
            }
            was_bounded = net.is_bounded();
        }
    }

    #[test]
    fn repeated_insertion_leaves_cost_unchanged((n, path, arcs) in arb_network()) {
        let mut net = build_path(n, &path);
        for (s, d, c) in arcs {
            net.add_edge(s, d, c);
            let cost = net.cost();
            let bounded = net.is_bounded();
            net.add_edge(s, d, c);
            prop_assert_eq!(net.cost(), cost);
            prop_assert_eq!(net.is_bounded(), bounded);
        }
    }
}
