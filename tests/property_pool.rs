// tests/property_pool.rs

use std::collections::VecDeque;

use proptest::prelude::*;

use buildgraph::graph::{EdgeId, Pool, Rule};
use buildgraph::scheduler::Scheduler;
use buildgraph::state::State;

// Strategy: a pool depth and a list of edge weights that each fit the pool
// on their own (an edge heavier than the whole pool could never run).
fn pool_workload_strategy() -> impl Strategy<Value = (u32, Vec<u32>)> {
    (2u32..=6).prop_flat_map(|depth| {
        let weights = proptest::collection::vec(1u32..=depth, 1..24);
        (Just(depth), weights)
    })
}

proptest! {
    /// Drive a full admit/delay/finish cycle through one bounded pool and
    /// check that weighted usage never exceeds the depth, that every edge is
    /// admitted exactly once, and that delayed edges are released in the
    /// order they were delayed.
    #[test]
    fn pool_usage_never_exceeds_depth_and_fifo_holds(
        (depth, weights) in pool_workload_strategy()
    ) {
        let mut state = State::new();
        let rule = state.add_rule(Rule::new("work", "work $out"));
        let pool = state.add_pool(Pool::new("gated", depth));

        let edges: Vec<EdgeId> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let edge = state.add_edge(rule, pool);
                state.add_out(edge, &format!("out{i}"));
                state.edge_mut(edge).set_weight(w);
                edge
            })
            .collect();

        let mut scheduler = Scheduler::new();
        let mut running: VecDeque<EdgeId> = VecDeque::new();
        let mut delay_order: Vec<EdgeId> = Vec::new();
        let mut release_order: Vec<EdgeId> = Vec::new();
        let mut admitted = 0usize;

        // All edges become otherwise-ready in creation order.
        for &edge in &edges {
            let weight = state.edge(edge).weight();
            if state.pool(pool).can_admit(weight) {
                state.edge_scheduled(edge);
                scheduler.schedule(edge, weight);
            } else {
                state.delay_edge(edge);
                delay_order.push(edge);
            }
            prop_assert!(state.pool(pool).current_use() <= depth);
        }

        // Simulation loop: dispatch everything ready, finish the oldest
        // running edge, release what now fits.
        let mut steps = 0;
        loop {
            while let Some(edge) = scheduler.next_unit() {
                running.push_back(edge);
                admitted += 1;
            }
            let Some(done) = running.pop_front() else { break };
            state.edge_finished(done);

            let mut released: Vec<EdgeId> = Vec::new();
            state.retrieve_ready_edges(pool, &mut released);
            prop_assert!(state.pool(pool).current_use() <= depth);

            for edge in released {
                release_order.push(edge);
                scheduler.schedule(edge, state.edge(edge).weight());
            }

            steps += 1;
            prop_assert!(steps <= edges.len() * 2, "simulation failed to terminate");
        }

        prop_assert_eq!(admitted, edges.len());
        prop_assert_eq!(state.pool(pool).current_use(), 0);
        prop_assert_eq!(state.pool(pool).delayed_count(), 0);
        // Delayed edges came back out in exactly the order they went in.
        prop_assert_eq!(release_order, delay_order);
    }
}
