// tests/scheduler_dispatch.rs

use buildgraph::graph::{EdgeId, Rule};
use buildgraph::scheduler::Scheduler;
use buildgraph::state::State;

fn edges(n: usize) -> (State, Vec<EdgeId>) {
    let mut state = State::new();
    let rule = state.add_rule(Rule::new("work", "work $out"));
    let pool = state.lookup_pool("").unwrap();
    let edges = (0..n)
        .map(|i| {
            let edge = state.add_edge(rule, pool);
            state.add_out(edge, &format!("out{i}"));
            edge
        })
        .collect();
    (state, edges)
}

#[test]
fn test_schedule_is_idempotent() {
    let (_state, edges) = edges(1);
    let mut scheduler = Scheduler::new();

    scheduler.schedule(edges[0], 1);
    scheduler.schedule(edges[0], 1);
    scheduler.schedule(edges[0], 1);

    assert_eq!(scheduler.units_waiting(), 1);
    assert_eq!(scheduler.next_unit(), Some(edges[0]));
    assert_eq!(scheduler.units_waiting(), 0);
    assert_eq!(scheduler.next_unit(), None);
}

#[test]
fn test_next_unit_on_empty_returns_none() {
    let mut scheduler = Scheduler::new();
    assert_eq!(scheduler.next_unit(), None);
    assert_eq!(scheduler.next_unit(), None);
    assert_eq!(scheduler.units_waiting(), 0);
}

#[test]
fn test_dispatch_is_heaviest_first_then_fifo() {
    let (_state, edges) = edges(4);
    let mut scheduler = Scheduler::new();

    for (edge, weight) in edges.iter().zip([5u32, 1, 5, 3]) {
        scheduler.schedule(*edge, weight);
    }

    // Both weight-5 edges first, in schedule order, then 3, then 1.
    assert_eq!(scheduler.next_unit(), Some(edges[0]));
    assert_eq!(scheduler.next_unit(), Some(edges[2]));
    assert_eq!(scheduler.next_unit(), Some(edges[3]));
    assert_eq!(scheduler.next_unit(), Some(edges[1]));
    assert_eq!(scheduler.next_unit(), None);
}

#[test]
fn test_units_waiting_tracks_membership() {
    let (_state, edge_ids) = edges(3);
    let mut scheduler = Scheduler::new();

    scheduler.schedule(edge_ids[0], 1);
    scheduler.schedule(edge_ids[1], 2);
    assert_eq!(scheduler.units_waiting(), 2);

    scheduler.next_unit();
    assert_eq!(scheduler.units_waiting(), 1);

    scheduler.schedule(edge_ids[2], 1);
    assert_eq!(scheduler.units_waiting(), 2);
}

#[test]
fn test_edge_can_be_rescheduled_after_dispatch() {
    let (_state, edges) = edges(1);
    let mut scheduler = Scheduler::new();

    scheduler.schedule(edges[0], 2);
    assert_eq!(scheduler.next_unit(), Some(edges[0]));

    // A later traversal may make the same edge ready again.
    scheduler.schedule(edges[0], 2);
    assert_eq!(scheduler.units_waiting(), 1);
    assert_eq!(scheduler.next_unit(), Some(edges[0]));
}
