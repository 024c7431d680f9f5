//! # Musical Path Finder
//!
//! Finds the cheapest chain of shared taste between two nodes of the
//! preference graph, e.g. `Nuevo → Pop → Juan`.
//!
//! Edges are read in both directions and cost `1 - affinity`, so a strong
//! affinity is a cheap step. Dijkstra's algorithm then turns "follow the
//! strongest tastes" into a plain shortest-path search.
//!
//! Each call is a single independent run; nothing is kept between calls.

use crate::graph::GraphStore;
use log::{debug, trace};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// A route through the graph with its accumulated cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicalPath {
    pub nodes: Vec<String>,
    pub cost: f64,
}

impl MusicalPath {
    /// Number of edges walked.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

impl std::fmt::Display for MusicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.2})", self.nodes.join(" → "), self.cost)
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the cheapest node first.
///
/// Equal costs pop in ascending name order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier<'a> {
    cost: f64,
    node: &'a str,
}

impl Eq for Frontier<'_> {}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `start` to `end`, or `None` when no route exists.
///
/// `start == end` yields `[start]` at cost `0.0` without searching. A node
/// missing from the graph is simply unreachable.
#[must_use]
pub fn shortest_path(store: &GraphStore, start: &str, end: &str) -> Option<MusicalPath> {
    if start == end {
        return Some(MusicalPath { nodes: vec![start.to_string()], cost: 0.0 });
    }
    if !store.contains_node(start) || !store.contains_node(end) {
        debug!("No path `{start}' → `{end}': node not in graph");
        return None;
    }

    let mut distances: HashMap<&str, f64> = HashMap::from([(start, 0.0)]);
    let mut predecessors: HashMap<&str, &str> = HashMap::new();
    let mut heap = BinaryHeap::from([Frontier { cost: 0.0, node: start }]);

    while let Some(Frontier { cost, node }) = heap.pop() {
        if node == end {
            break;
        }
        if distances.get(node).is_some_and(|&best| cost > best) {
            continue;
        }

        for neighbor in store.neighbors(node) {
            let candidate = cost + neighbor.weight.cost();
            let improved = distances
                .get(neighbor.node)
                .map_or(true, |&known| candidate < known);

            if improved {
                trace!("Relaxing `{}' via `{node}': {candidate:.3}", neighbor.node);
                distances.insert(neighbor.node, candidate);
                predecessors.insert(neighbor.node, node);
                heap.push(Frontier { cost: candidate, node: neighbor.node });
            }
        }
    }

    let cost = *distances.get(end)?;
    let mut nodes = vec![end.to_string()];
    let mut current = end;
    while current != start {
        current = *predecessors.get(current)?;
        nodes.push(current.to_string());
    }
    nodes.reverse();

    debug!("Path `{start}' → `{end}': {} hop(s), cost {cost:.3}", nodes.len() - 1);
    Some(MusicalPath { nodes, cost })
}
