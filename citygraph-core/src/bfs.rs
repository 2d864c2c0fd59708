//! Bounded breadth-first search.
//!
//! Performance characteristics:
//! - O(n²) on the dense matrix (neighbor enumeration scans a full row)
//! - O(|V| + |E|) on an adjacency list
//!
//! Each call owns a fresh distance array and FIFO frontier, so independent
//! traversals over the same graph never share mutable state.

use std::collections::{BTreeSet, VecDeque};

use crate::common::GraphTraversal;
use crate::error::{CityGraphError, CityGraphResult};

/// Outcome of one bounded traversal (0-based indices throughout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsResult {
    /// Node the traversal started from
    pub source: usize,
    /// Edge bound the traversal ran with
    pub max_distance: usize,
    /// Shortest hop count per node; `None` when not discovered within the bound
    pub distances: Vec<Option<usize>>,
    /// Nodes at distance `1..=max_distance`; never contains `source`
    pub reachable: BTreeSet<usize>,
}

impl BfsResult {
    /// Shortest hop count to `node`, if discovered.
    pub fn distance(&self, node: usize) -> Option<usize> {
        self.distances.get(node).copied().flatten()
    }

    /// True if `node` was discovered at a positive distance.
    pub fn is_reachable(&self, node: usize) -> bool {
        self.reachable.contains(&node)
    }

    /// Distances with the conventional `-1` marker for undiscovered nodes.
    pub fn distances_with_marker(&self) -> Vec<i64> {
        self.distances
            .iter()
            .map(|d| d.map_or(-1, |d| d as i64))
            .collect()
    }
}

/// Runs BFS from `source`, never expanding nodes at `max_distance` or beyond.
///
/// `reachable` holds exactly the nodes whose shortest distance from `source`
/// lies in `1..=max_distance`. The result is independent of neighbor order.
///
/// # Errors
/// `InvalidArgument` if `source` is not a node of `graph`.
pub fn bounded_reach<G>(graph: &G, source: usize, max_distance: usize) -> CityGraphResult<BfsResult>
where
    G: GraphTraversal + ?Sized,
{
    let n = graph.node_count();
    if !graph.contains_node(source) {
        return Err(CityGraphError::invalid_argument(format!(
            "BFS source {} is out of range for {} nodes",
            source, n
        )));
    }

    let mut distances: Vec<Option<usize>> = vec![None; n];
    let mut reachable = BTreeSet::new();
    let mut queue = VecDeque::new();

    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let depth = distances[current].unwrap_or(0);
        if depth >= max_distance {
            continue;
        }

        for neighbor in graph.neighbors(current) {
            if neighbor < n && distances[neighbor].is_none() {
                distances[neighbor] = Some(depth + 1);
                reachable.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    tracing::trace!(
        source,
        max_distance,
        reached = reachable.len(),
        "bounded BFS finished"
    );

    Ok(BfsResult {
        source,
        max_distance,
        distances,
        reachable,
    })
}
