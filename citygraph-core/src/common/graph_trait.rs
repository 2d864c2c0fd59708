//! Shared graph traversal abstraction.
//!
//! Provides a common interface over the city graph representations
//! (dense matrix, adjacency list) so the BFS engine is written once.

use crate::bfs::{bounded_reach, BfsResult};
use crate::error::CityGraphResult;

/// Trait for graphs whose nodes are the dense indices `0..node_count()`.
///
/// # Example
/// ```ignore
/// impl GraphTraversal for AdjacencyList {
///     fn node_count(&self) -> usize {
///         self.neighbors.len()
///     }
///
///     fn neighbors(&self, node: usize) -> Vec<usize> {
///         self.neighbors[node].clone()
///     }
/// }
///
/// // Use default bounded BFS implementation
/// let result = list.reach_within(0, 2)?;
/// ```
pub trait GraphTraversal {
    /// Number of nodes; valid indices are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Returns the neighbors of `node`, in any order.
    ///
    /// Callers guarantee `node < node_count()`.
    fn neighbors(&self, node: usize) -> Vec<usize>;

    /// Checks if the graph contains a node.
    fn contains_node(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Bounded BFS from `source`, stopping at `max_distance` edges.
    fn reach_within(&self, source: usize, max_distance: usize) -> CityGraphResult<BfsResult>
    where
        Self: Sized,
    {
        bounded_reach(self, source, max_distance)
    }
}
