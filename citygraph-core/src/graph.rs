//! Alternative graph representations derived from a validated matrix.
//!
//! - [`AdjacencyList`]: indexed array of neighbor vectors, O(|V| + |E|) BFS
//! - [`to_graphmap`]: petgraph `UnGraphMap` used for rendering
//!
//! Both are built from an [`AdjacencyMatrix`] and never outlive a query.

use petgraph::graphmap::UnGraphMap;

use crate::common::GraphTraversal;
use crate::error::{CityGraphError, CityGraphResult};
use crate::matrix::AdjacencyMatrix;

/// Undirected graph as one neighbor vector per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyList {
    /// Builds a list from raw neighbor vectors.
    ///
    /// Rejects out-of-range indices and one-sided edges, mirroring the
    /// symmetry rule the matrix validator enforces.
    pub fn new(neighbors: Vec<Vec<usize>>) -> CityGraphResult<Self> {
        let n = neighbors.len();
        for (u, list) in neighbors.iter().enumerate() {
            for &v in list {
                if v >= n {
                    return Err(CityGraphError::invalid_argument(format!(
                        "neighbor {} of node {} is out of range for {} nodes",
                        v, u, n
                    )));
                }
                if !neighbors[v].contains(&u) {
                    return Err(CityGraphError::AsymmetricMatrix { row: u, col: v });
                }
            }
        }
        Ok(Self { neighbors })
    }
}

impl From<&AdjacencyMatrix> for AdjacencyList {
    fn from(matrix: &AdjacencyMatrix) -> Self {
        let neighbors = (0..matrix.size())
            .map(|u| matrix.neighbors(u))
            .collect();
        Self { neighbors }
    }
}

impl GraphTraversal for AdjacencyList {
    fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.neighbors.get(node).cloned().unwrap_or_default()
    }
}

/// Builds a petgraph `UnGraphMap` with every city as a node (0-based).
///
/// Isolated cities are kept as nodes; self-loops are dropped.
pub fn to_graphmap(matrix: &AdjacencyMatrix) -> UnGraphMap<usize, ()> {
    let mut g = UnGraphMap::with_capacity(matrix.size(), matrix.edge_count());

    for city in 0..matrix.size() {
        g.add_node(city);
    }
    for (a, b) in matrix.edges() {
        g.add_edge(a, b, ());
    }

    g
}
