//! Adjacency matrix storage and structural validation.
//!
//! An [`AdjacencyMatrix`] can only be obtained through [`validate_matrix`]
//! (or the [`AdjacencyMatrix::from_rows`] shorthand), so every matrix that
//! reaches the BFS engine is square, binary, symmetric and within bounds.
//!
//! Checks run in a fixed order: size bound, shape, entries, symmetry. The
//! first failure wins.

use crate::common::GraphTraversal;
use crate::error::{CityGraphError, CityGraphResult};

/// Largest city count accepted unless configured otherwise.
pub const DEFAULT_MAX_CITIES: usize = 25;

/// Size bound applied by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLimits {
    /// Inclusive upper bound on the city count (lower bound is always 1).
    pub max_cities: usize,
}

impl MatrixLimits {
    /// Limits with a custom upper bound.
    ///
    /// Returns `InvalidArgument` for a bound of zero, since no graph could pass.
    pub fn new(max_cities: usize) -> CityGraphResult<Self> {
        if max_cities == 0 {
            return Err(CityGraphError::invalid_argument(
                "max_cities must be at least 1",
            ));
        }
        Ok(Self { max_cities })
    }

    /// Checks a declared city count against the bound.
    pub fn check_size(&self, size: i64) -> CityGraphResult<usize> {
        match usize::try_from(size) {
            Ok(n) if (1..=self.max_cities).contains(&n) => Ok(n),
            _ => Err(CityGraphError::SizeOutOfRange {
                size,
                max: self.max_cities,
            }),
        }
    }
}

impl Default for MatrixLimits {
    fn default() -> Self {
        Self {
            max_cities: DEFAULT_MAX_CITIES,
        }
    }
}

/// Validated, immutable n×n 0/1 matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Validates `rows` with the default limits, taking the row count as n.
    pub fn from_rows(rows: &[Vec<i64>]) -> CityGraphResult<Self> {
        validate_matrix(rows, rows.len() as i64, &MatrixLimits::default())
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True iff an edge joins `row` and `col` (0-based).
    ///
    /// Out-of-range coordinates have no edge.
    pub fn has_edge(&self, row: usize, col: usize) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        self.cells[row * self.size + col]
    }

    /// Undirected edges `(i, j)` with `i < j`; self-loops are skipped.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| {
            ((i + 1)..self.size)
                .filter(move |&j| self.has_edge(i, j))
                .map(move |j| (i, j))
        })
    }

    /// Number of undirected edges, excluding self-loops.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Row `i` as 0/1 values.
    pub fn row(&self, i: usize) -> impl Iterator<Item = u8> + '_ {
        let start = i.min(self.size) * self.size;
        let end = if i < self.size { start + self.size } else { start };
        self.cells[start..end].iter().map(|&c| u8::from(c))
    }
}

impl GraphTraversal for AdjacencyMatrix {
    fn node_count(&self) -> usize {
        self.size
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        (0..self.size).filter(|&v| self.has_edge(node, v)).collect()
    }
}

/// Validates raw matrix data against a declared size.
///
/// Returns the accepted matrix, or the first structural failure:
/// `SizeOutOfRange`, `NonSquare`, `InvalidEntry`, then `AsymmetricMatrix`.
pub fn validate_matrix(
    rows: &[Vec<i64>],
    declared_size: i64,
    limits: &MatrixLimits,
) -> CityGraphResult<AdjacencyMatrix> {
    let n = limits.check_size(declared_size)?;

    if rows.len() != n {
        return Err(CityGraphError::NonSquare {
            expected: n,
            detail: format!("found {} rows", rows.len()),
        });
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(CityGraphError::NonSquare {
            expected: n,
            detail: format!("row {} has {} entries", i, row.len()),
        });
    }

    let mut cells = Vec::with_capacity(n * n);
    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            match value {
                0 => cells.push(false),
                1 => cells.push(true),
                _ => {
                    return Err(CityGraphError::InvalidEntry {
                        row: i,
                        col: j,
                        value,
                    })
                }
            }
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if cells[i * n + j] != cells[j * n + i] {
                return Err(CityGraphError::AsymmetricMatrix { row: i, col: j });
            }
        }
    }

    tracing::debug!(cities = n, "adjacency matrix accepted");
    Ok(AdjacencyMatrix { size: n, cells })
}
