//! citygraph-core: bounded-hop reachability between two headquarters cities.
//!
//! Given an undirected city graph as a 0/1 adjacency matrix, finds every city
//! that both headquarters reach with at most `L` intermediate cities on the
//! way, or reports that there is none.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use citygraph_core::prelude::*;
//!
//! let matrix = load_graph("cities.txt", &MatrixLimits::default())?;
//! match ReachabilityAnalyzer::new(&matrix).find_common_cities(1, 5, 1)? {
//!     CommonCities::None => println!("-1"),
//!     CommonCities::Cities(cities) => println!("{:?}", cities),
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`matrix`]: Adjacency matrix and structural validation
//! - [`bfs`]: Bounded breadth-first search
//! - [`analyzer`]: Two-headquarters query, intersection and result policy
//! - [`trace`]: Observers recording intermediate sets
//! - [`graph`]: Adjacency-list and petgraph representations
//! - [`loader`]: Text graph source parsing
//! - [`report`]: Plain and JSON output
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `dot` (default): Graphviz DOT output
//! - `parallel` (default): Allow running both traversals on the rayon pool
//! - `full`: Enable all optional features

pub mod analyzer;
pub mod bfs;
pub mod common;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod logging;
pub mod matrix;
pub mod prelude;
pub mod report;
pub mod trace;

// Common trait re-exports
pub use common::GraphTraversal;

#[cfg(feature = "dot")]
pub mod visualize;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{CityGraphError, CityGraphResult, IoResultExt};

// Matrix and validation
pub use matrix::{validate_matrix, AdjacencyMatrix, MatrixLimits, DEFAULT_MAX_CITIES};

// Traversal
pub use bfs::{bounded_reach, BfsResult};
pub use graph::{to_graphmap, AdjacencyList};

// Analysis
pub use analyzer::{
    find_common_cities, AnalysisObserver, CommonCities, Headquarters, NoopObserver, Query,
    ReachabilityAnalyzer,
};
pub use trace::{QueryTrace, Tee, TracingObserver, TraversalTrace};

// Loading
pub use loader::{load_graph, parse_graph, DEFAULT_GRAPH_FILE};

// Configuration
pub use config::{load_config, CityGraphConfig, CONFIG_FILE};

// Logging
pub use logging::{init_structured_logging, init_verbose_logging};

// Reporting
pub use report::{print_json, print_plain, render_json, render_matrix, render_plain};

#[cfg(feature = "dot")]
pub use visualize::generate_dot;

#[cfg(test)]
mod tests;
