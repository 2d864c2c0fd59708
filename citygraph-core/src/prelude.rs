//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use citygraph_core::prelude::*;
//! ```

// Errors
pub use crate::error::{CityGraphError, CityGraphResult};

// Graph data and validation
pub use crate::matrix::{validate_matrix, AdjacencyMatrix, MatrixLimits};
pub use crate::loader::{load_graph, parse_graph};

// Traversal and analysis
pub use crate::analyzer::{find_common_cities, CommonCities, Query, ReachabilityAnalyzer};
pub use crate::bfs::{bounded_reach, BfsResult};
pub use crate::common::GraphTraversal;

// Observability
pub use crate::trace::{QueryTrace, TracingObserver};

// Configuration
pub use crate::config::{load_config, CityGraphConfig};
