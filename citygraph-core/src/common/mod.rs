//! Common abstractions shared by the graph representations.

pub mod graph_trait;

pub use graph_trait::GraphTraversal;
