//! Graphviz DOT visualization of a city graph and one query's answer.
//!
//! - headquarters are gold
//! - common cities are lightgreen
//! - every other city is lightgrey
//!
//! Nodes are labeled with 1-based city numbers; each undirected edge is
//! written once.

use std::fmt::Write;

use crate::analyzer::{CommonCities, Query};
use crate::graph::to_graphmap;
use crate::matrix::AdjacencyMatrix;

/// Generate an undirected Graphviz DOT graph highlighting a query result.
pub fn generate_dot(matrix: &AdjacencyMatrix, query: &Query, common: &CommonCities) -> String {
    // ~60 bytes/node + ~20 bytes/edge + header/footer
    let estimated_capacity = matrix.size() * 60 + matrix.edge_count() * 20 + 150;
    let mut dot = String::with_capacity(estimated_capacity);

    if let Err(e) = write_dot_content(&mut dot, matrix, query, common) {
        tracing::error!(error = %e, "failed to generate DOT string");
        return "graph citygraph {\n}\n".to_string();
    }

    dot
}

fn write_dot_content(
    dot: &mut String,
    matrix: &AdjacencyMatrix,
    query: &Query,
    common: &CommonCities,
) -> std::fmt::Result {
    let g = to_graphmap(matrix);
    let common = common.as_slice();

    writeln!(dot, "graph citygraph {{")?;
    writeln!(dot, "  layout=neato;")?;
    writeln!(dot, "  node [shape=circle, style=filled];")?;
    writeln!(dot)?;

    let mut cities: Vec<usize> = g.nodes().collect();
    cities.sort_unstable();
    for city in cities {
        let number = city + 1;
        let color = if number == query.k1 || number == query.k2 {
            "gold"
        } else if common.binary_search(&number).is_ok() {
            "lightgreen"
        } else {
            "lightgrey"
        };
        writeln!(dot, "  \"{}\" [fillcolor={}];", number, color)?;
    }

    writeln!(dot)?;

    let mut edges: Vec<(usize, usize)> = g
        .all_edges()
        .map(|(a, b, _)| (a.min(b), a.max(b)))
        .collect();
    edges.sort_unstable();
    for (a, b) in edges {
        writeln!(dot, "  \"{}\" -- \"{}\";", a + 1, b + 1)?;
    }

    writeln!(dot, "}}")?;
    Ok(())
}
