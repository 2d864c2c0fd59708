//! Graph loading from whitespace-separated integer text.
//!
//! Format: the city count `n`, then `n * n` entries in row-major order.
//! Line breaks carry no meaning beyond separating tokens:
//!
//! ```text
//! 4
//! 0 1 0 0
//! 1 0 0 0
//! 0 0 0 1
//! 0 0 1 0
//! ```
//!
//! Read failures (bad token, truncated input) are reported as `Parse`
//! errors and are distinct from the validator's structural errors.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{CityGraphError, CityGraphResult, IoResultExt};
use crate::matrix::{validate_matrix, AdjacencyMatrix, MatrixLimits, DEFAULT_MAX_CITIES};

/// File read when no path is given.
pub const DEFAULT_GRAPH_FILE: &str = "cities.txt";

/// Reads and validates a graph file.
pub fn load_graph(path: impl AsRef<Path>, limits: &MatrixLimits) -> CityGraphResult<AdjacencyMatrix> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_path(path)?;
    debug!(path = %path.display(), bytes = content.len(), "graph file read");
    parse_graph(&content, &path.display().to_string(), limits)
}

/// Parses and validates graph text; `origin` names the source in errors.
pub fn parse_graph(text: &str, origin: &str, limits: &MatrixLimits) -> CityGraphResult<AdjacencyMatrix> {
    let mut tokens = tokenize(text);

    let (line, first) = tokens
        .next()
        .ok_or_else(|| CityGraphError::parse(origin, "missing city count"))?;
    let declared = parse_int(first, line, origin)?;
    let n = limits.check_size(declared)?;

    let expected = n.checked_mul(n).ok_or_else(|| {
        CityGraphError::parse(origin, format!("city count {} is too large to index", n))
    })?;

    // The declared count is untrusted until the entries are actually read.
    let hint = n.min(DEFAULT_MAX_CITIES);
    let mut rows = Vec::with_capacity(hint);
    let mut read = 0usize;
    for _ in 0..n {
        let mut row = Vec::with_capacity(hint);
        for _ in 0..n {
            let (line, token) = tokens.next().ok_or_else(|| {
                CityGraphError::parse(
                    origin,
                    format!("expected {} matrix entries, found {}", expected, read),
                )
            })?;
            row.push(parse_int(token, line, origin)?);
            read += 1;
        }
        rows.push(row);
    }

    let extra = tokens.count();
    if extra > 0 {
        warn!(origin, extra, "ignoring trailing tokens after the matrix");
    }

    validate_matrix(&rows, declared, limits)
}

fn parse_int(token: &str, line: usize, origin: &str) -> CityGraphResult<i64> {
    token.parse::<i64>().map_err(|_| {
        CityGraphError::parse_at(origin, format!("invalid integer '{}'", token), line)
    })
}

/// Whitespace tokens paired with their 1-based line number.
fn tokenize(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)))
}
