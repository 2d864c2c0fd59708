//! Output formatting - plaintext and JSON.
//!
//! This is the presentation boundary: the only place the `-1` sentinel for
//! "no common city" is produced.

use serde_json::json;

use crate::analyzer::{CommonCities, Query};
use crate::matrix::AdjacencyMatrix;
use crate::trace::QueryTrace;

/// Space-separated common cities, or `-1`.
pub fn render_plain(common: &CommonCities) -> String {
    common.to_string()
}

/// JSON report for one query; the trace is embedded when given.
pub fn render_json(
    query: &Query,
    common: &CommonCities,
    trace: Option<&QueryTrace>,
) -> serde_json::Value {
    let mut report = json!({
        "k1": query.k1,
        "k2": query.k2,
        "hops": query.hops,
        "found": !common.is_empty(),
        "common": common.to_sentinel_vec(),
    });
    if let Some(trace) = trace {
        report["trace"] = serde_json::to_value(trace).unwrap_or(serde_json::Value::Null);
    }
    report
}

/// The matrix as lines of space-separated `0`/`1`, headed by the city count.
pub fn render_matrix(matrix: &AdjacencyMatrix) -> String {
    let mut out = format!("Cities: {}\n", matrix.size());
    for i in 0..matrix.size() {
        let row: Vec<String> = matrix.row(i).map(|c| c.to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Prints the plain result to stdout.
pub fn print_plain(common: &CommonCities) {
    println!("{}", render_plain(common));
}

/// Prints the JSON report to stdout.
///
/// Falls back to the plain sentinel form if serialization fails.
pub fn print_json(query: &Query, common: &CommonCities, trace: Option<&QueryTrace>) {
    match serde_json::to_string_pretty(&render_json(query, common, trace)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON serialization failed");
            println!("{{\"common\": {:?}}}", common.to_sentinel_vec());
        }
    }
}
