//! Observers that record or log the intermediate state of a query.
//!
//! [`QueryTrace`] is a structured, serializable record of one analysis;
//! [`TracingObserver`] emits the same checkpoints as `tracing` debug events.
//! All city numbers recorded here are 1-based.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::analyzer::{AnalysisObserver, Headquarters, Query};
use crate::bfs::BfsResult;

/// What one headquarters' traversal discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraversalTrace {
    /// Headquarters city (1-based)
    pub source: usize,
    /// Cities at distance `1..=max_distance` (1-based, ascending)
    pub reachable: Vec<usize>,
    /// Shortest hop count per discovered city, source included at 0
    pub distances: BTreeMap<usize, usize>,
}

impl From<&BfsResult> for TraversalTrace {
    fn from(result: &BfsResult) -> Self {
        Self {
            source: result.source + 1,
            reachable: result.reachable.iter().map(|c| c + 1).collect(),
            distances: result
                .distances
                .iter()
                .enumerate()
                .filter_map(|(city, d)| d.map(|d| (city + 1, d)))
                .collect(),
        }
    }
}

/// Structured record of one query, filled in as the analysis progresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryTrace {
    pub k1: usize,
    pub k2: usize,
    pub hops: usize,
    /// Edge bound used for both traversals
    pub max_distance: usize,
    pub from_k1: Option<TraversalTrace>,
    pub from_k2: Option<TraversalTrace>,
    /// Sorted intersection; empty when no city is common
    pub common: Vec<usize>,
}

impl QueryTrace {
    /// Empty trace, ready to be passed as an observer.
    pub fn new() -> Self {
        Self::default()
    }

    fn set_query(&mut self, query: &Query) {
        self.k1 = query.k1;
        self.k2 = query.k2;
        self.hops = query.hops;
        self.max_distance = query.max_distance();
    }

    /// Human-readable lines describing the trace.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![format!(
            "K1={} K2={} L={} (max distance {})",
            self.k1, self.k2, self.hops, self.max_distance
        )];
        for (label, traversal) in [("K1", &self.from_k1), ("K2", &self.from_k2)] {
            if let Some(t) = traversal {
                out.push(format!(
                    "reachable from {} (excluding {}): {}",
                    label,
                    t.source,
                    join_cities(&t.reachable)
                ));
            }
        }
        out.push(format!("common cities: {}", join_cities(&self.common)));
        out
    }
}

fn join_cities(cities: &[usize]) -> String {
    if cities.is_empty() {
        return "none".to_string();
    }
    cities
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl AnalysisObserver for QueryTrace {
    fn on_traversal(&mut self, query: &Query, hq: Headquarters, result: &BfsResult) {
        self.set_query(query);
        let traversal = Some(TraversalTrace::from(result));
        match hq {
            Headquarters::First => self.from_k1 = traversal,
            Headquarters::Second => self.from_k2 = traversal,
        }
    }

    fn on_intersection(&mut self, query: &Query, common: &[usize]) {
        self.set_query(query);
        self.common = common.to_vec();
    }
}

/// Observer that logs each checkpoint at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn on_traversal(&mut self, query: &Query, hq: Headquarters, result: &BfsResult) {
        let reachable: Vec<usize> = result.reachable.iter().map(|c| c + 1).collect();
        debug!(
            headquarters = %hq,
            source = result.source + 1,
            max_distance = query.max_distance(),
            reachable = ?reachable,
            "traversal finished"
        );
    }

    fn on_intersection(&mut self, query: &Query, common: &[usize]) {
        debug!(k1 = query.k1, k2 = query.k2, common = ?common, "intersection computed");
    }
}

/// Forwards each checkpoint to two observers in turn.
pub struct Tee<'a>(pub &'a mut dyn AnalysisObserver, pub &'a mut dyn AnalysisObserver);

impl AnalysisObserver for Tee<'_> {
    fn on_traversal(&mut self, query: &Query, hq: Headquarters, result: &BfsResult) {
        self.0.on_traversal(query, hq, result);
        self.1.on_traversal(query, hq, result);
    }

    fn on_intersection(&mut self, query: &Query, common: &[usize]) {
        self.0.on_intersection(query, common);
        self.1.on_intersection(query, common);
    }
}
