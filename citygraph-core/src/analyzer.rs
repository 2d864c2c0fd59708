//! Two-headquarters reachability analysis.
//!
//! The analyzer is the only place where 1-based city numbers (what callers
//! type) are converted to 0-based matrix indices and back.
//!
//! ```rust,ignore
//! use citygraph_core::prelude::*;
//!
//! let matrix = load_graph("cities.txt", &MatrixLimits::default())?;
//! let common = ReachabilityAnalyzer::new(&matrix).find_common_cities(1, 5, 1)?;
//! println!("{}", common); // "3" or "-1"
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::bfs::BfsResult;
use crate::common::GraphTraversal;
use crate::error::{CityGraphError, CityGraphResult};
use crate::matrix::AdjacencyMatrix;

/// Which of the two headquarters a traversal started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Headquarters {
    First,
    Second,
}

impl fmt::Display for Headquarters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "K1"),
            Self::Second => write!(f, "K2"),
        }
    }
}

/// A validated query, holding both numbering schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Query {
    /// First headquarters (1-based)
    pub k1: usize,
    /// Second headquarters (1-based)
    pub k2: usize,
    /// Maximum number of intermediate cities
    pub hops: usize,
}

impl Query {
    /// Checks raw caller input against a graph of `city_count` cities.
    ///
    /// Order of checks: K1 range, K2 range, hop budget, distinctness.
    pub fn validate(k1: i64, k2: i64, hops: i64, city_count: usize) -> CityGraphResult<Self> {
        let k1 = check_city("K1", k1, city_count)?;
        let k2 = check_city("K2", k2, city_count)?;
        let hops = usize::try_from(hops).map_err(|_| CityGraphError::InvalidHopBudget { hops })?;
        if k1 == k2 {
            return Err(CityGraphError::IdenticalHeadquarters { city: k1 as i64 });
        }
        Ok(Self { k1, k2, hops })
    }

    /// Edge bound handed to BFS: `hops` intermediate cities means `hops + 1` edges.
    pub fn max_distance(&self) -> usize {
        self.hops.saturating_add(1)
    }

    fn start(&self, hq: Headquarters) -> usize {
        match hq {
            Headquarters::First => self.k1 - 1,
            Headquarters::Second => self.k2 - 1,
        }
    }
}

fn check_city(label: &'static str, city: i64, city_count: usize) -> CityGraphResult<usize> {
    match usize::try_from(city) {
        Ok(c) if (1..=city_count).contains(&c) => Ok(c),
        _ => Err(CityGraphError::InvalidCity {
            label,
            city,
            city_count,
        }),
    }
}

/// Cities reachable from both headquarters, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonCities {
    /// No city is commonly reachable within the budget
    None,
    /// Non-empty, strictly increasing city numbers
    Cities(Vec<usize>),
}

impl CommonCities {
    fn from_sorted(cities: Vec<usize>) -> Self {
        if cities.is_empty() {
            Self::None
        } else {
            Self::Cities(cities)
        }
    }

    /// True when no common city exists.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The common cities; empty for [`CommonCities::None`].
    pub fn as_slice(&self) -> &[usize] {
        match self {
            Self::None => &[],
            Self::Cities(cities) => cities,
        }
    }

    /// External form: the city list, or the singleton `[-1]` sentinel.
    pub fn to_sentinel_vec(&self) -> Vec<i64> {
        match self {
            Self::None => vec![-1],
            Self::Cities(cities) => cities.iter().map(|&c| c as i64).collect(),
        }
    }
}

impl fmt::Display for CommonCities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "-1"),
            Self::Cities(cities) => {
                for (i, city) in cities.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", city)?;
                }
                Ok(())
            }
        }
    }
}

/// Inspection hook invoked at fixed points of an analysis.
///
/// Both callbacks run after the corresponding computation finished; they
/// never observe partial state. Indices in `BfsResult` are 0-based, the
/// intersection is 1-based.
pub trait AnalysisObserver {
    /// Called once per headquarters after its traversal.
    fn on_traversal(&mut self, _query: &Query, _hq: Headquarters, _result: &BfsResult) {}

    /// Called with the sorted 1-based intersection (possibly empty).
    fn on_intersection(&mut self, _query: &Query, _common: &[usize]) {}
}

/// Observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Runs queries against one matrix.
///
/// Holds only a shared borrow of the matrix and options; no state carries
/// over between queries.
#[derive(Debug, Clone)]
pub struct ReachabilityAnalyzer<'a> {
    matrix: &'a AdjacencyMatrix,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<'a> ReachabilityAnalyzer<'a> {
    /// Create an analyzer over a validated matrix.
    pub fn new(matrix: &'a AdjacencyMatrix) -> Self {
        Self {
            matrix,
            parallel: false,
        }
    }

    /// Run the two traversals concurrently on the rayon pool.
    ///
    /// Has no effect unless the `parallel` feature is enabled. Results are
    /// identical either way.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Number of cities in the underlying graph.
    pub fn city_count(&self) -> usize {
        self.matrix.size()
    }

    /// Cities reachable from both `k1` and `k2` with at most `hops`
    /// intermediate cities on the way.
    pub fn find_common_cities(&self, k1: i64, k2: i64, hops: i64) -> CityGraphResult<CommonCities> {
        self.find_common_cities_observed(k1, k2, hops, &mut NoopObserver)
    }

    /// Same as [`find_common_cities`](Self::find_common_cities), reporting to `observer`.
    pub fn find_common_cities_observed(
        &self,
        k1: i64,
        k2: i64,
        hops: i64,
        observer: &mut dyn AnalysisObserver,
    ) -> CityGraphResult<CommonCities> {
        let query = Query::validate(k1, k2, hops, self.city_count())?;
        self.run(&query, observer)
    }

    /// Runs an already validated query.
    ///
    /// # Errors
    /// `InvalidArgument` if the query was validated against a larger graph.
    pub fn run(
        &self,
        query: &Query,
        observer: &mut dyn AnalysisObserver,
    ) -> CityGraphResult<CommonCities> {
        let max_distance = query.max_distance();
        let (first, second) = self.traverse_both(query, max_distance)?;

        observer.on_traversal(query, Headquarters::First, &first);
        observer.on_traversal(query, Headquarters::Second, &second);

        let common: Vec<usize> = intersect(&first.reachable, &second.reachable)
            .map(|city| city + 1)
            .collect();

        observer.on_intersection(query, &common);
        tracing::debug!(
            k1 = query.k1,
            k2 = query.k2,
            hops = query.hops,
            common = common.len(),
            "reachability query finished"
        );

        Ok(CommonCities::from_sorted(common))
    }

    fn traverse_both(
        &self,
        query: &Query,
        max_distance: usize,
    ) -> CityGraphResult<(BfsResult, BfsResult)> {
        let start1 = query.start(Headquarters::First);
        let start2 = query.start(Headquarters::Second);

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                let (first, second) = rayon::join(
                    || self.matrix.reach_within(start1, max_distance),
                    || self.matrix.reach_within(start2, max_distance),
                );
                return Ok((first?, second?));
            }
        }

        Ok((
            self.matrix.reach_within(start1, max_distance)?,
            self.matrix.reach_within(start2, max_distance)?,
        ))
    }
}

/// Ascending intersection of two ordered sets.
fn intersect<'s>(a: &'s BTreeSet<usize>, b: &'s BTreeSet<usize>) -> impl Iterator<Item = usize> + 's {
    a.intersection(b).copied()
}

/// One-shot form of [`ReachabilityAnalyzer::find_common_cities`].
pub fn find_common_cities(
    matrix: &AdjacencyMatrix,
    k1: i64,
    k2: i64,
    hops: i64,
) -> CityGraphResult<CommonCities> {
    ReachabilityAnalyzer::new(matrix).find_common_cities(k1, k2, hops)
}
