//! Scenario and property test suite for citygraph-core.

use crate::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("citygraph_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Builds a validated matrix from 1-based undirected edges.
fn graph(n: usize, edges: &[(usize, usize)]) -> AdjacencyMatrix {
    let mut rows = vec![vec![0i64; n]; n];
    for &(a, b) in edges {
        rows[a - 1][b - 1] = 1;
        rows[b - 1][a - 1] = 1;
    }
    AdjacencyMatrix::from_rows(&rows).unwrap()
}

/// Every undirected simple graph on `n` nodes (n small).
fn all_graphs(n: usize) -> Vec<AdjacencyMatrix> {
    let pairs: Vec<(usize, usize)> = (1..=n)
        .flat_map(|a| ((a + 1)..=n).map(move |b| (a, b)))
        .collect();
    (0u32..(1 << pairs.len()))
        .map(|mask| {
            let edges: Vec<(usize, usize)> = pairs
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, &p)| p)
                .collect();
            graph(n, &edges)
        })
        .collect()
}

/// All-pairs shortest hop counts by Floyd-Warshall, 0-based.
fn all_pairs(m: &AdjacencyMatrix) -> Vec<Vec<Option<usize>>> {
    let n = m.size();
    let mut d: Vec<Vec<Option<usize>>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        Some(0)
                    } else if m.has_edge(i, j) {
                        Some(1)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect();
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(a), Some(b)) = (d[i][k], d[k][j]) {
                    if d[i][j].map_or(true, |c| a + b < c) {
                        d[i][j] = Some(a + b);
                    }
                }
            }
        }
    }
    d
}

/// Reference answer computed from shortest-path distances directly.
fn expected_common(m: &AdjacencyMatrix, k1: usize, k2: usize, hops: usize) -> Vec<usize> {
    let d = all_pairs(m);
    let within = |from: usize, to: usize| matches!(d[from - 1][to - 1], Some(x) if (1..=hops + 1).contains(&x));
    (1..=m.size())
        .filter(|&c| within(k1, c) && within(k2, c))
        .collect()
}

// Boundary scenario A: a single city cannot host two headquarters
#[test]
fn test_single_city_identical_headquarters() {
    let m = AdjacencyMatrix::from_rows(&[vec![0]]).unwrap();
    let err = find_common_cities(&m, 1, 1, 0).unwrap_err();
    assert!(matches!(err, CityGraphError::IdenticalHeadquarters { city: 1 }));
}

// Boundary scenario B: disconnected components never share a city
#[test]
fn test_disconnected_components_give_sentinel() {
    let m = graph(4, &[(1, 2), (3, 4)]);
    for hops in 0..6 {
        let result = find_common_cities(&m, 1, 3, hops).unwrap();
        assert_eq!(result, CommonCities::None, "hops = {}", hops);
        assert_eq!(result.to_sentinel_vec(), vec![-1]);
    }
}

// Boundary scenario C: complete graph, direct neighbors only
#[test]
fn test_complete_graph_direct_neighbors() {
    let m = graph(4, &[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
    let result = find_common_cities(&m, 1, 2, 0).unwrap();
    assert_eq!(result, CommonCities::Cities(vec![3, 4]));
}

// Boundary scenario D: path graph, budget widening
#[test]
fn test_path_graph_budget() {
    let m = graph(5, &[(1, 2), (2, 3), (3, 4), (4, 5)]);
    assert_eq!(find_common_cities(&m, 1, 5, 0).unwrap(), CommonCities::None);
    assert_eq!(
        find_common_cities(&m, 1, 5, 1).unwrap(),
        CommonCities::Cities(vec![3])
    );
    assert_eq!(
        find_common_cities(&m, 1, 5, 2).unwrap(),
        CommonCities::Cities(vec![2, 3, 4])
    );
}

// Validation scenario: an asymmetric matrix never reaches traversal
#[test]
fn test_asymmetric_matrix_rejected_before_analysis() {
    let rows = vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 1, 0]];
    let err = AdjacencyMatrix::from_rows(&rows).unwrap_err();
    assert!(err.is_matrix_structure());
    assert!(matches!(err, CityGraphError::AsymmetricMatrix { .. }));
}

// Properties over every graph on four cities
#[test]
fn test_matches_shortest_path_reference() {
    for m in all_graphs(4) {
        for k1 in 1..=4 {
            for k2 in (1..=4).filter(|&k| k != k1) {
                for hops in 0..4 {
                    let got = find_common_cities(&m, k1 as i64, k2 as i64, hops as i64).unwrap();
                    let want = expected_common(&m, k1, k2, hops);
                    assert_eq!(got.as_slice(), want.as_slice(), "k1={} k2={} L={}", k1, k2, hops);
                    // Sentinel iff the true intersection is empty
                    assert_eq!(got.is_empty(), want.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_symmetry_in_headquarters() {
    for m in all_graphs(4) {
        for k1 in 1..=4i64 {
            for k2 in (1..=4i64).filter(|&k| k != k1) {
                for hops in 0..3 {
                    assert_eq!(
                        find_common_cities(&m, k1, k2, hops).unwrap(),
                        find_common_cities(&m, k2, k1, hops).unwrap()
                    );
                }
            }
        }
    }
}

#[test]
fn test_monotonic_in_hop_budget() {
    for m in all_graphs(4) {
        for k1 in 1..=4i64 {
            for k2 in (1..=4i64).filter(|&k| k != k1) {
                let mut previous: BTreeSet<usize> = BTreeSet::new();
                for hops in 0..4 {
                    let current: BTreeSet<usize> = find_common_cities(&m, k1, k2, hops)
                        .unwrap()
                        .as_slice()
                        .iter()
                        .copied()
                        .collect();
                    assert!(previous.is_subset(&current));
                    previous = current;
                }
            }
        }
    }
}

#[test]
fn test_result_sorted_and_excludes_headquarters() {
    let m = graph(6, &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 1)]);
    for hops in 0..5 {
        let result = find_common_cities(&m, 1, 4, hops).unwrap();
        let cities = result.as_slice();
        assert!(cities.windows(2).all(|w| w[0] < w[1]));
        assert!(!cities.contains(&1));
        assert!(!cities.contains(&4));
    }
}

#[test]
fn test_self_exclusion_in_bfs() {
    for m in all_graphs(3) {
        for source in 0..3 {
            let result = bounded_reach(&m, source, 3).unwrap();
            assert!(!result.reachable.contains(&source));
            assert_eq!(result.distance(source), Some(0));
        }
    }
}

#[test]
fn test_adjacency_list_answers_match_matrix() {
    for m in all_graphs(4) {
        let list = AdjacencyList::from(&m);
        for source in 0..4 {
            for bound in 0..4 {
                assert_eq!(
                    bounded_reach(&m, source, bound).unwrap().reachable,
                    bounded_reach(&list, source, bound).unwrap().reachable
                );
            }
        }
    }
}

// Loader round trips through the filesystem
#[test]
fn test_load_and_query_from_file() {
    let dir = setup_temp_dir();
    let file = dir.join(DEFAULT_GRAPH_FILE);
    write_file(
        &file,
        "5\n0 1 0 0 0\n1 0 1 0 0\n0 1 0 1 0\n0 0 1 0 1\n0 0 0 1 0\n",
    );

    let m = load_graph(&file, &MatrixLimits::default()).unwrap();
    let analyzer = ReachabilityAnalyzer::new(&m);
    assert_eq!(analyzer.city_count(), 5);
    assert_eq!(analyzer.find_common_cities(1, 5, 1).unwrap().to_string(), "3");
    assert_eq!(analyzer.find_common_cities(1, 5, 0).unwrap().to_string(), "-1");
}

#[test]
fn test_read_failure_distinct_from_validation_failure() {
    let dir = setup_temp_dir();
    let truncated = dir.join("truncated.txt");
    let asymmetric = dir.join("asymmetric.txt");
    write_file(&truncated, "3\n0 1 0\n1 0 1\n");
    write_file(&asymmetric, "2\n0 1\n0 0\n");

    let err = load_graph(&truncated, &MatrixLimits::default()).unwrap_err();
    assert!(matches!(err, CityGraphError::Parse { .. }));
    assert!(!err.is_matrix_structure());

    let err = load_graph(&asymmetric, &MatrixLimits::default()).unwrap_err();
    assert!(err.is_matrix_structure());
}

#[test]
fn test_config_drives_limits() {
    let dir = setup_temp_dir();
    write_file(&dir.join(CONFIG_FILE), "[limits]\nmax_cities = 3\n");
    write_file(&dir.join("four.txt"), "4\n0 1 0 0\n1 0 0 0\n0 0 0 1\n0 0 1 0\n");

    let cfg = load_config(&dir).unwrap().unwrap();
    let limits = cfg.matrix_limits().unwrap();
    let err = load_graph(dir.join("four.txt"), &limits).unwrap_err();
    assert!(matches!(err, CityGraphError::SizeOutOfRange { size: 4, max: 3 }));
}

#[test]
fn test_larger_graph_within_default_bound() {
    // Ring of 25 cities: 1 - 2 - ... - 25 - 1
    let edges: Vec<(usize, usize)> = (1..=25).map(|i| (i, i % 25 + 1)).collect();
    let m = graph(25, &edges);
    // Opposite-ish cities 1 and 11 are 10 edges apart; with L = 4 each side
    // reaches 5 edges, meeting only at city 6.
    let result = find_common_cities(&m, 1, 11, 4).unwrap();
    assert_eq!(result, CommonCities::Cities(vec![6]));
}
