//! Brute-force oracle built on petgraph, shared by the integration tests.

#![allow(dead_code)]

use petgraph::algo::{connected_components, is_isomorphic_matching};
use petgraph::graph::{NodeIndex, UnGraph};

pub type ColoredGraph = UnGraph<u32, ()>;

pub fn to_petgraph(colors: &[u32], edges: &[(usize, usize)]) -> ColoredGraph {
    let mut graph = ColoredGraph::with_capacity(colors.len(), edges.len());
    for &color in colors {
        graph.add_node(color);
    }
    for &(u, v) in edges {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
    }
    graph
}

pub fn colored_isomorphic(a: &ColoredGraph, b: &ColoredGraph) -> bool {
    is_isomorphic_matching(a, b, |x, y| x == y, |_, _| true)
}

/// Every node pair `(i, j)` with `i < j`, row-major.
pub fn all_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect()
}

/// Walks every subset of node pairs, keeps the connected, degree-valid ones
/// and deduplicates them with petgraph's VF2 matcher under color equality.
pub fn brute_force(colors: &[u32], max_degree: usize, min_degree: usize) -> Vec<ColoredGraph> {
    let n = colors.len();
    let pairs = all_pairs(n);
    let mut uniques: Vec<ColoredGraph> = Vec::new();
    for subset in 0u64..(1 << pairs.len()) {
        let edges: Vec<(usize, usize)> = pairs
            .iter()
            .enumerate()
            .filter(|(k, _)| subset & (1 << k) != 0)
            .map(|(_, &pair)| pair)
            .collect();
        let graph = to_petgraph(colors, &edges);
        if connected_components(&graph) != 1 {
            continue;
        }
        let degrees_ok = graph.node_indices().all(|v| {
            let degree = graph.edges(v).count();
            (min_degree..=max_degree).contains(&degree)
        });
        if !degrees_ok {
            continue;
        }
        if !uniques.iter().any(|kept| colored_isomorphic(kept, &graph)) {
            uniques.push(graph);
        }
    }
    uniques
}
