//! Orchestration of one enumeration call.
//!
//! Sequence: degree filters, parallel shell enumeration with degree
//! validation, permutation table, parallel candidate construction with the
//! connectivity filter, bucket-parallel deduplication, edge extraction.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::candidate::{EnumerationContext, GraphCandidate};
use crate::coloring::{DegreeBounds, NodeColoring};
use crate::combination::enumerate_candidates;
use crate::dedup::deduplicate;
use crate::encoding::{Encoding, Triu};
use crate::error::Result;
use crate::permutation::PermutationTable;

/// Edge list of one graph; endpoints are node indices with `first < second`.
pub type EdgeList = Vec<(usize, usize)>;

/// Candidates per construction task.
const CONSTRUCTION_CHUNK: usize = 4096;

/// Every connected graph on the given colored nodes whose degrees lie in
/// `[min_degree, max_degree]`, one edge list per color-preserving
/// isomorphism class.
///
/// Inputs are validated before any enumeration work. The order of the
/// returned edge lists is unspecified.
pub fn generate_edges(node_colors: &[u32], max_degree: u32, min_degree: u32) -> Result<Vec<EdgeList>> {
    let bounds = DegreeBounds::new(min_degree, max_degree)?;
    let coloring = NodeColoring::new(node_colors.to_vec())?;
    generate_edge_configurations(&coloring, bounds)
}

/// Same as [`generate_edges`] on already validated inputs.
pub fn generate_edge_configurations(
    coloring: &NodeColoring,
    bounds: DegreeBounds,
) -> Result<Vec<EdgeList>> {
    let n = coloring.len();
    if n == 1 {
        // a lone node has no edges, whatever the degree bounds say
        return Ok(vec![Vec::new()]);
    }

    let encoding = Encoding::new(n)?;
    let adjacencies = enumerate_candidates(&encoding, bounds);

    let permutations = PermutationTable::new(coloring);
    debug!(permutations = permutations.len(), "built permutation table");
    let context = EnumerationContext::new(coloring.clone(), encoding, permutations);

    let connected = construct_connected(&adjacencies, &context);
    let uniques = deduplicate(connected);
    let edges: Vec<EdgeList> = uniques.iter().map(GraphCandidate::edges).collect();

    info!(
        colors = ?coloring.as_slice(),
        min_degree = bounds.min(),
        max_degree = bounds.max(),
        graphs = edges.len(),
        "edge configurations generated"
    );
    Ok(edges)
}

/// Builds a candidate for every bitset and keeps the connected ones. Work is
/// split into index-range chunks whose private results are concatenated.
fn construct_connected<'a>(adjacencies: &[Triu], context: &'a EnumerationContext) -> Vec<GraphCandidate<'a>> {
    let per_chunk: Vec<Vec<GraphCandidate<'a>>> = adjacencies
        .par_chunks(CONSTRUCTION_CHUNK)
        .map(|chunk| {
            chunk
                .iter()
                .map(|&adjacency| GraphCandidate::new(adjacency, context))
                .filter(|candidate| candidate.is_connected())
                .collect()
        })
        .collect();
    let connected = per_chunk.concat();
    debug!(
        candidates = adjacencies.len(),
        connected = connected.len(),
        "connectivity filter applied"
    );
    connected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnumerationError;

    #[test]
    fn single_node_yields_one_empty_graph() {
        assert_eq!(generate_edges(&[0], 0, 0).unwrap(), vec![Vec::new()]);
        assert_eq!(generate_edges(&[0], 3, 2).unwrap(), vec![Vec::new()]);
    }

    #[test]
    fn two_nodes_single_edge() {
        assert_eq!(generate_edges(&[0, 0], 1, 0).unwrap(), vec![vec![(0, 1)]]);
        assert_eq!(generate_edges(&[0, 1], 1, 1).unwrap(), vec![vec![(0, 1)]]);
    }

    #[test]
    fn triangle_is_the_only_two_regular_graph_on_three_nodes() {
        assert_eq!(
            generate_edges(&[0, 1, 2], 2, 2).unwrap(),
            vec![vec![(0, 1), (0, 2), (1, 2)]]
        );
    }

    #[test]
    fn infeasible_bounds_give_no_graphs() {
        assert!(generate_edges(&[0, 0, 0], 0, 0).unwrap().is_empty());
        assert!(generate_edges(&[0, 0, 0, 0], 1, 1).unwrap().is_empty());
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            generate_edges(&[], 2, 1),
            Err(EnumerationError::InvalidNodeCount { count: 0, .. })
        ));
        assert!(matches!(
            generate_edges(&[0; 12], 2, 1),
            Err(EnumerationError::InvalidNodeCount { count: 12, .. })
        ));
        assert!(matches!(
            generate_edges(&[0, 0, 2], 2, 1),
            Err(EnumerationError::InvalidColoring { position: 2, .. })
        ));
        assert!(matches!(
            generate_edges(&[1, 2, 3], 2, 1),
            Err(EnumerationError::InvalidColoring { position: 0, .. })
        ));
        assert_eq!(
            generate_edges(&[0, 1, 2], 1, 2),
            Err(EnumerationError::InvalidDegreeBounds { min: 2, max: 1 })
        );
    }

    #[test]
    fn paths_and_triangle_on_three_nodes() {
        let mut graphs = generate_edges(&[0, 0, 0], 2, 1).unwrap();
        graphs.sort_by_key(Vec::len);
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].len(), 2);
        assert_eq!(graphs[1], vec![(0, 1), (0, 2), (1, 2)]);
    }
}
