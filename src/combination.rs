//! Degree-constrained enumeration of adjacency bitsets.
//!
//! Every edge count ("shell") between the spanning-tree minimum and the
//! degree-sum/clique maximum is enumerated by its own rayon task. Each task
//! walks the values with exactly that many bits set, keeps the ones that pass
//! the degree validator in a private buffer, and the buffers are concatenated
//! at the join.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use tracing::debug;

use crate::coloring::DegreeBounds;
use crate::encoding::{Encoding, Triu, next_same_popcount, popcount, triu_size};

/// Feasible edge counts for a connected graph on `n` nodes whose degrees are
/// at most `max_degree`: `[n-1, min(n*max_degree/2, n(n-1)/2)]`.
///
/// The range is empty when no connected graph can satisfy the bound.
pub fn edge_count_range(n: usize, max_degree: u32) -> RangeInclusive<usize> {
    let degree_sum_bound = n.saturating_mul(max_degree as usize) / 2;
    let upper = degree_sum_bound.min(triu_size(n));
    n.saturating_sub(1)..=upper
}

/// True when every node degree of `adjacency` lies within `bounds`.
#[inline]
pub fn check_degrees(adjacency: Triu, degree_filter: &[Triu], bounds: DegreeBounds) -> bool {
    degree_filter
        .iter()
        .all(|&mask| bounds.contains(popcount(adjacency & mask)))
}

/// All bitsets of `encoding.size()` bits with exactly `edges` bits set that
/// pass the degree validator, in increasing numeric order.
pub fn enumerate_shell(encoding: &Encoding, edges: usize, bounds: DegreeBounds) -> Vec<Triu> {
    let size = encoding.size();
    let mut valid = Vec::new();
    if edges == 0 || edges > size {
        // the empty graph is the only value without set bits
        if edges == 0 && check_degrees(0, encoding.degree_filter(), bounds) {
            valid.push(0);
        }
        return valid;
    }
    let first: Triu = (1 << edges) - 1;
    let last: Triu = first << (size - edges);
    let mut v = first;
    while v <= last {
        if check_degrees(v, encoding.degree_filter(), bounds) {
            valid.push(v);
        }
        v = next_same_popcount(v);
    }
    valid
}

/// Degree-valid adjacency bitsets across every feasible shell.
///
/// Order across shells is an implementation detail and must not be relied on.
pub fn enumerate_candidates(encoding: &Encoding, bounds: DegreeBounds) -> Vec<Triu> {
    let shells: Vec<usize> = edge_count_range(encoding.node_count(), bounds.max()).collect();
    let per_shell: Vec<Vec<Triu>> = shells
        .par_iter()
        .map(|&edges| enumerate_shell(encoding, edges, bounds))
        .collect();
    let candidates = per_shell.concat();
    debug!(
        nodes = encoding.node_count(),
        shells = shells.len(),
        candidates = candidates.len(),
        "enumerated degree-valid adjacency bitsets"
    );
    candidates
}
