//! Isomorphism deduplication: bucket by invariant, then exact matching.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::candidate::{GraphCandidate, Invariant};

/// Groups candidates by their invariant vector (element-wise equality).
pub fn bucket_by_invariant<'a>(
    candidates: Vec<GraphCandidate<'a>>,
) -> BTreeMap<Invariant, Vec<GraphCandidate<'a>>> {
    let mut buckets: BTreeMap<Invariant, Vec<GraphCandidate<'a>>> = BTreeMap::new();
    for candidate in candidates {
        buckets
            .entry(candidate.invariant().clone())
            .or_default()
            .push(candidate);
    }
    buckets
}

/// Keeps the first candidate of every isomorphism class within one bucket.
///
/// Sequential: whether a candidate is kept depends on the representatives
/// retained before it.
pub fn dedup_bucket<'a>(bucket: Vec<GraphCandidate<'a>>) -> Vec<GraphCandidate<'a>> {
    let mut uniques: Vec<GraphCandidate<'a>> = Vec::new();
    for candidate in bucket {
        if !uniques.iter().any(|kept| kept.is_isomorphic(&candidate)) {
            uniques.push(candidate);
        }
    }
    uniques
}

/// One representative per isomorphism class. Buckets are processed in
/// parallel, in invariant order.
pub fn deduplicate(candidates: Vec<GraphCandidate<'_>>) -> Vec<GraphCandidate<'_>> {
    let total_before = candidates.len();
    let buckets: Vec<_> = bucket_by_invariant(candidates).into_values().collect();
    let bucket_count = buckets.len();

    let uniques: Vec<GraphCandidate<'_>> = buckets
        .into_par_iter()
        .map(dedup_bucket)
        .collect::<Vec<_>>()
        .concat();

    debug!(
        before = total_before,
        buckets = bucket_count,
        after = uniques.len(),
        removed = total_before - uniques.len(),
        "deduplication complete"
    );
    uniques
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::EnumerationContext;
    use crate::coloring::NodeColoring;
    use crate::encoding::Encoding;
    use crate::permutation::PermutationTable;

    fn context(colors: &[u32]) -> EnumerationContext {
        let coloring = NodeColoring::new(colors.to_vec()).unwrap();
        let encoding = Encoding::new(coloring.len()).unwrap();
        let permutations = PermutationTable::new(&coloring);
        EnumerationContext::new(coloring, encoding, permutations)
    }

    fn graphs<'a>(ctx: &'a EnumerationContext, sets: &[&[(usize, usize)]]) -> Vec<GraphCandidate<'a>> {
        sets.iter()
            .map(|edges| {
                let adjacency = edges
                    .iter()
                    .fold(0, |acc, &(u, v)| acc | ctx.encoding().mask(u, v));
                GraphCandidate::new(adjacency, ctx)
            })
            .collect()
    }

    #[test]
    fn all_path_relabelings_collapse() {
        let ctx = context(&[0, 0, 0]);
        let candidates = graphs(
            &ctx,
            &[
                &[(0, 1), (1, 2)],
                &[(0, 1), (0, 2)],
                &[(0, 2), (1, 2)],
                &[(0, 1), (1, 2), (0, 2)],
            ],
        );
        let uniques = deduplicate(candidates);
        assert_eq!(uniques.len(), 2);
        let mut edge_counts: Vec<u32> = uniques.iter().map(|g| g.edge_count()).collect();
        edge_counts.sort_unstable();
        assert_eq!(edge_counts, vec![2, 3]);
    }

    #[test]
    fn buckets_split_on_invariant() {
        let ctx = context(&[0, 0, 1]);
        let candidates = graphs(&ctx, &[&[(0, 2), (1, 2)], &[(0, 1), (0, 2)], &[(0, 1), (1, 2)]]);
        let buckets = bucket_by_invariant(candidates);
        // the 0-2-1 path differs from the other two, which share an invariant
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.values().map(Vec::len).max(), Some(2));
    }

    #[test]
    fn first_member_of_a_class_is_kept() {
        let ctx = context(&[0, 0, 0]);
        let candidates = graphs(&ctx, &[&[(0, 2), (1, 2)], &[(0, 1), (1, 2)]]);
        let first = candidates[0].adjacency();
        let kept = dedup_bucket(candidates);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].adjacency(), first);
    }
}
