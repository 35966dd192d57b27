//! Color-preserving permutations of node indices.
//!
//! Each color occupies one contiguous block of indices. The table holds the
//! Cartesian product of all orderings of every block, generated iteratively:
//! lexicographic next-permutation inside a block, and an odometer across
//! blocks.

use std::ops::Range;

use crate::coloring::NodeColoring;

/// Flat table of permutations, one row of `n` node indices per permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    n: usize,
    rows: Vec<u8>,
}

impl PermutationTable {
    pub fn new(coloring: &NodeColoring) -> Self {
        let n = coloring.len();
        let block_perms: Vec<Vec<Vec<u8>>> =
            coloring.blocks().into_iter().map(block_permutations).collect();
        let total: usize = block_perms.iter().map(Vec::len).product();

        let mut rows = Vec::with_capacity(total * n);
        // odometer over the per-block choices; the last block turns fastest
        let mut digits = vec![0usize; block_perms.len()];
        loop {
            for (block, &digit) in block_perms.iter().zip(&digits) {
                rows.extend_from_slice(&block[digit]);
            }
            let mut pos = digits.len();
            loop {
                if pos == 0 {
                    return Self { n, rows };
                }
                pos -= 1;
                digits[pos] += 1;
                if digits[pos] < block_perms[pos].len() {
                    break;
                }
                digits[pos] = 0;
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        if self.n == 0 { 0 } else { self.rows.len() / self.n }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Permutations in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rows.chunks_exact(self.n.max(1))
    }
}

/// Every ordering of the indices in `block`, in lexicographic order.
fn block_permutations(block: Range<usize>) -> Vec<Vec<u8>> {
    // node indices never exceed MAX_NODES, so they fit a byte
    let mut current: Vec<u8> = block.map(|i| i as u8).collect();
    let mut all = vec![current.clone()];
    while next_permutation(&mut current) {
        all.push(current.clone());
    }
    all
}

/// Rearranges `items` into the next lexicographic permutation. Returns false
/// (leaving the slice sorted descending) when `items` was the last one.
fn next_permutation(items: &mut [u8]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
