//! Upper-triangle bit encoding of simple undirected graphs.
//!
//! An adjacency matrix on `n` nodes is packed into one `u64`: the edge
//! `(i, j)` with `i < j` lives at bit [`upper_triu_index`]. Since
//! `n(n-1)/2` bits must fit into 64, at most [`MAX_NODES`] nodes are
//! supported.

use crate::error::{EnumerationError, Result};

/// Adjacency bitset, one bit per unordered node pair.
pub type Triu = u64;

/// Largest node count whose upper triangle fits into a [`Triu`].
pub const MAX_NODES: usize = 11;

// =============== Bit primitives ===============

/// Number of set bits.
#[inline]
pub fn popcount(v: Triu) -> u32 {
    v.count_ones()
}

/// Smallest value strictly greater than `v` with the same number of set bits.
///
/// Callers must pass `v != 0` and keep the highest set bit below bit 63, so
/// the successor fits the word. The enumerator satisfies both because the
/// encoding never uses more than `MAX_NODES * (MAX_NODES - 1) / 2 = 55` bits.
#[inline]
pub fn next_same_popcount(v: Triu) -> Triu {
    debug_assert!(v != 0);
    let t = v | (v - 1);
    let lowest_zero = !t & t.wrapping_add(1);
    t.wrapping_add(1) | ((lowest_zero - 1) >> (v.trailing_zeros() + 1))
}

// =============== Index scheme ===============

/// Bit position of the edge `(i, j)` on `n` nodes, row-major over the strict
/// upper triangle. The endpoints may be given in either order.
#[inline]
pub fn upper_triu_index(i: usize, j: usize, n: usize) -> usize {
    let (i, j) = if i > j { (j, i) } else { (i, j) };
    debug_assert!(i != j && j < n);
    i * n - (i * i + 3 * i) / 2 + j - 1
}

/// Number of node pairs, i.e. bits used by the encoding.
#[inline]
pub fn triu_size(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Precomputed masks for one node count.
///
/// Built once per enumeration call and shared read-only by every candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    n: usize,
    degree_filter: Vec<Triu>,
    bit_masks: Vec<Triu>,
}

impl Encoding {
    /// Checks the node count against the word width before any index
    /// arithmetic, then builds the degree filters and per-bit masks.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 || n > MAX_NODES {
            return Err(EnumerationError::InvalidNodeCount {
                count: n,
                max: MAX_NODES,
            });
        }
        let bit_masks = (0..triu_size(n)).map(|k| (1 as Triu) << k).collect();
        Ok(Self {
            n,
            degree_filter: degree_filter(n),
            bit_masks,
        })
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Number of bits in use.
    pub fn size(&self) -> usize {
        self.bit_masks.len()
    }

    pub fn degree_filter(&self) -> &[Triu] {
        &self.degree_filter
    }

    pub fn bit_masks(&self) -> &[Triu] {
        &self.bit_masks
    }

    /// Mask of the bit for the edge `(i, j)`.
    #[inline]
    pub fn mask(&self, i: usize, j: usize) -> Triu {
        self.bit_masks[upper_triu_index(i, j, self.n)]
    }

    #[inline]
    pub fn degree(&self, adjacency: Triu, node: usize) -> u32 {
        popcount(adjacency & self.degree_filter[node])
    }
}

/// For each node `k`, OR together the bits of every edge touching `k`.
fn degree_filter(n: usize) -> Vec<Triu> {
    let mut result = vec![0; n];
    for (k, mask) in result.iter_mut().enumerate() {
        // edges (u, k) with u < k
        for u in 0..k {
            *mask |= (1 as Triu) << upper_triu_index(u, k, n);
        }
        // edges (k, v) with v > k
        for v in (k + 1)..n {
            *mask |= (1 as Triu) << upper_triu_index(k, v, n);
        }
    }
    result
}
