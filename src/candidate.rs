//! Candidate graphs on a shared enumeration context.

use std::collections::VecDeque;
use std::fmt;

use crate::coloring::NodeColoring;
use crate::encoding::{Encoding, Triu, popcount, upper_triu_index};
use crate::permutation::PermutationTable;

/// Coarse isomorphism invariant: edge count, per-color sorted degrees and
/// per-color-pair edge counts.
pub type Invariant = Vec<u32>;

/// Tables shared read-only by every candidate of one enumeration call.
#[derive(Debug, Clone)]
pub struct EnumerationContext {
    coloring: NodeColoring,
    encoding: Encoding,
    permutations: PermutationTable,
}

impl EnumerationContext {
    pub fn new(coloring: NodeColoring, encoding: Encoding, permutations: PermutationTable) -> Self {
        debug_assert_eq!(coloring.len(), encoding.node_count());
        debug_assert_eq!(coloring.len(), permutations.node_count());
        Self {
            coloring,
            encoding,
            permutations,
        }
    }

    pub fn coloring(&self) -> &NodeColoring {
        &self.coloring
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn permutations(&self) -> &PermutationTable {
        &self.permutations
    }

    pub fn node_count(&self) -> usize {
        self.coloring.len()
    }
}

/// One adjacency bitset with its connectivity flag and invariant computed at
/// construction.
#[derive(Clone)]
pub struct GraphCandidate<'a> {
    adjacency: Triu,
    context: &'a EnumerationContext,
    connected: bool,
    invariant: Invariant,
}

impl<'a> GraphCandidate<'a> {
    pub fn new(adjacency: Triu, context: &'a EnumerationContext) -> Self {
        let mut candidate = Self {
            adjacency,
            context,
            connected: false,
            invariant: Vec::new(),
        };
        candidate.connected = candidate.check_connected();
        candidate.invariant = candidate.calculate_invariant();
        candidate
    }

    pub fn adjacency(&self) -> Triu {
        self.adjacency
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn invariant(&self) -> &Invariant {
        &self.invariant
    }

    pub fn node_count(&self) -> usize {
        self.context.node_count()
    }

    pub fn edge_count(&self) -> u32 {
        popcount(self.adjacency)
    }

    pub fn degree(&self, node: usize) -> u32 {
        self.context.encoding().degree(self.adjacency, node)
    }

    #[inline]
    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        if u == v {
            return false;
        }
        self.adjacency & self.context.encoding().mask(u, v) != 0
    }

    /// Color-preserving isomorphism test.
    ///
    /// Invariants are compared first; on a match every permutation `p` of the
    /// shared table is tried until relabeling `self` by `p` reproduces the
    /// edge set of `other`.
    pub fn is_isomorphic(&self, other: &GraphCandidate<'_>) -> bool {
        if self.invariant != other.invariant {
            return false;
        }
        let n = self.node_count();
        self.context.permutations().iter().any(|p| {
            (0..n).all(|i| {
                let pi = p[i] as usize;
                ((i + 1)..n).all(|j| self.is_edge(i, j) == other.is_edge(pi, p[j] as usize))
            })
        })
    }

    /// Symmetric 0/1 adjacency matrix.
    pub fn adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.node_count();
        let mut matrix = vec![vec![0u8; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if self.is_edge(i, j) {
                    matrix[i][j] = 1;
                    matrix[j][i] = 1;
                }
            }
        }
        matrix
    }

    /// Edges `(i, j)` with `i < j`, in index order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.node_count();
        let mut edges = Vec::with_capacity(self.edge_count() as usize);
        for i in 0..n {
            for j in (i + 1)..n {
                if self.is_edge(i, j) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Breadth-first search from node 0.
    fn check_connected(&self) -> bool {
        let n = self.node_count();
        let mut visited: u32 = 1;
        let mut visited_count = 0;
        let mut queue = VecDeque::from([0usize]);
        while let Some(current) = queue.pop_front() {
            visited_count += 1;
            for next in 0..n {
                if visited & (1 << next) == 0 && self.is_edge(current, next) {
                    visited |= 1 << next;
                    queue.push_back(next);
                }
            }
        }
        visited_count == n
    }

    fn calculate_invariant(&self) -> Invariant {
        let n = self.node_count();
        let coloring = self.context.coloring();
        let colors = coloring.color_count();
        let mut invariant = Vec::with_capacity(1 + n + colors * (colors + 1) / 2);

        // 1. total number of edges
        invariant.push(self.edge_count());

        // 2. degrees sorted within each color block
        for block in coloring.blocks() {
            let mut degrees: Vec<u32> = block.map(|v| self.degree(v)).collect();
            degrees.sort_unstable();
            invariant.extend(degrees);
        }

        // 3. edge counts per unordered color pair
        let mut pair_counts = vec![vec![0u32; colors]; colors];
        for i in 0..n {
            for j in (i + 1)..n {
                if self.adjacency & self.context.encoding().bit_masks()[upper_triu_index(i, j, n)] != 0 {
                    let (a, b) = (coloring.color(i) as usize, coloring.color(j) as usize);
                    pair_counts[a.min(b)][a.max(b)] += 1;
                }
            }
        }
        for (a, row) in pair_counts.iter().enumerate() {
            invariant.extend_from_slice(&row[a..]);
        }
        invariant
    }
}

impl PartialEq for GraphCandidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.is_isomorphic(other)
    }
}

impl fmt::Debug for GraphCandidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphCandidate")
            .field("adjacency", &format_args!("{:#b}", self.adjacency))
            .field("connected", &self.connected)
            .field("invariant", &self.invariant)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(colors: &[u32]) -> EnumerationContext {
        let coloring = NodeColoring::new(colors.to_vec()).unwrap();
        let encoding = Encoding::new(coloring.len()).unwrap();
        let permutations = PermutationTable::new(&coloring);
        EnumerationContext::new(coloring, encoding, permutations)
    }

    fn graph<'a>(ctx: &'a EnumerationContext, edges: &[(usize, usize)]) -> GraphCandidate<'a> {
        let adjacency = edges
            .iter()
            .fold(0, |acc, &(u, v)| acc | ctx.encoding().mask(u, v));
        GraphCandidate::new(adjacency, ctx)
    }

    #[test]
    fn connectivity() {
        let ctx = context(&[0, 0, 0, 0]);
        assert!(graph(&ctx, &[(0, 1), (1, 2), (2, 3)]).is_connected());
        assert!(graph(&ctx, &[(0, 3), (3, 1), (1, 2)]).is_connected());
        assert!(!graph(&ctx, &[(0, 1), (2, 3)]).is_connected());
        assert!(!graph(&ctx, &[]).is_connected());
    }

    #[test]
    fn invariant_layout() {
        // colors: 0 0 1, edges 0-1 and 1-2
        let ctx = context(&[0, 0, 1]);
        let g = graph(&ctx, &[(0, 1), (1, 2)]);
        // [edges] ++ [deg color 0 sorted] ++ [deg color 1] ++ [(0,0), (0,1), (1,1)]
        assert_eq!(g.invariant(), &vec![2, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn relabelings_within_a_color_are_isomorphic() {
        let ctx = context(&[0, 0, 0]);
        let a = graph(&ctx, &[(0, 1), (1, 2)]);
        let b = graph(&ctx, &[(0, 2), (2, 1)]);
        let c = graph(&ctx, &[(1, 0), (0, 2)]);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_ne!(a, graph(&ctx, &[(0, 1), (1, 2), (0, 2)]));
    }

    #[test]
    fn relabelings_across_colors_are_not_isomorphic() {
        // path centered on the color-1 node vs. centered on a color-0 node
        let ctx = context(&[0, 0, 1]);
        let centered_on_one = graph(&ctx, &[(0, 2), (1, 2)]);
        let centered_on_zero = graph(&ctx, &[(0, 1), (0, 2)]);
        assert!(!centered_on_one.is_isomorphic(&centered_on_zero));
    }

    #[test]
    fn same_invariant_different_structure() {
        // two 2-regular graphs on 6 nodes: a hexagon and two triangles
        let ctx = context(&[0, 0, 0, 0, 0, 0]);
        let hexagon = graph(&ctx, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (0, 5)]);
        let triangles = graph(&ctx, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
        assert_eq!(hexagon.invariant(), triangles.invariant());
        assert!(!hexagon.is_isomorphic(&triangles));
        assert!(!triangles.is_connected());
    }

    #[test]
    fn edges_and_matrix_agree() {
        let ctx = context(&[0, 1, 1, 2]);
        let g = graph(&ctx, &[(2, 0), (1, 3), (0, 1)]);
        assert_eq!(g.edges(), vec![(0, 1), (0, 2), (1, 3)]);
        let m = g.adjacency_matrix();
        for (i, row) in m.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                assert_eq!(cell == 1, g.is_edge(i, j));
                assert_eq!(cell, m[j][i]);
            }
        }
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(3), 1);
    }
}
