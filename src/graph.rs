//! Labeled graph produced by the generator.

use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

/// Node labels (types, colors) plus an edge list of indices into `nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph<T> {
    pub nodes: Vec<T>,
    pub edges: Vec<(usize, usize)>,
}

impl<T> Graph<T> {
    pub fn new(nodes: Vec<T>, edges: Vec<(usize, usize)>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.edges
            .iter()
            .filter(|&&(u, v)| u == node || v == node)
            .count()
    }
}

impl<T: Clone> Graph<T> {
    /// Undirected petgraph with the label as node weight. Node `i` of this
    /// graph becomes `NodeIndex::new(i)`.
    pub fn to_petgraph(&self) -> UnGraph<T, ()> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        for label in &self.nodes {
            graph.add_node(label.clone());
        }
        for &(u, v) in &self.edges {
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        }
        graph
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph(nodes=[")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, "]; edges=[")?;
        for (i, (a, b)) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "({a}-{b})")?;
        }
        write!(f, "])")
    }
}
