//! Enumeration of connected, degree-bounded graphs with colored nodes, up to
//! color-preserving isomorphism.
//!
//! The core ([`generate_edges`]) packs each candidate adjacency matrix into a
//! `u64`, enumerates every bitset per edge count in parallel, drops the ones
//! violating the degree bounds or connectivity, and keeps one representative
//! per isomorphism class by bucketing on a coarse invariant and then trying
//! every color-preserving permutation.
//!
//! [`GraphGenerator`] sits on top of the core: it walks all multisets of an
//! alphabet of node labels, maps each to its canonical coloring, and caches
//! the results in memory and optionally on disk.
//!
//! ```
//! use graph_enumeration::generate_edges;
//!
//! // the triangle is the only connected 2-regular graph on three nodes
//! let graphs = generate_edges(&[0, 1, 2], 2, 2).unwrap();
//! assert_eq!(graphs, vec![vec![(0, 1), (0, 2), (1, 2)]]);
//! ```

pub mod cache;
pub mod candidate;
pub mod coloring;
pub mod combination;
pub mod config;
pub mod dedup;
pub mod edge_generator;
pub mod encoding;
pub mod error;
pub mod generator;
pub mod graph;
pub mod permutation;

pub use cache::{EdgeConfigurationFileCache, SampleSize};
pub use candidate::{EnumerationContext, GraphCandidate, Invariant};
pub use coloring::{DegreeBounds, NodeColoring};
pub use config::GeneratorConfig;
pub use edge_generator::{EdgeList, generate_edge_configurations, generate_edges};
pub use encoding::{Encoding, MAX_NODES, Triu};
pub use error::{EnumerationError, GeneratorError};
pub use generator::{GraphGenerator, GraphGeneratorBuilder, Graphs, canonical_representation};
pub use graph::Graph;
pub use permutation::PermutationTable;
