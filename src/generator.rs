//! Graph generation over an alphabet of node labels.
//!
//! For every node count in range and every multiset of labels, the labels are
//! mapped to the canonical coloring the core expects, the core enumerates the
//! edge configurations, and the edges are mapped back onto the caller's node
//! order. Results are cached in memory per canonical coloring, and optionally
//! on disk.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, info};

use crate::cache::{EdgeConfigurationFileCache, remap};
use crate::coloring::{DegreeBounds, NodeColoring};
use crate::config::GeneratorConfig;
use crate::edge_generator::{EdgeList, generate_edge_configurations};
use crate::encoding::MAX_NODES;
use crate::error::{EnumerationError, GeneratorError};
use crate::graph::Graph;

/// Node lists longer than this go to the file cache, when one is configured,
/// and bypass the memory cache.
const FILE_CACHE_MIN_NODES: usize = 5;

/// Canonical coloring of a node list and the original position of every
/// canonical node.
///
/// Labels are grouped in order of first appearance, groups are stably sorted
/// by size (largest first), and the k-th group gets color `k`. Two node lists
/// with the same canonical coloring share their edge configurations.
///
/// ```
/// use graph_enumeration::canonical_representation;
///
/// let (colors, index_list) = canonical_representation(&["A", "B", "A"]);
/// assert_eq!(colors, vec![0, 0, 1]);
/// assert_eq!(index_list, vec![0, 2, 1]);
/// ```
pub fn canonical_representation<T: Eq + Hash>(node_list: &[T]) -> (Vec<u32>, Vec<usize>) {
    let mut groups: IndexMap<&T, Vec<usize>> = IndexMap::new();
    for (idx, node) in node_list.iter().enumerate() {
        groups.entry(node).or_default().push(idx);
    }
    let mut groups: Vec<Vec<usize>> = groups.into_values().collect();
    groups.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut colors = Vec::with_capacity(node_list.len());
    let mut index_list = Vec::with_capacity(node_list.len());
    for (color, indices) in groups.into_iter().enumerate() {
        colors.extend(std::iter::repeat_n(color as u32, indices.len()));
        index_list.extend(indices);
    }
    (colors, index_list)
}

pub struct GraphGenerator<T> {
    nodes: Vec<T>,
    min_nodes: usize,
    max_nodes: usize,
    bounds: DegreeBounds,
    use_memory_cache: bool,
    file_cache_path: Option<PathBuf>,
    memory_cache_size_limit: usize,
    memory_cache: HashMap<Vec<u32>, Vec<EdgeList>>,
}

/// Builder for [`GraphGenerator`]; degrees are signed until validated.
pub struct GraphGeneratorBuilder<T> {
    nodes: Vec<T>,
    max_nodes: usize,
    min_nodes: Option<usize>,
    max_degree: Option<i64>,
    min_degree: i64,
    use_memory_cache: bool,
    file_cache_path: Option<PathBuf>,
}

impl<T> GraphGeneratorBuilder<T> {
    pub fn min_nodes(mut self, min_nodes: usize) -> Self {
        self.min_nodes = Some(min_nodes);
        self
    }

    pub fn max_degree(mut self, max_degree: i64) -> Self {
        self.max_degree = Some(max_degree);
        self
    }

    pub fn min_degree(mut self, min_degree: i64) -> Self {
        self.min_degree = min_degree;
        self
    }

    pub fn use_memory_cache(mut self, enabled: bool) -> Self {
        self.use_memory_cache = enabled;
        self
    }

    pub fn file_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_cache_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<GraphGenerator<T>, GeneratorError> {
        if self.nodes.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        let min_nodes = self.min_nodes.unwrap_or(self.max_nodes);
        if self.max_nodes > MAX_NODES {
            return Err(EnumerationError::InvalidNodeCount {
                count: self.max_nodes,
                max: MAX_NODES,
            }
            .into());
        }
        if min_nodes == 0 || min_nodes > self.max_nodes {
            return Err(GeneratorError::InvalidNodeRange {
                min: min_nodes,
                max: self.max_nodes,
            });
        }
        let max_degree = self.max_degree.unwrap_or(self.max_nodes as i64 - 1);
        let bounds = DegreeBounds::try_from((self.min_degree, max_degree))?;
        let memory_cache_size_limit = if self.file_cache_path.is_some() {
            FILE_CACHE_MIN_NODES
        } else {
            usize::MAX
        };
        Ok(GraphGenerator {
            nodes: self.nodes,
            min_nodes,
            max_nodes: self.max_nodes,
            bounds,
            use_memory_cache: self.use_memory_cache,
            file_cache_path: self.file_cache_path,
            memory_cache_size_limit,
            memory_cache: HashMap::new(),
        })
    }
}

impl<T> GraphGenerator<T> {
    /// Starts a builder with the defaults: `min_nodes = max_nodes`,
    /// `max_degree = max_nodes - 1`, `min_degree = 1`, memory cache on, no
    /// file cache.
    pub fn builder(nodes: Vec<T>, max_nodes: usize) -> GraphGeneratorBuilder<T> {
        GraphGeneratorBuilder {
            nodes,
            max_nodes,
            min_nodes: None,
            max_degree: None,
            min_degree: 1,
            use_memory_cache: true,
            file_cache_path: None,
        }
    }

    pub fn degree_bounds(&self) -> DegreeBounds {
        self.bounds
    }

    pub fn node_range(&self) -> std::ops::RangeInclusive<usize> {
        self.min_nodes..=self.max_nodes
    }

    /// Number of distinct canonical colorings held in memory.
    pub fn memory_cache_len(&self) -> usize {
        self.memory_cache.len()
    }

    fn file_cache_basename(&self, canonical: &[u32]) -> String {
        format!(
            "D{}-{}B{}",
            self.bounds.min(),
            self.bounds.max(),
            canonical.iter().join("-")
        )
    }
}

impl GraphGenerator<String> {
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let mut builder = GraphGenerator::builder(config.nodes.clone(), config.max_nodes)
            .min_degree(config.min_degree)
            .use_memory_cache(config.use_memory_cache);
        if let Some(min_nodes) = config.min_nodes {
            builder = builder.min_nodes(min_nodes);
        }
        if let Some(max_degree) = config.max_degree {
            builder = builder.max_degree(max_degree);
        }
        if let Some(path) = &config.file_cache_path {
            builder = builder.file_cache_path(path);
        }
        builder.build()
    }
}

impl<T: Clone + Eq + Hash> GraphGenerator<T> {
    /// Every multiset of the alphabet, by increasing size, each in alphabet
    /// order.
    pub fn node_lists(&self) -> impl Iterator<Item = Vec<T>> + '_ {
        self.node_range().flat_map(move |size| {
            self.nodes
                .iter()
                .cloned()
                .combinations_with_replacement(size)
        })
    }

    /// Unique edge configurations for `node_list`, as indices into it.
    pub fn edge_configurations(&mut self, node_list: &[T]) -> Result<Vec<EdgeList>, GeneratorError> {
        let (canonical, index_list) = canonical_representation(node_list);
        let memory_eligible =
            self.use_memory_cache && node_list.len() <= self.memory_cache_size_limit;

        let cached = if memory_eligible {
            self.memory_cache.get(&canonical).cloned()
        } else {
            None
        };
        let mut configurations = match cached {
            Some(configurations) => configurations,
            None => {
                let file_cache = match &self.file_cache_path {
                    Some(dir) if node_list.len() > FILE_CACHE_MIN_NODES => Some(
                        EdgeConfigurationFileCache::new(dir, &self.file_cache_basename(&canonical))?,
                    ),
                    _ => None,
                };
                if let Some(cache) = &file_cache {
                    if cache.exists() {
                        info!(path = %cache.path().display(), "edge configurations loaded from file cache");
                        return cache.load_all(Some(index_list.as_slice()));
                    }
                }

                let coloring = NodeColoring::new(canonical.clone())?;
                let configurations = generate_edge_configurations(&coloring, self.bounds)?;
                if memory_eligible {
                    self.memory_cache.insert(canonical, configurations.clone());
                }
                if let Some(cache) = &file_cache {
                    cache.save(&configurations)?;
                }
                configurations
            }
        };

        for configuration in &mut configurations {
            remap(configuration, &index_list);
        }
        debug!(nodes = node_list.len(), configurations = configurations.len(), "edge configurations ready");
        Ok(configurations)
    }

    /// Lazily yields every graph: node counts in increasing order, then
    /// multisets of labels, then edge configurations.
    pub fn graphs(&mut self) -> Graphs<'_, T> {
        let node_lists: Vec<Vec<T>> = self.node_lists().collect();
        Graphs {
            generator: self,
            node_lists: node_lists.into_iter(),
            current: None,
        }
    }
}

/// Iterator returned by [`GraphGenerator::graphs`].
pub struct Graphs<'a, T> {
    generator: &'a mut GraphGenerator<T>,
    node_lists: std::vec::IntoIter<Vec<T>>,
    current: Option<(Vec<T>, std::vec::IntoIter<EdgeList>)>,
}

impl<T: Clone + Eq + Hash> Iterator for Graphs<'_, T> {
    type Item = Result<Graph<T>, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((nodes, configurations)) = &mut self.current {
                if let Some(edges) = configurations.next() {
                    return Some(Ok(Graph::new(nodes.clone(), edges)));
                }
                self.current = None;
            }
            let node_list = self.node_lists.next()?;
            match self.generator.edge_configurations(&node_list) {
                Ok(configurations) => self.current = Some((node_list, configurations.into_iter())),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
