//! JSON configuration of a generator run.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Settings read by the binary. Degrees are signed so that negative values
/// in a file surface as `InvalidDegreeBounds` instead of a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Node labels, e.g. `["C", "H", "O"]`.
    pub nodes: Vec<String>,
    pub max_nodes: usize,
    /// Defaults to `max_nodes`.
    pub min_nodes: Option<usize>,
    /// Defaults to `max_nodes - 1`.
    pub max_degree: Option<i64>,
    pub min_degree: i64,
    pub use_memory_cache: bool,
    pub file_cache_path: Option<PathBuf>,
    /// Worker threads; the rayon default when absent.
    pub threads: Option<usize>,
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            max_nodes: 1,
            min_nodes: None,
            max_degree: None,
            min_degree: 1,
            use_memory_cache: true,
            file_cache_path: None,
            threads: None,
            output: PathBuf::from("graphs.json"),
        }
    }
}

impl GeneratorConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
