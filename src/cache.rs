//! On-disk cache of edge configurations.
//!
//! One JSON file per canonical coloring and degree bounds, holding the edge
//! lists in canonical node indices. Loading can remap them to the caller's
//! node order through an index list.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::index;
use tracing::debug;

use crate::edge_generator::EdgeList;
use crate::error::GeneratorError;

/// How many configurations [`EdgeConfigurationFileCache::load_random`] loads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleSize {
    /// Absolute number, clamped to what the cache holds.
    Count(usize),
    /// Share of the cache in (0, 1); at least one configuration is loaded.
    Fraction(f64),
}

#[derive(Debug, Clone)]
pub struct EdgeConfigurationFileCache {
    path: PathBuf,
}

impl EdgeConfigurationFileCache {
    /// Creates `cache_dir` if needed. The cache file is
    /// `{cache_dir}/{basename}.json`.
    pub fn new(cache_dir: impl AsRef<Path>, basename: &str) -> Result<Self, GeneratorError> {
        let dir = cache_dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(format!("{basename}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes to a sibling `.tmp` file and renames it into place, so the
    /// cache file is either complete or absent.
    pub fn save(&self, configurations: &[EdgeList]) -> Result<(), GeneratorError> {
        let tmp_path = self.tmp_path();
        let written = File::create(&tmp_path)
            .map_err(GeneratorError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                serde_json::to_writer(&mut writer, configurations)?;
                writer.flush()?;
                Ok(())
            });
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), count = configurations.len(), "saved edge configurations");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn read(&self) -> Result<Vec<EdgeList>, GeneratorError> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Every cached configuration, remapped through `index_list` when given.
    pub fn load_all(&self, index_list: Option<&[usize]>) -> Result<Vec<EdgeList>, GeneratorError> {
        let mut configurations = self.read()?;
        if let Some(index_list) = index_list {
            for configuration in &mut configurations {
                remap(configuration, index_list);
            }
        }
        Ok(configurations)
    }

    /// A random subset of the cached configurations, sampled without
    /// replacement.
    pub fn load_random<R: Rng + ?Sized>(
        &self,
        size: SampleSize,
        index_list: Option<&[usize]>,
        rng: &mut R,
    ) -> Result<Vec<EdgeList>, GeneratorError> {
        let mut configurations = self.read()?;
        let total = configurations.len();
        let amount = match size {
            SampleSize::Count(0) => return Err(GeneratorError::InvalidSampleSize),
            SampleSize::Count(count) => count.min(total),
            SampleSize::Fraction(f) if f > 0.0 && f < 1.0 => ((total as f64 * f) as usize).max(1).min(total),
            SampleSize::Fraction(_) => return Err(GeneratorError::InvalidSampleSize),
        };
        let mut selected: Vec<EdgeList> = index::sample(rng, total, amount)
            .into_iter()
            .map(|i| std::mem::take(&mut configurations[i]))
            .collect();
        if let Some(index_list) = index_list {
            for configuration in &mut selected {
                remap(configuration, index_list);
            }
        }
        Ok(selected)
    }
}

/// Canonical node `k` becomes original node `index_list[k]`.
pub(crate) fn remap(configuration: &mut EdgeList, index_list: &[usize]) {
    for (a, b) in configuration.iter_mut() {
        *a = index_list[*a];
        *b = index_list[*b];
    }
}
