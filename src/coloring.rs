//! Validated inputs of the enumeration core: the node coloring and the degree
//! bounds.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::encoding::MAX_NODES;
use crate::error::{EnumerationError, Result};

/// Ordered node colors forming contiguous, non-decreasing runs that start at 0.
///
/// Because every color occupies one contiguous block of indices, relabelings
/// that respect colors only ever shuffle indices inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct NodeColoring {
    colors: Vec<u32>,
}

impl NodeColoring {
    pub fn new(colors: Vec<u32>) -> Result<Self> {
        if colors.is_empty() || colors.len() > MAX_NODES {
            return Err(EnumerationError::InvalidNodeCount {
                count: colors.len(),
                max: MAX_NODES,
            });
        }
        let mut previous: Option<u32> = None;
        for (position, &color) in colors.iter().enumerate() {
            let valid = match previous {
                None => color == 0,
                Some(p) => color == p || color == p + 1,
            };
            if !valid {
                return Err(EnumerationError::InvalidColoring {
                    position,
                    color,
                    previous,
                });
            }
            previous = Some(color);
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a validated coloring; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn color(&self, node: usize) -> u32 {
        self.colors[node]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.colors
    }

    /// Number of distinct colors.
    pub fn color_count(&self) -> usize {
        self.colors.last().map_or(0, |&c| c as usize + 1)
    }

    /// Index range of each color, in increasing color order.
    pub fn blocks(&self) -> Vec<Range<usize>> {
        let mut blocks = Vec::with_capacity(self.color_count());
        let mut start = 0;
        for i in 1..=self.colors.len() {
            if i == self.colors.len() || self.colors[i] != self.colors[start] {
                blocks.push(start..i);
                start = i;
            }
        }
        blocks
    }
}

impl TryFrom<Vec<u32>> for NodeColoring {
    type Error = EnumerationError;

    fn try_from(colors: Vec<u32>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<NodeColoring> for Vec<u32> {
    fn from(coloring: NodeColoring) -> Self {
        coloring.colors
    }
}

/// Inclusive bounds on the degree of every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DegreeBounds {
    min: u32,
    max: u32,
}

impl DegreeBounds {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(EnumerationError::InvalidDegreeBounds {
                min: min.into(),
                max: max.into(),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn contains(&self, degree: u32) -> bool {
        (self.min..=self.max).contains(&degree)
    }
}

/// Signed `(min, max)` as it arrives from configuration files.
impl TryFrom<(i64, i64)> for DegreeBounds {
    type Error = EnumerationError;

    fn try_from((min, max): (i64, i64)) -> Result<Self> {
        let invalid = EnumerationError::InvalidDegreeBounds { min, max };
        if min > max {
            return Err(invalid);
        }
        match (u32::try_from(min), u32::try_from(max)) {
            (Ok(min), Ok(max)) => Ok(Self { min, max }),
            _ => Err(invalid),
        }
    }
}
