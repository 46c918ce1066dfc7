//! Boundary normalization: mapping a data value to a discrete bin.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::levels::LevelSet;
use crate::error::ClimplotError;

/// Which out-of-range extensions a mapping carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extend {
    Neither,
    Min,
    Max,
    #[default]
    Both,
}

impl Extend {
    pub fn has_min(&self) -> bool {
        matches!(self, Extend::Min | Extend::Both)
    }

    pub fn has_max(&self) -> bool {
        matches!(self, Extend::Max | Extend::Both)
    }
}

impl FromStr for Extend {
    type Err = ClimplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neither" => Ok(Extend::Neither),
            "min" => Ok(Extend::Min),
            "max" => Ok(Extend::Max),
            "both" => Ok(Extend::Both),
            _ => Err(ClimplotError::InvalidParameter {
                param: "extend".to_string(),
                message: format!("Unknown extend mode: {}", s),
            }),
        }
    }
}

/// Where a value falls relative to a set of boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bin {
    /// Below the first boundary
    Under,
    /// Inside bin `i`, i.e. `b[i] <= value < b[i + 1]` (the last bin is
    /// closed on the right)
    Index(usize),
    /// Above the last boundary
    Over,
    /// NaN
    Missing,
}

/// Maps values to bins of a [`LevelSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryNorm {
    levels: LevelSet,
    extend: Extend,
}

impl BoundaryNorm {
    pub fn new(levels: LevelSet, extend: Extend) -> Self {
        Self { levels, extend }
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn extend(&self) -> Extend {
        self.extend
    }

    pub fn n_bins(&self) -> usize {
        self.levels.n_bins()
    }

    /// Locate `value` among the boundaries
    pub fn bin(&self, value: f64) -> Bin {
        if value.is_nan() {
            return Bin::Missing;
        }
        let b = self.levels.boundaries();
        if value < b[0] {
            return Bin::Under;
        }
        if value > b[b.len() - 1] {
            return Bin::Over;
        }
        // number of boundaries <= value, minus one
        let upper = b.partition_point(|&x| x <= value);
        Bin::Index((upper - 1).min(self.n_bins() - 1))
    }
}
