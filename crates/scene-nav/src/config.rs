//! Navigation configuration.
//!
//! Every field has a default, so a config block only needs to name what it overrides:
//!
//! ```yaml
//! cell_size: 12
//! character_radius: 40.0
//! smoothing: collinear
//! ```

#[cfg(feature = "serde")]
use std::path::Path;

use scene_geom::NearestSearch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NavError, Result};

/// Post-processing applied to raw A* cell routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathSmoothing {
    /// One waypoint per visited cell.
    None,
    /// Drop intermediate waypoints on straight runs.
    Collinear,
    /// Skip every waypoint that a straight walkable line can bypass.
    #[default]
    LineOfSight,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Grid cell edge in scene pixels.
    pub cell_size: u32,

    /// Clearance kept between paths and obstacles. `0.0` disables inflation and accepts any
    /// cell whose center is walkable.
    pub character_radius: f32,

    pub smoothing: PathSmoothing,

    /// Enables the debug overlay and per-query diagnostics.
    pub debug: bool,

    /// Samples used when sliding towards an unwalkable target.
    pub constrain_samples: u32,

    /// Ring search used to re-target clicks on unwalkable ground.
    pub nearest_search: NearestSearch,

    /// Walkable samples (out of 9) required for a character footprint to fit.
    pub footprint_min_samples: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            cell_size: 16,
            character_radius: 32.0,
            smoothing: PathSmoothing::default(),
            debug: false,
            constrain_samples: scene_geom::DEFAULT_CONSTRAIN_SAMPLES,
            nearest_search: NearestSearch::default(),
            footprint_min_samples: 8,
        }
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(NavError::InvalidCellSize(self.cell_size));
        }
        if !self.character_radius.is_finite() || self.character_radius < 0.0 {
            return Err(NavError::InvalidRadius(self.character_radius));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }
}
