#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Y band over which character render scale is interpolated to fake perspective depth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleZone {
    pub min_y: f32,
    pub max_y: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl ScaleZone {
    pub fn new(min_y: f32, max_y: f32, min_scale: f32, max_scale: f32) -> Self {
        Self {
            min_y,
            max_y,
            min_scale,
            max_scale,
        }
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    /// Scale at `y`, interpolated from `min_scale` at `min_y` to `max_scale` at `max_y`.
    ///
    /// A zero-height band yields `min_scale`.
    pub fn scale_at(&self, y: f32) -> f32 {
        let span = self.max_y - self.min_y;
        if span <= f32::EPSILON {
            return self.min_scale;
        }
        let t = ((y - self.min_y) / span).clamp(0.0, 1.0);
        self.min_scale + (self.max_scale - self.min_scale) * t
    }

    pub fn is_inverted(&self) -> bool {
        self.max_y < self.min_y
    }

    /// Touching bands (`a.max_y == b.min_y`) do not overlap.
    pub fn overlaps(&self, other: &ScaleZone) -> bool {
        self.min_y < other.max_y && other.min_y < self.max_y
    }
}
