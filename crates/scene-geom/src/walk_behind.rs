use crate::{PolygonRegion, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scenery outline that draws in front of characters standing above its baseline.
///
/// A character whose feet are at `y < baseline_y` is further from the camera than the
/// scenery, so the region must be drawn over it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalkBehindRegion {
    pub name: String,
    pub vertices: Vec<Vec2>,
    pub baseline_y: f32,
}

impl WalkBehindRegion {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec2>, baseline_y: f32) -> Self {
        Self {
            name: name.into(),
            vertices,
            baseline_y,
        }
    }

    /// Whether this region occludes a character standing at `y`.
    pub fn occludes_at_y(&self, y: f32) -> bool {
        y < self.baseline_y
    }

    /// Whether the outline covers `p`, e.g. for partial occlusion of a sprite.
    pub fn covers(&self, p: Vec2) -> bool {
        self.vertices.len() >= 3 && crate::region::point_in_polygon(p, &self.vertices)
    }

    /// View of the outline as a non-walkable polygon, useful for debug drawing.
    pub fn as_polygon(&self) -> PolygonRegion {
        PolygonRegion::obstacle(self.name.clone(), self.vertices.clone())
    }
}
