use core::f32::consts::TAU;

use crate::{Bounds, GeometryError, PolygonRegion, ScaleZone, Vec2, WalkBehindRegion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Samples taken along a segment by [`WalkableArea::constrain_to_walkable`].
pub const DEFAULT_CONSTRAIN_SAMPLES: u32 = 10;

/// Ring search parameters for [`WalkableArea::find_nearest_walkable_point_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NearestSearch {
    /// Radius increment between rings.
    pub step: f32,
    /// Largest ring radius tried (inclusive).
    pub max_radius: f32,
    /// Points sampled per ring, evenly spaced starting at +X.
    pub angular_samples: u32,
}

impl Default for NearestSearch {
    fn default() -> Self {
        Self {
            step: 10.0,
            max_radius: 200.0,
            angular_samples: 16,
        }
    }
}

/// The walkable-area model of one scene.
///
/// Composes walkable and non-walkable polygons, walk-behind occluders and perspective scale
/// zones. Obstacles win over walkable ground wherever they overlap, and an area with no
/// regions at all is walkable everywhere.
#[derive(Debug, Clone, Default)]
pub struct WalkableArea {
    regions: Vec<PolygonRegion>,
    walk_behind_regions: Vec<WalkBehindRegion>,
    scale_zones: Vec<ScaleZone>,
    bounds: Option<Bounds>,
}

impl WalkableArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions(regions: Vec<PolygonRegion>) -> Self {
        let mut area = Self::new();
        area.set_regions(regions);
        area
    }

    pub fn regions(&self) -> &[PolygonRegion] {
        &self.regions
    }

    pub fn set_regions(&mut self, regions: Vec<PolygonRegion>) {
        self.regions = regions;
        self.recompute_bounds();
    }

    pub fn add_region(&mut self, region: PolygonRegion) {
        self.regions.push(region);
        self.recompute_bounds();
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
        self.bounds = None;
    }

    /// Bounding box of all non-degenerate walkable regions.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn scale_zones(&self) -> &[ScaleZone] {
        &self.scale_zones
    }

    pub fn add_scale_zone(&mut self, zone: ScaleZone) {
        self.scale_zones.push(zone);
    }

    pub fn walk_behind_regions(&self) -> &[WalkBehindRegion] {
        &self.walk_behind_regions
    }

    pub fn add_walk_behind(&mut self, region: WalkBehindRegion) {
        self.walk_behind_regions.push(region);
    }

    fn recompute_bounds(&mut self) {
        self.bounds = self
            .regions
            .iter()
            .filter(|r| r.walkable)
            .filter_map(PolygonRegion::bounds)
            .reduce(Bounds::union);
    }

    pub fn is_point_walkable(&self, p: Vec2) -> bool {
        // Degenerate regions contain nothing, so an area made only of them is still open.
        if self.regions.iter().all(PolygonRegion::is_degenerate) {
            return true;
        }

        // Nothing outside the walkable bounds can be inside a walkable region.
        match self.bounds {
            Some(bounds) if bounds.contains(p) => {}
            _ => return false,
        }

        let mut in_walkable = false;
        for region in &self.regions {
            if !region.contains(p) {
                continue;
            }
            if !region.walkable {
                return false;
            }
            in_walkable = true;
        }
        in_walkable
    }

    /// Render scale at `y`: first matching zone in declaration order, else `1.0`.
    pub fn get_scale_at_y(&self, y: f32) -> f32 {
        self.scale_zones
            .iter()
            .find(|z| z.contains_y(y))
            .map(|z| z.scale_at(y))
            .unwrap_or(1.0)
    }

    /// Walk-behind regions drawn in front of a character standing at `y`, back to front.
    pub fn get_walk_behind_at_y(&self, y: f32) -> Vec<&WalkBehindRegion> {
        let mut out: Vec<&WalkBehindRegion> = self
            .walk_behind_regions
            .iter()
            .filter(|r| r.occludes_at_y(y))
            .collect();
        out.sort_by(|a, b| a.baseline_y.total_cmp(&b.baseline_y));
        out
    }

    pub fn constrain_to_walkable(&self, from: Vec2, to: Vec2) -> Vec2 {
        self.constrain_to_walkable_with(from, to, DEFAULT_CONSTRAIN_SAMPLES)
    }

    /// Slide from `from` towards `to`, stopping at the last walkable sample before the first
    /// blocked one. Returns `to` unchanged when it is already walkable.
    pub fn constrain_to_walkable_with(&self, from: Vec2, to: Vec2, samples: u32) -> Vec2 {
        if self.is_point_walkable(to) {
            return to;
        }

        let samples = samples.max(1);
        let mut last = from;
        for i in 1..=samples {
            let p = from.lerp(to, i as f32 / samples as f32);
            if !self.is_point_walkable(p) {
                break;
            }
            last = p;
        }
        last
    }

    pub fn find_nearest_walkable_point(&self, target: Vec2) -> Vec2 {
        self.find_nearest_walkable_point_with(target, &NearestSearch::default())
    }

    /// Search concentric rings around `target`, nearest ring first.
    ///
    /// Returns `target` unchanged when it is walkable, and also when nothing walkable lies
    /// within `search.max_radius` (a broken level; callers must cope).
    pub fn find_nearest_walkable_point_with(&self, target: Vec2, search: &NearestSearch) -> Vec2 {
        if self.is_point_walkable(target) {
            return target;
        }
        if search.step <= 0.0 || search.angular_samples == 0 {
            return target;
        }

        let mut ring = 1u32;
        loop {
            let radius = search.step * ring as f32;
            if radius > search.max_radius {
                return target;
            }
            for i in 0..search.angular_samples {
                let angle = TAU * i as f32 / search.angular_samples as f32;
                let p = target + Vec2::new(angle.cos(), angle.sin()) * radius;
                if self.is_point_walkable(p) {
                    return p;
                }
            }
            ring += 1;
        }
    }

    /// Nine-point footprint test: the center plus eight compass points at `radius`.
    ///
    /// Passes when at least `min_samples` of the nine samples are walkable.
    pub fn is_footprint_walkable(&self, center: Vec2, radius: f32, min_samples: u32) -> bool {
        let d = radius * core::f32::consts::FRAC_1_SQRT_2;
        let offsets = [
            Vec2::ZERO,
            Vec2::new(radius, 0.0),
            Vec2::new(-radius, 0.0),
            Vec2::new(0.0, radius),
            Vec2::new(0.0, -radius),
            Vec2::new(d, d),
            Vec2::new(d, -d),
            Vec2::new(-d, d),
            Vec2::new(-d, -d),
        ];
        let walkable = offsets
            .iter()
            .filter(|o| self.is_point_walkable(center + **o))
            .count() as u32;
        walkable >= min_samples
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        match self.issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every content problem in the area, in a stable order.
    pub fn issues(&self) -> Vec<GeometryError> {
        let mut out = Vec::new();

        for region in &self.regions {
            if region.is_degenerate() {
                out.push(GeometryError::DegenerateRegion {
                    name: region.name.clone(),
                    vertex_count: region.vertices.len(),
                });
            }
        }

        for (index, zone) in self.scale_zones.iter().enumerate() {
            if zone.is_inverted() {
                out.push(GeometryError::InvertedScaleZone { index });
            }
        }

        for (first, a) in self.scale_zones.iter().enumerate() {
            for (second, b) in self.scale_zones.iter().enumerate().skip(first + 1) {
                if a.overlaps(b) {
                    out.push(GeometryError::OverlappingScaleZones { first, second });
                }
            }
        }

        out
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct WalkableAreaSerde {
    #[serde(default)]
    regions: Vec<PolygonRegion>,
    #[serde(default)]
    walk_behind_regions: Vec<WalkBehindRegion>,
    #[serde(default)]
    scale_zones: Vec<ScaleZone>,
}

#[cfg(feature = "serde")]
impl Serialize for WalkableArea {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WalkableAreaSerde {
            regions: self.regions.clone(),
            walk_behind_regions: self.walk_behind_regions.clone(),
            scale_zones: self.scale_zones.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for WalkableArea {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = WalkableAreaSerde::deserialize(deserializer)?;
        let mut area = WalkableArea::with_regions(data.regions);
        area.walk_behind_regions = data.walk_behind_regions;
        area.scale_zones = data.scale_zones;
        Ok(area)
    }
}
