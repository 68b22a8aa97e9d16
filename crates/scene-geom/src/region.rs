use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounding box of `points`, or `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.include(*p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(self, other: Self) -> Self {
        let mut out = self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// A named polygon marking either walkable ground or an obstacle.
///
/// The boundary closes implicitly from the last vertex back to the first. Polygons with fewer
/// than three vertices are degenerate and contain nothing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonRegion {
    pub name: String,
    pub walkable: bool,
    pub vertices: Vec<Vec2>,
}

impl PolygonRegion {
    pub fn new(name: impl Into<String>, walkable: bool, vertices: Vec<Vec2>) -> Self {
        Self {
            name: name.into(),
            walkable,
            vertices,
        }
    }

    pub fn walkable(name: impl Into<String>, vertices: Vec<Vec2>) -> Self {
        Self::new(name, true, vertices)
    }

    pub fn obstacle(name: impl Into<String>, vertices: Vec<Vec2>) -> Self {
        Self::new(name, false, vertices)
    }

    /// Axis-aligned rectangle spanning `min`..`max`, wound clockwise in screen space.
    pub fn rect(name: impl Into<String>, walkable: bool, min: Vec2, max: Vec2) -> Self {
        Self::new(
            name,
            walkable,
            vec![
                min,
                Vec2::new(max.x, min.y),
                max,
                Vec2::new(min.x, max.y),
            ],
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_degenerate() {
            return None;
        }
        Bounds::from_points(&self.vertices)
    }

    /// Even-odd ray casting: a horizontal ray from `p` towards +X flips parity at every crossed
    /// edge.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        point_in_polygon(p, &self.vertices)
    }
}

pub(crate) fn point_in_polygon(p: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        // Half-open comparison so a ray passing through a shared vertex counts once.
        if (vi.y > p.y) != (vj.y > p.y) {
            let intersect_x = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
