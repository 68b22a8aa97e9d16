use core::fmt;

use scene_geom::{Vec2, WalkableArea};
use tracing::{debug, warn};

use crate::{NavError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer cell coordinate. Out-of-range coordinates are valid values; they are simply never
/// walkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Debug overlay classification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    Walkable,
    Blocked,
}

impl CellColor {
    /// Translucent fill suggested for overlays.
    pub fn rgba(self) -> [u8; 4] {
        match self {
            CellColor::Walkable => [0, 200, 0, 64],
            CellColor::Blocked => [220, 0, 0, 96],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugCell {
    pub x: i32,
    pub y: i32,
    pub color: CellColor,
}

/// Uniform walkability grid over a scene's logical coordinate space.
///
/// Cell `(x, y)` covers `[x * cell_size, (x + 1) * cell_size)` horizontally (likewise
/// vertically); its world position is its center. The grid holds no reference to the
/// [`WalkableArea`] it was sampled from: any change to the area means building a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationGrid {
    width: i32,
    height: i32,
    cell_size: u32,
    walkable: Vec<bool>,
}

impl NavigationGrid {
    /// Fully open grid of `width` x `height` cells.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        Self::filled(width, height, cell_size, true)
    }

    /// Parse an ASCII map: `.` is walkable, `#` is blocked, one text line per row.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(cell_size: u32, map: &str) -> Result<Self> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u32;

        let mut grid = Self::filled(width, height, cell_size, true)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(NavError::InvalidGridData {
                    width,
                    height,
                    reason: format!("row {y} has a different length"),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let walkable = match ch {
                    '.' => true,
                    '#' => false,
                    other => {
                        return Err(NavError::InvalidGridData {
                            width,
                            height,
                            reason: format!("unexpected {other:?} at ({x}, {y})"),
                        })
                    }
                };
                grid.walkable[y * width as usize + x] = walkable;
            }
        }
        Ok(grid)
    }

    /// Discretize `area` over a `scene_width` x `scene_height` scene.
    ///
    /// A cell is walkable when its center is walkable and, for `character_radius > 0`, no
    /// center-blocked cell lies within `character_radius` of it. The grid is
    /// `ceil(scene_width / cell_size)` x `ceil(scene_height / cell_size)` cells.
    pub fn from_scene(
        area: &WalkableArea,
        scene_width: u32,
        scene_height: u32,
        cell_size: u32,
        character_radius: f32,
    ) -> Result<Self> {
        if !character_radius.is_finite() || character_radius < 0.0 {
            return Err(NavError::InvalidRadius(character_radius));
        }
        if cell_size == 0 {
            return Err(NavError::InvalidCellSize(cell_size));
        }
        if scene_width == 0 || scene_height == 0 {
            return Err(NavError::InvalidSceneSize {
                width: scene_width,
                height: scene_height,
            });
        }
        let width = scene_width.div_ceil(cell_size);
        let height = scene_height.div_ceil(cell_size);

        let mut grid = Self::filled(width, height, cell_size, false)?;
        for y in 0..grid.height {
            for x in 0..grid.width {
                let center = grid.grid_to_world(GridCoord::new(x, y));
                let idx = (y * grid.width + x) as usize;
                grid.walkable[idx] = area.is_point_walkable(center);
            }
        }

        let sampled = grid.walkable_count();
        if character_radius > 0.0 {
            grid.inflate(character_radius);
        }
        let walkable = grid.walkable_count();

        debug!(
            width,
            height,
            cell_size,
            character_radius,
            sampled,
            walkable,
            "built navigation grid"
        );

        if walkable == 0 {
            if sampled > 0 {
                warn!(
                    character_radius,
                    sampled,
                    "clearance radius removed every walkable cell; no corridor is wide enough"
                );
            } else {
                warn!(
                    width,
                    height,
                    "navigation grid has no walkable cells; all movement will fail"
                );
            }
        }

        Ok(grid)
    }

    fn filled(width: u32, height: u32, cell_size: u32, walkable: bool) -> Result<Self> {
        if cell_size == 0 {
            return Err(NavError::InvalidCellSize(cell_size));
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(NavError::InvalidSceneSize { width, height });
        };
        if w == 0 || h == 0 {
            return Err(NavError::InvalidSceneSize { width, height });
        }
        Ok(Self {
            width: w,
            height: h,
            cell_size,
            walkable: vec![walkable; width as usize * height as usize],
        })
    }

    // Clears every cell that has a blocked cell within `radius` (center to center).
    fn inflate(&mut self, radius: f32) {
        let cs = self.cell_size as f32;
        let reach = (radius / cs).floor() as i32;
        let r2 = radius * radius;

        let mut offsets = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let ox = dx as f32 * cs;
                let oy = dy as f32 * cs;
                if ox * ox + oy * oy <= r2 {
                    offsets.push((dx, dy));
                }
            }
        }
        if offsets.is_empty() {
            return;
        }

        let source = self.walkable.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = (y * self.width + x) as usize;
                if !source[idx] {
                    continue;
                }
                let crowded = offsets.iter().any(|&(dx, dy)| {
                    self.idx(GridCoord::new(x + dx, y + dy))
                        .is_some_and(|n| !source[n])
                });
                if crowded {
                    self.walkable[idx] = false;
                }
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn in_bounds(&self, cell: GridCoord) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub(crate) fn idx(&self, cell: GridCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some((cell.y * self.width + cell.x) as usize)
    }

    pub(crate) fn cell_from_idx(&self, idx: usize) -> GridCoord {
        let idx = idx as i32;
        GridCoord::new(idx % self.width, idx / self.width)
    }

    pub(crate) fn len(&self) -> usize {
        self.walkable.len()
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.is_walkable_cell(GridCoord::new(x, y))
    }

    pub fn is_walkable_cell(&self, cell: GridCoord) -> bool {
        self.idx(cell).is_some_and(|idx| self.walkable[idx])
    }

    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|w| **w).count()
    }

    /// Cell containing `p`. The result may lie outside the grid.
    pub fn world_to_grid(&self, p: Vec2) -> GridCoord {
        let cs = self.cell_size as f32;
        GridCoord::new((p.x / cs).floor() as i32, (p.y / cs).floor() as i32)
    }

    /// Cell containing `p`, clamped onto the grid.
    pub fn world_to_grid_clamped(&self, p: Vec2) -> GridCoord {
        let cell = self.world_to_grid(p);
        GridCoord::new(
            cell.x.clamp(0, self.width - 1),
            cell.y.clamp(0, self.height - 1),
        )
    }

    /// World-space center of `cell`.
    pub fn grid_to_world(&self, cell: GridCoord) -> Vec2 {
        let cs = self.cell_size as f32;
        Vec2::new((cell.x as f32 + 0.5) * cs, (cell.y as f32 + 0.5) * cs)
    }

    /// Whether the straight line between the centers of `from` and `to` only crosses walkable
    /// cells (`from` itself is not checked).
    ///
    /// Uses a supercover traversal; where the line passes exactly through a cell corner, both
    /// cells beside the corner must be walkable, mirroring the diagonal rule of the search.
    pub fn line_of_sight(&self, from: GridCoord, to: GridCoord) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let (nx, ny) = (dx.abs(), dy.abs());
        let (sx, sy) = (dx.signum(), dy.signum());

        let (mut x, mut y) = (from.x, from.y);
        let (mut ix, mut iy) = (0, 0);
        while ix < nx || iy < ny {
            let decision = (1 + 2 * ix) * ny - (1 + 2 * iy) * nx;
            if decision == 0 {
                if !self.is_walkable(x + sx, y) || !self.is_walkable(x, y + sy) {
                    return false;
                }
                x += sx;
                y += sy;
                ix += 1;
                iy += 1;
            } else if decision < 0 {
                x += sx;
                ix += 1;
            } else {
                y += sy;
                iy += 1;
            }
            if !self.is_walkable(x, y) {
                return false;
            }
        }
        true
    }

    /// First point where the segment `start -> end` leaves walkable cells, or `None` if it
    /// stays inside (or starts outside) walkable space.
    pub fn raycast(&self, start: Vec2, end: Vec2) -> Option<Vec2> {
        let mut cell = self.world_to_grid(start);
        if !self.is_walkable_cell(cell) {
            return None;
        }
        let goal = self.world_to_grid(end);
        let dir = end - start;
        let cs = self.cell_size as f32;

        let (step_x, mut t_max_x, t_delta_x) = dda_axis(start.x, dir.x, cell.x, cs);
        let (step_y, mut t_max_y, t_delta_y) = dda_axis(start.y, dir.y, cell.y, cs);

        while cell != goal {
            let t;
            if t_max_x < t_max_y {
                cell.x += step_x;
                t = t_max_x;
                t_max_x += t_delta_x;
            } else if t_max_y < t_max_x {
                cell.y += step_y;
                t = t_max_y;
                t_max_y += t_delta_y;
            } else {
                t = t_max_x;
                if !self.is_walkable(cell.x + step_x, cell.y)
                    || !self.is_walkable(cell.x, cell.y + step_y)
                {
                    return Some(start + dir * t);
                }
                cell.x += step_x;
                cell.y += step_y;
                t_max_x += t_delta_x;
                t_max_y += t_delta_y;
            }

            if t > 1.0 {
                break;
            }
            if !self.is_walkable_cell(cell) {
                return Some(start + dir * t);
            }
        }
        None
    }

    /// Closest walkable cell by expanding square rings around `origin` (ring 0 is `origin`
    /// itself). Within a ring the Euclidean-nearest cell wins, ties in row-major order.
    pub fn nearest_walkable_cell(&self, origin: GridCoord, max_rings: u32) -> Option<GridCoord> {
        let max_rings = i32::try_from(max_rings).unwrap_or(i32::MAX);
        for ring in 0..=max_rings {
            let mut best: Option<(i32, GridCoord)> = None;
            for y in origin.y - ring..=origin.y + ring {
                for x in origin.x - ring..=origin.x + ring {
                    let (ox, oy) = (x - origin.x, y - origin.y);
                    if ox.abs() != ring && oy.abs() != ring {
                        continue;
                    }
                    if !self.is_walkable(x, y) {
                        continue;
                    }
                    let d2 = ox * ox + oy * oy;
                    if best.map_or(true, |(best_d2, _)| d2 < best_d2) {
                        best = Some((d2, GridCoord::new(x, y)));
                    }
                }
            }
            if let Some((_, cell)) = best {
                return Some(cell);
            }
            if ring > self.width.max(self.height) {
                break;
            }
        }
        None
    }

    /// Every cell with its overlay color, row-major.
    pub fn debug_cells(&self) -> impl Iterator<Item = DebugCell> + '_ {
        self.walkable.iter().enumerate().map(|(idx, walkable)| {
            let cell = self.cell_from_idx(idx);
            DebugCell {
                x: cell.x,
                y: cell.y,
                color: if *walkable {
                    CellColor::Walkable
                } else {
                    CellColor::Blocked
                },
            }
        })
    }
}

impl fmt::Display for NavigationGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.walkable.chunks(self.width as usize) {
            for walkable in row {
                f.write_str(if *walkable { "." } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// Returns (step, t of first boundary crossing, t between crossings) for one axis.
fn dda_axis(origin: f32, dir: f32, cell: i32, cell_size: f32) -> (i32, f32, f32) {
    if dir > 0.0 {
        let boundary = (cell + 1) as f32 * cell_size;
        (1, (boundary - origin) / dir, cell_size / dir)
    } else if dir < 0.0 {
        let boundary = cell as f32 * cell_size;
        (-1, (boundary - origin) / dir, cell_size / -dir)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}
