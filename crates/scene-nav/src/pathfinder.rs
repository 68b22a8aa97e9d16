use core::cmp::Ordering;
use std::collections::BinaryHeap;

use scene_geom::Vec2;
use tracing::{debug, trace};

use crate::smooth::smooth_cells;
use crate::{GridCoord, NavPath, NavRaycastHit, NavigationGrid, Navigator, PathSmoothing};

/// Fixed-point step costs. `DIAGONAL_COST / ORTHOGONAL_COST` approximates `sqrt(2)` from
/// below, which keeps the octile heuristic admissible and consistent.
pub const ORTHOGONAL_COST: u32 = 1000;
pub const DIAGONAL_COST: u32 = 1414;

// Fixed order for determinism: N, E, S, W, NE, SE, SW, NW.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    h: u32,
    idx: usize,
    tie: u64,
}

impl OpenNode {
    // Lower f first; on equal f prefer the node closer to the goal, then insertion order.
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.h, self.tie)
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable scratch buffers for [`Pathfinder`] searches.
///
/// Every search resets the buffers before use, so results never depend on earlier queries.
#[derive(Debug, Default)]
pub struct PathQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<usize>>,
    closed: Vec<bool>,
    cells: Vec<GridCoord>,
}

/// Raw (unsmoothed) search result.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPath {
    /// Every visited cell from start to goal, inclusive.
    pub cells: Vec<GridCoord>,
    /// Route cost in cell units (orthogonal step = 1).
    pub cost: f32,
}

/// Octile distance in fixed-point cost units.
pub fn octile_distance(a: GridCoord, b: GridCoord) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    hi.saturating_mul(ORTHOGONAL_COST)
        .saturating_add(lo.saturating_mul(DIAGONAL_COST - ORTHOGONAL_COST))
}

/// A* over a [`NavigationGrid`] with 8-directional movement.
///
/// Diagonal steps are only taken when both orthogonally adjacent cells are walkable, so routes
/// never squeeze through a corner formed by blocked cells.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    grid: NavigationGrid,
    smoothing: PathSmoothing,
}

impl Pathfinder {
    pub fn new(grid: NavigationGrid, smoothing: PathSmoothing) -> Self {
        Self { grid, smoothing }
    }

    pub fn grid(&self) -> &NavigationGrid {
        &self.grid
    }

    pub fn smoothing(&self) -> PathSmoothing {
        self.smoothing
    }

    pub fn find_grid_path(&self, start: GridCoord, goal: GridCoord) -> Option<GridPath> {
        let mut query = PathQuery::default();
        let cost = self.search(start, goal, &mut query)?;
        Some(GridPath {
            cells: query.cells,
            cost: cost as f32 / ORTHOGONAL_COST as f32,
        })
    }

    /// World-space path between two points, reusing `query` scratch buffers.
    ///
    /// Both endpoints are clamped onto the grid. `out` is cleared first and left empty on
    /// failure.
    pub fn find_path_into(
        &self,
        start: Vec2,
        goal: Vec2,
        query: &mut PathQuery,
        out: &mut NavPath,
    ) -> Option<()> {
        out.points.clear();

        let start_cell = self.grid.world_to_grid_clamped(start);
        let goal_cell = self.grid.world_to_grid_clamped(goal);
        self.search(start_cell, goal_cell, query)?;

        if self.smoothing == PathSmoothing::None {
            out.points
                .extend(query.cells.iter().map(|c| self.grid.grid_to_world(*c)));
        } else {
            let smoothed = smooth_cells(&self.grid, &query.cells, self.smoothing);
            out.points
                .extend(smoothed.iter().map(|c| self.grid.grid_to_world(*c)));
        }
        Some(())
    }

    // Leaves the cell route in `query.cells` and returns its fixed-point cost.
    fn search(&self, start: GridCoord, goal: GridCoord, query: &mut PathQuery) -> Option<u32> {
        let grid = &self.grid;
        query.cells.clear();

        let start_idx = grid.idx(start)?;
        let goal_idx = grid.idx(goal)?;
        if !grid.is_walkable_cell(goal) {
            debug!(?goal, "goal cell is not walkable");
            return None;
        }
        // A blocked start is tolerated: the character is already standing there.

        if start_idx == goal_idx {
            query.cells.push(start);
            return Some(0);
        }

        let n = grid.len();
        let PathQuery {
            open,
            g_score,
            came_from,
            closed,
            cells,
        } = query;
        open.clear();
        g_score.clear();
        g_score.resize(n, u32::MAX);
        came_from.clear();
        came_from.resize(n, None);
        closed.clear();
        closed.resize(n, false);

        g_score[start_idx] = 0;
        let h0 = octile_distance(start, goal);
        open.push(OpenNode {
            f: h0,
            h: h0,
            idx: start_idx,
            tie: 0,
        });
        let mut tie: u64 = 1;
        let mut expanded: usize = 0;

        while let Some(node) = open.pop() {
            if closed[node.idx] {
                // Stale heap entry.
                continue;
            }
            if node.idx == goal_idx {
                let mut current = goal_idx;
                cells.push(grid.cell_from_idx(current));
                while let Some(prev) = came_from[current] {
                    current = prev;
                    cells.push(grid.cell_from_idx(current));
                }
                cells.reverse();
                trace!(?start, ?goal, expanded, steps = cells.len(), "path found");
                return Some(g_score[goal_idx]);
            }

            closed[node.idx] = true;
            expanded += 1;
            let cell = grid.cell_from_idx(node.idx);
            let g = g_score[node.idx];

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let next = GridCoord::new(cell.x + dx, cell.y + dy);
                let Some(next_idx) = grid.idx(next) else {
                    continue;
                };
                if closed[next_idx] || !grid.is_walkable_cell(next) {
                    continue;
                }

                let diagonal = dx != 0 && dy != 0;
                if diagonal
                    && (!grid.is_walkable(cell.x + dx, cell.y)
                        || !grid.is_walkable(cell.x, cell.y + dy))
                {
                    continue;
                }

                let step = if diagonal {
                    DIAGONAL_COST
                } else {
                    ORTHOGONAL_COST
                };
                let tentative_g = g.saturating_add(step);
                if tentative_g >= g_score[next_idx] {
                    continue;
                }

                came_from[next_idx] = Some(node.idx);
                g_score[next_idx] = tentative_g;
                let h = octile_distance(next, goal);
                open.push(OpenNode {
                    f: tentative_g.saturating_add(h),
                    h,
                    idx: next_idx,
                    tie,
                });
                tie += 1;
            }
        }

        debug!(?start, ?goal, expanded, "open set exhausted; goal unreachable");
        None
    }
}

impl Navigator for Pathfinder {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        let mut query = PathQuery::default();
        let mut out = NavPath::default();
        self.find_path_into(start, goal, &mut query, &mut out)?;
        Some(out)
    }

    fn raycast(&self, start: Vec2, end: Vec2) -> Option<NavRaycastHit> {
        self.grid
            .raycast(start, end)
            .map(|point| NavRaycastHit { point })
    }

    fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        let origin = self.grid.world_to_grid_clamped(point);
        let rings = self.grid.width().max(self.grid.height()) as u32;
        self.grid
            .nearest_walkable_cell(origin, rings)
            .map(|cell| self.grid.grid_to_world(cell))
    }
}
