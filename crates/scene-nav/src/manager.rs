use scene_geom::{Vec2, WalkableArea};
use tracing::debug;

use crate::{
    DebugCell, NavConfig, NavError, NavPath, NavRaycastHit, NavigationGrid, Navigator, Pathfinder,
    Result,
};

/// Owns the grid + pathfinder pair of one scene.
///
/// The pair is rebuilt wholesale by [`setup_navigation`](Self::setup_navigation); until the
/// first setup every query answers "not navigable" / "no path".
#[derive(Debug, Clone)]
pub struct NavigationManager {
    scene_width: u32,
    scene_height: u32,
    config: NavConfig,
    pathfinder: Option<Pathfinder>,
}

impl NavigationManager {
    pub fn new(scene_width: u32, scene_height: u32, config: NavConfig) -> Result<Self> {
        config.validate()?;
        if scene_width == 0 || scene_height == 0 {
            return Err(NavError::InvalidSceneSize {
                width: scene_width,
                height: scene_height,
            });
        }
        Ok(Self {
            scene_width,
            scene_height,
            config,
            pathfinder: None,
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn scene_size(&self) -> (u32, u32) {
        (self.scene_width, self.scene_height)
    }

    pub fn is_initialized(&self) -> bool {
        self.pathfinder.is_some()
    }

    pub fn grid(&self) -> Option<&NavigationGrid> {
        self.pathfinder.as_ref().map(Pathfinder::grid)
    }

    pub fn pathfinder(&self) -> Option<&Pathfinder> {
        self.pathfinder.as_ref()
    }

    /// Build a fresh grid + pathfinder from `area` and swap it in.
    ///
    /// The previous pair stays in place if the build fails.
    pub fn setup_navigation(&mut self, area: &WalkableArea) -> Result<()> {
        let grid = NavigationGrid::from_scene(
            area,
            self.scene_width,
            self.scene_height,
            self.config.cell_size,
            self.config.character_radius,
        )?;
        if self.config.debug {
            debug!(grid = %grid, "navigation grid layout");
        }
        self.pathfinder = Some(Pathfinder::new(grid, self.config.smoothing));
        Ok(())
    }

    /// Replace the config and rebuild from `area`.
    ///
    /// On error neither the config nor the current grid changes.
    pub fn reconfigure(&mut self, config: NavConfig, area: &WalkableArea) -> Result<()> {
        config.validate()?;
        let previous = std::mem::replace(&mut self.config, config);
        if let Err(err) = self.setup_navigation(area) {
            self.config = previous;
            return Err(err);
        }
        Ok(())
    }

    /// World-space waypoints (cell centers) from `(start_x, start_y)` to `(end_x, end_y)`.
    ///
    /// Both points are clamped onto the grid. `None` when navigation is not set up yet or the
    /// goal is unreachable.
    pub fn find_path(
        &self,
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
    ) -> Option<Vec<Vec2>> {
        self.find_path_between(Vec2::new(start_x, start_y), Vec2::new(end_x, end_y))
            .map(|path| path.points)
    }

    pub fn find_path_between(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        let pathfinder = self.pathfinder.as_ref()?;
        let path = pathfinder.find_path(start, goal);
        if self.config.debug {
            debug!(
                ?start,
                ?goal,
                waypoints = path.as_ref().map(NavPath::len),
                "path query"
            );
        }
        path
    }

    /// Whether the world point `(x, y)` lies in a walkable cell. Points outside the scene are
    /// never navigable.
    pub fn is_navigable(&self, x: f32, y: f32) -> bool {
        self.grid().is_some_and(|grid| {
            let cell = grid.world_to_grid(Vec2::new(x, y));
            grid.is_walkable_cell(cell)
        })
    }

    /// `p` itself when its cell is walkable, otherwise the center of the nearest walkable cell
    /// within `max_distance` (measured in whole cells).
    pub fn nearest_navigable_point(&self, p: Vec2, max_distance: f32) -> Option<Vec2> {
        let grid = self.grid()?;
        let cell = grid.world_to_grid(p);
        if grid.is_walkable_cell(cell) {
            return Some(p);
        }
        let rings = (max_distance.max(0.0) / grid.cell_size() as f32).ceil() as u32;
        grid.nearest_walkable_cell(cell, rings.max(1))
            .map(|found| grid.grid_to_world(found))
    }

    /// Whether a character can walk the straight segment `a -> b` on the grid: both ends in
    /// walkable cells and no blocked cell in between.
    pub fn is_segment_navigable(&self, a: Vec2, b: Vec2) -> bool {
        let Some(grid) = self.grid() else {
            return false;
        };
        grid.is_walkable_cell(grid.world_to_grid(a))
            && grid.is_walkable_cell(grid.world_to_grid(b))
            && grid.raycast(a, b).is_none()
    }

    /// Per-cell overlay data; only produced when the config enables debug output.
    pub fn debug_overlay(&self) -> Option<Vec<DebugCell>> {
        if !self.config.debug {
            return None;
        }
        self.grid().map(|grid| grid.debug_cells().collect())
    }
}

impl Navigator for NavigationManager {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        self.find_path_between(start, goal)
    }

    fn raycast(&self, start: Vec2, end: Vec2) -> Option<NavRaycastHit> {
        self.pathfinder.as_ref()?.raycast(start, end)
    }

    fn nearest_point(&self, point: Vec2) -> Option<Vec2> {
        self.pathfinder.as_ref()?.nearest_point(point)
    }
}
