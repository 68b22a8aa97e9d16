use scene_geom::{Vec2, WalkBehindRegion, WalkableArea};
use tracing::warn;

use crate::{NavConfig, NavPath, NavigationManager, Result};

/// How a walk request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Path straight to the requested target.
    Direct,
    /// The target was unwalkable; path to the nearest walkable point instead.
    Retargeted,
    /// No path; slide along the straight line as far as it stays walkable.
    Constrained,
    /// Nothing reachable; the character should not move.
    Stay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkPlan {
    pub outcome: WalkOutcome,
    /// Where the character will end up.
    pub target: Vec2,
    /// Waypoints to follow; `None` for [`WalkOutcome::Stay`].
    pub path: Option<NavPath>,
}

/// Scene-side navigation: the walkable area together with its navigation manager.
///
/// Every change to the area or to the grid parameters triggers a full rebuild.
#[derive(Debug, Clone)]
pub struct SceneNavigation {
    area: WalkableArea,
    manager: NavigationManager,
}

impl SceneNavigation {
    pub fn new(
        area: WalkableArea,
        scene_width: u32,
        scene_height: u32,
        config: NavConfig,
    ) -> Result<Self> {
        let mut manager = NavigationManager::new(scene_width, scene_height, config)?;
        report_issues(&area);
        manager.setup_navigation(&area)?;
        Ok(Self { area, manager })
    }

    pub fn area(&self) -> &WalkableArea {
        &self.area
    }

    pub fn manager(&self) -> &NavigationManager {
        &self.manager
    }

    pub fn config(&self) -> &NavConfig {
        self.manager.config()
    }

    /// Strict content check, for tools that want to reject broken scenes.
    pub fn validate(&self) -> Result<()> {
        self.area.validate()?;
        Ok(())
    }

    pub fn set_walkable_area(&mut self, area: WalkableArea) -> Result<()> {
        report_issues(&area);
        self.manager.setup_navigation(&area)?;
        self.area = area;
        Ok(())
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<()> {
        let config = NavConfig {
            cell_size,
            ..self.manager.config().clone()
        };
        self.manager.reconfigure(config, &self.area)
    }

    pub fn set_character_radius(&mut self, character_radius: f32) -> Result<()> {
        let config = NavConfig {
            character_radius,
            ..self.manager.config().clone()
        };
        self.manager.reconfigure(config, &self.area)
    }

    pub fn is_point_walkable(&self, p: Vec2) -> bool {
        self.area.is_point_walkable(p)
    }

    /// Whether a character-sized footprint fits at `p`.
    pub fn can_stand_at(&self, p: Vec2) -> bool {
        let config = self.manager.config();
        self.area
            .is_footprint_walkable(p, config.character_radius, config.footprint_min_samples)
    }

    pub fn scale_at_y(&self, y: f32) -> f32 {
        self.area.get_scale_at_y(y)
    }

    pub fn walk_behinds_at_y(&self, y: f32) -> Vec<&WalkBehindRegion> {
        self.area.get_walk_behind_at_y(y)
    }

    /// Plan a walk from `from` towards `to`, getting as close as the grid allows.
    ///
    /// Every returned target lies in a walkable grid cell, so the plan honours the clearance
    /// radius. A walkable target the grid can reach gets a [`WalkOutcome::Direct`] path; one in
    /// a disconnected area means [`WalkOutcome::Stay`]. Anything else is re-targeted to the
    /// nearest navigable point, and only when that is unreachable too does the character slide
    /// along the straight line, provided the grid accepts the whole segment.
    pub fn request_walk(&self, from: Vec2, to: Vec2) -> WalkPlan {
        let config = self.manager.config();
        let to_walkable = self.area.is_point_walkable(to);

        if to_walkable && self.manager.is_navigable(to.x, to.y) {
            return match self.manager.find_path_between(from, to) {
                Some(path) => WalkPlan {
                    outcome: WalkOutcome::Direct,
                    target: to,
                    path: Some(path),
                },
                None => stay(from),
            };
        }

        // Walkable ground inside the clearance band seeds the grid search directly.
        let seed = if to_walkable {
            to
        } else {
            self.area
                .find_nearest_walkable_point_with(to, &config.nearest_search)
        };
        if self.area.is_point_walkable(seed) {
            let retarget = self
                .manager
                .nearest_navigable_point(seed, config.nearest_search.max_radius);
            if let Some(target) = retarget {
                if let Some(path) = self.manager.find_path_between(from, target) {
                    return WalkPlan {
                        outcome: WalkOutcome::Retargeted,
                        target,
                        path: Some(path),
                    };
                }
            }
        }

        let slide = self
            .area
            .constrain_to_walkable_with(from, to, config.constrain_samples);
        if slide != from && self.manager.is_segment_navigable(from, slide) {
            return WalkPlan {
                outcome: WalkOutcome::Constrained,
                target: slide,
                path: Some(NavPath::new(vec![from, slide])),
            };
        }

        stay(from)
    }
}

fn stay(from: Vec2) -> WalkPlan {
    WalkPlan {
        outcome: WalkOutcome::Stay,
        target: from,
        path: None,
    }
}

fn report_issues(area: &WalkableArea) {
    for issue in area.issues() {
        warn!(%issue, "walkable area content problem");
    }
}
