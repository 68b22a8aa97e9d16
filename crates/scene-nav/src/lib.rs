//! Navigation for 2D adventure scenes: walkability grid, A* pathfinding and per-scene
//! orchestration on top of the `scene-geom` walkable-area model.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod follower;
pub mod grid;
pub mod manager;
pub mod navigator;
pub mod pathfinder;
pub mod scene;
pub mod smooth;

pub use config::{NavConfig, PathSmoothing};
pub use error::{NavError, Result};
pub use follower::{FollowStatus, PathFollower};
pub use grid::{CellColor, DebugCell, GridCoord, NavigationGrid};
pub use manager::NavigationManager;
pub use navigator::{NavPath, NavRaycastHit, Navigator};
pub use pathfinder::{
    octile_distance, GridPath, PathQuery, Pathfinder, DIAGONAL_COST, ORTHOGONAL_COST,
};
pub use scene::{SceneNavigation, WalkOutcome, WalkPlan};

pub use scene_geom::{
    GeometryError, NearestSearch, PolygonRegion, ScaleZone, Vec2, WalkBehindRegion, WalkableArea,
};
