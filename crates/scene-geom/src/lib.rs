//! Walkable-area geometry for 2D adventure scenes.
//!
//! Coordinates are the scene's logical space (not background texture pixels), with Y growing
//! downwards.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod math;
pub mod region;
pub mod scale;
pub mod walk_behind;
pub mod walkable;

pub use error::GeometryError;
pub use math::Vec2;
pub use region::{Bounds, PolygonRegion};
pub use scale::ScaleZone;
pub use walk_behind::WalkBehindRegion;
pub use walkable::{NearestSearch, WalkableArea, DEFAULT_CONSTRAIN_SAMPLES};
