use scene_geom::GeometryError;
use thiserror::Error;

/// Errors raised while configuring or building navigation.
///
/// Queries never fail with an error: an unreachable goal is `None`, out-of-range input is
/// simply not walkable.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("cell size must be > 0, got {0}")]
    InvalidCellSize(u32),

    #[error("scene must be non-empty, got {width}x{height}")]
    InvalidSceneSize { width: u32, height: u32 },

    #[error("character radius must be finite and >= 0, got {0}")]
    InvalidRadius(f32),

    #[error("grid data does not match {width}x{height}: {reason}")]
    InvalidGridData {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("invalid scene geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("failed to read navigation config: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("failed to parse navigation config: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
