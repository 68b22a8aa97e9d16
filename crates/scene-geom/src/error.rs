use thiserror::Error;

/// Content problems found by [`WalkableArea::validate`](crate::WalkableArea::validate).
///
/// None of these change query results; they exist so content tooling can flag broken scenes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("region `{name}` has {vertex_count} vertices; at least 3 are required")]
    DegenerateRegion { name: String, vertex_count: usize },

    #[error("scale zone #{index} has max_y below min_y")]
    InvertedScaleZone { index: usize },

    #[error("scale zones #{first} and #{second} overlap in Y")]
    OverlappingScaleZones { first: usize, second: usize },
}
