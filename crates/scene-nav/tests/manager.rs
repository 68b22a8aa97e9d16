use scene_nav::{
    CellColor, NavConfig, NavError, NavigationManager, Navigator, PathSmoothing, PolygonRegion,
    Vec2, WalkableArea,
};

fn config(smoothing: PathSmoothing) -> NavConfig {
    NavConfig {
        cell_size: 10,
        character_radius: 0.0,
        smoothing,
        ..NavConfig::default()
    }
}

fn open_manager(smoothing: PathSmoothing) -> NavigationManager {
    NavigationManager::new(200, 200, config(smoothing)).expect("manager")
}

/// 200x200 floor split by a 60-wide wall at x = 80..140 with a gap at y = 90..110.
fn walled_scene() -> WalkableArea {
    WalkableArea::with_regions(vec![
        PolygonRegion::rect("floor", true, Vec2::new(0.0, 0.0), Vec2::new(200.0, 200.0)),
        PolygonRegion::rect("wall-top", false, Vec2::new(80.0, 0.0), Vec2::new(140.0, 90.0)),
        PolygonRegion::rect("wall-bottom", false, Vec2::new(80.0, 110.0), Vec2::new(140.0, 200.0)),
    ])
}

#[test]
fn queries_before_setup_return_nothing() {
    let manager = NavigationManager::new(200, 200, config(PathSmoothing::None)).expect("manager");
    assert!(!manager.is_initialized());
    assert!(manager.grid().is_none());
    assert!(manager.find_path(10.0, 10.0, 20.0, 20.0).is_none());
    assert!(!manager.is_navigable(10.0, 10.0));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let bad_cell = NavConfig {
        cell_size: 0,
        ..NavConfig::default()
    };
    assert!(matches!(
        NavigationManager::new(200, 200, bad_cell),
        Err(NavError::InvalidCellSize(0))
    ));
    assert!(matches!(
        NavigationManager::new(0, 200, NavConfig::default()),
        Err(NavError::InvalidSceneSize { .. })
    ));
}

#[test]
fn path_routes_through_the_gap_in_the_wall() {
    let mut manager = open_manager(PathSmoothing::None);
    manager.setup_navigation(&walled_scene()).expect("setup");

    let grid = manager.grid().expect("grid");
    assert_eq!((grid.width(), grid.height()), (20, 20));
    assert_eq!(grid.walkable_count(), 400 - 6 * 18);

    let path = manager.find_path(10.0, 10.0, 190.0, 190.0).expect("path");
    assert_eq!(path.first().copied(), Some(Vec2::new(15.0, 15.0)));
    assert_eq!(path.last().copied(), Some(Vec2::new(195.0, 195.0)));

    // A straight diagonal would be 19 cells; six pure-X steps are forced through the gap.
    assert!(path.len() >= 25, "{} waypoints", path.len());
    for p in &path {
        assert!(manager.is_navigable(p.x, p.y), "{p:?} is not walkable");
    }
    assert!(path
        .iter()
        .any(|p| p.x > 80.0 && p.x < 140.0 && p.y > 90.0 && p.y < 110.0));
}

#[test]
fn smoothed_path_keeps_line_of_sight_between_waypoints() {
    let mut manager = open_manager(PathSmoothing::LineOfSight);
    manager.setup_navigation(&walled_scene()).expect("setup");
    let grid = manager.grid().expect("grid");

    let path = manager.find_path(10.0, 10.0, 190.0, 190.0).expect("path");
    assert!(path.len() >= 3, "{path:?}");
    assert!(path.len() < 25);
    for w in path.windows(2) {
        let a = grid.world_to_grid(w[0]);
        let b = grid.world_to_grid(w[1]);
        assert!(grid.line_of_sight(a, b), "{a:?} -> {b:?}");
    }
}

#[test]
fn repeated_queries_are_identical() {
    let mut manager = open_manager(PathSmoothing::LineOfSight);
    manager.setup_navigation(&walled_scene()).expect("setup");

    let a = manager.find_path(12.0, 180.0, 170.0, 20.0).expect("path");
    let b = manager.find_path(12.0, 180.0, 170.0, 20.0).expect("path");
    assert_eq!(a, b);
}

#[test]
fn unwalkable_goal_returns_none() {
    let mut manager = open_manager(PathSmoothing::None);
    manager.setup_navigation(&walled_scene()).expect("setup");
    assert!(manager.find_path(10.0, 10.0, 100.0, 50.0).is_none());
}

#[test]
fn setup_is_a_full_rebuild() {
    let mut manager = open_manager(PathSmoothing::None);
    manager.setup_navigation(&WalkableArea::new()).expect("setup");
    assert!(manager.is_navigable(100.0, 50.0));
    let open_len = manager.find_path(10.0, 10.0, 190.0, 190.0).expect("path").len();
    assert_eq!(open_len, 19);

    manager.setup_navigation(&walled_scene()).expect("setup");
    assert!(!manager.is_navigable(100.0, 50.0));
    let walled_len = manager.find_path(10.0, 10.0, 190.0, 190.0).expect("path").len();
    assert!(walled_len > open_len);

    // Idempotent.
    manager.setup_navigation(&walled_scene()).expect("setup");
    assert_eq!(
        manager.find_path(10.0, 10.0, 190.0, 190.0).expect("path").len(),
        walled_len
    );
}

#[test]
fn failed_reconfigure_keeps_previous_state() {
    let mut manager = open_manager(PathSmoothing::None);
    let area = walled_scene();
    manager.setup_navigation(&area).expect("setup");

    let bad = NavConfig {
        character_radius: -3.0,
        ..manager.config().clone()
    };
    assert!(manager.reconfigure(bad, &area).is_err());
    assert_eq!(manager.config().character_radius, 0.0);
    assert_eq!(manager.grid().expect("grid").walkable_count(), 292);

    let coarse = NavConfig {
        cell_size: 20,
        ..manager.config().clone()
    };
    manager.reconfigure(coarse, &area).expect("reconfigure");
    assert_eq!(manager.grid().expect("grid").width(), 10);
}

#[test]
fn points_outside_the_scene_are_not_navigable_but_paths_clamp() {
    let mut manager = open_manager(PathSmoothing::None);
    manager.setup_navigation(&WalkableArea::new()).expect("setup");

    assert!(!manager.is_navigable(-1.0, 10.0));
    assert!(!manager.is_navigable(10.0, 200.0));

    let path = manager.find_path(-50.0, -50.0, 25.0, 5.0).expect("path");
    assert_eq!(path.first().copied(), Some(Vec2::new(5.0, 5.0)));
}

#[test]
fn debug_overlay_requires_debug_flag() {
    let mut quiet = NavigationManager::new(40, 20, config(PathSmoothing::None)).expect("manager");
    quiet.setup_navigation(&WalkableArea::new()).expect("setup");
    assert!(quiet.debug_overlay().is_none());

    let debug_config = NavConfig {
        debug: true,
        ..config(PathSmoothing::None)
    };
    let mut loud = NavigationManager::new(40, 20, debug_config).expect("manager");
    assert!(loud.debug_overlay().is_none(), "nothing to show before setup");

    loud.setup_navigation(&WalkableArea::with_regions(vec![PolygonRegion::rect(
        "left",
        true,
        Vec2::new(0.0, 0.0),
        Vec2::new(20.0, 20.0),
    )]))
    .expect("setup");
    let overlay = loud.debug_overlay().expect("overlay");
    assert_eq!(overlay.len(), 8);
    let blocked = overlay
        .iter()
        .filter(|c| c.color == CellColor::Blocked)
        .count();
    assert_eq!(blocked, 4);
}

#[test]
fn manager_works_behind_the_navigator_trait() {
    let mut manager = open_manager(PathSmoothing::None);
    manager.setup_navigation(&walled_scene()).expect("setup");
    let nav: &dyn Navigator = &manager;

    let path = nav
        .find_path(Vec2::new(10.0, 10.0), Vec2::new(190.0, 190.0))
        .expect("path");
    assert_eq!(
        Some(path.points),
        manager.find_path(10.0, 10.0, 190.0, 190.0)
    );

    let hit = nav
        .raycast(Vec2::new(15.0, 45.0), Vec2::new(185.0, 45.0))
        .expect("wall hit");
    assert!((hit.point.x - 80.0).abs() < 1e-3, "{hit:?}");

    let nearest = nav.nearest_point(Vec2::new(85.0, 45.0)).expect("nearest");
    assert!(manager.is_navigable(nearest.x, nearest.y));
}

#[test]
fn nearest_navigable_point_snaps_out_of_blocked_cells() {
    let mut manager = open_manager(PathSmoothing::None);
    assert!(manager
        .nearest_navigable_point(Vec2::new(85.0, 45.0), 200.0)
        .is_none());
    manager.setup_navigation(&walled_scene()).expect("setup");

    let inside = Vec2::new(12.0, 12.0);
    assert_eq!(manager.nearest_navigable_point(inside, 200.0), Some(inside));

    // Column 8 is the western face of the wall; column 7 is open.
    let snapped = manager
        .nearest_navigable_point(Vec2::new(85.0, 45.0), 200.0)
        .expect("snapped");
    assert_eq!(snapped, Vec2::new(75.0, 45.0));

    // Deep inside the wall nothing is within one ring.
    assert!(manager
        .nearest_navigable_point(Vec2::new(112.0, 45.0), 10.0)
        .is_none());
}

#[test]
fn segment_navigability_follows_the_grid() {
    let mut manager = open_manager(PathSmoothing::None);
    manager.setup_navigation(&walled_scene()).expect("setup");

    assert!(manager.is_segment_navigable(Vec2::new(10.0, 45.0), Vec2::new(70.0, 45.0)));
    assert!(!manager.is_segment_navigable(Vec2::new(10.0, 45.0), Vec2::new(190.0, 45.0)));
    assert!(manager.is_segment_navigable(Vec2::new(10.0, 100.0), Vec2::new(190.0, 100.0)));
    assert!(!manager.is_segment_navigable(Vec2::new(100.0, 45.0), Vec2::new(70.0, 45.0)));
}
