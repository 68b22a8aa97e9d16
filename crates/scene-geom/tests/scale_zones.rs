use scene_geom::{GeometryError, PolygonRegion, ScaleZone, Vec2, WalkBehindRegion, WalkableArea};

#[test]
fn scale_interpolates_linearly_inside_zone() {
    let mut area = WalkableArea::new();
    area.add_scale_zone(ScaleZone::new(100.0, 200.0, 0.5, 1.0));

    assert!((area.get_scale_at_y(150.0) - 0.75).abs() < 1e-6);
    assert!((area.get_scale_at_y(100.0) - 0.5).abs() < 1e-6);
    assert!((area.get_scale_at_y(200.0) - 1.0).abs() < 1e-6);
}

#[test]
fn scale_defaults_to_one_outside_zones() {
    let mut area = WalkableArea::new();
    assert_eq!(area.get_scale_at_y(50.0), 1.0);

    area.add_scale_zone(ScaleZone::new(100.0, 200.0, 0.5, 1.0));
    assert_eq!(area.get_scale_at_y(50.0), 1.0);
    assert_eq!(area.get_scale_at_y(250.0), 1.0);
}

#[test]
fn first_declared_zone_wins_on_shared_boundary() {
    let mut area = WalkableArea::new();
    area.add_scale_zone(ScaleZone::new(0.0, 100.0, 0.2, 0.4));
    area.add_scale_zone(ScaleZone::new(100.0, 200.0, 0.8, 1.0));

    assert!((area.get_scale_at_y(100.0) - 0.4).abs() < 1e-6);
    assert!(area.validate().is_ok(), "touching zones are not overlapping");
}

#[test]
fn flat_zone_uses_min_scale() {
    let zone = ScaleZone::new(120.0, 120.0, 0.6, 0.9);
    assert_eq!(zone.scale_at(120.0), 0.6);
}

#[test]
fn validation_reports_overlaps_and_degenerate_regions() {
    let mut area = WalkableArea::with_regions(vec![
        PolygonRegion::walkable(
            "ok",
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        ),
        PolygonRegion::walkable("sliver", vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]),
    ]);
    area.add_scale_zone(ScaleZone::new(0.0, 150.0, 0.5, 1.0));
    area.add_scale_zone(ScaleZone::new(100.0, 200.0, 0.5, 1.0));
    area.add_scale_zone(ScaleZone::new(300.0, 250.0, 0.5, 1.0));

    let issues = area.issues();
    assert_eq!(
        issues,
        vec![
            GeometryError::DegenerateRegion {
                name: "sliver".to_string(),
                vertex_count: 2,
            },
            GeometryError::InvertedScaleZone { index: 2 },
            GeometryError::OverlappingScaleZones { first: 0, second: 1 },
        ]
    );
    assert_eq!(area.validate(), Err(issues[0].clone()));
}

#[test]
fn walk_behinds_are_selected_by_baseline_and_sorted() {
    let mut area = WalkableArea::new();
    let quad = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(0.0, 10.0),
    ];
    area.add_walk_behind(WalkBehindRegion::new("pillar", quad.clone(), 300.0));
    area.add_walk_behind(WalkBehindRegion::new("table", quad.clone(), 220.0));
    area.add_walk_behind(WalkBehindRegion::new("plant", quad, 120.0));

    let names = |y: f32| -> Vec<String> {
        area.get_walk_behind_at_y(y)
            .into_iter()
            .map(|r| r.name.clone())
            .collect()
    };

    assert_eq!(names(100.0), vec!["plant", "table", "pillar"]);
    assert_eq!(names(200.0), vec!["table", "pillar"]);
    assert_eq!(names(250.0), vec!["pillar"]);
    assert!(names(300.0).is_empty());
}

#[test]
fn walk_behind_outline_coverage() {
    let region = WalkBehindRegion::new(
        "arch",
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(0.0, 20.0),
        ],
        50.0,
    );
    assert!(region.covers(Vec2::new(10.0, 10.0)));
    assert!(!region.covers(Vec2::new(30.0, 10.0)));
    assert!(region.as_polygon().contains(Vec2::new(10.0, 10.0)));
}
