use ortho_router::config::RouterConfig;
use ortho_router::routing::grid::{Grid, Rulers, routing_bounds};
use ortho_router::routing::polyline::bend_count;
use ortho_router::routing::{
    ConnectorPoint, Point, Rectangle, Route, RouteKind, Side, connector_obstacles, extrude_cp,
    route_connector,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDES: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
const EPS: f32 = 1e-3;

fn square(left: f32, top: f32) -> Rectangle {
    Rectangle::new(left, top, 100.0, 100.0)
}

fn assert_orthogonal(points: &[Point], context: &str) {
    for pair in points.windows(2) {
        assert!(
            pair[0].x == pair[1].x || pair[0].y == pair[1].y,
            "{context}: diagonal segment {:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Whether an axis-aligned segment passes through the open interior of
/// `rect`. Touching or running along the boundary is allowed.
fn enters_interior(a: Point, b: Point, rect: &Rectangle) -> bool {
    let (left, right) = (rect.left + EPS, rect.right() - EPS);
    let (top, bottom) = (rect.top + EPS, rect.bottom() - EPS);
    if a.y == b.y {
        let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
        a.y > top && a.y < bottom && lo < right && hi > left
    } else {
        let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
        a.x > left && a.x < right && lo < bottom && hi > top
    }
}

fn assert_route_invariants(
    route: &Route,
    source: &ConnectorPoint,
    target: &ConnectorPoint,
    obstacles: &[Rectangle],
    margin: f32,
    context: &str,
) {
    assert!(route.points.len() >= 2, "{context}: too few points");
    assert_eq!(
        route.points.first(),
        Some(&extrude_cp(source, margin)),
        "{context}: wrong start"
    );
    assert_eq!(
        route.points.last(),
        Some(&extrude_cp(target, margin)),
        "{context}: wrong end"
    );
    if route.kind == RouteKind::Fallback {
        assert_eq!(route.points.len(), 2, "{context}: fallback must be two points");
        return;
    }
    assert_orthogonal(&route.points, context);
    for pair in route.points.windows(2) {
        for obstacle in obstacles {
            assert!(
                !enters_interior(pair[0], pair[1], obstacle),
                "{context}: segment {:?} -> {:?} enters {:?}",
                pair[0],
                pair[1],
                obstacle
            );
        }
    }
}

#[test]
fn offset_shapes_route_between_extruded_points() {
    let config = RouterConfig::default();
    let source = ConnectorPoint::new(square(0.0, 0.0), Side::Right, 0.5);
    let target = ConnectorPoint::new(square(300.0, 200.0), Side::Left, 0.5);
    let route = route_connector(&source, &target, &[], &config);

    assert_eq!(route.kind, RouteKind::Routed);
    assert_eq!(route.points[0], Point::new(110.0, 50.0));
    assert_eq!(route.points[route.points.len() - 1], Point::new(290.0, 250.0));
    assert!(route.points.len() >= 3);
    assert!(bend_count(&route.points) >= 1);
    let obstacles = connector_obstacles(&source, &target, &[], config.margin);
    assert_route_invariants(&route, &source, &target, &obstacles, config.margin, "offset");
}

#[test]
fn aligned_shapes_route_straight() {
    let source = ConnectorPoint::new(square(0.0, 0.0), Side::Right, 0.5);
    let target = ConnectorPoint::new(square(300.0, 0.0), Side::Left, 0.5);
    let route = route_connector(&source, &target, &[], &RouterConfig::default());
    assert_eq!(route.kind, RouteKind::Routed);
    assert_eq!(route.points.len(), 2);
    assert_eq!(route.path(), "M110,50 L290,50");
}

#[test]
fn target_behind_source_falls_back_to_direct_line() {
    let source = ConnectorPoint::new(square(0.0, 0.0), Side::Right, 0.5);
    let target = ConnectorPoint::new(square(105.0, 0.0), Side::Left, 0.5);
    let route = route_connector(&source, &target, &[], &RouterConfig::default());
    assert_eq!(route.kind, RouteKind::Fallback);
    assert_eq!(route.points, vec![Point::new(110.0, 50.0), Point::new(95.0, 50.0)]);
    assert_eq!(route.path(), "M110,50 L95,50");
}

#[test]
fn fractional_geometry_routes_without_falling_back() {
    let config = RouterConfig::default();
    for i in 0..200 {
        let left = 0.1 + i as f32 * 0.37;
        let top = 7.7 + i as f32 * 0.13;
        let source = ConnectorPoint::new(Rectangle::new(left, top, 33.3, 41.3), Side::Right, 0.5);
        let target = ConnectorPoint::new(
            Rectangle::new(left + 233.3, top, 33.3, 41.3),
            Side::Left,
            0.5,
        );
        let route = route_connector(&source, &target, &[], &config);
        let context = format!("variant {i}");
        assert_eq!(route.kind, RouteKind::Routed, "{context}");
        assert_eq!(route.points.len(), 2, "{context}");
        let obstacles = connector_obstacles(&source, &target, &[], config.margin);
        assert_route_invariants(&route, &source, &target, &obstacles, config.margin, &context);
    }
}

#[test]
fn every_side_combination_is_routed() {
    let layouts = [
        (square(0.0, 0.0), square(300.0, 200.0)),
        (square(0.0, 0.0), square(300.0, 0.0)),
        (square(0.0, 0.0), square(0.0, 250.0)),
        (square(200.0, 200.0), square(0.0, 0.0)),
    ];
    let config = RouterConfig::default();
    for (layout_idx, (a, b)) in layouts.iter().enumerate() {
        for source_side in SIDES {
            for target_side in SIDES {
                let source = ConnectorPoint::new(*a, source_side, 0.5);
                let target = ConnectorPoint::new(*b, target_side, 0.5);
                let route = route_connector(&source, &target, &[], &config);
                let context = format!(
                    "layout {layout_idx} {} -> {}",
                    source_side.as_str(),
                    target_side.as_str()
                );
                assert_eq!(route.kind, RouteKind::Routed, "{context}");
                let obstacles = connector_obstacles(&source, &target, &[], config.margin);
                assert_route_invariants(&route, &source, &target, &obstacles, config.margin, &context);
            }
        }
    }
}

#[test]
fn routing_is_deterministic() {
    let config = RouterConfig::default();
    let source = ConnectorPoint::new(square(0.0, 0.0), Side::Bottom, 0.25);
    let target = ConnectorPoint::new(square(260.0, 180.0), Side::Top, 0.75);
    let extra = [Rectangle::new(120.0, 60.0, 60.0, 60.0).inflate(10.0, 10.0)];
    let first = route_connector(&source, &target, &extra, &config);
    for _ in 0..5 {
        assert_eq!(route_connector(&source, &target, &extra, &config), first);
    }
}

#[test]
fn grid_tiles_the_routing_bounds() {
    let obstacles = [
        square(0.0, 0.0).inflate(10.0, 10.0),
        square(300.0, 200.0).inflate(10.0, 10.0),
        Rectangle::new(150.0, 80.0, 40.0, 90.0),
    ];
    let start = Point::new(110.0, 50.0);
    let end = Point::new(290.0, 250.0);
    let rulers = Rulers::collect(&obstacles, start, end);
    let bounds = routing_bounds(&obstacles, start, end, 10.0);
    let grid = Grid::from_rulers(&rulers.verticals, &rulers.horizontals, bounds);

    let total: f32 = grid.iter().map(|(_, _, cell)| cell.area()).sum();
    assert!((total - bounds.area()).abs() < 1.0);
    for (_, _, a) in grid.iter() {
        for (_, _, b) in grid.iter() {
            if a != b {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}

fn random_scene(rng: &mut StdRng) -> Vec<Rectangle> {
    // One shape per 160x160 cell keeps inflated shapes at least 20 apart.
    let mut shapes = Vec::new();
    for row in 0..3 {
        for col in 0..4 {
            if rng.gen_bool(0.25) {
                continue;
            }
            let width = rng.gen_range(40..=100) as f32;
            let height = rng.gen_range(40..=100) as f32;
            let max_dx = 120 - width as i32;
            let max_dy = 120 - height as i32;
            let left = (col * 160 + 20 + rng.gen_range(0..=max_dx)) as f32;
            let top = (row * 160 + 20 + rng.gen_range(0..=max_dy)) as f32;
            shapes.push(Rectangle::new(left, top, width, height));
        }
    }
    shapes
}

#[test]
fn randomized_scenes_avoid_obstacles() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0a11);
    let config = RouterConfig::default();
    let margin = config.margin;
    let mut total = 0usize;
    let mut fallbacks = 0usize;

    for scene_idx in 0..12 {
        let shapes = random_scene(&mut rng);
        if shapes.len() < 2 {
            continue;
        }
        let inflated: Vec<Rectangle> = shapes.iter().map(|s| s.inflate(margin, margin)).collect();

        for connector_idx in 0..6 {
            let a = rng.gen_range(0..shapes.len());
            let mut b = rng.gen_range(0..shapes.len());
            if a == b {
                b = (b + 1) % shapes.len();
            }
            let source = ConnectorPoint::new(
                shapes[a],
                SIDES[rng.gen_range(0..4)],
                rng.gen_range(0..=4) as f32 / 4.0,
            );
            let target = ConnectorPoint::new(
                shapes[b],
                SIDES[rng.gen_range(0..4)],
                rng.gen_range(0..=4) as f32 / 4.0,
            );
            let extra: Vec<Rectangle> = inflated
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != a && *idx != b)
                .map(|(_, r)| *r)
                .collect();

            let route = route_connector(&source, &target, &extra, &config);
            let context = format!("scene {scene_idx} connector {connector_idx}");
            assert_route_invariants(&route, &source, &target, &inflated, margin, &context);

            total += 1;
            if route.is_fallback() {
                fallbacks += 1;
            }
        }
    }

    assert!(total > 0);
    assert!(
        fallbacks * 10 <= total,
        "{fallbacks} of {total} connectors fell back"
    );
}

#[test]
fn margin_controls_extrusion() {
    let config = RouterConfig {
        margin: 25.0,
        ..RouterConfig::default()
    };
    let source = ConnectorPoint::new(square(0.0, 0.0), Side::Top, 0.5);
    let target = ConnectorPoint::new(square(300.0, 0.0), Side::Top, 0.5);
    let route = route_connector(&source, &target, &[], &config);
    assert_eq!(route.points[0], Point::new(50.0, -25.0));
    assert_eq!(route.points[route.points.len() - 1], Point::new(350.0, -25.0));
    assert_eq!(route.kind, RouteKind::Routed);
    assert_orthogonal(&route.points, "margin");
}
