pub mod connector;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod polyline;
pub mod search;
pub mod spots;

pub use connector::{ConnectorPoint, Side, compute_pt, extrude_cp};
pub use geometry::{Point, Rectangle};
pub use polyline::{SegmentMidpoint, points_to_path, segment_midpoints};

use serde::Serialize;

use crate::config::RouterConfig;
use graph::build_routing_graph;
use grid::{Grid, Rulers, routing_bounds};
use polyline::{create_polyline, path_length, simplify};
use search::shortest_path;
use spots::grid_to_spots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Shortest orthogonal path through the routing graph.
    Routed,
    /// Target unreachable; straight line between the extruded endpoints.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub points: Vec<Point>,
    pub kind: RouteKind,
}

impl Route {
    pub fn is_fallback(&self) -> bool {
        self.kind == RouteKind::Fallback
    }

    pub fn path(&self) -> String {
        points_to_path(&self.points)
    }

    pub fn midpoints(&self) -> Vec<SegmentMidpoint> {
        segment_midpoints(&self.points)
    }
}

/// Margin boxes of both endpoint shapes followed by `extra` obstacles.
pub fn connector_obstacles(
    source: &ConnectorPoint,
    target: &ConnectorPoint,
    extra: &[Rectangle],
    margin: f32,
) -> Vec<Rectangle> {
    let mut obstacles = Vec::with_capacity(extra.len() + 2);
    obstacles.push(source.shape.inflate(margin, margin));
    obstacles.push(target.shape.inflate(margin, margin));
    obstacles.extend_from_slice(extra);
    obstacles
}

/// Route one connector between two shapes.
///
/// Shapes in `source`/`target` are the raw (un-inflated) geometry; both get
/// inflated by `config.margin` and become obstacles. `extra_obstacles` are
/// taken as-is. The result always starts at the extruded source point and
/// ends at the extruded target point; if no path exists the two extruded
/// points are joined directly and the route is marked as a fallback.
pub fn route_connector(
    source: &ConnectorPoint,
    target: &ConnectorPoint,
    extra_obstacles: &[Rectangle],
    config: &RouterConfig,
) -> Route {
    let margin = config.margin;
    let obstacles = connector_obstacles(source, target, extra_obstacles, margin);
    let start = extrude_cp(source, margin);
    let end = extrude_cp(target, margin);

    let rulers = Rulers::collect(&obstacles, start, end);
    let bounds = routing_bounds(&obstacles, start, end, margin);
    let grid = Grid::from_rulers(&rulers.verticals, &rulers.horizontals, bounds);
    let spots = grid_to_spots(&grid, &obstacles);
    let (graph, start_id, end_id) = build_routing_graph(&spots, start, end, &obstacles);
    tracing::debug!(
        verticals = rulers.verticals.len(),
        horizontals = rulers.horizontals.len(),
        cells = grid.len(),
        spots = spots.len(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        "routing graph built"
    );

    let Some(path) = shortest_path(&graph, start_id, end_id) else {
        tracing::debug!(?start, ?end, "no orthogonal path; using direct fallback");
        return Route {
            points: vec![start, end],
            kind: RouteKind::Fallback,
        };
    };

    let raw: Vec<Point> = path.into_iter().map(|id| graph.point(id)).collect();
    let points = simplify(&create_polyline(&raw));
    tracing::debug!(
        points = points.len(),
        length = path_length(&points),
        "orthogonal route found"
    );
    Route {
        points,
        kind: RouteKind::Routed,
    }
}
