use crate::config::RouterConfig;
use crate::error::SceneError;
use crate::ir::{Endpoint, Scene, Shape};
use crate::routing::polyline::{attach_stubs, label_anchor};
use crate::routing::{
    ConnectorPoint, Point, Rectangle, Route, RouteKind, SegmentMidpoint, compute_pt,
    points_to_path, route_connector, segment_midpoints,
};

#[derive(Debug, Clone)]
pub struct ShapeLayout {
    pub id: String,
    pub label: Option<String>,
    pub bounds: Rectangle,
}

#[derive(Debug, Clone)]
pub struct ConnectorLayout {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub label_anchor: Option<Point>,
    pub route: Route,
    /// Route points with the stubs from each shape boundary to the margin
    /// box attached. `path`, `midpoints` and `label_anchor` follow these.
    pub drawn_points: Vec<Point>,
    pub path: String,
    pub midpoints: Vec<SegmentMidpoint>,
}

impl ConnectorLayout {
    pub fn points(&self) -> &[Point] {
        &self.route.points
    }

    pub fn kind(&self) -> RouteKind {
        self.route.kind
    }
}

#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub shapes: Vec<ShapeLayout>,
    pub connectors: Vec<ConnectorLayout>,
    /// Smallest rectangle holding every shape and route point.
    pub extent: Rectangle,
}

impl SceneLayout {
    pub fn connector(&self, id: &str) -> Option<&ConnectorLayout> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn fallback_count(&self) -> usize {
        self.connectors
            .iter()
            .filter(|c| c.route.is_fallback())
            .count()
    }
}

fn connector_point(shape: &Shape, endpoint: &Endpoint) -> ConnectorPoint {
    ConnectorPoint::new(shape.bounds(), endpoint.side, endpoint.distance)
}

/// Route every connector of `scene`. Each connector is routed on its own
/// against the margin boxes of its two shapes and, when
/// `config.avoid_all_shapes` is set, of every other shape in the scene.
pub fn route_scene(scene: &Scene, config: &RouterConfig) -> Result<SceneLayout, SceneError> {
    scene.validate()?;

    let shapes: Vec<ShapeLayout> = scene
        .shapes
        .iter()
        .map(|shape| ShapeLayout {
            id: shape.id.clone(),
            label: shape.label.clone(),
            bounds: shape.bounds(),
        })
        .collect();

    let mut connectors = Vec::with_capacity(scene.connectors.len());
    for (idx, connector) in scene.connectors.iter().enumerate() {
        let name = scene.connector_name(idx);
        let lookup = |id: &str| {
            scene.shape(id).ok_or_else(|| SceneError::UnknownShape {
                connector: name.clone(),
                shape: id.to_string(),
            })
        };
        let source_shape = lookup(&connector.source.shape)?;
        let target_shape = lookup(&connector.target.shape)?;

        let extra: Vec<Rectangle> = if config.avoid_all_shapes {
            scene
                .shapes
                .iter()
                .filter(|s| s.id != source_shape.id && s.id != target_shape.id)
                .map(|s| s.bounds().inflate(config.margin, config.margin))
                .collect()
        } else {
            Vec::new()
        };

        let source = connector_point(source_shape, &connector.source);
        let target = connector_point(target_shape, &connector.target);
        let route = route_connector(&source, &target, &extra, config);
        if route.is_fallback() {
            tracing::warn!(connector = %name, "no obstacle-free route; drawing a direct line");
        } else {
            tracing::trace!(connector = %name, points = route.points.len(), "connector routed");
        }

        let drawn_points = attach_stubs(compute_pt(&source), &route.points, compute_pt(&target));
        connectors.push(ConnectorLayout {
            id: name,
            source: connector.source.shape.clone(),
            target: connector.target.shape.clone(),
            label: connector.label.clone(),
            label_anchor: label_anchor(&drawn_points),
            path: points_to_path(&drawn_points),
            midpoints: segment_midpoints(&drawn_points),
            drawn_points,
            route,
        });
    }

    let extent = compute_extent(&shapes, &connectors);
    Ok(SceneLayout {
        shapes,
        connectors,
        extent,
    })
}

fn compute_extent(shapes: &[ShapeLayout], connectors: &[ConnectorLayout]) -> Rectangle {
    let mut extent: Option<Rectangle> = None;
    let mut grow = |rect: Rectangle| {
        extent = Some(match extent {
            Some(current) => current.union(&rect),
            None => rect,
        });
    };
    for shape in shapes {
        grow(shape.bounds);
    }
    for connector in connectors {
        for p in connector.points() {
            grow(Rectangle::new(p.x, p.y, 0.0, 0.0));
        }
    }
    extent.unwrap_or_default()
}
