use crate::routing::RouteKind;
use crate::routing::polyline::{bend_count, path_length};
use crate::scene::SceneLayout;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct RouteDump {
    pub extent: [f32; 4],
    pub fallbacks: usize,
    pub shapes: Vec<ShapeDump>,
    pub connectors: Vec<ConnectorDump>,
}

#[derive(Debug, Serialize)]
pub struct ShapeDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDump {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: RouteKind,
    pub points: Vec<[f32; 2]>,
    pub drawn_points: Vec<[f32; 2]>,
    pub path: String,
    pub midpoints: Vec<MidpointDump>,
    pub length: f32,
    pub bends: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MidpointDump {
    pub x: f32,
    pub y: f32,
    pub segment_index: usize,
}

impl RouteDump {
    pub fn from_layout(layout: &SceneLayout) -> Self {
        let shapes = layout
            .shapes
            .iter()
            .map(|shape| ShapeDump {
                id: shape.id.clone(),
                x: shape.bounds.left,
                y: shape.bounds.top,
                width: shape.bounds.width,
                height: shape.bounds.height,
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|connector| ConnectorDump {
                id: connector.id.clone(),
                source: connector.source.clone(),
                target: connector.target.clone(),
                kind: connector.kind(),
                points: connector.points().iter().map(|p| [p.x, p.y]).collect(),
                drawn_points: connector.drawn_points.iter().map(|p| [p.x, p.y]).collect(),
                path: connector.path.clone(),
                midpoints: connector
                    .midpoints
                    .iter()
                    .map(|m| MidpointDump {
                        x: m.x,
                        y: m.y,
                        segment_index: m.segment_index,
                    })
                    .collect(),
                length: path_length(connector.points()),
                bends: bend_count(connector.points()),
            })
            .collect();

        let e = layout.extent;
        RouteDump {
            extent: [e.left, e.top, e.width, e.height],
            fallbacks: layout.fallback_count(),
            shapes,
            connectors,
        }
    }
}

pub fn write_route_dump(path: &Path, layout: &SceneLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = RouteDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

/// Same document as [`write_route_dump`], printed to stdout.
pub fn print_route_dump(layout: &SceneLayout) -> anyhow::Result<()> {
    let dump = RouteDump::from_layout(layout);
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, &dump)?;
    writeln!(lock)?;
    Ok(())
}
