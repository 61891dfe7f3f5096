use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::routing::{Rectangle, Side};

fn default_distance() -> f32 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Shape {
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub shape: String,
    pub side: Side,
    #[serde(default = "default_distance")]
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: Endpoint,
    pub target: Endpoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, id: &str, x: f32, y: f32, width: f32, height: f32) {
        self.shapes.push(Shape {
            id: id.to_string(),
            x,
            y,
            width,
            height,
            label: None,
        });
    }

    pub fn connect(&mut self, from: (&str, Side, f32), to: (&str, Side, f32)) {
        self.connectors.push(Connector {
            id: None,
            source: Endpoint {
                shape: from.0.to_string(),
                side: from.1,
                distance: from.2,
            },
            target: Endpoint {
                shape: to.0.to_string(),
                side: to.1,
                distance: to.2,
            },
            label: None,
        });
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Stable display name for a connector: its id, or its position.
    pub fn connector_name(&self, idx: usize) -> String {
        self.connectors
            .get(idx)
            .and_then(|c| c.id.clone())
            .unwrap_or_else(|| format!("connector-{idx}"))
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let mut seen = HashSet::new();
        for shape in &self.shapes {
            if !seen.insert(shape.id.as_str()) {
                return Err(SceneError::DuplicateShape(shape.id.clone()));
            }
            let finite = [shape.x, shape.y, shape.width, shape.height]
                .iter()
                .all(|v| v.is_finite());
            if !finite || shape.width < 0.0 || shape.height < 0.0 {
                return Err(SceneError::InvalidShape {
                    id: shape.id.clone(),
                    x: shape.x,
                    y: shape.y,
                    width: shape.width,
                    height: shape.height,
                });
            }
        }
        for (idx, connector) in self.connectors.iter().enumerate() {
            for endpoint in [&connector.source, &connector.target] {
                if !seen.contains(endpoint.shape.as_str()) {
                    return Err(SceneError::UnknownShape {
                        connector: self.connector_name(idx),
                        shape: endpoint.shape.clone(),
                    });
                }
                if !(0.0..=1.0).contains(&endpoint.distance) {
                    return Err(SceneError::DistanceOutOfRange {
                        connector: self.connector_name(idx),
                        distance: endpoint.distance,
                    });
                }
            }
        }
        Ok(())
    }
}
