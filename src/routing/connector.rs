use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Top and bottom sides run horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Attachment location on a shape: `distance` runs from the top/left
/// corner (0.0) to the opposite corner (1.0) of `side`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPoint {
    pub shape: Rectangle,
    pub side: Side,
    pub distance: f32,
}

impl ConnectorPoint {
    pub fn new(shape: Rectangle, side: Side, distance: f32) -> Self {
        Self {
            shape,
            side,
            distance,
        }
    }

    /// Recover a connector from an absolute handle position by projecting
    /// it onto `side`.
    pub fn from_anchor(shape: Rectangle, side: Side, anchor: Point) -> Self {
        let (offset, span) = if side.is_horizontal() {
            (anchor.x - shape.left, shape.width)
        } else {
            (anchor.y - shape.top, shape.height)
        };
        let distance = if span > 0.0 {
            (offset / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        Self::new(shape, side, distance)
    }
}

pub fn compute_pt(cp: &ConnectorPoint) -> Point {
    let b = &cp.shape;
    match cp.side {
        Side::Top => Point::new(b.left + b.width * cp.distance, b.top),
        Side::Bottom => Point::new(b.left + b.width * cp.distance, b.bottom()),
        Side::Left => Point::new(b.left, b.top + b.height * cp.distance),
        Side::Right => Point::new(b.right(), b.top + b.height * cp.distance),
    }
}

/// Push the resolved point out of its shape by `margin`. The moved
/// coordinate is taken from the shape's margin box so the result sits
/// exactly on that box's edge rather than one rounding step inside it.
pub fn extrude_cp(cp: &ConnectorPoint, margin: f32) -> Point {
    let p = compute_pt(cp);
    let margin_box = cp.shape.inflate(margin, margin);
    match cp.side {
        Side::Top => Point::new(p.x, margin_box.top),
        Side::Bottom => Point::new(p.x, margin_box.bottom()),
        Side::Left => Point::new(margin_box.left, p.y),
        Side::Right => Point::new(margin_box.right(), p.y),
    }
}
