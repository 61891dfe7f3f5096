use serde::{Deserialize, Serialize};

/// Sub-unit resolution used when points are compared or hashed as keys.
const KEY_SCALE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Quantized integer coordinates; two points with the same key are the
    /// same routing location even if they were computed along different
    /// arithmetic paths.
    pub fn key(self) -> (i64, i64) {
        (quantize(self.x), quantize(self.y))
    }

    pub fn same_key(self, other: Point) -> bool {
        self.key() == other.key()
    }

    /// True when the two points share a quantized x or y.
    pub fn is_aligned_with(self, other: Point) -> bool {
        let (ax, ay) = self.key();
        let (bx, by) = other.key();
        ax == bx || ay == by
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

pub(crate) fn quantize(value: f32) -> i64 {
    (value * KEY_SCALE).round() as i64
}

/// Axis-aligned rectangle. Extents are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn north_west(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn north_east(&self) -> Point {
        Point::new(self.right(), self.top)
    }

    pub fn south_west(&self) -> Point {
        Point::new(self.left, self.bottom())
    }

    pub fn south_east(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn north(&self) -> Point {
        Point::new(self.center().x, self.top)
    }

    pub fn south(&self) -> Point {
        Point::new(self.center().x, self.bottom())
    }

    pub fn west(&self) -> Point {
        Point::new(self.left, self.center().y)
    }

    pub fn east(&self) -> Point {
        Point::new(self.right(), self.center().y)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    pub fn contains_strictly(&self, p: Point) -> bool {
        p.x > self.left && p.x < self.right() && p.y > self.top && p.y < self.bottom()
    }

    pub fn inflate(&self, h: f32, v: f32) -> Self {
        Self::new(
            self.left - h,
            self.top - v,
            self.width + 2.0 * h,
            self.height + 2.0 * v,
        )
    }

    /// Open-interval overlap test: rectangles that only share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        other.left < self.right()
            && self.left < other.right()
            && other.top < self.bottom()
            && self.top < other.bottom()
    }

    pub fn union(&self, other: &Rectangle) -> Self {
        Self::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Boundary segments in N, E, S, W order.
    pub fn edges(&self) -> [(Point, Point); 4] {
        [
            (self.north_west(), self.north_east()),
            (self.north_east(), self.south_east()),
            (self.south_east(), self.south_west()),
            (self.south_west(), self.north_west()),
        ]
    }
}

pub fn distance(a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Proper-crossing test built on strict orientation comparisons. Collinear
/// overlaps and touches at a collinear endpoint do not count.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    fn ccw(a: Point, b: Point, c: Point) -> bool {
        (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
    }
    ccw(p1, p3, p4) != ccw(p2, p3, p4) && ccw(p1, p2, p3) != ccw(p1, p2, p4)
}

/// Intersection point of segments `p1-p2` and `p3-p4`, if any. Parallel and
/// zero-length inputs have a zero denominator and yield `None`.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denom == 0.0 {
        return None;
    }
    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;
    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        return Some(Point::new(
            p1.x + ua * (p2.x - p1.x),
            p1.y + ua * (p2.y - p1.y),
        ));
    }
    None
}

/// Whether the segment `a-b` is blocked by `rect`.
///
/// A segment lying entirely within the (closed) rectangle is blocked. A
/// segment that crosses one of the four boundary edges is blocked unless
/// the crossing is just one of its own endpoints resting on the boundary,
/// which is how routes leave and enter the margin box of a shape. Endpoint
/// identity is decided by quantized key, so rounding noise in either the
/// endpoint or the edge does not turn a touch into a crossing.
pub fn segment_crosses_rect(a: Point, b: Point, rect: &Rectangle) -> bool {
    if a == b {
        return rect.contains_strictly(a);
    }
    if rect.contains(a) && rect.contains(b) {
        return true;
    }
    for (c, d) in rect.edges() {
        if !segments_intersect(a, b, c, d) {
            continue;
        }
        let Some(hit) = segment_intersection(a, b, c, d) else {
            continue;
        };
        if hit.same_key(a) || hit.same_key(b) {
            continue;
        }
        return true;
    }
    false
}
