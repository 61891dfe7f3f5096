use super::geometry::{Point, Rectangle, quantize};

/// Ruler coordinates partitioning the routing area: vertical rulers are
/// x values, horizontal rulers are y values. Both sorted ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rulers {
    pub verticals: Vec<f32>,
    pub horizontals: Vec<f32>,
}

impl Rulers {
    pub fn collect(obstacles: &[Rectangle], start: Point, end: Point) -> Self {
        let mut verticals = Vec::with_capacity(obstacles.len() * 2 + 2);
        let mut horizontals = Vec::with_capacity(obstacles.len() * 2 + 2);
        for obs in obstacles {
            verticals.push(obs.left);
            verticals.push(obs.right());
            horizontals.push(obs.top);
            horizontals.push(obs.bottom());
        }
        verticals.push(start.x);
        verticals.push(end.x);
        horizontals.push(start.y);
        horizontals.push(end.y);
        Self {
            verticals: reduce_numbers(verticals),
            horizontals: reduce_numbers(horizontals),
        }
    }
}

/// Sort and drop values that quantize to the same key.
pub fn reduce_numbers(mut values: Vec<f32>) -> Vec<f32> {
    values.retain(|v| v.is_finite());
    values.sort_by(f32::total_cmp);
    values.dedup_by_key(|v| quantize(*v));
    values
}

/// Smallest rectangle covering every obstacle and both endpoints, grown by
/// `margin` on all sides.
pub fn routing_bounds(obstacles: &[Rectangle], start: Point, end: Point, margin: f32) -> Rectangle {
    let mut bounds = Rectangle::from_ltrb(
        start.x.min(end.x),
        start.y.min(end.y),
        start.x.max(end.x),
        start.y.max(end.y),
    );
    for obs in obstacles {
        bounds = bounds.union(obs);
    }
    bounds.inflate(margin, margin)
}

/// Row-major tiling of the routing bounds.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Rectangle>,
}

impl Grid {
    /// Rulers are expected to be sorted and to lie within `bounds`.
    pub fn from_rulers(verticals: &[f32], horizontals: &[f32], bounds: Rectangle) -> Self {
        let rows = horizontals.len() + 1;
        let columns = verticals.len() + 1;
        let mut cells = Vec::with_capacity(rows * columns);
        let mut last_y = bounds.top;
        for row in 0..rows {
            let y = horizontals.get(row).copied().unwrap_or(bounds.bottom());
            let mut last_x = bounds.left;
            for col in 0..columns {
                let x = verticals.get(col).copied().unwrap_or(bounds.right());
                cells.push(Rectangle::from_ltrb(last_x, last_y, x, y));
                last_x = x;
            }
            last_y = y;
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Rectangle> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + col)
    }

    /// Cells with their `(row, col)` position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Rectangle)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (idx / self.columns, idx % self.columns, cell))
    }
}
