use std::collections::HashSet;

use super::geometry::{Point, Rectangle};
use super::grid::Grid;

/// Candidate waypoints for a grid.
///
/// Cells on the outer ring only contribute the points on their outer edge
/// (plus the outer corner for the four corner cells); interior cells
/// contribute all eight boundary points and their center so a route can
/// wrap around an obstacle. Points inside any obstacle are dropped.
pub fn grid_to_spots(grid: &Grid, obstacles: &[Rectangle]) -> Vec<Point> {
    let mut spots: Vec<Point> = Vec::with_capacity(grid.len() * 4);
    let last_row = grid.rows().saturating_sub(1);
    let last_col = grid.columns().saturating_sub(1);

    for (row, col, r) in grid.iter() {
        let first_row = row == 0;
        let is_last_row = row == last_row;
        let first_col = col == 0;
        let is_last_col = col == last_col;

        if first_row && first_col {
            spots.push(r.north_west());
        }
        if first_row && is_last_col {
            spots.push(r.north_east());
        }
        if is_last_row && is_last_col {
            spots.push(r.south_east());
        }
        if is_last_row && first_col {
            spots.push(r.south_west());
        }

        if first_row {
            spots.extend([r.north_west(), r.north(), r.north_east()]);
        } else if is_last_row {
            spots.extend([r.south_west(), r.south(), r.south_east()]);
        } else if first_col {
            spots.extend([r.north_west(), r.west(), r.south_west()]);
        } else if is_last_col {
            spots.extend([r.north_east(), r.east(), r.south_east()]);
        } else {
            spots.extend([
                r.north_west(),
                r.north(),
                r.north_east(),
                r.east(),
                r.south_east(),
                r.south(),
                r.south_west(),
                r.west(),
                r.center(),
            ]);
        }
    }

    reduce_points(spots)
        .into_iter()
        .filter(|p| !obstacles.iter().any(|o| o.contains(*p)))
        .collect()
}

/// Drop points whose quantized key was already seen, keeping first-seen
/// order.
pub fn reduce_points(points: Vec<Point>) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(points.len());
    points.into_iter().filter(|p| seen.insert(p.key())).collect()
}
