use serde::Serialize;

use super::geometry::{Point, distance};

/// Handle position for dragging one segment of a routed connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentMidpoint {
    pub x: f32,
    pub y: f32,
    pub segment_index: usize,
}

pub fn is_horizontal_segment(a: Point, b: Point) -> bool {
    a.y == b.y
}

pub fn is_vertical_segment(a: Point, b: Point) -> bool {
    a.x == b.x
}

/// Force every segment to be horizontal or vertical by inserting the
/// corner `(curr.x, prev.y)` in front of any diagonal step.
pub fn create_polyline(path: &[Point]) -> Vec<Point> {
    let Some((&first, rest)) = path.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(path.len() + 2);
    out.push(first);
    for &curr in rest {
        let prev = out[out.len() - 1];
        if !is_horizontal_segment(prev, curr) && !is_vertical_segment(prev, curr) {
            out.push(Point::new(curr.x, prev.y));
        }
        out.push(curr);
    }
    out
}

/// Drop repeated points and interior points that continue a straight run.
/// The first and last point are always kept.
pub fn simplify(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if deduped.last() != Some(&p) {
            deduped.push(p);
        }
    }
    let last = points[points.len() - 1];
    if deduped.len() == 1 {
        deduped.push(last);
        return deduped;
    }

    let mut out: Vec<Point> = Vec::with_capacity(deduped.len());
    out.push(deduped[0]);
    for idx in 1..deduped.len() - 1 {
        let prev = out[out.len() - 1];
        let curr = deduped[idx];
        let next = deduped[idx + 1];
        let straight_x = prev.x == curr.x && curr.x == next.x;
        let straight_y = prev.y == curr.y && curr.y == next.y;
        if straight_x || straight_y {
            continue;
        }
        out.push(curr);
    }
    out.push(deduped[deduped.len() - 1]);
    out
}

/// SVG path data: a move to the first point followed by line-tos.
pub fn points_to_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut d = format!("M{},{}", first.x, first.y);
    for p in rest {
        d.push_str(&format!(" L{},{}", p.x, p.y));
    }
    d
}

/// Prefix `start` and suffix `end` to a route, skipping either when it
/// coincides with the route's own end point. Used to join a route that
/// stops at the margin box back to the shape boundary.
pub fn attach_stubs(start: Point, points: &[Point], end: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len() + 2);
    out.push(start);
    for &p in points.iter().chain(std::iter::once(&end)) {
        if out.last().is_some_and(|last| last.same_key(p)) {
            continue;
        }
        out.push(p);
    }
    out
}

pub fn segment_midpoints(points: &[Point]) -> Vec<SegmentMidpoint> {
    points
        .windows(2)
        .enumerate()
        .map(|(segment_index, pair)| SegmentMidpoint {
            x: (pair[0].x + pair[1].x) / 2.0,
            y: (pair[0].y + pair[1].y) / 2.0,
            segment_index,
        })
        .collect()
}

/// Where a connector label sits: the midpoint of the longest segment,
/// preferring segments away from the two end stubs when there are enough.
pub fn label_anchor(points: &[Point]) -> Option<Point> {
    if points.len() < 2 {
        return None;
    }
    let segment_count = points.len() - 1;
    let range = if segment_count >= 3 {
        1..segment_count - 1
    } else {
        0..segment_count
    };
    let mut best: Option<(usize, f32)> = None;
    for idx in range {
        let len = distance(points[idx], points[idx + 1]);
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((idx, len));
        }
    }
    let (idx, _) = best?;
    let (a, b) = (points[idx], points[idx + 1]);
    Some(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
}

pub fn path_length(points: &[Point]) -> f32 {
    points.windows(2).map(|pair| distance(pair[0], pair[1])).sum()
}

pub fn bend_count(points: &[Point]) -> usize {
    points
        .windows(3)
        .filter(|w| {
            let first_horizontal = is_horizontal_segment(w[0], w[1]);
            let second_horizontal = is_horizontal_segment(w[1], w[2]);
            first_horizontal != second_horizontal
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn inserts_corner_for_diagonal_step() {
        let out = create_polyline(&[p(0.0, 0.0), p(10.0, 20.0), p(10.0, 40.0)]);
        assert_eq!(out, vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 20.0), p(10.0, 40.0)]);
    }

    #[test]
    fn orthogonal_input_is_untouched() {
        let path = [p(0.0, 0.0), p(0.0, 20.0), p(30.0, 20.0)];
        assert_eq!(create_polyline(&path), path.to_vec());
        assert!(create_polyline(&[]).is_empty());
        assert_eq!(create_polyline(&[p(1.0, 1.0)]), vec![p(1.0, 1.0)]);
    }

    #[test]
    fn simplify_merges_straight_runs() {
        let path = [
            p(0.0, 0.0),
            p(5.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 5.0),
            p(10.0, 10.0),
        ];
        assert_eq!(simplify(&path), vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]);
    }

    #[test]
    fn simplify_keeps_degenerate_endpoints() {
        assert_eq!(simplify(&[p(1.0, 1.0), p(1.0, 1.0)]), vec![p(1.0, 1.0), p(1.0, 1.0)]);
        assert_eq!(
            simplify(&[p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0)]),
            vec![p(1.0, 1.0), p(1.0, 1.0)]
        );
        assert_eq!(
            simplify(&[p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0)]),
            vec![p(0.0, 0.0), p(10.0, 0.0)]
        );
    }

    #[test]
    fn path_string_format() {
        assert_eq!(points_to_path(&[]), "");
        assert_eq!(
            points_to_path(&[p(110.0, 50.0), p(200.0, 50.0), p(200.0, 62.5)]),
            "M110,50 L200,50 L200,62.5"
        );
    }

    #[test]
    fn stubs_join_the_shape_boundary() {
        let route = [p(110.0, 50.0), p(200.0, 50.0), p(200.0, 250.0), p(290.0, 250.0)];
        let drawn = attach_stubs(p(100.0, 50.0), &route, p(300.0, 250.0));
        assert_eq!(drawn.len(), 6);
        assert_eq!(drawn[0], p(100.0, 50.0));
        assert_eq!(drawn[1], p(110.0, 50.0));
        assert_eq!(drawn[5], p(300.0, 250.0));

        let flush = attach_stubs(p(110.0, 50.0), &route, p(290.0, 250.0));
        assert_eq!(flush, route.to_vec());
    }

    #[test]
    fn midpoints_per_segment() {
        let mids = segment_midpoints(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 30.0)]);
        assert_eq!(
            mids,
            vec![
                SegmentMidpoint {
                    x: 5.0,
                    y: 0.0,
                    segment_index: 0
                },
                SegmentMidpoint {
                    x: 10.0,
                    y: 15.0,
                    segment_index: 1
                },
            ]
        );
    }

    #[test]
    fn label_sits_on_longest_inner_segment() {
        let path = [p(0.0, 0.0), p(100.0, 0.0), p(100.0, 40.0), p(120.0, 40.0), p(120.0, 50.0)];
        assert_eq!(label_anchor(&path), Some(p(100.0, 20.0)));
        assert_eq!(label_anchor(&[p(0.0, 0.0), p(10.0, 0.0)]), Some(p(5.0, 0.0)));
        assert_eq!(label_anchor(&[p(0.0, 0.0)]), None);
    }

    #[test]
    fn metrics() {
        let path = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 30.0), p(20.0, 30.0)];
        assert_eq!(path_length(&path), 50.0);
        assert_eq!(bend_count(&path), 2);
        assert_eq!(bend_count(&path[..2]), 0);
    }
}
