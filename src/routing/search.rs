use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::geometry::Point;
use super::graph::{NodeId, RoutingGraph};

#[derive(Clone, Copy, Debug, PartialEq)]
struct QueueEntry {
    dist: f32,
    node: NodeId,
}

impl Eq for QueueEntry {}

// Min-heap on distance; equal distances pop the lower node id first.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra from `source` to `target`. Returns the node sequence including
/// both ends, or `None` when `target` is unreachable.
pub fn shortest_path(graph: &RoutingGraph, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
    let n = graph.len();
    if source.index() >= n || target.index() >= n {
        return None;
    }

    let mut dist = vec![f32::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source.index()] = 0.0;
    heap.push(QueueEntry {
        dist: 0.0,
        node: source,
    });

    while let Some(QueueEntry { dist: d, node }) = heap.pop() {
        if settled[node.index()] || d > dist[node.index()] {
            continue;
        }
        settled[node.index()] = true;
        if node == target {
            break;
        }
        for &(next, weight) in graph.neighbors(node) {
            if settled[next.index()] {
                continue;
            }
            let candidate = d + weight;
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                prev[next.index()] = Some(node);
                heap.push(QueueEntry {
                    dist: candidate,
                    node: next,
                });
            }
        }
    }

    if !settled[target.index()] {
        return None;
    }

    let mut path = vec![target];
    let mut cur = target;
    while let Some(p) = prev[cur.index()] {
        path.push(p);
        cur = p;
    }
    path.reverse();
    Some(path)
}

/// Point-level wrapper: looks both points up in the graph and returns the
/// route as coordinates.
pub fn dijkstra(graph: &RoutingGraph, start: Point, end: Point) -> Option<Vec<Point>> {
    let source = graph.get(start)?;
    let target = graph.get(end)?;
    let path = shortest_path(graph, source, target)?;
    Some(path.into_iter().map(|id| graph.point(id)).collect())
}
