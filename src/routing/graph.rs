use std::collections::HashMap;

use super::geometry::{Point, Rectangle, distance, segment_crosses_rect};

/// Handle into the point arena of a [`RoutingGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Undirected visibility graph over routing spots.
///
/// Points live in an arena addressed by [`NodeId`]; lookups go through the
/// quantized coordinate key so that equal locations always map to the same
/// node, and the first inserted representative of a location is kept.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    points: Vec<Point>,
    index: HashMap<(i64, i64), NodeId>,
    adjacency: Vec<Vec<(NodeId, f32)>>,
}

impl RoutingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, p: Point) -> NodeId {
        if let Some(id) = self.index.get(&p.key()) {
            return *id;
        }
        let id = NodeId(self.points.len());
        self.points.push(p);
        self.adjacency.push(Vec::new());
        self.index.insert(p.key(), id);
        id
    }

    pub fn get(&self, p: Point) -> Option<NodeId> {
        self.index.get(&p.key()).copied()
    }

    pub fn point(&self, id: NodeId) -> Point {
        self.points[id.0]
    }

    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, f32)] {
        &self.adjacency[id.0]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency[a.0].iter().any(|(n, _)| *n == b)
    }

    fn link(&mut self, a: NodeId, b: NodeId, weight: f32) {
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.adjacency[a.0].push((b, weight));
        self.adjacency[b.0].push((a, weight));
    }
}

/// Link `from` and `to` when they are axis-aligned, distinct and the
/// straight segment between them clears every obstacle. Returns whether an
/// edge now exists.
pub fn add_edge(graph: &mut RoutingGraph, from: Point, to: Point, obstacles: &[Rectangle]) -> bool {
    if from.same_key(to) || !from.is_aligned_with(to) {
        return false;
    }
    if obstacles.iter().any(|o| segment_crosses_rect(from, to, o)) {
        return false;
    }
    let a = graph.add(from);
    let b = graph.add(to);
    graph.link(a, b, distance(from, to));
    true
}

/// Build the routing graph for one connector. The endpoints are inserted
/// before any spot so their exact coordinates survive key deduplication.
pub fn build_routing_graph(
    spots: &[Point],
    start: Point,
    end: Point,
    obstacles: &[Rectangle],
) -> (RoutingGraph, NodeId, NodeId) {
    let mut graph = RoutingGraph::new();
    let start_id = graph.add(start);
    let end_id = graph.add(end);

    for (i, a) in spots.iter().enumerate() {
        for b in &spots[i + 1..] {
            add_edge(&mut graph, *a, *b, obstacles);
        }
    }

    for spot in spots {
        add_edge(&mut graph, start, *spot, obstacles);
        add_edge(&mut graph, end, *spot, obstacles);
    }
    add_edge(&mut graph, start, end, obstacles);

    (graph, start_id, end_id)
}
