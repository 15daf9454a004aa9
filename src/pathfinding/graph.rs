//! Sparse way-point graph
//!
//! Nodes live in an arena keyed by stable id; edges are neighbor-id sets
//! rather than live references, so the model serializes trivially and
//! cannot form ownership cycles. Edges are undirected in practice: the
//! builder adds both directions, and a one-directional entry degrades
//! search to directed reachability.

use crate::core::Point;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stable way-point identifier
pub type NodeId = u32;

/// One named location with its outgoing adjacency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointNode {
    pub position: Point,
    pub neighbors: BTreeSet<NodeId>,
}

impl WaypointNode {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            neighbors: BTreeSet::new(),
        }
    }
}

/// Way-point graph: an id-keyed node arena.
///
/// Neighbor ids referencing absent nodes are tolerated; the search skips
/// them rather than faulting on a partially-specified model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointGraph {
    nodes: BTreeMap<NodeId, WaypointNode>,
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node. A replaced node keeps no old adjacency.
    pub fn insert_node(&mut self, id: NodeId, position: Point) {
        self.nodes.insert(id, WaypointNode::new(position));
    }

    /// Add the undirected edge between two existing nodes.
    ///
    /// Returns `false` without touching the graph when either endpoint is
    /// missing.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.neighbors.insert(b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbors.insert(a);
        }
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&WaypointNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in id order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &WaypointNode)> {
        self.nodes.iter()
    }

    /// Nearest node to a point by Euclidean distance (linear scan).
    ///
    /// Ties resolve to the lowest id because iteration is id-ordered.
    /// `None` on an empty graph.
    pub fn nearest_node(&self, point: Point) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (&id, node) in &self.nodes {
            let d = node.position.distance_squared(&point);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((id, d)),
            }
        }
        best.map(|(id, _)| id)
    }
}
