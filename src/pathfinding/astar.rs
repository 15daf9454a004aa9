//! A* search over both spatial representations
//!
//! The two modes share the open/closed-set expansion discipline and differ
//! in neighbor generation and cost: graph mode uses Euclidean edge lengths
//! with a straight-line heuristic, grid mode uses unit steps with a
//! Manhattan heuristic. Both heuristics are admissible and consistent for
//! their movement model, so returned paths are cost-optimal. Each call
//! runs to completion; there is no suspension.

use crate::core::Point;
use crate::pathfinding::graph::{NodeId, WaypointGraph};
use crate::pathfinding::grid::{GridCell, OccupancyGrid};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Open-set entry for the graph search
#[derive(Debug, Clone, Copy)]
struct GraphCandidate {
    id: NodeId,
    f_cost: f64,
}

impl PartialEq for GraphCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.f_cost == other.f_cost
    }
}

impl Eq for GraphCandidate {}

impl Ord for GraphCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; equal costs resolve to
        // the lower node id for deterministic expansion
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for GraphCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a minimum-cost route between two free positions over a way-point
/// graph.
///
/// Start and goal are snapped to their nearest nodes first, so the
/// returned sequence begins at the snapped start rather than the caller's
/// exact position. Returns an empty sequence when the graph is empty or
/// the goal is unreachable. Neighbor ids that reference absent nodes are
/// skipped silently.
pub fn find_graph_path(graph: &WaypointGraph, start: Point, goal: Point) -> Vec<Point> {
    let (start_id, goal_id) = match (graph.nearest_node(start), graph.nearest_node(goal)) {
        (Some(s), Some(g)) => (s, g),
        _ => {
            debug!("[GraphAStar] snap failed: empty graph");
            return Vec::new();
        }
    };
    trace!(
        "[GraphAStar] search: start=node{} goal=node{}",
        start_id,
        goal_id
    );

    let goal_position = match graph.node(goal_id) {
        Some(node) => node.position,
        None => return Vec::new(),
    };

    let mut open_set = BinaryHeap::new();
    let mut closed_set: HashSet<NodeId> = HashSet::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut g_scores: HashMap<NodeId, f64> = HashMap::new();

    let h_start = match graph.node(start_id) {
        Some(node) => node.position.distance(&goal_position),
        None => return Vec::new(),
    };
    g_scores.insert(start_id, 0.0);
    open_set.push(GraphCandidate {
        id: start_id,
        f_cost: h_start,
    });

    let mut nodes_expanded = 0usize;

    while let Some(current) = open_set.pop() {
        if current.id == goal_id {
            debug!(
                "[GraphAStar] reached goal after expanding {} nodes",
                nodes_expanded
            );
            return reconstruct_graph_path(graph, &came_from, start_id, goal_id);
        }

        if !closed_set.insert(current.id) {
            continue;
        }
        nodes_expanded += 1;

        let current_node = match graph.node(current.id) {
            Some(node) => node,
            None => continue,
        };
        let current_g = g_scores.get(&current.id).copied().unwrap_or(f64::INFINITY);

        for &neighbor_id in &current_node.neighbors {
            if closed_set.contains(&neighbor_id) {
                continue;
            }
            // Dangling references in a partially-specified model are
            // treated as absent, not as an error
            let neighbor = match graph.node(neighbor_id) {
                Some(node) => node,
                None => continue,
            };

            let tentative_g = current_g + current_node.position.distance(&neighbor.position);
            let known_g = g_scores.get(&neighbor_id).copied().unwrap_or(f64::INFINITY);
            if tentative_g < known_g {
                came_from.insert(neighbor_id, current.id);
                g_scores.insert(neighbor_id, tentative_g);
                open_set.push(GraphCandidate {
                    id: neighbor_id,
                    f_cost: tentative_g + neighbor.position.distance(&goal_position),
                });
            }
        }
    }

    debug!(
        "[GraphAStar] no path after expanding {} nodes",
        nodes_expanded
    );
    Vec::new()
}

fn reconstruct_graph_path(
    graph: &WaypointGraph,
    came_from: &HashMap<NodeId, NodeId>,
    start_id: NodeId,
    goal_id: NodeId,
) -> Vec<Point> {
    let mut ids = vec![goal_id];
    let mut current = goal_id;
    while current != start_id {
        match came_from.get(&current) {
            Some(&previous) => {
                current = previous;
                ids.push(current);
            }
            None => break,
        }
    }
    ids.reverse();
    ids.iter()
        .filter_map(|id| graph.node(*id).map(|node| node.position))
        .collect()
}

/// Open-set entry for the grid search
#[derive(Debug, Clone, Copy)]
struct GridCandidate {
    cell: GridCell,
    f_cost: u32,
}

impl PartialEq for GridCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cell == other.cell && self.f_cost == other.f_cost
    }
}

impl Eq for GridCandidate {}

impl Ord for GridCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; ties resolve in
        // row-major cell order
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for GridCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest 4-connected route between two open cells.
///
/// Steps cost one unit each and the heuristic is Manhattan distance,
/// which matches the step cost exactly on open terrain. Returns `None`
/// when either endpoint is blocked or no path exists.
pub fn find_grid_path(grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> Option<Vec<GridCell>> {
    if !grid.is_walkable(start) {
        debug!("[GridAStar] start cell ({},{}) blocked", start.row, start.col);
        return None;
    }
    if !grid.is_walkable(goal) {
        debug!("[GridAStar] goal cell ({},{}) blocked", goal.row, goal.col);
        return None;
    }

    let mut open_set = BinaryHeap::new();
    let mut closed_set: HashSet<GridCell> = HashSet::new();
    let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
    let mut g_scores: HashMap<GridCell, u32> = HashMap::new();

    g_scores.insert(start, 0);
    open_set.push(GridCandidate {
        cell: start,
        f_cost: start.manhattan_distance(&goal) as u32,
    });

    let mut nodes_expanded = 0usize;

    while let Some(current) = open_set.pop() {
        if current.cell == goal {
            debug!(
                "[GridAStar] reached goal after expanding {} cells",
                nodes_expanded
            );
            return reconstruct_grid_path(&came_from, start, goal);
        }

        if !closed_set.insert(current.cell) {
            continue;
        }
        nodes_expanded += 1;

        let current_g = g_scores.get(&current.cell).copied().unwrap_or(u32::MAX);

        for neighbor in current.cell.neighbors_4() {
            // Bounds and wall pruning before relaxation
            if !grid.is_walkable(neighbor) || closed_set.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let known_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);
            if tentative_g < known_g {
                came_from.insert(neighbor, current.cell);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(GridCandidate {
                    cell: neighbor,
                    f_cost: tentative_g + neighbor.manhattan_distance(&goal) as u32,
                });
            }
        }
    }

    debug!("[GridAStar] no path after expanding {} cells", nodes_expanded);
    None
}

fn reconstruct_grid_path(
    came_from: &HashMap<GridCell, GridCell>,
    start: GridCell,
    goal: GridCell,
) -> Option<Vec<GridCell>> {
    let mut path = vec![goal];
    let mut visited: HashSet<GridCell> = HashSet::new();
    let mut current = goal;

    while current != start {
        // Guard against a malformed parent chain looping forever
        if !visited.insert(current) {
            debug!("[GridAStar] cycle in parent chain during reconstruction");
            break;
        }
        match came_from.get(&current) {
            Some(&previous) => {
                current = previous;
                path.push(current);
            }
            None => break,
        }
    }

    path.reverse();
    Some(path)
}

/// Total Euclidean length of a point path; `0.0` for fewer than two points
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}
