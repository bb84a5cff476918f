//! Shortest-path search over the occupancy graph.
//!
//! A* runs in the reversed frame (expanding outward from the goal) so the
//! parent walk already emits cells in travel order. Obstructed cells are
//! avoided through their scaled inbound edges alone; no boolean test is
//! needed during expansion, and a fully walled-in goal still resolves to
//! the least-bad route.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::OccupancyGraph;

/// Heap entry ordered as a min-heap over `f = g + h`, with the cell index
/// as a tie-break so equal priorities pop deterministically.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    priority: f64,
    index: u32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; flip the comparison for min-heap order.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// A* from `start` to `goal`. Returns the cell path in travel order,
/// beginning at `start`'s cell and ending at `goal`'s, or the best partial
/// path toward `start` when the expansion budget runs out or the frontier
/// drains first. The craft occupies `start`, so it is unobstructed up
/// front; a path can always escape the cell the craft is sitting in.
pub fn astar(
    graph: &mut OccupancyGraph,
    start: usize,
    goal: usize,
    iteration_cap: u32,
) -> Vec<usize> {
    graph.unobstruct(start);
    if start == goal {
        return vec![start];
    }

    // Reversed frame: expand from the goal, finish at the start.
    let origin = goal;
    let destination = start;
    let torus = graph.torus();
    let destination_center = graph.center(destination);

    let cells = graph.len();
    let mut closed = vec![false; cells];
    let mut cost_at = vec![f64::INFINITY; cells];
    let mut parent: Vec<Option<u32>> = vec![None; cells];
    let mut open = BinaryHeap::new();

    cost_at[origin] = 0.0;
    open.push(OpenEntry {
        priority: torus.shortest_distance(graph.center(origin), destination_center),
        index: origin as u32,
    });

    let mut expansions = 0u32;
    let mut reached = false;
    while let Some(entry) = open.pop() {
        let current = entry.index as usize;
        if current == destination {
            reached = true;
            break;
        }
        if closed[current] {
            continue;
        }
        if expansions == iteration_cap {
            break;
        }
        expansions += 1;
        closed[current] = true;

        for edge in &graph.node(current).edges {
            let next = edge.to as usize;
            if closed[next] {
                continue;
            }
            let cost = cost_at[current] + edge.cost;
            if cost < cost_at[next] {
                cost_at[next] = cost;
                parent[next] = Some(current as u32);
                open.push(OpenEntry {
                    priority: cost
                        + torus.shortest_distance(graph.center(next), destination_center),
                    index: next as u32,
                });
            }
        }
    }

    let tail = if reached {
        destination
    } else {
        // Timed out or exhausted: reconstruct from the expanded cell that
        // got closest to the craft, which may be the goal itself.
        let mut best = usize::MAX;
        let mut best_distance = f64::INFINITY;
        for (index, &was_closed) in closed.iter().enumerate() {
            if !was_closed {
                continue;
            }
            let distance = torus.shortest_distance(graph.center(index), destination_center);
            if distance < best_distance {
                best_distance = distance;
                best = index;
            }
        }
        if best == usize::MAX {
            return Vec::new();
        }
        best
    };

    reconstruct(&parent, origin, tail, iteration_cap)
}

/// Walk the parent chain from `tail` back to `origin`, emitting cells in
/// travel order. The chain length is bounded by the expansion cap; a break
/// in the chain returns whatever was built.
fn reconstruct(parent: &[Option<u32>], origin: usize, tail: usize, cap: u32) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = tail;
    let mut steps = 0u32;
    loop {
        path.push(current);
        if current == origin {
            break;
        }
        match parent[current] {
            Some(next) if steps < cap => {
                current = next as usize;
                steps += 1;
            }
            _ => break,
        }
    }
    path
}

/// Greedy hill climb toward `goal`: step to the unobstructed neighbor
/// nearest the goal as long as that strictly improves on the best distance
/// seen, stopping at the first plateau. Cannot cross saddles; callers must
/// tolerate a truncated or empty result.
pub fn hill_climb(graph: &mut OccupancyGraph, start: usize, goal: usize) -> Vec<usize> {
    graph.unobstruct(start);
    let torus = graph.torus();
    let goal_center = graph.center(goal);

    let mut path = Vec::new();
    let mut current = start;
    let mut best_seen = f64::INFINITY;
    loop {
        let mut best_distance = f64::INFINITY;
        let mut best_node = None;
        let mut reached = false;
        for edge in &graph.node(current).edges {
            let next = edge.to as usize;
            if next == goal {
                path.push(goal);
                reached = true;
                break;
            }
            if graph.is_obstructed(next) {
                continue;
            }
            let distance = torus.shortest_distance(graph.center(next), goal_center);
            if distance < best_distance {
                best_distance = distance;
                best_node = Some(next);
            }
        }
        if reached {
            break;
        }
        if best_distance >= best_seen {
            break;
        }
        best_seen = best_distance;
        match best_node {
            Some(next) => {
                path.push(next);
                current = next;
            }
            None => break,
        }
    }
    path
}

/// Toroidal arc length of a cell path: the sum of shortest distances
/// between consecutive cell centers.
pub fn path_length(graph: &OccupancyGraph, path: &[usize]) -> f64 {
    let torus = graph.torus();
    path.windows(2)
        .map(|pair| torus.shortest_distance(graph.center(pair[0]), graph.center(pair[1])))
        .sum()
}
