//! Fixed occupancy grid over the toroidal arena.
//!
//! Cells live in a flat arena vector indexed row-major; adjacency is by
//! index, never by reference. Each cell stores the cost of its own outgoing
//! edges. Obstructing a cell scales every edge *entering* it by a large
//! constant, so search is discouraged from arriving there without any
//! per-edge branch, and unobstructing divides the same edges back,
//! recovering the original costs exactly.

use arena_core::geometry::{Point, Torus};

pub const NEIGHBOR_COUNT: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct GridEdge {
    pub to: u32,
    pub cost: f64,
}

#[derive(Clone, Debug)]
pub struct GridNode {
    pub center: Point,
    pub obstructed: bool,
    pub edges: [GridEdge; NEIGHBOR_COUNT],
}

pub struct OccupancyGraph {
    nodes: Vec<GridNode>,
    cols: usize,
    rows: usize,
    cell_size: f64,
    multiplier: f64,
    torus: Torus,
}

impl OccupancyGraph {
    /// Build an unobstructed graph of `cols x rows` cells of side
    /// `cell_size`. Cardinal edges cost `cell_size`, diagonals
    /// `cell_size * sqrt(2)`.
    pub fn new(cols: usize, rows: usize, cell_size: f64, multiplier: f64) -> Self {
        assert!(
            cols >= 3 && rows >= 3,
            "8-neighborhood needs at least 3 cells per axis, got {cols}x{rows}"
        );
        let diagonal = cell_size * std::f64::consts::SQRT_2;
        let placeholder = GridEdge { to: 0, cost: 0.0 };
        let mut nodes = Vec::with_capacity(cols * rows);
        for index in 0..cols * rows {
            let col = index % cols;
            let row = index / cols;
            let center = Point::new(
                (col as f64 + 0.5) * cell_size,
                (row as f64 + 0.5) * cell_size,
            );
            nodes.push(GridNode {
                center,
                obstructed: false,
                edges: [placeholder; NEIGHBOR_COUNT],
            });
        }

        let mut graph = Self {
            nodes,
            cols,
            rows,
            cell_size,
            multiplier,
            torus: Torus::new(cols as f64 * cell_size, rows as f64 * cell_size),
        };
        for index in 0..graph.nodes.len() {
            let adjacent = graph.adjacent_indices(index);
            for (slot, &neighbor) in adjacent.iter().enumerate() {
                let cost = if slot < 4 { cell_size } else { diagonal };
                graph.nodes[index].edges[slot] = GridEdge {
                    to: neighbor as u32,
                    cost,
                };
            }
        }
        graph
    }

    /// The 8 neighbors of `index` in fixed order: right, left, up, down,
    /// up-right, up-left, down-right, down-left, wrapping on both axes.
    /// Diagonals compose the two axis wraps independently.
    pub fn adjacent_indices(&self, index: usize) -> [usize; NEIGHBOR_COUNT] {
        let cols = self.cols;
        let rows = self.rows;
        let col = index % cols;
        let row = index / cols;

        let right = if col < cols - 1 {
            index + 1
        } else {
            index + 1 - cols
        };
        let left = if col > 0 { index - 1 } else { index + cols - 1 };
        let up = if row > 0 {
            index - cols
        } else {
            index + cols * (rows - 1)
        };
        let down = if row < rows - 1 {
            index + cols
        } else {
            index - cols * (rows - 1)
        };

        // The horizontal wrap is already baked into `right`/`left`, which
        // stay on `index`'s row, so the vertical wrap applies on top.
        let up_right = if row > 0 {
            right - cols
        } else {
            right + cols * (rows - 1)
        };
        let up_left = if row > 0 {
            left - cols
        } else {
            left + cols * (rows - 1)
        };
        let down_right = if row < rows - 1 {
            right + cols
        } else {
            right - cols * (rows - 1)
        };
        let down_left = if row < rows - 1 {
            left + cols
        } else {
            left - cols * (rows - 1)
        };

        [right, left, up, down, up_right, up_left, down_right, down_left]
    }

    /// Mark `index` obstructed. Returns false if it already was; otherwise
    /// scales every inbound edge by the obstruction multiplier.
    pub fn obstruct(&mut self, index: usize) -> bool {
        if self.nodes[index].obstructed {
            return false;
        }
        self.nodes[index].obstructed = true;
        self.scale_inbound(index, true);
        true
    }

    /// Clear `index`. Returns false if it was not obstructed; otherwise
    /// divides every inbound edge back to its original cost.
    pub fn unobstruct(&mut self, index: usize) -> bool {
        if !self.nodes[index].obstructed {
            return false;
        }
        self.nodes[index].obstructed = false;
        self.scale_inbound(index, false);
        true
    }

    fn scale_inbound(&mut self, index: usize, raise: bool) {
        let target = index as u32;
        for neighbor in self.adjacent_indices(index) {
            for edge in &mut self.nodes[neighbor].edges {
                if edge.to == target {
                    // Divide rather than multiply by a reciprocal so the
                    // round trip is exact.
                    edge.cost = if raise {
                        edge.cost * self.multiplier
                    } else {
                        edge.cost / self.multiplier
                    };
                }
            }
        }
    }

    /// Cell containing `p`; wraps first so any finite position resolves.
    pub fn cell_index(&self, p: Point) -> usize {
        let p = self.torus.wrap(p);
        let col = ((p.x / self.cell_size) as usize).min(self.cols - 1);
        let row = ((p.y / self.cell_size) as usize).min(self.rows - 1);
        row * self.cols + col
    }

    pub fn center(&self, index: usize) -> Point {
        self.nodes[index].center
    }

    pub fn is_obstructed(&self, index: usize) -> bool {
        self.nodes[index].obstructed
    }

    pub fn node(&self, index: usize) -> &GridNode {
        &self.nodes[index]
    }

    /// Cost of the directed edge `from -> to`, if the cells are adjacent.
    pub fn cost_between(&self, from: usize, to: usize) -> Option<f64> {
        self.nodes[from]
            .edges
            .iter()
            .find(|edge| edge.to == to as u32)
            .map(|edge| edge.cost)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn torus(&self) -> Torus {
        self.torus
    }
}
