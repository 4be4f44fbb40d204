//! Navigation graph over free grid cells

use super::grid::{Cell, OccupancyGrid};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// 8-neighbourhood offsets as (row, column) deltas
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Graph over the largest connected free region of a grid
///
/// Nodes are cells, edges join 8-neighbours and are weighted by the
/// Euclidean distance between cell centres (in cells).
#[derive(Debug, Clone)]
pub struct NavGraph {
    nodes: Vec<Cell>,
    index: HashMap<Cell, usize>,
    edges: Vec<Vec<(usize, f32)>>,
}

impl NavGraph {
    /// Build the graph of the largest 8-connected free region
    ///
    /// Returns an empty graph when the grid has no free cells.
    pub fn build(grid: &OccupancyGrid) -> Self {
        let nodes = largest_region(grid);
        let index: HashMap<Cell, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, cell)| (*cell, i))
            .collect();

        let edges = nodes
            .iter()
            .map(|&cell| {
                neighbours(cell)
                    .filter_map(|n| index.get(&n).map(|&j| (j, cell_distance(cell, n))))
                    .collect()
            })
            .collect();

        log::debug!("Built navigation graph with {} nodes", nodes.len());
        Self { nodes, index, edges }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node cells
    pub fn cells(&self) -> &[Cell] {
        &self.nodes
    }

    /// Whether the cell is a node
    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    /// Copy of `grid` with every cell outside the graph blocked
    pub fn restrict(&self, grid: &OccupancyGrid) -> OccupancyGrid {
        let mut restricted = grid.clone();
        for cell in grid.free_cells() {
            if !self.contains(cell) {
                restricted.set(cell, false);
            }
        }
        restricted
    }

    /// Node closest to a fractional (row, column) position
    pub fn nearest_node(&self, (row, col): (f32, f32)) -> Option<Cell> {
        if let Some(&i) = rounded_cell(row, col).and_then(|cell| self.index.get(&cell)) {
            return Some(self.nodes[i]);
        }
        self.nodes
            .iter()
            .min_by_key(|(r, c)| {
                let dr = *r as f32 - row;
                let dc = *c as f32 - col;
                OrderedFloat(dr * dr + dc * dc)
            })
            .copied()
    }

    /// A* search between two node cells
    ///
    /// Returns the cells from `start` to `goal` inclusive, or `None` when
    /// either cell is not a node or the goal is unreachable.
    pub fn astar(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        let start = *self.index.get(&start)?;
        let goal_index = *self.index.get(&goal)?;
        let heuristic = |i: usize| cell_distance(self.nodes[i], goal);

        let mut best = vec![f32::INFINITY; self.nodes.len()];
        let mut came_from = vec![None; self.nodes.len()];
        let mut closed = vec![false; self.nodes.len()];
        let mut open = BinaryHeap::new();

        best[start] = 0.0;
        open.push(Reverse((OrderedFloat(heuristic(start)), start)));

        while let Some(Reverse((_, current))) = open.pop() {
            if current == goal_index {
                return Some(self.reconstruct(&came_from, current));
            }
            if closed[current] {
                continue;
            }
            closed[current] = true;

            for &(next, weight) in &self.edges[current] {
                let tentative = best[current] + weight;
                if tentative < best[next] {
                    best[next] = tentative;
                    came_from[next] = Some(current);
                    open.push(Reverse((OrderedFloat(tentative + heuristic(next)), next)));
                }
            }
        }
        None
    }

    fn reconstruct(&self, came_from: &[Option<usize>], mut current: usize) -> Vec<Cell> {
        let mut path = vec![self.nodes[current]];
        while let Some(previous) = came_from[current] {
            path.push(self.nodes[previous]);
            current = previous;
        }
        path.reverse();
        path
    }
}

fn rounded_cell(row: f32, col: f32) -> Option<Cell> {
    let (row, col) = (row.round(), col.round());
    (row >= 0.0 && col >= 0.0).then_some((row as usize, col as usize))
}

fn cell_distance(a: Cell, b: Cell) -> f32 {
    let dr = a.0 as f32 - b.0 as f32;
    let dc = a.1 as f32 - b.1 as f32;
    dr.hypot(dc)
}

fn neighbours((row, col): Cell) -> impl Iterator<Item = Cell> {
    NEIGHBOURS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        Some((r, c))
    })
}

/// Cells of the largest 8-connected free region, row-major within the region
fn largest_region(grid: &OccupancyGrid) -> Vec<Cell> {
    let mut visited = vec![false; grid.size() * grid.size()];
    let mut largest: Vec<Cell> = Vec::new();

    for start in grid.free_cells() {
        if visited[start.0 * grid.size() + start.1] {
            continue;
        }
        visited[start.0 * grid.size() + start.1] = true;

        let mut region = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for next in neighbours(cell) {
                if grid.is_free(next) && !visited[next.0 * grid.size() + next.1] {
                    visited[next.0 * grid.size() + next.1] = true;
                    region.push(next);
                    queue.push_back(next);
                }
            }
        }

        if region.len() > largest.len() {
            largest = region;
        }
    }

    largest.sort_unstable();
    largest
}
