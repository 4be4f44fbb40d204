//! Occupancy grids and map/world coordinate conversion

use crate::foundation::math::Point2;
use thiserror::Error;

/// Grid cell as (row, column)
pub type Cell = (usize, usize);

/// Errors building an occupancy grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// Cell data does not fill a square grid
    #[error("Expected {expected} cells for a square grid, got {actual}")]
    SizeMismatch {
        /// Cells a `size × size` grid needs
        expected: usize,
        /// Cells provided
        actual: usize,
    },

    /// Grid has no cells at all
    #[error("Occupancy grid is empty")]
    Empty,

    /// A textual map row has the wrong width
    #[error("Row {row} has {width} cells, expected {expected}")]
    RaggedRow {
        /// Offending row
        row: usize,
        /// Its width
        width: usize,
        /// Width of a square map
        expected: usize,
    },

    /// Unrecognized character in a textual map
    #[error("Unknown map character {0:?}")]
    UnknownCell(char),
}

/// Square traversability map, row-major, `true` means free
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create a grid from row-major cell data
    pub fn new(size: usize, cells: Vec<bool>) -> Result<Self, MapError> {
        if size == 0 {
            return Err(MapError::Empty);
        }
        if cells.len() != size * size {
            return Err(MapError::SizeMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Fully traversable grid
    pub fn free(size: usize) -> Result<Self, MapError> {
        Self::new(size, vec![true; size * size])
    }

    /// Parse a textual map: `.` is free, `#` is blocked, one string per row
    ///
    /// Row 0 is the first string.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != size {
                return Err(MapError::RaggedRow { row: i, width, expected: size });
            }
            for c in row.chars() {
                match c {
                    '.' => cells.push(true),
                    '#' => cells.push(false),
                    other => return Err(MapError::UnknownCell(other)),
                }
            }
        }
        Self::new(size, cells)
    }

    /// Side length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell is free; cells outside the grid are blocked
    pub fn is_free(&self, (row, col): Cell) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col]
    }

    /// Set a cell; out-of-range cells are ignored
    pub fn set(&mut self, (row, col): Cell, free: bool) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = free;
        }
    }

    /// All free cells in row-major order
    pub fn free_cells(&self) -> Vec<Cell> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .filter(|&cell| self.is_free(cell))
            .collect()
    }

    /// Number of free cells
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|free| **free).count()
    }

    /// Morphological erosion of the free space with a `kernel × kernel` square
    ///
    /// A cell stays free only if every cell under the kernel is free. The
    /// kernel is anchored at its centre (`kernel / 2`); space outside the
    /// grid counts as blocked.
    #[must_use]
    pub fn eroded(&self, kernel: usize) -> Self {
        if kernel <= 1 {
            return self.clone();
        }
        let before = kernel / 2;
        let after = kernel - 1 - before;

        let mut cells = vec![false; self.cells.len()];
        for row in 0..self.size {
            for col in 0..self.size {
                if row < before || col < before {
                    continue;
                }
                let window_free = (row - before..=row + after).all(|r| {
                    (col - before..=col + after).all(|c| self.is_free((r, c)))
                });
                cells[row * self.size + col] = window_free;
            }
        }
        Self { size: self.size, cells }
    }
}

/// Placement of a grid in the world
///
/// The grid centre sits on the world origin. Rows follow world `y`,
/// columns follow world `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    /// Meters per cell
    pub resolution: f32,
    /// Side length in cells
    pub size: usize,
}

impl MapFrame {
    /// Create a frame
    pub const fn new(resolution: f32, size: usize) -> Self {
        Self { resolution, size }
    }

    fn half_size(&self) -> f32 {
        self.size as f32 / 2.0
    }

    /// Fractional (row, column) of a world point
    pub fn world_to_map_f(&self, point: Point2) -> (f32, f32) {
        (
            point.y / self.resolution + self.half_size(),
            point.x / self.resolution + self.half_size(),
        )
    }

    /// Nearest (row, column) of a world point; may fall outside the grid
    pub fn world_to_map(&self, point: Point2) -> (i64, i64) {
        let (row, col) = self.world_to_map_f(point);
        (row.round() as i64, col.round() as i64)
    }

    /// World position of a cell
    pub fn map_to_world(&self, (row, col): Cell) -> Point2 {
        Point2::new(
            (col as f32 - self.half_size()) * self.resolution,
            (row as f32 - self.half_size()) * self.resolution,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_rows() {
        let grid = OccupancyGrid::from_rows(&["..#", "...", "#.."]).unwrap();
        assert_eq!(grid.size(), 3);
        assert!(!grid.is_free((0, 2)));
        assert!(grid.is_free((1, 1)));
        assert!(!grid.is_free((3, 0)));
        assert_eq!(grid.free_count(), 7);
    }

    #[test]
    fn test_invalid_grids() {
        assert_eq!(OccupancyGrid::new(0, vec![]), Err(MapError::Empty));
        assert_eq!(
            OccupancyGrid::new(2, vec![true; 3]),
            Err(MapError::SizeMismatch { expected: 4, actual: 3 })
        );
        assert_eq!(
            OccupancyGrid::from_rows(&["..", "."]),
            Err(MapError::RaggedRow { row: 1, width: 1, expected: 2 })
        );
        assert_eq!(OccupancyGrid::from_rows(&[]), Err(MapError::Empty));
        assert_eq!(OccupancyGrid::from_rows(&["x"]), Err(MapError::UnknownCell('x')));
    }

    #[test]
    fn test_erosion_shrinks_free_space() {
        let grid = OccupancyGrid::from_rows(&[
            ".....",
            ".....",
            "..#..",
            ".....",
            ".....",
        ])
        .unwrap();

        let eroded = grid.eroded(3);

        // Border cells touch the outside, centre ring touches the obstacle
        assert!(!eroded.is_free((0, 0)));
        assert!(!eroded.is_free((1, 1)));
        assert!(!eroded.is_free((2, 2)));
        assert_eq!(eroded.free_count(), 0);

        let unchanged = grid.eroded(1);
        assert_eq!(unchanged, grid);
    }

    #[test]
    fn test_erosion_keeps_open_interior() {
        let grid = OccupancyGrid::free(5).unwrap();
        let eroded = grid.eroded(3);

        assert_eq!(eroded.free_count(), 9);
        assert!(eroded.is_free((1, 1)));
        assert!(!eroded.is_free((0, 2)));
    }

    #[test]
    fn test_frame_conversion() {
        let frame = MapFrame::new(0.1, 100);

        let cell = frame.world_to_map(Point2::new(1.0, -2.0));
        assert_eq!(cell, (30, 60));

        let world = frame.map_to_world((30, 60));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(world.y, -2.0, epsilon = 1e-5);

        let origin = frame.map_to_world((50, 50));
        assert_relative_eq!(origin.x, 0.0);
        assert_relative_eq!(origin.y, 0.0);
    }
}
