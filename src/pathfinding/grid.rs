//! Dense occupancy grid
//!
//! Cells are implicit nodes identified by integer `(row, col)` coordinates;
//! walkability lives in a row-major boolean array. No per-cell objects are
//! materialized outside a search.

use serde::{Deserialize, Serialize};

/// Integer cell coordinates. Ordered row-major so tied search candidates
/// resolve deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

impl GridCell {
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The 4 cardinal neighbors (up, right, down, left)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCell; 4] {
        [
            GridCell::new(self.row - 1, self.col),
            GridCell::new(self.row, self.col + 1),
            GridCell::new(self.row + 1, self.col),
            GridCell::new(self.row, self.col - 1),
        ]
    }
}

/// Rectangular walkability grid, `true` = open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create a fully open grid
    pub fn open(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![true; width * height],
        }
    }

    /// Build from an occupancy matrix where `1` marks a wall and `0` open
    /// floor. Width is taken from the first row; cells missing from a
    /// short row are treated as walls.
    pub fn from_occupancy(rows: &[Vec<u8>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = vec![false; width * height];
        for (r, row) in rows.iter().enumerate() {
            for c in 0..width {
                cells[r * width + c] = row.get(c).is_some_and(|&value| value == 0);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether a cell lies inside the grid bounds
    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// Whether a cell is inside the grid and open. Out-of-bounds cells are
    /// not walkable.
    #[inline]
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.in_bounds(cell) && self.cells[cell.row as usize * self.width + cell.col as usize]
    }

    /// Mark a cell as a wall; out-of-bounds coordinates are ignored
    pub fn set_wall(&mut self, cell: GridCell) {
        if self.in_bounds(cell) {
            self.cells[cell.row as usize * self.width + cell.col as usize] = false;
        }
    }
}
