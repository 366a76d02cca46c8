#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core maze contracts shared across the Maze Race engine.
//!
//! This crate defines the data surface that connects the maze generator, the
//! movement layer, and the renderer. Generators produce [`Grid`] values made
//! of per-cell [`CellWalls`] bitmasks, movement produces continuous [`Cord`]
//! positions, and the rendering crates consume both without knowing how
//! either was computed. Nothing in here draws or simulates; it is the shared
//! vocabulary the other crates agree on.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Sides of a maze cell, in the order the renderer walks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Edge toward decreasing row indices.
    Top,
    /// Edge toward increasing column indices.
    Right,
    /// Edge toward increasing row indices.
    Down,
    /// Edge toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction, in the stable order used for wall iteration.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The wall bit that records a wall on this side of a cell.
    #[must_use]
    pub const fn wall(self) -> CellWalls {
        match self {
            Direction::Top => CellWalls::TOP,
            Direction::Right => CellWalls::RIGHT,
            Direction::Down => CellWalls::DOWN,
            Direction::Left => CellWalls::LEFT,
        }
    }

    /// The direction pointing the opposite way.
    ///
    /// Opening a passage between two neighbouring cells clears this side's
    /// wall bit on one cell and the opposite side's bit on the other.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }
}

bitflags! {
    /// Wall bitmask for a single maze cell.
    ///
    /// A set bit means the corresponding side is walled: there is no passage
    /// out of the cell in that direction. The empty mask is a fully open
    /// cell; [`CellWalls::all`] is a fully sealed one.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CellWalls: u8 {
        /// Wall along the cell's top edge.
        const TOP = 1 << 0;
        /// Wall along the cell's right edge.
        const RIGHT = 1 << 1;
        /// Wall along the cell's bottom edge.
        const DOWN = 1 << 2;
        /// Wall along the cell's left edge.
        const LEFT = 1 << 3;
    }
}

impl CellWalls {
    /// Reports whether this cell is walled on the given side.
    #[must_use]
    pub fn has_wall(self, direction: Direction) -> bool {
        self.contains(direction.wall())
    }
}

/// Rectangular maze layout addressed as rows of wall bitmasks.
///
/// Row `0` is the top of the maze and column `0` its left edge, matching the
/// renderer's pixel orientation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<CellWalls>>,
}

impl Grid {
    /// Creates a grid from explicit rows of wall masks.
    ///
    /// The rows are taken as-is; use [`Grid::is_valid`] to check the shape
    /// before handing the grid to a renderer.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellWalls>>) -> Self {
        Self { rows }
    }

    /// Creates a square grid in which every cell is sealed on all four sides.
    ///
    /// This is the canonical starting state a carving generator works from.
    #[must_use]
    pub fn fully_walled(size: usize) -> Self {
        Self {
            rows: vec![vec![CellWalls::all(); size]; size],
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the grid, taken from the first row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The grid's rows, outermost first.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellWalls>] {
        &self.rows
    }

    /// Wall mask of the cell at the given position, if it exists.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<CellWalls> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
    }

    /// Structural validity predicate consumed before every render.
    ///
    /// A grid is valid when it is non-empty, every row has the same length,
    /// and the row count equals the column count. Squareness is required
    /// because derived pixel sizing uses the row count alone; a non-square
    /// grid would silently render with a wrong cell size on one axis. The
    /// predicate says nothing about connectivity or the perfect-maze
    /// property.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let rows = self.row_count();
        let columns = self.column_count();
        rows > 0 && columns == rows && self.rows.iter().all(|cells| cells.len() == columns)
    }
}

/// Continuous grid-space position measured in cell units.
///
/// Whole numbers land on cell corners, so `(r, c)` with integer parts names
/// the cell whose top-left corner sits there. Fractional values address
/// sub-cell positions; players move through these continuously. The core
/// enforces no bounds — keeping positions inside the grid is the movement
/// layer's job.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cord {
    row: f32,
    col: f32,
}

impl Cord {
    /// Creates a position from row and column components.
    #[must_use]
    pub const fn new(row: f32, col: f32) -> Self {
        Self { row, col }
    }

    /// Position of a whole cell, i.e. its top-left corner.
    #[must_use]
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row as f32, col as f32)
    }

    /// Row component, possibly fractional.
    #[must_use]
    pub const fn row(&self) -> f32 {
        self.row
    }

    /// Column component, possibly fractional.
    #[must_use]
    pub const fn col(&self) -> f32 {
        self.col
    }
}

/// Position every player spawns at: the center of the top-left cell.
pub const START_POS: Cord = Cord::new(0.5, 0.5);
