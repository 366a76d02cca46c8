//! Derived pixel sizing and the grid-space to pixel-space transform.

use crate::Viewport;
use glam::Vec2;
use maze_race_core::Cord;

/// Padding in pixels kept between the surface edge and the maze boundary.
pub const GRID_PADDING: f32 = 5.0;

/// Avatar radius as a fraction of the cell size.
pub const PLAYER_RADIUS_RATIO: f32 = 0.1;

/// Pixel sizing derived from the surface dimensions and the grid shape.
///
/// Recomputed at the start of every full-grid draw, since the surface may
/// have resized since the previous frame; stale in between, which is safe
/// because the next full draw recomputes it before reading it. The
/// computation is total: degenerate surfaces produce a non-positive
/// `grid_size` and flow through without error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridGeometry {
    grid_size: f32,
    cell_size: f32,
    player_radius: f32,
    pad_x: f32,
    pad_y: f32,
}

impl GridGeometry {
    /// Derives pixel sizing for a grid with `rows` rows on the given surface.
    ///
    /// The maze occupies a centered square of side `min(W, H) - 2 * padding`;
    /// the row count alone determines the cell size, which is why only
    /// square grids pass the structural validity check. A zero row count
    /// yields a zero cell size.
    #[must_use]
    pub fn from_viewport(viewport: Viewport, rows: usize, padding: f32) -> Self {
        let grid_size = viewport.width.min(viewport.height) - 2.0 * padding;
        let cell_size = if rows == 0 {
            0.0
        } else {
            grid_size / rows as f32
        };

        Self {
            grid_size,
            cell_size,
            player_radius: cell_size * PLAYER_RADIUS_RATIO,
            pad_x: (viewport.width - grid_size) / 2.0,
            pad_y: (viewport.height - grid_size) / 2.0,
        }
    }

    /// Side length of the centered square the maze is drawn into.
    #[must_use]
    pub const fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// Side length of a single cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Radius of a player avatar in pixels.
    #[must_use]
    pub const fn player_radius(&self) -> f32 {
        self.player_radius
    }

    /// Horizontal offset centering the maze on the surface.
    #[must_use]
    pub const fn pad_x(&self) -> f32 {
        self.pad_x
    }

    /// Vertical offset centering the maze on the surface.
    #[must_use]
    pub const fn pad_y(&self) -> f32 {
        self.pad_y
    }

    /// Vertical pixel position of a grid-space row, fractional rows included.
    #[must_use]
    pub fn pixel_row(&self, row: f32) -> f32 {
        self.pad_y + row * self.cell_size
    }

    /// Horizontal pixel position of a grid-space column, fractional columns
    /// included.
    #[must_use]
    pub fn pixel_col(&self, col: f32) -> f32 {
        self.pad_x + col * self.cell_size
    }

    /// Pixel position of a grid-space cord.
    ///
    /// Every draw call routes through this transform so walls, boundary and
    /// markers stay pixel-aligned with each other.
    #[must_use]
    pub fn to_pixel(&self, cord: Cord) -> Vec2 {
        Vec2::new(self.pixel_col(cord.col()), self.pixel_row(cord.row()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_follows_the_smaller_surface_dimension() {
        let geometry = GridGeometry::from_viewport(Viewport::new(210.0, 210.0), 5, 5.0);

        assert_eq!(geometry.grid_size(), 200.0);
        assert_eq!(geometry.cell_size(), 40.0);
        assert_eq!(geometry.pad_x(), 5.0);
        assert_eq!(geometry.pad_y(), 5.0);
    }

    #[test]
    fn wide_surface_centers_the_maze_horizontally() {
        let geometry = GridGeometry::from_viewport(Viewport::new(300.0, 210.0), 10, 5.0);

        assert_eq!(geometry.grid_size(), 200.0);
        assert_eq!(geometry.cell_size(), 20.0);
        assert_eq!(geometry.pad_x(), 50.0);
        assert_eq!(geometry.pad_y(), 5.0);
    }

    #[test]
    fn tall_surface_centers_the_maze_vertically() {
        let geometry = GridGeometry::from_viewport(Viewport::new(210.0, 400.0), 4, 5.0);

        assert_eq!(geometry.grid_size(), 200.0);
        assert_eq!(geometry.cell_size(), 50.0);
        assert_eq!(geometry.pad_x(), 5.0);
        assert_eq!(geometry.pad_y(), 100.0);
    }

    #[test]
    fn player_radius_is_a_tenth_of_the_cell_size() {
        let geometry = GridGeometry::from_viewport(Viewport::new(210.0, 210.0), 5, 5.0);

        assert_eq!(geometry.player_radius(), 4.0);
    }

    #[test]
    fn transform_is_anchored_at_the_padding_offsets() {
        let geometry = GridGeometry::from_viewport(Viewport::new(300.0, 210.0), 10, 5.0);

        assert_eq!(geometry.pixel_row(0.0), geometry.pad_y());
        assert_eq!(geometry.pixel_col(0.0), geometry.pad_x());
    }

    #[test]
    fn transform_is_strictly_increasing_for_positive_cell_sizes() {
        let geometry = GridGeometry::from_viewport(Viewport::new(210.0, 210.0), 5, 5.0);

        let samples = [0.0, 0.25, 1.0, 1.5, 3.0, 4.99];
        for window in samples.windows(2) {
            assert!(geometry.pixel_row(window[0]) < geometry.pixel_row(window[1]));
            assert!(geometry.pixel_col(window[0]) < geometry.pixel_col(window[1]));
        }
    }

    #[test]
    fn transform_accepts_fractional_positions() {
        let geometry = GridGeometry::from_viewport(Viewport::new(210.0, 210.0), 5, 5.0);

        let pixel = geometry.to_pixel(Cord::new(0.5, 2.25));

        assert_eq!(pixel.y, 25.0);
        assert_eq!(pixel.x, 95.0);
    }

    #[test]
    fn tiny_surface_produces_a_degenerate_grid_size_without_panicking() {
        let geometry = GridGeometry::from_viewport(Viewport::new(8.0, 8.0), 5, 5.0);

        assert!(geometry.grid_size() < 0.0);
        assert!(geometry.cell_size() < 0.0);
    }

    #[test]
    fn zero_rows_yield_a_zero_cell_size() {
        let geometry = GridGeometry::from_viewport(Viewport::new(210.0, 210.0), 0, 5.0);

        assert_eq!(geometry.cell_size(), 0.0);
        assert_eq!(geometry.player_radius(), 0.0);
    }
}
