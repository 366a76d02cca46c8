//! The maze renderer: owned surface handle, derived geometry, draw passes.

use crate::{
    Color, DrawSurface, GridGeometry, RenderError, Scene, Viewport, BORDER_COLOR,
    BOUNDARY_STROKE_WIDTH, DEFAULT_PLAYER_COLOR, END_COLOR, GRID_PADDING, INDICATOR_COLOR,
    PLAYER_STROKE_WIDTH, START_COLOR, WALL_STROKE_WIDTH,
};
use glam::Vec2;
use maze_race_core::{CellWalls, Cord, Direction, Grid};

/// Renders maze grids, markers and avatars onto an exclusively owned surface.
///
/// The renderer caches the surface's viewport and the geometry derived from
/// the last full-grid draw. The host must call [`MazeRenderer::refresh`]
/// whenever the underlying surface is resized or replaced; until then draw
/// calls keep using the cached dimensions, which yields misplaced geometry
/// rather than a crash.
#[derive(Debug)]
pub struct MazeRenderer<S> {
    surface: S,
    viewport: Viewport,
    geometry: GridGeometry,
    padding: f32,
}

impl<S: DrawSurface> MazeRenderer<S> {
    /// Takes ownership of a surface and caches its current viewport.
    ///
    /// Fails with [`RenderError::SurfaceUnavailable`] when the surface
    /// reports no drawable area.
    pub fn attach(surface: S) -> Result<Self, RenderError> {
        Self::with_padding(surface, GRID_PADDING)
    }

    /// Like [`MazeRenderer::attach`] with an explicit padding in pixels.
    pub fn with_padding(surface: S, padding: f32) -> Result<Self, RenderError> {
        let viewport = surface.viewport().ok_or(RenderError::SurfaceUnavailable)?;

        Ok(Self {
            surface,
            viewport,
            geometry: GridGeometry::default(),
            padding,
        })
    }

    /// Re-queries the surface dimensions after a resize or replacement.
    pub fn refresh(&mut self) -> Result<(), RenderError> {
        self.viewport = self
            .surface
            .viewport()
            .ok_or(RenderError::SurfaceUnavailable)?;
        Ok(())
    }

    /// Erases the entire cached viewport.
    pub fn clear(&mut self) {
        let viewport = self.viewport;
        self.surface
            .clear(Vec2::ZERO, Vec2::new(viewport.width, viewport.height));
    }

    /// Redraws the full maze: clear, outer boundary, then every cell wall in
    /// row-major order.
    ///
    /// Geometry is recomputed from the cached viewport before anything is
    /// drawn. Fails with [`RenderError::InvalidGrid`] — before any drawing
    /// side effect — when the grid is structurally invalid.
    pub fn draw_grid(&mut self, grid: &Grid) -> Result<(), RenderError> {
        if !grid.is_valid() {
            return Err(RenderError::InvalidGrid);
        }

        self.geometry = GridGeometry::from_viewport(self.viewport, grid.row_count(), self.padding);
        self.clear();
        self.draw_boundary();
        for (row, cells) in grid.rows().iter().enumerate() {
            for (column, &cell) in cells.iter().enumerate() {
                self.draw_cell(cell, row, column);
            }
        }

        Ok(())
    }

    /// Draws the step indicator square at the given position.
    ///
    /// Uses the geometry cached by the last full-grid draw.
    pub fn draw_indicator(&mut self, cord: Cord) {
        self.fill_cell_square(cord, INDICATOR_COLOR);
    }

    /// Draws the start marker at the top-left cell and the finish marker at
    /// the bottom-right cell.
    pub fn draw_start_finish(&mut self, grid: &Grid) -> Result<(), RenderError> {
        if !grid.is_valid() {
            return Err(RenderError::InvalidGrid);
        }

        self.fill_cell_square(Cord::cell(0, 0), START_COLOR);
        self.fill_cell_square(
            Cord::cell(grid.row_count() - 1, grid.column_count() - 1),
            END_COLOR,
        );

        Ok(())
    }

    /// Draws a filled, outlined player avatar at a continuous position.
    ///
    /// The avatar radius comes from the geometry cached by the last
    /// full-grid draw; `None` selects the default avatar color.
    pub fn draw_player(&mut self, cord: Cord, color: Option<Color>) {
        let geometry = self.geometry;
        let center = geometry.to_pixel(cord);
        let radius = geometry.player_radius();

        self.surface
            .fill_circle(center, radius, color.unwrap_or(DEFAULT_PLAYER_COLOR));
        self.surface
            .stroke_circle(center, radius, PLAYER_STROKE_WIDTH, BORDER_COLOR);
    }

    /// Renders one complete live-play frame: maze, start/finish markers,
    /// player avatars, then the step indicator if the scene carries one.
    pub fn render_scene(&mut self, scene: &Scene) -> Result<(), RenderError> {
        self.draw_grid(&scene.grid)?;
        self.draw_start_finish(&scene.grid)?;
        for player in &scene.players {
            self.draw_player(player.position, Some(player.color));
        }
        if let Some(indicator) = scene.indicator {
            self.draw_indicator(indicator);
        }

        Ok(())
    }

    /// Geometry derived by the most recent full-grid draw.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Surface dimensions captured at attach or the last refresh.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Read access to the owned surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Releases the owned surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn draw_boundary(&mut self) {
        let geometry = self.geometry;
        if geometry.grid_size() <= 0.0 {
            return;
        }

        self.surface.stroke_rect(
            Vec2::new(geometry.pad_x(), geometry.pad_y()),
            Vec2::splat(geometry.grid_size()),
            BOUNDARY_STROKE_WIDTH,
            BORDER_COLOR,
        );
    }

    fn draw_cell(&mut self, cell: CellWalls, row: usize, column: usize) {
        for direction in Direction::ALL {
            if cell.has_wall(direction) {
                self.draw_wall(row, column, direction);
            }
        }
    }

    /// Strokes the single edge of the unit cell at `(row, column)` that
    /// corresponds to `direction`.
    fn draw_wall(&mut self, row: usize, column: usize, direction: Direction) {
        let r = row as f32;
        let c = column as f32;
        let (from, to) = match direction {
            Direction::Top => (Cord::new(r, c), Cord::new(r, c + 1.0)),
            Direction::Right => (Cord::new(r + 1.0, c + 1.0), Cord::new(r, c + 1.0)),
            Direction::Down => (Cord::new(r + 1.0, c + 1.0), Cord::new(r + 1.0, c)),
            Direction::Left => (Cord::new(r, c), Cord::new(r + 1.0, c)),
        };

        let geometry = self.geometry;
        self.surface.stroke_line(
            geometry.to_pixel(from),
            geometry.to_pixel(to),
            WALL_STROKE_WIDTH,
            BORDER_COLOR,
        );
    }

    /// Fills the unit cell at `cord` inset by exactly one pixel per side, so
    /// markers never overlap the wall strokes around them.
    fn fill_cell_square(&mut self, cord: Cord, color: Color) {
        let geometry = self.geometry;
        let top_left = geometry.to_pixel(cord) + Vec2::splat(1.0);
        let bottom_right =
            geometry.to_pixel(Cord::new(cord.row() + 1.0, cord.col() + 1.0)) - Vec2::splat(1.0);

        self.surface
            .fill_rect(top_left, bottom_right - top_left, color);
    }
}
