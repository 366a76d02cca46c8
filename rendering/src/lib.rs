#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Backend-agnostic maze rendering engine for Maze Race.
//!
//! This crate turns an abstract [`Grid`](maze_race_core::Grid) and a set of
//! continuous positions into draw calls against the [`DrawSurface`] seam, and
//! paces those frames for animated playback. Backends supply the surface (a
//! window, an offscreen buffer, a recording); this crate decides what gets
//! drawn where. It never generates mazes, moves players, or touches input —
//! those collaborators hand it finished grids and positions.

mod animate;
mod geometry;
mod recording;
mod renderer;

pub use animate::{Animator, FramePacer, ThreadPacer, DEFAULT_FRAME_DELAY};
pub use geometry::{GridGeometry, GRID_PADDING, PLAYER_RADIUS_RATIO};
pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::MazeRenderer;

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_race_core::{Cord, Grid};
use std::time::Duration;

/// RGBA color used for every draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Fill color of the start marker at the top-left cell.
pub const START_COLOR: Color = Color::from_rgb_u8(0xDC, 0x26, 0x26);
/// Fill color of the finish marker at the bottom-right cell.
pub const END_COLOR: Color = Color::from_rgb_u8(0x10, 0xB9, 0x81);
/// Stroke color shared by the outer boundary, cell walls and avatar outlines.
pub const BORDER_COLOR: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);
/// Fill color of the step indicator drawn during animated playback.
pub const INDICATOR_COLOR: Color = Color::from_rgb_u8(0xFF, 0x00, 0x00);
/// Avatar fill used when a player brings no color of their own.
pub const DEFAULT_PLAYER_COLOR: Color = Color::from_rgb_u8(0xFB, 0xBF, 0x24);

/// Stroke width of individual cell wall segments.
pub const WALL_STROKE_WIDTH: f32 = 1.0;
/// Stroke width of the outer boundary rectangle, distinct from cell walls.
pub const BOUNDARY_STROKE_WIDTH: f32 = 2.0;
/// Stroke width of the outline around player avatars.
pub const PLAYER_STROKE_WIDTH: f32 = 2.0;

/// Pixel dimensions reported by a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width of the drawable area in pixels.
    pub width: f32,
    /// Height of the drawable area in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport descriptor from explicit dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Drawing capability required by the maze renderer.
///
/// One surface is exclusively owned by one [`MazeRenderer`] instance; the
/// trait makes no thread-safety promises, so concurrent draw calls against
/// the same surface must be prevented by the caller.
pub trait DrawSurface {
    /// Current pixel dimensions, or `None` once the surface is gone.
    ///
    /// The renderer caches the result; it is re-queried only on
    /// [`MazeRenderer::refresh`], which the host must invoke whenever the
    /// underlying surface is resized or replaced.
    fn viewport(&self) -> Option<Viewport>;

    /// Erases the axis-aligned region with the given origin and size.
    fn clear(&mut self, origin: Vec2, size: Vec2);

    /// Strokes a straight line segment between two pixel positions.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Strokes the outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, width: f32, color: Color);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Fills a circle centered at the given pixel position.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Strokes the outline of a circle centered at the given pixel position.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
}

/// Errors surfaced by the rendering engine.
///
/// Both kinds mark precondition violations by the integrating code, not
/// transient conditions; they are propagated, never retried or suppressed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The drawing surface or its drawing capability could not be obtained.
    #[error("drawing surface is unavailable")]
    SurfaceUnavailable,
    /// A grid failed the structural validity check before drawing began.
    #[error("maze grid failed structural validation")]
    InvalidGrid,
}

/// Player avatar presented within the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Continuous grid-space position of the avatar.
    pub position: Cord,
    /// Fill color of the avatar.
    pub color: Color,
}

impl PlayerPresentation {
    /// Creates a new player descriptor.
    #[must_use]
    pub const fn new(position: Cord, color: Color) -> Self {
        Self { position, color }
    }
}

/// Scene description combining the maze and everything drawn on top of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze layout that composes the play area.
    pub grid: Grid,
    /// Player avatars currently visible within the maze.
    pub players: Vec<PlayerPresentation>,
    /// Step indicator shown during animated playback, if any.
    pub indicator: Option<Cord>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(grid: Grid, players: Vec<PlayerPresentation>, indicator: Option<Cord>) -> Self {
        Self {
            grid,
            players,
            indicator,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Race scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and may
    /// mutate the scene before it is rendered; the external movement and
    /// state-synchronisation collaborators live behind it.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_race_core::Grid;

    #[test]
    fn from_rgb_u8_normalises_channels() {
        let color = Color::from_rgb_u8(255, 0, 51);

        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert_eq!(color.blue, 0.2);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn start_and_finish_markers_use_distinct_colors() {
        assert_ne!(START_COLOR, END_COLOR);
        assert_ne!(START_COLOR, INDICATOR_COLOR);
    }

    #[test]
    fn boundary_stroke_is_distinct_from_wall_stroke() {
        assert_ne!(BOUNDARY_STROKE_WIDTH, WALL_STROKE_WIDTH);
    }

    #[test]
    fn scene_new_preserves_all_channels() {
        let grid = Grid::fully_walled(3);
        let players = vec![PlayerPresentation::new(
            Cord::new(0.5, 0.5),
            DEFAULT_PLAYER_COLOR,
        )];

        let scene = Scene::new(grid.clone(), players.clone(), Some(Cord::cell(1, 1)));

        assert_eq!(scene.grid, grid);
        assert_eq!(scene.players, players);
        assert_eq!(scene.indicator, Some(Cord::cell(1, 1)));
    }
}
