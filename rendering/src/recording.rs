//! Headless drawing surface that captures draw calls for inspection.

use crate::{Color, DrawSurface, Viewport};
use glam::Vec2;

/// Single draw call captured by a [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// An axis-aligned region was erased.
    Clear {
        /// Top-left corner of the erased region.
        origin: Vec2,
        /// Width and height of the erased region.
        size: Vec2,
    },
    /// A straight line segment was stroked.
    StrokeLine {
        /// Start of the segment in pixels.
        from: Vec2,
        /// End of the segment in pixels.
        to: Vec2,
        /// Stroke width in pixels.
        width: f32,
        /// Stroke color.
        color: Color,
    },
    /// The outline of an axis-aligned rectangle was stroked.
    StrokeRect {
        /// Top-left corner of the rectangle.
        origin: Vec2,
        /// Width and height of the rectangle.
        size: Vec2,
        /// Stroke width in pixels.
        width: f32,
        /// Stroke color.
        color: Color,
    },
    /// An axis-aligned rectangle was filled.
    FillRect {
        /// Top-left corner of the rectangle.
        origin: Vec2,
        /// Width and height of the rectangle.
        size: Vec2,
        /// Fill color.
        color: Color,
    },
    /// A circle was filled.
    FillCircle {
        /// Center of the circle in pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// The outline of a circle was stroked.
    StrokeCircle {
        /// Center of the circle in pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Stroke width in pixels.
        width: f32,
        /// Stroke color.
        color: Color,
    },
}

/// Surface that records every draw call instead of rasterising it.
///
/// Backs the engine's geometry and ordering tests, and doubles as a headless
/// diagnostic target: attach it to a [`MazeRenderer`](crate::MazeRenderer),
/// render, and inspect the captured command list.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    viewport: Option<Viewport>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates a surface reporting the given pixel dimensions.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Some(Viewport::new(width, height)),
            commands: Vec::new(),
        }
    }

    /// Creates a surface that reports no drawable area.
    ///
    /// Attaching a renderer to it fails with `SurfaceUnavailable`; useful for
    /// exercising the failure path.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Changes the dimensions reported by subsequent viewport queries.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Some(Viewport::new(width, height));
    }

    /// Every draw call captured so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops the captured draw calls, keeping the viewport.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn clear(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Clear { origin, size });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            origin,
            size,
            width,
            color,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_surface_reports_no_viewport() {
        assert_eq!(RecordingSurface::detached().viewport(), None);
        assert_eq!(
            RecordingSurface::new(64.0, 48.0).viewport(),
            Some(Viewport::new(64.0, 48.0))
        );
    }

    #[test]
    fn commands_are_captured_in_call_order() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.clear(Vec2::ZERO, Vec2::splat(100.0));
        surface.stroke_line(Vec2::ZERO, Vec2::splat(10.0), 1.0, Color::new(0.0, 0.0, 0.0, 1.0));

        assert_eq!(surface.commands().len(), 2);
        assert!(matches!(surface.commands()[0], DrawCommand::Clear { .. }));
        assert!(matches!(
            surface.commands()[1],
            DrawCommand::StrokeLine { .. }
        ));

        surface.reset();
        assert!(surface.commands().is_empty());
    }
}
