//! Drawing target abstraction.

use crate::math::{Color, Vector2};

/// The handful of 2D primitives the backdrop draws with.
///
/// Every call carries its own color and alpha; implementations must not rely
/// on state left behind by an earlier call.
pub trait DrawSurface {
    /// Set the pixel dimensions of the drawing buffer.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vector2, size: Vector2, color: Color, alpha: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color, alpha: f32);

    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Vector2], color: Color, alpha: f32);

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color, alpha: f32);
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// See [`DrawSurface::resize`].
    Resize {
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },
    /// See [`DrawSurface::fill_rect`].
    Rect {
        /// Top-left corner.
        origin: Vector2,
        /// Width and height.
        size: Vector2,
        /// Fill color.
        color: Color,
        /// Fill alpha.
        alpha: f32,
    },
    /// See [`DrawSurface::fill_circle`].
    Circle {
        /// Center.
        center: Vector2,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
        /// Fill alpha.
        alpha: f32,
    },
    /// See [`DrawSurface::fill_polygon`].
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Vector2>,
        /// Fill color.
        color: Color,
        /// Fill alpha.
        alpha: f32,
    },
    /// See [`DrawSurface::stroke_line`].
    Line {
        /// Start point.
        from: Vector2,
        /// End point.
        to: Vector2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
        /// Stroke alpha.
        alpha: f32,
    },
}

/// Headless surface that records every primitive, for tests and native tooling.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn so far.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded connection lines.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn fill_rect(&mut self, origin: Vector2, size: Vector2, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_polygon(&mut self, points: &[Vector2], color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }
}
