//! Rendering module
//!
//! The simulation never draws. A `Renderer` turns a read-only `FrameView` into
//! calls on a `DrawSurface`, which is whatever 2D backend the host provides.

pub mod recording;
pub mod scene;
pub mod shapes;

pub use recording::{DrawCommand, RecordingSurface};
pub use scene::SceneRenderer;

use glam::Vec2;
use serde::Serialize;

use crate::sim::FrameView;

/// 8-bit RGB with a floating alpha, like a CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const PINK: Self = Self::rgb(255, 192, 203);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// One stop of a linear gradient, `offset` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Fill style for rectangles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Paint {
    Solid(Color),
    /// Gradient running from screen y `top` to `bottom`
    VerticalGradient {
        top: f32,
        bottom: f32,
        stops: &'static [GradientStop],
    },
}

/// Immediate-mode 2D drawing primitives.
///
/// Coordinates are in screen space after the current transform. `save` and
/// `restore` push and pop the transform stack.
pub trait DrawSurface {
    /// Start a new frame covering `size`
    fn clear(&mut self, size: Vec2);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, factor: Vec2);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }

    /// Hand the finished frame to the backend
    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Draws one frame of the simulation
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>) -> anyhow::Result<()>;
}
