//! Recording draw surface
//!
//! Captures every primitive as a `DrawCommand` instead of rasterizing it. Used
//! by the headless runner and by tests that check what a frame would draw.

use glam::Vec2;
use serde::Serialize;

use super::{Color, DrawSurface, Paint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear { size: Vec2 },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Scale(Vec2),
    FillRect { origin: Vec2, size: Vec2, paint: Paint },
    FillEllipse { center: Vec2, radii: Vec2, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    StrokePolyline { points: Vec<Vec2>, color: Color, width: f32 },
    StrokeCircle { center: Vec2, radius: f32, color: Color, width: f32 },
}

/// A `DrawSurface` that remembers the last frame's commands
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    depth: usize,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the last `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current save/restore nesting
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn count(&self, matches: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|&c| matches(c)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, size: Vec2) {
        self.commands.clear();
        self.depth = 0;
        self.commands.push(DrawCommand::Clear { size });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn scale(&mut self, factor: Vec2) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint) {
        self.commands.push(DrawCommand::FillRect { origin, size, paint });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn present(&mut self) -> anyhow::Result<()> {
        anyhow::ensure!(self.depth == 0, "unbalanced save/restore: depth {}", self.depth);
        self.frames += 1;
        Ok(())
    }
}
