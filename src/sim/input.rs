//! Pointer/touch state
//!
//! Events only move the target; the next tick reads whatever arrived last.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Latest pointer position in screen space
    pub target: Vec2,
    /// Movement only happens while the pointer is over the surface
    pub active: bool,
}

impl PointerState {
    /// Inactive pointer resting at `target`
    pub fn at(target: Vec2) -> Self {
        Self {
            target,
            active: false,
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
        self.active = true;
    }

    pub fn pointer_entered(&mut self) {
        self.active = true;
    }

    pub fn pointer_left(&mut self) {
        self.active = false;
    }

    pub fn touch(&mut self, x: f32, y: f32) {
        self.pointer_moved(x, y);
    }

    /// Lifting a finger keeps the last target, so the shark keeps swimming there
    pub fn touch_ended(&mut self) {}
}
