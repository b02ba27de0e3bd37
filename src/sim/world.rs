//! Camera offset and vertical bounds of the ocean

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

/// Scroll offset plus surface/floor lines. `screen = world + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub offset: Vec2,
    pub surface_y: f32,
    /// Always `surface_y + ocean_depth`
    pub bottom_y: f32,
    pub sky_height: f32,
    pub ocean_depth: f32,
}

impl WorldState {
    pub fn new(config: &WorldConfig) -> Self {
        let mut world = Self {
            offset: Vec2::ZERO,
            surface_y: 0.0,
            bottom_y: 0.0,
            sky_height: config.sky_height,
            ocean_depth: config.ocean_depth,
        };
        world.recompute_bounds(config);
        world
    }

    /// Derive surface and floor from the configured sky height and depth
    pub fn recompute_bounds(&mut self, config: &WorldConfig) {
        self.sky_height = config.sky_height;
        self.ocean_depth = config.ocean_depth;
        self.surface_y = self.sky_height;
        self.bottom_y = self.surface_y + self.ocean_depth;
    }

    #[inline]
    pub fn to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos + self.offset
    }

    #[inline]
    pub fn to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos - self.offset
    }

    /// Correct the vertical offset so a screen-space point at `screen_y` stays
    /// within `margin` of the surface and floor. Horizontal scrolling is unbounded.
    pub fn clamp_to_bounds(&mut self, screen_y: f32, margin: f32) {
        let world_y = screen_y - self.offset.y;
        let top = self.surface_y + margin;
        let bottom = self.bottom_y - margin;
        if world_y < top {
            self.offset.y = screen_y - top;
        }
        if world_y > bottom {
            self.offset.y = screen_y - bottom;
        }
    }

    /// Scroll the world opposite to the desired travel of the camera subject
    pub fn scroll_by(&mut self, travel: Vec2) {
        self.offset -= travel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        WorldState::new(&WorldConfig::default())
    }

    #[test]
    fn test_bounds_derived_from_config() {
        let w = world();
        assert_eq!(w.surface_y, 150.0);
        assert_eq!(w.bottom_y, 2150.0);
    }

    #[test]
    fn test_screen_world_translation_inverts() {
        let mut w = world();
        w.offset = Vec2::new(-300.0, 42.0);
        let p = Vec2::new(12.5, -7.0);
        assert_eq!(w.to_screen(p), Vec2::new(-287.5, 35.0));
        assert_eq!(w.to_world(w.to_screen(p)), p);
    }

    #[test]
    fn test_clamp_pins_to_surface() {
        let mut w = world();
        // Shark at screen y 300 would sit at world y 100, above the surface
        w.offset.y = 200.0;
        w.clamp_to_bounds(300.0, 20.0);
        assert_eq!(w.to_world(Vec2::new(0.0, 300.0)).y, 170.0);
    }

    #[test]
    fn test_clamp_pins_to_floor() {
        let mut w = world();
        w.offset.y = -5000.0;
        w.clamp_to_bounds(300.0, 20.0);
        assert_eq!(w.to_world(Vec2::new(0.0, 300.0)).y, 2130.0);
    }

    #[test]
    fn test_clamp_leaves_horizontal_alone() {
        let mut w = world();
        w.offset = Vec2::new(-1.0e6, -500.0);
        w.clamp_to_bounds(300.0, 20.0);
        assert_eq!(w.offset, Vec2::new(-1.0e6, -500.0));
    }
}
