//! Infinite Ocean - a shark chasing fish across an endless scrolling sea
//!
//! Core modules:
//! - `sim`: Seeded simulation (chunk streaming, fish behavior, eating, particles)
//! - `renderer`: Draw-primitive surface and scene drawing
//! - `orchestrator`: Per-frame update/draw sequencing with failure containment
//! - `config`: Data-driven world and balance tuning

pub mod config;
pub mod orchestrator;
pub mod renderer;
pub mod sim;

pub use config::OceanConfig;
pub use orchestrator::{FrameOrchestrator, FrameSchedule};

use glam::Vec2;

/// Game balance constants that are not exposed through `OceanConfig`
pub mod consts {
    /// Slow (gold) fish: speed band and size band
    pub const SLOW_FISH_SPEED_MIN: f32 = 1.2;
    pub const SLOW_FISH_SPEED_RANGE: f32 = 0.6;
    pub const SLOW_FISH_SIZE_MIN: f32 = 10.0;
    pub const SLOW_FISH_SIZE_RANGE: f32 = 8.0;

    /// Fast (red) fish: speed band and size band
    pub const FAST_FISH_SPEED_MIN: f32 = 2.2;
    pub const FAST_FISH_SPEED_RANGE: f32 = 0.8;
    pub const FAST_FISH_SIZE_MIN: f32 = 6.0;
    pub const FAST_FISH_SIZE_RANGE: f32 = 6.0;

    /// Ambush (green) fish lurking in seaweed
    pub const AMBUSH_FISH_SPEED_MIN: f32 = 1.3;
    pub const AMBUSH_FISH_SPEED_RANGE: f32 = 0.4;
    pub const AMBUSH_FISH_SIZE_MIN: f32 = 11.0;
    pub const AMBUSH_FISH_SIZE_RANGE: f32 = 5.0;
    /// Home sits slightly below the top of its seaweed clump
    pub const AMBUSH_HOME_DROP: f32 = 10.0;

    /// Every fish starts fleeing somewhere between 120 and 200 units
    pub const FLEE_DISTANCE_MIN: f32 = 120.0;
    pub const FLEE_DISTANCE_RANGE: f32 = 80.0;

    /// Fleeing
    pub const FLEE_ACCEL: f32 = 0.4;
    pub const FLEE_MIN_STRENGTH: f32 = 0.5;
    pub const FLEE_DRAG: f32 = 0.92;
    pub const FLEE_MAX_SPEED_FACTOR: f32 = 0.8;
    /// Fleeing fish drop velocity components smaller than this (kills jitter)
    pub const FLEE_JITTER_CUTOFF: f32 = 0.05;

    /// Wandering
    pub const WANDER_DRAG: f32 = 0.96;
    pub const WANDER_MAX_SPEED_FACTOR: f32 = 0.3;
    pub const WANDER_MIN_SPEED: f32 = 0.1;
    pub const WANDER_BASE_SPEED_MIN: f32 = 0.3;
    pub const WANDER_BASE_SPEED_RANGE: f32 = 0.2;
    pub const WANDER_HORIZONTAL_BIAS: f32 = 0.8;
    pub const WANDER_VERTICAL_SUBTLETY: f32 = 0.3;
    pub const WANDER_THRUST: f32 = 0.04;
    pub const WANDER_OSCILLATION_STEP: f32 = 0.01;
    pub const WANDER_OSCILLATION_PUSH: f32 = 0.02;
    /// Direction perturbation fires after 60..240 ticks
    pub const WANDER_TURN_MIN_TICKS: f32 = 60.0;
    pub const WANDER_TURN_RANGE_TICKS: f32 = 180.0;
    pub const WANDER_TURN_JITTER: f32 = 0.2;
    pub const WANDER_REVERSAL_CHANCE: f64 = 0.0005;

    /// Ambush state machine
    pub const AMBUSH_TRIGGER_DISTANCE: f32 = 120.0;
    pub const AMBUSH_LEASH_DISTANCE: f32 = 800.0;
    pub const AMBUSH_ARRIVE_DISTANCE: f32 = 2.0;
    pub const AMBUSH_EMERGE_SPEED_FACTOR: f32 = 0.7;
    pub const AMBUSH_RETURN_SPEED_FACTOR: f32 = 0.5;

    /// Fish stay this far away from surface and floor
    pub const FISH_BOUNDS_MARGIN: f32 = 80.0;

    /// Growth per fish eaten: base + size / divisor
    pub const SLOW_GROWTH_BASE: f32 = 0.02;
    pub const SLOW_GROWTH_DIVISOR: f32 = 500.0;
    pub const FAST_GROWTH_BASE: f32 = 0.015;
    pub const FAST_GROWTH_DIVISOR: f32 = 600.0;

    /// Blood burst
    pub const BLOOD_SPEED_MIN: f32 = 0.3;
    pub const BLOOD_SPEED_RANGE: f32 = 0.4;
    pub const BLOOD_SIZE_MIN: f32 = 1.5;
    pub const BLOOD_SIZE_RANGE: f32 = 3.0;
    pub const BLOOD_LIFE_MIN: f32 = 120.0;
    pub const BLOOD_LIFE_RANGE: f32 = 60.0;
    pub const BLOOD_GRAVITY_MIN: f32 = 0.005;
    pub const BLOOD_GRAVITY_RANGE: f32 = 0.005;
    pub const BLOOD_DRAG: f32 = 0.995;
    pub const BLOOD_DRIFT: f32 = 0.02;
    /// Particles swell to 115% over the first 30% of their life, then shrink away
    pub const BLOOD_GROW_PHASE: f32 = 0.3;
    pub const BLOOD_PEAK_SCALE: f32 = 1.15;

    /// Fish heading smoothing for drawing
    pub const HEADING_SMOOTHING: f32 = 0.9;
    pub const HEADING_MIN_SPEED: f32 = 0.1;
}

/// Unit vector pointing along `theta` (radians)
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Area of a square chunk in 100x100-unit cells
#[inline]
pub fn chunk_cells(chunk_size: f32) -> f64 {
    let size = f64::from(chunk_size);
    size * size / 10_000.0
}
