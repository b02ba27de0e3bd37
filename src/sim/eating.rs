//! Eating resolution
//!
//! The mouth sits in front of the shark's visual center, mirrored exactly the
//! way the sprite is mirrored. Every fish inside the eating radius this tick is
//! consumed; the mouth and radius are fixed for the whole scan.

use std::f32::consts::PI;

use glam::Vec2;

use super::particles::spawn_blood_burst;
use super::state::{Fish, FishColor, Shark, SimulationState};
use super::world::WorldState;
use crate::config::SharkConfig;
use crate::consts::*;
use crate::heading_vector;

/// Unit vector the sprite's nose points along, after mirroring
pub fn facing_vector(shark: &Shark) -> Vec2 {
    let angle = shark.facing();
    if shark.is_mirrored() {
        // Sprite is scaled by (-1, 1) and then rotated by π - angle
        let mirrored = heading_vector(PI - angle);
        Vec2::new(-mirrored.x, mirrored.y)
    } else {
        heading_vector(angle)
    }
}

/// Mouth position in world space
pub fn mouth_point(shark: &Shark, world: &WorldState, config: &SharkConfig) -> Vec2 {
    let center = world.to_world(shark.visual_center());
    center + facing_vector(shark) * shark.width * config.mouth_reach
}

/// Eating radius, scaled by growth
pub fn eat_radius(shark: &Shark, config: &SharkConfig) -> f32 {
    config.eat_radius * shark.growth_factor
}

/// Growth granted for eating `fish`. Gold fish are the slow, generous ones.
pub fn growth_for(fish: &Fish) -> f32 {
    match fish.color {
        FishColor::Gold => SLOW_GROWTH_BASE + fish.size / SLOW_GROWTH_DIVISOR,
        FishColor::Red | FishColor::Green => FAST_GROWTH_BASE + fish.size / FAST_GROWTH_DIVISOR,
    }
}

/// Consume every fish within reach of the mouth. Returns how many were eaten.
pub fn resolve_eating(state: &mut SimulationState) -> usize {
    let mouth = mouth_point(&state.shark, &state.world, &state.config.shark);
    let radius = eat_radius(&state.shark, &state.config.shark);

    let (eaten, remaining): (Vec<Fish>, Vec<Fish>) = std::mem::take(&mut state.fish)
        .into_iter()
        .partition(|fish| fish.pos.distance(mouth) < radius);
    state.fish = remaining;

    for fish in &eaten {
        consume(state, fish);
    }
    eaten.len()
}

/// Count, grow and splatter for one eaten fish
fn consume(state: &mut SimulationState, fish: &Fish) {
    state.stats.fish_eaten += 1;
    match fish.color {
        FishColor::Gold => state.stats.slow_fish_eaten += 1,
        FishColor::Red | FishColor::Green => state.stats.fast_fish_eaten += 1,
    }

    state.shark.grow(growth_for(fish));
    spawn_blood_burst(
        &mut state.particles,
        &mut state.rng,
        fish.pos,
        fish.size,
        &state.config.particles,
    );

    log::debug!(
        "Ate a {:?} fish (size {:.1}); growth {:.3}, shark {:.1}x{:.1}, total eaten {}",
        fish.color,
        fish.size,
        state.shark.growth_factor,
        state.shark.width,
        state.shark.height,
        state.stats.fish_eaten
    );
}
