//! Per-tick entity behavior
//!
//! Normal fish flee or wander, ambush fish run their hide/emerge/return cycle,
//! seaweed sways, and the shark "moves" by scrolling the world under it.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::random::{between, horizontal_direction, jitter};
use super::state::{AmbushPhase, AmbushState, Fish, FishVariant, NormalFishState, SimulationState};
use crate::consts::*;
use crate::heading_vector;

/// Vertical band fish are confined to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBand {
    pub min_y: f32,
    pub max_y: f32,
}

impl DepthBand {
    /// Reflective clamp: pin to the edge and point vertical velocity inward
    pub fn bounce(&self, pos: &mut Vec2, vel: &mut Vec2) {
        if pos.y < self.min_y {
            pos.y = self.min_y;
            vel.y = vel.y.abs();
        }
        if pos.y > self.max_y {
            pos.y = self.max_y;
            vel.y = -vel.y.abs();
        }
    }
}

/// Advance every fish one tick
pub fn update_fish(state: &mut SimulationState) {
    let shark = state.shark_world_pos();
    let band = DepthBand {
        min_y: state.world.surface_y + FISH_BOUNDS_MARGIN,
        max_y: state.world.bottom_y - FISH_BOUNDS_MARGIN,
    };
    let rng = &mut state.rng;

    for fish in &mut state.fish {
        update_one_fish(fish, shark, band, rng);
    }
}

/// Advance a single fish, dispatching on its variant
pub fn update_one_fish<R: Rng + ?Sized>(fish: &mut Fish, shark: Vec2, band: DepthBand, rng: &mut R) {
    let Fish {
        pos,
        vel,
        speed,
        flee_distance,
        heading,
        variant,
        ..
    } = fish;

    match variant {
        FishVariant::Normal(wander) => {
            steer_normal(pos, vel, *speed, *flee_distance, wander, shark, rng)
        }
        FishVariant::Ambush(ambush) => steer_ambush(pos, vel, *speed, ambush, shark),
    }

    *pos += *vel;
    band.bounce(pos, vel);

    if vel.length() > HEADING_MIN_SPEED {
        let target = vel.y.atan2(vel.x);
        *heading = *heading * HEADING_SMOOTHING + target * (1.0 - HEADING_SMOOTHING);
    }
}

/// Flee when the shark is inside the fish's flee distance, otherwise wander.
/// Leaves `vel` drag-applied and speed-clamped, ready to integrate.
fn steer_normal<R: Rng + ?Sized>(
    pos: &Vec2,
    vel: &mut Vec2,
    speed: f32,
    flee_distance: f32,
    wander: &mut NormalFishState,
    shark: Vec2,
    rng: &mut R,
) {
    let away = *pos - shark;
    let distance = away.length();
    wander.fleeing = distance < flee_distance && distance > 0.0;

    if wander.fleeing {
        let strength = ((flee_distance - distance) / flee_distance).max(FLEE_MIN_STRENGTH);
        *vel += away / distance * speed * strength * FLEE_ACCEL;
        *vel *= FLEE_DRAG;
        if vel.x.abs() < FLEE_JITTER_CUTOFF {
            vel.x = 0.0;
        }
        if vel.y.abs() < FLEE_JITTER_CUTOFF {
            vel.y = 0.0;
        }
        *vel = vel.clamp_length_max(speed * FLEE_MAX_SPEED_FACTOR);
    } else {
        wander_step(vel, wander, rng);
        *vel *= WANDER_DRAG;
        if vel.length() < WANDER_MIN_SPEED {
            let push = heading_vector(wander.swim_direction);
            vel.x += push.x * WANDER_MIN_SPEED * 0.3;
            vel.y += push.y * WANDER_MIN_SPEED * 0.1;
        }
        *vel = vel.clamp_length_max(speed * WANDER_MAX_SPEED_FACTOR);
    }
}

/// Calm horizontal drift with occasional small turns and rare reversals
fn wander_step<R: Rng + ?Sized>(vel: &mut Vec2, wander: &mut NormalFishState, rng: &mut R) {
    wander.direction_change_timer += 1.0;

    let dir = heading_vector(wander.swim_direction);
    vel.x += dir.x * wander.base_speed * WANDER_HORIZONTAL_BIAS * WANDER_THRUST;
    vel.y += dir.y * wander.base_speed * WANDER_VERTICAL_SUBTLETY * WANDER_THRUST;

    wander.depth_oscillation += WANDER_OSCILLATION_STEP;
    vel.y += wander.depth_oscillation.sin() * WANDER_OSCILLATION_PUSH;

    let turn_after = between(rng, WANDER_TURN_MIN_TICKS, WANDER_TURN_RANGE_TICKS);
    if wander.direction_change_timer > turn_after {
        wander.swim_direction += jitter(rng) * WANDER_TURN_JITTER;
        if is_steep(wander.swim_direction) {
            wander.swim_direction = horizontal_direction(rng);
        }
        wander.direction_change_timer = 0.0;
    }

    if rng.random_bool(WANDER_REVERSAL_CHANCE) {
        wander.swim_direction += PI;
        wander.base_speed = between(rng, WANDER_BASE_SPEED_MIN, WANDER_BASE_SPEED_RANGE);
    }
}

/// True when a direction points mostly up or down
fn is_steep(direction: f32) -> bool {
    let d = direction.rem_euclid(TAU);
    (d > PI * 0.17 && d < PI * 0.83) || (d > PI * 1.17 && d < PI * 1.83)
}

/// Velocity toward `to` at `speed`, or zero once within arrival distance
fn seek(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist > AMBUSH_ARRIVE_DISTANCE {
        delta / dist * speed
    } else {
        Vec2::ZERO
    }
}

/// Hide at home until the shark comes close, chase it until leashed, then
/// swim home and hide again.
fn steer_ambush(pos: &mut Vec2, vel: &mut Vec2, speed: f32, ambush: &mut AmbushState, shark: Vec2) {
    let shark_distance = pos.distance(shark);

    match ambush.phase {
        AmbushPhase::Hiding => {
            *vel = Vec2::ZERO;
            if shark_distance < AMBUSH_TRIGGER_DISTANCE {
                ambush.phase = AmbushPhase::Emerging;
                ambush.state_timer = 0;
            }
            *pos = ambush.home;
        }
        AmbushPhase::Emerging => {
            *vel = seek(*pos, shark, speed * AMBUSH_EMERGE_SPEED_FACTOR);
            ambush.state_timer += 1;
            if pos.distance(ambush.home) > AMBUSH_LEASH_DISTANCE {
                ambush.phase = AmbushPhase::Returning;
            }
        }
        AmbushPhase::Returning => {
            if pos.distance(ambush.home) > AMBUSH_ARRIVE_DISTANCE {
                *vel = seek(*pos, ambush.home, speed * AMBUSH_RETURN_SPEED_FACTOR);
            } else {
                *vel = Vec2::ZERO;
                *pos = ambush.home;
                ambush.phase = AmbushPhase::Hiding;
            }
            if shark_distance < AMBUSH_TRIGGER_DISTANCE {
                ambush.phase = AmbushPhase::Emerging;
                ambush.state_timer = 0;
            }
        }
    }
}

/// Cosmetic sway, read only when drawing
pub fn update_seaweed(state: &mut SimulationState) {
    for seaweed in &mut state.seaweed {
        seaweed.sway_phase = (seaweed.sway_phase + seaweed.sway_speed).rem_euclid(TAU);
    }
}

/// Move the shark toward the pointer by scrolling the world the other way.
/// Returns true if the world moved this tick.
pub fn steer_shark(state: &mut SimulationState) -> bool {
    let shark = &mut state.shark;
    shark.target = state.pointer.target;
    if !state.pointer.active {
        return false;
    }

    let delta = shark.target - shark.anchor;
    let distance = delta.length();
    if distance <= state.config.shark.dead_zone {
        return false;
    }

    state.world.scroll_by(delta / distance * shark.speed);
    shark.direction_deg = delta.y.atan2(delta.x).to_degrees();
    state
        .world
        .clamp_to_bounds(shark.anchor.y, state.config.world.bounds_margin);
    true
}
