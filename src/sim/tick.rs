//! One simulation tick
//!
//! Phases run strictly in order: fish, seaweed, shark/world (with chunk
//! streaming), eating, particles. Nothing here draws.

use super::state::SimulationState;
use super::{behavior, chunks, eating, particles};

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The world scrolled under the shark
    pub moved: bool,
    /// Fish consumed this tick
    pub fish_eaten: usize,
}

/// Advance the simulation by one display refresh
pub fn tick(state: &mut SimulationState) -> TickReport {
    state.time_ticks += 1;

    behavior::update_fish(state);
    behavior::update_seaweed(state);

    let moved = behavior::steer_shark(state);
    chunks::stream_chunks(state);

    let fish_eaten = eating::resolve_eating(state);
    particles::update_particles(&mut state.particles, &mut state.rng);

    TickReport { moved, fish_eaten }
}
