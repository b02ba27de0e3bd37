//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod chunks;
pub mod eating;
pub mod input;
pub mod particles;
pub mod random;
pub mod state;
pub mod tick;
pub mod world;

pub use behavior::{DepthBand, steer_shark, update_fish, update_seaweed};
pub use chunks::{ChunkCoord, ChunkRegistry, stream_chunks};
pub use eating::{eat_radius, mouth_point, resolve_eating};
pub use input::PointerState;
pub use particles::{spawn_blood_burst, update_particles};
pub use state::{
    AmbushPhase, AmbushState, BloodParticle, Fish, FishColor, FishVariant, FrameView, GameStats,
    NormalFishState, Seaweed, Shark, SimulationState, Viewport,
};
pub use tick::{TickReport, tick};
pub use world::WorldState;
