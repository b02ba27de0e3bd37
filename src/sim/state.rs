//! Simulation state and entity types
//!
//! Everything a tick reads or writes lives in `SimulationState`; the renderer
//! only ever sees it through `FrameView`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chunks::{ChunkCoord, ChunkRegistry};
use super::input::PointerState;
use super::world::WorldState;
use crate::config::OceanConfig;

/// Drawable area reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen-space center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player's shark. Its anchor never leaves the viewport center; the world
/// scrolls underneath it instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shark {
    /// Screen-space anchor (top-left of the body box)
    pub anchor: Vec2,
    pub base_width: f32,
    pub base_height: f32,
    pub width: f32,
    pub height: f32,
    /// Multiplicative size scalar, never shrinks during a session
    pub growth_factor: f32,
    /// Screen units per tick
    pub speed: f32,
    /// Facing in degrees, from the last movement vector
    pub direction_deg: f32,
    /// Last pointer position in screen space
    pub target: Vec2,
}

impl Shark {
    pub fn new(config: &OceanConfig, viewport: Viewport) -> Self {
        let anchor = viewport.center();
        Self {
            anchor,
            base_width: config.shark.base_width,
            base_height: config.shark.base_height,
            width: config.shark.base_width,
            height: config.shark.base_height,
            growth_factor: 1.0,
            speed: config.shark.speed,
            direction_deg: 0.0,
            target: anchor,
        }
    }

    /// Screen-space center of the drawn body
    pub fn visual_center(&self) -> Vec2 {
        self.anchor + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Facing in radians
    pub fn facing(&self) -> f32 {
        self.direction_deg.to_radians()
    }

    /// Sprite is mirrored while the shark swims left
    pub fn is_mirrored(&self) -> bool {
        self.facing().abs() > std::f32::consts::FRAC_PI_2
    }

    /// Grow by `amount` and rescale the body
    pub fn grow(&mut self, amount: f32) {
        self.growth_factor += amount.max(0.0);
        self.width = self.base_width * self.growth_factor;
        self.height = self.base_height * self.growth_factor;
    }
}

/// Fish colors double as the slow/fast/ambush classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishColor {
    /// Slow, larger, worth more growth
    Gold,
    /// Fast and small
    Red,
    /// Ambush fish hiding in seaweed
    Green,
}

/// Wander state for normal fish, fully rolled at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalFishState {
    pub base_speed: f32,
    /// Radians, biased toward horizontal
    pub swim_direction: f32,
    pub depth_oscillation: f32,
    pub direction_change_timer: f32,
    /// Whether the last tick was spent fleeing
    pub fleeing: bool,
}

/// Ambush cycle: hiding -> emerging -> returning -> hiding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmbushPhase {
    Hiding,
    Emerging,
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbushState {
    pub home: Vec2,
    pub phase: AmbushPhase,
    /// Ticks spent emerging. Tracked only; the leash distance ends the chase.
    pub state_timer: u32,
}

impl AmbushState {
    pub fn new(home: Vec2) -> Self {
        Self {
            home,
            phase: AmbushPhase::Hiding,
            state_timer: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FishVariant {
    Normal(NormalFishState),
    Ambush(AmbushState),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub speed: f32,
    pub flee_distance: f32,
    pub color: FishColor,
    /// Chunk this fish was spawned in
    pub chunk: ChunkCoord,
    /// Smoothed facing used for drawing (radians)
    pub heading: f32,
    pub variant: FishVariant,
}

impl Fish {
    pub fn is_ambush(&self) -> bool {
        matches!(self.variant, FishVariant::Ambush(_))
    }

    pub fn ambush_phase(&self) -> Option<AmbushPhase> {
        match self.variant {
            FishVariant::Ambush(ambush) => Some(ambush.phase),
            FishVariant::Normal(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seaweed {
    pub pos: Vec2,
    pub height: f32,
    pub sway_phase: f32,
    pub sway_speed: f32,
    pub chunk: ChunkCoord,
}

/// A blood cloud particle (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Size at spawn; the envelope scales from this
    pub max_size: f32,
    /// 1.0 at spawn, dead at or below 0.0
    pub life: f32,
    /// Lifespan in ticks
    pub max_life: f32,
    /// Ticks lived so far
    pub age: u32,
    pub gravity: f32,
    pub fade_rate: f32,
}

/// In-memory counters, reset only on (re)initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub fish_eaten: u64,
    pub slow_fish_eaten: u64,
    pub fast_fish_eaten: u64,
}

/// Complete session state, owned by the frame orchestrator
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub config: OceanConfig,
    pub viewport: Viewport,
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: WorldState,
    pub shark: Shark,
    pub pointer: PointerState,
    pub fish: Vec<Fish>,
    pub seaweed: Vec<Seaweed>,
    pub particles: Vec<BloodParticle>,
    pub stats: GameStats,
    /// Chunks populated with seaweed (and their ambush fish)
    pub seaweed_chunks: ChunkRegistry,
    /// Chunks populated with normal fish
    pub fish_chunks: ChunkRegistry,
    next_id: u32,
}

impl SimulationState {
    /// Create a session and stream in the chunks around the start position
    pub fn new(config: OceanConfig, viewport: Viewport, seed: u64) -> Self {
        let mut state = Self {
            config,
            viewport,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            world: WorldState::new(&config.world),
            shark: Shark::new(&config, viewport),
            pointer: PointerState::at(viewport.center()),
            fish: Vec::new(),
            seaweed: Vec::new(),
            particles: Vec::new(),
            stats: GameStats::default(),
            seaweed_chunks: ChunkRegistry::default(),
            fish_chunks: ChunkRegistry::default(),
            next_id: 1,
        };
        state.initialize();
        state
    }

    /// Reset shark, bounds, counters and every entity set. The scroll offset
    /// survives so the camera does not jump.
    pub fn initialize(&mut self) {
        self.world.recompute_bounds(&self.config.world);
        self.shark = Shark::new(&self.config, self.viewport);
        self.pointer = PointerState::at(self.viewport.center());
        self.stats = GameStats::default();
        self.fish.clear();
        self.seaweed.clear();
        self.particles.clear();
        self.seaweed_chunks.clear();
        self.fish_chunks.clear();
        self.world
            .clamp_to_bounds(self.shark.anchor.y, self.config.world.bounds_margin);
        super::chunks::stream_chunks(self);
        log::info!(
            "Ocean initialized: viewport {}x{}, {} seaweed, {} fish",
            self.viewport.width,
            self.viewport.height,
            self.seaweed.len(),
            self.fish.len()
        );
    }

    /// New viewport size; reinitializes the session
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.initialize();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Shark anchor in world space
    pub fn shark_world_pos(&self) -> Vec2 {
        self.world.to_world(self.shark.anchor)
    }

    /// World position under the viewport center
    pub fn view_center(&self) -> Vec2 {
        self.world.to_world(self.viewport.center())
    }

    /// Read-only view handed to the renderer
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            config: &self.config,
            viewport: self.viewport,
            time_ticks: self.time_ticks,
            world: &self.world,
            shark: &self.shark,
            pointer: &self.pointer,
            fish: &self.fish,
            seaweed: &self.seaweed,
            particles: &self.particles,
            stats: &self.stats,
        }
    }
}

/// Borrowed snapshot of everything drawable
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub config: &'a OceanConfig,
    pub viewport: Viewport,
    pub time_ticks: u64,
    pub world: &'a WorldState,
    pub shark: &'a Shark,
    pub pointer: &'a PointerState,
    pub fish: &'a [Fish],
    pub seaweed: &'a [Seaweed],
    pub particles: &'a [BloodParticle],
    pub stats: &'a GameStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_streams_initial_chunks() {
        let state = SimulationState::new(OceanConfig::default(), Viewport::new(1024.0, 768.0), 1);
        assert!(!state.seaweed.is_empty());
        assert!(!state.fish_chunks.is_empty());
        assert_eq!(state.stats, GameStats::default());
        assert_eq!(state.shark.growth_factor, 1.0);
        assert_eq!(state.shark.anchor, Vec2::new(512.0, 384.0));
    }

    #[test]
    fn test_resize_reinitializes_session() {
        let mut state = SimulationState::new(OceanConfig::default(), Viewport::new(800.0, 600.0), 2);
        state.shark.grow(0.5);
        state.stats.fish_eaten = 4;
        state.world.offset.x = -1234.0;

        state.resize(Viewport::new(1280.0, 720.0));

        assert_eq!(state.shark.growth_factor, 1.0);
        assert_eq!(state.shark.width, state.shark.base_width);
        assert_eq!(state.shark.anchor, Vec2::new(640.0, 360.0));
        assert_eq!(state.stats.fish_eaten, 0);
        assert_eq!(state.world.offset.x, -1234.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_shark_mirrors_when_swimming_left() {
        let mut shark = Shark::new(&OceanConfig::default(), Viewport::new(800.0, 600.0));
        shark.direction_deg = 45.0;
        assert!(!shark.is_mirrored());
        shark.direction_deg = 135.0;
        assert!(shark.is_mirrored());
        shark.direction_deg = -170.0;
        assert!(shark.is_mirrored());
    }

    #[test]
    fn test_grow_rescales_body() {
        let mut shark = Shark::new(&OceanConfig::default(), Viewport::new(800.0, 600.0));
        shark.grow(0.25);
        assert_eq!(shark.width, 80.0 * 1.25);
        assert_eq!(shark.height, 40.0 * 1.25);
    }
}
