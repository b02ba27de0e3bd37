//! Chunk streaming
//!
//! World space is cut into square chunks. Chunks around the viewport are
//! populated lazily the first time they come into range; entities that drift too
//! far away take their whole chunk with them, and the chunk is rolled fresh the
//! next time it is needed.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::random::{angle, between, horizontal_direction, jitter};
use super::state::{
    AmbushState, Fish, FishColor, FishVariant, NormalFishState, Seaweed, SimulationState,
};
use crate::chunk_cells;
use crate::consts::*;

/// Integer chunk coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing `pos`
    pub fn containing(pos: Vec2, chunk_size: f32) -> Self {
        Self {
            x: (pos.x / chunk_size).floor() as i32,
            y: (pos.y / chunk_size).floor() as i32,
        }
    }

    /// World position of the chunk's top-left corner
    pub fn origin(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.y as f32 * chunk_size)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Set of chunk coordinates that currently hold generated content
#[derive(Debug, Clone, Default)]
pub struct ChunkRegistry {
    generated: HashSet<ChunkCoord>,
}

impl ChunkRegistry {
    /// Mark `coord` generated. Returns false if it already was.
    pub fn mark(&mut self, coord: ChunkCoord) -> bool {
        self.generated.insert(coord)
    }

    pub fn unmark(&mut self, coord: ChunkCoord) -> bool {
        self.generated.remove(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.generated.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }

    pub fn clear(&mut self) {
        self.generated.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.generated.iter().copied()
    }
}

/// Number of placement attempts for one chunk at `density`
pub fn placements_per_chunk(chunk_size: f32, density: f32) -> usize {
    (chunk_cells(chunk_size) * f64::from(density) * 100.0).round() as usize
}

/// Roll a normal fish: slow/gold or fast/red
pub fn spawn_normal_fish<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    pos: Vec2,
    chunk: ChunkCoord,
    slow_ratio: f64,
) -> Fish {
    let (speed, color, size) = if rng.random_bool(slow_ratio) {
        (
            between(rng, SLOW_FISH_SPEED_MIN, SLOW_FISH_SPEED_RANGE),
            FishColor::Gold,
            between(rng, SLOW_FISH_SIZE_MIN, SLOW_FISH_SIZE_RANGE),
        )
    } else {
        (
            between(rng, FAST_FISH_SPEED_MIN, FAST_FISH_SPEED_RANGE),
            FishColor::Red,
            between(rng, FAST_FISH_SIZE_MIN, FAST_FISH_SIZE_RANGE),
        )
    };
    let vel = Vec2::new(jitter(rng) * 2.0, jitter(rng) * 2.0);
    let flee_distance = between(rng, FLEE_DISTANCE_MIN, FLEE_DISTANCE_RANGE);
    let wander = NormalFishState {
        base_speed: between(rng, WANDER_BASE_SPEED_MIN, WANDER_BASE_SPEED_RANGE),
        swim_direction: horizontal_direction(rng),
        depth_oscillation: angle(rng),
        direction_change_timer: between(rng, 0.0, WANDER_TURN_MIN_TICKS),
        fleeing: false,
    };
    Fish {
        id,
        pos,
        vel,
        size,
        speed,
        flee_distance,
        color,
        chunk,
        heading: 0.0,
        variant: FishVariant::Normal(wander),
    }
}

/// Roll an ambush fish hiding at `home`
pub fn spawn_ambush_fish<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    home: Vec2,
    chunk: ChunkCoord,
) -> Fish {
    Fish {
        id,
        pos: home,
        vel: Vec2::ZERO,
        size: between(rng, AMBUSH_FISH_SIZE_MIN, AMBUSH_FISH_SIZE_RANGE),
        speed: between(rng, AMBUSH_FISH_SPEED_MIN, AMBUSH_FISH_SPEED_RANGE),
        flee_distance: between(rng, FLEE_DISTANCE_MIN, FLEE_DISTANCE_RANGE),
        color: FishColor::Green,
        chunk,
        heading: 0.0,
        variant: FishVariant::Ambush(AmbushState::new(home)),
    }
}

/// Uniform point inside a chunk
fn scatter<R: Rng + ?Sized>(rng: &mut R, coord: ChunkCoord, chunk_size: f32) -> Vec2 {
    coord.origin(chunk_size) + Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * chunk_size
}

/// Populate seaweed (and the ambush fish hiding in it) for one chunk.
/// Returns false if the chunk was already generated.
pub fn generate_seaweed_chunk(state: &mut SimulationState, coord: ChunkCoord) -> bool {
    if !state.seaweed_chunks.mark(coord) {
        return false;
    }

    let spawn = state.config.spawn;
    let chunk_size = state.config.chunks.size;
    let min_y = state.world.surface_y + spawn.seaweed_surface_margin;
    let max_y = state.world.bottom_y - spawn.seaweed_floor_margin;
    let fish_min_y = state.world.surface_y + FISH_BOUNDS_MARGIN;
    let fish_max_y = state.world.bottom_y - FISH_BOUNDS_MARGIN;

    for _ in 0..placements_per_chunk(chunk_size, spawn.seaweed_density) {
        let pos = scatter(&mut state.rng, coord, chunk_size);
        if pos.y < min_y || pos.y > max_y {
            continue;
        }

        state.seaweed.push(Seaweed {
            pos,
            height: between(&mut state.rng, 30.0, 60.0),
            sway_phase: angle(&mut state.rng),
            sway_speed: between(&mut state.rng, 0.02, 0.03),
            chunk: coord,
        });

        // Ambush fish are keyed to their seaweed's chunk even when the home
        // lands in another chunk row
        if state.rng.random_bool(spawn.ambush_chance) {
            // Keep home inside the band fish are confined to, or it could never be reached
            let home_y = (pos.y + AMBUSH_HOME_DROP).min(fish_max_y).max(fish_min_y);
            let id = state.next_entity_id();
            let fish = spawn_ambush_fish(&mut state.rng, id, Vec2::new(pos.x, home_y), coord);
            state.fish.push(fish);
        }
    }

    log::debug!("Generated seaweed chunk ({}, {})", coord.x, coord.y);
    true
}

/// Populate normal fish for one chunk. Returns false if already generated.
pub fn generate_fish_chunk(state: &mut SimulationState, coord: ChunkCoord) -> bool {
    if !state.fish_chunks.mark(coord) {
        return false;
    }

    let spawn = state.config.spawn;
    let chunk_size = state.config.chunks.size;
    let min_y = state.world.surface_y + spawn.fish_surface_margin;
    let max_y = state.world.bottom_y - spawn.fish_floor_margin;

    for _ in 0..placements_per_chunk(chunk_size, spawn.fish_density) {
        let pos = scatter(&mut state.rng, coord, chunk_size);
        if pos.y < min_y || pos.y > max_y {
            continue;
        }
        let id = state.next_entity_id();
        let fish = spawn_normal_fish(&mut state.rng, id, pos, coord, spawn.slow_fish_ratio);
        state.fish.push(fish);
    }

    log::debug!("Generated fish chunk ({}, {})", coord.x, coord.y);
    true
}

/// Remove every seaweed and fish farther than the eviction distance from
/// `center` (per axis) and unmark the chunk each one was spawned in, so the
/// chunk is rolled fresh next time it comes into range. Entities still in range
/// are never touched, whatever their chunk. Registry entries whose chunk center
/// is out of range are unmarked too, so empty chunks do not stay marked forever.
/// Returns entities removed.
pub fn evict_distant(state: &mut SimulationState, center: Vec2) -> usize {
    let limit = state.config.chunks.evict_distance();
    let chunk_size = state.config.chunks.size;
    let too_far = |pos: Vec2| {
        let d = (pos - center).abs();
        d.x > limit || d.y > limit
    };
    let chunk_too_far =
        |coord: &ChunkCoord| too_far(coord.origin(chunk_size) + Vec2::splat(chunk_size / 2.0));

    let mut stale_seaweed: HashSet<ChunkCoord> =
        state.seaweed_chunks.iter().filter(|c| chunk_too_far(c)).collect();
    let mut stale_fish: HashSet<ChunkCoord> =
        state.fish_chunks.iter().filter(|c| chunk_too_far(c)).collect();

    let before = state.seaweed.len() + state.fish.len();
    state.seaweed.retain(|s| {
        let keep = !too_far(s.pos);
        if !keep {
            stale_seaweed.insert(s.chunk);
        }
        keep
    });
    state.fish.retain(|f| {
        let keep = !too_far(f.pos);
        if !keep {
            // Ambush fish were generated with their seaweed
            if f.is_ambush() {
                stale_seaweed.insert(f.chunk);
            } else {
                stale_fish.insert(f.chunk);
            }
        }
        keep
    });

    for coord in &stale_seaweed {
        state.seaweed_chunks.unmark(*coord);
    }
    for coord in &stale_fish {
        state.fish_chunks.unmark(*coord);
    }

    let removed = before - state.seaweed.len() - state.fish.len();
    if removed > 0 || !stale_seaweed.is_empty() || !stale_fish.is_empty() {
        log::debug!(
            "Evicted {} entities; unmarked {} seaweed / {} fish chunks",
            removed,
            stale_seaweed.len(),
            stale_fish.len()
        );
    }
    removed
}

/// Generate the neighborhood around the viewport center, then evict far chunks
pub fn stream_chunks(state: &mut SimulationState) {
    let center = state.view_center();
    let chunks = state.config.chunks;
    let current = ChunkCoord::containing(center, chunks.size);

    for dx in -chunks.range_x..=chunks.range_x {
        for dy in -chunks.range_y..=chunks.range_y {
            let coord = current.offset(dx, dy);
            generate_seaweed_chunk(state, coord);
            generate_fish_chunk(state, coord);
        }
    }

    evict_distant(state, center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OceanConfig;
    use crate::sim::state::Viewport;
    use proptest::prelude::*;

    /// Chunk row y=1 spans world y 800..1600, fully inside both spawn bands
    const OPEN_WATER: ChunkCoord = ChunkCoord::new(0, 1);

    fn empty_state(seed: u64) -> SimulationState {
        let mut state = SimulationState::new(OceanConfig::default(), Viewport::new(1024.0, 768.0), seed);
        state.fish.clear();
        state.seaweed.clear();
        state.fish_chunks.clear();
        state.seaweed_chunks.clear();
        state
    }

    #[test]
    fn test_chunk_coords_floor_negative() {
        assert_eq!(ChunkCoord::containing(Vec2::new(799.9, 0.0), 800.0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::containing(Vec2::new(800.0, 1600.0), 800.0), ChunkCoord::new(1, 2));
        assert_eq!(ChunkCoord::containing(Vec2::new(-0.1, -800.1), 800.0), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn test_placements_per_chunk_defaults() {
        assert_eq!(placements_per_chunk(800.0, 0.0025), 16);
        assert_eq!(placements_per_chunk(800.0, 0.0005), 3);
    }

    #[test]
    fn test_fish_chunk_generation_is_idempotent() {
        let mut state = empty_state(11);
        assert!(generate_fish_chunk(&mut state, OPEN_WATER));
        let count = state.fish.len();
        assert_eq!(count, 3);
        assert!(!generate_fish_chunk(&mut state, OPEN_WATER));
        assert_eq!(state.fish.len(), count);
        assert!(state.fish_chunks.contains(OPEN_WATER));
    }

    #[test]
    fn test_seaweed_chunk_generation_is_idempotent() {
        let mut state = empty_state(12);
        assert!(generate_seaweed_chunk(&mut state, OPEN_WATER));
        let (seaweed, fish) = (state.seaweed.len(), state.fish.len());
        assert_eq!(seaweed, 16);
        assert!(!generate_seaweed_chunk(&mut state, OPEN_WATER));
        assert_eq!(state.seaweed.len(), seaweed);
        assert_eq!(state.fish.len(), fish);
        assert!(state.fish.iter().all(|f| f.is_ambush()));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut state = empty_state(13);
        generate_seaweed_chunk(&mut state, OPEN_WATER);
        assert!(!state.fish_chunks.contains(OPEN_WATER));
        assert!(generate_fish_chunk(&mut state, OPEN_WATER));
    }

    #[test]
    fn test_entities_carry_their_spawn_chunk() {
        let mut state = empty_state(14);
        for x in -2..=2 {
            for y in 0..=2 {
                let coord = ChunkCoord::new(x, y);
                generate_seaweed_chunk(&mut state, coord);
                generate_fish_chunk(&mut state, coord);
            }
        }
        for seaweed in &state.seaweed {
            assert_eq!(ChunkCoord::containing(seaweed.pos, 800.0), seaweed.chunk);
        }
        let mut ambush = 0;
        for fish in &state.fish {
            match fish.variant {
                FishVariant::Ambush(a) => {
                    // Keyed to the seaweed it hides in, not to wherever its home landed
                    let seaweed = state
                        .seaweed
                        .iter()
                        .find(|s| s.pos.x == a.home.x)
                        .expect("ambush fish has a seaweed");
                    assert_eq!(fish.chunk, seaweed.chunk);
                    assert_eq!(fish.chunk, ChunkCoord::containing(seaweed.pos, 800.0));
                    ambush += 1;
                }
                FishVariant::Normal(_) => {
                    assert_eq!(ChunkCoord::containing(fish.pos, 800.0), fish.chunk);
                }
            }
        }
        assert!(ambush > 0);
    }

    #[test]
    fn test_spawns_respect_vertical_margins() {
        let mut state = empty_state(15);
        for y in -1..=3 {
            generate_seaweed_chunk(&mut state, ChunkCoord::new(0, y));
            generate_fish_chunk(&mut state, ChunkCoord::new(0, y));
        }
        let (surface, bottom) = (state.world.surface_y, state.world.bottom_y);
        for s in &state.seaweed {
            assert!(s.pos.y >= surface + 100.0 && s.pos.y <= bottom - 50.0);
        }
        for f in &state.fish {
            assert!(f.pos.y >= surface + 80.0 && f.pos.y <= bottom - 80.0);
        }
    }

    #[test]
    fn test_speed_bands_by_color() {
        let mut state = empty_state(16);
        for x in 0..40 {
            generate_fish_chunk(&mut state, ChunkCoord::new(x, 1));
        }
        for fish in &state.fish {
            match fish.color {
                FishColor::Gold => assert!((1.2..=1.8).contains(&fish.speed)),
                FishColor::Red => assert!((2.2..=3.0).contains(&fish.speed)),
                FishColor::Green => panic!("fish chunks never spawn ambush fish"),
            }
        }
    }

    #[test]
    fn test_eviction_unmarks_and_regenerates_fresh() {
        let mut state = empty_state(17);
        generate_fish_chunk(&mut state, OPEN_WATER);
        generate_seaweed_chunk(&mut state, OPEN_WATER);
        let old_ids: Vec<u32> = state.fish.iter().map(|f| f.id).collect();

        let removed = evict_distant(&mut state, Vec2::new(100_000.0, 1200.0));
        assert_eq!(removed, old_ids.len() + 16);
        assert!(state.fish.is_empty() && state.seaweed.is_empty());
        assert!(!state.fish_chunks.contains(OPEN_WATER));
        assert!(!state.seaweed_chunks.contains(OPEN_WATER));

        assert!(generate_fish_chunk(&mut state, OPEN_WATER));
        assert_eq!(state.fish.len(), 3);
        assert!(state.fish.iter().all(|f| !old_ids.contains(&f.id)));
    }

    #[test]
    fn test_nearby_entities_survive_eviction() {
        let mut state = empty_state(18);
        generate_fish_chunk(&mut state, OPEN_WATER);
        assert_eq!(evict_distant(&mut state, Vec2::new(400.0, 1200.0)), 0);
        assert_eq!(state.fish.len(), 3);
    }

    #[test]
    fn test_in_range_fish_survives_far_chunk() {
        let mut state = empty_state(22);
        generate_fish_chunk(&mut state, OPEN_WATER);
        let center = Vec2::new(4000.0, 1200.0);
        let kept = state.fish[0].id;
        state.fish[0].pos = center + Vec2::new(100.0, 0.0);

        // Chunk center (400, 1200) is 3600 away: its far fish go, the near one stays
        assert_eq!(evict_distant(&mut state, center), 2);
        assert_eq!(state.fish.len(), 1);
        assert_eq!(state.fish[0].id, kept);
        assert!(!state.fish_chunks.contains(OPEN_WATER));
    }

    #[test]
    fn test_far_chunk_mate_does_not_take_neighbors() {
        let mut state = empty_state(23);
        generate_fish_chunk(&mut state, OPEN_WATER);
        generate_seaweed_chunk(&mut state, OPEN_WATER);
        let center = Vec2::new(400.0, 1200.0);
        let (fish, seaweed) = (state.fish.len(), state.seaweed.len());
        let normal = state
            .fish
            .iter_mut()
            .find(|f| !f.is_ambush())
            .expect("normal fish");
        normal.pos = center + Vec2::new(3000.0, 0.0);

        assert_eq!(evict_distant(&mut state, center), 1);
        assert_eq!(state.fish.len(), fish - 1);
        assert_eq!(state.seaweed.len(), seaweed);
        assert!(!state.fish_chunks.contains(OPEN_WATER));
        assert!(state.seaweed_chunks.contains(OPEN_WATER));
    }

    #[test]
    fn test_regenerated_population_matches_ratio() {
        let mut state = empty_state(19);
        let (mut slow, mut total) = (0usize, 0usize);
        for _ in 0..2000 {
            generate_fish_chunk(&mut state, OPEN_WATER);
            assert_eq!(state.fish.len(), 3);
            slow += state.fish.iter().filter(|f| f.color == FishColor::Gold).count();
            total += state.fish.len();
            evict_distant(&mut state, Vec2::new(1.0e6, 1200.0));
        }
        let ratio = slow as f64 / total as f64;
        assert!((ratio - 0.6).abs() < 0.03, "slow ratio {ratio}");
    }

    #[test]
    fn test_ambush_rate_over_many_chunks() {
        let mut state = empty_state(20);
        for x in 0..500 {
            generate_seaweed_chunk(&mut state, ChunkCoord::new(x, 1));
        }
        let ratio = state.fish.len() as f64 / state.seaweed.len() as f64;
        assert!((ratio - 0.12).abs() < 0.03, "ambush ratio {ratio}");
    }

    #[test]
    fn test_stream_covers_neighborhood() {
        let state = SimulationState::new(OceanConfig::default(), Viewport::new(1024.0, 768.0), 21);
        let center = ChunkCoord::containing(state.view_center(), 800.0);
        for dx in -2..=2 {
            for dy in -1..=1 {
                let coord = center.offset(dx, dy);
                assert!(state.seaweed_chunks.contains(coord));
                assert!(state.fish_chunks.contains(coord));
            }
        }
        assert_eq!(state.fish_chunks.len(), 15);
    }

    proptest! {
        #[test]
        fn test_eviction_only_removes_out_of_range(
            seed in 0u64..500,
            cx in -6000.0f32..6000.0,
            cy in -2000.0f32..4000.0,
        ) {
            let mut state = empty_state(seed);
            for x in -2..=2 {
                for y in 0..=2 {
                    let coord = ChunkCoord::new(x, y);
                    generate_seaweed_chunk(&mut state, coord);
                    generate_fish_chunk(&mut state, coord);
                }
            }
            let center = Vec2::new(cx, cy);
            let limit = state.config.chunks.evict_distance();
            let in_range = |pos: Vec2| {
                let d = (pos - center).abs();
                d.x <= limit && d.y <= limit
            };
            let expected_fish: Vec<u32> =
                state.fish.iter().filter(|f| in_range(f.pos)).map(|f| f.id).collect();
            let expected_seaweed: Vec<Vec2> =
                state.seaweed.iter().map(|s| s.pos).filter(|&p| in_range(p)).collect();

            evict_distant(&mut state, center);
            let fish: Vec<u32> = state.fish.iter().map(|f| f.id).collect();
            let seaweed: Vec<Vec2> = state.seaweed.iter().map(|s| s.pos).collect();
            prop_assert_eq!(fish, expected_fish);
            prop_assert_eq!(seaweed, expected_seaweed);
        }
    }
}
