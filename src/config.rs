//! World and balance tuning
//!
//! Every field has a default that reproduces the stock game, so a JSON file only
//! needs to mention what it changes.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Vertical layout of the ocean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Height of the sky band above the surface
    pub sky_height: f32,
    /// Distance from surface to floor
    pub ocean_depth: f32,
    /// Sand drawn below the floor line
    pub sand_height: f32,
    /// How close the shark may get to surface or floor
    pub bounds_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            sky_height: 150.0,
            ocean_depth: 2000.0,
            sand_height: 100.0,
            bounds_margin: 20.0,
        }
    }
}

/// Player shark tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharkConfig {
    pub base_width: f32,
    pub base_height: f32,
    /// Screen units per tick
    pub speed: f32,
    /// Pointer targets inside this radius do not move the shark
    pub dead_zone: f32,
    /// Eating radius at growth factor 1.0
    pub eat_radius: f32,
    /// Mouth distance from the visual center, as a fraction of width
    pub mouth_reach: f32,
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            base_width: 80.0,
            base_height: 40.0,
            speed: 2.0,
            dead_zone: 50.0,
            eat_radius: 30.0,
            mouth_reach: 0.4,
        }
    }
}

/// Chunk streaming window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Edge length of a square chunk in world units
    pub size: f32,
    /// Chunks generated left/right of the center chunk
    pub range_x: i32,
    /// Chunks generated above/below the center chunk
    pub range_y: i32,
    /// Entities further than this many chunks (per axis) get evicted
    pub evict_chunks: f32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 800.0,
            range_x: 2,
            range_y: 1,
            evict_chunks: 3.0,
        }
    }
}

impl ChunkConfig {
    /// Per-axis eviction distance in world units
    pub fn evict_distance(&self) -> f32 {
        self.size * self.evict_chunks
    }

    /// Farthest a freshly generated entity can sit from the view center, per axis
    pub fn generation_reach(&self) -> f32 {
        (self.range_x.max(self.range_y) + 1) as f32 * self.size
    }
}

/// Procedural population of each chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seaweed placements per 100x100 cell, scaled by 100
    pub seaweed_density: f32,
    /// Fish placements per 100x100 cell, scaled by 100
    pub fish_density: f32,
    pub seaweed_surface_margin: f32,
    pub seaweed_floor_margin: f32,
    pub fish_surface_margin: f32,
    pub fish_floor_margin: f32,
    /// Chance that a seaweed clump also hides an ambush fish
    pub ambush_chance: f64,
    /// Share of normal fish that are slow (gold); the rest are fast (red)
    pub slow_fish_ratio: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            seaweed_density: 0.0025,
            fish_density: 0.0005,
            seaweed_surface_margin: 100.0,
            seaweed_floor_margin: 50.0,
            fish_surface_margin: 80.0,
            fish_floor_margin: 80.0,
            ambush_chance: 0.12,
            slow_fish_ratio: 0.6,
        }
    }
}

/// Blood burst sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub burst_base: usize,
    pub burst_max: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst_base: 12,
            burst_max: 20,
        }
    }
}

/// Frame loop supervision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Delay before retrying after a failed frame
    pub retry_delay_ms: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { retry_delay_ms: 100 }
    }
}

impl FrameConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Debug overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw the mouth point and eating radius
    pub show_mouth: bool,
}

/// Complete tuning for one session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanConfig {
    pub world: WorldConfig,
    pub shark: SharkConfig,
    pub chunks: ChunkConfig,
    pub spawn: SpawnConfig,
    pub particles: ParticleConfig,
    pub frame: FrameConfig,
    pub debug: DebugConfig,
}

/// Top-level sections a config document may carry
const SECTIONS: [&str; 7] = ["world", "shark", "chunks", "spawn", "particles", "frame", "debug"];

impl OceanConfig {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("invalid ocean config JSON")?;
        let missing = missing_sections(&value);
        if !missing.is_empty() {
            log::warn!("Ocean config has no {} section(s); using defaults", missing.join(", "));
        }
        let config: Self = serde_json::from_value(value).context("invalid ocean config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded ocean config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.chunks.size > 0.0, "chunk size must be positive");
        anyhow::ensure!(
            self.chunks.range_x >= 0 && self.chunks.range_y >= 0,
            "chunk ranges must not be negative"
        );
        anyhow::ensure!(self.chunks.evict_chunks > 0.0, "evict_chunks must be positive");
        // Anything tighter evicts chunks as soon as they are generated
        anyhow::ensure!(
            self.chunks.evict_distance() >= self.chunks.generation_reach(),
            "eviction distance {} is inside the generation reach {}",
            self.chunks.evict_distance(),
            self.chunks.generation_reach()
        );
        anyhow::ensure!(self.world.ocean_depth > 0.0, "ocean depth must be positive");
        anyhow::ensure!(self.shark.speed >= 0.0, "shark speed must not be negative");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.spawn.ambush_chance)
                && (0.0..=1.0).contains(&self.spawn.slow_fish_ratio),
            "spawn probabilities must lie in [0, 1]"
        );
        Ok(())
    }
}

/// Sections absent from a config document. Objects only; anything else is
/// left for deserialization to reject.
fn missing_sections(value: &serde_json::Value) -> Vec<&'static str> {
    match value.as_object() {
        Some(map) => SECTIONS
            .iter()
            .copied()
            .filter(|section| !map.contains_key(*section))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let config = OceanConfig::default();
        assert_eq!(config.chunks.size, 800.0);
        assert_eq!(config.chunks.evict_distance(), 2400.0);
        assert_eq!(config.world.sky_height, 150.0);
        assert_eq!(config.world.ocean_depth, 2000.0);
        assert_eq!(config.shark.dead_zone, 50.0);
        assert_eq!(config.frame.retry_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = OceanConfig::from_json(r#"{ "shark": { "speed": 3.5 }, "debug": { "show_mouth": true } }"#)
            .unwrap();
        assert_eq!(config.shark.speed, 3.5);
        assert_eq!(config.shark.base_width, 80.0);
        assert!(config.debug.show_mouth);
        assert_eq!(config.spawn, SpawnConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(OceanConfig::from_json(r#"{ "chunks": { "size": 0 } }"#).is_err());
        assert!(OceanConfig::from_json(r#"{ "spawn": { "ambush_chance": 1.5 } }"#).is_err());
        assert!(OceanConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_eviction_inside_generation_reach_rejected() {
        assert!(OceanConfig::from_json(r#"{ "chunks": { "evict_chunks": 0 } }"#).is_err());
        assert!(OceanConfig::from_json(r#"{ "chunks": { "evict_chunks": -2 } }"#).is_err());
        assert!(OceanConfig::from_json(r#"{ "chunks": { "evict_chunks": 1 } }"#).is_err());
        // Wider generation needs a wider eviction window
        assert!(OceanConfig::from_json(r#"{ "chunks": { "range_x": 3 } }"#).is_err());
        assert!(OceanConfig::from_json(r#"{ "chunks": { "range_x": 3, "evict_chunks": 4 } }"#).is_ok());
        assert!(OceanConfig::from_json(r#"{ "chunks": { "evict_chunks": 3 } }"#).is_ok());
    }

    #[test]
    fn test_missing_sections_reported() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{ "shark": {}, "chunks": {}, "debug": {} }"#).unwrap();
        assert_eq!(
            missing_sections(&value),
            vec!["world", "spawn", "particles", "frame"]
        );

        let full = serde_json::to_value(OceanConfig::default()).unwrap();
        assert!(missing_sections(&full).is_empty());
        assert!(missing_sections(&serde_json::Value::Null).is_empty());
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = OceanConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(OceanConfig::from_json(&json).unwrap(), config);
    }
}
