//! Headless ocean runner
//!
//! Drives the full update/draw loop against a recording surface with a
//! scripted pointer circling the screen, then prints the session stats.
//!
//! Usage:
//!   cargo run --release -- --frames 3600 --seed 7
//!   RUST_LOG=debug cargo run -- --frames 300 --json

use std::f32::consts::TAU;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use infinite_ocean::renderer::{RecordingSurface, SceneRenderer};
use infinite_ocean::sim::{GameStats, Viewport};
use infinite_ocean::{FrameOrchestrator, FrameSchedule, OceanConfig};

/// Ticks for one lap of the scripted pointer
const LAP_TICKS: f32 = 900.0;
const PROGRESS_EVERY: u64 = 600;

#[derive(Parser, Debug)]
#[command(name = "infinite-ocean")]
#[command(about = "Run the infinite ocean simulation headless and report what the shark ate")]
struct Args {
    /// Frames to simulate (one tick per frame)
    #[arg(long, default_value_t = 1800)]
    frames: u64,

    /// RNG seed for world generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 1024.0)]
    width: f32,

    #[arg(long, default_value_t = 768.0)]
    height: f32,

    /// JSON tuning file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    frames: u64,
    failed_frames: u64,
    ticks: u64,
    stats: GameStats,
    growth_factor: f32,
    shark_size: Vec2,
    scroll_offset: Vec2,
    fish: usize,
    seaweed: usize,
    particles: usize,
    draw_commands: usize,
}

/// Pointer position for frame `i`: a slow circle around the screen center
fn scripted_pointer(viewport: Viewport, i: u64) -> Vec2 {
    let radius = viewport.width.min(viewport.height) * 0.4;
    let theta = (i as f32 / LAP_TICKS) * TAU;
    viewport.center() + Vec2::new(theta.cos(), theta.sin()) * radius
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    anyhow::ensure!(
        args.width > 0.0 && args.height > 0.0,
        "viewport must be positive, got {}x{}",
        args.width,
        args.height
    );

    let config = match &args.config {
        Some(path) => OceanConfig::load(path)?,
        None => OceanConfig::default(),
    };

    let viewport = Viewport::new(args.width, args.height);
    let renderer = SceneRenderer::new(RecordingSurface::new());
    let mut ocean = FrameOrchestrator::new(config, viewport, args.seed, renderer);
    log::info!("Infinite Ocean (headless) running {} frames", args.frames);

    for i in 0..args.frames {
        let target = scripted_pointer(viewport, i);
        ocean.pointer_moved(target.x, target.y);

        if let FrameSchedule::RetryAfter(delay) = ocean.run_frame() {
            thread::sleep(delay);
        }

        if (i + 1) % PROGRESS_EVERY == 0 {
            let state = ocean.state();
            log::info!(
                "Frame {}: eaten {}, growth {:.3}, {} fish / {} seaweed loaded",
                i + 1,
                state.stats.fish_eaten,
                state.shark.growth_factor,
                state.fish.len(),
                state.seaweed.len()
            );
        }
    }

    let state = ocean.state();
    let summary = Summary {
        seed: args.seed,
        frames: ocean.frames(),
        failed_frames: ocean.failed_frames(),
        ticks: state.time_ticks,
        stats: state.stats,
        growth_factor: state.shark.growth_factor,
        shark_size: Vec2::new(state.shark.width, state.shark.height),
        scroll_offset: state.world.offset,
        fish: state.fish.len(),
        seaweed: state.seaweed.len(),
        particles: state.particles.len(),
        draw_commands: ocean.renderer().surface().commands().len(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!("=== OCEAN SUMMARY ===");
        println!("  Seed:         {}", summary.seed);
        println!("  Frames:       {} ({} failed)", summary.frames, summary.failed_frames);
        println!(
            "  Fish eaten:   {} ({} slow, {} fast)",
            summary.stats.fish_eaten, summary.stats.slow_fish_eaten, summary.stats.fast_fish_eaten
        );
        println!(
            "  Shark:        {:.1}x{:.1} (growth {:.3})",
            summary.shark_size.x, summary.shark_size.y, summary.growth_factor
        );
        println!(
            "  Loaded:       {} fish, {} seaweed, {} particles",
            summary.fish, summary.seaweed, summary.particles
        );
        println!("  Last frame:   {} draw commands", summary.draw_commands);
    }

    Ok(())
}
