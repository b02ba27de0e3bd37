//! Frame orchestration
//!
//! One frame = one simulation tick followed by one draw. A failure anywhere in
//! the frame (renderer error or panic) is logged and the host is asked to wait
//! a moment before the next frame instead of spinning on the failure.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::anyhow;

use crate::config::OceanConfig;
use crate::renderer::Renderer;
use crate::sim::{SimulationState, TickReport, Viewport, tick};

/// When the host should run the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSchedule {
    /// On the next display refresh
    NextFrame,
    /// After a short delay, because this frame failed
    RetryAfter(Duration),
}

/// Owns the session state and the renderer, and drives both once per refresh
pub struct FrameOrchestrator<R: Renderer> {
    state: SimulationState,
    renderer: R,
    frames: u64,
    failed_frames: u64,
    last_report: TickReport,
}

impl<R: Renderer> FrameOrchestrator<R> {
    pub fn new(config: OceanConfig, viewport: Viewport, seed: u64, renderer: R) -> Self {
        log::info!("Starting ocean session with seed {}", seed);
        Self {
            state: SimulationState::new(config, viewport, seed),
            renderer,
            frames: 0,
            failed_frames: 0,
            last_report: TickReport::default(),
        }
    }

    /// Update then draw. Never propagates a failure.
    pub fn run_frame(&mut self) -> FrameSchedule {
        self.frames += 1;

        let state = &mut self.state;
        let renderer = &mut self.renderer;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let report = tick(state);
            renderer.render(&state.view())?;
            Ok::<_, anyhow::Error>(report)
        }))
        .unwrap_or_else(|payload| Err(anyhow!("frame panicked: {}", panic_message(&*payload))));

        match outcome {
            Ok(report) => {
                self.last_report = report;
                FrameSchedule::NextFrame
            }
            Err(err) => {
                self.failed_frames += 1;
                let delay = self.state.config.frame.retry_delay();
                log::error!(
                    "Frame {} failed, retrying in {}ms: {:#}",
                    self.frames,
                    delay.as_millis(),
                    err
                );
                FrameSchedule::RetryAfter(delay)
            }
        }
    }

    /// New drawable size; reinitializes the session
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport);
    }

    /// Start over with fresh entities, shark and counters
    pub fn reset(&mut self) {
        log::info!("Session reset");
        self.state.initialize();
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.state.pointer.pointer_moved(x, y);
    }

    pub fn pointer_entered(&mut self) {
        self.state.pointer.pointer_entered();
    }

    pub fn pointer_left(&mut self) {
        self.state.pointer.pointer_left();
    }

    pub fn touch(&mut self, x: f32, y: f32) {
        self.state.pointer.touch(x, y);
    }

    pub fn touch_ended(&mut self) {
        self.state.pointer.touch_ended();
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Frames attempted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }

    /// Report from the last successful frame
    pub fn last_report(&self) -> TickReport {
        self.last_report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
