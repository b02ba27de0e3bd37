//! Scene drawing
//!
//! Layer order, back to front: background, ambush fish (so seaweed hides them),
//! seaweed, normal fish, shark, mouth debug, pointer crosshair, blood.

use std::f32::consts::PI;

use anyhow::Context;
use glam::Vec2;

use super::shapes::{self, SEAWEED_SEGMENTS};
use super::{Color, DrawSurface, GradientStop, Paint, Renderer};
use crate::sim::eating::{eat_radius, mouth_point};
use crate::sim::{BloodParticle, Fish, FishColor, FrameView, Seaweed, Viewport};

/// Off-screen margin before an entity is skipped
const CULL_MARGIN: f32 = 50.0;
const PARTICLE_CULL_MARGIN: f32 = 20.0;

static SKY_STOPS: [GradientStop; 2] = [
    GradientStop::new(0.0, Color::rgb(135, 206, 235)),
    GradientStop::new(1.0, Color::rgb(176, 224, 230)),
];

static WATER_STOPS: [GradientStop; 4] = [
    GradientStop::new(0.0, Color::rgb(64, 224, 208)),
    GradientStop::new(0.2, Color::rgb(30, 144, 255)),
    GradientStop::new(0.6, Color::rgb(0, 102, 204)),
    GradientStop::new(1.0, Color::rgb(0, 51, 102)),
];

static SAND_STOPS: [GradientStop; 2] = [
    GradientStop::new(0.0, Color::rgb(244, 164, 96)),
    GradientStop::new(1.0, Color::rgb(210, 105, 30)),
];

const WAVE_COLOR: Color = Color::rgba(255, 255, 255, 0.6);
const STALK_COLOR: Color = Color::rgb(34, 139, 34);
const FROND_COLOR: Color = Color::rgb(50, 205, 50);
const SHARK_BODY: Color = Color::rgb(64, 64, 64);
const SHARK_FIN: Color = Color::rgb(48, 48, 48);
const MOUTH_RING: Color = Color::rgba(255, 0, 0, 0.7);
const MOUTH_DOT: Color = Color::rgba(255, 0, 0, 0.8);
const CROSSHAIR_OUTER: Color = Color::rgba(255, 255, 255, 0.9);
const CROSSHAIR_INNER: Color = Color::rgba(255, 50, 50, 0.8);
const BLOOD: Color = Color::rgb(220, 80, 80);
const BLOOD_GLOW: Color = Color::rgb(255, 120, 120);

pub fn fish_color(color: FishColor) -> Color {
    match color {
        FishColor::Gold => Color::rgb(255, 215, 0),
        FishColor::Red => Color::rgb(255, 99, 71),
        FishColor::Green => Color::rgb(46, 204, 64),
    }
}

fn on_screen(pos: Vec2, viewport: Viewport, margin: f32) -> bool {
    pos.x > -margin
        && pos.x < viewport.width + margin
        && pos.y > -margin
        && pos.y < viewport.height + margin
}

/// Draws the ocean onto any `DrawSurface`
pub struct SceneRenderer<S: DrawSurface> {
    surface: S,
}

impl<S: DrawSurface> SceneRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn draw_background(&mut self, frame: &FrameView<'_>) {
        let width = frame.viewport.width;
        let height = frame.viewport.height;
        let surface_y = frame.world.surface_y + frame.world.offset.y;
        let floor_y = frame.world.bottom_y + frame.world.offset.y;

        let sky_top = surface_y.min(0.0);
        if surface_y > 0.0 {
            self.gradient_band(width, sky_top, surface_y, &SKY_STOPS);
        }

        let water_top = surface_y.max(0.0);
        let water_bottom = floor_y.min(height);
        if water_bottom > water_top {
            self.gradient_band(width, water_top, water_bottom, &WATER_STOPS);
        }

        let sand_top = floor_y.max(0.0);
        if height > sand_top {
            self.gradient_band(width, sand_top, height, &SAND_STOPS);
        }

        if (0.0..=height).contains(&surface_y) {
            let wave = shapes::surface_wave(surface_y, width, frame.world.offset.x, frame.time_ticks);
            self.surface.stroke_polyline(&wave, WAVE_COLOR, 2.0);
        }
    }

    fn gradient_band(&mut self, width: f32, top: f32, bottom: f32, stops: &'static [GradientStop]) {
        self.surface.fill_rect(
            Vec2::new(0.0, top),
            Vec2::new(width, bottom - top),
            Paint::VerticalGradient { top, bottom, stops },
        );
    }

    fn draw_fish(&mut self, frame: &FrameView<'_>, fish: &Fish) {
        let screen = frame.world.to_screen(fish.pos);
        if !on_screen(screen, frame.viewport, CULL_MARGIN) {
            return;
        }

        let color = fish_color(fish.color);
        let eye = Vec2::new(fish.size * 0.3, 0.0);
        let (eye_color, pupil_color) = if fish.is_ambush() {
            (Color::RED, Color::PINK)
        } else {
            (Color::WHITE, Color::BLACK)
        };

        self.surface.save();
        self.surface.translate(screen);
        self.surface.rotate(fish.heading);
        self.surface
            .fill_ellipse(Vec2::ZERO, Vec2::new(fish.size, fish.size * 0.6), color);
        self.surface.fill_polygon(&shapes::fish_tail(fish.size), color);
        self.surface.fill_circle(eye, fish.size * 0.2, eye_color);
        self.surface.fill_circle(eye, fish.size * 0.1, pupil_color);
        self.surface.restore();
    }

    fn draw_seaweed(&mut self, frame: &FrameView<'_>, seaweed: &Seaweed) {
        let top = frame.world.to_screen(seaweed.pos);
        if !on_screen(top, frame.viewport, CULL_MARGIN) {
            return;
        }

        let stalk = shapes::seaweed_stalk(top, seaweed.height, seaweed.sway_phase);
        self.surface.stroke_polyline(&stalk, STALK_COLOR, 3.0);

        let step = seaweed.height / SEAWEED_SEGMENTS as f32;
        for i in (2..SEAWEED_SEGMENTS).step_by(2) {
            let y = top.y + seaweed.height - step * i as f32;
            let x = top.x + shapes::seaweed_sway(seaweed.sway_phase, i);
            let radii = Vec2::new(6.0, 12.0);
            self.surface.fill_ellipse(Vec2::new(x - 8.0, y), radii, FROND_COLOR);
            self.surface.fill_ellipse(Vec2::new(x + 8.0, y), radii, FROND_COLOR);
        }
    }

    fn draw_shark(&mut self, frame: &FrameView<'_>) {
        let shark = frame.shark;
        let size = Vec2::new(shark.width, shark.height);
        let angle = shark.facing();

        self.surface.save();
        self.surface.translate(shark.visual_center());
        if shark.is_mirrored() {
            self.surface.scale(Vec2::new(-1.0, 1.0));
            self.surface.rotate(PI - angle);
        } else {
            self.surface.rotate(angle);
        }

        self.surface.fill_ellipse(Vec2::ZERO, size / 2.0, SHARK_BODY);
        self.surface.fill_polygon(&shapes::dorsal_fin(size), SHARK_FIN);
        self.surface.fill_polygon(&shapes::pectoral_fin(size), SHARK_FIN);
        self.surface.fill_polygon(&shapes::shark_tail(size), SHARK_BODY);

        let eye = Vec2::new(size.x * 0.25, -size.y * 0.125);
        let eye_radius = size.y * 0.1;
        self.surface.fill_circle(eye, eye_radius, Color::WHITE);
        self.surface.fill_circle(eye, eye_radius * 0.5, Color::BLACK);
        self.surface.restore();
    }

    fn draw_mouth(&mut self, frame: &FrameView<'_>) {
        let mouth = mouth_point(frame.shark, frame.world, &frame.config.shark);
        let screen = frame.world.to_screen(mouth);
        if !on_screen(screen, frame.viewport, CULL_MARGIN) {
            return;
        }
        let radius = eat_radius(frame.shark, &frame.config.shark);
        self.surface.stroke_circle(screen, radius, MOUTH_RING, 2.0);
        self.surface.fill_circle(screen, 3.0, MOUTH_DOT);
    }

    fn draw_crosshair(&mut self, at: Vec2) {
        for arm in shapes::crosshair(at, 20.0) {
            self.surface.stroke_polyline(&arm, CROSSHAIR_OUTER, 3.0);
        }
        for arm in shapes::crosshair(at, 8.0) {
            self.surface.stroke_polyline(&arm, CROSSHAIR_INNER, 2.0);
        }
        self.surface.fill_circle(at, 2.0, CROSSHAIR_OUTER);
    }

    fn draw_particle(&mut self, frame: &FrameView<'_>, particle: &BloodParticle) {
        let screen = frame.world.to_screen(particle.pos);
        if !on_screen(screen, frame.viewport, PARTICLE_CULL_MARGIN) {
            return;
        }
        let alpha = particle.life * 0.8;
        self.surface
            .fill_circle(screen, particle.size, BLOOD.with_alpha(alpha));
        self.surface
            .fill_circle(screen, particle.size * 1.5, BLOOD_GLOW.with_alpha(alpha * 0.3));
    }
}

impl<S: DrawSurface> Renderer for SceneRenderer<S> {
    fn render(&mut self, frame: &FrameView<'_>) -> anyhow::Result<()> {
        self.surface
            .clear(Vec2::new(frame.viewport.width, frame.viewport.height));
        self.draw_background(frame);

        for fish in frame.fish.iter().filter(|f| f.is_ambush()) {
            self.draw_fish(frame, fish);
        }
        for seaweed in frame.seaweed {
            self.draw_seaweed(frame, seaweed);
        }
        for fish in frame.fish.iter().filter(|f| !f.is_ambush()) {
            self.draw_fish(frame, fish);
        }

        self.draw_shark(frame);
        if frame.config.debug.show_mouth {
            self.draw_mouth(frame);
        }
        if frame.pointer.active {
            self.draw_crosshair(frame.pointer.target);
        }
        for particle in frame.particles {
            self.draw_particle(frame, particle);
        }

        self.surface.present().context("Failed to present frame")
    }
}
