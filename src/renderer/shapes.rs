//! Outline generation for 2D primitives
//!
//! Everything here returns plain point lists in the local space of whatever is
//! being drawn; the scene applies the transform.

use glam::Vec2;

/// Points along the surface wave
pub const WAVE_STEP: f32 = 10.0;
const WAVE_FREQUENCY: f32 = 0.02;
/// Phase advance per tick (about 0.003 rad/ms at 60 Hz)
const WAVE_SPEED: f32 = 0.05;
const WAVE_AMPLITUDE: f32 = 3.0;

pub const SEAWEED_SEGMENTS: usize = 8;
const BEZIER_SEGMENTS: usize = 8;

/// Flatten a quadratic bezier into points, excluding `from`
pub fn quadratic_bezier(from: Vec2, control: Vec2, to: Vec2, segments: usize) -> Vec<Vec2> {
    (1..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}

/// Swept-back dorsal fin on top of a body of `size`, centered on the origin
pub fn dorsal_fin(size: Vec2) -> Vec<Vec2> {
    let base_width = size.x * 0.3;
    let tip = size.y * 0.4;
    let base_y = -size.y / 3.0;

    let leading = Vec2::new(base_width / 2.0, base_y);
    let mut points = vec![leading];
    points.extend(quadratic_bezier(
        leading,
        Vec2::new(base_width / 4.0, base_y - tip * 0.8),
        Vec2::new(-base_width / 3.0, base_y - tip),
        BEZIER_SEGMENTS,
    ));
    points.push(Vec2::new(-base_width / 2.0, base_y));
    points
}

/// Side fin under the body, swept back
pub fn pectoral_fin(size: Vec2) -> Vec<Vec2> {
    let length = size.x * 0.25;
    let width = size.y * 0.3;
    let forward = size.x * 0.1;
    let base_y = size.y / 4.0;

    let leading = Vec2::new(forward, base_y);
    let mut points = vec![leading];
    points.extend(quadratic_bezier(
        leading,
        Vec2::new(forward - length * 0.3, base_y + width * 0.7),
        Vec2::new(forward - length, base_y + width),
        BEZIER_SEGMENTS,
    ));
    points.push(Vec2::new(forward - length * 0.6, base_y));
    points
}

/// Shark tail triangle behind the body
pub fn shark_tail(size: Vec2) -> [Vec2; 3] {
    let rear = -size.x / 2.0;
    let length = size.x * 0.19;
    let half_height = size.y * 0.25;
    [
        Vec2::new(rear, 0.0),
        Vec2::new(rear - length, -half_height),
        Vec2::new(rear - length, half_height),
    ]
}

/// Fish tail triangle for a fish of `size`
pub fn fish_tail(size: f32) -> [Vec2; 3] {
    [
        Vec2::new(-size, 0.0),
        Vec2::new(-size * 1.5, -size * 0.4),
        Vec2::new(-size * 1.5, size * 0.4),
    ]
}

/// Animated waterline across the screen at `surface_y`
pub fn surface_wave(surface_y: f32, width: f32, scroll_x: f32, ticks: u64) -> Vec<Vec2> {
    let phase = ticks as f32 * WAVE_SPEED;
    let steps = (width / WAVE_STEP).floor() as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(Vec2::new(0.0, surface_y));
    for i in 0..=steps {
        let x = i as f32 * WAVE_STEP;
        let wave = ((x + scroll_x) * WAVE_FREQUENCY + phase).sin() * WAVE_AMPLITUDE;
        points.push(Vec2::new(x, surface_y + wave));
    }
    points
}

/// Horizontal sway of stalk joint `i` (0 at the root)
pub fn seaweed_sway(sway_phase: f32, i: usize) -> f32 {
    (sway_phase + i as f32 * 0.5).sin() * (i as f32 * 2.0)
}

/// Stalk joints from the root (`top + height`) up to the tip at `top`
pub fn seaweed_stalk(top: Vec2, height: f32, sway_phase: f32) -> Vec<Vec2> {
    let step = height / SEAWEED_SEGMENTS as f32;
    (0..=SEAWEED_SEGMENTS)
        .map(|i| {
            let x = if i == 0 { 0.0 } else { seaweed_sway(sway_phase, i) };
            Vec2::new(top.x + x, top.y + height - step * i as f32)
        })
        .collect()
}

/// Two crossing line segments centered on `at`
pub fn crosshair(at: Vec2, half_length: f32) -> [[Vec2; 2]; 2] {
    [
        [at - Vec2::new(half_length, 0.0), at + Vec2::new(half_length, 0.0)],
        [at - Vec2::new(0.0, half_length), at + Vec2::new(0.0, half_length)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_ends_on_target() {
        let points = quadratic_bezier(Vec2::ZERO, Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0), 4);
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], Vec2::new(10.0, 0.0));
        // Midpoint of a symmetric curve sits halfway to the control point
        assert_eq!(points[1], Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_fins_scale_with_body() {
        let small = dorsal_fin(Vec2::new(80.0, 40.0));
        let big = dorsal_fin(Vec2::new(160.0, 80.0));
        assert_eq!(small.len(), BEZIER_SEGMENTS + 2);
        for (s, b) in small.iter().zip(&big) {
            assert!((*s * 2.0 - *b).length() < 1e-4);
        }
        // Dorsal fin is above the body, pectoral fin below
        assert!(small.iter().all(|p| p.y < 0.0));
        assert!(pectoral_fin(Vec2::new(80.0, 40.0)).iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn test_tails_trail_behind() {
        let tail = shark_tail(Vec2::new(80.0, 40.0));
        assert_eq!(tail[0], Vec2::new(-40.0, 0.0));
        assert!((tail[1].x - (-40.0 - 15.2)).abs() < 1e-4);
        assert_eq!(tail[2].y, 10.0);

        let fish = fish_tail(10.0);
        assert_eq!(fish[1], Vec2::new(-15.0, -4.0));
    }

    #[test]
    fn test_wave_spans_screen_within_amplitude() {
        let points = surface_wave(150.0, 800.0, 0.0, 42);
        assert_eq!(points.first().map(|p| p.x), Some(0.0));
        assert_eq!(points.last().map(|p| p.x), Some(800.0));
        assert!(points.iter().all(|p| (p.y - 150.0).abs() <= 3.0 + 1e-4));
    }

    #[test]
    fn test_seaweed_stalk_root_is_still() {
        let stalk = seaweed_stalk(Vec2::new(100.0, 500.0), 40.0, 1.3);
        assert_eq!(stalk.len(), SEAWEED_SEGMENTS + 1);
        assert_eq!(stalk[0], Vec2::new(100.0, 540.0));
        assert!((stalk[SEAWEED_SEGMENTS].y - 500.0).abs() < 1e-4);
        // Sway grows toward the tip
        assert!(seaweed_sway(1.3, 8).abs() <= 16.0);
    }

    #[test]
    fn test_crosshair_arms() {
        let [h, v] = crosshair(Vec2::new(10.0, 10.0), 20.0);
        assert_eq!(h, [Vec2::new(-10.0, 10.0), Vec2::new(30.0, 10.0)]);
        assert_eq!(v, [Vec2::new(10.0, -10.0), Vec2::new(10.0, 30.0)]);
    }
}
