//! Small sampling helpers over the session RNG

use rand::Rng;

/// Uniform sample in `[min, min + range)`
#[inline]
pub fn between<R: Rng + ?Sized>(rng: &mut R, min: f32, range: f32) -> f32 {
    min + rng.random::<f32>() * range
}

/// Uniform sample in `[-0.5, 0.5)`
#[inline]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() - 0.5
}

/// Uniform angle in `[0, 2π)`
#[inline]
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * std::f32::consts::TAU
}

/// Mostly-horizontal swim direction: left or right with a small tilt
pub fn horizontal_direction<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let base = if rng.random::<f32>() > 0.5 {
        0.0
    } else {
        std::f32::consts::PI
    };
    base + jitter(rng) * 0.3
}
