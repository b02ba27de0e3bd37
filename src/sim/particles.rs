//! Blood cloud particles spawned when a fish is eaten

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::random::{between, jitter};
use super::state::BloodParticle;
use crate::config::ParticleConfig;
use crate::consts::*;
use crate::heading_vector;

impl BloodParticle {
    /// Fraction of life already spent, in `[0, 1]`
    pub fn life_progress(&self) -> f32 {
        (1.0 - self.life).clamp(0.0, 1.0)
    }

    /// Size envelope: swell to 115% over the first 30% of life, then shrink to nothing
    pub fn envelope_size(&self) -> f32 {
        let progress = self.life_progress();
        if progress < BLOOD_GROW_PHASE {
            self.max_size * (1.0 + progress * 0.5)
        } else {
            let shrink = (progress - BLOOD_GROW_PHASE) / (1.0 - BLOOD_GROW_PHASE);
            self.max_size * BLOOD_PEAK_SCALE * (1.0 - shrink)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Particles in one burst for a fish of `fish_size`
pub fn burst_count(fish_size: f32, config: &ParticleConfig) -> usize {
    (config.burst_base + (fish_size / 2.0).floor() as usize).min(config.burst_max)
}

/// Spray a ring of particles outward from `at`
pub fn spawn_blood_burst<R: Rng + ?Sized>(
    particles: &mut Vec<BloodParticle>,
    rng: &mut R,
    at: Vec2,
    fish_size: f32,
    config: &ParticleConfig,
) {
    let count = burst_count(fish_size, config);
    particles.reserve(count);

    for i in 0..count {
        let angle = TAU * i as f32 / count as f32 + jitter(rng);
        let speed = between(rng, BLOOD_SPEED_MIN, BLOOD_SPEED_RANGE);
        let size = between(rng, BLOOD_SIZE_MIN, BLOOD_SIZE_RANGE);
        let spread = Vec2::new(jitter(rng), jitter(rng)) * fish_size * 0.5;

        particles.push(BloodParticle {
            pos: at + spread,
            vel: heading_vector(angle) * speed,
            size,
            max_size: size,
            life: 1.0,
            max_life: between(rng, BLOOD_LIFE_MIN, BLOOD_LIFE_RANGE),
            age: 0,
            gravity: between(rng, BLOOD_GRAVITY_MIN, BLOOD_GRAVITY_RANGE),
            fade_rate: 0.99 - rng.random::<f32>() * 0.01,
        });
    }
}

/// Drift, sink, age and cull every particle
pub fn update_particles<R: Rng + ?Sized>(particles: &mut Vec<BloodParticle>, rng: &mut R) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += p.gravity;
        p.vel *= BLOOD_DRAG;
        p.vel += Vec2::new(jitter(rng), jitter(rng)) * BLOOD_DRIFT;

        // Derived from age so a whole-tick lifespan ends on exactly that tick
        p.age += 1;
        p.life = 1.0 - p.age as f32 / p.max_life;
        p.size = p.envelope_size();
    }
    particles.retain(BloodParticle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(max_life: f32) -> BloodParticle {
        BloodParticle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 2.0,
            max_size: 2.0,
            life: 1.0,
            max_life,
            age: 0,
            gravity: 0.0075,
            fade_rate: 0.985,
        }
    }

    #[test]
    fn test_burst_count_caps_at_twenty() {
        let config = ParticleConfig::default();
        assert_eq!(burst_count(6.0, &config), 15);
        assert_eq!(burst_count(15.9, &config), 19);
        assert_eq!(burst_count(18.0, &config), 20);
        assert_eq!(burst_count(40.0, &config), 20);
    }

    #[test]
    fn test_burst_particles_in_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_blood_burst(&mut particles, &mut rng, Vec2::new(50.0, 60.0), 12.0, &ParticleConfig::default());
        assert_eq!(particles.len(), 18);
        for p in &particles {
            let speed = p.vel.length();
            assert!(speed > 0.3 - 1e-5 && speed < 0.7 + 1e-5);
            assert!((1.5..=4.5).contains(&p.size));
            assert!((120.0..=180.0).contains(&p.max_life));
            assert!((0.005..=0.01).contains(&p.gravity));
            assert!((p.pos - Vec2::new(50.0, 60.0)).abs().max_element() <= 3.0);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_particle_dies_on_its_last_tick() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = vec![particle(120.0)];
        for _ in 0..119 {
            update_particles(&mut particles, &mut rng);
        }
        assert_eq!(particles.len(), 1);
        assert!(particles[0].life > 0.0);

        update_particles(&mut particles, &mut rng);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_size_envelope() {
        let mut p = particle(100.0);
        p.life = 1.0;
        assert_eq!(p.envelope_size(), 2.0);
        p.life = 0.7;
        assert!((p.envelope_size() - 2.3).abs() < 1e-5);
        p.life = 0.35;
        assert!((p.envelope_size() - 2.3 * 0.5).abs() < 1e-5);
        p.life = 0.0;
        assert!(p.envelope_size().abs() < 1e-5);
    }

    #[test]
    fn test_particles_sink() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = vec![particle(180.0)];
        for _ in 0..100 {
            update_particles(&mut particles, &mut rng);
        }
        assert!(particles[0].pos.y > 0.0);
    }
}
