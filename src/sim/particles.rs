//! Dash trail particles
//!
//! Purely cosmetic. Displacement each update is `vel * lifetime`, so a
//! particle drifts fast when fresh and slows down as it fades out.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Span};
use crate::random_unit_vec2;

/// A single trail marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub lifetime: f32,
}

impl Particle {
    pub fn is_dead(&self) -> bool {
        self.lifetime <= 0.0
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * self.lifetime;
        self.lifetime -= dt;
    }
}

/// Owns every live trail particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailSystem {
    pub particles: Vec<Particle>,
    jitter: f32,
    speed: f32,
    lifetime: Span,
}

impl TrailSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            particles: Vec::new(),
            jitter: config.trail_jitter,
            speed: config.particle_speed,
            lifetime: config.particle_lifetime,
        }
    }

    /// Drop one particle near `origin`
    pub fn spawn<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        let pos = origin + random_unit_vec2(rng) * self.jitter;
        let vel = random_unit_vec2(rng) * self.speed;
        let lifetime = self.lifetime.sample(rng);
        self.particles.push(Particle { pos, vel, lifetime });
    }

    /// Move, age, then drop expired particles
    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.update(dt);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
