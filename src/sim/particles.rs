//! Ball trail particles
//!
//! Fixed-size pool; dead particles are recycled round-robin starting from the
//! most recently used slot.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Body;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec4,
    /// Seconds left; dead at <= 0
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticleGenerator {
    pub fn new(amount: usize) -> Self {
        Self {
            particles: vec![Particle::default(); amount],
            last_used: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Emit `new_particles` at `body` (shifted by `offset`), then age the pool
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        body: &Body,
        new_particles: usize,
        offset: Vec2,
        rng: &mut R,
    ) {
        if self.particles.is_empty() {
            return;
        }

        for _ in 0..new_particles {
            let slot = self.first_unused();
            let particle = &mut self.particles[slot];
            let jitter = rng.random_range(-50..50) as f32 / 10.0;
            let shade = 0.5 + rng.random_range(0..100) as f32 / 100.0;
            particle.position = body.position + Vec2::splat(jitter) + offset;
            particle.color = Vec4::new(shade, shade, shade, 1.0);
            particle.life = 1.0;
            particle.velocity = body.velocity * 0.1;
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            if particle.is_alive() {
                particle.position -= particle.velocity * dt;
                particle.color.w -= dt * 2.5;
            }
        }
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        for particle in &mut self.particles {
            particle.life = 0.0;
        }
        self.last_used = 0;
    }

    fn first_unused(&mut self) -> usize {
        let found = (self.last_used..self.particles.len())
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        // All alive: overwrite the first one
        self.last_used = found.unwrap_or(0);
        self.last_used
    }
}
