use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{Layer, RenderQueue, Source};

/// Golden angle in degrees; successive particles fan out evenly without a RNG.
const GOLDEN_ANGLE: f32 = 137.507_77;

/// Emitter settings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmitterConfig {
    /// World-space spawn point.
    pub position: Vec2,
    /// Particles spawned per second.
    pub rate: f32,
    /// Seconds a particle lives.
    pub lifetime: f32,
    /// Initial speed in pixels per second.
    pub speed: f32,
    /// Circle radius at spawn; shrinks to half over the lifetime.
    pub radius: f32,
    pub color: Color,
    pub layer: Layer,
    /// Hard cap on live particles; spawning pauses at the cap.
    pub max_particles: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rate: 30.0,
            lifetime: 1.5,
            speed: 60.0,
            radius: 6.0,
            color: Color::white(),
            layer: Layer::new(0.0),
            max_particles: 256,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds since spawn.
    pub age: f32,
}

/// Deterministic particle emitter drawing circle outlines in world space.
///
/// Identical configs fed identical `dt` sequences produce identical frames.
#[derive(Debug, Clone)]
pub struct Emitter {
    config: EmitterConfig,
    particles: Vec<Particle>,
    spawn_debt: f32,
    spawned: u64,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config, particles: Vec::new(), spawn_debt: 0.0, spawned: 0 }
    }

    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Moves the spawn point; live particles keep their positions.
    pub fn set_position(&mut self, position: Vec2) {
        self.config.position = position;
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advances live particles by `dt` seconds, retires expired ones and
    /// spawns new ones at the configured rate.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let lifetime = self.config.lifetime;

        for p in &mut self.particles {
            p.age += dt;
            p.position = p.position + p.velocity * dt;
        }
        self.particles.retain(|p| p.age < lifetime);

        self.spawn_debt += self.config.rate.max(0.0) * dt;
        while self.spawn_debt >= 1.0 {
            self.spawn_debt -= 1.0;
            if self.particles.len() >= self.config.max_particles {
                continue;
            }
            self.spawn();
        }
    }

    fn spawn(&mut self) {
        let heading = Vec2::new(1.0, 0.0).rotated(self.spawned as f32 * GOLDEN_ANGLE);
        self.spawned += 1;
        self.particles.push(Particle {
            position: self.config.position,
            velocity: heading * self.config.speed,
            age: 0.0,
        });
    }

    /// Enqueues one circle outline per live particle.
    pub fn draw(&self, queue: &mut RenderQueue) {
        let EmitterConfig { lifetime, radius, color, layer, .. } = self.config;
        for p in &self.particles {
            let life = if lifetime > 0.0 { (1.0 - p.age / lifetime).clamp(0.0, 1.0) } else { 0.0 };
            let r = (radius * (0.5 + 0.5 * life)).max(0.0);
            queue.draw_circle_lines(p.position.x, p.position.y, r, color.faded(life), Source::Entity, layer);
        }
    }
}
