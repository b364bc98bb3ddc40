//! Pop effects: particle bursts left behind by popped balls

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Particle, PopEffect, Rgb};
use crate::tuning::Tuning;

impl PopEffect {
    /// Build a burst for a ball that was just popped.
    ///
    /// Bigger balls give more particles (`floor(radius * density)`), every
    /// particle flies off in a random direction.
    pub fn from_ball<R: Rng>(ball: &Ball, tuning: &Tuning, rng: &mut R) -> Self {
        let count = (ball.radius * tuning.particle_density).floor().max(0.0) as usize;
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let speed = rng.random_range(tuning.particle_speed_min..tuning.particle_speed_max);
                Particle {
                    pos: ball.pos,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    size: rng.random_range(tuning.particle_size_min..tuning.particle_size_max),
                    alpha: rng.random_range(tuning.particle_alpha_min..tuning.particle_alpha_max),
                }
            })
            .collect();

        Self {
            pos: ball.pos,
            initial_radius: ball.radius,
            lifetime: tuning.pop_lifetime_ticks,
            max_lifetime: tuning.pop_lifetime_ticks,
            color: ball.color.unwrap_or(Rgb::MAGENTA),
            particles,
        }
    }

    /// Remaining lifetime as a fraction of the total, 1.0 when fresh
    pub fn life_ratio(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }

    /// Opacity of the expanding ring overlay
    pub fn ring_alpha(&self) -> f32 {
        0.7 * self.life_ratio()
    }

    /// Radius of the expanding ring overlay (grows to twice the ball)
    pub fn ring_radius(&self) -> f32 {
        self.initial_radius * (2.0 - self.life_ratio())
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }
}

/// Advance every effect by one tick and drop the ones that ran out
pub fn advance(effects: &mut Vec<PopEffect>, tuning: &Tuning) {
    for i in (0..effects.len()).rev() {
        let effect = &mut effects[i];
        effect.lifetime = effect.lifetime.saturating_sub(1);

        for particle in &mut effect.particles {
            particle.pos += particle.vel;
            particle.alpha = (particle.alpha - tuning.particle_fade).max(0.0);
            // Gravity
            particle.vel.y += tuning.particle_gravity;
        }

        if effect.is_expired() {
            effects.remove(i);
        }
    }
}
