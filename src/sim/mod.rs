//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes in from the caller, never from a wall clock
//! - Stable iteration order (spawn order)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod effects;
pub mod field;
#[cfg(test)]
mod properties;
pub mod proximity;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{detect_collisions, detect_hand_collisions, hits_circle};
pub use proximity::{ProximityChange, ProximityMonitor, closest_hand_size, hand_size};
pub use scheduler::{SchedulerPhase, SpawnScheduler};
pub use state::{Ball, GameEvent, GameState, Particle, PopEffect, Rgb};
pub use tick::{TickInput, tick};
pub use timer::{TimerHandle, Timers};
