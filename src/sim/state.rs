//! Game state and core simulation types
//!
//! A `GameState` is owned by exactly one controller and passed by `&mut` into
//! each simulation step. Nothing in here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::proximity::ProximityMonitor;
use crate::Canvas;
use crate::tuning::Tuning;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fallback burst color for a ball that never got one
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blue for small balls, red for large ones, linear over `[min, max]`
    pub fn for_radius(radius: f32, min: f32, max: f32) -> Self {
        let ratio = ((radius - min) / (max - min)).clamp(0.0, 1.0);
        let red = (ratio * 255.0).floor() as u8;
        let blue = ((1.0 - ratio) * 255.0).floor() as u8;
        Self::new(red, 0, blue)
    }

    /// CSS `rgb(r, g, b)` string
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// CSS `rgba(r, g, b, a)` string
    pub fn css_alpha(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// A growing circular target
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    /// Center in canvas pixels
    pub pos: Vec2,
    pub radius: f32,
    /// Radius gained per frame
    pub growth_rate: f32,
    /// Display color, refreshed on every growth step
    pub color: Option<Rgb>,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, radius: f32, growth_rate: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            growth_rate,
            color: None,
        }
    }
}

/// One fragment of a pop effect
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Opacity in [0, 1], only ever decreases
    pub alpha: f32,
}

/// A particle burst marking a popped ball
#[derive(Debug, Clone, PartialEq)]
pub struct PopEffect {
    pub pos: Vec2,
    /// Radius of the ball at the moment it popped
    pub initial_radius: f32,
    pub lifetime: u32,
    pub max_lifetime: u32,
    /// Shared by every particle of this burst
    pub color: Rgb,
    pub particles: Vec<Particle>,
}

/// Things that happened during a simulation step, for audio/UI/navigation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Countdown shows a number
    Countdown(u32),
    /// Countdown shows "GO!"
    CountdownGo,
    /// Countdown finished, the spawn scheduler is running
    SpawningStarted,
    /// New balls entered the field
    BallsSpawned { count: usize },
    /// A hand popped a ball
    BallPopped { ball_id: u32, pos: Vec2, radius: f32 },
    /// Score changed (UI pulses the label)
    ScoreChanged { score: u64 },
    /// A ball overgrew; the game is lost
    GameOver { score: u64 },
    /// Player is too close to the camera
    ProximityWarning,
    /// Player stepped back
    ProximityCleared,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub canvas: Canvas,
    /// Balls popped so far
    pub score: u64,
    /// Set once, never cleared
    pub game_over: bool,
    /// Delay until the next spawn batch
    pub spawn_interval_ms: f64,
    /// Baseline growth rate added to each new ball
    pub growth_modifier: f32,
    /// Live balls in spawn order
    pub balls: Vec<Ball>,
    /// Live pop effects in creation order
    pub effects: Vec<PopEffect>,
    pub proximity: ProximityMonitor,
    /// Frames simulated
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, canvas: Canvas, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            canvas,
            score: 0,
            game_over: false,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            growth_modifier: tuning.initial_growth_modifier,
            balls: Vec::new(),
            effects: Vec::new(),
            proximity: ProximityMonitor::default(),
            time_ticks: 0,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a ball directly, bypassing the spawn rules
    pub fn insert_ball(&mut self, pos: Vec2, radius: f32, growth_rate: f32) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, pos, radius, growth_rate));
        id
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }
}
