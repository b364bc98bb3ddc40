//! Hand Pop - pop the growing balls with your hands
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball field, collisions, pop effects, timers)
//! - `game`: Single owner of a running game (countdown, spawn scheduler, frame loop)
//! - `menu`: Gesture-driven home and game-over screens
//! - `app`: Screen state machine tying everything to a perception source
//! - `perception`: Hand landmarks and gesture results from the external detector
//! - `renderer`: Read-only snapshots and draw primitives for the render sink
//! - `audio`: Sound cues for game events
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod game;
pub mod menu;
pub mod perception;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{App, Screen};
pub use game::Game;
pub use perception::{GestureResult, HandPose, Landmark, Perception};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed constants that are not balance knobs
pub mod consts {
    /// Landmarks per detected hand
    pub const LANDMARKS_PER_HAND: usize = 21;

    /// Canvas size used when the page does not report one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 640.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 480.0;

    /// Gesture labels produced by the recognizer
    pub const THUMB_UP: &str = "Thumb_Up";
    pub const THUMB_DOWN: &str = "Thumb_Down";
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(consts::DEFAULT_CANVAS_WIDTH, consts::DEFAULT_CANVAS_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scale a normalized [0,1] point to canvas pixels
    #[inline]
    pub fn to_pixels(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x * self.width, y * self.height)
    }
}
