//! Gesture-driven menu screens
//!
//! Menus are navigated by holding a thumbs up or thumbs down in front of the
//! camera. A gesture only counts once it has been held continuously for the
//! configured time, so a hand passing through the frame does nothing.

use crate::consts::{THUMB_DOWN, THUMB_UP};
use crate::perception::GestureResult;
use crate::tuning::Tuning;

/// Where the app should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Home screen thumbs up
    StartGame,
    /// A ball overgrew
    GameOver { score: u64 },
    /// Game-over screen thumbs up
    Restart,
    /// Game-over screen thumbs down or inactivity
    Home,
}

/// Progress of a hold-to-confirm gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Holding { remaining_ms: u64 },
    Confirmed,
}

/// Tracks how long one gesture has been held
#[derive(Debug, Clone)]
pub struct GestureHold {
    label: &'static str,
    hold_ms: u64,
    since: Option<u64>,
}

impl GestureHold {
    pub fn new(label: &'static str, hold_ms: u64) -> Self {
        Self {
            label,
            hold_ms,
            since: None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn reset(&mut self) {
        self.since = None;
    }

    /// Feed this frame's recognition result
    pub fn update(&mut self, gestures: &GestureResult, min_score: f32, now_ms: u64) -> HoldState {
        if !gestures.matches(self.label, min_score) {
            self.since = None;
            return HoldState::Idle;
        }

        let since = *self.since.get_or_insert(now_ms);
        let held = now_ms.saturating_sub(since);
        if held >= self.hold_ms {
            HoldState::Confirmed
        } else {
            HoldState::Holding {
                remaining_ms: self.hold_ms - held,
            }
        }
    }

    /// Whole seconds left for the on-screen countdown
    pub fn seconds_left(&self, now_ms: u64) -> Option<u64> {
        let since = self.since?;
        let remaining = self.hold_ms.saturating_sub(now_ms.saturating_sub(since));
        Some(remaining.div_ceil(1000))
    }
}

/// Home screen: hold a thumbs up to start, with a 3-2-1 overlay while held
#[derive(Debug, Clone)]
pub struct HomeScreen {
    thumbs_up: GestureHold,
    min_score: f32,
}

impl HomeScreen {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            thumbs_up: GestureHold::new(THUMB_UP, tuning.start_hold_ms),
            min_score: tuning.gesture_confidence,
        }
    }

    pub fn frame(&mut self, gestures: &GestureResult, now_ms: u64) -> Option<Navigation> {
        match self.thumbs_up.update(gestures, self.min_score, now_ms) {
            HoldState::Confirmed => {
                self.thumbs_up.reset();
                Some(Navigation::StartGame)
            }
            _ => None,
        }
    }

    /// Countdown to show while the thumbs up is held
    pub fn countdown(&self, now_ms: u64) -> Option<u64> {
        self.thumbs_up.seconds_left(now_ms)
    }
}

/// Game-over screen: thumbs up plays again, thumbs down (or walking away) goes home
#[derive(Debug, Clone)]
pub struct GameOverScreen {
    score: u64,
    thumbs_up: GestureHold,
    thumbs_down: GestureHold,
    min_score: f32,
    inactivity_timeout_ms: u64,
    last_activity_ms: u64,
}

impl GameOverScreen {
    pub fn new(score: u64, tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            score,
            thumbs_up: GestureHold::new(THUMB_UP, tuning.gesture_hold_ms),
            thumbs_down: GestureHold::new(THUMB_DOWN, tuning.gesture_hold_ms),
            min_score: tuning.gesture_confidence,
            inactivity_timeout_ms: tuning.inactivity_timeout_ms,
            last_activity_ms: now_ms,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn frame(&mut self, gestures: &GestureResult, now_ms: u64) -> Option<Navigation> {
        if gestures.any_confident(self.min_score) {
            self.last_activity_ms = now_ms;
        }

        let up = self.thumbs_up.update(gestures, self.min_score, now_ms);
        let down = self.thumbs_down.update(gestures, self.min_score, now_ms);

        if up == HoldState::Confirmed {
            return Some(Navigation::Restart);
        }
        if down == HoldState::Confirmed {
            return Some(Navigation::Home);
        }
        if now_ms.saturating_sub(self.last_activity_ms) >= self.inactivity_timeout_ms {
            log::info!("No gestures for {}ms, returning home", self.inactivity_timeout_ms);
            return Some(Navigation::Home);
        }
        None
    }
}
