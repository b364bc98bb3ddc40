//! Rendering module
//!
//! The simulation never draws. Each frame the current screen is captured into a
//! read-only `Snapshot` (overlay text plus a list of draw commands), which the
//! page executes on a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{DrawCmd, HAND_CONNECTIONS};

use serde::Serialize;

use crate::app::{App, Screen};
use crate::game::{CountdownDisplay, Game};
use crate::perception::HandPose;
use crate::settings::Settings;

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub screen: &'static str,
    pub score: u64,
    /// Big overlay text during the pre-game countdown
    pub countdown: Option<String>,
    /// Seconds left on a held menu gesture
    pub hold_seconds: Option<u64>,
    pub too_close: bool,
    pub commands: Vec<DrawCmd>,
}

impl Snapshot {
    pub fn capture(app: &App, hands: &[HandPose], settings: &Settings, now_ms: u64) -> Self {
        let mut snapshot = match app.screen() {
            Screen::Playing(game) => Self::of_game(game, settings),
            Screen::Home(home) => Self::empty("home", 0, home.countdown(now_ms)),
            Screen::GameOver(screen) => Self::empty("game_over", screen.score(), None),
        };

        if settings.show_skeleton {
            for hand in hands {
                shapes::hand_skeleton(hand, app.canvas(), &mut snapshot.commands);
            }
        }
        snapshot
    }

    /// Balls under pop effects, in spawn and creation order
    pub fn of_game(game: &Game, settings: &Settings) -> Self {
        let state = game.state();
        let particles = settings.effective_particles();

        let mut commands = Vec::with_capacity(state.balls.len() + state.effects.len());
        commands.extend(state.balls.iter().map(shapes::ball));
        for effect in &state.effects {
            shapes::pop_effect(effect, particles, &mut commands);
        }

        let countdown = game.countdown().map(|c| match c {
            CountdownDisplay::Number(n) => n.to_string(),
            CountdownDisplay::Go => "GO!".to_string(),
        });

        Self {
            screen: "playing",
            score: state.score,
            countdown,
            hold_seconds: None,
            too_close: state.proximity.is_too_close(),
            commands,
        }
    }

    fn empty(screen: &'static str, score: u64, hold_seconds: Option<u64>) -> Self {
        Self {
            screen,
            score,
            countdown: None,
            hold_seconds,
            too_close: false,
            commands: Vec::new(),
        }
    }
}
