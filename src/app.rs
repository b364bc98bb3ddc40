//! Screen state machine
//!
//! Home -> Playing -> GameOver -> (Playing | Home). Exactly one screen is live
//! at a time and a `Game` only exists while its screen does, so leaving a game
//! drops every timer it owned.

use crate::Canvas;
use crate::game::Game;
use crate::menu::{GameOverScreen, HomeScreen, Navigation};
use crate::perception::{HandPose, Perception};
use crate::sim::GameEvent;
use crate::tuning::Tuning;

/// The live screen
#[derive(Debug, Clone)]
pub enum Screen {
    Home(HomeScreen),
    Playing(Game),
    GameOver(GameOverScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home(_) => "home",
            Screen::Playing(_) => "playing",
            Screen::GameOver(_) => "game_over",
        }
    }
}

/// What happened during one app frame
#[derive(Debug, Clone, Default)]
pub struct AppOutput {
    pub events: Vec<GameEvent>,
    pub navigation: Option<Navigation>,
    /// Hands seen this frame, for the skeleton overlay
    pub hands: Vec<HandPose>,
}

#[derive(Debug, Clone)]
pub struct App {
    screen: Screen,
    tuning: Tuning,
    canvas: Canvas,
    base_seed: u64,
    games_played: u64,
}

impl App {
    pub fn new(seed: u64, canvas: Canvas, tuning: Tuning) -> Self {
        Self {
            screen: Screen::Home(HomeScreen::new(&tuning)),
            tuning,
            canvas,
            base_seed: seed,
            games_played: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// The running game, if any
    pub fn game(&self) -> Option<&Game> {
        match &self.screen {
            Screen::Playing(game) => Some(game),
            _ => None,
        }
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Run one frame of whichever screen is live
    pub fn frame(&mut self, now_ms: u64, perception: &mut dyn Perception) -> AppOutput {
        let hands = perception.detect_hands();
        let mut out = AppOutput::default();

        let navigation = match &mut self.screen {
            Screen::Home(home) => {
                let gestures = perception.classify_gesture();
                home.frame(&gestures, now_ms)
            }
            Screen::Playing(game) => {
                let report = game.frame(now_ms, &hands);
                out.events = report.events;
                report.finished.map(|score| Navigation::GameOver { score })
            }
            Screen::GameOver(screen) => {
                let gestures = perception.classify_gesture();
                screen.frame(&gestures, now_ms)
            }
        };

        if let Some(nav) = navigation {
            out.events.extend(self.navigate(nav, now_ms));
        }
        out.navigation = navigation;
        out.hands = hands;
        out
    }

    /// Tear down the live screen (page unload)
    pub fn shutdown(&mut self) {
        if let Screen::Playing(game) = &mut self.screen {
            game.shutdown();
        }
    }

    fn navigate(&mut self, nav: Navigation, now_ms: u64) -> Vec<GameEvent> {
        let from = self.screen.name();
        let events = match nav {
            Navigation::StartGame | Navigation::Restart => {
                let mut game = self.new_game();
                let events = game.start(now_ms);
                self.screen = Screen::Playing(game);
                events
            }
            Navigation::GameOver { score } => {
                self.screen = Screen::GameOver(GameOverScreen::new(score, &self.tuning, now_ms));
                Vec::new()
            }
            Navigation::Home => {
                self.screen = Screen::Home(HomeScreen::new(&self.tuning));
                Vec::new()
            }
        };
        log::info!("Screen {} -> {}", from, self.screen.name());
        events
    }

    fn new_game(&mut self) -> Game {
        let seed = self.base_seed.wrapping_add(self.games_played);
        self.games_played += 1;
        Game::new(seed, self.canvas, self.tuning.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{THUMB_DOWN, THUMB_UP};
    use crate::perception::{GestureResult, PerceptionFrame, ScriptedPerception};
    use glam::Vec2;

    fn new_app() -> App {
        App::new(9, Canvas::new(640.0, 480.0), Tuning::default())
    }

    fn gesture(label: &str) -> PerceptionFrame {
        PerceptionFrame::new(Vec::new(), GestureResult::single(label, 0.9))
    }

    fn nothing() -> PerceptionFrame {
        PerceptionFrame::default()
    }

    /// Hold a gesture from `from` until `to` in 100ms frames
    fn hold(app: &mut App, label: &str, from: u64, to: u64) -> Option<Navigation> {
        let mut nav = None;
        for t in (from..=to).step_by(100) {
            let mut perception = ScriptedPerception::new([gesture(label)]);
            nav = app.frame(t, &mut perception).navigation.or(nav);
        }
        nav
    }

    fn start_game(app: &mut App) {
        assert_eq!(hold(app, THUMB_UP, 0, 3000), Some(Navigation::StartGame));
        assert!(matches!(app.screen(), Screen::Playing(_)));
    }

    #[test]
    fn test_starts_on_home() {
        let mut app = new_app();
        assert!(matches!(app.screen(), Screen::Home(_)));
        assert!(app.game().is_none());

        let out = app.frame(0, &mut ScriptedPerception::default());
        assert!(out.navigation.is_none());
        assert!(matches!(app.screen(), Screen::Home(_)));
    }

    #[test]
    fn test_thumbs_up_starts_countdown() {
        let mut app = new_app();
        let mut nav = None;
        let mut events = Vec::new();
        for t in (0..=3000).step_by(100) {
            let out = app.frame(t, &mut ScriptedPerception::new([gesture(THUMB_UP)]));
            nav = out.navigation.or(nav);
            events.extend(out.events);
        }
        assert_eq!(nav, Some(Navigation::StartGame));
        assert_eq!(events, vec![GameEvent::Countdown(3)]);
        assert_eq!(app.games_played(), 1);
    }

    #[test]
    fn test_loss_leads_to_game_over_screen() {
        let mut app = new_app();
        start_game(&mut app);

        if let Screen::Playing(game) = &mut app.screen {
            game.state_mut().insert_ball(Vec2::new(100.0, 100.0), 99.95, 0.1);
        }

        let out = app.frame(3100, &mut ScriptedPerception::new([nothing()]));
        assert!(out.events.contains(&GameEvent::GameOver { score: 0 }));
        assert!(matches!(app.screen(), Screen::Playing(_)));

        let out = app.frame(4100, &mut ScriptedPerception::new([nothing()]));
        assert_eq!(out.navigation, Some(Navigation::GameOver { score: 0 }));
        match app.screen() {
            Screen::GameOver(screen) => assert_eq!(screen.score(), 0),
            other => panic!("expected game over, got {}", other.name()),
        }
    }

    fn lose(app: &mut App, at: u64) {
        if let Screen::Playing(game) = &mut app.screen {
            game.state_mut().insert_ball(Vec2::new(100.0, 100.0), 99.95, 0.1);
        }
        app.frame(at, &mut ScriptedPerception::default());
        app.frame(at + 1000, &mut ScriptedPerception::default());
        assert!(matches!(app.screen(), Screen::GameOver(_)));
    }

    #[test]
    fn test_restart_uses_a_fresh_game() {
        let mut app = new_app();
        start_game(&mut app);
        lose(&mut app, 3100);

        assert_eq!(hold(&mut app, THUMB_UP, 5000, 7000), Some(Navigation::Restart));
        let game = app.game().unwrap();
        assert_eq!(game.state().score, 0);
        assert!(game.state().balls.is_empty());
        assert_eq!(game.state().seed, 10);
        assert_eq!(app.games_played(), 2);
    }

    #[test]
    fn test_thumbs_down_goes_home() {
        let mut app = new_app();
        start_game(&mut app);
        lose(&mut app, 3100);

        assert_eq!(hold(&mut app, THUMB_DOWN, 5000, 7000), Some(Navigation::Home));
        assert!(matches!(app.screen(), Screen::Home(_)));
    }

    #[test]
    fn test_idle_game_over_screen_goes_home() {
        let mut app = new_app();
        start_game(&mut app);
        lose(&mut app, 3100);

        // Screen was entered at 4100
        let out = app.frame(24_099, &mut ScriptedPerception::default());
        assert!(out.navigation.is_none());
        let out = app.frame(24_100, &mut ScriptedPerception::default());
        assert_eq!(out.navigation, Some(Navigation::Home));
    }

    #[test]
    fn test_hands_are_passed_through() {
        let mut app = new_app();
        let hand = crate::perception::HandPose::uniform(0.2, 0.2);
        let mut perception =
            ScriptedPerception::new([PerceptionFrame::new(vec![hand.clone()], GestureResult::default())]);
        let out = app.frame(0, &mut perception);
        assert_eq!(out.hands, vec![hand]);
    }
}
