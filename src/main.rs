//! Hand Pop entry point
//!
//! On the web the page owns the camera and the hand detector. It constructs a
//! `WebApp` once and calls `frame` for every video frame with the detector's
//! JSON result. Natively there is no camera, so a scripted player runs one
//! game headless.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use hand_pop::audio::{AudioManager, PopVoices};
    use hand_pop::perception::PerceptionFrame;
    use hand_pop::renderer::{CanvasRenderer, Snapshot};
    use hand_pop::sim::GameEvent;
    use hand_pop::{App, Canvas, Settings, Tuning};

    /// How long the score label pulses after a change
    const SCORE_PULSE_MS: f64 = 300.0;

    /// Browser-facing game instance
    #[wasm_bindgen]
    pub struct WebApp {
        app: App,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        voices: PopVoices,
        settings: Settings,
        document: Option<Document>,
        pulse_until: Option<f64>,
        last_screen: &'static str,
    }

    #[wasm_bindgen]
    impl WebApp {
        /// `tuning_json` may be empty to use the built-in balance
        #[wasm_bindgen(constructor)]
        pub fn new(canvas_id: &str, tuning_json: Option<String>) -> WebApp {
            let document = web_sys::window().and_then(|w| w.document());
            let canvas = document
                .as_ref()
                .and_then(|d| d.get_element_by_id(canvas_id))
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
            if canvas.is_none() {
                log::error!("Canvas #{} not found - nothing will be drawn", canvas_id);
            }

            let renderer = canvas.and_then(CanvasRenderer::new);
            let size = renderer
                .as_ref()
                .map(|r| Canvas::new(r.size().0, r.size().1))
                .unwrap_or_default();

            let tuning = Tuning::from_json_or_default(tuning_json.as_deref().filter(|s| !s.is_empty()));
            let settings = Settings::load();
            let seed = js_sys::Date::now() as u64;
            log::info!("Hand Pop ready ({}x{}, seed {})", size.width, size.height, seed);

            WebApp {
                app: App::new(seed, size, tuning),
                renderer,
                audio: AudioManager::new(&settings),
                voices: PopVoices::new(seed),
                settings,
                document,
                pulse_until: None,
                last_screen: "home",
            }
        }

        /// Run one frame with the detector's result for the current video frame
        pub fn frame(&mut self, now_ms: f64, perception_json: &str) {
            let mut perception = match PerceptionFrame::from_json(perception_json) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Bad perception payload: {}", e);
                    PerceptionFrame::default()
                }
            };

            let out = self.app.frame(now_ms as u64, &mut perception);

            for event in &out.events {
                if let Some(sound) = self.voices.sound_for(event) {
                    self.audio.play(sound);
                }
                if let GameEvent::ScoreChanged { .. } = event {
                    if self.settings.effective_score_pulse() {
                        self.pulse_until = Some(now_ms + SCORE_PULSE_MS);
                    }
                }
            }

            let snapshot = Snapshot::capture(&self.app, &out.hands, &self.settings, now_ms as u64);
            if let Some(renderer) = &self.renderer {
                renderer.draw(&snapshot.commands);
            }
            self.update_dom(&snapshot, now_ms);
        }

        /// Replace and persist player settings (JSON)
        pub fn set_settings(&mut self, json: &str) {
            match Settings::from_json(json) {
                Ok(settings) => {
                    settings.save();
                    self.audio.apply(&settings);
                    self.settings = settings;
                }
                Err(e) => log::warn!("Ignoring settings: {}", e),
            }
        }

        /// Page is going away
        pub fn shutdown(&mut self) {
            self.app.shutdown();
        }
    }

    impl WebApp {
        fn update_dom(&mut self, snapshot: &Snapshot, now_ms: f64) {
            let Some(document) = &self.document else {
                return;
            };

            if snapshot.screen != self.last_screen {
                for (id, screen) in [("home", "home"), ("hud", "playing"), ("game-over", "game_over")] {
                    set_hidden(document, id, snapshot.screen != screen);
                }
                self.last_screen = snapshot.screen;
            }

            set_text(document, "score", &snapshot.score.to_string());
            set_text(document, "final-score", &snapshot.score.to_string());
            set_text(document, "countdown", snapshot.countdown.as_deref().unwrap_or(""));
            set_text(
                document,
                "hold-countdown",
                &snapshot.hold_seconds.map(|s| s.to_string()).unwrap_or_default(),
            );
            set_hidden(document, "warning", !snapshot.too_close);

            let pulsing = self.pulse_until.is_some_and(|until| now_ms < until);
            if !pulsing {
                self.pulse_until = None;
            }
            if let Some(el) = document.get_element_by_id("score") {
                let classes = el.class_list();
                let _ = if pulsing {
                    classes.add_1("pulse")
                } else {
                    classes.remove_1("pulse")
                };
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Hand Pop starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hand Pop (native) starting...");
    log::info!("Native mode has no camera - run with `trunk serve` for the web version");

    println!("\nRunning scripted demo...");
    let score = headless_demo(42);
    println!("✓ Demo finished with score {}", score);
}

/// Start a game with a held thumbs up, then sweep one hand across the field
/// until a ball overgrows. Returns the final score.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64) -> u64 {
    use hand_pop::consts::THUMB_UP;
    use hand_pop::menu::Navigation;
    use hand_pop::perception::{GestureResult, HandPose, PerceptionFrame, ScriptedPerception};
    use hand_pop::renderer::Snapshot;
    use hand_pop::{App, Canvas, Settings, Tuning};

    const FRAME_MS: u64 = 16;
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    let mut app = App::new(seed, Canvas::default(), Tuning::default());
    let settings = Settings::load();
    let mut perception = ScriptedPerception::default();

    for frame in 0..MAX_FRAMES {
        let now = frame * FRAME_MS;

        // Sweep a lazy figure-eight that only reaches part of the field
        let t = now as f32 / 1000.0;
        let hand = HandPose::uniform(0.5 + 0.3 * (t * 0.9).sin(), 0.5 + 0.25 * (t * 1.7).sin());
        let gestures = if app.game().is_none() {
            GestureResult::single(THUMB_UP, 0.9)
        } else {
            GestureResult::default()
        };
        perception.push(PerceptionFrame::new(vec![hand], gestures));

        let out = app.frame(now, &mut perception);
        for event in &out.events {
            log::debug!("{:?}", event);
        }

        match out.navigation {
            Some(Navigation::GameOver { score }) => {
                let snapshot = Snapshot::capture(&app, &out.hands, &settings, now);
                log::info!(
                    "Game over after {:.1}s on screen {}",
                    now as f32 / 1000.0,
                    snapshot.screen
                );
                return score;
            }
            Some(nav) => log::info!("{:?}", nav),
            None => {}
        }
    }

    log::warn!("Demo hit the frame limit");
    app.game().map(|g| g.state().score).unwrap_or_default()
}
