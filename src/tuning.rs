//! Data-driven game balance
//!
//! Every gameplay number lives here so a page can override any subset of them
//! with a JSON object. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball field ===
    /// Maximum number of live balls
    pub population_cap: usize,
    /// Balls requested per spawn timer firing
    pub spawn_batch: usize,
    /// Radius range for new balls (min inclusive, max exclusive)
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    /// Growth-rate modifier of the first batch
    pub initial_growth_modifier: f32,
    /// Random growth added on top of the modifier, uniform in [0, jitter)
    pub growth_jitter: f32,
    /// Modifier increase after every batch
    pub growth_increment: f32,
    /// Ceiling for a single ball's growth rate
    pub max_growth_rate: f32,
    /// A ball larger than this ends the game
    pub game_over_radius: f32,
    /// Radius range mapped onto the blue -> red color ramp
    pub color_radius_min: f32,
    pub color_radius_max: f32,

    // === Spawn scheduler ===
    pub initial_spawn_interval_ms: f64,
    /// Interval multiplier applied after every batch
    pub spawn_interval_decay: f64,
    /// Lower bound for the shrinking interval
    pub min_spawn_interval_ms: f64,

    // === Pop effects ===
    pub pop_lifetime_ticks: u32,
    /// Particles per pixel of radius
    pub particle_density: f32,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_size_min: f32,
    pub particle_size_max: f32,
    pub particle_alpha_min: f32,
    pub particle_alpha_max: f32,
    /// Downward acceleration per tick
    pub particle_gravity: f32,
    /// Alpha lost per tick
    pub particle_fade: f32,

    // === Proximity ===
    /// Hand size (fraction of the canvas) above which the player is too close
    pub proximity_threshold: f32,
    pub warning_duration_ms: u64,

    // === Gestures and screens ===
    pub gesture_confidence: f32,
    pub gesture_hold_ms: u64,
    /// Thumbs-up hold on the home screen (longer, with a 3-2-1 overlay)
    pub start_hold_ms: u64,
    pub inactivity_timeout_ms: u64,
    /// Delay between the losing frame and the game-over screen
    pub game_over_delay_ms: u64,
    /// Countdown before balls start spawning
    pub countdown_secs: u32,
    pub countdown_step_ms: u64,
    /// How long "GO!" stays up before spawning starts
    pub countdown_go_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            population_cap: 5,
            spawn_batch: 3,
            spawn_radius_min: 20.0,
            spawn_radius_max: 40.0,
            initial_growth_modifier: 0.1,
            growth_jitter: 0.2,
            growth_increment: 0.04,
            max_growth_rate: 0.7,
            game_over_radius: 100.0,
            color_radius_min: 20.0,
            color_radius_max: 100.0,

            initial_spawn_interval_ms: 2000.0,
            spawn_interval_decay: 0.95,
            min_spawn_interval_ms: 250.0,

            pop_lifetime_ticks: 30,
            particle_density: 0.7,
            particle_speed_min: 1.0,
            particle_speed_max: 4.0,
            particle_size_min: 1.0,
            particle_size_max: 4.0,
            particle_alpha_min: 0.8,
            particle_alpha_max: 1.0,
            particle_gravity: 0.05,
            particle_fade: 0.02,

            proximity_threshold: 0.4,
            warning_duration_ms: 3000,

            gesture_confidence: 0.6,
            gesture_hold_ms: 2000,
            start_hold_ms: 3000,
            inactivity_timeout_ms: 20000,
            game_over_delay_ms: 1000,
            countdown_secs: 3,
            countdown_step_ms: 1000,
            countdown_go_ms: 800,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse an override, falling back to defaults on malformed input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        // JSON numbers past f32 range decode as infinity
        for (name, value, default) in [
            ("spawn_radius_min", &mut self.spawn_radius_min, defaults.spawn_radius_min),
            ("spawn_radius_max", &mut self.spawn_radius_max, defaults.spawn_radius_max),
            ("initial_growth_modifier", &mut self.initial_growth_modifier, defaults.initial_growth_modifier),
            ("growth_jitter", &mut self.growth_jitter, defaults.growth_jitter),
            ("growth_increment", &mut self.growth_increment, defaults.growth_increment),
            ("max_growth_rate", &mut self.max_growth_rate, defaults.max_growth_rate),
            ("game_over_radius", &mut self.game_over_radius, defaults.game_over_radius),
            ("color_radius_min", &mut self.color_radius_min, defaults.color_radius_min),
            ("color_radius_max", &mut self.color_radius_max, defaults.color_radius_max),
            ("particle_density", &mut self.particle_density, defaults.particle_density),
            ("particle_speed_min", &mut self.particle_speed_min, defaults.particle_speed_min),
            ("particle_speed_max", &mut self.particle_speed_max, defaults.particle_speed_max),
            ("particle_size_min", &mut self.particle_size_min, defaults.particle_size_min),
            ("particle_size_max", &mut self.particle_size_max, defaults.particle_size_max),
            ("particle_alpha_min", &mut self.particle_alpha_min, defaults.particle_alpha_min),
            ("particle_alpha_max", &mut self.particle_alpha_max, defaults.particle_alpha_max),
            ("particle_gravity", &mut self.particle_gravity, defaults.particle_gravity),
            ("particle_fade", &mut self.particle_fade, defaults.particle_fade),
            ("proximity_threshold", &mut self.proximity_threshold, defaults.proximity_threshold),
            ("gesture_confidence", &mut self.gesture_confidence, defaults.gesture_confidence),
        ] {
            if !value.is_finite() {
                log::warn!("{} must be finite, using {}", name, default);
                *value = default;
            }
        }
        for (name, value, default) in [
            ("initial_spawn_interval_ms", &mut self.initial_spawn_interval_ms, defaults.initial_spawn_interval_ms),
            ("spawn_interval_decay", &mut self.spawn_interval_decay, defaults.spawn_interval_decay),
            ("min_spawn_interval_ms", &mut self.min_spawn_interval_ms, defaults.min_spawn_interval_ms),
        ] {
            if !value.is_finite() {
                log::warn!("{} must be finite, using {}", name, default);
                *value = default;
            }
        }

        // Balls only ever grow
        for (name, value) in [
            ("initial_growth_modifier", &mut self.initial_growth_modifier),
            ("growth_jitter", &mut self.growth_jitter),
            ("growth_increment", &mut self.growth_increment),
            ("max_growth_rate", &mut self.max_growth_rate),
        ] {
            if *value < 0.0 {
                log::warn!("{} must not be negative, using 0", name);
                *value = 0.0;
            }
        }
        if self.game_over_radius <= 0.0 {
            log::warn!("game_over_radius must be positive, using {}", defaults.game_over_radius);
            self.game_over_radius = defaults.game_over_radius;
        }

        if self.population_cap == 0 {
            log::warn!("population_cap must be positive, using {}", defaults.population_cap);
            self.population_cap = defaults.population_cap;
        }
        if !(self.spawn_radius_min > 0.0 && self.spawn_radius_min < self.spawn_radius_max) {
            log::warn!("Invalid spawn radius range, using defaults");
            self.spawn_radius_min = defaults.spawn_radius_min;
            self.spawn_radius_max = defaults.spawn_radius_max;
        }
        if self.color_radius_min >= self.color_radius_max {
            log::warn!("Invalid color radius range, using defaults");
            self.color_radius_min = defaults.color_radius_min;
            self.color_radius_max = defaults.color_radius_max;
        }
        if !(self.spawn_interval_decay > 0.0 && self.spawn_interval_decay <= 1.0) {
            log::warn!("spawn_interval_decay must be in (0, 1], using {}", defaults.spawn_interval_decay);
            self.spawn_interval_decay = defaults.spawn_interval_decay;
        }
        if self.min_spawn_interval_ms <= 0.0 {
            log::warn!("min_spawn_interval_ms must be positive, using {}", defaults.min_spawn_interval_ms);
            self.min_spawn_interval_ms = defaults.min_spawn_interval_ms;
        }
        self.initial_spawn_interval_ms = self.initial_spawn_interval_ms.max(self.min_spawn_interval_ms);
        if self.pop_lifetime_ticks == 0 {
            self.pop_lifetime_ticks = defaults.pop_lifetime_ticks;
        }
        self.particle_density = self.particle_density.max(0.0);
        self.particle_speed_min = self.particle_speed_min.max(0.0);
        self.particle_size_min = self.particle_size_min.max(0.0);
        if self.particle_speed_min >= self.particle_speed_max {
            self.particle_speed_min = defaults.particle_speed_min;
            self.particle_speed_max = defaults.particle_speed_max;
        }
        if self.particle_size_min >= self.particle_size_max {
            self.particle_size_min = defaults.particle_size_min;
            self.particle_size_max = defaults.particle_size_max;
        }
        self.particle_alpha_min = self.particle_alpha_min.clamp(0.0, 1.0);
        self.particle_alpha_max = self.particle_alpha_max.clamp(0.0, 1.0);
        if self.particle_alpha_min >= self.particle_alpha_max {
            self.particle_alpha_min = defaults.particle_alpha_min;
            self.particle_alpha_max = defaults.particle_alpha_max;
        }
        self.particle_fade = self.particle_fade.max(0.0);
        self.gesture_confidence = self.gesture_confidence.clamp(0.0, 1.0);

        self
    }
}
