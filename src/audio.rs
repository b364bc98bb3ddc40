//! Sound cues
//!
//! Every cue is a short list of oscillator notes synthesized with Web Audio.
//! Event-to-cue mapping and the note tables live here on every platform;
//! only `AudioManager` talks to the browser.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::GameEvent;

/// Pop players in rotation; all of them play the same cue
pub const POP_VOICES: u8 = 3;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball popped on one of `POP_VOICES` players
    Pop { voice: u8 },
    /// Countdown number shown
    CountdownTick,
    /// "GO!"
    CountdownGo,
    /// Camera too close
    Warning,
    /// A ball overgrew
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One oscillator note of a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start offset from the cue, in seconds
    pub at_s: f64,
    pub length_s: f64,
    pub wave: Wave,
    pub freq: f32,
    /// Pitch glided to by the end of the note
    pub end_freq: f32,
    /// Peak gain before master volume
    pub gain: f32,
}

impl Tone {
    const fn new(at_s: f64, length_s: f64, wave: Wave, freq: f32, end_freq: f32, gain: f32) -> Self {
        Self {
            at_s,
            length_s,
            wave,
            freq,
            end_freq,
            gain,
        }
    }
}

const POP: [Tone; 1] = [Tone::new(0.0, 0.1, Wave::Sine, 600.0, 240.0, 0.5)];
const TICK: [Tone; 1] = [Tone::new(0.0, 0.2, Wave::Triangle, 440.0, 440.0, 0.4)];
const GO: [Tone; 2] = [
    Tone::new(0.0, 0.3, Wave::Triangle, 660.0, 660.0, 0.4),
    Tone::new(0.08, 0.3, Wave::Triangle, 880.0, 880.0, 0.4),
];
const WARNING: [Tone; 1] = [Tone::new(0.0, 0.35, Wave::Square, 150.0, 150.0, 0.2)];
const GAME_OVER: [Tone; 2] = [
    Tone::new(0.0, 0.9, Wave::Sawtooth, 300.0, 80.0, 0.25),
    Tone::new(0.05, 1.0, Wave::Sine, 110.0, 55.0, 0.3),
];

impl SoundEffect {
    /// Notes to synthesize for this effect
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Pop { .. } => &POP,
            SoundEffect::CountdownTick => &TICK,
            SoundEffect::CountdownGo => &GO,
            SoundEffect::Warning => &WARNING,
            SoundEffect::GameOver => &GAME_OVER,
        }
    }
}

/// Picks a random pop player for each pop
#[derive(Debug, Clone)]
pub struct PopVoices {
    rng: Pcg32,
}

impl PopVoices {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_voice(&mut self) -> u8 {
        self.rng.random_range(0..POP_VOICES)
    }

    /// Sound for a game event, if it has one
    pub fn sound_for(&mut self, event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::BallPopped { .. } => Some(SoundEffect::Pop {
                voice: self.next_voice(),
            }),
            GameEvent::Countdown(_) => Some(SoundEffect::CountdownTick),
            GameEvent::CountdownGo => Some(SoundEffect::CountdownGo),
            GameEvent::ProximityWarning => Some(SoundEffect::Warning),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{POP_VOICES, SoundEffect, Tone, Wave};
    use crate::settings::Settings;
    use web_sys::{AudioContext, OscillatorNode, OscillatorType};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Note last started on each pop player
        pop_players: [Option<OscillatorNode>; POP_VOICES as usize],
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                pop_players: Default::default(),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                muted: settings.muted,
            }
        }

        /// Pick up changed settings
        pub fn apply(&mut self, settings: &Settings) {
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.sfx_volume }
        }

        /// Play a sound effect. Playback failures are logged and dropped.
        pub fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended && ctx.resume().is_err() {
                log::debug!("Audio context could not resume");
                return;
            }

            let mut started = None;
            for tone in effect.tones() {
                match play_tone(ctx, tone, vol) {
                    Some(osc) => started = Some(osc),
                    None => log::debug!("{:?} could not play", effect),
                }
            }

            // A player restarts its cue instead of layering it
            if let SoundEffect::Pop { voice } = effect {
                let slot = &mut self.pop_players[voice as usize % POP_VOICES as usize];
                if let Some(previous) = slot.take() {
                    previous.stop().ok();
                }
                *slot = started;
            }
        }
    }

    fn oscillator_type(wave: Wave) -> OscillatorType {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Square => OscillatorType::Square,
            Wave::Sawtooth => OscillatorType::Sawtooth,
        }
    }

    /// Schedule one note with a decaying envelope and optional pitch glide
    fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<OscillatorNode> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(oscillator_type(tone.wave));
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = ctx.current_time() + tone.at_s;
        let end = t + tone.length_s;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok()?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, end - 0.05 * tone.length_s).ok()?;

        osc.frequency().set_value_at_time(tone.freq, t).ok()?;
        if tone.end_freq != tone.freq {
            osc.frequency().exponential_ramp_to_value_at_time(tone.end_freq, end).ok()?;
        }

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end).ok()?;
        Some(osc)
    }
}
