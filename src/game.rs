//! A single running game
//!
//! `Game` is the only owner of the `GameState`. Countdown, spawn batches and
//! the delayed hand-off to the game-over screen all run on timers it owns and
//! fires from `frame`, so nothing ever mutates the field while a collision
//! pass is running.

use crate::Canvas;
use crate::perception::HandPose;
use crate::sim::{GameEvent, GameState, SchedulerPhase, SpawnScheduler, TickInput, Timers, tick};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameTimer {
    /// Next countdown number (or "GO!")
    CountdownStep,
    /// "GO!" has been shown long enough; start spawning
    CountdownDone,
    /// Leave for the game-over screen
    ShowGameOver,
}

/// What the countdown overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownDisplay {
    Number(u32),
    Go,
}

/// Result of one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// Final score once the game-over screen should be shown
    pub finished: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    scheduler: SpawnScheduler,
    timers: Timers<GameTimer>,
    countdown: Option<CountdownDisplay>,
    started: bool,
    finished: Option<u64>,
}

impl Game {
    pub fn new(seed: u64, canvas: Canvas, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, canvas, tuning),
            scheduler: SpawnScheduler::new(),
            timers: Timers::new(),
            countdown: None,
            started: false,
            finished: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tests and tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn countdown(&self) -> Option<CountdownDisplay> {
        self.countdown
    }

    pub fn scheduler_phase(&self) -> SchedulerPhase {
        self.scheduler.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Begin the countdown. Balls start spawning when it completes.
    pub fn start(&mut self, now_ms: u64) -> Vec<GameEvent> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        log::info!("Game starting (seed {})", self.state.seed);

        let secs = self.state.tuning.countdown_secs;
        if secs == 0 {
            return self.begin_spawning(now_ms);
        }

        self.countdown = Some(CountdownDisplay::Number(secs));
        self.timers
            .schedule(now_ms, self.state.tuning.countdown_step_ms, GameTimer::CountdownStep);
        vec![GameEvent::Countdown(secs)]
    }

    /// Run one frame: due timers, scheduled spawns, then the simulation step
    pub fn frame(&mut self, now_ms: u64, hands: &[HandPose]) -> FrameReport {
        let mut events = Vec::new();

        while let Some((_, due_ms, timer)) = self.timers.pop_due(now_ms) {
            self.on_timer(timer, due_ms, &mut events);
        }

        let added = self.scheduler.poll(&mut self.state, now_ms);
        if added > 0 {
            events.push(GameEvent::BallsSpawned { count: added });
        }

        let input = TickInput {
            hands: hands.to_vec(),
            now_ms,
        };
        let step = tick(&mut self.state, &input);
        let lost = step.iter().any(|e| matches!(e, GameEvent::GameOver { .. }));
        events.extend(step);

        if lost {
            self.scheduler.stop();
            self.countdown = None;
            self.timers.clear();
            self.timers
                .schedule(now_ms, self.state.tuning.game_over_delay_ms, GameTimer::ShowGameOver);
        }

        FrameReport {
            events,
            finished: self.finished,
        }
    }

    /// Cancel every pending timer (page teardown)
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.scheduler.stop();
    }

    /// Handle a timer that fell due at `due_ms`. Follow-ups chain from the
    /// deadline so a late frame never stretches the countdown.
    fn on_timer(&mut self, timer: GameTimer, due_ms: u64, events: &mut Vec<GameEvent>) {
        match timer {
            GameTimer::CountdownStep => match self.countdown {
                Some(CountdownDisplay::Number(n)) if n > 1 => {
                    self.countdown = Some(CountdownDisplay::Number(n - 1));
                    events.push(GameEvent::Countdown(n - 1));
                    self.timers
                        .schedule(due_ms, self.state.tuning.countdown_step_ms, GameTimer::CountdownStep);
                }
                _ => {
                    self.countdown = Some(CountdownDisplay::Go);
                    events.push(GameEvent::CountdownGo);
                    self.timers
                        .schedule(due_ms, self.state.tuning.countdown_go_ms, GameTimer::CountdownDone);
                }
            },
            GameTimer::CountdownDone => {
                events.extend(self.begin_spawning(due_ms));
            }
            GameTimer::ShowGameOver => {
                log::info!("Game over, final score {}", self.state.score);
                self.finished = Some(self.state.score);
            }
        }
    }

    fn begin_spawning(&mut self, now_ms: u64) -> Vec<GameEvent> {
        self.countdown = None;
        let mut events = vec![GameEvent::SpawningStarted];
        let added = self.scheduler.start(&mut self.state, now_ms);
        if added > 0 {
            events.push(GameEvent::BallsSpawned { count: added });
        }
        events
    }
}
