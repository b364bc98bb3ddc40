//! Spawn scheduler: drops new batches of balls on a shrinking interval
//!
//! NotStarted -> Running (countdown done) -> Stopped (game over). Once stopped
//! it never runs again.

use super::field;
use super::state::GameState;
use super::timer::{TimerHandle, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    NotStarted,
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    phase: SchedulerPhase,
    timers: Timers<()>,
    pending: Option<TimerHandle>,
    /// Batches fired so far
    batches: u32,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            phase: SchedulerPhase::NotStarted,
            timers: Timers::new(),
            pending: None,
            batches: 0,
        }
    }
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn batches(&self) -> u32 {
        self.batches
    }

    /// Spawn the first batch right away and arm the timer for the next.
    /// Returns the number of balls added.
    pub fn start(&mut self, state: &mut GameState, now_ms: u64) -> usize {
        if self.phase != SchedulerPhase::NotStarted {
            return 0;
        }
        self.phase = SchedulerPhase::Running;
        log::info!("Spawn scheduler started");
        self.fire(state, now_ms)
    }

    /// Fire the timer if it is due. Returns the number of balls added.
    pub fn poll(&mut self, state: &mut GameState, now_ms: u64) -> usize {
        if self.phase != SchedulerPhase::Running {
            return 0;
        }
        if state.game_over {
            self.stop();
            return 0;
        }

        let mut added = 0;
        // A late frame catches up on every batch that fell due since the last one
        while let Some((handle, due_ms, ())) = self.timers.pop_due(now_ms) {
            if self.pending == Some(handle) {
                self.pending = None;
            }
            added += self.fire(state, due_ms);
            if self.phase != SchedulerPhase::Running {
                break;
            }
        }
        added
    }

    /// Cancel the pending batch for good
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
        if self.phase != SchedulerPhase::Stopped {
            log::info!("Spawn scheduler stopped after {} batches", self.batches);
        }
        self.phase = SchedulerPhase::Stopped;
    }

    /// True while a next batch is pending
    pub fn is_armed(&self) -> bool {
        self.pending.is_some_and(|h| self.timers.is_pending(h))
    }

    /// Spawn a batch and arm the next one relative to `at_ms`
    fn fire(&mut self, state: &mut GameState, at_ms: u64) -> usize {
        if state.game_over {
            self.stop();
            return 0;
        }

        let batch = state.tuning.spawn_batch;
        let added = field::spawn(state, batch);
        self.batches += 1;

        let delay = state.spawn_interval_ms.round().max(1.0) as u64;
        self.pending = Some(self.timers.schedule(at_ms, delay, ()));
        added
    }
}
