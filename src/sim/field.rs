//! Ball field: spawning, growth, and removal of the growing targets
//!
//! Balls are only ever removed by `remove` (popped) or end the game by
//! overgrowing in `advance`.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, GameState, Rgb};

/// Add up to `n` balls without exceeding the population cap.
///
/// Every batch that adds at least one ball raises the growth modifier and
/// shrinks the spawn interval (down to its floor). Returns the number added.
pub fn spawn(state: &mut GameState, n: usize) -> usize {
    let cap = state.tuning.population_cap;
    if state.balls.len() >= cap || n == 0 {
        return 0;
    }

    let count = n.min(cap - state.balls.len());
    for _ in 0..count {
        let pos = Vec2::new(
            state.rng.random::<f32>() * state.canvas.width,
            state.rng.random::<f32>() * state.canvas.height,
        );
        let radius = state
            .rng
            .random_range(state.tuning.spawn_radius_min..state.tuning.spawn_radius_max);
        let jitter = state.rng.random::<f32>() * state.tuning.growth_jitter;
        let growth_rate = (state.growth_modifier + jitter).min(state.tuning.max_growth_rate);

        let id = state.next_entity_id();
        state.balls.push(Ball::new(id, pos, radius, growth_rate));
    }

    // Difficulty ramp
    state.growth_modifier += state.tuning.growth_increment;
    state.spawn_interval_ms = (state.spawn_interval_ms * state.tuning.spawn_interval_decay)
        .max(state.tuning.min_spawn_interval_ms);

    log::debug!(
        "Spawned {} balls (modifier {:.2}, next interval {:.0}ms)",
        count,
        state.growth_modifier,
        state.spawn_interval_ms
    );

    count
}

/// Grow every ball by its growth rate and refresh its color.
///
/// Returns `true` only on the step that first sets the game-over flag.
pub fn advance(state: &mut GameState) -> bool {
    let tuning = &state.tuning;
    let mut overgrown = false;

    for ball in &mut state.balls {
        ball.radius += ball.growth_rate;
        ball.color = Some(Rgb::for_radius(
            ball.radius,
            tuning.color_radius_min,
            tuning.color_radius_max,
        ));
        if ball.radius > tuning.game_over_radius {
            overgrown = true;
        }
    }

    if overgrown && !state.game_over {
        state.game_over = true;
        log::info!("Ball overgrew, game over with score {}", state.score);
        return true;
    }
    false
}

/// Remove a ball by id. Unknown ids are ignored.
pub fn remove(state: &mut GameState, id: u32) -> Option<Ball> {
    let idx = state.balls.iter().position(|b| b.id == id)?;
    Some(state.balls.remove(idx))
}
