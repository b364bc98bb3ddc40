//! Property tests over randomized games

use glam::Vec2;
use proptest::prelude::*;

use super::state::{GameEvent, GameState};
use super::{TickInput, collision, effects, field, tick};
use crate::Canvas;
use crate::perception::HandPose;
use crate::tuning::Tuning;

fn new_state(seed: u64) -> GameState {
    GameState::new(seed, Canvas::new(640.0, 480.0), Tuning::default())
}

proptest! {
    #[test]
    fn population_never_exceeds_cap(seed in any::<u64>(), batches in prop::collection::vec(0usize..8, 1..20)) {
        let mut state = new_state(seed);
        for n in batches {
            field::spawn(&mut state, n);
            prop_assert!(state.balls.len() <= state.tuning.population_cap);
        }
    }

    #[test]
    fn spawn_interval_never_below_floor(seed in any::<u64>(), rounds in 1usize..200) {
        let mut state = new_state(seed);
        for _ in 0..rounds {
            state.balls.clear();
            field::spawn(&mut state, 1);
            prop_assert!(state.spawn_interval_ms >= state.tuning.min_spawn_interval_ms);
        }
    }

    #[test]
    fn radii_never_shrink(seed in any::<u64>(), frames in 1usize..300) {
        let mut state = new_state(seed);
        field::spawn(&mut state, 5);
        let mut last: Vec<f32> = state.balls.iter().map(|b| b.radius).collect();

        for _ in 0..frames {
            if state.game_over {
                break;
            }
            tick(&mut state, &TickInput::default());
            let now: Vec<f32> = state.balls.iter().map(|b| b.radius).collect();
            for (a, b) in last.iter().zip(&now) {
                prop_assert!(b >= a);
            }
            last = now;
        }
    }

    #[test]
    fn game_over_is_reported_once(seed in any::<u64>()) {
        let mut state = new_state(seed);
        field::spawn(&mut state, 5);

        let mut reported = 0;
        for _ in 0..2000 {
            let events = tick(&mut state, &TickInput::default());
            reported += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }
        prop_assert!(state.game_over);
        prop_assert_eq!(reported, 1);
    }

    #[test]
    fn a_hit_pops_exactly_one_ball(
        x in 50.0f32..590.0,
        y in 50.0f32..430.0,
        radius in 20.0f32..40.0,
    ) {
        let mut state = new_state(1);
        state.insert_ball(Vec2::new(x, y), radius, 0.1);
        let hand = HandPose::uniform(x / 640.0, y / 480.0);

        let mut events = Vec::new();
        let popped = collision::detect_hand_collisions(&mut state, &hand, &mut events);

        prop_assert_eq!(popped, 1);
        prop_assert!(state.balls.is_empty());
        prop_assert_eq!(state.score, 1);
        prop_assert_eq!(state.effects.len(), 1);
        let expected = (radius * state.tuning.particle_density).floor() as usize;
        prop_assert_eq!(state.effects[0].particles.len(), expected);
    }

    #[test]
    fn particle_alpha_stays_in_range(seed in any::<u64>(), radius in 20.0f32..100.0, steps in 0usize..40) {
        let mut state = new_state(seed);
        let id = state.insert_ball(Vec2::new(320.0, 240.0), radius, 0.1);
        let ball = field::remove(&mut state, id).unwrap();
        let effect = super::PopEffect::from_ball(&ball, &state.tuning, &mut state.rng);
        state.effects.push(effect);

        for _ in 0..steps {
            effects::advance(&mut state.effects, &state.tuning);
        }
        for effect in &state.effects {
            prop_assert!(effect.ring_alpha() >= 0.0 && effect.ring_alpha() <= 0.7);
            for p in &effect.particles {
                prop_assert!((0.0..=1.0).contains(&p.alpha));
            }
        }
        prop_assert_eq!(state.effects.is_empty(), steps >= state.tuning.pop_lifetime_ticks as usize);
    }
}
