//! Per-frame simulation step
//!
//! Order matters: collisions see the radius from before this frame's growth,
//! and everything this frame changes is visible to the same frame's render.

use super::state::{GameEvent, GameState};
use super::{collision, effects, field};
use crate::perception::HandPose;
use crate::sim::proximity::{ProximityChange, closest_hand_size};

/// Input for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hands detected this frame, in detection order
    pub hands: Vec<HandPose>,
    /// Frame timestamp in milliseconds
    pub now_ms: u64,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing moves once the game is lost
    if state.game_over {
        return events;
    }

    state.time_ticks += 1;

    // One verdict per frame, from whichever hand is nearest the camera
    if let Some(size) = closest_hand_size(&input.hands, state.canvas) {
        let change = state.proximity.check(
            size,
            state.tuning.proximity_threshold,
            state.tuning.warning_duration_ms,
            input.now_ms,
        );
        match change {
            Some(ProximityChange::Raised) => events.push(GameEvent::ProximityWarning),
            Some(ProximityChange::Cleared) => events.push(GameEvent::ProximityCleared),
            None => {}
        }
    }

    for hand in &input.hands {
        collision::detect_hand_collisions(state, hand, &mut events);
    }

    if field::advance(state) {
        events.push(GameEvent::GameOver { score: state.score });
    }

    effects::advance(&mut state.effects, &state.tuning);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Canvas;
    use crate::perception::Landmark;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Canvas::new(640.0, 480.0), Tuning::default())
    }

    fn hand_at(x: f32, y: f32) -> HandPose {
        HandPose::uniform(x / 640.0, y / 480.0)
    }

    #[test]
    fn test_empty_frame_only_grows() {
        let mut state = new_state(1);
        let id = state.insert_ball(Vec2::new(100.0, 100.0), 30.0, 0.5);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert!((state.ball(id).unwrap().radius - 30.5).abs() < 1e-5);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_collision_sees_pre_growth_radius() {
        let mut state = new_state(1);
        state.insert_ball(Vec2::new(100.0, 100.0), 30.0, 5.0);

        // 32px away: outside the current radius, inside the grown one
        let input = TickInput {
            hands: vec![hand_at(132.0, 100.0)],
            now_ms: 0,
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 0);

        tick(&mut state, &input);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_pop_effect_advances_same_frame() {
        let mut state = new_state(1);
        state.insert_ball(Vec2::new(100.0, 100.0), 30.0, 0.1);

        let events = tick(
            &mut state,
            &TickInput {
                hands: vec![hand_at(100.0, 100.0)],
                now_ms: 16,
            },
        );

        assert!(events.iter().any(|e| matches!(e, GameEvent::BallPopped { .. })));
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].lifetime, 29);
    }

    #[test]
    fn test_game_over_then_frozen() {
        let mut state = new_state(1);
        let id = state.insert_ball(Vec2::new(100.0, 100.0), 99.9, 0.2);
        state.insert_ball(Vec2::new(400.0, 300.0), 30.0, 0.2);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
        // Other balls still grew on the losing frame
        assert!((state.balls[1].radius - 30.2).abs() < 1e-5);

        let radius = state.ball(id).unwrap().radius;
        let events = tick(
            &mut state,
            &TickInput {
                hands: vec![hand_at(100.0, 100.0)],
                now_ms: 100,
            },
        );
        assert!(events.is_empty());
        assert_eq!(state.ball(id).unwrap().radius, radius);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_proximity_events() {
        let mut state = new_state(1);
        let mut landmarks = vec![Landmark::new(0.1, 0.1); 21];
        landmarks[12] = Landmark::new(0.55, 0.2);
        let close = HandPose::new(landmarks).unwrap();
        let far = HandPose::uniform(0.9, 0.9);

        let events = tick(&mut state, &TickInput { hands: vec![close.clone()], now_ms: 0 });
        assert_eq!(events, vec![GameEvent::ProximityWarning]);

        let events = tick(&mut state, &TickInput { hands: vec![close], now_ms: 16 });
        assert!(events.is_empty());

        let events = tick(&mut state, &TickInput { hands: vec![far], now_ms: 32 });
        assert_eq!(events, vec![GameEvent::ProximityCleared]);
    }

    #[test]
    fn test_close_and_far_hands_warn_once() {
        let mut state = new_state(1);
        let mut landmarks = vec![Landmark::new(0.1, 0.1); 21];
        landmarks[12] = Landmark::new(0.55, 0.2);
        let close = HandPose::new(landmarks).unwrap();
        let far = HandPose::uniform(0.9, 0.9);

        let first = tick(&mut state, &TickInput { hands: vec![close.clone(), far.clone()], now_ms: 0 });
        assert_eq!(first, vec![GameEvent::ProximityWarning]);

        for frame in 1..10 {
            let hands = if frame % 2 == 0 {
                vec![close.clone(), far.clone()]
            } else {
                vec![far.clone(), close.clone()]
            };
            let events = tick(&mut state, &TickInput { hands, now_ms: frame * 16 });
            assert!(events.is_empty(), "frame {frame}: {events:?}");
            assert!(state.proximity.is_too_close());
        }
    }

    #[test]
    fn test_determinism() {
        use crate::sim::field::spawn;

        let run = |seed| {
            let mut state = new_state(seed);
            spawn(&mut state, 3);
            let input = TickInput {
                hands: vec![hand_at(320.0, 240.0)],
                now_ms: 0,
            };
            for _ in 0..50 {
                tick(&mut state, &input);
            }
            state
        };

        let (a, b) = (run(77), run(77));
        assert_eq!(a.balls, b.balls);
        assert_eq!(a.effects, b.effects);
        assert_eq!(a.score, b.score);
    }
}
