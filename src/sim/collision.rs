//! Collision and scoring: hands popping balls
//!
//! Every landmark of every hand is tested against every ball. Balls are walked
//! back to front so a popped ball can be removed in place without skipping or
//! revisiting its neighbours, and each ball is scored at most once per frame.

use glam::Vec2;

use super::field;
use super::state::{GameEvent, GameState, PopEffect};
use crate::perception::HandPose;

/// True if any of `points` lies strictly inside the circle
pub fn hits_circle(points: impl IntoIterator<Item = Vec2>, center: Vec2, radius: f32) -> bool {
    points.into_iter().any(|p| p.distance(center) < radius)
}

/// Pop every ball touched by `hand`. Returns the number of balls popped.
pub fn detect_hand_collisions(state: &mut GameState, hand: &HandPose, events: &mut Vec<GameEvent>) -> usize {
    if state.game_over {
        return 0;
    }

    let canvas = state.canvas;
    let mut popped = 0;

    for i in (0..state.balls.len()).rev() {
        let ball = &state.balls[i];
        if !hits_circle(hand.pixel_points(canvas), ball.pos, ball.radius) {
            continue;
        }

        let id = ball.id;
        let Some(ball) = field::remove(state, id) else {
            continue;
        };
        let effect = PopEffect::from_ball(&ball, &state.tuning, &mut state.rng);
        state.effects.push(effect);
        state.score += 1;
        popped += 1;

        events.push(GameEvent::BallPopped {
            ball_id: ball.id,
            pos: ball.pos,
            radius: ball.radius,
        });
        events.push(GameEvent::ScoreChanged { score: state.score });
    }

    popped
}

/// Run collision detection for every hand, in detection order
pub fn detect_collisions(state: &mut GameState, hands: &[HandPose], events: &mut Vec<GameEvent>) -> usize {
    hands
        .iter()
        .map(|hand| detect_hand_collisions(state, hand, events))
        .sum()
}
