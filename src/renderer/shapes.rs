//! Draw primitives for 2D shapes
//!
//! Everything the render sink needs is expressed as a flat list of
//! `DrawCmd`s in canvas pixels, in paint order.

use glam::Vec2;
use serde::Serialize;

use crate::Canvas;
use crate::perception::HandPose;
use crate::sim::{Ball, PopEffect, Rgb};

/// Skeleton bones between landmark indices (thumb, index, middle, ring, pinky)
pub const HAND_CONNECTIONS: [(usize, usize); 19] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (0, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (0, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

const BONE_COLOR: &str = "blue";
const JOINT_COLOR: &str = "red";
const WRIST_RADIUS: f32 = 5.0;
const JOINT_RADIUS: f32 = 3.0;
const LINE_WIDTH: f32 = 2.0;

/// A single paint operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCmd {
    FillCircle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: String,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: String,
        width: f32,
    },
}

/// A ball, filled with its current color
pub fn ball(ball: &Ball) -> DrawCmd {
    DrawCmd::FillCircle {
        center: ball.pos,
        radius: ball.radius,
        color: ball.color.unwrap_or(Rgb::MAGENTA).css(),
    }
}

/// Expanding fading ring plus the burst particles
pub fn pop_effect(effect: &PopEffect, particles: bool, out: &mut Vec<DrawCmd>) {
    out.push(DrawCmd::StrokeCircle {
        center: effect.pos,
        radius: effect.ring_radius(),
        color: Rgb::WHITE.css_alpha(effect.ring_alpha()),
        width: LINE_WIDTH,
    });

    if !particles {
        return;
    }
    for p in effect.particles.iter().filter(|p| p.alpha > 0.0) {
        out.push(DrawCmd::FillCircle {
            center: p.pos,
            radius: p.size,
            color: effect.color.css_alpha(p.alpha),
        });
    }
}

/// Bones first, then joints on top
pub fn hand_skeleton(hand: &HandPose, canvas: Canvas, out: &mut Vec<DrawCmd>) {
    let points: Vec<Vec2> = hand.pixel_points(canvas).collect();

    for &(a, b) in &HAND_CONNECTIONS {
        if let (Some(&from), Some(&to)) = (points.get(a), points.get(b)) {
            out.push(DrawCmd::Line {
                from,
                to,
                color: BONE_COLOR.to_string(),
                width: LINE_WIDTH,
            });
        }
    }

    for (i, &center) in points.iter().enumerate() {
        out.push(DrawCmd::FillCircle {
            center,
            radius: if i == 0 { WRIST_RADIUS } else { JOINT_RADIUS },
            color: JOINT_COLOR.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Particle;

    #[test]
    fn test_connections_reference_valid_landmarks() {
        for (a, b) in HAND_CONNECTIONS {
            assert!(a < crate::consts::LANDMARKS_PER_HAND);
            assert!(b < crate::consts::LANDMARKS_PER_HAND);
        }
    }

    #[test]
    fn test_skeleton_shape() {
        let mut out = Vec::new();
        hand_skeleton(&HandPose::uniform(0.5, 0.5), Canvas::new(640.0, 480.0), &mut out);

        let lines = out.iter().filter(|c| matches!(c, DrawCmd::Line { .. })).count();
        assert_eq!(lines, 19);
        assert_eq!(out.len(), 19 + 21);
        assert!(matches!(
            &out[19],
            DrawCmd::FillCircle { radius, center, .. } if *radius == WRIST_RADIUS && *center == Vec2::new(320.0, 240.0)
        ));
        assert!(matches!(&out[20], DrawCmd::FillCircle { radius, .. } if *radius == JOINT_RADIUS));
    }

    #[test]
    fn test_uncolored_ball_draws_magenta() {
        let b = Ball::new(1, Vec2::new(10.0, 20.0), 25.0, 0.1);
        assert_eq!(
            ball(&b),
            DrawCmd::FillCircle {
                center: Vec2::new(10.0, 20.0),
                radius: 25.0,
                color: "rgb(255, 0, 255)".to_string(),
            }
        );
    }

    fn effect() -> PopEffect {
        PopEffect {
            pos: Vec2::new(50.0, 50.0),
            initial_radius: 20.0,
            lifetime: 15,
            max_lifetime: 30,
            color: Rgb::new(0, 0, 255),
            particles: vec![
                Particle {
                    pos: Vec2::new(51.0, 50.0),
                    vel: Vec2::ZERO,
                    size: 2.0,
                    alpha: 0.5,
                },
                Particle {
                    pos: Vec2::new(49.0, 50.0),
                    vel: Vec2::ZERO,
                    size: 2.0,
                    alpha: 0.0,
                },
            ],
        }
    }

    #[test]
    fn test_pop_effect_ring_and_particles() {
        let mut out = Vec::new();
        pop_effect(&effect(), true, &mut out);

        // Faded-out particles are skipped
        assert_eq!(out.len(), 2);
        match &out[0] {
            DrawCmd::StrokeCircle { radius, color, .. } => {
                assert!((radius - 30.0).abs() < 1e-5);
                assert_eq!(color, "rgba(255, 255, 255, 0.35)");
            }
            other => panic!("expected ring, got {:?}", other),
        }
        assert!(matches!(&out[1], DrawCmd::FillCircle { color, .. } if color == "rgba(0, 0, 255, 0.5)"));
    }

    #[test]
    fn test_pop_effect_without_particles() {
        let mut out = Vec::new();
        pop_effect(&effect(), false, &mut out);
        assert_eq!(out.len(), 1);
    }
}
