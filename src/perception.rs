//! Perception input from the external hand detector and gesture recognizer
//!
//! The detector itself is a black box. The page runs it once per video frame
//! and hands us the result as JSON in the detector's own shape:
//!
//! ```json
//! { "multiHandLandmarks": [[{ "x": 0.5, "y": 0.4, "z": -0.02 }, ...]],
//!   "gestures": [[{ "categoryName": "Thumb_Up", "score": 0.93 }]] }
//! ```

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Canvas;
use crate::consts::LANDMARKS_PER_HAND;

/// One normalized point on the hand skeleton
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }
}

/// A detected hand: exactly 21 landmarks in detector order
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    landmarks: Vec<Landmark>,
}

impl HandPose {
    /// Returns `None` unless exactly 21 landmarks are given
    pub fn new(landmarks: Vec<Landmark>) -> Option<Self> {
        (landmarks.len() == LANDMARKS_PER_HAND).then_some(Self { landmarks })
    }

    /// A hand with every landmark at the same normalized point
    pub fn uniform(x: f32, y: f32) -> Self {
        Self {
            landmarks: vec![Landmark::new(x, y); LANDMARKS_PER_HAND],
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Landmarks scaled to canvas pixels
    pub fn pixel_points(&self, canvas: Canvas) -> impl Iterator<Item = Vec2> + '_ {
        self.landmarks.iter().map(move |lm| canvas.to_pixels(lm.x, lm.y))
    }

    /// Bounding box (min, max) in canvas pixels
    pub fn pixel_bounds(&self, canvas: Canvas) -> (Vec2, Vec2) {
        self.pixel_points(canvas).fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        )
    }
}

/// One gesture candidate from the recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureCategory {
    #[serde(rename = "categoryName")]
    pub category_name: String,
    pub score: f32,
}

impl GestureCategory {
    pub fn new(category_name: &str, score: f32) -> Self {
        Self {
            category_name: category_name.to_string(),
            score,
        }
    }
}

/// Gesture recognition result: candidates per detected hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureResult {
    pub gestures: Vec<Vec<GestureCategory>>,
}

impl GestureResult {
    pub fn single(category_name: &str, score: f32) -> Self {
        Self {
            gestures: vec![vec![GestureCategory::new(category_name, score)]],
        }
    }

    /// True if any hand shows `label` with confidence strictly above `min_score`
    pub fn matches(&self, label: &str, min_score: f32) -> bool {
        self.gestures
            .iter()
            .flatten()
            .any(|g| g.category_name == label && g.score > min_score)
    }

    /// True if any hand shows a recognized gesture above `min_score`
    pub fn any_confident(&self, min_score: f32) -> bool {
        self.gestures
            .iter()
            .flatten()
            .any(|g| g.category_name != "None" && g.score > min_score)
    }
}

/// Capability interface to the external perception service
pub trait Perception {
    /// Hands detected in the current video frame (possibly none)
    fn detect_hands(&mut self) -> Vec<HandPose>;
    /// Gesture classification for the current video frame
    fn classify_gesture(&mut self) -> GestureResult;
}

/// Raw per-frame payload as produced by the page
#[derive(Debug, Clone, Default, Deserialize)]
struct RawFrame {
    #[serde(rename = "multiHandLandmarks", default)]
    hands: Vec<Vec<Landmark>>,
    #[serde(default)]
    gestures: Vec<Vec<GestureCategory>>,
}

/// One frame of already-computed perception results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerceptionFrame {
    pub hands: Vec<HandPose>,
    pub gestures: GestureResult,
}

impl PerceptionFrame {
    pub fn new(hands: Vec<HandPose>, gestures: GestureResult) -> Self {
        Self { hands, gestures }
    }

    /// Decode the page's JSON payload, dropping malformed hands
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFrame = serde_json::from_str(json)?;
        let hands = raw
            .hands
            .into_iter()
            .filter_map(|landmarks| {
                let count = landmarks.len();
                let hand = HandPose::new(landmarks);
                if hand.is_none() {
                    log::warn!("Dropping hand with {} landmarks (expected {})", count, LANDMARKS_PER_HAND);
                }
                hand
            })
            .collect();
        Ok(Self {
            hands,
            gestures: GestureResult { gestures: raw.gestures },
        })
    }
}

impl Perception for PerceptionFrame {
    fn detect_hands(&mut self) -> Vec<HandPose> {
        self.hands.clone()
    }

    fn classify_gesture(&mut self) -> GestureResult {
        self.gestures.clone()
    }
}

/// Replays a fixed sequence of frames, then reports nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedPerception {
    frames: VecDeque<PerceptionFrame>,
    current: PerceptionFrame,
}

impl ScriptedPerception {
    pub fn new(frames: impl IntoIterator<Item = PerceptionFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            current: PerceptionFrame::default(),
        }
    }

    pub fn push(&mut self, frame: PerceptionFrame) {
        self.frames.push_back(frame);
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Perception for ScriptedPerception {
    // Hands are read first each frame, so advancing here keeps the pair in step
    fn detect_hands(&mut self) -> Vec<HandPose> {
        self.current = self.frames.pop_front().unwrap_or_default();
        self.current.hands.clone()
    }

    fn classify_gesture(&mut self) -> GestureResult {
        self.current.gestures.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_pose_requires_21_landmarks() {
        assert!(HandPose::new(vec![Landmark::new(0.1, 0.1); 20]).is_none());
        assert!(HandPose::new(vec![Landmark::new(0.1, 0.1); 21]).is_some());
    }

    #[test]
    fn test_decode_frame_drops_malformed_hands() {
        let good: Vec<String> = (0..21)
            .map(|i| format!(r#"{{"x": {}, "y": 0.5, "z": -0.01}}"#, i as f32 / 40.0))
            .collect();
        let json = format!(
            r#"{{ "multiHandLandmarks": [[{}], [{{"x": 0.1, "y": 0.1}}]],
                 "gestures": [[{{"categoryName": "Thumb_Up", "score": 0.9}}]] }}"#,
            good.join(",")
        );

        let frame = PerceptionFrame::from_json(&json).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].landmarks()[0].z, Some(-0.01));
        assert!(frame.gestures.matches("Thumb_Up", 0.6));
    }

    #[test]
    fn test_decode_empty_frame() {
        let frame = PerceptionFrame::from_json("{}").unwrap();
        assert!(frame.hands.is_empty());
        assert!(frame.gestures.gestures.is_empty());
    }

    #[test]
    fn test_gesture_threshold_is_strict() {
        let result = GestureResult::single("Thumb_Down", 0.6);
        assert!(!result.matches("Thumb_Down", 0.6));
        assert!(result.matches("Thumb_Down", 0.59));
        assert!(!result.matches("Thumb_Up", 0.0));
    }

    #[test]
    fn test_none_gesture_is_not_confident() {
        assert!(!GestureResult::single("None", 0.99).any_confident(0.6));
        assert!(GestureResult::single("Open_Palm", 0.8).any_confident(0.6));
    }

    #[test]
    fn test_pixel_bounds() {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); 21];
        landmarks[4] = Landmark::new(0.3, 0.45);
        landmarks[20] = Landmark::new(0.75, 0.55);
        let hand = HandPose::new(landmarks).unwrap();

        let (min, max) = hand.pixel_bounds(Canvas::new(100.0, 200.0));
        assert!((min.x - 30.0).abs() < 1e-4);
        assert!((max.x - 75.0).abs() < 1e-4);
        assert!((min.y - 90.0).abs() < 1e-4);
        assert!((max.y - 110.0).abs() < 1e-4);
    }

    #[test]
    fn test_scripted_perception_replays_in_order() {
        let mut perception = ScriptedPerception::new([
            PerceptionFrame::new(vec![HandPose::uniform(0.1, 0.1)], GestureResult::default()),
            PerceptionFrame::new(vec![], GestureResult::single("Thumb_Up", 0.9)),
        ]);

        assert_eq!(perception.detect_hands().len(), 1);
        assert!(perception.classify_gesture().gestures.is_empty());
        assert!(perception.detect_hands().is_empty());
        assert!(perception.classify_gesture().matches("Thumb_Up", 0.6));
        assert!(perception.is_empty());
        assert!(perception.detect_hands().is_empty());
    }
}
