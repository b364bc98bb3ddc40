//! Proximity monitor: warns when a hand fills too much of the frame
//!
//! The hand's bounding box relative to the canvas stands in for distance to
//! the camera. With several hands the largest one counts. Warnings are
//! edge-triggered: one event when the player gets too close, one when they
//! step back.

use crate::Canvas;
use crate::perception::HandPose;

/// Transition reported by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityChange {
    Raised,
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct ProximityMonitor {
    too_close: bool,
    /// When the current warning period started (ms)
    warned_at: u64,
}

/// Largest side of the hand's bounding box as a fraction of the canvas
pub fn hand_size(hand: &HandPose, canvas: Canvas) -> f32 {
    let (min, max) = hand.pixel_bounds(canvas);
    let size = max - min;
    (size.x / canvas.width).max(size.y / canvas.height)
}

/// Size of the hand closest to the camera, `None` without hands
pub fn closest_hand_size(hands: &[HandPose], canvas: Canvas) -> Option<f32> {
    hands.iter().map(|h| hand_size(h, canvas)).reduce(f32::max)
}

impl ProximityMonitor {
    pub fn is_too_close(&self) -> bool {
        self.too_close
    }

    pub fn warned_at(&self) -> u64 {
        self.warned_at
    }

    /// Evaluate this frame's largest hand size at time `now_ms`
    pub fn check(
        &mut self,
        size: f32,
        threshold: f32,
        warning_duration_ms: u64,
        now_ms: u64,
    ) -> Option<ProximityChange> {
        let change = if size > threshold {
            if self.too_close {
                None
            } else {
                self.too_close = true;
                self.warned_at = now_ms;
                Some(ProximityChange::Raised)
            }
        } else if self.too_close {
            self.too_close = false;
            Some(ProximityChange::Cleared)
        } else {
            None
        };

        // Re-arm for a repeating reminder; nothing is shown for it yet
        if self.too_close && now_ms.saturating_sub(self.warned_at) > warning_duration_ms {
            self.warned_at = now_ms;
            log::debug!("Player still too close after {}ms", warning_duration_ms);
        }

        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::Landmark;

    /// A hand spanning `w` x `h` of the frame, anchored at (0.1, 0.1)
    fn hand(w: f32, h: f32) -> HandPose {
        let mut landmarks = vec![Landmark::new(0.1, 0.1); 21];
        landmarks[8] = Landmark::new(0.1 + w, 0.1);
        landmarks[0] = Landmark::new(0.1, 0.1 + h);
        HandPose::new(landmarks).unwrap()
    }

    fn canvas() -> Canvas {
        Canvas::new(640.0, 480.0)
    }

    fn size(hand: &HandPose) -> f32 {
        hand_size(hand, canvas())
    }

    #[test]
    fn test_hand_size_takes_larger_axis() {
        assert!((hand_size(&hand(0.45, 0.10), canvas()) - 0.45).abs() < 1e-4);
        assert!((hand_size(&hand(0.05, 0.30), canvas()) - 0.30).abs() < 1e-4);
    }

    #[test]
    fn test_warning_is_edge_triggered() {
        let mut monitor = ProximityMonitor::default();
        let close = hand(0.45, 0.10);

        assert_eq!(monitor.check(size(&close), 0.4, 3000, 100), Some(ProximityChange::Raised));
        assert!(monitor.is_too_close());
        assert_eq!(monitor.warned_at(), 100);
        assert_eq!(monitor.check(size(&close), 0.4, 3000, 200), None);
    }

    #[test]
    fn test_warning_clears_at_threshold() {
        let mut monitor = ProximityMonitor::default();
        monitor.check(size(&hand(0.6, 0.1)), 0.4, 3000, 0);

        assert_eq!(monitor.check(size(&hand(0.2, 0.2)), 0.4, 3000, 50), Some(ProximityChange::Cleared));
        assert!(!monitor.is_too_close());
        assert_eq!(monitor.check(size(&hand(0.2, 0.2)), 0.4, 3000, 60), None);
    }

    #[test]
    fn test_rearm_resets_timer_silently() {
        let mut monitor = ProximityMonitor::default();
        let close = hand(0.5, 0.5);
        monitor.check(size(&close), 0.4, 3000, 1000);

        assert_eq!(monitor.check(size(&close), 0.4, 3000, 4000), None);
        assert_eq!(monitor.warned_at(), 1000);
        assert_eq!(monitor.check(size(&close), 0.4, 3000, 4001), None);
        assert_eq!(monitor.warned_at(), 4001);
        assert!(monitor.is_too_close());
    }

    #[test]
    fn test_closest_hand_wins() {
        let hands = [hand(0.1, 0.1), hand(0.45, 0.1), hand(0.2, 0.3)];
        let size = closest_hand_size(&hands, canvas()).unwrap();
        assert!((size - 0.45).abs() < 1e-4);
        assert_eq!(closest_hand_size(&[], canvas()), None);
    }

    #[test]
    fn test_exact_threshold_is_not_too_close() {
        let mut monitor = ProximityMonitor::default();
        assert_eq!(monitor.check(0.4, 0.4, 3000, 0), None);
        assert!(!monitor.is_too_close());

        monitor.check(0.5, 0.4, 3000, 10);
        assert_eq!(monitor.check(0.4, 0.4, 3000, 20), Some(ProximityChange::Cleared));
        assert!(!monitor.is_too_close());
    }
}
