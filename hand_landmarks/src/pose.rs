//! Synthetic hand poses.
//!
//! Produces a plausible 21-point right hand (mirrored frame, palm toward the
//! camera, fingers pointing up) for any [`FingerVector`].  Used by the
//! keyboard simulator so the real classifier sees real geometry, and by tests.

use crate::finger::{Finger, FingerVector};
use crate::point::{LandmarkSnapshot, Point2D, LANDMARK_COUNT, WRIST};

/// Per-finger layout: (MCP x offset, MCP y offset, length factor), in units
/// of the pose scale relative to the wrist.
const FINGER_LAYOUT: [(f32, f32, f32); 4] = [
    (-0.45, -0.90, 0.92), // index
    (-0.15, -0.95, 1.00), // middle
    ( 0.15, -0.90, 0.95), // ring
    ( 0.42, -0.80, 0.75), // pinky
];

/// Placement of a synthetic hand in the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    /// Wrist position in pixels.
    pub wrist: Point2D,
    /// Roughly the wrist → middle-MCP distance, in pixels.
    pub scale: f32,
}

impl Default for HandPose {
    fn default() -> Self {
        HandPose { wrist: Point2D::new(475.0, 420.0), scale: 160.0 }
    }
}

impl HandPose {
    pub fn new(wrist: Point2D, scale: f32) -> Self {
        HandPose { wrist, scale }
    }

    /// Centre a hand of `scale` pixels in a `width`×`height` frame.
    pub fn centered(width: f32, height: f32, scale: f32) -> Self {
        HandPose {
            wrist: Point2D::new(width / 2.0, height / 2.0 + scale * 0.8),
            scale,
        }
    }

    pub fn landmarks(&self, fingers: FingerVector) -> [Point2D; LANDMARK_COUNT] {
        let mut pts = [self.wrist; LANDMARK_COUNT];
        pts[WRIST] = self.wrist;

        // ── thumb: CMC, MCP, IP, TIP ─────────────────────────────────────
        pts[1] = self.at(-0.35, -0.25);
        pts[2] = self.at(-0.55, -0.45);
        if fingers.is_up(Finger::Thumb) {
            pts[3] = self.at(-0.75, -0.60);
            pts[4] = self.at(-0.95, -0.72);
        } else {
            // Tucked across the palm.
            pts[3] = self.at(-0.45, -0.70);
            pts[4] = self.at(-0.20, -0.75);
        }

        // ── index → pinky: MCP, PIP, DIP, TIP ────────────────────────────
        let others = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];
        for (slot, (finger, &(dx, dy, len))) in others.iter().zip(FINGER_LAYOUT.iter()).enumerate() {
            let base = 5 + slot * 4;
            pts[base] = self.at(dx, dy);
            if fingers.is_up(*finger) {
                pts[base + 1] = self.at(dx, dy - 0.35 * len);
                pts[base + 2] = self.at(dx, dy - 0.60 * len);
                pts[base + 3] = self.at(dx, dy - 0.80 * len);
            } else {
                // Folded forward: the tip ends up just below the knuckle.
                pts[base + 1] = self.at(dx, dy - 0.30 * len);
                pts[base + 2] = self.at(dx + 0.02, dy - 0.15 * len);
                pts[base + 3] = self.at(dx + 0.02, dy + 0.05);
            }
        }
        pts
    }

    pub fn snapshot(&self, fingers: FingerVector) -> LandmarkSnapshot {
        LandmarkSnapshot::new(self.landmarks(fingers))
    }

    fn at(&self, dx: f32, dy: f32) -> Point2D {
        Point2D::new(self.wrist.x + dx * self.scale, self.wrist.y + dy * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierConfig, FingerStateClassifier, ThumbRule};

    #[test]
    fn every_vector_classifies_back_to_itself() {
        let pose = HandPose::default();
        for thumb in [ThumbRule::TipLeftOfJoint, ThumbRule::PinkyDistance] {
            for reference_offset in 1..=3 {
                let c = FingerStateClassifier::new(ClassifierConfig { thumb, reference_offset });
                for v in FingerVector::all() {
                    assert_eq!(
                        c.classify(&pose.snapshot(v)), v,
                        "thumb={thumb:?} offset={reference_offset}"
                    );
                }
            }
        }
    }

    #[test]
    fn pose_is_independent_of_position_and_size() {
        let c = FingerStateClassifier::default();
        let v = FingerVector::from_bits([0, 1, 0, 0, 1]);
        for pose in [
            HandPose::new(Point2D::new(50.0, 60.0), 20.0),
            HandPose::centered(950.0, 550.0, 120.0),
            HandPose::new(Point2D::new(1800.0, 1000.0), 400.0),
        ] {
            assert_eq!(c.classify(&pose.snapshot(v)), v);
        }
    }

    #[test]
    fn centered_pose_stays_in_frame() {
        let pose = HandPose::centered(950.0, 550.0, 150.0);
        for p in pose.landmarks(FingerVector::OPEN) {
            assert!(p.x >= 0.0 && p.x <= 950.0, "x out of frame: {p:?}");
            assert!(p.y >= 0.0 && p.y <= 550.0, "y out of frame: {p:?}");
        }
    }
}
