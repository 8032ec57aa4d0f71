//! Finger-state classification from a landmark snapshot.
//!
//! The snapshot is assumed to come from a horizontally mirrored frame, so a
//! right hand held palm-forward has its thumb pointing toward the left edge
//! of the image when extended.
//!
//! # Rules
//!
//! * **Thumb** ([`ThumbRule::TipLeftOfJoint`]): extended when the tip (4) is
//!   left of the IP joint (3).  [`ThumbRule::PinkyDistance`] instead compares
//!   how far the tip and the thumb MCP (2) sit from the pinky MCP (17), which
//!   does not depend on handedness.
//! * **Other fingers**: extended when the tip is above (smaller y than) the
//!   joint `reference_offset` indices below it; offset 2 is the PIP joint.

use tracing::trace;

use crate::error::LandmarkError;
use crate::finger::{Finger, FingerVector};
use crate::point::{
    LandmarkSnapshot, Point2D, INDEX_TIP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_TIP,
    THUMB_IP, THUMB_MCP, THUMB_TIP,
};

/// How the thumb's state is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThumbRule {
    #[default]
    TipLeftOfJoint,
    PinkyDistance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub thumb: ThumbRule,
    /// Distance (in landmark indices) from each fingertip to the joint it is
    /// compared against.  Must be 1, 2 or 3.
    pub reference_offset: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            thumb:            ThumbRule::TipLeftOfJoint,
            reference_offset: 2,
        }
    }
}

/// Converts snapshots into [`FingerVector`]s.
#[derive(Clone, Debug, Default)]
pub struct FingerStateClassifier {
    config: ClassifierConfig,
}

impl FingerStateClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let reference_offset = config.reference_offset.clamp(1, 3);
        FingerStateClassifier {
            config: ClassifierConfig { reference_offset, ..config },
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, snapshot: &LandmarkSnapshot) -> FingerVector {
        let mut fingers = FingerVector::CLOSED;
        fingers.set(Finger::Thumb, self.thumb_up(snapshot));

        let others = [
            (Finger::Index,  INDEX_TIP),
            (Finger::Middle, MIDDLE_TIP),
            (Finger::Ring,   RING_TIP),
            (Finger::Pinky,  PINKY_TIP),
        ];
        for (finger, tip) in others {
            let tip_pt = snapshot.point(tip);
            let reference = snapshot.point(tip - self.config.reference_offset);
            fingers.set(finger, tip_pt.y < reference.y);
        }

        trace!(%fingers, "classified snapshot");
        fingers
    }

    /// Classify a raw detector point list.
    ///
    /// Anything other than a full 21-point hand is reported as
    /// [`LandmarkError::WrongLength`]; the caller decides to skip the frame.
    pub fn classify_points(&self, points: &[Point2D]) -> Result<FingerVector, LandmarkError> {
        let snapshot = LandmarkSnapshot::from_points(points)?;
        Ok(self.classify(&snapshot))
    }

    fn thumb_up(&self, s: &LandmarkSnapshot) -> bool {
        match self.config.thumb {
            ThumbRule::TipLeftOfJoint => s.point(THUMB_TIP).x < s.point(THUMB_IP).x,
            ThumbRule::PinkyDistance  => {
                let pinky = s.point(PINKY_MCP);
                s.point(THUMB_TIP).distance(&pinky) > s.point(THUMB_MCP).distance(&pinky)
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{INDEX_PIP, LANDMARK_COUNT, MIDDLE_PIP, PINKY_PIP, RING_PIP, WRIST};

    /// A flat hand with every tip level with its joints (nothing "up").
    fn flat() -> [Point2D; LANDMARK_COUNT] {
        [Point2D::new(100.0, 100.0); LANDMARK_COUNT]
    }

    #[test]
    fn thumb_extends_toward_left_edge() {
        let mut pts = flat();
        pts[THUMB_TIP] = Point2D::new(80.0, 100.0);
        let v = FingerStateClassifier::default().classify(&LandmarkSnapshot::new(pts));
        assert_eq!(v.to_string(), "10000");

        pts[THUMB_TIP] = Point2D::new(120.0, 100.0);
        let v = FingerStateClassifier::default().classify(&LandmarkSnapshot::new(pts));
        assert_eq!(v.to_string(), "00000");
    }

    #[test]
    fn fingers_compare_tip_against_pip() {
        let mut pts = flat();
        pts[INDEX_TIP].y = pts[INDEX_PIP].y - 30.0;
        pts[PINKY_TIP].y = pts[PINKY_PIP].y - 10.0;
        pts[MIDDLE_TIP].y = pts[MIDDLE_PIP].y + 30.0;
        pts[RING_TIP].y = pts[RING_PIP].y;
        let v = FingerStateClassifier::default().classify(&LandmarkSnapshot::new(pts));
        assert_eq!(v.to_string(), "01001");
    }

    #[test]
    fn dip_reference_offset_changes_joint() {
        let mut pts = flat();
        // Tip above DIP but below PIP.
        pts[INDEX_TIP].y = 90.0;
        pts[INDEX_TIP - 1].y = 95.0;
        pts[INDEX_PIP].y = 80.0;
        let pip = FingerStateClassifier::default();
        let dip = FingerStateClassifier::new(ClassifierConfig {
            reference_offset: 1,
            ..ClassifierConfig::default()
        });
        let snap = LandmarkSnapshot::new(pts);
        assert!(!pip.classify(&snap).is_up(Finger::Index));
        assert!(dip.classify(&snap).is_up(Finger::Index));
    }

    #[test]
    fn pinky_distance_thumb_rule() {
        let mut pts = flat();
        pts[WRIST] = Point2D::new(100.0, 200.0);
        pts[PINKY_MCP] = Point2D::new(60.0, 120.0);
        pts[THUMB_MCP] = Point2D::new(130.0, 150.0);
        pts[THUMB_IP] = Point2D::new(140.0, 140.0);
        // Tip swung away from the pinky, and to the right of the IP joint.
        pts[THUMB_TIP] = Point2D::new(170.0, 130.0);

        let cfg = ClassifierConfig { thumb: ThumbRule::PinkyDistance, ..Default::default() };
        let snap = LandmarkSnapshot::new(pts);
        assert!(FingerStateClassifier::new(cfg).classify(&snap).is_up(Finger::Thumb));
        assert!(!FingerStateClassifier::default().classify(&snap).is_up(Finger::Thumb));

        // Tucked across the palm toward the pinky.
        pts[THUMB_TIP] = Point2D::new(80.0, 130.0);
        let snap = LandmarkSnapshot::new(pts);
        assert!(!FingerStateClassifier::new(cfg).classify(&snap).is_up(Finger::Thumb));
    }

    #[test]
    fn wrong_length_is_reported_not_defaulted() {
        let c = FingerStateClassifier::default();
        assert_eq!(c.classify_points(&[]), Err(LandmarkError::WrongLength(0)));
        assert_eq!(
            c.classify_points(&[Point2D::default(); 12]),
            Err(LandmarkError::WrongLength(12))
        );
        assert!(c.classify_points(&flat()).is_ok());
    }

    #[test]
    fn reference_offset_is_clamped() {
        let c = FingerStateClassifier::new(ClassifierConfig {
            reference_offset: 9,
            ..Default::default()
        });
        assert_eq!(c.config().reference_offset, 3);
    }
}
