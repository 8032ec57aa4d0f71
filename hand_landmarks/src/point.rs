//! Pixel-space landmark points and the fixed 21-joint hand layout.

use crate::error::LandmarkError;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices (wrist, then four joints per digit, thumb → pinky)
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Fingertip indices, thumb → pinky.
pub const TIP_IDS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Bone connections for drawing a hand skeleton.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

// ════════════════════════════════════════════════════════════════════════════
// Point2D
// ════════════════════════════════════════════════════════════════════════════

/// A landmark position in image pixels (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Point2D { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point2D {
    fn from((x, y): (f32, f32)) -> Self {
        Point2D { x, y }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSnapshot
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: exactly [`LANDMARK_COUNT`] points in anatomical order.
///
/// A snapshot can only be built from a complete detection; partial
/// detections are rejected with [`LandmarkError::WrongLength`] so that the
/// caller treats the frame as "no hand".
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSnapshot {
    points: [Point2D; LANDMARK_COUNT],
}

impl LandmarkSnapshot {
    pub fn new(points: [Point2D; LANDMARK_COUNT]) -> Self {
        LandmarkSnapshot { points }
    }

    /// Build a snapshot from a detector's raw point list.
    pub fn from_points(points: &[Point2D]) -> Result<Self, LandmarkError> {
        let points: [Point2D; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongLength(points.len()))?;
        Ok(LandmarkSnapshot { points })
    }

    pub fn point(&self, idx: usize) -> Point2D {
        self.points[idx]
    }

    pub fn points(&self) -> &[Point2D; LANDMARK_COUNT] {
        &self.points
    }
}

impl TryFrom<Vec<Point2D>> for LandmarkSnapshot {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        LandmarkSnapshot::from_points(&points)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_detection_builds_snapshot() {
        let pts: Vec<Point2D> = (0..21).map(|i| Point2D::new(i as f32, 0.0)).collect();
        let snap = LandmarkSnapshot::from_points(&pts).unwrap();
        assert_eq!(snap.point(THUMB_TIP), Point2D::new(4.0, 0.0));
        assert_eq!(snap.points().len(), LANDMARK_COUNT);
    }

    #[test]
    fn partial_detection_is_rejected() {
        let pts = vec![Point2D::default(); 20];
        assert_eq!(
            LandmarkSnapshot::try_from(pts),
            Err(LandmarkError::WrongLength(20))
        );
    }

    #[test]
    fn oversized_detection_is_rejected() {
        let pts = vec![Point2D::default(); 42];
        assert_eq!(
            LandmarkSnapshot::from_points(&pts),
            Err(LandmarkError::WrongLength(42))
        );
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }
}
