//! # hand_landmarks
//!
//! 21-point hand landmark snapshots and the finger-state classifier that
//! turns them into a five-finger extended/curled vector.
//!
//! ## Landmark layout
//!
//! | Index | Joint |
//! |---|---|
//! | 0 | Wrist |
//! | 1–4 | Thumb CMC, MCP, IP, TIP |
//! | 5–8 | Index MCP, PIP, DIP, TIP |
//! | 9–12 | Middle MCP, PIP, DIP, TIP |
//! | 13–16 | Ring MCP, PIP, DIP, TIP |
//! | 17–20 | Pinky MCP, PIP, DIP, TIP |
//!
//! Coordinates are image pixels of a horizontally mirrored frame, y down.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_landmarks::{FingerStateClassifier, FingerVector, HandPose};
//!
//! let add = FingerVector::from_bits([1, 1, 0, 0, 1]);
//! let snapshot = HandPose::default().snapshot(add);
//! assert_eq!(FingerStateClassifier::default().classify(&snapshot), add);
//! ```

pub mod classifier;
pub mod error;
pub mod finger;
pub mod point;
pub mod pose;

pub use classifier::{ClassifierConfig, FingerStateClassifier, ThumbRule};
pub use error::LandmarkError;
pub use finger::{Finger, FingerVector};
pub use point::{LandmarkSnapshot, Point2D, HAND_SKELETON, LANDMARK_COUNT, TIP_IDS};
pub use pose::HandPose;
