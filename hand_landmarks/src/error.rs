//! Landmark input errors.

use thiserror::Error;

/// Errors raised while turning raw detector output into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandmarkError {
    /// The detector returned a point list that is not a full hand.
    #[error("expected 21 hand landmarks, got {0}")]
    WrongLength(usize),

    /// A finger vector's text form was not five `0`/`1` characters.
    #[error("invalid finger pattern {0:?}: expected five 0/1 digits")]
    BadPattern(String),
}
