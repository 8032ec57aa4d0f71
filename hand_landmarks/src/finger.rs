//! Per-finger extended/curled state.

use std::fmt;
use std::str::FromStr;

use crate::error::LandmarkError;

/// The five digits, in vector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb  => "Thumb",
            Finger::Index  => "Index",
            Finger::Middle => "Middle",
            Finger::Ring   => "Ring",
            Finger::Pinky  => "Pinky",
        }
    }

    pub fn slot(self) -> usize {
        self as usize
    }
}

/// `[thumb, index, middle, ring, pinky]`, `true` = extended.
///
/// The text form is a five-character bit string in the same order, so the
/// "add" gesture (thumb, index and pinky up) reads `"11001"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FingerVector([bool; 5]);

impl FingerVector {
    /// Fist.
    pub const CLOSED: FingerVector = FingerVector([false; 5]);
    /// Open palm.
    pub const OPEN: FingerVector = FingerVector([true; 5]);

    pub const fn new(states: [bool; 5]) -> Self {
        FingerVector(states)
    }

    /// Build from 0/1 flags, e.g. `FingerVector::from_bits([1, 1, 0, 0, 1])`.
    pub const fn from_bits(bits: [u8; 5]) -> Self {
        FingerVector([
            bits[0] != 0,
            bits[1] != 0,
            bits[2] != 0,
            bits[3] != 0,
            bits[4] != 0,
        ])
    }

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger.slot()]
    }

    pub fn set(&mut self, finger: Finger, up: bool) {
        self.0[finger.slot()] = up;
    }

    pub fn toggle(&mut self, finger: Finger) {
        self.0[finger.slot()] ^= true;
    }

    /// Number of extended fingers (0–5).
    pub fn count(&self) -> u8 {
        self.0.iter().filter(|&&up| up).count() as u8
    }

    pub fn states(&self) -> [bool; 5] {
        self.0
    }

    /// `(finger, is_up)` pairs in vector order.
    pub fn iter(&self) -> impl Iterator<Item = (Finger, bool)> + '_ {
        Finger::ALL.iter().map(move |&f| (f, self.is_up(f)))
    }

    /// Every one of the 32 possible vectors, counting up from the fist.
    pub fn all() -> impl Iterator<Item = FingerVector> {
        (0u8..32).map(|m| {
            FingerVector([
                m & 0b10000 != 0,
                m & 0b01000 != 0,
                m & 0b00100 != 0,
                m & 0b00010 != 0,
                m & 0b00001 != 0,
            ])
        })
    }
}

impl fmt::Display for FingerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for FingerVector {
    type Err = LandmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut states = [false; 5];
        let mut n = 0;
        for ch in s.chars() {
            if n == 5 {
                return Err(LandmarkError::BadPattern(s.to_string()));
            }
            states[n] = match ch {
                '1' => true,
                '0' => false,
                _   => return Err(LandmarkError::BadPattern(s.to_string())),
            };
            n += 1;
        }
        if n != 5 {
            return Err(LandmarkError::BadPattern(s.to_string()));
        }
        Ok(FingerVector(states))
    }
}

impl From<[bool; 5]> for FingerVector {
    fn from(states: [bool; 5]) -> Self {
        FingerVector(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_extended_fingers() {
        assert_eq!(FingerVector::CLOSED.count(), 0);
        assert_eq!(FingerVector::OPEN.count(), 5);
        assert_eq!(FingerVector::from_bits([1, 1, 0, 0, 1]).count(), 3);
    }

    #[test]
    fn bit_string_round_trip() {
        let v: FingerVector = "11001".parse().unwrap();
        assert_eq!(v, FingerVector::from_bits([1, 1, 0, 0, 1]));
        assert_eq!(v.to_string(), "11001");
    }

    #[test]
    fn bad_patterns_are_rejected() {
        for s in ["", "1100", "110011", "11a01", "2 0 0 0 0"] {
            assert!(s.parse::<FingerVector>().is_err(), "{s:?} should fail");
        }
    }

    #[test]
    fn toggle_flips_one_finger() {
        let mut v = FingerVector::CLOSED;
        v.toggle(Finger::Pinky);
        assert_eq!(v.to_string(), "00001");
        v.toggle(Finger::Pinky);
        assert_eq!(v, FingerVector::CLOSED);
    }

    #[test]
    fn all_enumerates_32_distinct_vectors() {
        let all: Vec<_> = FingerVector::all().collect();
        assert_eq!(all.len(), 32);
        assert_eq!(all[0], FingerVector::CLOSED);
        assert_eq!(all[31], FingerVector::OPEN);
        let mut seen = std::collections::HashSet::new();
        assert!(all.iter().all(|v| seen.insert(*v)));
    }
}
