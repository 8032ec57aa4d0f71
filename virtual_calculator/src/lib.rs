//! # virtual_calculator
//!
//! Hand-gesture calculator: hold up fingers for operands, make a shape for
//! the operator, open your palm to evaluate and close your fist to clear.
//! Hands come from a keyboard-driven simulator or a LeapMotion controller;
//! the read-out is software rendered with `minifb`.
//!
//! ## Gesture → Action mapping
//!
//! | Fingers (thumb → pinky) | Action |
//! |---|---|
//! | `00000` fist | Clear all |
//! | `11001` | Operator `+` |
//! | `10001` | Operator `-` |
//! | `01001` | Operator `*` |
//! | `00001` | Operator `/` |
//! | `11111` with both operands and an operator set | Evaluate (once per hold) |
//! | any other shape, 1–5 fingers up | Operand = number of fingers |
//!
//! The first operand is taken before an operator is chosen, the second one
//! after.  A result (or an error) stays on screen until the fist clears it.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard shortcuts pose a synthetic hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC
//!   (select it with `--source leap`).
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Hand |
//! |---|---|
//! | `0`–`5` | Fist, or 1–5 fingers |
//! | `A` `S` `X` `D` | `+` `-` `*` `/` shapes |
//! | `T` `I` `M` `R` `P` | Flip thumb / index / middle / ring / pinky |
//! | `H` | Move the hand in / out of view |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod source;
pub mod visualizer;

pub use app::{run, AppState, FpsCounter};
pub use cli::Cli;
pub use config::{AppConfig, SourceKind};
pub use error::AppError;
pub use source::{spawn_landmark_source, HandFrame, LandmarkSource, SimHand, SimInput, SimKey, SimLandmarkSource};
