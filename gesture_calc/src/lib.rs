//! # gesture_calc
//!
//! Two-operand calculator driven entirely by hand shapes.
//!
//! Each frame a [`FingerVector`](hand_landmarks::FingerVector) is interpreted
//! as a [`GestureEvent`], which the [`CalculatorStateMachine`] applies to its
//! single [`CalculatorState`].  Evaluation is a closed dispatch over four
//! operators; it is latched so that a held open palm evaluates once.
//!
//! ## Quick start
//!
//! ```rust
//! use gesture_calc::{FramePipeline, Mode, Number};
//! use hand_landmarks::FingerVector;
//!
//! let mut calc = FramePipeline::default();
//! for bits in ["01110", "11001", "01111", "11111", "11111"] {
//!     let fingers: FingerVector = bits.parse().unwrap();
//!     calc.process_fingers(Some(fingers));
//! }
//! let state = calc.machine().state();
//! assert_eq!(state.mode(), Mode::Result);
//! assert_eq!(state.value(), Some(Number::from(7)));
//! ```

pub mod error;
pub mod evaluator;
pub mod gesture;
pub mod machine;
pub mod pipeline;

pub use error::{EvalError, GestureError};
pub use evaluator::{evaluate, Number};
pub use gesture::{digit_gesture, interpret, GestureEvent, Operator, OPERATOR_GESTURES};
pub use machine::{
    CalculatorState, CalculatorStateMachine, DisplaySnapshot, Mode, Outcome, Transition,
};
pub use pipeline::{FramePipeline, FrameReport};
