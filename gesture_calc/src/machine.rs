//! Calculator control flow.
//!
//! `CalculatorStateMachine` owns the one `CalculatorState` and applies at
//! most one [`GestureEvent`] per frame:
//!
//! ```text
//!  Waiting ──operand──▶ Operand1Set ──operator──▶ OperatorSet ──operand──▶ Operand2Set
//!     ▲                                                                        │
//!     │                                                                    evaluate
//!     │                                                                        ▼
//!     └───────────────────────────── clear (from any mode) ───────────── Result / Error
//! ```
//!
//! Any other (mode, event) pair is ignored.  Because a held hand shape is
//! re-sampled every frame, evaluation latches: once it has fired, further
//! `Evaluate` events are suppressed until a Clear.

use std::fmt;

use tracing::{debug, info};

use crate::error::EvalError;
use crate::evaluator::{evaluate, Number};
use crate::gesture::{GestureEvent, Operator};

// ════════════════════════════════════════════════════════════════════════════
// Mode
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Waiting,
    Operand1Set,
    OperatorSet,
    Operand2Set,
    Result,
    Error,
}

impl Mode {
    /// Upper-case label for the read-out.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Waiting     => "WAITING",
            Mode::Operand1Set => "NUMBER 1",
            Mode::OperatorSet => "OPERATOR SELECTED",
            Mode::Operand2Set => "NUMBER 2",
            Mode::Result      => "RESULT",
            Mode::Error       => "ERROR",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outcome
// ════════════════════════════════════════════════════════════════════════════

/// What an evaluation produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Value(Number),
    Error(EvalError),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(n) => write!(f, "{}", n),
            Outcome::Error(e) => write!(f, "Error: {}", e),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CalculatorState
// ════════════════════════════════════════════════════════════════════════════

/// Operands, operator, result and latch.
///
/// Only [`CalculatorStateMachine`] mutates this, which keeps the invariants:
/// `operand2` implies `operator`, `result` is present exactly in
/// `Result`/`Error`, and the latch is only ever set in those two modes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculatorState {
    mode:               Mode,
    operand1:           Option<u8>,
    operator:           Option<Operator>,
    operand2:           Option<u8>,
    result:             Option<Outcome>,
    evaluation_latched: bool,
}

impl CalculatorState {
    pub fn mode(&self)     -> Mode             { self.mode }
    pub fn operand1(&self) -> Option<u8>       { self.operand1 }
    pub fn operator(&self) -> Option<Operator> { self.operator }
    pub fn operand2(&self) -> Option<u8>       { self.operand2 }
    pub fn result(&self)   -> Option<Outcome>  { self.result }
    pub fn is_latched(&self) -> bool           { self.evaluation_latched }

    /// The numeric result, if the last evaluation succeeded.
    pub fn value(&self) -> Option<Number> {
        match self.result {
            Some(Outcome::Value(n)) => Some(n),
            _ => None,
        }
    }

    pub fn is_initial(&self) -> bool {
        *self == CalculatorState::default()
    }

    /// `"3 + 4"`, once both operands and the operator are known.
    pub fn expression(&self) -> Option<String> {
        match (self.operand1, self.operator, self.operand2) {
            (Some(a), Some(op), Some(b)) => Some(format!("{} {} {}", a, op, b)),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Transition
// ════════════════════════════════════════════════════════════════════════════

/// What applying one event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Clear: back to the initial state.
    Reset,
    /// An operand or the operator was stored.
    Applied,
    /// Evaluation fired; the state is now `Result` or `Error`.
    Evaluated,
    /// A repeated `Evaluate` while latched.
    Suppressed,
    /// Not legal in the current mode; nothing changed.
    Ignored,
}

impl Transition {
    pub fn changed_state(self) -> bool {
        matches!(self, Transition::Reset | Transition::Applied | Transition::Evaluated)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DisplaySnapshot
// ════════════════════════════════════════════════════════════════════════════

/// Read-only view handed to the presentation layer each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub mode:     Mode,
    pub operand1: Option<u8>,
    pub operator: Option<Operator>,
    pub operand2: Option<u8>,
    pub result:   Option<Outcome>,
    /// Label of the last gesture that changed state.
    pub gesture:  String,
}

impl DisplaySnapshot {
    /// `Mode / Num1 / Op / Num2 / Result / Gesture` read-out lines.
    pub fn lines(&self) -> [String; 6] {
        fn opt<T: fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map_or_else(|| "-".to_string(), |x| x.to_string())
        }
        [
            format!("Mode: {}", self.mode),
            format!("Num1: {}", opt(&self.operand1)),
            format!("Op: {}", opt(&self.operator)),
            format!("Num2: {}", opt(&self.operand2)),
            format!("Result: {}", opt(&self.result)),
            format!("Gesture: {}", self.gesture),
        ]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CalculatorStateMachine
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct CalculatorStateMachine {
    state:   CalculatorState,
    gesture: String,
}

impl CalculatorStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Label of the last gesture that changed state (empty at start).
    pub fn gesture_label(&self) -> &str {
        &self.gesture
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            mode:     self.state.mode,
            operand1: self.state.operand1,
            operator: self.state.operator,
            operand2: self.state.operand2,
            result:   self.state.result,
            gesture:  self.gesture.clone(),
        }
    }

    /// Apply one frame's event.
    pub fn apply(&mut self, event: GestureEvent) -> Transition {
        let from = self.state.mode;
        let transition = match (from, event) {
            // ── Clear: from anywhere ──────────────────────────────────────
            (_, GestureEvent::Clear) => {
                self.state = CalculatorState::default();
                self.gesture = "Clear All".to_string();
                Transition::Reset
            }

            // ── Operand 1 ─────────────────────────────────────────────────
            (Mode::Waiting, GestureEvent::SetOperand(v)) => {
                self.state.operand1 = Some(v);
                self.state.mode = Mode::Operand1Set;
                self.state.evaluation_latched = false;
                self.gesture = format!("Number 1: {}", v);
                Transition::Applied
            }

            // ── Operator ──────────────────────────────────────────────────
            (Mode::Operand1Set, GestureEvent::SetOperator(op)) => {
                self.state.operator = Some(op);
                self.state.mode = Mode::OperatorSet;
                self.state.evaluation_latched = false;
                self.gesture = GestureEvent::SetOperator(op).to_string();
                Transition::Applied
            }

            // ── Operand 2 ─────────────────────────────────────────────────
            (Mode::OperatorSet, GestureEvent::SetOperand(v)) => {
                self.state.operand2 = Some(v);
                self.state.mode = Mode::Operand2Set;
                self.state.evaluation_latched = false;
                self.gesture = format!("Number 2: {}", v);
                Transition::Applied
            }

            // ── Evaluate (latched) ────────────────────────────────────────
            (Mode::Operand2Set | Mode::Result | Mode::Error, GestureEvent::Evaluate)
                if self.state.evaluation_latched =>
            {
                Transition::Suppressed
            }

            // ── Evaluate ──────────────────────────────────────────────────
            (Mode::Operand2Set, GestureEvent::Evaluate) => self.evaluate(),

            _ => Transition::Ignored,
        };

        match transition {
            Transition::Ignored | Transition::Suppressed => {}
            _ => debug!(
                ?event,
                ?transition,
                from = %from,
                to = %self.state.mode,
                "calculator transition"
            ),
        }
        transition
    }

    fn evaluate(&mut self) -> Transition {
        let s = &mut self.state;
        let (Some(a), Some(op), Some(b)) = (s.operand1, s.operator, s.operand2) else {
            // Operand2Set always has all three; stay put if it somehow doesn't.
            return Transition::Ignored;
        };

        let expression = format!("{} {} {}", a, op, b);
        match evaluate(i64::from(a), op, i64::from(b)) {
            Ok(n) => {
                s.result = Some(Outcome::Value(n));
                s.mode = Mode::Result;
                info!(%expression, result = %n, "evaluated");
                self.gesture = format!("{} = {}", expression, n);
            }
            Err(e) => {
                s.result = Some(Outcome::Error(e));
                s.mode = Mode::Error;
                info!(%expression, error = %e, "evaluation failed");
                self.gesture = format!("{} = Error ({})", expression, e);
            }
        }
        self.state.evaluation_latched = true;
        Transition::Evaluated
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
