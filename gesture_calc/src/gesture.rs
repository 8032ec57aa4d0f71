//! Gesture vocabulary and the finger-vector interpreter.
//!
//! ## Vocabulary (checked top to bottom, first match wins)
//!
//! | Fingers (T I M R P) | Condition | Event |
//! |---|---|---|
//! | `00000` | — | [`GestureEvent::Clear`] |
//! | `11111` | operand 1, operator and operand 2 all set | [`GestureEvent::Evaluate`] |
//! | `11001` | — | `SetOperator(+)` |
//! | `10001` | — | `SetOperator(-)` |
//! | `01001` | — | `SetOperator(*)` |
//! | `00001` | — | `SetOperator(/)` |
//! | any other with 1–5 fingers up | — | `SetOperand(count)` |
//! | no hand | — | [`GestureEvent::None`] |
//!
//! The open palm doubles as "operand 5" until both operands and the
//! operator exist, at which point it means "evaluate".

use std::fmt;
use std::str::FromStr;

use hand_landmarks::FingerVector;

use crate::error::GestureError;
use crate::machine::CalculatorState;

// ════════════════════════════════════════════════════════════════════════════
// Operator
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add      => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide   => '/',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add      => "Add",
            Operator::Subtract => "Subtract",
            Operator::Multiply => "Multiply",
            Operator::Divide   => "Divide",
        }
    }

    /// The hand shape that selects this operator.
    pub fn gesture(self) -> FingerVector {
        OPERATOR_GESTURES
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(v, _)| *v)
            .unwrap_or(FingerVector::CLOSED)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+"       => Ok(Operator::Add),
            "-"       => Ok(Operator::Subtract),
            "*" | "x" => Ok(Operator::Multiply),
            "/"       => Ok(Operator::Divide),
            other     => Err(GestureError::UnknownOperator(other.to_string())),
        }
    }
}

/// Operator hand shapes, in precedence order.
pub const OPERATOR_GESTURES: [(FingerVector, Operator); 4] = [
    (FingerVector::from_bits([1, 1, 0, 0, 1]), Operator::Add),
    (FingerVector::from_bits([1, 0, 0, 0, 1]), Operator::Subtract),
    (FingerVector::from_bits([0, 1, 0, 0, 1]), Operator::Multiply),
    (FingerVector::from_bits([0, 0, 0, 0, 1]), Operator::Divide),
];

/// A hand shape that reads as `SetOperand(n)` for `n` in 1–5, and as
/// `Clear` for 0.  Counting starts at the index finger so no shape collides
/// with an operator gesture.
pub fn digit_gesture(n: u8) -> Option<FingerVector> {
    let v = match n {
        0 => [0, 0, 0, 0, 0],
        1 => [0, 1, 0, 0, 0],
        2 => [0, 1, 1, 0, 0],
        3 => [0, 1, 1, 1, 0],
        4 => [0, 1, 1, 1, 1],
        5 => [1, 1, 1, 1, 1],
        _ => return None,
    };
    Some(FingerVector::from_bits(v))
}

// ════════════════════════════════════════════════════════════════════════════
// GestureEvent
// ════════════════════════════════════════════════════════════════════════════

/// The single symbolic action recognised in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureEvent {
    #[default]
    None,
    Clear,
    Evaluate,
    SetOperator(Operator),
    /// Number of extended fingers, 1–5.
    SetOperand(u8),
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::None            => f.write_str("None"),
            GestureEvent::Clear           => f.write_str("Clear All"),
            GestureEvent::Evaluate        => f.write_str("Evaluate"),
            GestureEvent::SetOperator(op) => write!(f, "{} ({})", op.name(), op),
            GestureEvent::SetOperand(v)   => write!(f, "Number {}", v),
        }
    }
}

/// Map this frame's finger vector to a gesture event.
///
/// `state` is only consulted for the open-palm evaluate guard; every other
/// shape is interpreted the same way regardless of calculator state.
pub fn interpret(fingers: Option<FingerVector>, state: &CalculatorState) -> GestureEvent {
    let Some(fingers) = fingers else {
        return GestureEvent::None;
    };

    if fingers == FingerVector::CLOSED {
        return GestureEvent::Clear;
    }

    if fingers == FingerVector::OPEN
        && state.operand1().is_some()
        && state.operator().is_some()
        && state.operand2().is_some()
    {
        return GestureEvent::Evaluate;
    }

    if let Some(&(_, op)) = OPERATOR_GESTURES.iter().find(|(v, _)| *v == fingers) {
        return GestureEvent::SetOperator(op);
    }

    match fingers.count() {
        n @ 1..=5 => GestureEvent::SetOperand(n),
        _         => GestureEvent::None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
