//! Closed four-operator arithmetic.
//!
//! No expression text is ever built or parsed: the operator is an enum and
//! each variant dispatches to one checked rational operation.  Division is
//! true division, so `5 / 2` is exactly `5/2` and displays as `2.5`.

use std::fmt;

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, ToPrimitive};

use crate::error::EvalError;
use crate::gesture::Operator;

/// An exact calculator result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Number(Rational64);

impl Number {
    pub fn from_integer(n: i64) -> Self {
        Number(Rational64::from_integer(n))
    }

    pub fn ratio(&self) -> Rational64 {
        self.0
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// The value as an integer, if it is whole.
    pub fn to_integer(&self) -> Option<i64> {
        self.is_integer().then(|| self.0.to_integer())
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_integer(n)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_integer() {
            Some(n) => write!(f, "{}", n),
            None    => write!(f, "{}", self.to_f64()),
        }
    }
}

/// Compute `lhs op rhs`.
///
/// Operands are nominally 1–5 but nothing in the type enforces that, so a
/// zero divisor is still checked and reported.
pub fn evaluate(lhs: i64, op: Operator, rhs: i64) -> Result<Number, EvalError> {
    let a = Rational64::from_integer(lhs);
    let b = Rational64::from_integer(rhs);
    let value = match op {
        Operator::Add      => a.checked_add(&b),
        Operator::Subtract => a.checked_sub(&b),
        Operator::Multiply => a.checked_mul(&b),
        Operator::Divide   => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            a.checked_div(&b)
        }
    };
    value.map(Number).ok_or(EvalError::Overflow)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_operators_over_gesture_range() {
        for a in 1..=5i64 {
            for b in 1..=5i64 {
                assert_eq!(evaluate(a, Operator::Add, b),      Ok(Number::from(a + b)));
                assert_eq!(evaluate(a, Operator::Subtract, b), Ok(Number::from(a - b)));
                assert_eq!(evaluate(a, Operator::Multiply, b), Ok(Number::from(a * b)));
            }
        }
    }

    #[test]
    fn division_is_exact() {
        let q = evaluate(5, Operator::Divide, 2).unwrap();
        assert_eq!(q.ratio(), Rational64::new(5, 2));
        assert!(!q.is_integer());
        assert_eq!(q.to_string(), "2.5");

        let q = evaluate(4, Operator::Divide, 2).unwrap();
        assert_eq!(q.to_integer(), Some(2));
        assert_eq!(q.to_string(), "2");

        let third = evaluate(1, Operator::Divide, 3).unwrap();
        assert_eq!(third.ratio() * Rational64::from_integer(3), Rational64::from_integer(1));
    }

    #[test]
    fn division_by_zero_is_reported() {
        for a in [0, 1, 5, -3] {
            assert_eq!(evaluate(a, Operator::Divide, 0), Err(EvalError::DivisionByZero));
        }
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(evaluate(i64::MAX, Operator::Add, 1), Err(EvalError::Overflow));
        assert_eq!(evaluate(i64::MIN, Operator::Subtract, 1), Err(EvalError::Overflow));
        assert_eq!(evaluate(i64::MAX, Operator::Multiply, 2), Err(EvalError::Overflow));
    }

    #[test]
    fn fractions_convert_to_nearest_float() {
        assert_eq!(evaluate(1, Operator::Divide, 4).unwrap().to_f64(), 0.25);
        assert_eq!(evaluate(-7, Operator::Divide, 2).unwrap().to_string(), "-3.5");
        let third = evaluate(1, Operator::Divide, 3).unwrap().to_f64();
        assert!((third - 1.0 / 3.0).abs() < f64::EPSILON);
        let big = evaluate(i64::MAX, Operator::Divide, 2).unwrap().to_f64();
        assert!((big / (i64::MAX as f64 / 2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn negative_results_display_plainly() {
        assert_eq!(evaluate(1, Operator::Subtract, 5).unwrap().to_string(), "-4");
    }
}
