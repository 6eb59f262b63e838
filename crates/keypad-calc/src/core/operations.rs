//! Binary operators and the calculation rule.
//!
//! Results are rounded to a fixed number of decimal places so that
//! `0.1 + 0.2` shows up as `0.3` instead of floating-point noise.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// The four keypad operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (*)
    #[serde(rename = "*")]
    Multiply,
    /// Division (/)
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses an operator from its symbol
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Name used in element ids (`btn-plus`, ...)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Arithmetic with precision rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    /// Decimal places kept in every result
    precision: u32,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PRECISION)
    }
}

impl Calculator {
    /// Default number of decimal places
    pub const DEFAULT_PRECISION: u32 = 9;

    /// Creates a calculator rounding to `precision` decimal places
    #[must_use]
    pub const fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Returns the rounding precision
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Applies `op` to the previous and current operand.
    ///
    /// An operand of `None` means its text did not parse. In that case no
    /// arithmetic happens: the current operand is returned when it is a
    /// number, `0` otherwise.
    pub fn compute(&self, prev: Option<f64>, cur: Option<f64>, op: Operator) -> CalcResult<f64> {
        let (Some(a), Some(b)) = (prev, cur) else {
            tracing::debug!(?prev, ?cur, "operand did not parse, using fallback");
            return Ok(cur.unwrap_or(0.0));
        };

        tracing::debug!(a, %op, b, "computing");

        let raw = match op {
            Operator::Add => Self::add(a, b)?,
            Operator::Subtract => Self::subtract(a, b)?,
            Operator::Multiply => Self::multiply(a, b)?,
            Operator::Divide => Self::divide(a, b)?,
        };

        Ok(self.round(raw))
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_finite(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivideByZero);
        }
        Self::check_finite(a / b)
    }

    /// Rounds to the configured number of decimal places, half up.
    ///
    /// Integers, and values too large for the scaled form to hold a
    /// fraction, are returned as-is so that scaling cannot perturb them.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

        if value.fract() == 0.0 {
            return value;
        }
        let factor = 10f64.powi(self.precision as i32);
        let scaled = value * factor;
        if !scaled.is_finite() || scaled.abs() >= EXACT_LIMIT {
            return value;
        }
        round_half_up(scaled) / factor
    }

    fn check_finite(result: f64) -> CalcResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::InvalidResult)
        }
    }
}

/// Rounds to the nearest integer with ties going toward positive infinity
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
