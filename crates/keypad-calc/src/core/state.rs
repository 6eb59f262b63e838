//! The running-calculation state owned by one engine.

use serde::{Deserialize, Serialize};

use crate::core::Operator;

/// Accumulator state: "current operand, pending operand, pending operator".
///
/// `pending_operator.is_some()` implies `previous_operand.is_some()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Text of the number being entered or shown. Never holds grouping.
    pub current_operand: String,
    /// Operand captured when an operator was chosen
    pub previous_operand: Option<f64>,
    /// Operator waiting for its right-hand side
    pub pending_operator: Option<Operator>,
    /// Next digit starts a fresh operand instead of appending
    pub awaiting_new_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Text of a freshly cleared operand
    pub const INITIAL_OPERAND: &'static str = "0";

    /// Creates the initial session state
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_operand: Self::INITIAL_OPERAND.to_string(),
            previous_operand: None,
            pending_operator: None,
            awaiting_new_operand: false,
        }
    }

    /// Returns true if this is exactly the initial state
    #[must_use]
    pub fn is_initial(&self) -> bool {
        *self == Self::new()
    }

    /// Restores the initial state in place
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
