//! Calculator core: operators, arithmetic, display formatting and the
//! accumulator engine.
//!
//! Nothing in here touches a display directly. The [`Engine`] talks to the
//! outside world only through the [`Frontend`](crate::frontend::Frontend)
//! traits, so every rule below can be exercised headless.

mod engine;
pub mod format;
mod operations;
mod state;

pub use engine::Engine;
pub use operations::{Calculator, Operator};
pub use state::CalculatorState;

use thiserror::Error;

/// Result type for calculator arithmetic
pub type CalcResult<T> = Result<T, CalcError>;

/// Arithmetic failures the engine reports on the display.
///
/// These never escape the engine's public operations: they are turned into
/// the error indicator plus a scheduled reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Divisor operand was exactly zero
    #[error("Division by zero")]
    DivideByZero,
    /// Result overflowed or was not a finite number
    #[error("Invalid result: not a finite number")]
    InvalidResult,
}
