//! Keypad Calculator - a four-function accumulator engine
//!
//! The engine behind a pocket-calculator keypad: digits build an operand,
//! operators evaluate left to right as they are pressed, `=` finishes the
//! pending operation. Results are rounded to nine decimal places, long
//! numbers switch to exponential notation and integers get thousands
//! grouping.
//!
//! The engine never touches a screen. It drives any [`frontend::Frontend`]:
//! a recording buffer for tests and scripted replay, a mock DOM, the real
//! browser page (feature `wasm`) or a terminal (the `keypad-calc` binary).
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut engine = Engine::new(RecordingFrontend::new());
//! for key in ["7", "+", "3", "Enter"] {
//!     engine.press_key(key);
//! }
//! assert_eq!(engine.frontend().text(), "10");
//!
//! // Division by zero shows the error and asks for a timed reset
//! for key in ["5", "/", "0", "="] {
//!     engine.press_key(key);
//! }
//! assert_eq!(engine.frontend().text(), "Error");
//! assert!(engine.frontend().pending_reset().is_some());
//! engine.reset_after_error();
//! assert_eq!(engine.frontend().text(), "0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod frontend;
pub mod input;

/// Browser frontend - always available for testing
/// (the mock DOM runs without browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, ConfigResult, EngineConfig, GroupingStyle};
    pub use crate::core::format::format_display;
    pub use crate::core::{CalcError, CalcResult, Calculator, CalculatorState, Engine, Operator};
    pub use crate::driver::{CalculatorDriver, HeadlessDriver};
    pub use crate::frontend::{
        DisplaySink, Frame, Frontend, OperatorHighlight, RecordingFrontend, ResetTimer,
    };
    pub use crate::input::KeypadAction;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver, WasmKeypad};
}
