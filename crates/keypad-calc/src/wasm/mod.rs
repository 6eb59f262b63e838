//! Browser frontend
//!
//! The mock DOM and driver are always compiled so the page logic can be
//! tested natively. The wasm-bindgen entry point needs the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, ERROR_CLASS, OPERATOR_ATTR};
pub use driver::WasmDriver;
pub use keypad::{button_id, KeypadButtonDef, MockDomKeypadExt, WasmKeypad};
