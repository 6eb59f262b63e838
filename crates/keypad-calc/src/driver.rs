//! Unified calculator driver
//!
//! Write the keypad scenario once, run it against every frontend. The
//! headless driver below and the browser driver in [`crate::wasm`] both
//! implement [`CalculatorDriver`], and the `verify_*` functions only speak
//! that trait.

use crate::core::{Engine, Operator};
use crate::frontend::RecordingFrontend;

/// Keypad-level interface shared by every frontend
pub trait CalculatorDriver {
    /// Presses a key (DOM `KeyboardEvent.key` spelling). Returns false when
    /// the key is not mapped.
    fn press(&mut self, key: &str) -> bool;

    /// Text currently on the display
    fn display(&self) -> String;

    /// Whether the display is in the error state
    fn is_error(&self) -> bool;

    /// Operator key currently highlighted
    fn active_operator(&self) -> Option<Operator>;

    /// Lets an armed error-reset timer elapse. Returns false when none was
    /// armed.
    fn fire_pending_reset(&mut self) -> bool;

    /// Presses the clear key
    fn clear(&mut self) {
        self.press("Escape");
    }

    /// Presses every character of `keys` in turn
    fn press_all(&mut self, keys: &str) {
        for ch in keys.chars() {
            self.press(ch.encode_utf8(&mut [0; 4]));
        }
    }
}

/// Driver over an engine with no screen at all
#[derive(Debug)]
pub struct HeadlessDriver {
    engine: Engine<RecordingFrontend>,
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Engine::new(RecordingFrontend::new()))
    }

    /// Wraps an existing engine
    #[must_use]
    pub fn with_engine(engine: Engine<RecordingFrontend>) -> Self {
        Self { engine }
    }

    /// The engine
    #[must_use]
    pub fn engine(&self) -> &Engine<RecordingFrontend> {
        &self.engine
    }

    /// Mutable access to the engine
    pub fn engine_mut(&mut self) -> &mut Engine<RecordingFrontend> {
        &mut self.engine
    }
}

impl CalculatorDriver for HeadlessDriver {
    fn press(&mut self, key: &str) -> bool {
        self.engine.press_key(key)
    }

    fn display(&self) -> String {
        self.engine.frontend().text().to_string()
    }

    fn is_error(&self) -> bool {
        self.engine.frontend().is_error_style()
    }

    fn active_operator(&self) -> Option<Operator> {
        self.engine.frontend().highlighted()
    }

    fn fire_pending_reset(&mut self) -> bool {
        if !self.engine.frontend_mut().take_pending_reset() {
            return false;
        }
        self.engine.reset_after_error();
        true
    }
}

// ===== Unified scenarios =====
// These work with ANY CalculatorDriver implementation

/// The four operators, one at a time
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.press_all("7+3=");
    assert_eq!(driver.display(), "10");
    driver.clear();

    driver.press_all("10-4=");
    assert_eq!(driver.display(), "6");
    driver.clear();

    driver.press_all("6*7=");
    assert_eq!(driver.display(), "42");
    driver.clear();

    driver.press_all("20/8=");
    assert_eq!(driver.display(), "2.5");
    driver.clear();
}

/// Operators evaluate left to right as they are keyed
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.press_all("2+3*");
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.active_operator(), Some(Operator::Multiply));
    driver.press_all("4=");
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.active_operator(), None);

    // back-to-back operators only swap the pending one
    driver.clear();
    driver.press_all("9+-");
    assert_eq!(driver.active_operator(), Some(Operator::Subtract));
    driver.press_all("4=");
    assert_eq!(driver.display(), "5");
    driver.clear();
}

/// Entry rules: the digit cap, a single decimal point and grouping
pub fn verify_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.press_all("1234567890123");
    assert_eq!(driver.display(), "123,456,789,012");
    driver.clear();

    driver.press_all("1..5.");
    assert_eq!(driver.display(), "1.5");
    driver.clear();

    driver.press_all(".1+.2=");
    assert_eq!(driver.display(), "0.3");
    driver.clear();
}

/// Backspace trims the operand down to `0`
pub fn verify_delete<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.press_all("120");
    driver.press("Backspace");
    assert_eq!(driver.display(), "12");
    driver.clear();

    driver.press("5");
    driver.press("Backspace");
    assert_eq!(driver.display(), "0");
    driver.clear();
}

/// Divide by zero shows the error, then the timed reset restores `0`
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.press_all("5/0=");
    assert_eq!(driver.display(), "Error");
    assert!(driver.is_error());

    // latched until the reset
    driver.press_all("7");
    assert_eq!(driver.display(), "Error");

    assert!(driver.fire_pending_reset());
    assert_eq!(driver.display(), "0");
    assert!(!driver.is_error());
    assert!(!driver.fire_pending_reset());

    // clear dismisses the error early
    driver.press_all("1/0=");
    driver.clear();
    assert_eq!(driver.display(), "0");
    assert!(!driver.fire_pending_reset());
}

/// Pressing `=` again after a result changes nothing
pub fn verify_idempotent_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();

    driver.press_all("6*7=");
    driver.press_all("==");
    assert_eq!(driver.display(), "42");
    driver.clear();
}

/// Every scenario in turn
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_entry(driver);
    verify_delete(driver);
    verify_error_recovery(driver);
    verify_idempotent_equals(driver);
}
