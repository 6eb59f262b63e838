//! WASM Driver - the page, without a browser
//!
//! Clicks and key presses go through the same path the real page uses:
//! a DOM event, the keypad lookup, then the engine. Assertions read the
//! mock DOM, never the engine.

use super::dom::{DomEvent, MockDom};
use super::keypad::{MockDomKeypadExt, WasmKeypad};
use crate::config::{ConfigResult, EngineConfig};
use crate::core::{Engine, Operator};
use crate::driver::CalculatorDriver;

/// Engine wired to a mock calculator page
#[derive(Debug)]
pub struct WasmDriver {
    engine: Engine<MockDom>,
    keypad: WasmKeypad,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn calculator_page(keypad: &WasmKeypad) -> MockDom {
    let mut dom = MockDom::calculator();
    dom.add_keypad(keypad);
    dom
}

impl WasmDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        let keypad = WasmKeypad::new();
        Self {
            engine: Engine::new(calculator_page(&keypad)),
            keypad,
        }
    }

    /// Creates a driver with a custom configuration
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        let keypad = WasmKeypad::new();
        Ok(Self {
            engine: Engine::with_config(calculator_page(&keypad), config)?,
            keypad,
        })
    }

    /// The mock page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.engine.frontend()
    }

    /// The engine behind the page
    #[must_use]
    pub fn engine(&self) -> &Engine<MockDom> {
        &self.engine
    }

    /// Clicks an element. Returns false when it is not a keypad button.
    pub fn click(&mut self, element_id: &str) -> bool {
        self.engine
            .frontend_mut()
            .dispatch_event(DomEvent::click(element_id));
        match self.keypad.handle_click(element_id) {
            Some(action) => {
                self.engine.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Sends a document-level key press
    pub fn press_key(&mut self, key: &str) -> bool {
        self.engine
            .frontend_mut()
            .dispatch_event(DomEvent::key_press(key));
        match WasmKeypad::key_to_action(key) {
            Some(action) => {
                self.engine.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Lets the armed error timer elapse
    pub fn elapse_error_timeout(&mut self) -> bool {
        if !self.engine.frontend_mut().take_pending_reset() {
            return false;
        }
        self.engine.reset_after_error();
        true
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, key: &str) -> bool {
        self.press_key(key)
    }

    fn display(&self) -> String {
        self.dom().display_text().to_string()
    }

    fn is_error(&self) -> bool {
        self.dom().display_has_error()
    }

    fn active_operator(&self) -> Option<Operator> {
        let active = self.dom().active_buttons();
        Operator::ALL
            .into_iter()
            .find(|op| active.iter().any(|id| id.strip_prefix("btn-") == Some(op.name())))
    }

    fn fire_pending_reset(&mut self) -> bool {
        self.elapse_error_timeout()
    }

    fn clear(&mut self) {
        self.click("btn-clear");
    }
}
