//! Browser bindings
//!
//! The page owns the DOM and the `setTimeout`. After every call it reads
//! `display`, `is_error`, `active_operator` and `pending_reset_ms` and
//! applies them; when its timeout fires it calls `reset_elapsed`.

use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::EngineConfig;
use crate::core::{Engine, Operator};
use crate::frontend::{DisplaySink, OperatorHighlight, ResetTimer};
use crate::wasm::keypad::WasmKeypad;

/// Latest presentation state, read back by the page
#[derive(Debug, Default)]
struct PageState {
    display: String,
    error: bool,
    active: Option<Operator>,
    pending_reset: Option<Duration>,
}

impl DisplaySink for PageState {
    fn render(&mut self, text: &str) {
        self.display = text.to_string();
    }

    fn set_error_style(&mut self, error: bool) {
        self.error = error;
    }
}

impl OperatorHighlight for PageState {
    fn highlight(&mut self, op: Option<Operator>) {
        self.active = op;
    }
}

impl ResetTimer for PageState {
    fn schedule_reset(&mut self, after: Duration) {
        self.pending_reset = Some(after);
    }

    fn cancel_reset(&mut self) {
        self.pending_reset = None;
    }
}

/// Browser Calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: Engine<PageState>,
    keypad: WasmKeypad,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a calculator with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            engine: Engine::new(PageState::default()),
            keypad: WasmKeypad::new(),
        }
    }

    /// Create a calculator from a JSON configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();
        let config =
            EngineConfig::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = Engine::with_config(PageState::default(), config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            engine,
            keypad: WasmKeypad::new(),
        })
    }

    /// Handle a keypad button click by element ID. Returns false for
    /// elements that are not keypad buttons.
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        match self.keypad.handle_click(button_id) {
            Some(action) => {
                self.engine.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Handle a document key press. Returns true when the key was consumed,
    /// so the page can call `preventDefault`.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.engine.press_key(key)
    }

    /// Text for the display element
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.engine.frontend().display.clone()
    }

    /// Whether the display should carry the error class
    #[wasm_bindgen(getter, js_name = isError)]
    pub fn is_error(&self) -> bool {
        self.engine.frontend().error
    }

    /// Symbol of the operator button to highlight
    #[wasm_bindgen(getter, js_name = activeOperator)]
    pub fn active_operator(&self) -> Option<String> {
        self.engine.frontend().active.map(|op| op.symbol().to_string())
    }

    /// Delay for the page's reset timeout, if one should be armed.
    /// Reading it disarms it, so each reset is scheduled once.
    #[wasm_bindgen(js_name = takePendingResetMs)]
    pub fn pending_reset_ms(&mut self) -> Option<u32> {
        self.engine
            .frontend_mut()
            .pending_reset
            .take()
            .map(|d| u32::try_from(d.as_millis()).unwrap_or(u32::MAX))
    }

    /// Called by the page when its reset timeout fires
    #[wasm_bindgen(js_name = resetElapsed)]
    pub fn reset_elapsed(&mut self) {
        self.engine.reset_after_error();
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"keypad-calc initialized".into());
}
