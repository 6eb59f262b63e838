//! The accumulator engine.
//!
//! A classic four-function calculator: one operand being typed, at most one
//! operand waiting, at most one operator pending. There is no expression
//! tree and no precedence; `2 + 3 * 4` evaluates left to right as it is
//! keyed in.
//!
//! Errors (division by zero, non-finite results) never escape as `Err`.
//! The engine shows the error indicator, asks the frontend for a timed
//! reset and carries on with `0`. Until that reset fires (or `clear()` is
//! called) every other input is ignored.

use tracing::{debug, info, warn};

use crate::config::{ConfigResult, EngineConfig};
use crate::core::format::{
    digit_count, format_display, number_to_operand, parse_operand, strip_grouping,
};
use crate::core::{CalcError, Calculator, CalculatorState, Operator};
use crate::frontend::Frontend;
use crate::input::KeypadAction;

/// Accumulator engine driving one frontend
#[derive(Debug)]
pub struct Engine<F: Frontend> {
    state: CalculatorState,
    config: EngineConfig,
    calculator: Calculator,
    frontend: F,
    /// Set while the error indicator is showing
    error: Option<CalcError>,
}

impl<F: Frontend> Engine<F> {
    /// Creates an engine with the default configuration and renders the
    /// initial `0`
    pub fn new(frontend: F) -> Self {
        Self::build(frontend, EngineConfig::default())
    }

    /// Creates an engine with a validated custom configuration
    pub fn with_config(frontend: F, config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(frontend, config))
    }

    fn build(frontend: F, config: EngineConfig) -> Self {
        let mut engine = Self {
            state: CalculatorState::new(),
            calculator: Calculator::new(config.precision),
            config,
            frontend,
            error: None,
        };
        info!("calculator session started");
        engine.refresh();
        engine
    }

    // ----- accessors -----

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The frontend
    #[must_use]
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Mutable access to the frontend
    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Consumes the engine, returning its frontend
    pub fn into_frontend(self) -> F {
        self.frontend
    }

    /// Text of the current operand
    #[must_use]
    pub fn current_operand(&self) -> &str {
        &self.state.current_operand
    }

    /// True while the error indicator is showing
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error being shown, if any
    #[must_use]
    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    /// What the display should show right now
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.error.is_some() {
            self.config.error_text.clone()
        } else {
            format_display(&self.state.current_operand, &self.config)
        }
    }

    // ----- public operations -----

    /// Enters a digit. Digits past the cap are dropped silently.
    pub fn input_digit(&mut self, digit: u8) {
        if self.ignored_during_error("digit") {
            return;
        }
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            warn!(digit, "ignoring non-decimal digit");
            return;
        };
        debug!(%ch, "input digit");

        let state = &mut self.state;
        if state.awaiting_new_operand || state.current_operand == CalculatorState::INITIAL_OPERAND
        {
            state.current_operand = ch.to_string();
            state.awaiting_new_operand = false;
        } else if digit_count(&state.current_operand) < self.config.max_digits {
            state.current_operand.push(ch);
        } else {
            debug!(max_digits = self.config.max_digits, "digit cap reached");
        }
        self.refresh();
    }

    /// Enters a decimal point; a second point in the same operand is ignored
    pub fn input_decimal_point(&mut self) {
        if self.ignored_during_error("decimal") {
            return;
        }
        debug!("input decimal point");

        let state = &mut self.state;
        if state.awaiting_new_operand {
            state.current_operand = "0.".to_string();
            state.awaiting_new_operand = false;
        } else if !state.current_operand.contains('.') {
            state.current_operand.push('.');
        }
        self.refresh();
    }

    /// Chooses an operator.
    ///
    /// If an operator is already pending and a new operand was typed since,
    /// the pending operation is evaluated first and its result becomes the
    /// left-hand side. Pressing operators back to back only swaps the
    /// pending operator.
    pub fn input_operator(&mut self, op: Operator) {
        if self.ignored_during_error("operator") {
            return;
        }
        debug!(%op, "input operator");

        let operand = self.parse_current();
        if self.state.previous_operand.is_none() {
            self.state.previous_operand = Some(operand.unwrap_or(0.0));
        } else if self.state.pending_operator.is_some() && !self.state.awaiting_new_operand {
            let result = self.evaluate_pending();
            self.state.current_operand = number_to_operand(result);
            self.state.previous_operand = Some(result);
            self.refresh();
        }

        self.state.pending_operator = Some(op);
        self.state.awaiting_new_operand = true;
        self.frontend.highlight(Some(op));
    }

    /// The `=` key. Does nothing unless an operator is pending and a new
    /// operand has been typed.
    pub fn calculate(&mut self) {
        if self.ignored_during_error("equals") {
            return;
        }
        let ready = self.state.pending_operator.is_some()
            && self.state.previous_operand.is_some()
            && !self.state.awaiting_new_operand;
        if !ready {
            debug!("equals pressed with nothing to calculate");
            return;
        }

        let result = self.evaluate_pending();
        self.state.current_operand = number_to_operand(result);
        self.state.previous_operand = None;
        self.state.pending_operator = None;
        self.state.awaiting_new_operand = true;
        self.refresh();
        self.frontend.highlight(None);
        debug!(result, "calculated");
    }

    /// Resets to the initial state, dismissing any error
    pub fn clear(&mut self) {
        info!("clear");
        if self.error.take().is_some() {
            self.frontend.cancel_reset();
        }
        self.reset_state();
    }

    /// Removes the last character of the current operand (`0` when only one
    /// is left). The pending operation is untouched.
    pub fn delete_last_digit(&mut self) {
        if self.ignored_during_error("backspace") {
            return;
        }
        debug!("delete last digit");

        let mut clean = strip_grouping(&self.state.current_operand, self.separator());
        if clean.chars().count() > 1 {
            clean.pop();
        } else {
            clean = CalculatorState::INITIAL_OPERAND.to_string();
        }
        // a lone sign is not a number
        if parse_operand(&clean, None).is_none() {
            clean = CalculatorState::INITIAL_OPERAND.to_string();
        }
        self.state.current_operand = clean;
        self.refresh();
    }

    /// Called by the frontend when the error display time has elapsed.
    ///
    /// A reset arriving when no error is showing is stale and ignored.
    pub fn reset_after_error(&mut self) {
        let Some(err) = self.error.take() else {
            debug!("stale error reset ignored");
            return;
        };
        info!(error = %err, "error display elapsed, resetting");
        self.reset_state();
    }

    /// Routes a keypad action to its operation
    pub fn dispatch(&mut self, action: KeypadAction) {
        match action {
            KeypadAction::Digit(d) => self.input_digit(d),
            KeypadAction::Decimal => self.input_decimal_point(),
            KeypadAction::Operator(op) => self.input_operator(op),
            KeypadAction::Equals => self.calculate(),
            KeypadAction::Clear => self.clear(),
            KeypadAction::Backspace => self.delete_last_digit(),
        }
    }

    /// Maps a key name and dispatches it. Returns false for unknown keys.
    pub fn press_key(&mut self, key: &str) -> bool {
        match KeypadAction::from_key(key) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => {
                debug!(key, "unmapped key");
                false
            }
        }
    }

    // ----- internals -----

    fn separator(&self) -> Option<char> {
        self.config.grouping.separator()
    }

    fn parse_current(&self) -> Option<f64> {
        parse_operand(&self.state.current_operand, self.separator())
    }

    /// Evaluates `previous <op> current`, signalling errors and falling
    /// back to `0`
    fn evaluate_pending(&mut self) -> f64 {
        let current = self.parse_current();
        let Some(op) = self.state.pending_operator else {
            return current.unwrap_or(0.0);
        };
        match self
            .calculator
            .compute(self.state.previous_operand, current, op)
        {
            Ok(value) => value,
            Err(err) => {
                self.signal_error(err);
                0.0
            }
        }
    }

    fn signal_error(&mut self, err: CalcError) {
        warn!(error = %err, "calculation error");
        self.error = Some(err);
        self.frontend.schedule_reset(self.config.error_display());
    }

    fn ignored_during_error(&self, input: &str) -> bool {
        match self.error {
            Some(err) => {
                debug!(input, error = %err, "input ignored while error is showing");
                true
            }
            None => false,
        }
    }

    fn reset_state(&mut self) {
        self.state.reset();
        self.refresh();
        self.frontend.highlight(None);
    }

    fn refresh(&mut self) {
        let text = self.display_text();
        self.frontend.render(&text);
        self.frontend.set_error_style(self.error.is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupingStyle;
    use crate::frontend::RecordingFrontend;
    use proptest::prelude::*;
    use std::time::Duration;

    fn engine() -> Engine<RecordingFrontend> {
        Engine::new(RecordingFrontend::new())
    }

    fn keys(engine: &mut Engine<RecordingFrontend>, script: &str) {
        for ch in script.chars() {
            assert!(engine.press_key(&ch.to_string()), "unmapped key {ch}");
        }
    }

    // ===== Construction tests =====

    #[test]
    fn test_new_renders_initial_zero() {
        let e = engine();
        assert!(e.state().is_initial());
        assert_eq!(e.frontend().text(), "0");
        assert_eq!(e.frontend().frames().len(), 1);
        assert!(!e.is_error());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = EngineConfig::new().with_max_digits(0);
        assert!(Engine::with_config(RecordingFrontend::new(), config).is_err());
    }

    #[test]
    fn test_with_config_applies_settings() {
        let config = EngineConfig::new().with_max_digits(4);
        let mut e = Engine::with_config(RecordingFrontend::new(), config).unwrap();
        keys(&mut e, "123456");
        assert_eq!(e.current_operand(), "1234");
    }

    // ===== input_digit tests =====

    #[test]
    fn test_digit_replaces_initial_zero() {
        let mut e = engine();
        e.input_digit(7);
        assert_eq!(e.current_operand(), "7");
        assert_eq!(e.frontend().text(), "7");
    }

    #[test]
    fn test_digits_append() {
        let mut e = engine();
        keys(&mut e, "120");
        assert_eq!(e.current_operand(), "120");
    }

    #[test]
    fn test_zero_on_zero_stays_zero() {
        let mut e = engine();
        keys(&mut e, "00");
        assert_eq!(e.current_operand(), "0");
    }

    #[test]
    fn test_thirteenth_digit_dropped() {
        let mut e = engine();
        keys(&mut e, "1234567890123");
        assert_eq!(e.current_operand(), "123456789012");
        assert_eq!(e.frontend().text(), "123,456,789,012");
    }

    #[test]
    fn test_digit_cap_ignores_decimal_point() {
        let mut e = engine();
        keys(&mut e, "12345678901.23");
        assert_eq!(e.current_operand(), "12345678901.2");
    }

    #[test]
    fn test_invalid_digit_ignored() {
        let mut e = engine();
        e.input_digit(12);
        assert_eq!(e.current_operand(), "0");
        assert_eq!(e.frontend().frames().len(), 1);
    }

    #[test]
    fn test_digit_after_operator_starts_new_operand() {
        let mut e = engine();
        keys(&mut e, "12+3");
        assert_eq!(e.current_operand(), "3");
        assert!(!e.state().awaiting_new_operand);
    }

    // ===== input_decimal_point tests =====

    #[test]
    fn test_decimal_appends_once() {
        let mut e = engine();
        keys(&mut e, "1..5.");
        assert_eq!(e.current_operand(), "1.5");
    }

    #[test]
    fn test_decimal_on_initial_zero() {
        let mut e = engine();
        e.input_decimal_point();
        assert_eq!(e.current_operand(), "0.");
        e.input_digit(5);
        assert_eq!(e.current_operand(), "0.5");
    }

    #[test]
    fn test_decimal_after_operator() {
        let mut e = engine();
        keys(&mut e, "9*.");
        assert_eq!(e.current_operand(), "0.");
        assert!(!e.state().awaiting_new_operand);
    }

    #[test]
    fn test_decimal_idempotent() {
        let mut e = engine();
        keys(&mut e, "4.");
        let after_first = e.state().clone();
        e.input_decimal_point();
        assert_eq!(e.state(), &after_first);
    }

    // ===== input_operator tests =====

    #[test]
    fn test_first_operator_captures_operand() {
        let mut e = engine();
        keys(&mut e, "12+");
        assert_eq!(e.state().previous_operand, Some(12.0));
        assert_eq!(e.state().pending_operator, Some(Operator::Add));
        assert!(e.state().awaiting_new_operand);
        assert_eq!(e.frontend().highlighted(), Some(Operator::Add));
    }

    #[test]
    fn test_operator_twice_replaces_pending() {
        let mut e = engine();
        keys(&mut e, "8+-");
        assert_eq!(e.state().previous_operand, Some(8.0));
        assert_eq!(e.state().pending_operator, Some(Operator::Subtract));
        assert_eq!(e.frontend().highlighted(), Some(Operator::Subtract));
        keys(&mut e, "3=");
        assert_eq!(e.frontend().text(), "5");
    }

    #[test]
    fn test_chained_operator_computes_intermediate() {
        let mut e = engine();
        keys(&mut e, "2+3*");
        assert_eq!(e.current_operand(), "5");
        assert_eq!(e.state().previous_operand, Some(5.0));
        assert_eq!(e.frontend().text(), "5");
        keys(&mut e, "4=");
        // left to right, no precedence
        assert_eq!(e.frontend().text(), "20");
    }

    #[test]
    fn test_operator_after_result_chains() {
        let mut e = engine();
        keys(&mut e, "7+3=");
        keys(&mut e, "*2=");
        assert_eq!(e.frontend().text(), "20");
    }

    // ===== calculate tests =====

    #[test]
    fn test_scenario_seven_plus_three() {
        let mut e = engine();
        keys(&mut e, "7+3=");
        assert_eq!(e.frontend().text(), "10");
        assert_eq!(e.current_operand(), "10");
        assert_eq!(e.state().previous_operand, None);
        assert_eq!(e.state().pending_operator, None);
        assert!(e.state().awaiting_new_operand);
        assert_eq!(e.frontend().highlighted(), None);
    }

    #[test]
    fn test_decimal_sum_rounded() {
        let mut e = engine();
        keys(&mut e, ".1+.2=");
        assert_eq!(e.frontend().text(), "0.3");
    }

    #[test]
    fn test_calculate_without_operator_is_noop() {
        let mut e = engine();
        keys(&mut e, "42");
        let before = e.state().clone();
        let frames = e.frontend().frames().len();
        e.calculate();
        assert_eq!(e.state(), &before);
        assert_eq!(e.frontend().frames().len(), frames);
    }

    #[test]
    fn test_calculate_right_after_operator_is_noop() {
        let mut e = engine();
        keys(&mut e, "42+");
        let before = e.state().clone();
        e.calculate();
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn test_calculate_idempotent() {
        let mut e = engine();
        keys(&mut e, "6*7=");
        let after_first = e.state().clone();
        e.calculate();
        assert_eq!(e.state(), &after_first);
        assert_eq!(e.frontend().text(), "42");
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let mut e = engine();
        keys(&mut e, "7+3=5");
        assert_eq!(e.current_operand(), "5");
    }

    #[test]
    fn test_large_result_exponential() {
        let mut e = engine();
        keys(&mut e, "123456789*10000000=");
        assert_eq!(e.current_operand(), "1234567890000000");
        assert_eq!(e.frontend().text(), "1.234568e+15");
    }

    #[test]
    fn test_negative_result_grouped() {
        let mut e = engine();
        keys(&mut e, "1000-3000=");
        assert_eq!(e.frontend().text(), "-2,000");
    }

    // ===== error tests =====

    #[test]
    fn test_divide_by_zero_shows_error_and_schedules_reset() {
        let mut e = engine();
        keys(&mut e, "5/0=");
        assert!(e.is_error());
        assert_eq!(e.error(), Some(CalcError::DivideByZero));
        assert_eq!(e.frontend().text(), "Error");
        assert!(e.frontend().is_error_style());
        assert_eq!(e.frontend().pending_reset(), Some(Duration::from_secs(2)));
        assert_eq!(e.current_operand(), "0");
    }

    #[test]
    fn test_reset_after_error_restores_initial() {
        let mut e = engine();
        keys(&mut e, "5/0=");
        assert!(e.frontend_mut().take_pending_reset());
        e.reset_after_error();
        assert!(!e.is_error());
        assert!(e.state().is_initial());
        assert_eq!(e.frontend().text(), "0");
        assert!(!e.frontend().is_error_style());
    }

    #[test]
    fn test_inputs_ignored_while_error_showing() {
        let mut e = engine();
        keys(&mut e, "5/0=");
        let frames = e.frontend().frames().len();
        keys(&mut e, "12+.=");
        e.delete_last_digit();
        assert_eq!(e.frontend().frames().len(), frames);
        assert_eq!(e.frontend().text(), "Error");
    }

    #[test]
    fn test_clear_during_error_cancels_reset() {
        let mut e = engine();
        keys(&mut e, "5/0=");
        e.clear();
        assert!(!e.is_error());
        assert_eq!(e.frontend().pending_reset(), None);
        assert!(e.state().is_initial());
        assert!(!e.frontend().is_error_style());
    }

    #[test]
    fn test_stale_reset_ignored() {
        let mut e = engine();
        keys(&mut e, "42");
        e.reset_after_error();
        assert_eq!(e.current_operand(), "42");
    }

    #[test]
    fn test_divide_by_zero_while_chaining() {
        let mut e = engine();
        keys(&mut e, "8/0+");
        assert!(e.is_error());
        assert_eq!(e.state().previous_operand, Some(0.0));
        assert_eq!(e.state().pending_operator, Some(Operator::Add));
        assert_eq!(e.frontend().text(), "Error");
    }

    #[test]
    fn test_custom_error_text_and_duration() {
        let config = EngineConfig::new()
            .with_error_text("E")
            .with_error_display(Duration::from_millis(750));
        let mut e = Engine::with_config(RecordingFrontend::new(), config).unwrap();
        keys(&mut e, "1/0=");
        assert_eq!(e.frontend().text(), "E");
        assert_eq!(e.frontend().pending_reset(), Some(Duration::from_millis(750)));
    }

    // ===== clear tests =====

    #[test]
    fn test_clear_restores_initial() {
        let mut e = engine();
        keys(&mut e, "12.5*3");
        e.clear();
        assert!(e.state().is_initial());
        assert_eq!(e.frontend().text(), "0");
        assert_eq!(e.frontend().highlighted(), None);
    }

    // ===== delete_last_digit tests =====

    #[test]
    fn test_delete_from_multi_digit() {
        let mut e = engine();
        keys(&mut e, "120");
        e.delete_last_digit();
        assert_eq!(e.current_operand(), "12");
    }

    #[test]
    fn test_delete_single_digit_gives_zero() {
        let mut e = engine();
        keys(&mut e, "5");
        e.delete_last_digit();
        assert_eq!(e.current_operand(), "0");
    }

    #[test]
    fn test_delete_leaves_pending_operation() {
        let mut e = engine();
        keys(&mut e, "9-45");
        e.delete_last_digit();
        assert_eq!(e.state().pending_operator, Some(Operator::Subtract));
        assert_eq!(e.state().previous_operand, Some(9.0));
        keys(&mut e, "=");
        assert_eq!(e.frontend().text(), "5");
    }

    #[test]
    fn test_delete_negative_single_digit_gives_zero() {
        let mut e = engine();
        keys(&mut e, "2-7=");
        assert_eq!(e.current_operand(), "-5");
        e.delete_last_digit();
        assert_eq!(e.current_operand(), "0");
    }

    #[test]
    fn test_delete_decimal_point() {
        let mut e = engine();
        keys(&mut e, "3.");
        e.delete_last_digit();
        assert_eq!(e.current_operand(), "3");
    }

    // ===== dispatch tests =====

    #[test]
    fn test_dispatch_routes_actions() {
        let mut e = engine();
        e.dispatch(KeypadAction::Digit(9));
        e.dispatch(KeypadAction::Operator(Operator::Multiply));
        e.dispatch(KeypadAction::Digit(9));
        e.dispatch(KeypadAction::Equals);
        assert_eq!(e.frontend().text(), "81");
        e.dispatch(KeypadAction::Backspace);
        assert_eq!(e.current_operand(), "8");
        e.dispatch(KeypadAction::Clear);
        assert!(e.state().is_initial());
    }

    #[test]
    fn test_press_key_unknown() {
        let mut e = engine();
        assert!(!e.press_key("q"));
        assert!(e.state().is_initial());
    }

    #[test]
    fn test_grouping_style_space() {
        let config = EngineConfig::new().with_grouping(GroupingStyle::Space);
        let mut e = Engine::with_config(RecordingFrontend::new(), config).unwrap();
        keys(&mut e, "1234567");
        assert_eq!(e.frontend().text(), "1 234 567");
        e.delete_last_digit();
        assert_eq!(e.current_operand(), "123456");
    }

    // ===== Property-based tests =====

    fn action_strategy() -> impl Strategy<Value = KeypadAction> {
        prop_oneof![
            (0u8..=9).prop_map(KeypadAction::Digit),
            Just(KeypadAction::Decimal),
            (0usize..4).prop_map(|i| KeypadAction::Operator(Operator::ALL[i])),
            Just(KeypadAction::Equals),
            Just(KeypadAction::Backspace),
        ]
    }

    proptest! {
        #[test]
        fn prop_digit_sequence_concatenates_up_to_cap(digits in proptest::collection::vec(1u8..=9, 1..30)) {
            let mut e = engine();
            for d in &digits {
                e.input_digit(*d);
            }
            let expected: String = digits.iter().take(12).map(|d| d.to_string()).collect();
            prop_assert_eq!(e.current_operand(), expected.as_str());
        }

        #[test]
        fn prop_clear_always_restores_initial(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let mut e = engine();
            for action in actions {
                e.dispatch(action);
            }
            e.clear();
            prop_assert!(e.state().is_initial());
            prop_assert!(!e.is_error());
            prop_assert_eq!(e.frontend().text(), "0");
        }

        #[test]
        fn prop_state_invariants_hold(actions in proptest::collection::vec(action_strategy(), 0..60)) {
            let mut e = engine();
            for action in actions {
                e.dispatch(action);
                let state = e.state();
                if state.pending_operator.is_some() {
                    prop_assert!(state.previous_operand.is_some());
                }
                prop_assert!(state.current_operand.matches('.').count() <= 1);
                prop_assert!(!state.current_operand.is_empty());
                prop_assert!(e.is_error() || parse_operand(&state.current_operand, None).is_some());
                if e.is_error() {
                    prop_assert!(e.frontend().pending_reset().is_some());
                }
            }
        }
    }
}
