//! Keypad layout for the browser page
//!
//! Eighteen buttons on a four-column grid. The last row is short: `0` and
//! `.` only.

use super::dom::{DomElement, MockDom, OPERATOR_ATTR};
use crate::input::KeypadAction;

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            action,
            id: button_id(action),
            row,
            col,
        }
    }
}

/// Element ID for the button performing `action`
#[must_use]
pub fn button_id(action: KeypadAction) -> String {
    match action {
        KeypadAction::Digit(d) => format!("btn-{d}"),
        KeypadAction::Decimal => "btn-decimal".to_string(),
        KeypadAction::Operator(op) => format!("btn-{}", op.name()),
        KeypadAction::Equals => "btn-equals".to_string(),
        KeypadAction::Clear => "btn-clear".to_string(),
        KeypadAction::Backspace => "btn-backspace".to_string(),
    }
}

/// Browser keypad layout
///
/// ```text
/// [ C ] [ ⌫ ] [ / ] [ * ]
/// [ 7 ] [ 8 ] [ 9 ] [ - ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [ 0 ] [ . ]
/// ```
#[derive(Debug, Clone)]
pub struct WasmKeypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use crate::core::Operator::{Add, Divide, Multiply, Subtract};
        use KeypadAction::{Backspace, Clear, Decimal, Digit, Equals, Operator};

        let grid: [&[KeypadAction]; 5] = [
            &[Clear, Backspace, Operator(Divide), Operator(Multiply)],
            &[Digit(7), Digit(8), Digit(9), Operator(Subtract)],
            &[Digit(4), Digit(5), Digit(6), Operator(Add)],
            &[Digit(1), Digit(2), Digit(3), Equals],
            &[Digit(0), Decimal],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: grid.len(),
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Creates DOM elements for all keypad buttons
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons.iter().map(button_element).collect()
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div")
                .with_id("calc-keypad")
                .with_class("keypad"),
            DomElement::with_child,
        )
    }

    /// Returns the action for a clicked element, if it is a keypad button
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        KeypadAction::from_key(key)
    }
}

fn button_element(btn: &KeypadButtonDef) -> DomElement {
    let elem = DomElement::new("button")
        .with_id(&btn.id)
        .with_text(&btn.action.label())
        .with_class("keypad-btn")
        .with_class(&format!("keypad-row-{}", btn.row))
        .with_class(&format!("keypad-col-{}", btn.col));
    match btn.action {
        KeypadAction::Operator(op) => elem
            .with_class("operator")
            .with_attr(OPERATOR_ATTR, &op.symbol().to_string()),
        KeypadAction::Backspace => elem.with_attr("aria-label", "Delete last digit"),
        _ => elem,
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Adds keypad buttons to an existing calculator DOM
    fn add_keypad(&mut self, keypad: &WasmKeypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &WasmKeypad) {
        let keypad_elem = keypad.create_keypad_element();
        self.root.children.push(keypad_elem.clone());
        self.register_element(keypad_elem);
        for btn_elem in keypad.create_dom_elements() {
            self.register_element(btn_elem);
        }
    }
}
