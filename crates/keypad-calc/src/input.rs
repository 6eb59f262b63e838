//! Keypad actions and the key-name mapping shared by every frontend.

use crate::core::Operator;

/// The six things a keypad can ask of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter a decimal point
    Decimal,
    /// Choose an operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset everything
    Clear,
    /// Remove the last character of the current operand
    Backspace,
}

impl KeypadAction {
    /// Returns the character this action types, if it types one
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.symbol()),
            Self::Equals | Self::Clear | Self::Backspace => None,
        }
    }

    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// Maps a keyboard key name (DOM `KeyboardEvent.key` spelling) to an
    /// action. Unknown keys map to `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Escape" | "c" | "C" => Some(Self::Clear),
            "Backspace" => Some(Self::Backspace),
            "." | "," => Some(Self::Decimal),
            _ => {
                let mut chars = key.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                if let Some(d) = ch.to_digit(10) {
                    return Some(Self::Digit(d as u8));
                }
                Operator::from_symbol(ch).map(Self::Operator)
            }
        }
    }
}
