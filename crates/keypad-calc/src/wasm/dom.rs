//! Mock DOM for the browser frontend
//!
//! Models just enough of a page (elements, classes, attributes, events) to
//! drive the engine without a browser. [`MockDom`] implements the frontend
//! traits the way the real page does: the display element's text, an
//! `error` class on the display, an `active` class on operator buttons.

use std::collections::HashMap;
use std::time::Duration;

use crate::core::Operator;
use crate::frontend::{DisplaySink, OperatorHighlight, ResetTimer};

/// ID of the display element
pub const DISPLAY_ID: &str = "display";

/// Class toggled on the display while an error is shown
pub const ERROR_CLASS: &str = "error";

/// Class marking the highlighted operator button
pub const ACTIVE_CLASS: &str = "active";

/// Attribute carrying an operator button's symbol
pub const OPERATOR_ATTR: &str = "data-operator";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds or removes a class
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events the page listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Document-level key press
    KeyPress {
        /// `KeyboardEvent.key`
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for testing the calculator page without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Delay of the armed error-reset timer
    pending_reset: Option<Duration>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
            pending_reset: None,
        }
    }

    /// Creates the calculator page: a display reading `0`. Add buttons with
    /// [`MockDomKeypadExt::add_keypad`](super::MockDomKeypadExt::add_keypad).
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        let display = DomElement::new("div")
            .with_id(DISPLAY_ID)
            .with_class("calculator-display")
            .with_attr("aria-live", "polite")
            .with_text("0");

        dom.root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator-app")
            .with_child(display.clone());
        dom.register_element(display);
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Text of the display element
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Whether the display carries the error class
    #[must_use]
    pub fn display_has_error(&self) -> bool {
        self.get_element(DISPLAY_ID)
            .is_some_and(|e| e.has_class(ERROR_CLASS))
    }

    /// IDs of buttons currently marked active
    #[must_use]
    pub fn active_buttons(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .elements
            .values()
            .filter(|e| e.has_class(ACTIVE_CLASS))
            .map(|e| e.id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Delay of the armed error-reset timer
    #[must_use]
    pub fn pending_reset(&self) -> Option<Duration> {
        self.pending_reset
    }

    /// Disarms the timer, returning true if it was armed
    pub fn take_pending_reset(&mut self) -> bool {
        self.pending_reset.take().is_some()
    }
}

impl DisplaySink for MockDom {
    fn render(&mut self, text: &str) {
        if let Some(display) = self.elements.get_mut(DISPLAY_ID) {
            display.set_text(text);
        }
    }

    fn set_error_style(&mut self, error: bool) {
        if let Some(display) = self.elements.get_mut(DISPLAY_ID) {
            display.toggle_class(ERROR_CLASS, error);
        }
    }
}

impl OperatorHighlight for MockDom {
    fn highlight(&mut self, op: Option<Operator>) {
        let wanted = op.map(|o| o.symbol().to_string());
        for elem in self.elements.values_mut() {
            let Some(symbol) = elem.get_attr(OPERATOR_ATTR) else {
                continue;
            };
            let on = wanted.as_deref() == Some(symbol);
            elem.toggle_class(ACTIVE_CLASS, on);
        }
    }
}

impl ResetTimer for MockDom {
    fn schedule_reset(&mut self, after: Duration) {
        self.pending_reset = Some(after);
    }

    fn cancel_reset(&mut self) {
        self.pending_reset = None;
    }
}
