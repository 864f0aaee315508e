//! Calculator keypad
//!
//! Shared by the mock DOM and browser frontends so both render the same
//! buttons with the same element ids and map keys the same way.

use crate::core::Operation;
use crate::wasm::DomElement;

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Append a digit (0-9)
    Digit(u8),
    /// Append a decimal point
    Decimal,
    /// Select an operation
    Operation(Operation),
    /// Evaluate the pending operation
    Equals,
    /// Reset everything
    Clear,
    /// Remove the last typed character
    Delete,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            KeypadAction::Digit(d) => d.to_string(),
            KeypadAction::Decimal => ".".to_string(),
            KeypadAction::Operation(op) => op.symbol().to_string(),
            KeypadAction::Equals => "=".to_string(),
            KeypadAction::Clear => "C".to_string(),
            KeypadAction::Delete => "DEL".to_string(),
        }
    }

    /// Returns the `data-type` attribute value used by the page markup
    #[must_use]
    pub const fn data_type(&self) -> &'static str {
        match self {
            KeypadAction::Digit(_) => "number",
            KeypadAction::Decimal => "decimal",
            KeypadAction::Operation(_) => "operation",
            KeypadAction::Equals => "calculate",
            KeypadAction::Clear => "clear",
            KeypadAction::Delete => "delete",
        }
    }

    /// Rebuilds an action from a button's `data-type` and text content
    #[must_use]
    pub fn from_markup(data_type: &str, text: &str) -> Option<Self> {
        let text = text.trim();
        match data_type {
            "number" => text
                .parse::<u8>()
                .ok()
                .filter(|d| *d <= 9 && text.len() == 1)
                .map(KeypadAction::Digit),
            "operation" => Operation::from_symbol(text).map(KeypadAction::Operation),
            "calculate" => Some(KeypadAction::Equals),
            "decimal" => Some(KeypadAction::Decimal),
            "clear" => Some(KeypadAction::Clear),
            "delete" => Some(KeypadAction::Delete),
            _ => None,
        }
    }
}

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
        let id = match action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operation(op) => format!("btn-{}", op.name()),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::Clear => "btn-clear".to_string(),
            KeypadAction::Delete => "btn-delete".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }
}

/// Keypad layout definition
///
/// ```text
/// [ C ] [DEL] [ ÷ ] [ × ]
/// [ 7 ] [ 8 ] [ 9 ] [ - ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [ 0 ] [ . ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Clear, Decimal, Delete, Digit, Equals};
        let op = KeypadAction::Operation;

        let buttons = vec![
            // Row 0: C DEL ÷ ×
            KeypadButtonDef::new(Clear, 0, 0),
            KeypadButtonDef::new(Delete, 0, 1),
            KeypadButtonDef::new(op(Operation::Divide), 0, 2),
            KeypadButtonDef::new(op(Operation::Multiply), 0, 3),
            // Row 1: 7 8 9 -
            KeypadButtonDef::new(Digit(7), 1, 0),
            KeypadButtonDef::new(Digit(8), 1, 1),
            KeypadButtonDef::new(Digit(9), 1, 2),
            KeypadButtonDef::new(op(Operation::Subtract), 1, 3),
            // Row 2: 4 5 6 +
            KeypadButtonDef::new(Digit(4), 2, 0),
            KeypadButtonDef::new(Digit(5), 2, 1),
            KeypadButtonDef::new(Digit(6), 2, 2),
            KeypadButtonDef::new(op(Operation::Add), 2, 3),
            // Row 3: 1 2 3 =
            KeypadButtonDef::new(Digit(1), 3, 0),
            KeypadButtonDef::new(Digit(2), 3, 1),
            KeypadButtonDef::new(Digit(3), 3, 2),
            KeypadButtonDef::new(Equals, 3, 3),
            // Row 4: 0 .
            KeypadButtonDef::new(Digit(0), 4, 0),
            KeypadButtonDef::new(Decimal, 4, 1),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
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

    /// Gets a button by row and column; the last row has empty cells
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action.label() == label)
    }

    /// Creates DOM elements for all keypad buttons
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("keypad-btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
                    .with_attr("data-type", btn.action.data_type())
            })
            .collect()
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

    /// Processes a button click and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "." | "," => Some(KeypadAction::Decimal),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "c" | "C" => Some(KeypadAction::Clear),
            "Backspace" | "Delete" => Some(KeypadAction::Delete),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch.is_ascii_digit() => {
                        ch.to_digit(10).map(|d| KeypadAction::Digit(d as u8))
                    }
                    _ => Operation::from_symbol(key).map(KeypadAction::Operation),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadAction tests =====

    #[test]
    fn test_keypad_action_label() {
        assert_eq!(KeypadAction::Digit(5).label(), "5");
        assert_eq!(KeypadAction::Decimal.label(), ".");
        assert_eq!(KeypadAction::Operation(Operation::Divide).label(), "÷");
        assert_eq!(KeypadAction::Equals.label(), "=");
        assert_eq!(KeypadAction::Clear.label(), "C");
        assert_eq!(KeypadAction::Delete.label(), "DEL");
    }

    #[test]
    fn test_keypad_action_data_type() {
        assert_eq!(KeypadAction::Digit(0).data_type(), "number");
        assert_eq!(
            KeypadAction::Operation(Operation::Add).data_type(),
            "operation"
        );
        assert_eq!(KeypadAction::Equals.data_type(), "calculate");
        assert_eq!(KeypadAction::Decimal.data_type(), "decimal");
        assert_eq!(KeypadAction::Clear.data_type(), "clear");
        assert_eq!(KeypadAction::Delete.data_type(), "delete");
    }

    #[test]
    fn test_from_markup_round_trips_every_button() {
        let keypad = Keypad::new();
        for btn in keypad.buttons() {
            let rebuilt = KeypadAction::from_markup(btn.action.data_type(), &btn.action.label());
            assert_eq!(rebuilt, Some(btn.action), "button {}", btn.id);
        }
    }

    #[test]
    fn test_from_markup_rejects_garbage() {
        assert_eq!(KeypadAction::from_markup("number", "12"), None);
        assert_eq!(KeypadAction::from_markup("number", "x"), None);
        assert_eq!(KeypadAction::from_markup("operation", "^"), None);
        assert_eq!(KeypadAction::from_markup("memory", "M+"), None);
    }

    #[test]
    fn test_from_markup_trims_whitespace() {
        assert_eq!(
            KeypadAction::from_markup("number", " 7\n"),
            Some(KeypadAction::Digit(7))
        );
    }

    // ===== KeypadButtonDef tests =====

    #[test]
    fn test_button_def_ids() {
        let cases = [
            (KeypadAction::Digit(5), "btn-5"),
            (KeypadAction::Operation(Operation::Add), "btn-plus"),
            (KeypadAction::Operation(Operation::Subtract), "btn-minus"),
            (KeypadAction::Operation(Operation::Multiply), "btn-times"),
            (KeypadAction::Operation(Operation::Divide), "btn-divide"),
            (KeypadAction::Decimal, "btn-decimal"),
            (KeypadAction::Equals, "btn-equals"),
            (KeypadAction::Clear, "btn-clear"),
            (KeypadAction::Delete, "btn-delete"),
        ];
        for (action, id) in cases {
            assert_eq!(KeypadButtonDef::new(action, 0, 0).id, id);
        }
    }

    // ===== Keypad tests =====

    #[test]
    fn test_keypad_has_18_buttons() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 18);
        assert_eq!(keypad.dimensions(), (5, 4));
    }

    #[test]
    fn test_keypad_get_button_at() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.get_button_at(1, 0).map(|b| b.action),
            Some(KeypadAction::Digit(7))
        );
        assert_eq!(
            keypad.get_button_at(3, 3).map(|b| b.action),
            Some(KeypadAction::Equals)
        );
        assert!(keypad.get_button_at(4, 3).is_none());
        assert!(keypad.get_button_at(9, 9).is_none());
    }

    #[test]
    fn test_keypad_find_by_label() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.find_button_by_label("×").map(|b| b.id.as_str()),
            Some("btn-times")
        );
        assert!(keypad.find_button_by_label("^").is_none());
    }

    #[test]
    fn test_keypad_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-3"), Some(KeypadAction::Digit(3)));
        assert_eq!(keypad.handle_click("btn-delete"), Some(KeypadAction::Delete));
        assert_eq!(keypad.handle_click("btn-unknown"), None);
    }

    #[test]
    fn test_keypad_dom_elements() {
        let keypad = Keypad::new();
        let elements = keypad.create_dom_elements();
        assert_eq!(elements.len(), 18);
        let equals = elements.iter().find(|e| e.id == "btn-equals").unwrap();
        assert_eq!(equals.text_content, "=");
        assert_eq!(equals.get_attr("data-type"), Some("calculate"));
        assert!(equals.has_class("keypad-row-3"));
    }

    #[test]
    fn test_keypad_container_element() {
        let keypad = Keypad::new();
        let container = keypad.create_keypad_element();
        assert_eq!(container.id, "calc-keypad");
        assert_eq!(container.children.len(), 18);
    }

    // ===== Key mapping tests =====

    #[test]
    fn test_key_to_action_digits() {
        for d in 0..=9u8 {
            assert_eq!(
                Keypad::key_to_action(&d.to_string()),
                Some(KeypadAction::Digit(d))
            );
        }
    }

    #[test]
    fn test_key_to_action_operators() {
        assert_eq!(
            Keypad::key_to_action("*"),
            Some(KeypadAction::Operation(Operation::Multiply))
        );
        assert_eq!(
            Keypad::key_to_action("/"),
            Some(KeypadAction::Operation(Operation::Divide))
        );
        assert_eq!(
            Keypad::key_to_action("-"),
            Some(KeypadAction::Operation(Operation::Subtract))
        );
    }

    #[test]
    fn test_key_to_action_special_keys() {
        assert_eq!(Keypad::key_to_action("Enter"), Some(KeypadAction::Equals));
        assert_eq!(Keypad::key_to_action("Escape"), Some(KeypadAction::Clear));
        assert_eq!(
            Keypad::key_to_action("Backspace"),
            Some(KeypadAction::Delete)
        );
        assert_eq!(Keypad::key_to_action("."), Some(KeypadAction::Decimal));
    }

    #[test]
    fn test_key_to_action_unknown() {
        assert_eq!(Keypad::key_to_action("Shift"), None);
        assert_eq!(Keypad::key_to_action("^"), None);
        assert_eq!(Keypad::key_to_action(""), None);
    }
}
