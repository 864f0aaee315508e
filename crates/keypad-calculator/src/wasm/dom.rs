//! Mock DOM for WASM Testing
//!
//! Lets the keypad frontend run headless: elements, classes and the event
//! log behave like the page without a browser or `web-sys`.

use std::collections::HashMap;

use super::{OPERATION_LINE_ID, RESULT_LINE_ID};
use crate::keypad::Keypad;

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

    /// Adds a class once
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
        self.attributes.get(key).map(|s| s.as_str())
    }
}

/// DOM events the keypad page reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed
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

/// Events kept by [`MockDom::event_history`]; older ones are dropped
pub const EVENT_HISTORY_LIMIT: usize = 256;

/// Mock DOM for testing the calculator page without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Most recent events, at most [`EVENT_HISTORY_LIMIT`]
    event_history: Vec<DomEvent>,
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
        }
    }

    /// Creates the calculator page: two display lines and the keypad
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();

        let operation_line = DomElement::new("div")
            .with_id(OPERATION_LINE_ID)
            .with_class("display__input");
        let result_line = DomElement::new("div")
            .with_id(RESULT_LINE_ID)
            .with_class("display__result");
        let display = DomElement::new("div")
            .with_id("display")
            .with_class("display")
            .with_child(operation_line.clone())
            .with_child(result_line.clone());
        let keypad_elem = keypad.create_keypad_element();

        dom.root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator-app")
            .with_child(display.clone())
            .with_child(keypad_elem.clone());

        dom.register_element(display);
        dom.register_element(operation_line);
        dom.register_element(result_line);
        for button in &keypad_elem.children {
            dom.register_element(button.clone());
        }
        dom.register_element(keypad_elem);

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

    /// Records an event, evicting the oldest once the history is full
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if self.event_history.len() >= EVENT_HISTORY_LIMIT {
            let excess = self.event_history.len() + 1 - EVENT_HISTORY_LIMIT;
            self.event_history.drain(..excess);
        }
        self.event_history.push(event);
    }

    /// Gets the event history, oldest first
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Adds or removes a class on an element by ID
    pub fn toggle_element_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.toggle_class(class, on);
        }
    }

    /// Checks whether an element carries a class
    #[must_use]
    pub fn element_has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.id.is_empty());
        assert!(elem.text_content.is_empty());
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_builder() {
        let elem = DomElement::new("button")
            .with_id("btn-1")
            .with_text("1")
            .with_class("keypad-btn")
            .with_attr("data-type", "number");
        assert_eq!(elem.id, "btn-1");
        assert_eq!(elem.text_content, "1");
        assert!(elem.has_class("keypad-btn"));
        assert_eq!(elem.get_attr("data-type"), Some("number"));
        assert_eq!(elem.get_attr("missing"), None);
    }

    #[test]
    fn test_dom_element_add_class_once() {
        let mut elem = DomElement::new("div");
        elem.add_class("flash");
        elem.add_class("flash");
        assert_eq!(elem.classes.len(), 1);
    }

    #[test]
    fn test_dom_element_toggle_class() {
        let mut elem = DomElement::new("div");
        elem.toggle_class("error", true);
        assert!(elem.has_class("error"));
        elem.toggle_class("error", false);
        assert!(!elem.has_class("error"));
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert_eq!(
            DomEvent::click("btn-1"),
            DomEvent::Click {
                element_id: "btn-1".into()
            }
        );
        assert_eq!(
            DomEvent::key_press("Enter"),
            DomEvent::KeyPress {
                key: "Enter".into()
            }
        );
    }

    // ===== MockDom tests =====

    #[test]
    fn test_calculator_dom_structure() {
        let dom = MockDom::calculator(&Keypad::new());
        assert!(dom.get_element(OPERATION_LINE_ID).is_some());
        assert!(dom.get_element(RESULT_LINE_ID).is_some());
        assert!(dom.get_element("calc-keypad").is_some());
        assert!(dom.get_element("btn-equals").is_some());
        assert_eq!(dom.root.children.len(), 2);
    }

    #[test]
    fn test_set_and_get_text() {
        let mut dom = MockDom::calculator(&Keypad::new());
        dom.set_element_text(RESULT_LINE_ID, "42");
        assert_eq!(dom.get_element_text(RESULT_LINE_ID), Some("42"));
        assert_eq!(dom.get_element_text("nope"), None);
    }

    #[test]
    fn test_toggle_element_class() {
        let mut dom = MockDom::calculator(&Keypad::new());
        dom.toggle_element_class(RESULT_LINE_ID, "display--flash", true);
        assert!(dom.element_has_class(RESULT_LINE_ID, "display--flash"));
        dom.toggle_element_class(RESULT_LINE_ID, "display--flash", false);
        assert!(!dom.element_has_class(RESULT_LINE_ID, "display--flash"));
        assert!(!dom.element_has_class("nope", "display--flash"));
    }

    #[test]
    fn test_event_history() {
        let mut dom = MockDom::new();
        dom.dispatch_event(DomEvent::click("btn-1"));
        dom.dispatch_event(DomEvent::key_press("2"));
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_event_history_is_bounded() {
        let mut dom = MockDom::new();
        for i in 0..EVENT_HISTORY_LIMIT + 10 {
            dom.dispatch_event(DomEvent::key_press(&i.to_string()));
        }
        assert_eq!(dom.event_history().len(), EVENT_HISTORY_LIMIT);
        assert_eq!(dom.event_history()[0], DomEvent::key_press("10"));
        assert_eq!(
            dom.event_history().last(),
            Some(&DomEvent::key_press(&(EVENT_HISTORY_LIMIT + 9).to_string()))
        );
    }

    #[test]
    fn test_get_element_mut() {
        let mut dom = MockDom::calculator(&Keypad::new());
        if let Some(elem) = dom.get_element_mut("btn-7") {
            elem.set_text("seven");
        }
        assert_eq!(dom.get_element_text("btn-7"), Some("seven"));
    }
}
