//! WASM Driver - keypad page on a mock DOM
//!
//! Owns one engine and mirrors its display lines into the page after every
//! event. The input-limit warning is a class on the result line that is
//! removed once [`FLASH_DURATION`] has elapsed; time only moves through
//! [`WasmDriver::advance_time`], which keeps tests deterministic.

use std::time::Duration;

use tracing::debug;

use super::dom::{DomEvent, MockDom};
use super::{ERROR_CLASS, FLASH_CLASS, FLASH_DURATION, OPERATION_LINE_ID, RESULT_LINE_ID};
use crate::core::engine::{CalculatorEngine, Feedback};
use crate::core::{CalcResult, DisplayLimits};
use crate::driver::CalculatorDriver;
use crate::keypad::{Keypad, KeypadAction};

/// WASM Driver wrapping the engine and mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    engine: CalculatorEngine,
    keypad: Keypad,
    dom: MockDom,
    /// Time left before the warning class is removed
    flash_remaining: Option<Duration>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with the default display limits
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(CalculatorEngine::new())
    }

    /// Creates a driver with custom display limits
    pub fn with_limits(limits: DisplayLimits) -> CalcResult<Self> {
        Ok(Self::with_engine(CalculatorEngine::with_limits(limits)?))
    }

    /// Creates a driver around an existing engine
    #[must_use]
    pub fn with_engine(engine: CalculatorEngine) -> Self {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        let mut driver = Self {
            engine,
            keypad,
            dom,
            flash_remaining: None,
        };
        driver.sync_dom();
        driver
    }

    /// Returns a reference to the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Simulates clicking a keypad button by element id
    ///
    /// Returns `None` when the id is not a keypad button.
    pub fn click(&mut self, element_id: &str) -> Option<Feedback> {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let action = self.keypad.handle_click(element_id)?;
        Some(self.apply(action))
    }

    /// Simulates a key press
    ///
    /// Returns `None` when the key has no keypad meaning.
    pub fn press_key(&mut self, key: &str) -> Option<Feedback> {
        self.dom.dispatch_event(DomEvent::key_press(key));
        let action = Keypad::key_to_action(key)?;
        Some(self.apply(action))
    }

    /// Advances the page clock, expiring the warning flash when due
    pub fn advance_time(&mut self, elapsed: Duration) {
        let Some(remaining) = self.flash_remaining else {
            return;
        };
        if elapsed >= remaining {
            self.flash_remaining = None;
            self.dom
                .toggle_element_class(RESULT_LINE_ID, FLASH_CLASS, false);
            debug!("input limit warning cleared");
        } else {
            self.flash_remaining = Some(remaining - elapsed);
        }
    }

    /// Returns true while the input-limit warning is visible
    #[must_use]
    pub fn is_flashing(&self) -> bool {
        self.dom.element_has_class(RESULT_LINE_ID, FLASH_CLASS)
    }

    /// Gets the operation line element's text
    #[must_use]
    pub fn operation_line_text(&self) -> Option<&str> {
        self.dom.get_element_text(OPERATION_LINE_ID)
    }

    /// Gets the result line element's text
    #[must_use]
    pub fn result_line_text(&self) -> Option<&str> {
        self.dom.get_element_text(RESULT_LINE_ID)
    }

    fn apply(&mut self, action: KeypadAction) -> Feedback {
        let feedback = self.engine.press(action);
        if feedback == Feedback::InputLimitReached {
            // A new hit restarts the timer
            self.flash_remaining = Some(FLASH_DURATION);
            self.dom
                .toggle_element_class(RESULT_LINE_ID, FLASH_CLASS, true);
        }
        self.sync_dom();
        feedback
    }

    /// Synchronizes DOM state with engine state
    fn sync_dom(&mut self) {
        let display = self.engine.display();
        self.dom
            .set_element_text(OPERATION_LINE_ID, &display.operation_line);
        self.dom
            .set_element_text(RESULT_LINE_ID, &display.result_line);

        let is_error = self.engine.is_error();
        for id in [OPERATION_LINE_ID, RESULT_LINE_ID] {
            self.dom.toggle_element_class(id, ERROR_CLASS, is_error);
        }
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, action: KeypadAction) -> Feedback {
        self.apply(action)
    }

    fn operation_line(&self) -> String {
        self.operation_line_text().unwrap_or_default().to_string()
    }

    fn result_line(&self) -> String {
        self.result_line_text().unwrap_or_default().to_string()
    }

    fn is_error(&self) -> bool {
        self.engine.is_error()
    }
}
