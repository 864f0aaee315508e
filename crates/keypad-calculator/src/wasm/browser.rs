//! Browser WASM bindings for Calculator
//!
//! The page keeps its markup (buttons tagged with `data-type`, the two
//! display elements) and forwards clicks and key presses here. After every
//! action the display lines are written back into the document.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element};

use super::{ERROR_CLASS, FLASH_CLASS, FLASH_DURATION, OPERATION_LINE_ID, RESULT_LINE_ID};
use crate::core::engine::{CalculatorEngine, Feedback};
use crate::core::DisplayLimits;
use crate::keypad::{Keypad, KeypadAction};

/// Browser Calculator - the main WASM entry point
#[derive(Debug, Default)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: CalculatorEngine,
    keypad: Keypad,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::default()
    }

    /// Create a calculator with display limits given as JSON
    pub fn with_limits_json(json: &str) -> Result<BrowserCalculator, JsValue> {
        let limits = DisplayLimits::from_json(json).map_err(to_js_error)?;
        let engine = CalculatorEngine::with_limits(limits).map_err(to_js_error)?;
        Ok(Self {
            engine,
            keypad: Keypad::new(),
        })
    }

    /// Current operation line
    #[wasm_bindgen(getter)]
    pub fn operation_line(&self) -> String {
        self.engine.operation_line().to_string()
    }

    /// Current result line
    #[wasm_bindgen(getter)]
    pub fn result_line(&self) -> String {
        self.engine.result_line().to_string()
    }

    /// Whether an error is displayed
    #[wasm_bindgen(getter)]
    pub fn is_error(&self) -> bool {
        self.engine.is_error()
    }

    /// Handle a click on a button carrying `data-type` and a text label
    pub fn handle_markup(&mut self, data_type: &str, text: &str) -> Result<bool, JsValue> {
        match KeypadAction::from_markup(data_type, text) {
            Some(action) => self.dispatch(action).map(|()| true),
            None => Ok(false),
        }
    }

    /// Handle a keypad button click by element ID
    pub fn handle_button(&mut self, button_id: &str) -> Result<bool, JsValue> {
        match self.keypad.handle_click(button_id) {
            Some(action) => self.dispatch(action).map(|()| true),
            None => Ok(false),
        }
    }

    /// Handle a keyboard key press
    pub fn handle_key(&mut self, key: &str) -> Result<bool, JsValue> {
        match Keypad::key_to_action(key) {
            Some(action) => self.dispatch(action).map(|()| true),
            None => Ok(false),
        }
    }

    /// Observable state as JSON
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.engine.snapshot().to_json().map_err(to_js_error)
    }

    /// Write both display lines into the document
    pub fn render(&self) -> Result<(), JsValue> {
        let document = document()?;
        let is_error = self.engine.is_error();
        let lines = [
            (OPERATION_LINE_ID, self.engine.operation_line()),
            (RESULT_LINE_ID, self.engine.result_line()),
        ];
        for (id, text) in lines {
            if let Some(element) = document.get_element_by_id(id) {
                element.set_text_content(Some(text));
                element.class_list().toggle_with_force(ERROR_CLASS, is_error)?;
            }
        }
        Ok(())
    }
}

impl BrowserCalculator {
    fn dispatch(&mut self, action: KeypadAction) -> Result<(), JsValue> {
        if self.engine.press(action) == Feedback::InputLimitReached {
            flash_limit_warning()?;
        }
        self.render()
    }
}

/// Adds the warning class and schedules its removal
fn flash_limit_warning() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let Some(display) = document()?.get_element_by_id(RESULT_LINE_ID) else {
        return Ok(());
    };
    display.class_list().add_1(FLASH_CLASS)?;

    let revert = Closure::once_into_js(move || remove_flash(&display));
    let delay = i32::try_from(FLASH_DURATION.as_millis()).unwrap_or(i32::MAX);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        revert.unchecked_ref::<js_sys::Function>(),
        delay,
    )?;
    Ok(())
}

fn remove_flash(display: &Element) {
    if let Err(e) = display.class_list().remove_1(FLASH_CLASS) {
        console::warn_1(&e);
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn to_js_error(err: crate::core::CalcError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Calculator WASM initialized".into());
}
