//! Unified Calculator Driver
//!
//! Write the scenario once, run it against every frontend. The bare engine
//! and the mock DOM page both implement [`CalculatorDriver`], and the
//! `verify_*` functions below drive them through the keypad only.
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::driver::{run_full_suite, CalculatorDriver};
//! use keypad_calculator::wasm::WasmDriver;
//!
//! let mut driver = WasmDriver::new();
//! driver.enter_keys("12+30=");
//! assert_eq!(driver.result_line(), "42");
//!
//! run_full_suite(&mut driver);
//! ```

use crate::core::engine::{CalculatorEngine, Feedback};
use crate::core::ErrorKind;
use crate::keypad::{Keypad, KeypadAction};

/// Abstract driver trait for keypad interactions
pub trait CalculatorDriver {
    /// Performs one keypad action
    fn press(&mut self, action: KeypadAction) -> Feedback;

    /// Gets the operation line as displayed
    fn operation_line(&self) -> String;

    /// Gets the result line as displayed
    fn result_line(&self) -> String;

    /// Returns true while an error is displayed
    fn is_error(&self) -> bool;

    /// Presses the clear key
    fn clear(&mut self) {
        self.press(KeypadAction::Clear);
    }

    /// Presses one key per character, skipping characters with no key
    fn enter_keys(&mut self, keys: &str) -> Vec<Feedback> {
        keys.chars()
            .filter_map(|ch| Keypad::key_to_action(ch.encode_utf8(&mut [0; 4])))
            .map(|action| self.press(action))
            .collect()
    }
}

impl CalculatorDriver for CalculatorEngine {
    fn press(&mut self, action: KeypadAction) -> Feedback {
        CalculatorEngine::press(self, action)
    }

    fn operation_line(&self) -> String {
        CalculatorEngine::operation_line(self).to_string()
    }

    fn result_line(&self) -> String {
        CalculatorEngine::result_line(self).to_string()
    }

    fn is_error(&self) -> bool {
        CalculatorEngine::is_error(self)
    }

    fn clear(&mut self) {
        CalculatorEngine::clear(self);
    }
}

// ===== Shared Scenarios =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operations and the display lines they produce
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases = [
        ("12+30=", "12 + 30 =", "42"),
        ("10-4=", "10 - 4 =", "6"),
        ("6*7=", "6 × 7 =", "42"),
        ("20/4=", "20 ÷ 4 =", "5"),
        ("1/4=", "1 ÷ 4 =", "0.25"),
    ];
    for (keys, operation_line, result_line) in cases {
        driver.clear();
        driver.enter_keys(keys);
        assert_eq!(driver.operation_line(), operation_line, "keys {keys}");
        assert_eq!(driver.result_line(), result_line, "keys {keys}");
    }
    driver.clear();
}

/// Verifies left-to-right chaining without precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.enter_keys("2+3*4=");
    assert_eq!(driver.operation_line(), "5 × 4 =");
    assert_eq!(driver.result_line(), "20");

    // The result keeps feeding the next operation
    driver.enter_keys("-5=");
    assert_eq!(driver.result_line(), "15");
    driver.clear();
}

/// Verifies the error state and its exits
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let feedback = driver.enter_keys("5/0=");
    assert_eq!(
        feedback.last(),
        Some(&Feedback::Failed(ErrorKind::DivisionByZero))
    );
    assert!(driver.is_error());
    assert_eq!(driver.operation_line(), "Error");
    assert_eq!(driver.result_line(), "Cannot divide by 0");

    // Equals and operations do not leave the error state with a value
    driver.press(KeypadAction::Equals);
    assert!(driver.is_error());

    // A digit clears first, then applies
    driver.enter_keys("7");
    assert!(!driver.is_error());
    assert_eq!(driver.result_line(), "7");
    driver.clear();
}

/// Verifies digit entry, decimal point and delete
pub fn verify_input_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.enter_keys("1.5");
    assert_eq!(driver.result_line(), "1.5");
    driver.press(KeypadAction::Decimal);
    assert_eq!(driver.result_line(), "1.5");

    driver.clear();
    driver.enter_keys("123");
    driver.press(KeypadAction::Delete);
    assert_eq!(driver.result_line(), "12");

    driver.clear();
    assert_eq!(driver.press(KeypadAction::Delete), Feedback::Ignored);
    assert_eq!(driver.result_line(), "");

    driver.enter_keys("00");
    assert_eq!(driver.result_line(), "0");
    driver.clear();
}

/// Complete verification suite - runs every scenario
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_error_handling(driver);
    verify_input_editing(driver);
}
