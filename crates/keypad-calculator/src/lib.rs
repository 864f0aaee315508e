//! Keypad Calculator
//!
//! A four-function calculator driven one button at a time. The
//! [`CalculatorEngine`](core::engine::CalculatorEngine) is a small state
//! machine: digits accumulate into an operand, an operation moves it to the
//! left, equals folds the two, and a second operation before equals folds
//! left to right. Division by zero, overflow and unparseable operands put
//! the engine into an error state that the next clear or digit leaves.
//!
//! Frontends are thin: [`wasm::WasmDriver`] runs the page on a mock DOM for
//! native tests, and `wasm::BrowserCalculator` (feature `wasm`) binds the
//! same engine to the real document.
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.append_digit(1);
//! engine.append_digit(2);
//! engine.set_operation(Operation::Add);
//! engine.append_digit(3);
//! engine.append_digit(0);
//! engine.evaluate();
//!
//! assert_eq!(engine.operation_line(), "12 + 30 =");
//! assert_eq!(engine.result_line(), "42");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;

/// WASM module - always available for testing
/// (Mock DOM allows testing without actual browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::engine::{
        CalculatorEngine, DisplayLines, EngineSnapshot, EngineState, Feedback,
    };
    pub use crate::core::{CalcError, CalcResult, Calculator, DisplayLimits, ErrorKind, Operation};
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{Keypad, KeypadAction};
    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}
