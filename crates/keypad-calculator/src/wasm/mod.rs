//! WASM Frontend for Calculator
//!
//! The mock DOM frontend is always compiled so the page behaviour can be
//! tested natively; the real browser bindings need the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

use std::time::Duration;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;

/// Element showing the operation line
pub const OPERATION_LINE_ID: &str = "display__input";
/// Element showing the result line
pub const RESULT_LINE_ID: &str = "display__result";
/// Class applied to the result line while the input-limit warning shows
pub const FLASH_CLASS: &str = "display--flash";
/// Class applied to both display lines while an error is shown
pub const ERROR_CLASS: &str = "display--error";
/// How long the input-limit warning stays visible
pub const FLASH_DURATION: Duration = Duration::from_millis(300);
