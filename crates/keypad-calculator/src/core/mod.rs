//! Core calculator module
//!
//! Holds the arithmetic, number formatting and the keypad state machine.
//! Nothing in here touches a DOM or a terminal.

pub mod engine;
pub mod format;
mod operations;

pub use operations::{Calculator, Operation};

use serde::{Deserialize, Serialize};

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// The `Display` text of the evaluation errors is exactly what the result
/// line shows while the engine is in its error state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Second operand of a division was zero
    #[error("Cannot divide by 0")]
    DivisionByZero,
    /// Result was infinite or NaN
    #[error("Number too large")]
    Overflow,
    /// Operand did not parse as a number
    #[error("Invalid input")]
    InvalidInput(String),
    /// Display limits were inconsistent
    #[error("invalid display limits: {0}")]
    InvalidConfig(String),
}

impl CalcError {
    /// Returns the coarse error category
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Overflow => ErrorKind::Overflow,
            Self::InvalidInput(_) | Self::InvalidConfig(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Error categories surfaced to frontends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Division with a zero divisor
    DivisionByZero,
    /// Non-finite result
    Overflow,
    /// Unparseable operand or internal failure
    InvalidInput,
}

/// Length and precision limits for input and display
///
/// The defaults are the fixed constants the keypad ships with. Frontends
/// with a wider display may pass their own set to
/// [`CalculatorEngine::with_limits`](engine::CalculatorEngine::with_limits).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLimits {
    /// Maximum characters in the operand being typed
    pub max_input_length: usize,
    /// Maximum characters in a formatted result
    pub max_display_length: usize,
    /// Fractional digits in a scientific mantissa
    pub scientific_precision: usize,
    /// Fractional digits kept when rounding plain results
    pub rounding_precision: usize,
    /// Magnitudes above this render in scientific notation
    pub scientific_upper: f64,
    /// Non-zero magnitudes below this render in scientific notation
    pub scientific_lower: f64,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            max_input_length: Self::MAX_INPUT_LENGTH,
            max_display_length: Self::MAX_DISPLAY_LENGTH,
            scientific_precision: Self::SCIENTIFIC_PRECISION,
            rounding_precision: Self::ROUNDING_PRECISION,
            scientific_upper: Self::SCIENTIFIC_UPPER,
            scientific_lower: Self::SCIENTIFIC_LOWER,
        }
    }
}

impl DisplayLimits {
    /// Default maximum operand length
    pub const MAX_INPUT_LENGTH: usize = 15;
    /// Default maximum formatted result length
    pub const MAX_DISPLAY_LENGTH: usize = 20;
    /// Default scientific mantissa precision
    pub const SCIENTIFIC_PRECISION: usize = 10;
    /// Default rounding precision
    pub const ROUNDING_PRECISION: usize = 10;
    /// Default upper bound of plain notation
    pub const SCIENTIFIC_UPPER: f64 = 1e15;
    /// Default lower bound of plain notation
    pub const SCIENTIFIC_LOWER: f64 = 1e-10;

    /// Parses limits from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let limits: Self =
            serde_json::from_str(json).map_err(|e| CalcError::InvalidConfig(e.to_string()))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Checks that the limits describe a usable display
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_input_length == 0 {
            return Err(CalcError::InvalidConfig(
                "max_input_length must be non-zero".into(),
            ));
        }
        // Without a mantissa point a scientific result would accept a
        // trailing '.' and stop parsing.
        if self.scientific_precision == 0 {
            return Err(CalcError::InvalidConfig(
                "scientific_precision must be at least 1".into(),
            ));
        }
        // sign, leading digit, point, 'e', exponent sign, three exponent digits
        let widest_scientific = self.scientific_precision + 8;
        if self.max_display_length < widest_scientific {
            return Err(CalcError::InvalidConfig(format!(
                "max_display_length {} cannot hold a {}-digit scientific result ({} characters)",
                self.max_display_length, self.scientific_precision, widest_scientific
            )));
        }
        if !(self.scientific_lower > 0.0 && self.scientific_lower < self.scientific_upper) {
            return Err(CalcError::InvalidConfig(format!(
                "scientific bounds {} .. {} are inverted",
                self.scientific_lower, self.scientific_upper
            )));
        }
        Ok(())
    }
}
