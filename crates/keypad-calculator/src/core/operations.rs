//! Four-function arithmetic
//!
//! Each operation is its own function so the divisor guard in
//! [`Calculator::calculate`] runs before [`Calculator::divide`] is reached.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operation selectable from the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol shown on the keypad and operation line
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns a stable ASCII name, used for element ids
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }

    /// Parses a keypad symbol or its ASCII keyboard alias
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "×" | "*" | "x" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Stateless arithmetic on two operands
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Performs an operation on two operands
    ///
    /// A zero divisor is rejected before any division happens.
    pub fn calculate(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Operation::Divide => Self::divide(a, b),
        }
    }

    /// Parses an operand string typed on the keypad
    pub fn parse_operand(text: &str) -> CalcResult<f64> {
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| CalcError::InvalidInput(text.to_string()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::InvalidInput(text.to_string()))
        }
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a - b)
    }

    /// Multiplication: a × b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a * b)
    }

    /// Division: a ÷ b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a / b)
    }

    /// Infinity and NaN both count as overflow
    fn check_overflow(result: f64) -> CalcResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}
