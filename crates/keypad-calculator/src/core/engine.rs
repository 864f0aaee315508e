//! Keypad state machine
//!
//! The engine owns the operand being typed, the pending left operand and
//! operation, and the two display lines. Every keypad action runs to
//! completion and leaves the engine usable; failures only ever show up as
//! the [`EngineState::Error`] state and its message on the result line.
//!
//! Transitions:
//!
//! ```text
//! Ready             --op-->  PendingOperation   (operand moved left)
//! PendingOperation  --=-->   Ready              (result becomes the operand)
//! PendingOperation  --op-->  PendingOperation   (fold, then new operation)
//! PendingOperation  --=/op-> Error              (division by zero, overflow, bad operand)
//! Error             --C/⌫/op--> Ready
//! Error             --digit/.--> Ready          (then the key is applied)
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::format::{compact_operand, format_number};
use crate::core::{CalcError, CalcResult, Calculator, DisplayLimits, ErrorKind, Operation};
use crate::keypad::KeypadAction;

/// Text shown on the operation line while in the error state
pub const ERROR_MARKER: &str = "Error";

/// Engine phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No operation selected; the current input is the only operand
    #[default]
    Ready,
    /// A left operand and an operation wait for the right operand
    PendingOperation {
        /// Left operand as it appears on the operation line
        previous_input: String,
        /// Selected operation
        operation: Operation,
    },
    /// Showing an error until the next clearing action
    Error(CalcError),
}

/// The two observable display lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayLines {
    /// Upper line: operands and operator, or the error marker
    pub operation_line: String,
    /// Lower line: current input, result, or error message
    pub result_line: String,
}

/// What a keypad action did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feedback {
    /// State or display changed
    Updated,
    /// Action had no effect
    Ignored,
    /// Input rejected because the operand is at its maximum length
    InputLimitReached,
    /// Evaluation failed and the engine entered the error state
    Failed(ErrorKind),
}

/// Serializable view of the whole observable state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    /// Operand being typed
    pub current_input: String,
    /// Pending left operand, empty when none
    pub previous_input: String,
    /// Pending operation symbol, empty when none
    pub operation: String,
    /// Whether the engine shows an error
    pub is_error: bool,
    /// Error category while in the error state
    pub error_kind: Option<ErrorKind>,
    /// Display lines
    pub display: DisplayLines,
}

impl EngineSnapshot {
    /// Serializes the snapshot for a frontend
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string(self).map_err(|e| CalcError::InvalidInput(e.to_string()))
    }
}

/// Calculator engine driven by keypad actions
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    limits: DisplayLimits,
    state: EngineState,
    current_input: String,
    display: DisplayLines,
}

impl CalculatorEngine {
    /// Creates an engine with the default display limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom display limits
    pub fn with_limits(limits: DisplayLimits) -> CalcResult<Self> {
        limits.validate()?;
        Ok(Self {
            limits,
            ..Self::default()
        })
    }

    // ===== Accessors =====

    /// Returns the active limits
    #[must_use]
    pub fn limits(&self) -> &DisplayLimits {
        &self.limits
    }

    /// Returns the current phase
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Returns the operand being typed
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Returns the pending left operand, or `""`
    #[must_use]
    pub fn previous_input(&self) -> &str {
        match &self.state {
            EngineState::PendingOperation { previous_input, .. } => previous_input,
            _ => "",
        }
    }

    /// Returns the pending operation
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match &self.state {
            EngineState::PendingOperation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Returns true while an error is displayed
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.state, EngineState::Error(_))
    }

    /// Returns both display lines
    #[must_use]
    pub fn display(&self) -> &DisplayLines {
        &self.display
    }

    /// Returns the operation line
    #[must_use]
    pub fn operation_line(&self) -> &str {
        &self.display.operation_line
    }

    /// Returns the result line
    #[must_use]
    pub fn result_line(&self) -> &str {
        &self.display.result_line
    }

    /// Captures the observable state
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_input: self.current_input.clone(),
            previous_input: self.previous_input().to_string(),
            operation: self
                .operation()
                .map(|op| op.symbol().to_string())
                .unwrap_or_default(),
            is_error: self.is_error(),
            error_kind: match &self.state {
                EngineState::Error(err) => Some(err.kind()),
                _ => None,
            },
            display: self.display.clone(),
        }
    }

    // ===== Keypad actions =====

    /// Dispatches a keypad action to the matching operation
    pub fn press(&mut self, action: KeypadAction) -> Feedback {
        match action {
            KeypadAction::Digit(d) => self.append_digit(d),
            KeypadAction::Decimal => self.append_decimal_point(),
            KeypadAction::Operation(op) => self.set_operation(op),
            KeypadAction::Equals => self.evaluate(),
            KeypadAction::Clear => self.clear(),
            KeypadAction::Delete => self.delete_last_digit(),
        }
    }

    /// Appends a digit (0-9) to the current operand
    pub fn append_digit(&mut self, digit: u8) -> Feedback {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            debug!(digit, "ignoring non-decimal digit");
            return Feedback::Ignored;
        };
        if self.is_error() {
            self.clear();
        }
        if self.input_full() {
            return self.reject_input();
        }
        if ch == '0' && self.current_input == "0" {
            return Feedback::Ignored;
        }

        self.current_input.push(ch);
        self.display.result_line.clone_from(&self.current_input);
        debug!(input = %self.current_input, "digit appended");
        Feedback::Updated
    }

    /// Appends a decimal point, seeding `0` when the operand is empty
    pub fn append_decimal_point(&mut self) -> Feedback {
        if self.is_error() {
            self.clear();
        }
        if self.current_input.contains('.') {
            return Feedback::Ignored;
        }
        if self.input_full() {
            return self.reject_input();
        }

        if self.current_input.is_empty() {
            self.current_input.push('0');
        }
        self.current_input.push('.');
        self.display.result_line.clone_from(&self.current_input);
        debug!(input = %self.current_input, "decimal point appended");
        Feedback::Updated
    }

    /// Selects an operation, folding any pending one first
    pub fn set_operation(&mut self, operation: Operation) -> Feedback {
        if self.is_error() {
            return self.clear();
        }
        if self.current_input.is_empty() {
            return Feedback::Ignored;
        }
        if matches!(self.state, EngineState::PendingOperation { .. }) {
            if let Feedback::Failed(kind) = self.evaluate() {
                return Feedback::Failed(kind);
            }
        }

        let previous_input = compact_operand(&self.current_input, &self.limits);
        self.display.operation_line = format!("{previous_input} {operation}");
        debug!(previous = %previous_input, %operation, "operation selected");
        self.current_input.clear();
        self.state = EngineState::PendingOperation {
            previous_input,
            operation,
        };
        Feedback::Updated
    }

    /// Folds the pending operation with the current operand
    pub fn evaluate(&mut self) -> Feedback {
        let EngineState::PendingOperation {
            previous_input,
            operation,
        } = &self.state
        else {
            return Feedback::Ignored;
        };
        if self.current_input.is_empty() {
            return Feedback::Ignored;
        }
        let previous_input = previous_input.clone();
        let operation = *operation;

        match self.compute(&previous_input, operation) {
            Ok(value) => {
                let formatted = format_number(value, &self.limits);
                self.display.operation_line =
                    format!("{previous_input} {operation} {} =", self.current_input);
                self.display.result_line.clone_from(&formatted);
                debug!(line = %self.display.operation_line, result = %formatted, "evaluated");
                self.current_input = formatted;
                self.state = EngineState::Ready;
                Feedback::Updated
            }
            Err(err) => self.fail(err),
        }
    }

    /// Resets every field and both display lines
    pub fn clear(&mut self) -> Feedback {
        self.state = EngineState::Ready;
        self.current_input.clear();
        self.display = DisplayLines::default();
        debug!("cleared");
        Feedback::Updated
    }

    /// Removes the last character of the current operand
    ///
    /// In the error state this clears everything instead.
    pub fn delete_last_digit(&mut self) -> Feedback {
        if self.is_error() {
            return self.clear();
        }
        if self.current_input.pop().is_none() {
            return Feedback::Ignored;
        }
        self.display.result_line.clone_from(&self.current_input);
        Feedback::Updated
    }

    // ===== Helpers =====

    fn compute(&self, previous_input: &str, operation: Operation) -> CalcResult<f64> {
        let lhs = Calculator::parse_operand(previous_input)?;
        let rhs = Calculator::parse_operand(&self.current_input)?;
        Calculator::calculate(lhs, rhs, operation)
    }

    fn input_full(&self) -> bool {
        self.current_input.chars().count() >= self.limits.max_input_length
    }

    fn reject_input(&self) -> Feedback {
        warn!(
            input = %self.current_input,
            limit = self.limits.max_input_length,
            "input limit reached"
        );
        Feedback::InputLimitReached
    }

    fn fail(&mut self, err: CalcError) -> Feedback {
        let kind = err.kind();
        warn!(?kind, message = %err, "entering error state");
        self.display.operation_line = ERROR_MARKER.to_string();
        self.display.result_line = err.to_string();
        self.current_input.clear();
        self.state = EngineState::Error(err);
        Feedback::Failed(kind)
    }
}
