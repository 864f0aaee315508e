//! Property-based tests for the calculator engine

use keypad_calculator::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

/// Digit strings that fit the input field
fn operand_strategy() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,6}"
}

fn action_strategy() -> impl Strategy<Value = KeypadAction> {
    prop_oneof![
        4 => (0u8..=9).prop_map(KeypadAction::Digit),
        1 => Just(KeypadAction::Decimal),
        2 => operation_strategy().prop_map(KeypadAction::Operation),
        1 => Just(KeypadAction::Equals),
        1 => Just(KeypadAction::Clear),
        1 => Just(KeypadAction::Delete),
    ]
}

fn type_operand(engine: &mut CalculatorEngine, digits: &str) {
    for ch in digits.chars() {
        engine.append_digit(ch.to_digit(10).unwrap() as u8);
    }
}

// ===== Input properties =====

proptest! {
    /// Digits within the limit are echoed exactly
    #[test]
    fn prop_digits_echoed(digits in "[1-9][0-9]{0,14}") {
        let mut engine = CalculatorEngine::new();
        type_operand(&mut engine, &digits);
        prop_assert_eq!(engine.result_line(), digits.as_str());
    }

    /// The operand never grows past the limit, however many digits arrive
    #[test]
    fn prop_input_bounded(digits in "[0-9]{0,40}") {
        let mut engine = CalculatorEngine::new();
        type_operand(&mut engine, &digits);
        prop_assert!(engine.current_input().len() <= DisplayLimits::MAX_INPUT_LENGTH);
    }

    /// A second decimal point changes nothing
    #[test]
    fn prop_decimal_point_idempotent(digits in "[0-9]{0,6}") {
        let mut engine = CalculatorEngine::new();
        type_operand(&mut engine, &digits);
        engine.append_decimal_point();
        let once = engine.snapshot();
        prop_assert_eq!(engine.append_decimal_point(), Feedback::Ignored);
        prop_assert_eq!(engine.snapshot(), once);
    }
}

// ===== Evaluation properties =====

proptest! {
    /// Evaluate without all three fields is a no-op
    #[test]
    fn prop_evaluate_noop_when_incomplete(
        lhs in operand_strategy(),
        op in operation_strategy(),
        with_operation in any::<bool>(),
    ) {
        let mut engine = CalculatorEngine::new();
        type_operand(&mut engine, &lhs);
        if with_operation {
            engine.set_operation(op);
        }
        let before = engine.snapshot();
        prop_assert_eq!(engine.evaluate(), Feedback::Ignored);
        prop_assert_eq!(engine.snapshot(), before);
    }

    /// Any dividend over zero is a division-by-zero error
    #[test]
    fn prop_divide_by_zero_errors(lhs in operand_strategy(), zeros in 1usize..4) {
        let mut engine = CalculatorEngine::new();
        type_operand(&mut engine, &lhs);
        engine.set_operation(Operation::Divide);
        engine.append_digit(0);
        engine.append_decimal_point();
        for _ in 1..zeros {
            engine.append_digit(0);
        }
        prop_assert_eq!(engine.evaluate(), Feedback::Failed(ErrorKind::DivisionByZero));
        prop_assert_eq!(engine.result_line(), "Cannot divide by 0");
        prop_assert_eq!(engine.operation_line(), "Error");
    }

    /// Pressing B straight after A's operand equals pressing = first
    #[test]
    fn prop_chaining_equals_explicit_evaluate(
        a in operand_strategy(),
        b in operand_strategy(),
        first in operation_strategy(),
        second in operation_strategy(),
    ) {
        let mut chained = CalculatorEngine::new();
        type_operand(&mut chained, &a);
        chained.set_operation(first);
        type_operand(&mut chained, &b);
        chained.set_operation(second);

        let mut explicit = CalculatorEngine::new();
        type_operand(&mut explicit, &a);
        explicit.set_operation(first);
        type_operand(&mut explicit, &b);
        explicit.evaluate();
        explicit.set_operation(second);

        prop_assert_eq!(chained.snapshot(), explicit.snapshot());
    }

    /// The result line matches the formatted arithmetic result
    #[test]
    fn prop_evaluate_matches_calculator(
        a in operand_strategy(),
        b in operand_strategy(),
        op in operation_strategy(),
    ) {
        let mut engine = CalculatorEngine::new();
        type_operand(&mut engine, &a);
        engine.set_operation(op);
        type_operand(&mut engine, &b);
        engine.evaluate();

        let expected = Calculator::calculate(a.parse().unwrap(), b.parse().unwrap(), op).unwrap();
        let shown: f64 = engine.result_line().parse().unwrap();
        prop_assert!((shown - expected).abs() <= expected.abs() * 1e-9 + 1e-10);
        prop_assert_eq!(engine.operation_line(), format!("{a} {op} {b} ="));
    }
}

// ===== State machine invariants =====

proptest! {
    /// Random key mashing never breaks the invariants
    #[test]
    fn prop_invariants_hold(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let mut engine = CalculatorEngine::new();
        for action in actions {
            engine.press(action);

            match engine.state() {
                EngineState::PendingOperation { previous_input, .. } => {
                    prop_assert!(!previous_input.is_empty());
                }
                EngineState::Error(err) => {
                    prop_assert_eq!(engine.operation_line(), "Error");
                    prop_assert_eq!(engine.result_line(), err.to_string());
                    prop_assert_eq!(engine.current_input(), "");
                }
                EngineState::Ready => {}
            }
            prop_assert!(
                engine.current_input().chars().count()
                    <= DisplayLimits::MAX_INPUT_LENGTH.max(DisplayLimits::MAX_DISPLAY_LENGTH)
            );
        }
    }

    /// Clear always returns to a fresh engine
    #[test]
    fn prop_clear_resets(actions in prop::collection::vec(action_strategy(), 0..30)) {
        let mut engine = CalculatorEngine::new();
        for action in actions {
            engine.press(action);
        }
        engine.clear();
        prop_assert_eq!(engine.snapshot(), CalculatorEngine::new().snapshot());
    }
}
