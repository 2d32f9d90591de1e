// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Operator semantics on runtime values.
//!
//! `&&` and `||` are not here: they short-circuit and so are evaluated by
//! the interpreter itself.

use num_traits::ToPrimitive;

use crate::ast::{BinaryOperator, UnaryOperator, UpdateOperator};
use crate::runtime::Value;
use crate::{Error, Result};

/// Applies a non-short-circuiting binary operator.
pub fn binary(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value> {
    use BinaryOperator::*;

    match operator {
        Equal => Ok(Value::Boolean(left == right)),
        NotEqual => Ok(Value::Boolean(left != right)),
        Add => add(left, right),
        Subtract | Multiply | Divide | Modulo | Exponent => {
            let (a, b) = numbers(operator, left, right)?;
            Ok(Value::Number(match operator {
                Subtract => a - b,
                Multiply => a * b,
                Divide => a / b,
                Modulo => a % b,
                _ => a.powf(b),
            }))
        }
        GreaterThan | GreaterThanEqual | LessThan | LessThanEqual => compare(operator, left, right),
        BitwiseAnd | BitwiseOr | BitwiseXor | BitwiseAndNot | LeftShift | RightShift => {
            bitwise(operator, left, right)
        }
        LogicalAnd | LogicalOr => Ok(Value::Boolean(match operator {
            LogicalAnd => left.to_boolean() && right.to_boolean(),
            _ => left.to_boolean() || right.to_boolean(),
        })),
    }
}

/// Applies a unary operator.
pub fn unary(operator: UnaryOperator, argument: &Value) -> Result<Value> {
    match operator {
        UnaryOperator::LogicalNot => Ok(Value::Boolean(!argument.to_boolean())),
        UnaryOperator::BitwiseNot => Ok(int_value(!integer(argument, "^")?)),
        UnaryOperator::Plus => Ok(Value::Number(number(argument, "+")?)),
        UnaryOperator::Minus => Ok(Value::Number(-number(argument, "-")?)),
    }
}

/// Computes the new value for `++` or `--`.
pub fn update(operator: UpdateOperator, argument: &Value) -> Result<Value> {
    match operator {
        UpdateOperator::Increment => Ok(Value::Number(number(argument, "++")? + 1.0)),
        UpdateOperator::Decrement => Ok(Value::Number(number(argument, "--")? - 1.0)),
    }
}

fn add(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), b) => Ok(Value::String(format!("{}{}", a, b))),
        (a, Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
        _ => Err(mismatch(BinaryOperator::Add, left, right)),
    }
}

fn compare(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(operator, left, right)),
    };

    // NaN compares false against everything
    let Some(ordering) = ordering else {
        return Ok(Value::Boolean(false));
    };
    Ok(Value::Boolean(match operator {
        BinaryOperator::GreaterThan => ordering.is_gt(),
        BinaryOperator::GreaterThanEqual => ordering.is_ge(),
        BinaryOperator::LessThan => ordering.is_lt(),
        _ => ordering.is_le(),
    }))
}

fn bitwise(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value> {
    let symbol = operator.as_str();
    let a = integer(left, symbol)?;
    let b = integer(right, symbol)?;

    let result = match operator {
        BinaryOperator::BitwiseAnd => a & b,
        BinaryOperator::BitwiseOr => a | b,
        BinaryOperator::BitwiseXor => a ^ b,
        BinaryOperator::BitwiseAndNot => a & !b,
        BinaryOperator::LeftShift => a.checked_shl(shift_count(b)?).unwrap_or(0),
        _ => a >> shift_count(b)?.min(63),
    };
    Ok(int_value(result))
}

fn shift_count(count: i64) -> Result<u32> {
    if count < 0 {
        return Err(Error::range_error(format!("negative shift count {}", count)));
    }
    count
        .to_u32()
        .ok_or_else(|| Error::range_error(format!("shift count {} is too large", count)))
}

fn numbers(operator: BinaryOperator, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(mismatch(operator, left, right)),
    }
}

fn number(value: &Value, symbol: &str) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(Error::type_error(format!(
            "bad operand type for `{}`: {}",
            symbol,
            other.type_of()
        ))),
    }
}

/// Converts an integral number to `i64`.
fn integer(value: &Value, symbol: &str) -> Result<i64> {
    let n = number(value, symbol)?;
    if n.fract() != 0.0 {
        return Err(Error::type_error(format!(
            "operand of `{}` must be an integer, got {}",
            symbol, n
        )));
    }
    n.to_i64()
        .ok_or_else(|| Error::range_error(format!("{} does not fit in an integer", n)))
}

fn int_value(n: i64) -> Value {
    Value::Number(n as f64)
}

fn mismatch(operator: BinaryOperator, left: &Value, right: &Value) -> Error {
    Error::type_error(format!(
        "unsupported operand types for `{}`: {} and {}",
        operator.as_str(),
        left.type_of(),
        right.type_of()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tao_macros::{assert_err, assert_matches, assert_ok};

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn eval(operator: BinaryOperator, left: Value, right: Value) -> Value {
        assert_ok!(binary(operator, &left, &right))
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval(BinaryOperator::Add, num(1.0), num(2.0)), num(3.0));
        assert_eq!(eval(BinaryOperator::Subtract, num(1.0), num(2.0)), num(-1.0));
        assert_eq!(eval(BinaryOperator::Multiply, num(3.0), num(4.0)), num(12.0));
        assert_eq!(eval(BinaryOperator::Divide, num(1.0), num(4.0)), num(0.25));
        assert_eq!(eval(BinaryOperator::Modulo, num(7.0), num(4.0)), num(3.0));
        assert_eq!(eval(BinaryOperator::Exponent, num(2.0), num(10.0)), num(1024.0));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            eval(BinaryOperator::Add, Value::from("n="), num(4.0)),
            Value::from("n=4")
        );
        assert_eq!(
            eval(BinaryOperator::Add, Value::Nil, Value::from("!")),
            Value::from("nil!")
        );
    }

    #[test]
    fn test_arithmetic_type_error() {
        let err = assert_err!(binary(BinaryOperator::Subtract, &Value::from("a"), &num(1.0)));
        assert_matches!(err, Error::TypeError(ref msg) if msg.contains("`-`"));
        assert!(binary(BinaryOperator::Add, &Value::Nil, &num(1.0)).is_err());
    }

    #[test]
    fn test_comparison() {
        assert_eq!(eval(BinaryOperator::LessThan, num(1.0), num(2.0)), Value::Boolean(true));
        assert_eq!(
            eval(BinaryOperator::GreaterThanEqual, Value::from("b"), Value::from("a")),
            Value::Boolean(true)
        );
        assert_eq!(
            eval(BinaryOperator::LessThanEqual, num(f64::NAN), num(1.0)),
            Value::Boolean(false)
        );
        assert!(binary(BinaryOperator::LessThan, &num(1.0), &Value::from("2")).is_err());
    }

    #[test]
    fn test_equality() {
        assert_eq!(eval(BinaryOperator::Equal, num(1.0), num(1.0)), Value::Boolean(true));
        assert_eq!(eval(BinaryOperator::Equal, num(1.0), Value::from("1")), Value::Boolean(false));
        assert_eq!(eval(BinaryOperator::NotEqual, Value::Nil, Value::Nil), Value::Boolean(false));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(eval(BinaryOperator::BitwiseAnd, num(6.0), num(3.0)), num(2.0));
        assert_eq!(eval(BinaryOperator::BitwiseOr, num(6.0), num(3.0)), num(7.0));
        assert_eq!(eval(BinaryOperator::BitwiseXor, num(6.0), num(3.0)), num(5.0));
        assert_eq!(eval(BinaryOperator::BitwiseAndNot, num(6.0), num(3.0)), num(4.0));
        assert_eq!(eval(BinaryOperator::LeftShift, num(1.0), num(4.0)), num(16.0));
        assert_eq!(eval(BinaryOperator::RightShift, num(-16.0), num(2.0)), num(-4.0));
    }

    #[test]
    fn test_bitwise_rejects_fractions() {
        let err = assert_err!(binary(BinaryOperator::BitwiseAnd, &num(1.5), &num(1.0)));
        assert_matches!(err, Error::TypeError(_));
        let err = assert_err!(binary(BinaryOperator::LeftShift, &num(1.0), &num(-1.0)));
        assert_matches!(err, Error::RangeError(ref msg) if msg == "negative shift count -1");
    }

    #[test]
    fn test_shift_count_overflow() {
        let err = assert_err!(binary(BinaryOperator::LeftShift, &num(1.0), &num(5e9)));
        assert_matches!(err, Error::RangeError(ref msg) if msg == "shift count 5000000000 is too large");
        assert_eq!(eval(BinaryOperator::LeftShift, num(1.0), num(64.0)), num(0.0));
        assert_eq!(eval(BinaryOperator::RightShift, num(-1.0), num(100.0)), num(-1.0));
    }

    #[test]
    fn test_unary() {
        assert_eq!(assert_ok!(unary(UnaryOperator::LogicalNot, &Value::Nil)), Value::Boolean(true));
        assert_eq!(assert_ok!(unary(UnaryOperator::BitwiseNot, &num(0.0))), num(-1.0));
        assert_eq!(assert_ok!(unary(UnaryOperator::Minus, &num(2.0))), num(-2.0));
        assert!(unary(UnaryOperator::Plus, &Value::from("1")).is_err());
    }

    #[test]
    fn test_update() {
        assert_eq!(assert_ok!(update(UpdateOperator::Increment, &num(1.0))), num(2.0));
        assert_eq!(assert_ok!(update(UpdateOperator::Decrement, &num(1.0))), num(0.0));
        assert!(update(UpdateOperator::Increment, &Value::Nil).is_err());
    }
}
