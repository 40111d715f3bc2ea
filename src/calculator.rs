// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Arithmetic evaluation.
//!
//! Pure and side-effect free: nothing here touches the database, so every
//! rule about operands, operation tags and division by zero can be checked
//! without a running store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The four supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Tag used on the wire and in the `calculations.operation` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Apply the operation to two finite operands.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        let result = match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => {
                // Also catches -0.0.
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };

        if !result.is_finite() {
            return Err(CalcError::NonFiniteResult);
        }
        Ok(result)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CalcError::UnknownOperation(s.to_string()))
    }
}

impl TryFrom<String> for Operation {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A successfully evaluated operation.
///
/// Only [`evaluate`] builds one, so `result` always matches the operation
/// applied to the operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    operation: Operation,
    operand_a: f64,
    operand_b: f64,
    result: f64,
}

impl Evaluation {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operand_a(&self) -> f64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> f64 {
        self.operand_b
    }

    pub fn result(&self) -> f64 {
        self.result
    }
}

/// Evaluate `operation(a, b)`.
pub fn evaluate(operation: Operation, a: f64, b: f64) -> Result<Evaluation, CalcError> {
    if !a.is_finite() {
        return Err(CalcError::InvalidOperand(
            "operand_a: must be a finite number".to_string(),
        ));
    }
    if !b.is_finite() {
        return Err(CalcError::InvalidOperand(
            "operand_b: must be a finite number".to_string(),
        ));
    }

    let result = operation.apply(a, b)?;
    tracing::debug!(%operation, a, b, result, "Evaluated operation");

    Ok(Evaluation {
        operation,
        operand_a: a,
        operand_b: b,
        result,
    })
}

/// Evaluate a request whose operands have not been type-checked yet.
///
/// Operands are validated before the operation tag, so `{"operation": "pow",
/// "operand_a": "x"}` reports the operand.
pub fn evaluate_raw(
    tag: &str,
    (name_a, a): (&str, &Value),
    (name_b, b): (&str, &Value),
) -> Result<Evaluation, CalcError> {
    let a = operand(name_a, a)?;
    let b = operand(name_b, b)?;
    evaluate(tag.parse()?, a, b)
}

/// Coerce a JSON value into an operand.
///
/// Integers and floats are accepted; strings, booleans, null and
/// containers are not.
pub fn operand(name: &str, value: &Value) -> Result<f64, CalcError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CalcError::InvalidOperand(format!("{name}: must be a finite number"))),
        Value::Null => Err(CalcError::InvalidOperand(format!("{name}: field required"))),
        _ => Err(CalcError::InvalidOperand(format!("{name}: must be a number"))),
    }
}

/// Evaluation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Cannot divide by zero!")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFiniteResult,
}
