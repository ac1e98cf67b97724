//! The instruction stream consumed by the calculator.
//!
//! Instructions are produced by a parser that lives outside this crate;
//! the calculator only executes them.

use rpn_core::{Symbolic, Time, Unit, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Noop,
    /// Pushed as Integer 1 or 0.
    Bool(bool),
    /// A numeric literal with an optional unit.
    Number { value: Value, unit: Unit },
    /// `{ ... }` literal; elements are widened to a common kind on push.
    List(Vec<Value>),
    /// `[[ ... ] [ ... ]]` literal given as rows.
    Matrix(Vec<Vec<Value>>),
    Time(Time),
    /// A reference to a named function, pushed without being executed.
    FunctionRef(String),
    Symbolic(Symbolic),
    /// An operation or variable name.
    Keyword(String),
    /// A nested program, run in its own variable scope.
    Program(Vec<Instruction>),
}

impl Instruction {
    /// A dimensionless numeric literal.
    pub fn number(value: impl Into<Value>) -> Self {
        Instruction::Number {
            value: value.into(),
            unit: Unit::none(),
        }
    }

    pub fn with_unit(value: impl Into<Value>, unit: Unit) -> Self {
        Instruction::Number {
            value: value.into(),
            unit,
        }
    }

    pub fn keyword(name: &str) -> Self {
        Instruction::Keyword(name.to_string())
    }
}
