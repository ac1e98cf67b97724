//! rpn Standard Library
//!
//! This crate provides the operation catalog of the calculator:
//! - Arithmetic (+, -, *, /, ^, mod, ...) with list broadcast and units
//! - Comparisons
//! - Algebra building blocks (gcd, modinv, modpow, factorials)
//! - Bitwise operations on fixed-width words
//! - Conversions, complex parts, matrices, list aggregates
//! - Stack manipulation, display modes and flags, variables
//! - Symbolic evaluation, transcendental functions and time

#[macro_use]
mod macros;

mod common;

pub mod algebra;
pub mod arith;
pub mod binary_ops;
pub mod compare;
pub mod complex;
pub mod convert;
pub mod flow;
pub mod lists;
pub mod matrix;
pub mod modes;
pub mod stack;
pub mod time;
pub mod transcendentals;
pub mod variables;

use rpn_vm::OperationRegistry;

/// Register every standard operation.
pub fn register_standard_operations(registry: &mut OperationRegistry) {
    arith::register(registry);
    compare::register(registry);
    algebra::register(registry);
    binary_ops::register(registry);
    convert::register(registry);
    complex::register(registry);
    matrix::register(registry);
    lists::register(registry);
    stack::register(registry);
    modes::register(registry);
    variables::register(registry);
    flow::register(registry);
    transcendentals::register(registry);
    time::register(registry);
}

/// A registry holding the standard operations.
pub fn standard_registry() -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    register_standard_operations(&mut registry);
    log::debug!("registered {} standard operations", registry.len());
    registry
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use rpn_core::{CalcResult, Unit, Value};
    use rpn_vm::{Calculator, Config, Instruction};

    pub fn calc() -> Calculator {
        calc_with(Config::default())
    }

    pub fn calc_with(config: Config) -> Calculator {
        Calculator::new(config, Arc::new(super::standard_registry()))
    }

    /// Push the values, then run the named operations.
    pub fn run(calc: &mut Calculator, values: Vec<Value>, ops: &[&str]) -> CalcResult<()> {
        for value in values {
            calc.run_one(&Instruction::Number {
                value,
                unit: Unit::none(),
            })?;
        }
        for op in ops {
            calc.run_one(&Instruction::keyword(op))?;
        }
        Ok(())
    }

    pub fn values(calc: &Calculator) -> Vec<Value> {
        calc.stack()
            .as_slice()
            .iter()
            .map(|e| e.value().clone())
            .collect()
    }

    pub fn int(n: i64) -> Value {
        Value::integer(n)
    }

    /// Run `ops` on a fresh calculator holding `values` and return the stack.
    pub fn eval(values: Vec<Value>, ops: &[&str]) -> CalcResult<Vec<Value>> {
        let mut c = calc();
        run(&mut c, values, ops)?;
        Ok(super::testing::values(&c))
    }
}
