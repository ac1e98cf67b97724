//! Helpers shared by the operation modules.

use num_bigint::BigInt;
use rpn_core::{CalcError, CalcResult, Value};
use rpn_vm::Operand;

/// Integer 1 or 0.
pub fn truth(b: bool) -> Value {
    Value::integer(b as i64)
}

/// The integer inside an operand already resolved to Integer.
pub fn integer<'a>(op: &str, operand: &'a Operand) -> CalcResult<&'a BigInt> {
    operand
        .value
        .as_integer()
        .ok_or_else(|| CalcError::mismatch(op, operand.kind().name()))
}

/// Fail unless every operand is dimensionless.
pub fn no_units(op: &str, operands: &[&Operand]) -> CalcResult<()> {
    operands.iter().try_for_each(|o| o.unit.require_none(op))
}

/// A dimensionless result.
pub fn plain(value: impl Into<Value>) -> CalcResult<Operand> {
    Ok(Operand::plain(value))
}
