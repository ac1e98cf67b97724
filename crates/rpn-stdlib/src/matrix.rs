//! Matrix operations.
//!
//! Sums, products, inverse and integer powers of matrices go through the
//! arithmetic operations; this module adds the determinant, transpose and
//! identity matrix.

use rpn_core::{CalcError, KindSet, Matrix, Value};
use rpn_vm::{Operand, TypeRules};

use crate::common::{no_units, plain};

/// Largest identity matrix IDN builds.
pub const MAX_DIMENSION: usize = 1024;

const MATRIX: TypeRules = TypeRules {
    identity: &[&[KindSet::MATRIX]],
    ..TypeRules::UNARY_SCALAR.strict()
};

fn matrix<'a>(op: &str, operand: &'a Operand) -> Result<&'a Matrix, CalcError> {
    match &operand.value {
        Value::Matrix(m) => Ok(m),
        other => Err(CalcError::mismatch(op, other.kind().name())),
    }
}

define_operations! {
    Det ("det", 1 -> 1) [
        brief: "Determinant of a square matrix",
        stack: "( [[a b] [c d]] -- ad-bc )",
        example: "[[1 2] [3 4]] det",
        see_also: ["inv", "trn"],
    ] |calc| {
        calc.one_arg("det", &MATRIX, |env, m| {
            no_units("det", &[m])?;
            plain(matrix("det", m)?.det(env.precision)?)
        })
    }

    Transpose ("trn", 1 -> 1) [
        aliases: ["transpose"],
        brief: "Transpose",
        stack: "( m -- mᵀ )",
        example: "[[1 2] [3 4]] trn",
        see_also: ["det"],
    ] |calc| {
        calc.one_arg("trn", &MATRIX, |_, m| {
            Ok(Operand::new(Value::Matrix(matrix("trn", m)?.transpose()), m.unit.clone()))
        })
    }

    Identity ("idn", 1 -> 1) [
        brief: "n×n identity matrix",
        stack: "( n -- I )",
        example: "3 idn",
        see_also: ["det"],
    ] |calc| {
        calc.one_arg("idn", &TypeRules::UNARY_INTEGER.strict(), |_, n| {
            no_units("idn", &[n])?;
            let size = n.value.to_index("dimension")?;
            if size == 0 || size > MAX_DIMENSION {
                return Err(CalcError::invalid(format!(
                    "idn: dimension {} outside 1..={}",
                    size, MAX_DIMENSION
                )));
            }
            plain(Value::Matrix(Matrix::identity(size)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use rpn_core::{ErrorKind, Matrix, Unit, Value};
    use rpn_vm::Instruction;

    use crate::testing::{calc, eval, int, values};

    fn m(rows: Vec<Vec<i64>>) -> Value {
        Value::Matrix(
            Matrix::from_rows(
                rows.into_iter()
                    .map(|r| r.into_iter().map(Value::integer).collect())
                    .collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn determinant() {
        assert_eq!(eval(vec![m(vec![vec![1, 2], vec![3, 4]])], &["det"]).unwrap(), vec![int(-2)]);
    }

    #[test]
    fn determinant_rejects_units() {
        let mut c = calc();
        c.run_one(&Instruction::Number {
            value: m(vec![vec![1, 0], vec![0, 1]]),
            unit: Unit::base("m"),
        })
        .unwrap();
        let err = c.run_one(&Instruction::keyword("det")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Units);
        assert_eq!(c.stack().len(), 1);
    }

    #[test]
    fn transpose_and_identity() {
        let out = eval(vec![m(vec![vec![1, 2], vec![3, 4]])], &["trn"]).unwrap();
        assert_eq!(out, vec![m(vec![vec![1, 3], vec![2, 4]])]);
        assert_eq!(eval(vec![int(2)], &["idn"]).unwrap(), vec![m(vec![vec![1, 0], vec![0, 1]])]);
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let a = m(vec![vec![2, 1], vec![1, 1]]);
        let mut c = calc();
        crate::testing::run(&mut c, vec![a.clone(), a], &["inv", "*"]).unwrap();
        assert_eq!(values(&c), vec![m(vec![vec![1, 0], vec![0, 1]])]);
    }

    #[test]
    fn scalar_times_matrix() {
        let out = eval(vec![int(2), m(vec![vec![1, 2]])], &["*"]).unwrap();
        assert_eq!(out, vec![m(vec![vec![2, 4]])]);
    }

    #[test]
    fn zero_dimension_is_invalid() {
        let err = eval(vec![int(0)], &["idn"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
