//! Arithmetic operations.
//!
//! Scalars of different kinds are brought to their common kind by the
//! dispatch rules before the transform runs. Lists broadcast elementwise and
//! symbolic operands build deferred expressions.
//!
//! Units: `+ - mod min max` need equal units, `* /` combine them, `^` raises
//! them to an integer power.

use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use rpn_core::{arith, CalcError, CalcResult, KindSet, Unit, Value};
use rpn_vm::{NumericEnv, Operand, TypeRules, NUMERIC_PROMOTIONS};

use crate::common;

pub(crate) const ADD_RULES: TypeRules = TypeRules {
    identity: &[
        &[KindSet::INTEGER, KindSet::INTEGER],
        &[KindSet::RATIONAL, KindSet::RATIONAL],
        &[KindSet::FLOAT, KindSet::FLOAT],
        &[KindSet::COMPLEX, KindSet::COMPLEX],
        &[KindSet::MATRIX, KindSet::MATRIX],
        &[KindSet::TIME, KindSet::TIME],
    ],
    limited: None,
    conversions: NUMERIC_PROMOTIONS,
    broadcast: true,
    symbolic: true,
};

pub(crate) const MUL_RULES: TypeRules = TypeRules {
    identity: &[
        &[KindSet::INTEGER, KindSet::INTEGER],
        &[KindSet::RATIONAL, KindSet::RATIONAL],
        &[KindSet::FLOAT, KindSet::FLOAT],
        &[KindSet::COMPLEX, KindSet::COMPLEX],
        &[KindSet::MATRIX, KindSet::MATRIX],
        &[KindSet::MATRIX, KindSet::SCALAR],
        &[KindSet::SCALAR, KindSet::MATRIX],
        &[KindSet::TIME, KindSet::REAL],
        &[KindSet::REAL, KindSet::TIME],
    ],
    limited: None,
    conversions: NUMERIC_PROMOTIONS,
    broadcast: true,
    symbolic: true,
};

const DIV_RULES: TypeRules = TypeRules {
    identity: &[
        &[KindSet::INTEGER, KindSet::INTEGER],
        &[KindSet::RATIONAL, KindSet::RATIONAL],
        &[KindSet::FLOAT, KindSet::FLOAT],
        &[KindSet::COMPLEX, KindSet::COMPLEX],
        &[KindSet::MATRIX, KindSet::MATRIX],
        &[KindSet::MATRIX, KindSet::SCALAR],
        &[KindSet::TIME, KindSet::TIME],
        &[KindSet::TIME, KindSet::REAL],
    ],
    limited: None,
    conversions: NUMERIC_PROMOTIONS,
    broadcast: true,
    symbolic: true,
};

const NEG_RULES: TypeRules = TypeRules {
    identity: &[&[KindSet::SCALAR], &[KindSet::MATRIX], &[KindSet::TIME]],
    ..TypeRules::UNARY_SCALAR
};

const MATRIX_OR_SCALAR: TypeRules = TypeRules {
    identity: &[&[KindSet::SCALAR], &[KindSet::MATRIX]],
    ..TypeRules::UNARY_SCALAR
};

const POW_RULES: TypeRules = TypeRules {
    identity: &[
        &[KindSet::SCALAR, KindSet::SCALAR],
        &[KindSet::MATRIX, KindSet::INTEGER],
    ],
    limited: None,
    conversions: &[],
    broadcast: true,
    symbolic: true,
};

fn real_factor(op: &str, value: &Value) -> CalcResult<BigRational> {
    value
        .to_rational()
        .ok_or_else(|| CalcError::mismatch(op, value.kind().name()))
}

pub(crate) fn add(env: &NumericEnv, a: &Operand, b: &Operand) -> CalcResult<Operand> {
    let unit = a.unit.require_same(&b.unit)?;
    let value = match (&a.value, &b.value) {
        (Value::Matrix(x), Value::Matrix(y)) => Value::Matrix(x.add(y, env.precision)?),
        (Value::Time(x), Value::Time(y)) => Value::Time(x.add(y)?),
        (x, y) => arith::add(x, y, env.precision)?,
    };
    Ok(Operand::new(value, unit))
}

fn sub(env: &NumericEnv, a: &Operand, b: &Operand) -> CalcResult<Operand> {
    let unit = a.unit.require_same(&b.unit)?;
    let value = match (&a.value, &b.value) {
        (Value::Matrix(x), Value::Matrix(y)) => Value::Matrix(x.sub(y, env.precision)?),
        (Value::Time(x), Value::Time(y)) => Value::Time(x.sub(y)?),
        (x, y) => arith::sub(x, y, env.precision)?,
    };
    Ok(Operand::new(value, unit))
}

pub(crate) fn mul(env: &NumericEnv, a: &Operand, b: &Operand) -> CalcResult<Operand> {
    let unit = a.unit.mul(&b.unit);
    let value = match (&a.value, &b.value) {
        (Value::Matrix(x), Value::Matrix(y)) => Value::Matrix(x.mul(y, env.precision)?),
        (Value::Matrix(m), s) | (s, Value::Matrix(m)) => Value::Matrix(m.scale(s, env.precision)?),
        (Value::Time(t), s) | (s, Value::Time(t)) => Value::Time(t.scale(&real_factor("*", s)?)?),
        (x, y) => arith::mul(x, y, env.precision)?,
    };
    Ok(Operand::new(value, unit))
}

fn div(env: &NumericEnv, a: &Operand, b: &Operand) -> CalcResult<Operand> {
    let unit = a.unit.div(&b.unit);
    let value = match (&a.value, &b.value) {
        (Value::Matrix(x), Value::Matrix(y)) => {
            Value::Matrix(x.mul(&y.inverse(env.precision)?, env.precision)?)
        }
        (Value::Matrix(m), s) => Value::Matrix(m.div_scalar(s, env.precision)?),
        (Value::Time(x), Value::Time(y)) => Value::Rational(x.ratio(y)?),
        (Value::Time(t), s) => {
            let factor = real_factor("/", s)?;
            if factor.is_zero() {
                return Err(CalcError::DivisionByZero);
            }
            Value::Time(t.scale(&factor.recip())?)
        }
        (x, y) => arith::div(x, y, env.precision)?,
    };
    Ok(Operand::new(value, unit))
}

fn neg(_env: &NumericEnv, a: &Operand) -> CalcResult<Operand> {
    let value = match &a.value {
        Value::Matrix(m) => Value::Matrix(m.neg()?),
        Value::Time(t) => Value::Time(t.neg()?),
        x => arith::neg(x)?,
    };
    Ok(Operand::new(value, a.unit.clone()))
}

fn inv(env: &NumericEnv, a: &Operand) -> CalcResult<Operand> {
    let value = match &a.value {
        Value::Matrix(m) => Value::Matrix(m.inverse(env.precision)?),
        x => arith::inv(x, env.precision)?,
    };
    Ok(Operand::new(value, a.unit.inv()))
}

fn pow(env: &NumericEnv, a: &Operand, b: &Operand) -> CalcResult<Operand> {
    b.unit.require_none("^")?;
    let unit = if a.unit.is_dimensionless() {
        Unit::none()
    } else {
        let n = b
            .value
            .as_integer()
            .and_then(|n| n.to_i32())
            .ok_or_else(|| CalcError::UnitsProhibited { op: "^".to_string() })?;
        a.unit.pow(n)
    };
    let value = match (&a.value, &b.value) {
        (Value::Matrix(m), Value::Integer(n)) => Value::Matrix(m.pow(n, env.precision)?),
        (x, y) => arith::pow(x, y, env.precision)?,
    };
    Ok(Operand::new(value, unit))
}

fn pick_extreme(a: &Operand, b: &Operand, want: std::cmp::Ordering) -> CalcResult<Operand> {
    let unit = a.unit.require_same(&b.unit)?;
    let ord = a
        .value
        .compare(&b.value)
        .ok_or_else(|| CalcError::domain("values are not ordered"))?;
    let value = if ord == want || ord.is_eq() {
        a.value.clone()
    } else {
        b.value.clone()
    };
    Ok(Operand::new(value, unit))
}

define_operations! {
    Add ("+", 2 -> 1) [
        brief: "Add two values",
        stack: "( a b -- a+b )",
        example: "1 2 +",
        see_also: ["-", "sum"],
    ] |calc| {
        calc.two_arg("+", &ADD_RULES, add)
    }

    Sub ("-", 2 -> 1) [
        brief: "Subtract top from second",
        stack: "( a b -- a-b )",
        example: "5 3 -",
        see_also: ["+", "neg"],
    ] |calc| {
        calc.two_arg("-", &ADD_RULES, sub)
    }

    Mul ("*", 2 -> 1) [
        brief: "Multiply two values",
        stack: "( a b -- a*b )",
        example: "3 4 *",
        see_also: ["/", "product"],
    ] |calc| {
        calc.two_arg("*", &MUL_RULES, mul)
    }

    Div ("/", 2 -> 1) [
        brief: "Divide second by top, exactly when both are exact",
        stack: "( a b -- a/b )",
        example: "1 3 /",
        see_also: ["*", "idiv", "mod"],
    ] |calc| {
        calc.two_arg("/", &DIV_RULES, div)
    }

    Neg ("neg", 1 -> 1) [
        aliases: ["chs"],
        brief: "Negate",
        stack: "( a -- -a )",
        example: "5 neg",
        see_also: ["abs"],
    ] |calc| {
        calc.one_arg("neg", &NEG_RULES, neg)
    }

    Inv ("inv", 1 -> 1) [
        brief: "Reciprocal, or matrix inverse",
        stack: "( a -- 1/a )",
        example: "4 inv",
        see_also: ["/"],
    ] |calc| {
        calc.one_arg("inv", &MATRIX_OR_SCALAR, inv)
    }

    Abs ("abs", 1 -> 1) [
        brief: "Absolute value, or magnitude of a complex number",
        stack: "( a -- |a| )",
        example: "-5 abs",
        see_also: ["neg", "arg"],
    ] |calc| {
        calc.one_arg("abs", &TypeRules::UNARY_SCALAR, |_, a| {
            Ok(Operand::new(arith::abs(&a.value)?, a.unit.clone()))
        })
    }

    Sq ("sq", 1 -> 1) [
        brief: "Square",
        stack: "( a -- a*a )",
        example: "7 sq",
        see_also: ["sqrt", "^"],
    ] |calc| {
        calc.one_arg("sq", &MATRIX_OR_SCALAR, |env, a| mul(env, a, a))
    }

    Sqrt ("sqrt", 1 -> 1) [
        brief: "Square root, exact for perfect squares",
        stack: "( a -- √a )",
        example: "16 sqrt",
        see_also: ["sq", "^"],
    ] |calc| {
        calc.one_arg("sqrt", &TypeRules::UNARY_SCALAR, |env, a| {
            let unit = a
                .unit
                .root(2)
                .ok_or_else(|| CalcError::UnitsProhibited { op: "sqrt".to_string() })?;
            Ok(Operand::new(arith::sqrt(&a.value, env.precision)?, unit))
        })
    }

    Pow ("^", 2 -> 1) [
        aliases: ["pow"],
        brief: "Raise to a power, exactly for integer exponents",
        stack: "( a b -- a^b )",
        example: "2 10 ^",
        see_also: ["sq", "modpow"],
    ] |calc| {
        calc.two_arg("^", &POW_RULES, pow)
    }

    Mod ("mod", 2 -> 1) [
        brief: "Floored modulo; the result has the sign of the divisor",
        stack: "( a b -- a mod b )",
        example: "-7 3 mod",
        see_also: ["idiv"],
    ] |calc| {
        calc.two_arg("mod", &TypeRules::BINARY_REAL, |env, a, b| {
            let unit = a.unit.require_same(&b.unit)?;
            Ok(Operand::new(arith::modulo(&a.value, &b.value, env.precision)?, unit))
        })
    }

    IDiv ("idiv", 2 -> 1) [
        brief: "Floored integer division",
        stack: "( a b -- floor(a/b) )",
        example: "7 2 idiv",
        see_also: ["mod", "/"],
    ] |calc| {
        calc.two_arg("idiv", &TypeRules::BINARY_INTEGER, |_, a, b| {
            let q = arith::idiv(common::integer("idiv", a)?, common::integer("idiv", b)?)?;
            Ok(Operand::new(Value::Integer(q), a.unit.div(&b.unit)))
        })
    }

    Min ("min", 2 -> 1) [
        brief: "Smaller of two reals",
        stack: "( a b -- min )",
        example: "3 5 min",
        see_also: ["max"],
    ] |calc| {
        calc.two_arg("min", &TypeRules::BINARY_REAL, |_, a, b| {
            pick_extreme(a, b, std::cmp::Ordering::Less)
        })
    }

    Max ("max", 2 -> 1) [
        brief: "Larger of two reals",
        stack: "( a b -- max )",
        example: "3 5 max",
        see_also: ["min"],
    ] |calc| {
        calc.two_arg("max", &TypeRules::BINARY_REAL, |_, a, b| {
            pick_extreme(a, b, std::cmp::Ordering::Greater)
        })
    }
}

#[cfg(test)]
mod tests {
    use rpn_core::{ErrorKind, Kind, List};

    use crate::testing::{eval, int};

    use super::*;

    fn rat(n: i64, d: i64) -> Value {
        Value::rational(n, d).unwrap()
    }

    #[test]
    fn exact_division() {
        assert_eq!(eval(vec![int(6), int(3)], &["/"]).unwrap(), vec![int(2)]);
        assert_eq!(eval(vec![int(1), int(3)], &["/"]).unwrap(), vec![rat(1, 3)]);
    }

    #[test]
    fn mixed_kinds_widen() {
        let out = eval(vec![rat(1, 2), int(1)], &["+"]).unwrap();
        assert_eq!(out, vec![rat(3, 2)]);
        let out = eval(vec![Value::float("0.5", 32).unwrap(), int(1)], &["+"]).unwrap();
        assert_eq!(out[0].kind(), Kind::Float);
    }

    #[test]
    fn rationals_collapse_to_integers() {
        let out = eval(vec![rat(1, 2), rat(1, 2)], &["+"]).unwrap();
        assert_eq!(out, vec![int(1)]);
    }

    #[test]
    fn divide_by_zero_is_a_domain_error() {
        let err = eval(vec![int(1), int(0)], &["/"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn negative_integer_power_inverts() {
        assert_eq!(eval(vec![int(2), int(-2)], &["^"]).unwrap(), vec![rat(1, 4)]);
        assert_eq!(eval(vec![int(3), int(4)], &["^"]).unwrap(), vec![int(81)]);
    }

    #[test]
    fn sqrt_of_negative_is_complex() {
        let out = eval(vec![int(-4)], &["sqrt"]).unwrap();
        assert_eq!(out[0].kind(), Kind::Complex);
        assert_eq!(eval(vec![int(49)], &["sqrt"]).unwrap(), vec![int(7)]);
    }

    #[test]
    fn modulo_and_integer_division_floor() {
        assert_eq!(eval(vec![int(-7), int(3)], &["mod"]).unwrap(), vec![int(2)]);
        assert_eq!(eval(vec![int(-7), int(2)], &["idiv"]).unwrap(), vec![int(-4)]);
    }

    #[test]
    fn idiv_rejects_floats() {
        let err = eval(vec![Value::float("7", 32).unwrap(), int(2)], &["idiv"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn min_max() {
        assert_eq!(eval(vec![int(3), rat(7, 2)], &["max"]).unwrap(), vec![rat(7, 2)]);
        assert_eq!(eval(vec![int(3), rat(7, 2)], &["min"]).unwrap(), vec![int(3)]);
    }

    #[test]
    fn list_broadcast() {
        let list = Value::List(List::new(vec![int(1), int(2)], 32).unwrap());
        let out = eval(vec![list, int(2)], &["/"]).unwrap();
        let expected = Value::List(List::new(vec![rat(1, 2), int(1)], 32).unwrap());
        assert_eq!(out, vec![expected]);
    }

    #[test]
    fn symbolic_operands_build_expressions() {
        let out = eval(vec![Value::var("X"), int(2)], &["*", "neg"]).unwrap();
        assert_eq!(out[0].to_string(), "neg(X*2)");
    }
}
