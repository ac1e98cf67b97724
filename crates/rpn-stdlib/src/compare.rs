//! Comparison operations.
//!
//! Results are Integer 1 or 0 and dimensionless; both operands must carry
//! the same unit. Ordered comparisons accept real scalars and times only.

use std::cmp::Ordering;

use rpn_core::{arith, CalcError, CalcResult, KindSet};
use rpn_vm::{NumericEnv, Operand, TypeRules, NUMERIC_PROMOTIONS};

use crate::common::{plain, truth};

const ORDER_RULES: TypeRules = TypeRules {
    identity: &[
        &[KindSet::INTEGER, KindSet::INTEGER],
        &[KindSet::RATIONAL, KindSet::RATIONAL],
        &[KindSet::FLOAT, KindSet::FLOAT],
        &[KindSet::TIME, KindSet::TIME],
    ],
    limited: Some(KindSet::REAL),
    conversions: NUMERIC_PROMOTIONS,
    broadcast: true,
    symbolic: true,
};

const EQ_RULES: TypeRules = TypeRules {
    symbolic: true,
    ..TypeRules::any(2)
};

fn order(op: &str, a: &Operand, b: &Operand) -> CalcResult<Ordering> {
    a.unit.require_same(&b.unit)?;
    a.value.compare(&b.value).ok_or_else(|| {
        CalcError::mismatch(op, format!("{} and {} are not ordered", a.kind(), b.kind()))
    })
}

fn equal(env: &NumericEnv, a: &Operand, b: &Operand) -> CalcResult<bool> {
    a.unit.require_same(&b.unit)?;
    arith::equals(&a.value, &b.value, env.precision)
}

define_operations! {
    Eq ("==", 2 -> 1) [
        aliases: ["same"],
        brief: "Test equality; scalars compare after promotion",
        stack: "( a b -- flag )",
        example: "1 1. ==",
        see_also: ["!="],
    ] |calc| {
        calc.two_arg("==", &EQ_RULES, |env, a, b| plain(truth(equal(env, a, b)?)))
    }

    Ne ("!=", 2 -> 1) [
        aliases: ["≠"],
        brief: "Test inequality",
        stack: "( a b -- flag )",
        example: "1 2 !=",
        see_also: ["=="],
    ] |calc| {
        calc.two_arg("!=", &EQ_RULES, |env, a, b| plain(truth(!equal(env, a, b)?)))
    }

    Lt ("<", 2 -> 1) [
        brief: "Less than",
        stack: "( a b -- flag )",
        example: "1 2 <",
        see_also: ["<=", ">"],
    ] |calc| {
        calc.two_arg("<", &ORDER_RULES, |_, a, b| plain(truth(order("<", a, b)?.is_lt())))
    }

    Le ("<=", 2 -> 1) [
        aliases: ["≤"],
        brief: "Less than or equal",
        stack: "( a b -- flag )",
        example: "2 2 <=",
        see_also: ["<", ">="],
    ] |calc| {
        calc.two_arg("<=", &ORDER_RULES, |_, a, b| plain(truth(order("<=", a, b)?.is_le())))
    }

    Gt (">", 2 -> 1) [
        brief: "Greater than",
        stack: "( a b -- flag )",
        example: "2 1 >",
        see_also: [">=", "<"],
    ] |calc| {
        calc.two_arg(">", &ORDER_RULES, |_, a, b| plain(truth(order(">", a, b)?.is_gt())))
    }

    Ge (">=", 2 -> 1) [
        aliases: ["≥"],
        brief: "Greater than or equal",
        stack: "( a b -- flag )",
        example: "2 2 >=",
        see_also: [">", "<="],
    ] |calc| {
        calc.two_arg(">=", &ORDER_RULES, |_, a, b| plain(truth(order(">=", a, b)?.is_ge())))
    }
}
