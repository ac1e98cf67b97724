//! Lists and variable-arity aggregates.
//!
//! SUM, PRODUCT and ->LIST take a count on top of the stack followed by that
//! many entries. The count is checked against `MAX_AGGREGATE` before any
//! entry is read.

use rpn_core::{CalcError, CalcResult, KindSet, List, Unit, Value};
use rpn_vm::{Operand, TypeRules};

use crate::arith::{self, ADD_RULES, MUL_RULES};
use crate::common::plain;

const LIST: TypeRules = TypeRules {
    identity: &[&[KindSet::LIST]],
    ..TypeRules::UNARY_SCALAR.strict()
};

fn size(value: &Value, digits: u32) -> CalcResult<Value> {
    Ok(match value {
        Value::List(list) => Value::integer(list.len() as i64),
        Value::Matrix(m) => {
            let dims = vec![Value::integer(m.rows() as i64), Value::integer(m.cols() as i64)];
            Value::List(List::new(dims, digits)?)
        }
        _ => Value::integer(1),
    })
}

define_operations! {
    Sum ("sum", -1 -> 1) [
        aliases: ["Σ"],
        brief: "Sum of n entries (n on top)",
        stack: "( x1 ... xn n -- Σ )",
        example: "1 2 3 3 sum",
        see_also: ["product", "+"],
    ] |calc| {
        calc.aggregate("sum", &ADD_RULES, Value::integer(0), |env, ops| {
            arith::add(env, &ops[0], &ops[1])
        })
    }

    Product ("product", -1 -> 1) [
        aliases: ["Π"],
        brief: "Product of n entries (n on top)",
        stack: "( x1 ... xn n -- Π )",
        example: "1 2 3 3 product",
        see_also: ["sum", "*"],
    ] |calc| {
        calc.aggregate("product", &MUL_RULES, Value::integer(1), |env, ops| {
            arith::mul(env, &ops[0], &ops[1])
        })
    }

    ToList ("->list", -1 -> 1) [
        aliases: ["→list"],
        brief: "Collect n entries into a list (n on top)",
        stack: "( x1 ... xn n -- { x1 ... xn } )",
        example: "1 2 3 3 ->list",
        see_also: ["list->", "size"],
    ] |calc| {
        let count = calc.peek_count("->list")?;
        let mut operands = calc.peek_operands("->list", count + 1)?;
        operands.pop();
        let unit = operands.first().map_or_else(Unit::none, |o| o.unit.clone());
        for operand in &operands {
            operand.unit.require_same(&unit)?;
        }
        let items = operands.into_iter().map(|o| o.value).collect();
        let list = List::new(items, calc.config().precision)?;
        calc.commit(count + 1, [Operand::new(Value::List(list), unit)])
    }

    FromList ("list->", 1 -> -1) [
        aliases: ["list→", "obj->"],
        brief: "Explode a list onto the stack followed by its size",
        stack: "( { x1 ... xn } -- x1 ... xn n )",
        example: "{ 1 2 3 } list->",
        see_also: ["->list"],
    ] |calc| {
        calc.dispatch_multi("list->", 1, &LIST, |_, ops| {
            let Value::List(list) = &ops[0].value else {
                return Err(CalcError::mismatch("list->", ops[0].kind().name()));
            };
            let unit = &ops[0].unit;
            let mut out: Vec<Operand> = list
                .items()
                .iter()
                .map(|v| Operand::new(v.clone(), unit.clone()))
                .collect();
            out.push(Operand::plain(list.len() as i64));
            Ok(out)
        })
    }

    Size ("size", 1 -> 1) [
        brief: "Number of list elements, or {rows cols} of a matrix",
        stack: "( obj -- n )",
        example: "{ 1 2 3 } size",
        see_also: ["->list"],
    ] |calc| {
        calc.one_arg("size", &TypeRules::any(1), |env, x| plain(size(&x.value, env.precision)?))
    }
}
