//! Parts of complex numbers.
//!
//! Real arguments are treated as complex numbers with a zero imaginary part,
//! so RE and CONJ return them unchanged and IM returns 0.

use rpn_core::{CalcResult, Float, Value};
use rpn_vm::{NumericEnv, Operand, TypeRules};

use crate::common::plain;

/// Argument of a real number: 0, or a half turn for negatives.
fn real_arg(env: &NumericEnv, x: &Value) -> CalcResult<Value> {
    if !x.is_negative() {
        return Ok(Value::integer(0));
    }
    Ok(match env.angle.half_turn() {
        Some(half) => Value::integer(half),
        None => Value::Float(Float::pi(env.precision)?),
    })
}

define_operations! {
    Re ("re", 1 -> 1) [
        brief: "Real part",
        stack: "( z -- re )",
        example: "3 4 r->c re",
        see_also: ["im", "c->r"],
    ] |calc| {
        calc.one_arg("re", &TypeRules::UNARY_SCALAR, |_, z| {
            let value = match &z.value {
                Value::Complex(c) => Value::Float(c.re.clone()),
                other => other.clone(),
            };
            Ok(Operand::new(value, z.unit.clone()))
        })
    }

    Im ("im", 1 -> 1) [
        brief: "Imaginary part",
        stack: "( z -- im )",
        example: "3 4 r->c im",
        see_also: ["re", "c->r"],
    ] |calc| {
        calc.one_arg("im", &TypeRules::UNARY_SCALAR, |_, z| {
            let value = match &z.value {
                Value::Complex(c) => Value::Float(c.im.clone()),
                _ => Value::integer(0),
            };
            Ok(Operand::new(value, z.unit.clone()))
        })
    }

    Conj ("conj", 1 -> 1) [
        brief: "Complex conjugate",
        stack: "( z -- z̄ )",
        example: "3 4 r->c conj",
        see_also: ["neg", "arg"],
    ] |calc| {
        calc.one_arg("conj", &TypeRules::UNARY_SCALAR, |_, z| {
            let value = match &z.value {
                Value::Complex(c) => Value::Complex(c.conj()),
                other => other.clone(),
            };
            Ok(Operand::new(value, z.unit.clone()))
        })
    }

    Arg ("arg", 1 -> 1) [
        brief: "Argument (phase angle) in the current angle mode",
        stack: "( z -- θ )",
        example: "0 1 r->c arg",
        see_also: ["abs", "deg", "rad"],
    ] |calc| {
        calc.one_arg("arg", &TypeRules::UNARY_SCALAR, |env, z| match &z.value {
            Value::Complex(c) => plain(env.angle.from_radians(&c.arg()?)?),
            other => plain(real_arg(env, other)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use rpn_core::Kind;
    use rpn_vm::Config;

    use crate::testing::{calc_with, eval, int, run, values};

    fn float(text: &str) -> rpn_core::Value {
        rpn_core::Value::float(text, 32).unwrap()
    }

    #[test]
    fn parts_of_complex() {
        assert_eq!(eval(vec![int(3), int(4)], &["r->c", "re"]).unwrap(), vec![float("3")]);
        assert_eq!(eval(vec![int(3), int(4)], &["r->c", "im"]).unwrap(), vec![float("4")]);
        let out = eval(vec![int(3), int(4)], &["r->c", "conj", "c->r"]).unwrap();
        assert_eq!(out, vec![float("3"), float("-4")]);
    }

    #[test]
    fn parts_of_reals() {
        assert_eq!(eval(vec![int(5)], &["re"]).unwrap(), vec![int(5)]);
        assert_eq!(eval(vec![int(5)], &["im"]).unwrap(), vec![int(0)]);
        assert_eq!(eval(vec![int(5)], &["arg"]).unwrap(), vec![int(0)]);
    }

    #[test]
    fn argument_follows_angle_mode() {
        let mut c = calc_with(Config {
            angle_mode: rpn_core::AngleMode::Degrees,
            ..Config::default()
        });
        run(&mut c, vec![int(-2)], &["arg"]).unwrap();
        assert_eq!(values(&c), vec![int(180)]);

        let out = eval(vec![int(-2)], &["arg"]).unwrap();
        assert_eq!(out[0].kind(), Kind::Float);
    }

    #[test]
    fn magnitude_of_complex_is_float() {
        let out = eval(vec![int(3), int(4)], &["r->c", "abs"]).unwrap();
        assert_eq!(out, vec![float("5")]);
    }
}
