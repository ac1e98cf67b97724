//! Transcendental functions.
//!
//! Exact arguments are converted to Float at the current precision. Real
//! angles follow the angle mode; complex arguments are always in radians.

use rpn_core::{CalcError, CalcResult, Complex, Float, Kind, KindSet, Value};
use rpn_vm::{Conversion, NumericEnv, Operand, TypeRules};

use crate::common::{no_units, plain};

const TRANSCENDENTAL: TypeRules = TypeRules {
    identity: &[&[KindSet::FLOAT], &[KindSet::COMPLEX]],
    limited: None,
    conversions: &[Conversion {
        from: KindSet::REAL,
        to: Kind::Float,
    }],
    broadcast: true,
    symbolic: true,
};

/// Apply `real` to Floats and `complex` to Complex values.
fn unary(
    op: &str,
    x: &Operand,
    real: impl FnOnce(&Float) -> CalcResult<Value>,
    complex: impl FnOnce(&Complex) -> CalcResult<Complex>,
) -> CalcResult<Operand> {
    no_units(op, &[x])?;
    match &x.value {
        Value::Float(f) => plain(real(f)?),
        Value::Complex(z) => plain(complex(z)?),
        other => Err(CalcError::mismatch(op, other.kind().name())),
    }
}

fn ln(_: &NumericEnv, x: &Operand) -> CalcResult<Operand> {
    unary(
        "ln",
        x,
        |f| {
            if f.is_zero() {
                return Err(CalcError::domain("ln(0)"));
            }
            if f.is_negative() {
                return Ok(Complex::from_real(f.clone()).ln()?.into());
            }
            Ok(f.ln()?.into())
        },
        |z| {
            if z.is_zero() {
                return Err(CalcError::domain("ln(0)"));
            }
            z.ln()
        },
    )
}

define_operations! {
    Exp ("exp", 1 -> 1) [
        brief: "Natural exponential",
        stack: "( x -- eˣ )",
        example: "1 exp",
        see_also: ["ln"],
    ] |calc| {
        calc.one_arg("exp", &TRANSCENDENTAL, |_, x| {
            unary("exp", x, |f| Ok(f.exp()?.into()), Complex::exp)
        })
    }

    Ln ("ln", 1 -> 1) [
        brief: "Natural logarithm; negative reals give complex results",
        stack: "( x -- ln x )",
        example: "10 ln",
        see_also: ["exp"],
    ] |calc| {
        calc.one_arg("ln", &TRANSCENDENTAL, ln)
    }

    Sin ("sin", 1 -> 1) [
        brief: "Sine",
        stack: "( θ -- sin θ )",
        example: "deg 30 sin",
        see_also: ["cos", "tan"],
    ] |calc| {
        calc.one_arg("sin", &TRANSCENDENTAL, |env, x| {
            unary("sin", x, |f| Ok(env.angle.to_radians(f)?.sin()?.into()), Complex::sin)
        })
    }

    Cos ("cos", 1 -> 1) [
        brief: "Cosine",
        stack: "( θ -- cos θ )",
        example: "deg 60 cos",
        see_also: ["sin", "tan"],
    ] |calc| {
        calc.one_arg("cos", &TRANSCENDENTAL, |env, x| {
            unary("cos", x, |f| Ok(env.angle.to_radians(f)?.cos()?.into()), Complex::cos)
        })
    }

    Tan ("tan", 1 -> 1) [
        brief: "Tangent",
        stack: "( θ -- tan θ )",
        example: "deg 45 tan",
        see_also: ["sin", "cos", "atan"],
    ] |calc| {
        calc.one_arg("tan", &TRANSCENDENTAL, |env, x| {
            unary("tan", x, |f| Ok(env.angle.to_radians(f)?.tan()?.into()), Complex::tan)
        })
    }

    Atan ("atan", 1 -> 1) [
        brief: "Arc tangent in the current angle mode",
        stack: "( x -- atan x )",
        example: "1 atan",
        see_also: ["tan", "arg"],
    ] |calc| {
        calc.one_arg("atan", &TRANSCENDENTAL, |env, x| {
            unary("atan", x, |f| Ok(env.angle.from_radians(&f.atan()?)?.into()), Complex::atan)
        })
    }

    Pi ("pi", 0 -> 1) [
        aliases: ["π"],
        brief: "π at the current precision",
        stack: "( -- π )",
        example: "pi",
        see_also: ["deg", "rad"],
    ] |calc| {
        let pi = Float::pi(calc.config().precision)?;
        calc.commit(0, [Operand::plain(pi)])
    }
}

#[cfg(test)]
mod tests {
    use num_rational::BigRational;
    use num_traits::Signed;
    use rpn_core::{ErrorKind, Unit};
    use rpn_vm::Instruction;

    use crate::testing::{calc, eval, int, run, values};

    use super::*;

    fn close_to(value: &Value, expected: i64) -> bool {
        let r = value.to_rational().unwrap();
        let tolerance = BigRational::new(1.into(), 10i64.pow(15).into());
        (r - BigRational::from_integer(expected.into())).abs() < tolerance
    }

    #[test]
    fn exp_and_ln_are_inverse() {
        let out = eval(vec![int(3)], &["exp", "ln"]).unwrap();
        assert!(close_to(&out[0], 3));
        let out = eval(vec![int(0)], &["exp"]).unwrap();
        assert_eq!(out[0].kind(), Kind::Float);
        assert!(close_to(&out[0], 1));
    }

    #[test]
    fn ln_edge_cases() {
        let err = eval(vec![int(0)], &["ln"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        let out = eval(vec![int(-1)], &["ln"]).unwrap();
        assert_eq!(out[0].kind(), Kind::Complex);
    }

    #[test]
    fn sine_in_degrees() {
        let mut c = calc();
        run(&mut c, vec![int(90)], &["deg", "sin"]).unwrap();
        assert!(close_to(&values(&c)[0], 1));
    }

    #[test]
    fn atan_in_degrees() {
        let mut c = calc();
        run(&mut c, vec![int(1)], &["deg", "atan"]).unwrap();
        assert!(close_to(&values(&c)[0], 45));
    }

    #[test]
    fn pi_pushes_a_float() {
        let out = eval(vec![], &["pi"]).unwrap();
        assert_eq!(out[0].kind(), Kind::Float);
        assert!(out[0].to_string().starts_with("3.14159265"));
    }

    #[test]
    fn units_are_prohibited() {
        let mut c = calc();
        c.run_one(&Instruction::with_unit(int(1), Unit::base("m"))).unwrap();
        let err = c.run_one(&Instruction::keyword("sin")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Units);
    }

    #[test]
    fn symbolic_arguments_defer() {
        let out = eval(vec![Value::var("X")], &["sin"]).unwrap();
        assert_eq!(out[0].to_string(), "sin(X)");
    }
}
