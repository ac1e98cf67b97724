//! Conversions between numeric kinds and rounding.
//!
//! - ->Q, ->F, ->C - change kind
//! - R->C, C->R - build and split complex numbers
//! - IP, FP, FLOOR, CEIL, ROUND - integer and fractional parts
//!
//! Rounding an exact value gives an Integer; rounding a Float gives a Float
//! of the same precision.

use num_bigint::BigInt;
use num_rational::BigRational;
use rpn_core::{CalcError, CalcResult, Complex, Float, Kind, KindSet, Value};
use rpn_vm::{Conversion, NumericEnv, Operand, TypeRules};

const TO_RATIONAL: TypeRules = TypeRules {
    identity: &[&[KindSet::REAL]],
    limited: None,
    conversions: &[],
    broadcast: true,
    symbolic: true,
};

const TO_FLOAT: TypeRules = TypeRules {
    identity: &[&[KindSet::FLOAT]],
    limited: Some(KindSet::REAL),
    conversions: &[Conversion {
        from: KindSet::REAL,
        to: Kind::Float,
    }],
    broadcast: true,
    symbolic: true,
};

pub(crate) const TO_COMPLEX: TypeRules = TypeRules {
    identity: &[&[KindSet::COMPLEX]],
    limited: None,
    conversions: &[Conversion {
        from: KindSet::SCALAR,
        to: Kind::Complex,
    }],
    broadcast: true,
    symbolic: true,
};

const REAL_PAIR: TypeRules = TypeRules {
    identity: &[&[KindSet::FLOAT, KindSet::FLOAT]],
    limited: Some(KindSet::REAL),
    conversions: &[Conversion {
        from: KindSet::REAL,
        to: Kind::Float,
    }],
    broadcast: true,
    symbolic: false,
};

#[derive(Clone, Copy)]
enum Rounding {
    Trunc,
    Floor,
    Ceil,
    Nearest,
}

impl Rounding {
    fn apply(self, r: &BigRational) -> BigInt {
        let rounded = match self {
            Rounding::Trunc => r.trunc(),
            Rounding::Floor => r.floor(),
            Rounding::Ceil => r.ceil(),
            Rounding::Nearest => r.round(),
        };
        rounded.to_integer()
    }
}

fn float_rational(op: &str, f: &Float) -> CalcResult<BigRational> {
    f.to_rational()
        .ok_or_else(|| CalcError::domain(format!("{}: {} has no exact fraction in range", op, f)))
}

fn round_value(op: &str, value: &Value, mode: Rounding) -> CalcResult<Value> {
    match value {
        Value::Integer(_) => Ok(value.clone()),
        Value::Rational(r) => Ok(Value::Integer(mode.apply(r))),
        Value::Float(f) if f.is_integral() => Ok(value.clone()),
        Value::Float(f) => {
            let n = mode.apply(&float_rational(op, f)?);
            Ok(Value::Float(Float::from_bigint(&n, f.digits())?))
        }
        other => Err(CalcError::mismatch(op, other.kind().name())),
    }
}

fn fraction(value: &Value) -> CalcResult<Value> {
    match value {
        Value::Integer(_) => Ok(Value::integer(0)),
        Value::Rational(r) => Ok(Value::Rational(r.fract())),
        Value::Float(f) => {
            let whole = round_value("fp", value, Rounding::Trunc)?;
            match whole {
                Value::Float(w) => Ok(Value::Float(f.sub(&w)?)),
                _ => Err(CalcError::mismatch("fp", "float")),
            }
        }
        other => Err(CalcError::mismatch("fp", other.kind().name())),
    }
}

fn rounding(op: &'static str, mode: Rounding) -> impl Fn(&NumericEnv, &Operand) -> CalcResult<Operand> {
    move |_, x| Ok(Operand::new(round_value(op, &x.value, mode)?, x.unit.clone()))
}

define_operations! {
    ToRational ("->q", 1 -> 1) [
        aliases: ["→q"],
        brief: "Convert a real to an exact fraction",
        stack: "( x -- a/b )",
        example: "0.75 ->q",
        see_also: ["->f"],
    ] |calc| {
        calc.one_arg("->q", &TO_RATIONAL, |_, x| match &x.value {
            Value::Float(f) => {
                let r = float_rational("->q", f)?;
                Ok(Operand::new(Value::Rational(r), x.unit.clone()))
            }
            _ => Ok(x.clone()),
        })
    }

    ToFloat ("->f", 1 -> 1) [
        aliases: ["→f", "->num"],
        brief: "Convert a real to a float at the current precision",
        stack: "( x -- float )",
        example: "1 3 / ->f",
        see_also: ["->q", "prec"],
    ] |calc| {
        calc.one_arg("->f", &TO_FLOAT, |env, x| {
            let value = match &x.value {
                Value::Float(f) => Value::Float(f.with_digits(env.precision)?),
                other => return Err(CalcError::mismatch("->f", other.kind().name())),
            };
            Ok(Operand::new(value, x.unit.clone()))
        })
    }

    ToComplex ("->c", 1 -> 1) [
        aliases: ["→c"],
        brief: "Convert a scalar to a complex number",
        stack: "( x -- (x, 0) )",
        example: "2 ->c",
        see_also: ["r->c", "c->r"],
    ] |calc| {
        calc.one_arg("->c", &TO_COMPLEX, |_, x| Ok(x.clone()))
    }

    RealsToComplex ("r->c", 2 -> 1) [
        aliases: ["r→c"],
        brief: "Build a complex number from real and imaginary parts",
        stack: "( re im -- (re, im) )",
        example: "3 4 r->c",
        see_also: ["c->r"],
    ] |calc| {
        calc.two_arg("r->c", &REAL_PAIR, |_, re, im| {
            let unit = re.unit.require_same(&im.unit)?;
            match (&re.value, &im.value) {
                (Value::Float(a), Value::Float(b)) => {
                    Ok(Operand::new(Complex::new(a.clone(), b.clone()).into(), unit))
                }
                _ => Err(CalcError::mismatch("r->c", format!("{} and {}", re.kind(), im.kind()))),
            }
        })
    }

    ComplexToReals ("c->r", 1 -> 2) [
        aliases: ["c→r"],
        brief: "Split a complex number into real and imaginary parts",
        stack: "( (re, im) -- re im )",
        example: "3 4 r->c c->r",
        see_also: ["r->c", "re", "im"],
    ] |calc| {
        calc.dispatch_multi("c->r", 1, &TO_COMPLEX.strict(), |_, ops| {
            let z = &ops[0];
            match &z.value {
                Value::Complex(c) => Ok(vec![
                    Operand::new(c.re.clone().into(), z.unit.clone()),
                    Operand::new(c.im.clone().into(), z.unit.clone()),
                ]),
                other => Err(CalcError::mismatch("c->r", other.kind().name())),
            }
        })
    }

    IntegerPart ("ip", 1 -> 1) [
        brief: "Integer part, truncating toward zero",
        stack: "( x -- ip )",
        example: "-7 2 / ip",
        see_also: ["fp", "floor"],
    ] |calc| {
        calc.one_arg("ip", &TypeRules::UNARY_REAL, rounding("ip", Rounding::Trunc))
    }

    FractionalPart ("fp", 1 -> 1) [
        brief: "Fractional part, with the sign of the argument",
        stack: "( x -- x-ip )",
        example: "7 2 / fp",
        see_also: ["ip"],
    ] |calc| {
        calc.one_arg("fp", &TypeRules::UNARY_REAL, |_, x| {
            Ok(Operand::new(fraction(&x.value)?, x.unit.clone()))
        })
    }

    Floor ("floor", 1 -> 1) [
        brief: "Largest integer not above",
        stack: "( x -- floor )",
        example: "-7 2 / floor",
        see_also: ["ceil", "ip"],
    ] |calc| {
        calc.one_arg("floor", &TypeRules::UNARY_REAL, rounding("floor", Rounding::Floor))
    }

    Ceil ("ceil", 1 -> 1) [
        brief: "Smallest integer not below",
        stack: "( x -- ceil )",
        example: "7 2 / ceil",
        see_also: ["floor"],
    ] |calc| {
        calc.one_arg("ceil", &TypeRules::UNARY_REAL, rounding("ceil", Rounding::Ceil))
    }

    Round ("round", 1 -> 1) [
        brief: "Nearest integer, halves away from zero",
        stack: "( x -- round )",
        example: "5 2 / round",
        see_also: ["floor", "ceil"],
    ] |calc| {
        calc.one_arg("round", &TypeRules::UNARY_REAL, rounding("round", Rounding::Nearest))
    }
}
