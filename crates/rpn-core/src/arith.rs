//! Scalar arithmetic over the numeric kinds.
//!
//! Every binary function brings its operands to their common kind through
//! the lattice, computes in that kind and reduces the result. Exact inputs
//! give exact results: Integer division that does not divide evenly yields a
//! Rational.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{CalcError, CalcResult};
use crate::lattice::{promote_pair, reduce, to_float};
use crate::value::{Complex, Float, Value};

fn mismatch(op: &str, a: &Value, b: &Value) -> CalcError {
    CalcError::mismatch(op, format!("{} and {}", a.kind(), b.kind()))
}

pub fn add(a: &Value, b: &Value, digits: u32) -> CalcResult<Value> {
    let out = match promote_pair("+", a, b, digits)? {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x + y),
        (Value::Rational(x), Value::Rational(y)) => Value::Rational(x + y),
        (Value::Float(x), Value::Float(y)) => Value::Float(x.add(&y)?),
        (Value::Complex(x), Value::Complex(y)) => Value::Complex(x.add(&y)?),
        _ => return Err(mismatch("+", a, b)),
    };
    Ok(reduce(out))
}

pub fn sub(a: &Value, b: &Value, digits: u32) -> CalcResult<Value> {
    let out = match promote_pair("-", a, b, digits)? {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x - y),
        (Value::Rational(x), Value::Rational(y)) => Value::Rational(x - y),
        (Value::Float(x), Value::Float(y)) => Value::Float(x.sub(&y)?),
        (Value::Complex(x), Value::Complex(y)) => Value::Complex(x.sub(&y)?),
        _ => return Err(mismatch("-", a, b)),
    };
    Ok(reduce(out))
}

pub fn mul(a: &Value, b: &Value, digits: u32) -> CalcResult<Value> {
    let out = match promote_pair("*", a, b, digits)? {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x * y),
        (Value::Rational(x), Value::Rational(y)) => Value::Rational(x * y),
        (Value::Float(x), Value::Float(y)) => Value::Float(x.mul(&y)?),
        (Value::Complex(x), Value::Complex(y)) => Value::Complex(x.mul(&y)?),
        _ => return Err(mismatch("*", a, b)),
    };
    Ok(reduce(out))
}

pub fn div(a: &Value, b: &Value, digits: u32) -> CalcResult<Value> {
    let out = match promote_pair("/", a, b, digits)? {
        (Value::Integer(x), Value::Integer(y)) => {
            if y.is_zero() {
                return Err(CalcError::DivisionByZero);
            }
            Value::Rational(BigRational::new(x, y))
        }
        (Value::Rational(x), Value::Rational(y)) => {
            if y.is_zero() {
                return Err(CalcError::DivisionByZero);
            }
            Value::Rational(x / y)
        }
        (Value::Float(x), Value::Float(y)) => Value::Float(x.div(&y)?),
        (Value::Complex(x), Value::Complex(y)) => Value::Complex(x.div(&y)?),
        _ => return Err(mismatch("/", a, b)),
    };
    Ok(reduce(out))
}

pub fn neg(a: &Value) -> CalcResult<Value> {
    match a {
        Value::Integer(x) => Ok(Value::Integer(-x)),
        Value::Rational(x) => Ok(Value::Rational(-x)),
        Value::Float(x) => Ok(Value::Float(x.neg())),
        Value::Complex(x) => Ok(Value::Complex(x.neg())),
        other => Err(CalcError::mismatch("neg", other.kind().name())),
    }
}

/// Reciprocal `1/a`.
pub fn inv(a: &Value, digits: u32) -> CalcResult<Value> {
    div(&Value::integer(1), a, digits)
}

/// Absolute value; the magnitude for complex numbers.
pub fn abs(a: &Value) -> CalcResult<Value> {
    match a {
        Value::Integer(x) => Ok(Value::Integer(x.abs())),
        Value::Rational(x) => Ok(Value::Rational(x.abs())),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        Value::Complex(x) => Ok(Value::Float(x.abs()?)),
        other => Err(CalcError::mismatch("abs", other.kind().name())),
    }
}

/// Order two real scalars after promotion.
pub fn compare(a: &Value, b: &Value, digits: u32) -> CalcResult<Ordering> {
    let (x, y) = promote_pair("compare", a, b, digits)?;
    x.compare(&y).ok_or_else(|| mismatch("compare", a, b))
}

/// Equality after promotion for scalars, structural for everything else.
pub fn equals(a: &Value, b: &Value, digits: u32) -> CalcResult<bool> {
    if a.kind().is_scalar() && b.kind().is_scalar() {
        let (x, y) = promote_pair("==", a, b, digits)?;
        return Ok(x == y);
    }
    Ok(a == b)
}

/// Largest exact result, in bits, an integer power may produce.
pub const MAX_POW_BITS: u64 = 1 << 24;

/// Bits of the largest exact component; `None` for inexact values.
pub(crate) fn exact_bits(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(n) => Some(n.bits()),
        Value::Rational(r) => Some(r.numer().bits().max(r.denom().bits())),
        _ => None,
    }
}

/// Fail unless `exp` repetitions of a `bits`-wide factor fit in
/// [`MAX_POW_BITS`].
pub(crate) fn check_pow_size(op: &str, bits: u64, exp: u64) -> CalcResult<()> {
    if bits.saturating_mul(exp) > MAX_POW_BITS {
        return Err(CalcError::domain(format!(
            "{}: result would exceed {} bits",
            op, MAX_POW_BITS
        )));
    }
    Ok(())
}

/// `base^exp` by repeated squaring. Negative exponents invert the result.
pub fn pow_int(base: &Value, exp: &BigInt, digits: u32) -> CalcResult<Value> {
    if let Value::Integer(n) = base
        && n.abs() <= BigInt::one()
    {
        if exp.is_negative() && n.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        if exp.is_zero() || (n.is_negative() && exp.is_even()) {
            return Ok(Value::integer(1));
        }
        return Ok(base.clone());
    }
    if exp.is_negative() {
        let positive = pow_int(base, &-exp, digits)?;
        return inv(&positive, digits);
    }
    let mut e = exp
        .to_u64()
        .ok_or_else(|| CalcError::domain("exponent too large"))?;
    if let Some(bits) = exact_bits(base) {
        check_pow_size("^", bits, e)?;
    }
    let mut result = Value::integer(1);
    let mut square = base.clone();
    while e > 0 {
        if e & 1 == 1 {
            result = mul(&result, &square, digits)?;
        }
        e >>= 1;
        if e > 0 {
            square = mul(&square, &square, digits)?;
        }
    }
    Ok(result)
}

/// General power. Integer exponents stay exact; other exponents go through
/// Float, or Complex for negative bases.
pub fn pow(base: &Value, exp: &Value, digits: u32) -> CalcResult<Value> {
    if let Value::Integer(e) = exp {
        return pow_int(base, e, digits);
    }
    match (base, exp) {
        (Value::Complex(_), _) | (_, Value::Complex(_)) => {
            let (b, e) = promote_pair("^", base, exp, digits)?;
            match (b, e) {
                (Value::Complex(b), Value::Complex(e)) => Ok(Value::Complex(b.pow(&e)?)),
                _ => Err(mismatch("^", base, exp)),
            }
        }
        _ => {
            let b = to_float(base, digits)?;
            let e = to_float(exp, digits)?;
            if b.is_negative() {
                let c = Complex::from_real(b).pow(&Complex::from_real(e))?;
                return Ok(Value::Complex(c));
            }
            Ok(Value::Float(b.pow(&e)?))
        }
    }
}

fn exact_sqrt(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let root = n.sqrt();
    (&root * &root == *n).then_some(root)
}

/// Square root: exact for perfect squares, Complex for negative reals.
pub fn sqrt(a: &Value, digits: u32) -> CalcResult<Value> {
    match a {
        Value::Integer(n) => {
            if let Some(root) = exact_sqrt(n) {
                return Ok(Value::Integer(root));
            }
        }
        Value::Rational(r) => {
            if let (Some(num), Some(den)) = (exact_sqrt(r.numer()), exact_sqrt(r.denom())) {
                return Ok(reduce(Value::Rational(BigRational::new(num, den))));
            }
        }
        Value::Complex(c) => return Ok(Value::Complex(c.sqrt()?)),
        other if !other.kind().is_scalar() => {
            return Err(CalcError::mismatch("sqrt", other.kind().name()));
        }
        _ => {}
    }
    let f = to_float(a, digits)?;
    if f.is_negative() {
        return Ok(Value::Complex(Complex::from_real(f).sqrt()?));
    }
    Ok(Value::Float(f.sqrt()?))
}

/// Floored modulo: the result has the sign of the divisor.
pub fn modulo(a: &Value, b: &Value, digits: u32) -> CalcResult<Value> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    match promote_pair("mod", a, b, digits)? {
        (Value::Integer(x), Value::Integer(y)) => Ok(Value::Integer(x.mod_floor(&y))),
        (Value::Rational(x), Value::Rational(y)) => {
            let q = (&x / &y).floor();
            Ok(reduce(Value::Rational(x - y * q)))
        }
        (Value::Float(x), Value::Float(y)) => {
            let d = x.digits().max(y.digits());
            let (Some(rx), Some(ry)) = (x.to_rational(), y.to_rational()) else {
                return Err(CalcError::domain("mod: float has no exact fraction in range"));
            };
            let q = (&rx / &ry).floor();
            Ok(Value::Float(Float::from_rational(&(rx - ry * q), d)?))
        }
        _ => Err(mismatch("mod", a, b)),
    }
}

/// Floored integer division.
pub fn idiv(a: &BigInt, b: &BigInt) -> CalcResult<BigInt> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a.div_floor(b))
}

/// The multiplicative identity for values of `like`'s kind.
pub fn one_like(like: &Value) -> CalcResult<Value> {
    match like {
        Value::Float(f) => Ok(Value::Float(Float::from_i64(1, f.digits())?)),
        Value::Complex(c) => Ok(Value::Complex(Complex::from_real(Float::from_i64(
            1,
            c.digits(),
        )?))),
        _ => Ok(Value::Integer(BigInt::one())),
    }
}
