//! The calculator's value type.
//!
//! A `Value` is exactly one of the eight kinds listed in [`Kind`]. Exact
//! kinds (Integer, Rational) never lose precision; Float and Complex carry
//! their own decimal precision.

mod complex;
mod float;
mod list;
mod matrix;
mod symbolic;
mod time;

pub use complex::Complex;
pub use float::{bits_for, Decimal, Float, DEFAULT_DIGITS, MAX_DECIMAL_EXPONENT};
pub use list::List;
pub use matrix::Matrix;
pub use symbolic::Symbolic;
pub use self::time::Time;

pub(crate) use float::rational_is_integer;

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::{CalcError, CalcResult};
use crate::kind::Kind;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(BigInt),
    Rational(BigRational),
    Float(Float),
    Complex(Complex),
    Matrix(Matrix),
    List(List),
    Time(Time),
    Symbolic(Symbolic),
}

impl Value {
    /// Create an integer value.
    pub fn integer(n: impl Into<BigInt>) -> Self {
        Value::Integer(n.into())
    }

    /// Create a rational `num/den` in lowest terms.
    ///
    /// The result is not reduced to Integer; use [`crate::reduce`] for that.
    pub fn rational(num: impl Into<BigInt>, den: impl Into<BigInt>) -> CalcResult<Self> {
        let den = den.into();
        if den.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Value::Rational(BigRational::new(num.into(), den)))
    }

    /// Parse a decimal float literal at the given precision.
    pub fn float(text: &str, digits: u32) -> CalcResult<Self> {
        Ok(Value::Float(Float::parse(text, digits)?))
    }

    /// A symbolic variable.
    pub fn var(name: &str) -> Self {
        Value::Symbolic(Symbolic::var(name))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Rational(_) => Kind::Rational,
            Value::Float(_) => Kind::Float,
            Value::Complex(_) => Kind::Complex,
            Value::Matrix(_) => Kind::Matrix,
            Value::List(_) => Kind::List,
            Value::Time(_) => Kind::Time,
            Value::Symbolic(_) => Kind::Symbolic,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_symbolic(&self) -> Option<&Symbolic> {
        match self {
            Value::Symbolic(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value equals zero. Non-numeric kinds are never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Integer(n) => n.is_zero(),
            Value::Rational(r) => r.is_zero(),
            Value::Float(f) => f.is_zero(),
            Value::Complex(c) => c.is_zero(),
            Value::Time(t) => t.nanos().is_zero(),
            Value::Matrix(m) => m.cells().iter().all(Value::is_zero),
            Value::List(_) | Value::Symbolic(_) => false,
        }
    }

    /// Whether the value is strictly negative. Only ordered kinds can be.
    pub fn is_negative(&self) -> bool {
        match self {
            Value::Integer(n) => n.is_negative(),
            Value::Rational(r) => r.is_negative(),
            Value::Float(f) => f.is_negative(),
            Value::Time(t) => !t.is_absolute() && t.nanos().is_negative(),
            _ => false,
        }
    }

    /// Order two values of the same ordered kind.
    ///
    /// Integer, Rational, Float and Time are ordered; mixed kinds must be
    /// brought to a common kind first.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Rational(a), Value::Rational(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Time(a), Value::Time(b)) if a.is_absolute() == b.is_absolute() => {
                Some(a.nanos().cmp(b.nanos()))
            }
            _ => None,
        }
    }

    /// Convert a small non-negative integer argument (counts, bit widths).
    pub fn to_index(&self, what: &str) -> CalcResult<usize> {
        let n = self
            .as_integer()
            .ok_or_else(|| CalcError::invalid(format!("{} must be an integer", what)))?;
        usize::try_from(n)
            .map_err(|_| CalcError::invalid(format!("{} out of range: {}", what, n)))
    }

    /// Interpret a real scalar as an exact rational. Floats are rounded to
    /// their own precision.
    pub fn to_rational(&self) -> Option<BigRational> {
        match self {
            Value::Integer(n) => Some(BigRational::from_integer(n.clone())),
            Value::Rational(r) => Some(r.clone()),
            Value::Float(f) => f.to_rational(),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<BigRational> for Value {
    fn from(r: BigRational) -> Self {
        Value::Rational(r)
    }
}

impl From<Float> for Value {
    fn from(f: Float) -> Self {
        Value::Float(f)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Value::Complex(c)
    }
}

impl From<Symbolic> for Value {
    fn from(s: Symbolic) -> Self {
        Value::Symbolic(s)
    }
}

impl From<Time> for Value {
    fn from(t: Time) -> Self {
        Value::Time(t)
    }
}
