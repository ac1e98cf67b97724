//! Conversion lattice between value kinds.
//!
//! Scalars are totally ordered Integer < Rational < Float < Complex and any
//! pair of them widens to the larger. Symbolic absorbs every kind. Matrix,
//! List and Time only combine with their own kind here; scalar broadcast and
//! scalar-matrix products are decided by the operations themselves.

use std::sync::Arc;

use num_rational::BigRational;

use crate::error::{CalcError, CalcResult};
use crate::kind::Kind;
use crate::value::{rational_is_integer, Complex, Float, List, Symbolic, Value};

/// Scalar kinds from narrowest to widest.
pub const SCALAR_ORDER: [Kind; 4] = [Kind::Integer, Kind::Rational, Kind::Float, Kind::Complex];

/// The kind two operands are brought to before a binary operation.
pub fn common_kind(a: Kind, b: Kind) -> Option<Kind> {
    if a == b {
        return Some(a);
    }
    if a == Kind::Symbolic || b == Kind::Symbolic {
        return Some(Kind::Symbolic);
    }
    match (a.scalar_rank(), b.scalar_rank()) {
        (Some(ra), Some(rb)) => Some(if ra >= rb { a } else { b }),
        _ => None,
    }
}

/// Convert a value to a wider kind without losing information.
///
/// `digits` is the precision given to values widened into Float or Complex.
pub fn widen(value: Value, target: Kind, digits: u32) -> CalcResult<Value> {
    if value.kind() == target {
        return Ok(value);
    }
    let from = value.kind();
    let out = match (value, target) {
        (v, Kind::Symbolic) => Value::Symbolic(Symbolic::from_value(v)),
        (Value::Integer(n), Kind::Rational) => Value::Rational(BigRational::from_integer(n)),
        (Value::Integer(n), Kind::Float) => Value::Float(Float::from_bigint(&n, digits)?),
        (Value::Rational(r), Kind::Float) => Value::Float(Float::from_rational(&r, digits)?),
        (v @ (Value::Integer(_) | Value::Rational(_) | Value::Float(_)), Kind::Complex) => {
            Value::Complex(Complex::from_real(to_float(&v, digits)?))
        }
        _ => {
            return Err(CalcError::mismatch(
                "convert",
                format!("cannot widen {} to {}", from, target),
            ));
        }
    };
    Ok(out)
}

/// Convert a value to a narrower kind if that is exact.
///
/// Floats narrow to the rational they represent at their own precision;
/// complex values narrow only when the imaginary part is zero.
pub fn narrow(value: &Value, target: Kind) -> Option<Value> {
    if value.kind() == target {
        return Some(value.clone());
    }
    match (value, target) {
        (Value::Rational(r), Kind::Integer) if rational_is_integer(r) => {
            Some(Value::Integer(r.to_integer()))
        }
        (Value::Float(f), Kind::Rational) => Some(Value::Rational(f.to_rational()?)),
        (Value::Float(f), Kind::Integer) => {
            let r = f.to_rational()?;
            rational_is_integer(&r).then(|| Value::Integer(r.to_integer()))
        }
        (Value::Complex(c), _) if c.is_real() => {
            let real = Value::Float(c.re.clone());
            narrow(&real, target)
        }
        _ => None,
    }
}

/// Canonicalize a value: Rationals with denominator 1 become Integers,
/// recursively through lists, matrices and embedded symbolic constants.
pub fn reduce(value: Value) -> Value {
    match value {
        Value::Rational(r) if rational_is_integer(&r) => Value::Integer(r.to_integer()),
        Value::List(list) => Value::List(reduce_list(list)),
        Value::Matrix(m) => Value::Matrix(m.map_cells(reduce)),
        Value::Symbolic(s) => Value::Symbolic(reduce_symbolic(s)),
        other => other,
    }
}

fn reduce_list(list: List) -> List {
    let kind = list.element_kind();
    let items: Vec<Value> = list.into_items().into_iter().map(reduce).collect();
    let kind = if kind == Kind::Rational && !items.iter().any(|v| v.kind() == Kind::Rational) {
        Kind::Integer
    } else {
        kind
    };
    List::from_parts(kind, items)
}

fn reduce_symbolic(expr: Symbolic) -> Symbolic {
    match expr {
        Symbolic::Num(v) => {
            let inner = Arc::unwrap_or_clone(v);
            Symbolic::Num(Arc::new(reduce(inner)))
        }
        Symbolic::Apply(name, args) => {
            let args: Vec<Symbolic> = args.iter().cloned().map(reduce_symbolic).collect();
            Symbolic::Apply(name, args.into())
        }
        var => var,
    }
}

/// Real scalar as a Float at the given precision (Floats keep their own).
pub fn to_float(value: &Value, digits: u32) -> CalcResult<Float> {
    match value {
        Value::Integer(n) => Float::from_bigint(n, digits),
        Value::Rational(r) => Float::from_rational(r, digits),
        Value::Float(f) => Ok(f.clone()),
        other => Err(CalcError::mismatch(
            "convert",
            format!("{} is not a real number", other.kind()),
        )),
    }
}

/// Any scalar as a Complex at the given precision.
pub fn to_complex(value: &Value, digits: u32) -> CalcResult<Complex> {
    match value {
        Value::Complex(c) => Ok(c.clone()),
        other => Ok(Complex::from_real(to_float(other, digits)?)),
    }
}

/// Bring two scalars to their common kind.
pub fn promote_pair(op: &str, a: &Value, b: &Value, digits: u32) -> CalcResult<(Value, Value)> {
    let kind = common_kind(a.kind(), b.kind())
        .filter(|k| k.is_scalar())
        .ok_or_else(|| CalcError::mismatch(op, format!("{} and {}", a.kind(), b.kind())))?;
    Ok((widen(a.clone(), kind, digits)?, widen(b.clone(), kind, digits)?))
}
