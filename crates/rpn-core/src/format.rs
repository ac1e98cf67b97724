//! Display formatting for values and stack entries.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::entry::{EntryFormat, StackEntry};
use crate::value::{Complex, Float, Value};

/// How angles are interpreted by trigonometric operations and shown in
/// polar complex numbers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
    Gradians,
}

impl AngleMode {
    /// Units per half turn (π radians).
    pub fn half_turn(self) -> Option<i64> {
        match self {
            AngleMode::Radians => None,
            AngleMode::Degrees => Some(180),
            AngleMode::Gradians => Some(200),
        }
    }

    /// Convert an angle in this mode to radians.
    pub fn to_radians(self, angle: &Float) -> crate::CalcResult<Float> {
        match self.half_turn() {
            None => Ok(angle.clone()),
            Some(half) => {
                let d = angle.digits();
                angle.mul(&Float::pi(d)?)?.div(&Float::from_i64(half, d)?)
            }
        }
    }

    /// Convert an angle in radians to this mode.
    pub fn from_radians(self, angle: &Float) -> crate::CalcResult<Float> {
        match self.half_turn() {
            None => Ok(angle.clone()),
            Some(half) => {
                let d = angle.digits();
                angle.mul(&Float::from_i64(half, d)?)?.div(&Float::pi(d)?)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RationalMode {
    /// `7/2`
    #[default]
    Improper,
    /// `3 1/2`
    Mixed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexMode {
    /// `(re, im)`
    #[default]
    Rectangular,
    /// `(mag∠angle)`
    Polar,
}

/// Calculator-wide display modes that are not stored per entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FormatOptions {
    pub angle: AngleMode,
    pub rational: RationalMode,
    pub complex: ComplexMode,
}

/// Render an integer in `base` with its conventional prefix.
pub fn format_integer(n: &BigInt, base: u32) -> String {
    let digits = n.abs().to_str_radix(base).to_uppercase();
    let prefix = match base {
        10 => String::new(),
        2 => "0b".to_string(),
        8 => "0o".to_string(),
        16 => "0x".to_string(),
        other => format!("{}#", other),
    };
    let sign = if n.is_negative() { "-" } else { "" };
    format!("{}{}{}", sign, prefix, digits)
}

pub fn format_rational(r: &BigRational, mode: RationalMode) -> String {
    let (num, den) = (r.numer(), r.denom());
    match mode {
        RationalMode::Mixed if num.abs() > *den => {
            let (whole, rem) = num.abs().div_rem(den);
            let sign = if num.is_negative() { "-" } else { "" };
            if rem.is_zero() {
                format!("{}{}", sign, whole)
            } else {
                format!("{}{} {}/{}", sign, whole, rem, den)
            }
        }
        _ => format!("{}/{}", num, den),
    }
}

fn format_complex(c: &Complex, precision: u32, options: &FormatOptions) -> String {
    if options.complex == ComplexMode::Polar {
        let polar = c
            .abs()
            .and_then(|mag| Ok((mag, options.angle.from_radians(&c.arg()?)?)));
        if let Ok((mag, angle)) = polar {
            let degree = if options.angle == AngleMode::Degrees { "°" } else { "" };
            return format!(
                "({}∠{}{})",
                mag.format_sig(precision),
                angle.format_sig(precision),
                degree
            );
        }
    }
    format!("({}, {})", c.re.format_sig(precision), c.im.format_sig(precision))
}

/// Render a value with explicit entry metadata and display modes.
pub fn format_value(value: &Value, format: &EntryFormat, options: &FormatOptions) -> String {
    match value {
        Value::Integer(n) => format_integer(n, format.base),
        Value::Rational(r) => format_rational(r, options.rational),
        Value::Float(f) => f.format_sig(format.precision),
        Value::Complex(c) => format_complex(c, format.precision, options),
        Value::List(list) => {
            if list.is_empty() {
                return "{ }".to_string();
            }
            let inner: Vec<String> = list
                .items()
                .iter()
                .map(|v| format_value(v, format, options))
                .collect();
            format!("{{ {} }}", inner.join(" "))
        }
        Value::Matrix(m) => {
            let rows: Vec<String> = (0..m.rows())
                .map(|r| {
                    let cells: Vec<String> =
                        m.row(r).iter().map(|v| format_value(v, format, options)).collect();
                    format!("[{}]", cells.join(" "))
                })
                .collect();
            format!("[{}]", rows.join(" "))
        }
        Value::Time(t) => t.to_string(),
        Value::Symbolic(s) => format!("'{}'", s),
    }
}

/// Render a stack entry with its stored metadata and a `_unit` suffix.
pub fn format_entry(entry: &StackEntry, options: &FormatOptions) -> String {
    let text = format_value(entry.value(), entry.format(), options);
    if entry.unit().is_dimensionless() {
        text
    } else {
        format!("{}_{}", text, entry.unit())
    }
}

/// Decimal rendering with the value's own precision.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self {
            Value::Float(x) => EntryFormat {
                precision: x.digits(),
                ..EntryFormat::default()
            },
            Value::Complex(c) => EntryFormat {
                precision: c.digits(),
                ..EntryFormat::default()
            },
            _ => EntryFormat::default(),
        };
        match self {
            Value::Symbolic(s) => write!(f, "{}", s),
            other => f.write_str(&format_value(other, &format, &FormatOptions::default())),
        }
    }
}
