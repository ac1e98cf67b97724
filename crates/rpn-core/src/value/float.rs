//! Arbitrary-precision floats.
//!
//! `Float` wraps an `astro_float::BigFloat` and remembers its precision in
//! significant decimal digits. The binary working precision is derived from
//! the digit count plus guard bits, so a result rounded back to `digits`
//! significant digits is exact for the usual rational inputs.

use std::cmp::Ordering;
use std::fmt;

use astro_float::{BigFloat, Consts, Radix, RoundingMode};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::{CalcError, CalcResult};

/// Default precision in significant decimal digits.
pub const DEFAULT_DIGITS: u32 = 32;

const RM: RoundingMode = RoundingMode::ToEven;
const GUARD_BITS: usize = 64;
const LOG2_10: f64 = std::f64::consts::LOG2_10;

/// Largest decimal exponent expanded into an exact fraction.
pub const MAX_DECIMAL_EXPONENT: u64 = 100_000;

/// Binary precision for a decimal digit count.
pub fn bits_for(digits: u32) -> usize {
    (digits.max(1) as f64 * LOG2_10).ceil() as usize + GUARD_BITS
}

fn consts() -> CalcResult<Consts> {
    Consts::new().map_err(|e| CalcError::domain(format!("float constants unavailable: {:?}", e)))
}

/// A float with a precision in significant decimal digits.
#[derive(Clone, Debug)]
pub struct Float {
    value: BigFloat,
    digits: u32,
}

impl Float {
    fn wrap(value: BigFloat, digits: u32) -> CalcResult<Self> {
        if value.is_nan() {
            return Err(CalcError::domain("result is not a number"));
        }
        Ok(Self { value, digits })
    }

    /// Parse a decimal string such as `-12.5e3`.
    pub fn parse(text: &str, digits: u32) -> CalcResult<Self> {
        let mut cc = consts()?;
        let value = BigFloat::parse(text, Radix::Dec, bits_for(digits), RM, &mut cc);
        if value.is_nan() {
            return Err(CalcError::invalid(format!("not a number: '{}'", text)));
        }
        Ok(Self { value, digits })
    }

    pub fn zero(digits: u32) -> Self {
        Self {
            value: BigFloat::new(bits_for(digits)),
            digits,
        }
    }

    pub fn from_bigint(n: &BigInt, digits: u32) -> CalcResult<Self> {
        Self::parse(&n.to_string(), digits)
    }

    pub fn from_i64(n: i64, digits: u32) -> CalcResult<Self> {
        Self::parse(&n.to_string(), digits)
    }

    pub fn from_rational(r: &BigRational, digits: u32) -> CalcResult<Self> {
        let num = Self::from_bigint(r.numer(), digits)?;
        let den = Self::from_bigint(r.denom(), digits)?;
        num.div(&den)
    }

    /// Precision in significant decimal digits.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The same value re-rounded to another precision.
    pub fn with_digits(&self, digits: u32) -> CalcResult<Self> {
        let one = Self::from_i64(1, digits)?;
        Self::wrap(self.value.mul(&one.value, bits_for(digits), RM), digits)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.value.is_zero() && self.value.is_negative()
    }

    pub fn is_finite(&self) -> bool {
        !self.value.is_inf() && !self.value.is_nan()
    }

    fn prec(&self, other: &Float) -> u32 {
        self.digits.max(other.digits)
    }

    pub fn add(&self, other: &Float) -> CalcResult<Float> {
        let d = self.prec(other);
        Self::wrap(self.value.add(&other.value, bits_for(d), RM), d)
    }

    pub fn sub(&self, other: &Float) -> CalcResult<Float> {
        let d = self.prec(other);
        Self::wrap(self.value.sub(&other.value, bits_for(d), RM), d)
    }

    pub fn mul(&self, other: &Float) -> CalcResult<Float> {
        let d = self.prec(other);
        Self::wrap(self.value.mul(&other.value, bits_for(d), RM), d)
    }

    pub fn div(&self, other: &Float) -> CalcResult<Float> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let d = self.prec(other);
        Self::wrap(self.value.div(&other.value, bits_for(d), RM), d)
    }

    pub fn neg(&self) -> Float {
        Self {
            value: self.value.neg(),
            digits: self.digits,
        }
    }

    pub fn abs(&self) -> Float {
        Self {
            value: self.value.abs(),
            digits: self.digits,
        }
    }

    pub fn sqrt(&self) -> CalcResult<Float> {
        if self.is_negative() {
            return Err(CalcError::domain("square root of a negative float"));
        }
        Self::wrap(self.value.sqrt(bits_for(self.digits), RM), self.digits)
    }

    pub fn pow(&self, exponent: &Float) -> CalcResult<Float> {
        if self.is_zero() && exponent.is_negative() {
            return Err(CalcError::DivisionByZero);
        }
        let d = self.prec(exponent);
        let mut cc = consts()?;
        Self::wrap(self.value.pow(&exponent.value, bits_for(d), RM, &mut cc), d)
    }

    pub fn exp(&self) -> CalcResult<Float> {
        let mut cc = consts()?;
        Self::wrap(self.value.exp(bits_for(self.digits), RM, &mut cc), self.digits)
    }

    pub fn ln(&self) -> CalcResult<Float> {
        if self.is_zero() || self.is_negative() {
            return Err(CalcError::domain("logarithm of a non-positive float"));
        }
        let mut cc = consts()?;
        Self::wrap(self.value.ln(bits_for(self.digits), RM, &mut cc), self.digits)
    }

    pub fn sin(&self) -> CalcResult<Float> {
        let mut cc = consts()?;
        Self::wrap(self.value.sin(bits_for(self.digits), RM, &mut cc), self.digits)
    }

    pub fn cos(&self) -> CalcResult<Float> {
        let mut cc = consts()?;
        Self::wrap(self.value.cos(bits_for(self.digits), RM, &mut cc), self.digits)
    }

    pub fn tan(&self) -> CalcResult<Float> {
        let mut cc = consts()?;
        Self::wrap(self.value.tan(bits_for(self.digits), RM, &mut cc), self.digits)
    }

    pub fn atan(&self) -> CalcResult<Float> {
        let mut cc = consts()?;
        Self::wrap(self.value.atan(bits_for(self.digits), RM, &mut cc), self.digits)
    }

    /// π at the given precision.
    pub fn pi(digits: u32) -> CalcResult<Float> {
        let mut cc = consts()?;
        Self::wrap(cc.pi(bits_for(digits), RM), digits)
    }

    /// Four-quadrant arctangent of `y / x`.
    pub fn atan2(y: &Float, x: &Float) -> CalcResult<Float> {
        let d = y.prec(x);
        if x.is_zero() {
            if y.is_zero() {
                return Ok(Float::zero(d));
            }
            let half_pi = Float::pi(d)?.div(&Float::from_i64(2, d)?)?;
            return Ok(if y.is_negative() { half_pi.neg() } else { half_pi });
        }
        let base = y.div(x)?.atan()?;
        if !x.is_negative() {
            return Ok(base);
        }
        let pi = Float::pi(d)?;
        if y.is_negative() { base.sub(&pi) } else { base.add(&pi) }
    }

    /// Exact decimal expansion of the stored binary value.
    pub fn to_decimal(&self) -> Option<Decimal> {
        if !self.is_finite() {
            return None;
        }
        if self.is_zero() {
            return Some(Decimal::zero());
        }
        Decimal::parse(&self.value.to_string())
    }

    /// Rational approximation rounded to the float's own precision. `None`
    /// for non-finite values and decimal exponents beyond
    /// [`MAX_DECIMAL_EXPONENT`].
    pub fn to_rational(&self) -> Option<BigRational> {
        self.to_decimal()?.round_sig(self.digits).to_rational()
    }

    /// Whether the value has no fractional digits at its own precision.
    pub fn is_integral(&self) -> bool {
        self.to_decimal()
            .is_some_and(|d| d.round_sig(self.digits).exponent >= 0)
    }

    /// Render with `digits` significant digits.
    pub fn format_sig(&self, digits: u32) -> String {
        if self.value.is_nan() {
            return "nan".to_string();
        }
        if self.value.is_inf() {
            return if self.value.is_negative() { "-inf" } else { "inf" }.to_string();
        }
        match self.to_decimal() {
            Some(d) => d.round_sig(digits).render(digits),
            None => "nan".to_string(),
        }
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_sig(self.digits))
    }
}

/// A finite decimal number `±mantissa × 10^exponent`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Decimal {
    pub negative: bool,
    pub mantissa: BigInt,
    pub exponent: i64,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            negative: false,
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// Parse `[-+]digits[.digits][e[-+]digits]`.
    pub fn parse(text: &str) -> Option<Decimal> {
        let text = text.trim();
        let (negative, rest) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exp_part) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };
        let mut exponent: i64 = match exp_part {
            Some(e) => e.parse().ok()?,
            None => 0,
        };
        let (int_part, frac_part) = match number.find('.') {
            Some(pos) => (&number[..pos], &number[pos + 1..]),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let all_digits = format!("{}{}", int_part, frac_part);
        if !all_digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        exponent -= frac_part.len() as i64;
        let mantissa: BigInt = all_digits.parse().ok()?;
        Some(Decimal {
            negative: negative && !mantissa.is_zero(),
            mantissa,
            exponent,
        }
        .normalized())
    }

    /// Strip trailing zeros from the mantissa.
    fn normalized(mut self) -> Self {
        if self.mantissa.is_zero() {
            return Decimal::zero();
        }
        let ten = BigInt::from(10);
        while (&self.mantissa % &ten).is_zero() {
            self.mantissa /= &ten;
            self.exponent += 1;
        }
        self
    }

    fn digit_count(&self) -> usize {
        if self.mantissa.is_zero() {
            1
        } else {
            self.mantissa.to_string().len()
        }
    }

    /// Round half away from zero to at most `sig` significant digits.
    pub fn round_sig(&self, sig: u32) -> Decimal {
        let sig = sig.max(1) as usize;
        let count = self.digit_count();
        if count <= sig {
            return self.clone();
        }
        let drop = (count - sig) as u32;
        let scale = BigInt::from(10).pow(drop);
        let mut kept = &self.mantissa / &scale;
        let remainder = &self.mantissa % &scale;
        if remainder * 2 >= scale {
            kept += 1;
        }
        Decimal {
            negative: self.negative,
            mantissa: kept,
            exponent: self.exponent + drop as i64,
        }
        .normalized()
    }

    pub fn to_rational(&self) -> Option<BigRational> {
        let magnitude = self.exponent.unsigned_abs();
        if magnitude > MAX_DECIMAL_EXPONENT {
            return None;
        }
        let mut value = BigRational::from_integer(self.mantissa.clone());
        let factor = BigRational::from_integer(BigInt::from(10).pow(magnitude as u32));
        if self.exponent >= 0 {
            value *= factor;
        } else {
            value /= factor;
        }
        Some(if self.negative { -value } else { value })
    }

    /// Render in plain notation when the leading digit's exponent lies in
    /// `[-5, precision)`, scientific otherwise. Integral values keep a
    /// trailing `.` to distinguish them from integers.
    pub fn render(&self, precision: u32) -> String {
        if self.mantissa.is_zero() {
            return "0.".to_string();
        }
        let digits = self.mantissa.abs().to_string();
        let lead_exp = self.exponent + digits.len() as i64 - 1;
        let sign = if self.negative { "-" } else { "" };
        if lead_exp >= -5 && lead_exp < precision.max(1) as i64 {
            if self.exponent >= 0 {
                let zeros = "0".repeat(self.exponent as usize);
                format!("{}{}{}.", sign, digits, zeros)
            } else if lead_exp >= 0 {
                let split = (lead_exp + 1) as usize;
                format!("{}{}.{}", sign, &digits[..split], &digits[split..])
            } else {
                let zeros = "0".repeat((-lead_exp - 1) as usize);
                format!("{}0.{}{}", sign, zeros, digits)
            }
        } else {
            let (head, tail) = digits.split_at(1);
            if tail.is_empty() {
                format!("{}{}e{}", sign, head, lead_exp)
            } else {
                format!("{}{}.{}e{}", sign, head, tail, lead_exp)
            }
        }
    }
}

/// True when the rational is an exact integer (`den == 1`).
pub(crate) fn rational_is_integer(r: &BigRational) -> bool {
    r.denom().is_one()
}
