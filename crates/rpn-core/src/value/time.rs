//! Time values: absolute instants and durations.
//!
//! Both are a signed count of nanoseconds. Absolute instants count from the
//! Unix epoch.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::{CalcError, CalcResult};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Time {
    nanos: BigInt,
    absolute: bool,
}

impl Time {
    pub fn duration(nanos: BigInt) -> Self {
        Self {
            nanos,
            absolute: false,
        }
    }

    pub fn duration_from_nanos(nanos: i64) -> Self {
        Self::duration(BigInt::from(nanos))
    }

    pub fn absolute(nanos: BigInt) -> Self {
        Self {
            nanos,
            absolute: true,
        }
    }

    /// Build from a number of seconds, rounded to the nearest nanosecond.
    pub fn from_seconds(seconds: &BigRational, absolute: bool) -> Self {
        let scaled = seconds * BigRational::from_integer(BigInt::from(NANOS_PER_SECOND));
        Self {
            nanos: scaled.round().to_integer(),
            absolute,
        }
    }

    /// The current wall-clock instant.
    pub fn now() -> Self {
        Self::absolute(BigInt::from(OffsetDateTime::now_utc().unix_timestamp_nanos()))
    }

    pub fn nanos(&self) -> &BigInt {
        &self.nanos
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Exact number of seconds (since the epoch for absolute instants).
    pub fn seconds(&self) -> BigRational {
        BigRational::new(self.nanos.clone(), BigInt::from(NANOS_PER_SECOND))
    }

    pub fn add(&self, other: &Time) -> CalcResult<Time> {
        if self.absolute && other.absolute {
            return Err(CalcError::domain("cannot add two absolute times"));
        }
        Ok(Time {
            nanos: &self.nanos + &other.nanos,
            absolute: self.absolute || other.absolute,
        })
    }

    pub fn sub(&self, other: &Time) -> CalcResult<Time> {
        match (self.absolute, other.absolute) {
            (true, true) => Ok(Time::duration(&self.nanos - &other.nanos)),
            (true, false) => Ok(Time::absolute(&self.nanos - &other.nanos)),
            (false, false) => Ok(Time::duration(&self.nanos - &other.nanos)),
            (false, true) => Err(CalcError::domain(
                "cannot subtract an absolute time from a duration",
            )),
        }
    }

    pub fn neg(&self) -> CalcResult<Time> {
        if self.absolute {
            return Err(CalcError::domain("cannot negate an absolute time"));
        }
        Ok(Time::duration(-&self.nanos))
    }

    /// Scale a duration by a real factor.
    pub fn scale(&self, factor: &BigRational) -> CalcResult<Time> {
        if self.absolute {
            return Err(CalcError::domain("cannot scale an absolute time"));
        }
        let scaled = BigRational::from_integer(self.nanos.clone()) * factor;
        Ok(Time::duration(scaled.round().to_integer()))
    }

    /// Exact ratio of two durations.
    pub fn ratio(&self, other: &Time) -> CalcResult<BigRational> {
        if self.absolute || other.absolute {
            return Err(CalcError::domain("cannot divide absolute times"));
        }
        if other.nanos.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(BigRational::new(self.nanos.clone(), other.nanos.clone()))
    }

    /// RFC 3339 rendering of an absolute instant.
    pub fn rfc3339(&self) -> CalcResult<String> {
        let nanos = self
            .nanos
            .to_i128()
            .ok_or_else(|| CalcError::domain("time out of range"))?;
        let instant = OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map_err(|e| CalcError::domain(e.to_string()))?;
        instant
            .format(&Rfc3339)
            .map_err(|e| CalcError::domain(e.to_string()))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute
            && let Ok(text) = self.rfc3339()
        {
            return f.write_str(&text);
        }
        let (whole, frac) = self.nanos.abs().div_rem(&BigInt::from(NANOS_PER_SECOND));
        let sign = if self.nanos.is_negative() { "-" } else { "" };
        let suffix = if self.absolute { "s@epoch" } else { "s" };
        if frac.is_zero() {
            write!(f, "{}{}{}", sign, whole, suffix)
        } else {
            let digits = format!("{:09}", frac);
            write!(f, "{}{}.{}{}", sign, whole, digits.trim_end_matches('0'), suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_plus_duration_is_absolute() {
        let t = Time::absolute(BigInt::from(10)).add(&Time::duration_from_nanos(5)).unwrap();
        assert!(t.is_absolute());
        assert_eq!(t.nanos(), &BigInt::from(15));
    }

    #[test]
    fn absolute_minus_absolute_is_duration() {
        let a = Time::absolute(BigInt::from(100));
        let b = Time::absolute(BigInt::from(40));
        let d = a.sub(&b).unwrap();
        assert!(!d.is_absolute());
        assert_eq!(d.nanos(), &BigInt::from(60));
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn durations_render_in_seconds() {
        assert_eq!(Time::duration_from_nanos(1_500_000_000).to_string(), "1.5s");
        assert_eq!(Time::duration_from_nanos(-2_000_000_000).to_string(), "-2s");
    }

    #[test]
    fn epoch_renders_as_rfc3339() {
        assert_eq!(
            Time::absolute(BigInt::zero()).to_string(),
            "1970-01-01T00:00:00Z"
        );
    }

    #[test]
    fn ratio_of_durations_is_exact() {
        let a = Time::duration_from_nanos(3);
        let b = Time::duration_from_nanos(9);
        assert_eq!(
            a.ratio(&b).unwrap(),
            BigRational::new(BigInt::from(1), BigInt::from(3))
        );
        assert_eq!(a.ratio(&Time::duration_from_nanos(0)), Err(CalcError::DivisionByZero));
    }
}
