//! Physical units as a multiplicative group of named base units.
//!
//! A unit is a product of base units raised to non-zero integer exponents.
//! `Unit::default()` is the dimensionless identity.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CalcError, CalcResult};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Unit {
    dims: BTreeMap<String, i32>,
}

impl Unit {
    /// The dimensionless unit.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single base unit with exponent 1.
    pub fn base(name: impl Into<String>) -> Self {
        let mut dims = BTreeMap::new();
        dims.insert(name.into(), 1);
        Self { dims }
    }

    /// Build a unit from `(name, exponent)` pairs. Zero exponents are dropped.
    pub fn from_dims<S: Into<String>>(dims: impl IntoIterator<Item = (S, i32)>) -> Self {
        let mut unit = Unit::none();
        for (name, exp) in dims {
            unit.add_exponent(name.into(), exp);
        }
        unit
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn exponent(&self, name: &str) -> i32 {
        self.dims.get(name).copied().unwrap_or(0)
    }

    fn add_exponent(&mut self, name: String, exp: i32) {
        let entry = self.dims.entry(name).or_insert(0);
        *entry += exp;
        if *entry == 0 {
            self.dims.retain(|_, e| *e != 0);
        }
    }

    pub fn mul(&self, other: &Unit) -> Unit {
        let mut out = self.clone();
        for (name, exp) in &other.dims {
            out.add_exponent(name.clone(), *exp);
        }
        out
    }

    pub fn div(&self, other: &Unit) -> Unit {
        self.mul(&other.inv())
    }

    pub fn inv(&self) -> Unit {
        Unit {
            dims: self.dims.iter().map(|(k, e)| (k.clone(), -e)).collect(),
        }
    }

    pub fn pow(&self, n: i32) -> Unit {
        if n == 0 {
            return Unit::none();
        }
        Unit {
            dims: self.dims.iter().map(|(k, e)| (k.clone(), e * n)).collect(),
        }
    }

    /// The n-th root, defined only when every exponent is divisible by `n`.
    pub fn root(&self, n: i32) -> Option<Unit> {
        if n == 0 || self.dims.values().any(|e| e % n != 0) {
            return None;
        }
        Some(Unit {
            dims: self.dims.iter().map(|(k, e)| (k.clone(), e / n)).collect(),
        })
    }

    /// Require two units to be identical (add/subtract/compare class).
    pub fn require_same(&self, other: &Unit) -> CalcResult<Unit> {
        if self == other {
            Ok(self.clone())
        } else {
            Err(CalcError::UnitsMismatch {
                left: self.to_string(),
                right: other.to_string(),
            })
        }
    }

    /// Require the dimensionless unit.
    pub fn require_none(&self, op: &str) -> CalcResult<()> {
        if self.is_dimensionless() {
            Ok(())
        } else {
            Err(CalcError::UnitsProhibited { op: op.to_string() })
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, exp)) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            if *exp == 1 {
                write!(f, "{}", name)?;
            } else {
                write!(f, "{}^{}", name, exp)?;
            }
        }
        Ok(())
    }
}
