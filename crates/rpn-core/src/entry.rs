//! Stack entries and execution flags.

use std::fmt;

use crate::error::{CalcError, CalcResult};
use crate::fixed;
use crate::format::{self, FormatOptions};
use crate::lattice::reduce;
use crate::unit::Unit;
use crate::value::Value;

/// Status flags derived from the most recently stored value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Flags {
    pub zero: bool,
    pub carry: bool,
    pub overflow: bool,
    pub sign: bool,
}

impl Flags {
    /// Flags for an unbounded value: carry and overflow are always clear.
    pub fn from_sign(zero: bool, sign: bool) -> Self {
        Self {
            zero,
            sign,
            ..Self::default()
        }
    }
}

/// Display metadata copied from the configuration when an entry is created.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryFormat {
    pub base: u32,
    pub fixed_bits: u32,
    pub precision: u32,
    pub is_signed: bool,
}

impl Default for EntryFormat {
    fn default() -> Self {
        Self {
            base: 10,
            fixed_bits: 0,
            precision: crate::value::DEFAULT_DIGITS,
            is_signed: true,
        }
    }
}

impl EntryFormat {
    pub fn validate(&self) -> CalcResult<()> {
        if !(2..=36).contains(&self.base) {
            return Err(CalcError::invalid(format!("base must be 2..36, got {}", self.base)));
        }
        if self.precision == 0 {
            return Err(CalcError::invalid("precision must be at least 1"));
        }
        Ok(())
    }
}

/// A value on the stack together with its unit and display metadata.
///
/// The value is only ever set through [`StackEntry::store_value`], so an
/// entry never holds an unreduced Rational and its flags always describe
/// its current value.
#[derive(Clone, PartialEq, Debug)]
pub struct StackEntry {
    value: Value,
    unit: Unit,
    format: EntryFormat,
    flags: Flags,
}

impl StackEntry {
    pub fn new(value: Value, unit: Unit, format: EntryFormat) -> Self {
        let mut entry = Self {
            value: Value::integer(0),
            unit,
            format,
            flags: Flags::default(),
        };
        entry.store_value(value);
        entry
    }

    /// A dimensionless entry with default formatting.
    pub fn plain(value: Value) -> Self {
        Self::new(value, Unit::none(), EntryFormat::default())
    }

    /// Reduce `value`, apply fixed-width emulation when it is an Integer
    /// and `fixed_bits > 0`, and recompute the flags.
    pub fn store_value(&mut self, value: Value) {
        let value = reduce(value);
        let (value, flags) = match value {
            Value::Integer(n) if self.format.fixed_bits > 0 => {
                let (wrapped, flags) =
                    fixed::emulate(&n, self.format.fixed_bits, self.format.is_signed);
                (Value::Integer(wrapped), flags)
            }
            other => {
                let flags = Flags::from_sign(other.is_zero(), other.is_negative());
                (other, flags)
            }
        };
        log::trace!("store {:?} -> flags {:?}", value.kind(), flags);
        self.value = value;
        self.flags = flags;
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn format(&self) -> &EntryFormat {
        &self.format
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Render the entry using its own stored metadata.
    pub fn display(&self, options: &FormatOptions) -> String {
        format::format_entry(self, options)
    }
}

impl fmt::Display for StackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(&FormatOptions::default()))
    }
}
