//! Fixed-width integer emulation.
//!
//! Constrains an arbitrary-precision integer to a W-bit hardware integer and
//! reports the status flags a CPU would set.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::entry::Flags;

/// A W-bit word, signed (two's complement) or unsigned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WordSpec {
    pub bits: u32,
    pub signed: bool,
}

impl WordSpec {
    pub fn new(bits: u32, signed: bool) -> Self {
        Self { bits, signed }
    }

    /// `2^bits`
    pub fn modulus(&self) -> BigInt {
        BigInt::one() << self.bits
    }

    /// Mask of the low `bits` bits.
    pub fn mask(&self) -> BigInt {
        self.modulus() - 1
    }

    pub fn min(&self) -> BigInt {
        if self.signed {
            -(BigInt::one() << (self.bits - 1))
        } else {
            BigInt::zero()
        }
    }

    pub fn max(&self) -> BigInt {
        if self.signed {
            (BigInt::one() << (self.bits - 1)) - 1
        } else {
            self.mask()
        }
    }

    pub fn in_range(&self, v: &BigInt) -> bool {
        *v >= self.min() && *v <= self.max()
    }

    /// The unsigned bit pattern of `v` (its low `bits` bits).
    pub fn pattern(&self, v: &BigInt) -> BigInt {
        v & self.mask()
    }

    /// Interpret a bit pattern as a value of this word.
    pub fn from_pattern(&self, pattern: &BigInt) -> BigInt {
        let p = pattern & self.mask();
        if self.signed && p.bit(u64::from(self.bits - 1)) {
            p - self.modulus()
        } else {
            p
        }
    }
}

/// Wrap `v` into the word and compute the resulting flags.
///
/// `bits == 0` means unbounded: the value is returned unchanged with carry
/// and overflow cleared.
pub fn emulate(v: &BigInt, bits: u32, signed: bool) -> (BigInt, Flags) {
    if bits == 0 {
        return (v.clone(), Flags::from_sign(v.is_zero(), v.is_negative()));
    }
    let word = WordSpec::new(bits, signed);
    let out_of_range = !word.in_range(v);
    let wrapped = if out_of_range {
        word.from_pattern(&word.pattern(v))
    } else {
        v.clone()
    };
    let flags = Flags {
        zero: wrapped.is_zero(),
        sign: wrapped.is_negative(),
        carry: out_of_range && !signed,
        overflow: out_of_range && signed,
    };
    (wrapped, flags)
}
