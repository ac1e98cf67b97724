//! Bitwise operations on integers.
//!
//! - AND, OR, XOR, NOT - bitwise logic
//! - SHL, SHR - shifts
//!
//! With a fixed word size the operands are taken as their W-bit patterns and
//! the result pattern is read back as a word of the configured signedness.
//! Without one, negative integers behave as infinite two's complement.
//! Floats are never converted to integers for these operations.

use num_bigint::BigInt;
use rpn_core::fixed::WordSpec;
use rpn_core::{CalcError, CalcResult};
use rpn_vm::{NumericEnv, Operand, TypeRules};

use crate::common::{self, no_units, plain};

/// Largest accepted shift distance.
pub const MAX_SHIFT: usize = 1 << 20;

fn word(env: &NumericEnv) -> Option<WordSpec> {
    (env.fixed_bits > 0).then(|| WordSpec::new(env.fixed_bits, env.is_signed))
}

fn bitwise(
    op: &str,
    env: &NumericEnv,
    a: &Operand,
    b: &Operand,
    f: impl Fn(&BigInt, &BigInt) -> BigInt,
) -> CalcResult<Operand> {
    no_units(op, &[a, b])?;
    let (x, y) = (common::integer(op, a)?, common::integer(op, b)?);
    let result = match word(env) {
        Some(w) => w.from_pattern(&f(&w.pattern(x), &w.pattern(y))),
        None => f(x, y),
    };
    plain(result)
}

fn shift_distance(op: &str, b: &Operand) -> CalcResult<usize> {
    let n = b.value.to_index("shift")?;
    if n > MAX_SHIFT {
        return Err(CalcError::invalid(format!("{}: shift {} exceeds {}", op, n, MAX_SHIFT)));
    }
    Ok(n)
}

define_operations! {
    And ("and", 2 -> 1) [
        brief: "Bitwise AND",
        stack: "( a b -- a&b )",
        example: "#FF #0F and",
        see_also: ["or", "xor"],
    ] |calc| {
        calc.two_arg("and", &TypeRules::BINARY_INTEGER, |env, a, b| {
            bitwise("and", env, a, b, |x, y| x & y)
        })
    }

    Or ("or", 2 -> 1) [
        brief: "Bitwise OR",
        stack: "( a b -- a|b )",
        example: "#F0 #0F or",
        see_also: ["and", "xor"],
    ] |calc| {
        calc.two_arg("or", &TypeRules::BINARY_INTEGER, |env, a, b| {
            bitwise("or", env, a, b, |x, y| x | y)
        })
    }

    Xor ("xor", 2 -> 1) [
        brief: "Bitwise exclusive OR",
        stack: "( a b -- a^b )",
        example: "#FF #F0 xor",
        see_also: ["and", "or"],
    ] |calc| {
        calc.two_arg("xor", &TypeRules::BINARY_INTEGER, |env, a, b| {
            bitwise("xor", env, a, b, |x, y| x ^ y)
        })
    }

    Not ("not", 1 -> 1) [
        brief: "Bitwise NOT (respects word size)",
        stack: "( a -- ~a )",
        example: "#FF not",
        see_also: ["and", "bits"],
    ] |calc| {
        calc.one_arg("not", &TypeRules::UNARY_INTEGER, |env, a| {
            no_units("not", &[a])?;
            let x = common::integer("not", a)?;
            let result = match word(env) {
                Some(w) => w.from_pattern(&(w.mask() ^ w.pattern(x))),
                None => -x - 1,
            };
            plain(result)
        })
    }

    Shl ("shl", 2 -> 1) [
        aliases: ["sl"],
        brief: "Shift left; bits leaving the word set carry or overflow",
        stack: "( a n -- a<<n )",
        example: "1 4 shl",
        see_also: ["shr"],
    ] |calc| {
        calc.two_arg("shl", &TypeRules::BINARY_INTEGER, |_, a, n| {
            no_units("shl", &[a, n])?;
            let shift = shift_distance("shl", n)?;
            plain(common::integer("shl", a)? << shift)
        })
    }

    Shr ("shr", 2 -> 1) [
        aliases: ["sr"],
        brief: "Shift right; arithmetic for signed words",
        stack: "( a n -- a>>n )",
        example: "16 4 shr",
        see_also: ["shl"],
    ] |calc| {
        calc.two_arg("shr", &TypeRules::BINARY_INTEGER, |env, a, n| {
            no_units("shr", &[a, n])?;
            let shift = shift_distance("shr", n)?;
            let x = common::integer("shr", a)?;
            let result = match word(env) {
                Some(w) if !w.signed => w.pattern(x) >> shift,
                _ => x >> shift,
            };
            plain(result)
        })
    }
}
