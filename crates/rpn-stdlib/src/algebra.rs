//! Algebra building blocks on exact integers.
//!
//! - GCD, LCM
//! - MODINV (extended Euclid), MODPOW (square-and-multiply with reduction)
//! - FACT, COMB, PERM via factorial ratios
//! - NUM, DEN of exact values

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rpn_core::{CalcError, CalcResult, Kind, KindSet, Value};
use rpn_vm::{Conversion, Operand, TypeRules};

use crate::common::{self, no_units, plain};

/// Largest argument accepted by FACT, COMB and PERM.
pub const MAX_FACTORIAL: u64 = 100_000;

const TERNARY_INTEGER: TypeRules = TypeRules {
    identity: &[&[KindSet::INTEGER, KindSet::INTEGER, KindSet::INTEGER]],
    ..TypeRules::BINARY_INTEGER.strict()
};

const EXACT_PARTS: TypeRules = TypeRules {
    identity: &[&[KindSet::EXACT]],
    limited: Some(KindSet::REAL),
    conversions: &[Conversion {
        from: KindSet::REAL,
        to: Kind::Rational,
    }],
    broadcast: true,
    symbolic: false,
};

/// Extended Euclid: returns `(g, x)` with `a*x ≡ g (mod b)`.
fn extended_euclid(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    (old_r, old_s)
}

/// Modular inverse of `a` modulo `m`, in `[0, |m|)`.
pub fn modinv(a: &BigInt, m: &BigInt) -> CalcResult<BigInt> {
    if m.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    let m = m.abs();
    let (g, x) = extended_euclid(&a.mod_floor(&m), &m);
    if !g.is_one() {
        return Err(CalcError::domain(format!(
            "modinv: gcd({}, {}) = {}, no inverse",
            a, m, g
        )));
    }
    Ok(x.mod_floor(&m))
}

/// `base^exp mod m`, reducing after every step. Negative exponents use the
/// modular inverse of the base.
pub fn modpow(base: &BigInt, exp: &BigInt, m: &BigInt) -> CalcResult<BigInt> {
    if m.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    let m = m.abs();
    let (mut square, mut e) = if exp.is_negative() {
        (modinv(base, &m)?, -exp)
    } else {
        (base.mod_floor(&m), exp.clone())
    };
    let mut result = BigInt::one().mod_floor(&m);
    while e.is_positive() {
        if e.is_odd() {
            result = (&result * &square).mod_floor(&m);
        }
        e >>= 1u32;
        if e.is_positive() {
            square = (&square * &square).mod_floor(&m);
        }
    }
    Ok(result)
}

fn small_arg(op: &str, n: &BigInt) -> CalcResult<u64> {
    if n.is_negative() {
        return Err(CalcError::domain(format!("{}: negative argument {}", op, n)));
    }
    n.to_u64()
        .filter(|n| *n <= MAX_FACTORIAL)
        .ok_or_else(|| CalcError::invalid(format!("{}: {} is larger than {}", op, n, MAX_FACTORIAL)))
}

/// Product of the integers in `lo..=hi`.
fn range_product(lo: u64, hi: u64) -> BigInt {
    (lo..=hi).fold(BigInt::one(), |acc, k| acc * k)
}

pub fn factorial(n: u64) -> BigInt {
    range_product(1, n)
}

/// `n! / (n-k)!`
pub fn permutations(n: u64, k: u64) -> CalcResult<BigInt> {
    if k > n {
        return Err(CalcError::domain(format!("perm: {} > {}", k, n)));
    }
    Ok(range_product(n - k + 1, n))
}

/// `n! / (k! (n-k)!)`
pub fn combinations(n: u64, k: u64) -> CalcResult<BigInt> {
    if k > n {
        return Err(CalcError::domain(format!("comb: {} > {}", k, n)));
    }
    let k = k.min(n - k);
    Ok(permutations(n, k)? / factorial(k))
}

fn integers<'a>(op: &str, a: &'a Operand, b: &'a Operand) -> CalcResult<(&'a BigInt, &'a BigInt)> {
    no_units(op, &[a, b])?;
    Ok((common::integer(op, a)?, common::integer(op, b)?))
}

fn exact_parts(value: &Value) -> CalcResult<(BigInt, BigInt)> {
    match value {
        Value::Integer(n) => Ok((n.clone(), BigInt::one())),
        Value::Rational(r) => Ok((r.numer().clone(), r.denom().clone())),
        other => Err(CalcError::mismatch("num", other.kind().name())),
    }
}

define_operations! {
    Gcd ("gcd", 2 -> 1) [
        brief: "Greatest common divisor",
        stack: "( a b -- gcd )",
        example: "12 18 gcd",
        see_also: ["lcm"],
    ] |calc| {
        calc.two_arg("gcd", &TypeRules::BINARY_INTEGER, |_, a, b| {
            let (a, b) = integers("gcd", a, b)?;
            plain(a.gcd(b))
        })
    }

    Lcm ("lcm", 2 -> 1) [
        brief: "Least common multiple",
        stack: "( a b -- lcm )",
        example: "4 6 lcm",
        see_also: ["gcd"],
    ] |calc| {
        calc.two_arg("lcm", &TypeRules::BINARY_INTEGER, |_, a, b| {
            let (a, b) = integers("lcm", a, b)?;
            plain(a.lcm(b))
        })
    }

    ModInv ("modinv", 2 -> 1) [
        brief: "Modular inverse; fails unless gcd(a, m) = 1",
        stack: "( a m -- a⁻¹ mod m )",
        example: "3 11 modinv",
        see_also: ["modpow", "gcd"],
    ] |calc| {
        calc.two_arg("modinv", &TypeRules::BINARY_INTEGER, |_, a, m| {
            let (a, m) = integers("modinv", a, m)?;
            plain(modinv(a, m)?)
        })
    }

    ModPow ("modpow", 3 -> 1) [
        brief: "Modular exponentiation",
        stack: "( base exp m -- base^exp mod m )",
        example: "4 13 497 modpow",
        see_also: ["modinv", "^"],
    ] |calc| {
        calc.three_arg("modpow", &TERNARY_INTEGER, |_, b, e, m| {
            no_units("modpow", &[b, e, m])?;
            let r = modpow(
                common::integer("modpow", b)?,
                common::integer("modpow", e)?,
                common::integer("modpow", m)?,
            )?;
            plain(r)
        })
    }

    Fact ("fact", 1 -> 1) [
        aliases: ["!"],
        brief: "Factorial",
        stack: "( n -- n! )",
        example: "5 fact",
        see_also: ["comb", "perm"],
    ] |calc| {
        calc.one_arg("fact", &TypeRules::UNARY_INTEGER, |_, n| {
            no_units("fact", &[n])?;
            plain(factorial(small_arg("fact", common::integer("fact", n)?)?))
        })
    }

    Comb ("comb", 2 -> 1) [
        brief: "Combinations of k out of n",
        stack: "( n k -- C(n,k) )",
        example: "5 2 comb",
        see_also: ["perm", "fact"],
    ] |calc| {
        calc.two_arg("comb", &TypeRules::BINARY_INTEGER, |_, n, k| {
            let (n, k) = integers("comb", n, k)?;
            plain(combinations(small_arg("comb", n)?, small_arg("comb", k)?)?)
        })
    }

    Perm ("perm", 2 -> 1) [
        brief: "Ordered arrangements of k out of n",
        stack: "( n k -- P(n,k) )",
        example: "5 2 perm",
        see_also: ["comb", "fact"],
    ] |calc| {
        calc.two_arg("perm", &TypeRules::BINARY_INTEGER, |_, n, k| {
            let (n, k) = integers("perm", n, k)?;
            plain(permutations(small_arg("perm", n)?, small_arg("perm", k)?)?)
        })
    }

    Num ("num", 1 -> 1) [
        brief: "Numerator of an exact value",
        stack: "( a/b -- a )",
        example: "3 4 / num",
        see_also: ["den", "->q"],
    ] |calc| {
        calc.one_arg("num", &EXACT_PARTS, |_, x| {
            let (num, _) = exact_parts(&x.value)?;
            plain(num)
        })
    }

    Den ("den", 1 -> 1) [
        brief: "Denominator of an exact value",
        stack: "( a/b -- b )",
        example: "3 4 / den",
        see_also: ["num", "->q"],
    ] |calc| {
        calc.one_arg("den", &EXACT_PARTS, |_, x| {
            let (_, den) = exact_parts(&x.value)?;
            plain(den)
        })
    }
}
