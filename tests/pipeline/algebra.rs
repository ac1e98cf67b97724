//! Number theory and exact conversions.

use pretty_assertions::assert_eq;
use rpn::{ErrorKind, Kind};

use super::{eval_err, eval_to_display, eval_to_values, int, rat};

#[test]
fn modular_inverse() {
    assert_eq!(eval_to_values("3 11 modinv"), vec![int(4)]);
    assert_eq!(eval_to_values("3 11 modinv 3 * 11 mod"), vec![int(1)]);

    let (err, session) = eval_err("2 4 modinv");
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(session.values(), vec![int(2), int(4)]);
}

#[test]
fn modular_power() {
    assert_eq!(eval_to_values("4 13 497 modpow"), vec![int(445)]);
}

#[test]
fn factorial_is_exact() {
    let values = eval_to_values("25 fact");
    assert_eq!(values[0].to_string(), "15511210043330985984000000");
}

#[test]
fn combinatorics() {
    assert_eq!(eval_to_values("52 5 comb"), vec![int(2_598_960)]);
    assert_eq!(eval_to_values("12 18 gcd 4 6 lcm"), vec![int(6), int(12)]);
}

#[test]
fn float_to_fraction_and_back() {
    assert_eq!(eval_to_values("0.125 ->q"), vec![rat(1, 8)]);
    assert_eq!(eval_to_display("0.125 ->q ->f"), vec!["0.125"]);
}

#[test]
fn fraction_parts() {
    assert_eq!(eval_to_values("-7 2 / ip"), vec![int(-3)]);
    assert_eq!(eval_to_values("-7 2 / fp"), vec![rat(-1, 2)]);
    assert_eq!(eval_to_values("-6 8 / num"), vec![int(-3)]);
    assert_eq!(eval_to_values("-6 8 / den"), vec![int(4)]);
}

#[test]
fn exact_results_reduce() {
    let values = eval_to_values("1 4 / 3 4 / +");
    assert_eq!(values, vec![int(1)]);
    assert_eq!(values[0].kind(), Kind::Integer);
}
