//! Arithmetic across the numeric kinds.

use pretty_assertions::assert_eq;
use rpn::{ErrorKind, Kind, Session};

use super::{eval_err, eval_to_display, eval_to_values, exec, int, rat};

#[test]
fn exact_division_stays_exact() {
    assert_eq!(eval_to_values("6 3 /"), vec![int(2)]);
    assert_eq!(eval_to_values("1 3 /"), vec![rat(1, 3)]);
    assert_eq!(eval_to_values("1 3 / 3 *"), vec![int(1)]);
}

#[test]
fn third_as_float_at_eight_digits() {
    let mut session = Session::new();
    exec(&mut session, "8 prec 1 3 / ->f").unwrap();
    assert_eq!(session.display(), vec!["0.33333333"]);
}

#[test]
fn kinds_widen_along_the_lattice() {
    let values = eval_to_values("1 2 / 0.5 +");
    assert_eq!(values[0].kind(), Kind::Float);

    let values = eval_to_values("-4 sqrt 1 +");
    assert_eq!(values[0].kind(), Kind::Complex);
}

#[test]
fn rational_display_modes() {
    assert_eq!(eval_to_display("7 2 /"), vec!["7/2"]);
    assert_eq!(eval_to_display("mixed 7 2 /"), vec!["3 1/2"]);
}

#[test]
fn integers_are_unbounded_by_default() {
    let values = eval_to_values("2 100 ^ 1 -");
    assert_eq!(values[0].to_string(), "1267650600228229401496703205375");
}

#[test]
fn chained_computation() {
    // (3 + 4) * 2 - 10 / 4
    assert_eq!(eval_to_values("3 4 + 2 * 10 4 / -"), vec![rat(23, 2)]);
}

#[test]
fn floor_modulo_and_integer_division() {
    assert_eq!(eval_to_values("-7 3 mod"), vec![int(2)]);
    assert_eq!(eval_to_values("-7 2 idiv"), vec![int(-4)]);
}

#[test]
fn comparisons_push_truth_values() {
    assert_eq!(eval_to_values("1 2 / 0.5 =="), vec![int(1)]);
    assert_eq!(eval_to_values("3 2 <"), vec![int(0)]);
}

#[test]
fn hexadecimal_display() {
    let mut session = Session::new();
    exec(&mut session, "hex 255 dec 255").unwrap();
    assert_eq!(session.display(), vec!["0xFF", "255"]);
}

#[test]
fn oversized_powers_fail_cleanly() {
    let (err, session) = eval_err("2 1000000000000 ^");
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(session.values(), vec![int(2), int(1_000_000_000_000)]);
    assert_eq!(eval_to_values("-1 1000000000001 ^"), vec![int(-1)]);
}

#[test]
fn huge_floats_round_to_themselves() {
    let mut session = Session::new();
    exec(&mut session, "1.0e100000000 floor").unwrap();
    assert_eq!(session.values()[0].kind(), Kind::Float);
    let err = exec(&mut session, "->q").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(session.depth(), 1);
}
