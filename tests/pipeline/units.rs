//! Unit propagation through operations.

use pretty_assertions::assert_eq;
use rpn::{ErrorKind, Unit};

use super::{eval_err, eval_to_display, int};

#[test]
fn multiplication_combines_units() {
    let mut session = rpn::Session::new();
    super::exec(&mut session, "3_m 4_s *").unwrap();
    assert_eq!(session.values(), vec![int(12)]);
    assert_eq!(
        session.entries()[0].unit(),
        &Unit::base("m").mul(&Unit::base("s"))
    );
}

#[test]
fn division_cancels_units() {
    assert_eq!(eval_to_display("6_m 2_m /"), vec!["3"]);
    assert_eq!(eval_to_display("6_m 2_s /"), vec!["3_m*s^-1"]);
}

#[test]
fn addition_requires_matching_units() {
    assert_eq!(eval_to_display("1_m 2_m +"), vec!["3_m"]);

    let (err, session) = eval_err("1_m 2_s +");
    assert_eq!(err.kind(), ErrorKind::Units);
    assert_eq!(session.display(), vec!["1_m", "2_s"]);
}

#[test]
fn powers_and_roots() {
    assert_eq!(eval_to_display("3_m 2 ^"), vec!["9_m^2"]);
    assert_eq!(eval_to_display("3_m 2 ^ sqrt"), vec!["3_m"]);

    let (err, _) = eval_err("2_m sqrt");
    assert_eq!(err.kind(), ErrorKind::Units);
}

#[test]
fn prohibited_units() {
    let (err, session) = eval_err("1_m sin");
    assert_eq!(err.kind(), ErrorKind::Units);
    assert_eq!(session.depth(), 1);

    let (err, _) = eval_err("5_m fact");
    assert_eq!(err.kind(), ErrorKind::Units);
}

#[test]
fn stack_operations_keep_units() {
    assert_eq!(eval_to_display("1_m 2 swap"), vec!["2", "1_m"]);
    assert_eq!(eval_to_display("5_s dup +"), vec!["10_s"]);
}
