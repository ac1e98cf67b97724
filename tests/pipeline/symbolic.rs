//! Variables, deferred expressions and function references.

use pretty_assertions::assert_eq;
use rpn::{ErrorKind, Instruction, Kind, Session};

use super::{eval_err, eval_to_display, eval_to_values, exec, int};

#[test]
fn unbound_names_build_expressions() {
    assert_eq!(eval_to_display("'X' 1 +"), vec!["'X+1'"]);
    assert_eq!(eval_to_values("'X' 2 * sin")[0].kind(), Kind::Symbolic);
}

#[test]
fn stored_variables_push_their_value() {
    let mut session = Session::new();
    exec(&mut session, "6 'x' sto x x *").unwrap();
    assert_eq!(session.values(), vec![int(36)]);
}

#[test]
fn eval_substitutes_later_bindings() {
    let mut session = Session::new();
    exec(&mut session, "'X' 'X' * 1 +").unwrap();
    exec(&mut session, "3 'X' sto eval").unwrap();
    assert_eq!(session.values(), vec![int(10)]);
}

#[test]
fn stored_units_travel_with_the_value() {
    assert_eq!(eval_to_display("2_m 'len' sto len len *"), vec!["4_m^2"]);
}

#[test]
fn purge_and_recall() {
    let mut session = Session::new();
    exec(&mut session, "1 'y' sto 'y' rcl 'y' purge").unwrap();
    assert_eq!(session.values(), vec![int(1)]);
    let err = exec(&mut session, "'y' rcl").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[test]
fn operation_names_are_reserved() {
    let (err, session) = eval_err("1 'swap' sto");
    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(session.depth(), 2);
}

#[test]
fn function_references_execute_on_demand() {
    let mut session = Session::new();
    exec(&mut session, "3 4").unwrap();
    session
        .run_one(&Instruction::FunctionRef("*".to_string()))
        .unwrap();
    assert_eq!(session.depth(), 3);
    exec(&mut session, "execute").unwrap();
    assert_eq!(session.values(), vec![int(12)]);
}

#[test]
fn programs_run_in_their_own_scope() {
    let mut session = Session::new();
    let body = super::tokens("5 't' sto t t +", 32);
    session.run_one(&Instruction::Program(body)).unwrap();
    assert_eq!(session.values(), vec![int(10)]);
    assert!(session.calculator().scopes().get("t").is_none());
}

#[test]
fn programs_are_one_undo_step() {
    let mut session = Session::new();
    let body = super::tokens("1 2 3 + +", 32);
    session.run_one(&Instruction::Program(body)).unwrap();
    assert_eq!(session.values(), vec![int(6)]);
    session.undo().unwrap();
    assert!(session.values().is_empty());
}
