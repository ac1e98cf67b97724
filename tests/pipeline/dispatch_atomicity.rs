//! Failed operations leave the stack exactly as it was.

use pretty_assertions::assert_eq;
use rpn::{ErrorKind, Instruction, Session, Value};

use super::{eval_err, exec, int, rat};

fn assert_unchanged(line: &str, kind: ErrorKind, expected: Vec<Value>) {
    let (err, session) = eval_err(line);
    assert_eq!(err.kind(), kind, "error kind for '{}'", line);
    assert_eq!(session.values(), expected, "stack after '{}'", line);
}

#[test]
fn insufficient_arguments() {
    assert_unchanged("1 +", ErrorKind::InsufficientArguments, vec![int(1)]);
    assert_unchanged("drop", ErrorKind::InsufficientArguments, vec![]);
    assert_unchanged("1 2 modpow", ErrorKind::InsufficientArguments, vec![int(1), int(2)]);
}

#[test]
fn domain_errors() {
    assert_unchanged("7 1 0 /", ErrorKind::Domain, vec![int(7), int(1), int(0)]);
    assert_unchanged("2 4 modinv", ErrorKind::Domain, vec![int(2), int(4)]);
    assert_unchanged("-3 fact", ErrorKind::Domain, vec![int(-3)]);
}

#[test]
fn type_mismatches() {
    assert_unchanged("1.5 2 and", ErrorKind::TypeMismatch, vec![
        Value::float("1.5", rpn_core::value::DEFAULT_DIGITS).unwrap(),
        int(2),
    ]);
    assert_unchanged("1 2 / 3 gcd", ErrorKind::TypeMismatch, vec![rat(1, 2), int(3)]);
}

#[test]
fn unknown_keywords_are_reported() {
    assert_unchanged("1 frobnicate", ErrorKind::Other, vec![int(1)]);
}

#[test]
fn aggregate_failure_restores_operands() {
    // the third element is a matrix, which cannot be added to integers
    let mut session = Session::new();
    exec(&mut session, "1 2").unwrap();
    session
        .run_one(&Instruction::Matrix(vec![vec![int(1)]]))
        .unwrap();
    let before = session.values();
    exec(&mut session, "3").unwrap();
    let err = session.run_one(&Instruction::keyword("sum")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    let mut expected = before;
    expected.push(int(3));
    assert_eq!(session.values(), expected);
}

#[test]
fn run_continues_after_errors() {
    let mut session = Session::new();
    let errors = session.run(&super::tokens("1 + 2 3 +", 32));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::InsufficientArguments);
    assert_eq!(session.values(), vec![int(1), int(5)]);
}

#[test]
fn failed_instruction_keeps_flags() {
    let mut session = Session::new();
    exec(&mut session, "8 bits unsigned 300").unwrap();
    assert!(session.flags().carry);
    assert!(exec(&mut session, "+").is_err());
    assert!(session.flags().carry);
}
