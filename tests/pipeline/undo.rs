//! Undo history.

use pretty_assertions::assert_eq;
use rpn::{Config, ErrorKind, Session};

use super::{exec, int};

#[test]
fn undo_restores_previous_stack() {
    let mut session = Session::new();
    exec(&mut session, "1 2 +").unwrap();
    assert_eq!(session.values(), vec![int(3)]);
    session.undo().unwrap();
    assert_eq!(session.values(), vec![int(1), int(2)]);
    session.undo().unwrap();
    assert_eq!(session.values(), vec![int(1)]);
}

#[test]
fn undo_keyword() {
    let mut session = Session::new();
    exec(&mut session, "5 dup * undo").unwrap();
    assert_eq!(session.values(), vec![int(5), int(5)]);
}

#[test]
fn empty_history_is_an_error() {
    let mut session = Session::new();
    let err = session.undo().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[test]
fn failures_do_not_record_snapshots() {
    let mut session = Session::new();
    exec(&mut session, "1").unwrap();
    assert!(exec(&mut session, "+").is_err());
    assert_eq!(session.calculator().history().len(), 1);
    session.undo().unwrap();
    assert!(session.values().is_empty());
}

#[test]
fn mode_switches_are_not_undone() {
    let mut session = Session::new();
    exec(&mut session, "7 hex deg").unwrap();
    assert_eq!(session.calculator().history().len(), 1);
    session.undo().unwrap();
    assert!(session.values().is_empty());
    assert_eq!(session.config().base, 16);
}

#[test]
fn history_depth_is_bounded() {
    let config = Config {
        undo_depth: 2,
        ..Config::default()
    };
    let mut session = Session::with_config(config);
    exec(&mut session, "1 2 3 4").unwrap();
    assert_eq!(session.calculator().history().len(), 2);
    session.undo().unwrap();
    session.undo().unwrap();
    assert_eq!(session.values(), vec![int(1), int(2)]);
    assert!(session.undo().is_err());
}

#[test]
fn undo_restores_entry_metadata() {
    let mut session = Session::new();
    exec(&mut session, "hex 8 bits unsigned 5_m 7_m").unwrap();
    let before = session.entries().to_vec();
    exec(&mut session, "dec 16 bits signed +").unwrap();
    assert_eq!(session.entries()[0].format().base, 10);

    session.undo().unwrap();
    assert_eq!(session.entries(), before.as_slice());
    let top = &session.entries()[1];
    assert_eq!(top.unit().to_string(), "m");
    assert_eq!(top.format().base, 16);
    assert_eq!(top.format().fixed_bits, 8);
    assert!(!top.format().is_signed);
    assert_eq!(session.config().base, 10);
}
