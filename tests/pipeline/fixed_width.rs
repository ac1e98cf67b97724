//! Fixed-width integer emulation and execution flags.

use pretty_assertions::assert_eq;
use rpn::{Flags, Session};

use super::{exec, int};

fn session(line: &str) -> Session {
    let mut session = Session::new();
    exec(&mut session, line).unwrap_or_else(|e| panic!("'{}' failed: {}", line, e));
    session
}

#[test]
fn signed_byte_wraps_with_overflow() {
    let s = session("8 bits signed 200");
    assert_eq!(s.values(), vec![int(-56)]);
    assert_eq!(
        s.flags(),
        Flags {
            zero: false,
            carry: false,
            overflow: true,
            sign: true,
        }
    );
}

#[test]
fn unsigned_byte_wraps_with_carry() {
    let s = session("8 bits unsigned 300");
    assert_eq!(s.values(), vec![int(44)]);
    assert!(s.flags().carry);
    assert!(!s.flags().sign);
}

#[test]
fn arithmetic_results_wrap_at_store() {
    let s = session("8 bits unsigned 250 10 +");
    assert_eq!(s.values(), vec![int(4)]);
    assert!(s.flags().carry);

    let s = session("8 bits signed 127 1 +");
    assert_eq!(s.values(), vec![int(-128)]);
    assert!(s.flags().overflow);
}

#[test]
fn flags_are_readable_from_the_stack() {
    let s = session("8 bits signed 127 1 + of");
    assert_eq!(s.values(), vec![int(-128), int(1)]);

    let s = session("5 5 - zf");
    assert_eq!(s.values(), vec![int(0), int(1)]);
}

#[test]
fn entries_keep_their_width() {
    let s = session("300 8 bits unsigned 300");
    assert_eq!(s.values(), vec![int(300), int(44)]);
}

#[test]
fn bitwise_operators_use_the_word() {
    let s = session("8 bits unsigned 5 not");
    assert_eq!(s.values(), vec![int(250)]);

    let s = session("8 bits unsigned 129 1 shl");
    assert_eq!(s.values(), vec![int(2)]);
    assert!(s.flags().carry);
}

#[test]
fn unbounded_mode_has_no_wrap() {
    let s = session("8 bits 0 bits 300");
    assert_eq!(s.values(), vec![int(300)]);
    assert!(!s.flags().carry);
    assert!(!s.flags().overflow);
}
