//! Matrices, lists and aggregates.

use pretty_assertions::assert_eq;
use rpn::{ErrorKind, Instruction, Session, Value};
use rpn_core::{List, Matrix};

use super::{exec, int, rat};

fn matrix(rows: &[&[i64]]) -> Value {
    Value::Matrix(
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().copied().map(Value::integer).collect())
                .collect(),
        )
        .unwrap(),
    )
}

fn push_matrix(session: &mut Session, rows: &[&[i64]]) {
    let rows = rows
        .iter()
        .map(|r| r.iter().copied().map(Value::integer).collect())
        .collect();
    session.run_one(&Instruction::Matrix(rows)).unwrap();
}

fn list(items: Vec<Value>) -> Value {
    Value::List(List::new(items, 32).unwrap())
}

#[test]
fn determinant_and_inverse() {
    let mut session = Session::new();
    push_matrix(&mut session, &[&[4, 7], &[2, 6]]);
    exec(&mut session, "dup det swap inv").unwrap();
    let values = session.values();
    assert_eq!(values[0], int(10));
    let expected = Value::Matrix(
        Matrix::from_rows(vec![
            vec![rat(3, 5), rat(-7, 10)],
            vec![rat(-1, 5), rat(2, 5)],
        ])
        .unwrap(),
    );
    assert_eq!(values[1], expected);
}

#[test]
fn singular_matrix_has_no_inverse() {
    let mut session = Session::new();
    push_matrix(&mut session, &[&[1, 2], &[2, 4]]);
    let err = exec(&mut session, "inv").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(session.values(), vec![matrix(&[&[1, 2], &[2, 4]])]);
}

#[test]
fn matrix_product_checks_shapes() {
    let mut session = Session::new();
    push_matrix(&mut session, &[&[1, 2]]);
    push_matrix(&mut session, &[&[3], &[4]]);
    exec(&mut session, "*").unwrap();
    assert_eq!(session.values(), vec![matrix(&[&[11]])]);

    push_matrix(&mut session, &[&[1], &[2]]);
    assert!(exec(&mut session, "*").is_err());
    assert_eq!(session.depth(), 2);
}

#[test]
fn identity_and_transpose() {
    let mut session = Session::new();
    exec(&mut session, "2 idn").unwrap();
    push_matrix(&mut session, &[&[1, 2], &[3, 4]]);
    exec(&mut session, "trn *").unwrap();
    assert_eq!(session.values(), vec![matrix(&[&[1, 3], &[2, 4]])]);
}

#[test]
fn lists_broadcast_scalars() {
    let mut session = Session::new();
    session
        .run_one(&Instruction::List(vec![int(1), int(2), int(3)]))
        .unwrap();
    exec(&mut session, "10 *").unwrap();
    assert_eq!(session.values(), vec![list(vec![int(10), int(20), int(30)])]);
}

#[test]
fn collect_and_explode() {
    let mut session = Session::new();
    exec(&mut session, "4 5 6 3 ->list").unwrap();
    assert_eq!(session.values(), vec![list(vec![int(4), int(5), int(6)])]);
    exec(&mut session, "list-> drop +").unwrap();
    assert_eq!(session.values(), vec![int(4), int(11)]);
}

#[test]
fn sums_and_products_of_top_n() {
    let mut session = Session::new();
    exec(&mut session, "1 2 3 4 3 sum").unwrap();
    assert_eq!(session.values(), vec![int(1), int(9)]);
    exec(&mut session, "2 product").unwrap();
    assert_eq!(session.values(), vec![int(9)]);
}

#[test]
fn aggregate_count_must_be_available() {
    let mut session = Session::new();
    exec(&mut session, "1 2 5").unwrap();
    let err = exec(&mut session, "sum").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientArguments);
    assert_eq!(session.values(), vec![int(1), int(2), int(5)]);
}

#[test]
fn size_of_values() {
    let mut session = Session::new();
    push_matrix(&mut session, &[&[1, 2, 3], &[4, 5, 6]]);
    exec(&mut session, "size").unwrap();
    assert_eq!(session.values(), vec![list(vec![int(2), int(3)])]);
}
