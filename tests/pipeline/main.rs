//! End-to-end execution tests.
//!
//! These tests drive a [`Session`] with instruction streams the way an
//! embedding front end would. Tests are organized into modules by
//! functionality.

use rpn::{CalcError, Instruction, Session, Unit, Value};

mod algebra;
mod arithmetic;
mod dispatch_atomicity;
mod fixed_width;
mod matrices_lists;
mod symbolic;
mod undo;
mod units;

// ============================================================================
// Test Helpers
// ============================================================================

/// Turn a whitespace-separated line into instructions.
///
/// Integers and decimals become numbers, `3_m` attaches a base unit,
/// `'X'` pushes a symbolic name and everything else is a keyword.
pub fn tokens(line: &str, precision: u32) -> Vec<Instruction> {
    line.split_whitespace()
        .map(|token| {
            if let Some(name) = token.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
                return Instruction::number(Value::var(name));
            }
            let (number, unit) = match token.split_once('_') {
                Some((n, u)) if !n.is_empty() => (n, Unit::base(u)),
                _ => (token, Unit::none()),
            };
            if let Some(value) = number_literal(number, precision) {
                return Instruction::with_unit(value, unit);
            }
            Instruction::keyword(token)
        })
        .collect()
}

fn number_literal(text: &str, precision: u32) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::integer(n));
    }
    let numeric = text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.')
        && text.contains('.')
        && text.len() > 1;
    if numeric {
        return Value::float(text, precision).ok();
    }
    None
}

/// Run a line on the session, stopping at the first error.
pub fn exec(session: &mut Session, line: &str) -> Result<(), CalcError> {
    let precision = session.config().precision;
    for instruction in tokens(line, precision) {
        session.run_one(&instruction)?;
    }
    Ok(())
}

/// Evaluate a line on a fresh session and return the stack.
pub fn eval_to_values(line: &str) -> Vec<Value> {
    let mut session = Session::new();
    exec(&mut session, line).unwrap_or_else(|e| panic!("eval failed for '{}': {}", line, e));
    session.values()
}

/// Evaluate a line on a fresh session and return the displayed stack.
pub fn eval_to_display(line: &str) -> Vec<String> {
    let mut session = Session::new();
    exec(&mut session, line).unwrap_or_else(|e| panic!("eval failed for '{}': {}", line, e));
    session.display()
}

/// Evaluate a line that is expected to fail, returning the error and the
/// session so the stack can be inspected.
pub fn eval_err(line: &str) -> (CalcError, Session) {
    let mut session = Session::new();
    match exec(&mut session, line) {
        Ok(()) => panic!("expected '{}' to fail, stack: {:?}", line, session.display()),
        Err(e) => (e, session),
    }
}

pub fn int(n: i64) -> Value {
    Value::integer(n)
}

pub fn rat(n: i64, d: i64) -> Value {
    Value::rational(n, d).unwrap()
}

#[test]
fn tokenizer_recognizes_literals() {
    let instructions = tokens("1 2.5 'X' 3_m +", 32);
    assert_eq!(instructions.len(), 5);
    assert_eq!(instructions[0], Instruction::number(1i64));
    assert_eq!(instructions[2], Instruction::number(Value::var("X")));
    assert_eq!(
        instructions[3],
        Instruction::with_unit(Value::integer(3), Unit::base("m"))
    );
    assert_eq!(instructions[4], Instruction::keyword("+"));
}
