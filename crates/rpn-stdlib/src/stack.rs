//! Stack manipulation.
//!
//! Entries move with their units and display metadata intact. After every
//! structural change the execution flags follow the new top entry.

use rpn_core::{CalcError, CalcResult, Flags, Value};
use rpn_vm::{Calculator, Stack, StackError};

fn restack(calc: &mut Calculator, f: impl FnOnce(&mut Stack) -> Result<(), StackError>) -> CalcResult<()> {
    f(calc.stack_mut())?;
    let flags = calc.stack().peek(0).map(|e| e.flags()).unwrap_or_default();
    calc.set_flags(flags);
    Ok(())
}

/// Read the level number on top of the stack and check that that many
/// entries sit below it.
fn level(calc: &Calculator, op: &str) -> CalcResult<usize> {
    let n = calc.stack().peek(0)?.value().to_index("level")?;
    if n == 0 {
        return Err(CalcError::Stack(format!("{}: level must be at least 1", op)));
    }
    calc.check_args(op, n + 1)?;
    Ok(n)
}

define_operations! {
    Dup ("dup", 1 -> 2) [
        brief: "Duplicate top of stack",
        stack: "( a -- a a )",
        example: "1 dup",
        see_also: ["drop", "over"],
    ] |calc| {
        restack(calc, Stack::dup)
    }

    Drop ("drop", 1 -> 0) [
        brief: "Remove top of stack",
        stack: "( a -- )",
        example: "1 2 drop",
        see_also: ["dup", "clear"],
    ] |calc| {
        restack(calc, Stack::drop)
    }

    Swap ("swap", 2 -> 2) [
        brief: "Exchange the top two entries",
        stack: "( a b -- b a )",
        example: "1 2 swap",
        see_also: ["rot", "roll"],
    ] |calc| {
        restack(calc, Stack::swap)
    }

    Over ("over", 2 -> 3) [
        brief: "Copy the second entry to the top",
        stack: "( a b -- a b a )",
        example: "1 2 over",
        see_also: ["dup", "pick"],
    ] |calc| {
        restack(calc, Stack::over)
    }

    Rot ("rot", 3 -> 3) [
        brief: "Move the third entry to the top",
        stack: "( a b c -- b c a )",
        example: "1 2 3 rot",
        see_also: ["swap", "roll"],
    ] |calc| {
        restack(calc, Stack::rot)
    }

    Pick ("pick", -2 -> -1) [
        brief: "Copy the entry at level n to the top (1 pick = dup)",
        stack: "( xn ... x1 n -- xn ... x1 xn )",
        example: "10 20 30 3 pick",
        see_also: ["over", "roll"],
    ] |calc| {
        let n = level(calc, "pick")?;
        restack(calc, |stack| {
            stack.drop()?;
            stack.pick(n)
        })
    }

    Roll ("roll", -2 -> -1) [
        brief: "Move the entry at level n to the top",
        stack: "( xn ... x1 n -- xn-1 ... x1 xn )",
        example: "10 20 30 3 roll",
        see_also: ["rot", "pick"],
    ] |calc| {
        let n = level(calc, "roll")?;
        restack(calc, |stack| {
            stack.drop()?;
            stack.roll(n)
        })
    }

    Depth ("depth", 0 -> 1) [
        brief: "Number of entries on the stack",
        stack: "( -- n )",
        example: "1 2 depth",
        see_also: ["clear"],
    ] |calc| {
        let depth = calc.stack().len() as i64;
        calc.push_value(Value::integer(depth), rpn_core::Unit::none())
    }

    Clear ("clear", 0 -> 0) [
        brief: "Remove every entry",
        stack: "( ... -- )",
        example: "1 2 3 clear",
        see_also: ["drop", "undo"],
    ] |calc| {
        calc.stack_mut().clear();
        calc.set_flags(Flags::default());
        Ok(())
    }

    Undo ("undo", 0 -> 0) [
        brief: "Restore the stack as it was before the last change",
        stack: "( -- )",
        example: "1 2 + undo",
        see_also: ["clear"],
        undo: false,
    ] |calc| {
        calc.undo()
    }
}

#[cfg(test)]
mod tests {
    use rpn_core::ErrorKind;

    use crate::testing::{calc, eval, int, run, values};

    #[test]
    fn basic_shuffles() {
        assert_eq!(eval(vec![int(1)], &["dup"]).unwrap(), vec![int(1), int(1)]);
        assert_eq!(eval(vec![int(1), int(2)], &["swap"]).unwrap(), vec![int(2), int(1)]);
        assert_eq!(eval(vec![int(1), int(2)], &["over"]).unwrap(), vec![int(1), int(2), int(1)]);
        assert_eq!(eval(vec![int(1), int(2), int(3)], &["rot"]).unwrap(), vec![int(2), int(3), int(1)]);
        assert_eq!(eval(vec![int(1), int(2)], &["drop"]).unwrap(), vec![int(1)]);
    }

    #[test]
    fn pick_and_roll_count_from_top() {
        let out = eval(vec![int(10), int(20), int(30), int(3)], &["pick"]).unwrap();
        assert_eq!(out, vec![int(10), int(20), int(30), int(10)]);
        let out = eval(vec![int(10), int(20), int(30), int(3)], &["roll"]).unwrap();
        assert_eq!(out, vec![int(20), int(30), int(10)]);
    }

    #[test]
    fn pick_out_of_range_leaves_stack() {
        let mut c = calc();
        let err = run(&mut c, vec![int(10), int(5)], &["pick"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientArguments);
        assert_eq!(values(&c), vec![int(10), int(5)]);
    }

    #[test]
    fn depth_and_clear() {
        assert_eq!(eval(vec![int(7), int(8)], &["depth"]).unwrap(), vec![int(7), int(8), int(2)]);
        assert_eq!(eval(vec![int(7), int(8)], &["clear", "depth"]).unwrap(), vec![int(0)]);
    }

    #[test]
    fn undo_restores_previous_stack() {
        let mut c = calc();
        run(&mut c, vec![int(1), int(2)], &["+"]).unwrap();
        assert_eq!(values(&c), vec![int(3)]);
        run(&mut c, vec![], &["undo"]).unwrap();
        assert_eq!(values(&c), vec![int(1), int(2)]);
        run(&mut c, vec![], &["undo"]).unwrap();
        assert_eq!(values(&c), vec![int(1)]);
    }

    #[test]
    fn dup_on_empty_stack_fails() {
        let err = eval(vec![], &["dup"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientArguments);
    }
}
