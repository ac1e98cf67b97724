//! Evaluation of symbolic values and function references.

use rpn_core::{CalcError, CalcResult, StackEntry, Symbolic, Value};

fn callee(entry: &StackEntry) -> CalcResult<String> {
    match entry.value().as_symbolic() {
        Some(Symbolic::Var(name)) => Ok(name.to_string()),
        Some(s @ Symbolic::Apply(name, _)) if s.is_function_ref() => Ok(name.to_string()),
        _ => Err(CalcError::mismatch(
            "execute",
            format!("{} is not a function reference", entry.value().kind()),
        )),
    }
}

define_operations! {
    Eval ("eval", 1 -> 1) [
        brief: "Evaluate a symbolic expression with the current variables",
        stack: "( 'expr' -- value )",
        example: "'X+1' eval",
        see_also: ["execute", "sto"],
    ] |calc| {
        let expr = match calc.stack().peek(0)?.value() {
            Value::Symbolic(expr) => expr.clone(),
            _ => return Ok(()),
        };
        let result = calc.eval_symbolic(&expr)?;
        calc.commit(1, [result])
    }

    Execute ("execute", 1 -> -1) [
        aliases: ["exec", "call"],
        brief: "Invoke a function reference on the stack below it",
        stack: "( ... 'F' -- ... )",
        example: "1 2 '+' execute",
        see_also: ["eval"],
    ] |calc| {
        let name = callee(calc.stack().peek(0)?)?;
        calc.pop_entry()?;
        calc.execute_name(&name)
    }
}
