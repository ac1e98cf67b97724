//! Named variables.
//!
//! Names are given as quoted symbolic variables (`'x'`). A stored entry keeps
//! its unit and display metadata. Once bound, the bare name pushes the value
//! and symbolic evaluation substitutes it.

use rpn_core::{CalcError, CalcResult, StackEntry};
use rpn_vm::Calculator;

fn variable_name(op: &str, entry: &StackEntry) -> CalcResult<String> {
    entry
        .value()
        .as_symbolic()
        .and_then(|s| s.as_var())
        .map(str::to_string)
        .ok_or_else(|| CalcError::mismatch(op, format!("{} is not a name", entry.value().kind())))
}

fn undefined(name: &str) -> CalcError {
    CalcError::invalid(format!("undefined variable '{}'", name))
}

fn sync_flags(calc: &mut Calculator) {
    let flags = calc.stack().peek(0).map(|e| e.flags()).unwrap_or_default();
    calc.set_flags(flags);
}

define_operations! {
    Sto ("sto", 2 -> 0) [
        aliases: ["store"],
        brief: "Store a value under a name",
        stack: "( value 'name' -- )",
        example: "42 'x' sto",
        see_also: ["rcl", "purge"],
    ] |calc| {
        let name = variable_name("sto", calc.stack().peek(0)?)?;
        if calc.registry().contains(&name) {
            return Err(CalcError::invalid(format!("sto: '{}' names an operation", name)));
        }
        let entry = calc.stack().peek(1)?.clone();
        calc.stack_mut().pop_many(2)?;
        log::trace!("sto {}", name);
        calc.scopes_mut().set(&name, entry);
        sync_flags(calc);
        Ok(())
    }

    Rcl ("rcl", 1 -> 1) [
        aliases: ["recall"],
        brief: "Push the value stored under a name",
        stack: "( 'name' -- value )",
        example: "'x' rcl",
        see_also: ["sto"],
    ] |calc| {
        let name = variable_name("rcl", calc.stack().peek(0)?)?;
        let entry = calc.scopes().get(&name).cloned().ok_or_else(|| undefined(&name))?;
        calc.pop_entry()?;
        calc.push_entry(entry)
    }

    Purge ("purge", 1 -> 0) [
        brief: "Remove a stored variable",
        stack: "( 'name' -- )",
        example: "'x' purge",
        see_also: ["sto"],
    ] |calc| {
        let name = variable_name("purge", calc.stack().peek(0)?)?;
        if calc.scopes().get(&name).is_none() {
            return Err(undefined(&name));
        }
        calc.pop_entry()?;
        calc.scopes_mut().unset(&name);
        sync_flags(calc);
        Ok(())
    }
}
