//! Symbolic expression trees.
//!
//! A symbolic value is a deferred computation: a variable, an embedded
//! constant, or an application of a named operation to symbolic arguments.
//!
//! ```text
//! 'X'         → Var("X")
//! 'X+1'       → Apply("+", [Var("X"), Num(1)])
//! 'SIN(X)'    → Apply("sin", [Var("X")])
//! 'F'         → Apply("F", [])       (a function reference)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Symbolic {
    /// A named variable.
    Var(Arc<str>),
    /// A constant value.
    Num(Arc<Value>),
    /// An operation applied to arguments.
    Apply(Arc<str>, Arc<[Symbolic]>),
}

impl Symbolic {
    pub fn var(name: impl Into<Arc<str>>) -> Self {
        Symbolic::Var(name.into())
    }

    /// Embed a value; symbolic values are unwrapped rather than nested.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Symbolic(s) => s,
            other => Symbolic::Num(Arc::new(other)),
        }
    }

    pub fn apply(name: impl Into<Arc<str>>, args: Vec<Symbolic>) -> Self {
        Symbolic::Apply(name.into(), args.into())
    }

    /// A reference to a named function, applied to nothing.
    pub fn function_ref(name: impl Into<Arc<str>>) -> Self {
        Symbolic::Apply(name.into(), Arc::from(Vec::<Symbolic>::new()))
    }

    pub fn is_function_ref(&self) -> bool {
        matches!(self, Symbolic::Apply(_, args) if args.is_empty())
    }

    /// The variable name, if this is a bare variable.
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Symbolic::Var(name) => Some(name),
            _ => None,
        }
    }

    /// Names of all free variables, sorted.
    pub fn variables(&self) -> BTreeSet<Arc<str>> {
        let mut out = BTreeSet::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut BTreeSet<Arc<str>>) {
        match self {
            Symbolic::Var(name) => {
                out.insert(name.clone());
            }
            Symbolic::Num(_) => {}
            Symbolic::Apply(_, args) => args.iter().for_each(|a| a.collect_vars(out)),
        }
    }
}

fn infix_precedence(name: &str) -> Option<u8> {
    match name {
        "+" | "-" => Some(1),
        "*" | "/" => Some(2),
        "^" => Some(3),
        _ => None,
    }
}

fn binary_precedence(expr: &Symbolic) -> Option<u8> {
    match expr {
        Symbolic::Apply(name, args) if args.len() == 2 => infix_precedence(name),
        _ => None,
    }
}

impl fmt::Display for Symbolic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbolic::Var(name) => write!(f, "{}", name),
            Symbolic::Num(value) => write!(f, "{}", value),
            Symbolic::Apply(name, args) => {
                if let (Some(prec), [left, right]) = (infix_precedence(name), &args[..]) {
                    let right_assoc = prec == 3;
                    let left_parens = binary_precedence(left)
                        .is_some_and(|p| p < prec || (p == prec && right_assoc));
                    let right_parens = binary_precedence(right)
                        .is_some_and(|p| p < prec || (p == prec && !right_assoc));
                    if left_parens {
                        write!(f, "({})", left)?;
                    } else {
                        write!(f, "{}", left)?;
                    }
                    write!(f, "{}", name)?;
                    if right_parens {
                        write!(f, "({})", right)
                    } else {
                        write!(f, "{}", right)
                    }
                } else if args.is_empty() {
                    write!(f, "{}", name)
                } else {
                    write!(f, "{}(", name)?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Symbolic {
        Symbolic::from_value(Value::integer(n))
    }

    #[test]
    fn infix_display_with_precedence() {
        let sum = Symbolic::apply("+", vec![Symbolic::var("X"), num(1)]);
        assert_eq!(sum.to_string(), "X+1");

        let product = Symbolic::apply("*", vec![sum.clone(), Symbolic::var("Y")]);
        assert_eq!(product.to_string(), "(X+1)*Y");

        let diff = Symbolic::apply("-", vec![Symbolic::var("A"), sum]);
        assert_eq!(diff.to_string(), "A-(X+1)");
    }

    #[test]
    fn call_display() {
        let call = Symbolic::apply("sin", vec![Symbolic::var("X")]);
        assert_eq!(call.to_string(), "sin(X)");
        assert_eq!(Symbolic::function_ref("F").to_string(), "F");
        assert!(Symbolic::function_ref("F").is_function_ref());
    }

    #[test]
    fn from_value_unwraps_symbolic() {
        let x = Symbolic::var("X");
        assert_eq!(Symbolic::from_value(Value::Symbolic(x.clone())), x);
    }

    #[test]
    fn collects_variables() {
        let expr = Symbolic::apply(
            "+",
            vec![Symbolic::var("Y"), Symbolic::apply("*", vec![Symbolic::var("X"), num(2)])],
        );
        let vars: Vec<_> = expr.variables().into_iter().map(|v| v.to_string()).collect();
        assert_eq!(vars, vec!["X", "Y"]);
    }
}
