//! Operand type resolution.
//!
//! Each operation declares what operand kinds it takes through [`TypeRules`]:
//!
//! - `identity`: signatures accepted as-is, one kind set per operand
//! - `limited`: when set, conversions are only attempted if every operand
//!   kind is in this set
//! - `conversions`: fallbacks tried in order; each names the kinds it applies
//!   to and the kind every operand is converted to
//!
//! Resolution tries the identity signatures on the literal kinds first, then
//! each conversion in order. The first conversion under which every operand
//! converts without error wins.

use rpn_core::{
    AngleMode, CalcError, CalcResult, Kind, KindSet, List, Symbolic, Unit, Value, narrow, widen,
};
use smallvec::SmallVec;

/// A value and its unit, as seen by an operation's transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    pub value: Value,
    pub unit: Unit,
}

impl Operand {
    pub fn new(value: Value, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A dimensionless operand.
    pub fn plain(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            unit: Unit::none(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }
}

/// Operands of one invocation, bottom of the stack first.
pub type Operands = SmallVec<[Operand; 3]>;

/// Numeric settings an operation's transform may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericEnv {
    pub precision: u32,
    pub fixed_bits: u32,
    pub is_signed: bool,
    pub angle: AngleMode,
}

/// Convert every operand whose kind is in `from` to `to`.
#[derive(Clone, Copy, Debug)]
pub struct Conversion {
    pub from: KindSet,
    pub to: Kind,
}

#[derive(Clone, Copy, Debug)]
pub struct TypeRules {
    pub identity: &'static [&'static [KindSet]],
    pub limited: Option<KindSet>,
    pub conversions: &'static [Conversion],
    /// Apply elementwise when an operand is a list.
    pub broadcast: bool,
    /// Build a deferred expression when an operand is symbolic.
    pub symbolic: bool,
}

/// The scalar promotions of the lattice, narrowest target first.
pub const NUMERIC_PROMOTIONS: &[Conversion] = &[
    Conversion {
        from: KindSet::EXACT,
        to: Kind::Rational,
    },
    Conversion {
        from: KindSet::REAL,
        to: Kind::Float,
    },
    Conversion {
        from: KindSet::SCALAR,
        to: Kind::Complex,
    },
];

/// Pairs of equal real kinds.
pub const SAME_REALS: &[&[KindSet]] = &[
    &[KindSet::INTEGER, KindSet::INTEGER],
    &[KindSet::RATIONAL, KindSet::RATIONAL],
    &[KindSet::FLOAT, KindSet::FLOAT],
];

/// Pairs of equal scalar kinds.
pub const SAME_SCALARS: &[&[KindSet]] = &[
    &[KindSet::INTEGER, KindSet::INTEGER],
    &[KindSet::RATIONAL, KindSet::RATIONAL],
    &[KindSet::FLOAT, KindSet::FLOAT],
    &[KindSet::COMPLEX, KindSet::COMPLEX],
];

impl TypeRules {
    /// Any single scalar, no conversions needed.
    pub const UNARY_SCALAR: TypeRules = TypeRules {
        identity: &[&[KindSet::SCALAR]],
        limited: None,
        conversions: &[],
        broadcast: true,
        symbolic: true,
    };

    /// A single real scalar.
    pub const UNARY_REAL: TypeRules = TypeRules {
        identity: &[&[KindSet::REAL]],
        limited: None,
        conversions: &[],
        broadcast: true,
        symbolic: true,
    };

    /// Two scalars brought to their common kind.
    pub const BINARY_SCALAR: TypeRules = TypeRules {
        identity: SAME_SCALARS,
        limited: None,
        conversions: NUMERIC_PROMOTIONS,
        broadcast: true,
        symbolic: true,
    };

    /// Two real scalars brought to their common kind.
    pub const BINARY_REAL: TypeRules = TypeRules {
        identity: SAME_REALS,
        limited: Some(KindSet::REAL),
        conversions: NUMERIC_PROMOTIONS,
        broadcast: true,
        symbolic: true,
    };

    /// Two integers. Exact rationals narrow when they are whole; floats are
    /// never converted.
    pub const BINARY_INTEGER: TypeRules = TypeRules {
        identity: &[&[KindSet::INTEGER, KindSet::INTEGER]],
        limited: Some(KindSet::EXACT),
        conversions: &[Conversion {
            from: KindSet::EXACT,
            to: Kind::Integer,
        }],
        broadcast: true,
        symbolic: false,
    };

    pub const UNARY_INTEGER: TypeRules = TypeRules {
        identity: &[&[KindSet::INTEGER]],
        limited: None,
        conversions: &[],
        broadcast: true,
        symbolic: false,
    };

    /// Accept anything as-is.
    pub const fn any(arity: usize) -> TypeRules {
        const ANY1: &[&[KindSet]] = &[&[KindSet::ANY]];
        const ANY2: &[&[KindSet]] = &[&[KindSet::ANY, KindSet::ANY]];
        const ANY3: &[&[KindSet]] = &[&[KindSet::ANY, KindSet::ANY, KindSet::ANY]];
        let identity = match arity {
            1 => ANY1,
            2 => ANY2,
            _ => ANY3,
        };
        TypeRules {
            identity,
            limited: None,
            conversions: &[],
            broadcast: false,
            symbolic: false,
        }
    }

    /// Same rules without list broadcast or symbolic absorption.
    pub const fn strict(self) -> TypeRules {
        TypeRules {
            broadcast: false,
            symbolic: false,
            ..self
        }
    }
}

fn matches_signature(signature: &[KindSet], operands: &[Operand]) -> bool {
    signature.len() == operands.len()
        && signature
            .iter()
            .zip(operands)
            .all(|(set, operand)| set.contains(operand.kind()))
}

/// Bring `value` to `target`, widening or narrowing as needed. Narrowing
/// only succeeds when it is exact.
fn convert(value: &Value, target: Kind, digits: u32) -> CalcResult<Value> {
    let from = value.kind();
    match (from.scalar_rank(), target.scalar_rank()) {
        (Some(a), Some(b)) if a > b => narrow(value, target).ok_or_else(|| {
            CalcError::mismatch("convert", format!("{} is not an exact {}", from, target))
        }),
        _ => widen(value.clone(), target, digits),
    }
}

pub(crate) fn describe(operands: &[Operand]) -> String {
    operands
        .iter()
        .map(|o| o.kind().name())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Resolve operand kinds against `rules`, returning the operands converted
/// to the winning signature.
pub fn resolve(name: &str, rules: &TypeRules, operands: &[Operand], digits: u32) -> CalcResult<Operands> {
    if rules
        .identity
        .iter()
        .any(|sig| matches_signature(sig, operands))
    {
        return Ok(operands.iter().cloned().collect());
    }

    let allowed = match rules.limited {
        Some(limited) => operands.iter().all(|o| limited.contains(o.kind())),
        None => true,
    };
    if allowed {
        for rule in rules.conversions {
            if !operands.iter().all(|o| rule.from.contains(o.kind())) {
                continue;
            }
            let converted: CalcResult<Operands> = operands
                .iter()
                .map(|o| Ok(Operand::new(convert(&o.value, rule.to, digits)?, o.unit.clone())))
                .collect();
            match converted {
                Ok(converted) => {
                    log::debug!("{}: {} converted to {}", name, describe(operands), rule.to);
                    return Ok(converted);
                }
                Err(e) => log::trace!("{}: conversion to {} failed: {}", name, rule.to, e),
            }
        }
    }

    Err(CalcError::mismatch(name, describe(operands)))
}

/// Run a transform over operands: symbolic operands absorb the call into a
/// deferred expression, lists broadcast elementwise, everything else is
/// resolved against `rules` and handed to `f`.
pub fn apply<F>(name: &str, rules: &TypeRules, env: &NumericEnv, operands: &[Operand], f: &F) -> CalcResult<Operand>
where
    F: Fn(&NumericEnv, &[Operand]) -> CalcResult<Operand>,
{
    if rules.symbolic && operands.iter().any(|o| o.kind() == Kind::Symbolic) {
        return absorb(name, operands);
    }
    if rules.broadcast && operands.iter().any(|o| o.kind() == Kind::List) {
        return broadcast(name, rules, env, operands, f);
    }
    let resolved = resolve(name, rules, operands, env.precision)?;
    f(env, &resolved)
}

/// Build `name(args...)` without evaluating anything.
fn absorb(name: &str, operands: &[Operand]) -> CalcResult<Operand> {
    for operand in operands {
        operand.unit.require_none(name)?;
    }
    let args = operands
        .iter()
        .map(|o| Symbolic::from_value(o.value.clone()))
        .collect();
    Ok(Operand::plain(Symbolic::apply(name, args)))
}

fn broadcast<F>(name: &str, rules: &TypeRules, env: &NumericEnv, operands: &[Operand], f: &F) -> CalcResult<Operand>
where
    F: Fn(&NumericEnv, &[Operand]) -> CalcResult<Operand>,
{
    let lists: SmallVec<[(&List, &Unit); 3]> = operands
        .iter()
        .filter_map(|o| match &o.value {
            Value::List(list) => Some((list, &o.unit)),
            _ => None,
        })
        .collect();
    let Some(&(first, first_unit)) = lists.first() else {
        return Err(CalcError::mismatch(name, describe(operands)));
    };
    let len = first.len();
    if let Some((other, _)) = lists.iter().find(|(l, _)| l.len() != len) {
        return Err(CalcError::invalid(format!(
            "{}: list sizes differ ({} and {})",
            name,
            len,
            other.len()
        )));
    }

    let mut values = Vec::with_capacity(len);
    let mut unit = None;
    for i in 0..len {
        let element: Operands = operands
            .iter()
            .map(|o| match &o.value {
                Value::List(list) => Operand::new(list.items()[i].clone(), o.unit.clone()),
                _ => o.clone(),
            })
            .collect();
        let out = apply(name, rules, env, &element, f)?;
        unit.get_or_insert(out.unit);
        values.push(out.value);
    }
    let list = List::new(values, env.precision)?;
    Ok(Operand::new(
        Value::List(list),
        unit.unwrap_or_else(|| first_unit.clone()),
    ))
}
