//! Time values.
//!
//! Durations and absolute instants are built from a number of seconds, held
//! to the nanosecond, and combine through the arithmetic operations.

use num_rational::BigRational;
use rpn_core::{CalcError, CalcResult, Kind, KindSet, Time, Value};
use rpn_vm::{Conversion, Operand, TypeRules};

use crate::common::{no_units, plain};

const SECONDS: TypeRules = TypeRules {
    identity: &[&[KindSet::EXACT]],
    limited: Some(KindSet::REAL),
    conversions: &[Conversion {
        from: KindSet::REAL,
        to: Kind::Rational,
    }],
    broadcast: true,
    symbolic: false,
};

const TIME: TypeRules = TypeRules {
    identity: &[&[KindSet::TIME]],
    ..TypeRules::UNARY_SCALAR.strict()
};

fn seconds_of(op: &str, x: &Operand) -> CalcResult<BigRational> {
    no_units(op, &[x])?;
    x.value
        .to_rational()
        .ok_or_else(|| CalcError::mismatch(op, x.kind().name()))
}

define_operations! {
    Now ("now", 0 -> 1) [
        brief: "The current instant",
        stack: "( -- time )",
        example: "now",
        see_also: ["->abs", "seconds"],
    ] |calc| {
        calc.commit(0, [Operand::plain(Time::now())])
    }

    ToDuration ("->time", 1 -> 1) [
        aliases: ["→time"],
        brief: "Duration of x seconds",
        stack: "( x -- duration )",
        example: "90 ->time",
        see_also: ["->abs", "seconds"],
    ] |calc| {
        calc.one_arg("->time", &SECONDS, |_, x| {
            plain(Time::from_seconds(&seconds_of("->time", x)?, false))
        })
    }

    ToAbsolute ("->abs", 1 -> 1) [
        aliases: ["→abs"],
        brief: "Instant x seconds after the Unix epoch",
        stack: "( x -- time )",
        example: "0 ->abs",
        see_also: ["->time", "now"],
    ] |calc| {
        calc.one_arg("->abs", &SECONDS, |_, x| {
            plain(Time::from_seconds(&seconds_of("->abs", x)?, true))
        })
    }

    Seconds ("seconds", 1 -> 1) [
        brief: "Exact number of seconds in a duration, or since the epoch",
        stack: "( time -- x )",
        example: "90 ->time seconds",
        see_also: ["->time"],
    ] |calc| {
        calc.one_arg("seconds", &TIME, |_, t| match &t.value {
            Value::Time(time) => plain(time.seconds()),
            other => Err(CalcError::mismatch("seconds", other.kind().name())),
        })
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use rpn_core::ErrorKind;

    use crate::testing::{calc, eval, int, run, values};

    use super::*;

    #[test]
    fn durations_round_trip_through_seconds() {
        let half = Value::rational(1, 2).unwrap();
        let out = eval(vec![half.clone()], &["->time"]).unwrap();
        assert_eq!(out, vec![Value::Time(Time::duration_from_nanos(500_000_000))]);
        assert_eq!(eval(vec![half], &["->time", "seconds"]).unwrap(), vec![Value::rational(1, 2).unwrap()]);
    }

    #[test]
    fn instant_plus_duration_is_instant() {
        let mut c = calc();
        run(&mut c, vec![int(10)], &["->abs"]).unwrap();
        run(&mut c, vec![int(5)], &["->time", "+"]).unwrap();
        let expected = Time::absolute(BigInt::from(15_000_000_000i64));
        assert_eq!(values(&c), vec![Value::Time(expected)]);
    }

    #[test]
    fn instants_do_not_add() {
        let err = eval(vec![int(1), int(2)], &["->abs", "swap", "->abs", "+"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn now_is_absolute() {
        let out = eval(vec![], &["now"]).unwrap();
        assert!(matches!(&out[0], Value::Time(t) if t.is_absolute()));
    }
}
