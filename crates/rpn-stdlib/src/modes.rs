//! Display modes, word size, precision and flag queries.
//!
//! Mode switches change the configuration used for entries created from now
//! on; entries already on the stack keep the metadata they were stored with.
//! BASE, BITS and PREC take their setting from the stack. Undo after one of
//! them puts the popped setting back on the stack; the configuration itself
//! is never rolled back.

use rpn_core::{AngleMode, CalcError, CalcResult, ComplexMode, Flags, RationalMode, Unit};
use rpn_vm::{Calculator, Config};

use crate::common::truth;

/// Change the configuration with a setting popped from the stack. The
/// setting is validated before it is removed.
fn pop_setting(calc: &mut Calculator, what: &str, apply: impl FnOnce(&mut Config, u32)) -> CalcResult<()> {
    let top = calc.stack().peek(0)?;
    top.unit().require_none(what)?;
    let n = top.value().to_index(what)?;
    let n = u32::try_from(n).map_err(|_| CalcError::invalid(format!("{}: {} is too large", what, n)))?;
    calc.update_config(|config| apply(config, n))?;
    calc.pop_entry()?;
    let flags = calc.stack().peek(0).map(|e| e.flags()).unwrap_or_default();
    calc.set_flags(flags);
    Ok(())
}

fn push_flag(calc: &mut Calculator, pick: impl FnOnce(Flags) -> bool) -> CalcResult<()> {
    let set = pick(calc.flags());
    calc.push_value(truth(set), Unit::none())
}

define_operations! {
    Bin ("bin", 0 -> 0) [
        brief: "Display integers in base 2",
        stack: "( -- )",
        example: "bin 10",
        see_also: ["oct", "dec", "hex", "base"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.base = 2)
    }

    Oct ("oct", 0 -> 0) [
        brief: "Display integers in base 8",
        stack: "( -- )",
        example: "oct 64",
        see_also: ["bin", "dec", "hex", "base"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.base = 8)
    }

    Dec ("dec", 0 -> 0) [
        brief: "Display integers in base 10",
        stack: "( -- )",
        example: "dec 255",
        see_also: ["bin", "oct", "hex", "base"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.base = 10)
    }

    Hex ("hex", 0 -> 0) [
        brief: "Display integers in base 16",
        stack: "( -- )",
        example: "hex 255",
        see_also: ["bin", "oct", "dec", "base"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.base = 16)
    }

    Base ("base", 1 -> 0) [
        brief: "Display integers in base n (2 to 36); undo returns n, not the old base",
        stack: "( n -- )",
        example: "36 base",
        see_also: ["hex", "dec"],
    ] |calc| {
        pop_setting(calc, "base", |c, n| c.base = n)
    }

    Bits ("bits", 1 -> 0) [
        aliases: ["stws"],
        brief: "Set the word size for integers, 0 for unbounded; undo returns n, not the old size",
        stack: "( n -- )",
        example: "8 bits",
        see_also: ["signed", "unsigned"],
    ] |calc| {
        pop_setting(calc, "bits", |c, n| c.fixed_bits = n)
    }

    Signed ("signed", 0 -> 0) [
        brief: "Treat fixed-width words as two's complement",
        stack: "( -- )",
        example: "8 bits signed 200",
        see_also: ["unsigned", "bits"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.is_signed = true)
    }

    Unsigned ("unsigned", 0 -> 0) [
        brief: "Treat fixed-width words as unsigned",
        stack: "( -- )",
        example: "8 bits unsigned -1",
        see_also: ["signed", "bits"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.is_signed = false)
    }

    Prec ("prec", 1 -> 0) [
        brief: "Set the significant digits for floats; undo returns n, not the old precision",
        stack: "( n -- )",
        example: "50 prec",
        see_also: ["->f"],
    ] |calc| {
        pop_setting(calc, "prec", |c, n| c.precision = n)
    }

    Deg ("deg", 0 -> 0) [
        brief: "Angles in degrees",
        stack: "( -- )",
        example: "deg 90 sin",
        see_also: ["rad", "grad"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.angle_mode = AngleMode::Degrees)
    }

    Rad ("rad", 0 -> 0) [
        brief: "Angles in radians",
        stack: "( -- )",
        example: "rad pi sin",
        see_also: ["deg", "grad"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.angle_mode = AngleMode::Radians)
    }

    Grad ("grad", 0 -> 0) [
        brief: "Angles in gradians",
        stack: "( -- )",
        example: "grad 100 sin",
        see_also: ["deg", "rad"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.angle_mode = AngleMode::Gradians)
    }

    Rect ("rect", 0 -> 0) [
        brief: "Show complex numbers as (re, im)",
        stack: "( -- )",
        example: "rect",
        see_also: ["polar"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.complex_mode = ComplexMode::Rectangular)
    }

    Polar ("polar", 0 -> 0) [
        brief: "Show complex numbers as magnitude and angle",
        stack: "( -- )",
        example: "polar",
        see_also: ["rect", "arg"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.complex_mode = ComplexMode::Polar)
    }

    Mixed ("mixed", 0 -> 0) [
        brief: "Show fractions as mixed numbers (3 1/2)",
        stack: "( -- )",
        example: "mixed 7 2 /",
        see_also: ["improper"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.rational_mode = RationalMode::Mixed)
    }

    Improper ("improper", 0 -> 0) [
        brief: "Show fractions as improper fractions (7/2)",
        stack: "( -- )",
        example: "improper 7 2 /",
        see_also: ["mixed"],
        undo: false,
    ] |calc| {
        calc.update_config(|c| c.rational_mode = RationalMode::Improper)
    }

    ZeroFlag ("zf", 0 -> 1) [
        brief: "Push 1 if the last stored value was zero",
        stack: "( -- flag )",
        example: "1 1 - zf",
        see_also: ["cf", "of", "sf"],
    ] |calc| {
        push_flag(calc, |f| f.zero)
    }

    CarryFlag ("cf", 0 -> 1) [
        brief: "Push 1 if the last stored value wrapped as unsigned",
        stack: "( -- flag )",
        example: "8 bits unsigned 255 1 + cf",
        see_also: ["zf", "of", "sf"],
    ] |calc| {
        push_flag(calc, |f| f.carry)
    }

    OverflowFlag ("of", 0 -> 1) [
        brief: "Push 1 if the last stored value overflowed as signed",
        stack: "( -- flag )",
        example: "8 bits signed 127 1 + of",
        see_also: ["zf", "cf", "sf"],
    ] |calc| {
        push_flag(calc, |f| f.overflow)
    }

    SignFlag ("sf", 0 -> 1) [
        brief: "Push 1 if the last stored value was negative",
        stack: "( -- flag )",
        example: "1 2 - sf",
        see_also: ["zf", "cf", "of"],
    ] |calc| {
        push_flag(calc, |f| f.sign)
    }
}
