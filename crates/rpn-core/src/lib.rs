//! Numeric core of the rpn calculator.
//!
//! This crate provides the value types and the rules that connect them:
//! - Value kinds (integer, rational, float, complex, matrix, list, time, symbolic)
//! - The conversion lattice (widening, narrowing, reduction)
//! - Fixed-width integer emulation and execution flags
//! - Stack entries with units and display metadata
//! - The error taxonomy shared by the whole calculator

pub mod arith;
pub mod entry;
pub mod error;
pub mod fixed;
pub mod format;
pub mod kind;
pub mod lattice;
pub mod unit;
pub mod value;

// Re-export commonly used types at crate root
pub use entry::{EntryFormat, Flags, StackEntry};
pub use error::{CalcError, CalcResult, ErrorKind};
pub use format::{AngleMode, ComplexMode, FormatOptions, RationalMode};
pub use kind::{Kind, KindSet};
pub use lattice::{common_kind, narrow, reduce, widen};
pub use unit::Unit;
pub use value::{Complex, Float, List, Matrix, Symbolic, Time, Value};
