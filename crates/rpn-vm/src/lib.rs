//! Execution engine for the rpn calculator.
//!
//! This crate provides:
//! - The evaluation stack and undo history
//! - Configuration and variable scopes
//! - The `Operation` contract and name to operation registry
//! - Operand type resolution and the dispatch helpers
//! - The `Calculator` context and its instruction loop

pub mod calculator;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod instruction;
pub mod operation;
pub mod registry;
pub mod scope;
pub mod stack;

pub use calculator::{Calculator, MAX_AGGREGATE, MAX_DEPTH};
pub use config::{Config, ConfigError};
pub use dispatch::{Conversion, NumericEnv, Operand, Operands, TypeRules, NUMERIC_PROMOTIONS};
pub use history::UndoHistory;
pub use instruction::Instruction;
pub use operation::{Operation, OperationDoc};
pub use registry::OperationRegistry;
pub use scope::{Frame, Scopes};
pub use stack::{Stack, StackError};
