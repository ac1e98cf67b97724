//! rpn - arbitrary-precision RPN calculator core.
//!
//! This crate provides the [`Session`] struct, the entry point for embedding
//! the calculator:
//! - Executing instruction streams against the stack
//! - Reading the stack as values or as display strings
//! - Execution flags, undo and configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use rpn::{Instruction, Session};
//!
//! let mut session = Session::new();
//! let errors = session.run(&[
//!     Instruction::number(1i64),
//!     Instruction::number(3i64),
//!     Instruction::keyword("/"),
//! ]);
//! assert!(errors.is_empty());
//! assert_eq!(session.display(), vec!["1/3".to_string()]);
//! ```
//!
//! Text parsing, line editing and persistence belong to the embedding
//! application.

use std::sync::Arc;

pub use rpn_core::{
    AngleMode, CalcError, CalcResult, ComplexMode, ErrorKind, Flags, Kind, RationalMode, StackEntry,
    Unit, Value,
};
pub use rpn_vm::{Calculator, Config, ConfigError, Instruction, OperationRegistry};

/// A calculator bundled with the standard operation catalog.
pub struct Session {
    calc: Calculator,
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let registry = Arc::new(rpn_stdlib::standard_registry());
        log::debug!("session with {} operations, base {}", registry.len(), config.base);
        Self {
            calc: Calculator::new(config, registry),
        }
    }

    /// Create a session from a TOML configuration string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_config(Config::from_toml_str(content)?))
    }

    /// Execute instructions, skipping the ones that fail. Returns the errors
    /// in the order they occurred.
    pub fn run(&mut self, instructions: &[Instruction]) -> Vec<CalcError> {
        self.calc.run(instructions)
    }

    pub fn run_one(&mut self, instruction: &Instruction) -> CalcResult<()> {
        self.calc.run_one(instruction)
    }

    /// Execute instructions up to the first failure and return the stack.
    pub fn eval(&mut self, instructions: &[Instruction]) -> CalcResult<Vec<Value>> {
        for instruction in instructions {
            self.calc.run_one(instruction)?;
        }
        Ok(self.values())
    }

    /// Stack values, bottom first.
    pub fn values(&self) -> Vec<Value> {
        self.calc
            .stack()
            .as_slice()
            .iter()
            .map(|e| e.value().clone())
            .collect()
    }

    pub fn entries(&self) -> &[StackEntry] {
        self.calc.stack().as_slice()
    }

    /// Stack entries rendered for display, bottom first.
    pub fn display(&self) -> Vec<String> {
        self.calc.display_stack()
    }

    pub fn depth(&self) -> usize {
        self.calc.stack().len()
    }

    pub fn flags(&self) -> Flags {
        self.calc.flags()
    }

    pub fn undo(&mut self) -> CalcResult<()> {
        self.calc.undo()
    }

    pub fn config(&self) -> &Config {
        self.calc.config()
    }

    pub fn update_config(&mut self, f: impl FnOnce(&mut Config)) -> CalcResult<()> {
        self.calc.update_config(f)
    }

    /// One-line help for a named operation.
    pub fn help(&self, name: &str) -> Option<String> {
        self.calc.registry().get(name).map(|op| op.help())
    }

    pub fn operation_names(&self) -> Vec<&'static str> {
        self.calc.registry().names().collect()
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    pub fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calc
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("depth", &self.depth())
            .field("config", self.config())
            .finish()
    }
}
