//! The calculator context.
//!
//! A `Calculator` bundles everything an operation may touch: the stack, the
//! configuration, the execution flags, the variable scopes and the undo
//! history. It is passed explicitly to every operation.
//!
//! Operations built on the dispatch helpers ([`Calculator::one_arg`],
//! [`Calculator::two_arg`], ...) follow one protocol: peek the operands
//! without popping, resolve their kinds, run the transform, and only then
//! pop the operands and push the results. A failing transform leaves the
//! stack untouched.

use std::sync::Arc;

use rpn_core::{
    CalcError, CalcResult, Flags, Kind, List, Matrix, StackEntry, Symbolic, Unit, Value,
};

use crate::config::{Config, ConfigError};
use crate::dispatch::{self, NumericEnv, Operand, Operands, TypeRules};
use crate::history::UndoHistory;
use crate::instruction::Instruction;
use crate::registry::OperationRegistry;
use crate::scope::Scopes;
use crate::stack::Stack;

/// Largest count accepted by variable-arity operations.
pub const MAX_AGGREGATE: usize = 1_000_000_000;

/// Limit on program and evaluation nesting.
pub const MAX_DEPTH: usize = 64;

impl From<ConfigError> for CalcError {
    fn from(e: ConfigError) -> Self {
        CalcError::InvalidArgument(e.to_string())
    }
}

pub struct Calculator {
    stack: Stack,
    config: Config,
    flags: Flags,
    scopes: Scopes,
    history: UndoHistory,
    registry: Arc<OperationRegistry>,
    depth: usize,
}

impl Calculator {
    pub fn new(config: Config, registry: Arc<OperationRegistry>) -> Self {
        Self {
            stack: Stack::with_max_size(config.max_stack),
            history: UndoHistory::new(config.undo_depth),
            config,
            flags: Flags::default(),
            scopes: Scopes::new(),
            registry,
            depth: 0,
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Direct stack access for structural operations (DUP, SWAP, ...).
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Change the configuration. The new configuration is validated first;
    /// on error nothing changes.
    pub fn update_config(&mut self, f: impl FnOnce(&mut Config)) -> CalcResult<()> {
        let mut config = self.config.clone();
        f(&mut config);
        config.validate()?;
        if let Some(max) = config.max_stack
            && self.stack.len() > max
        {
            return Err(CalcError::invalid(format!(
                "stack holds {} entries, more than max_stack {}",
                self.stack.len(),
                max
            )));
        }
        self.stack.set_max_size(config.max_stack);
        self.history.set_depth(config.undo_depth);
        self.config = config;
        Ok(())
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut Scopes {
        &mut self.scopes
    }

    pub fn registry(&self) -> &Arc<OperationRegistry> {
        &self.registry
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn env(&self) -> NumericEnv {
        self.config.numeric_env()
    }

    /// Wrap a value in an entry stamped with the current configuration.
    pub fn make_entry(&self, value: Value, unit: Unit) -> StackEntry {
        StackEntry::new(value, unit, self.config.entry_format())
    }

    /// Push an entry as-is, adopting its flags.
    pub fn push_entry(&mut self, entry: StackEntry) -> CalcResult<()> {
        let flags = entry.flags();
        self.stack.push(entry)?;
        self.flags = flags;
        Ok(())
    }

    pub fn push_value(&mut self, value: Value, unit: Unit) -> CalcResult<()> {
        let entry = self.make_entry(value, unit);
        self.push_entry(entry)
    }

    pub fn pop_entry(&mut self) -> CalcResult<StackEntry> {
        Ok(self.stack.pop()?)
    }

    /// Render every entry with its own stored display metadata, bottom first.
    pub fn display_stack(&self) -> Vec<String> {
        let options = self.config.format_options();
        self.stack
            .as_slice()
            .iter()
            .map(|entry| entry.display(&options))
            .collect()
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Fail unless the stack holds at least `needed` entries.
    pub fn check_args(&self, name: &str, needed: usize) -> CalcResult<()> {
        let available = self.stack.len();
        if available < needed {
            return Err(CalcError::InsufficientArguments {
                op: name.to_string(),
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Copy the top `count` entries without popping them, bottom first.
    pub fn peek_operands(&self, name: &str, count: usize) -> CalcResult<Operands> {
        self.check_args(name, count)?;
        let entries = self.stack.as_slice();
        Ok(entries[entries.len() - count..]
            .iter()
            .map(|e| Operand::new(e.value().clone(), e.unit().clone()))
            .collect())
    }

    /// Replace the top `consumed` entries with `results`.
    pub fn commit(&mut self, consumed: usize, results: impl IntoIterator<Item = Operand>) -> CalcResult<()> {
        let format = self.config.entry_format();
        let entries: Vec<StackEntry> = results
            .into_iter()
            .map(|r| StackEntry::new(r.value, r.unit, format))
            .collect();
        self.stack.ensure_room(consumed, entries.len())?;
        self.stack.pop_many(consumed)?;
        for entry in entries {
            self.push_entry(entry)?;
        }
        Ok(())
    }

    /// Generic fixed-arity dispatch producing one result.
    pub fn dispatch<F>(&mut self, name: &str, arity: usize, rules: &TypeRules, f: F) -> CalcResult<()>
    where
        F: Fn(&NumericEnv, &[Operand]) -> CalcResult<Operand>,
    {
        let operands = self.peek_operands(name, arity)?;
        let result = dispatch::apply(name, rules, &self.env(), &operands, &f)?;
        self.commit(arity, [result])
    }

    pub fn one_arg<F>(&mut self, name: &str, rules: &TypeRules, f: F) -> CalcResult<()>
    where
        F: Fn(&NumericEnv, &Operand) -> CalcResult<Operand>,
    {
        self.dispatch(name, 1, rules, |env, ops| f(env, &ops[0]))
    }

    pub fn two_arg<F>(&mut self, name: &str, rules: &TypeRules, f: F) -> CalcResult<()>
    where
        F: Fn(&NumericEnv, &Operand, &Operand) -> CalcResult<Operand>,
    {
        self.dispatch(name, 2, rules, |env, ops| f(env, &ops[0], &ops[1]))
    }

    pub fn three_arg<F>(&mut self, name: &str, rules: &TypeRules, f: F) -> CalcResult<()>
    where
        F: Fn(&NumericEnv, &Operand, &Operand, &Operand) -> CalcResult<Operand>,
    {
        self.dispatch(name, 3, rules, |env, ops| f(env, &ops[0], &ops[1], &ops[2]))
    }

    /// Dispatch producing any number of results. No broadcast or symbolic
    /// absorption takes place.
    pub fn dispatch_multi<F>(&mut self, name: &str, arity: usize, rules: &TypeRules, f: F) -> CalcResult<()>
    where
        F: Fn(&NumericEnv, &[Operand]) -> CalcResult<Vec<Operand>>,
    {
        let operands = self.peek_operands(name, arity)?;
        let env = self.env();
        let resolved = dispatch::resolve(name, rules, &operands, env.precision)?;
        let results = f(&env, &resolved)?;
        self.commit(arity, results)
    }

    /// Read the count on top of the stack for a variable-arity operation
    /// and check that `count` more entries sit below it.
    pub fn peek_count(&self, name: &str) -> CalcResult<usize> {
        self.check_args(name, 1)?;
        let count = self.stack.peek(0)?.value().to_index("count")?;
        if count > MAX_AGGREGATE {
            return Err(CalcError::invalid(format!(
                "{}: count {} exceeds {}",
                name, count, MAX_AGGREGATE
            )));
        }
        self.check_args(name, count + 1)?;
        Ok(count)
    }

    /// Fold the top `n` entries (count on top) pairwise with `f`. An empty
    /// fold yields `identity`.
    pub fn aggregate<F>(&mut self, name: &str, rules: &TypeRules, identity: Value, f: F) -> CalcResult<()>
    where
        F: Fn(&NumericEnv, &[Operand]) -> CalcResult<Operand>,
    {
        let count = self.peek_count(name)?;
        let mut operands = self.peek_operands(name, count + 1)?;
        operands.pop();
        let env = self.env();
        let mut items = operands.into_iter();
        let mut acc = items.next().unwrap_or_else(|| Operand::plain(identity));
        for next in items {
            acc = dispatch::apply(name, rules, &env, &[acc, next], &f)?;
        }
        self.commit(count + 1, [acc])
    }

    // ========================================================================
    // Instruction loop
    // ========================================================================

    /// Execute a sequence of instructions, reporting and skipping failures.
    pub fn run(&mut self, instructions: &[Instruction]) -> Vec<CalcError> {
        let mut errors = Vec::new();
        for instruction in instructions {
            if let Err(e) = self.run_one(instruction) {
                log::warn!("{:?} failed: {}", instruction, e);
                errors.push(e);
            }
        }
        errors
    }

    /// Execute one instruction.
    ///
    /// At top level the stack is restored if the instruction fails, and an
    /// undo snapshot is recorded if it succeeds and may have changed the
    /// stack.
    pub fn run_one(&mut self, instruction: &Instruction) -> CalcResult<()> {
        if self.depth > 0 {
            return self.execute(instruction);
        }
        let snapshot = self.stack.snapshot();
        let flags = self.flags;
        match self.execute(instruction) {
            Ok(()) => {
                if self.saves_undo(instruction) {
                    self.history.push(snapshot);
                }
                Ok(())
            }
            Err(e) => {
                self.stack.replace(snapshot);
                self.flags = flags;
                Err(e)
            }
        }
    }

    fn saves_undo(&self, instruction: &Instruction) -> bool {
        match instruction {
            Instruction::Noop => false,
            Instruction::Keyword(name) => {
                self.scopes.get(name).is_some()
                    || self.registry.get(name).is_some_and(|op| op.saves_undo())
            }
            _ => true,
        }
    }

    fn execute(&mut self, instruction: &Instruction) -> CalcResult<()> {
        log::debug!("execute {:?}", instruction);
        match instruction {
            Instruction::Noop => Ok(()),
            Instruction::Bool(b) => self.push_value(Value::integer(*b as i64), Unit::none()),
            Instruction::Number { value, unit } => self.push_value(value.clone(), unit.clone()),
            Instruction::List(items) => {
                let list = List::new(items.clone(), self.config.precision)?;
                self.push_value(Value::List(list), Unit::none())
            }
            Instruction::Matrix(rows) => {
                let matrix = Matrix::from_rows(rows.clone())?;
                self.push_value(Value::Matrix(matrix), Unit::none())
            }
            Instruction::Time(t) => self.push_value(Value::Time(t.clone()), Unit::none()),
            Instruction::FunctionRef(name) => {
                self.push_value(Value::Symbolic(Symbolic::function_ref(name.as_str())), Unit::none())
            }
            Instruction::Symbolic(expr) => self.push_value(Value::Symbolic(expr.clone()), Unit::none()),
            Instruction::Keyword(name) => self.execute_name(name),
            Instruction::Program(body) => {
                self.nested(|calc| {
                    calc.scopes.enter();
                    let result = body.iter().try_for_each(|i| calc.execute(i));
                    calc.scopes.exit();
                    result
                })
            }
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CalcResult<T>) -> CalcResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::invalid(format!("nesting deeper than {}", MAX_DEPTH)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run a keyword: a bound variable pushes its value, otherwise the
    /// named operation runs.
    pub fn execute_name(&mut self, name: &str) -> CalcResult<()> {
        if let Some(entry) = self.scopes.get(name).cloned() {
            return self.push_entry(entry);
        }
        let op = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))?;
        self.check_args(op.name(), op.min_args())?;
        op.op(self)
    }

    /// Restore the most recent undo snapshot.
    pub fn undo(&mut self) -> CalcResult<()> {
        let snapshot = self
            .history
            .pop()
            .ok_or_else(|| CalcError::Stack("no undo history".to_string()))?;
        self.stack.replace(snapshot);
        self.flags = self.stack.peek(0).map(|e| e.flags()).unwrap_or_default();
        Ok(())
    }

    // ========================================================================
    // Symbolic evaluation
    // ========================================================================

    /// Evaluate an expression: variables are substituted from the scopes and
    /// each application is replayed through the registry. Unbound variables
    /// keep the result symbolic.
    pub fn eval_symbolic(&mut self, expr: &Symbolic) -> CalcResult<Operand> {
        self.nested(|calc| calc.eval_node(expr))
    }

    fn eval_node(&mut self, expr: &Symbolic) -> CalcResult<Operand> {
        match expr {
            Symbolic::Var(name) => match self.scopes.get(name).cloned() {
                Some(entry) => self.eval_bound(entry),
                None => Ok(Operand::plain(expr.clone())),
            },
            Symbolic::Num(value) => Ok(Operand::plain(value.as_ref().clone())),
            Symbolic::Apply(name, args) if args.is_empty() => {
                if let Some(entry) = self.scopes.get(name).cloned() {
                    return self.eval_bound(entry);
                }
                match self.registry.get(name) {
                    Some(op) if op.num_args() == 0 => self.apply_isolated(name, Operands::new()),
                    _ => Ok(Operand::plain(expr.clone())),
                }
            }
            Symbolic::Apply(name, args) => {
                let mut evaluated = Operands::with_capacity(args.len());
                for arg in args.iter() {
                    evaluated.push(self.eval_symbolic(arg)?);
                }
                if evaluated.iter().any(|o| o.kind() == Kind::Symbolic) {
                    let args = evaluated
                        .into_iter()
                        .map(|o| Symbolic::from_value(o.value))
                        .collect();
                    return Ok(Operand::plain(Symbolic::apply(name.clone(), args)));
                }
                self.apply_isolated(name, evaluated)
            }
        }
    }

    fn eval_bound(&mut self, entry: StackEntry) -> CalcResult<Operand> {
        let unit = entry.unit().clone();
        match entry.into_value() {
            Value::Symbolic(inner) => self.eval_symbolic(&inner),
            value => Ok(Operand::new(value, unit)),
        }
    }

    /// Run the named operation on a scratch stack holding only `args` and
    /// return its single result.
    fn apply_isolated(&mut self, name: &str, args: Operands) -> CalcResult<Operand> {
        let op = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))?;
        let mut scratch = Stack::new();
        for arg in args {
            scratch.push(self.make_entry(arg.value, arg.unit))?;
        }
        let saved = std::mem::replace(&mut self.stack, scratch);
        let result = self
            .check_args(op.name(), op.min_args())
            .and_then(|()| op.op(self));
        let mut scratch = std::mem::replace(&mut self.stack, saved);
        result?;
        if scratch.len() != 1 {
            return Err(CalcError::invalid(format!(
                "{} left {} results in an expression",
                name,
                scratch.len()
            )));
        }
        let entry = scratch.pop()?;
        let unit = entry.unit().clone();
        Ok(Operand::new(entry.into_value(), unit))
    }
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("stack", &self.stack)
            .field("config", &self.config)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
