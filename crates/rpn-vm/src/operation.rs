//! The contract every calculator operation implements.

use rpn_core::CalcResult;

use crate::calculator::Calculator;

/// Documentation for an operation.
#[derive(Clone, Debug)]
pub struct OperationDoc {
    pub name: &'static str,
    pub brief: &'static str,
    pub stack: &'static str,
    pub example: &'static str,
    pub see_also: &'static [&'static str],
}

/// A named operation that can be looked up in the registry and run against
/// a calculator.
pub trait Operation: Send + Sync + 'static {
    /// Canonical name.
    fn name(&self) -> &'static str;

    /// Alternative names resolving to the same operation.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Arity contract. A non-negative value is an exact operand count; a
    /// negative value means variable arity with `|n|` as the minimum.
    fn num_args(&self) -> i32;

    /// Number of results pushed, negative when it varies.
    fn num_results(&self) -> i32 {
        1
    }

    /// Minimum number of stack entries the operation needs.
    fn min_args(&self) -> usize {
        self.num_args().unsigned_abs() as usize
    }

    /// Whether running this operation takes an undo snapshot first.
    /// Operations that never touch the stack return false.
    fn saves_undo(&self) -> bool {
        true
    }

    fn doc(&self) -> Option<OperationDoc> {
        None
    }

    /// One-line help text.
    fn help(&self) -> String {
        match self.doc() {
            Some(doc) => format!("{} {}  {}", doc.name, doc.stack, doc.brief),
            None => self.name().to_string(),
        }
    }

    /// Execute against the calculator. On error the caller restores the
    /// stack, but implementations using the dispatch helpers never leave
    /// partial results behind in the first place.
    fn op(&self, calc: &mut Calculator) -> CalcResult<()>;
}
