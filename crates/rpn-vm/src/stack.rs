//! Calculator evaluation stack.
//!
//! The stack holds `StackEntry` objects and provides standard stack operations
//! plus calculator-specific operations like PICK and ROLL.

use rpn_core::{CalcError, StackEntry};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack underflow")]
    Underflow,
    /// Depth or PICK/ROLL level outside the stack.
    #[error("invalid stack index: {0}")]
    InvalidIndex(usize),
    #[error("stack overflow: limit is {limit} entries")]
    Overflow { limit: usize },
}

impl From<StackError> for CalcError {
    fn from(e: StackError) -> Self {
        CalcError::Stack(e.to_string())
    }
}

/// The calculator evaluation stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    items: Vec<StackEntry>,
    max_size: Option<usize>,
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            max_size: None,
        }
    }

    /// Create a stack with a maximum size limit.
    pub fn with_max_size(max: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            max_size: max,
        }
    }

    pub fn set_max_size(&mut self, max: Option<usize>) {
        self.max_size = max;
    }

    /// Get the number of entries on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fail unless removing `remove` entries and adding `add` stays within
    /// the limit.
    pub fn ensure_room(&self, remove: usize, add: usize) -> Result<(), StackError> {
        match self.max_size {
            Some(limit) if self.items.len().saturating_sub(remove) + add > limit => {
                Err(StackError::Overflow { limit })
            }
            _ => Ok(()),
        }
    }

    /// Push an entry onto the stack.
    pub fn push(&mut self, entry: StackEntry) -> Result<(), StackError> {
        self.ensure_room(0, 1)?;
        self.items.push(entry);
        Ok(())
    }

    /// Pop an entry from the stack.
    pub fn pop(&mut self) -> Result<StackEntry, StackError> {
        self.items.pop().ok_or(StackError::Underflow)
    }

    /// Get a reference to an entry at a given depth (0 = top).
    pub fn peek(&self, depth: usize) -> Result<&StackEntry, StackError> {
        if depth >= self.items.len() {
            return Err(StackError::InvalidIndex(depth));
        }
        Ok(&self.items[self.items.len() - 1 - depth])
    }

    /// Clear the stack.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get a slice of all entries (bottom to top).
    pub fn as_slice(&self) -> &[StackEntry] {
        &self.items
    }

    /// Replace the whole contents, e.g. when restoring an undo snapshot.
    pub fn replace(&mut self, items: Vec<StackEntry>) {
        self.items = items;
    }

    /// Deep copy of the contents.
    pub fn snapshot(&self) -> Vec<StackEntry> {
        self.items.clone()
    }

    /// Duplicate the top entry (DUP).
    pub fn dup(&mut self) -> Result<(), StackError> {
        let top = self.peek(0).map_err(|_| StackError::Underflow)?.clone();
        self.push(top)
    }

    /// Drop the top entry (DROP).
    pub fn drop(&mut self) -> Result<(), StackError> {
        self.pop()?;
        Ok(())
    }

    /// Swap the top two entries (SWAP).
    pub fn swap(&mut self) -> Result<(), StackError> {
        let len = self.items.len();
        if len < 2 {
            return Err(StackError::Underflow);
        }
        self.items.swap(len - 1, len - 2);
        Ok(())
    }

    /// Rotate top three entries: 3 2 1 -> 2 1 3 (ROT).
    pub fn rot(&mut self) -> Result<(), StackError> {
        let len = self.items.len();
        if len < 3 {
            return Err(StackError::Underflow);
        }
        let bottom = self.items.remove(len - 3);
        self.items.push(bottom);
        Ok(())
    }

    /// Copy second entry to top (OVER).
    pub fn over(&mut self) -> Result<(), StackError> {
        if self.items.len() < 2 {
            return Err(StackError::Underflow);
        }
        let entry = self.items[self.items.len() - 2].clone();
        self.push(entry)
    }

    /// Copy the nth entry to top (PICK). n=1 is DUP.
    pub fn pick(&mut self, n: usize) -> Result<(), StackError> {
        if n == 0 || n > self.items.len() {
            return Err(StackError::InvalidIndex(n));
        }
        let entry = self.items[self.items.len() - n].clone();
        self.push(entry)
    }

    /// Move the nth entry to top, shifting others down (ROLL). n=1 is no-op, n=2 is SWAP.
    pub fn roll(&mut self, n: usize) -> Result<(), StackError> {
        if n == 0 || n > self.items.len() {
            return Err(StackError::InvalidIndex(n));
        }
        let idx = self.items.len() - n;
        let entry = self.items.remove(idx);
        self.items.push(entry);
        Ok(())
    }

    /// Pop multiple entries at once (returns in pop order: top first).
    pub fn pop_many(&mut self, count: usize) -> Result<Vec<StackEntry>, StackError> {
        if count > self.items.len() {
            return Err(StackError::Underflow);
        }
        let at = self.items.len() - count;
        let mut popped = self.items.split_off(at);
        popped.reverse();
        Ok(popped)
    }
}
