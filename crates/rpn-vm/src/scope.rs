//! Variable scopes.
//!
//! Scopes form a stack of frames. The bottom frame is the global scope and
//! is never removed; program blocks push a frame on entry and pop it on exit.
//! Lookup walks from the innermost frame outwards.

use std::collections::HashMap;

use rpn_core::StackEntry;

/// A single frame of variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    bindings: HashMap<String, StackEntry>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable in this frame.
    pub fn bind(&mut self, name: &str, entry: StackEntry) {
        self.bindings.insert(name.to_string(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&StackEntry> {
        self.bindings.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<StackEntry> {
        self.bindings.remove(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// The stack of variable frames.
#[derive(Clone, Debug)]
pub struct Scopes {
    frames: Vec<Frame>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// Create scopes holding only the global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    /// Number of frames, including the global one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn enter(&mut self) {
        self.frames.push(Frame::new());
        log::trace!("enter scope (depth {})", self.frames.len());
    }

    /// Leave the innermost scope. The global scope cannot be left.
    pub fn exit(&mut self) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        self.frames.pop();
        log::trace!("exit scope (depth {})", self.frames.len());
        true
    }

    /// Look a variable up, innermost frame first.
    pub fn get(&self, name: &str) -> Option<&StackEntry> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    /// Assign a variable: updates the innermost frame that already binds
    /// `name`, otherwise binds it in the innermost frame.
    pub fn set(&mut self, name: &str, entry: StackEntry) {
        let frame = match self.frames.iter().rposition(|f| f.has(name)) {
            Some(i) => &mut self.frames[i],
            None => self.innermost(),
        };
        frame.bind(name, entry);
    }

    /// Remove the innermost binding of `name`.
    pub fn unset(&mut self, name: &str) -> Option<StackEntry> {
        self.frames.iter_mut().rev().find_map(|f| f.remove(name))
    }

    fn innermost(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpn_core::Value;

    fn int(n: i64) -> StackEntry {
        StackEntry::plain(Value::integer(n))
    }

    #[test]
    fn inner_scope_shadows_and_disappears() {
        let mut scopes = Scopes::new();
        scopes.set("x", int(1));
        scopes.enter();
        scopes.innermost().bind("x", int(2));
        assert_eq!(scopes.get("x"), Some(&int(2)));
        assert!(scopes.exit());
        assert_eq!(scopes.get("x"), Some(&int(1)));
    }

    #[test]
    fn set_updates_existing_outer_binding() {
        let mut scopes = Scopes::new();
        scopes.set("x", int(1));
        scopes.enter();
        scopes.set("x", int(5));
        scopes.set("y", int(6));
        scopes.exit();
        assert_eq!(scopes.get("x"), Some(&int(5)));
        assert_eq!(scopes.get("y"), None);
    }

    #[test]
    fn global_scope_cannot_be_left() {
        let mut scopes = Scopes::new();
        assert!(!scopes.exit());
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn unset_removes_innermost() {
        let mut scopes = Scopes::new();
        scopes.set("x", int(1));
        assert_eq!(scopes.unset("x"), Some(int(1)));
        assert_eq!(scopes.unset("x"), None);
    }
}
