//! Undo history of stack snapshots.

use std::collections::VecDeque;

use rpn_core::StackEntry;

/// Bounded (or unbounded, with depth 0) history of whole-stack snapshots.
#[derive(Clone, Debug, Default)]
pub struct UndoHistory {
    snapshots: VecDeque<Vec<StackEntry>>,
    depth: usize,
}

impl UndoHistory {
    pub fn new(depth: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            depth,
        }
    }

    /// Change the depth limit, dropping the oldest snapshots if needed.
    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        self.truncate();
    }

    pub fn push(&mut self, snapshot: Vec<StackEntry>) {
        self.snapshots.push_back(snapshot);
        self.truncate();
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<Vec<StackEntry>> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    fn truncate(&mut self) {
        if self.depth == 0 {
            return;
        }
        while self.snapshots.len() > self.depth {
            self.snapshots.pop_front();
            log::warn!("undo history truncated to {} snapshots", self.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpn_core::Value;

    fn snap(n: i64) -> Vec<StackEntry> {
        vec![StackEntry::plain(Value::integer(n))]
    }

    #[test]
    fn most_recent_first() {
        let mut history = UndoHistory::new(0);
        history.push(snap(1));
        history.push(snap(2));
        assert_eq!(history.pop(), Some(snap(2)));
        assert_eq!(history.pop(), Some(snap(1)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn depth_limit_drops_oldest() {
        let mut history = UndoHistory::new(2);
        for n in 0..5 {
            history.push(snap(n));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(snap(4)));
        assert_eq!(history.pop(), Some(snap(3)));
    }

    #[test]
    fn shrinking_depth_truncates() {
        let mut history = UndoHistory::new(0);
        for n in 0..4 {
            history.push(snap(n));
        }
        history.set_depth(1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop(), Some(snap(3)));
    }
}
