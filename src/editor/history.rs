//! Snapshot-based undo stack.

use std::collections::VecDeque;

/// A current value plus the stack of values it replaced.
///
/// Every [`set`](Self::set) or [`update`](Self::update) pushes the outgoing
/// value; [`undo`](Self::undo) pops the most recent one back into place.
/// There is no redo. With a limit, the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct History<V> {
    current: V,
    past: VecDeque<V>,
    limit: Option<usize>,
}

impl<V: Default> Default for History<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V> History<V> {
    /// Unbounded history starting at `initial`.
    pub fn new(initial: V) -> Self {
        Self {
            current: initial,
            past: VecDeque::new(),
            limit: None,
        }
    }

    /// History retaining at most `limit` undo entries.
    pub fn with_limit(initial: V, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(initial)
        }
    }

    /// The current value.
    pub fn current(&self) -> &V {
        &self.current
    }

    /// Whether [`undo`](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Number of retained undo entries.
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    /// Replace the current value, remembering the old one.
    pub fn set(&mut self, next: V) {
        let prev = std::mem::replace(&mut self.current, next);
        self.push(prev);
    }

    /// Restore the most recent previous value. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    /// Drop every undo entry and start over from `value`.
    pub fn reset(&mut self, value: V) {
        self.current = value;
        self.past.clear();
    }

    fn push(&mut self, prev: V) {
        if self.limit == Some(0) {
            return;
        }
        self.past.push_back(prev);
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                let _ = self.past.pop_front();
            }
        }
    }
}

impl<V: Clone> History<V> {
    /// Replace the current value with `f(current)`, remembering the old one.
    pub fn update(&mut self, f: impl FnOnce(&V) -> V) {
        let next = f(&self.current);
        self.set(next);
    }
}
