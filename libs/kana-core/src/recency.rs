//! Short-term memory of recently shown items.

use std::collections::VecDeque;

/// Default number of ids remembered.
pub const DEFAULT_RECENT_WINDOW: usize = 6;

/// Bounded FIFO of item ids, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyQueue {
    ids: VecDeque<String>,
    capacity: usize,
}

impl Default for RecencyQueue {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_WINDOW)
    }
}

impl RecencyQueue {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ids: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|recent| recent == id)
    }

    /// Append `id`, evicting the oldest entry on overflow.
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push_back(id.into());
        while self.ids.len() > self.capacity {
            self.ids.pop_front();
        }
    }

    /// Most recently pushed id.
    pub fn last(&self) -> Option<&str> {
        self.ids.back().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_on_overflow() {
        let mut queue = RecencyQueue::new(3);
        for id in ["a", "i", "u", "e"] {
            queue.push(id);
        }
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["i", "u", "e"]);
        assert!(!queue.contains("a"));
        assert_eq!(queue.last(), Some("e"));
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut queue = RecencyQueue::new(0);
        queue.push("ka");
        queue.push("ki");
        assert_eq!(queue.len(), 1);
        assert!(queue.contains("ki"));
    }

    #[test]
    fn clear_empties() {
        let mut queue = RecencyQueue::default();
        queue.push("sa");
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), DEFAULT_RECENT_WINDOW);
    }
}
