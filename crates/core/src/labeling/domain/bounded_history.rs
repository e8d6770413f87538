use std::collections::VecDeque;

/// Fixed-capacity FIFO: pushing onto a full history evicts the oldest entry.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// A zero capacity is raised to one so the latest entry is always kept.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.items.iter()
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.items.iter().skip(self.items.len().saturating_sub(n))
    }
}

impl<T: PartialEq> BoundedHistory<T> {
    pub fn count(&self, item: &T) -> usize {
        self.items.iter().filter(|i| *i == item).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity_keeps_order() {
        let mut h = BoundedHistory::new(3);
        h.push(1);
        h.push(2);
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(h.last(), Some(&2));
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut h = BoundedHistory::new(3);
        for i in 1..=5 {
            h.push(i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_recent_window() {
        let mut h = BoundedHistory::new(8);
        for i in 1..=6 {
            h.push(i);
        }
        assert_eq!(h.recent(3).copied().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(h.recent(10).count(), 6);
    }

    #[test]
    fn test_count() {
        let mut h = BoundedHistory::new(4);
        for c in ['a', 'b', 'a', 'a'] {
            h.push(c);
        }
        assert_eq!(h.count(&'a'), 3);
        assert_eq!(h.count(&'z'), 0);
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut h = BoundedHistory::new(0);
        h.push(1);
        h.push(2);
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.last(), Some(&2));
        assert_eq!(h.len(), 1);
    }
}
