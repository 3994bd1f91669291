use std::collections::VecDeque;

/// Fixed-capacity rolling window of samples, stored oldest-first.
///
/// Pushing into a full buffer evicts the oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingBuffer {
    /// Create an empty buffer. A capacity of zero is clamped to one; callers that
    /// need to reject zero do so before construction.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        self.prune();
    }

    fn prune(&mut self) {
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Contents oldest-first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
