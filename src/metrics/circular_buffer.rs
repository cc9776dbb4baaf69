use std::fmt;

/// Fixed-capacity FIFO used for the sparkline histories.
///
/// Pushing into a full buffer overwrites the oldest value. Iteration
/// always yields values oldest first.
#[derive(Clone)]
pub struct RollingHistory<T> {
    buffer: Vec<T>,
    write_pos: usize,
    capacity: usize,
}

impl<T> RollingHistory<T> {
    pub fn new(capacity: usize) -> Self {
        // a zero capacity would make `push` divide by zero
        let capacity = capacity.max(1);
        Self {
            buffer: Vec::with_capacity(capacity),
            write_pos: 0,
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(item);
        } else {
            self.buffer[self.write_pos] = item;
        }
        self.write_pos = (self.write_pos + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let head = if self.buffer.len() < self.capacity {
            0
        } else {
            self.write_pos
        };

        self.buffer[head..].iter().chain(&self.buffer[..head])
    }

    /// Most recently pushed value.
    pub fn last(&self) -> Option<&T> {
        if self.buffer.is_empty() {
            return None;
        }
        let idx = (self.write_pos + self.capacity - 1) % self.capacity;
        self.buffer.get(idx)
    }

    pub fn as_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for RollingHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_before_full() {
        let mut h = RollingHistory::new(4);
        h.push(1);
        h.push(2);
        h.push(3);
        assert_eq!(h.as_vec(), vec![1, 2, 3]);
        assert_eq!(h.last(), Some(&3));
    }

    #[test]
    fn evicts_oldest_first() {
        let mut h = RollingHistory::new(60);
        for i in 0..61 {
            h.push(i);
        }
        assert_eq!(h.len(), 60);
        assert_eq!(h.as_vec(), (1..61).collect::<Vec<_>>());
        assert_eq!(h.last(), Some(&60));
    }

    #[test]
    fn wraps_many_times() {
        let mut h = RollingHistory::new(3);
        for i in 0..10 {
            h.push(i);
        }
        assert_eq!(h.as_vec(), vec![7, 8, 9]);
    }

    #[test]
    fn empty_history() {
        let h: RollingHistory<f32> = RollingHistory::new(5);
        assert!(h.is_empty());
        assert_eq!(h.last(), None);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut h = RollingHistory::new(0);
        h.push('a');
        h.push('b');
        assert_eq!(h.as_vec(), vec!['b']);
    }
}
