use core::hash::Hash;
use hashbrown::HashMap;

/// Remembers the most recent array position of every value
#[derive(Debug, Clone)]
pub struct LastOccurrence<T> {
    positions: HashMap<T, usize>,
}

impl<T> Default for LastOccurrence<T> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }
}

impl<T: Hash + Eq> LastOccurrence<T> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `pos` as the last occurrence of `value` and returns the previous one
    pub fn replace(&mut self, value: T, pos: usize) -> Option<usize> {
        self.positions.insert(value, pos)
    }

    /// Returns the last recorded position of `value`
    pub fn get(&self, value: &T) -> Option<usize> {
        self.positions.get(value).copied()
    }

    /// Returns the number of distinct values seen
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no value was recorded
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
