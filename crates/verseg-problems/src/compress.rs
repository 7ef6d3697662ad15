use core::ops::Index;
use verseg::{Domain, Result};

/// Maps arbitrary ordered values onto the dense ranks `[1, D]`
///
/// Ranks preserve order: `a < b` implies `rank(a) < rank(b)`. Duplicates share a rank.
#[derive(Debug, Clone)]
pub struct Discretizer<T> {
    values: Vec<T>,
}

impl<T: Ord + Clone> Discretizer<T> {
    /// Sorts and dedupes the given values
    pub fn new(mut values: Vec<T>) -> Self {
        values.sort_unstable();
        values.dedup();
        Self { values }
    }

    /// Returns the 1-based rank of `value` or `None` if it was never seen
    pub fn rank(&self, value: &T) -> Option<usize> {
        self.values.binary_search(value).ok().map(|idx| idx + 1)
    }

    /// Returns the number of distinct values less than or equal to `value`
    ///
    /// This is the largest rank whose value does not exceed `value`, or 0 if there is none.
    pub fn rank_upper(&self, value: &T) -> usize {
        self.values.partition_point(|v| v <= value)
    }

    /// Returns the value behind a rank
    pub fn value(&self, rank: usize) -> Option<&T> {
        rank.checked_sub(1).and_then(|idx| self.values.get(idx))
    }

    /// Returns the number of distinct values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no value was seen
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the domain `[1, D]` spanned by the ranks
    ///
    /// Fails with [verseg::Error::InvalidDomain] if there are no values.
    pub fn domain(&self) -> Result<Domain> {
        Domain::new(self.len())
    }
}

impl<T: Ord + Clone> FromIterator<T> for Discretizer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Discretizer<T> {
    type Output = T;

    /// Returns the value of a 1-based rank
    fn index(&self, rank: usize) -> &T {
        &self.values[rank - 1]
    }
}
