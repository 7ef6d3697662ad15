use super::PrefixVersions;
use verseg::Result;

/// Answers "what is the k-th smallest value among array positions `[l, r]`"
#[derive(Debug)]
pub struct RangeKth<T> {
    inner: PrefixVersions<T>,
}

impl<T: Ord + Clone> RangeKth<T> {
    /// Indexes the array
    ///
    /// Fails if the array is empty.
    pub fn new(values: &[T]) -> Result<Self> {
        Ok(Self {
            inner: PrefixVersions::new(values)?,
        })
    }

    /// Returns the `k`-th (1-based) smallest value among positions `[l, r]`
    ///
    /// Fails with [verseg::Error::InvalidRange] for an invalid window and
    /// [verseg::Error::RankOutOfRange] unless `1 <= k <= r - l + 1`.
    pub fn query(&self, l: usize, r: usize, k: u64) -> Result<&T> {
        let (low, high) = self.inner.window(l, r)?;
        let rank = self.inner.tree.kth(low, high, k)?;
        Ok(&self.inner.discretizer[rank])
    }

    /// Returns the length of the indexed array
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the indexed array is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
