use super::PrefixVersions;
use verseg::Result;

/// Answers "how many distinct values occur more than `t` times among array positions `[l, r]`"
///
/// With `t = 0` this is the number of distinct values in the window.
#[derive(Debug)]
pub struct FrequentValues<T> {
    inner: PrefixVersions<T>,
}

impl<T: Ord + Clone> FrequentValues<T> {
    /// Indexes the array
    pub fn new(values: &[T]) -> Result<Self> {
        Ok(Self {
            inner: PrefixVersions::new(values)?,
        })
    }

    /// Returns the number of distinct values occurring more than `threshold` times in `[l, r]`
    pub fn query(&self, l: usize, r: usize, threshold: u64) -> Result<u64> {
        let (low, high) = self.inner.window(l, r)?;
        let threshold = i64::try_from(threshold).unwrap_or(i64::MAX);
        self.inner
            .tree
            .frequency_bounded_count(low, high, threshold)
    }
}
