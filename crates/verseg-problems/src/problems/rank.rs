use super::PrefixVersions;
use verseg::Result;

/// Answers "how many values among array positions `[l, r]` are at most `x`"
#[derive(Debug)]
pub struct RangeRank<T> {
    inner: PrefixVersions<T>,
}

impl<T: Ord + Clone> RangeRank<T> {
    /// Indexes the array
    pub fn new(values: &[T]) -> Result<Self> {
        Ok(Self {
            inner: PrefixVersions::new(values)?,
        })
    }

    /// Returns the number of values `<= x` among positions `[l, r]`
    pub fn query(&self, l: usize, r: usize, x: &T) -> Result<u64> {
        let (low, high) = self.inner.window(l, r)?;
        match self.inner.discretizer.rank_upper(x) {
            0 => Ok(0),
            upper => {
                let count = self.inner.tree.range_difference(low, high, 1, upper)?;
                Ok(count.max(0) as u64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_values_below() {
        let values = [5, 1, 4, 2, 3, 4];
        let rank = RangeRank::new(&values).unwrap();
        assert_eq!(rank.query(1, 6, &4), Ok(5));
        assert_eq!(rank.query(1, 6, &0), Ok(0));
        assert_eq!(rank.query(2, 4, &3), Ok(2));
        // values between the seen ones
        assert_eq!(rank.query(1, 3, &10), Ok(3));
        assert_eq!(rank.query(3, 6, &4), Ok(4));
    }
}
