use super::{Aggregator, Countable, PartialAggregateType};

/// Partial aggregate holding both the sum of weights and the number of occurrences
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SumCount {
    /// Sum of all weights
    pub sum: i64,
    /// Number of occurrences
    pub count: i64,
}

impl SumCount {
    /// Creates a new partial aggregate
    pub const fn new(sum: i64, count: i64) -> Self {
        Self { sum, count }
    }
    /// Returns the average weight or `None` if there are no occurrences
    pub fn avg(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }
}

impl PartialAggregateType for SumCount {}

/// Maintains a SUM of weights and a COUNT of occurrences in the same node
///
/// The input is a `(weight, count)` delta. Inserting the value `x` once is typically expressed
/// as `(x, 1)` at the position of `x`, removing it as `(-x, -1)`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SumCountAggregator;

impl Aggregator for SumCountAggregator {
    const IDENTITY: Self::PartialAggregate = SumCount::new(0, 0);

    type Input = (i64, i64);
    type Aggregate = SumCount;
    type PartialAggregate = SumCount;

    #[inline]
    fn lift((sum, count): Self::Input) -> Self::PartialAggregate {
        SumCount::new(sum, count)
    }

    #[inline]
    fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate {
        SumCount::new(a.sum.saturating_add(b.sum), a.count.saturating_add(b.count))
    }

    #[inline]
    fn try_combine(
        a: Self::PartialAggregate,
        b: Self::PartialAggregate,
    ) -> Option<Self::PartialAggregate> {
        Some(SumCount::new(
            a.sum.checked_add(b.sum)?,
            a.count.checked_add(b.count)?,
        ))
    }

    #[inline]
    fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
        a
    }

    #[inline]
    fn is_underflow(a: &Self::PartialAggregate) -> bool {
        a.count < 0
    }
}

impl Countable for SumCountAggregator {
    #[inline]
    fn count(a: &Self::PartialAggregate) -> i64 {
        a.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, PersistentTree};

    #[test]
    fn sum_and_count_share_nodes() {
        let domain = Domain::new(10).unwrap();
        let mut tree: PersistentTree<SumCountAggregator> = PersistentTree::new(domain);
        let mut version = tree.latest();
        for value in [3i64, 7, 7, 10] {
            version = tree.insert(version, value as usize, (value, 1)).unwrap();
        }
        let all = tree.range_aggregate(version, 1, 10).unwrap();
        assert_eq!(all, SumCount::new(27, 4));
        assert_eq!(all.avg(), Some(6.75));
        assert_eq!(tree.range_aggregate(version, 4, 9), Ok(SumCount::new(14, 2)));

        // k-th smallest walks the count half of the aggregate
        assert_eq!(tree.kth(tree.first(), version, 3), Ok(7));
        assert_eq!(tree.kth(tree.first(), version, 4), Ok(10));
    }

    #[test]
    fn overflowing_sum_is_rejected() {
        let domain = Domain::new(4).unwrap();
        let mut tree: PersistentTree<SumCountAggregator> = PersistentTree::new(domain);
        let v1 = tree.insert(tree.first(), 1, (i64::MAX, 1)).unwrap();
        assert_eq!(
            tree.insert(v1, 4, (1, 1)),
            Err(crate::Error::Overflow { l: 1, r: 4 })
        );
        let v2 = tree.insert(v1, 4, (-1, 1)).unwrap();
        assert_eq!(tree.range_aggregate(v2, 1, 4), Ok(SumCount::new(i64::MAX - 1, 2)));
    }

    #[test]
    fn empty_average() {
        assert_eq!(SumCountAggregator::IDENTITY.avg(), None);
    }
}
