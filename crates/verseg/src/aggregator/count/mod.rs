use super::{Aggregator, Countable};

/// Counts occurrences per domain position
///
/// Deltas are signed so that callers can remove a previously inserted occurrence (for example
/// when moving the "last occurrence" of a value to a newer array position). A leaf whose count
/// would drop below zero is rejected with [crate::Error::Underflow].
#[derive(Default, Debug, Clone, Copy)]
pub struct CountAggregator;

impl Aggregator for CountAggregator {
    const IDENTITY: Self::PartialAggregate = 0;

    type Input = i64;
    type Aggregate = u64;
    type PartialAggregate = i64;

    #[inline]
    fn lift(input: Self::Input) -> Self::PartialAggregate {
        input
    }

    #[inline]
    fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate {
        a.saturating_add(b)
    }

    #[inline]
    fn try_combine(
        a: Self::PartialAggregate,
        b: Self::PartialAggregate,
    ) -> Option<Self::PartialAggregate> {
        a.checked_add(b)
    }

    #[inline]
    fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
        a.max(0) as u64
    }

    #[inline]
    fn is_underflow(a: &Self::PartialAggregate) -> bool {
        *a < 0
    }
}

impl Countable for CountAggregator {
    #[inline]
    fn count(a: &Self::PartialAggregate) -> i64 {
        *a
    }
}
