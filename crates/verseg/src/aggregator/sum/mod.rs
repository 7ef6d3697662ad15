use super::{Aggregator, Countable};

macro_rules! sum_impl {
    ($struct:tt, $type:ty, $pa:tt) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Aggregator for $struct {
            const IDENTITY: Self::PartialAggregate = 0 as $pa;

            type Input = $type;
            type Aggregate = $type;
            type PartialAggregate = $pa;

            #[inline]
            fn lift(input: Self::Input) -> Self::PartialAggregate {
                input.into()
            }

            #[inline]
            fn combine(
                a: Self::PartialAggregate,
                b: Self::PartialAggregate,
            ) -> Self::PartialAggregate {
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
                a.into()
            }
        }
    };
}

macro_rules! countable_sum {
    ($struct:tt) => {
        impl Countable for $struct {
            #[inline]
            fn count(a: &Self::PartialAggregate) -> i64 {
                i64::from(*a)
            }
        }
    };
}

sum_impl!(U32SumAggregator, u32, u32);
sum_impl!(U64SumAggregator, u64, u64);
sum_impl!(I32SumAggregator, i32, i32);
sum_impl!(I64SumAggregator, i64, i64);

// 32-bit sums widen losslessly, 64-bit sums are not countable
countable_sum!(U32SumAggregator);
countable_sum!(I32SumAggregator);

/// Floating point SUM aggregation
#[derive(Default, Debug, Clone, Copy)]
pub struct F64SumAggregator;

impl Aggregator for F64SumAggregator {
    const IDENTITY: Self::PartialAggregate = 0.0;

    type Input = f64;
    type Aggregate = f64;
    type PartialAggregate = f64;

    #[inline]
    fn lift(input: Self::Input) -> Self::PartialAggregate {
        input
    }

    #[inline]
    fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate {
        a + b
    }

    #[inline]
    fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
        a
    }
}
