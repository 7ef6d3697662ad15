use super::Aggregator;

macro_rules! max_impl {
    ($struct:tt, $type:ty, $pa:tt) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Aggregator for $struct {
            const IDENTITY: Self::PartialAggregate = <$pa>::MIN;

            type Input = $type;
            type Aggregate = $type;
            type PartialAggregate = $pa;

            #[inline]
            fn lift(input: Self::Input) -> Self::PartialAggregate {
                input
            }

            #[inline]
            fn combine(
                a: Self::PartialAggregate,
                b: Self::PartialAggregate,
            ) -> Self::PartialAggregate {
                if a > b { a } else { b }
            }

            #[inline]
            fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
                a
            }
        }
    };
}

max_impl!(U64MaxAggregator, u64, u64);
max_impl!(I64MaxAggregator, i64, i64);
