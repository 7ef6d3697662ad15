use core::fmt::Debug;

/// Incremental COUNT aggregation with signed deltas
pub mod count;
/// Incremental MAX aggregation
pub mod max;
/// Incremental SUM aggregation
pub mod sum;
/// Combined SUM + COUNT aggregation
pub mod sum_count;

/// Aggregation interface that defines what every node of a [crate::PersistentTree] stores
///
/// An aggregator is a commutative monoid over [Self::PartialAggregate]: [Self::IDENTITY] is the
/// aggregate of the empty subtree and [Self::combine] merges the aggregates of two disjoint
/// sub-ranges. Updates [lift](Self::lift) their delta and combine it into the targeted leaf.
///
/// verseg provides a bunch of pre-defined aggregator implementations including:
/// - [sum]
/// - [count]
/// - [sum_count]
/// - [max]
///
/// # Example
///
/// Here is a simple example showing how to create a SUM aggregator using u32.
/// ```
/// use verseg::Aggregator;
///
/// #[derive(Default, Debug, Clone)]
/// struct MySumAggregator;
///
/// impl Aggregator for MySumAggregator {
///     const IDENTITY: Self::PartialAggregate = 0u32;
///     type Input = u32;
///     type Aggregate = u32;
///     type PartialAggregate = u32;
///
///     fn lift(input: Self::Input) -> Self::PartialAggregate {
///        input
///     }
///
///     fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate {
///        a + b
///     }
///
///     fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
///        a
///     }
/// }
/// ```
pub trait Aggregator: Default + Debug + Clone + 'static {
    /// Identity value for [Self::PartialAggregate].
    ///
    /// For example, for SUM types the identity value should be set to 0.
    const IDENTITY: Self::PartialAggregate;

    /// Input type of build values and update deltas
    type Input: InputBounds;

    /// Partial aggregate type stored in each node
    type PartialAggregate: PartialAggregateType;

    /// Final Aggregate type that can be lowered from a [Self::PartialAggregate].
    ///
    /// In many cases the [Self::PartialAggregate] type will be the same as [Self::Aggregate].
    /// An instance where it is not is an AVG function where the partial aggregate consists of a (sum, count)
    /// tuple and the final aggregate "average" is calculated through sum/count.
    type Aggregate: Debug + Send;

    /// Lifts [Self::Input] into a [Self::PartialAggregate]
    fn lift(input: Self::Input) -> Self::PartialAggregate;

    /// Combine two partial aggregates and produces a new [Self::PartialAggregate].
    ///
    /// Must be associative and commutative.
    fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate;

    /// Combines two partial aggregates or returns `None` if the result is not representable
    ///
    /// The tree combines exclusively through this method and reports `None` as
    /// [crate::Error::Overflow]. Defaults to `Some(Self::combine(a, b))`.
    #[inline]
    fn try_combine(
        a: Self::PartialAggregate,
        b: Self::PartialAggregate,
    ) -> Option<Self::PartialAggregate> {
        Some(Self::combine(a, b))
    }

    /// Lowers a [Self::PartialAggregate] into a final [Self::Aggregate].
    fn lower(a: Self::PartialAggregate) -> Self::Aggregate;

    /// Returns `true` if a leaf may not hold the given aggregate
    ///
    /// Builds and updates that would produce such a leaf are rejected with
    /// [crate::Error::Underflow]. Is `false` for all aggregates by default.
    #[inline]
    fn is_underflow(_a: &Self::PartialAggregate) -> bool {
        false
    }
}

/// An [Aggregator] whose partial aggregate carries an occurrence count
///
/// Counts of two versions can be subtracted from each other which enables the cross-version
/// queries [crate::PersistentTree::kth], [crate::PersistentTree::frequency_bounded_count] and
/// [crate::PersistentTree::range_difference].
///
/// The returned count must be exact and the difference of any two counts must fit an `i64`,
/// which rules out 64-bit sums.
pub trait Countable: Aggregator {
    /// Returns the number of occurrences represented by the partial aggregate
    fn count(a: &Self::PartialAggregate) -> i64;
}

/// Bounds for Aggregator Input
pub trait InputBounds: Debug + Clone + Copy + Send {}
impl<T> InputBounds for T where T: Debug + Clone + Copy + Send {}

/// Trait bounds for a partial aggregate type
#[cfg(not(feature = "serde"))]
pub trait PartialAggregateBounds: Default + Debug + Clone + Copy + Send + Sync {}

/// Trait bounds for a partial aggregate type
#[cfg(feature = "serde")]
pub trait PartialAggregateBounds:
    Default + Debug + Clone + Copy + Send + Sync + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> PartialAggregateBounds for T where T: Default + Debug + Clone + Copy + Send + Sync {}

#[cfg(feature = "serde")]
impl<T> PartialAggregateBounds for T where
    T: Default
        + Debug
        + Clone
        + Copy
        + Send
        + Sync
        + serde::Serialize
        + for<'a> serde::Deserialize<'a>
{
}

/// An immutable partial aggregate type
pub trait PartialAggregateType: PartialAggregateBounds {}

macro_rules! primitive_partial {
    ($type:ty) => {
        impl PartialAggregateType for $type {}
    };
}

primitive_partial!(u8);
primitive_partial!(u16);
primitive_partial!(u32);
primitive_partial!(u64);
primitive_partial!(i8);
primitive_partial!(i16);
primitive_partial!(i32);
primitive_partial!(i64);
primitive_partial!(f32);
primitive_partial!(f64);
primitive_partial!(i128);
primitive_partial!(u128);

macro_rules! tuple_partial {
    ( $( $name:ident )+ ) => {
        impl<$($name: PartialAggregateType),+> PartialAggregateType for ($($name,)+)
        {
        }
    };
}

tuple_partial!(A B);
tuple_partial!(A B C);
tuple_partial!(A B C D);
