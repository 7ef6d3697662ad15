//! Range query problems solved with persistent segment trees
//!
//! - [problems::RangeKth]: k-th smallest value in an array window
//! - [problems::RangeRank]: number of values at most `x` in an array window
//! - [problems::FrequentValues]: number of values occurring more than `t` times in a window
//! - [problems::DistinctCount]: number of distinct values in a window
//!
//! Values are mapped onto a dense domain with a [compress::Discretizer] before they are
//! inserted. The [brute] module holds naive reference answers for each problem.
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod brute;
/// Value to rank mapping
pub mod compress;
/// Last position of every value
pub mod last_occurrence;
pub mod problems;
/// Randomized comparison of the drivers against the brute-force references
pub mod validate;

pub use compress::Discretizer;
pub use last_occurrence::LastOccurrence;
pub use problems::{DistinctCount, FrequentValues, RangeKth, RangeRank};
