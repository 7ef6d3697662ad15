//! verseg is a persistent (versioned) segment tree.
//!
//! Every point update produces a new version of the tree in `O(log D)` extra time and space
//! while all previously produced versions stay valid, queryable and untouched. Versions share
//! every subtree that an update did not touch, and all nodes live in a single append-only
//! arena addressed by [NodeRef] indices.
//!
//! The tree indexes a dense domain `[1, D]` ([Domain]) and stores a partial aggregate per node
//! that is defined by an [Aggregator] (a commutative monoid). Aggregators that carry an
//! occurrence count ([Countable]) additionally unlock queries across two versions such as
//! [PersistentTree::kth] and [PersistentTree::frequency_bounded_count].
//!
//! ## Example
//!
//! ```
//! use verseg::{aggregator::count::CountAggregator, Domain, PersistentTree};
//!
//! let domain = Domain::new(5).unwrap();
//! let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
//!
//! let mut versions = vec![tree.latest()];
//! for value in [5, 1, 4, 2, 3] {
//!     let parent = *versions.last().unwrap();
//!     versions.push(tree.insert(parent, value, 1).unwrap());
//! }
//!
//! // 3rd smallest value among {5, 1, 4, 2, 3}
//! assert_eq!(tree.kth(versions[0], versions[5], 3), Ok(3));
//! // values inserted by the first two updates that fall within [1, 4]
//! assert_eq!(tree.range_difference(versions[0], versions[2], 1, 4), Ok(1));
//! // older versions are not affected by later updates
//! assert_eq!(tree.range_aggregate(versions[1], 1, 5), Ok(1));
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(nonstandard_style, missing_copy_implementations, missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod macros;

/// Aggregation interface and pre-defined aggregators
///
/// Contains the [Aggregator] trait that defines what each node of the tree stores together with
/// a number of pre-defined aggregators (SUM, COUNT, SUM+COUNT, MAX).
pub mod aggregator;
/// Append-only node storage
pub mod arena;
mod domain;
mod error;
mod options;
/// Persistent segment tree
pub mod tree;
mod version;

cfg_sync! {
    /// Thread-safe handle over a [PersistentTree]
    pub mod sync;
    pub use sync::SharedTree;
}

pub use aggregator::{Aggregator, Countable};
pub use arena::{Node, NodeRef};
pub use domain::Domain;
pub use error::{Error, Result};
pub use options::{Capacity, Options};
pub use tree::PersistentTree;
pub use version::{VersionId, VersionTable};

#[cfg(feature = "profiler")]
pub use tree::stats::Stats;
