mod build;
mod diff;
mod query;
#[cfg(feature = "serde")]
mod snapshot;
mod update;

cfg_profiler! {
    pub(crate) mod stats;
}

use crate::{
    aggregator::Aggregator,
    arena::{Arena, Node, NodeRef},
    cfg_profiler,
    domain::Domain,
    error::Result,
    options::Options,
    version::{VersionId, VersionTable},
};
use core::fmt;

#[cfg(feature = "profiler")]
use stats::Stats;

/// Explicit stack used by the iterative tree walks
///
/// Holds one frame per pending subtree; a walk never keeps more than two frames per level.
pub(crate) type WalkStack<T> = smallvec::SmallVec<[T; 64]>;

/// A persistent segment tree over the domain `[1, D]`
///
/// # How it works
///
/// Every node lives in an append-only [Arena] and is never modified after it has been created.
/// An [insert](PersistentTree::insert) copies the root-to-leaf path of the targeted position
/// (one new node per level) and points the copied nodes to the untouched subtrees of the parent
/// version. The result is a new version that shares all but `O(log D)` nodes with its parent
/// while the parent itself stays exactly as it was.
///
/// Versions are identified by [VersionId]s in creation order. Version 0 is created together with
/// the tree, either empty ([PersistentTree::new]) or from initial values
/// ([PersistentTree::build]). Any existing version may serve as the parent of an update, and any
/// retained version can be queried at any time.
///
/// ## Queries
///
/// - [range_aggregate](PersistentTree::range_aggregate) answers a range query within one version.
/// - [kth](PersistentTree::kth), [frequency_bounded_count](PersistentTree::frequency_bounded_count)
///   and [range_difference](PersistentTree::range_difference) walk two versions in lock-step and
///   subtract their counts, which answers questions about the updates made between them.
///
/// ## Example
///
/// ```
/// use verseg::{aggregator::sum::U64SumAggregator, Domain, PersistentTree};
///
/// let domain = Domain::new(4).unwrap();
/// let mut tree = PersistentTree::<U64SumAggregator>::build(domain, &[1, 2, 3, 4]).unwrap();
/// let v0 = tree.latest();
/// let v1 = tree.insert(v0, 3, 10).unwrap();
///
/// assert_eq!(tree.range_aggregate(v0, 2, 4), Ok(9));
/// assert_eq!(tree.range_aggregate(v1, 2, 4), Ok(19));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound = "", try_from = "snapshot::Snapshot<A>")
)]
#[derive(Clone)]
pub struct PersistentTree<A: Aggregator> {
    domain: Domain,
    options: Options,
    arena: Arena<A>,
    versions: VersionTable,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Stats,
}

impl<A: Aggregator> PersistentTree<A> {
    /// Creates a tree whose version 0 is empty, using the default [Options]
    pub fn new(domain: Domain) -> Self {
        Self::with_options(domain, Options::default())
    }

    /// Creates a tree whose version 0 is empty
    ///
    /// The empty tree is the [NodeRef::EMPTY] sentinel so no node is allocated.
    pub fn with_options(domain: Domain, options: Options) -> Self {
        let mut tree = Self::empty(domain, options);
        tree.versions.push(NodeRef::EMPTY, None);
        log::debug!(
            "created empty tree over [1, {}] with {:?}",
            domain.size(),
            options.capacity()
        );
        tree
    }

    fn empty(domain: Domain, options: Options) -> Self {
        Self {
            domain,
            options,
            arena: Arena::new(&options),
            versions: VersionTable::default(),
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }

    /// Returns the domain of the tree
    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns the options the tree was created with
    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the first version (version 0)
    #[inline]
    pub fn first(&self) -> VersionId {
        VersionId::new(0)
    }

    /// Returns the most recently created version
    #[inline]
    pub fn latest(&self) -> VersionId {
        // version 0 is created by every constructor
        self.versions.latest().unwrap_or(VersionId::EMPTY)
    }

    /// Returns the number of versions created so far
    #[inline]
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Returns the version table
    #[inline]
    pub fn versions(&self) -> &VersionTable {
        &self.versions
    }

    /// Returns the root node of a version
    #[inline]
    pub fn root(&self, version: VersionId) -> Result<NodeRef> {
        self.versions.root(version)
    }

    /// Returns the version a version was derived from
    #[inline]
    pub fn parent(&self, version: VersionId) -> Result<Option<VersionId>> {
        self.versions.parent(version)
    }

    /// Returns the node behind a reference obtained from this tree
    #[inline]
    pub fn node(&self, node: NodeRef) -> &Node<A::PartialAggregate> {
        self.arena.get(node)
    }

    /// Returns the number of allocated nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns the node arena
    #[inline]
    pub fn arena(&self) -> &Arena<A> {
        &self.arena
    }

    /// Returns the approximate number of bytes used by the tree
    pub fn size_bytes(&self) -> usize {
        self.arena.size_bytes()
            + self.versions.len() * core::mem::size_of::<(NodeRef, Option<VersionId>)>()
    }

    /// Returns the latency statistics of the tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<A: Aggregator> fmt::Debug for PersistentTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentTree")
            .field("domain", &self.domain)
            .field("versions", &self.versions.len())
            .field("arena", &self.arena)
            .finish()
    }
}
