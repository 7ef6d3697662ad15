use crate::{
    aggregator::{Aggregator, Countable},
    domain::Domain,
    error::Result,
    options::Options,
    tree::PersistentTree,
    version::VersionId,
};
use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock};
use std::sync::Arc;

/// The lock you get from [`SharedTree::read`].
pub type TreeRef<'a, A> = MappedRwLockReadGuard<'a, PersistentTree<A>>;
/// The lock you get from [`SharedTree::write`].
pub type TreeRefMut<'a, A> = MappedRwLockWriteGuard<'a, PersistentTree<A>>;

/// A [PersistentTree] that may be shared across threads
///
/// Clones point to the same tree. Queries take a read lock and may run concurrently with each
/// other, while [insert](SharedTree::insert) takes the write lock. Since nodes are immutable,
/// a version handed out by one thread can be queried by any other thread.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
#[derive(Clone)]
pub struct SharedTree<A: Aggregator> {
    inner: Arc<RwLock<PersistentTree<A>>>,
}

impl<A: Aggregator> SharedTree<A> {
    /// Creates a shared tree whose version 0 is empty
    pub fn new(domain: Domain) -> Self {
        Self::from(PersistentTree::new(domain))
    }

    /// Creates a shared tree whose version 0 is empty with the given options
    pub fn with_options(domain: Domain, options: Options) -> Self {
        Self::from(PersistentTree::with_options(domain, options))
    }

    /// Returns a read guard to the underlying tree
    #[inline(always)]
    pub fn read(&self) -> TreeRef<'_, A> {
        parking_lot::RwLockReadGuard::map(self.inner.read(), |v| v)
    }

    /// Returns a write guard to the underlying tree
    #[inline(always)]
    pub fn write(&self) -> TreeRefMut<'_, A> {
        parking_lot::RwLockWriteGuard::map(self.inner.write(), |v| v)
    }

    /// See [PersistentTree::insert]
    pub fn insert(&self, parent: VersionId, pos: usize, delta: A::Input) -> Result<VersionId> {
        self.write().insert(parent, pos, delta)
    }

    /// See [PersistentTree::range_aggregate]
    pub fn range_aggregate(
        &self,
        version: VersionId,
        l: usize,
        r: usize,
    ) -> Result<A::PartialAggregate> {
        self.read().range_aggregate(version, l, r)
    }

    /// See [PersistentTree::range_aggregate_and_lower]
    pub fn range_aggregate_and_lower(
        &self,
        version: VersionId,
        l: usize,
        r: usize,
    ) -> Result<A::Aggregate> {
        self.read().range_aggregate_and_lower(version, l, r)
    }

    /// See [PersistentTree::get]
    pub fn get(&self, version: VersionId, pos: usize) -> Result<A::PartialAggregate> {
        self.read().get(version, pos)
    }

    /// Returns the first version
    pub fn first(&self) -> VersionId {
        self.read().first()
    }

    /// Returns the most recently created version
    pub fn latest(&self) -> VersionId {
        self.read().latest()
    }

    /// Returns the number of versions created so far
    pub fn version_count(&self) -> usize {
        self.read().version_count()
    }

    /// Returns the domain of the tree
    pub fn domain(&self) -> Domain {
        self.read().domain()
    }
}

impl<A: Countable> SharedTree<A> {
    /// See [PersistentTree::kth]
    pub fn kth(&self, low: VersionId, high: VersionId, k: u64) -> Result<usize> {
        self.read().kth(low, high, k)
    }

    /// See [PersistentTree::frequency_bounded_count]
    pub fn frequency_bounded_count(
        &self,
        low: VersionId,
        high: VersionId,
        threshold: i64,
    ) -> Result<u64> {
        self.read().frequency_bounded_count(low, high, threshold)
    }

    /// See [PersistentTree::range_difference]
    pub fn range_difference(
        &self,
        low: VersionId,
        high: VersionId,
        l: usize,
        r: usize,
    ) -> Result<i64> {
        self.read().range_difference(low, high, l, r)
    }
}

impl<A: Aggregator> From<PersistentTree<A>> for SharedTree<A> {
    fn from(tree: PersistentTree<A>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }
}

impl<A: Aggregator> core::fmt::Debug for SharedTree<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SharedTree").field(&*self.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::count::CountAggregator;

    #[test]
    fn concurrent_readers_and_writer() {
        let tree: SharedTree<CountAggregator> = SharedTree::new(Domain::new(64).unwrap());
        let first = tree.first();

        let writer = {
            let tree = tree.clone();
            std::thread::spawn(move || {
                let mut version = tree.first();
                for value in 1..=64 {
                    version = tree.insert(version, value, 1).unwrap();
                }
                version
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let tree = tree.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let latest = tree.latest();
                        let count = tree.range_aggregate(latest, 1, 64).unwrap();
                        assert_eq!(count as usize, latest.get() as usize);
                        assert_eq!(tree.range_aggregate(first, 1, 64), Ok(0));
                    }
                })
            })
            .collect();

        let last = writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(tree.version_count(), 65);
        assert_eq!(tree.kth(first, last, 10), Ok(10));
        assert_eq!(tree.frequency_bounded_count(first, last, 0), Ok(64));
    }
}
