//! Queries across two versions
//!
//! All queries in here walk the trees of a `low` and a `high` version in lock-step and subtract
//! the counts of corresponding nodes. With one insert per array position, where version `i` is
//! derived from version `i - 1`, the difference between versions `l - 1` and `r` describes the
//! multiset of values inserted for the array positions `[l, r]`.
//!
//! Whether `high` actually derives from `low` is not verified. If it does not, results are
//! still computed from the subtracted counts but carry no particular meaning.

use super::{PersistentTree, WalkStack};
use crate::{
    aggregator::Countable,
    arena::NodeRef,
    domain::Domain,
    error::{Error, Result},
    version::VersionId,
};

#[cfg(feature = "profiler")]
use verseg_stats::profile_scope;

impl<A: Countable> PersistentTree<A> {
    /// Returns the domain position of the `k`-th smallest (1-based) value inserted between
    /// `low` and `high`
    ///
    /// Fails with [Error::RankOutOfRange] unless `0 < k <= count(high) - count(low)`.
    ///
    /// # Example
    ///
    /// ```
    /// use verseg::{aggregator::count::CountAggregator, Domain, PersistentTree};
    ///
    /// let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(Domain::new(9).unwrap());
    /// let v0 = tree.latest();
    /// let v1 = tree.insert(v0, 7, 1).unwrap();
    /// let v2 = tree.insert(v1, 2, 1).unwrap();
    /// let v3 = tree.insert(v2, 9, 1).unwrap();
    ///
    /// assert_eq!(tree.kth(v0, v3, 1), Ok(2));
    /// assert_eq!(tree.kth(v1, v3, 2), Ok(9));
    /// ```
    pub fn kth(&self, low: VersionId, high: VersionId, k: u64) -> Result<usize> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.kth);

        let mut low = self.versions.root(low)?;
        let mut high = self.versions.root(high)?;

        let available = self.count(high) - self.count(low);
        let mut rank = match i64::try_from(k) {
            Ok(rank) if rank > 0 && rank <= available => rank,
            _ => return Err(Error::RankOutOfRange { k, available }),
        };

        let (mut lo, mut hi) = (1, self.domain.size());
        while lo < hi {
            let mid = Domain::mid(lo, hi);
            let (low_node, high_node) = (self.arena.get(low), self.arena.get(high));
            let left = self.count(high_node.left()) - self.count(low_node.left());
            if rank <= left {
                low = low_node.left();
                high = high_node.left();
                hi = mid;
            } else {
                rank -= left;
                low = low_node.right();
                high = high_node.right();
                lo = mid + 1;
            }
        }
        Ok(lo)
    }

    /// Returns the number of domain positions whose count grew by more than `threshold`
    /// between `low` and `high`
    ///
    /// With a binary presence per value and `threshold = 0` this is the number of distinct
    /// values inserted between the two versions.
    ///
    /// Differences may be negative at some positions, for example after removing an occurrence
    /// again. Only subtrees shared by both versions are skipped, so the walk visits the nodes
    /// written between the two versions and nothing else.
    pub fn frequency_bounded_count(
        &self,
        low: VersionId,
        high: VersionId,
        threshold: i64,
    ) -> Result<u64> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.frequency_bounded_count);

        let low = self.versions.root(low)?;
        let high = self.versions.root(high)?;

        let mut result = 0;
        let mut stack: WalkStack<_> = WalkStack::new();
        stack.push((low, high, 1, self.domain.size()));

        while let Some((low, high, lo, hi)) = stack.pop() {
            if low == high {
                // shared subtree, every position has a difference of zero
                if threshold < 0 {
                    result += (hi - lo + 1) as u64;
                }
                continue;
            }
            if lo == hi {
                if self.count(high) - self.count(low) > threshold {
                    result += 1;
                }
                continue;
            }
            let mid = Domain::mid(lo, hi);
            let (low_node, high_node) = (self.arena.get(low), self.arena.get(high));
            stack.push((low_node.right(), high_node.right(), mid + 1, hi));
            stack.push((low_node.left(), high_node.left(), lo, mid));
        }
        Ok(result)
    }

    /// Returns the difference in count between `high` and `low` within positions `[l, r]`
    pub fn range_difference(
        &self,
        low: VersionId,
        high: VersionId,
        l: usize,
        r: usize,
    ) -> Result<i64> {
        let low = self.versions.root(low)?;
        let high = self.versions.root(high)?;
        self.domain.check_range(l, r)?;

        let mut result = 0;
        let mut stack: WalkStack<_> = WalkStack::new();
        stack.push((low, high, 1, self.domain.size()));

        while let Some((low, high, lo, hi)) = stack.pop() {
            if low == high || hi < l || r < lo {
                continue;
            }
            if l <= lo && hi <= r {
                result += self.count(high) - self.count(low);
                continue;
            }
            let mid = Domain::mid(lo, hi);
            let (low_node, high_node) = (self.arena.get(low), self.arena.get(high));
            stack.push((low_node.right(), high_node.right(), mid + 1, hi));
            stack.push((low_node.left(), high_node.left(), lo, mid));
        }
        Ok(result)
    }

    #[inline]
    fn count(&self, node: NodeRef) -> i64 {
        A::count(&self.arena.get(node).aggregate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{count::CountAggregator, sum::U32SumAggregator};

    fn chain(domain: usize, values: &[usize]) -> (PersistentTree<CountAggregator>, Vec<VersionId>) {
        let mut tree = PersistentTree::new(Domain::new(domain).unwrap());
        let mut versions = vec![tree.first()];
        for &value in values {
            let parent = *versions.last().unwrap();
            versions.push(tree.insert(parent, value, 1).unwrap());
        }
        (tree, versions)
    }

    #[test]
    fn kth_of_permutation() {
        let (tree, v) = chain(5, &[5, 1, 4, 2, 3]);
        assert_eq!(tree.kth(v[0], v[5], 3), Ok(3));
        for k in 1..=5 {
            assert_eq!(tree.kth(v[0], v[5], k), Ok(k as usize));
        }
        // values of array positions [2, 4] are {1, 4, 2}
        assert_eq!(tree.kth(v[1], v[4], 1), Ok(1));
        assert_eq!(tree.kth(v[1], v[4], 2), Ok(2));
        assert_eq!(tree.kth(v[1], v[4], 3), Ok(4));
    }

    #[test]
    fn kth_with_duplicates() {
        let (tree, v) = chain(4, &[3, 3, 1, 3]);
        assert_eq!(tree.kth(v[0], v[4], 1), Ok(1));
        assert_eq!(tree.kth(v[0], v[4], 2), Ok(3));
        assert_eq!(tree.kth(v[0], v[4], 4), Ok(3));
    }

    #[test]
    fn kth_rank_out_of_range() {
        let (tree, v) = chain(5, &[5, 1, 4]);
        assert_eq!(
            tree.kth(v[0], v[3], 0),
            Err(Error::RankOutOfRange { k: 0, available: 3 })
        );
        assert_eq!(
            tree.kth(v[1], v[3], 3),
            Err(Error::RankOutOfRange { k: 3, available: 2 })
        );
        assert_eq!(
            tree.kth(v[2], v[2], 1),
            Err(Error::RankOutOfRange { k: 1, available: 0 })
        );
        assert_eq!(
            tree.kth(v[0], v[3], u64::MAX),
            Err(Error::RankOutOfRange {
                k: u64::MAX,
                available: 3
            })
        );
    }

    #[test]
    fn kth_over_other_countable_aggregators() {
        let domain = Domain::new(6).unwrap();
        let tree = PersistentTree::<U32SumAggregator>::build(domain, &[0, 2, 0, 0, 1, 3]).unwrap();
        // the build holds the multiset {2, 2, 5, 6, 6, 6}
        assert_eq!(tree.kth(VersionId::EMPTY, tree.first(), 2), Ok(2));
        assert_eq!(tree.kth(VersionId::EMPTY, tree.first(), 3), Ok(5));
        assert_eq!(tree.kth(VersionId::EMPTY, tree.first(), 6), Ok(6));
    }

    #[test]
    fn distinct_count() {
        let (tree, v) = chain(3, &[1, 2, 2, 3, 3, 3]);
        assert_eq!(tree.frequency_bounded_count(v[0], v[6], 0), Ok(3));
        assert_eq!(tree.frequency_bounded_count(v[1], v[3], 0), Ok(1));
        assert_eq!(tree.frequency_bounded_count(v[2], v[4], 0), Ok(2));
        assert_eq!(tree.frequency_bounded_count(v[4], v[4], 0), Ok(0));
    }

    #[test]
    fn frequency_thresholds() {
        let (tree, v) = chain(3, &[1, 2, 2, 3, 3, 3]);
        assert_eq!(tree.frequency_bounded_count(v[0], v[6], 1), Ok(2));
        assert_eq!(tree.frequency_bounded_count(v[0], v[6], 2), Ok(1));
        assert_eq!(tree.frequency_bounded_count(v[0], v[6], 3), Ok(0));
        assert_eq!(tree.frequency_bounded_count(v[3], v[6], 1), Ok(1));
    }

    #[test]
    fn removals_do_not_hide_growth_elsewhere() {
        let domain = Domain::new(4).unwrap();
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
        let v1 = tree.insert(tree.first(), 1, 1).unwrap();
        let v2 = tree.insert(v1, 1, -1).unwrap();
        let v3 = tree.insert(v2, 2, 1).unwrap();

        // position 1 shrank by one and position 2 grew by one
        assert_eq!(tree.frequency_bounded_count(v1, v3, 0), Ok(1));
        assert_eq!(tree.frequency_bounded_count(v1, v3, -1), Ok(3));
        assert_eq!(tree.frequency_bounded_count(v1, v3, -2), Ok(4));
        assert_eq!(tree.frequency_bounded_count(v3, v1, 0), Ok(1));
        assert_eq!(tree.range_difference(v1, v3, 1, 2), Ok(0));
    }

    #[test]
    fn negative_threshold_counts_every_position() {
        let (tree, v) = chain(8, &[2, 7, 7]);
        assert_eq!(tree.frequency_bounded_count(v[0], v[3], -1), Ok(8));
        assert_eq!(tree.frequency_bounded_count(v[3], v[3], -1), Ok(8));
    }

    #[test]
    fn range_differences() {
        let (tree, v) = chain(5, &[5, 1, 4, 2, 3]);
        assert_eq!(tree.range_difference(v[0], v[2], 1, 4), Ok(1));
        assert_eq!(tree.range_difference(v[0], v[5], 2, 4), Ok(3));
        assert_eq!(tree.range_difference(v[2], v[5], 1, 1), Ok(0));
        assert_eq!(tree.range_difference(v[2], v[5], 1, 5), Ok(3));
        // reversed versions subtract the other way around
        assert_eq!(tree.range_difference(v[5], v[0], 1, 5), Ok(-5));
        assert_eq!(
            tree.range_difference(v[0], v[5], 3, 6),
            Err(Error::InvalidRange { l: 3, r: 6, size: 5 })
        );
    }
}
