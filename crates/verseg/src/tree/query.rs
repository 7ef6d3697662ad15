use super::{PersistentTree, WalkStack};
use crate::{
    aggregator::Aggregator,
    domain::Domain,
    error::{Error, Result},
    version::VersionId,
};

#[cfg(feature = "profiler")]
use verseg_stats::profile_scope;

impl<A: Aggregator> PersistentTree<A> {
    /// Combines the aggregates of positions `[l, r]` in `version`
    ///
    /// Runs in `O(log D)` and visits at most two partially covered nodes per level. Fails with
    /// [Error::UnknownVersion] for a missing version, [Error::InvalidRange] unless
    /// `1 <= l <= r <= D` and [Error::Overflow] if the combined aggregate is not representable.
    pub fn range_aggregate(
        &self,
        version: VersionId,
        l: usize,
        r: usize,
    ) -> Result<A::PartialAggregate> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.range_aggregate);

        let root = self.versions.root(version)?;
        self.domain.check_range(l, r)?;

        let mut result = A::IDENTITY;
        let mut stack: WalkStack<_> = WalkStack::new();
        stack.push((root, 1, self.domain.size()));

        while let Some((node, lo, hi)) = stack.pop() {
            // nothing was ever written below the sentinel
            if node.is_empty() || hi < l || r < lo {
                continue;
            }
            let current = self.arena.get(node);
            if l <= lo && hi <= r {
                result = A::try_combine(result, current.aggregate())
                    .ok_or(Error::Overflow { l, r })?;
                continue;
            }
            let mid = Domain::mid(lo, hi);
            stack.push((current.right(), mid + 1, hi));
            stack.push((current.left(), lo, mid));
        }
        Ok(result)
    }

    /// Same as [PersistentTree::range_aggregate] but lowers the result into a final aggregate
    #[inline]
    pub fn range_aggregate_and_lower(
        &self,
        version: VersionId,
        l: usize,
        r: usize,
    ) -> Result<A::Aggregate> {
        self.range_aggregate(version, l, r).map(A::lower)
    }

    /// Returns the leaf aggregate stored at `pos` in `version`
    pub fn get(&self, version: VersionId, pos: usize) -> Result<A::PartialAggregate> {
        let mut node = self.versions.root(version)?;
        self.domain.check_position(pos)?;

        let (mut lo, mut hi) = (1, self.domain.size());
        while lo < hi && !node.is_empty() {
            let mid = Domain::mid(lo, hi);
            let current = self.arena.get(node);
            if pos <= mid {
                node = current.left();
                hi = mid;
            } else {
                node = current.right();
                lo = mid + 1;
            }
        }
        Ok(self.arena.aggregate(node))
    }
}
