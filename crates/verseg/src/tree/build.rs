use super::PersistentTree;
use crate::{
    aggregator::Aggregator,
    arena::NodeRef,
    domain::Domain,
    error::{Error, Result},
    options::Options,
};

#[cfg(feature = "profiler")]
use verseg_stats::profile_scope;

impl<A: Aggregator> PersistentTree<A> {
    /// Builds version 0 from one initial value per domain position, using the default [Options]
    ///
    /// See [PersistentTree::build_with_options].
    pub fn build(domain: Domain, values: &[A::Input]) -> Result<Self> {
        Self::build_with_options(domain, values, Options::default())
    }

    /// Builds version 0 from one initial value per domain position
    ///
    /// `values[p - 1]` is lifted into the leaf of position `p` and every internal node combines
    /// its two children, which allocates exactly `2D - 1` nodes in `O(D)` time.
    ///
    /// Fails with [Error::LengthMismatch] if `values` does not hold exactly `D` values,
    /// [Error::Underflow] if a lifted value is rejected by the aggregator, [Error::Overflow] if
    /// the aggregate of some node is not representable and [Error::CapacityExhausted] if the
    /// arena cannot hold the tree. No tree is returned on failure.
    pub fn build_with_options(domain: Domain, values: &[A::Input], options: Options) -> Result<Self> {
        if values.len() != domain.size() {
            return Err(Error::LengthMismatch {
                expected: domain.size(),
                actual: values.len(),
            });
        }
        if let Some(idx) = values
            .iter()
            .position(|value| A::is_underflow(&A::lift(*value)))
        {
            return Err(Error::Underflow { pos: idx + 1 });
        }

        let mut tree = Self::empty(domain, options);
        tree.arena.ensure(domain.build_len())?;

        let root = {
            #[cfg(feature = "profiler")]
            profile_scope!(&tree.stats.build);

            tree.build_rec(values, 1, domain.size())?
        };
        tree.versions.push(root, None);

        log::debug!(
            "built tree over [1, {}] using {} nodes",
            domain.size(),
            tree.arena.len()
        );
        Ok(tree)
    }

    fn build_rec(&mut self, values: &[A::Input], lo: usize, hi: usize) -> Result<NodeRef> {
        if lo == hi {
            let leaf = A::lift(values[lo - 1]);
            return self.arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, leaf);
        }
        let mid = Domain::mid(lo, hi);
        let left = self.build_rec(values, lo, mid)?;
        let right = self.build_rec(values, mid + 1, hi)?;
        let aggregate = A::try_combine(self.arena.aggregate(left), self.arena.aggregate(right))
            .ok_or(Error::Overflow { l: lo, r: hi })?;
        self.arena.alloc(left, right, aggregate)
    }
}
