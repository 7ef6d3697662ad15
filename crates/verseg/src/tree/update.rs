use super::{PersistentTree, WalkStack};
use crate::{
    aggregator::Aggregator,
    arena::NodeRef,
    domain::Domain,
    error::{Error, Result},
    version::VersionId,
};

#[cfg(feature = "profiler")]
use verseg_stats::profile_scope;

#[derive(Clone, Copy)]
enum Branch {
    Left,
    Right,
}

impl<A: Aggregator> PersistentTree<A> {
    /// Creates a new version by combining `delta` into position `pos` of the `parent` version
    ///
    /// One node per level on the path to `pos` is allocated; every other subtree is shared with
    /// `parent` by reference. The parent version, and every other existing version, is left
    /// untouched, so calling `insert` twice with the same parent yields two independent versions.
    ///
    /// The request is validated before anything is allocated. It fails with
    /// [Error::UnknownVersion] if `parent` does not exist, [Error::PositionOutOfDomain] if `pos`
    /// lies outside `[1, D]`, [Error::Underflow] if the aggregator rejects the resulting leaf
    /// (e.g., a negative count), [Error::Overflow] if an aggregate on the path is not
    /// representable and [Error::CapacityExhausted] if the arena cannot hold the path.
    pub fn insert(&mut self, parent: VersionId, pos: usize, delta: A::Input) -> Result<VersionId> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.insert);

        let root = self.versions.root(parent)?;
        self.domain.check_position(pos)?;

        let allocated = self.arena.len();
        let new_root = self.update(root, pos, delta)?;
        let version = self.versions.push(new_root, Some(parent));

        log::trace!(
            "insert at {} on {} created {} with root {} ({} nodes)",
            pos,
            parent,
            version,
            new_root,
            self.arena.len() - allocated
        );
        Ok(version)
    }

    /// Copies the path from `root` to `pos` and returns the root of the copy
    fn update(&mut self, root: NodeRef, pos: usize, delta: A::Input) -> Result<NodeRef> {
        // read-only descent, nothing is allocated until the update is known to succeed
        let mut path: WalkStack<(NodeRef, Branch, usize, usize)> = WalkStack::new();
        let (mut lo, mut hi) = (1, self.domain.size());
        let mut node = root;
        while lo < hi {
            let mid = Domain::mid(lo, hi);
            let current = self.arena.get(node);
            if pos <= mid {
                path.push((node, Branch::Left, lo, hi));
                node = current.left();
                hi = mid;
            } else {
                path.push((node, Branch::Right, lo, hi));
                node = current.right();
                lo = mid + 1;
            }
        }

        let leaf = A::try_combine(self.arena.aggregate(node), A::lift(delta))
            .ok_or(Error::Overflow { l: pos, r: pos })?;
        if A::is_underflow(&leaf) {
            return Err(Error::Underflow { pos });
        }

        // aggregates of the copied path, leaf-side first
        let mut aggregates: WalkStack<A::PartialAggregate> = WalkStack::new();
        let mut below = leaf;
        for &(node, branch, lo, hi) in path.iter().rev() {
            let old = self.arena.get(node);
            let (left, right) = match branch {
                Branch::Left => (below, self.arena.aggregate(old.right())),
                Branch::Right => (self.arena.aggregate(old.left()), below),
            };
            below = A::try_combine(left, right).ok_or(Error::Overflow { l: lo, r: hi })?;
            aggregates.push(below);
        }
        self.arena.ensure(path.len() + 1)?;

        let mut current = self.arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, leaf)?;
        for (&(node, branch, _, _), aggregate) in path.iter().rev().zip(aggregates) {
            let old = self.arena.get(node);
            let (left, right) = match branch {
                Branch::Left => (current, old.right()),
                Branch::Right => (old.left(), current),
            };
            current = self.arena.alloc(left, right, aggregate)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregator::{count::CountAggregator, sum::U64SumAggregator},
        Options,
    };

    #[test]
    fn insert_from_empty_version() {
        let domain = Domain::new(8).unwrap();
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
        let v1 = tree.insert(tree.first(), 6, 1).unwrap();

        assert_eq!(tree.node_count(), domain.path_len());
        assert_eq!(tree.parent(v1), Ok(Some(tree.first())));
        assert_eq!(tree.get(v1, 6), Ok(1));
        assert_eq!(tree.range_aggregate(v1, 1, 5), Ok(0));
        assert_eq!(tree.range_aggregate(tree.first(), 1, 8), Ok(0));
    }

    #[test]
    fn rejects_positions_outside_domain() {
        let domain = Domain::new(4).unwrap();
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
        let v0 = tree.first();
        assert_eq!(
            tree.insert(v0, 0, 1),
            Err(Error::PositionOutOfDomain { pos: 0, size: 4 })
        );
        assert_eq!(
            tree.insert(v0, 5, 1),
            Err(Error::PositionOutOfDomain { pos: 5, size: 4 })
        );
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.version_count(), 1);
    }

    #[test]
    fn sibling_updates_share_untouched_subtrees() {
        let domain = Domain::new(8).unwrap();
        let mut tree =
            PersistentTree::<U64SumAggregator>::build(domain, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let v0 = tree.first();
        let a = tree.insert(v0, 1, 10).unwrap();
        let b = tree.insert(v0, 1, 20).unwrap();
        let c = tree.insert(v0, 8, 30).unwrap();

        let root0 = *tree.node(tree.root(v0).unwrap());
        let root_a = *tree.node(tree.root(a).unwrap());
        let root_b = *tree.node(tree.root(b).unwrap());
        let root_c = *tree.node(tree.root(c).unwrap());

        // new roots never alias each other or the parent
        assert_ne!(tree.root(a), tree.root(b));
        assert_ne!(tree.root(a), tree.root(v0));
        // untouched halves are shared with the parent by reference
        assert_eq!(root_a.right(), root0.right());
        assert_eq!(root_b.right(), root0.right());
        assert_eq!(root_c.left(), root0.left());
        // the freshly written paths are distinct
        assert_ne!(root_a.left(), root_b.left());
        assert_ne!(root_a.left(), root0.left());

        assert_eq!(tree.range_aggregate(a, 1, 8), Ok(46));
        assert_eq!(tree.range_aggregate(b, 1, 8), Ok(56));
        assert_eq!(tree.range_aggregate(c, 1, 8), Ok(66));
        assert_eq!(tree.range_aggregate(v0, 1, 8), Ok(36));
    }

    #[test]
    fn any_earlier_version_can_be_a_parent() {
        let domain = Domain::new(4).unwrap();
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
        let v1 = tree.insert(tree.first(), 1, 1).unwrap();
        let v2 = tree.insert(v1, 2, 1).unwrap();
        let v3 = tree.insert(v1, 3, 1).unwrap();

        assert_eq!(tree.parent(v3), Ok(Some(v1)));
        assert_eq!(tree.get(v2, 3), Ok(0));
        assert_eq!(tree.get(v3, 2), Ok(0));
        assert_eq!(tree.range_aggregate(v3, 1, 4), Ok(2));
    }

    #[test]
    fn capacity_exhaustion_leaves_no_trace() {
        let domain = Domain::new(8).unwrap();
        let options = Options::default().with_fixed_capacity(domain.path_len() + 1);
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::with_options(domain, options);
        let v1 = tree.insert(tree.first(), 3, 1).unwrap();
        let nodes = tree.node_count();

        let err = tree.insert(v1, 5, 1).unwrap_err();
        assert_eq!(
            err,
            Error::CapacityExhausted {
                capacity: domain.path_len() + 1,
                requested: domain.path_len()
            }
        );
        assert_eq!(tree.node_count(), nodes);
        assert_eq!(tree.version_count(), 2);
        assert_eq!(tree.range_aggregate(v1, 1, 8), Ok(1));
    }

    #[test]
    fn workload_sized_arena_fits_exactly() {
        let domain = Domain::new(5).unwrap();
        let updates = 5;
        let options = crate::Options::for_workload(domain, updates, false);
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::with_options(domain, options);
        let mut version = tree.first();
        for value in [5, 1, 4, 2, 3] {
            version = tree.insert(version, value, 1).unwrap();
        }
        assert!(tree.node_count() <= domain.capacity_for(updates, false));
        assert_eq!(tree.range_aggregate(version, 1, 5), Ok(5));
    }
}
