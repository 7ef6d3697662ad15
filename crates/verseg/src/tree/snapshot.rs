use super::PersistentTree;
use crate::{
    aggregator::Aggregator,
    arena::Arena,
    domain::Domain,
    error::{Error, Result},
    options::Options,
    version::VersionTable,
};

#[cfg(feature = "profiler")]
use super::stats::Stats;

/// Serialized layout of a [PersistentTree], checked before it becomes a tree
#[derive(serde::Deserialize)]
#[serde(bound = "")]
pub(crate) struct Snapshot<A: Aggregator> {
    domain: Domain,
    options: Options,
    arena: Arena<A>,
    versions: VersionTable,
}

impl<A: Aggregator> TryFrom<Snapshot<A>> for PersistentTree<A> {
    type Error = Error;

    fn try_from(snapshot: Snapshot<A>) -> Result<Self> {
        let Snapshot {
            domain,
            options,
            arena,
            versions,
        } = snapshot;
        Domain::new(domain.size())?;
        arena.validate()?;
        versions.validate(arena.len())?;

        log::debug!(
            "restored tree over [1, {}] with {} nodes and {} versions",
            domain.size(),
            arena.len(),
            versions.len()
        );
        Ok(Self {
            domain,
            options,
            arena,
            versions,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregator::count::CountAggregator, arena::NodeRef, VersionId};

    fn snapshot(tree: &PersistentTree<CountAggregator>) -> Snapshot<CountAggregator> {
        Snapshot {
            domain: tree.domain,
            options: tree.options,
            arena: tree.arena.clone(),
            versions: tree.versions.clone(),
        }
    }

    #[test]
    fn consistent_snapshot_is_restored() {
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(Domain::new(8).unwrap());
        let v1 = tree.insert(tree.first(), 3, 1).unwrap();
        tree.insert(v1, 6, 2).unwrap();

        let restored = PersistentTree::try_from(snapshot(&tree)).unwrap();
        assert_eq!(restored.version_count(), 3);
        assert_eq!(restored.range_aggregate(restored.latest(), 1, 8), Ok(3));
    }

    #[test]
    fn dangling_references_are_rejected() {
        let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(Domain::new(8).unwrap());
        tree.insert(tree.first(), 3, 1).unwrap();

        let mut dangling_root = snapshot(&tree);
        dangling_root.versions.push(NodeRef::new(99), Some(VersionId::new(0)));
        assert_eq!(
            PersistentTree::try_from(dangling_root).err(),
            Some(Error::InvalidSnapshot {
                reason: "version root outside of the arena"
            })
        );

        let mut dangling_child = snapshot(&tree);
        let node = dangling_child.arena.alloc(NodeRef::new(42), NodeRef::EMPTY, 1).unwrap();
        dangling_child.versions.push(node, Some(VersionId::new(1)));
        assert_eq!(
            PersistentTree::try_from(dangling_child).err(),
            Some(Error::InvalidSnapshot {
                reason: "child allocated after its parent"
            })
        );
    }
}
