use super::check_window;
use crate::last_occurrence::LastOccurrence;
use core::hash::Hash;
use verseg::{
    aggregator::count::CountAggregator,
    Domain,
    Options,
    PersistentTree,
    Result,
    VersionId,
};

/// Answers "how many distinct values occur among array positions `[l, r]`"
///
/// The tree is indexed by array position and only the last occurrence of every value within
/// the current prefix is marked. When a value shows up again its previous mark is removed, so
/// the version of prefix `r` counts each value at most once, at its rightmost position `<= r`.
/// A value occurs in `[l, r]` exactly when that position is `>= l`.
#[derive(Debug)]
pub struct DistinctCount {
    tree: PersistentTree<CountAggregator>,
    versions: Vec<VersionId>,
}

impl DistinctCount {
    /// Indexes the array
    ///
    /// Fails if the array is empty.
    pub fn new<T: Hash + Eq + Clone>(values: &[T]) -> Result<Self> {
        let domain = Domain::new(values.len())?;
        // at most one removal and one insert per position
        let options = Options::for_workload(domain, 2 * values.len(), false);
        let mut tree = PersistentTree::with_options(domain, options);
        let mut last = LastOccurrence::new();

        let mut versions = Vec::with_capacity(values.len() + 1);
        versions.push(tree.first());
        for (idx, value) in values.iter().enumerate() {
            let pos = idx + 1;
            let mut version = versions[idx];
            if let Some(prev) = last.replace(value.clone(), pos) {
                version = tree.insert(version, prev, -1)?;
            }
            versions.push(tree.insert(version, pos, 1)?);
        }
        log::debug!(
            "indexed {} positions with {} distinct values using {} nodes",
            values.len(),
            last.len(),
            tree.node_count()
        );
        Ok(Self { tree, versions })
    }

    /// Returns the number of distinct values among positions `[l, r]`
    pub fn query(&self, l: usize, r: usize) -> Result<u64> {
        check_window(l, r, self.versions.len() - 1)?;
        self.tree.range_aggregate_and_lower(self.versions[r], l, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distinct_in_window() {
        let values = [1, 1, 2, 1, 3];
        let distinct = DistinctCount::new(&values).unwrap();
        assert_eq!(distinct.query(1, 5), Ok(3));
        assert_eq!(distinct.query(1, 2), Ok(1));
        assert_eq!(distinct.query(2, 4), Ok(2));
        assert_eq!(distinct.query(4, 4), Ok(1));
        assert_eq!(distinct.query(3, 5), Ok(3));
    }

    #[test]
    fn whole_array() {
        let distinct = DistinctCount::new(&[1, 2, 2, 3, 3, 3]).unwrap();
        assert_eq!(distinct.query(1, 6), Ok(3));
        assert!(distinct.query(0, 6).is_err());
        assert!(DistinctCount::new::<u8>(&[]).is_err());
    }
}
