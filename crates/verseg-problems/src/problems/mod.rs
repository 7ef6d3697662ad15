//! Range query problems over a static array
//!
//! Every driver inserts the array one position at a time into a [PersistentTree], keeping the
//! version produced for each array prefix. A query over the array positions `[l, r]` is then
//! answered from the versions of the prefixes `l - 1` and `r`.

mod distinct;
mod frequent;
mod kth;
mod rank;

pub use distinct::DistinctCount;
pub use frequent::FrequentValues;
pub use kth::RangeKth;
pub use rank::RangeRank;

use crate::compress::Discretizer;
use verseg::{aggregator::count::CountAggregator, Error, Options, PersistentTree, Result, VersionId};

/// One version per array prefix over the ranks of the array values
#[derive(Debug)]
struct PrefixVersions<T> {
    discretizer: Discretizer<T>,
    tree: PersistentTree<CountAggregator>,
    versions: Vec<VersionId>,
}

impl<T: Ord + Clone> PrefixVersions<T> {
    fn new(values: &[T]) -> Result<Self> {
        let discretizer: Discretizer<T> = values.iter().cloned().collect();
        let domain = discretizer.domain()?;
        let options = Options::for_workload(domain, values.len(), false);
        let mut tree = PersistentTree::with_options(domain, options);

        let mut versions = Vec::with_capacity(values.len() + 1);
        versions.push(tree.first());
        for (idx, value) in values.iter().enumerate() {
            let rank = discretizer
                .rank(value)
                .ok_or(Error::PositionOutOfDomain {
                    pos: idx + 1,
                    size: domain.size(),
                })?;
            versions.push(tree.insert(versions[idx], rank, 1)?);
        }
        log::debug!(
            "indexed {} values over {} ranks using {} nodes",
            values.len(),
            domain.size(),
            tree.node_count()
        );
        Ok(Self {
            discretizer,
            tree,
            versions,
        })
    }

    fn len(&self) -> usize {
        self.versions.len() - 1
    }

    /// Returns the versions bounding the array positions `[l, r]`
    fn window(&self, l: usize, r: usize) -> Result<(VersionId, VersionId)> {
        check_window(l, r, self.len())?;
        Ok((self.versions[l - 1], self.versions[r]))
    }
}

/// Validates the array positions `[l, r]` of an array of length `len`
pub(crate) fn check_window(l: usize, r: usize, len: usize) -> Result<()> {
    if l >= 1 && l <= r && r <= len {
        Ok(())
    } else {
        Err(Error::InvalidRange { l, r, size: len })
    }
}
