use crate::{
    arena::NodeRef,
    error::{Error, Result},
};
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Identifier of a version produced by a [crate::PersistentTree]
///
/// Ids follow creation order: version 0 is created together with the tree and every successful
/// insert appends exactly one new id.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionId(u32);

impl VersionId {
    /// The canonical empty snapshot
    ///
    /// Available in every tree regardless of how it was constructed. It resolves to
    /// [NodeRef::EMPTY] and is never stored in a [VersionTable].
    pub const EMPTY: VersionId = VersionId(u32::MAX);

    /// Creates a version id from its raw creation index
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
    /// Returns the raw creation index
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
    /// Returns `true` if this is [VersionId::EMPTY]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "empty")
        } else {
            write!(f, "v{}", self.0)
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy)]
struct Entry {
    root: NodeRef,
    parent: Option<VersionId>,
}

/// Append-only mapping from [VersionId] to the root of that version
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Default)]
pub struct VersionTable {
    entries: Vec<Entry>,
}

impl VersionTable {
    /// Appends a new version and returns its id
    pub(crate) fn push(&mut self, root: NodeRef, parent: Option<VersionId>) -> VersionId {
        let id = VersionId(self.entries.len() as u32);
        self.entries.push(Entry { root, parent });
        id
    }
    /// Returns the root of the given version
    #[inline]
    pub fn root(&self, version: VersionId) -> Result<NodeRef> {
        if version.is_empty() {
            return Ok(NodeRef::EMPTY);
        }
        self.entries
            .get(version.0 as usize)
            .map(|entry| entry.root)
            .ok_or(Error::UnknownVersion { version })
    }
    /// Returns the version the given version was derived from
    ///
    /// Version 0 and [VersionId::EMPTY] have no parent.
    pub fn parent(&self, version: VersionId) -> Result<Option<VersionId>> {
        if version.is_empty() {
            return Ok(None);
        }
        self.entries
            .get(version.0 as usize)
            .map(|entry| entry.parent)
            .ok_or(Error::UnknownVersion { version })
    }
    /// Returns `true` if the version exists
    #[inline]
    pub fn contains(&self, version: VersionId) -> bool {
        version.is_empty() || (version.0 as usize) < self.entries.len()
    }
    /// Returns the number of versions created
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Returns `true` if no version has been created
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Returns the most recently created version
    #[inline]
    pub fn latest(&self) -> Option<VersionId> {
        self.entries
            .len()
            .checked_sub(1)
            .map(|id| VersionId(id as u32))
    }
    /// Checks that every root lies within an arena of `nodes` allocated nodes and that every
    /// parent was created before its child
    #[cfg(any(test, feature = "serde"))]
    pub(crate) fn validate(&self, nodes: usize) -> Result<()> {
        let invalid =
            |reason: &'static str| -> Result<()> { Err(Error::InvalidSnapshot { reason }) };
        if self.entries.is_empty() {
            return invalid("missing version 0");
        }
        if self.entries.len() >= u32::MAX as usize {
            return invalid("too many versions");
        }
        for (id, entry) in self.entries.iter().enumerate() {
            if entry.root.index() > nodes {
                return invalid("version root outside of the arena");
            }
            if entry.parent.is_some_and(|parent| parent.0 as usize >= id) {
                return invalid("parent created after its child");
            }
        }
        Ok(())
    }
    /// Iterates over all version ids in creation order
    pub fn ids(&self) -> impl Iterator<Item = VersionId> + '_ {
        (0..self.entries.len()).map(|id| VersionId(id as u32))
    }
}
