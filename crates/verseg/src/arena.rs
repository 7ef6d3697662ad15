use crate::{
    aggregator::Aggregator,
    error::{Error, Result},
    options::{Capacity, Options},
};
use core::{fmt, marker::PhantomData};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Opaque index of a node within an [Arena]
///
/// Index 0 is [NodeRef::EMPTY], the canonical empty subtree.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(u32);

impl NodeRef {
    /// The empty subtree sentinel
    ///
    /// Its aggregate is the identity of the aggregator, both of its children are the sentinel
    /// itself and it is never the target of a write.
    pub const EMPTY: NodeRef = NodeRef(0);

    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }
    /// Returns the raw arena index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
    /// Returns `true` if this is [NodeRef::EMPTY]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable tree node
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<P> {
    left: NodeRef,
    right: NodeRef,
    aggregate: P,
}

impl<P: Copy> Node<P> {
    /// Returns the left child
    #[inline]
    pub fn left(&self) -> NodeRef {
        self.left
    }
    /// Returns the right child
    #[inline]
    pub fn right(&self) -> NodeRef {
        self.right
    }
    /// Returns the aggregate of the range covered by this node
    #[inline]
    pub fn aggregate(&self) -> P {
        self.aggregate
    }
    /// Returns `true` if both children are the empty sentinel
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Flat, append-only storage of immutable nodes
///
/// Nodes are never mutated, reused or freed. Every allocation appends a node at the end and hands
/// out its index, so a [NodeRef] stays valid for the lifetime of the arena.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
#[derive(Clone)]
pub struct Arena<A: Aggregator> {
    nodes: Vec<Node<A::PartialAggregate>>,
    capacity: Capacity,
    _marker: PhantomData<A>,
}

impl<A: Aggregator> Arena<A> {
    /// Creates an arena that only holds the empty sentinel
    pub fn new(options: &Options) -> Self {
        let mut nodes = Vec::with_capacity(options.reserve().saturating_add(1));
        nodes.push(Node {
            left: NodeRef::EMPTY,
            right: NodeRef::EMPTY,
            aggregate: A::IDENTITY,
        });
        Self {
            nodes,
            capacity: options.capacity(),
            _marker: PhantomData,
        }
    }

    /// Returns the maximum number of nodes that may be allocated
    pub fn capacity(&self) -> usize {
        match self.capacity {
            Capacity::Fixed(nodes) => nodes.min(Self::max_nodes()),
            Capacity::Unbounded => Self::max_nodes(),
        }
    }

    /// Returns the number of allocated nodes (the sentinel excluded)
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if no node besides the sentinel has been allocated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes that can still be allocated
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.len())
    }

    /// Checks that `additional` more nodes can be allocated
    ///
    /// Operations call this before allocating so that a rejected operation leaves no trace.
    pub fn ensure(&self, additional: usize) -> Result<()> {
        if additional <= self.remaining() {
            return Ok(());
        }
        log::warn!(
            "node arena exhausted: {} of {} nodes used, {} requested",
            self.len(),
            self.capacity(),
            additional
        );
        Err(Error::CapacityExhausted {
            capacity: self.capacity(),
            requested: additional,
        })
    }

    /// Appends a new node and returns its reference
    #[inline]
    pub fn alloc(
        &mut self,
        left: NodeRef,
        right: NodeRef,
        aggregate: A::PartialAggregate,
    ) -> Result<NodeRef> {
        self.ensure(1)?;
        let node = NodeRef::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            left,
            right,
            aggregate,
        });
        Ok(node)
    }

    /// Returns the node behind the reference
    ///
    /// # Panics
    ///
    /// Panics if the reference was not handed out by this arena.
    #[inline]
    pub fn get(&self, node: NodeRef) -> &Node<A::PartialAggregate> {
        &self.nodes[node.index()]
    }

    /// Returns the aggregate of the node behind the reference
    #[inline]
    pub fn aggregate(&self, node: NodeRef) -> A::PartialAggregate {
        self.nodes[node.index()].aggregate
    }

    /// Returns the number of bytes used by the node storage
    pub fn size_bytes(&self) -> usize {
        self.nodes.capacity() * core::mem::size_of::<Node<A::PartialAggregate>>()
    }

    /// Checks the structure of an arena that was not built through [Arena::alloc]
    ///
    /// Children are always allocated before their parents, so every child index must be smaller
    /// than the index of the node pointing to it.
    #[cfg(any(test, feature = "serde"))]
    pub(crate) fn validate(&self) -> Result<()> {
        let invalid =
            |reason: &'static str| -> Result<()> { Err(Error::InvalidSnapshot { reason }) };
        match self.nodes.first() {
            None => return invalid("missing empty sentinel"),
            Some(sentinel) if !sentinel.is_leaf() => return invalid("empty sentinel has children"),
            Some(_) => {}
        }
        if self.len() > self.capacity() {
            return invalid("more nodes than the arena capacity");
        }
        let forward = self
            .nodes
            .iter()
            .enumerate()
            .skip(1)
            .any(|(index, node)| node.left.index() >= index || node.right.index() >= index);
        if forward {
            return invalid("child allocated after its parent");
        }
        Ok(())
    }

    // index 0 belongs to the sentinel and indices are u32
    #[inline]
    const fn max_nodes() -> usize {
        u32::MAX as usize - 1
    }
}

impl<A: Aggregator> fmt::Debug for Arena<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("nodes", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::count::CountAggregator;

    #[test]
    fn sentinel_is_identity() {
        let arena = Arena::<CountAggregator>::new(&Options::default());
        assert!(arena.is_empty());
        let sentinel = arena.get(NodeRef::EMPTY);
        assert_eq!(sentinel.aggregate(), 0);
        assert_eq!(sentinel.left(), NodeRef::EMPTY);
        assert_eq!(sentinel.right(), NodeRef::EMPTY);
        assert!(sentinel.is_leaf());
    }

    #[test]
    fn alloc_appends() {
        let mut arena = Arena::<CountAggregator>::new(&Options::default());
        let a = arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, 1).unwrap();
        let b = arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, 2).unwrap();
        let c = arena.alloc(a, b, 3).unwrap();
        assert_eq!((a.index(), b.index(), c.index()), (1, 2, 3));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.get(c).left(), a);
        assert_eq!(arena.get(c).right(), b);
        assert_eq!(arena.aggregate(a), 1);
        assert!(!arena.get(c).is_leaf());
    }

    #[test]
    fn fixed_capacity_boundary() {
        let options = Options::default().with_fixed_capacity(3);
        let mut arena = Arena::<CountAggregator>::new(&options);
        for i in 0..3 {
            assert!(arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, i).is_ok());
        }
        assert_eq!(arena.remaining(), 0);
        // the (capacity + 1)-th allocation is refused
        let err = arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, 9).unwrap_err();
        assert_eq!(
            err,
            Error::CapacityExhausted {
                capacity: 3,
                requested: 1
            }
        );
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.aggregate(NodeRef::new(3)), 2);
    }

    #[test]
    fn validate_rejects_forward_children() {
        let mut arena = Arena::<CountAggregator>::new(&Options::default());
        let a = arena.alloc(NodeRef::EMPTY, NodeRef::EMPTY, 1).unwrap();
        arena.alloc(a, NodeRef::EMPTY, 1).unwrap();
        assert_eq!(arena.validate(), Ok(()));

        arena.alloc(NodeRef::new(7), a, 2).unwrap();
        assert_eq!(
            arena.validate(),
            Err(Error::InvalidSnapshot {
                reason: "child allocated after its parent"
            })
        );
    }

    #[test]
    fn ensure_checks_without_allocating() {
        let options = Options::default().with_fixed_capacity(4);
        let arena = Arena::<CountAggregator>::new(&options);
        assert!(arena.ensure(4).is_ok());
        assert!(arena.ensure(5).unwrap_err().is_capacity_exhausted());
        assert!(arena.is_empty());
    }
}
