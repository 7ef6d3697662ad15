use crate::domain::Domain;

/// Capacity policy of the node arena
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum Capacity {
    /// The arena grows on demand
    ///
    /// Node references are plain indices so they stay valid when the backing storage grows.
    /// The `u32` index space is the only limit.
    #[default]
    Unbounded,
    /// The arena is preallocated for the given number of nodes (the empty sentinel excluded)
    ///
    /// Any operation that would need more nodes fails with [crate::Error::CapacityExhausted]
    /// before allocating anything.
    Fixed(usize),
}

/// Configuration of a [crate::PersistentTree]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    capacity: Capacity,
    reserve: usize,
}

impl Options {
    /// Preallocates an arena of exactly `nodes` nodes and never grows beyond it
    pub fn with_fixed_capacity(mut self, nodes: usize) -> Self {
        self.capacity = Capacity::Fixed(nodes);
        self
    }
    /// Reserves room for `nodes` nodes up front while still allowing growth
    ///
    /// Has no effect in combination with [Capacity::Fixed].
    pub fn with_reserve(mut self, nodes: usize) -> Self {
        self.reserve = nodes;
        self
    }
    /// Sizes a fixed arena for `updates` updates over `domain`
    ///
    /// If `built` is set, room for the initial build is included.
    pub fn for_workload(domain: Domain, updates: usize, built: bool) -> Self {
        Self::default().with_fixed_capacity(domain.capacity_for(updates, built))
    }
    /// Returns the capacity policy
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }
    /// Returns the number of nodes to reserve up front
    pub fn reserve(&self) -> usize {
        match self.capacity {
            Capacity::Fixed(nodes) => nodes,
            Capacity::Unbounded => self.reserve,
        }
    }
}
