use crate::version::VersionId;

/// Result type used throughout verseg
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A type containing error variants that may arise when using a [crate::PersistentTree]
///
/// Apart from [Error::CapacityExhausted] every variant is a contract violation by the caller.
/// A failed call never leaves a partially built version behind: all versions created before the
/// error remain valid and queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The domain size must be at least 1
    #[error("invalid domain size {size}, expected at least 1")]
    InvalidDomain {
        /// The rejected size
        size: i64,
    },
    /// The position lies outside of `[1, size]`
    #[error("position {pos} is outside of the domain [1, {size}]")]
    PositionOutOfDomain {
        /// The rejected position
        pos: usize,
        /// Size of the domain
        size: usize,
    },
    /// The range is empty or not contained in `[1, size]`
    #[error("range [{l}, {r}] is not a sub-range of the domain [1, {size}]")]
    InvalidRange {
        /// Start of the rejected range
        l: usize,
        /// End of the rejected range
        r: usize,
        /// Size of the domain
        size: usize,
    },
    /// The version has never been created by this tree
    #[error("version {version} does not exist")]
    UnknownVersion {
        /// The unknown version id
        version: VersionId,
    },
    /// The requested rank does not exist between the two versions
    #[error("rank {k} is not within [1, {available}]")]
    RankOutOfRange {
        /// The requested rank
        k: u64,
        /// Number of ranks available between the two versions
        available: i64,
    },
    /// The update would leave an invalid (e.g., negative) aggregate at the given position
    #[error("update would underflow the aggregate at position {pos}")]
    Underflow {
        /// Position of the rejected leaf
        pos: usize,
    },
    /// The combined aggregate of the positions `[l, r]` is not representable
    #[error("aggregate of positions [{l}, {r}] overflows")]
    Overflow {
        /// Start of the overflowing range
        l: usize,
        /// End of the overflowing range
        r: usize,
    },
    /// The number of initial values does not match the domain size
    #[error("expected {expected} initial values but got {actual}")]
    LengthMismatch {
        /// Domain size
        expected: usize,
        /// Number of values provided
        actual: usize,
    },
    /// A deserialized tree is not internally consistent
    #[error("invalid tree snapshot: {reason}")]
    InvalidSnapshot {
        /// The violated invariant
        reason: &'static str,
    },
    /// The node arena cannot hold the requested allocations
    #[error("node arena exhausted: capacity {capacity}, requested {requested} more nodes")]
    CapacityExhausted {
        /// Maximum number of allocated nodes
        capacity: usize,
        /// Number of nodes the rejected operation needed
        requested: usize,
    },
}

impl Error {
    /// Returns `true` if the error is caused by the caller breaking an operation contract
    pub fn is_contract_violation(&self) -> bool {
        !self.is_capacity_exhausted()
    }
    /// Returns `true` if the error represents [Error::CapacityExhausted]
    pub fn is_capacity_exhausted(&self) -> bool {
        matches!(self, Error::CapacityExhausted { .. })
    }
}
