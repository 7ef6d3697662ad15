use crate::error::{Error, Result};

/// The dense, discretized index range `[1, D]` that a tree is built over
///
/// A node covering `[lo, hi]` has the children `[lo, mid]` and `[mid + 1, hi]` where
/// `mid = lo + (hi - lo) / 2`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Domain {
    size: usize,
}

impl Domain {
    /// Creates the domain `[1, size]`
    ///
    /// Returns [Error::InvalidDomain] if `size` is 0.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidDomain { size: 0 });
        }
        Ok(Self { size })
    }
    /// Returns `D`
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
    /// Returns the height of the tree, `ceil(log2(D))`
    #[inline]
    pub fn height(&self) -> usize {
        self.size.next_power_of_two().trailing_zeros() as usize
    }
    /// Returns the number of nodes on a root-to-leaf path
    ///
    /// This is the number of nodes a single update allocates.
    #[inline]
    pub fn path_len(&self) -> usize {
        self.height() + 1
    }
    /// Returns the number of nodes a full build allocates, `2D - 1`
    #[inline]
    pub fn build_len(&self) -> usize {
        2 * self.size - 1
    }
    /// Returns the number of arena nodes needed for a workload of `updates` updates
    ///
    /// If `built` is set, the nodes of an initial build are included as well.
    pub fn capacity_for(&self, updates: usize, built: bool) -> usize {
        let base = if built { self.build_len() } else { 0 };
        base + updates * self.path_len()
    }
    /// Returns `true` if `pos` lies within `[1, D]`
    #[inline]
    pub fn contains(&self, pos: usize) -> bool {
        pos >= 1 && pos <= self.size
    }
    /// Validates a single position
    #[inline]
    pub fn check_position(&self, pos: usize) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(Error::PositionOutOfDomain {
                pos,
                size: self.size,
            })
        }
    }
    /// Validates a range, requiring `1 <= l <= r <= D`
    #[inline]
    pub fn check_range(&self, l: usize, r: usize) -> Result<()> {
        if l >= 1 && l <= r && r <= self.size {
            Ok(())
        } else {
            Err(Error::InvalidRange {
                l,
                r,
                size: self.size,
            })
        }
    }
    #[inline]
    pub(crate) fn mid(lo: usize, hi: usize) -> usize {
        lo + (hi - lo) / 2
    }
}

impl TryFrom<i64> for Domain {
    type Error = Error;

    fn try_from(size: i64) -> Result<Self> {
        if size < 1 {
            return Err(Error::InvalidDomain { size });
        }
        let size = usize::try_from(size).map_err(|_| Error::InvalidDomain { size })?;
        Domain::new(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_domains() {
        assert_eq!(Domain::new(0), Err(Error::InvalidDomain { size: 0 }));
        assert_eq!(Domain::try_from(-3), Err(Error::InvalidDomain { size: -3 }));
        assert_eq!(Domain::try_from(4).map(|d| d.size()), Ok(4));
    }

    #[test]
    fn heights() {
        let height = |size| Domain::new(size).unwrap().height();
        assert_eq!(height(1), 0);
        assert_eq!(height(2), 1);
        assert_eq!(height(3), 2);
        assert_eq!(height(5), 3);
        assert_eq!(height(8), 3);
        assert_eq!(height(9), 4);
        assert_eq!(Domain::new(5).unwrap().path_len(), 4);
    }

    #[test]
    fn capacity_sizing() {
        let domain = Domain::new(8).unwrap();
        assert_eq!(domain.build_len(), 15);
        assert_eq!(domain.capacity_for(10, false), 40);
        assert_eq!(domain.capacity_for(10, true), 55);
    }

    #[test]
    fn bounds_checks() {
        let domain = Domain::new(5).unwrap();
        assert!(domain.check_position(1).is_ok());
        assert!(domain.check_position(5).is_ok());
        assert_eq!(
            domain.check_position(6),
            Err(Error::PositionOutOfDomain { pos: 6, size: 5 })
        );
        assert!(domain.check_position(0).is_err());
        assert!(domain.check_range(2, 2).is_ok());
        assert!(domain.check_range(3, 2).is_err());
        assert!(domain.check_range(0, 2).is_err());
        assert!(domain.check_range(1, 6).is_err());
    }
}
