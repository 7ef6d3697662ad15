//! Naive reference answers used to validate the drivers in [crate::problems]
//!
//! All windows are 1-based and inclusive. Callers must pass a valid window.

use core::hash::Hash;
use hashbrown::{HashMap, HashSet};

/// k-th (1-based) smallest value among positions `[l, r]`
pub fn kth<T: Ord + Clone>(values: &[T], l: usize, r: usize, k: u64) -> Option<T> {
    let mut window = values[l - 1..r].to_vec();
    window.sort_unstable();
    let idx = usize::try_from(k).ok()?.checked_sub(1)?;
    window.get(idx).cloned()
}

/// Number of values `<= x` among positions `[l, r]`
pub fn rank<T: Ord>(values: &[T], l: usize, r: usize, x: &T) -> u64 {
    values[l - 1..r].iter().filter(|v| *v <= x).count() as u64
}

/// Number of distinct values occurring more than `threshold` times among positions `[l, r]`
pub fn frequent<T: Hash + Eq>(values: &[T], l: usize, r: usize, threshold: u64) -> u64 {
    let mut histogram: HashMap<&T, u64> = HashMap::new();
    for value in &values[l - 1..r] {
        *histogram.entry(value).or_default() += 1;
    }
    histogram.values().filter(|&&count| count > threshold).count() as u64
}

/// Number of distinct values among positions `[l, r]`
pub fn distinct<T: Hash + Eq>(values: &[T], l: usize, r: usize) -> u64 {
    values[l - 1..r].iter().collect::<HashSet<_>>().len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references() {
        let values = [3, 1, 3, 2, 3];
        assert_eq!(kth(&values, 1, 5, 2), Some(2));
        assert_eq!(kth(&values, 1, 5, 6), None);
        assert_eq!(kth(&values, 1, 5, 0), None);
        assert_eq!(rank(&values, 2, 4, &2), 2);
        assert_eq!(frequent(&values, 1, 5, 1), 1);
        assert_eq!(distinct(&values, 1, 5), 3);
        assert_eq!(distinct(&values, 3, 3), 1);
    }
}
