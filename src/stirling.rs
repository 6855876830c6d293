//! Stirling numbers of the second kind, `S(n, k)`, the number of partitions of
//! a set of `n` elements into exactly `k` blocks.
//!
//! Values are computed from the recurrence `S(n, k) = k * S(n - 1, k) + S(n - 1, k - 1)`
//! and memoized in a `StirlingCache`. Arguments are signed so that out-of-range pairs
//! reached by the recurrence have a value (zero) instead of being unrepresentable.

use std::collections::HashMap;

/// Checks if `(n, k)` ends the recurrence, i.e. its value is known without recursing.
///
/// These are `(0, 0)`, `(n, 0)` for positive `n`, `(n, n)`, and every pair with `k < 0` or `k > n`.
pub fn is_base_case(n: i64, k: i64) -> bool {
    base_value(n, k).is_some()
}

// the checks run in this order, so (-1, -1) counts as n == k
fn base_value(n: i64, k: i64) -> Option<u64> {
    if n == 0 && k == 0 {
        Some(1)
    } else if n > 0 && k == 0 {
        Some(0)
    } else if n == k {
        Some(1)
    } else if k < 0 || k > n {
        Some(0)
    } else {
        None
    }
}

/// Memo table for `S(n, k)`.
///
/// Owned by the caller, so independent computations do not share state.
#[derive(Debug, Clone, Default)]
pub struct StirlingCache
{
    memo: HashMap<(i64, i64), u64>
}

impl StirlingCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `S(n, k)`, or `None` if it does not fit into `u64`
    pub fn value(&mut self, n: i64, k: i64) -> Option<u64> {
        if let Some(v) = base_value(n, k) {
            return Some(v);
        }
        if let Some(v) = self.memo.get(&(n, k)) {
            return Some(*v);
        }

        // here 0 < k < n
        let v = (k as u64)
            .checked_mul(self.value(n - 1, k)?)?
            .checked_add(self.value(n - 1, k - 1)?)?;
        self.memo.insert((n, k), v);
        Some(v)
    }

    /// Forgets all memoized values
    pub fn clear(&mut self) {
        self.memo.clear();
    }

    /// Number of memoized values
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Returns `true` if nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

/// Returns `S(n, k)`, or `None` if it does not fit into `u64`
pub fn stirling2(n: usize, k: usize) -> Option<u64> {
    let n = i64::try_from(n).ok()?;
    let k = i64::try_from(k).ok()?;
    StirlingCache::new().value(n, k)
}

/// Number of partitions of a set of `n` elements into at least `kmin` and at most `kmax` blocks,
/// i.e. the sum of `S(n, j)` for `j` in `kmin..=kmax`.
///
/// Returns `None` if the sum does not fit into `u64`.
pub fn partitions_between(n: usize, kmin: usize, kmax: usize) -> Option<u64> {
    let mut cache = StirlingCache::new();
    let n = i64::try_from(n).ok()?;
    let kmin = i64::try_from(kmin).ok()?;
    // S(n, j) = 0 for j > n
    let kmax = i64::try_from(kmax).ok()?.min(n);

    let mut total = 0u64;
    for j in kmin..=kmax {
        total = total.checked_add(cache.value(n, j)?)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bell_number;

    #[test]
    fn known_values() {
        assert_eq!(stirling2(0, 0), Some(1));
        assert_eq!(stirling2(4, 2), Some(7));
        assert_eq!(stirling2(5, 2), Some(15));
        assert_eq!(stirling2(5, 3), Some(25));
        assert_eq!(stirling2(6, 3), Some(90));
        assert_eq!(stirling2(10, 5), Some(42525));
        assert_eq!(stirling2(3, 4), Some(0));
        assert_eq!(stirling2(3, 0), Some(0));
        assert_eq!(partitions_between(5, 2, 3), Some(40));
        assert_eq!(partitions_between(5, 3, 2), Some(0));
        assert_eq!(partitions_between(4, 0, 100), Some(15));
    }

    #[test]
    fn rows_add_up_to_bell_numbers() {
        let mut cache = StirlingCache::new();
        for n in 0..26 {
            let mut row = 0u64;
            for k in 0..=n {
                row += cache.value(n, k).unwrap();
            }
            assert_eq!(Some(row), bell_number(n as usize), "n = {}", n);
            assert_eq!(partitions_between(n as usize, 0, n as usize), Some(row));
        }
    }

    #[test]
    fn recurrence() {
        let mut cache = StirlingCache::new();
        for n in 1..20 {
            for k in 1..n {
                let v = cache.value(n, k).unwrap();
                let left = cache.value(n - 1, k).unwrap();
                let right = cache.value(n - 1, k - 1).unwrap();
                assert_eq!(v, k as u64 * left + right);
            }
        }
    }

    #[test]
    fn base_cases() {
        assert!(is_base_case(0, 0));
        assert!(is_base_case(3, 0));
        assert!(is_base_case(4, 4));
        assert!(is_base_case(4, 5));
        assert!(is_base_case(4, -1));
        assert!(is_base_case(-1, -1));
        assert!(is_base_case(-2, 0));
        assert!(!is_base_case(4, 2));
        assert!(!is_base_case(2, 1));

        let mut cache = StirlingCache::new();
        assert_eq!(cache.value(-1, -1), Some(1));
        assert_eq!(cache.value(-3, -1), Some(0));
        assert_eq!(cache.value(4, 5), Some(0));
        // base cases are never memoized
        assert!(cache.is_empty());
    }

    #[test]
    fn cache() {
        let mut cache = StirlingCache::new();
        assert_eq!(cache.value(6, 3), Some(90));
        assert!(!cache.is_empty());
        let len = cache.len();
        assert_eq!(cache.value(6, 3), Some(90));
        assert_eq!(cache.len(), len);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn overflow() {
        assert_eq!(stirling2(100, 50), None);
        assert!(stirling2(64, 2).is_some());
        assert_eq!(partitions_between(30, 0, 30), None);
    }
}
