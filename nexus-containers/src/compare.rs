//! Ordering strategies for [`BinaryHeap`](crate::BinaryHeap).
//!
//! The heap never relies on `T: Ord` directly. It asks a [`Compare`]
//! implementation whether one element belongs closer to the root than
//! another, so the same heap type serves as a min-heap, a max-heap, or a
//! priority queue over any derived key.
//!
//! # Example
//!
//! ```
//! use nexus_containers::{BinaryHeap, MaxFirst};
//!
//! // Closure comparator: shortest string first.
//! let mut by_len = BinaryHeap::new(|a: &&str, b: &&str| a.len() < b.len());
//! by_len.push("three");
//! by_len.push("a");
//! by_len.push("bb");
//! assert_eq!(by_len.pop(), Some("a"));
//!
//! // Named strategy: largest first.
//! let mut max = BinaryHeap::new(MaxFirst);
//! max.extend([3, 9, 1]);
//! assert_eq!(max.top(), Some(&9));
//! ```

/// Decides heap order between two elements.
///
/// `less(a, b)` returns `true` when `a` must sit closer to the root than `b`.
///
/// # Contract
///
/// The relation must be a strict weak order: irreflexive, asymmetric and
/// transitive. The heap does not detect violations. An inconsistent
/// comparator yields an unspecified (but memory-safe) element order.
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `a` belongs closer to the root than `b`.
    fn less(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Smallest element at the root (`a < b`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinFirst;

impl<T: Ord + ?Sized> Compare<T> for MinFirst {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Largest element at the root (`a > b`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxFirst;

impl<T: Ord + ?Sized> Compare<T> for MaxFirst {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

/// Flips the order of the wrapped comparator.
///
/// ```
/// use nexus_containers::{BinaryHeap, MinFirst, Reverse};
///
/// let heap = BinaryHeap::from_vec(Reverse(MinFirst), vec![4, 8, 2]);
/// assert_eq!(heap.top(), Some(&8));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reverse<C> {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.0.less(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_first_is_strict() {
        assert!(MinFirst.less(&1, &2));
        assert!(!MinFirst.less(&2, &1));
        assert!(!MinFirst.less(&2, &2));
    }

    #[test]
    fn max_first_is_strict() {
        assert!(MaxFirst.less(&2, &1));
        assert!(!MaxFirst.less(&1, &2));
        assert!(!MaxFirst.less(&1, &1));
    }

    #[test]
    fn closure_comparator() {
        let by_abs = |a: &i32, b: &i32| a.abs() < b.abs();
        assert!(by_abs.less(&-1, &3));
        assert!(!by_abs.less(&-4, &3));
    }

    #[test]
    fn reverse_flips() {
        let rev = Reverse(MinFirst);
        assert!(rev.less(&5, &1));
        assert!(!rev.less(&1, &5));
        assert!(!rev.less(&5, &5));

        assert!(Reverse(Reverse(MinFirst)).less(&1, &5));
    }

    #[test]
    fn unsized_elements() {
        assert!(MinFirst.less("apple", "banana"));
        assert!(MaxFirst.less("banana", "apple"));
    }
}
