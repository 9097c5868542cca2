//! Array-backed binary heap ordered by an injected comparator.
//!
//! The heap is a complete binary tree laid out in a `Vec`: the root lives at
//! index 0 and the children of `i` at `2i + 1` and `2i + 2`. For every
//! non-root index `i` with parent `p = (i - 1) / 2`, the element at `i` is
//! never strictly closer to the root than the element at `p` under the
//! heap's [`Compare`] strategy.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | [`top`](BinaryHeap::top) | O(1) |
//! | [`push`](BinaryHeap::push) | O(log n) |
//! | [`pop`](BinaryHeap::pop) | O(log n) |
//! | [`from_vec`](BinaryHeap::from_vec) | O(n) |
//!
//! Empty access is not an error: [`top`](BinaryHeap::top) and
//! [`pop`](BinaryHeap::pop) return `None` and leave the heap untouched.
//! Use `heap.pop().unwrap_or_default()` for default-value semantics.
//!
//! Positions move on every mutation, so the heap hands out no handles into
//! its storage.

use core::fmt;
use core::mem;
use core::slice;
use std::vec;

use crate::compare::{Compare, MinFirst};

/// A binary heap over an arbitrary strict weak order.
///
/// `C` decides which element sits at the root. It defaults to [`MinFirst`],
/// making `BinaryHeap<T>` a min-heap for `T: Ord`. Any
/// `Fn(&T, &T) -> bool` closure works as well.
///
/// This is not a stable priority queue: elements the comparator considers
/// equivalent come out in unspecified order.
///
/// # Example
///
/// ```
/// use nexus_containers::BinaryHeap;
///
/// #[derive(Debug, PartialEq)]
/// struct Task {
///     priority: u32,
///     name: &'static str,
/// }
///
/// let mut heap = BinaryHeap::new(|a: &Task, b: &Task| a.priority < b.priority);
///
/// heap.push(Task { priority: 10, name: "low" });
/// heap.push(Task { priority: 1, name: "high" });
/// heap.push(Task { priority: 5, name: "medium" });
///
/// assert_eq!(heap.len(), 3);
/// assert_eq!(heap.top().map(|t| t.name), Some("high"));
///
/// assert_eq!(heap.pop().unwrap().name, "high");
/// assert_eq!(heap.pop().unwrap().name, "medium");
/// assert_eq!(heap.pop().unwrap().name, "low");
/// assert_eq!(heap.pop(), None);
/// ```
#[derive(Clone)]
pub struct BinaryHeap<T, C = MinFirst> {
    /// Heap-ordered elements.
    data: Vec<T>,
    cmp: C,
}

impl<T, C: Default> Default for BinaryHeap<T, C> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            cmp: C::default(),
        }
    }
}

impl<T, C> BinaryHeap<T, C> {
    /// Returns the number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the capacity of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the root element without removing it.
    ///
    /// Returns `None` if the heap is empty.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.data.first()
    }

    /// Alias for [`top`](Self::top).
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.top()
    }

    /// Returns the ordering strategy.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Removes all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterates over the elements in storage order (not sorted).
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns the backing storage in heap order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the heap, returning the backing storage in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Removes every element in storage order, leaving the heap empty.
    pub fn drain(&mut self) -> vec::Drain<'_, T> {
        self.data.drain(..)
    }
}

impl<T, C: Compare<T>> BinaryHeap<T, C> {
    /// Creates an empty heap ordered by `cmp`.
    #[inline]
    pub const fn new(cmp: C) -> Self {
        Self {
            data: Vec::new(),
            cmp,
        }
    }

    /// Creates an empty heap with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Builds a heap from arbitrary data in O(n).
    ///
    /// Uses bottom-up construction: every parent from `len / 2 - 1` down to
    /// the root is sifted down once. This beats `n` sequential pushes
    /// (O(n log n)).
    ///
    /// ```
    /// use nexus_containers::{BinaryHeap, MinFirst};
    ///
    /// let mut heap = BinaryHeap::from_vec(MinFirst, vec![5, 3, 8, 1]);
    /// assert_eq!(heap.pop(), Some(1));
    /// assert_eq!(heap.pop(), Some(3));
    /// ```
    pub fn from_vec(cmp: C, data: Vec<T>) -> Self {
        let mut heap = Self { data, cmp };
        heap.rebuild();
        heap
    }

    /// Pushes an element onto the heap.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the root element.
    ///
    /// Returns `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        let mut value = self.data.pop()?;
        if !self.data.is_empty() {
            mem::swap(&mut value, &mut self.data[0]);
            self.sift_down(0);
        }
        Some(value)
    }

    /// Pushes `value` then pops the root, with at most one sift.
    ///
    /// Returns `value` itself when it would become the root.
    pub fn push_pop(&mut self, mut value: T) -> T {
        match self.data.first() {
            Some(top) if self.cmp.less(top, &value) => {
                mem::swap(&mut value, &mut self.data[0]);
                self.sift_down(0);
                value
            }
            _ => value,
        }
    }

    /// Pops the root then pushes `value`, with a single sift.
    ///
    /// Returns the old root, or `None` (after pushing `value`) if the heap
    /// was empty.
    pub fn replace_top(&mut self, mut value: T) -> Option<T> {
        if self.data.is_empty() {
            self.data.push(value);
            return None;
        }

        mem::swap(&mut value, &mut self.data[0]);
        self.sift_down(0);
        Some(value)
    }

    /// Consumes the heap, returning its elements in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    fn rebuild(&mut self) {
        for parent in (0..self.data.len() / 2).rev() {
            self.sift_down(parent);
        }
    }

    /// Moves the element at `child` toward the root while it beats its parent.
    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.cmp.less(&self.data[child], &self.data[parent]) {
                break;
            }
            self.data.swap(child, parent);
            child = parent;
        }
    }

    /// Moves the element at `parent` toward the leaves until it beats both
    /// children.
    fn sift_down(&mut self, mut parent: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            let mut winner = parent;
            if self.cmp.less(&self.data[left], &self.data[winner]) {
                winner = left;
            }
            if right < len && self.cmp.less(&self.data[right], &self.data[winner]) {
                winner = right;
            }

            if winner == parent {
                break;
            }
            self.data.swap(parent, winner);
            parent = winner;
        }
    }
}

impl<T, C: Compare<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        // Rebuild is O(n + k), pushing is O(k log(n + k)).
        if lower > self.data.len() {
            self.data.extend(iter);
            self.rebuild();
        } else {
            self.data.reserve(lower);
            for value in iter {
                self.push(value);
            }
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for BinaryHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(C::default(), iter.into_iter().collect())
    }
}

impl<T, C: Compare<T> + Default> From<Vec<T>> for BinaryHeap<T, C> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(C::default(), data)
    }
}

impl<T, C> IntoIterator for BinaryHeap<T, C> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    /// Iterates in storage order. Use
    /// [`into_sorted_vec`](BinaryHeap::into_sorted_vec) for pop order.
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a BinaryHeap<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
