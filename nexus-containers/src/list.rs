//! Doubly-linked list with stable element handles.
//!
//! Nodes live in a generational slot arena owned by the list, and links are
//! slot indices. The ring is anchored at a sentinel that holds no value: it
//! is the link pair stored in the list itself, addressed by the reserved
//! index `ROOT`. `root.next` is the front, `root.prev` is the back, and an
//! empty list has both pointing at `ROOT`.
//!
//! Every insertion returns a [`Handle`]. A handle stays usable for O(1)
//! access, erase, insert-adjacent and move operations until its own element
//! is erased, regardless of what happens elsewhere in the list.
//!
//! # Foreign and stale handles
//!
//! All operations validate handles against the list's owner tag and the
//! element's generation before touching anything. A rejected handle turns
//! the operation into a no-op:
//!
//! | Operation | Result for a rejected handle |
//! |-----------|------------------------------|
//! | `insert_before` / `insert_after` | `None`, list unchanged |
//! | `erase` | `None`, list unchanged |
//! | `move_*` | `false`, list unchanged |
//! | `get` / `next` / `prev` | `None` |
//!
//! Use [`LinkedList::check`] to learn why a handle was rejected.
//!
//! # Example
//!
//! ```
//! use nexus_containers::LinkedList;
//!
//! let mut list = LinkedList::new();
//! let mid = list.push_back(1);
//! list.insert_before(0, mid);
//! list.insert_after(2, mid);
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//!
//! // Walk front to back through element views.
//! let mut cur = list.front();
//! let mut seen = Vec::new();
//! while let Some(e) = cur {
//!     seen.push(*e.value());
//!     cur = e.next();
//! }
//! assert_eq!(seen, vec![0, 1, 2]);
//!
//! // Erase the neighbours through the middle handle.
//! let prev = list.prev(mid).unwrap();
//! let next = list.next(mid).unwrap();
//! assert_eq!(list.erase(prev), Some(0));
//! assert_eq!(list.erase(next), Some(2));
//! assert_eq!(list.len(), 1);
//! ```

use core::fmt;
use core::iter::FusedIterator;

use crate::error::HandleError;
use crate::handle::{Handle, ListId};
use crate::slot::{self, Slots};

/// Sentinel link. Never a valid slot index.
const ROOT: u32 = slot::NONE;

struct Node<T> {
    value: T,
    prev: u32,
    next: u32,
}

#[derive(Debug, Clone, Copy)]
struct Links {
    prev: u32,
    next: u32,
}

/// A doubly-linked list that owns its elements and hands out stable
/// [`Handle`]s.
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | push / pop at either end | O(1) |
/// | insert before / after a handle | O(1) |
/// | erase by handle | O(1) |
/// | move by handle | O(1) |
/// | [`clear`](Self::clear) | O(n) |
///
/// Empty access returns `None`; use `list.pop_front().unwrap_or_default()`
/// for default-value semantics.
pub struct LinkedList<T> {
    id: ListId,
    root: Links,
    nodes: Slots<Node<T>>,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::from_slots(Slots::new())
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_slots(Slots::with_capacity(capacity))
    }

    fn from_slots(nodes: Slots<Node<T>>) -> Self {
        Self {
            id: ListId::fresh(),
            root: Links {
                prev: ROOT,
                next: ROOT,
            },
            nodes,
        }
    }

    /// Returns this list's owner tag.
    #[inline]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Returns the number of elements the list can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    // ========================================================================
    // Handles
    // ========================================================================

    /// Validates a handle against this list.
    ///
    /// ```
    /// use nexus_containers::{HandleError, LinkedList};
    ///
    /// let mut a = LinkedList::new();
    /// let b: LinkedList<i32> = LinkedList::new();
    /// let h = a.push_back(1);
    ///
    /// assert_eq!(a.check(h), Ok(()));
    /// assert_eq!(b.check(h), Err(HandleError::Foreign));
    ///
    /// a.erase(h);
    /// assert_eq!(a.check(h), Err(HandleError::Stale));
    /// ```
    pub fn check(&self, handle: Handle) -> Result<(), HandleError> {
        self.resolve(handle).map(|_| ())
    }

    /// Returns `true` if `handle` refers to a live element of this list.
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    #[inline]
    fn resolve(&self, handle: Handle) -> Result<u32, HandleError> {
        if handle.list != self.id {
            return Err(HandleError::Foreign);
        }
        if !self.nodes.contains(handle.index, handle.generation) {
            return Err(HandleError::Stale);
        }
        Ok(handle.index)
    }

    /// Builds the handle for a live slot, or `None` for the sentinel.
    #[inline]
    fn handle_at(&self, index: u32) -> Option<Handle> {
        if index == ROOT {
            None
        } else {
            Some(Handle::new(self.id, index, self.nodes.generation(index)))
        }
    }

    /// Returns the front element's handle, or `None` if empty.
    #[inline]
    pub fn front_handle(&self) -> Option<Handle> {
        self.handle_at(self.root.next)
    }

    /// Returns the back element's handle, or `None` if empty.
    #[inline]
    pub fn back_handle(&self) -> Option<Handle> {
        self.handle_at(self.root.prev)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a view of the front element.
    #[inline]
    pub fn front(&self) -> Option<Element<'_, T>> {
        self.element_at(self.root.next)
    }

    /// Returns a view of the back element.
    #[inline]
    pub fn back(&self) -> Option<Element<'_, T>> {
        self.element_at(self.root.prev)
    }

    /// Returns a view of the element `handle` refers to.
    #[inline]
    pub fn element(&self, handle: Handle) -> Option<Element<'_, T>> {
        let index = self.resolve(handle).ok()?;
        self.element_at(index)
    }

    #[inline]
    fn element_at(&self, index: u32) -> Option<Element<'_, T>> {
        let handle = self.handle_at(index)?;
        Some(Element { list: self, handle })
    }

    /// Returns a reference to the value behind `handle`.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if handle.list != self.id {
            return None;
        }
        self.nodes
            .get(handle.index, handle.generation)
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to the value behind `handle`.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if handle.list != self.id {
            return None;
        }
        self.nodes
            .get_mut(handle.index, handle.generation)
            .map(|node| &mut node.value)
    }

    /// Returns a reference to the front value.
    #[inline]
    pub fn front_value(&self) -> Option<&T> {
        self.value_at(self.root.next)
    }

    /// Returns a reference to the back value.
    #[inline]
    pub fn back_value(&self) -> Option<&T> {
        self.value_at(self.root.prev)
    }

    #[inline]
    fn value_at(&self, index: u32) -> Option<&T> {
        if index == ROOT {
            None
        } else {
            Some(&self.nodes.at(index).value)
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Returns the handle of the element after `handle`.
    ///
    /// Returns `None` if `handle` is the back element or is rejected.
    #[inline]
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle).ok()?;
        self.handle_at(self.next_of(index))
    }

    /// Returns the handle of the element before `handle`.
    ///
    /// Returns `None` if `handle` is the front element or is rejected.
    #[inline]
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle).ok()?;
        self.handle_at(self.prev_of(index))
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Appends a value, returning its handle.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Handle {
        self.insert(value, ROOT)
    }

    /// Prepends a value, returning its handle.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Handle {
        let front = self.root.next;
        self.insert(value, front)
    }

    /// Inserts a value immediately before `at`.
    ///
    /// Returns `None` and leaves the list unmodified if `at` is foreign or
    /// stale.
    pub fn insert_before(&mut self, value: T, at: Handle) -> Option<Handle> {
        let at = self.resolve(at).ok()?;
        Some(self.insert(value, at))
    }

    /// Inserts a value immediately after `at`.
    ///
    /// Returns `None` and leaves the list unmodified if `at` is foreign or
    /// stale.
    pub fn insert_after(&mut self, value: T, at: Handle) -> Option<Handle> {
        let at = self.resolve(at).ok()?;
        let next = self.next_of(at);
        Some(self.insert(value, next))
    }

    /// Links a new node holding `value` directly before `at` (a slot or
    /// `ROOT`).
    fn insert(&mut self, value: T, at: u32) -> Handle {
        let prev = self.prev_of(at);
        let (index, generation) = self.nodes.insert(Node {
            value,
            prev,
            next: at,
        });
        self.set_next(prev, index);
        self.set_prev(at, index);
        Handle::new(self.id, index, generation)
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the front value.
    ///
    /// Returns `None` and does nothing if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let front = self.root.next;
        self.erase_at(front)
    }

    /// Removes and returns the back value.
    ///
    /// Returns `None` and does nothing if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        let back = self.root.prev;
        self.erase_at(back)
    }

    /// Removes the element behind `at` and returns its value.
    ///
    /// Returns `None` and leaves the list unmodified if `at` is foreign or
    /// stale. The handle is stale afterwards.
    pub fn erase(&mut self, at: Handle) -> Option<T> {
        let index = self.resolve(at).ok()?;
        self.unlink(index);
        self.nodes
            .remove(index, at.generation)
            .map(|node| node.value)
    }

    fn erase_at(&mut self, index: u32) -> Option<T> {
        if index == ROOT {
            return None;
        }
        self.unlink(index);
        self.nodes.take(index).map(|node| node.value)
    }

    /// Removes every element, back to front.
    ///
    /// All outstanding handles become stale. The list then behaves like a
    /// freshly constructed one.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
        debug_assert_eq!(self.root.next, ROOT);
        debug_assert_eq!(self.root.prev, ROOT);
    }

    // ========================================================================
    // Moves
    // ========================================================================

    /// Moves `e` to the front of the list.
    ///
    /// Returns `true` if the list changed. Does nothing if `e` is already at
    /// the front or is rejected.
    pub fn move_to_front(&mut self, e: Handle) -> bool {
        let Ok(e) = self.resolve(e) else {
            return false;
        };
        let front = self.root.next;
        if e == front {
            return false;
        }
        self.relink(e, front);
        true
    }

    /// Moves `e` to the back of the list.
    ///
    /// Returns `true` if the list changed. Does nothing if `e` is already at
    /// the back or is rejected.
    pub fn move_to_back(&mut self, e: Handle) -> bool {
        let Ok(e) = self.resolve(e) else {
            return false;
        };
        if e == self.root.prev {
            return false;
        }
        self.relink(e, ROOT);
        true
    }

    /// Moves `e` to sit immediately before `at`.
    ///
    /// Returns `true` if the list changed. Does nothing if `e == at`, if `e`
    /// already sits before `at`, or if either handle is rejected.
    pub fn move_before(&mut self, e: Handle, at: Handle) -> bool {
        let (Ok(e), Ok(at)) = (self.resolve(e), self.resolve(at)) else {
            return false;
        };
        if e == at || self.next_of(e) == at {
            return false;
        }
        self.relink(e, at);
        true
    }

    /// Moves `e` to sit immediately after `at`.
    ///
    /// Returns `true` if the list changed. Does nothing if `e == at`, if `e`
    /// already sits after `at`, or if either handle is rejected.
    pub fn move_after(&mut self, e: Handle, at: Handle) -> bool {
        let (Ok(e), Ok(at)) = (self.resolve(e), self.resolve(at)) else {
            return false;
        };
        if e == at || self.prev_of(e) == at {
            return false;
        }
        let next = self.next_of(at);
        self.relink(e, next);
        true
    }

    /// Unlinks `e` and splices it back in directly before `at`.
    fn relink(&mut self, e: u32, at: u32) {
        // Unlinking e first would leave at dangling when they are the same node.
        if e == at {
            return;
        }
        self.unlink(e);

        let prev = self.prev_of(at);
        let node = self.nodes.at_mut(e);
        node.prev = prev;
        node.next = at;
        self.set_next(prev, e);
        self.set_prev(at, e);
    }

    // ========================================================================
    // Link plumbing
    // ========================================================================

    /// Detaches `index` from its neighbours. The node's own links are left
    /// as they were.
    #[inline]
    fn unlink(&mut self, index: u32) {
        let node = self.nodes.at(index);
        let (prev, next) = (node.prev, node.next);
        self.set_next(prev, next);
        self.set_prev(next, prev);
    }

    #[inline]
    fn next_of(&self, index: u32) -> u32 {
        if index == ROOT {
            self.root.next
        } else {
            self.nodes.at(index).next
        }
    }

    #[inline]
    fn prev_of(&self, index: u32) -> u32 {
        if index == ROOT {
            self.root.prev
        } else {
            self.nodes.at(index).prev
        }
    }

    #[inline]
    fn set_next(&mut self, index: u32, next: u32) {
        if index == ROOT {
            self.root.next = next;
        } else {
            self.nodes.at_mut(index).next = next;
        }
    }

    #[inline]
    fn set_prev(&mut self, index: u32, prev: u32) {
        if index == ROOT {
            self.root.prev = prev;
        } else {
            self.nodes.at_mut(index).prev = prev;
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    #[inline]
    fn walk(&self) -> Walk {
        Walk {
            front: self.root.next,
            back: self.root.prev,
            remaining: self.len(),
        }
    }

    /// Returns an iterator over references to values, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            walk: self.walk(),
        }
    }

    /// Returns an iterator over mutable references to values, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let walk = self.walk();
        IterMut {
            nodes: self.nodes.raw(),
            walk,
        }
    }

    /// Returns an iterator over element handles, front to back.
    ///
    /// Collect the handles first when the list will be modified during the
    /// walk.
    #[inline]
    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            list: self,
            walk: self.walk(),
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    /// Builds a list by back-insertion, preserving input order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    /// Clones the values into a list with a new owner tag. Handles into
    /// `self` are foreign to the clone.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Element view
// =============================================================================

/// Borrowed view of one list element.
///
/// Navigation through [`next`](Element::next) and [`prev`](Element::prev)
/// never exposes the sentinel: walking off either end yields `None`.
///
/// ```
/// use nexus_containers::LinkedList;
///
/// let list: LinkedList<_> = (1..=5).collect();
///
/// let mut backward = Vec::new();
/// let mut cur = list.back();
/// while let Some(e) = cur {
///     backward.push(*e.value());
///     cur = e.prev();
/// }
/// assert_eq!(backward, vec![5, 4, 3, 2, 1]);
/// ```
pub struct Element<'a, T> {
    list: &'a LinkedList<T>,
    handle: Handle,
}

impl<'a, T> Element<'a, T> {
    /// Returns the stable handle of this element.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns the element's value.
    #[inline]
    pub fn value(&self) -> &'a T {
        &self.list.nodes.at(self.handle.index).value
    }

    /// Returns the next element, or `None` at the back.
    #[inline]
    pub fn next(&self) -> Option<Element<'a, T>> {
        self.list.element_at(self.list.next_of(self.handle.index))
    }

    /// Returns the previous element, or `None` at the front.
    #[inline]
    pub fn prev(&self) -> Option<Element<'a, T>> {
        self.list.element_at(self.list.prev_of(self.handle.index))
    }
}

impl<T> Clone for Element<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Element<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Element<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("handle", &self.handle)
            .field("value", self.value())
            .finish()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Double-ended traversal state shared by the borrowing iterators.
#[derive(Clone)]
struct Walk {
    front: u32,
    back: u32,
    remaining: usize,
}

impl Walk {
    #[inline]
    fn next<T>(&mut self, list: &LinkedList<T>) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front;
        self.front = list.next_of(index);
        self.remaining -= 1;
        Some(index)
    }

    #[inline]
    fn next_back<T>(&mut self, list: &LinkedList<T>) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back;
        self.back = list.prev_of(index);
        self.remaining -= 1;
        Some(index)
    }
}

/// Iterator over references to list values.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    walk: Walk,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        self.walk.next(list).map(|index| &list.nodes.at(index).value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let list = self.list;
        self.walk
            .next_back(list)
            .map(|index| &list.nodes.at(index).value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            walk: self.walk.clone(),
        }
    }
}

/// Iterator over mutable references to list values.
pub struct IterMut<'a, T> {
    nodes: slot::RawSlots<'a, Node<T>>,
    walk: Walk,
}

impl<'a, T> IterMut<'a, T> {
    /// Yields the value at `index` and advances the walk from that end.
    #[inline]
    fn take(&mut self, index: u32, forward: bool) -> &'a mut T {
        // Safety: the walk visits each live node exactly once
        let node = unsafe { self.nodes.at_mut(index) };
        if forward {
            self.walk.front = node.next;
        } else {
            self.walk.back = node.prev;
        }
        self.walk.remaining -= 1;
        &mut node.value
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.walk.remaining == 0 {
            return None;
        }
        Some(self.take(self.walk.front, true))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.walk.remaining == 0 {
            return None;
        }
        Some(self.take(self.walk.back, false))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Iterator over element handles.
pub struct Handles<'a, T> {
    list: &'a LinkedList<T>,
    walk: Walk,
}

impl<T> Iterator for Handles<'_, T> {
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.walk.next(self.list)?;
        self.list.handle_at(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T> DoubleEndedIterator for Handles<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.walk.next_back(self.list)?;
        self.list.handle_at(index)
    }
}

impl<T> ExactSizeIterator for Handles<'_, T> {}

impl<T> FusedIterator for Handles<'_, T> {}

/// Owning iterator over list values, front to back.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
