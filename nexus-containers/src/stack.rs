//! LIFO stack over a `Vec`.

use core::fmt;
use core::slice;

/// A last-in, first-out stack.
///
/// Empty access returns `None` rather than a default value.
///
/// ```
/// use nexus_containers::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.top(), Some(&2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    data: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    #[inline]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty stack with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pushes a value on top.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Removes and returns the top value, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Returns the top value, or `None` if empty.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.data.last()
    }

    /// Returns the top value mutably, or `None` if empty.
    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.data.last_mut()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterates from the bottom of the stack to the top.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// The last item yielded ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
