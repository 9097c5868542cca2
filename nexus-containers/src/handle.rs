//! Non-owning element handles.
//!
//! A [`Handle`] names one element of one [`LinkedList`](crate::LinkedList).
//! It carries the owning list's [`ListId`] as an owner tag plus the
//! element's slot index and generation. The list validates all three on
//! every use, so a handle from another list, or one whose element was
//! already erased, is rejected instead of aliasing some other element.

use core::sync::atomic::{AtomicU64, Ordering};

/// Identity tag of a list.
///
/// Every list gets a fresh id at construction (including clones), so ids
/// are never shared between two live lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable reference to a list element.
///
/// Handles stay valid across unrelated insertions, removals and moves in
/// the same list. They become stale once their element is erased (directly,
/// via a pop, or by [`clear`](crate::LinkedList::clear)).
///
/// ```
/// use nexus_containers::LinkedList;
///
/// let mut list = LinkedList::new();
/// let a = list.push_back(1);
/// let b = list.push_back(2);
///
/// list.push_front(0);
/// assert_eq!(list.get(b), Some(&2));
///
/// assert_eq!(list.erase(a), Some(1));
/// assert_eq!(list.get(a), None);
/// assert_eq!(list.get(b), Some(&2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) list: ListId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Handle {
    #[inline]
    pub(crate) const fn new(list: ListId, index: u32, generation: u32) -> Self {
        Self {
            list,
            index,
            generation,
        }
    }

    /// Returns the id of the list this handle was issued by.
    #[inline]
    pub fn list_id(&self) -> ListId {
        self.list
    }
}
