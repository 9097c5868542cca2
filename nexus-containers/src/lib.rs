//! Container primitives with explicit complexity and no panicking accessors.
//!
//! | Structure | Use Case | Key Operations |
//! |-----------|----------|----------------|
//! | [`BinaryHeap`] | Priority queues, k-smallest | O(1) top, O(log n) push/pop, O(n) build |
//! | [`LinkedList`] | LRU orders, queues with cancellation | O(1) push/pop/insert/erase/move by [`Handle`] |
//! | [`Stack`] | LIFO work lists | O(1) push/pop |
//!
//! # Empty access
//!
//! Accessors that have nothing to return (`top`/`pop` on an empty heap or
//! stack, `pop_front`/`pop_back` on an empty list) return `None` and leave
//! the container unchanged. Nothing in this crate panics on empty input.
//!
//! # Comparators
//!
//! The heap is parameterized by a [`Compare`] strategy rather than `T: Ord`.
//! [`MinFirst`], [`MaxFirst`], [`Reverse`] and any `Fn(&T, &T) -> bool`
//! closure work.
//!
//! ```
//! use nexus_containers::{BinaryHeap, MaxFirst};
//!
//! let mut heap = BinaryHeap::from_vec(MaxFirst, vec![3, 1, 4, 1, 5]);
//! assert_eq!(heap.pop(), Some(5));
//! assert_eq!(heap.len(), 4);
//! ```
//!
//! # Stable handles
//!
//! Every [`LinkedList`] insertion returns a [`Handle`]. Handles survive
//! unrelated mutation and are checked against the owning list on every use,
//! so a handle from another list (or to an erased element) is a no-op
//! rather than undefined behavior.
//!
//! ```
//! use nexus_containers::LinkedList;
//!
//! // LRU order: most recent at the front.
//! let mut lru = LinkedList::new();
//! let a = lru.push_back("a");
//! let b = lru.push_back("b");
//! let _c = lru.push_back("c");
//!
//! lru.move_to_front(b);
//! assert_eq!(lru.pop_back(), Some("c"));
//! assert_eq!(lru.get(a), Some(&"a"));
//! assert_eq!(lru.iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```
//!
//! # Threading
//!
//! All containers are plain single-threaded values. Wrap them in a mutex
//! for shared access.

#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod handle;
pub mod heap;
pub mod list;
pub mod stack;

mod slot;

pub use compare::{Compare, MaxFirst, MinFirst, Reverse};
pub use error::HandleError;
pub use handle::{Handle, ListId};
pub use heap::BinaryHeap;
pub use list::{Element, LinkedList};
pub use stack::Stack;
