//! Generational slot arena with stable indices.
//!
//! Slots provide insert/remove/get where an index stays valid until its
//! value is removed. Removed slots are reused LIFO. Each slot carries a
//! generation that is bumped on every removal, so an `(index, generation)`
//! pair taken before a removal never resolves to a later occupant of the
//! same slot.
//!
//! Backing storage is a `Vec` and grows by amortized doubling.

use core::marker::PhantomData;

/// Reserved index. Never handed out by [`Slots::insert`].
pub(crate) const NONE: u32 = u32::MAX;

pub(crate) enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: u32 },
}

pub(crate) struct Slots<T> {
    entries: Vec<Entry<T>>,
    /// Head of the free stack threaded through vacant entries.
    free_head: u32,
    len: usize,
}

impl<T> Slots<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: NONE,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_head: NONE,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Inserts a value, returning its `(index, generation)`.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX - 1` slots would be needed.
    pub(crate) fn insert(&mut self, value: T) -> (u32, u32) {
        if self.free_head != NONE {
            let index = self.free_head;
            let slot = &mut self.entries[index as usize];
            let generation = match *slot {
                Entry::Vacant {
                    generation,
                    next_free,
                } => {
                    self.free_head = next_free;
                    generation
                }
                Entry::Occupied { .. } => unreachable!("free stack points at occupied slot"),
            };
            *slot = Entry::Occupied { generation, value };
            self.len += 1;
            return (index, generation);
        }

        let index = self.entries.len();
        assert!(index < NONE as usize, "slot capacity overflow");
        self.entries.push(Entry::Occupied {
            generation: 0,
            value,
        });
        self.len += 1;
        (index as u32, 0)
    }

    /// Returns `true` if `index` is occupied at `generation`.
    #[inline]
    pub(crate) fn contains(&self, index: u32, generation: u32) -> bool {
        matches!(
            self.entries.get(index as usize),
            Some(Entry::Occupied { generation: g, .. }) if *g == generation
        )
    }

    /// Returns the value at `index` if it is occupied at `generation`.
    #[inline]
    pub(crate) fn get(&self, index: u32, generation: u32) -> Option<&T> {
        match self.entries.get(index as usize) {
            Some(Entry::Occupied { generation: g, value }) if *g == generation => Some(value),
            _ => None,
        }
    }

    /// Returns the value at `index` if it is occupied at `generation`.
    #[inline]
    pub(crate) fn get_mut(&mut self, index: u32, generation: u32) -> Option<&mut T> {
        match self.entries.get_mut(index as usize) {
            Some(Entry::Occupied { generation: g, value }) if *g == generation => Some(value),
            _ => None,
        }
    }

    /// Returns the current generation of an occupied slot.
    #[inline]
    pub(crate) fn generation(&self, index: u32) -> u32 {
        match self.entries[index as usize] {
            Entry::Occupied { generation, .. } => generation,
            Entry::Vacant { .. } => unreachable!("generation of vacant slot {index}"),
        }
    }

    /// Returns the occupied value at `index`.
    ///
    /// Callers only pass indices reached through live links.
    #[inline]
    pub(crate) fn at(&self, index: u32) -> &T {
        match &self.entries[index as usize] {
            Entry::Occupied { value, .. } => value,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {index}"),
        }
    }

    /// Mutable counterpart of [`at`](Self::at).
    #[inline]
    pub(crate) fn at_mut(&mut self, index: u32) -> &mut T {
        match &mut self.entries[index as usize] {
            Entry::Occupied { value, .. } => value,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {index}"),
        }
    }

    /// Removes the value at `index` if it is occupied at `generation`.
    pub(crate) fn remove(&mut self, index: u32, generation: u32) -> Option<T> {
        if !self.contains(index, generation) {
            return None;
        }
        self.take(index)
    }

    /// Removes whatever occupies `index`, bumping its generation.
    pub(crate) fn take(&mut self, index: u32) -> Option<T> {
        let slot = self.entries.get_mut(index as usize)?;
        let generation = match *slot {
            Entry::Occupied { generation, .. } => generation,
            Entry::Vacant { .. } => return None,
        };

        let vacant = Entry::Vacant {
            generation: generation.wrapping_add(1),
            next_free: self.free_head,
        };
        let Entry::Occupied { value, .. } = core::mem::replace(slot, vacant) else {
            unreachable!()
        };

        self.free_head = index;
        self.len -= 1;
        Some(value)
    }

    /// Grants disjoint mutable access to occupied slots for `'a`.
    pub(crate) fn raw(&mut self) -> RawSlots<'_, T> {
        RawSlots {
            ptr: self.entries.as_mut_ptr(),
            len: self.entries.len(),
            _marker: PhantomData,
        }
    }
}

/// Mutable view over slot entries that can hand out `&'a mut T` for
/// distinct indices at the same time.
pub(crate) struct RawSlots<'a, T> {
    ptr: *mut Entry<T>,
    len: usize,
    _marker: PhantomData<&'a mut Entry<T>>,
}

impl<'a, T> RawSlots<'a, T> {
    /// Returns the occupied value at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be occupied and must not be requested again while the
    /// returned reference is alive.
    #[inline]
    pub(crate) unsafe fn at_mut(&mut self, index: u32) -> &'a mut T {
        let i = index as usize;
        assert!(i < self.len, "slot index out of bounds");
        // Safety: in bounds, and the caller guarantees no aliasing
        match unsafe { &mut *self.ptr.add(i) } {
            Entry::Occupied { value, .. } => value,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut slots: Slots<u64> = Slots::new();
        let (a, ga) = slots.insert(1);
        let (b, gb) = slots.insert(2);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots.get(a, ga), Some(&1));
        assert_eq!(slots.get(b, gb), Some(&2));

        assert_eq!(slots.remove(a, ga), Some(1));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots.get(a, ga), None);
        assert_eq!(slots.remove(a, ga), None);
    }

    #[test]
    fn reuse_bumps_generation() {
        let mut slots: Slots<&str> = Slots::with_capacity(4);
        let (a, ga) = slots.insert("first");
        slots.remove(a, ga);

        let (b, gb) = slots.insert("second");
        assert_eq!(a, b, "slot reused");
        assert_ne!(ga, gb);
        assert_eq!(slots.get(a, ga), None);
        assert_eq!(slots.get(b, gb), Some(&"second"));
    }

    #[test]
    fn free_stack_is_lifo() {
        let mut slots: Slots<u32> = Slots::new();
        let keys: Vec<_> = (0..4).map(|i| slots.insert(i)).collect();
        slots.remove(keys[1].0, keys[1].1);
        slots.remove(keys[3].0, keys[3].1);

        assert_eq!(slots.insert(10).0, keys[3].0);
        assert_eq!(slots.insert(11).0, keys[1].0);
        assert_eq!(slots.insert(12).0, 4);
    }

    #[test]
    fn get_mut_checks_generation() {
        let mut slots: Slots<u32> = Slots::new();
        let (a, ga) = slots.insert(5);
        *slots.get_mut(a, ga).unwrap() += 1;
        assert_eq!(*slots.at(a), 6);
        assert!(slots.get_mut(a, ga.wrapping_add(1)).is_none());
        assert!(slots.get_mut(99, 0).is_none());
    }

    #[test]
    fn take_vacant_is_none() {
        let mut slots: Slots<u8> = Slots::new();
        let (a, _) = slots.insert(1);
        assert_eq!(slots.take(a), Some(1));
        assert_eq!(slots.take(a), None);
        assert_eq!(slots.take(7), None);
    }

    #[test]
    fn raw_gives_disjoint_access() {
        let mut slots: Slots<u32> = Slots::new();
        let (a, _) = slots.insert(1);
        let (b, _) = slots.insert(2);

        let mut raw = slots.raw();
        // Safety: a != b, both occupied
        let (x, y) = unsafe { (raw.at_mut(a), raw.at_mut(b)) };
        core::mem::swap(x, y);

        assert_eq!(*slots.at(a), 2);
        assert_eq!(*slots.at(b), 1);
    }
}
