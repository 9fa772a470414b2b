//! Storage trait for slab-like arenas with stable keys.
//!
//! Storage provides insert/remove/get operations where keys remain valid
//! until explicitly removed. The node chain and the search tree keep their
//! nodes in a `Storage` and link them by key, so every node is owned by
//! exactly one arena and released when the arena is.

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Safety
///
/// [`LinkedList`](crate::LinkedList) and
/// [`BinarySearchTree`](crate::BinarySearchTree) access nodes through the
/// unchecked methods using only keys returned by [`insert`](Self::insert).
/// Implementations must therefore guarantee:
///
/// - **Stable keys**: a key returned by `insert` addresses the same value
///   until it is passed to `remove_unchecked` or the storage is cleared
/// - **Distinct keys**: `insert` never returns a key that is currently
///   occupied
/// - **Sentinel-free keys**: `insert` never returns [`Key::NONE`]
/// - **Growth**: insertion never fails; the arena grows on demand
///
/// # Implementations
///
/// - `slab::Slab<T>` - growable, heap allocated, slot reuse
pub unsafe trait Storage<T> {
    /// Key type handed out by this storage.
    type Key: Key;

    /// Inserts a value, returning its stable key.
    fn insert(&mut self, value: T) -> Self::Key;

    /// Returns a reference without bounds checking.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without bounds checking.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Removes an element without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T;

    /// Drops every stored value and makes all slots available for reuse.
    fn clear(&mut self);
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

// Safety: slab keys are vacant-list indices. They stay put until removed,
// are never shared by two occupied slots, and are bounded by the slab
// length, which never reaches usize::MAX.
unsafe impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn insert(&mut self, value: T) -> Self::Key {
        slab::Slab::insert(self, value)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T {
        slab::Slab::remove(self, key)
    }

    #[inline]
    fn clear(&mut self) {
        slab::Slab::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> slab::Slab<u64> {
        slab::Slab::with_capacity(16)
    }

    #[test]
    fn insert_get_remove() {
        let mut storage = storage();

        let key = Storage::insert(&mut storage, 42);
        assert_eq!(unsafe { *Storage::get_unchecked(&storage, key) }, 42);

        let removed = unsafe { Storage::remove_unchecked(&mut storage, key) };
        assert_eq!(removed, 42);
        assert!(storage.is_empty());
    }

    #[test]
    fn get_unchecked_mut() {
        let mut storage = storage();

        let key = Storage::insert(&mut storage, 10);
        unsafe { *Storage::get_unchecked_mut(&mut storage, key) = 20 };

        assert_eq!(storage.get(key), Some(&20));
    }

    #[test]
    fn slot_reuse() {
        let mut storage = storage();

        let k0 = Storage::insert(&mut storage, 0);
        let _k1 = Storage::insert(&mut storage, 1);

        unsafe { Storage::remove_unchecked(&mut storage, k0) };

        // Next insert reuses k0's slot
        let k2 = Storage::insert(&mut storage, 2);
        assert_eq!(k2, k0);
    }

    #[test]
    fn keys_are_distinct_and_never_sentinel() {
        let mut storage = storage();
        let mut keys = Vec::new();
        for i in 0..1000 {
            let key = Storage::insert(&mut storage, i);
            assert!(key.is_some());
            keys.push(key);
        }

        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn clear_drops_everything() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let mut storage: slab::Slab<Rc<()>> = slab::Slab::new();
        for _ in 0..3 {
            Storage::insert(&mut storage, Rc::clone(&marker));
        }
        assert_eq!(Rc::strong_count(&marker), 4);

        Storage::clear(&mut storage);
        assert!(storage.is_empty());
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
