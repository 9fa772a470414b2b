//! Growable array over a single contiguous allocation.
//!
//! The buffer starts with room for four elements and doubles whenever an
//! append finds it full. Growth allocates the new block first, moves the
//! live elements across, and only then releases the old block, so a failed
//! allocation leaves the array untouched.
//!
//! # Example
//!
//! ```
//! use dsa_collections::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! assert_eq!(array.capacity(), 4);
//!
//! for i in 0..5 {
//!     array.push(i);
//! }
//! assert_eq!(array.len(), 5);
//! assert_eq!(array.capacity(), 8);
//! assert_eq!(array.at(2), Ok(&2));
//!
//! assert_eq!(array.pop(), Ok(4));
//! ```

use core::ptr::{self, NonNull};
use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::CollectionError;

/// Capacity of a freshly constructed array.
pub const INITIAL_CAPACITY: usize = 4;

/// A growable array with doubling capacity.
///
/// Invariant: `len <= capacity`. Slots `[0, len)` are initialized, slots
/// `[len, capacity)` are not. Capacity never shrinks.
pub struct DynamicArray<T> {
    /// Start of the block, dangling for zero-sized layouts.
    ptr: NonNull<T>,
    /// Number of live elements.
    len: usize,
    /// Number of allocated slots.
    capacity: usize,
    _marker: PhantomData<T>,
}

enum GrowError {
    Overflow,
    Alloc(Layout),
}

impl GrowError {
    fn into_error(self) -> CollectionError {
        match self {
            GrowError::Overflow => CollectionError::CapacityOverflow,
            GrowError::Alloc(_) => CollectionError::AllocationFailed,
        }
    }

    fn abort(self) -> ! {
        match self {
            GrowError::Overflow => panic!("capacity overflow"),
            GrowError::Alloc(layout) => handle_alloc_error(layout),
        }
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with capacity [`INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty array with room for at least `min_capacity` elements.
    ///
    /// Capacity is never below [`INITIAL_CAPACITY`].
    pub fn with_capacity(min_capacity: usize) -> Self {
        let capacity = min_capacity.max(INITIAL_CAPACITY);
        let ptr = allocate::<T>(capacity).unwrap_or_else(|err| err.abort());

        Self {
            ptr,
            len: 0,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a value, doubling capacity if the array is full.
    ///
    /// Amortized O(1); O(n) on the call that grows.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow and aborts via [`handle_alloc_error`] if
    /// the allocator fails. Use [`try_push`](Self::try_push) to handle
    /// either case.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity {
            if let Err(err) = self.grow() {
                err.abort();
            }
        }

        // Safety: len < capacity after growth
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Appends a value, reporting growth failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::AllocationFailed`] or
    /// [`CollectionError::CapacityOverflow`] if the array was full and could
    /// not grow. The array is unchanged in that case and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), CollectionError> {
        if self.len == self.capacity {
            self.grow().map_err(GrowError::into_error)?;
        }

        // Safety: len < capacity after growth
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the array is empty.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        if self.len == 0 {
            return Err(CollectionError::Empty);
        }

        self.len -= 1;
        // Safety: slot `len` was initialized and is now outside the live range
        Ok(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, CollectionError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })
    }

    /// Returns the last element, if any.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
        // Reset first so a panicking destructor cannot cause a double drop
        self.len = 0;
        // Safety: the slice covered exactly the initialized slots
        unsafe { ptr::drop_in_place(live) };
    }

    /// Views the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: [0, len) is initialized; ptr is aligned and non-null
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Views the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: [0, len) is initialized; &mut self guarantees unique access
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns an iterator over the elements in index order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references in index order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Doubles capacity, moving the live elements into a new block.
    ///
    /// On error nothing has been touched.
    fn grow(&mut self) -> Result<(), GrowError> {
        let new_capacity = self.capacity.checked_mul(2).ok_or(GrowError::Overflow)?;
        let new_ptr = allocate::<T>(new_capacity)?;

        // Safety: both blocks hold at least `len` slots and do not overlap.
        // The old slots become logically uninitialized; only the block is freed.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
            deallocate(self.ptr, self.capacity);
        }

        trace!(
            old_capacity = self.capacity,
            new_capacity,
            len = self.len,
            "array grown"
        );

        self.ptr = new_ptr;
        self.capacity = new_capacity;
        Ok(())
    }
}

fn allocate<T>(capacity: usize) -> Result<NonNull<T>, GrowError> {
    let layout = Layout::array::<T>(capacity).map_err(|_| GrowError::Overflow)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }

    // Safety: layout has non-zero size
    let ptr = unsafe { alloc(layout) } as *mut T;
    NonNull::new(ptr).ok_or(GrowError::Alloc(layout))
}

/// # Safety
///
/// `ptr` must come from `allocate::<T>(capacity)` and not be freed yet.
unsafe fn deallocate<T>(ptr: NonNull<T>, capacity: usize) {
    if let Ok(layout) = Layout::array::<T>(capacity) {
        if layout.size() != 0 {
            unsafe { dealloc(ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
        // Safety: ptr/capacity describe the live block
        unsafe { deallocate(self.ptr, self.capacity) };
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Deep copy with the same capacity.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.capacity);
        for value in self.iter() {
            out.push(value.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Safety: DynamicArray owns its elements, same rules as Vec<T>
unsafe impl<T: Send> Send for DynamicArray<T> {}
unsafe impl<T: Sync> Sync for DynamicArray<T> {}
