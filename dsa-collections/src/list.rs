//! Singly-linked list with arena node storage.
//!
//! Nodes live in a [`Storage`] owned by the list and are linked by key. The
//! list tracks `head`, `tail`, and length; `tail` is an alias of the last
//! node reachable from `head`, which makes `push_back` O(1).
//!
//! # Invariants
//!
//! - `len == 0` iff `head` and `tail` are both `NONE`
//! - following `next` from `head` reaches `tail` in `len - 1` steps, and
//!   `tail.next` is `NONE`
//!
//! # Example
//!
//! ```
//! use dsa_collections::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.push_back(2);
//! list.push_back(3);
//! list.push_front(1);
//!
//! let values: Vec<_> = list.iter().copied().collect();
//! assert_eq!(values, vec![1, 2, 3]);
//!
//! assert_eq!(list.pop_front(), Ok(1));
//! assert_eq!(list.front(), Ok(&2));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::{CollectionError, Key, Storage};

/// Type alias for list storage backed by `slab::Slab`.
pub type SlabChainStorage<T> = slab::Slab<ChainNode<T, usize>>;

/// A node in the chain: the element plus the key of its successor.
#[derive(Debug, Clone)]
pub struct ChainNode<T, K: Key = usize> {
    pub(crate) data: T,
    pub(crate) next: K,
}

/// A singly-linked list that owns its node storage.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Storage type (default [`SlabChainStorage<T>`])
/// - `K`: Key type (default `usize`)
pub struct LinkedList<T, S = SlabChainStorage<T>, K: Key = usize>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    storage: S,
    head: K,
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> LinkedList<T> {
    /// Creates an empty list backed by a slab.
    #[inline]
    pub fn new() -> Self {
        Self::with_storage(slab::Slab::new())
    }

    /// Creates an empty list with room for `capacity` nodes before the
    /// arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(slab::Slab::with_capacity(capacity))
    }
}

impl<T, S, K: Key> Default for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::with_storage(S::default())
    }
}

impl<T, S, K: Key> LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    /// Creates an empty list over the given storage.
    ///
    /// Any values already in `storage` are dropped.
    pub fn with_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // Insert operations
    // ========================================================================

    /// Pushes a value to the front of the list. O(1).
    #[inline]
    pub fn push_front(&mut self, value: T) {
        let key = self.storage.insert(ChainNode {
            data: value,
            next: self.head,
        });

        self.head = key;
        if self.tail.is_none() {
            self.tail = key;
        }
        self.len += 1;
    }

    /// Pushes a value to the back of the list. O(1) through the tail alias.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        let key = self.storage.insert(ChainNode {
            data: value,
            next: K::NONE,
        });

        if self.tail.is_some() {
            // Safety: tail is valid when is_some()
            unsafe { self.storage.get_unchecked_mut(self.tail) }.next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    // ========================================================================
    // Remove operations
    // ========================================================================

    /// Removes and returns the front element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        if self.head.is_none() {
            return Err(CollectionError::Empty);
        }

        // Safety: head is valid when is_some()
        let node = unsafe { self.storage.remove_unchecked(self.head) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = K::NONE;
        }
        self.len -= 1;

        Ok(node.data)
    }

    /// Removes and returns the back element.
    ///
    /// O(n): the chain has no back links, so the new tail is found by
    /// walking from the head.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list is empty.
    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        if self.tail.is_none() {
            return Err(CollectionError::Empty);
        }
        if self.head == self.tail {
            return self.pop_front();
        }

        let mut prev = self.head;
        loop {
            // Safety: every key reached from head is valid (list invariant)
            let next = unsafe { self.storage.get_unchecked(prev) }.next;
            if next == self.tail {
                break;
            }
            prev = next;
        }

        // Safety: tail is valid when is_some(); prev was reached from head
        let node = unsafe { self.storage.remove_unchecked(self.tail) };
        unsafe { self.storage.get_unchecked_mut(prev) }.next = K::NONE;
        self.tail = prev;
        self.len -= 1;

        Ok(node.data)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, CollectionError> {
        if self.head.is_none() {
            return Err(CollectionError::Empty);
        }
        // Safety: head is valid when is_some()
        Ok(unsafe { &self.storage.get_unchecked(self.head).data })
    }

    /// Returns a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, CollectionError> {
        if self.head.is_none() {
            return Err(CollectionError::Empty);
        }
        // Safety: head is valid when is_some()
        Ok(unsafe { &mut self.storage.get_unchecked_mut(self.head).data })
    }

    /// Returns a reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, CollectionError> {
        if self.tail.is_none() {
            return Err(CollectionError::Empty);
        }
        // Safety: tail is valid when is_some()
        Ok(unsafe { &self.storage.get_unchecked(self.tail).data })
    }

    /// Returns a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, CollectionError> {
        if self.tail.is_none() {
            return Err(CollectionError::Empty);
        }
        // Safety: tail is valid when is_some()
        Ok(unsafe { &mut self.storage.get_unchecked_mut(self.tail).data })
    }

    /// Returns `true` if any element equals `value`. O(n).
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Returns a front-to-back iterator.
    ///
    /// The iterator is lazy and finite; calling `iter` again restarts from
    /// the head.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        Iter {
            storage: &self.storage,
            current: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T: Clone, S, K: Key> Clone for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K> + Clone,
{
    /// Deep copy: every node is cloned into a new arena, links included.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S, K: Key> fmt::Debug for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, S, K: Key> PartialEq for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S, K: Key> Eq for LinkedList<T, S, K> where S: Storage<ChainNode<T, K>, Key = K> {}

impl<T, S, K: Key> Extend<T> for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, S, K: Key> FromIterator<T> for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements, front to back.
pub struct Iter<'a, T, S, K: Key> {
    storage: &'a S,
    current: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, K: Key + 'a> Iterator for Iter<'a, T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }

        // Safety: list invariants guarantee current is valid
        let node = unsafe { self.storage.get_unchecked(self.current) };
        self.current = node.next;
        self.remaining -= 1;

        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key + 'a> ExactSizeIterator for Iter<'a, T, S, K> where
    S: Storage<ChainNode<T, K>, Key = K>
{
}

impl<'a, T, S, K: Key> IntoIterator for &'a LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator that pops elements from the front.
pub struct IntoIter<T, S, K: Key>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    list: LinkedList<T, S, K>,
}

impl<T, S, K: Key> Iterator for IntoIter<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, S, K: Key> IntoIterator for LinkedList<T, S, K>
where
    S: Storage<ChainNode<T, K>, Key = K>,
{
    type Item = T;
    type IntoIter = IntoIter<T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
