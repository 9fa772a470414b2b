//! Queue - a FIFO view over a linked list.

use crate::list::{Iter, SlabChainStorage};
use crate::{CollectionError, LinkedList};

/// A first-in, first-out queue.
///
/// Enqueues go to the back of the underlying chain, dequeues come off the
/// front.
///
/// # Example
///
/// ```
/// use dsa_collections::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue("a");
/// queue.enqueue("b");
///
/// assert_eq!(queue.front(), Ok(&"a"));
/// assert_eq!(queue.dequeue(), Ok("a"));
/// assert_eq!(queue.dequeue(), Ok("b"));
/// assert!(queue.dequeue().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    /// Returns the number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Appends a value at the back of the queue.
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the queue is empty.
    #[inline]
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front()
    }

    /// Returns a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the queue is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, CollectionError> {
        self.list.front()
    }

    /// Returns a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the queue is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, CollectionError> {
        self.list.front_mut()
    }

    /// Returns a reference to the most recently enqueued element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the queue is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, CollectionError> {
        self.list.back()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterates from the front of the queue to the back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, SlabChainStorage<T>, usize> {
        self.list.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}
