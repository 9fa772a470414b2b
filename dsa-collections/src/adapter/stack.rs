//! Stack - a LIFO view over a linked list.

use crate::list::{Iter, SlabChainStorage};
use crate::{CollectionError, LinkedList};

/// A last-in, first-out stack.
///
/// Pushes and pops both happen at the front of the underlying chain.
///
/// # Example
///
/// ```
/// use dsa_collections::Stack;
///
/// let mut stack = Stack::new();
/// for i in 0..3 {
///     stack.push(i);
/// }
///
/// assert_eq!(stack.top(), Ok(&2));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<T> {
    list: LinkedList<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    /// Returns the number of elements on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Pushes a value on top of the stack.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.list.push_front(value);
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front()
    }

    /// Returns a reference to the top element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the stack is empty.
    #[inline]
    pub fn top(&self) -> Result<&T, CollectionError> {
        self.list.front()
    }

    /// Returns a mutable reference to the top element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the stack is empty.
    #[inline]
    pub fn top_mut(&mut self) -> Result<&mut T, CollectionError> {
        self.list.front_mut()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterates from the top of the stack to the bottom.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, SlabChainStorage<T>, usize> {
        self.list.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
