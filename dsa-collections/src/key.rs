//! Key trait for arena indices.
//!
//! Node-based structures in this crate ([`LinkedList`](crate::LinkedList),
//! [`BinarySearchTree`](crate::BinarySearchTree)) link their nodes by key
//! rather than by pointer. A reserved sentinel value stands in for the null
//! link, so a node's `next`/`left`/`right` fields stay a plain integer.

/// Trait for key/index types used to address nodes in [`Storage`](crate::Storage).
///
/// Provides a sentinel value (`NONE`) for the null link.
///
/// # Example
///
/// ```
/// use dsa_collections::Key;
///
/// // usize is a Key with NONE = usize::MAX
/// let key: usize = 42;
/// assert!(key.is_some());
/// assert!(usize::NONE.is_none());
/// ```
pub trait Key: Copy + Eq {
    /// Sentinel value representing the null link.
    ///
    /// For `usize` this is `MAX`, which no arena ever hands out.
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl Key for usize {
    const NONE: Self = usize::MAX;
}
