//! Unbalanced binary search tree with arena node storage.
//!
//! Nodes live in a [`Storage`] owned by the tree and refer to their children
//! by key. Every algorithm walks the tree with a loop or an explicit stack,
//! never with call recursion, so degenerate shapes (keys inserted in sorted
//! order produce a height-`n` chain) cannot exhaust the call stack. Teardown
//! and deep copy operate on the flat arena and never walk the tree at all.
//!
//! # Ordering Invariant
//!
//! For every node, all keys in its left subtree compare `Less` and all keys
//! in its right subtree compare `Greater`. Equal keys are never stored twice:
//! inserting a present key is a no-op.
//!
//! # Example
//!
//! ```
//! use dsa_collections::BinarySearchTree;
//!
//! let mut tree = BinarySearchTree::new();
//! for key in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert_key(key);
//! }
//!
//! assert!(tree.contains(&40));
//! assert!(tree.remove(&30).is_some());
//! assert!(!tree.contains(&30));
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![20, 40, 50, 60, 70, 80]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::{Key, Storage};

/// Type alias for tree storage backed by `slab::Slab`.
pub type SlabTreeStorage<K, V> = slab::Slab<TreeNode<K, V, usize>>;

/// A tree node: key, value, and the keys of both children.
#[derive(Debug, Clone)]
pub struct TreeNode<K, V, Ix: Key = usize> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Ix,
    pub(crate) right: Ix,
}

impl<K, V, Ix: Key> TreeNode<K, V, Ix> {
    #[inline]
    fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: Ix::NONE,
            right: Ix::NONE,
        }
    }
}

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// An unbalanced binary search tree mapping keys to values.
///
/// Use `V = ()` (the default) for a plain ordered set.
///
/// # Type Parameters
///
/// - `K`: Key type, ordered by [`Ord`]
/// - `V`: Value type (default `()`)
/// - `S`: Storage type (default [`SlabTreeStorage<K, V>`])
/// - `Ix`: Node index type (default `usize`)
pub struct BinarySearchTree<K, V = (), S = SlabTreeStorage<K, V>, Ix: Key = usize>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    storage: S,
    root: Ix,
    len: usize,
    _marker: PhantomData<(K, V)>,
}

impl<K, V> BinarySearchTree<K, V> {
    /// Creates an empty tree backed by a slab.
    #[inline]
    pub fn new() -> Self {
        Self::with_storage(slab::Slab::new())
    }

    /// Creates an empty tree with room for `capacity` nodes before the
    /// arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(slab::Slab::with_capacity(capacity))
    }
}

impl<K, V, S, Ix: Key> Default for BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix> + Default,
{
    fn default() -> Self {
        Self::with_storage(S::default())
    }
}

// =============================================================================
// Shape-independent operations (no ordering required)
// =============================================================================

impl<K, V, S, Ix: Key> BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    /// Creates an empty tree over the given storage.
    ///
    /// Any values already in `storage` are dropped.
    pub fn with_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            root: Ix::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of keys in the tree.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every node.
    ///
    /// Releases the arena in one flat pass; the tree is not walked.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.root = Ix::NONE;
        self.len = 0;
    }

    /// Returns the entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.extreme(Side::Left)
    }

    /// Returns the entry with the largest key.
    pub fn max(&self) -> Option<(&K, &V)> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<(&K, &V)> {
        if self.root.is_none() {
            return None;
        }

        // Safety: every key reached from root is valid (tree invariant)
        let mut node = unsafe { self.storage.get_unchecked(self.root) };
        loop {
            let next = match side {
                Side::Left => node.left,
                Side::Right => node.right,
            };
            if next.is_none() {
                return Some((&node.key, &node.value));
            }
            node = unsafe { self.storage.get_unchecked(next) };
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0, a single node height 1.
    pub fn height(&self) -> usize {
        if self.root.is_none() {
            return 0;
        }

        let mut height = 0;
        let mut stack = vec![(self.root, 1usize)];
        while let Some((ix, depth)) = stack.pop() {
            height = height.max(depth);
            // Safety: ix was reached from root
            let node = unsafe { self.storage.get_unchecked(ix) };
            if node.left.is_some() {
                stack.push((node.left, depth + 1));
            }
            if node.right.is_some() {
                stack.push((node.right, depth + 1));
            }
        }
        height
    }

    /// Returns an in-order (ascending key) iterator over the entries.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V, S, Ix> {
        Iter::new(&self.storage, self.root, self.len)
    }

    /// Returns an in-order iterator over the keys.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V, S, Ix> {
        Keys { inner: self.iter() }
    }

    /// Writes the keys in ascending order, separated by single spaces.
    pub fn write_in_order<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Display,
    {
        for (i, key) in self.keys().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            write!(out, "{key}")?;
        }
        Ok(())
    }

    /// Points `parent`'s `side` link (or the root, if `parent` is `NONE`)
    /// at `child`.
    #[inline]
    fn set_link(&mut self, parent: Ix, side: Side, child: Ix) {
        if parent.is_none() {
            self.root = child;
            return;
        }

        // Safety: callers pass a parent reached from root
        let node = unsafe { self.storage.get_unchecked_mut(parent) };
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }
}

// =============================================================================
// Ordered operations
// =============================================================================

impl<K: Ord, V, S, Ix: Key> BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    /// Inserts `key` with `value`.
    ///
    /// Returns `false` and leaves the tree untouched (the existing value is
    /// kept, `value` is dropped) if `key` is already present.
    ///
    /// O(h) where h is the current height.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut parent = Ix::NONE;
        let mut side = Side::Left;
        let mut cur = self.root;

        while cur.is_some() {
            // Safety: cur was reached from root
            let node = unsafe { self.storage.get_unchecked(cur) };
            parent = cur;
            match key.cmp(&node.key) {
                Ordering::Less => {
                    side = Side::Left;
                    cur = node.left;
                }
                Ordering::Greater => {
                    side = Side::Right;
                    cur = node.right;
                }
                Ordering::Equal => return false,
            }
        }

        let ix = self.storage.insert(TreeNode::leaf(key, value));
        self.set_link(parent, side, ix);
        self.len += 1;
        true
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let ix = self.find(key);
        if ix.is_none() {
            return None;
        }
        // Safety: find returns NONE or a valid key
        Some(unsafe { &self.storage.get_unchecked(ix).value })
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let ix = self.find(key);
        if ix.is_none() {
            return None;
        }
        // Safety: find returns NONE or a valid key
        Some(unsafe { &mut self.storage.get_unchecked_mut(ix).value })
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// - leaf: the node is detached
    /// - one child: the child takes the node's place under its parent
    /// - two children: the in-order successor (leftmost node of the right
    ///   subtree) moves its key and value into the node, and the
    ///   successor's own slot is spliced out; it has no left child, so that
    ///   splice is one of the cases above
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = Ix::NONE;
        let mut side = Side::Left;
        let mut cur = self.root;

        while cur.is_some() {
            // Safety: cur was reached from root
            let node = unsafe { self.storage.get_unchecked(cur) };
            match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    parent = cur;
                    side = Side::Left;
                    cur = node.left;
                }
                Ordering::Greater => {
                    parent = cur;
                    side = Side::Right;
                    cur = node.right;
                }
                Ordering::Equal => break,
            }
        }

        if cur.is_none() {
            return None;
        }

        // Safety: cur is the matched node
        let (left, right) = {
            let node = unsafe { self.storage.get_unchecked(cur) };
            (node.left, node.right)
        };
        self.len -= 1;

        if left.is_some() && right.is_some() {
            let mut succ_parent = cur;
            let mut succ = right;
            loop {
                // Safety: succ was reached from cur's right subtree
                let next = unsafe { self.storage.get_unchecked(succ) }.left;
                if next.is_none() {
                    break;
                }
                succ_parent = succ;
                succ = next;
            }

            // Safety: succ is a valid node with no left child
            let succ_node = unsafe { self.storage.remove_unchecked(succ) };
            let succ_side = if succ_parent == cur {
                Side::Right
            } else {
                Side::Left
            };
            self.set_link(succ_parent, succ_side, succ_node.right);

            // Safety: cur is still linked and valid
            let target = unsafe { self.storage.get_unchecked_mut(cur) };
            target.key = succ_node.key;
            return Some(std::mem::replace(&mut target.value, succ_node.value));
        }

        let child = if left.is_some() { left } else { right };
        self.set_link(parent, side, child);
        // Safety: cur is valid and now unlinked
        let node = unsafe { self.storage.remove_unchecked(cur) };
        Some(node.value)
    }

    /// Returns the node holding `key`, or `NONE`.
    fn find<Q>(&self, key: &Q) -> Ix
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root;
        while cur.is_some() {
            // Safety: cur was reached from root
            let node = unsafe { self.storage.get_unchecked(cur) };
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cur = node.left,
                Ordering::Greater => cur = node.right,
                Ordering::Equal => return cur,
            }
        }
        Ix::NONE
    }
}

impl<K: Ord, S, Ix: Key> BinarySearchTree<K, (), S, Ix>
where
    S: Storage<TreeNode<K, (), Ix>, Key = Ix>,
{
    /// Inserts a key into a set-shaped tree.
    ///
    /// Returns `false` if the key was already present.
    #[inline]
    pub fn insert_key(&mut self, key: K) -> bool {
        self.insert(key, ())
    }
}

impl<K: Clone, V: Clone, S, Ix: Key> Clone for BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix> + Clone,
{
    /// Deep copy of the arena; node links carry over unchanged.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            root: self.root,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S, Ix: Key> fmt::Debug for BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, S, Ix: Key> PartialEq for BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    /// Trees are equal when they hold the same entries, whatever their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V, S, Ix: Key> Extend<(K, V)> for BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, S, Ix: Key> FromIterator<(K, V)> for BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// In-order iterator over `(&K, &V)`.
///
/// Holds an explicit stack of pending ancestors, at most `height` deep.
pub struct Iter<'a, K, V, S, Ix: Key> {
    storage: &'a S,
    stack: Vec<Ix>,
    remaining: usize,
    _marker: PhantomData<(K, V)>,
}

impl<'a, K: 'a, V: 'a, S, Ix: Key + 'a> Iter<'a, K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    fn new(storage: &'a S, root: Ix, len: usize) -> Self {
        let mut iter = Self {
            storage,
            stack: Vec::new(),
            remaining: len,
            _marker: PhantomData,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut ix: Ix) {
        let storage = self.storage;
        while ix.is_some() {
            self.stack.push(ix);
            // Safety: ix was reached from root
            ix = unsafe { storage.get_unchecked(ix) }.left;
        }
    }
}

impl<'a, K: 'a, V: 'a, S, Ix: Key + 'a> Iterator for Iter<'a, K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let ix = self.stack.pop()?;
        let storage = self.storage;
        // Safety: only keys reached from root are pushed
        let node = unsafe { storage.get_unchecked(ix) };
        self.push_left_spine(node.right);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a, S, Ix: Key + 'a> ExactSizeIterator for Iter<'a, K, V, S, Ix> where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>
{
}

/// In-order iterator over keys.
pub struct Keys<'a, K, V, S, Ix: Key> {
    inner: Iter<'a, K, V, S, Ix>,
}

impl<'a, K: 'a, V: 'a, S, Ix: Key + 'a> Iterator for Keys<'a, K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, S, Ix: Key> IntoIterator for &'a BinarySearchTree<K, V, S, Ix>
where
    S: Storage<TreeNode<K, V, Ix>, Key = Ix>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
