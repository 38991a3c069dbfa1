//! A BST with lazy (soft) deletion. Removing a value only marks its node with
//! a tombstone; the node keeps its place in the tree until it is physically
//! removed by [`remove_hard`][Tree::remove_hard] or by a
//! [`collect_garbage`][Tree::collect_garbage] pass.
//!
//! Structural changes are written as functions from a subtree to the new
//! subtree which the caller links back in place of the old one. No node knows
//! its parent.
//!
//! The tree doesn't rebalance. Insertion, lookup, both removals, garbage
//! collection, cloning, `height`, and the `Debug` output recurse once per
//! level, so a tree built from sorted input (height `O(N)`) can exhaust the
//! call stack when it is very large. Iteration, traversal, `clear`, and
//! dropping use an explicit stack instead.
//!
//! # Examples
//!
//! ```
//! use lazy_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//! assert!(tree.insert(1));
//! assert!(tree.insert(2));
//!
//! // Soft deletion hides the value but keeps the node.
//! assert_eq!(tree.remove(&1), Ok(true));
//! assert_eq!(tree.find(&1), Err(Error::NotFound));
//! assert_eq!((tree.size(), tree.size_hard()), (1, 2));
//!
//! // Inserting it again revives the same node.
//! assert!(tree.insert(1));
//! assert_eq!((tree.size(), tree.size_hard()), (2, 2));
//!
//! // Hard deletion unlinks it.
//! assert!(tree.remove_hard(&1));
//! assert_eq!((tree.size(), tree.size_hard()), (1, 1));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::Error;
use crate::iter::Iter;
use crate::traverser::Traverser;
use crate::util::{Insertion, Removal, Visibility};

/// A Binary Search Tree with soft and hard deletion.
///
/// `size` counts live values and `size_hard` counts physical nodes, live or
/// tombstoned, so `size() <= size_hard()` always holds.
pub struct Tree<E> {
    root: Subtree<E>,
    size: usize,
    size_hard: usize,
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for Tree<E> {
    fn drop(&mut self) {
        self.root.take().dismantle();
    }
}

impl<E> Clone for Tree<E>
where
    E: Clone,
{
    /// Deep-copies every physical node, tombstones included. The copy shares nothing with `self`.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
            size_hard: self.size_hard,
        }
    }
}

impl<E> fmt::Debug for Tree<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("size_hard", &self.size_hard)
            .field("root", &self.root)
            .finish()
    }
}

impl<E> FromIterator<E> for Tree<E>
where
    E: Ord,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<E> Extend<E> for Tree<E>
where
    E: Ord,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for x in iter {
            self.insert(x);
        }
    }
}

impl<'a, E> IntoIterator for &'a Tree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> Tree<E> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Subtree::Leaf,
            size: 0,
            size_hard: 0,
        }
    }

    /// Returns `true` if the tree has no live values. It may still hold tombstoned nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of live (not soft-deleted) values.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of physical nodes, including soft-deleted ones.
    pub fn size_hard(&self) -> usize {
        self.size_hard
    }

    /// The height of the physical tree: `-1` when there are no nodes, `0` for a single node.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([2, 1, 3]);
    /// assert_eq!(tree.height(), 1);
    ///
    /// // Tombstones still take up room.
    /// tree.remove(&1).unwrap();
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        self.root.height()
    }

    /// Drops every node and resets both counts to zero.
    pub fn clear(&mut self) {
        self.root.take().dismantle();
        self.size = 0;
        self.size_hard = 0;
    }

    /// Returns the smallest live value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when there are no live values, even if tombstoned nodes remain.
    pub fn find_min(&self) -> Result<&E, Error> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        self.root.find_min().ok_or(Error::EmptyCollection)
    }

    /// Returns the largest live value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when there are no live values, even if tombstoned nodes remain.
    pub fn find_max(&self) -> Result<&E, Error> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        self.root.find_max().ok_or(Error::EmptyCollection)
    }

    /// Returns the value of the leftmost physical node, tombstoned or not.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the tree has no nodes at all.
    pub fn find_min_hard(&self) -> Result<&E, Error> {
        self.root
            .leftmost()
            .map(|n| &n.value)
            .ok_or(Error::EmptyCollection)
    }

    /// Returns the value of the rightmost physical node, tombstoned or not.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the tree has no nodes at all.
    pub fn find_max_hard(&self) -> Result<&E, Error> {
        self.root
            .rightmost()
            .map(|n| &n.value)
            .ok_or(Error::EmptyCollection)
    }

    /// Visits every live value in ascending order.
    pub fn traverse_soft<T>(&self, visitor: &mut T)
    where
        T: Traverser<E> + ?Sized,
    {
        for x in self.iter() {
            visitor.visit(x);
        }
    }

    /// Visits every physical node's value in ascending order, tombstoned ones included.
    pub fn traverse_hard<T>(&self, visitor: &mut T)
    where
        T: Traverser<E> + ?Sized,
    {
        for x in self.iter_hard() {
            visitor.visit(x);
        }
    }

    /// An in-order iterator over the live values.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.root, Visibility::Soft, self.size)
    }

    /// An in-order iterator over the values of every physical node, tombstoned ones included.
    pub fn iter_hard(&self) -> Iter<'_, E> {
        Iter::new(&self.root, Visibility::Hard, self.size_hard)
    }

    /// Physically removes every soft-deleted node in a single pass and returns whether the tree
    /// is now free of tombstones (it always is once the pass finishes).
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=5).collect();
    /// tree.remove(&2).unwrap();
    /// tree.remove(&4).unwrap();
    /// assert_eq!(tree.size_hard(), 5);
    ///
    /// assert!(tree.collect_garbage());
    /// assert_eq!(tree.size_hard(), 3);
    /// assert_eq!(tree.iter_hard().copied().collect::<Vec<_>>(), [1, 3, 5]);
    /// ```
    pub fn collect_garbage(&mut self) -> bool {
        let (root, collected) = self.root.take().collect_garbage();
        self.root = root;
        self.size_hard -= collected;
        self.size == self.size_hard
    }
}

impl<E> Tree<E>
where
    E: Ord,
{
    /// Returns the live value equal to `x`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no node holds `x` or the node holding it is soft-deleted.
    pub fn find(&self, x: &E) -> Result<&E, Error> {
        match self.root.find(x) {
            Some(n) if !n.deleted => Ok(&n.value),
            _ => Err(Error::NotFound),
        }
    }

    /// Returns whether a live value equal to `x` is in the tree.
    pub fn contains(&self, x: &E) -> bool {
        self.find(x).is_ok()
    }

    /// Inserts `x` and returns whether the number of live values changed.
    ///
    /// A new node is only created when no node holds an equal value. If the node holding it is
    /// soft-deleted it is revived instead, and if it is live nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.insert("b"));
    /// assert!(!tree.insert("b"));
    ///
    /// tree.remove(&"b").unwrap();
    /// assert!(tree.insert("b"));
    /// assert_eq!(tree.size_hard(), 1);
    /// ```
    pub fn insert(&mut self, x: E) -> bool {
        let (root, insertion) = self.root.take().insert(x);
        self.root = root;
        match insertion {
            Insertion::Created => {
                self.size += 1;
                self.size_hard += 1;
                true
            }
            Insertion::Revived => {
                self.size += 1;
                true
            }
            Insertion::Present => false,
        }
    }

    /// Soft-deletes `x`: the node holding it is marked with a tombstone but stays in the tree.
    /// Returns whether the number of live values changed, which is `false` when `x` was already
    /// soft-deleted.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no node, live or tombstoned, holds `x`.
    pub fn remove(&mut self, x: &E) -> Result<bool, Error> {
        let node = self.root.find_mut(x).ok_or(Error::NotFound)?;
        if node.deleted {
            return Ok(false);
        }
        node.deleted = true;
        self.size -= 1;
        Ok(true)
    }

    /// Physically removes the node holding `x`, whether it is live or soft-deleted, and returns
    /// whether a node was removed. Removing a value that isn't in the tree does nothing.
    ///
    /// A node with two children takes over the payload and tombstone of its successor (the
    /// leftmost node of its right subtree), which is unlinked instead.
    pub fn remove_hard(&mut self, x: &E) -> bool {
        let (root, removal) = self.root.take().remove_hard(x);
        self.root = root;
        match removal {
            Some(removal) => {
                self.size_hard -= 1;
                if removal == Removal::Live {
                    self.size -= 1;
                }
                true
            }
            None => false,
        }
    }
}

/// An owned link to a possibly empty subtree.
pub(crate) enum Subtree<E> {
    /// A marker for the empty link at the bottom of the tree.
    Leaf,
    Node(Box<Node<E>>),
}

pub(crate) struct Node<E> {
    pub(crate) value: E,
    pub(crate) left: Subtree<E>,
    pub(crate) right: Subtree<E>,
    /// The tombstone. Set by soft deletion.
    pub(crate) deleted: bool,
}

impl<E> Default for Subtree<E> {
    fn default() -> Self {
        Self::Leaf
    }
}

impl<E> Clone for Subtree<E>
where
    E: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(n) => Self::Node(Box::new(Node {
                value: n.value.clone(),
                left: n.left.clone(),
                right: n.right.clone(),
                deleted: n.deleted,
            })),
        }
    }
}

impl<E> fmt::Debug for Subtree<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("Leaf"),
            Self::Node(n) => f
                .debug_struct("Node")
                .field("value", &n.value)
                .field("deleted", &n.deleted)
                .field("left", &n.left)
                .field("right", &n.right)
                .finish(),
        }
    }
}

impl<E> Subtree<E> {
    fn take(&mut self) -> Self {
        mem::take(self)
    }

    pub(crate) fn node(&self) -> Option<&Node<E>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(&**n),
        }
    }

    /// Drops every node below this link without recursing.
    fn dismantle(self) {
        let mut stack = vec![self];
        while let Some(subtree) = stack.pop() {
            if let Self::Node(mut n) = subtree {
                stack.push(n.left.take());
                stack.push(n.right.take());
            }
        }
    }

    fn height(&self) -> isize {
        match self {
            Self::Leaf => -1,
            Self::Node(n) => n.left.height().max(n.right.height()) + 1,
        }
    }

    /// The smallest live value. A tombstoned node defers to its right subtree and then to its
    /// ancestors, so this finds a value whenever one is live.
    fn find_min(&self) -> Option<&E> {
        let n = self.node()?;
        n.left
            .find_min()
            .or_else(|| n.live_value())
            .or_else(|| n.right.find_min())
    }

    fn find_max(&self) -> Option<&E> {
        let n = self.node()?;
        n.right
            .find_max()
            .or_else(|| n.live_value())
            .or_else(|| n.left.find_max())
    }

    fn leftmost(&self) -> Option<&Node<E>> {
        let mut n = self.node()?;
        while let Some(left) = n.left.node() {
            n = left;
        }
        Some(n)
    }

    fn rightmost(&self) -> Option<&Node<E>> {
        let mut n = self.node()?;
        while let Some(right) = n.right.node() {
            n = right;
        }
        Some(n)
    }

    /// Returns the physical node holding `x`, tombstoned or not.
    fn find(&self, x: &E) -> Option<&Node<E>>
    where
        E: Ord,
    {
        let n = self.node()?;
        match x.cmp(&n.value) {
            Ordering::Less => n.left.find(x),
            Ordering::Equal => Some(n),
            Ordering::Greater => n.right.find(x),
        }
    }

    fn find_mut(&mut self, x: &E) -> Option<&mut Node<E>>
    where
        E: Ord,
    {
        match self {
            Self::Leaf => None,
            Self::Node(n) => match x.cmp(&n.value) {
                Ordering::Less => n.left.find_mut(x),
                Ordering::Equal => Some(&mut **n),
                Ordering::Greater => n.right.find_mut(x),
            },
        }
    }

    fn insert(self, x: E) -> (Self, Insertion)
    where
        E: Ord,
    {
        let mut n = match self {
            Self::Leaf => return (Self::Node(Node::new_boxed(x)), Insertion::Created),
            Self::Node(n) => n,
        };
        let insertion = match x.cmp(&n.value) {
            Ordering::Less => {
                let (left, insertion) = n.left.take().insert(x);
                n.left = left;
                insertion
            }
            Ordering::Greater => {
                let (right, insertion) = n.right.take().insert(x);
                n.right = right;
                insertion
            }
            Ordering::Equal if n.deleted => {
                n.deleted = false;
                Insertion::Revived
            }
            Ordering::Equal => Insertion::Present,
        };
        (Self::Node(n), insertion)
    }

    /// Unlinks the node holding `x` and returns the new subtree along with the state of the
    /// removed entry, or `None` if `x` isn't in this subtree.
    fn remove_hard(self, x: &E) -> (Self, Option<Removal>)
    where
        E: Ord,
    {
        let mut n = match self {
            Self::Leaf => return (Self::Leaf, None),
            Self::Node(n) => n,
        };
        match x.cmp(&n.value) {
            Ordering::Less => {
                let (left, removal) = n.left.take().remove_hard(x);
                n.left = left;
                (Self::Node(n), removal)
            }
            Ordering::Greater => {
                let (right, removal) = n.right.take().remove_hard(x);
                n.right = right;
                (Self::Node(n), removal)
            }
            Ordering::Equal => {
                let removal = Removal::of(n.deleted);
                (n.splice_out(), Some(removal))
            }
        }
    }

    /// Hard-removes every tombstoned node below this link and returns the new subtree along with
    /// how many nodes were removed.
    fn collect_garbage(self) -> (Self, usize) {
        let mut n = match self {
            Self::Leaf => return (Self::Leaf, 0),
            Self::Node(n) => n,
        };
        // Children first so a splice below only ever pulls up a live successor.
        let (left, collected_left) = n.left.take().collect_garbage();
        let (right, collected_right) = n.right.take().collect_garbage();
        n.left = left;
        n.right = right;

        let collected = collected_left + collected_right;
        if n.deleted {
            (n.splice_out(), collected + 1)
        } else {
            (Self::Node(n), collected)
        }
    }
}

impl<E> Node<E> {
    fn new_boxed(value: E) -> Box<Self> {
        Box::new(Self {
            value,
            left: Subtree::Leaf,
            right: Subtree::Leaf,
            deleted: false,
        })
    }

    fn live_value(&self) -> Option<&E> {
        if self.deleted {
            None
        } else {
            Some(&self.value)
        }
    }

    /// Removes this node from its subtree and returns what should be linked in its place.
    ///
    /// With at most one child, that child replaces it. With two children, the successor is
    /// detached from the right subtree and its value and tombstone move into this node.
    fn splice_out(mut self: Box<Self>) -> Subtree<E> {
        match (self.left.take(), self.right.take()) {
            (Subtree::Leaf, child) | (child, Subtree::Leaf) => child,
            (left, Subtree::Node(right)) => {
                let (right, successor) = right.take_min();
                let Node { value, deleted, .. } = *successor;
                self.value = value;
                self.deleted = deleted;
                self.left = left;
                self.right = right;
                Subtree::Node(self)
            }
        }
    }

    /// Detaches the leftmost node of the subtree rooted here. Returns the remaining subtree and
    /// the detached node, whose right child has been relinked into the remainder.
    fn take_min(mut self: Box<Self>) -> (Subtree<E>, Box<Self>) {
        match self.left.take() {
            Subtree::Leaf => {
                let rest = self.right.take();
                (rest, self)
            }
            Subtree::Node(left) => {
                let (left, min) = left.take_min();
                self.left = left;
                (Subtree::Node(self), min)
            }
        }
    }
}
