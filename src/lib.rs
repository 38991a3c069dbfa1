//! A Binary Search Tree (BST) supporting two kinds of deletion side by side.
//!
//! ## Binary Search Tree
//!
//! A BST stores values in `Node`s. Every `Node` may have a left and a right
//! child, and the tree keeps this invariant over every `Node`:
//!
//! 1. All the values in the left subtree are less than the `Node`'s value.
//! 2. All the values in the right subtree are greater than the `Node`'s value.
//!
//! Searching for a value takes `O(height)`. This tree does **not** rebalance
//! itself, so inserting values in sorted order produces a tree whose height is
//! `O(N)`.
//!
//! ## Soft and hard deletion
//!
//! A *soft* (or lazy) deletion only marks the `Node` holding the value with a
//! tombstone. The `Node` keeps its place in the tree and keeps steering
//! searches, but it is invisible to [`find`][lazy::Tree::find],
//! [`find_min`][lazy::Tree::find_min], soft traversal, and so on. Inserting
//! the value again revives the `Node` instead of allocating a new one.
//!
//! A *hard* deletion physically unlinks the `Node` and repairs the tree.
//! [`collect_garbage`][lazy::Tree::collect_garbage] hard-deletes every
//! tombstoned `Node` in one pass.
//!
//! ```
//! use lazy_bst::Tree;
//!
//! let mut tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
//!
//! tree.remove(&3).unwrap();
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 4, 5, 8]);
//! assert_eq!((tree.size(), tree.size_hard()), (4, 5));
//!
//! assert!(tree.collect_garbage());
//! assert_eq!(tree.iter_hard().copied().collect::<Vec<_>>(), [1, 4, 5, 8]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod iter;
pub mod lazy;
pub mod traverser;
pub(crate) mod util;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}

pub use error::Error;
pub use iter::Iter;
pub use lazy::Tree;
pub use traverser::{Printer, Traverser};
