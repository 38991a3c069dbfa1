use std::iter::FusedIterator;

use crate::lazy::{Node, Subtree};
use crate::util::Visibility;

/// An in-order iterator over the values of a [`Tree`][crate::Tree].
///
/// Created by [`Tree::iter`][crate::Tree::iter] (live values only) and
/// [`Tree::iter_hard`][crate::Tree::iter_hard] (every physical node). The
/// pending nodes are kept on an explicit stack so a list-shaped tree doesn't
/// recurse.
pub struct Iter<'a, E> {
    /// Nodes whose value and right subtree haven't been visited yet. The top of the stack is the
    /// next candidate in order.
    stack: Vec<&'a Node<E>>,
    visibility: Visibility,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(root: &'a Subtree<E>, visibility: Visibility, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            visibility,
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut subtree: &'a Subtree<E>) {
        while let Some(node) = subtree.node() {
            self.stack.push(node);
            subtree = &node.left;
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.push_left_spine(&node.right);
            if self.visibility.shows(node.deleted) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            visibility: self.visibility,
            remaining: self.remaining,
        }
    }
}
