//! A red-black tree over items ordered by an injected comparator.
//!
//! Every node records the size and height of its subtree, so order
//! statistics (`select`, `rank`) run in O(log n) alongside the usual lookups.
//! The tree is single-threaded: raw parent links make it neither `Send` nor
//! `Sync`, and sharing it across threads requires an outer lock.

mod insert;
mod node;
mod remove;
mod rotate;
pub mod traverse;

use std::{cmp::Ordering, fmt, marker::PhantomData};

use log::debug;

use crate::data_structures::compare::{Comparator, NaturalOrder};
use crate::error::TreeError;

use node::{size_of_link, Link, Node, Side};
use traverse::{Inorder, Postorder, Preorder};

pub use node::{Color, NodeRef};

pub struct RBTree<T, C = NaturalOrder> {
    root: Link<T>,
    comparator: C,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> RBTree<T, NaturalOrder> {
    /// An empty tree ordered by `T`'s `Ord` implementation.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T> Default for RBTree<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> RBTree<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            _marker: PhantomData,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(self.root)
    }

    pub fn len(&self) -> usize {
        size_of_link(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        Node::free_subtree(self.root.take());
    }

    /// The node holding the smallest item.
    pub fn first(&self) -> Result<NodeRef<'_, T>, TreeError> {
        self.extreme(Side::Left).map(NodeRef::new).ok_or(TreeError::EmptyContainer)
    }

    /// The node holding the largest item.
    pub fn last(&self) -> Result<NodeRef<'_, T>, TreeError> {
        self.extreme(Side::Right).map(NodeRef::new).ok_or(TreeError::EmptyContainer)
    }

    pub fn pop_first(&mut self) -> Result<T, TreeError> {
        let node = self.extreme(Side::Left).ok_or(TreeError::EmptyContainer)?;
        Ok(Node::unlink(node, &mut self.root))
    }

    pub fn pop_last(&mut self) -> Result<T, TreeError> {
        let node = self.extreme(Side::Right).ok_or(TreeError::EmptyContainer)?;
        Ok(Node::unlink(node, &mut self.root))
    }

    /// The node holding the item at zero-based position `index` in sorted
    /// order.
    pub fn select(&self, index: usize) -> Result<NodeRef<'_, T>, TreeError> {
        let mut index = index;
        let mut cursor = self.root;
        while let Some(node) = cursor {
            let left = Node::child(node, Side::Left);
            let left_size = size_of_link(left);
            match index.cmp(&left_size) {
                Ordering::Less => cursor = left,
                Ordering::Equal => return Ok(NodeRef::new(node)),
                Ordering::Greater => {
                    index -= left_size + 1;
                    cursor = Node::child(node, Side::Right);
                }
            }
        }
        Err(TreeError::IndexOutOfBounds)
    }

    /// In-order walk over the items.
    pub fn iter(&self) -> Inorder<'_, T> {
        Inorder::new(self.root())
    }

    pub fn preorder(&self) -> Preorder<'_, T> {
        Preorder::new(self.root())
    }

    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder::new(self.root())
    }

    /// Draws the tree sideways, one node per line with its color.
    pub fn render(&self) -> String
    where
        T: fmt::Debug,
    {
        self.to_string()
    }

    fn extreme(&self, side: Side) -> Link<T> {
        self.root.map(|root| Node::extreme(root, side))
    }
}

impl<T, C: Comparator<T>> RBTree<T, C> {
    fn find_node(&self, item: &T) -> Link<T> {
        let mut cursor = self.root;
        while let Some(node) = cursor {
            let ordering = unsafe { self.comparator.compare(item, &(*node.as_ptr()).item) };
            cursor = match ordering {
                Ordering::Equal => return Some(node),
                Ordering::Less => Node::child(node, Side::Left),
                Ordering::Greater => Node::child(node, Side::Right),
            };
        }
        None
    }

    /// The node whose item compares equal to `item`.
    pub fn find(&self, item: &T) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(self.find_node(item))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.find_node(item).is_some()
    }

    /// Number of items ordered before `item`, which must be present.
    pub fn rank(&self, item: &T) -> Result<usize, TreeError> {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(node) = cursor {
            let ordering = unsafe { self.comparator.compare(item, &(*node.as_ptr()).item) };
            let left = Node::child(node, Side::Left);
            match ordering {
                Ordering::Equal => return Ok(rank + size_of_link(left)),
                Ordering::Less => cursor = left,
                Ordering::Greater => {
                    rank += size_of_link(left) + 1;
                    cursor = Node::child(node, Side::Right);
                }
            }
        }
        Err(TreeError::ItemNotFound)
    }

    /// Inserts `item`. Fails without touching the tree if an equal item is
    /// already stored.
    pub fn add(&mut self, item: T) -> Result<(), TreeError> {
        let Some(mut cursor) = self.root else {
            self.root = Some(Node::new(item, Color::Black, None));
            return Ok(());
        };

        let side = loop {
            let ordering = unsafe { self.comparator.compare(&item, &(*cursor.as_ptr()).item) };
            let side = match ordering {
                Ordering::Equal => {
                    debug!("rejected duplicate item");
                    return Err(TreeError::ItemAlreadyPresent);
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match Node::child(cursor, side) {
                Some(next) => cursor = next,
                None => break side,
            }
        };

        let node = Node::new(item, Color::Red, Some(cursor));
        Node::set_child(cursor, side, Some(node));
        Node::refresh_upward(Some(cursor));
        Node::rebalance_after_insert(node, &mut self.root);
        Ok(())
    }

    /// Removes the item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Result<(), TreeError> {
        self.take(item).map(drop)
    }

    /// Removes the item equal to `item` and returns the stored one.
    pub fn take(&mut self, item: &T) -> Result<T, TreeError> {
        let Some(node) = self.find_node(item) else {
            debug!("nothing to remove");
            return Err(TreeError::ItemNotFound);
        };
        Ok(Node::unlink(node, &mut self.root))
    }
}

impl<T, C> Drop for RBTree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RBTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug, C> fmt::Display for RBTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => Node::print(root, f, "", true, ""),
            None => Ok(()),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RBTree<T, C> {
    type Item = &'a T;
    type IntoIter = Inorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
