//! Ordered walks over a tree or any of its subtrees.
//!
//! The iterators hold a single node handle plus the subtree top and follow
//! parent links, so each walk costs O(1) extra memory. A walk never leaves
//! the subtree it was started on. Every call builds a fresh walk; none can be
//! resumed after the tree is mutated, which the borrow on the tree enforces.

use std::iter::FusedIterator;

use super::node::NodeRef;

fn is_left_of<T>(node: NodeRef<'_, T>, parent: NodeRef<'_, T>) -> bool {
    parent.left().is_some_and(|left| left.ptr_eq(&node))
}

fn leftmost<T>(node: NodeRef<'_, T>) -> NodeRef<'_, T> {
    let mut node = node;
    while let Some(left) = node.left() {
        node = left;
    }
    node
}

/// First node of a postorder walk: keep descending, preferring the left.
fn deepest_first<T>(node: NodeRef<'_, T>) -> NodeRef<'_, T> {
    let mut node = node;
    while let Some(child) = node.left().or(node.right()) {
        node = child;
    }
    node
}

pub struct Preorder<'a, T> {
    next: Option<NodeRef<'a, T>>,
    top: Option<NodeRef<'a, T>>,
    remaining: usize,
}

impl<'a, T> Preorder<'a, T> {
    pub fn new(node: Option<NodeRef<'a, T>>) -> Self {
        Self {
            next: node,
            top: node,
            remaining: node.map_or(0, |node| node.size()),
        }
    }

    fn after(&self, node: NodeRef<'a, T>) -> Option<NodeRef<'a, T>> {
        if let Some(child) = node.left().or(node.right()) {
            return Some(child);
        }
        let top = self.top?;
        let mut node = node;
        while !node.ptr_eq(&top) {
            let parent = node.parent()?;
            if is_left_of(node, parent) {
                if let Some(right) = parent.right() {
                    return Some(right);
                }
            }
            node = parent;
        }
        None
    }
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.after(current);
        self.remaining -= 1;
        Some(current.item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub struct Inorder<'a, T> {
    next: Option<NodeRef<'a, T>>,
    top: Option<NodeRef<'a, T>>,
    remaining: usize,
}

impl<'a, T> Inorder<'a, T> {
    pub fn new(node: Option<NodeRef<'a, T>>) -> Self {
        Self {
            next: node.map(leftmost),
            top: node,
            remaining: node.map_or(0, |node| node.size()),
        }
    }

    fn after(&self, node: NodeRef<'a, T>) -> Option<NodeRef<'a, T>> {
        if let Some(right) = node.right() {
            return Some(leftmost(right));
        }
        let top = self.top?;
        let mut node = node;
        while !node.ptr_eq(&top) {
            let parent = node.parent()?;
            if is_left_of(node, parent) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }
}

impl<'a, T> Iterator for Inorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.after(current);
        self.remaining -= 1;
        Some(current.item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub struct Postorder<'a, T> {
    next: Option<NodeRef<'a, T>>,
    top: Option<NodeRef<'a, T>>,
    remaining: usize,
}

impl<'a, T> Postorder<'a, T> {
    pub fn new(node: Option<NodeRef<'a, T>>) -> Self {
        Self {
            next: node.map(deepest_first),
            top: node,
            remaining: node.map_or(0, |node| node.size()),
        }
    }

    fn after(&self, node: NodeRef<'a, T>) -> Option<NodeRef<'a, T>> {
        if node.ptr_eq(&self.top?) {
            return None;
        }
        let parent = node.parent()?;
        match parent.right() {
            Some(right) if is_left_of(node, parent) => Some(deepest_first(right)),
            _ => Some(parent),
        }
    }
}

impl<'a, T> Iterator for Postorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.after(current);
        self.remaining -= 1;
        Some(current.item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Preorder<'_, T> {}
impl<T> ExactSizeIterator for Inorder<'_, T> {}
impl<T> ExactSizeIterator for Postorder<'_, T> {}
impl<T> FusedIterator for Preorder<'_, T> {}
impl<T> FusedIterator for Inorder<'_, T> {}
impl<T> FusedIterator for Postorder<'_, T> {}

pub fn apply_preorder<'a, T>(node: Option<NodeRef<'a, T>>, visit: impl FnMut(&'a T)) {
    Preorder::new(node).for_each(visit)
}

pub fn apply_inorder<'a, T>(node: Option<NodeRef<'a, T>>, visit: impl FnMut(&'a T)) {
    Inorder::new(node).for_each(visit)
}

/// Visits both subtrees before the node itself.
pub fn apply_postorder<'a, T>(node: Option<NodeRef<'a, T>>, visit: impl FnMut(&'a T)) {
    Postorder::new(node).for_each(visit)
}

pub fn fold_preorder<'a, T, A>(node: Option<NodeRef<'a, T>>, init: A, f: impl FnMut(A, &'a T) -> A) -> A {
    Preorder::new(node).fold(init, f)
}

pub fn fold_inorder<'a, T, A>(node: Option<NodeRef<'a, T>>, init: A, f: impl FnMut(A, &'a T) -> A) -> A {
    Inorder::new(node).fold(init, f)
}

/// Folds left subtree, right subtree, then the node.
pub fn fold_postorder<'a, T, A>(node: Option<NodeRef<'a, T>>, init: A, f: impl FnMut(A, &'a T) -> A) -> A {
    Postorder::new(node).fold(init, f)
}
