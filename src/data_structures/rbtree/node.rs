use std::{fmt, marker::PhantomData, ptr::NonNull};

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node. Children are owned through `left`/`right`; `parent` is a
/// back-reference that is never used to free anything.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) size: usize,
    pub(crate) height: usize,
    pub(crate) color: Color,
    pub(crate) parent: Link<T>,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

/// Absent nodes count as black.
pub(crate) fn color_of<T>(link: Link<T>) -> Color {
    match link {
        Some(node) => unsafe { (*node.as_ptr()).color },
        None => Color::Black,
    }
}

pub(crate) fn size_of_link<T>(link: Link<T>) -> usize {
    link.map_or(0, |node| unsafe { (*node.as_ptr()).size })
}

/// `None` stands for the height of an absent child (-1).
fn height_of_link<T>(link: Link<T>) -> Option<usize> {
    link.map(|node| unsafe { (*node.as_ptr()).height })
}

impl<T> Node<T> {
    pub(crate) fn new(item: T, color: Color, parent: Link<T>) -> NonNull<Node<T>> {
        unsafe {
            NonNull::new_unchecked(Box::into_raw(Box::new(Node {
                item,
                size: 1,
                height: 0,
                color,
                parent,
                left: None,
                right: None,
            })))
        }
    }

    pub(crate) fn parent(node: NonNull<Node<T>>) -> Link<T> {
        unsafe { (*node.as_ptr()).parent }
    }

    pub(crate) fn child(node: NonNull<Node<T>>, side: Side) -> Link<T> {
        unsafe {
            match side {
                Side::Left => (*node.as_ptr()).left,
                Side::Right => (*node.as_ptr()).right,
            }
        }
    }

    pub(crate) fn set_child(node: NonNull<Node<T>>, side: Side, child: Link<T>) {
        unsafe {
            match side {
                Side::Left => (*node.as_ptr()).left = child,
                Side::Right => (*node.as_ptr()).right = child,
            }
        }
    }

    pub(crate) fn set_color(node: NonNull<Node<T>>, color: Color) {
        unsafe { (*node.as_ptr()).color = color }
    }

    /// Which side of `parent` holds `node`.
    pub(crate) fn side_in(node: NonNull<Node<T>>, parent: NonNull<Node<T>>) -> Side {
        if Self::child(parent, Side::Left) == Some(node) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub(crate) fn fix_size(node: NonNull<Node<T>>) {
        unsafe {
            let node = node.as_ptr();
            (*node).size = 1 + size_of_link((*node).left) + size_of_link((*node).right);
        }
    }

    pub(crate) fn fix_height(node: NonNull<Node<T>>) {
        unsafe {
            let node = node.as_ptr();
            let tallest = height_of_link((*node).left).max(height_of_link((*node).right));
            (*node).height = tallest.map_or(0, |height| height + 1);
        }
    }

    pub(crate) fn fix(node: NonNull<Node<T>>) {
        Self::fix_size(node);
        Self::fix_height(node);
    }

    /// Recomputes size and height on `from` and every ancestor above it.
    pub(crate) fn refresh_upward(from: Link<T>) {
        let mut cursor = from;
        while let Some(node) = cursor {
            Self::fix(node);
            cursor = Self::parent(node);
        }
    }

    /// Puts `replacement` where `old` hangs from its parent (or at the root).
    /// `old`'s own links are left untouched.
    pub(crate) fn replace(old: NonNull<Node<T>>, replacement: Link<T>, root: &mut Link<T>) {
        let parent = Self::parent(old);
        match parent {
            Some(parent) => Self::set_child(parent, Self::side_in(old, parent), replacement),
            None => *root = replacement,
        }
        if let Some(replacement) = replacement {
            unsafe { (*replacement.as_ptr()).parent = parent }
        }
    }

    /// Walks to the last node reached by repeatedly following `side`.
    pub(crate) fn extreme(node: NonNull<Node<T>>, side: Side) -> NonNull<Node<T>> {
        let mut node = node;
        while let Some(next) = Self::child(node, side) {
            node = next;
        }
        node
    }

    /// The in-order neighbour of `node` in direction `side` (`Right` for the
    /// successor, `Left` for the predecessor).
    pub(crate) fn neighbour(node: NonNull<Node<T>>, side: Side) -> Link<T> {
        if let Some(child) = Self::child(node, side) {
            return Some(Self::extreme(child, side.opposite()));
        }
        let mut node = node;
        while let Some(parent) = Self::parent(node) {
            if Self::side_in(node, parent) != side {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    pub(crate) fn successor(node: NonNull<Node<T>>) -> Link<T> {
        Self::neighbour(node, Side::Right)
    }

    pub(crate) fn predecessor(node: NonNull<Node<T>>) -> Link<T> {
        Self::neighbour(node, Side::Left)
    }

    /// Frees `link` and everything below it, dropping the items.
    pub(crate) fn free_subtree(link: Link<T>) {
        let Some(node) = link else {
            return;
        };
        let Node { left, right, .. } = unsafe { *Box::from_raw(node.as_ptr()) };
        Self::free_subtree(left);
        Self::free_subtree(right);
    }

    pub(crate) fn print<W: fmt::Write>(
        node: NonNull<Node<T>>,
        out: &mut W,
        indent: &str,
        is_final: bool,
        append: &str,
    ) -> fmt::Result
    where
        T: fmt::Debug,
    {
        unsafe {
            let node = node.as_ptr();
            writeln!(out, "{indent}+- {:?} # {:?} - {append}", (*node).item, (*node).color)?;
            let new_indent = format!("{indent}{}", if is_final { "   " } else { "|  " });
            if let Some(left) = (*node).left {
                Self::print(left, out, &new_indent, (*node).right.is_none(), "L")?;
            }
            if let Some(right) = (*node).right {
                Self::print(right, out, &new_indent, true, "R")?;
            }
        }
        Ok(())
    }
}

/// A read-only handle to a node, valid for as long as the tree it came from
/// is borrowed.
pub struct NodeRef<'a, T> {
    node: NonNull<Node<T>>,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> NodeRef<'a, T> {
    /// `node` must belong to a tree that stays borrowed for `'a`.
    pub(crate) fn new(node: NonNull<Node<T>>) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    pub(crate) fn wrap(link: Link<T>) -> Option<Self> {
        link.map(Self::new)
    }

    pub fn item(&self) -> &'a T {
        unsafe { &(*self.node.as_ptr()).item }
    }

    /// Number of nodes in the subtree rooted here, this one included.
    pub fn size(&self) -> usize {
        unsafe { (*self.node.as_ptr()).size }
    }

    /// Edges on the longest downward path to a leaf; a leaf has height 0.
    pub fn height(&self) -> usize {
        unsafe { (*self.node.as_ptr()).height }
    }

    pub fn color(&self) -> Color {
        unsafe { (*self.node.as_ptr()).color }
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(Node::parent(self.node))
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(Node::child(self.node, Side::Left))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(Node::child(self.node, Side::Right))
    }

    /// The node holding the next larger item, if any.
    pub fn successor(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(Node::successor(self.node))
    }

    /// The node holding the next smaller item, if any.
    pub fn predecessor(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(Node::predecessor(self.node))
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &NodeRef<'_, T>) -> bool {
        self.node == other.node
    }

    #[cfg(test)]
    pub(crate) fn as_ptr(&self) -> NonNull<Node<T>> {
        self.node
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("item", self.item())
            .field("color", &self.color())
            .field("size", &self.size())
            .field("height", &self.height())
            .finish()
    }
}
