use std::ptr::NonNull;

use log::trace;

use super::node::{color_of, Color, Link, Node, Side};

/// Where a freshly attached (or freshly reddened) node stands relative to
/// its parent and uncle.
pub(crate) enum InsertCase<T> {
    /// The node is the root.
    Root,
    BlackParent,
    /// Parent and uncle are both red.
    RedUncle {
        parent: NonNull<Node<T>>,
        uncle: NonNull<Node<T>>,
        grandparent: NonNull<Node<T>>,
    },
    /// The node hangs on the opposite side of its parent than the parent
    /// hangs from the grandparent. `side` is the parent's side.
    InnerGrandchild { parent: NonNull<Node<T>>, side: Side },
    /// The node, its parent and grandparent lie on a straight line.
    OuterGrandchild {
        parent: NonNull<Node<T>>,
        grandparent: NonNull<Node<T>>,
        side: Side,
    },
}

impl<T> InsertCase<T> {
    fn label(&self) -> &'static str {
        match self {
            InsertCase::Root => "root",
            InsertCase::BlackParent => "black parent",
            InsertCase::RedUncle { .. } => "red uncle",
            InsertCase::InnerGrandchild { .. } => "inner grandchild",
            InsertCase::OuterGrandchild { .. } => "outer grandchild",
        }
    }
}

impl<T> Node<T> {
    pub(crate) fn insert_case(node: NonNull<Node<T>>) -> InsertCase<T> {
        let Some(parent) = Self::parent(node) else {
            return InsertCase::Root;
        };
        if color_of(Some(parent)) == Color::Black {
            return InsertCase::BlackParent;
        }
        let Some(grandparent) = Self::parent(parent) else {
            unreachable!("a red node is never the root at fixup time");
        };

        let side = Self::side_in(parent, grandparent);
        let uncle = Self::child(grandparent, side.opposite());
        if let (Color::Red, Some(uncle)) = (color_of(uncle), uncle) {
            return InsertCase::RedUncle {
                parent,
                uncle,
                grandparent,
            };
        }

        if Self::side_in(node, parent) != side {
            InsertCase::InnerGrandchild { parent, side }
        } else {
            InsertCase::OuterGrandchild {
                parent,
                grandparent,
                side,
            }
        }
    }

    /// Restores the coloring rules after `node` was attached as a red leaf.
    /// Sizes and heights on the path to the root must already be exact.
    pub(crate) fn rebalance_after_insert(node: NonNull<Node<T>>, root: &mut Link<T>) {
        let mut node = node;
        loop {
            let case = Self::insert_case(node);
            trace!("insert fixup: {}", case.label());
            match case {
                InsertCase::Root => {
                    Self::set_color(node, Color::Black);
                    return;
                }
                InsertCase::BlackParent => return,
                InsertCase::RedUncle {
                    parent,
                    uncle,
                    grandparent,
                } => {
                    Self::set_color(parent, Color::Black);
                    Self::set_color(uncle, Color::Black);
                    Self::set_color(grandparent, Color::Red);
                    node = grandparent;
                }
                InsertCase::InnerGrandchild { parent, side } => {
                    // node takes parent's place; the old parent is now the
                    // outer grandchild
                    Self::restructure(parent, side, root);
                    node = parent;
                }
                InsertCase::OuterGrandchild {
                    parent,
                    grandparent,
                    side,
                } => {
                    Self::set_color(grandparent, Color::Red);
                    Self::set_color(parent, Color::Black);
                    Self::restructure(grandparent, side.opposite(), root);
                    return;
                }
            }
        }
    }
}
