use std::ptr::NonNull;

use log::trace;

use super::node::{color_of, Color, Link, Node, Side};

/// The situation around a black node whose subtree is one black short.
/// `side` is always the side of the deficient node under `parent`.
pub(crate) enum RemovalCase<T> {
    /// The deficit reached the root, where it costs nothing.
    Root,
    RedSibling {
        parent: NonNull<Node<T>>,
        sibling: NonNull<Node<T>>,
        side: Side,
    },
    /// Parent, sibling and both nephews are black.
    BlackFamily {
        parent: NonNull<Node<T>>,
        sibling: NonNull<Node<T>>,
    },
    /// Sibling and both nephews are black under a red parent.
    RedParent {
        parent: NonNull<Node<T>>,
        sibling: NonNull<Node<T>>,
    },
    /// Only the nephew closer to the deficient node is red.
    NearRedNephew {
        sibling: NonNull<Node<T>>,
        near: NonNull<Node<T>>,
        side: Side,
    },
    FarRedNephew {
        parent: NonNull<Node<T>>,
        sibling: NonNull<Node<T>>,
        far: NonNull<Node<T>>,
        side: Side,
    },
}

impl<T> RemovalCase<T> {
    fn label(&self) -> &'static str {
        match self {
            RemovalCase::Root => "root",
            RemovalCase::RedSibling { .. } => "red sibling",
            RemovalCase::BlackFamily { .. } => "black family",
            RemovalCase::RedParent { .. } => "red parent",
            RemovalCase::NearRedNephew { .. } => "near red nephew",
            RemovalCase::FarRedNephew { .. } => "far red nephew",
        }
    }
}

impl<T> Node<T> {
    pub(crate) fn removal_case(node: NonNull<Node<T>>) -> RemovalCase<T> {
        let Some(parent) = Self::parent(node) else {
            return RemovalCase::Root;
        };
        let side = Self::side_in(node, parent);
        let Some(sibling) = Self::child(parent, side.opposite()) else {
            unreachable!("a black non-root node always has a sibling");
        };

        if color_of(Some(sibling)) == Color::Red {
            return RemovalCase::RedSibling {
                parent,
                sibling,
                side,
            };
        }

        let near = Self::child(sibling, side);
        let far = Self::child(sibling, side.opposite());
        if let (Color::Red, Some(far)) = (color_of(far), far) {
            return RemovalCase::FarRedNephew {
                parent,
                sibling,
                far,
                side,
            };
        }
        if let (Color::Red, Some(near)) = (color_of(near), near) {
            return RemovalCase::NearRedNephew {
                sibling,
                near,
                side,
            };
        }

        match color_of(Some(parent)) {
            Color::Black => RemovalCase::BlackFamily { parent, sibling },
            Color::Red => RemovalCase::RedParent { parent, sibling },
        }
    }

    /// Pays back the black deficit `node` is about to leave behind. `node` is
    /// still linked into the tree and stays linked.
    pub(crate) fn rebalance_before_remove(node: NonNull<Node<T>>, root: &mut Link<T>) {
        let mut node = node;
        loop {
            let case = Self::removal_case(node);
            trace!("removal fixup: {}", case.label());
            match case {
                RemovalCase::Root => return,
                RemovalCase::RedSibling {
                    parent,
                    sibling,
                    side,
                } => {
                    Self::set_color(parent, Color::Red);
                    Self::set_color(sibling, Color::Black);
                    Self::restructure(parent, side, root);
                }
                RemovalCase::BlackFamily { parent, sibling } => {
                    Self::set_color(sibling, Color::Red);
                    node = parent;
                }
                RemovalCase::RedParent { parent, sibling } => {
                    Self::set_color(sibling, Color::Red);
                    Self::set_color(parent, Color::Black);
                    return;
                }
                RemovalCase::NearRedNephew {
                    sibling,
                    near,
                    side,
                } => {
                    Self::set_color(sibling, Color::Red);
                    Self::set_color(near, Color::Black);
                    Self::restructure(sibling, side.opposite(), root);
                }
                RemovalCase::FarRedNephew {
                    parent,
                    sibling,
                    far,
                    side,
                } => {
                    Self::set_color(sibling, color_of(Some(parent)));
                    Self::set_color(parent, Color::Black);
                    Self::set_color(far, Color::Black);
                    Self::restructure(parent, side, root);
                    return;
                }
            }
        }
    }

    /// Removes `node`'s item from the tree and returns it. A node with two
    /// children trades items with its successor, and the successor's node is
    /// the one freed.
    pub(crate) fn unlink(node: NonNull<Node<T>>, root: &mut Link<T>) -> T {
        let mut target = node;
        if let (Some(_), Some(right)) = (Self::child(node, Side::Left), Self::child(node, Side::Right)) {
            let heir = Self::extreme(right, Side::Left);
            unsafe { std::mem::swap(&mut (*node.as_ptr()).item, &mut (*heir.as_ptr()).item) }
            target = heir;
        }

        let child = Self::child(target, Side::Left).or(Self::child(target, Side::Right));
        match (color_of(Some(target)), child) {
            // a red node with at most one child is a leaf
            (Color::Red, _) => {}
            // a lone child under a black node is red
            (Color::Black, Some(child)) => Self::set_color(child, Color::Black),
            (Color::Black, None) => Self::rebalance_before_remove(target, root),
        }

        let parent = Self::parent(target);
        Self::replace(target, child, root);
        Self::refresh_upward(parent);

        let Node { item, .. } = unsafe { *Box::from_raw(target.as_ptr()) };
        item
    }
}

#[cfg(test)]
mod test {
    use crate::data_structures::rbtree::node::{Color, Node};
    use crate::data_structures::rbtree::{remove::RemovalCase, RBTree};
    use crate::error::TreeError;
    use crate::test_utils::{assert_invariants, init_logging, shape};

    fn tree_of(items: &[i32]) -> RBTree<i32> {
        let mut tree = RBTree::new();
        for &item in items {
            tree.add(item).unwrap();
        }
        tree
    }

    fn sizes(tree: &RBTree<i32>) -> Vec<(i32, usize)> {
        let mut sizes: Vec<_> = shape(tree).into_iter().map(|(item, _, size, _)| (item, size)).collect();
        sizes.sort();
        sizes
    }

    #[test]
    fn removing_the_only_item_empties_the_tree() {
        init_logging();
        let mut tree = tree_of(&[42]);
        tree.remove(&42).unwrap();

        assert!(tree.root().is_none());
        assert!(tree.is_empty());
        assert!(tree.find(&42).is_none());
        assert!(tree.find(&0).is_none());
    }

    #[test]
    fn removing_a_node_with_two_children_takes_the_successor_item() {
        init_logging();
        let mut tree = tree_of(&[5, 3, 7, 1, 4, 6, 9]);
        let position = tree.find(&7).unwrap().as_ptr();
        tree.remove(&7).unwrap();

        // the node that held 7 now holds 9; 9's leaf was freed
        let nine = tree.find(&9).unwrap();
        assert_eq!(nine.as_ptr(), position);
        assert!(nine.right().is_none());
        assert_eq!(*nine.left().unwrap().item(), 6);
        assert_eq!(
            sizes(&tree),
            vec![(1, 1), (3, 3), (4, 1), (5, 6), (6, 1), (9, 2)]
        );
        assert_invariants(&tree);
    }

    #[test]
    fn removing_a_black_node_blackens_its_red_child() {
        init_logging();
        let mut tree = tree_of(&[5, 3, 7, 1]);
        tree.remove(&3).unwrap();

        let root = tree.root().unwrap();
        let left = root.left().unwrap();
        assert_eq!((*left.item(), left.color()), (1, Color::Black));
        assert_eq!(left.parent().unwrap().item(), &5);
        assert_invariants(&tree);
    }

    #[test]
    fn removing_case_red_sibling_then_red_parent() {
        init_logging();
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        assert!(matches!(
            Node::removal_case(tree.find(&1).unwrap().as_ptr()),
            RemovalCase::RedSibling { .. }
        ));
        tree.remove(&1).unwrap();

        let root = tree.root().unwrap();
        assert_eq!((*root.item(), root.color()), (4, Color::Black));
        let left = root.left().unwrap();
        assert_eq!((*left.item(), left.color()), (2, Color::Black));
        let three = left.right().unwrap();
        assert_eq!((*three.item(), three.color()), (3, Color::Red));
        let right = root.right().unwrap();
        assert_eq!((*right.item(), right.color()), (5, Color::Black));
        assert_eq!(right.right().unwrap().color(), Color::Red);
        assert_invariants(&tree);
    }

    #[test]
    fn removing_case_black_family_climbs_to_root() {
        init_logging();
        let mut tree = tree_of(&[1, 2, 3, 4]);
        tree.remove(&4).unwrap();
        assert!(matches!(
            Node::removal_case(tree.find(&1).unwrap().as_ptr()),
            RemovalCase::BlackFamily { .. }
        ));
        tree.remove(&1).unwrap();

        let root = tree.root().unwrap();
        assert_eq!((*root.item(), root.color()), (2, Color::Black));
        assert!(root.left().is_none());
        let right = root.right().unwrap();
        assert_eq!((*right.item(), right.color()), (3, Color::Red));
        assert_invariants(&tree);
    }

    #[test]
    fn removing_case_red_parent_absorbs_the_deficit() {
        init_logging();
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        tree.remove(&6).unwrap();
        assert!(matches!(
            Node::removal_case(tree.find(&3).unwrap().as_ptr()),
            RemovalCase::RedParent { .. }
        ));
        tree.remove(&3).unwrap();

        let four = tree.find(&4).unwrap();
        assert_eq!(four.color(), Color::Black);
        assert!(four.left().is_none());
        let five = four.right().unwrap();
        assert_eq!((*five.item(), five.color()), (5, Color::Red));
        assert_eq!(*tree.root().unwrap().item(), 2);
        assert_invariants(&tree);
    }

    #[test]
    fn removing_case_near_red_nephew_then_far_red_nephew() {
        init_logging();
        let mut tree = tree_of(&[2, 1, 4, 3]);
        assert!(matches!(
            Node::removal_case(tree.find(&1).unwrap().as_ptr()),
            RemovalCase::NearRedNephew { .. }
        ));
        tree.remove(&1).unwrap();

        let root = tree.root().unwrap();
        assert_eq!((*root.item(), root.color()), (3, Color::Black));
        let left = root.left().unwrap();
        let right = root.right().unwrap();
        assert_eq!((*left.item(), left.color()), (2, Color::Black));
        assert_eq!((*right.item(), right.color()), (4, Color::Black));
        assert_invariants(&tree);
    }

    #[test]
    fn removing_case_far_red_nephew_on_left() {
        init_logging();
        let mut tree = tree_of(&[2, 1, 4, 5]);
        assert!(matches!(
            Node::removal_case(tree.find(&1).unwrap().as_ptr()),
            RemovalCase::FarRedNephew { .. }
        ));
        tree.remove(&1).unwrap();

        let root = tree.root().unwrap();
        assert_eq!((*root.item(), root.color()), (4, Color::Black));
        assert_eq!((*root.left().unwrap().item(), root.left().unwrap().color()), (2, Color::Black));
        assert_eq!((*root.right().unwrap().item(), root.right().unwrap().color()), (5, Color::Black));
        assert_invariants(&tree);
    }

    #[test]
    fn removing_case_far_red_nephew_on_right() {
        init_logging();
        let mut tree = tree_of(&[2, 1, 4, 0]);
        tree.remove(&4).unwrap();

        let root = tree.root().unwrap();
        assert_eq!((*root.item(), root.color()), (1, Color::Black));
        assert_eq!(*root.left().unwrap().item(), 0);
        assert_eq!(*root.right().unwrap().item(), 2);
        assert_eq!(root.size(), 3);
        assert_eq!(root.height(), 1);
        assert_invariants(&tree);
    }

    #[test]
    fn removing_a_missing_item_changes_nothing() {
        init_logging();
        let mut tree = tree_of(&[5, 3, 7, 1, 4, 6, 9]);
        let before = shape(&tree);
        assert_eq!(tree.remove(&8), Err(TreeError::ItemNotFound));
        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn take_hands_back_the_stored_item() {
        let mut tree = RBTree::with_comparator(|a: &(i32, String), b: &(i32, String)| a.0.cmp(&b.0));
        tree.add((1, "one".to_string())).unwrap();
        tree.add((2, "two".to_string())).unwrap();
        assert_eq!(tree.take(&(2, String::new())), Ok((2, "two".to_string())));
        assert_eq!(tree.len(), 1);
    }
}
