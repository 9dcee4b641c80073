//! Helpers shared by the unit tests.

use std::cmp::Ordering;
use std::fmt::Debug;

use simplelog::{Config, LevelFilter, TestLogger};

use crate::data_structures::compare::Comparator;
use crate::data_structures::rbtree::{Color, NodeRef, RBTree};

/// Routes `log` output through the test harness. Safe to call from every test.
pub(crate) fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Preorder list of `(item, color, size, height)`, enough to tell two shapes
/// apart.
pub(crate) fn shape<T: Clone, C>(tree: &RBTree<T, C>) -> Vec<(T, Color, usize, usize)> {
    fn walk<T: Clone>(node: Option<NodeRef<'_, T>>, out: &mut Vec<(T, Color, usize, usize)>) {
        if let Some(node) = node {
            out.push((node.item().clone(), node.color(), node.size(), node.height()));
            walk(node.left(), out);
            walk(node.right(), out);
        }
    }

    let mut out = Vec::new();
    walk(tree.root(), &mut out);
    out
}

/// Panics unless the tree is ordered, properly colored, and every node's
/// size, height and parent link are exact.
pub(crate) fn assert_invariants<T: Debug, C: Comparator<T>>(tree: &RBTree<T, C>) {
    let drawing = tree.render();
    let Some(root) = tree.root() else {
        assert_eq!(tree.len(), 0);
        return;
    };
    assert!(root.parent().is_none(), "root has a parent\n{drawing}");
    assert_eq!(root.color(), Color::Black, "root is red\n{drawing}");

    let items: Vec<&T> = tree.iter().collect();
    assert_eq!(items.len(), tree.len(), "walk and size disagree\n{drawing}");
    for pair in items.windows(2) {
        assert_eq!(
            tree.comparator().compare(pair[0], pair[1]),
            Ordering::Less,
            "{:?} is not before {:?}\n{drawing}",
            pair[0],
            pair[1]
        );
    }

    check_subtree(root, &drawing);
}

/// Returns the black-height of `node`, the node itself excluded.
fn check_subtree<T: Debug>(node: NodeRef<'_, T>, drawing: &str) -> usize {
    let mut black_heights = [0; 2];
    let mut size = 1;
    let mut height = None;

    for (slot, child) in [node.left(), node.right()].into_iter().enumerate() {
        let Some(child) = child else {
            continue;
        };
        assert!(
            child.parent().is_some_and(|parent| parent.ptr_eq(&node)),
            "{:?} has a stale parent link\n{drawing}",
            child.item()
        );
        if node.color() == Color::Red {
            assert_eq!(
                child.color(),
                Color::Black,
                "red {:?} has a red child\n{drawing}",
                node.item()
            );
        }
        let below = check_subtree(child, drawing);
        black_heights[slot] = below + usize::from(child.color() == Color::Black);
        size += child.size();
        height = height.max(Some(child.height()));
    }

    assert_eq!(
        black_heights[0], black_heights[1],
        "black-heights differ under {:?}\n{drawing}",
        node.item()
    );
    assert_eq!(node.size(), size, "wrong size at {:?}\n{drawing}", node.item());
    assert_eq!(
        node.height(),
        height.map_or(0, |height| height + 1),
        "wrong height at {:?}\n{drawing}",
        node.item()
    );
    black_heights[0]
}
