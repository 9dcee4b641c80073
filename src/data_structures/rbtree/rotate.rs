use std::ptr::NonNull;

use crate::error::TreeError;

use super::node::{Link, Node, Side};

impl<T> Node<T> {
    /// Rotates the subtree at `pivot` toward `toward`: the child on the
    /// opposite side rises into `pivot`'s place and `pivot` becomes its child
    /// on `toward`. Returns the new subtree top.
    ///
    /// Only `pivot` and the risen node get their size/height recomputed.
    pub(crate) fn rotate(
        pivot: NonNull<Node<T>>,
        toward: Side,
        root: &mut Link<T>,
    ) -> Result<NonNull<Node<T>>, TreeError> {
        let riser = Self::child(pivot, toward.opposite()).ok_or(TreeError::RotationNotPossible)?;
        let inner = Self::child(riser, toward);

        Self::set_child(pivot, toward.opposite(), inner);
        if let Some(inner) = inner {
            unsafe { (*inner.as_ptr()).parent = Some(pivot) }
        }
        Self::replace(pivot, Some(riser), root);
        Self::set_child(riser, toward, Some(pivot));
        unsafe { (*pivot.as_ptr()).parent = Some(riser) }

        Self::fix(pivot);
        Self::fix(riser);
        Ok(riser)
    }

    pub(crate) fn rotate_left(pivot: NonNull<Node<T>>, root: &mut Link<T>) -> Result<NonNull<Node<T>>, TreeError> {
        Self::rotate(pivot, Side::Left, root)
    }

    pub(crate) fn rotate_right(pivot: NonNull<Node<T>>, root: &mut Link<T>) -> Result<NonNull<Node<T>>, TreeError> {
        Self::rotate(pivot, Side::Right, root)
    }

    /// Rotation used by the fixups, which only pivot on nodes known to have
    /// the rising child. Ancestors above the new top get their heights
    /// refreshed as well.
    pub(crate) fn restructure(pivot: NonNull<Node<T>>, toward: Side, root: &mut Link<T>) {
        let rotated = match toward {
            Side::Left => Self::rotate_left(pivot, root),
            Side::Right => Self::rotate_right(pivot, root),
        };
        match rotated {
            Ok(top) => Self::refresh_upward(Self::parent(top)),
            Err(err) => unreachable!("fixup rotated toward {toward:?} at a node lacking the rising child: {err}"),
        }
    }
}
