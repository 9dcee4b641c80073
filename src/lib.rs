pub mod data_structures;
pub mod error;

#[cfg(test)]
pub(crate) mod test_utils;

pub use data_structures::compare::{Comparator, FromSign, NaturalOrder, Reverse};
pub use data_structures::rbtree::{Color, NodeRef, RBTree};
pub use data_structures::rbtree::traverse;
pub use error::TreeError;
