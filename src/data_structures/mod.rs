pub mod compare;
pub mod rbtree;
