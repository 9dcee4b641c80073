use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("item not found")]
    ItemNotFound,
    #[error("item already present")]
    ItemAlreadyPresent,
    #[error("container is empty")]
    EmptyContainer,
    #[error("index out of bounds")]
    IndexOutOfBounds,
    /// The pivot of a rotation lacks the child that would rise into its place.
    #[error("rotation not possible: pivot has no child on the rising side")]
    RotationNotPossible,
}
