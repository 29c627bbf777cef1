use thiserror::Error;

/// Contract violations reported by position-based operations.
///
/// # Examples
///
/// ```
/// use linked_bst::{Bst, Error};
///
/// let tree = Bst::from([1, 2, 3]);
/// assert_eq!(tree.get(tree.end()), Err(Error::OutOfRange));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
    /// The position is past-the-end and has no element.
    #[error("position is past the end and has no element")]
    OutOfRange,
    /// The position belongs to another tree, or its element has been removed.
    #[error("position does not refer to a live element of this tree")]
    InvalidIterator,
}
