use core::fmt;

use crate::Error;
use crate::raw::{Handle, RawBst, TreeId};

/// A detached position in a [`Bst`](crate::Bst), or its past-the-end sentinel.
///
/// A `Position` does not borrow the tree, so it can be handed back to mutating operations such
/// as [`Bst::erase`](crate::Bst::erase). Operations validate it first: a position that belongs
/// to another tree, or whose element has since been removed, is rejected with
/// [`Error::InvalidIterator`].
///
/// Two positions are equal when both are past-the-end (whichever tree produced them), or when
/// both refer to the same element of the same tree.
///
/// # Examples
///
/// ```
/// use linked_bst::Bst;
///
/// let a = Bst::from([1, 2]);
/// let b: Bst<i32> = Bst::new();
///
/// assert_eq!(a.find(&2), a.find(&2));
/// assert_ne!(a.find(&1), a.find(&2));
/// assert_eq!(a.end(), b.end());
/// assert_eq!(b.begin(), b.end());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Position {
    tree: TreeId,
    node: Option<Handle>,
}

impl Position {
    pub(crate) const fn new(tree: TreeId, node: Option<Handle>) -> Self {
        Self { tree, node }
    }

    pub(crate) const fn tree(self) -> TreeId {
        self.tree
    }

    pub(crate) const fn node(self) -> Option<Handle> {
        self.node
    }

    /// Returns true for the past-the-end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && self.tree == other.tree,
            _ => false,
        }
    }
}

impl Eq for Position {}

/// A read-only cursor over a [`Bst`](crate::Bst).
///
/// The cursor walks the tree through parent links only, without any auxiliary stack. The
/// past-the-end position sits between the last and the first element: stepping forward from
/// the last element reaches it, stepping forward from it wraps to the first element, and
/// stepping backward from it reaches the last element.
///
/// Elements are only ever handed out by shared reference; changing a value in place could
/// break the tree's ordering.
///
/// # Examples
///
/// ```
/// use linked_bst::Bst;
///
/// let tree = Bst::from([20, 10, 30]);
/// let mut cursor = tree.cursor_front();
/// assert_eq!(cursor.get(), Some(&10));
///
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&30));
///
/// cursor.move_next();
/// assert!(cursor.is_end());
///
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&30));
/// ```
pub struct Cursor<'a, T> {
    tree: &'a RawBst<T>,
    node: Option<Handle>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a RawBst<T>, node: Option<Handle>) -> Self {
        Self { tree, node }
    }

    /// Returns the element under the cursor, or `None` at past-the-end.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.node.map(|handle| self.tree.value(handle))
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] at past-the-end.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Bst, Error};
    ///
    /// let tree = Bst::from([1]);
    /// let mut cursor = tree.cursor_front();
    /// assert_eq!(cursor.value(), Ok(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.value(), Err(Error::OutOfRange));
    /// ```
    pub fn value(&self) -> Result<&'a T, Error> {
        self.get().ok_or(Error::OutOfRange)
    }

    /// Returns true at the past-the-end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Detaches the current position from the borrow.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.tree.id(), self.node)
    }

    /// Moves to the in-order successor.
    pub fn move_next(&mut self) {
        self.node = match self.node {
            Some(handle) => self.tree.next(handle),
            None => self.tree.first(),
        };
    }

    /// Moves to the in-order predecessor.
    pub fn move_prev(&mut self) {
        self.node = match self.node {
            Some(handle) => self.tree.prev(handle),
            None => self.tree.last(),
        };
    }

    /// Returns the element [`move_next`](Self::move_next) would reach.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = *self;
        next.move_next();
        next.get()
    }

    /// Returns the element [`move_prev`](Self::move_prev) would reach.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut prev = *self;
        prev.move_prev();
        prev.get()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}
