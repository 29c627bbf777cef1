use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::vec;

use crate::Error;
use crate::raw::{Handle, InsertResult, RawBst, RawIter};

mod capacity;
mod cursor;

pub use cursor::{Cursor, Position};

/// An ordered multiset based on an unbalanced, parent-linked binary search tree.
///
/// `Bst` is the tree the [`BstSet`](crate::BstSet) and [`BstMap`](crate::BstMap) adaptors are
/// built on. It permits duplicates unless an insertion asks for uniqueness; equal values are
/// kept in insertion order, because ties always descend to the right.
///
/// Every node stores its parent, so positions can step forwards and backwards without any
/// auxiliary stack. Positions are detached [`Position`] tokens, which can be turned into a
/// borrowing [`Cursor`] or handed back to [`erase`](Bst::erase).
///
/// The tree never rebalances. Inserting already sorted data produces a chain as deep as the
/// tree is long; every operation still works (nothing recurses) but degrades to linear time.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative to
/// any other value changes while it is in the tree. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use linked_bst::Bst;
///
/// let mut tree = Bst::new();
/// for value in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(value, true);
/// }
///
/// // Duplicates are only rejected when asked to.
/// assert_eq!(tree.insert(7, true).1, false);
/// assert_eq!(tree.insert(7, false).1, true);
/// assert_eq!(tree.len(), 8);
///
/// // Erase by position, then by value.
/// let five = tree.find(&5);
/// let next = tree.erase(five).unwrap();
/// assert_eq!(tree.get(next), Ok(&7));
/// assert_eq!(tree.erase_value(&7), 2);
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 8, 9]);
/// ```
pub struct Bst<T> {
    raw: RawBst<T>,
}

/// An iterator over the values of a `Bst`, in order.
///
/// This `struct` is created by the [`iter`] method on [`Bst`].
///
/// [`iter`]: Bst::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: RawIter<'a, T>,
}

/// An owning iterator over the values of a `Bst`, in order.
///
/// This `struct` is created by the [`into_iter`] method on [`Bst`] (provided by the
/// [`IntoIterator`] trait).
///
/// [`into_iter`]: Bst#method.into_iter
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> Bst<T> {
    /// Makes a new, empty `Bst`. Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree: Bst<i32> = Bst::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Bst { raw: RawBst::new() }
    }

    /// Returns the number of values in the tree, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the tree contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the position of the smallest value, or past-the-end for an empty tree.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position(self.raw.first())
    }

    /// Returns the past-the-end position.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn end(&self) -> Position {
        self.position(None)
    }

    /// Returns the smallest value.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.value(handle))
    }

    /// Returns the largest value.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.value(handle))
    }

    /// Returns the value at `position`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for past-the-end, [`Error::InvalidIterator`] if the position does
    /// not refer to a live value of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Bst, Error};
    ///
    /// let mut tree = Bst::from([1, 2]);
    /// let one = tree.find(&1);
    /// assert_eq!(tree.get(one), Ok(&1));
    ///
    /// tree.erase(one).unwrap();
    /// assert_eq!(tree.get(one), Err(Error::InvalidIterator));
    /// ```
    pub fn get(&self, position: Position) -> Result<&T, Error> {
        let handle = self.resolve(position)?.ok_or(Error::OutOfRange)?;
        Ok(self.raw.value(handle))
    }

    /// Returns a cursor at `position`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the position does not belong to this tree or its value has
    /// been removed.
    pub fn cursor(&self, position: Position) -> Result<Cursor<'_, T>, Error> {
        let handle = self.resolve(position)?;
        Ok(Cursor::new(&self.raw, handle))
    }

    /// Returns a cursor at the smallest value (past-the-end if empty).
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns a cursor at the largest value (past-the-end if empty).
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.last())
    }

    /// Removes the value at `position` and returns the position of its in-order successor.
    ///
    /// Erasing past-the-end does nothing and returns past-the-end. All other positions stay
    /// valid.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the position does not belong to this tree or its value has
    /// already been removed. The tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Bst, Error};
    ///
    /// let mut tree = Bst::from([1, 2, 3]);
    /// let two = tree.find(&2);
    ///
    /// let next = tree.erase(two).unwrap();
    /// assert_eq!(tree.get(next), Ok(&3));
    /// assert_eq!(tree.erase(two), Err(Error::InvalidIterator));
    /// assert_eq!(tree.erase(tree.end()), Ok(tree.end()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn erase(&mut self, position: Position) -> Result<Position, Error> {
        match self.resolve(position)? {
            Some(handle) => {
                let (_, successor) = self.raw.remove(handle);
                Ok(self.position(successor))
            }
            None => Ok(self.end()),
        }
    }

    /// Removes the value at `position` and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for past-the-end, [`Error::InvalidIterator`] as for
    /// [`erase`](Self::erase).
    pub fn remove(&mut self, position: Position) -> Result<T, Error> {
        let handle = self.resolve(position)?.ok_or(Error::OutOfRange)?;
        Ok(self.raw.remove(handle).0)
    }

    /// Removes every value in the half-open range `[first, last)` and returns `last`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if either position is invalid for this tree or `last` cannot
    /// be reached from `first` by stepping forward. Nothing is removed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Bst, Error};
    ///
    /// let mut tree = Bst::from([1, 2, 3, 4, 5]);
    /// let (two, four) = (tree.find(&2), tree.find(&4));
    ///
    /// assert_eq!(tree.erase_range(four, two), Err(Error::InvalidIterator));
    /// assert_eq!(tree.erase_range(two, four), Ok(four));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 4, 5]);
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position, Error> {
        let start = self.resolve(first)?;
        let stop = self.resolve(last)?;

        let mut probe = start;
        while probe != stop {
            probe = match probe {
                Some(handle) => self.raw.next(handle),
                None => return Err(Error::InvalidIterator),
            };
        }

        let mut current = start;
        while let Some(handle) = current {
            if current == stop {
                break;
            }
            current = self.raw.remove(handle).1;
        }
        Ok(last)
    }

    /// Removes and returns the smallest value.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.raw.first()?;
        Some(self.raw.remove(first).0)
    }

    /// Removes and returns the largest value.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.raw.last()?;
        Some(self.raw.remove(last).0)
    }

    /// Retains only the values specified by the predicate, visiting them in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::from([1, 2, 2, 3, 4]);
    /// tree.retain(|&v| v % 2 == 0);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [2, 2, 4]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.raw.retain(|value| f(&*value));
    }

    /// Clears the tree, removing all values. The node storage is kept for reuse.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents of two trees without visiting or reallocating any node.
    ///
    /// Positions follow their values: a position obtained from `self` before the swap is valid
    /// for `other` afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut a = Bst::from([1, 2]);
    /// let mut b = Bst::from([3]);
    /// let one = a.find(&1);
    ///
    /// a.swap(&mut b);
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [3]);
    /// assert_eq!(b.get(one), Ok(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    /// Gets an iterator that visits the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.raw.iter() }
    }

    pub(crate) fn raw(&self) -> &RawBst<T> {
        &self.raw
    }

    pub(crate) fn raw_mut(&mut self) -> &mut RawBst<T> {
        &mut self.raw
    }

    pub(crate) fn position(&self, node: Option<Handle>) -> Position {
        Position::new(self.raw.id(), node)
    }

    /// Maps a position to a live handle of this tree. Past-the-end of any tree maps to `None`.
    fn resolve(&self, position: Position) -> Result<Option<Handle>, Error> {
        match position.node() {
            None => Ok(None),
            Some(handle) if position.tree() == self.raw.id() && self.raw.contains(handle) => Ok(Some(handle)),
            Some(_) => Err(Error::InvalidIterator),
        }
    }
}

impl<T: Ord> Bst<T> {
    /// Inserts `value` and returns its position and whether it was inserted.
    ///
    /// With `keep_unique`, a value equal to one already present is not inserted; the position
    /// of the existing value is returned together with `false`. Otherwise the value is always
    /// inserted, after any equal values.
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn insert(&mut self, value: T, keep_unique: bool) -> (Position, bool) {
        match self.raw.insert_by(value, keep_unique, Ord::cmp) {
            InsertResult::Inserted(handle) => (self.position(Some(handle)), true),
            InsertResult::Occupied(handle, _) => (self.position(Some(handle)), false),
        }
    }

    /// Returns the position of a value equal to `value`, or past-the-end.
    ///
    /// With duplicates present, the one closest to the root is found.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree = Bst::from([2, 1, 3]);
    /// assert_eq!(tree.get(tree.find(&3)), Ok(&3));
    /// assert_eq!(tree.find(&4), tree.end());
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.position(self.search(value))
    }

    /// Returns true if the tree contains a value equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(value).is_some()
    }

    /// Removes every value equal to `value` and returns how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::from([1, 2, 2, 2, 3]);
    /// assert_eq!(tree.erase_value(&2), 3);
    /// assert_eq!(tree.erase_value(&2), 0);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn erase_value<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut removed = 0;
        while let Some(handle) = self.search(value) {
            self.raw.remove(handle);
            removed += 1;
        }
        removed
    }

    /// Replaces the contents with the values of `iter`, inserted in sequence, duplicates kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let mut tree = Bst::from([9, 8]);
    /// tree.assign([1, 1, 0]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [0, 1, 1]);
    /// ```
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.extend(iter);
    }

    pub(crate) fn search<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search_by(|stored| value.cmp(stored.borrow()))
    }
}

impl<T: Clone> Clone for Bst<T> {
    fn clone(&self) -> Self {
        let mut tree = Bst::with_capacity(self.len());
        tree.clone_from(self);
        tree
    }

    /// Copies `source` shape and values, overwriting this tree's nodes in place where both
    /// trees have a node at the same position.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from_tree(&source.raw);
    }
}

impl<T: fmt::Debug> fmt::Debug for Bst<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Bst<T> {
    fn default() -> Self {
        Bst::new()
    }
}

impl<T: PartialEq> PartialEq for Bst<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Bst<T> {}

impl<T: PartialOrd> PartialOrd for Bst<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Bst<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Bst<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: Ord> FromIterator<T> for Bst<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Bst::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Bst<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value, false);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for Bst<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Bst<T> {
    /// Inserts the values in array order, keeping duplicates.
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for Bst<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Bst<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `bst::IntoIter`.
    ///
    /// ```
    /// # use linked_bst::bst;
    /// let iter: bst::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: vec::IntoIter::default(),
        }
    }
}
