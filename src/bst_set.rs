use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::Error;
use crate::bst::{self, Bst, Cursor, Position};
use crate::raw::InsertResult;

mod capacity;

/// An ordered set based on an unbalanced, parent-linked binary search tree.
///
/// `BstSet` is a thin adaptor over [`Bst`] that inserts with uniqueness enforced. See
/// [`Bst`]'s documentation for the performance characteristics of the underlying tree; in
/// particular, sorted insertions build a degenerate chain.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering
/// relative to any other item, as determined by the [`Ord`] trait, changes while it is in the
/// set. This is normally only possible through [`Cell`], [`RefCell`], global state, I/O, or
/// unsafe code.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use linked_bst::BstSet;
///
/// let mut books = BstSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// books.remove("The Odyssey");
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `BstSet` with a known list of items can be initialized from an array; later duplicates
/// are dropped:
///
/// ```
/// use linked_bst::BstSet;
///
/// let set = BstSet::from([3, 1, 3, 2]);
/// assert_eq!(set.len(), 3);
/// ```
pub struct BstSet<T> {
    tree: Bst<T>,
}

/// An iterator over the items of a `BstSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`BstSet`].
///
/// # Examples
///
/// ```
/// use linked_bst::BstSet;
///
/// let set = BstSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: BstSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: bst::Iter<'a, T>,
}

/// An owning iterator over the items of a `BstSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstSet`] (provided by the
/// [`IntoIterator`] trait).
///
/// [`into_iter`]: BstSet#method.into_iter
pub struct IntoIter<T> {
    inner: bst::IntoIter<T>,
}

impl<T> BstSet<T> {
    /// Makes a new, empty `BstSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set: BstSet<i32> = BstSet::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        BstSet { tree: Bst::new() }
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the position of the first element, or past-the-end.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the past-the-end position.
    #[must_use]
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns a cursor at `position`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the position does not belong to this set.
    pub fn cursor(&self, position: Position) -> Result<Cursor<'_, T>, Error> {
        self.tree.cursor(position)
    }

    /// Returns a reference to the first element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the last element in the set, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes the first element from the set and returns it, if any.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes the last element from the set and returns it, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Removes the element at `position` and returns the position of the next element.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the position does not refer to a live element of this set.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set = BstSet::from([1, 2, 3]);
    /// let mut position = set.begin();
    /// while position != set.end() {
    ///     position = set.erase(position).unwrap();
    /// }
    /// assert!(set.is_empty());
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<Position, Error> {
        self.tree.erase(position)
    }

    /// Removes the elements in `[first, last)` and returns `last`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if a position is invalid or the range is inverted.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position, Error> {
        self.tree.erase_range(first, last)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set = BstSet::from([1, 2, 3, 4, 5, 6]);
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.tree.retain(f);
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Gets an iterator that visits the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.tree.iter() }
    }
}

impl<T: Ord> BstSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. If the set already contained an equal
    /// value, the set is not modified and the new value is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value, true).1
    }

    /// Adds a value to the set, returning its position and whether it was newly inserted.
    ///
    /// When the value was already present, the position is that of the existing element.
    pub fn insert_at(&mut self, value: T) -> (Position, bool) {
        self.tree.insert(value, true)
    }

    /// Adds a value to the set, replacing the existing element, if any, that is equal to the
    /// value. Returns the replaced element.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(Vec::<i32>::new());
    ///
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 0);
    /// set.replace(Vec::with_capacity(10));
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 10);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        match self.tree.raw_mut().insert_by(value, true, Ord::cmp) {
            InsertResult::Inserted(_) => None,
            InsertResult::Occupied(handle, value) => {
                Some(core::mem::replace(self.tree.raw_mut().value_mut(handle), value))
            }
        }
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.search(value).map(|handle| self.tree.raw().value(handle))
    }

    /// Returns the position of the element equal to the value, or past-the-end.
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(value)
    }

    /// If the set contains an element equal to the value, removes it from the set and drops
    /// it. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to the value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.tree.search(value)?;
        Some(self.tree.raw_mut().remove(handle).0)
    }
}

impl<T: Hash> Hash for BstSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<T: PartialEq> PartialEq for BstSet<T> {
    fn eq(&self, other: &BstSet<T>) -> bool {
        self.tree.eq(&other.tree)
    }
}

impl<T: Eq> Eq for BstSet<T> {}

impl<T: PartialOrd> PartialOrd for BstSet<T> {
    fn partial_cmp(&self, other: &BstSet<T>) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord> Ord for BstSet<T> {
    fn cmp(&self, other: &BstSet<T>) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<T: Clone> Clone for BstSet<T> {
    fn clone(&self) -> Self {
        BstSet {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<T: fmt::Debug> fmt::Debug for BstSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for BstSet<T> {
    fn default() -> Self {
        BstSet::new()
    }
}

impl<T: Ord> FromIterator<T> for BstSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = BstSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for BstSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for BstSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BstSet<T> {
    /// Converts a `[T; N]` into a `BstSet<T>`, keeping the first of any equal values.
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let set1 = BstSet::from([1, 2, 3, 4]);
    /// let set2: BstSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for BstSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `BstSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T> {
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

    fn min(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
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
        f.debug_tuple("Iter").field(&self.inner.clone()).finish()
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
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `bst_set::IntoIter`.
    ///
    /// ```
    /// # use linked_bst::bst_set;
    /// let iter: bst_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: bst::IntoIter::default(),
        }
    }
}
