use super::BstSet;
use crate::bst::Bst;

impl<T> BstSet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let set: BstSet<i32> = BstSet::with_capacity(32);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BstSet {
            tree: Bst::with_capacity(capacity),
        }
    }

    /// Returns the current capacity for the set.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BstSet;
    ///
    /// let set: BstSet<i32> = BstSet::with_capacity(32);
    /// assert_eq!(set.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
