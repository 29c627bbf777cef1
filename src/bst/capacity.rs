use super::Bst;
use crate::raw::RawBst;

impl<T> Bst<T> {
    /// Creates an empty tree with node storage for at least `capacity` values.
    ///
    /// This is an extension and is not part of the standard collection APIs.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree: Bst<i32> = Bst::with_capacity(16);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Bst {
            raw: RawBst::with_capacity(capacity),
        }
    }

    /// Returns the number of values the tree can hold without reallocating node storage.
    ///
    /// Freed nodes are recycled, so a tree that shrinks and grows again within its capacity
    /// does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Bst;
    ///
    /// let tree: Bst<i32> = Bst::with_capacity(32);
    /// assert_eq!(tree.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
