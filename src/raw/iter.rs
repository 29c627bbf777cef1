use core::iter::FusedIterator;

use super::handle::Handle;
use super::raw_bst::RawBst;

/// Double-ended in-order iterator driven purely by node links.
pub(crate) struct RawIter<'a, T> {
    tree: &'a RawBst<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, T> RawIter<'a, T> {
    pub(crate) fn new(tree: &'a RawBst<T>, front: Option<Handle>, back: Option<Handle>, remaining: usize) -> Self {
        Self {
            tree,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.next(handle);
        Some(self.tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for RawIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.prev(handle);
        Some(self.tree.value(handle))
    }
}

impl<T> ExactSizeIterator for RawIter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for RawIter<'_, T> {}

impl<T> Clone for RawIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}
