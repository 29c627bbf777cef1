use core::cmp::Ordering;

use alloc::vec::Vec;
use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::iter::RawIter;
use super::node::{Node, Side};
use super::tree_id::TreeId;

/// Work stack for whole-tree walks. Unbalanced trees can be as deep as they are long, so
/// nothing here recurses.
type Stack<E> = SmallVec<[E; 32]>;

/// The parent-linked binary search tree backing `Bst`, `BstSet` and `BstMap`.
///
/// The tree never rebalances. Ordering is supplied by the caller on every ordered operation,
/// which lets the map order `(K, V)` entries by key alone.
pub(crate) struct RawBst<T> {
    /// Arena owning every node.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of reachable nodes.
    len: usize,
    /// Identity of this node storage, checked when positions are handed back.
    id: TreeId,
}

/// Result of an insertion attempt.
pub(crate) enum InsertResult<T> {
    /// A new node was attached.
    Inserted(Handle),
    /// Uniqueness was requested and an equal value already lives at the handle. The rejected
    /// value is handed back untouched.
    Occupied(Handle, T),
}

/// Destination slot during `clone_from`.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Child(Handle, Side),
}

impl<T> RawBst<T> {
    /// Creates a new, empty tree.
    pub(crate) fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            id: TreeId::next(),
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            id: TreeId::next(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn id(&self) -> TreeId {
        self.id
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns true if `handle` refers to a live node of this tree.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    #[cfg(test)]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.nodes.get(handle).value()
    }

    /// Mutable access to a stored value. Callers must not change how it orders.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut T {
        self.nodes.get_mut(handle).value_mut()
    }

    /// Returns the leftmost node.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// Returns the rightmost node.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// In-order successor of `handle`.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    /// In-order predecessor of `handle`.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    pub(crate) fn iter(&self) -> RawIter<'_, T> {
        RawIter::new(self, self.first(), self.last(), self.len)
    }

    /// Follows `side` links down from `handle` as far as they go.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// One in-order step towards `side`, using only node links.
    ///
    /// With a child on `side`, the answer is the extreme of that subtree in the opposite
    /// direction. Otherwise climb while the current node hangs on `side` of its parent; the
    /// first parent reached from the opposite side is the answer, or `None` past the root.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(child) = node.child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = handle;
        let mut parent = node.parent();
        while let Some(up) = parent {
            let up_node = self.nodes.get(up);
            if up_node.child(side.opposite()) == Some(current) {
                return Some(up);
            }
            current = up;
            parent = up_node.parent();
        }
        None
    }

    /// Links `child` below `parent` on `side`, re-parenting it. Overwrites the previous link.
    fn attach(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        self.nodes.get_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(parent));
        }
    }

    /// Allocates a node for `value` and links it below `parent` on `side`.
    fn attach_new(&mut self, parent: Handle, side: Side, value: T) -> Handle {
        let child = self.nodes.alloc(Node::new(value));
        self.attach(parent, side, Some(child));
        child
    }

    /// Puts `replacement` into the slot `old` occupies below `parent` (or at the root).
    fn replace_in_parent(&mut self, old: Handle, parent: Option<Handle>, replacement: Option<Handle>) {
        match parent {
            None => {
                self.root = replacement;
                if let Some(replacement) = replacement {
                    self.nodes.get_mut(replacement).set_parent(None);
                }
            }
            Some(parent) => {
                let side = self
                    .nodes
                    .get(parent)
                    .side_of(old)
                    .expect("`RawBst::replace_in_parent()` - `old` is not a child of `parent`!");
                self.attach(parent, side, replacement);
            }
        }
    }

    /// Descends from the root. `compare` orders the probe against a stored value.
    pub(crate) fn search_by<F>(&self, mut compare: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match compare(node.value()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Inserts `value`, routing ties to the right.
    ///
    /// With `keep_unique`, a value comparing equal to a visited node is not inserted and is
    /// returned in [`InsertResult::Occupied`]. `compare(new, stored)` supplies the ordering.
    pub(crate) fn insert_by<F>(&mut self, value: T, keep_unique: bool, mut compare: F) -> InsertResult<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let Some(mut current) = self.root else {
            let root = self.nodes.alloc(Node::new(value));
            self.root = Some(root);
            self.len = 1;
            return InsertResult::Inserted(root);
        };

        loop {
            let node = self.nodes.get(current);
            let ordering = compare(&value, node.value());
            if keep_unique && ordering == Ordering::Equal {
                return InsertResult::Occupied(current, value);
            }

            let side = if ordering == Ordering::Less {
                Side::Left
            } else {
                Side::Right
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let inserted = self.attach_new(current, side, value);
                    self.len += 1;
                    return InsertResult::Inserted(inserted);
                }
            }
        }
    }

    /// Unlinks and frees `handle`, returning its value and the handle of its in-order
    /// successor.
    ///
    /// Nodes are relocated rather than having values swapped between them, so every other
    /// handle (the successor's included) stays valid.
    pub(crate) fn remove(&mut self, handle: Handle) -> (T, Option<Handle>) {
        let successor = self.next(handle);
        let node = self.nodes.get(handle);
        let (left, right, parent) = (node.left(), node.right(), node.parent());

        match (left, right) {
            (None, None) => {
                trace!("remove: leaf");
                self.replace_in_parent(handle, parent, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("remove: splicing single child");
                self.replace_in_parent(handle, parent, Some(child));
            }
            (Some(left), Some(right)) => {
                // The heir is the leftmost node of the right subtree; it has no left child.
                let mut heir_parent = handle;
                let mut heir = right;
                while let Some(next) = self.nodes.get(heir).left() {
                    heir_parent = heir;
                    heir = next;
                }

                if heir_parent == handle {
                    trace!("remove: promoting immediate right child");
                } else {
                    trace!("remove: detaching successor from deeper in the right subtree");
                    let heir_right = self.nodes.get(heir).right();
                    self.attach(heir_parent, Side::Left, heir_right);
                    self.attach(heir, Side::Right, Some(right));
                }
                self.attach(heir, Side::Left, Some(left));
                self.replace_in_parent(handle, parent, Some(heir));
            }
        }

        self.len -= 1;
        let value = self.nodes.take(handle).into_value();
        (value, successor)
    }

    /// Keeps only the values for which `keep` returns true, visiting them in order.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut current = self.first();
        while let Some(handle) = current {
            if keep(self.value_mut(handle)) {
                current = self.next(handle);
            } else {
                current = self.remove(handle).1;
            }
        }
    }

    /// Frees every node (children before parents) and resets the count.
    pub(crate) fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            let freed = self.free_subtree(root);
            debug!("clear: freed {freed} nodes");
        }
        self.len = 0;
    }

    /// Frees the subtree rooted at `handle` in post-order. The link pointing at it is left for
    /// the caller to clear. Returns the number of nodes freed.
    fn free_subtree(&mut self, handle: Handle) -> usize {
        let mut freed = 0;
        let mut stack: Stack<(Handle, bool)> = SmallVec::new();
        stack.push((handle, false));

        while let Some((handle, children_done)) = stack.pop() {
            if children_done {
                self.nodes.free(handle);
                freed += 1;
                continue;
            }

            stack.push((handle, true));
            let node = self.nodes.get(handle);
            if let Some(right) = node.right() {
                stack.push((right, false));
            }
            if let Some(left) = node.left() {
                stack.push((left, false));
            }
        }
        freed
    }

    /// Exchanges the complete state of two trees. Visits no node.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
        debug!("swap: exchanged trees of {} and {} elements", self.len, other.len);
    }

    /// Removes every value, in order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.next(handle);
        }

        let values = handles.into_iter().map(|handle| self.nodes.take(handle).into_value()).collect();
        self.root = None;
        self.len = 0;
        values
    }
}

impl<T: Clone> RawBst<T> {
    /// Makes `self` a structural copy of `source`.
    ///
    /// Walks both trees in lock step. A destination node at the same position is overwritten
    /// in place, a missing one is allocated, and destination subtrees the source lacks are
    /// freed.
    pub(crate) fn clone_from_tree(&mut self, source: &Self) {
        let Some(source_root) = source.root else {
            self.clear();
            return;
        };

        let (mut reused, mut allocated, mut freed) = (0usize, 0usize, 0usize);
        let mut stack: Stack<(Handle, Slot)> = SmallVec::new();
        stack.push((source_root, Slot::Root));

        while let Some((source_handle, slot)) = stack.pop() {
            let source_node = source.nodes.get(source_handle);
            let existing = match slot {
                Slot::Root => self.root,
                Slot::Child(parent, side) => self.nodes.get(parent).child(side),
            };

            let target = if let Some(target) = existing {
                self.nodes.get_mut(target).value_mut().clone_from(source_node.value());
                reused += 1;
                target
            } else {
                let value = source_node.value().clone();
                let target = match slot {
                    Slot::Root => {
                        let root = self.nodes.alloc(Node::new(value));
                        self.root = Some(root);
                        root
                    }
                    Slot::Child(parent, side) => self.attach_new(parent, side, value),
                };
                allocated += 1;
                target
            };

            for side in [Side::Left, Side::Right] {
                match (source_node.child(side), self.nodes.get(target).child(side)) {
                    (Some(source_child), _) => stack.push((source_child, Slot::Child(target, side))),
                    (None, Some(surplus)) => {
                        freed += self.free_subtree(surplus);
                        self.nodes.get_mut(target).set_child(side, None);
                    }
                    (None, None) => {}
                }
            }
        }

        self.len = source.len;
        debug!("clone_from: reused {reused}, allocated {allocated}, freed {freed} nodes");
    }
}
