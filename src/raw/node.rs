use super::handle::Handle;

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single tree vertex.
///
/// A node knows nothing about the ordering of the tree it lives in, so it cannot validate its
/// own placement. Links are plain handles into the owning arena; the arena owns the node.
pub(crate) struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached node: no children, no parent.
    pub(crate) const fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Overwrites the link on `side`. The previous child, if any, is not freed.
    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Returns the side on which `child` hangs below this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_detached() {
        let node = Node::new(7);
        assert_eq!(*node.value(), 7);
        assert_eq!((node.left(), node.right(), node.parent()), (None, None, None));
    }

    #[test]
    fn set_child_overwrites_link() {
        let (a, b) = (Handle::new(0, 0), Handle::new(1, 0));
        let mut node = Node::new(0);

        node.set_child(Side::Left, Some(a));
        node.set_child(Side::Left, Some(b));
        assert_eq!(node.left(), Some(b));
        assert_eq!(node.side_of(b), Some(Side::Left));
        assert_eq!(node.side_of(a), None);

        node.set_child(Side::Right, Some(a));
        assert_eq!(node.child(Side::Right), Some(a));
        assert_eq!(node.side_of(a), Some(Side::Right));
    }

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }
}
