use alloc::boxed::Box;

/// An owned child slot. `None` is an empty position in the tree.
pub(crate) type Link<V> = Option<Box<Node<V>>>;

/// A single binary search tree node.
///
/// Every node is owned by exactly one link: its parent's `left`/`right`, or the
/// tree's root. There are no back-references.
pub(crate) struct Node<V> {
    pub(crate) key: i32,
    pub(crate) value: V,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
}

impl<V> Node<V> {
    /// Creates a new leaf node.
    pub(crate) const fn leaf(key: i32, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Returns the child slot a descent for `key` continues into.
    ///
    /// Must not be called with `key == self.key`.
    #[inline]
    pub(crate) fn child(&self, key: i32) -> &Link<V> {
        if key < self.key { &self.left } else { &self.right }
    }

    /// Mutable counterpart of [`Node::child`].
    #[inline]
    pub(crate) fn child_mut(&mut self, key: i32) -> &mut Link<V> {
        if key < self.key {
            &mut self.left
        } else {
            &mut self.right
        }
    }
}
