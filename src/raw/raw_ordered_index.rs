use alloc::boxed::Box;
use core::mem;

use smallvec::SmallVec;

use super::node::{Link, Node};

/// Stack of owned nodes used while tearing a tree down.
type Teardown<V> = SmallVec<[Box<Node<V>>; 16]>;

/// The core unbalanced binary search tree backing `OrderedIndex`.
///
/// All descents are loops over `&mut Link<V>` slots rather than recursion, so a
/// degenerate (list-shaped) tree of any depth is walked without growing the call
/// stack. The shape is never rebalanced: it is a pure function of the
/// insert/remove history.
pub(crate) struct RawOrderedIndex<V> {
    /// The root slot; `None` when the tree is empty.
    root: Link<V>,
    /// Number of nodes in the tree.
    len: usize,
}

impl<V> RawOrderedIndex<V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of nodes in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no nodes.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the root node, if any.
    pub(crate) fn root(&self) -> Option<&Node<V>> {
        self.root.as_deref()
    }

    /// Binary-search descent for `key`.
    pub(crate) fn search(&self, key: i32) -> Option<&Node<V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.key == key {
                return Some(node);
            }
            current = node.child(key).as_deref();
        }
        None
    }

    /// Mutable binary-search descent for `key`.
    pub(crate) fn search_mut(&mut self, key: i32) -> Option<&mut Node<V>> {
        self.slot_mut(key).as_deref_mut()
    }

    /// Returns the slot that holds `key`, or the empty slot where it would be
    /// inserted.
    ///
    /// The invariant guarantees the result is unique.
    fn slot_mut(&mut self, key: i32) -> &mut Link<V> {
        let mut link = &mut self.root;
        while link.as_ref().is_some_and(|node| node.key != key) {
            if let Some(node) = link {
                link = node.child_mut(key);
            }
        }
        link
    }

    /// Inserts `key` as a new leaf, or replaces the value of the existing node.
    ///
    /// Returns the replaced value. Replacing never changes a key or a link.
    pub(crate) fn insert(&mut self, key: i32, value: V) -> Option<V> {
        let slot = self.slot_mut(key);
        if let Some(node) = slot {
            return Some(mem::replace(&mut node.value, value));
        }
        *slot = Some(Box::new(Node::leaf(key, value)));
        self.len += 1;
        None
    }

    /// Removes `key` from the tree and returns its value.
    ///
    /// An absent key performs no mutation at all.
    pub(crate) fn remove(&mut self, key: i32) -> Option<V> {
        let value = detach(self.slot_mut(key))?;
        self.len -= 1;
        Some(value)
    }

    /// Smallest key in the tree.
    pub(crate) fn first_key(&self) -> Option<i32> {
        self.root().map(min_key)
    }

    /// Largest key in the tree.
    pub(crate) fn last_key(&self) -> Option<i32> {
        self.root().map(max_key)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub(crate) fn height(&self) -> usize {
        let mut stack: SmallVec<[(&Node<V>, usize); 32]> = SmallVec::new();
        stack.extend(self.root().map(|node| (node, 1)));

        let mut height = 0;
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|child| (child, depth + 1)));
            stack.extend(node.right.as_deref().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Visits every node parent-before-children (node, left, right).
    ///
    /// Re-inserting keys in this order into an empty tree rebuilds the same
    /// shape.
    pub(crate) fn for_each_preorder<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Node<V>),
    {
        let mut stack: SmallVec<[&Node<V>; 32]> = SmallVec::new();
        stack.extend(self.root());
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
    }

    /// Returns true if both trees hold the same keys and values in the same
    /// shape.
    pub(crate) fn same_shape(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        if self.len != other.len {
            return false;
        }

        let mut stack: SmallVec<[(&Link<V>, &Link<V>); 32]> = SmallVec::new();
        stack.push((&self.root, &other.root));
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.key != b.key || a.value != b.value {
                        return false;
                    }
                    stack.push((&a.left, &b.left));
                    stack.push((&a.right, &b.right));
                }
                _ => return false,
            }
        }
        true
    }

    /// Drops every node. Iterative, so list-shaped trees cannot overflow the
    /// stack on teardown.
    pub(crate) fn clear(&mut self) {
        let mut stack: Teardown<V> = SmallVec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl<V> Drop for RawOrderedIndex<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Removes the node held by `slot` and returns its value.
///
/// - No children: the slot becomes empty.
/// - One child: the child subtree takes the node's place.
/// - Two children: the in-order successor is detached from the right subtree
///   first, then its key and value move into this node together. The node at
///   the deletion site stays in place with a new key.
fn detach<V>(slot: &mut Link<V>) -> Option<V> {
    let node = slot.as_mut()?;
    if node.left.is_some() {
        if let Some(successor) = detach_min(&mut node.right) {
            node.key = successor.key;
            return Some(mem::replace(&mut node.value, successor.value));
        }
    }

    let mut node = slot.take()?;
    *slot = node.left.take().or_else(|| node.right.take());
    Some(node.value)
}

/// Unlinks the minimum node of the subtree in `link`, splicing its right child
/// into its place.
fn detach_min<V>(mut link: &mut Link<V>) -> Option<Box<Node<V>>> {
    while link.as_ref().is_some_and(|node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }

    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

/// Key of the leftmost node under `node`.
fn min_key<V>(mut node: &Node<V>) -> i32 {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node.key
}

/// Key of the rightmost node under `node`.
fn max_key<V>(mut node: &Node<V>) -> i32 {
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    node.key
}
