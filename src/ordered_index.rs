use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::OrderedSequence;
use crate::raw::{Node, RawOrderedIndex};

/// Pending ancestors of an in-order walk.
type Path<'a, V> = SmallVec<[&'a Node<V>; 32]>;

/// An ordered map from `i32` keys to values, stored as a plain binary search
/// tree.
///
/// Every key is unique. For every node, all keys in its left subtree are
/// strictly smaller and all keys in its right subtree strictly larger.
///
/// The tree is never rebalanced. Its shape depends only on the history of
/// [`upsert`] and [`delete`] calls, so lookups are O(log n) on random insertion
/// orders and degrade to O(n) on sorted ones:
///
/// ```
/// use inventory_tree::OrderedIndex;
///
/// let mut ids = OrderedIndex::new();
/// for id in 1..=100 {
///     ids.upsert(id, ());
/// }
/// assert_eq!(ids.height(), 100);
/// ```
///
/// # Examples
///
/// ```
/// use inventory_tree::OrderedIndex;
///
/// let mut products = OrderedIndex::new();
/// products.upsert(42, "Keyboard");
/// products.upsert(7, "Mouse");
/// products.upsert(42, "Mechanical keyboard");
///
/// assert_eq!(products.find(42), Some(&"Mechanical keyboard"));
/// assert_eq!(products.find(8), None);
///
/// // Snapshots come out in key order.
/// assert_eq!(products.snapshot().as_slice(), ["Mouse", "Mechanical keyboard"]);
///
/// assert!(products.delete(7));
/// assert!(!products.delete(7));
/// ```
///
/// [`upsert`]: OrderedIndex::upsert
/// [`delete`]: OrderedIndex::delete
pub struct OrderedIndex<V> {
    raw: RawOrderedIndex<V>,
}

impl<V> OrderedIndex<V> {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawOrderedIndex::new(),
        }
    }

    /// Returns the number of keys in the index.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the index holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Inserts `value` under `key`, replacing the value of an existing key.
    ///
    /// A new key becomes a leaf at the position binary-search descent leads to.
    /// An existing key keeps its node, links, and position; only the value
    /// changes.
    ///
    /// # Complexity
    ///
    /// O(h) where h is the current height of the tree.
    pub fn upsert(&mut self, key: i32, value: V) {
        self.raw.insert(key, value);
    }

    /// Like [`upsert`](OrderedIndex::upsert), but returns the value it replaced.
    pub fn insert(&mut self, key: i32, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(h) where h is the current height of the tree.
    #[must_use]
    pub fn find(&self, key: i32) -> Option<&V> {
        self.raw.search(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[must_use]
    pub fn find_mut(&mut self, key: i32) -> Option<&mut V> {
        self.raw.search_mut(key).map(|node| &mut node.value)
    }

    #[must_use]
    pub fn contains_key(&self, key: i32) -> bool {
        self.raw.search(key).is_some()
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// An absent key leaves the index untouched. Removing a node with two
    /// children moves its in-order successor's key and value into that node and
    /// unlinks the successor from the right subtree instead.
    ///
    /// # Complexity
    ///
    /// O(h) where h is the current height of the tree.
    pub fn delete(&mut self, key: i32) -> bool {
        self.raw.remove(key).is_some()
    }

    /// Like [`delete`](OrderedIndex::delete), but returns the removed value.
    pub fn remove(&mut self, key: i32) -> Option<V> {
        self.raw.remove(key)
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn first_key(&self) -> Option<i32> {
        self.raw.first_key()
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last_key(&self) -> Option<i32> {
        self.raw.last_key()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// This is an extension for observing the unbalanced shape; an empty index
    /// has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Iterates over `(key, &value)` pairs in increasing key order.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter {
            path: SmallVec::new(),
            remaining: self.len(),
        };
        iter.descend_left(self.raw.root());
        iter
    }

    /// Iterates over the keys in increasing order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns a copy of every value in increasing key order.
    ///
    /// The snapshot is disconnected from the index: later mutations of either
    /// never show up in the other.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn snapshot(&self) -> OrderedSequence<V>
    where
        V: Clone,
    {
        let mut snapshot = OrderedSequence::with_capacity(self.len());
        snapshot.extend(self.iter().map(|(_, value)| value.clone()));
        snapshot
    }
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for OrderedIndex<V> {
    /// Rebuilds the same shape by re-inserting keys parent-first.
    fn clone(&self) -> Self {
        let mut clone = Self::new();
        self.raw.for_each_preorder(|node| {
            clone.raw.insert(node.key, node.value.clone());
        });
        clone
    }
}

/// Equality is structural: both indexes must hold the same keys and values
/// arranged in the same tree shape.
impl<V: PartialEq> PartialEq for OrderedIndex<V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.same_shape(&other.raw)
    }
}

impl<V: Eq> Eq for OrderedIndex<V> {}

impl<V: fmt::Debug> fmt::Debug for OrderedIndex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> FromIterator<(i32, V)> for OrderedIndex<V> {
    fn from_iter<I: IntoIterator<Item = (i32, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<V> Extend<(i32, V)> for OrderedIndex<V> {
    fn extend<I: IntoIterator<Item = (i32, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.upsert(key, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a OrderedIndex<V> {
    type Item = (i32, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the entries of an [`OrderedIndex`].
///
/// This `struct` is created by [`OrderedIndex::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, V> {
    path: Path<'a, V>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    fn descend_left(&mut self, mut node: Option<&'a Node<V>>) {
        while let Some(current) = node {
            self.path.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i32, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.path.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        Some((node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// An in-order iterator over the keys of an [`OrderedIndex`].
///
/// This `struct` is created by [`OrderedIndex::keys`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}
impl<V> FusedIterator for Keys<'_, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn iter_is_in_key_order() {
        let index: OrderedIndex<char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
        let entries: Vec<_> = index.iter().collect();
        assert_eq!(entries, [(1, &'a'), (2, &'b'), (3, &'c')]);
        assert_eq!(index.iter().len(), 3);
        assert_eq!(index.keys().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn debug_prints_as_map() {
        let index: OrderedIndex<&str> = [(2, "two"), (1, "one")].into_iter().collect();
        assert_eq!(format!("{index:?}"), r#"{1: "one", 2: "two"}"#);
    }

    #[test]
    fn clone_keeps_shape() {
        let index: OrderedIndex<i32> = [5, 2, 9, 1, 3, 7].into_iter().map(|k| (k, k)).collect();
        let clone = index.clone();
        assert_eq!(clone, index);
        assert_eq!(clone.height(), index.height());
    }

    #[test]
    fn equality_is_shape_sensitive() {
        let balanced: OrderedIndex<()> = [2, 1, 3].into_iter().map(|k| (k, ())).collect();
        let chain: OrderedIndex<()> = [1, 2, 3].into_iter().map(|k| (k, ())).collect();
        assert!(balanced.keys().eq(chain.keys()));
        assert_ne!(balanced, chain);
    }

    #[test]
    fn find_mut_updates_in_place() {
        let mut index = OrderedIndex::new();
        index.upsert(1, 10);
        if let Some(value) = index.find_mut(1) {
            *value += 5;
        }
        assert_eq!(index.find(1), Some(&15));
        assert!(index.find_mut(2).is_none());
    }
}
