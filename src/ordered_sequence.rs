use alloc::vec::{self, Vec};
use core::ops::Index;
use core::slice;

/// An insertion-ordered, index-addressable sequence.
///
/// This is the output format of [`OrderedIndex::snapshot`] and the scratch pool
/// the [`ranking`] routines extract from. It is a thin adapter over [`Vec`]; a
/// sequence never aliases the tree it was taken from.
///
/// # Examples
///
/// ```
/// use inventory_tree::OrderedSequence;
///
/// let mut seq = OrderedSequence::new();
/// seq.push("a");
/// seq.push("b");
/// seq.push("c");
///
/// assert_eq!(seq.remove(1), "b");
/// assert_eq!(seq.as_slice(), ["a", "c"]);
/// ```
///
/// [`OrderedIndex::snapshot`]: crate::OrderedIndex::snapshot
/// [`ranking`]: crate::ranking
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderedSequence<T> {
    items: Vec<T>,
}

impl<T> OrderedSequence<T> {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty sequence with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends an item to the end.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Returns the item at `index`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes and returns the item at `index`, shifting later items left.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.items.len(),
            "`OrderedSequence::remove()` - `index` {index} out of bounds for length {}",
            self.items.len()
        );
        self.items.remove(index)
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the sequence holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keeps only the items `keep` accepts, in their original order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(keep);
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates over the items in order, allowing each to be modified.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for OrderedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for OrderedSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for OrderedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for OrderedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for OrderedSequence<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// # Panics
///
/// Panics if `index` is out of bounds.
impl<T> Index<usize> for OrderedSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}
