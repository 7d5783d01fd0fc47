//! Selection, ordering, and filtering over [`OrderedSequence`] snapshots.
//!
//! The ordering routines ([`top_k`], [`sort_ascending_by_key`]) repeatedly scan
//! the remaining pool for its extremum, move it to the output, and repeat. That
//! is quadratic on purpose: a strict comparison during the scan means the
//! earliest item in input order wins every tie, so the output order under ties
//! is fully determined by the input order.
//!
//! Every routine consumes or borrows its input and returns a new sequence; none
//! of them can fail, and an empty input always yields an empty output.

use crate::OrderedSequence;

/// Index of the item whose key beats every earlier key under `beats`.
///
/// Returns `None` for an empty pool. `beats` must be strict for ties to resolve
/// to the earliest item.
fn extremum_index<T, S, F, P>(pool: &OrderedSequence<T>, key_of: &mut F, mut beats: P) -> Option<usize>
where
    F: FnMut(&T) -> S,
    P: FnMut(&S, &S) -> bool,
{
    let mut items = pool.iter().enumerate();
    let (mut best_index, first) = items.next()?;
    let mut best = key_of(first);
    for (index, item) in items {
        let candidate = key_of(item);
        if beats(&candidate, &best) {
            best_index = index;
            best = candidate;
        }
    }
    Some(best_index)
}

/// Moves up to `limit` items from `pool` to the output, each time taking the
/// first item whose key beats all others.
fn extract_repeatedly<T, S, F, P>(mut pool: OrderedSequence<T>, limit: usize, mut key_of: F, mut beats: P) -> OrderedSequence<T>
where
    F: FnMut(&T) -> S,
    P: FnMut(&S, &S) -> bool,
{
    let mut extracted = OrderedSequence::with_capacity(limit.min(pool.len()));
    while extracted.len() < limit {
        let Some(index) = extremum_index(&pool, &mut key_of, &mut beats) else {
            break;
        };
        extracted.push(pool.remove(index));
    }
    extracted
}

/// Returns the `k` items with the highest score, highest first.
///
/// Among equal scores the item that appears first in `items` is taken first.
/// Fewer than `k` items are returned when the input runs out.
///
/// Scores that do not compare (such as `NaN`) never beat the current best, and
/// nothing beats them either. A `NaN` at the front of the remaining pool is
/// therefore taken before everything behind it; one anywhere else is passed
/// over until it reaches the front.
///
/// # Complexity
///
/// O(n * k)
///
/// # Examples
///
/// ```
/// use inventory_tree::{OrderedSequence, ranking};
///
/// let scores = OrderedSequence::from(vec![("A", 5), ("B", 5), ("C", 3)]);
/// let top = ranking::top_k(scores, 2, |&(_, score)| score);
/// assert_eq!(top.as_slice(), [("A", 5), ("B", 5)]);
/// ```
pub fn top_k<T, S, F>(items: OrderedSequence<T>, k: usize, score_of: F) -> OrderedSequence<T>
where
    S: PartialOrd,
    F: FnMut(&T) -> S,
{
    extract_repeatedly(items, k, score_of, |candidate, best| candidate > best)
}

/// Returns every item ordered by ascending key.
///
/// Among equal keys the item that appears first in `items` comes first. For a
/// case-insensitive alphabetical order, return a case-folded key such as
/// `name.to_lowercase()`.
///
/// # Complexity
///
/// O(n²)
///
/// # Examples
///
/// ```
/// use inventory_tree::{OrderedSequence, ranking};
///
/// let names = OrderedSequence::from(vec!["bob", "Alice", "carol", "alice"]);
/// let sorted = ranking::sort_ascending_by_key(names, |name| name.to_lowercase());
/// assert_eq!(sorted.as_slice(), ["Alice", "alice", "bob", "carol"]);
/// ```
pub fn sort_ascending_by_key<T, K, F>(items: OrderedSequence<T>, key_of: F) -> OrderedSequence<T>
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    let len = items.len();
    extract_repeatedly(items, len, key_of, |candidate, best| candidate < best)
}

/// Keeps the items with `lo <= value_of(item) <= hi`, in input order.
///
/// # Examples
///
/// ```
/// use inventory_tree::{OrderedSequence, ranking};
///
/// let prices = OrderedSequence::from(vec![9.99, 10.0, 15.5, 20.0, 20.01]);
/// let kept = ranking::filter_range(prices, 10.0, 20.0, |&price| price);
/// assert_eq!(kept.as_slice(), [10.0, 15.5, 20.0]);
/// ```
pub fn filter_range<T, S, F>(items: OrderedSequence<T>, lo: S, hi: S, mut value_of: F) -> OrderedSequence<T>
where
    S: PartialOrd,
    F: FnMut(&T) -> S,
{
    items
        .into_iter()
        .filter(|item| {
            let value = value_of(item);
            lo <= value && value <= hi
        })
        .collect()
}

/// Keeps the items whose date string lies in `start..=end`, in input order.
///
/// Dates are compared as plain strings, which orders correctly only for
/// zero-padded `YYYY-MM-DD` values.
///
/// # Examples
///
/// ```
/// use inventory_tree::{OrderedSequence, ranking};
///
/// let dates = OrderedSequence::from(vec!["2024-01-31", "2024-02-01", "2024-03-01"]);
/// let february = ranking::dates_between(dates, "2024-02-01", "2024-02-29", |date| *date);
/// assert_eq!(february.as_slice(), ["2024-02-01"]);
/// ```
pub fn dates_between<T, F>(items: OrderedSequence<T>, start: &str, end: &str, mut date_of: F) -> OrderedSequence<T>
where
    F: FnMut(&T) -> &str,
{
    items
        .into_iter()
        .filter(|item| {
            let date = date_of(item);
            start <= date && date <= end
        })
        .collect()
}

/// Collects the entities derived from every `(a, b)` pair whose keys match.
///
/// The scan is nested, `a` outer and `b` inner. For each matching pair,
/// `derive` produces the candidate entity (or `None` to skip the pair); it is
/// kept if `predicate` accepts it and no entity with the same `dedupe_key_of`
/// has been kept yet. Output is in first-match order.
///
/// # Complexity
///
/// O(|a| * |b| * |output|)
///
/// # Examples
///
/// ```
/// use inventory_tree::{OrderedSequence, ranking};
///
/// // (reviewer, product) pairs for two reviewers.
/// let first = OrderedSequence::from(vec![(1, 10), (1, 20), (1, 30)]);
/// let second = OrderedSequence::from(vec![(2, 30), (2, 10), (2, 10)]);
///
/// let shared = ranking::intersect_by_derived_key(
///     &first,
///     &second,
///     |&(_, product)| product,
///     |&(_, product)| product,
///     |&(_, product), _| Some(product),
///     |_| true,
///     |&product| product,
/// );
/// assert_eq!(shared.as_slice(), [10, 30]);
/// ```
pub fn intersect_by_derived_key<A, B, K, D, DK, KA, KB, FD, P, FK>(
    set_a: &OrderedSequence<A>,
    set_b: &OrderedSequence<B>,
    mut key_of_a: KA,
    mut key_of_b: KB,
    mut derive: FD,
    mut predicate: P,
    mut dedupe_key_of: FK,
) -> OrderedSequence<D>
where
    K: PartialEq,
    DK: PartialEq,
    KA: FnMut(&A) -> K,
    KB: FnMut(&B) -> K,
    FD: FnMut(&A, &B) -> Option<D>,
    P: FnMut(&D) -> bool,
    FK: FnMut(&D) -> DK,
{
    let mut matches = OrderedSequence::new();
    for a in set_a {
        let key = key_of_a(a);
        for b in set_b {
            if key_of_b(b) != key {
                continue;
            }
            let Some(derived) = derive(a, b) else {
                continue;
            };
            if !predicate(&derived) {
                continue;
            }
            let dedupe_key = dedupe_key_of(&derived);
            if !matches.iter().any(|kept| dedupe_key_of(kept) == dedupe_key) {
                matches.push(derived);
            }
        }
    }
    matches
}
