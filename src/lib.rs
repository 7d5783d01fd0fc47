//! An integer-keyed binary search tree and the ranking queries of a small
//! inventory/order manager.
//!
//! This crate provides:
//!
//! - [`OrderedIndex`] - an unbalanced binary search tree mapping `i32` keys to
//!   values, with upsert, lookup, delete and in-order [`snapshot`](OrderedIndex::snapshot)
//! - [`OrderedSequence`] - the insertion-ordered sequence snapshots are returned in
//! - [`ranking`] - top-k, alphabetical ordering, range and date filters, and
//!   two-set intersection over snapshots
//! - [`Store`] - products, customers, orders and reviews kept in those indexes
//!
//! # Example
//!
//! ```
//! use inventory_tree::{OrderedIndex, ranking};
//!
//! let mut prices = OrderedIndex::new();
//! prices.upsert(3, ("Lamp", 30.0));
//! prices.upsert(1, ("Desk", 120.0));
//! prices.upsert(2, ("Chair", 45.0));
//!
//! // Snapshots are in key order.
//! let all = prices.snapshot();
//! assert_eq!(all[0].0, "Desk");
//!
//! // Rank them by price.
//! let top = ranking::top_k(all, 2, |&(_, price)| price);
//! assert_eq!(top.as_slice(), [("Desk", 120.0), ("Chair", 45.0)]);
//! ```
//!
//! # Implementation
//!
//! The index is a plain binary search tree. It is never rebalanced, so its shape
//! (and with it the cost of every lookup) is a pure function of the order keys
//! were inserted and deleted in. All tree walks are iterative, so even a fully
//! degenerate tree never overflows the call stack.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod ordered_index;
mod ordered_sequence;
mod raw;

pub mod ranking;
pub mod store;

pub use ordered_index::{Iter, Keys, OrderedIndex};
pub use ordered_sequence::OrderedSequence;
pub use store::{Customer, Order, Product, Review, Store, StoreConfig, StoreError};
