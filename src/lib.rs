//! Unbalanced, parent-linked binary search trees for Rust.
//!
//! This crate provides one tree, [`Bst`], and two adaptors built on it:
//!
//! - [`Bst`] - An ordered multiset. Duplicates are allowed unless an insertion asks for
//!   uniqueness, and equal values keep their insertion order.
//! - [`BstSet`] - An ordered set of unique values.
//! - [`BstMap`] - An ordered map from unique keys to values, ordered by key alone.
//!
//! Every node records its parent, so a [`Cursor`] can walk forwards and backwards with no
//! auxiliary stack. Positions can be detached from the borrow as [`Position`] tokens and
//! handed back to mutating operations, which validate them and report misuse as an [`Error`].
//!
//! # Example
//!
//! ```
//! use linked_bst::{Bst, Error};
//!
//! let mut tree = Bst::new();
//! for value in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(value, true);
//! }
//!
//! // Walk forwards from the first element, then wrap through past-the-end.
//! let mut cursor = tree.cursor_front();
//! assert_eq!(cursor.get(), Some(&1));
//! cursor.move_prev();
//! assert!(cursor.is_end());
//! cursor.move_prev();
//! assert_eq!(cursor.get(), Some(&9));
//!
//! // Erase by position; positions of other elements stay valid.
//! let seven = tree.find(&7);
//! let five = tree.find(&5);
//! assert_eq!(tree.erase(five).map(|next| tree.get(next).copied()), Ok(Ok(7)));
//! assert_eq!(tree.get(seven), Ok(&7));
//! assert_eq!(tree.erase(five), Err(Error::InvalidIterator));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Stable positions** - Removal relocates nodes instead of moving values between them
//! - **No recursion** - Clearing, copying and dropping walk the tree with explicit stacks, so
//!   degenerate chains of any length are handled
//! - **`serde`** - Optional `Serialize`/`Deserialize` support behind the `serde` feature.
//!   Collections serialize in ascending order and deserializing reinserts one value at a time,
//!   so a round trip rebuilds a chain and takes quadratic time in the element count
//!
//! # Implementation
//!
//! Nodes live in a per-tree arena and refer to each other through generational handles, so a
//! handle to a removed node is detected rather than followed. The tree never rebalances:
//! inserting sorted data builds a chain and operations degrade to linear time.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
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

mod error;
mod raw;
#[cfg(feature = "serde")]
mod serde;

pub mod bst;
pub mod bst_map;
pub mod bst_set;

pub use bst::{Bst, Cursor, Position};
pub use bst_map::BstMap;
pub use bst_set::BstSet;
pub use error::Error;
