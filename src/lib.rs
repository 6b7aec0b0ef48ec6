//! This crate implements the O(NP) sequence comparison algorithm by Wu,
//! Manber, Myers and Miller.  Given two sequences it finds the minimal
//! number of insertions and deletions to turn one into the other, and the
//! longest common subsequence along with it.
//!
//! The crate is split into two levels:
//!
//! * [`algorithms`]: The engine itself.  It is driven through a small
//!   capability trait ([`algorithms::Instance`]) so that callers decide how
//!   elements are compared and what happens with matched runs.  On top of it
//!   [`algorithms::onp::diff`] builds a full edit script for a
//!   [`algorithms::DiffHook`].
//! * [`text`]: This extends the general diffing functionality to text
//!   tokenized into characters, words, lines or graphemes.
//!
//! ```rust
//! use npdiff::{capture_diff_slices, algorithms::onp};
//!
//! assert_eq!(onp::edit_distance(b"ABCABBA", b"CBABAC"), 5);
//! let ops = capture_diff_slices(b"ABCABBA", b"CBABAC");
//! assert_eq!(ops.len(), 7);
//! ```
//!
//! # Features
//!
//! * `text`: enables the text diffing layer (on by default).
//! * `unicode`: enables grapheme level text diffs.
//! * `serde`: makes the diff operations and change tags serializable.
//!
//! The engine logs its progress through the `log` crate at trace level.
pub mod algorithms;
mod common;
pub mod text;

pub use self::algorithms::{DiffOp, DiffTag};
pub use self::common::*;
