//! The O(NP) diff (longest common subsequence) engine.
//!
//! The implementation in this module is relatively low level and exposes
//! the most generic bounds possible.  It is split into two layers:
//!
//! * The engine itself ([`onp::calculate`]) only knows about an
//!   [`Instance`]: something that owns an [`InstanceState`] with the
//!   forward point array ([`FpArray`]) and can compare two elements by
//!   index.  It reports every computed diagonal through
//!   [`Instance::common_sequence`].
//! * Instances built on top of it.  [`SnakeTrace`] merely observes the
//!   computation, while [`onp::diff`] chains the matched runs in a
//!   [`LinkPool`] and emits an edit script into a [`DiffHook`].
//!
//! Note that the diff hook does not get access to the actual values but
//! only the indexes.  [`Capture`] records the operations as [`DiffOp`]s and
//! [`Replace`] coalesces deletions and insertions into replacements.

mod capture;
mod fp_array;
mod hook;
mod instance;
mod link;
mod replace;
mod trace;

pub use capture::*;
pub use fp_array::*;
pub use hook::*;
pub use instance::*;
pub use link::*;
pub use replace::*;
pub use trace::*;

pub mod onp;
