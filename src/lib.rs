//! A compressed set of 16-bit integers.
//!
//! A [`ChunkSet`] stores `u16` values in whichever of three
//! representations is most compact for its current contents: a sorted
//! array for sparse sets, a dense 65536-bit bitmap, or a sequence of
//! run-length-encoded intervals for sets with long stretches of
//! consecutive values. Set algebra (`&`, `|`, `^`, `-` and their assign
//! forms), ranked access and a little-endian wire format are supported
//! across every pairing of representations.
//!
//! ```rust
//! use chunkset::ChunkSet;
//!
//! let mut evens = ChunkSet::new();
//! for v in (0..100u16).step_by(2) {
//!     evens.insert(v);
//! }
//! let mut low: ChunkSet = ChunkSet::new();
//! low.insert_range(0..50).unwrap();
//!
//! let both = &evens & &low;
//! assert_eq!(both.len(), 25);
//! assert!(both.contains(48));
//! assert!(!both.contains(50));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod fmt;
mod inherent;
mod iter;
mod ops;
#[cfg(feature = "std")]
mod serialization;
mod store;
mod util;

pub use crate::iter::{IntoIter, Iter};
pub use crate::store::StoreKind;
pub use crate::util::RangeError;

use crate::store::Store;

/// A compressed set of `u16` values.
///
/// The set transparently switches between a sorted array, a dense bitmap
/// and a run-length encoding as elements are added and removed;
/// [`ChunkSet::kind`] reports the current representation and
/// [`ChunkSet::optimize`] converts to the most compact one.
#[derive(Clone)]
pub struct ChunkSet {
    pub(crate) store: Store,
}
