#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod hash;

/// A key-value map over the dense [`HashTable`] with a configurable hasher.
pub mod hash_map;

/// A set over the dense [`HashTable`] with a configurable hasher.
pub mod hash_set;

pub mod hash_table;

#[cfg(feature = "serde")]
mod serde_impls;

pub use equivalent::Equivalent;
pub use hash::DefaultHashBuilder;
pub use hash::MixedHasher;
pub use hash::WyHash;
pub use hash::WyHashBuilder;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
