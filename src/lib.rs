//! chain-table: a single-threaded, separate-chaining hash table with
//! explicit, validated resizing and a debug rendering of its buckets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small hash table whose bucket layout is observable, so that
//!   hashing, collisions and rehashing can be inspected directly.
//! - Layers:
//!   - `index`: the bucket-index function shared by every operation.
//!   - `Chain<K, V>`: one bucket; an insertion-ordered list of entries.
//!   - `HashTable<K, V, S>`: the bucket vector, the live-entry count and
//!     the hasher; all public operations live here.
//!
//! Constraints
//! - Single-threaded; mutation goes through `&mut self`, no locking.
//! - Capacity is always a non-zero power of two. Construction and
//!   `resize_table` both reject anything else with `CapacityError`.
//! - Unique keys: `put` on an existing key replaces the value in place.
//!
//! Hash codes and rehashing
//! - Each entry stores the `u64` hash computed at insertion. Resizing and
//!   removal index with the stored hash; `K: Hash` is never invoked after
//!   insertion.
//! - `resize_table` redistributes every entry individually, so chains
//!   that split across the new capacity end up in their correct buckets.
//!
//! Notes and non-goals
//! - No automatic growth. `load_factor()` is reported but never acted on;
//!   callers resize explicitly.
//! - No ordering guarantees across resizes beyond "bucket order, then
//!   chain order" at a given capacity.
//! - Keys must keep stable `Hash`/`Eq` while stored. A key whose hash or
//!   equality changes is not found again; this is memory-safe but
//!   otherwise unspecified.

mod chain;
mod error;
pub mod hash_table;
#[cfg(test)]
mod hash_table_proptest;
pub mod index;

// Public surface
pub use error::CapacityError;
pub use hash_table::{HashTable, Iter};
pub use index::{bucket_index, DEFAULT_CAPACITY};
