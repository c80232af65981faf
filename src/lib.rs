//! chained-hashtable: a single-threaded, string-keyed hash table storing a
//! small tagged value, using separate chaining and growth by doubling.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash table whose every structural step (hash, index, chain
//!   walk, relink) is plain and checkable, with owned keys and `Copy`
//!   values.
//! - Layers:
//!   - `Value`: closed sum over nil / boolean / i64 / f64 / custom handle.
//!   - `hash`: 64-bit FNV-style byte hash, also usable as a `BuildHasher`.
//!   - `Chain`/`Bucket`: owned singly-linked nodes; all walks iterative.
//!   - `HashTable<S>`: bucket array, counts, insert/remove/lookup/growth.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (the custom handle is a raw pointer,
//!   and the reentrancy guard carries a `*mut ()` marker).
//! - Keys are copied into the table on first insertion (`Box<str>`); the
//!   caller's buffer is never retained.
//! - Values are `Copy` and returned by value; absence reads as `Nil`.
//! - Tree-shaped ownership: the bucket array owns chain heads, each node
//!   owns its successor. No `Rc`, no cycles.
//!
//! Growth
//! - Before placing a key, if `count / capacity >= 0.5` the bucket array
//!   doubles. The check uses the count before the insert, and runs even
//!   when the key turns out to exist already.
//! - Growth relinks existing nodes into the new array (tail-append, so
//!   relative order within a chain is kept) without reallocating keys or
//!   values. Capacity never shrinks.
//! - Every key is hashed for the new array before any node moves. A hasher
//!   that panics mid-growth leaves the old array and `count` untouched.
//!
//! Failure classes
//! - Reading a `Value` as the wrong kind through `as_*` panics: that is a
//!   caller bug. `try_as_*` returns `KindError` for callers that branch.
//! - Missing keys are ordinary outcomes: `get` yields `Nil`, `remove` and
//!   `contains` yield `false`.
//!
//! Reentrancy policy
//! - The only user code the table runs is the `BuildHasher`. A debug-only
//!   guard panics on nested entry while an operation is in flight; release
//!   builds compile it away.
//!
//! Custom payloads
//! - `Custom` is a non-owning handle. The table never dereferences or frees
//!   it: not on overwrite, on `remove`, or when the table drops.
//!
//! Notes and non-goals
//! - No iteration, no shrinking, no generic key types, no persistence.

mod bucket;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
mod reentrancy;
pub mod value;

// Public surface
pub use hash::{FnvBuildHasher, FnvHasher};
pub use hash_table::{HashTable, INITIAL_CAPACITY, MAX_LOAD_FACTOR};
pub use value::{Custom, KindError, Value, ValueKind};
