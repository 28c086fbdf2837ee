//! lfukit: an LFU cache with O(1) insert, lookup, and eviction built on
//! frequency buckets.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
