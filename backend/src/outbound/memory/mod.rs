//! In-process store used when no database URL is configured.
//!
//! One mutex guards all four collections, so every operation (including stock
//! reservation across several products) is a single unit of work.

mod store;

pub use store::MemoryStore;
