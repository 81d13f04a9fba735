//! Storage abstractions for service layer
//!
//! Contains the in-memory table backing the `mock` repositories so tests and
//! database-less runs share one implementation of the store semantics.

pub mod memory_table;

pub use memory_table::{Keyed, MemoryTable};
