//! Offset store implementations.

mod memory;

pub use memory::InMemoryOffsetStore;
