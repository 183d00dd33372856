//! Wait-queue backends.

pub mod memory;

pub use memory::InMemoryWaitQueue;
