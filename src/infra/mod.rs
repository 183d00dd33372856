//! Infrastructure adapters for wait queues.

pub mod queue;
pub use queue::InMemoryWaitQueue;
