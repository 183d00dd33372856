//! Runtime adapters for spawning guest occupancy.

pub mod tokio_spawner;

pub use tokio_spawner::{build_runtime, TokioSpawner};
