//! Tokio runtime spawner implementation.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::core::Spawn;

/// Tokio-based spawner that executes guest tasks on a tokio runtime and keeps
/// their join handles so they can be awaited at shutdown.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl TokioSpawner {
    /// Create a new TokioSpawner from a tokio runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle,
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Spawner for the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }

    /// Number of spawned tasks not yet joined.
    pub fn pending(&self) -> usize {
        self.tasks.lock().iter().filter(|h| !h.is_finished()).count()
    }

    /// Await every task spawned so far. Returns how many were joined.
    pub async fn join_all(&self) -> usize {
        let handles: Vec<_> = std::mem::take(&mut *self.tasks.lock());
        let joined = handles.len();
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("guest task failed: {e}");
            }
        }
        joined
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.handle.spawn(fut);
        let mut tasks = self.tasks.lock();
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }
}

/// Build a multi-threaded runtime, defaulting to one worker per CPU.
pub fn build_runtime(worker_threads: Option<usize>) -> Result<tokio::runtime::Runtime, std::io::Error> {
    let workers = worker_threads.unwrap_or_else(num_cpus::get).max(1);
    tracing::debug!("starting tokio runtime with {workers} worker threads");
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
}
