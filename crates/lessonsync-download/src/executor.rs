//! Dedicated runtime for running a sync to completion from synchronous code.
//!
//! Work is spawned through a [`TaskTracker`] so shutdown can wait for it, and
//! every sync future races a shared [`CancellationToken`].

use std::future::Future;
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};

/// Grace period granted to outstanding tasks at each shutdown stage.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub struct SyncExecutor {
    runtime: Runtime,
    tracker: TaskTracker,
    token: CancellationToken,
}

impl SyncExecutor {
    pub fn new() -> SyncResult<Self> {
        let runtime = Builder::new_multi_thread()
            .thread_name("lessonsync-sync")
            .enable_all()
            .build()
            .map_err(|source| SyncError::RuntimeSetup { source })?;
        Ok(Self {
            runtime,
            tracker: TaskTracker::new(),
            token: CancellationToken::new(),
        })
    }

    /// Token that cancels every sync run on this executor.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn handle(&self) -> &Handle {
        self.runtime.handle()
    }

    /// Spawn a tracked task; shutdown waits for it.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.tracker.spawn_on(future, self.runtime.handle())
    }

    /// Run `future` to completion, or until the executor is cancelled.
    pub fn block_on_sync<F, T>(&self, future: F) -> SyncResult<T>
    where
        F: Future<Output = SyncResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.token.clone();
        let task = self.spawn(async move {
            tokio::select! {
                () = token.cancelled() => Err(SyncError::Cancelled),
                result = future => result,
            }
        });
        self.runtime
            .block_on(task)
            .map_err(|err| SyncError::TaskFailed {
                message: err.to_string(),
            })?
    }

    /// Stop accepting work and wait for outstanding tasks.
    ///
    /// Tasks get `grace` to finish on their own, then are cancelled and get
    /// one more `grace` before the runtime is torn down regardless.
    pub fn shutdown(self, grace: Duration) -> SyncResult<()> {
        let Self {
            runtime,
            tracker,
            token,
        } = self;
        tracker.close();

        let wait = |runtime: &Runtime| {
            runtime.block_on(async { tokio::time::timeout(grace, tracker.wait()).await.is_ok() })
        };
        if wait(&runtime) {
            debug!("Sync executor drained");
            runtime.shutdown_timeout(grace);
            return Ok(());
        }

        warn!(
            outstanding = tracker.len(),
            grace = ?grace,
            "Sync tasks still running after grace period, cancelling"
        );
        token.cancel();
        let drained = wait(&runtime);
        runtime.shutdown_timeout(Duration::ZERO);
        if drained {
            Ok(())
        } else {
            Err(SyncError::ShutdownTimedOut { grace })
        }
    }
}
