//! Runs a command on a [`SyncExecutor`] and shuts the executor down.

use std::future::Future;
use std::time::Duration;

use lessonsync_download::SyncExecutor;
use tracing::{debug, warn};

use crate::error::CliError;

/// Block on `job`, then shut `executor` down within `grace`.
///
/// A job error wins over a shutdown error; a shutdown that times out after a
/// successful job is still a failure.
pub fn run_to_completion<F>(
    executor: SyncExecutor,
    grace: Duration,
    job: F,
) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>> + Send + 'static,
{
    let outcome = executor.block_on_sync(async move { Ok(job.await) });
    let shutdown = executor.shutdown(grace);
    debug!("Sync executor stopped");

    let outcome = outcome.map_err(CliError::from).and_then(|result| result);
    match (outcome, shutdown) {
        (Err(err), Err(shutdown_err)) => {
            warn!(error = %shutdown_err, "Sync executor did not shut down cleanly");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), shutdown) => shutdown.map_err(CliError::from),
    }
}
