use std::future::Future;
use std::time::Duration;

/// How long teardown waits for blocking work (a stalled fetch) before the
/// runtime is abandoned.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Runs `future` to completion on a multi-threaded runtime, then shuts the
/// runtime down without waiting more than `grace` for blocking tasks.
pub fn block_on_with_grace<F: Future>(future: F, grace: Duration) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(grace);
    Ok(output)
}
