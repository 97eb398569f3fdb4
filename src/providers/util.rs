use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retries a transient-failure-prone async operation.
///
/// Runs `operation` up to `1 + retries` times, sleeping `delay_ms` between
/// attempts, and returns the first success or the final error.
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt <= retries => {
                debug!("Attempt {} failed: {}. Retrying in {}ms", attempt, err, delay_ms);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(err) => return Err(Error::from(err)),
        }
    }
}
