use std::time::Duration;

use backon::{BlockingRetryable, ExponentialBuilder};

use crate::srs::SrsError;

/// Attempts made for an operation that keeps hitting lock contention.
pub const MAX_ATTEMPTS: usize = 3;

fn conflict_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(25))
        .with_max_delay(Duration::from_millis(500))
        .with_max_times(MAX_ATTEMPTS - 1)
        .with_jitter()
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or has
/// been attempted `MAX_ATTEMPTS` times.
pub fn retry_on_conflict<T, F>(op: F) -> Result<T, SrsError>
where
    F: FnMut() -> Result<T, SrsError>,
{
    let mut attempt = 0;
    op.retry(conflict_backoff())
        .sleep(std::thread::sleep)
        .when(SrsError::is_retryable)
        .notify(|err: &SrsError, delay: Duration| {
            attempt += 1;
            log::warn!(
                "{} on attempt {}/{}, retrying in {:?}",
                err,
                attempt,
                MAX_ATTEMPTS,
                delay
            );
        })
        .call()
}
