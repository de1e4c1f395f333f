// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval retry for polling checks.
//!
//! The check decides per failure whether another attempt makes sense
//! ([`Attempt::Retry`]) or whether polling must stop ([`Attempt::Fatal`]).
//!
//! ```ignore
//! let msg = do_with_retry("Wait for pod", 10, Duration::from_secs(1), || async {
//!     match probe().await {
//!         Ok(true) => Ok("ready"),
//!         Ok(false) => Err(Attempt::Retry("not ready")),
//!         Err(e) => Err(Attempt::Fatal(e)),
//!     }
//! })
//! .await?;
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::info;

/// Outcome of a failed check
#[derive(Debug, PartialEq)]
pub enum Attempt<E> {
    /// Condition not met yet; try again after the interval
    Retry(E),
    /// Stop polling and return the error
    Fatal(E),
}

/// Why [`do_with_retry`] gave up
#[derive(Debug, PartialEq)]
pub enum RetryError<E> {
    Fatal(E),
    MaxAttemptsExceeded {
        description: String,
        attempts: u32,
        last: E,
    },
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Fatal(e) => write!(f, "{}", e),
            RetryError::MaxAttemptsExceeded {
                description,
                attempts,
                last,
            } => write!(
                f,
                "'{}' unsuccessful after {} attempts: {}",
                description, attempts, last
            ),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RetryError<E> {}

/// Run `check` up to `max_attempts` times, sleeping `interval` between attempts.
///
/// The check always runs at least once. No sleep follows the final attempt.
pub async fn do_with_retry<F, Fut, T, E>(
    description: &str,
    max_attempts: u32,
    interval: Duration,
    mut check: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Attempt<E>>>,
    E: fmt::Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        info!(operation = %description, attempt = attempt, "{}", description);

        match check().await {
            Ok(value) => return Ok(value),
            Err(Attempt::Fatal(e)) => return Err(RetryError::Fatal(e)),
            Err(Attempt::Retry(e)) => {
                if attempt >= max_attempts {
                    return Err(RetryError::MaxAttemptsExceeded {
                        description: description.to_string(),
                        attempts: attempt,
                        last: e,
                    });
                }

                info!(
                    operation = %description,
                    attempt = attempt,
                    error = %e,
                    delay_ms = interval.as_millis(),
                    "Check not satisfied, retrying"
                );

                tokio::time::sleep(interval).await;
            }
        }
    }
}
