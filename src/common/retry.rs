// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry an idempotent async read with exponential backoff. Broadcasts must
/// never go through here: a strike attempt gets exactly one send.
pub async fn retry_async<F, Fut, T, E>(
    mut op: F,
    attempts: usize,
    initial_delay: Duration,
) -> Result<T, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut delay = initial_delay;
    for attempt in 1..attempts {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(_) => {
                sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
        }
    }
    op(attempts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicUsize::new(0);
        let res: Result<u64, ()> = retry_async(
            |_| {
                let n = calls.fetch_add(1, Ordering::Relaxed);
                async move { if n == 0 { Ok(11) } else { Err(()) } }
            },
            3,
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(res.unwrap(), 11);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn exhausts_attempts_then_yields_last_error() {
        let calls = AtomicUsize::new(0);
        let res: Result<u64, usize> = retry_async(
            |attempt| {
                calls.fetch_add(1, Ordering::Relaxed);
                async move { Err(attempt) }
            },
            3,
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(res.unwrap_err(), 3);
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }
}
