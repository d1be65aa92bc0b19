// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// One pending strike: a (network, candidate) pair plus where the signal came
/// from. Duplicates are allowed by design; every queued request is evaluated
/// independently.
#[derive(Debug, Clone)]
pub struct StrikeRequest {
    pub chain_id: u64,
    pub identifier: String,
    pub origin: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct PushResult {
    pub dropped_oldest: bool,
}

/// Bounded FIFO feeding the strike workers. Both the discovery loop and the
/// sentry push here, which keeps concurrent strike dispatch explicit and
/// bounded instead of fire-and-forget.
pub struct StrikeQueue {
    capacity: usize,
    queue: Mutex<VecDeque<StrikeRequest>>,
    notify: Notify,
}

pub type SharedStrikeQueue = Arc<StrikeQueue>;

impl StrikeQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            queue: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    pub async fn push(&self, request: StrikeRequest) -> PushResult {
        let mut queue = self.queue.lock().await;
        let dropped_oldest = if queue.len() >= self.capacity {
            queue.pop_front();
            true
        } else {
            false
        };
        queue.push_back(request);
        drop(queue);
        self.notify.notify_one();
        PushResult { dropped_oldest }
    }

    /// Oldest request first; strikes are not latest-wins. Waits until a
    /// request is available.
    pub async fn pop(&self) -> StrikeRequest {
        loop {
            let notified = self.notify.notified();
            {
                let mut queue = self.queue.lock().await;
                if let Some(request) = queue.pop_front() {
                    return request;
                }
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(chain_id: u64, identifier: &str) -> StrikeRequest {
        StrikeRequest {
            chain_id,
            identifier: identifier.to_string(),
            origin: "test",
        }
    }

    #[tokio::test]
    async fn pops_in_submission_order() {
        let q = StrikeQueue::new(8);
        q.push(request(1, "AAA")).await;
        q.push(request(56, "BBB")).await;

        assert_eq!(q.pop().await.identifier, "AAA");
        assert_eq!(q.pop().await.identifier, "BBB");
    }

    #[tokio::test]
    async fn drops_oldest_when_full() {
        let q = StrikeQueue::new(2);
        assert!(!q.push(request(1, "AAA")).await.dropped_oldest);
        assert!(!q.push(request(1, "BBB")).await.dropped_oldest);
        assert!(q.push(request(1, "CCC")).await.dropped_oldest);

        assert_eq!(q.pop().await.identifier, "BBB");
        assert_eq!(q.pop().await.identifier, "CCC");
    }

    #[tokio::test]
    async fn duplicate_requests_are_kept() {
        let q = StrikeQueue::new(8);
        q.push(request(1, "AAA")).await;
        q.push(request(1, "AAA")).await;

        assert_eq!(q.pop().await.identifier, "AAA");
        assert_eq!(q.pop().await.identifier, "AAA");
    }
}
