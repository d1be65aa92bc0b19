// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::parsing::first_ticker;
use crate::domain::constants::DISCOVERY_PLACEHOLDER;
use crate::domain::error::AppError;
use crate::services::signals::web_intel::{IntelClient, INTEL_SOURCES};
use crate::services::strike::executor::StrikeExecutor;
use crate::services::strike::queue::{SharedStrikeQueue, StrikeRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Drain the strike queue with a fixed pool of workers. Attempts across
/// networks run concurrently up to the pool size; each attempt's internal
/// sequence stays atomic within its worker.
pub fn spawn_workers(
    count: usize,
    queue: SharedStrikeQueue,
    executor: Arc<StrikeExecutor>,
) -> Vec<JoinHandle<()>> {
    (0..count.max(1))
        .map(|worker| {
            let queue = queue.clone();
            let executor = executor.clone();
            tokio::spawn(async move {
                loop {
                    let request = queue.pop().await;
                    let outcome = executor
                        .attempt(request.chain_id, &request.identifier)
                        .await;
                    tracing::debug!(
                        target: "strike",
                        worker,
                        chain_id = request.chain_id,
                        candidate = %request.identifier,
                        origin = request.origin,
                        outcome = outcome.label(),
                        "Worker processed strike request"
                    );
                }
            })
        })
        .collect()
}

/// Top-level scheduler. Every cycle polls each web-intelligence source,
/// queues one strike per (network, extracted ticker), probes the fallback
/// token once per network, then sleeps.
pub struct DiscoveryLoop {
    intel: IntelClient,
    queue: SharedStrikeQueue,
    chains: Vec<u64>,
    interval: Duration,
}

impl DiscoveryLoop {
    pub fn new(
        intel: IntelClient,
        queue: SharedStrikeQueue,
        chains: Vec<u64>,
        interval: Duration,
    ) -> Self {
        Self {
            intel,
            queue,
            chains,
            interval,
        }
    }

    pub async fn run(self) -> Result<(), AppError> {
        tracing::info!(
            target: "discovery",
            chains = ?self.chains,
            interval_secs = self.interval.as_secs(),
            sources = INTEL_SOURCES.len(),
            "Discovery loop started"
        );

        loop {
            self.cycle().await;
            sleep(self.interval).await;
        }
    }

    async fn cycle(&self) {
        let fetches = INTEL_SOURCES.iter().map(|source| self.intel.fetch(source));
        let bodies = futures::future::join_all(fetches).await;

        let mut queued = 0usize;
        for (source, result) in INTEL_SOURCES.iter().zip(bodies) {
            // One failing source must not keep the others from being mined.
            let body = match result {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        target: "discovery",
                        source = source.name,
                        error = %e,
                        "Signal source failed this cycle"
                    );
                    continue;
                }
            };

            let Some(ticker) = first_ticker(&body) else {
                tracing::debug!(
                    target: "discovery",
                    source = source.name,
                    "No ticker in response"
                );
                continue;
            };

            tracing::info!(
                target: "discovery",
                source = source.name,
                ticker = %ticker,
                "Candidate extracted"
            );
            for chain_id in &self.chains {
                self.enqueue(*chain_id, ticker.clone(), source.name).await;
                queued += 1;
            }
        }

        for chain_id in &self.chains {
            self.enqueue(*chain_id, DISCOVERY_PLACEHOLDER.to_string(), "discovery")
                .await;
            queued += 1;
        }

        tracing::debug!(target: "discovery", queued, "Cycle complete");
    }

    async fn enqueue(&self, chain_id: u64, identifier: String, origin: &'static str) {
        let result = self
            .queue
            .push(StrikeRequest {
                chain_id,
                identifier,
                origin,
            })
            .await;
        if result.dropped_oldest {
            tracing::warn!(
                target: "discovery",
                chain_id,
                "Strike queue full; oldest request dropped"
            );
        }
    }
}
