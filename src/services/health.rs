// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::services::strike::executor::StrikeStats;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct HealthState {
    pub mode: &'static str,
    pub sentry_active: bool,
    pub stats: Arc<StrikeStats>,
}

/// Tiny status responder; any GET path gets the same JSON document. Bind
/// failure degrades the endpoint, never the pipeline.
pub async fn spawn_health_server(port: u16, state: HealthState) -> Option<SocketAddr> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::warn!(target: "health", "Health server failed to bind: {}", e);
            return None;
        }
    };

    let local = listener.local_addr().ok();
    if let Some(addr) = local {
        tracing::info!(target: "health", "Health server listening on {}", addr);
    }

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let mut buf = [0u8; 1024];
                    let _ = socket.read(&mut buf).await.unwrap_or(0);

                    let body = render_status(&state);
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                }
                Err(e) => {
                    tracing::warn!(target: "health", "Health accept error: {}", e);
                    continue;
                }
            }
        }
    });

    local
}

fn render_status(state: &HealthState) -> String {
    let stats = &state.stats;
    json!({
        "engine": "gemstrike",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.mode,
        "sentry_active": state.sentry_active,
        "strikes": {
            "attempted": stats.attempted.load(Ordering::Relaxed),
            "submitted": stats.submitted.load(Ordering::Relaxed),
            "gem_rejected": stats.gem_rejected.load(Ordering::Relaxed),
            "no_funds": stats.no_funds.load(Ordering::Relaxed),
            "reverted": stats.reverted.load(Ordering::Relaxed),
            "insufficient_funds": stats.insufficient_funds.load(Ordering::Relaxed),
        },
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_document_carries_identity_and_counters() {
        let state = HealthState {
            mode: "dry-run",
            sentry_active: false,
            stats: Arc::new(StrikeStats::default()),
        };
        state.stats.attempted.fetch_add(3, Ordering::Relaxed);

        let body = render_status(&state);
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["engine"], "gemstrike");
        assert_eq!(parsed["mode"], "dry-run");
        assert_eq!(parsed["sentry_active"], false);
        assert_eq!(parsed["strikes"]["attempted"], 3);
    }
}
